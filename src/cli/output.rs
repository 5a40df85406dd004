//! CLI output formatting.
//!
//! This module contains all output formatting functions for the CLI.
//! Extracted to enable testing of output generation.

use crate::geometry::metamorphic::MetamorphicResult;
use crate::seasons::{ApsisEvent, SeasonCalendar, SeasonSpan};

/// Print version information.
pub fn print_version() {
    println!("orrery {}", env!("CARGO_PKG_VERSION"));
}

/// Print help message.
pub fn print_help() {
    println!(
        r"orrery - schematic seasonal orbit diagrams

USAGE:
    orrery <COMMAND> [OPTIONS]

COMMANDS:
    render [config.yaml]        Render a diagram to SVG (Titan preset when omitted)
        -o, --output <FILE>     Output path (default: seasons.svg)
        --date <YYYY-MM-DD>     Move the moon to this date before rendering
        --json                  Print the assembled scene as JSON instead

    validate <config.yaml>      Validate a diagram configuration file

    verify [config.yaml]        Verify geometric invariants of a configured orbit
        --samples <N>           Ls samples per relation (default: 360)

    init                        Print the Titan preset configuration as YAML
        -o, --output <FILE>     Write it to a file instead

    info                        Dump the Titan season calendar

    ls <YYYY-MM-DD>             Solar longitude at a date
    date <LS[+N]>               Date at a solar longitude, N orbits after the epoch

    help                        Show this help message
    version                     Show version information

EXAMPLES:
    orrery render -o titan.svg
    orrery render custom.yaml --date 2005-01-14
    orrery verify custom.yaml --samples 720
    orrery init -o my-diagram.yaml
    orrery ls 1980-11-12
    orrery date 90+1

NOTES:
    The 'ls', 'date' and 'info' commands use the built-in Titan calendar,
    whose epoch (Ls 0, northern vernal equinox) is 1980-02-22.
"
    );
}

/// Print a season calendar: the fit parameters, then one row per
/// season with boundary dates, lengths and sun distances.
///
/// # Arguments
///
/// * `calendar` - The calendar whose parameters head the table
/// * `cycles` - Season spans, one `Vec` per orbit
pub fn print_calendar(calendar: &SeasonCalendar, cycles: &[Vec<SeasonSpan>]) {
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    println!("{} Season Calendar", calendar.name);
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━\n");

    println!("  Epoch     : {} (Ls 0, northern vernal equinox)", calendar.epoch);
    println!(
        "  Orbit     : {} Earth days ({:.1} {} days)",
        calendar.orbit_days,
        calendar.orbit_local_days(),
        calendar.name
    );
    println!("  Obliquity : {:.2} deg", calendar.obliquity_deg);
    println!("  Fit       : 360 (date - epoch) / orbit = Ls + A sin(Ls - C) + B");
    println!(
        "              A = {:.4}, B = {:.4}, C = {:.4}",
        calendar.amplitude_deg, calendar.offset_deg, calendar.phase_deg
    );

    println!("\n  Season            Ls    Start        End           Days   Sun (AU)");
    for spans in cycles {
        println!();
        for span in spans {
            println!(
                "  {:<16} {:>3}    {}   {}   {:>6}   {:.2}",
                span.season,
                span.season.start_ls(),
                span.start,
                span.end,
                span.length_days(),
                span.radius_au
            );
        }
    }

    println!();
    print_apsides("Perihelion", &calendar.perihelia);
    print_apsides("Aphelion  ", &calendar.aphelia);
}

/// Print metamorphic relation results with a pass/fail verdict.
///
/// # Arguments
///
/// * `results` - One entry per relation checked
pub fn print_verify_results(results: &[MetamorphicResult]) {
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    println!("Geometry Invariants");
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━\n");

    for result in results {
        let sym = if result.passed { "✓" } else { "✗" };
        println!(
            "  {sym} {:<20} error {:.3e} (tolerance {:.1e})",
            result.relation, result.error, result.tolerance
        );
        if !result.passed {
            println!("      {}", result.details);
        }
    }

    let passed = results.iter().all(|result| result.passed);
    let (sym, status) = if passed { ("✓", "PASSED") } else { ("✗", "FAILED") };
    println!("\n━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    println!("{sym} Result: {status}");
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━\n");
}

/// Print one apsis line: all event dates, then the shared sun distance.
fn print_apsides(label: &str, events: &[ApsisEvent]) {
    if events.is_empty() {
        return;
    }
    let dates: Vec<String> = events.iter().map(|event| event.date.to_string()).collect();
    println!(
        "  {label}: {}  ({:.2} AU)",
        dates.join(" | "),
        events[0].radius_au
    );
}
