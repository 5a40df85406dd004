//! CLI command handlers.
//!
//! This module contains the execution logic for each CLI command.
//! Extracted to enable comprehensive testing of command behavior.

use std::path::Path;
use std::process::ExitCode;

use chrono::NaiveDate;

use crate::config::{DiagramConfig, OrbitPositionSpec};
use crate::geometry::metamorphic::verify_anchor;
use crate::geometry::{OrbitEllipse, SunAnchor};
use crate::render;
use crate::seasons::SeasonCalendar;

use super::output::{print_calendar, print_help, print_verify_results, print_version};
use super::{Args, Command};

/// Main CLI entry point.
///
/// Dispatches to the appropriate command handler based on parsed arguments.
#[must_use]
pub fn run_cli(args: Args) -> ExitCode {
    match args.command {
        Command::Render {
            config_path,
            output,
            moon_date,
            json,
        } => render_diagram(config_path.as_deref(), &output, moon_date, json),
        Command::Validate { config_path } => validate_config(&config_path),
        Command::Verify {
            config_path,
            samples,
        } => verify_geometry(config_path.as_deref(), samples),
        Command::Init { output } => init_config(output.as_deref()),
        Command::Info => calendar_info(),
        Command::LsAt { date } => ls_at(date),
        Command::DateAt { ls, orbit } => date_at(ls, orbit),
        Command::Help => {
            print_help();
            ExitCode::SUCCESS
        }
        Command::Version => {
            print_version();
            ExitCode::SUCCESS
        }
    }
}

/// Load a configuration file, or fall back to the Titan preset.
fn load_config(config_path: Option<&Path>) -> crate::OrreryResult<DiagramConfig> {
    match config_path {
        Some(path) => DiagramConfig::load(path),
        None => Ok(DiagramConfig::titan()),
    }
}

/// Render a diagram to SVG or, with `json`, dump the scene as JSON.
///
/// # Arguments
///
/// * `config_path` - Configuration file; `None` renders the Titan preset
/// * `output` - Output SVG path
/// * `moon_date` - Optional date the moon is moved to before rendering
/// * `json` - Print the assembled scene as JSON instead of writing SVG
#[must_use]
pub fn render_diagram(
    config_path: Option<&Path>,
    output: &Path,
    moon_date: Option<NaiveDate>,
    json: bool,
) -> ExitCode {
    let mut config = match load_config(config_path) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {e}");
            return ExitCode::from(1);
        }
    };

    if let Some(date) = moon_date {
        let Some(moon) = config.moon.as_mut() else {
            eprintln!("Error: --date was given but the configuration has no moon");
            return ExitCode::from(1);
        };
        moon.position = OrbitPositionSpec::on_date(date);
    }

    let diagram = match config.to_diagram() {
        Ok(diagram) => diagram,
        Err(e) => {
            eprintln!("Error: {e}");
            return ExitCode::from(1);
        }
    };

    let scene = diagram.assemble();
    for warning in &scene.warnings {
        eprintln!("Warning: {warning}");
    }

    if json {
        return match serde_json::to_string_pretty(&scene) {
            Ok(text) => {
                println!("{text}");
                ExitCode::SUCCESS
            }
            Err(e) => {
                eprintln!("Error: {e}");
                ExitCode::from(1)
            }
        };
    }

    match render::save_svg(&scene, output) {
        Ok(()) => {
            println!(
                "Wrote {} ({} elements)",
                output.display(),
                scene.element_count()
            );
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::from(1)
        }
    }
}

/// Validate a configuration file and report what it describes.
///
/// # Arguments
///
/// * `path` - Path to the configuration file
#[must_use]
pub fn validate_config(path: &Path) -> ExitCode {
    match DiagramConfig::load(path) {
        Ok(config) => {
            println!("✓ {} is valid", path.display());
            println!("  Diagram    : {}", config.diagram.name);
            println!(
                "  Orbit      : a = {}, b = {}, rotated {} deg",
                config.orbit.semi_major, config.orbit.semi_minor, config.orbit.rotation_deg
            );
            println!(
                "  Records    : {} year marks, {} flybys, {} spans, {} legend entries",
                config.year_marks.len(),
                config.flybys.len(),
                config.spans.len(),
                config.legend.len()
            );
            match &config.moon {
                Some(moon) => println!("  Moon       : {}", moon.name),
                None => println!("  Moon       : none"),
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("✗ {} is invalid: {e}", path.display());
            ExitCode::from(1)
        }
    }
}

/// Verify the geometric invariants of a configured orbit.
///
/// Runs every metamorphic relation against the sun anchor the
/// configuration describes.
///
/// # Arguments
///
/// * `config_path` - Configuration file; `None` checks the Titan preset
/// * `samples` - Ls samples per relation
#[must_use]
pub fn verify_geometry(config_path: Option<&Path>, samples: usize) -> ExitCode {
    let config = match load_config(config_path) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {e}");
            return ExitCode::from(1);
        }
    };

    let ellipse = OrbitEllipse::new(
        config.orbit.semi_major,
        config.orbit.semi_minor,
        config.orbit.rotation_deg,
    );
    let sun = SunAnchor::new(ellipse, config.orbit.eccentricity);

    println!("Verifying orbit geometry: {}", config.diagram.name);
    println!("Samples per relation: {samples}\n");

    let results = verify_anchor(&sun, samples);
    print_verify_results(&results);

    if results.iter().all(|result| result.passed) {
        ExitCode::SUCCESS
    } else {
        ExitCode::from(1)
    }
}

/// Write the Titan preset configuration as YAML.
///
/// # Arguments
///
/// * `output` - Destination path; `None` prints to stdout
#[must_use]
pub fn init_config(output: Option<&Path>) -> ExitCode {
    let yaml = match DiagramConfig::titan().to_yaml() {
        Ok(yaml) => yaml,
        Err(e) => {
            eprintln!("Error: {e}");
            return ExitCode::from(1);
        }
    };

    match output {
        Some(path) => match std::fs::write(path, &yaml) {
            Ok(()) => {
                println!("Wrote {}", path.display());
                ExitCode::SUCCESS
            }
            Err(e) => {
                eprintln!("Error writing {}: {e}", path.display());
                ExitCode::from(1)
            }
        },
        None => {
            print!("{yaml}");
            ExitCode::SUCCESS
        }
    }
}

/// Dump the Titan season calendar for the first two orbits.
#[must_use]
pub fn calendar_info() -> ExitCode {
    let calendar = SeasonCalendar::titan();
    let cycles: crate::OrreryResult<Vec<_>> =
        (0..2).map(|orbit| calendar.season_spans(orbit)).collect();

    match cycles {
        Ok(cycles) => {
            print_calendar(&calendar, &cycles);
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::from(1)
        }
    }
}

/// Print the solar longitude at a date on the Titan calendar.
///
/// # Arguments
///
/// * `date` - Date to convert
#[must_use]
pub fn ls_at(date: NaiveDate) -> ExitCode {
    match SeasonCalendar::titan().ls_of_date(date) {
        Ok(ls) => {
            println!("Ls: {ls:.2}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::from(1)
        }
    }
}

/// Print the date at a solar longitude on the Titan calendar.
///
/// # Arguments
///
/// * `ls` - Solar longitude in degrees
/// * `orbit` - Whole orbits past the calendar epoch
#[must_use]
pub fn date_at(ls: f64, orbit: i32) -> ExitCode {
    match SeasonCalendar::titan().date_of_ls(ls, orbit) {
        Ok(date) => {
            println!("Date: {date}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::from(1)
        }
    }
}
