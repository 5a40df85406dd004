//! Titan Seasons Demo
//!
//! Walks the full diagram pipeline for the bundled Titan preset:
//! - Fitted season calendar (dates to solar longitudes)
//! - Record resolution (Voyager, Huygens, Cassini)
//! - Scene assembly and SVG output
//!
//! Run with: cargo run --example titan_seasons

use orrery::prelude::*;
use orrery::render;

fn main() {
    println!("=== Titan Seasons Demo ===\n");

    // 1. The preset configuration
    let config = DiagramConfig::titan();
    println!("1. Preset Configuration:");
    println!("   Name: {}", config.diagram.name);
    println!(
        "   Orbit: {} x {} canvas units, rotated {} deg",
        config.orbit.semi_major, config.orbit.semi_minor, config.orbit.rotation_deg
    );
    println!("   Eccentricity: {:.4}", config.orbit.eccentricity);
    println!(
        "   Records: {} flybys, {} spans, {} year marks",
        config.flybys.len(),
        config.spans.len(),
        config.year_marks.len()
    );
    println!();

    // 2. The fitted season calendar
    let calendar = config.season_calendar().expect("preset carries a calendar");
    println!("2. Season Calendar:");
    println!("   Epoch (Ls 0): {}", calendar.epoch);
    println!(
        "   Orbit: {} Earth days ({:.1} Titan days)",
        calendar.orbit_days,
        calendar.orbit_local_days()
    );
    let spans = calendar.season_spans(0).expect("orbit zero spans");
    for span in &spans {
        println!(
            "   {:<16} {} to {} ({} days)",
            span.season,
            span.start,
            span.end,
            span.length_days()
        );
    }
    println!();

    // 3. Dated records resolved to solar longitudes
    println!("3. Record Resolution:");
    for flyby in &config.flybys {
        let date = flyby.position.date.expect("preset flybys are dated");
        let ls = calendar.ls_of_date(date).expect("date inside fit range");
        println!("   {:<10} {} -> Ls {:6.2}", flyby.name, date, ls);
    }
    println!();

    // 4. Scene assembly
    let scene = config
        .to_diagram()
        .expect("preset resolves")
        .assemble();
    println!("4. Scene Assembly:");
    println!("   Canvas: {} x {}", scene.width, scene.height);
    println!("   Elements: {}", scene.element_count());
    println!("   Warnings: {}", scene.warnings.len());
    println!();

    // 5. SVG output
    let output = "titan_seasons.svg";
    render::save_svg(&scene, output).expect("svg written");
    let svg = render::to_svg_string(&scene);
    println!("5. SVG Output:");
    println!("   Wrote {output} ({} bytes)", svg.len());
    println!();

    println!("=== Demo Complete ===");
}
