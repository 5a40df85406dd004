//! # orrery
//!
//! Schematic seasonal orbit diagrams as SVG.
//!
//! An orbit drawn as a rotated ellipse with the sun offset to a focus,
//! annotated with equinox and solstice chords, season coverage bands,
//! flyby ticks, year marks and a moon figure. A one-term sine fit maps
//! calendar dates to solar longitudes, so every annotation can be
//! placed by date as well as by angle.
//!
//! ## Example
//!
//! ```rust
//! use orrery::prelude::*;
//!
//! // Render the bundled Titan diagram
//! let config = DiagramConfig::titan();
//! let scene = config.to_diagram()?.assemble();
//! let svg = orrery::render::to_svg_string(&scene);
//! assert!(svg.starts_with("<svg"));
//! # Ok::<(), OrreryError>(())
//! ```

#![forbid(unsafe_code)]
#![deny(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![warn(clippy::pedantic, clippy::nursery)]
#![allow(
    clippy::module_name_repetitions,
    clippy::similar_names,
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::suboptimal_flops,  // Numerical code choices are intentional
    clippy::imprecise_flops,
    clippy::too_many_lines,
    clippy::missing_const_for_fn,  // Many functions can't be const in stable Rust
)]

pub mod cli;
pub mod config;
pub mod error;
pub mod geometry;
pub mod render;
pub mod scene;
pub mod seasons;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::config::{DiagramConfig, DiagramConfigBuilder};
    pub use crate::error::{OrreryError, OrreryResult};
    pub use crate::geometry::{OrbitEllipse, SunAnchor};
    pub use crate::scene::{DiagramScene, MoonFigure, SeasonsDiagram};
    pub use crate::seasons::{Season, SeasonCalendar};
}

/// Re-export for public API
pub use error::{OrreryError, OrreryResult};
