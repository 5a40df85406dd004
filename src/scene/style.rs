//! Stroke, fill and transform styling for scene elements.
//!
//! Colors are CSS color strings because SVG consumes them verbatim and
//! the diagram palette is all named colors (`gold`, `dimgray`, ...).
//! The associated constructors cover the house palette of the seasonal
//! diagram; anything else can be built field by field.

use serde::{Deserialize, Serialize};

/// Fill opacity used by coverage bands.
pub const BAND_OPACITY: f64 = 0.3;

/// Paint style for a shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShapeStyle {
    /// Stroke color, `None` for no stroke.
    pub stroke: Option<String>,
    /// Stroke width in canvas units.
    pub stroke_width: f64,
    /// SVG dash pattern, `None` for solid.
    pub stroke_dash: Option<String>,
    /// Fill color, `None` for no fill.
    pub fill: Option<String>,
    /// Overall opacity.
    pub opacity: f64,
}

impl Default for ShapeStyle {
    fn default() -> Self {
        Self {
            stroke: Some("black".to_string()),
            stroke_width: 1.0,
            stroke_dash: None,
            fill: None,
            opacity: 1.0,
        }
    }
}

impl ShapeStyle {
    /// Solid fill, no stroke.
    #[must_use]
    pub fn filled(color: &str) -> Self {
        Self {
            stroke: None,
            fill: Some(color.to_string()),
            ..Self::default()
        }
    }

    /// Finely dotted orbit outline.
    #[must_use]
    pub fn orbit_outline() -> Self {
        Self {
            stroke_dash: Some("1,3".to_string()),
            ..Self::default()
        }
    }

    /// Dashed major-axis line.
    #[must_use]
    pub fn major_axis() -> Self {
        Self {
            stroke_dash: Some("2,5".to_string()),
            ..Self::default()
        }
    }

    /// Sparsely dotted equinox and solstice chords.
    #[must_use]
    pub fn season_chord() -> Self {
        Self {
            stroke_dash: Some("1,10".to_string()),
            ..Self::default()
        }
    }

    /// Plain black hairline for ticks, poles and equators.
    #[must_use]
    pub fn hairline() -> Self {
        Self::default()
    }

    /// Translucent band fill.
    #[must_use]
    pub fn band_fill(color: &str) -> Self {
        Self {
            stroke: None,
            fill: Some(color.to_string()),
            opacity: BAND_OPACITY,
            ..Self::default()
        }
    }

    /// Gray connector between the sun and the moon.
    #[must_use]
    pub fn sun_line() -> Self {
        Self {
            stroke: Some("gray".to_string()),
            ..Self::default()
        }
    }
}

/// A 2D transform applied to a scene group.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Transform {
    /// Rotate about the group origin.
    Rotate {
        /// Rotation in degrees, clockwise on screen.
        degrees: f64,
    },
    /// Translate by an offset.
    Translate {
        /// Horizontal offset.
        dx: f64,
        /// Vertical offset.
        dy: f64,
    },
}

impl Transform {
    /// SVG `transform` attribute fragment.
    #[must_use]
    pub fn to_svg(&self) -> String {
        match self {
            Self::Rotate { degrees } => format!("rotate({degrees})"),
            Self::Translate { dx, dy } => format!("translate({dx},{dy})"),
        }
    }

    /// All parameters are finite.
    #[must_use]
    pub const fn is_finite(&self) -> bool {
        match self {
            Self::Rotate { degrees } => degrees.is_finite(),
            Self::Translate { dx, dy } => dx.is_finite() && dy.is_finite(),
        }
    }
}
