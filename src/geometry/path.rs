//! Path and label primitives.
//!
//! A [`PathData`] is a platform-neutral list of path commands. The
//! geometry layer builds these; the render layer turns them into SVG
//! `d` strings (or anything else a backend wants). Keeping the command
//! list serializable means a scene can be dumped to JSON and rebuilt
//! without re-running any geometry.

use std::fmt::Write as _;

use serde::{Deserialize, Serialize};

use crate::geometry::Point;

/// One command of a path outline.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum PathCommand {
    /// Start a new subpath at `to`.
    MoveTo {
        /// Subpath start point.
        to: Point,
    },
    /// Straight segment to `to`.
    LineTo {
        /// Segment end point.
        to: Point,
    },
    /// Elliptical arc to `to`.
    Arc {
        /// Arc x radius.
        rx: f64,
        /// Arc y radius.
        ry: f64,
        /// Rotation of the arc's x axis, degrees.
        rotation_deg: f64,
        /// Take the longer of the two candidate arcs.
        large_arc: bool,
        /// Sweep in the positive-angle (clockwise on screen) direction.
        sweep: bool,
        /// Arc end point.
        to: Point,
    },
    /// Close the current subpath.
    Close,
}

impl PathCommand {
    /// Every coordinate and radius in the command is finite.
    #[must_use]
    pub fn is_finite(&self) -> bool {
        match self {
            Self::MoveTo { to } | Self::LineTo { to } => to.is_finite(),
            Self::Arc {
                rx,
                ry,
                rotation_deg,
                to,
                ..
            } => rx.is_finite() && ry.is_finite() && rotation_deg.is_finite() && to.is_finite(),
            Self::Close => true,
        }
    }

    /// The endpoint this command moves the pen to, if any.
    #[must_use]
    pub const fn endpoint(&self) -> Option<Point> {
        match self {
            Self::MoveTo { to } | Self::LineTo { to } | Self::Arc { to, .. } => Some(*to),
            Self::Close => None,
        }
    }
}

/// An ordered list of path commands.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PathData {
    commands: Vec<PathCommand>,
}

impl PathData {
    /// An empty path.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            commands: Vec::new(),
        }
    }

    /// Append a move-to.
    #[must_use]
    pub fn move_to(mut self, to: Point) -> Self {
        self.commands.push(PathCommand::MoveTo { to });
        self
    }

    /// Append a line-to.
    #[must_use]
    pub fn line_to(mut self, to: Point) -> Self {
        self.commands.push(PathCommand::LineTo { to });
        self
    }

    /// Append an elliptical arc.
    #[must_use]
    pub fn arc_to(
        mut self,
        rx: f64,
        ry: f64,
        rotation_deg: f64,
        large_arc: bool,
        sweep: bool,
        to: Point,
    ) -> Self {
        self.commands.push(PathCommand::Arc {
            rx,
            ry,
            rotation_deg,
            large_arc,
            sweep,
            to,
        });
        self
    }

    /// Append a close command.
    #[must_use]
    pub fn close(mut self) -> Self {
        self.commands.push(PathCommand::Close);
        self
    }

    /// The commands in order.
    #[must_use]
    pub fn commands(&self) -> &[PathCommand] {
        &self.commands
    }

    /// No commands at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Every command in the path is finite.
    #[must_use]
    pub fn is_finite(&self) -> bool {
        self.commands.iter().all(PathCommand::is_finite)
    }

    /// The point the pen ends at, ignoring a trailing close.
    #[must_use]
    pub fn last_endpoint(&self) -> Option<Point> {
        self.commands.iter().rev().find_map(PathCommand::endpoint)
    }

    /// Render the path as an SVG `d` attribute string.
    #[must_use]
    pub fn to_svg_d(&self) -> String {
        let mut d = String::new();
        for command in &self.commands {
            if !d.is_empty() {
                d.push(' ');
            }
            match command {
                PathCommand::MoveTo { to } => {
                    let _ = write!(d, "M {},{}", to.x, to.y);
                }
                PathCommand::LineTo { to } => {
                    let _ = write!(d, "L {},{}", to.x, to.y);
                }
                PathCommand::Arc {
                    rx,
                    ry,
                    rotation_deg,
                    large_arc,
                    sweep,
                    to,
                } => {
                    let _ = write!(
                        d,
                        "A {},{} {} {} {} {},{}",
                        rx,
                        ry,
                        rotation_deg,
                        u8::from(*large_arc),
                        u8::from(*sweep),
                        to.x,
                        to.y
                    );
                }
                PathCommand::Close => d.push('Z'),
            }
        }
        d
    }
}

/// A positioned text label.
///
/// Labels are always anchored at their middle, both horizontally and
/// vertically; rotation pivots about the anchor point.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabelPlacement {
    /// Label text.
    pub text: String,
    /// Anchor point.
    pub position: Point,
    /// Rotation about the anchor, degrees. Zero means upright.
    pub rotation_deg: f64,
    /// Font size in canvas units.
    pub font_size: f64,
}

impl LabelPlacement {
    /// Anchor and rotation are finite.
    #[must_use]
    pub fn is_finite(&self) -> bool {
        self.position.is_finite() && self.rotation_deg.is_finite() && self.font_size.is_finite()
    }

    /// SVG `transform` attribute for the rotation, `None` when the
    /// label is upright.
    #[must_use]
    pub fn rotation_transform(&self) -> Option<String> {
        if self.rotation_deg == 0.0 {
            None
        } else {
            Some(format!(
                "rotate({},{},{})",
                self.rotation_deg, self.position.x, self.position.y
            ))
        }
    }
}
