//! Scene assembly: from geometry to an ordered element tree.
//!
//! A [`DiagramScene`] is a flat, serializable description of what to
//! draw, in paint order. The assembler reproduces the layering of the
//! seasonal diagram: annotations (ticks, bands, season chords) sit
//! behind everything, then the moon's sun line, the orbit outline, the
//! sun disc, and finally the moon figure on top.
//!
//! Records that produce non-finite geometry are skipped and reported
//! through [`DiagramScene::warnings`] rather than failing the whole
//! build; a diagram with a missing flyby band is still a diagram.

pub mod moon;
pub mod style;

pub use moon::MoonFigure;
pub use style::{ShapeStyle, Transform};

use serde::{Deserialize, Serialize};

use crate::geometry::angle::normalize_ls;
use crate::geometry::path::{LabelPlacement, PathData};
use crate::geometry::solar::{SunAnchor, DEFAULT_BAND_THICKNESS};
use crate::geometry::Point;

/// Default canvas width, pixels.
pub const DEFAULT_CANVAS_WIDTH: f64 = 900.0;

/// Default canvas height, pixels.
pub const DEFAULT_CANVAS_HEIGHT: f64 = 600.0;

/// Default sun disc radius, canvas units.
pub const DEFAULT_SUN_RADIUS: f64 = 25.0;

/// Minor inner ticks: every 10 degrees, 5 units long.
const MINOR_TICK_STEP: usize = 10;
const MINOR_TICK_LENGTH: f64 = 5.0;

/// Major inner ticks: every 30 degrees, 10 units long.
const MAJOR_TICK_STEP: usize = 30;
const MAJOR_TICK_LENGTH: f64 = 10.0;

/// Year markers point outward.
const YEAR_TICK_LENGTH: f64 = -10.0;

/// One drawable element of a scene.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SceneElement {
    /// An axis-aligned ellipse outline (rotation comes from the
    /// enclosing group).
    Ellipse {
        /// Center point.
        center: Point,
        /// x radius.
        rx: f64,
        /// y radius.
        ry: f64,
        /// Paint style.
        style: ShapeStyle,
    },
    /// A circle.
    Circle {
        /// Center point.
        center: Point,
        /// Radius.
        radius: f64,
        /// Paint style.
        style: ShapeStyle,
    },
    /// A straight line segment.
    Line {
        /// Start point.
        from: Point,
        /// End point.
        to: Point,
        /// Paint style.
        style: ShapeStyle,
    },
    /// An arbitrary path.
    Path {
        /// Path outline.
        data: PathData,
        /// Paint style.
        style: ShapeStyle,
    },
    /// A text label, middle-anchored.
    Text {
        /// Text, position, rotation and size.
        label: LabelPlacement,
        /// Also center the baseline vertically (pole letters don't).
        centered_baseline: bool,
    },
    /// A named group of elements with optional transforms.
    Group {
        /// Group identifier.
        id: String,
        /// Transforms applied to all children, outermost first.
        transforms: Vec<Transform>,
        /// Children in paint order.
        children: Vec<SceneElement>,
    },
}

impl SceneElement {
    /// Every coordinate in the element (and its children) is finite.
    #[must_use]
    pub fn is_finite(&self) -> bool {
        match self {
            Self::Ellipse { center, rx, ry, .. } => {
                center.is_finite() && rx.is_finite() && ry.is_finite()
            }
            Self::Circle { center, radius, .. } => center.is_finite() && radius.is_finite(),
            Self::Line { from, to, .. } => from.is_finite() && to.is_finite(),
            Self::Path { data, .. } => data.is_finite(),
            Self::Text { label, .. } => label.is_finite(),
            Self::Group {
                transforms,
                children,
                ..
            } => {
                transforms.iter().all(Transform::is_finite)
                    && children.iter().all(Self::is_finite)
            }
        }
    }

    /// Number of elements in this subtree, groups included.
    #[must_use]
    pub fn count(&self) -> usize {
        match self {
            Self::Group { children, .. } => 1 + children.iter().map(Self::count).sum::<usize>(),
            _ => 1,
        }
    }

    /// Group identifier, if this is a group.
    #[must_use]
    pub fn group_id(&self) -> Option<&str> {
        match self {
            Self::Group { id, .. } => Some(id),
            _ => None,
        }
    }
}

/// A fully assembled scene in paint order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiagramScene {
    /// Canvas width, pixels.
    pub width: f64,
    /// Canvas height, pixels.
    pub height: f64,
    /// Elements in paint order, coordinates centered on the canvas.
    pub elements: Vec<SceneElement>,
    /// Records skipped during assembly, one message each.
    pub warnings: Vec<String>,
}

impl DiagramScene {
    /// Total element count across all groups.
    #[must_use]
    pub fn element_count(&self) -> usize {
        self.elements.iter().map(SceneElement::count).sum()
    }

    /// Find a group by id, depth first.
    #[must_use]
    pub fn find_group(&self, id: &str) -> Option<&SceneElement> {
        fn search<'a>(elements: &'a [SceneElement], id: &str) -> Option<&'a SceneElement> {
            for element in elements {
                if element.group_id() == Some(id) {
                    return Some(element);
                }
                if let SceneElement::Group { children, .. } = element {
                    if let Some(found) = search(children, id) {
                        return Some(found);
                    }
                }
            }
            None
        }
        search(&self.elements, id)
    }
}

/// A dated event drawn as a 1-degree coverage sliver.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlybyMark {
    /// Solar longitude of the event.
    pub ls: f64,
    /// Label drawn along the band.
    pub name: String,
    /// Band fill color.
    pub color: String,
}

/// A mission span drawn as a wide coverage band.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpanMark {
    /// Span start, degrees Ls.
    pub start_ls: f64,
    /// Span end, degrees Ls.
    pub end_ls: f64,
    /// Label drawn along the band.
    pub name: String,
    /// Band fill color.
    pub color: String,
    /// Radial depth of the band.
    pub thickness: f64,
}

/// An outward year marker with a date label.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct YearMark {
    /// Solar longitude of the year boundary.
    pub ls: f64,
    /// Date text placed beyond the tick.
    pub label: String,
}

/// Assembles a seasonal orbit diagram scene.
///
/// Build one with [`SeasonsDiagram::new`], chain the `with_`/`add_`
/// methods, then call [`SeasonsDiagram::assemble`].
#[derive(Debug, Clone)]
pub struct SeasonsDiagram {
    width: f64,
    height: f64,
    sun: SunAnchor,
    sun_radius: f64,
    sun_color: String,
    inner_ticks: bool,
    year_marks: Vec<YearMark>,
    flybys: Vec<FlybyMark>,
    spans: Vec<SpanMark>,
    legend: Vec<crate::geometry::solar::LegendEntry>,
    moon: Option<(MoonFigure, f64)>,
}

impl SeasonsDiagram {
    /// Start a diagram around the given sun anchor.
    #[must_use]
    pub fn new(sun: SunAnchor) -> Self {
        Self {
            width: DEFAULT_CANVAS_WIDTH,
            height: DEFAULT_CANVAS_HEIGHT,
            sun,
            sun_radius: DEFAULT_SUN_RADIUS,
            sun_color: "yellow".to_string(),
            inner_ticks: false,
            year_marks: Vec::new(),
            flybys: Vec::new(),
            spans: Vec::new(),
            legend: Vec::new(),
            moon: None,
        }
    }

    /// Set the canvas size.
    #[must_use]
    pub fn with_canvas(mut self, width: f64, height: f64) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    /// Set the sun disc radius and color.
    #[must_use]
    pub fn with_sun_disc(mut self, radius: f64, color: &str) -> Self {
        self.sun_radius = radius;
        self.sun_color = color.to_string();
        self
    }

    /// Draw the inner Ls scale: minor ticks every 10 degrees, major
    /// every 30.
    #[must_use]
    pub fn with_inner_ticks(mut self) -> Self {
        self.inner_ticks = true;
        self
    }

    /// Place the moon at the given solar longitude.
    #[must_use]
    pub fn with_moon(mut self, moon: MoonFigure, ls: f64) -> Self {
        self.moon = Some((moon, normalize_ls(ls)));
        self
    }

    /// Add an outward year marker.
    #[must_use]
    pub fn add_year_mark(mut self, ls: f64, label: &str) -> Self {
        self.year_marks.push(YearMark {
            ls: normalize_ls(ls),
            label: label.to_string(),
        });
        self
    }

    /// Add a flyby sliver.
    #[must_use]
    pub fn add_flyby(mut self, ls: f64, name: &str, color: &str) -> Self {
        self.flybys.push(FlybyMark {
            ls: normalize_ls(ls),
            name: name.to_string(),
            color: color.to_string(),
        });
        self
    }

    /// Add a mission span band.
    #[must_use]
    pub fn add_span(mut self, span: SpanMark) -> Self {
        self.spans.push(SpanMark {
            start_ls: normalize_ls(span.start_ls),
            end_ls: normalize_ls(span.end_ls),
            ..span
        });
        self
    }

    /// Add a legend entry.
    #[must_use]
    pub fn add_legend(mut self, entry: crate::geometry::solar::LegendEntry) -> Self {
        self.legend.push(entry);
        self
    }

    /// Assemble the scene.
    #[must_use]
    pub fn assemble(&self) -> DiagramScene {
        let mut warnings = Vec::new();
        let mut elements = Vec::new();

        elements.push(self.annotation_layer(&mut warnings));

        let moon_position = self.moon.as_ref().map(|(_, ls)| self.sun.position_at(*ls));
        if let Some(position) = moon_position {
            if position.is_finite() {
                elements.push(SceneElement::Line {
                    from: self.sun.position(),
                    to: position,
                    style: ShapeStyle::sun_line(),
                });
            }
        }

        elements.push(self.orbit_layer());
        elements.push(SceneElement::Circle {
            center: self.sun.position(),
            radius: self.sun_radius,
            style: ShapeStyle::filled(&self.sun_color),
        });

        if let (Some((moon, ls)), Some(position)) = (self.moon.as_ref(), moon_position) {
            if position.is_finite() {
                elements.push(Self::moon_layer(moon, *ls, position));
            } else {
                warnings.push(format!(
                    "skipped moon '{}': non-finite position at ls={ls}",
                    moon.name
                ));
            }
        }

        DiagramScene {
            width: self.width,
            height: self.height,
            elements,
            warnings,
        }
    }

    /// Ticks, bands, legend text and the season chords, drawn behind
    /// the orbit.
    fn annotation_layer(&self, warnings: &mut Vec<String>) -> SceneElement {
        let mut ticks = Vec::new();

        if self.inner_ticks {
            for (step, length) in [
                (MINOR_TICK_STEP, MINOR_TICK_LENGTH),
                (MAJOR_TICK_STEP, MAJOR_TICK_LENGTH),
            ] {
                for ls in (0..=360).step_by(step) {
                    let tick = self.sun.tick_at(f64::from(ls), length, None);
                    if tick.is_finite() {
                        ticks.push(SceneElement::Path {
                            data: tick.path(),
                            style: ShapeStyle::hairline(),
                        });
                    } else {
                        warnings.push(format!("skipped inner tick at ls={ls}"));
                    }
                }
            }
        }

        for mark in &self.year_marks {
            let tick = self
                .sun
                .tick_at(mark.ls, YEAR_TICK_LENGTH, Some(&mark.label));
            if tick.is_finite() {
                ticks.push(SceneElement::Path {
                    data: tick.path(),
                    style: ShapeStyle::hairline(),
                });
                if let Some(label) = tick.label {
                    ticks.push(SceneElement::Text {
                        label,
                        centered_baseline: true,
                    });
                }
            } else {
                warnings.push(format!("skipped year mark '{}' at ls={}", mark.label, mark.ls));
            }
        }

        for flyby in &self.flybys {
            let band = self.sun.coverage_band(
                flyby.ls,
                flyby.ls + 1.0,
                DEFAULT_BAND_THICKNESS,
                Some(&flyby.name),
            );
            if band.is_finite() {
                ticks.push(SceneElement::Path {
                    data: band.path,
                    style: ShapeStyle::band_fill(&flyby.color),
                });
                if let Some(label) = band.label {
                    ticks.push(SceneElement::Text {
                        label,
                        centered_baseline: true,
                    });
                }
            } else {
                warnings.push(format!("skipped flyby '{}' at ls={}", flyby.name, flyby.ls));
            }
        }

        for span in &self.spans {
            let band = self.sun.coverage_band(
                span.start_ls,
                span.end_ls,
                span.thickness,
                Some(&span.name),
            );
            if band.is_finite() {
                ticks.push(SceneElement::Path {
                    data: band.path,
                    style: ShapeStyle::band_fill(&span.color),
                });
                if let Some(label) = band.label {
                    ticks.push(SceneElement::Text {
                        label,
                        centered_baseline: true,
                    });
                }
            } else {
                warnings.push(format!(
                    "skipped span '{}' ({} to {})",
                    span.name, span.start_ls, span.end_ls
                ));
            }
        }

        for entry in &self.legend {
            let label = self.sun.legend_placement(entry);
            if label.is_finite() {
                ticks.push(SceneElement::Text {
                    label,
                    centered_baseline: true,
                });
            } else {
                warnings.push(format!("skipped legend '{}' at ls={}", entry.text, entry.ls));
            }
        }

        let mut children = vec![SceneElement::Group {
            id: "ticks".to_string(),
            transforms: Vec::new(),
            children: ticks,
        }];

        let (equinox_south, equinox_north) = self.sun.equinox_chord();
        if equinox_south.is_finite() && equinox_north.is_finite() {
            children.push(SceneElement::Line {
                from: equinox_south,
                to: equinox_north,
                style: ShapeStyle::season_chord(),
            });
        } else {
            warnings.push("skipped equinox chord: sun outside the orbit".to_string());
        }

        let (solstice_east, solstice_west) = self.sun.solstice_chord();
        if solstice_east.is_finite() && solstice_west.is_finite() {
            children.push(SceneElement::Line {
                from: solstice_east,
                to: solstice_west,
                style: ShapeStyle::season_chord(),
            });
        } else {
            warnings.push("skipped solstice chord: sun outside the orbit".to_string());
        }

        SceneElement::Group {
            id: "annotations".to_string(),
            transforms: Vec::new(),
            children,
        }
    }

    /// The orbit outline and its major axis, inside a rotated group.
    fn orbit_layer(&self) -> SceneElement {
        let ellipse = self.sun.ellipse();
        let (near, far) = ellipse.major_axis_endpoints();
        SceneElement::Group {
            id: "orbit".to_string(),
            transforms: vec![Transform::Rotate {
                degrees: ellipse.rotation_deg(),
            }],
            children: vec![
                SceneElement::Ellipse {
                    center: Point::new(0.0, 0.0),
                    rx: ellipse.semi_major(),
                    ry: ellipse.semi_minor(),
                    style: ShapeStyle::orbit_outline(),
                },
                SceneElement::Line {
                    from: near,
                    to: far,
                    style: ShapeStyle::major_axis(),
                },
            ],
        }
    }

    /// The moon figure, translated to its orbit position.
    fn moon_layer(moon: &MoonFigure, ls: f64, position: Point) -> SceneElement {
        let [north, south] = moon.pole_labels();
        let (pole_from, pole_to) = moon.pole_line();
        SceneElement::Group {
            id: moon.name.clone(),
            transforms: vec![Transform::Translate {
                dx: position.x,
                dy: position.y,
            }],
            children: vec![
                SceneElement::Text {
                    label: north,
                    centered_baseline: false,
                },
                SceneElement::Text {
                    label: south,
                    centered_baseline: false,
                },
                SceneElement::Group {
                    id: "pole".to_string(),
                    transforms: vec![Transform::Rotate {
                        degrees: moon.obliquity_deg,
                    }],
                    children: vec![SceneElement::Line {
                        from: pole_from,
                        to: pole_to,
                        style: ShapeStyle::hairline(),
                    }],
                },
                SceneElement::Circle {
                    center: Point::new(0.0, 0.0),
                    radius: moon.radius,
                    style: ShapeStyle::filled(&moon.color),
                },
                SceneElement::Path {
                    data: moon.shadow_path(ls),
                    style: ShapeStyle::filled("dimgray"),
                },
                SceneElement::Path {
                    data: moon.equator_path(),
                    style: ShapeStyle::hairline(),
                },
            ],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::ellipse::OrbitEllipse;
    use crate::geometry::solar::LegendEntry;

    fn titan_sun() -> SunAnchor {
        SunAnchor::new(OrbitEllipse::new(200.0, 193.9, 10.1), 0.0558)
    }

    fn group_children(element: &SceneElement) -> &[SceneElement] {
        match element {
            SceneElement::Group { children, .. } => children,
            _ => panic!("expected a group"),
        }
    }

    #[test]
    fn test_inner_ticks_count() {
        let scene = SeasonsDiagram::new(titan_sun())
            .with_inner_ticks()
            .assemble();
        let ticks = scene.find_group("ticks").expect("ticks group");
        // 37 minor (0..=360 by 10) + 13 major (0..=360 by 30).
        assert_eq!(group_children(ticks).len(), 50);
        assert!(scene.warnings.is_empty());
    }

    #[test]
    fn test_layer_order() {
        let scene = SeasonsDiagram::new(titan_sun())
            .with_moon(MoonFigure::titan(), 120.0)
            .assemble();
        assert_eq!(scene.elements.len(), 5);
        assert_eq!(scene.elements[0].group_id(), Some("annotations"));
        assert!(matches!(scene.elements[1], SceneElement::Line { .. }));
        assert_eq!(scene.elements[2].group_id(), Some("orbit"));
        assert!(matches!(scene.elements[3], SceneElement::Circle { .. }));
        assert_eq!(scene.elements[4].group_id(), Some("Titan"));
    }

    #[test]
    fn test_annotations_contain_season_chords() {
        let scene = SeasonsDiagram::new(titan_sun()).assemble();
        let annotations = scene.find_group("annotations").expect("annotations");
        let children = group_children(annotations);
        // Ticks group plus the two chords.
        assert_eq!(children.len(), 3);
        assert!(matches!(children[1], SceneElement::Line { .. }));
        assert!(matches!(children[2], SceneElement::Line { .. }));
    }

    #[test]
    fn test_year_mark_adds_path_and_text() {
        let scene = SeasonsDiagram::new(titan_sun())
            .add_year_mark(113.2, "1990")
            .assemble();
        let ticks = scene.find_group("ticks").expect("ticks group");
        let children = group_children(ticks);
        assert_eq!(children.len(), 2);
        assert!(matches!(children[0], SceneElement::Path { .. }));
        let SceneElement::Text { label, .. } = &children[1] else {
            panic!("expected the year label");
        };
        assert_eq!(label.text, "1990");
        assert!(label.rotation_deg.abs() < 1e-12);
    }

    #[test]
    fn test_flyby_band_translucent() {
        let scene = SeasonsDiagram::new(titan_sun())
            .add_flyby(8.9, "Voyager 1", "red")
            .assemble();
        let ticks = scene.find_group("ticks").expect("ticks group");
        let children = group_children(ticks);
        assert_eq!(children.len(), 2);
        let SceneElement::Path { style, .. } = &children[0] else {
            panic!("expected the band path");
        };
        assert_eq!(style.fill.as_deref(), Some("red"));
        assert!((style.opacity - style::BAND_OPACITY).abs() < f64::EPSILON);
    }

    #[test]
    fn test_span_band_uses_thickness() {
        let scene = SeasonsDiagram::new(titan_sun())
            .add_span(SpanMark {
                start_ls: 293.1,
                end_ls: 94.1,
                name: "Cassini".to_string(),
                color: "skyblue".to_string(),
                thickness: 30.0,
            })
            .assemble();
        assert!(scene.warnings.is_empty());
        let ticks = scene.find_group("ticks").expect("ticks group");
        assert_eq!(group_children(ticks).len(), 2);
    }

    #[test]
    fn test_legend_entries_become_text() {
        let scene = SeasonsDiagram::new(titan_sun())
            .add_legend(LegendEntry {
                ls: 45.0,
                radius_fraction: 0.5,
                text: "northern spring".to_string(),
                rotation_deg: None,
                font_size: None,
            })
            .assemble();
        let ticks = scene.find_group("ticks").expect("ticks group");
        let children = group_children(ticks);
        assert_eq!(children.len(), 1);
        assert!(matches!(children[0], SceneElement::Text { .. }));
    }

    #[test]
    fn test_moon_layer_contents() {
        let scene = SeasonsDiagram::new(titan_sun())
            .with_moon(MoonFigure::titan(), 300.5)
            .assemble();
        let moon = scene.find_group("Titan").expect("moon group");
        let children = group_children(moon);
        // N, S, pole group, disc, shadow, equator.
        assert_eq!(children.len(), 6);
        assert!(matches!(
            children[3],
            SceneElement::Circle { radius, .. } if (radius - 15.0).abs() < 1e-12
        ));
        let pole = scene.find_group("pole").expect("pole group");
        let SceneElement::Group { transforms, .. } = pole else {
            unreachable!()
        };
        assert_eq!(
            transforms.first(),
            Some(&Transform::Rotate { degrees: 26.73 })
        );
    }

    #[test]
    fn test_nonfinite_records_skipped_with_warnings() {
        // Sun outside the orbit: every ray misses.
        let outside = SunAnchor::new(OrbitEllipse::circle(200.0), 1.5);
        let scene = SeasonsDiagram::new(outside)
            .add_flyby(10.0, "ghost", "red")
            .add_year_mark(45.0, "1980")
            .assemble();
        assert!(scene.warnings.iter().any(|w| w.contains("flyby 'ghost'")));
        assert!(scene.warnings.iter().any(|w| w.contains("year mark '1980'")));
        assert!(scene.warnings.iter().any(|w| w.contains("equinox")));
        let ticks = scene.find_group("ticks").expect("ticks group");
        assert!(group_children(ticks).is_empty());
    }

    #[test]
    fn test_record_ls_normalized() {
        let scene = SeasonsDiagram::new(titan_sun())
            .add_year_mark(-90.0, "wrapped")
            .assemble();
        assert!(scene.warnings.is_empty());
        let ticks = scene.find_group("ticks").expect("ticks group");
        // A tick at 270 sits on the right side of the diagram.
        let SceneElement::Path { data, .. } = &group_children(ticks)[0] else {
            panic!("expected the tick path");
        };
        let start = data.commands()[0].endpoint().expect("move-to");
        assert!(start.x > 0.0);
    }

    #[test]
    fn test_element_count_recurses() {
        let scene = SeasonsDiagram::new(titan_sun())
            .with_inner_ticks()
            .with_moon(MoonFigure::titan(), 0.0)
            .assemble();
        // Every tick, chord, group and moon part counts once.
        assert!(scene.element_count() > 55);
    }

    #[test]
    fn test_scene_serde_round_trip() {
        let scene = SeasonsDiagram::new(titan_sun())
            .with_moon(MoonFigure::titan(), 42.0)
            .add_flyby(18.4, "Voyager 2", "green")
            .assemble();
        let json = serde_json::to_string(&scene).unwrap();
        let back: DiagramScene = serde_json::from_str(&json).unwrap();
        assert_eq!(scene, back);
    }
}
