//! SVG output.
//!
//! Maps a [`DiagramScene`] onto the `svg` crate's element tree and
//! writes it out. Rendering is a straight transcription: the scene
//! already carries paint order, styles and transforms, so this module
//! adds nothing but attribute spelling.
//!
//! The document wraps everything in a root group translated to the
//! canvas center, which lets every scene coordinate stay in the
//! sun-centered frame the geometry modules produce.

use svg::node::element::{Circle, Ellipse, Group, Line, Path, Text};
use svg::{Document, Node};

use crate::error::OrreryResult;
use crate::geometry::path::LabelPlacement;
use crate::scene::{DiagramScene, SceneElement, ShapeStyle, Transform};

/// Build the SVG document for an assembled scene.
#[must_use]
pub fn document(scene: &DiagramScene) -> Document {
    let mut root = Group::new().set(
        "transform",
        format!("translate({},{})", scene.width / 2.0, scene.height / 2.0),
    );
    for element in &scene.elements {
        root = root.add(node_for(element));
    }
    Document::new()
        .set("width", scene.width)
        .set("height", scene.height)
        .set("viewBox", (0.0, 0.0, scene.width, scene.height))
        .add(root)
}

/// Render a scene to an SVG string.
#[must_use]
pub fn to_svg_string(scene: &DiagramScene) -> String {
    document(scene).to_string()
}

/// Render a scene and write it to `path`.
///
/// # Errors
///
/// [`OrreryError::Io`](crate::error::OrreryError::Io) when the file
/// cannot be written.
pub fn save_svg(scene: &DiagramScene, path: impl AsRef<std::path::Path>) -> OrreryResult<()> {
    svg::save(path, &document(scene))?;
    Ok(())
}

fn node_for(element: &SceneElement) -> Box<dyn Node> {
    match element {
        SceneElement::Ellipse {
            center,
            rx,
            ry,
            style,
        } => Box::new(styled(
            Ellipse::new()
                .set("cx", center.x)
                .set("cy", center.y)
                .set("rx", *rx)
                .set("ry", *ry),
            style,
        )),
        SceneElement::Circle {
            center,
            radius,
            style,
        } => Box::new(styled(
            Circle::new()
                .set("cx", center.x)
                .set("cy", center.y)
                .set("r", *radius),
            style,
        )),
        SceneElement::Line { from, to, style } => Box::new(styled(
            Line::new()
                .set("x1", from.x)
                .set("y1", from.y)
                .set("x2", to.x)
                .set("y2", to.y),
            style,
        )),
        SceneElement::Path { data, style } => {
            Box::new(styled(Path::new().set("d", data.to_svg_d()), style))
        }
        SceneElement::Text {
            label,
            centered_baseline,
        } => Box::new(text_node(label, *centered_baseline)),
        SceneElement::Group {
            id,
            transforms,
            children,
        } => {
            let mut group = Group::new().set("id", id.as_str());
            if !transforms.is_empty() {
                let joined = transforms
                    .iter()
                    .map(Transform::to_svg)
                    .collect::<Vec<_>>()
                    .join(" ");
                group = group.set("transform", joined);
            }
            for child in children {
                group = group.add(node_for(child));
            }
            Box::new(group)
        }
    }
}

/// Stroke and fill attributes. An unset fill still emits `fill="none"`
/// because SVG defaults to black fill, which would blot out every
/// stroked outline.
fn styled<N: Node>(mut node: N, style: &ShapeStyle) -> N {
    if let Some(stroke) = &style.stroke {
        node.assign("stroke", stroke.as_str());
        node.assign("stroke-width", style.stroke_width);
        if let Some(dash) = &style.stroke_dash {
            node.assign("stroke-dasharray", dash.as_str());
        }
    }
    match &style.fill {
        Some(fill) => node.assign("fill", fill.as_str()),
        None => node.assign("fill", "none"),
    }
    if style.opacity < 1.0 {
        node.assign("opacity", style.opacity);
    }
    node
}

fn text_node(label: &LabelPlacement, centered_baseline: bool) -> Text {
    let mut node = Text::new(label.text.as_str())
        .set("x", label.position.x)
        .set("y", label.position.y)
        .set("font-size", label.font_size)
        .set("text-anchor", "middle");
    if centered_baseline {
        node = node.set("dominant-baseline", "central");
    }
    if let Some(transform) = label.rotation_transform() {
        node = node.set("transform", transform);
    }
    node
}
