//! Markup for required definitions.

use svg::{Node, node::element as svg_element};

use crate::export::Definition;

/// Outline of the cloud glyph, drawn in a 500 by 500 box.
const CLOUD_PATH: &str = "M 127.5 106.25 C 127.5 106.25 126.25 18.7501 231.25 45 \
C 336.25 71.25 317.5 115 318.75 115 C 320 115 300 61.25 380 51.25 \
C 452.5 57.5 486.25 71.25 482.5 117.5 C 478.75 163.75 443.75 175 443.75 175 \
C 443.75 175 507.5 181.25 490 275 C 462.5 340 462.5 333.75 398.75 341.25 \
C 370 330 368.75 320 368.75 320 C 368.75 320 421.25 368.75 342.5 400 \
C 253.75 423.75 242.5 402.5 205 391.25 C 168.75 368.75 176.25 341.25 176.25 341.25 \
C 176.25 341.25 198.75 387.5 122.5 396.25 C 46.25 405 17.5 387.5 3.75 316.25 \
C 2.08616e-06 262.5 67.5 257.5 67.5 257.5 C 67.5 257.5 26.25 258.75 15 231.25 \
C 3.75 203.75 -3.75 167.5 30 118.75 C 92.5 60 135 98.75 127.5 106.25 z";

const FILLED_END_PATH: &str = "M -5,0.0 L -5,-2.0 L 0.0,0.0 L -5,2.0 z";
const FILLED_START_PATH: &str = "M 5,0.0 L 5.0,-2.0 L 0.0,0.0 L 5.0,2.0 z";
const STICK_END_PATH: &str = "M 10.0,-2.0 L 0.0,0.0 L 10.0,2.0";
const STICK_START_PATH: &str = "M -10.0,-2.0 L 0.0,0.0 L -10.0,2.0";
const LINE_STYLE: &str = "stroke:#000;stroke-width:1.0px;marker-start:none;fill:none";

/// Builds the `<defs>` child for one definition.
pub(super) fn materialize(definition: &Definition) -> Box<dyn Node> {
    let id = definition.id();
    match definition {
        Definition::FilledArrowEnd { color, width } => {
            filled_arrow(&id, color, width, FILLED_END_PATH).into()
        }
        Definition::FilledArrowStart { color, width } => {
            filled_arrow(&id, color, width, FILLED_START_PATH).into()
        }
        Definition::StickArrowEnd => stick_arrow(&id, STICK_END_PATH).into(),
        Definition::StickArrowStart => stick_arrow(&id, STICK_START_PATH).into(),
        Definition::Bar => marker(&id)
            .add(
                svg_element::Path::new()
                    .set("d", "M -7.5,-2.5 L -7.5,2.5")
                    .set("style", LINE_STYLE),
            )
            .into(),
        Definition::CrowBall => marker(&id)
            .add(
                svg_element::Path::new()
                    .set("d", "M 0.0,2.5 L 7.5,0.0 L 0.0,-2.5")
                    .set("style", LINE_STYLE),
            )
            .add(
                svg_element::Circle::new()
                    .set("cx", 10)
                    .set("cy", 0)
                    .set("r", 2.5)
                    .set("style", "stroke-width:1px;stroke:#000;fill:none"),
            )
            .into(),
        Definition::DropShadow => drop_shadow(&id).into(),
        Definition::NetworkCloud => svg_element::Group::new()
            .set("id", id)
            .add(svg_element::Path::new().set("d", CLOUD_PATH))
            .into(),
    }
}

fn marker(id: &str) -> svg_element::Marker {
    svg_element::Marker::new()
        .set("id", id)
        .set("orient", "auto")
        .set("refX", 0)
        .set("refY", 0)
        .set("style", "overflow:visible")
}

/// Scale applied to filled arrow heads so wide strokes do not produce huge
/// markers.
fn filled_arrow_scale(width: &str) -> f64 {
    width
        .trim_end_matches("px")
        .parse::<f64>()
        .map_or(1.0, |width| 1.0 / ((width - 1.0) / 20.0 + 1.0))
}

fn filled_arrow(id: &str, color: &str, width: &str, d: &str) -> svg_element::Marker {
    marker(id).add(
        svg_element::Path::new()
            .set("id", format!("path_{id}"))
            .set("d", d)
            .set(
                "style",
                format!(
                    "fill:#{color};fill-rule:evenodd;stroke:#{color};stroke-width:1.0px;marker-start:none"
                ),
            )
            .set("transform", format!("scale({:.6})", filled_arrow_scale(width))),
    )
}

fn stick_arrow(id: &str, d: &str) -> svg_element::Marker {
    marker(id).set("stroke", "currentColor").add(
        svg_element::Path::new()
            .set("id", format!("path_{id}"))
            .set("d", d)
            .set(
                "style",
                "fill:none;stroke:#000000;stroke-width:1.0px;marker-start:none",
            ),
    )
}

fn drop_shadow(id: &str) -> svg_element::Filter {
    svg_element::Filter::new()
        .set("id", id)
        .set("filterRes", 100)
        .set("x", 0)
        .set("y", 0)
        .add(
            svg_element::FilterEffectGaussianBlur::new()
                .set("stdDeviation", 3)
                .set("result", "MyBlur"),
        )
        .add(
            svg_element::FilterEffectOffset::new()
                .set("in", "MyBlur")
                .set("dx", 2)
                .set("dy", 4)
                .set("result", "movedBlur"),
        )
        .add(
            svg_element::FilterEffectMerge::new()
                .add(svg_element::FilterEffectMergeNode::new().set("in", "movedBlur"))
                .add(svg_element::FilterEffectMergeNode::new().set("in", "SourceGraphic")),
        )
}

#[cfg(test)]
mod tests {
    use float_cmp::assert_approx_eq;

    use super::*;

    #[test]
    fn test_filled_arrow_scale() {
        assert_approx_eq!(f64, filled_arrow_scale("1.000000px"), 1.0);
        assert_approx_eq!(f64, filled_arrow_scale("21.000000px"), 0.5);
        assert_approx_eq!(f64, filled_arrow_scale("wide"), 1.0);
    }

    #[test]
    fn test_filled_arrow_markup() {
        let definition = Definition::FilledArrowEnd {
            color: "808080".to_string(),
            width: "1.000000px".to_string(),
        };
        let markup = materialize(&definition).to_string();

        assert!(markup.starts_with("<marker"));
        assert!(markup.contains(r#"id="Arrow1Lend_808080_1.000000px""#));
        assert!(markup.contains(r#"id="path_Arrow1Lend_808080_1.000000px""#));
        assert!(markup.contains("fill:#808080;fill-rule:evenodd;stroke:#808080"));
        assert!(markup.contains(r#"transform="scale(1.000000)""#));
    }

    #[test]
    fn test_shared_definitions() {
        let crow = materialize(&Definition::CrowBall).to_string();
        assert!(crow.contains(r#"id="mCrowBall""#));
        assert!(crow.contains("<circle"));

        let shadow = materialize(&Definition::DropShadow).to_string();
        assert!(shadow.starts_with("<filter"));
        assert_eq!(shadow.matches("<feMergeNode").count(), 2);

        let cloud = materialize(&Definition::NetworkCloud).to_string();
        assert!(cloud.contains(r#"<g id="network_cloud">"#));
        assert!(cloud.contains("M 127.5 106.25"));
    }
}
