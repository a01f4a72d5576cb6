//! SVG output surface
//!
//! Builds a `facet-svg` DOM while the legend is drawn and serializes it once
//! in [`SvgSurface::finish`]. Each `save`/`restore` pair becomes a `<g>`
//! element; groups left open are closed when the document is finished.

use facet_svg::facet_xml::SerializeOptions;
use facet_svg::{Group, Polygon, Polyline, Svg, SvgNode, Text, facet_xml};
use glam::{DVec2, dvec2};

use crate::errors::SurfaceError;
use crate::surface::{ArrowHead, Font, HAlign, LineStyle, RenderSurface, TextBlock, TextMeasure, VAlign};
use crate::types::Color;

use super::defaults;
use super::metrics::ProportionalMetrics;

#[derive(Debug, Clone)]
pub struct SvgSurface {
    width: f64,
    height: f64,
    /// Children of the root, then of every open group
    frames: Vec<Vec<SvgNode>>,
    line_style: Option<LineStyle>,
    metrics: ProportionalMetrics,
}

impl SvgSurface {
    /// Start a document of `width` × `height` device units.
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            frames: vec![Vec::new()],
            line_style: None,
            metrics: ProportionalMetrics,
        }
    }

    /// Close any open groups and serialize the document.
    pub fn finish(mut self) -> Result<String, SurfaceError> {
        while self.frames.len() > 1 {
            self.close_group();
        }
        let (w, h) = (fmt_num(self.width), fmt_num(self.height));
        let svg = Svg {
            width: Some(w.clone()),
            height: Some(h.clone()),
            view_box: Some(format!("0 0 {w} {h}")),
            children: self.frames.pop().unwrap_or_default(),
            ..Default::default()
        };

        fn format_float(value: f64, writer: &mut dyn std::io::Write) -> Result<(), std::io::Error> {
            write!(writer, "{}", fmt_num(value))
        }

        let options = SerializeOptions {
            float_formatter: Some(format_float),
            ..Default::default()
        };
        facet_xml::to_string_with_options(&svg, &options)
            .map_err(|e| SurfaceError::new("finish", format!("XML serialization error: {e}")))
    }

    fn push(&mut self, node: SvgNode) {
        if let Some(frame) = self.frames.last_mut() {
            frame.push(node);
        }
    }

    fn close_group(&mut self) {
        if self.frames.len() < 2 {
            return;
        }
        let children = self.frames.pop().unwrap_or_default();
        self.push(SvgNode::G(Group {
            children,
            ..Default::default()
        }));
    }

    fn push_polygon(&mut self, points: &[DVec2], color: Color) {
        self.push(SvgNode::Polygon(Polygon {
            points: Some(fmt_points(points)),
            fill: Some(color.to_rgb_string()),
            style: opacity_style("fill-opacity", color),
            ..Default::default()
        }));
    }
}

impl TextMeasure for SvgSurface {
    fn text_height(&self, lines: &[&str], font: &Font) -> f64 {
        self.metrics.text_height(lines, font)
    }

    fn text_width(&self, lines: &[&str], font: &Font) -> f64 {
        self.metrics.text_width(lines, font)
    }
}

impl RenderSurface for SvgSurface {
    fn save(&mut self) {
        self.frames.push(Vec::new());
    }

    fn restore(&mut self) {
        self.close_group();
    }

    fn fill_polygon(&mut self, points: &[DVec2], color: Color) -> Result<(), SurfaceError> {
        if points.len() < 3 {
            return Err(SurfaceError::new(
                "fill polygon",
                format!("need at least 3 points, got {}", points.len()),
            ));
        }
        self.push_polygon(points, color);
        Ok(())
    }

    fn begin_line_style(&mut self, style: &LineStyle) -> Result<(), SurfaceError> {
        if self.line_style.is_some() {
            return Err(SurfaceError::new("begin line style", "a line style is already active"));
        }
        self.line_style = Some(style.clone());
        Ok(())
    }

    fn end_line_style(&mut self) {
        self.line_style = None;
    }

    fn stroke_polyline(&mut self, points: &[DVec2]) -> Result<(), SurfaceError> {
        let Some(style) = self.line_style.clone() else {
            return Err(SurfaceError::new("stroke polyline", "no active line style"));
        };
        let [.., start, end] = points else {
            return Ok(());
        };
        let head = style.head.and_then(|head| arrowhead(*start, *end, head));

        let mut stroked = points.to_vec();
        if let Some(head) = &head {
            // stop inside the head so the butt end stays hidden
            if let Some(last) = stroked.last_mut() {
                *last = head.line_end;
            }
        }

        self.push(SvgNode::Polyline(Polyline {
            points: Some(fmt_points(&stroked)),
            fill: Some("none".to_string()),
            stroke: Some(style.color.to_rgb_string()),
            stroke_width: Some(fmt_num(style.width)),
            style: opacity_style("stroke-opacity", style.color),
            ..Default::default()
        }));
        if let Some(head) = head {
            self.push_polygon(&head.points, style.color);
        }
        Ok(())
    }

    fn draw_text(&mut self, text: &TextBlock) -> Result<(), SurfaceError> {
        if text.lines.is_empty() {
            return Ok(());
        }
        let font = &text.font;
        let line_height = font.size * defaults::LINE_SPACING;
        let block_height = font.size + (text.lines.len() - 1) as f64 * line_height;
        let top = match text.v_align {
            VAlign::Top => 0.0,
            VAlign::Center => -block_height / 2.0,
            VAlign::Bottom => -block_height,
        };
        let anchor = match text.h_align {
            HAlign::Left => "start",
            HAlign::Center => "middle",
            HAlign::Right => "end",
        };

        let mut transform = format!("translate({} {})", fmt_num(text.anchor.x), fmt_num(text.anchor.y));
        // SVG rotates clockwise on screen
        let degrees = text.rotation.to_degrees();
        if fmt_num(degrees) != "0" {
            transform.push_str(&format!(" rotate({})", fmt_num(-degrees)));
        }

        let style = font_style(font);
        let children = text
            .lines
            .iter()
            .enumerate()
            .map(|(i, line)| {
                SvgNode::Text(Text {
                    x: Some(0.0),
                    y: Some(top + font.size / 2.0 + i as f64 * line_height),
                    fill: Some(font.color.to_rgb_string()),
                    style: Some(style.clone()),
                    text_anchor: Some(anchor.to_string()),
                    dominant_baseline: Some("central".to_string()),
                    content: line.clone(),
                    ..Default::default()
                })
            })
            .collect();

        self.push(SvgNode::G(Group {
            transform: Some(transform),
            children,
            ..Default::default()
        }));
        Ok(())
    }
}

struct Arrowhead {
    points: [DVec2; 3],
    line_end: DVec2,
}

/// Filled triangle with its tip on `end`, pointing away from `start`.
fn arrowhead(start: DVec2, end: DVec2, head: ArrowHead) -> Option<Arrowhead> {
    let delta = end - start;
    let len = delta.length();
    if len < 1e-3 {
        return None;
    }
    let unit = delta / len;
    let perp = dvec2(-unit.y, unit.x);
    let base = end - unit * head.length;
    let half_width = head.width / 2.0;
    Some(Arrowhead {
        points: [end, base + perp * half_width, base - perp * half_width],
        line_end: end - unit * (head.length / 2.0).min(len),
    })
}

fn opacity_style(property: &str, color: Color) -> Option<String> {
    (!color.is_opaque()).then(|| format!("{property}:{}", fmt_num(color.opacity())))
}

fn font_style(font: &Font) -> String {
    let mut entries = vec![
        format!("font-family:{}", font.family),
        format!("font-size:{}px", fmt_num(font.size)),
    ];
    if font.bold {
        entries.push("font-weight:bold".to_string());
    }
    if font.italic {
        entries.push("font-style:italic".to_string());
    }
    entries.extend(opacity_style("fill-opacity", font.color));
    entries.join(";")
}

fn fmt_points(points: &[DVec2]) -> String {
    points
        .iter()
        .map(|p| format!("{},{}", fmt_num(p.x), fmt_num(p.y)))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Three decimals, trailing zeros trimmed.
pub(crate) fn fmt_num(value: f64) -> String {
    let s = format!("{value:.3}");
    let s = s.trim_end_matches('0').trim_end_matches('.');
    if s == "-0" { "0".to_string() } else { s.to_string() }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::surface::SavedState;
    use std::f64::consts::FRAC_PI_2;

    fn font() -> Font {
        Font {
            family: "sans-serif".into(),
            size: 10.0,
            color: Color::BLACK,
            bold: true,
            italic: false,
        }
    }

    /// Parse a finished document back into the DOM
    pub(crate) fn parse(doc: &str) -> Svg {
        facet_xml::from_str(doc).unwrap()
    }

    /// Every node in document order, groups included
    pub(crate) fn flatten(nodes: &[SvgNode]) -> Vec<&SvgNode> {
        let mut out = Vec::new();
        for node in nodes {
            out.push(node);
            if let SvgNode::G(group) = node {
                out.extend(flatten(&group.children));
            }
        }
        out
    }

    #[test]
    fn numbers_are_trimmed() {
        assert_eq!(fmt_num(100.0), "100");
        assert_eq!(fmt_num(0.5), "0.5");
        assert_eq!(fmt_num(1.23456), "1.235");
        assert_eq!(fmt_num(-0.0001), "0");
    }

    #[test]
    fn groups_and_polygons() {
        let mut svg = SvgSurface::new(10.0, 10.0);
        {
            let mut saved = SavedState::new(&mut svg);
            saved
                .fill_polygon(
                    &[dvec2(0.0, 0.0), dvec2(10.0, 0.0), dvec2(10.0, 10.0)],
                    Color::rgba(255, 0, 0, 51),
                )
                .unwrap();
        }
        let doc = parse(&svg.finish().unwrap());
        assert_eq!(doc.width.as_deref(), Some("10"));
        assert_eq!(doc.view_box.as_deref(), Some("0 0 10 10"));
        let [SvgNode::G(group)] = doc.children.as_slice() else {
            panic!("expected one group, got {:?}", doc.children);
        };
        let [SvgNode::Polygon(polygon)] = group.children.as_slice() else {
            panic!("expected one polygon, got {:?}", group.children);
        };
        assert_eq!(polygon.points.as_deref(), Some("0,0 10,0 10,10"));
        assert_eq!(polygon.fill.as_deref(), Some("rgb(255,0,0)"));
        assert_eq!(polygon.style.as_deref(), Some("fill-opacity:0.2"));
    }

    #[test]
    fn open_groups_are_closed_on_finish() {
        let mut svg = SvgSurface::new(10.0, 10.0);
        svg.save();
        svg.save();
        svg.fill_polygon(&[DVec2::ZERO, DVec2::X, DVec2::ONE], Color::WHITE).unwrap();
        svg.restore();
        svg.restore();
        // unmatched restore is ignored
        svg.restore();
        svg.save();
        let doc = parse(&svg.finish().unwrap());
        let kinds: Vec<&str> = flatten(&doc.children)
            .into_iter()
            .map(|n| match n {
                SvgNode::G(_) => "g",
                SvgNode::Polygon(_) => "polygon",
                _ => "other",
            })
            .collect();
        assert_eq!(kinds, ["g", "g", "polygon", "g"]);
    }

    #[test]
    fn arrow_polyline_gets_a_head() {
        let mut svg = SvgSurface::new(100.0, 100.0);
        let style = LineStyle {
            color: Color::BLACK,
            width: 0.8,
            head: Some(ArrowHead {
                length: 3.0,
                width: 2.0,
            }),
        };
        svg.begin_line_style(&style).unwrap();
        svg.stroke_polyline(&[dvec2(10.0, 90.0), dvec2(100.0, 90.0)]).unwrap();
        svg.end_line_style();
        let doc = parse(&svg.finish().unwrap());
        let [SvgNode::Polyline(line), SvgNode::Polygon(head)] = doc.children.as_slice() else {
            panic!("expected a polyline and its head, got {:?}", doc.children);
        };
        assert_eq!(line.points.as_deref(), Some("10,90 98.5,90"));
        assert_eq!(line.fill.as_deref(), Some("none"));
        assert_eq!(line.stroke.as_deref(), Some("rgb(0,0,0)"));
        assert_eq!(line.stroke_width.as_deref(), Some("0.8"));
        assert_eq!(head.points.as_deref(), Some("100,90 97,91 97,89"));
        assert_eq!(head.fill.as_deref(), Some("rgb(0,0,0)"));
    }

    #[test]
    fn stroke_needs_a_line_style() {
        let mut svg = SvgSurface::new(10.0, 10.0);
        let err = svg.stroke_polyline(&[DVec2::ZERO, DVec2::ONE]).unwrap_err();
        assert_eq!(err.operation, "stroke polyline");
    }

    #[test]
    fn text_is_rotated_and_escaped() {
        let mut svg = SvgSurface::new(50.0, 50.0);
        svg.draw_text(&TextBlock {
            lines: vec!["a < b".into(), "c & d".into()],
            anchor: dvec2(5.0, 25.0),
            rotation: FRAC_PI_2,
            h_align: HAlign::Center,
            v_align: VAlign::Center,
            font: font(),
        })
        .unwrap();
        let raw = svg.finish().unwrap();
        assert!(raw.contains("a &lt; b"));
        assert!(raw.contains("c &amp; d"));

        let doc = parse(&raw);
        let [SvgNode::G(group)] = doc.children.as_slice() else {
            panic!("expected one text group, got {:?}", doc.children);
        };
        assert_eq!(group.transform.as_deref(), Some("translate(5 25) rotate(-90)"));
        let lines: Vec<(&str, Option<f64>)> = group
            .children
            .iter()
            .filter_map(|n| match n {
                SvgNode::Text(t) => Some((t.content.as_str(), t.y)),
                _ => None,
            })
            .collect();
        assert_eq!(lines, [("a < b", Some(-6.0)), ("c & d", Some(6.0))]);
        let SvgNode::Text(first) = &group.children[0] else {
            unreachable!()
        };
        assert_eq!(first.text_anchor.as_deref(), Some("middle"));
        assert_eq!(
            first.style.as_deref(),
            Some("font-family:sans-serif;font-size:10px;font-weight:bold")
        );
    }
}
