//! End-to-end legend scenarios through the public API

use bivariate_legend::render::DrawCommand;
use bivariate_legend::render::transform::TransformMode;
use bivariate_legend::surface::{HAlign, TextBlock, VAlign};
use bivariate_legend::{
    Axis, AxisTickSet, Color, LegendConfig, LegendGrid, Length, RecordingSurface, legend_svg,
    render_legend,
};
use facet_svg::{Svg, SvgNode, facet_xml};
use glam::{DAffine2, DVec2, dvec2};

const PALETTE: [Color; 4] = [
    Color::rgb(232, 232, 232),
    Color::rgb(181, 192, 218),
    Color::rgb(203, 184, 215),
    Color::rgb(143, 128, 183),
];

fn grid_2x2() -> LegendGrid {
    LegendGrid::from_fn(2, |x, y| PALETTE[(y * 2 + x) as usize]).unwrap()
}

fn fills(commands: &[DrawCommand]) -> Vec<(Vec<DVec2>, Color)> {
    commands
        .iter()
        .filter_map(|c| match c {
            DrawCommand::FillPolygon { points, color } => Some((points.clone(), *color)),
            _ => None,
        })
        .collect()
}

fn texts(commands: &[DrawCommand]) -> Vec<&TextBlock> {
    commands
        .iter()
        .filter_map(|c| match c {
            DrawCommand::DrawText(t) => Some(t),
            _ => None,
        })
        .collect()
}

fn close(a: DVec2, b: DVec2) -> bool {
    (a - b).length() < 1e-9
}

#[test]
fn plain_grid_fills_the_square() {
    let config = LegendConfig::new(Length::mm(100.0), Length::mm(100.0));
    let mut surface = RecordingSurface::new();
    let session = render_legend(
        &mut surface,
        &config,
        &grid_2x2(),
        &AxisTickSet::empty(),
        &AxisTickSet::empty(),
    )
    .unwrap();

    assert_eq!(session.transform.affine, DAffine2::IDENTITY);
    assert_eq!(session.layout.cell_size, 50.0);
    assert_eq!(session.layout.reserved_edge_with_arrows, 0.0);

    let fills = fills(surface.commands());
    assert_eq!(fills.len(), 4);
    let expected_top_left = [
        dvec2(0.0, 50.0),
        dvec2(50.0, 50.0),
        dvec2(0.0, 0.0),
        dvec2(50.0, 0.0),
    ];
    for ((corners, color), (top_left, palette)) in fills.iter().zip(expected_top_left.iter().zip(PALETTE)) {
        assert_eq!(corners[0], *top_left);
        assert_eq!(corners[2] - corners[0], dvec2(50.0, 50.0));
        assert_eq!(*color, palette);
    }
}

#[test]
fn axis_titles_shrink_the_grid() {
    let config = LegendConfig::new(Length::mm(100.0), Length::mm(100.0)).with_axis_titles("A", "B");
    let mut surface = RecordingSurface::new();
    let session = render_legend(
        &mut surface,
        &config,
        &grid_2x2(),
        &AxisTickSet::empty(),
        &AxisTickSet::empty(),
    )
    .unwrap();

    let layout = &session.layout;
    let zone = layout.title_zone;
    assert!(zone > 0.0);
    assert!((layout.cell_size - (100.0 - zone) / 2.0).abs() < 1e-9);
    assert_eq!(layout.grid_origin, dvec2(zone, 100.0 - zone));

    let texts = texts(surface.commands());
    assert_eq!(texts.len(), 2);

    let a = texts[0];
    assert_eq!(a.lines, ["A"]);
    assert!(close(a.anchor, dvec2(zone + (100.0 - zone) / 2.0, 100.0 - zone / 2.0)));
    assert_eq!(a.rotation, 0.0);
    assert_eq!((a.h_align, a.v_align), (HAlign::Center, VAlign::Center));

    let b = texts[1];
    assert_eq!(b.lines, ["B"]);
    assert!(close(b.anchor, dvec2(zone / 2.0, (100.0 - zone) / 2.0)));
    assert!((b.rotation.to_degrees() - 90.0).abs() < 1e-9);
}

#[test]
fn diamond_stays_inscribed() {
    let config = LegendConfig::new(Length::mm(100.0), Length::mm(100.0)).with_rotated_45(true);
    let mut surface = RecordingSurface::new();
    let session = render_legend(
        &mut surface,
        &config,
        &grid_2x2(),
        &AxisTickSet::empty(),
        &AxisTickSet::empty(),
    )
    .unwrap();

    match session.transform.mode {
        TransformMode::Diamond { scale } => assert!(scale < std::f64::consts::FRAC_1_SQRT_2),
        other => panic!("expected diamond mode, got {other:?}"),
    }
    for (corners, _) in fills(surface.commands()) {
        for p in corners {
            assert!(p.x > 0.0 && p.x < 100.0 && p.y > 0.0 && p.y < 100.0, "{p}");
        }
    }
}

#[test]
fn tick_labels_use_per_axis_precision() {
    let config = LegendConfig::new(Length::mm(120.0), Length::mm(120.0))
        .with_tick_labels(true)
        .with_tick_precisions(0, 3);
    let x = AxisTickSet::new(Axis::X, vec![0.0, 10.4, 20.6]).unwrap();
    let y = AxisTickSet::new(Axis::Y, vec![1.0, 1.0005, 2.5]).unwrap();
    let mut surface = RecordingSurface::new();
    render_legend(&mut surface, &config, &grid_2x2(), &x, &y).unwrap();

    let labels: Vec<&str> = texts(surface.commands())
        .into_iter()
        .map(|t| t.lines[0].as_str())
        .collect();
    assert_eq!(labels, ["0", "10", "21", "2.500", "1.000", "1.000"]);
}

#[test]
fn svg_output_is_deterministic() {
    let config = LegendConfig::new(Length::mm(60.0), Length::mm(60.0))
        .with_scale_factor(2.0)
        .with_arrows(true)
        .with_axis_titles("Median income\n(k$)", "Population")
        .with_tick_labels(true);
    let x = AxisTickSet::new(Axis::X, vec![10.0, 20.0, 30.0]).unwrap();
    let y = AxisTickSet::new(Axis::Y, vec![0.0, 150.0, 3000.0]).unwrap();
    let first = legend_svg(&config, &grid_2x2(), &x, &y).unwrap();
    let second = legend_svg(&config, &grid_2x2(), &x, &y).unwrap();
    assert_eq!(first, second);

    let doc: Svg = facet_xml::from_str(&first).unwrap();
    let mut nodes = Vec::new();
    collect(&doc.children, &mut nodes);
    let count = |f: fn(&SvgNode) -> bool| nodes.iter().filter(|n| f(n)).count();
    assert_eq!(count(|n| matches!(n, SvgNode::Polygon(_))), 4 + 2);
    assert_eq!(count(|n| matches!(n, SvgNode::Polyline(_))), 2);
    // one element per line: a two-line X title, the Y title, six ticks
    assert_eq!(count(|n| matches!(n, SvgNode::Text(_))), 2 + 1 + 6);

    let first_line = nodes
        .iter()
        .find_map(|n| match n {
            SvgNode::Text(t) if t.content == "Median income" => Some(t),
            _ => None,
        })
        .unwrap();
    assert!((first_line.y.unwrap() + 4.233).abs() < 1e-9);
}

#[test]
fn tick_label_spacing_moves_the_grid() {
    let x = AxisTickSet::new(Axis::X, vec![1.0, 2.0, 3.0]).unwrap();
    let y = AxisTickSet::new(Axis::Y, vec![1.0, 2.0, 3.0]).unwrap();
    let base = LegendConfig::new(Length::mm(100.0), Length::mm(100.0)).with_tick_labels(true);
    let layout = |config: &LegendConfig| {
        let mut surface = RecordingSurface::new();
        render_legend(&mut surface, config, &grid_2x2(), &x, &y).unwrap().layout
    };
    let plain = layout(&base);
    let spaced = layout(&base.clone().with_tick_label_spacing(Length::mm(4.0)));
    assert!((spaced.reserved_edge - plain.reserved_edge - 4.0).abs() < 1e-9);
    assert!((plain.cell_size - spaced.cell_size - 2.0).abs() < 1e-9);
}

fn collect<'a>(nodes: &'a [SvgNode], out: &mut Vec<&'a SvgNode>) {
    for node in nodes {
        out.push(node);
        if let SvgNode::G(group) = node {
            collect(&group.children, out);
        }
    }
}
