use bivariate_legend::{
    Axis, AxisTickSet, Color, LegendConfig, LegendGrid, Length, YAxisTextDirection, legend_svg,
};
use camino::{Utf8Path, Utf8PathBuf};
use rayon::prelude::*;
use std::fs;
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = std::env::args().collect();
    if args.len() < 2 {
        eprintln!("Usage: cargo xtask <command>");
        eprintln!("Commands:");
        eprintln!("  gallery [DIR]   Render every flag combination to SVG plus an index.html");
        std::process::exit(1);
    }

    match args[1].as_str() {
        "gallery" => gallery(args.get(2).map(Utf8PathBuf::from)),
        _ => {
            eprintln!("Unknown command: {}", args[1]);
            std::process::exit(1);
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct Variant {
    arrows: bool,
    titles: bool,
    ticks: bool,
    clockwise: bool,
    rotated: bool,
}

impl Variant {
    fn all() -> Vec<Variant> {
        (0..32u8)
            .map(|bits| Variant {
                arrows: bits & 1 != 0,
                titles: bits & 2 != 0,
                ticks: bits & 4 != 0,
                clockwise: bits & 8 != 0,
                rotated: bits & 16 != 0,
            })
            .collect()
    }

    fn name(&self) -> String {
        let flag = |on: bool, c: char| if on { c } else { '-' };
        format!(
            "legend_{}{}{}{}{}",
            flag(self.arrows, 'a'),
            flag(self.titles, 't'),
            flag(self.ticks, 'k'),
            flag(self.clockwise, 'c'),
            flag(self.rotated, 'r'),
        )
    }

    fn config(&self) -> LegendConfig {
        let direction = if self.clockwise {
            YAxisTextDirection::Clockwise
        } else {
            YAxisTextDirection::Counterclockwise
        };
        LegendConfig::new(Length::mm(60.0), Length::mm(60.0))
            .with_scale_factor(4.0)
            .with_arrows(self.arrows)
            .with_axis_titles("Median income\n(k$)", "Population density")
            .with_show_axis_titles(self.titles)
            .with_tick_labels(self.ticks)
            .with_y_axis_text_direction(direction)
            .with_rotated_45(self.rotated)
            .with_tick_precisions(0, 1)
    }
}

/// Classic 3×3 blue/pink bivariate palette, (0, 0) bottom-left
fn sample_grid() -> LegendGrid {
    const PALETTE: [[&str; 3]; 3] = [
        ["#e8e8e8", "#e4acac", "#c85a5a"],
        ["#b0d5df", "#ad9ea5", "#985356"],
        ["#64acbe", "#627f8c", "#574249"],
    ];
    LegendGrid::from_fn(3, |x, y| {
        PALETTE[y as usize][x as usize]
            .parse::<Color>()
            .expect("palette entries are valid hex colors")
    })
    .expect("3x3 grid is square")
}

fn gallery(dir: Option<Utf8PathBuf>) {
    let manifest_dir = Utf8Path::new(env!("CARGO_MANIFEST_DIR"));
    let out_dir = dir.unwrap_or_else(|| manifest_dir.join("../target/gallery"));
    fs::create_dir_all(&out_dir).expect("Failed to create gallery directory");

    let grid = sample_grid();
    let x_ticks = AxisTickSet::new(Axis::X, vec![12.0, 38.5, 61.0, 140.0]).expect("finite ticks");
    let y_ticks = AxisTickSet::new(Axis::Y, vec![0.0, 85.2, 410.7, 2650.0]).expect("finite ticks");

    let results: Vec<(Variant, Result<(), String>)> = Variant::all()
        .into_par_iter()
        .map(|variant| {
            let name = variant.name();
            tracing::info!(%name, "rendering");
            let result = legend_svg(&variant.config(), &grid, &x_ticks, &y_ticks)
                .map_err(|e| format!("{e:?}"))
                .and_then(|svg| {
                    fs::write(out_dir.join(format!("{name}.svg")), svg).map_err(|e| e.to_string())
                });
            (variant, result)
        })
        .collect();

    let failed = results.iter().filter(|(_, r)| r.is_err()).count();
    for (variant, result) in &results {
        if let Err(e) = result {
            eprintln!("{}: {e}", variant.name());
        }
    }

    let mut html = String::new();
    html.push_str(
        r#"<!DOCTYPE html>
<html>
<head>
    <meta charset="UTF-8">
    <title>Bivariate legend gallery</title>
    <style>
        body { font-family: system-ui, sans-serif; background: #eee; color: #333; margin: 24px; }
        .grid { display: grid; grid-template-columns: repeat(4, 1fr); gap: 16px; }
        figure { background: #fff; margin: 0; padding: 12px; border-radius: 4px; }
        figcaption { font-size: 12px; margin-top: 8px; }
        img { width: 100%; }
        .error { color: #b00; }
    </style>
</head>
<body>
<h1>Bivariate legend gallery</h1>
<p>a = arrows, t = titles, k = tick labels, c = clockwise Y text, r = rotated 45&deg;</p>
<div class="grid">
"#,
    );
    for (variant, result) in &results {
        let name = variant.name();
        match result {
            Ok(()) => html.push_str(&format!(
                "<figure><img src=\"{name}.svg\" alt=\"{name}\"><figcaption>{name}</figcaption></figure>\n"
            )),
            Err(e) => html.push_str(&format!(
                "<figure><pre class=\"error\">{}</pre><figcaption>{name}</figcaption></figure>\n",
                html_escape(e)
            )),
        }
    }
    html.push_str("</div>\n</body>\n</html>\n");

    let index = out_dir.join("index.html");
    fs::write(&index, html).expect("Failed to write index.html");
    eprintln!("Wrote {} legends ({failed} failed) to {index}", results.len());
    if failed > 0 {
        std::process::exit(1);
    }
}

fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}
