use crate::model::{GroupSummary, ThroughputSeries};
use std::fmt::Write;

const WIDTH: f64 = 720.0;
const HEIGHT: f64 = 420.0;
const MARGIN_LEFT: f64 = 90.0;
const MARGIN_RIGHT: f64 = 24.0;
const MARGIN_TOP: f64 = 20.0;
const MARGIN_BOTTOM: f64 = 56.0;
const Y_TICKS: usize = 5;

/// Render a self-contained HTML report: a line plot of the series (x =
/// threads, y = total ops per sec, grid lines, point markers) followed by a
/// per-group table.
///
/// Important: we avoid `format!()` on the template because the CSS contains
/// many `{}`; placeholders are substituted with `replace` instead.
pub fn render_html_report(
    title: &str,
    series: &ThroughputSeries,
    summaries: &[GroupSummary],
) -> anyhow::Result<String> {
    const TEMPLATE: &str = r#"<!doctype html>
<html>
<head>
<meta charset="utf-8">
<title>__TITLE__</title>
<style>
  body { font-family: system-ui, -apple-system, Segoe UI, Roboto, Arial, sans-serif; margin: 16px; color: #222; }
  h1 { font-size: 18px; font-weight: 600; }
  svg { border: 1px solid #ddd; background: white; }
  .grid { stroke: #e4e4e4; stroke-width: 1; }
  .axis { stroke: #555; stroke-width: 1; }
  .tick { font-size: 12px; fill: #555; }
  .label { font-size: 13px; fill: #222; }
  .line { fill: none; stroke: #1f77b4; stroke-width: 2; }
  .point { fill: #1f77b4; }
  table { border-collapse: collapse; margin-top: 16px; }
  th, td { border-bottom: 1px solid #eee; padding: 6px 10px; text-align: left; font-size: 14px; }
  th { border-bottom: 1px solid #ddd; }
  .num { text-align: right; font-variant-numeric: tabular-nums; }
</style>
</head>
<body>
<h1>__TITLE__</h1>
__PLOT__
<table>
  <thead>
    <tr>
      <th class="num">#threads</th>
      <th class="num">records</th>
      <th class="num">read ops</th>
      <th class="num">update ops</th>
      <th class="num">seconds</th>
      <th class="num">ops / s</th>
    </tr>
  </thead>
  <tbody>
__ROWS__  </tbody>
</table>
</body>
</html>
"#;

    let plot = render_svg(series)?;

    let mut rows = String::new();
    for s in summaries {
        writeln!(
            rows,
            r#"    <tr><td class="num">{}</td><td class="num">{}</td><td class="num">{}</td><td class="num">{}</td><td class="num">{:.3}</td><td class="num">{:.1}</td></tr>"#,
            s.threads, s.records, s.read_ops, s.update_ops, s.seconds, s.ops_per_sec
        )?;
    }

    Ok(TEMPLATE
        .replace("__TITLE__", &escape_html(title))
        .replace("__PLOT__", &plot)
        .replace("__ROWS__", &rows))
}

/// Inline SVG line plot of the series, points joined in series order.
fn render_svg(series: &ThroughputSeries) -> anyhow::Result<String> {
    let plot_w = WIDTH - MARGIN_LEFT - MARGIN_RIGHT;
    let plot_h = HEIGHT - MARGIN_TOP - MARGIN_BOTTOM;
    let bottom = MARGIN_TOP + plot_h;

    let mut svg = String::new();
    writeln!(
        svg,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{WIDTH}" height="{HEIGHT}" viewBox="0 0 {WIDTH} {HEIGHT}">"#
    )?;

    let (x_min, x_max) = x_range(series);
    let y_max = y_range(series);
    let sx = |x: f64| MARGIN_LEFT + (x - x_min) / (x_max - x_min) * plot_w;
    let sy = |y: f64| bottom - y / y_max * plot_h;

    // Horizontal grid + y tick labels.
    for i in 0..=Y_TICKS {
        let v = y_max * i as f64 / Y_TICKS as f64;
        let y = sy(v);
        writeln!(
            svg,
            r#"  <line class="grid" x1="{MARGIN_LEFT}" y1="{y:.1}" x2="{:.1}" y2="{y:.1}"/>"#,
            MARGIN_LEFT + plot_w
        )?;
        writeln!(
            svg,
            r#"  <text class="tick" x="{:.1}" y="{:.1}" text-anchor="end">{}</text>"#,
            MARGIN_LEFT - 6.0,
            y + 4.0,
            format_ops(v)
        )?;
    }

    // Vertical grid at every thread count.
    let mut xs: Vec<u64> = series.keys().copied().collect();
    xs.sort_unstable();
    xs.dedup();
    for t in xs {
        let x = sx(t as f64);
        writeln!(
            svg,
            r#"  <line class="grid" x1="{x:.1}" y1="{MARGIN_TOP}" x2="{x:.1}" y2="{bottom}"/>"#
        )?;
        writeln!(
            svg,
            r#"  <text class="tick" x="{x:.1}" y="{:.1}" text-anchor="middle">{t}</text>"#,
            bottom + 18.0
        )?;
    }

    writeln!(
        svg,
        r#"  <line class="axis" x1="{MARGIN_LEFT}" y1="{bottom}" x2="{:.1}" y2="{bottom}"/>"#,
        MARGIN_LEFT + plot_w
    )?;
    writeln!(
        svg,
        r#"  <line class="axis" x1="{MARGIN_LEFT}" y1="{MARGIN_TOP}" x2="{MARGIN_LEFT}" y2="{bottom}"/>"#
    )?;

    if series.is_empty() {
        writeln!(
            svg,
            r#"  <text class="label" x="{:.1}" y="{:.1}" text-anchor="middle">no data</text>"#,
            MARGIN_LEFT + plot_w / 2.0,
            MARGIN_TOP + plot_h / 2.0
        )?;
    } else {
        let points: Vec<String> = series
            .iter()
            .map(|(&t, &v)| format!("{:.1},{:.1}", sx(t as f64), sy(v)))
            .collect();
        writeln!(
            svg,
            r#"  <polyline class="line" points="{}"/>"#,
            points.join(" ")
        )?;
        for (&t, &v) in series {
            writeln!(
                svg,
                r#"  <circle class="point" cx="{:.1}" cy="{:.1}" r="4"><title>{t} threads: {v:.1} ops/s</title></circle>"#,
                sx(t as f64),
                sy(v)
            )?;
        }
    }

    writeln!(
        svg,
        r#"  <text class="label" x="{:.1}" y="{:.1}" text-anchor="middle">#threads</text>"#,
        MARGIN_LEFT + plot_w / 2.0,
        HEIGHT - 12.0
    )?;
    writeln!(
        svg,
        r#"  <text class="label" x="16" y="{:.1}" text-anchor="middle" transform="rotate(-90 16 {:.1})">total ops per sec</text>"#,
        MARGIN_TOP + plot_h / 2.0,
        MARGIN_TOP + plot_h / 2.0
    )?;
    svg.push_str("</svg>");

    Ok(svg)
}

/// Thread-count axis bounds; a single point gets one unit of room each side.
fn x_range(series: &ThroughputSeries) -> (f64, f64) {
    let min = series.keys().copied().min();
    let max = series.keys().copied().max();
    match (min, max) {
        (Some(lo), Some(hi)) if lo < hi => (lo as f64, hi as f64),
        (Some(lo), Some(_)) => (lo as f64 - 1.0, lo as f64 + 1.0),
        _ => (0.0, 1.0),
    }
}

/// Throughput axis upper bound: 10% headroom over the largest value.
fn y_range(series: &ThroughputSeries) -> f64 {
    let max = series.values().copied().fold(0.0f64, f64::max);
    if max > 0.0 { max * 1.1 } else { 1.0 }
}

fn format_ops(v: f64) -> String {
    if v >= 1_000_000.0 {
        format!("{:.1}M", v / 1_000_000.0)
    } else if v >= 1_000.0 {
        format!("{:.1}k", v / 1_000.0)
    } else {
        format!("{:.0}", v)
    }
}

fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}
