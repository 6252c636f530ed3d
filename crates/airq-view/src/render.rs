use airq_core::Parameters;
use html_escape::{encode_double_quoted_attribute, encode_text};

use crate::chart::{BarChart, BarMode};
use crate::controls::{controls, SliderSpec};
use crate::dashboard::DashboardView;
use crate::table::ResultTable;

pub const PAGE_TITLE: &str = "Air Quality Dashboard";

const PAGE_CSS: &str = include_str!("../assets/dashboard.css");

const SVG_WIDTH: f64 = 640.0;
const SVG_HEIGHT: f64 = 360.0;
const MARGIN_LEFT: f64 = 56.0;
const MARGIN_RIGHT: f64 = 120.0;
const MARGIN_TOP: f64 = 40.0;
const MARGIN_BOTTOM: f64 = 48.0;
const Y_TICKS: u32 = 5;

pub fn format_number(value: f64) -> String {
    format!("{value}")
}

/// Smallest 1/2/2.5/5 x 10^n step at or above `value`.
pub fn nice_ceiling(value: f64) -> f64 {
    if !value.is_finite() || value <= 0.0 {
        return 1.0;
    }
    let magnitude = 10_f64.powf(value.log10().floor());
    [1.0, 2.0, 2.5, 5.0, 10.0]
        .into_iter()
        .map(|step| step * magnitude)
        .find(|candidate| *candidate >= value)
        .unwrap_or(10.0 * magnitude)
}

pub fn render_table_html(table: &ResultTable) -> String {
    let mut lines = vec![
        "<table class=\"results\">".to_string(),
        "<thead><tr>".to_string(),
    ];
    for column in table.columns {
        lines.push(format!("<th>{}</th>", encode_text(column)));
    }
    lines.push("</tr></thead>".to_string());
    lines.push("<tbody>".to_string());
    for row in &table.rows {
        lines.push(format!(
            "<tr class=\"status-{}\"><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>",
            row.status.key(),
            encode_text(&row.name),
            format_number(row.pm10),
            format_number(row.pm25),
            format_number(row.o3),
            format_number(row.score),
            row.status.label(),
        ));
    }
    lines.push("</tbody>".to_string());
    lines.push("</table>".to_string());
    lines.join("\n")
}

pub fn render_bar_chart_svg(chart: &BarChart) -> String {
    let plot_w = SVG_WIDTH - MARGIN_LEFT - MARGIN_RIGHT;
    let plot_h = SVG_HEIGHT - MARGIN_TOP - MARGIN_BOTTOM;
    let baseline = MARGIN_TOP + plot_h;
    let y_max = nice_ceiling(chart.max_value());

    let mut lines = vec![
        format!(
            "<svg xmlns=\"http://www.w3.org/2000/svg\" id=\"{}\" class=\"chart\" viewBox=\"0 0 {SVG_WIDTH} {SVG_HEIGHT}\" role=\"img\" aria-label=\"{}\">",
            encode_double_quoted_attribute(chart.id),
            encode_double_quoted_attribute(chart.title),
        ),
        format!(
            "<text class=\"chart-title\" x=\"{}\" y=\"24\">{}</text>",
            MARGIN_LEFT,
            encode_text(chart.title)
        ),
    ];

    for tick in 0..=Y_TICKS {
        let value = y_max * f64::from(tick) / f64::from(Y_TICKS);
        let y = baseline - plot_h * f64::from(tick) / f64::from(Y_TICKS);
        lines.push(format!(
            "<line class=\"grid\" x1=\"{MARGIN_LEFT}\" y1=\"{y:.1}\" x2=\"{:.1}\" y2=\"{y:.1}\"/>",
            MARGIN_LEFT + plot_w
        ));
        lines.push(format!(
            "<text class=\"tick\" x=\"{:.1}\" y=\"{:.1}\" text-anchor=\"end\">{}</text>",
            MARGIN_LEFT - 6.0,
            y + 4.0,
            format_number((value * 100.0).round() / 100.0)
        ));
    }
    lines.push(format!(
        "<text class=\"axis-label\" transform=\"rotate(-90)\" x=\"{:.1}\" y=\"14\" text-anchor=\"middle\">{}</text>",
        -(MARGIN_TOP + plot_h / 2.0),
        encode_text(chart.y_label)
    ));

    let category_count = chart.categories.len().max(1) as f64;
    let band = plot_w / category_count;
    let series_count = match chart.mode {
        BarMode::Grouped => chart.series.len().max(1) as f64,
        BarMode::Single => 1.0,
    };
    let bar_w = band * 0.8 / series_count;

    for (si, series) in chart.series.iter().enumerate() {
        let slot = match chart.mode {
            BarMode::Grouped => si as f64,
            BarMode::Single => 0.0,
        };
        for (ci, point) in series.points.iter().enumerate() {
            let height = (point.value.max(0.0) / y_max * plot_h).min(plot_h);
            let x = MARGIN_LEFT + ci as f64 * band + band * 0.1 + slot * bar_w;
            lines.push(format!(
                "<rect x=\"{x:.1}\" y=\"{:.1}\" width=\"{bar_w:.1}\" height=\"{height:.1}\" fill=\"{}\"><title>{}: {} {}</title></rect>",
                baseline - height,
                encode_double_quoted_attribute(point.color),
                encode_text(&point.category),
                encode_text(&series.name),
                format_number(point.value)
            ));
        }
    }

    for (ci, category) in chart.categories.iter().enumerate() {
        let x = MARGIN_LEFT + ci as f64 * band + band / 2.0;
        lines.push(format!(
            "<text class=\"category\" x=\"{x:.1}\" y=\"{:.1}\" text-anchor=\"middle\">{}</text>",
            baseline + 18.0,
            encode_text(category)
        ));
    }
    lines.push(format!(
        "<line class=\"axis\" x1=\"{MARGIN_LEFT}\" y1=\"{baseline:.1}\" x2=\"{:.1}\" y2=\"{baseline:.1}\"/>",
        MARGIN_LEFT + plot_w
    ));

    let legend_x = SVG_WIDTH - MARGIN_RIGHT + 16.0;
    for (i, entry) in chart.legend.iter().enumerate() {
        let y = MARGIN_TOP + i as f64 * 20.0;
        lines.push(format!(
            "<rect class=\"legend-swatch\" x=\"{legend_x:.1}\" y=\"{y:.1}\" width=\"12\" height=\"12\" fill=\"{}\"/>",
            encode_double_quoted_attribute(entry.color)
        ));
        lines.push(format!(
            "<text class=\"legend\" x=\"{:.1}\" y=\"{:.1}\">{}</text>",
            legend_x + 18.0,
            y + 10.0,
            encode_text(entry.label)
        ));
    }

    lines.push("</svg>".to_string());
    lines.join("\n")
}

fn render_slider(slider: &SliderSpec) -> String {
    let id = encode_double_quoted_attribute(slider.id);
    let value = format_number(slider.value);
    format!(
        "<div class=\"slider\">\n<label for=\"{id}\">{} <output id=\"{id}-value\">{value}</output></label>\n<input type=\"range\" id=\"{id}\" name=\"{id}\" min=\"{}\" max=\"{}\" step=\"{}\" value=\"{value}\" oninput=\"document.getElementById('{id}-value').value=this.value\">\n</div>",
        encode_text(slider.label),
        format_number(slider.min),
        format_number(slider.max),
        format_number(slider.step),
    )
}

/// Full dashboard document. The controls submit back to `/` as a GET form.
pub fn render_page(params: &Parameters, view: &DashboardView) -> String {
    let mut lines = vec![
        "<!DOCTYPE html>".to_string(),
        "<html lang=\"en\">".to_string(),
        "<head>".to_string(),
        "<meta charset=\"utf-8\">".to_string(),
        "<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">".to_string(),
        format!("<title>{}</title>", encode_text(PAGE_TITLE)),
        format!("<style>\n{PAGE_CSS}</style>"),
        "</head>".to_string(),
        "<body>".to_string(),
        "<main>".to_string(),
        format!("<h1>{}</h1>", encode_text(PAGE_TITLE)),
        "<h3>Weighted air-quality analysis by city</h3>".to_string(),
        "<form class=\"controls\" method=\"get\" action=\"/\">".to_string(),
    ];
    for slider in &controls(params) {
        lines.push(render_slider(slider));
    }
    lines.push("<button type=\"submit\">Analyze air quality</button>".to_string());
    lines.push("</form>".to_string());

    match view {
        DashboardView::NoData { message } => {
            lines.push(format!("<p class=\"no-data\">{}</p>", encode_text(message)));
        }
        DashboardView::Ready {
            table,
            pollutant_chart,
            score_chart,
        } => {
            lines.push("<section class=\"table\">".to_string());
            lines.push(render_table_html(table));
            lines.push("</section>".to_string());
            lines.push("<section class=\"charts\">".to_string());
            for chart in [pollutant_chart, score_chart] {
                lines.push(format!("<figure>\n{}\n</figure>", render_bar_chart_svg(chart)));
            }
            lines.push("</section>".to_string());
        }
    }

    lines.push("</main>".to_string());
    lines.push("</body>".to_string());
    lines.push("</html>".to_string());
    lines.join("\n")
}
