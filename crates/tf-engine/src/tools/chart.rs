//! Chart Generator: chart config as JSON plus a library snippet.

use crate::flavor::FlavorSource;
use crate::report::ReportWriter;
use crate::tool::{Tool, chosen, chosen_many, join_labels, leading_number, text_or, yes_no};
use serde_json::{Value, json};
use tf_core::catalog::{CatalogEntry, OptionCatalog};
use tf_core::form::FormState;
use tf_core::schema::{Category, FieldSpec, ToolSchema};
use tf_core::table::{KeyedTable, LookupTable};

pub static CHART_TYPE: OptionCatalog = OptionCatalog::new(
    "chart_type",
    &[
        CatalogEntry::new("bar", "Bar Chart", "Compare values across categories"),
        CatalogEntry::new("line", "Line Chart", "Show a trend over time"),
        CatalogEntry::new("area", "Area Chart", "Trend with emphasized volume"),
        CatalogEntry::new("pie", "Pie Chart", "Share of a whole"),
        CatalogEntry::new("doughnut", "Doughnut Chart", "Share of a whole with a center label"),
        CatalogEntry::new("scatter", "Scatter Plot", "Correlation between two measures"),
    ],
    "bar",
);

pub static COLOR_SCHEME: OptionCatalog = OptionCatalog::new(
    "color_scheme",
    &[
        CatalogEntry::new("default", "Default", "Balanced brand palette"),
        CatalogEntry::new("vibrant", "Vibrant", "High-contrast saturated colors"),
        CatalogEntry::new("pastel", "Pastel", "Soft muted tones"),
        CatalogEntry::new("monochrome", "Monochrome", "Shades of a single blue"),
        CatalogEntry::new("corporate", "Corporate", "Conservative navy and grey"),
    ],
    "default",
);

pub static LIBRARY: OptionCatalog = OptionCatalog::new(
    "library",
    &[
        CatalogEntry::new("chartjs", "Chart.js", "Canvas charts for plain JavaScript"),
        CatalogEntry::new("recharts", "Recharts", "Composable React components"),
        CatalogEntry::new("plotly", "Plotly", "Interactive scientific charts"),
        CatalogEntry::new("d3", "D3.js", "Low-level SVG data binding"),
    ],
    "chartjs",
);

pub static DATA_POINTS: OptionCatalog = OptionCatalog::new(
    "data_points",
    &[
        CatalogEntry::new("6", "6 points", "Half year"),
        CatalogEntry::new("12", "12 points", "Full year"),
        CatalogEntry::new("24", "24 points", "Two years"),
    ],
    "12",
);

pub static OPTIONS: OptionCatalog = OptionCatalog::new(
    "chart_options",
    &[
        CatalogEntry::new("legend", "Legend", "Series legend"),
        CatalogEntry::new("tooltips", "Tooltips", "Hover values"),
        CatalogEntry::new("grid", "Grid Lines", "Axis grid"),
        CatalogEntry::new("animations", "Animations", "Entry animation"),
        CatalogEntry::new("data-labels", "Data Labels", "Values printed on the chart"),
    ],
    "legend",
);

pub static SCHEMA: ToolSchema = ToolSchema {
    id: "chart-generator",
    title: "AI Chart Generator",
    description: "Describe your data and get a ready-to-use chart configuration.",
    category: Category::Data,
    latency_ms: 3000,
    fields: &[
        FieldSpec::text(
            "dataDescription",
            "Describe your data",
            "e.g. Monthly revenue for 2024 by month",
        ),
        FieldSpec::choice("chartType", "Chart type", &CHART_TYPE),
        FieldSpec::choice("colorScheme", "Color scheme", &COLOR_SCHEME),
        FieldSpec::choice("library", "Chart library", &LIBRARY),
        FieldSpec::choice("dataPoints", "Data points", &DATA_POINTS),
        FieldSpec::multi(
            "options",
            "Chart options",
            &OPTIONS,
            &["legend", "tooltips", "grid"],
        ),
        FieldSpec::toggle("stacked", "Stacked series", false),
        FieldSpec::toggle("responsive", "Responsive", true),
    ],
};

const SAMPLE_DESCRIPTION: &str = "Monthly revenue for the current year";

const MONTHS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

const PALETTE_ROWS: &[(&str, &[&str])] = &[
    ("vibrant", &["#ff4d6d", "#ffb703", "#06d6a0", "#118ab2", "#8338ec"]),
    ("pastel", &["#ffc8dd", "#bde0fe", "#cdb4db", "#b9fbc0", "#fde4cf"]),
    ("monochrome", &["#03045e", "#0077b6", "#00b4d8", "#90e0ef", "#caf0f8"]),
    ("corporate", &["#1d3557", "#457b9d", "#a8dadc", "#6c757d", "#adb5bd"]),
];

const PALETTES: KeyedTable<&[&str]> = LookupTable::new(
    "chart_palettes",
    PALETTE_ROWS,
    &["#4f46e5", "#06b6d4", "#10b981", "#f59e0b", "#ef4444"],
);

/// (install command, import line)
const INSTALL: KeyedTable<(&str, &str)> = LookupTable::new(
    "chart_install",
    &[
        (
            "recharts",
            ("npm install recharts", "import { ResponsiveContainer } from 'recharts';"),
        ),
        (
            "plotly",
            ("npm install plotly.js-dist-min", "import Plotly from 'plotly.js-dist-min';"),
        ),
        ("d3", ("npm install d3", "import * as d3 from 'd3';")),
    ],
    ("npm install chart.js", "import Chart from 'chart.js/auto';"),
);

pub struct ChartGenerator;

impl Tool for ChartGenerator {
    fn schema(&self) -> &'static ToolSchema {
        &SCHEMA
    }

    fn render(&self, form: &FormState, flavor: &mut dyn FlavorSource) -> String {
        let description = text_or(form, "dataDescription", SAMPLE_DESCRIPTION);
        let chart = chosen(form, "chartType", &CHART_TYPE);
        let scheme = chosen(form, "colorScheme", &COLOR_SCHEME);
        let library = chosen(form, "library", &LIBRARY);
        let points = leading_number(chosen(form, "dataPoints", &DATA_POINTS), 12);
        let options = chosen_many(form, "options", &OPTIONS, &["legend"]);
        let stacked = form.flag("stacked") && matches!(chart.id, "bar" | "area");
        let responsive = form.flag("responsive");
        let palette = *PALETTES.get(scheme.id);

        let labels: Vec<String> = (0..points).map(point_label).collect();
        let values: Vec<u64> = (0..points).map(|_| flavor.count(20, 100)).collect();
        let has = |id: &str| options.iter().any(|o| o.id == id);

        let config = json!({
            "type": chart.id,
            "data": {
                "labels": labels,
                "datasets": [{
                    "label": description,
                    "data": values,
                    "backgroundColor": palette,
                    "borderColor": palette[0],
                    "fill": chart.id == "area",
                }],
            },
            "options": {
                "responsive": responsive,
                "maintainAspectRatio": !responsive,
                "animation": has("animations"),
                "plugins": {
                    "legend": { "display": has("legend") },
                    "tooltip": { "enabled": has("tooltips") },
                    "datalabels": { "display": has("data-labels") },
                    "title": { "display": true, "text": description },
                },
                "scales": scales(chart.id, stacked, has("grid")),
            },
        });
        let config_text = serde_json::to_string_pretty(&config).unwrap_or_default();

        let mut w = ReportWriter::new();
        w.title(&format!("{}: {}", chart.label, description))
            .field("Chart Type", chart.label)
            .field("Library", library.label)
            .field("Color Scheme", scheme.label)
            .field("Data Points", points)
            .field("Options", join_labels(&options))
            .field("Stacked", yes_no(stacked))
            .field("Responsive", yes_no(responsive));

        w.heading("Chart Configuration").code_block("json", &config_text);

        let (install, import) = INSTALL.get(library.id);
        w.heading(&format!("{} Integration", library.label))
            .code_block("bash", install)
            .code_block("javascript", &snippet(library.id, import));

        w.heading("Data Insights");
        let peak = values
            .iter()
            .enumerate()
            .max_by_key(|(i, v)| (**v, usize::MAX - i));
        if let Some((peak_at, peak)) = peak {
            w.bullet(format!("Peak value {} at {}", peak, labels[peak_at]));
        }
        if let Some((low_at, low)) = values.iter().enumerate().min_by_key(|(i, v)| (**v, *i)) {
            w.bullet(format!("Lowest value {} at {}", low, labels[low_at]));
        }
        let total: u64 = values.iter().sum();
        w.bullet(format!(
            "Average {:.1} across {} points",
            total as f64 / points.max(1) as f64,
            points
        ))
        .bullet(format!("Best fit: {}", chart.description))
            .bullet(format!("Trend confidence: {}%", flavor.percent(70, 98)));

        w.finish()
    }
}

fn point_label(i: usize) -> String {
    if i < MONTHS.len() {
        MONTHS[i].to_string()
    } else {
        format!("{} Y{}", MONTHS[i % MONTHS.len()], i / MONTHS.len() + 1)
    }
}

fn scales(chart: &str, stacked: bool, grid: bool) -> Value {
    if matches!(chart, "pie" | "doughnut") {
        return json!({});
    }
    json!({
        "x": { "stacked": stacked, "grid": { "display": grid } },
        "y": { "stacked": stacked, "beginAtZero": true, "grid": { "display": grid } },
    })
}

fn snippet(library: &str, import: &str) -> String {
    let body = match library {
        "recharts" => {
            "export function GeneratedChart({ data }) {\n  return (\n    <ResponsiveContainer width=\"100%\" height={320}>\n      {/* render series from config.data */}\n    </ResponsiveContainer>\n  );\n}"
        }
        "plotly" => {
            "const trace = { x: config.data.labels, y: config.data.datasets[0].data, type: config.type };\nPlotly.newPlot('chart', [trace], { title: config.options.plugins.title.text });"
        }
        "d3" => {
            "const svg = d3.select('#chart').append('svg').attr('width', 640).attr('height', 320);\nsvg.selectAll('rect').data(config.data.datasets[0].data).join('rect');"
        }
        _ => "const ctx = document.getElementById('chart');\nnew Chart(ctx, config);",
    };
    format!("{}\n\n{}", import, body)
}
