//! Dashboard Builder: KPI set, widget grid and data pipeline outline.

use crate::flavor::FlavorSource;
use crate::report::ReportWriter;
use crate::tool::{Tool, chosen, chosen_many, join_labels, text_or, yes_no};
use tf_core::catalog::{CatalogEntry, OptionCatalog};
use tf_core::form::FormState;
use tf_core::schema::{Category, FieldSpec, ToolSchema};
use tf_core::table::{KeyedTable, LookupTable};

pub static DATA_SOURCE: OptionCatalog = OptionCatalog::new(
    "data_source",
    &[
        CatalogEntry::new("spreadsheet", "Spreadsheet", "Excel or Google Sheets upload"),
        CatalogEntry::new("sql", "SQL Database", "PostgreSQL, MySQL or SQL Server"),
        CatalogEntry::new("warehouse", "Data Warehouse", "Snowflake, BigQuery or Redshift"),
        CatalogEntry::new("api", "REST API", "JSON endpoints polled on a schedule"),
        CatalogEntry::new("crm", "CRM", "Salesforce or HubSpot export"),
    ],
    "spreadsheet",
);

pub static INDUSTRY: OptionCatalog = OptionCatalog::new(
    "industry",
    &[
        CatalogEntry::new("retail", "Retail & E-commerce", "Online and in-store sales"),
        CatalogEntry::new("saas", "SaaS", "Subscription software"),
        CatalogEntry::new("healthcare", "Healthcare", "Clinics and hospitals"),
        CatalogEntry::new("finance", "Finance", "Banking and fintech"),
        CatalogEntry::new("manufacturing", "Manufacturing", "Production and supply chain"),
    ],
    "retail",
);

pub static DASHBOARD_TYPE: OptionCatalog = OptionCatalog::new(
    "dashboard_type",
    &[
        CatalogEntry::new("executive", "Executive Overview", "Few headline numbers, big trends"),
        CatalogEntry::new("operational", "Operational", "Live status for day-to-day teams"),
        CatalogEntry::new("analytical", "Analytical", "Drill-down exploration"),
    ],
    "executive",
);

pub static REFRESH_RATE: OptionCatalog = OptionCatalog::new(
    "refresh_rate",
    &[
        CatalogEntry::new("realtime", "Real-time", "Streaming updates"),
        CatalogEntry::new("hourly", "Hourly", "Refreshed every hour"),
        CatalogEntry::new("daily", "Daily", "Refreshed overnight"),
        CatalogEntry::new("weekly", "Weekly", "Refreshed every Monday"),
    ],
    "daily",
);

pub static WIDGETS: OptionCatalog = OptionCatalog::new(
    "widgets",
    &[
        CatalogEntry::new("kpi-cards", "KPI Cards", "Headline numbers with deltas"),
        CatalogEntry::new("line-chart", "Trend Line", "Metric over time"),
        CatalogEntry::new("bar-chart", "Bar Chart", "Category comparison"),
        CatalogEntry::new("table", "Data Table", "Sortable detail rows"),
        CatalogEntry::new("map", "Geo Map", "Regional breakdown"),
        CatalogEntry::new("funnel", "Funnel", "Stage conversion"),
    ],
    "kpi-cards",
);

pub static SCHEMA: ToolSchema = ToolSchema {
    id: "dashboard-builder",
    title: "AI Dashboard Builder",
    description: "Turn a business question into a dashboard layout with KPIs and widgets.",
    category: Category::Business,
    latency_ms: 4000,
    fields: &[
        FieldSpec::text(
            "businessQuestion",
            "Business question",
            "e.g. Which regions drive revenue growth?",
        ),
        FieldSpec::choice("dataSource", "Data source", &DATA_SOURCE),
        FieldSpec::choice("industry", "Industry", &INDUSTRY),
        FieldSpec::choice("dashboardType", "Dashboard type", &DASHBOARD_TYPE),
        FieldSpec::choice("refreshRate", "Refresh rate", &REFRESH_RATE),
        FieldSpec::multi(
            "widgets",
            "Widgets",
            &WIDGETS,
            &["kpi-cards", "line-chart", "table"],
        ),
        FieldSpec::toggle("darkMode", "Dark mode", false),
        FieldSpec::toggle("enableAlerts", "Threshold alerts", true),
    ],
};

const SAMPLE_QUESTION: &str = "How is the business performing this quarter?";

const KPI_ROWS: &[(&str, &[&str])] = &[
    (
        "saas",
        &["MRR", "Churn Rate", "Customer Acquisition Cost", "Net Revenue Retention"],
    ),
    (
        "healthcare",
        &["Patient Volume", "Average Wait Time", "Bed Occupancy", "Readmission Rate"],
    ),
    (
        "finance",
        &["Assets Under Management", "Net Interest Margin", "Loan Default Rate", "Cost-to-Income Ratio"],
    ),
    (
        "manufacturing",
        &["Units Produced", "Overall Equipment Effectiveness", "Defect Rate", "On-time Delivery"],
    ),
];

/// Headline metrics per industry.
const KPIS: KeyedTable<&[&str]> = LookupTable::new(
    "dashboard_kpis",
    KPI_ROWS,
    &["Revenue", "Orders", "Average Order Value", "Conversion Rate"],
);

/// Column span on the 12-column grid and row height.
const WIDGET_SIZE: KeyedTable<(usize, usize)> = LookupTable::new(
    "dashboard_widget_size",
    &[
        ("kpi-cards", (12, 1)),
        ("line-chart", (8, 2)),
        ("bar-chart", (6, 2)),
        ("table", (12, 3)),
        ("map", (6, 3)),
    ],
    (4, 2),
);

/// (connector, sync strategy)
const PIPELINE: KeyedTable<(&str, &str)> = LookupTable::new(
    "dashboard_pipeline",
    &[
        ("sql", ("JDBC connector with read replica", "incremental by updated_at")),
        ("warehouse", ("Native warehouse connector", "materialized views")),
        ("api", ("Scheduled HTTP fetcher", "paginated pull with ETag caching")),
        ("crm", ("CRM export connector", "nightly full export")),
    ],
    ("File upload parser", "full reload on change"),
);

const GRID_COLUMNS: usize = 12;

pub struct DashboardBuilder;

impl Tool for DashboardBuilder {
    fn schema(&self) -> &'static ToolSchema {
        &SCHEMA
    }

    fn render(&self, form: &FormState, flavor: &mut dyn FlavorSource) -> String {
        let question = text_or(form, "businessQuestion", SAMPLE_QUESTION);
        let source = chosen(form, "dataSource", &DATA_SOURCE);
        let industry = chosen(form, "industry", &INDUSTRY);
        let kind = chosen(form, "dashboardType", &DASHBOARD_TYPE);
        let refresh = chosen(form, "refreshRate", &REFRESH_RATE);
        let widgets = chosen_many(form, "widgets", &WIDGETS, &["kpi-cards"]);
        let dark = form.flag("darkMode");
        let alerts = form.flag("enableAlerts");
        let kpis = *KPIS.get(industry.id);

        let mut w = ReportWriter::new();
        w.title(&format!("{} Dashboard", kind.label))
            .field("Business Question", question)
            .field("Industry", industry.label)
            .field("Data Source", source.label)
            .field("Refresh Rate", refresh.label)
            .field("Widgets", join_labels(&widgets))
            .field("Theme", if dark { "Dark" } else { "Light" })
            .field("Alerts", yes_no(alerts));

        w.heading("Key Metrics");
        let rows: Vec<Vec<String>> = kpis
            .iter()
            .map(|kpi| {
                let delta = i64::from(flavor.percent(0, 30)) - 10;
                vec![
                    (*kpi).to_string(),
                    format!("{:+}%", delta),
                    if delta >= 0 { "On track" } else { "Needs attention" }.to_string(),
                ]
            })
            .collect();
        w.table(&["Metric", "Change", "Status"], &rows);

        w.heading("Layout");
        w.paragraph(format!("{}-column grid, {}.", GRID_COLUMNS, kind.description.to_lowercase()));
        let placed = layout(&widgets);
        let rows: Vec<Vec<String>> = placed
            .iter()
            .map(|p| {
                vec![
                    p.label.to_string(),
                    format!("row {}", p.row + 1),
                    format!("col {}-{}", p.col + 1, p.col + p.span),
                    format!("{}x{}", p.span, p.height),
                ]
            })
            .collect();
        w.table(&["Widget", "Row", "Columns", "Size"], &rows);

        let (connector, sync) = PIPELINE.get(source.id);
        w.heading("Data Pipeline")
            .numbered(1, format!("Extract: {}", connector))
            .numbered(2, format!("Sync: {} ({})", sync, refresh.description.to_lowercase()))
            .numbered(3, format!("Model: {} fact table with {} dimensions", industry.label, kpis.len()))
            .numbered(4, format!("Serve: {} widgets answering \"{}\"", placed.len(), question));

        if alerts {
            w.heading("Alerts");
            for kpi in kpis.iter().take(2) {
                w.bullet(format!(
                    "Notify owners when {} moves more than {}% from its 4-week average",
                    kpi,
                    flavor.percent(5, 20)
                ));
            }
        }

        w.heading("Performance Estimate")
            .bullet(format!("Initial load: {} ms", flavor.count(400, 1800)))
            .bullet(format!("Query cache hit rate: {}%", flavor.percent(70, 97)));

        w.finish()
    }
}

#[derive(Debug, PartialEq, Eq)]
struct Placement {
    label: &'static str,
    row: usize,
    col: usize,
    span: usize,
    height: usize,
}

/// Left-to-right packing onto the grid; a widget that does not fit starts a new row.
fn layout(widgets: &[&'static CatalogEntry]) -> Vec<Placement> {
    let mut placed = Vec::with_capacity(widgets.len());
    let (mut row, mut col, mut row_height) = (0, 0, 0);
    for widget in widgets {
        let (span, height) = *WIDGET_SIZE.get(widget.id);
        let span = span.min(GRID_COLUMNS);
        if col + span > GRID_COLUMNS {
            row += row_height;
            col = 0;
            row_height = 0;
        }
        placed.push(Placement {
            label: widget.label,
            row,
            col,
            span,
            height,
        });
        col += span;
        row_height = row_height.max(height);
    }
    placed
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::flavor::FixedFlavor;

    #[test]
    fn test_layout_wraps_rows() {
        let widgets: Vec<&'static CatalogEntry> = ["kpi-cards", "line-chart", "funnel", "map"]
            .iter()
            .filter_map(|id| WIDGETS.lookup(id))
            .collect();
        let placed = layout(&widgets);
        let cells: Vec<(usize, usize, usize)> =
            placed.iter().map(|p| (p.row, p.col, p.span)).collect();
        assert_eq!(cells, vec![(0, 0, 12), (1, 0, 8), (1, 8, 4), (3, 0, 6)]);
        assert!(placed.iter().all(|p| p.col + p.span <= GRID_COLUMNS));
    }

    #[test]
    fn test_industry_kpis() {
        let mut form = SCHEMA.initial_state();
        form.set_field("industry", "saas").unwrap();
        let out = DashboardBuilder.render(&form, &mut FixedFlavor);
        assert!(out.contains("| MRR | -10% | Needs attention |"));
        assert!(out.contains("Notify owners when Churn Rate moves more than 5%"));
    }

    #[test]
    fn test_alerts_and_theme() {
        let mut form = SCHEMA.initial_state();
        form.set_field("enableAlerts", false).unwrap();
        form.set_field("darkMode", true).unwrap();
        let out = DashboardBuilder.render(&form, &mut FixedFlavor);
        assert!(!out.contains("## Alerts"));
        assert!(out.contains("**Theme:** Dark"));
        assert!(out.contains(SAMPLE_QUESTION));
    }
}
