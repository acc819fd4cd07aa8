use super::{ComposeContext, DocumentComposer, DocumentKind, Section};
use crate::blocks::{Column, Field, Table};
use crate::config::ROUTE_PERFORMANCE_TABLE;
use crate::format::DateInput;
use serde::Deserialize;

const REPORT_CURRENCY: &str = "EUR";
const ROUTE_HEADERS: [&str; 5] = ["Route", "Shipments", "On-Time %", "Avg Cost", "Revenue"];
const FALLBACK_WIDTHS: [f32; 5] = [56.0, 28.0, 28.0, 28.0, 28.0];

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct DateRange {
    pub from: DateInput,
    pub to: DateInput,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Metrics {
    pub total_shipments: u64,
    /// Percentage, 0 to 100
    pub on_time_delivery: f64,
    pub total_cost: f64,
    /// Cubic metres
    pub storage_volume: f64,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoutePerformance {
    pub route: String,
    pub shipments: u64,
    pub on_time_percentage: f64,
    pub avg_cost: f64,
    pub total_revenue: f64,
}

/// Aggregate figures for a reporting period
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogisticsReport {
    pub date_range: DateRange,
    #[serde(default)]
    pub metrics: Metrics,
    #[serde(default)]
    pub route_performance: Vec<RoutePerformance>,
}

impl LogisticsReport {
    fn route_table(&self, ctx: &ComposeContext<'_>) -> Table {
        let widths = ctx.table_widths(ROUTE_PERFORMANCE_TABLE, &FALLBACK_WIDTHS);
        let columns = ROUTE_HEADERS
            .iter()
            .zip(widths)
            .map(|(header, width)| Column::new(*header, width))
            .collect();

        let money = |amount: f64| ctx.locale.format_currency(amount, REPORT_CURRENCY, Some(0));
        self.route_performance
            .iter()
            .fold(Table::new(columns), |table, route| {
                table.row([
                    route.route.clone(),
                    route.shipments.to_string(),
                    format!("{}%", route.on_time_percentage),
                    money(route.avg_cost),
                    money(route.total_revenue),
                ])
            })
    }
}

/// Grouped number with up to three decimals and no trailing zeros
fn volume(ctx: &ComposeContext<'_>, value: f64) -> String {
    let formatted = ctx.locale.format_number(value, 3);
    match formatted.rsplit_once(ctx.locale.decimal_separator.as_str()) {
        Some((integer, fraction)) => {
            let fraction = fraction.trim_end_matches('0');
            if fraction.is_empty() {
                integer.to_string()
            } else {
                format!("{integer}{}{fraction}", ctx.locale.decimal_separator)
            }
        }
        None => formatted,
    }
}

impl DocumentComposer for LogisticsReport {
    fn kind(&self) -> DocumentKind {
        DocumentKind::LogisticsReport
    }

    /// `20240101_20240331` for a first-quarter report
    fn natural_id(&self) -> Option<String> {
        let from = self.date_range.from.normalize()?;
        let to = self.date_range.to.normalize()?;
        Some(format!("{}_{}", from.format("%Y%m%d"), to.format("%Y%m%d")))
    }

    fn sections(&self, ctx: &ComposeContext<'_>) -> Vec<Section> {
        let period = Section::new("Report Period").block(
            Field::new(
                "Period",
                format!(
                    "{} - {}",
                    ctx.date(Some(&self.date_range.from)),
                    ctx.date(Some(&self.date_range.to))
                ),
            )
            .stacked(),
        );

        let metrics = &self.metrics;
        let key_metrics = Section::new("Key Metrics")
            .block(Field::new("Total Shipments", metrics.total_shipments.to_string()))
            .block(Field::new(
                "On-Time Delivery",
                format!("{:.1}%", metrics.on_time_delivery),
            ))
            .block(Field::new(
                "Total Cost",
                ctx.locale
                    .format_currency(metrics.total_cost, REPORT_CURRENCY, Some(2)),
            ))
            .block(Field::new(
                "Storage Volume",
                format!("{} m³", volume(ctx, metrics.storage_volume)),
            ));

        let routes = Section::new("Route Performance").block(self.route_table(ctx));

        vec![period, key_metrics, routes]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::blocks::Block;
    use crate::config::TableWidths;
    use crate::format::{LabelCatalog, Locale};
    use crate::units::mm;

    fn report() -> LogisticsReport {
        serde_json::from_str(
            r#"{
                "dateRange": { "from": "2024-01-01", "to": "2024-03-31" },
                "metrics": { "totalShipments": 1284, "onTimeDelivery": 94.27, "totalCost": 125400.5, "storageVolume": 12500 },
                "routePerformance": [
                    { "route": "Warsaw - Berlin", "shipments": 320, "onTimePercentage": 96.5, "avgCost": 850.4, "totalRevenue": 312000 },
                    { "route": "Gdańsk - Prague", "shipments": 75, "onTimePercentage": 88, "avgCost": 1200, "totalRevenue": 98000 }
                ]
            }"#,
        )
        .expect("valid report")
    }

    #[test]
    fn natural_id_spans_the_period() {
        assert_eq!(report().natural_id().as_deref(), Some("20240101_20240331"));
    }

    #[test]
    fn metrics_and_routes_are_formatted() {
        let (locale, labels, tables) = (Locale::default(), LabelCatalog::default(), TableWidths::default());
        let ctx = ComposeContext {
            locale: &locale,
            labels: &labels,
            tables: &tables,
            content_width: mm(170.0),
        };
        let sections = report().sections(&ctx);
        let values: Vec<String> = sections[0..2]
            .iter()
            .flat_map(|s| s.blocks.iter())
            .filter_map(|block| match block {
                Block::Field(field) => field.value.clone(),
                _ => None,
            })
            .collect();
        assert_eq!(
            values,
            vec![
                "January 1, 2024 - March 31, 2024",
                "1284",
                "94.3%",
                "€125,400.50",
                "12,500 m³"
            ]
        );

        let table = match &sections[2].blocks[0] {
            Block::Table(table) => table,
            other => panic!("expected a table, got {other:?}"),
        };
        assert_eq!(table.columns[0].width, mm(56.0));
        assert_eq!(
            table.rows[0],
            vec!["Warsaw - Berlin", "320", "96.5%", "€850", "€312,000"]
        );
        assert_eq!(table.rows[1][2], "88%");
    }

    #[test]
    fn mismatched_configured_widths_fall_back() {
        let tables: TableWidths =
            serde_json::from_str(r#"{ "route_performance": [100, 70] }"#).expect("valid widths");
        let (locale, labels) = (Locale::default(), LabelCatalog::default());
        let ctx = ComposeContext {
            locale: &locale,
            labels: &labels,
            tables: &tables,
            content_width: mm(170.0),
        };
        let table = report().route_table(&ctx);
        assert_eq!(table.columns.len(), 5);
        assert_eq!(table.columns[1].width, mm(28.0));
    }
}
