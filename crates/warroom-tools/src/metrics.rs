//! Subject-company metrics query tool

use crate::tool::Tool;
use serde::Deserialize;
use serde_json::{Value, json};
use std::sync::Arc;
use warroom_core::{DataBundle, Metric};

#[derive(Debug, Deserialize)]
struct MetricsParams {
    /// Metric group to return
    #[serde(default = "default_metric")]
    metric: String,
    /// Number of recent quarters
    #[serde(default = "default_quarters")]
    quarters: usize,
}

fn default_metric() -> String {
    "all".to_string()
}

fn default_quarters() -> usize {
    4
}

/// Returns recent quarters of the subject company's financial metrics
pub struct CompanyMetricsTool {
    bundle: Arc<DataBundle>,
}

impl CompanyMetricsTool {
    pub fn new(bundle: Arc<DataBundle>) -> Self {
        Self { bundle }
    }

    fn columns_for(selection: &str) -> Vec<Metric> {
        match selection {
            "revenue" => vec![Metric::ProductRevenue, Metric::TotalRevenue],
            "nrr" => vec![Metric::NrrPercent],
            "rpo" => vec![Metric::Rpo],
            "fcf" => vec![Metric::FreeCashFlow],
            "margins" => vec![Metric::GrossMarginPercent],
            "customers" => vec![Metric::CustomersOverOneMillion],
            _ => vec![
                Metric::ProductRevenue,
                Metric::TotalRevenue,
                Metric::Rpo,
                Metric::NrrPercent,
                Metric::CustomersOverOneMillion,
                Metric::FreeCashFlow,
                Metric::GrossMarginPercent,
            ],
        }
    }

    fn format_value(metric: Metric, value: Option<f64>) -> String {
        let Some(v) = value else {
            return "N/A".to_string();
        };
        match metric {
            Metric::NrrPercent | Metric::GrossMarginPercent => format!("{v:.0}%"),
            Metric::CustomersOverOneMillion => format!("{v:.0}"),
            _ => format!("${v:.1}M"),
        }
    }
}

impl Tool for CompanyMetricsTool {
    fn name(&self) -> &str {
        "get_company_metrics"
    }

    fn description(&self) -> &str {
        "Get the company's financial metrics (revenue, NRR, RPO, FCF, margins, \
         customer counts) for recent quarters. Use this to find trends, \
         anomalies, or specific data points."
    }

    fn input_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "metric": {
                    "type": "string",
                    "description": "Metric group to retrieve",
                    "enum": ["all", "revenue", "nrr", "rpo", "fcf", "margins", "customers"],
                    "default": "all"
                },
                "quarters": {
                    "type": "integer",
                    "description": "Number of recent quarters to return (default 4)",
                    "default": 4
                }
            },
            "required": ["metric"]
        })
    }

    fn execute(&self, args: &Value) -> String {
        let params: MetricsParams = match serde_json::from_value(args.clone()) {
            Ok(p) => p,
            Err(e) => return format!("Invalid parameters for get_company_metrics: {e}"),
        };

        let rows = self.bundle.metrics_latest_first();
        if rows.is_empty() {
            return "No metrics data available".to_string();
        }

        let columns = Self::columns_for(params.metric.as_str());
        let lines: Vec<String> = rows
            .iter()
            .take(params.quarters.max(1))
            .map(|row| {
                let cells: Vec<String> = columns
                    .iter()
                    .map(|&m| format!("{}: {}", m.label(), Self::format_value(m, row.value(m))))
                    .collect();
                format!("{} | {}", row.quarter_label(), cells.join(" | "))
            })
            .collect();

        format!(
            "{} METRICS ({} quarters, most recent first):\n{}",
            self.bundle.subject_ticker,
            lines.len(),
            lines.join("\n")
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use warroom_core::QuarterlyMetricRecord;

    fn bundle_with_quarters(n: usize) -> Arc<DataBundle> {
        let metrics = (0..n)
            .map(|i| QuarterlyMetricRecord {
                period_end: NaiveDate::from_ymd_opt(2025 - i as i32, 10, 31).expect("valid date"),
                fiscal_quarter: 3,
                fiscal_year: 2026 - i as u16,
                product_revenue_m: Some(1000.0 + i as f64),
                total_revenue_m: Some(1100.0),
                rpo_m: None,
                nrr_percent: Some(125.0),
                customers_1m_plus: Some(688.0),
                fcf_m: Some(110.5),
                gross_margin_percent: Some(76.0),
            })
            .collect();
        Arc::new(DataBundle {
            subject_ticker: "SNOW".to_string(),
            metrics,
            peer_financials: vec![],
            transcripts: vec![],
            analyst_ratings: vec![],
            news: vec![],
            sec_filings: vec![],
            press_releases: vec![],
        })
    }

    #[test]
    fn test_default_quarters_applied() {
        let tool = CompanyMetricsTool::new(bundle_with_quarters(8));
        let out = tool.execute(&json!({"metric": "revenue"}));
        // Default of 4 quarters, most recent first
        assert!(out.contains("4 quarters"));
        assert!(out.contains("Product Revenue: $1000.0M"));
        assert!(!out.contains("$1004.0M"));
    }

    #[test]
    fn test_missing_metric_defaults_to_all() {
        let tool = CompanyMetricsTool::new(bundle_with_quarters(5));
        let out = tool.execute(&json!({}));
        assert!(out.contains("Net Revenue Retention: 125%"));
        assert!(out.contains("RPO: N/A"));
    }

    #[test]
    fn test_empty_table_reports_no_data() {
        let tool = CompanyMetricsTool::new(bundle_with_quarters(0));
        assert_eq!(tool.execute(&json!({"metric": "all"})), "No metrics data available");
    }
}
