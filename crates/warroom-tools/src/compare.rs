//! Head-to-head competitor comparison tool

use crate::tool::Tool;
use serde::Deserialize;
use serde_json::{Value, json};
use std::sync::Arc;
use warroom_core::{DataBundle, Metric};

const MAX_COMPETITOR_ROWS: usize = 12;

#[derive(Debug, Deserialize)]
struct CompareParams {
    competitor: String,
    #[serde(default = "default_metric")]
    metric: String,
}

fn default_metric() -> String {
    "all".to_string()
}

/// Compares the subject company's latest quarter against a competitor's
/// reported financials
pub struct CompetitorCompareTool {
    bundle: Arc<DataBundle>,
}

impl CompetitorCompareTool {
    pub fn new(bundle: Arc<DataBundle>) -> Self {
        Self { bundle }
    }
}

impl Tool for CompetitorCompareTool {
    fn name(&self) -> &str {
        "compare_to_competitor"
    }

    fn description(&self) -> &str {
        "Compare the company's financials side-by-side with a competitor. \
         Useful for benchmarking growth and scale."
    }

    fn input_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "competitor": {
                    "type": "string",
                    "description": "Competitor ticker (e.g., 'DDOG', 'MDB', 'GOOGL', 'AMZN')"
                },
                "metric": {
                    "type": "string",
                    "description": "Metric to focus on, or 'all'",
                    "default": "all"
                }
            },
            "required": ["competitor"]
        })
    }

    fn execute(&self, args: &Value) -> String {
        let params: CompareParams = match serde_json::from_value(args.clone()) {
            Ok(p) => p,
            Err(e) => return format!("Invalid parameters for compare_to_competitor: {e}"),
        };

        let competitor = params.competitor.to_uppercase();
        let metric_filter = params.metric.to_lowercase();

        let mut rows: Vec<_> = self
            .bundle
            .peer_financials
            .iter()
            .filter(|p| p.company_id.eq_ignore_ascii_case(&competitor))
            .filter(|p| {
                metric_filter == "all" || p.metric_name.to_lowercase().contains(&metric_filter)
            })
            .collect();

        if rows.is_empty() {
            return format!(
                "No data found for competitor '{}'. Available companies: {}",
                params.competitor,
                self.bundle.peer_company_ids().join(", ")
            );
        }
        rows.sort_by(|a, b| b.period_end.cmp(&a.period_end));

        let subject = &self.bundle.subject_ticker;
        let mut out = format!("COMPARISON: {subject} vs {competitor}\n\n{subject} (latest quarter):\n");
        match self.bundle.metrics_latest_first().first() {
            Some(latest) => {
                let revenue = latest
                    .value(Metric::TotalRevenue)
                    .map_or("N/A".to_string(), |v| format!("${v:.1}M"));
                let nrr = latest
                    .value(Metric::NrrPercent)
                    .map_or("N/A".to_string(), |v| format!("{v:.0}%"));
                out.push_str(&format!(
                    "- Revenue: {revenue} ({})\n- NRR: {nrr}\n",
                    latest.quarter_label()
                ));
            }
            None => out.push_str("- No metrics available\n"),
        }

        out.push_str(&format!("\n{competitor}:\n"));
        for row in rows.iter().take(MAX_COMPETITOR_ROWS) {
            out.push_str(&format!(
                "- {}: {} {} (FY{} Q{})\n",
                row.metric_name, row.metric_value, row.metric_unit, row.fiscal_year, row.fiscal_quarter
            ));
        }

        out
    }
}
