//! Regulatory filings query tool

use crate::tool::Tool;
use serde::Deserialize;
use serde_json::{Value, json};
use std::sync::Arc;
use warroom_core::DataBundle;

#[derive(Debug, Deserialize)]
struct FilingsParams {
    #[serde(default = "default_filing_type")]
    filing_type: String,
    #[serde(default = "default_limit")]
    limit: usize,
}

fn default_filing_type() -> String {
    "all".to_string()
}

fn default_limit() -> usize {
    3
}

/// Lists recent SEC filings for the subject company
pub struct SecFilingsTool {
    bundle: Arc<DataBundle>,
}

impl SecFilingsTool {
    pub fn new(bundle: Arc<DataBundle>) -> Self {
        Self { bundle }
    }
}

impl Tool for SecFilingsTool {
    fn name(&self) -> &str {
        "get_sec_filings"
    }

    fn description(&self) -> &str {
        "Get recent SEC filings (10-K, 10-Q) for the company with filing dates."
    }

    fn input_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "filing_type": {
                    "type": "string",
                    "description": "Type of filing: 'all', '10-K', '10-Q'",
                    "default": "all"
                },
                "limit": {
                    "type": "integer",
                    "description": "Max filings to return",
                    "default": 3
                }
            },
            "required": []
        })
    }

    fn execute(&self, args: &Value) -> String {
        let params: FilingsParams = match serde_json::from_value(args.clone()) {
            Ok(p) => p,
            Err(e) => return format!("Invalid parameters for get_sec_filings: {e}"),
        };

        let lines: Vec<String> = self
            .bundle
            .filings_latest_first()
            .iter()
            .filter(|f| params.filing_type == "all" || f.filing_type == params.filing_type)
            .take(params.limit.max(1))
            .map(|f| format!("- {} filed {}", f.filing_type, f.filing_date))
            .collect();

        if lines.is_empty() {
            return format!("No SEC filings found for type '{}'", params.filing_type);
        }

        format!("SEC FILINGS:\n{}", lines.join("\n"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use warroom_core::FilingRecord;

    #[test]
    fn test_type_filter_and_limit() {
        let filing = |t: &str, month: u32| FilingRecord {
            filing_type: t.to_string(),
            filing_date: NaiveDate::from_ymd_opt(2025, month, 15).expect("valid date"),
        };
        let bundle = Arc::new(DataBundle {
            subject_ticker: "SNOW".to_string(),
            metrics: vec![],
            peer_financials: vec![],
            transcripts: vec![],
            analyst_ratings: vec![],
            news: vec![],
            sec_filings: vec![filing("10-Q", 9), filing("10-K", 3), filing("10-Q", 6)],
            press_releases: vec![],
        });
        let tool = SecFilingsTool::new(bundle);

        let out = tool.execute(&json!({"filing_type": "10-Q", "limit": 1}));
        assert_eq!(out, "SEC FILINGS:\n- 10-Q filed 2025-09-15");

        assert_eq!(
            tool.execute(&json!({"filing_type": "8-K"})),
            "No SEC filings found for type '8-K'"
        );
    }
}
