//! Analyst ratings query tool

use crate::tool::Tool;
use serde::Deserialize;
use serde_json::{Value, json};
use std::sync::Arc;
use warroom_core::DataBundle;

#[derive(Debug, Deserialize)]
struct RatingsParams {
    /// Empty means the subject company
    #[serde(default)]
    company: String,
}

/// Returns sell-side ratings, price targets and research notes
pub struct AnalystRatingsTool {
    bundle: Arc<DataBundle>,
}

impl AnalystRatingsTool {
    pub fn new(bundle: Arc<DataBundle>) -> Self {
        Self { bundle }
    }
}

impl Tool for AnalystRatingsTool {
    fn name(&self) -> &str {
        "get_analyst_ratings"
    }

    fn description(&self) -> &str {
        "Get analyst ratings, price targets, and research notes for the company \
         or its competitors."
    }

    fn input_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "company": {
                    "type": "string",
                    "description": "Company ticker, or 'all'; defaults to the subject company"
                }
            },
            "required": []
        })
    }

    fn execute(&self, args: &Value) -> String {
        let params: RatingsParams = match serde_json::from_value(args.clone()) {
            Ok(p) => p,
            Err(e) => return format!("Invalid parameters for get_analyst_ratings: {e}"),
        };

        let company = if params.company.is_empty() {
            self.bundle.subject_ticker.clone()
        } else {
            params.company.to_uppercase()
        };

        let lines: Vec<String> = self
            .bundle
            .ratings_latest_first()
            .iter()
            .filter(|r| company == "ALL" || r.ticker.eq_ignore_ascii_case(&company))
            .map(|r| {
                let target = r
                    .price_target
                    .map_or("N/A".to_string(), |pt| format!("{pt:.0}"));
                format!(
                    "- {}: {} (PT ${}) - \"{}\"",
                    r.analyst_firm, r.rating, target, r.notes
                )
            })
            .collect();

        if lines.is_empty() {
            return format!("No analyst ratings found for {company}");
        }

        format!("ANALYST RATINGS FOR {company}:\n{}", lines.join("\n"))
    }
}
