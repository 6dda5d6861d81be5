//! Earnings-call transcript search tool

use crate::tool::{Tool, excerpt};
use serde::Deserialize;
use serde_json::{Value, json};
use std::sync::Arc;
use warroom_core::DataBundle;

#[derive(Debug, Deserialize)]
struct TranscriptParams {
    #[serde(default)]
    keyword: String,
    #[serde(default = "default_company")]
    company: String,
    #[serde(default = "default_limit")]
    limit: usize,
}

fn default_company() -> String {
    "all".to_string()
}

fn default_limit() -> usize {
    3
}

/// Keyword search over earnings-call transcript synopses
pub struct TranscriptSearchTool {
    bundle: Arc<DataBundle>,
}

impl TranscriptSearchTool {
    pub fn new(bundle: Arc<DataBundle>) -> Self {
        Self { bundle }
    }
}

impl Tool for TranscriptSearchTool {
    fn name(&self) -> &str {
        "search_transcripts"
    }

    fn description(&self) -> &str {
        "Search earnings call transcripts for specific topics or keywords. \
         Returns relevant excerpts from the company's and/or competitor calls."
    }

    fn input_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "keyword": {
                    "type": "string",
                    "description": "Keyword or topic to search for (e.g., 'AI', 'consumption', 'pricing', 'competition')"
                },
                "company": {
                    "type": "string",
                    "description": "Filter by company ticker, or 'all'",
                    "default": "all"
                },
                "limit": {
                    "type": "integer",
                    "description": "Max results to return",
                    "default": 3
                }
            },
            "required": ["keyword"]
        })
    }

    fn execute(&self, args: &Value) -> String {
        let params: TranscriptParams = match serde_json::from_value(args.clone()) {
            Ok(p) => p,
            Err(e) => return format!("Invalid parameters for search_transcripts: {e}"),
        };

        let company = params.company.to_uppercase();
        let keyword = params.keyword.to_lowercase();

        let hits: Vec<String> = self
            .bundle
            .transcripts_latest_first()
            .iter()
            .filter(|t| company == "ALL" || t.ticker.eq_ignore_ascii_case(&company))
            .filter(|t| keyword.is_empty() || t.synopsis.to_lowercase().contains(&keyword))
            .take(params.limit.max(1))
            .map(|t| {
                format!(
                    "[{}] {} ({}):\n{}\n",
                    t.ticker,
                    t.event_type,
                    t.event_date,
                    excerpt(&t.synopsis, 500)
                )
            })
            .collect();

        if hits.is_empty() {
            return format!(
                "No transcripts found for keyword '{}' and company '{}'",
                params.keyword, params.company
            );
        }

        format!("TRANSCRIPT SEARCH RESULTS:\n{}", hits.join("\n---\n"))
    }
}
