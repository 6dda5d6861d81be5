//! Competitor news query tool

use crate::tool::{Tool, excerpt};
use serde::Deserialize;
use serde_json::{Value, json};
use std::sync::Arc;
use warroom_core::DataBundle;

#[derive(Debug, Deserialize)]
struct NewsParams {
    #[serde(default = "default_ticker")]
    ticker: String,
}

fn default_ticker() -> String {
    "all".to_string()
}

/// Returns recent competitor headlines and summaries
pub struct CompetitorNewsTool {
    bundle: Arc<DataBundle>,
}

impl CompetitorNewsTool {
    pub fn new(bundle: Arc<DataBundle>) -> Self {
        Self { bundle }
    }
}

impl Tool for CompetitorNewsTool {
    fn name(&self) -> &str {
        "get_competitor_news"
    }

    fn description(&self) -> &str {
        "Get recent news and headlines about competitors. Useful for finding \
         competitive threats or market trends."
    }

    fn input_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "ticker": {
                    "type": "string",
                    "description": "Competitor ticker (e.g., 'DDOG', 'MDB') or 'all'",
                    "default": "all"
                }
            },
            "required": []
        })
    }

    fn execute(&self, args: &Value) -> String {
        let params: NewsParams = match serde_json::from_value(args.clone()) {
            Ok(p) => p,
            Err(e) => return format!("Invalid parameters for get_competitor_news: {e}"),
        };

        let lines: Vec<String> = self
            .bundle
            .news_latest_first()
            .iter()
            .filter(|n| params.ticker == "all" || n.ticker.eq_ignore_ascii_case(&params.ticker))
            .map(|n| format!("[{}] {}: {}", n.ticker, n.headline, excerpt(&n.summary, 200)))
            .collect();

        if lines.is_empty() {
            return format!("No news found for {}", params.ticker);
        }

        format!("COMPETITOR NEWS:\n{}", lines.join("\n\n"))
    }
}
