//! Press release query tool

use crate::tool::{Tool, excerpt};
use serde::Deserialize;
use serde_json::{Value, json};
use std::sync::Arc;
use warroom_core::DataBundle;

#[derive(Debug, Deserialize)]
struct PressParams {
    #[serde(default)]
    keyword: String,
    #[serde(default = "default_limit")]
    limit: usize,
}

fn default_limit() -> usize {
    5
}

/// Lists recent subject-company press releases, optionally filtered by title
pub struct PressReleasesTool {
    bundle: Arc<DataBundle>,
}

impl PressReleasesTool {
    pub fn new(bundle: Arc<DataBundle>) -> Self {
        Self { bundle }
    }
}

impl Tool for PressReleasesTool {
    fn name(&self) -> &str {
        "get_press_releases"
    }

    fn description(&self) -> &str {
        "Get recent company press releases with titles, dates, and summaries. \
         Useful for finding recent wins and product announcements."
    }

    fn input_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "keyword": {
                    "type": "string",
                    "description": "Optional keyword to filter press releases",
                    "default": ""
                },
                "limit": {
                    "type": "integer",
                    "description": "Max releases to return",
                    "default": 5
                }
            },
            "required": []
        })
    }

    fn execute(&self, args: &Value) -> String {
        let params: PressParams = match serde_json::from_value(args.clone()) {
            Ok(p) => p,
            Err(e) => return format!("Invalid parameters for get_press_releases: {e}"),
        };

        let keyword = params.keyword.to_lowercase();
        let lines: Vec<String> = self
            .bundle
            .press_releases_latest_first()
            .iter()
            .filter(|p| keyword.is_empty() || p.title.to_lowercase().contains(&keyword))
            .take(params.limit.max(1))
            .map(|p| format!("[{}] {}: {}", p.release_date, p.title, excerpt(&p.synopsis, 200)))
            .collect();

        if lines.is_empty() {
            if params.keyword.is_empty() {
                return "No press releases found".to_string();
            }
            return format!("No press releases found for keyword '{}'", params.keyword);
        }

        format!("PRESS RELEASES:\n{}", lines.join("\n\n"))
    }
}
