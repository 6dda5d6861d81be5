//! Anomaly-check tool backed by the signal engine

use crate::tool::Tool;
use serde_json::{Value, json};
use std::sync::Arc;
use warroom_core::DataBundle;
use warroom_signals::SignalEngine;

/// Runs the signal engine over the bundle and formats both finding categories
///
/// The engine runs fresh on every call; findings are plain-text bullets, the
/// only shape the model ever sees.
pub struct AnomalyCheckTool {
    bundle: Arc<DataBundle>,
}

impl AnomalyCheckTool {
    pub fn new(bundle: Arc<DataBundle>) -> Self {
        Self { bundle }
    }
}

impl Tool for AnomalyCheckTool {
    fn name(&self) -> &str {
        "check_anomalies"
    }

    fn description(&self) -> &str {
        "Detect anomalies and concerning trends in the company's metrics. \
         Returns flagged issues with threat levels plus growth comparisons \
         against major competitors."
    }

    fn input_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {},
            "required": []
        })
    }

    fn execute(&self, _args: &Value) -> String {
        let engine = SignalEngine::new(&self.bundle.metrics, &self.bundle.peer_financials);
        let report = engine.analyze();

        let mut out = String::from("DETECTED ANOMALIES:\n");
        if report.anomalies.is_empty() {
            out.push_str("- No major anomalies detected\n");
        } else {
            for a in &report.anomalies {
                out.push_str(&format!("- [{}] {}: {}\n", a.threat, a.metric, a.description));
            }
        }

        out.push_str("\nCOMPETITIVE GAPS:\n");
        if report.gaps.is_empty() {
            out.push_str("- No competitor comparisons available\n");
        } else {
            for g in &report.gaps {
                let status = if g.advantage { "ahead" } else { "behind" };
                out.push_str(&format!(
                    "- vs {}: {} {:.1}% vs {:.1}% ({status})\n",
                    g.competitor,
                    self.bundle.subject_ticker,
                    g.own_growth_pct,
                    g.competitor_growth_pct
                ));
            }
        }

        out
    }
}
