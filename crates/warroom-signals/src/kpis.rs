//! Latest-quarter KPI summary

use serde::{Deserialize, Serialize};
use warroom_core::QuarterlyMetricRecord;

/// Formatted headline metrics for the most recent quarter
///
/// Used as context for the defense loop and for the CLI header. Missing
/// metrics render as "N/A" rather than being dropped, so the layout stays
/// stable across bundles.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KpiSummary {
    /// Quarter label, e.g. "Q3 FY2026"
    pub quarter: String,
    /// (label, formatted value) pairs in display order
    pub entries: Vec<(String, String)>,
}

impl KpiSummary {
    /// Build the summary from the most recent metrics row
    pub fn from_record(row: &QuarterlyMetricRecord) -> Self {
        let money = |v: Option<f64>| v.map_or("N/A".to_string(), |x| format!("${x:.0}M"));
        let pct = |v: Option<f64>| v.map_or("N/A".to_string(), |x| format!("{x:.0}%"));
        let count = |v: Option<f64>| {
            v.map_or("N/A".to_string(), |x| format_thousands(x.round() as i64))
        };

        let entries = vec![
            ("Product Revenue".to_string(), money(row.product_revenue_m)),
            ("Total Revenue".to_string(), money(row.total_revenue_m)),
            ("RPO".to_string(), money(row.rpo_m)),
            ("NRR".to_string(), pct(row.nrr_percent)),
            ("$1M+ Customers".to_string(), count(row.customers_1m_plus)),
            (
                "FCF".to_string(),
                row.fcf_m.map_or("N/A".to_string(), |x| format!("${x:.1}M")),
            ),
            ("Gross Margin".to_string(), pct(row.gross_margin_percent)),
        ];

        Self {
            quarter: row.quarter_label(),
            entries,
        }
    }

    /// Render as "- label: value" bullet lines for prompt context
    pub fn to_bullets(&self) -> String {
        self.entries
            .iter()
            .map(|(label, value)| format!("- {label}: {value}"))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

fn format_thousands(n: i64) -> String {
    let digits = n.abs().to_string();
    let mut out = String::new();
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    if n < 0 {
        format!("-{out}")
    } else {
        out
    }
}
