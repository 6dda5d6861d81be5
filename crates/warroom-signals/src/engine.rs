//! Anomaly and competitive-gap detection over quarterly metrics

use crate::findings::{AnomalyFinding, CompetitiveGap, SourceBucket, ThreatLevel};
use crate::kpis::KpiSummary;
use tracing::debug;
use warroom_core::{Metric, PeerMetricRecord, QuarterlyMetricRecord};

/// Metrics scanned by the deviation rule, in a fixed order
const MONITORED_METRICS: [Metric; 7] = [
    Metric::ProductRevenue,
    Metric::TotalRevenue,
    Metric::Rpo,
    Metric::NrrPercent,
    Metric::CustomersOverOneMillion,
    Metric::FreeCashFlow,
    Metric::GrossMarginPercent,
];

/// Tracked competitors and the peer-table metric each is compared on
const TRACKED_COMPETITORS: [(&str, &str); 2] =
    [("GOOGL", "CLOUD_REVENUE"), ("AMZN", "AWS_REVENUE")];

/// Declines steeper than this trigger a finding
const DEVIATION_FLAG_THRESHOLD: f64 = -0.20;
/// Declines steeper than this are HIGH instead of MEDIUM
const DEVIATION_HIGH_THRESHOLD: f64 = -0.30;

/// Everything one analysis run produced
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SignalReport {
    pub anomalies: Vec<AnomalyFinding>,
    pub gaps: Vec<CompetitiveGap>,
}

/// Pure analysis over subject-company and peer metrics
///
/// Construction takes private copies of both tables; the caller's data is
/// never reordered. Missing columns and short histories degrade by omitting
/// the affected finding category, never by erroring.
pub struct SignalEngine {
    /// Subject quarters, most recent first
    own: Vec<QuarterlyMetricRecord>,
    peers: Vec<PeerMetricRecord>,
}

impl SignalEngine {
    /// Create an engine over the given metric tables
    pub fn new(own_metrics: &[QuarterlyMetricRecord], peer_metrics: &[PeerMetricRecord]) -> Self {
        let mut own = own_metrics.to_vec();
        own.sort_by(|a, b| b.period_end.cmp(&a.period_end));
        Self {
            own,
            peers: peer_metrics.to_vec(),
        }
    }

    /// Run all detection rules and return the findings
    pub fn analyze(&self) -> SignalReport {
        let mut report = SignalReport::default();
        self.detect_deviations(&mut report.anomalies);
        self.detect_nrr_decline(&mut report.anomalies);
        self.detect_competitive_gaps(&mut report.gaps);
        debug!(
            anomalies = report.anomalies.len(),
            gaps = report.gaps.len(),
            "analysis complete"
        );
        report
    }

    /// Flag metrics more than 20% below their 4-quarter moving average
    fn detect_deviations(&self, anomalies: &mut Vec<AnomalyFinding>) {
        // 1 current quarter + 4 trailing
        if self.own.len() < 5 {
            return;
        }

        let current_row = &self.own[0];
        let quarter = current_row.quarter_label();

        for metric in MONITORED_METRICS {
            let Some(current) = current_row.value(metric) else {
                continue;
            };

            let trailing: Vec<f64> = self.own[1..5]
                .iter()
                .filter_map(|row| row.value(metric))
                .collect();
            if trailing.is_empty() {
                continue;
            }
            let avg = trailing.iter().sum::<f64>() / trailing.len() as f64;
            if avg == 0.0 {
                continue;
            }

            let deviation = (current - avg) / avg.abs();

            // Only declines are flagged; overperformance is not a threat
            if deviation < DEVIATION_FLAG_THRESHOLD {
                let threat = if deviation < DEVIATION_HIGH_THRESHOLD {
                    ThreatLevel::High
                } else {
                    ThreatLevel::Medium
                };
                anomalies.push(AnomalyFinding {
                    metric: metric.label().to_string(),
                    current,
                    trailing_avg: round1(avg),
                    deviation_pct: round1(deviation * 100.0),
                    threat,
                    description: format!(
                        "{} is {:.0}% below 4Q average",
                        metric.label(),
                        deviation.abs() * 100.0
                    ),
                    quarter: quarter.clone(),
                    source_bucket: SourceBucket::FilingsPress,
                });
            }
        }
    }

    /// Flag net revenue retention that has worsened four quarters in a row
    ///
    /// Reading most-recent-first as v0..v3, the flag fires iff v0 < v1 < v2
    /// < v3; any tie or improvement in the span suppresses it. Evaluated in
    /// addition to the deviation rule.
    fn detect_nrr_decline(&self, anomalies: &mut Vec<AnomalyFinding>) {
        if self.own.len() < 4 {
            return;
        }

        let nrr: Vec<f64> = self.own[..4]
            .iter()
            .filter_map(|row| row.value(Metric::NrrPercent))
            .collect();
        if nrr.len() < 4 {
            return;
        }

        let strictly_declining = nrr.windows(2).all(|pair| pair[0] < pair[1]);
        if !strictly_declining {
            return;
        }

        let deviation_pct = if nrr[3] == 0.0 {
            0.0
        } else {
            round1((nrr[0] - nrr[3]) / nrr[3] * 100.0)
        };
        anomalies.push(AnomalyFinding {
            metric: Metric::NrrPercent.label().to_string(),
            current: nrr[0],
            trailing_avg: nrr[3],
            deviation_pct,
            threat: ThreatLevel::High,
            description: format!("NRR declining for 4 quarters: {}% -> {}%", nrr[3], nrr[0]),
            quarter: self.own[0].quarter_label(),
            source_bucket: SourceBucket::FilingsPress,
        });
    }

    /// Compare subject YoY product-revenue growth against tracked competitors
    fn detect_competitive_gaps(&self, gaps: &mut Vec<CompetitiveGap>) {
        if self.own.len() < 5 {
            return;
        }

        // Point-to-point growth: current quarter vs exactly 4 periods back
        let (Some(current), Some(year_ago)) = (
            self.own[0].value(Metric::ProductRevenue),
            self.own[4].value(Metric::ProductRevenue),
        ) else {
            return;
        };
        if year_ago == 0.0 {
            return;
        }
        let own_growth = (current - year_ago) / year_ago * 100.0;

        for (competitor, metric_name) in TRACKED_COMPETITORS {
            // Private, sorted copy of this competitor's series
            let mut series: Vec<&PeerMetricRecord> = self
                .peers
                .iter()
                .filter(|r| r.company_id == competitor && r.metric_name == metric_name)
                .collect();
            series.sort_by(|a, b| b.period_end.cmp(&a.period_end));

            // Insufficient history is silently omitted, not an error
            if series.len() < 5 {
                continue;
            }

            let comp_current = series[0].metric_value;
            let comp_year_ago = series[4].metric_value;
            if comp_year_ago == 0.0 {
                continue;
            }
            let comp_growth = (comp_current - comp_year_ago) / comp_year_ago * 100.0;

            let gap = own_growth - comp_growth;
            gaps.push(CompetitiveGap {
                competitor: competitor.to_string(),
                own_growth_pct: round1(own_growth),
                competitor_growth_pct: round1(comp_growth),
                gap_pct: round1(gap),
                advantage: gap > 0.0,
            });
        }
    }

    /// Formatted KPI summary for the latest quarter, if any data is loaded
    pub fn latest_kpis(&self) -> Option<KpiSummary> {
        self.own.first().map(KpiSummary::from_record)
    }
}

fn round1(x: f64) -> f64 {
    (x * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn blank_quarter(idx_back: u32) -> QuarterlyMetricRecord {
        // idx_back 0 = most recent quarter
        let months = idx_back * 3;
        let year = 2025 - (months / 12) as i32;
        let month = 10 - (months % 12);
        QuarterlyMetricRecord {
            period_end: NaiveDate::from_ymd_opt(year, month.max(1), 28).expect("valid date"),
            fiscal_quarter: (4 - idx_back % 4) as u8,
            fiscal_year: 2026 - (idx_back / 4) as u16,
            product_revenue_m: None,
            total_revenue_m: None,
            rpo_m: None,
            nrr_percent: None,
            customers_1m_plus: None,
            fcf_m: None,
            gross_margin_percent: None,
        }
    }

    fn fcf_history(values: &[f64]) -> Vec<QuarterlyMetricRecord> {
        values
            .iter()
            .enumerate()
            .map(|(i, v)| {
                let mut row = blank_quarter(i as u32);
                row.fcf_m = Some(*v);
                row
            })
            .collect()
    }

    fn peer_series(company: &str, metric: &str, values: &[f64]) -> Vec<PeerMetricRecord> {
        values
            .iter()
            .enumerate()
            .map(|(i, v)| PeerMetricRecord {
                company_id: company.to_string(),
                metric_name: metric.to_string(),
                metric_value: *v,
                metric_unit: "M_USD".to_string(),
                fiscal_quarter: 1,
                fiscal_year: 2026,
                period_end: blank_quarter(i as u32).period_end,
            })
            .collect()
    }

    #[test]
    fn test_deviation_at_exactly_minus_20_is_not_flagged() {
        // Trailing average 100, current 80: deviation is exactly -20.00%
        let own = fcf_history(&[80.0, 100.0, 100.0, 100.0, 100.0]);
        let report = SignalEngine::new(&own, &[]).analyze();
        assert!(report.anomalies.is_empty());
    }

    #[test]
    fn test_deviation_just_past_20_is_medium() {
        let own = fcf_history(&[79.99, 100.0, 100.0, 100.0, 100.0]);
        let report = SignalEngine::new(&own, &[]).analyze();
        assert_eq!(report.anomalies.len(), 1);
        let finding = &report.anomalies[0];
        assert_eq!(finding.threat, ThreatLevel::Medium);
        assert_eq!(finding.metric, "Free Cash Flow");
        assert_eq!(finding.source_bucket, SourceBucket::FilingsPress);
    }

    #[test]
    fn test_deviation_just_past_30_is_high() {
        let own = fcf_history(&[69.99, 100.0, 100.0, 100.0, 100.0]);
        let report = SignalEngine::new(&own, &[]).analyze();
        assert_eq!(report.anomalies.len(), 1);
        assert_eq!(report.anomalies[0].threat, ThreatLevel::High);
    }

    #[test]
    fn test_deviation_at_exactly_minus_30_is_medium() {
        let own = fcf_history(&[70.0, 100.0, 100.0, 100.0, 100.0]);
        let report = SignalEngine::new(&own, &[]).analyze();
        assert_eq!(report.anomalies.len(), 1);
        assert_eq!(report.anomalies[0].threat, ThreatLevel::Medium);
    }

    #[test]
    fn test_overperformance_is_never_flagged() {
        let own = fcf_history(&[250.0, 100.0, 100.0, 100.0, 100.0]);
        let report = SignalEngine::new(&own, &[]).analyze();
        assert!(report.anomalies.is_empty());
    }

    #[test]
    fn test_short_history_skips_deviation_pass() {
        let own = fcf_history(&[10.0, 100.0, 100.0, 100.0]);
        let report = SignalEngine::new(&own, &[]).analyze();
        assert!(report.anomalies.is_empty());
    }

    #[test]
    fn test_nrr_strict_decline_fires_high() {
        // Most-recent-first: 100 < 110 < 120 < 130, strictly worse each quarter
        let mut own: Vec<QuarterlyMetricRecord> = (0..4).map(blank_quarter).collect();
        for (row, v) in own.iter_mut().zip([100.0, 110.0, 120.0, 130.0]) {
            row.nrr_percent = Some(v);
        }
        let report = SignalEngine::new(&own, &[]).analyze();
        assert_eq!(report.anomalies.len(), 1);
        let finding = &report.anomalies[0];
        assert_eq!(finding.threat, ThreatLevel::High);
        assert_eq!(finding.metric, "Net Revenue Retention");
        assert!(finding.description.contains("130"));
    }

    #[test]
    fn test_nrr_tie_suppresses_flag() {
        let mut own: Vec<QuarterlyMetricRecord> = (0..4).map(blank_quarter).collect();
        for (row, v) in own.iter_mut().zip([100.0, 110.0, 110.0, 130.0]) {
            row.nrr_percent = Some(v);
        }
        let report = SignalEngine::new(&own, &[]).analyze();
        assert!(report.anomalies.is_empty());
    }

    #[test]
    fn test_nrr_improvement_suppresses_flag() {
        // Improving going backward means the metric got better recently
        let mut own: Vec<QuarterlyMetricRecord> = (0..4).map(blank_quarter).collect();
        for (row, v) in own.iter_mut().zip([130.0, 120.0, 110.0, 100.0]) {
            row.nrr_percent = Some(v);
        }
        let report = SignalEngine::new(&own, &[]).analyze();
        assert!(report.anomalies.is_empty());
    }

    #[test]
    fn test_nrr_missing_value_suppresses_flag() {
        let mut own: Vec<QuarterlyMetricRecord> = (0..4).map(blank_quarter).collect();
        for (row, v) in own.iter_mut().zip([100.0, 110.0, 120.0, 130.0]) {
            row.nrr_percent = Some(v);
        }
        own[2].nrr_percent = None;
        let report = SignalEngine::new(&own, &[]).analyze();
        assert!(report.anomalies.is_empty());
    }

    #[test]
    fn test_competitive_gap_math() {
        // Own product revenue: 120 now vs 100 a year ago = +20%
        let mut own: Vec<QuarterlyMetricRecord> = (0..5).map(blank_quarter).collect();
        let revenue = [120.0, 105.0, 103.0, 101.0, 100.0];
        for (row, v) in own.iter_mut().zip(revenue) {
            row.product_revenue_m = Some(v);
        }

        // GOOGL +10% -> gap 10, advantage; AMZN +25% -> gap -5, behind
        let mut peers = peer_series("GOOGL", "CLOUD_REVENUE", &[110.0, 108.0, 105.0, 102.0, 100.0]);
        peers.extend(peer_series("AMZN", "AWS_REVENUE", &[125.0, 115.0, 110.0, 105.0, 100.0]));

        let report = SignalEngine::new(&own, &peers).analyze();
        assert_eq!(report.gaps.len(), 2);

        let googl = &report.gaps[0];
        assert_eq!(googl.competitor, "GOOGL");
        assert!((googl.own_growth_pct - 20.0).abs() < 1e-9);
        assert!((googl.competitor_growth_pct - 10.0).abs() < 1e-9);
        assert!((googl.gap_pct - 10.0).abs() < 1e-9);
        assert!(googl.advantage);

        let amzn = &report.gaps[1];
        assert!((amzn.gap_pct - (-5.0)).abs() < 1e-9);
        assert!(!amzn.advantage);
    }

    #[test]
    fn test_competitor_with_short_history_is_omitted() {
        let mut own: Vec<QuarterlyMetricRecord> = (0..5).map(blank_quarter).collect();
        for row in &mut own {
            row.product_revenue_m = Some(100.0);
        }
        let peers = peer_series("GOOGL", "CLOUD_REVENUE", &[110.0, 105.0, 100.0]);
        let report = SignalEngine::new(&own, &peers).analyze();
        assert!(report.gaps.is_empty());
    }

    #[test]
    fn test_analyze_is_deterministic() {
        let mut own = fcf_history(&[60.0, 100.0, 110.0, 90.0, 100.0]);
        for (row, v) in own.iter_mut().zip([100.0, 110.0, 120.0, 130.0, 130.0]) {
            row.nrr_percent = Some(v);
            row.product_revenue_m = Some(500.0 + v);
        }
        let peers = peer_series("GOOGL", "CLOUD_REVENUE", &[140.0, 130.0, 120.0, 110.0, 100.0]);

        let engine = SignalEngine::new(&own, &peers);
        let first = engine.analyze();
        let second = engine.analyze();
        assert_eq!(first, second);
        // A fresh engine over the same input also agrees
        assert_eq!(first, SignalEngine::new(&own, &peers).analyze());
    }

    #[test]
    fn test_latest_kpis_empty_history() {
        let engine = SignalEngine::new(&[], &[]);
        assert!(engine.latest_kpis().is_none());
    }
}
