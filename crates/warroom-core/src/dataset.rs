//! In-memory dataset bundle for the earnings war room
//!
//! The bundle is supplied fully loaded by the ingestion layer and is treated
//! as read-only shared state from then on. Anything that needs rows in a
//! particular order works on a private copy; the bundle itself is never
//! reordered or mutated.

use crate::error::{Error, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Subject-company metrics monitored by the signal engine and query tools
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Metric {
    /// Product revenue, in millions
    ProductRevenue,
    /// Total revenue, in millions
    TotalRevenue,
    /// Remaining performance obligation, in millions
    Rpo,
    /// Net revenue retention, percent
    NrrPercent,
    /// Customers with >$1M trailing twelve-month revenue
    CustomersOverOneMillion,
    /// Free cash flow, in millions
    FreeCashFlow,
    /// Gross margin, percent
    GrossMarginPercent,
}

impl Metric {
    /// Human-readable label used in findings and tool digests
    pub fn label(self) -> &'static str {
        match self {
            Self::ProductRevenue => "Product Revenue",
            Self::TotalRevenue => "Total Revenue",
            Self::Rpo => "RPO",
            Self::NrrPercent => "Net Revenue Retention",
            Self::CustomersOverOneMillion => "$1M+ Customers",
            Self::FreeCashFlow => "Free Cash Flow",
            Self::GrossMarginPercent => "Gross Margin",
        }
    }
}

/// One fiscal quarter of subject-company metrics
///
/// Metric values are optional: a missing value degrades the affected analysis
/// rather than failing it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuarterlyMetricRecord {
    /// Last day of the fiscal quarter
    pub period_end: NaiveDate,
    /// Fiscal quarter (1-4)
    pub fiscal_quarter: u8,
    /// Fiscal year
    pub fiscal_year: u16,
    #[serde(default)]
    pub product_revenue_m: Option<f64>,
    #[serde(default)]
    pub total_revenue_m: Option<f64>,
    #[serde(default)]
    pub rpo_m: Option<f64>,
    #[serde(default)]
    pub nrr_percent: Option<f64>,
    #[serde(default)]
    pub customers_1m_plus: Option<f64>,
    #[serde(default)]
    pub fcf_m: Option<f64>,
    #[serde(default)]
    pub gross_margin_percent: Option<f64>,
}

impl QuarterlyMetricRecord {
    /// Look up a monitored metric by name
    pub fn value(&self, metric: Metric) -> Option<f64> {
        match metric {
            Metric::ProductRevenue => self.product_revenue_m,
            Metric::TotalRevenue => self.total_revenue_m,
            Metric::Rpo => self.rpo_m,
            Metric::NrrPercent => self.nrr_percent,
            Metric::CustomersOverOneMillion => self.customers_1m_plus,
            Metric::FreeCashFlow => self.fcf_m,
            Metric::GrossMarginPercent => self.gross_margin_percent,
        }
    }

    /// Fiscal quarter label, e.g. "Q3 FY2026"
    pub fn quarter_label(&self) -> String {
        format!("Q{} FY{}", self.fiscal_quarter, self.fiscal_year)
    }
}

/// One (company, metric, period) observation for a competitor
///
/// Peer data uses a long/narrow layout: metric name and value are fields,
/// not one column per metric.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PeerMetricRecord {
    pub company_id: String,
    pub metric_name: String,
    pub metric_value: f64,
    #[serde(default)]
    pub metric_unit: String,
    pub fiscal_quarter: u8,
    pub fiscal_year: u16,
    pub period_end: NaiveDate,
}

/// Earnings-call transcript synopsis
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranscriptRecord {
    pub ticker: String,
    pub event_type: String,
    pub event_date: NaiveDate,
    #[serde(default)]
    pub synopsis: String,
}

/// Sell-side analyst rating and research note
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RatingRecord {
    pub ticker: String,
    pub analyst_firm: String,
    pub rating: String,
    #[serde(default)]
    pub price_target: Option<f64>,
    #[serde(default)]
    pub notes: String,
    pub rating_date: NaiveDate,
}

/// Competitor news snippet
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewsRecord {
    pub ticker: String,
    pub headline: String,
    #[serde(default)]
    pub summary: String,
    pub news_date: NaiveDate,
}

/// Regulatory filing entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FilingRecord {
    pub filing_type: String,
    pub filing_date: NaiveDate,
}

/// Subject-company press release
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PressReleaseRecord {
    pub title: String,
    pub release_date: NaiveDate,
    #[serde(default)]
    pub synopsis: String,
}

fn default_subject_ticker() -> String {
    "SNOW".to_string()
}

/// The full in-memory dataset the agent researches
///
/// Every table defaults to empty so a bundle with missing tables still loads;
/// tools over an empty table answer with a "no data" string instead of failing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataBundle {
    /// Ticker of the company being defended
    #[serde(default = "default_subject_ticker")]
    pub subject_ticker: String,
    #[serde(default)]
    pub metrics: Vec<QuarterlyMetricRecord>,
    #[serde(default)]
    pub peer_financials: Vec<PeerMetricRecord>,
    #[serde(default)]
    pub transcripts: Vec<TranscriptRecord>,
    #[serde(default)]
    pub analyst_ratings: Vec<RatingRecord>,
    #[serde(default)]
    pub news: Vec<NewsRecord>,
    #[serde(default)]
    pub sec_filings: Vec<FilingRecord>,
    #[serde(default)]
    pub press_releases: Vec<PressReleaseRecord>,
}

impl DataBundle {
    /// Decode a bundle from its JSON representation
    pub fn from_json_str(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| Error::Dataset(e.to_string()))
    }

    /// Subject-company quarters, most recent first, on a private copy
    pub fn metrics_latest_first(&self) -> Vec<QuarterlyMetricRecord> {
        let mut rows = self.metrics.clone();
        rows.sort_by(|a, b| b.period_end.cmp(&a.period_end));
        rows
    }

    /// Transcripts, most recent first, on a private copy
    pub fn transcripts_latest_first(&self) -> Vec<TranscriptRecord> {
        let mut rows = self.transcripts.clone();
        rows.sort_by(|a, b| b.event_date.cmp(&a.event_date));
        rows
    }

    /// Analyst ratings, most recent first, on a private copy
    pub fn ratings_latest_first(&self) -> Vec<RatingRecord> {
        let mut rows = self.analyst_ratings.clone();
        rows.sort_by(|a, b| b.rating_date.cmp(&a.rating_date));
        rows
    }

    /// News snippets, most recent first, on a private copy
    pub fn news_latest_first(&self) -> Vec<NewsRecord> {
        let mut rows = self.news.clone();
        rows.sort_by(|a, b| b.news_date.cmp(&a.news_date));
        rows
    }

    /// Filings, most recent first, on a private copy
    pub fn filings_latest_first(&self) -> Vec<FilingRecord> {
        let mut rows = self.sec_filings.clone();
        rows.sort_by(|a, b| b.filing_date.cmp(&a.filing_date));
        rows
    }

    /// Press releases, most recent first, on a private copy
    pub fn press_releases_latest_first(&self) -> Vec<PressReleaseRecord> {
        let mut rows = self.press_releases.clone();
        rows.sort_by(|a, b| b.release_date.cmp(&a.release_date));
        rows
    }

    /// Distinct competitor identifiers present in the peer table
    pub fn peer_company_ids(&self) -> Vec<String> {
        let mut ids: Vec<String> = self
            .peer_financials
            .iter()
            .map(|r| r.company_id.clone())
            .collect();
        ids.sort();
        ids.dedup();
        ids
    }
}
