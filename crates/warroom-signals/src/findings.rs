//! Finding types produced by the signal engine

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Severity attached to a flagged metric or generated question
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ThreatLevel {
    High,
    Medium,
    /// Only produced by the question parser; the engine never emits Low
    Low,
}

impl fmt::Display for ThreatLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::High => "HIGH",
            Self::Medium => "MEDIUM",
            Self::Low => "LOW",
        };
        write!(f, "{s}")
    }
}

impl FromStr for ThreatLevel {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "HIGH" => Ok(Self::High),
            "MEDIUM" => Ok(Self::Medium),
            "LOW" => Ok(Self::Low),
            _ => Err(()),
        }
    }
}

/// Taxonomy of where a cited data point originated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SourceBucket {
    FilingsPress,
    Transcripts,
    AnalystResearch,
}

impl SourceBucket {
    /// Numeric code used in the synthesis wire format
    pub fn code(self) -> u8 {
        match self {
            Self::FilingsPress => 1,
            Self::Transcripts => 2,
            Self::AnalystResearch => 3,
        }
    }

    /// Human label shown to the communications team
    pub fn label(self) -> &'static str {
        match self {
            Self::FilingsPress => "Filings/Press",
            Self::Transcripts => "Transcripts",
            Self::AnalystResearch => "Analyst Research",
        }
    }

    /// Translate a wire-format code to its label; unrecognized codes pass
    /// through verbatim
    pub fn label_for_code(code: &str) -> String {
        match code.trim() {
            "1" => Self::FilingsPress.label().to_string(),
            "2" => Self::Transcripts.label().to_string(),
            "3" => Self::AnalystResearch.label().to_string(),
            other => other.to_string(),
        }
    }
}

/// One metric flagged as a statistically notable decline
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnomalyFinding {
    /// Metric label, e.g. "Free Cash Flow"
    pub metric: String,
    /// Current-quarter value
    pub current: f64,
    /// Mean over the four quarters preceding the current one
    pub trailing_avg: f64,
    /// Deviation from the trailing average, percent (negative = decline)
    pub deviation_pct: f64,
    pub threat: ThreatLevel,
    /// Human description of the decline
    pub description: String,
    /// Quarter the finding applies to, e.g. "Q3 FY2026"
    pub quarter: String,
    pub source_bucket: SourceBucket,
}

/// Year-over-year growth comparison against one tracked competitor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompetitiveGap {
    /// Competitor identifier, e.g. "GOOGL"
    pub competitor: String,
    /// Subject-company YoY growth, percent
    pub own_growth_pct: f64,
    /// Competitor YoY growth, percent
    pub competitor_growth_pct: f64,
    /// own - competitor, percentage points
    pub gap_pct: f64,
    /// True when the subject company is growing faster
    pub advantage: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_threat_level_round_trip() {
        assert_eq!("HIGH".parse::<ThreatLevel>(), Ok(ThreatLevel::High));
        assert_eq!("medium".parse::<ThreatLevel>(), Ok(ThreatLevel::Medium));
        assert!("SEVERE".parse::<ThreatLevel>().is_err());
        assert_eq!(ThreatLevel::High.to_string(), "HIGH");
    }

    #[test]
    fn test_bucket_codes_and_labels() {
        assert_eq!(SourceBucket::FilingsPress.code(), 1);
        assert_eq!(SourceBucket::label_for_code("1"), "Filings/Press");
        assert_eq!(SourceBucket::label_for_code("2"), "Transcripts");
        assert_eq!(SourceBucket::label_for_code("3"), "Analyst Research");
        // Unrecognized codes pass through verbatim
        assert_eq!(SourceBucket::label_for_code("7"), "7");
    }
}
