//! Parser for the structured question format the synthesis prompt requests
//!
//! The model is asked to emit blocks shaped as:
//!
//! ```text
//! QUESTION: <question text> (Source)
//! SOURCE_BUCKET: <1|2|3>
//! THREAT_LEVEL: <HIGH|MEDIUM|LOW>
//! DATA_POINT: <the data point cited>
//! ```
//!
//! Parsing is tolerant: unmatched lines are ignored, repeated fields keep the
//! last value, and a block without question text is dropped.

use regex::Regex;
use std::sync::LazyLock;
use warroom_signals::{SourceBucket, ThreatLevel};

static BLOCK_SPLIT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new("QUESTION:").expect("valid literal pattern"));

/// One parsed analyst question with its annotations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionRecord {
    /// The question text, including any inline source citation
    pub question: String,

    /// Parsed threat level; defaults to Medium when missing or unrecognized
    pub threat: ThreatLevel,

    /// Source bucket label ("Filings/Press", ...); unknown codes pass through
    pub source: Option<String>,

    /// The data point the question is built on
    pub data_point: Option<String>,
}

/// Parse a synthesis response into question records, preserving model order.
pub fn parse_questions(response: &str) -> Vec<QuestionRecord> {
    let mut records = Vec::new();

    for block in BLOCK_SPLIT.split(response).skip(1) {
        let mut lines = block.trim().lines();
        let question = lines.next().unwrap_or("").trim().to_string();
        if question.is_empty() {
            tracing::debug!("dropping question block with no question text");
            continue;
        }

        let mut threat = ThreatLevel::Medium;
        let mut source = None;
        let mut data_point = None;

        for line in lines {
            if line.contains("THREAT_LEVEL:") {
                if let Some(value) = field_value(line) {
                    threat = value.parse().unwrap_or(ThreatLevel::Medium);
                }
            }
            if line.contains("SOURCE_BUCKET:") {
                if let Some(code) = field_value(line) {
                    source = Some(SourceBucket::label_for_code(&code));
                }
            }
            if line.contains("DATA_POINT:") {
                if let Some((_, rest)) = line.split_once(':') {
                    data_point = Some(rest.trim().to_string());
                }
            }
        }

        records.push(QuestionRecord {
            question,
            threat,
            source,
            data_point,
        });
    }

    records
}

/// The segment between the first and second colon, trimmed.
///
/// `"THREAT_LEVEL: HIGH"` yields `"HIGH"`; a decorated line like
/// `"**THREAT_LEVEL:** HIGH"` yields garbage that fails downstream parsing,
/// which falls back to the defaults.
fn field_value(line: &str) -> Option<String> {
    line.split(':').nth(1).map(|s| s.trim().to_string())
}
