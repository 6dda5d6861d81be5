//! Loop variant that builds an executive defense to one question

use crate::prompts;
use crate::variant::LoopVariant;
use warroom_llm::Message;
use warroom_signals::KpiSummary;
use warroom_tools::GENERATE_DEFENSE;

const MAX_TURNS: usize = 4;
const SYNTHESIS_MAX_TOKENS: usize = 1000;

/// Researches supporting data for one analyst question and synthesizes an
/// executive talking-points brief.
pub struct DefenseVariant {
    company: String,
    question: String,
    kpi_bullets: String,
}

impl DefenseVariant {
    pub fn new(company: impl Into<String>, question: impl Into<String>, kpis: &KpiSummary) -> Self {
        Self {
            company: company.into(),
            question: question.into(),
            kpi_bullets: kpis.to_bullets(),
        }
    }
}

impl LoopVariant for DefenseVariant {
    fn name(&self) -> &'static str {
        "defense"
    }

    fn max_turns(&self) -> usize {
        MAX_TURNS
    }

    fn system_prompt(&self) -> String {
        prompts::defense_system(&self.company, &self.question, &self.kpi_bullets)
    }

    fn opening_message(&self) -> Message {
        Message::user(prompts::defense_opening(&self.question))
    }

    fn sentinel_tool(&self) -> &'static str {
        GENERATE_DEFENSE
    }

    fn payload_field(&self) -> &'static str {
        "talking_points"
    }

    fn synthesis_max_tokens(&self) -> usize {
        SYNTHESIS_MAX_TOKENS
    }

    fn synthesis_prompt(&self, payload: &str, research: &str) -> String {
        prompts::defense_synthesis(
            &self.company,
            &self.question,
            payload,
            research,
            &self.kpi_bullets,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use warroom_core::QuarterlyMetricRecord;

    #[test]
    fn test_variant_wiring() {
        let record = QuarterlyMetricRecord {
            period_end: NaiveDate::from_ymd_opt(2025, 10, 31).expect("valid date"),
            fiscal_quarter: 3,
            fiscal_year: 2026,
            product_revenue_m: Some(1000.0),
            total_revenue_m: Some(1160.0),
            rpo_m: Some(6900.0),
            nrr_percent: Some(125.0),
            customers_1m_plus: Some(688.0),
            fcf_m: Some(110.5),
            gross_margin_percent: Some(76.0),
        };
        let kpis = KpiSummary::from_record(&record);
        let variant = DefenseVariant::new("Snowflake", "Why is FCF down?", &kpis);

        assert_eq!(variant.max_turns(), 4);
        assert_eq!(variant.sentinel_tool(), "generate_defense");
        assert_eq!(variant.payload_field(), "talking_points");
        assert!(variant.system_prompt().contains("Why is FCF down?"));
        assert!(variant.synthesis_prompt("points", "data").contains("points"));
    }
}
