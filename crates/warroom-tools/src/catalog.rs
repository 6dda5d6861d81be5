//! Pre-wired tool registries for each agent phase

use crate::anomalies::AnomalyCheckTool;
use crate::compare::CompetitorCompareTool;
use crate::filings::SecFilingsTool;
use crate::metrics::CompanyMetricsTool;
use crate::news::CompetitorNewsTool;
use crate::press::PressReleasesTool;
use crate::ratings::AnalystRatingsTool;
use crate::registry::ToolRegistry;
use crate::sentinel::{GenerateDefenseTool, GenerateQuestionsTool};
use crate::transcripts::TranscriptSearchTool;
use std::sync::Arc;
use warroom_core::DataBundle;

/// Full research surface for anticipating analyst questions.
pub fn research_catalog(bundle: Arc<DataBundle>) -> ToolRegistry {
    let mut registry = ToolRegistry::default();
    registry.register(Arc::new(CompanyMetricsTool::new(Arc::clone(&bundle))));
    registry.register(Arc::new(TranscriptSearchTool::new(Arc::clone(&bundle))));
    registry.register(Arc::new(AnalystRatingsTool::new(Arc::clone(&bundle))));
    registry.register(Arc::new(CompetitorNewsTool::new(Arc::clone(&bundle))));
    registry.register(Arc::new(AnomalyCheckTool::new(Arc::clone(&bundle))));
    registry.register(Arc::new(SecFilingsTool::new(Arc::clone(&bundle))));
    registry.register(Arc::new(PressReleasesTool::new(Arc::clone(&bundle))));
    registry.register(Arc::new(CompetitorCompareTool::new(bundle)));
    registry.register(Arc::new(GenerateQuestionsTool));
    registry
}

/// Narrower surface for building a defense to one specific question.
pub fn defense_catalog(bundle: Arc<DataBundle>) -> ToolRegistry {
    let mut registry = ToolRegistry::default();
    registry.register(Arc::new(CompanyMetricsTool::new(Arc::clone(&bundle))));
    registry.register(Arc::new(TranscriptSearchTool::new(Arc::clone(&bundle))));
    registry.register(Arc::new(PressReleasesTool::new(Arc::clone(&bundle))));
    registry.register(Arc::new(AnomalyCheckTool::new(Arc::clone(&bundle))));
    registry.register(Arc::new(CompetitorCompareTool::new(bundle)));
    registry.register(Arc::new(GenerateDefenseTool));
    registry
}
