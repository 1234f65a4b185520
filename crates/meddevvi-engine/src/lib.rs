//! meddevvi-engine
//!
//! The resource-aware triage and differential-ranking engine. Pure,
//! deterministic functions of a patient case and a facility capability set:
//! no I/O, no shared state, nothing that can fail.
//!
//! Pipeline: [`features`] → {[`assess`], [`rank`]} → [`reconcile`]
//! (peripheral only) → [`compose`].

pub mod assess;
pub mod capability;
pub mod compose;
pub mod features;
pub mod keywords;
pub mod rank;
pub mod reconcile;

use meddevvi_core::models::mode::AnalysisMode;
use meddevvi_core::models::patient::PatientCase;

use capability::FacilityCapabilitySet;
use compose::{Report, TriageResult};

/// Produce the mode-specific clinical analysis for a case.
pub fn analyze(case: &PatientCase, mode: AnalysisMode) -> Report {
    let features = features::extract_features(case);
    let assessment = assess::assess(&features);
    let differentials = rank::rank(&features, assessment.risk_level);

    match mode {
        AnalysisMode::Student => {
            Report::Student(compose::student_report(case, &features, &differentials))
        }
        AnalysisMode::Clinician => {
            Report::Clinician(compose::clinician_report(case, &features, &differentials))
        }
        AnalysisMode::PeripheralSummary => Report::PeripheralSummary(
            compose::peripheral_summary(&assessment, &differentials),
        ),
    }
}

/// Run resource-aware triage of a case against a facility's capabilities.
pub fn triage(case: &PatientCase, capabilities: &FacilityCapabilitySet) -> TriageResult {
    let features = features::extract_features(case);
    let assessment = assess::assess(&features);
    let differentials = rank::rank(&features, assessment.risk_level);
    let reconciliation = reconcile::reconcile(&assessment, capabilities);

    compose::triage_result(assessment, differentials, reconciliation)
}
