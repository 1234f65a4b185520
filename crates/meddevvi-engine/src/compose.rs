//! Report composition: shapes engine output for the student, clinician, and
//! peripheral views.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use meddevvi_core::models::patient::PatientCase;
use meddevvi_core::models::resource::Resource;

use crate::assess::{Assessment, RiskLevel};
use crate::features::CaseFeatures;
use crate::rank::RankedDifferential;
use crate::reconcile::{
    Reconciliation, ReferralVerdict, StabilizationVerdict, Treatability,
};

const STUDENT_DIFFERENTIALS: usize = 3;
const SUPPORTING_SYMPTOMS_CHARS: usize = 180;
const SIGNIFICANT_DIGITS: i32 = 6;

pub const MANAGEMENT_PRINCIPLES: [&str; 3] = [
    "Stabilize airway, breathing, circulation first.",
    "Prioritize urgent life-threatening causes.",
    "Use focused labs/imaging based on the leading syndrome.",
];

pub const CRITICAL_MISSING_INFORMATION: [&str; 3] = [
    "Mental status and urine output",
    "Medication and allergy history",
    "Focused exam findings",
];

pub const PERIPHERAL_SUMMARY: &str = "Peripheral mode clinical assessment generated.";

pub const REASSESS_STEP: &str = "Reassess vitals and response to treatment at regular intervals";

pub const REFERRAL_NOT_REQUIRED: &str =
    "Referral not required at this time; continue care at this facility";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum Disposition {
    Admit,
    Observe,
    Discharge,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct StudentReport {
    pub problem_representation: String,
    pub dominant_syndrome: String,
    pub top_differentials: Vec<RankedDifferential>,
    pub red_flags: Vec<String>,
    pub management_principles: Vec<String>,
    pub critical_missing_information: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ClinicianReport {
    pub ranked_diagnoses: Vec<String>,
    pub supporting_findings: Vec<String>,
    pub contradictory_findings: Vec<String>,
    pub rule_outs: Vec<String>,
    pub next_tests: Vec<String>,
    pub disposition: Disposition,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct PeripheralSummary {
    pub summary: String,
    pub risk_level: RiskLevel,
    pub possible_conditions: Vec<String>,
}

/// Output of [`crate::analyze`], tagged by mode.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum Report {
    Student(StudentReport),
    Clinician(ClinicianReport),
    PeripheralSummary(PeripheralSummary),
}

/// Management split by where the patient will be cared for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ManagementPaths {
    pub if_admitted_here: Vec<String>,
    pub before_referral: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct TriageResult {
    pub risk_level: RiskLevel,
    pub stabilization_possible: StabilizationVerdict,
    pub required_resources: Vec<Resource>,
    pub missing_resources: Vec<Resource>,
    pub differentials: Vec<RankedDifferential>,
    pub treatability: Treatability,
    pub refer_immediately: ReferralVerdict,
    pub steps_before_referral: Vec<String>,
    pub derived_flags: Vec<String>,
    pub management: ManagementPaths,
}

/// Leading syndrome, by first matching pattern.
pub fn dominant_syndrome(features: &CaseFeatures) -> &'static str {
    if features.respiratory {
        "Acute respiratory syndrome"
    } else if features.gastrointestinal {
        "Acute gastrointestinal syndrome"
    } else if features.neurologic {
        "Acute neurologic syndrome"
    } else if features.fever {
        "Acute febrile illness syndrome"
    } else {
        "Undifferentiated acute illness syndrome"
    }
}

pub fn red_flags(features: &CaseFeatures) -> Vec<String> {
    let mut flags = Vec::new();
    if features.hypotension {
        flags.push("Hypotension/shock physiology");
    }
    if features.any_hypoxia() {
        flags.push("Hypoxia");
    }
    if features.tachypnea {
        flags.push("Tachypnea/possible respiratory distress");
    }
    if features.any_tachycardia() {
        flags.push("Marked tachycardia");
    }
    if features.fever && features.hypotension {
        flags.push("Possible sepsis pattern (fever + hypotension)");
    }
    if flags.is_empty() {
        flags.push("No immediate physiologic red flags from provided vitals");
    }
    flags.into_iter().map(String::from).collect()
}

/// Six significant digits with trailing zeros trimmed, so "38.123456789"
/// reads as 38.1235. Magnitudes of a million or more print in full.
fn significant(value: f64) -> String {
    if value == 0.0 || !value.is_finite() {
        return value.to_string();
    }
    let exponent = value.abs().log10().floor() as i32;
    let decimals = (SIGNIFICANT_DIGITS - 1 - exponent).max(0) as usize;
    let fixed = format!("{value:.decimals$}");
    if fixed.contains('.') {
        fixed.trim_end_matches('0').trim_end_matches('.').to_string()
    } else {
        fixed
    }
}

pub fn problem_representation(case: &PatientCase, features: &CaseFeatures) -> String {
    let mut vitals = Vec::new();
    if let Some(temp) = features.temperature.filter(|_| features.fever) {
        vitals.push(format!("fever {}C", significant(temp)));
    }
    if let Some(sbp) = features.systolic.filter(|_| features.hypotension) {
        let dbp = features
            .diastolic
            .map(|d| d.to_string())
            .unwrap_or_else(|| "?".to_string());
        vitals.push(format!("hypotension {sbp}/{dbp}"));
    }
    if let Some(pulse) = features.pulse.filter(|_| features.any_tachycardia()) {
        vitals.push(format!("tachycardia {}/min", significant(pulse)));
    }
    if let Some(rr) = features.respiratory_rate.filter(|_| features.tachypnea) {
        vitals.push(format!("tachypnea {}/min", significant(rr)));
    }
    if let Some(spo2) = features.oxygen_saturation.filter(|_| features.any_hypoxia()) {
        vitals.push(format!("hypoxia SpO2 {}%", significant(spo2)));
    }

    let mut out = format!(
        "{} year old {} with {}, symptom duration {}, dominant syndrome: {}",
        case.age,
        case.sex,
        case.chief_complaint,
        case.symptom_duration,
        dominant_syndrome(features).to_lowercase(),
    );
    if !vitals.is_empty() {
        out.push_str(&format!("; notable vitals: {}", vitals.join(", ")));
    }
    let comorbidities = case.comorbidities.trim();
    if !comorbidities.is_empty() {
        out.push_str(&format!("; comorbidities: {comorbidities}"));
    }
    out
}

pub fn student_report(
    case: &PatientCase,
    features: &CaseFeatures,
    differentials: &[RankedDifferential],
) -> StudentReport {
    StudentReport {
        problem_representation: problem_representation(case, features),
        dominant_syndrome: dominant_syndrome(features).to_string(),
        top_differentials: differentials
            .iter()
            .take(STUDENT_DIFFERENTIALS)
            .cloned()
            .collect(),
        red_flags: red_flags(features),
        management_principles: MANAGEMENT_PRINCIPLES.map(String::from).to_vec(),
        critical_missing_information: CRITICAL_MISSING_INFORMATION.map(String::from).to_vec(),
    }
}

pub fn disposition(features: &CaseFeatures) -> Disposition {
    if features.hypotension || features.any_hypoxia() {
        Disposition::Admit
    } else if features.fever || features.any_tachycardia() || features.tachypnea {
        Disposition::Observe
    } else {
        Disposition::Discharge
    }
}

pub fn clinician_report(
    case: &PatientCase,
    features: &CaseFeatures,
    differentials: &[RankedDifferential],
) -> ClinicianReport {
    let symptoms: String = case.symptoms.chars().take(SUPPORTING_SYMPTOMS_CHARS).collect();
    let mut supporting = vec![
        case.chief_complaint.clone(),
        if symptoms.is_empty() {
            "Symptom cluster provided".to_string()
        } else {
            symptoms
        },
    ];
    if features.fever {
        supporting.push("Documented fever".to_string());
    }
    if features.any_hypoxia() {
        supporting.push("Low oxygen saturation".to_string());
    }
    if features.any_tachycardia() {
        supporting.push("Tachycardia".to_string());
    }

    let mut contradictory = Vec::new();
    if !features.fever && differentials.first().is_some_and(|d| d.diagnosis.is_infectious()) {
        contradictory.push("No fever documented".to_string());
    }
    if !features.any_hypoxia() && features.respiratory {
        contradictory.push("No hypoxia despite respiratory complaints".to_string());
    }
    if contradictory.is_empty() {
        contradictory.push("No strong contradictory features in provided dataset".to_string());
    }

    let mut rule_outs: Vec<String> = ["Shock", "Severe hypoxia", "Acute coronary equivalent"]
        .map(String::from)
        .to_vec();
    if features.neurologic {
        rule_outs.insert(0, "Acute stroke/intracranial event".to_string());
    }
    if features.gastrointestinal && features.hypotension {
        rule_outs.insert(0, "Severe dehydration with circulatory compromise".to_string());
    }

    let mut next_tests = vec![
        "Point-of-care glucose".to_string(),
        "CBC and basic metabolic panel".to_string(),
    ];
    if features.respiratory {
        next_tests.push("Chest imaging and pulse oximetry trend".to_string());
    }
    if features.neurologic {
        next_tests.push("Urgent neuro exam and neuroimaging if deficits present".to_string());
    }
    if features.urinary {
        next_tests.push("Urinalysis and renal function".to_string());
    }

    ClinicianReport {
        ranked_diagnoses: differentials.iter().map(|d| d.label.clone()).collect(),
        supporting_findings: supporting,
        contradictory_findings: contradictory,
        rule_outs,
        next_tests,
        disposition: disposition(features),
    }
}

pub fn peripheral_summary(
    assessment: &Assessment,
    differentials: &[RankedDifferential],
) -> PeripheralSummary {
    PeripheralSummary {
        summary: PERIPHERAL_SUMMARY.to_string(),
        risk_level: assessment.risk_level,
        possible_conditions: differentials.iter().map(|d| d.label.clone()).collect(),
    }
}

fn management_paths(assessment: &Assessment, reconciliation: &Reconciliation) -> ManagementPaths {
    let mut if_admitted_here = assessment.stabilization_steps.clone();
    if_admitted_here.push(REASSESS_STEP.to_string());

    let fully_stable = reconciliation.stabilization_possible == StabilizationVerdict::Yes
        && reconciliation.refer_immediately == ReferralVerdict::No;

    let before_referral = if fully_stable {
        vec![REFERRAL_NOT_REQUIRED.to_string()]
    } else {
        let mut steps = Vec::new();
        if !reconciliation.missing_resources.is_empty() {
            let missing: Vec<&str> = reconciliation
                .missing_resources
                .iter()
                .map(|r| r.label())
                .collect();
            steps.push(format!("Missing at this facility: {}", missing.join(", ")));
        }
        steps.extend(reconciliation.steps_before_referral.iter().cloned());
        steps
    };

    ManagementPaths {
        if_admitted_here,
        before_referral,
    }
}

pub fn triage_result(
    assessment: Assessment,
    differentials: Vec<RankedDifferential>,
    reconciliation: Reconciliation,
) -> TriageResult {
    let management = management_paths(&assessment, &reconciliation);

    TriageResult {
        risk_level: assessment.risk_level,
        stabilization_possible: reconciliation.stabilization_possible,
        required_resources: assessment.required_resources,
        missing_resources: reconciliation.missing_resources,
        differentials,
        treatability: reconciliation.treatability,
        refer_immediately: reconciliation.refer_immediately,
        steps_before_referral: reconciliation.steps_before_referral,
        derived_flags: assessment.flags,
        management,
    }
}
