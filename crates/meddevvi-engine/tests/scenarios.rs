//! End-to-end checks through the public `analyze` and `triage` entry points.

mod common;

use meddevvi_core::models::mode::AnalysisMode;
use meddevvi_core::models::patient::PatientCase;
use meddevvi_core::models::resource::Resource;
use meddevvi_engine::assess::RiskLevel;
use meddevvi_engine::capability::FacilityCapabilitySet;
use meddevvi_engine::compose::{Disposition, Report, REFERRAL_NOT_REQUIRED, REASSESS_STEP};
use meddevvi_engine::rank::Diagnosis;
use meddevvi_engine::reconcile::{ReferralVerdict, StabilizationVerdict, TreatabilityFlag};
use meddevvi_engine::{analyze, triage};

use common::{normal_case, septic_respiratory_case};

#[test]
fn septic_case_at_empty_facility_is_referred() {
    let result = triage(&septic_respiratory_case(), &FacilityCapabilitySet::default());

    assert_eq!(result.risk_level, RiskLevel::High);
    assert_eq!(result.stabilization_possible, StabilizationVerdict::No);
    assert_eq!(result.refer_immediately, ReferralVerdict::Yes);
    assert_eq!(result.missing_resources, result.required_resources);
    assert_eq!(result.treatability.flag, TreatabilityFlag::Red);

    let note = &result.management.before_referral[0];
    assert!(note.starts_with("Missing at this facility: "));
    assert!(note.contains("Oxygen"));
    assert!(result.differentials.len() <= 5);
}

#[test]
fn normal_case_stays_at_any_facility() {
    let case = PatientCase {
        symptoms: "mild headache".to_string(),
        ..normal_case()
    };
    let result = triage(&case, &FacilityCapabilitySet::default());

    assert_eq!(result.risk_level, RiskLevel::Low);
    assert!(result.required_resources.is_empty());
    assert_eq!(result.stabilization_possible, StabilizationVerdict::Yes);
    assert_eq!(result.refer_immediately, ReferralVerdict::No);
    assert_eq!(result.treatability.flag, TreatabilityFlag::Green);
    assert_eq!(result.management.before_referral, vec![REFERRAL_NOT_REQUIRED]);
    assert_eq!(
        result.management.if_admitted_here.last().map(String::as_str),
        Some(REASSESS_STEP)
    );
}

#[test]
fn unrecorded_blood_pressure_degrades_gracefully() {
    let case = PatientCase {
        blood_pressure: "not recorded".to_string(),
        ..normal_case()
    };
    let result = triage(&case, &FacilityCapabilitySet::default());
    assert!(!result
        .derived_flags
        .iter()
        .any(|f| f.starts_with("Shock physiology")));
}

#[test]
fn chest_pain_case_needs_ecg_and_ranks_coronary_syndrome() {
    let case = PatientCase {
        symptoms: "chest pain and tightness".to_string(),
        temperature: "37.0".to_string(),
        ..normal_case()
    };
    let result = triage(&case, &FacilityCapabilitySet::default());

    assert!(result.required_resources.contains(&Resource::Ecg));
    let acs = result
        .differentials
        .iter()
        .find(|d| d.diagnosis == Diagnosis::AcuteCoronarySyndrome)
        .unwrap();
    assert!(acs.score >= 4);
}

#[test]
fn partially_equipped_facility_is_partial() {
    let caps: FacilityCapabilitySet = [Resource::Oxygen, Resource::MonitorVitals, Resource::Xray]
        .into_iter()
        .collect();
    let result = triage(&septic_respiratory_case(), &caps);

    assert_eq!(result.stabilization_possible, StabilizationVerdict::Partial);
    assert!(!result.missing_resources.contains(&Resource::Oxygen));
    assert!(result.missing_resources.contains(&Resource::ManageShock));
}

#[test]
fn triage_is_deterministic() {
    let caps: FacilityCapabilitySet = Resource::all().collect();
    let a = serde_json::to_string(&triage(&septic_respiratory_case(), &caps)).unwrap();
    let b = serde_json::to_string(&triage(&septic_respiratory_case(), &caps)).unwrap();
    assert_eq!(a, b);
}

#[test]
fn student_report_summarizes_problem() {
    let case = PatientCase {
        age: 62,
        sex: "male".to_string(),
        chief_complaint: "shortness of breath".to_string(),
        symptom_duration: "3 days".to_string(),
        comorbidities: "COPD".to_string(),
        ..septic_respiratory_case()
    };

    let Report::Student(report) = analyze(&case, AnalysisMode::Student) else {
        panic!("expected a student report");
    };

    assert_eq!(
        report.problem_representation,
        "62 year old male with shortness of breath, symptom duration 3 days, \
         dominant syndrome: acute respiratory syndrome; notable vitals: fever 39.5C, \
         hypotension 80/50, tachycardia 130/min, tachypnea 28/min, hypoxia SpO2 85%; \
         comorbidities: COPD"
    );
    assert_eq!(report.dominant_syndrome, "Acute respiratory syndrome");
    assert_eq!(report.top_differentials.len(), 3);
    assert!(report.red_flags.contains(&"Possible sepsis pattern (fever + hypotension)".to_string()));
    assert_eq!(report.management_principles.len(), 3);
}

#[test]
fn clinician_report_flags_missing_fever_for_infectious_leader() {
    let case = PatientCase {
        symptoms: "productive cough".to_string(),
        ..normal_case()
    };

    let Report::Clinician(report) = analyze(&case, AnalysisMode::Clinician) else {
        panic!("expected a clinician report");
    };

    assert_eq!(report.ranked_diagnoses[0], "Community-acquired pneumonia");
    assert_eq!(
        report.contradictory_findings,
        vec!["No fever documented", "No hypoxia despite respiratory complaints"]
    );
    assert!(report
        .next_tests
        .contains(&"Chest imaging and pulse oximetry trend".to_string()));
    assert_eq!(report.disposition, Disposition::Discharge);
    assert_eq!(report.supporting_findings[0], "");
    assert_eq!(report.supporting_findings[1], "productive cough");
}

#[test]
fn clinician_report_prioritizes_rule_outs() {
    let case = PatientCase {
        symptoms: "vomiting and confusion".to_string(),
        blood_pressure: "80/40".to_string(),
        ..normal_case()
    };

    let Report::Clinician(report) = analyze(&case, AnalysisMode::Clinician) else {
        panic!("expected a clinician report");
    };

    assert_eq!(
        report.rule_outs,
        vec![
            "Severe dehydration with circulatory compromise",
            "Acute stroke/intracranial event",
            "Shock",
            "Severe hypoxia",
            "Acute coronary equivalent",
        ]
    );
    assert_eq!(report.disposition, Disposition::Admit);
}

#[test]
fn peripheral_summary_lists_ranked_conditions() {
    let Report::PeripheralSummary(summary) =
        analyze(&septic_respiratory_case(), AnalysisMode::PeripheralSummary)
    else {
        panic!("expected a peripheral summary");
    };

    assert_eq!(summary.risk_level, RiskLevel::High);
    assert_eq!(summary.possible_conditions[0], "Sepsis");
}

#[test]
fn report_serializes_with_mode_tag() {
    let report = analyze(&normal_case(), AnalysisMode::Clinician);
    let json = serde_json::to_value(&report).unwrap();
    assert_eq!(json["mode"], "clinician");
    assert_eq!(json["disposition"], "Discharge");
}

#[test]
fn fever_without_shock_or_hypoxia_is_observed() {
    let case = PatientCase {
        temperature: "38.5".to_string(),
        ..normal_case()
    };

    let Report::Clinician(report) = analyze(&case, AnalysisMode::Clinician) else {
        panic!("expected a clinician report");
    };

    assert_eq!(report.disposition, Disposition::Observe);
    assert!(report.supporting_findings.contains(&"Documented fever".to_string()));
}

#[test]
fn fully_equipped_facility_still_refers_high_risk_chest_pain() {
    let case = PatientCase {
        symptoms: "chest pain".to_string(),
        blood_pressure: "80/50".to_string(),
        ..normal_case()
    };
    let everything: FacilityCapabilitySet = Resource::all().collect();

    let result = triage(&case, &everything);

    assert_eq!(result.risk_level, RiskLevel::High);
    assert!(result.missing_resources.is_empty());
    assert_eq!(result.stabilization_possible, StabilizationVerdict::Yes);
    assert_eq!(result.refer_immediately, ReferralVerdict::Yes);
    assert_eq!(result.treatability.flag, TreatabilityFlag::Red);

    let steps = vec![
        "Establish IV access and start fluid resuscitation",
        "Obtain ECG urgently and monitor for deterioration",
        "Position upright and give bronchodilator if wheeze is present",
    ];
    assert_eq!(result.steps_before_referral, steps);
    assert_eq!(result.management.before_referral, steps);
    assert!(!result
        .management
        .before_referral
        .iter()
        .any(|s| s.starts_with("Missing at this facility") || s == REFERRAL_NOT_REQUIRED));
    assert_eq!(result.management.if_admitted_here.last().unwrap(), REASSESS_STEP);
}

#[test]
fn problem_representation_rounds_vitals_to_six_significant_digits() {
    let case = PatientCase {
        temperature: "38.123456789".to_string(),
        oxygen_saturation: "88.50".to_string(),
        ..normal_case()
    };

    let Report::Student(report) = analyze(&case, AnalysisMode::Student) else {
        panic!("expected a student report");
    };

    assert!(report.problem_representation.contains("fever 38.1235C"));
    assert!(report.problem_representation.contains("hypoxia SpO2 88.5%"));
}
