mod common;

use meddevvi_core::models::patient::PatientCase;
use meddevvi_core::models::resource::Resource;
use meddevvi_engine::assess::{assess, RiskLevel, NO_RED_FLAGS, ROUTINE_CARE_STEP};
use meddevvi_engine::features::{extract_features, CaseFeatures};

use common::{normal_case, septic_respiratory_case};

fn assess_case(case: &PatientCase) -> meddevvi_engine::assess::Assessment {
    assess(&extract_features(case))
}

#[test]
fn septic_respiratory_case_is_high_risk() {
    let a = assess_case(&septic_respiratory_case());

    assert_eq!(a.risk_level, RiskLevel::High);
    for r in [
        Resource::Oxygen,
        Resource::ManageAirway,
        Resource::IvFluids,
        Resource::StartIv,
        Resource::ManageShock,
        Resource::MonitorVitals,
        Resource::BloodGlucose,
    ] {
        assert!(a.required_resources.contains(&r), "missing {r}");
    }
    assert!(a.critical_patterns.shock_or_hypoxia);
    assert_eq!(
        a.flags,
        vec![
            "Shock physiology (SBP < 90)",
            "Severe hypoxia (SpO2 < 90)",
            "Possible sepsis pattern (high fever + hypotension)",
            "Marked tachycardia",
            "Tachypnea",
            "Respiratory symptom cluster",
        ]
    );
}

#[test]
fn normal_case_is_low_risk_with_fallbacks() {
    let a = assess_case(&PatientCase {
        symptoms: "mild headache".to_string(),
        ..normal_case()
    });

    assert_eq!(a.risk_level, RiskLevel::Low);
    assert!(a.required_resources.is_empty());
    assert_eq!(a.stabilization_steps, vec![ROUTINE_CARE_STEP]);
    assert_eq!(a.flags, vec![NO_RED_FLAGS]);
}

#[test]
fn required_resources_are_sorted_and_unique() {
    let a = assess_case(&PatientCase {
        symptoms: "vomiting, confusion, chest pain, cough".to_string(),
        pulse: "135".to_string(),
        ..normal_case()
    });

    let ids: Vec<&str> = a.required_resources.iter().map(|r| r.as_str()).collect();
    let mut sorted = ids.clone();
    sorted.sort();
    sorted.dedup();
    assert_eq!(ids, sorted);

    let mut steps = a.stabilization_steps.clone();
    steps.sort();
    steps.dedup();
    assert_eq!(a.stabilization_steps, steps);
}

#[test]
fn moderate_hypoxia_adds_points_not_high_risk() {
    let a = assess_case(&PatientCase {
        oxygen_saturation: "91".to_string(),
        ..normal_case()
    });
    assert_eq!(a.risk_level, RiskLevel::Low);
    assert_eq!(a.required_resources, vec![Resource::MonitorVitals, Resource::Oxygen]);
    assert!(!a.critical_patterns.shock_or_hypoxia);
}

#[test]
fn points_reach_moderate_at_three() {
    // Moderate hypoxia (+2) and tachycardia (+1).
    let a = assess_case(&PatientCase {
        oxygen_saturation: "91".to_string(),
        pulse: "115".to_string(),
        ..normal_case()
    });
    assert_eq!(a.risk_level, RiskLevel::Moderate);
}

#[test]
fn fever_tiers_do_not_stack() {
    let a = assess_case(&PatientCase {
        temperature: "39".to_string(),
        blood_pressure: "85/50".to_string(),
        pulse: "120".to_string(),
        ..normal_case()
    });
    assert!(a.flags.iter().any(|f| f.starts_with("Possible sepsis pattern")));
    assert!(!a.flags.iter().any(|f| f.starts_with("Possible systemic infection")));
}

#[test]
fn fever_with_physiologic_stress_is_systemic_infection() {
    let a = assess_case(&PatientCase {
        temperature: "38.6".to_string(),
        respiratory_rate: "26".to_string(),
        ..normal_case()
    });
    assert!(a.flags.iter().any(|f| f.starts_with("Possible systemic infection")));
    // Systemic infection (+2) and tachypnea (+1).
    assert_eq!(a.risk_level, RiskLevel::Moderate);
    assert!(a.required_resources.contains(&Resource::BloodGlucose));
}

#[test]
fn neurologic_pattern_forces_high_risk() {
    let a = assess_case(&PatientCase {
        symptoms: "new seizure".to_string(),
        ..normal_case()
    });
    assert_eq!(a.risk_level, RiskLevel::High);
    assert!(a.critical_patterns.neurologic_danger);
    assert!(a.required_resources.contains(&Resource::ManageAirway));
}

#[test]
fn chest_pain_requires_ecg() {
    let a = assess_case(&PatientCase {
        symptoms: "chest pain and tightness".to_string(),
        ..normal_case()
    });
    assert!(a.required_resources.contains(&Resource::Ecg));
    assert!(a.critical_patterns.chest_pain_risk);
    // Chest pain (+2) and the respiratory cluster "chest" (+1).
    assert_eq!(a.risk_level, RiskLevel::Moderate);
}

#[test]
fn malaria_pattern_needs_fever() {
    let afebrile = assess_case(&PatientCase {
        symptoms: "chills".to_string(),
        ..normal_case()
    });
    assert!(!afebrile.required_resources.contains(&Resource::MalariaTest));

    let febrile = assess_case(&PatientCase {
        symptoms: "chills".to_string(),
        temperature: "38.5".to_string(),
        ..normal_case()
    });
    assert!(febrile.required_resources.contains(&Resource::MalariaTest));
}

#[test]
fn assessment_is_idempotent() {
    let features = extract_features(&septic_respiratory_case());
    let first = serde_json::to_vec(&assess(&features)).unwrap();
    let second = serde_json::to_vec(&assess(&features)).unwrap();
    assert_eq!(first, second);
}

#[test]
fn adding_a_finding_never_lowers_risk() {
    let setters: [fn(&mut CaseFeatures); 7] = [
        |f| f.hypotension = true,
        |f| f.severe_hypoxia = true,
        |f| f.fever = true,
        |f| f.tachypnea = true,
        |f| f.respiratory = true,
        |f| f.neurologic = true,
        |f| f.chest_pain = true,
    ];

    let mut current = CaseFeatures::default();
    let mut risk = assess(&current).risk_level;
    for set in setters {
        set(&mut current);
        let next = assess(&current).risk_level;
        assert!(next >= risk);
        risk = next;
    }
    assert_eq!(risk, RiskLevel::High);
}

#[test]
fn lowering_systolic_below_ninety_raises_risk() {
    let before = assess_case(&PatientCase {
        blood_pressure: "95/60".to_string(),
        ..normal_case()
    });
    let after = assess_case(&PatientCase {
        blood_pressure: "85/60".to_string(),
        ..normal_case()
    });
    assert!(after.risk_level >= before.risk_level);
    assert_eq!(after.risk_level, RiskLevel::High);
}
