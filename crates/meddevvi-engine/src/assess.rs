//! Risk and resource assessment.
//!
//! Each rule contributes a flag, a set of required resources, one
//! stabilization step, and either a forced High risk or risk points. Rules in
//! the same severity tier are mutually exclusive (hypoxia, fever, and
//! tachycardia tiers); symptom clusters add independently.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use meddevvi_core::models::resource::Resource;

use crate::features::CaseFeatures;

/// Points at or above which a case without a forcing rule becomes Moderate.
pub const MODERATE_RISK_POINTS: u32 = 3;

pub const ROUTINE_CARE_STEP: &str = "Continue routine monitoring and symptomatic care";

pub const NO_RED_FLAGS: &str = "No immediate physiologic red flags from provided vitals";

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum RiskLevel {
    Low,
    Moderate,
    High,
}

impl RiskLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLevel::Low => "Low",
            RiskLevel::Moderate => "Moderate",
            RiskLevel::High => "High",
        }
    }
}

/// Patterns that drive referral beyond the resource gap.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CriticalPatterns {
    pub shock_or_hypoxia: bool,
    pub neurologic_danger: bool,
    pub chest_pain_risk: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Assessment {
    pub risk_level: RiskLevel,
    /// In rule order.
    pub flags: Vec<String>,
    /// Sorted, deduplicated.
    pub required_resources: Vec<Resource>,
    /// Sorted, deduplicated.
    pub stabilization_steps: Vec<String>,
    pub critical_patterns: CriticalPatterns,
}

#[derive(Debug, Clone, Copy)]
enum RiskEffect {
    ForceHigh,
    Points(u32),
}

struct Rule {
    flag: &'static str,
    resources: &'static [Resource],
    step: &'static str,
    effect: RiskEffect,
}

use Resource::*;

const SHOCK: Rule = Rule {
    flag: "Shock physiology (SBP < 90)",
    resources: &[IvFluids, StartIv, ManageShock, MonitorVitals],
    step: "Establish IV access and start fluid resuscitation",
    effect: RiskEffect::ForceHigh,
};

const SEVERE_HYPOXIA: Rule = Rule {
    flag: "Severe hypoxia (SpO2 < 90)",
    resources: &[Oxygen, ManageAirway, MonitorVitals],
    step: "Administer supplemental oxygen and monitor saturation",
    effect: RiskEffect::ForceHigh,
};

const MODERATE_HYPOXIA: Rule = Rule {
    flag: "Possible hypoxic respiratory compromise (SpO2 < 92)",
    resources: &[Oxygen, MonitorVitals],
    step: "Start oxygen if available and reassess saturation trend",
    effect: RiskEffect::Points(2),
};

const SEPSIS: Rule = Rule {
    flag: "Possible sepsis pattern (high fever + hypotension)",
    resources: &[IvFluids, StartIv, ManageShock, BloodGlucose],
    step: "Begin sepsis stabilization bundle per local protocol",
    effect: RiskEffect::ForceHigh,
};

const SYSTEMIC_INFECTION: Rule = Rule {
    flag: "Possible systemic infection pattern (fever + physiologic stress)",
    resources: &[MonitorVitals, BloodGlucose],
    step: "Reassess perfusion, hydration, and progression every 15-30 minutes",
    effect: RiskEffect::Points(2),
};

const MARKED_TACHYCARDIA: Rule = Rule {
    flag: "Marked tachycardia",
    resources: &[MonitorVitals, BloodGlucose],
    step: "Continuous monitoring and focused reassessment",
    effect: RiskEffect::Points(2),
};

const TACHYCARDIA: Rule = Rule {
    flag: "Tachycardia",
    resources: &[MonitorVitals],
    step: "Repeat vitals after initial supportive care",
    effect: RiskEffect::Points(1),
};

const TACHYPNEA: Rule = Rule {
    flag: "Tachypnea",
    resources: &[MonitorVitals],
    step: "Assess work of breathing and escalation threshold",
    effect: RiskEffect::Points(1),
};

const RESPIRATORY: Rule = Rule {
    flag: "Respiratory symptom cluster",
    resources: &[MonitorVitals, Xray],
    step: "Position upright and give bronchodilator if wheeze is present",
    effect: RiskEffect::Points(1),
};

const GASTROINTESTINAL: Rule = Rule {
    flag: "Gastrointestinal fluid-loss pattern",
    resources: &[IvFluids, StartIv, MonitorVitals, BloodGlucose],
    step: "Begin oral/IV rehydration based on severity",
    effect: RiskEffect::Points(1),
};

const NEUROLOGIC: Rule = Rule {
    flag: "Neurologic danger pattern",
    resources: &[ManageAirway, MonitorVitals, BloodGlucose],
    step: "Check glucose immediately and protect airway if sensorium is reduced",
    effect: RiskEffect::ForceHigh,
};

const CHEST_PAIN: Rule = Rule {
    flag: "Chest pain/cardiac risk pattern",
    resources: &[MonitorVitals, Oxygen, Ecg],
    step: "Obtain ECG urgently and monitor for deterioration",
    effect: RiskEffect::Points(2),
};

const MALARIA: Rule = Rule {
    flag: "Fever with malaria-compatible pattern",
    resources: &[MalariaTest],
    step: "Perform malaria testing early where endemic risk exists",
    effect: RiskEffect::Points(1),
};

#[derive(Default)]
struct Accumulator {
    flags: Vec<&'static str>,
    required: BTreeSet<Resource>,
    steps: BTreeSet<&'static str>,
    high_risk: bool,
    points: u32,
}

impl Accumulator {
    fn fire(&mut self, rule: &Rule) {
        self.flags.push(rule.flag);
        self.required.extend(rule.resources.iter().copied());
        self.steps.insert(rule.step);
        match rule.effect {
            RiskEffect::ForceHigh => self.high_risk = true,
            RiskEffect::Points(p) => self.points += p,
        }
    }

    fn risk_level(&self) -> RiskLevel {
        if self.high_risk {
            RiskLevel::High
        } else if self.points >= MODERATE_RISK_POINTS {
            RiskLevel::Moderate
        } else {
            RiskLevel::Low
        }
    }
}

pub fn assess(features: &CaseFeatures) -> Assessment {
    let mut acc = Accumulator::default();

    if features.hypotension {
        acc.fire(&SHOCK);
    }

    if features.severe_hypoxia {
        acc.fire(&SEVERE_HYPOXIA);
    } else if features.moderate_hypoxia {
        acc.fire(&MODERATE_HYPOXIA);
    }

    if features.fever && features.hypotension {
        acc.fire(&SEPSIS);
    } else if features.fever && (features.any_tachycardia() || features.tachypnea) {
        acc.fire(&SYSTEMIC_INFECTION);
    }

    if features.marked_tachycardia {
        acc.fire(&MARKED_TACHYCARDIA);
    } else if features.tachycardia {
        acc.fire(&TACHYCARDIA);
    }

    if features.tachypnea {
        acc.fire(&TACHYPNEA);
    }
    if features.respiratory {
        acc.fire(&RESPIRATORY);
    }
    if features.gastrointestinal {
        acc.fire(&GASTROINTESTINAL);
    }
    if features.neurologic {
        acc.fire(&NEUROLOGIC);
    }
    if features.chest_pain {
        acc.fire(&CHEST_PAIN);
    }
    if features.malaria && features.fever {
        acc.fire(&MALARIA);
    }

    if acc.flags.is_empty() {
        acc.steps.insert(ROUTINE_CARE_STEP);
        acc.flags.push(NO_RED_FLAGS);
    }

    Assessment {
        risk_level: acc.risk_level(),
        flags: acc.flags.iter().map(|f| f.to_string()).collect(),
        required_resources: acc.required.into_iter().collect(),
        stabilization_steps: acc.steps.iter().map(|s| s.to_string()).collect(),
        critical_patterns: CriticalPatterns {
            shock_or_hypoxia: features.hypotension || features.severe_hypoxia,
            neurologic_danger: features.neurologic,
            chest_pain_risk: features.chest_pain,
        },
    }
}
