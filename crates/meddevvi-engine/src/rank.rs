//! Differential ranking.
//!
//! Every diagnosis in the catalog starts at zero. Bump rules add weighted
//! points; the first rule to bump a diagnosis supplies its reasoning. Ties
//! keep catalog order.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::assess::RiskLevel;
use crate::features::CaseFeatures;

pub const MAX_DIFFERENTIALS: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum Diagnosis {
    Pneumonia,
    Sepsis,
    AcuteCoronarySyndrome,
    HeartFailure,
    Gastroenteritis,
    CerebrovascularEvent,
    UrinaryTractInfection,
    DiabeticEmergency,
    SevereMalaria,
    AirwayExacerbation,
    /// Emitted only when nothing in the catalog scores.
    Undifferentiated,
}

/// Declaration order doubles as the tie-break order.
pub const CATALOG: [Diagnosis; 10] = [
    Diagnosis::Pneumonia,
    Diagnosis::Sepsis,
    Diagnosis::AcuteCoronarySyndrome,
    Diagnosis::HeartFailure,
    Diagnosis::Gastroenteritis,
    Diagnosis::CerebrovascularEvent,
    Diagnosis::UrinaryTractInfection,
    Diagnosis::DiabeticEmergency,
    Diagnosis::SevereMalaria,
    Diagnosis::AirwayExacerbation,
];

impl Diagnosis {
    pub fn label(&self) -> &'static str {
        match self {
            Diagnosis::Pneumonia => "Community-acquired pneumonia",
            Diagnosis::Sepsis => "Sepsis",
            Diagnosis::AcuteCoronarySyndrome => "Acute coronary syndrome",
            Diagnosis::HeartFailure => "Acute heart failure",
            Diagnosis::Gastroenteritis => "Acute gastroenteritis with dehydration",
            Diagnosis::CerebrovascularEvent => "Acute cerebrovascular event",
            Diagnosis::UrinaryTractInfection => "Urinary tract infection / pyelonephritis",
            Diagnosis::DiabeticEmergency => "Diabetic emergency (DKA / hypoglycaemia)",
            Diagnosis::SevereMalaria => "Severe malaria",
            Diagnosis::AirwayExacerbation => "Acute asthma / COPD exacerbation",
            Diagnosis::Undifferentiated => "Undifferentiated acute illness",
        }
    }

    /// Whether the diagnosis is an infection; absent fever counts against it.
    pub fn is_infectious(&self) -> bool {
        matches!(
            self,
            Diagnosis::Pneumonia
                | Diagnosis::Sepsis
                | Diagnosis::Gastroenteritis
                | Diagnosis::UrinaryTractInfection
                | Diagnosis::SevereMalaria
        )
    }

    fn catalog_index(&self) -> Option<usize> {
        CATALOG.iter().position(|d| d == self)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct RankedDifferential {
    pub diagnosis: Diagnosis,
    pub label: String,
    pub score: u32,
    pub reasoning: String,
}

struct BumpRule {
    applies: fn(&CaseFeatures, RiskLevel) -> bool,
    bumps: &'static [(Diagnosis, u32, &'static str)],
}

use Diagnosis::*;

static RULES: &[BumpRule] = &[
    BumpRule {
        applies: |f, _| f.respiratory,
        bumps: &[
            (
                Pneumonia,
                3,
                "Respiratory symptom cluster supports a lower respiratory tract infection.",
            ),
            (
                AirwayExacerbation,
                2,
                "Breathlessness or wheeze can represent bronchospasm or airway inflammation.",
            ),
        ],
    },
    BumpRule {
        applies: |f, _| f.fever,
        bumps: &[
            (Pneumonia, 2, "Documented fever is consistent with pulmonary infection."),
            (Sepsis, 2, "Fever raises concern for a systemic infection."),
            (Gastroenteritis, 1, "Fever with acute illness can accompany infectious gastroenteritis."),
        ],
    },
    BumpRule {
        applies: |f, _| f.any_hypoxia(),
        bumps: &[
            (Pneumonia, 2, "Low oxygen saturation suggests impaired gas exchange from pneumonia."),
            (HeartFailure, 2, "Hypoxia can reflect pulmonary congestion from cardiac failure."),
        ],
    },
    BumpRule {
        applies: |f, _| f.hypotension,
        bumps: &[
            (Sepsis, 4, "Hypotension indicates possible distributive (septic) shock."),
            (Gastroenteritis, 2, "Hypotension can result from volume depletion after fluid losses."),
        ],
    },
    BumpRule {
        applies: |f, _| f.any_tachycardia(),
        bumps: &[
            (Sepsis, 1, "Tachycardia is a marker of physiologic stress in sepsis."),
            (AcuteCoronarySyndrome, 1, "Tachycardia can accompany myocardial ischaemia."),
        ],
    },
    BumpRule {
        applies: |f, _| f.chest_pain,
        bumps: &[
            (AcuteCoronarySyndrome, 4, "Chest pain or tightness requires exclusion of a coronary event."),
            (HeartFailure, 2, "Chest discomfort can accompany acute cardiac decompensation."),
        ],
    },
    BumpRule {
        applies: |f, _| f.edema,
        bumps: &[(HeartFailure, 3, "Oedema or swelling suggests fluid overload from cardiac failure.")],
    },
    BumpRule {
        applies: |f, _| f.gastrointestinal,
        bumps: &[(Gastroenteritis, 4, "GI-predominant symptoms suggest infectious gastroenteritis.")],
    },
    BumpRule {
        applies: |f, _| f.neurologic,
        bumps: &[(
            CerebrovascularEvent,
            5,
            "Focal or altered neurologic findings require urgent vascular evaluation.",
        )],
    },
    BumpRule {
        applies: |f, _| f.urinary && f.fever,
        bumps: &[(
            UrinaryTractInfection,
            4,
            "Urinary symptoms with fever suggest an upper urinary tract infection.",
        )],
    },
    BumpRule {
        applies: |f, _| f.glucose,
        bumps: &[(
            DiabeticEmergency,
            3,
            "Glucose-related history or findings raise concern for a diabetic emergency.",
        )],
    },
    BumpRule {
        applies: |f, _| f.malaria && f.fever,
        bumps: &[(SevereMalaria, 4, "Fever with chills or rigors is compatible with malaria.")],
    },
    BumpRule {
        applies: |_, risk| risk == RiskLevel::High,
        bumps: &[(Sepsis, 1, "High-risk physiology warrants consideration of sepsis.")],
    },
];

const UNDIFFERENTIATED_REASONING: &str =
    "No specific pattern identified; reassess with further history, examination, and tests.";

pub fn rank(features: &CaseFeatures, risk: RiskLevel) -> Vec<RankedDifferential> {
    let mut scores = [0u32; CATALOG.len()];
    let mut reasoning: [Option<&'static str>; CATALOG.len()] = [None; CATALOG.len()];

    for rule in RULES.iter().filter(|r| (r.applies)(features, risk)) {
        for (diagnosis, weight, why) in rule.bumps {
            let Some(i) = diagnosis.catalog_index() else {
                continue;
            };
            scores[i] += weight;
            reasoning[i].get_or_insert(*why);
        }
    }

    let mut ranked: Vec<RankedDifferential> = CATALOG
        .iter()
        .enumerate()
        .filter(|(i, _)| scores[*i] > 0)
        .map(|(i, diagnosis)| RankedDifferential {
            diagnosis: *diagnosis,
            label: diagnosis.label().to_string(),
            score: scores[i],
            reasoning: reasoning[i].unwrap_or_default().to_string(),
        })
        .collect();

    // Stable: equal scores keep catalog order.
    ranked.sort_by(|a, b| b.score.cmp(&a.score));
    ranked.truncate(MAX_DIFFERENTIALS);

    if ranked.is_empty() {
        ranked.push(RankedDifferential {
            diagnosis: Diagnosis::Undifferentiated,
            label: Diagnosis::Undifferentiated.label().to_string(),
            score: 1,
            reasoning: UNDIFFERENTIATED_REASONING.to_string(),
        });
    }

    ranked
}
