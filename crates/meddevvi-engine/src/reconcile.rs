//! Capability reconciliation: what the case needs against what the facility
//! has, and the referral decision that follows.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use meddevvi_core::models::resource::Resource;

use crate::assess::{Assessment, RiskLevel};
use crate::capability::FacilityCapabilitySet;

pub const EARLY_REFERRAL_STEP: &str =
    "Arrange early referral while continuing achievable stabilization";

pub const TRANSFER_NOTE_STEP: &str = "Send transfer note with vitals and treatments already given";

pub const GREEN_EXPLANATION: &str =
    "This case can be managed with the resources currently available at this facility.";

pub const RED_EXPLANATION: &str = "This case exceeds what this facility can safely manage right now; \
     stabilize with what is available and arrange referral.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum StabilizationVerdict {
    Yes,
    Partial,
    No,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum ReferralVerdict {
    Yes,
    No,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum TreatabilityFlag {
    Green,
    Red,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Treatability {
    pub flag: TreatabilityFlag,
    pub explanation: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Reconciliation {
    /// Required resources the facility lacks, in required order.
    pub missing_resources: Vec<Resource>,
    pub stabilization_possible: StabilizationVerdict,
    pub refer_immediately: ReferralVerdict,
    pub treatability: Treatability,
    pub steps_before_referral: Vec<String>,
}

pub fn stabilization_verdict(required: &[Resource], missing: &[Resource]) -> StabilizationVerdict {
    if required.is_empty() || missing.is_empty() {
        StabilizationVerdict::Yes
    } else if missing.len() < required.len() {
        StabilizationVerdict::Partial
    } else {
        StabilizationVerdict::No
    }
}

pub fn reconcile(assessment: &Assessment, capabilities: &FacilityCapabilitySet) -> Reconciliation {
    let missing: Vec<Resource> = assessment
        .required_resources
        .iter()
        .copied()
        .filter(|r| !capabilities.contains(*r))
        .collect();

    let stabilization = stabilization_verdict(&assessment.required_resources, &missing);

    let critical = assessment.critical_patterns;
    let refer = assessment.risk_level == RiskLevel::High
        && (!missing.is_empty() || critical.chest_pain_risk || critical.neurologic_danger);
    let refer_immediately = if refer {
        ReferralVerdict::Yes
    } else {
        ReferralVerdict::No
    };

    let treatability = if stabilization == StabilizationVerdict::Yes
        && refer_immediately == ReferralVerdict::No
    {
        Treatability {
            flag: TreatabilityFlag::Green,
            explanation: GREEN_EXPLANATION.to_string(),
        }
    } else {
        Treatability {
            flag: TreatabilityFlag::Red,
            explanation: RED_EXPLANATION.to_string(),
        }
    };

    let mut steps_before_referral = assessment.stabilization_steps.clone();
    if !missing.is_empty() {
        steps_before_referral.push(EARLY_REFERRAL_STEP.to_string());
        steps_before_referral.push(TRANSFER_NOTE_STEP.to_string());
    }

    Reconciliation {
        missing_resources: missing,
        stabilization_possible: stabilization,
        refer_immediately,
        treatability,
        steps_before_referral,
    }
}
