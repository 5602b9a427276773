//! Human loop activation conditions.
//!
//! Mirrors the A2I activation-condition JSON schema: a list of `Conditions`,
//! each an `Or` group of `{ConditionType, ConditionParameters}` rules. The
//! document is evaluated by A2I against the Textract response, never locally.

use serde::Serialize;

const MAIL_ADDRESS_ALIASES: [&str; 4] = [
    "Mail Address:",
    "Mail address:",
    "Mailing Add:",
    "Mailing Addresses",
];

const PHONE_NUMBER_ALIASES: [&str; 3] = ["Phone number:", "Phone No.:", "Number:"];

/// Top-level activation document.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct ActivationConditions {
    pub conditions: Vec<ConditionGroup>,
}

/// A group of rules, any of which starts a human loop.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConditionGroup {
    #[serde(rename = "Or")]
    pub or: Vec<Condition>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "ConditionType", content = "ConditionParameters")]
pub enum Condition {
    ImportantFormKeyConfidenceCheck(ConfidenceCheck),
    MissingImportantFormKey(MissingKey),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct ConfidenceCheck {
    pub important_form_key: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub important_form_key_aliases: Vec<String>,
    #[serde(flatten)]
    pub bound: ConfidenceBound,
}

/// Both block confidences share one comparison direction.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ConfidenceBound {
    Below {
        #[serde(rename = "KeyValueBlockConfidenceLessThan")]
        key_value_block: u8,
        #[serde(rename = "WordBlockConfidenceLessThan")]
        word_block: u8,
    },
    Above {
        #[serde(rename = "KeyValueBlockConfidenceGreaterThan")]
        key_value_block: u8,
        #[serde(rename = "WordBlockConfidenceGreaterThan")]
        word_block: u8,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct MissingKey {
    pub important_form_key: String,
    pub important_form_key_aliases: Vec<String>,
}

impl Condition {
    fn confidence(key: &str, aliases: &[&str], bound: ConfidenceBound) -> Self {
        Condition::ImportantFormKeyConfidenceCheck(ConfidenceCheck {
            important_form_key: key.to_string(),
            important_form_key_aliases: aliases.iter().map(|a| a.to_string()).collect(),
            bound,
        })
    }

    fn missing(key: &str, aliases: &[&str]) -> Self {
        Condition::MissingImportantFormKey(MissingKey {
            important_form_key: key.to_string(),
            important_form_key_aliases: aliases.iter().map(|a| a.to_string()).collect(),
        })
    }
}

impl ActivationConditions {
    /// The fixed rule set used for the Textract forms workflow.
    ///
    /// Any `Mail address` or `Phone Number` value under full confidence, a
    /// missing `Mail address`, or any key at all triggers review.
    pub fn textract_forms() -> Self {
        let below = ConfidenceBound::Below {
            key_value_block: 100,
            word_block: 100,
        };
        let above = ConfidenceBound::Above {
            key_value_block: 0,
            word_block: 0,
        };

        ActivationConditions {
            conditions: vec![ConditionGroup {
                or: vec![
                    Condition::confidence("Mail address", &MAIL_ADDRESS_ALIASES, below),
                    Condition::missing("Mail address", &MAIL_ADDRESS_ALIASES),
                    Condition::confidence("Phone Number", &PHONE_NUMBER_ALIASES, below),
                    Condition::confidence("*", &[], below),
                    Condition::confidence("*", &[], above),
                ],
            }],
        }
    }

    /// Serializes the document as the string SageMaker expects.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}
