//! Record-level PII classification
//!
//! A record is PII when it carries a direct identifier (phone, national ID, passport, payment
//! handle) in valid shape, or when at least two weak quasi-identifier signals (name, email,
//! location, device linkage) appear together.

use crate::detector::IdentifierKind;
use piiguard_core::{FieldMap, FieldValue, field};
use serde::{Deserialize, Serialize};

/// Quasi-identifier score at which a record counts as PII
pub const PII_SCORE_THRESHOLD: u32 = 2;

/// Trait for deciding whether a field mapping contains PII
pub trait RecordClassifier: Send + Sync {
    /// Evaluate every signal and return the decision breakdown
    fn assess(&self, fields: &FieldMap) -> Assessment;

    fn classify(&self, fields: &FieldMap) -> bool {
        self.assess(fields).is_pii()
    }
}

/// How a record carrying both a full `name` and a `first_name`/`last_name` pair is scored
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NameSignalMode {
    /// Either form counts once; the name signal contributes at most 1
    #[default]
    Single,

    /// Each form contributes independently, so both together add 2
    PerForm,
}

/// Configuration for the heuristic classifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ClassifierConfig {
    #[serde(default)]
    pub name_signal: NameSignalMode,
}

/// Fields that are sufficient on their own when their value has the right shape
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DirectIdentifier {
    Phone,
    Contact,
    Aadhar,
    Passport,
    UpiId,
}

impl DirectIdentifier {
    /// Evaluation order
    pub const ALL: [DirectIdentifier; 5] = [
        DirectIdentifier::Phone,
        DirectIdentifier::Contact,
        DirectIdentifier::Aadhar,
        DirectIdentifier::Passport,
        DirectIdentifier::UpiId,
    ];

    /// Blob key holding this identifier
    pub fn key(self) -> &'static str {
        match self {
            DirectIdentifier::Phone => "phone",
            DirectIdentifier::Contact => "contact",
            DirectIdentifier::Aadhar => "aadhar",
            DirectIdentifier::Passport => "passport",
            DirectIdentifier::UpiId => "upi_id",
        }
    }

    /// Shape the value must have
    pub fn kind(self) -> IdentifierKind {
        match self {
            DirectIdentifier::Phone | DirectIdentifier::Contact => IdentifierKind::Phone,
            DirectIdentifier::Aadhar => IdentifierKind::NationalId,
            DirectIdentifier::Passport => IdentifierKind::Passport,
            DirectIdentifier::UpiId => IdentifierKind::PaymentHandle,
        }
    }
}

/// Which quasi-identifier signals fired
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct QuasiSignals {
    pub name: bool,
    pub email: bool,
    pub location: bool,
    pub device: bool,
}

/// Breakdown of a classification decision
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Assessment {
    /// First direct identifier found; quasi-identifiers are not evaluated when set
    pub direct: Option<DirectIdentifier>,
    pub signals: QuasiSignals,
    pub score: u32,
}

impl Assessment {
    pub fn is_pii(&self) -> bool {
        self.direct.is_some() || self.score >= PII_SCORE_THRESHOLD
    }
}

/// Classifier built on the field shape heuristics
#[derive(Debug, Clone, Default)]
pub struct HeuristicClassifier {
    config: ClassifierConfig,
}

impl HeuristicClassifier {
    pub fn new(config: ClassifierConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ClassifierConfig {
        &self.config
    }
}

impl RecordClassifier for HeuristicClassifier {
    fn assess(&self, fields: &FieldMap) -> Assessment {
        if let Some(direct) = find_direct_identifier(fields) {
            return Assessment {
                direct: Some(direct),
                ..Assessment::default()
            };
        }

        let mut signals = QuasiSignals::default();
        let mut score = 0;

        let full_name = field(fields, "name").is_some_and(|value| {
            value.is_present() && value.as_text().split_whitespace().count() >= 2
        });
        let name_pair = is_present(fields, "first_name") && is_present(fields, "last_name");
        signals.name = full_name || name_pair;
        score += match self.config.name_signal {
            NameSignalMode::Single => u32::from(signals.name),
            NameSignalMode::PerForm => u32::from(full_name) + u32::from(name_pair),
        };

        signals.email = has_shape(fields, "email", IdentifierKind::Email);
        score += u32::from(signals.email);

        signals.location = is_present(fields, "pin_code")
            && (is_present(fields, "address") || is_present(fields, "city"));
        score += u32::from(signals.location);

        // Device linkage only matters once the record is tied to a person
        if signals.name || signals.email {
            signals.device = is_present(fields, "device_id")
                || has_shape(fields, "ip_address", IdentifierKind::IpAddress);
            score += u32::from(signals.device);
        }

        Assessment {
            direct: None,
            signals,
            score,
        }
    }
}

fn find_direct_identifier(fields: &FieldMap) -> Option<DirectIdentifier> {
    DirectIdentifier::ALL
        .into_iter()
        .find(|direct| has_shape(fields, direct.key(), direct.kind()))
}

fn is_present(fields: &FieldMap, key: &str) -> bool {
    field(fields, key).is_some_and(|value| value.is_present())
}

fn has_shape(fields: &FieldMap, key: &str, kind: IdentifierKind) -> bool {
    field(fields, key).is_some_and(|value: FieldValue<'_>| kind.matches(&value.as_text()))
}
