//! Capability tags and generative capability profiles

use super::error::DomainError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// A class of specialist response behavior (Value Object)
///
/// The set is closed: every tag maps to exactly one handler in the
/// capability registry. The declaration order is also the fixed priority
/// order used by the deterministic router pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum CapabilityTag {
    GroupCoordination,
    CreditAdvisory,
    PersonalFinance,
    Conversational,
}

impl CapabilityTag {
    /// All tags in router priority order
    pub const ALL: [CapabilityTag; 4] = [
        CapabilityTag::GroupCoordination,
        CapabilityTag::CreditAdvisory,
        CapabilityTag::PersonalFinance,
        CapabilityTag::Conversational,
    ];

    /// Get the canonical string identifier for this tag
    pub fn as_str(&self) -> &'static str {
        match self {
            CapabilityTag::PersonalFinance => "personal-finance",
            CapabilityTag::CreditAdvisory => "credit-advisory",
            CapabilityTag::GroupCoordination => "group-coordination",
            CapabilityTag::Conversational => "conversational",
        }
    }

    /// Human-readable label used as a section heading
    pub fn label(&self) -> &'static str {
        match self {
            CapabilityTag::PersonalFinance => "Personal Finance",
            CapabilityTag::CreditAdvisory => "Credit Advisory",
            CapabilityTag::GroupCoordination => "Group Coordination",
            CapabilityTag::Conversational => "Conversation",
        }
    }

    /// Single-digit discriminator emitted by the generative classifier
    pub fn digit(&self) -> char {
        match self {
            CapabilityTag::PersonalFinance => '1',
            CapabilityTag::CreditAdvisory => '2',
            CapabilityTag::GroupCoordination => '3',
            CapabilityTag::Conversational => '4',
        }
    }

    /// Resolve a classifier digit back to its tag
    pub fn from_digit(digit: char) -> Option<Self> {
        Self::ALL.into_iter().find(|tag| tag.digit() == digit)
    }
}

impl std::fmt::Display for CapabilityTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for CapabilityTag {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace(['_', ' '], "-");
        match normalized.as_str() {
            "personal-finance" | "individual" | "1" => Ok(CapabilityTag::PersonalFinance),
            "credit-advisory" | "credit" | "2" => Ok(CapabilityTag::CreditAdvisory),
            "group-coordination" | "group" | "3" => Ok(CapabilityTag::GroupCoordination),
            "conversational" | "conversation" | "4" => Ok(CapabilityTag::Conversational),
            _ => Err(DomainError::UnknownCapability(s.to_string())),
        }
    }
}

impl Serialize for CapabilityTag {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for CapabilityTag {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Model profile requested from the generative backend
///
/// The backend adapter maps each profile to a concrete model id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CapabilityProfile {
    /// Most capable model, used by the first tier
    Full,
    /// Faster, cheaper model used by the degraded tier
    Light,
    /// Model used by the router's generative pass
    Classifier,
}

impl CapabilityProfile {
    pub fn as_str(&self) -> &'static str {
        match self {
            CapabilityProfile::Full => "full",
            CapabilityProfile::Light => "light",
            CapabilityProfile::Classifier => "classifier",
        }
    }
}

impl std::fmt::Display for CapabilityProfile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
