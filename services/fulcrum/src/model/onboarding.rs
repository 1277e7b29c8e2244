//! Onboarding records and their per-environment ARNs.
//!
//! # Purpose
//! Defines one registered producer or consumer (`Onboarding`), the
//! (environment, ARN) children attached to it, and the validated draft that
//! create and update operations persist.
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use utoipa::ToSchema;

/// Deployment environment an ARN belongs to.
#[derive(Debug, Serialize, Deserialize, ToSchema, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "UPPERCASE")]
pub enum Environment {
    Dev,
    Qa,
    Cap,
    Psp,
    Prod,
}

impl Environment {
    pub const ALL: [Environment; 5] = [
        Environment::Dev,
        Environment::Qa,
        Environment::Cap,
        Environment::Psp,
        Environment::Prod,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Environment::Dev => "DEV",
            Environment::Qa => "QA",
            Environment::Cap => "CAP",
            Environment::Psp => "PSP",
            Environment::Prod => "PROD",
        }
    }

    /// Parse an environment label, ignoring case and surrounding whitespace.
    pub fn parse(value: &str) -> Option<Self> {
        let value = value.trim();
        Self::ALL
            .into_iter()
            .find(|env| env.as_str().eq_ignore_ascii_case(value))
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How the onboarded party exchanges events.
#[derive(Debug, Serialize, Deserialize, ToSchema, Clone, Copy, PartialEq, Eq)]
pub enum OnboardType {
    #[serde(rename = "Direct Producer")]
    DirectProducer,
    #[serde(rename = "Direct Consumer")]
    DirectConsumer,
    #[serde(rename = "S3")]
    S3,
    #[serde(rename = "SF")]
    Sf,
    #[serde(rename = "EB with Lambda")]
    EbWithLambda,
}

impl OnboardType {
    pub const ALL: [OnboardType; 5] = [
        OnboardType::DirectProducer,
        OnboardType::DirectConsumer,
        OnboardType::S3,
        OnboardType::Sf,
        OnboardType::EbWithLambda,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            OnboardType::DirectProducer => "Direct Producer",
            OnboardType::DirectConsumer => "Direct Consumer",
            OnboardType::S3 => "S3",
            OnboardType::Sf => "SF",
            OnboardType::EbWithLambda => "EB with Lambda",
        }
    }

    /// Parse the exact display label (surrounding whitespace is ignored).
    pub fn parse(value: &str) -> Option<Self> {
        let value = value.trim();
        Self::ALL.into_iter().find(|kind| kind.as_str() == value)
    }
}

impl fmt::Display for OnboardType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema, Clone, PartialEq, Eq)]
pub struct EnvArn {
    pub id: i64,
    pub onboarding_id: i64,
    pub env: Environment,
    pub arn: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema, Clone)]
pub struct Onboarding {
    pub id: i64,
    pub lob_name: String,
    pub domain: String,
    pub onboard_type: OnboardType,
    pub sub_domain: String,
    pub volume_of_events: String,
    /// Newline-separated, one schema name per environment.
    pub schema_name: String,
    pub topic_name: Vec<String>,
    pub tentative_prod_date: String,
    pub can_perform_pt: bool,
    pub notification_email: String,
    pub contact_emails: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub env_arns: Vec<EnvArn>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnvArnDraft {
    pub env: Environment,
    pub arn: String,
}

/// Validated onboarding fields ready to persist.
///
/// `env_arns` holds only complete rows with distinct environments, and the
/// derived `schema_name`/`topic_name` already match them.
#[derive(Debug, Clone)]
pub struct OnboardingDraft {
    pub lob_name: String,
    pub domain: String,
    pub onboard_type: OnboardType,
    pub sub_domain: String,
    pub volume_of_events: String,
    pub schema_name: String,
    pub topic_name: Vec<String>,
    pub tentative_prod_date: String,
    pub can_perform_pt: bool,
    pub notification_email: String,
    pub contact_emails: String,
    pub env_arns: Vec<EnvArnDraft>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn environment_parse_ignores_case() {
        assert_eq!(Environment::parse("prod"), Some(Environment::Prod));
        assert_eq!(Environment::parse(" Qa "), Some(Environment::Qa));
        assert_eq!(Environment::parse("staging"), None);
        assert_eq!(Environment::parse(""), None);
    }

    #[test]
    fn environment_serializes_upper_case() {
        let value = serde_json::to_value(Environment::Psp).expect("serialize");
        assert_eq!(value, serde_json::json!("PSP"));
        let parsed: Environment = serde_json::from_value(serde_json::json!("CAP")).expect("parse");
        assert_eq!(parsed, Environment::Cap);
    }

    #[test]
    fn onboard_type_labels_match_serde() {
        for kind in OnboardType::ALL {
            let value = serde_json::to_value(kind).expect("serialize");
            assert_eq!(value, serde_json::json!(kind.as_str()));
            assert_eq!(OnboardType::parse(kind.as_str()), Some(kind));
        }
        assert_eq!(OnboardType::parse("direct producer"), None);
    }
}
