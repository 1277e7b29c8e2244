//! Canonical schema and topic naming.
//!
//! # Purpose
//! Derives the registry schema name and the broker topic name for an
//! (environment, domain, subdomain) triple. Onboardings and schemas are only
//! correlated through these names, so both APIs derive them here.
//!
//! # Notes
//! Only the environment is lowercased. Domain and subdomain are used as given.

/// Build the registry name of a schema.
///
/// ```rust
/// use fulcrum::naming::derive_schema_name;
///
/// assert_eq!(
///     derive_schema_name("dev", "customers", "profiles"),
///     "ebeh-ob-dev-customers-profiles-schema"
/// );
/// ```
pub fn derive_schema_name(environment: &str, domain: &str, subdomain: &str) -> String {
    format!(
        "ebeh-ob-{}-{domain}-{subdomain}-schema",
        environment.to_lowercase()
    )
}

/// Build the topic name for one environment.
pub fn derive_topic_name(domain: &str, subdomain: &str, environment: &str) -> String {
    format!("{domain}-{subdomain}-{}", environment.to_lowercase())
}

/// Derived names for every environment of an onboarding.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OnboardingNames {
    /// Schema names joined with `\n`, one line per environment.
    pub schema_name: String,
    /// One topic per environment.
    pub topic_name: Vec<String>,
}

/// Derive schema and topic names for each environment, in input order.
///
/// Domain and subdomain are trimmed first; if either ends up empty no names
/// are produced.
pub fn derive_onboarding_names<'a, I>(
    domain: &str,
    subdomain: &str,
    environments: I,
) -> OnboardingNames
where
    I: IntoIterator<Item = &'a str>,
{
    let domain = domain.trim();
    let subdomain = subdomain.trim();
    if domain.is_empty() || subdomain.is_empty() {
        return OnboardingNames::default();
    }
    let mut schema_names = Vec::new();
    let mut topic_name = Vec::new();
    for environment in environments {
        schema_names.push(derive_schema_name(environment, domain, subdomain));
        topic_name.push(derive_topic_name(domain, subdomain, environment));
    }
    OnboardingNames {
        schema_name: schema_names.join("\n"),
        topic_name,
    }
}
