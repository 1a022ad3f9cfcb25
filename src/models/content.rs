//! Generic nested content document shared by the five editable page domains.
//!
//! Each page domain is a singleton document whose JSON body is validated
//! against a declarative schema descriptor before any write. The same
//! descriptor drives the admin form-binder in the client module.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::validation::{FieldRule, RuleSet};

/// The editable page-content domains.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum ContentDomain {
    Home,
    About,
    ContactInfo,
    StudyAbroad,
    TestPrep,
}

impl ContentDomain {
    pub fn as_str(&self) -> &'static str {
        match self {
            ContentDomain::Home => "home",
            ContentDomain::About => "about",
            ContentDomain::ContactInfo => "contact-info",
            ContentDomain::StudyAbroad => "study-abroad",
            ContentDomain::TestPrep => "test-prep",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "home" => Some(ContentDomain::Home),
            "about" => Some(ContentDomain::About),
            "contact-info" => Some(ContentDomain::ContactInfo),
            "study-abroad" => Some(ContentDomain::StudyAbroad),
            "test-prep" => Some(ContentDomain::TestPrep),
            _ => None,
        }
    }

    pub fn all() -> &'static [ContentDomain] {
        &[
            ContentDomain::Home,
            ContentDomain::About,
            ContentDomain::ContactInfo,
            ContentDomain::StudyAbroad,
            ContentDomain::TestPrep,
        ]
    }

    /// Schema descriptor: dotted field paths to rules.
    pub fn rules(&self) -> RuleSet {
        match self {
            ContentDomain::Home => RuleSet::new()
                .field(
                    "hero.title",
                    vec![FieldRule::Required, FieldRule::MaxLength(150)],
                )
                .field("hero.subtitle", vec![FieldRule::MaxLength(300)])
                .field("hero.ctaText", vec![FieldRule::MaxLength(40)])
                .field("hero.image", vec![FieldRule::MaxLength(300)])
                .field("stats", vec![FieldRule::ArrayMinLength(1)])
                .field("servicesIntro.title", vec![FieldRule::MaxLength(150)])
                .field("servicesIntro.description", vec![FieldRule::MaxLength(500)])
                .field("testimonialsTitle", vec![FieldRule::MaxLength(150)]),
            ContentDomain::About => RuleSet::new()
                .field(
                    "hero.title",
                    vec![FieldRule::Required, FieldRule::MaxLength(150)],
                )
                .field("mission", vec![FieldRule::MaxLength(1000)])
                .field("vision", vec![FieldRule::MaxLength(1000)])
                // The values grid renders exactly four cards
                .field("values", vec![FieldRule::ArrayExactLength(4)])
                .field("story", vec![FieldRule::MaxLength(3000)]),
            ContentDomain::ContactInfo => RuleSet::new()
                .field(
                    "address",
                    vec![FieldRule::Required, FieldRule::MaxLength(300)],
                )
                .field("phone", vec![FieldRule::Required, FieldRule::MaxLength(20)])
                .field("email", vec![FieldRule::Required, FieldRule::Email])
                .field("officeHours", vec![FieldRule::MaxLength(200)])
                .field("mapUrl", vec![FieldRule::Url])
                .field("socials.facebook", vec![FieldRule::Url])
                .field("socials.instagram", vec![FieldRule::Url])
                .field("socials.linkedin", vec![FieldRule::Url]),
            ContentDomain::StudyAbroad => RuleSet::new()
                .field(
                    "hero.title",
                    vec![FieldRule::Required, FieldRule::MaxLength(150)],
                )
                .field("intro", vec![FieldRule::MaxLength(2000)])
                .field("destinations", vec![FieldRule::ArrayMinLength(1)])
                .field("processSteps", vec![FieldRule::ArrayMinLength(1)]),
            ContentDomain::TestPrep => RuleSet::new()
                .field(
                    "hero.title",
                    vec![FieldRule::Required, FieldRule::MaxLength(150)],
                )
                .field("intro", vec![FieldRule::MaxLength(2000)])
                .field("courses", vec![FieldRule::ArrayMinLength(1)])
                .field("faqs", vec![FieldRule::ArrayMinLength(1)]),
        }
    }
}

/// A stored page-content document: store-assigned identity and timestamps
/// around a nested JSON body.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentDocument {
    pub id: String,
    pub domain: ContentDomain,
    pub body: Value,
    pub created_at: String,
    pub updated_at: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn domain_round_trips_through_strings() {
        for domain in ContentDomain::all() {
            assert_eq!(ContentDomain::parse(domain.as_str()), Some(*domain));
        }
        assert_eq!(ContentDomain::parse("homepage"), None);
    }

    #[test]
    fn about_values_must_be_exactly_four() {
        let rules = ContentDomain::About.rules();
        let ok = json!({
            "hero": { "title": "About Us" },
            "values": ["integrity", "care", "expertise", "results"]
        });
        assert!(rules.validate(&ok).is_ok());

        let short = json!({
            "hero": { "title": "About Us" },
            "values": ["integrity", "care"]
        });
        assert!(rules.validate(&short).is_err());
    }

    #[test]
    fn home_requires_hero_title() {
        let rules = ContentDomain::Home.rules();
        let violations = rules.validate(&json!({ "hero": {} })).unwrap_err();
        assert_eq!(violations[0].field, "hero.title");
    }
}
