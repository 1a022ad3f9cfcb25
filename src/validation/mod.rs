//! Declarative field validation for incoming write requests.
//!
//! Each domain declares a [`RuleSet`] mapping dotted field paths to rules.
//! Validation runs against the raw JSON body before deserialization so every
//! violated field is reported in one ordered pass.

use chrono::{NaiveDate, Utc};
use serde_json::Value;

use crate::errors::FieldViolation;

/// A single rule applied to one field path.
#[derive(Debug, Clone)]
pub enum FieldRule {
    Required,
    MinLength(usize),
    MaxLength(usize),
    /// Case-sensitive membership in a fixed allowed set
    OneOf(&'static [&'static str]),
    NumberRange(f64, f64),
    /// Date string (YYYY-MM-DD or RFC 3339) strictly after the current clock
    FutureDate,
    ArrayMinLength(usize),
    ArrayExactLength(usize),
    /// Every string item in the array is length-bounded
    EachMaxLength(usize),
    Email,
    Slug,
    Url,
}

/// Ordered mapping from field path to rules for one domain.
#[derive(Debug, Clone, Default)]
pub struct RuleSet {
    rules: Vec<(String, Vec<FieldRule>)>,
}

impl RuleSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn field(mut self, path: &str, rules: Vec<FieldRule>) -> Self {
        self.rules.push((path.to_string(), rules));
        self
    }

    /// The same rule set with `Required` dropped, for partial updates where
    /// absent fields keep their stored values.
    pub fn without_required(&self) -> RuleSet {
        RuleSet {
            rules: self
                .rules
                .iter()
                .map(|(path, rules)| {
                    let kept = rules
                        .iter()
                        .filter(|r| !matches!(r, FieldRule::Required))
                        .cloned()
                        .collect();
                    (path.clone(), kept)
                })
                .collect(),
        }
    }

    /// Validate a JSON body, returning every violation in declaration order.
    pub fn validate(&self, body: &Value) -> Result<(), Vec<FieldViolation>> {
        let mut violations = Vec::new();

        for (path, rules) in &self.rules {
            let value = lookup(body, path);

            match value {
                None | Some(Value::Null) => {
                    if rules.iter().any(|r| matches!(r, FieldRule::Required)) {
                        violations.push(FieldViolation::new(path, format!("{} is required", path)));
                    }
                }
                Some(value) => {
                    for rule in rules {
                        if let Some(violation) = check_rule(path, value, rule) {
                            violations.push(violation);
                        }
                    }
                }
            }
        }

        if violations.is_empty() {
            Ok(())
        } else {
            Err(violations)
        }
    }
}

/// Resolve a dotted path against nested JSON objects.
fn lookup<'a>(body: &'a Value, path: &str) -> Option<&'a Value> {
    let mut current = body;
    for segment in path.split('.') {
        current = current.as_object()?.get(segment)?;
    }
    Some(current)
}

fn check_rule(path: &str, value: &Value, rule: &FieldRule) -> Option<FieldViolation> {
    match rule {
        FieldRule::Required => match value {
            Value::String(s) if s.trim().is_empty() => {
                Some(FieldViolation::new(path, format!("{} is required", path)))
            }
            _ => None,
        },
        FieldRule::MinLength(min) => match value.as_str() {
            Some(s) if s.chars().count() < *min => Some(FieldViolation::new(
                path,
                format!("{} must be at least {} characters", path, min),
            )),
            Some(_) => None,
            None => Some(FieldViolation::new(
                path,
                format!("{} must be a string", path),
            )),
        },
        FieldRule::MaxLength(max) => match value.as_str() {
            Some(s) if s.chars().count() > *max => Some(FieldViolation::new(
                path,
                format!("{} must be at most {} characters", path, max),
            )),
            Some(_) => None,
            None => Some(FieldViolation::new(
                path,
                format!("{} must be a string", path),
            )),
        },
        FieldRule::OneOf(allowed) => match value.as_str() {
            Some(s) if allowed.contains(&s) => None,
            _ => Some(FieldViolation::new(
                path,
                format!("{} must be one of: {}", path, allowed.join(", ")),
            )),
        },
        FieldRule::NumberRange(min, max) => match value.as_f64() {
            Some(n) if n >= *min && n <= *max => None,
            Some(_) => Some(FieldViolation::new(
                path,
                format!("{} must be between {} and {}", path, min, max),
            )),
            None => Some(FieldViolation::new(
                path,
                format!("{} must be a number", path),
            )),
        },
        FieldRule::FutureDate => match value.as_str() {
            Some(s) if is_future_date(s) => None,
            Some(_) => Some(FieldViolation::new(
                path,
                format!("{} must be a date in the future", path),
            )),
            None => Some(FieldViolation::new(
                path,
                format!("{} must be a date string", path),
            )),
        },
        FieldRule::ArrayMinLength(min) => match value.as_array() {
            Some(items) if items.len() >= *min => None,
            Some(_) => Some(FieldViolation::new(
                path,
                format!("{} must have at least {} items", path, min),
            )),
            None => Some(FieldViolation::new(
                path,
                format!("{} must be an array", path),
            )),
        },
        FieldRule::ArrayExactLength(len) => match value.as_array() {
            Some(items) if items.len() == *len => None,
            Some(_) => Some(FieldViolation::new(
                path,
                format!("{} must have exactly {} items", path, len),
            )),
            None => Some(FieldViolation::new(
                path,
                format!("{} must be an array", path),
            )),
        },
        FieldRule::EachMaxLength(max) => match value.as_array() {
            Some(items) => {
                let too_long = items
                    .iter()
                    .any(|item| item.as_str().map(|s| s.chars().count() > *max).unwrap_or(true));
                if too_long {
                    Some(FieldViolation::new(
                        path,
                        format!("{} items must be strings of at most {} characters", path, max),
                    ))
                } else {
                    None
                }
            }
            None => Some(FieldViolation::new(
                path,
                format!("{} must be an array", path),
            )),
        },
        FieldRule::Email => match value.as_str() {
            Some(s) if is_email(s) => None,
            _ => Some(FieldViolation::new(
                path,
                format!("{} must be a valid email address", path),
            )),
        },
        FieldRule::Slug => match value.as_str() {
            Some(s) if is_slug(s) => None,
            _ => Some(FieldViolation::new(
                path,
                format!(
                    "{} may only contain lowercase letters, numbers, and hyphens",
                    path
                ),
            )),
        },
        FieldRule::Url => match value.as_str() {
            Some(s) if s.starts_with("http://") || s.starts_with("https://") => None,
            _ => Some(FieldViolation::new(
                path,
                format!("{} must be a valid URL", path),
            )),
        },
    }
}

/// Standard email shape: one `@`, non-empty local part, dotted domain.
pub fn is_email(s: &str) -> bool {
    let mut parts = s.splitn(2, '@');
    let local = parts.next().unwrap_or("");
    let domain = parts.next().unwrap_or("");
    !local.is_empty()
        && !domain.is_empty()
        && domain.contains('.')
        && !domain.starts_with('.')
        && !domain.ends_with('.')
        && !s.contains(char::is_whitespace)
        && !domain.contains('@')
}

/// Lowercase-and-hyphen slug charset, no leading/trailing/doubled hyphens.
pub fn is_slug(s: &str) -> bool {
    !s.is_empty()
        && !s.starts_with('-')
        && !s.ends_with('-')
        && !s.contains("--")
        && s.chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
}

/// Accepts `YYYY-MM-DD` (after today) or RFC 3339 (after now).
fn is_future_date(s: &str) -> bool {
    if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return date > Utc::now().date_naive();
    }
    if let Ok(dt) = chrono::DateTime::parse_from_rfc3339(s) {
        return dt > Utc::now();
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample_rules() -> RuleSet {
        RuleSet::new()
            .field("name", vec![FieldRule::Required, FieldRule::MaxLength(10)])
            .field("email", vec![FieldRule::Required, FieldRule::Email])
            .field(
                "urgency",
                vec![FieldRule::OneOf(&["low", "normal", "high", "urgent"])],
            )
            .field("hero.title", vec![FieldRule::Required])
    }

    #[test]
    fn valid_body_passes() {
        let body = json!({
            "name": "Aisha",
            "email": "aisha@example.com",
            "urgency": "high",
            "hero": { "title": "Welcome" }
        });
        assert!(sample_rules().validate(&body).is_ok());
    }

    #[test]
    fn every_violation_is_reported_in_order() {
        let body = json!({
            "name": "",
            "email": "not-an-email",
            "urgency": "URGENT",
            "hero": {}
        });
        let violations = sample_rules().validate(&body).unwrap_err();
        let fields: Vec<&str> = violations.iter().map(|v| v.field.as_str()).collect();
        assert_eq!(fields, vec!["name", "email", "urgency", "hero.title"]);
    }

    #[test]
    fn missing_optional_field_is_skipped() {
        let body = json!({
            "name": "Omar",
            "email": "omar@example.com",
            "hero": { "title": "Hi" }
        });
        assert!(sample_rules().validate(&body).is_ok());
    }

    #[test]
    fn enum_membership_is_case_sensitive() {
        let rules = RuleSet::new().field("status", vec![FieldRule::OneOf(&["draft", "published"])]);
        assert!(rules.validate(&json!({"status": "draft"})).is_ok());
        assert!(rules.validate(&json!({"status": "Draft"})).is_err());
    }

    #[test]
    fn without_required_keeps_other_rules() {
        let rules = sample_rules().without_required();
        // Absent fields are fine now
        assert!(rules.validate(&json!({})).is_ok());
        // But present fields are still checked
        let violations = rules.validate(&json!({"email": "nope"})).unwrap_err();
        assert_eq!(violations[0].field, "email");
    }

    #[test]
    fn future_date_rejects_past_and_today() {
        let rules = RuleSet::new().field("preferredDate", vec![FieldRule::FutureDate]);
        let today = Utc::now().date_naive().format("%Y-%m-%d").to_string();
        assert!(rules.validate(&json!({"preferredDate": "2019-01-01"})).is_err());
        assert!(rules.validate(&json!({"preferredDate": today})).is_err());
        let future = (Utc::now().date_naive() + chrono::Days::new(30))
            .format("%Y-%m-%d")
            .to_string();
        assert!(rules.validate(&json!({"preferredDate": future})).is_ok());
    }

    #[test]
    fn array_rules() {
        let rules = RuleSet::new()
            .field("values", vec![FieldRule::ArrayExactLength(4)])
            .field("tags", vec![FieldRule::EachMaxLength(5)]);
        assert!(rules
            .validate(&json!({"values": [1, 2, 3, 4], "tags": ["ab", "cde"]}))
            .is_ok());
        assert!(rules.validate(&json!({"values": [1, 2, 3]})).is_err());
        assert!(rules.validate(&json!({"tags": ["toolongvalue"]})).is_err());
    }

    #[test]
    fn slug_shape() {
        assert!(is_slug("hello-world-2024"));
        assert!(!is_slug("Hello-World"));
        assert!(!is_slug("-leading"));
        assert!(!is_slug("double--hyphen"));
        assert!(!is_slug(""));
    }

    #[test]
    fn email_shape() {
        assert!(is_email("user@example.com"));
        assert!(!is_email("user@localhost"));
        assert!(!is_email("@example.com"));
        assert!(!is_email("user example@example.com"));
    }
}
