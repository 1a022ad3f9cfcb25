//! In-memory editing draft for page-content documents.
//!
//! Models the admin editing contract: load the current document (or the
//! empty-shape default), apply field edits immutably at dotted paths, then
//! save the entire body in one PUT. Last writer wins; there is no partial
//! save and no conflict detection.

use serde_json::{Map, Value};

use super::{fallback, ClientError, Session};
use crate::models::{ContentDocument, ContentDomain};

/// A local, immutable draft of one domain's document body.
#[derive(Debug, Clone)]
pub struct DocumentDraft {
    domain: ContentDomain,
    body: Value,
}

impl DocumentDraft {
    /// Start from an existing body.
    pub fn new(domain: ContentDomain, body: Value) -> Self {
        Self { domain, body }
    }

    /// Fetch the current document, starting from the domain default when
    /// nothing is stored yet.
    pub async fn load(session: &Session, domain: ContentDomain) -> Self {
        let body = session.fetch_page_content_or_default(domain).await;
        Self { domain, body }
    }

    pub fn domain(&self) -> ContentDomain {
        self.domain
    }

    pub fn body(&self) -> &Value {
        &self.body
    }

    /// Read the value at a dotted path. Numeric segments index arrays.
    pub fn get(&self, path: &str) -> Option<&Value> {
        let mut current = &self.body;
        for segment in path.split('.') {
            current = match current {
                Value::Object(map) => map.get(segment)?,
                Value::Array(items) => items.get(segment.parse::<usize>().ok()?)?,
                _ => return None,
            };
        }
        Some(current)
    }

    /// A new draft with `value` written at the dotted path; the original
    /// draft is untouched. Missing intermediate objects are created.
    pub fn set(&self, path: &str, value: Value) -> Self {
        let mut body = self.body.clone();
        set_at(&mut body, path, value);
        Self {
            domain: self.domain,
            body,
        }
    }

    /// PUT the whole current body back. Returns the stored document on
    /// success; validation failures come back as [`ClientError::Api`].
    pub async fn save(&self, session: &Session) -> Result<ContentDocument, ClientError> {
        session
            .put(
                &format!("/api/content/{}", self.domain.as_str()),
                &self.body,
            )
            .await
    }
}

fn set_at(target: &mut Value, path: &str, value: Value) {
    let Some((head, rest)) = split_path(path) else {
        *target = value;
        return;
    };

    match target {
        Value::Array(items) => {
            if let Ok(index) = head.parse::<usize>() {
                if let Some(slot) = items.get_mut(index) {
                    match rest {
                        Some(rest) => set_at(slot, rest, value),
                        None => *slot = value,
                    }
                }
            }
        }
        Value::Object(map) => {
            let slot = map.entry(head.to_string()).or_insert(Value::Null);
            match rest {
                Some(rest) => {
                    if !slot.is_object() && !slot.is_array() {
                        *slot = Value::Object(Map::new());
                    }
                    set_at(slot, rest, value);
                }
                None => *slot = value,
            }
        }
        other => {
            let mut map = Map::new();
            map.insert(head.to_string(), Value::Null);
            *other = Value::Object(map);
            set_at(other, path, value);
        }
    }
}

fn split_path(path: &str) -> Option<(&str, Option<&str>)> {
    if path.is_empty() {
        return None;
    }
    match path.split_once('.') {
        Some((head, rest)) => Some((head, Some(rest))),
        None => Some((path, None)),
    }
}

/// An empty-shape starting draft for a domain that has never been saved.
pub fn empty_draft(domain: ContentDomain) -> DocumentDraft {
    DocumentDraft::new(domain, fallback::default_document(domain))
}
