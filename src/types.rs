use chrono::{DateTime, Utc};
use ego_tree::NodeId;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A reviewed or candidate contact. Fields are stored in canonical form:
/// `(AA) 9XXXX-XXXX` / `(AA) XXXX-XXXX` phones, lowercase emails, names
/// capitalized with Portuguese particles kept lowercase.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct ContactRecord {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub email: String,
    /// Origin page URL at extraction time.
    #[serde(default)]
    pub source: String,
    /// Extraction or last-update instant. Filled in by the store on `add`
    /// when absent.
    #[serde(default)]
    pub timestamp: Option<DateTime<Utc>>,
}

impl ContactRecord {
    pub fn new(
        name: impl Into<String>,
        phone: impl Into<String>,
        email: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            phone: phone.into(),
            email: email.into(),
            ..Self::default()
        }
    }

    /// Case- and whitespace-insensitive name key for duplicate checks.
    pub fn name_key(&self) -> String {
        self.name
            .split_whitespace()
            .collect::<Vec<_>>()
            .join(" ")
            .to_lowercase()
    }

    /// Digits-only phone for comparisons across formatting variants.
    pub fn phone_digits(&self) -> String {
        self.phone.chars().filter(|c| c.is_ascii_digit()).collect()
    }

    pub fn email_key(&self) -> String {
        self.email.trim().to_lowercase()
    }

    pub fn has_contact_method(&self) -> bool {
        !self.phone.is_empty() || !self.email.is_empty()
    }

    pub fn matches_phone(&self, other: &ContactRecord) -> bool {
        let (a, b) = (self.phone_digits(), other.phone_digits());
        !a.is_empty() && a == b
    }

    pub fn matches_email(&self, other: &ContactRecord) -> bool {
        let (a, b) = (self.email_key(), other.email_key());
        !a.is_empty() && a == b
    }

    /// Per-record completeness score: name 0.4, phone 0.3, email 0.3.
    pub fn completeness(&self) -> f64 {
        let mut score = 0.0;
        if !self.name.is_empty() {
            score += 0.4;
        }
        if !self.phone.is_empty() {
            score += 0.3;
        }
        if !self.email.is_empty() {
            score += 0.3;
        }
        score
    }
}

/// A candidate produced by the page extractor, tagged with the elements it
/// came from so the highlighter can mark them.
#[derive(Debug, Clone)]
pub struct Candidate {
    pub record: ContactRecord,
    pub sources: Vec<NodeId>,
}

impl Candidate {
    pub fn new(record: ContactRecord, source: NodeId) -> Self {
        Self {
            record,
            sources: vec![source],
        }
    }
}

/// Result of one extraction pass over a page. `source_elements[i]` backs
/// `records[i]`.
#[derive(Debug, Clone, Default)]
pub struct ExtractOutcome {
    pub records: Vec<ContactRecord>,
    pub source_elements: Vec<Vec<NodeId>>,
    pub confidence: f64,
}

impl ExtractOutcome {
    pub fn empty() -> Self {
        Self::default()
    }
}

/// Serializable view of an extraction, for the API facade and CLI.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanReport {
    pub url: String,
    pub records: Vec<ContactRecord>,
    pub confidence: f64,
    pub scanned_at: DateTime<Utc>,
}

/// Point-in-time export of the contact store for persistence across page
/// reloads.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionSnapshot {
    pub contacts: Vec<ContactRecord>,
    #[serde(default)]
    pub session_data: BTreeMap<String, String>,
    pub timestamp: DateTime<Utc>,
    pub url: String,
}

/// Format tag for backup snapshots; importers reject anything else.
pub const SNAPSHOT_FORMAT: &str = "garimpo.snapshot.v1";

/// Backup/restore document, independent of the session mechanism.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SnapshotDoc {
    pub format: String,
    pub exported_at: DateTime<Utc>,
    pub url: String,
    pub contacts: Vec<ContactRecord>,
}

impl SnapshotDoc {
    pub fn new(url: impl Into<String>, contacts: Vec<ContactRecord>) -> Self {
        Self {
            format: SNAPSHOT_FORMAT.to_string(),
            exported_at: Utc::now(),
            url: url.into(),
            contacts,
        }
    }
}

/// How session/snapshot records land in the live store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RestoreStrategy {
    /// Overwrite the live store wholesale.
    Replace,
    /// Add only records that are not duplicates of live ones.
    Merge,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub ok: bool,
    pub data: Option<T>,
    pub error: Option<String>,
}
impl<T> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        Self {
            ok: true,
            data: Some(data),
            error: None,
        }
    }
    pub fn err(msg: impl Into<String>) -> Self {
        Self {
            ok: false,
            data: None,
            error: Some(msg.into()),
        }
    }
}
