//! Contact Store
//!
//! Owns the canonical set of accepted records for the current activation.
//! Insertion enforces the strict duplicate rule (name agreement plus a
//! matching contact method); persistence to the key-value collaborator is
//! a best-effort side channel and never fails an in-memory operation.


use crate::error::{GarimpoError, Result};
use crate::log::ActivityLogger;
use crate::patterns;
use crate::storage::{KeyValueStore, LocalFsStore, MemoryStore};
use crate::types::{
    ContactRecord, RestoreStrategy, SessionSnapshot, SnapshotDoc, SNAPSHOT_FORMAT,
};
use chrono::Utc;
use std::collections::BTreeMap;

/// Storage key for the live contact list.
pub const CONTACTS_KEY: &str = "garimpo.contacts";
/// Storage key for the session snapshot.
pub const SESSION_KEY: &str = "garimpo.session";

/// Insertion-time duplicate rule: same name (case/whitespace-insensitive)
/// AND a matching phone (digits only) or email (case-insensitive).
/// Stricter than the page extractor's merge rule on purpose: persisted
/// records must agree on the name before they are considered the same
/// person.
pub fn is_duplicate(a: &ContactRecord, b: &ContactRecord) -> bool {
    a.name_key() == b.name_key() && (a.matches_phone(b) || a.matches_email(b))
}

// Logging helper - ignores errors to not break store operations
fn log_storage_error(event: &str, details: &str) {
    if let Ok(logger) = ActivityLogger::new() {
        let _ = logger.error(None, event, Some(details));
    }
}

pub struct ContactBook<S: KeyValueStore> {
    contacts: Vec<ContactRecord>,
    storage: S,
    url: String,
}

impl ContactBook<MemoryStore> {
    pub fn in_memory(url: impl Into<String>) -> Self {
        Self::new(MemoryStore::new(), url)
    }
}

impl ContactBook<LocalFsStore> {
    pub fn open(url: impl Into<String>) -> Result<Self> {
        Ok(Self::new(LocalFsStore::new()?, url))
    }
}

impl<S: KeyValueStore> ContactBook<S> {
    /// Wrap a storage collaborator, loading whatever it already holds.
    /// Unreadable or corrupt stored state is logged and ignored.
    pub fn new(storage: S, url: impl Into<String>) -> Self {
        let mut book = Self {
            contacts: Vec::new(),
            storage,
            url: url.into(),
        };
        book.load();
        book
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /* ------------ CRUD ------------ */

    /// Validate, canonicalize, and append. `false` (and no mutation) on a
    /// malformed record or a duplicate of an existing one.
    pub fn add(&mut self, record: ContactRecord) -> bool {
        let accepted = self.insert_validated(record);
        if accepted {
            self.persist();
        }
        accepted
    }

    pub fn remove(&mut self, index: usize) -> bool {
        if index >= self.contacts.len() {
            return false;
        }
        self.contacts.remove(index);
        self.persist();
        true
    }

    /// Replace the record at `index`, re-validating and re-checking
    /// duplicates against the rest of the store (the slot itself is
    /// excluded from the check).
    pub fn update(&mut self, index: usize, record: ContactRecord) -> bool {
        if index >= self.contacts.len() {
            return false;
        }
        let mut record = record;
        if !canonicalize(&mut record) {
            return false;
        }
        if self
            .contacts
            .iter()
            .enumerate()
            .any(|(i, existing)| i != index && is_duplicate(existing, &record))
        {
            return false;
        }
        record.timestamp = Some(Utc::now());
        if record.source.is_empty() {
            record.source = self.url.clone();
        }
        self.contacts[index] = record;
        self.persist();
        true
    }

    /// Copy of the record at `index`; the live record stays private so
    /// store invariants cannot be bypassed.
    pub fn get(&self, index: usize) -> Option<ContactRecord> {
        self.contacts.get(index).cloned()
    }

    /// Copies of every record, in insertion order.
    pub fn get_all(&self) -> Vec<ContactRecord> {
        self.contacts.clone()
    }

    pub fn count(&self) -> usize {
        self.contacts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.contacts.is_empty()
    }

    pub fn clear(&mut self) {
        self.contacts.clear();
        self.persist();
    }

    /* ------------ session snapshots ------------ */

    /// Capture the live store plus caller-provided session data.
    pub fn save_session(&self, extra: BTreeMap<String, String>) -> Result<()> {
        let snapshot = SessionSnapshot {
            contacts: self.contacts.clone(),
            session_data: extra,
            timestamp: Utc::now(),
            url: self.url.clone(),
        };
        let json = serde_json::to_string(&snapshot)?;
        self.storage.set(SESSION_KEY, &json).map_err(|e| {
            log_storage_error("save_session", &e.to_string());
            e
        })
    }

    /// The stored snapshot, if any. Corrupt or unreadable snapshots are
    /// logged and reported as absent.
    pub fn load_session(&self) -> Option<SessionSnapshot> {
        match self.storage.get(SESSION_KEY) {
            Ok(Some(json)) => match serde_json::from_str(&json) {
                Ok(snapshot) => Some(snapshot),
                Err(e) => {
                    log_storage_error("load_session", &e.to_string());
                    None
                }
            },
            Ok(None) => None,
            Err(e) => {
                log_storage_error("load_session", &e.to_string());
                None
            }
        }
    }

    /// Bring session records into the live store. `Merge` adds only
    /// non-duplicates; `Replace` overwrites wholesale. Returns the number
    /// of records accepted, or `None` without a session.
    pub fn restore_session(&mut self, strategy: RestoreStrategy) -> Option<usize> {
        let snapshot = self.load_session()?;
        Some(self.apply_records(snapshot.contacts, strategy))
    }

    pub fn clear_session(&self) -> Result<()> {
        self.storage.remove(SESSION_KEY).map_err(|e| {
            log_storage_error("clear_session", &e.to_string());
            e
        })
    }

    pub fn has_session(&self) -> bool {
        matches!(self.storage.get(SESSION_KEY), Ok(Some(_)))
    }

    pub fn session_age_minutes(&self) -> Option<i64> {
        let snapshot = self.load_session()?;
        Some((Utc::now() - snapshot.timestamp).num_minutes())
    }

    /// Drop the session once it is older than `max_age_hours`. Returns
    /// whether a session was removed.
    pub fn cleanup_old_sessions(&self, max_age_hours: i64) -> bool {
        match self.session_age_minutes() {
            Some(age) if age >= max_age_hours * 60 => self.clear_session().is_ok(),
            _ => false,
        }
    }

    /* ------------ backup snapshots ------------ */

    /// Serialization round-trip for backup/restore, independent of the
    /// session mechanism.
    pub fn export_snapshot(&self) -> SnapshotDoc {
        SnapshotDoc::new(self.url.clone(), self.contacts.clone())
    }

    /// Import a backup document. Rejects unknown format tags; each record
    /// is re-validated on the way in.
    pub fn import_snapshot(&mut self, doc: SnapshotDoc, strategy: RestoreStrategy) -> Result<usize> {
        if doc.format != SNAPSHOT_FORMAT {
            return Err(GarimpoError::SnapshotFormat(doc.format));
        }
        Ok(self.apply_records(doc.contacts, strategy))
    }

    /* ------------ internals ------------ */

    fn apply_records(&mut self, records: Vec<ContactRecord>, strategy: RestoreStrategy) -> usize {
        if strategy == RestoreStrategy::Replace {
            self.contacts.clear();
        }
        let mut accepted = 0;
        for record in records {
            if self.insert_validated(record) {
                accepted += 1;
            }
        }
        self.persist();
        accepted
    }

    fn insert_validated(&mut self, mut record: ContactRecord) -> bool {
        if !canonicalize(&mut record) {
            return false;
        }
        if self.contacts.iter().any(|c| is_duplicate(c, &record)) {
            return false;
        }
        if record.timestamp.is_none() {
            record.timestamp = Some(Utc::now());
        }
        if record.source.is_empty() {
            record.source = self.url.clone();
        }
        self.contacts.push(record);
        true
    }

    fn load(&mut self) {
        match self.storage.get(CONTACTS_KEY) {
            Ok(Some(json)) => match serde_json::from_str(&json) {
                Ok(contacts) => self.contacts = contacts,
                Err(e) => log_storage_error("load_contacts", &e.to_string()),
            },
            Ok(None) => {}
            Err(e) => log_storage_error("load_contacts", &e.to_string()),
        }
    }

    /// Best-effort write-through; the in-memory list stays authoritative
    /// when storage is unavailable.
    fn persist(&self) {
        let result = serde_json::to_string(&self.contacts)
            .map_err(GarimpoError::from)
            .and_then(|json| self.storage.set(CONTACTS_KEY, &json));
        if let Err(e) = result {
            log_storage_error("persist_contacts", &e.to_string());
        }
    }
}

/// Shared validation for `add`/`update`/restore: canonicalize every
/// present field and require at least one contact method. A record with
/// phone or email but no name is an acceptable orphan; a bare name is
/// not.
fn canonicalize(record: &mut ContactRecord) -> bool {
    if record.name.trim().is_empty() {
        record.name.clear();
    } else {
        match patterns::format_name(&record.name) {
            Some(name) => record.name = name,
            None => return false,
        }
    }

    if record.phone.trim().is_empty() {
        record.phone.clear();
    } else {
        match patterns::format_phone(&record.phone) {
            Some(phone) => record.phone = phone,
            None => return false,
        }
    }

    if record.email.trim().is_empty() {
        record.email.clear();
    } else {
        let email = record.email.trim().to_lowercase();
        if !patterns::validate_email(&email) {
            return false;
        }
        record.email = email;
    }

    record.has_contact_method()
}
