//! Page-level candidate merging.

use crate::types::{Candidate, ContactRecord};

/// Page-local identity rule: a shared normalized phone or a
/// case-insensitive email match identifies the same contact, ignoring the
/// name entirely, since fragments about one person often render the name
/// only once. Deliberately looser than the contact store's insertion rule
/// ([`crate::store::is_duplicate`]), which additionally requires name
/// agreement.
pub(crate) fn same_contact(a: &ContactRecord, b: &ContactRecord) -> bool {
    a.matches_phone(b) || a.matches_email(b)
}

/// Merge candidates across the whole page. The first-seen candidate in
/// traversal order survives; later matches donate any field the survivor
/// is missing, and their source elements are unioned.
pub(super) fn merge_candidates(candidates: Vec<Candidate>) -> Vec<Candidate> {
    let mut merged: Vec<Candidate> = Vec::new();
    for candidate in candidates {
        match merged
            .iter_mut()
            .find(|kept| same_contact(&kept.record, &candidate.record))
        {
            Some(kept) => absorb(kept, candidate),
            None => merged.push(candidate),
        }
    }
    merged
}

fn absorb(into: &mut Candidate, from: Candidate) {
    if into.record.name.is_empty() && !from.record.name.is_empty() {
        into.record.name = from.record.name;
    }
    if into.record.phone.is_empty() && !from.record.phone.is_empty() {
        into.record.phone = from.record.phone;
    }
    if into.record.email.is_empty() && !from.record.email.is_empty() {
        into.record.email = from.record.email;
    }
    for id in from.sources {
        if !into.sources.contains(&id) {
            into.sources.push(id);
        }
    }
}
