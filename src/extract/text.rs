//! Free-text pass and the field association heuristic.

use super::{direct_text, MIN_TEXT_LEN};
use crate::patterns;
use crate::types::{Candidate, ContactRecord};
use ego_tree::NodeId;
use scraper::{ElementRef, Html};
use std::collections::HashSet;

/// Tags whose content is never user-visible contact data.
const EXCLUDED_TAGS: &[&str] = &["script", "style", "noscript", "meta", "link", "head", "title"];

/// Class fragments that mark page chrome rather than content.
const CHROME_CLASS_HINTS: &[&str] = &["nav", "menu", "header", "footer", "sidebar"];

/// Pass B: scan every element not already consumed by the structured
/// pass, skipping non-content tags and chrome. Only the direct text of an
/// element is scanned, so nested markup is never read twice at different
/// tree levels.
pub(super) fn extract_from_free_text(doc: &Html, consumed: &HashSet<NodeId>) -> Vec<Candidate> {
    let mut out = Vec::new();
    visit(&doc.root_element(), consumed, &mut out);
    out
}

fn visit(el: &ElementRef<'_>, consumed: &HashSet<NodeId>, out: &mut Vec<Candidate>) {
    if consumed.contains(&el.id()) {
        return;
    }
    if EXCLUDED_TAGS.contains(&el.value().name()) {
        return;
    }
    if is_chrome(el) {
        return;
    }

    let text = direct_text(el);
    if text.chars().count() >= MIN_TEXT_LEN {
        for record in associate_block(&text) {
            out.push(Candidate::new(record, el.id()));
        }
    }
    for child in el.children().filter_map(ElementRef::wrap) {
        visit(&child, consumed, out);
    }
}

fn is_chrome(el: &ElementRef<'_>) -> bool {
    let Some(class) = el.value().attr("class") else {
        return false;
    };
    let class = class.to_lowercase();
    if CHROME_CLASS_HINTS.iter().any(|hint| class.contains(hint)) {
        return true;
    }
    // ad containers: "ad", "ads", "ad-banner", "advert" and friends
    class.split_whitespace().any(|token| {
        token == "ad"
            || token == "ads"
            || token.starts_with("ad-")
            || token.starts_with("ads-")
            || token.contains("advert")
    })
}

/// Run all three recognizers over one text block and associate the
/// results into candidate records.
pub(super) fn associate_block(text: &str) -> Vec<ContactRecord> {
    associate(
        patterns::extract_names(text),
        patterns::extract_phones(text),
        patterns::extract_emails(text),
    )
}

/// Field association heuristic for one text block:
/// 1. equal nonzero counts zip positionally ("N contacts with parallel
///    fields" enumerations);
/// 2. otherwise best-effort positional pairing, keeping only records with
///    a name and a contact method;
/// 3. otherwise orphan records, one per unmatched email and phone.
pub(super) fn associate(
    names: Vec<String>,
    phones: Vec<String>,
    emails: Vec<String>,
) -> Vec<ContactRecord> {
    if !names.is_empty() && names.len() == phones.len() && names.len() == emails.len() {
        return names
            .into_iter()
            .zip(phones)
            .zip(emails)
            .map(|((name, phone), email)| ContactRecord::new(name, phone, email))
            .collect();
    }

    let max = names.len().max(phones.len()).max(emails.len());
    let mut paired = Vec::new();
    for i in 0..max {
        let record = ContactRecord::new(
            names.get(i).cloned().unwrap_or_default(),
            phones.get(i).cloned().unwrap_or_default(),
            emails.get(i).cloned().unwrap_or_default(),
        );
        if !record.name.is_empty() && record.has_contact_method() {
            paired.push(record);
        }
    }
    if !paired.is_empty() {
        return paired;
    }

    let mut orphans = Vec::new();
    for email in emails {
        orphans.push(ContactRecord::new("", "", email));
    }
    for phone in phones {
        orphans.push(ContactRecord::new("", phone, ""));
    }
    orphans
}
