//! Page Extractor
//!
//! Walks an HTML parse tree and produces deduplicated contact candidates
//! plus the elements backing each, for downstream highlighting. Two
//! passes: structured data (tables, lists, definition lists) first, then
//! free text over everything the structured pass did not consume, merged
//! at page level. A failure inside one substructure skips only that
//! substructure; the entry point never propagates an error for data-shape
//! problems.

mod lists;
pub(crate) mod merge;
mod tables;
mod text;

#[cfg(test)]
mod tests;

use crate::types::{Candidate, ContactRecord, ExtractOutcome};
use chrono::Utc;
use ego_tree::NodeId;
use scraper::{ElementRef, Html, Node};
use std::collections::HashSet;

/// Minimum direct-text length worth scanning in the free-text pass.
const MIN_TEXT_LEN: usize = 5;

/// A parsed page ready for extraction. Node ids in the outcome are valid
/// against this scan's document.
pub struct PageScan {
    doc: Html,
    url: String,
}

impl PageScan {
    pub fn parse(html: &str, url: &str) -> Self {
        Self {
            doc: Html::parse_document(html),
            url: url.to_string(),
        }
    }

    pub fn document(&self) -> &Html {
        &self.doc
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Run both passes and the page-level merge. Re-extraction is an
    /// explicit repeated call; the document is read once at parse time.
    pub fn extract(&self) -> ExtractOutcome {
        let mut consumed: HashSet<NodeId> = HashSet::new();
        let candidates: Vec<Candidate> = crate::merge!(
            tables::extract_from_tables(&self.doc, &mut consumed),
            lists::extract_from_lists(&self.doc, &mut consumed),
            lists::extract_from_dls(&self.doc, &mut consumed),
            text::extract_from_free_text(&self.doc, &consumed),
        );

        let merged = merge::merge_candidates(candidates);

        let now = Utc::now();
        let mut records = Vec::with_capacity(merged.len());
        let mut source_elements = Vec::with_capacity(merged.len());
        for mut candidate in merged {
            candidate.record.source = self.url.clone();
            candidate.record.timestamp = Some(now);
            source_elements.push(candidate.sources);
            records.push(candidate.record);
        }
        let confidence = confidence_of(&records);
        ExtractOutcome {
            records,
            source_elements,
            confidence,
        }
    }
}

/// Parse and extract in one call.
pub fn extract_contacts(html: &str, url: &str) -> ExtractOutcome {
    PageScan::parse(html, url).extract()
}

/// Mean per-record completeness, 0.0 for an empty page.
fn confidence_of(records: &[ContactRecord]) -> f64 {
    if records.is_empty() {
        return 0.0;
    }
    records.iter().map(|r| r.completeness()).sum::<f64>() / records.len() as f64
}

/* ------------ helpers shared by the passes ------------ */

/// A candidate is worth keeping only with at least one contact method;
/// a bare name can never be accepted downstream.
pub(crate) fn is_viable(record: &ContactRecord) -> bool {
    record.has_contact_method()
}

/// Full rendered text of an element, trimmed.
pub(crate) fn element_text(el: &ElementRef<'_>) -> String {
    el.text().collect::<String>().trim().to_string()
}

/// Only the direct text-node children of an element, so the free-text
/// pass never reads the same text at two tree levels.
pub(crate) fn direct_text(el: &ElementRef<'_>) -> String {
    let mut out = String::new();
    for child in el.children() {
        if let Node::Text(t) = child.value() {
            out.push_str(t);
        }
    }
    out.trim().to_string()
}

/// Mark an element and its whole subtree as consumed by the structured
/// pass.
pub(crate) fn mark_consumed(el: &ElementRef<'_>, consumed: &mut HashSet<NodeId>) {
    for node in el.descendants() {
        consumed.insert(node.id());
    }
}
