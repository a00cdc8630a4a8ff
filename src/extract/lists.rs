//! List (`ul`/`ol`) and definition-list (`dl`) extraction.

use super::{element_text, is_viable, mark_consumed, text};
use crate::patterns::{self, is_email_header, is_name_header, is_phone_header};
use crate::selectors::{DL_SELECTOR, LIST_SELECTOR, MAILTO_SELECTOR, TEL_SELECTOR};
use crate::types::{Candidate, ContactRecord};
use ego_tree::NodeId;
use scraper::{ElementRef, Html};
use std::collections::HashSet;

pub(super) fn extract_from_lists(doc: &Html, consumed: &mut HashSet<NodeId>) -> Vec<Candidate> {
    let mut out = Vec::new();
    for list in doc.select(&LIST_SELECTOR) {
        if consumed.contains(&list.id()) {
            continue;
        }
        mark_consumed(&list, consumed);
        for item in list
            .children()
            .filter_map(ElementRef::wrap)
            .filter(|el| el.value().name() == "li")
        {
            out.extend(scan_list_item(&item));
        }
    }
    out
}

/// One list item: exploit semantic hints first. `mailto:`/`tel:` anchors
/// carry the address in the href, which beats whatever the link renders
/// as; headings, `strong`/`b` and "name"/"nome" classes hint names;
/// "phone"/"telefone"/"tel" and "email"/"mail" classes hint the other
/// fields. Without any hint, fall back to free-text extraction over the
/// item's full text.
fn scan_list_item(item: &ElementRef<'_>) -> Vec<Candidate> {
    let mut record = ContactRecord::default();
    let mut hinted = false;

    for anchor in item.select(&MAILTO_SELECTOR) {
        if !record.email.is_empty() {
            break;
        }
        if let Some(addr) = anchor
            .value()
            .attr("href")
            .and_then(|href| href.strip_prefix("mailto:"))
        {
            let addr = addr.split('?').next().unwrap_or(addr).to_lowercase();
            if patterns::validate_email(&addr) {
                record.email = addr;
                hinted = true;
            }
        }
    }
    for anchor in item.select(&TEL_SELECTOR) {
        if !record.phone.is_empty() {
            break;
        }
        if let Some(number) = anchor
            .value()
            .attr("href")
            .and_then(|href| href.strip_prefix("tel:"))
        {
            if let Some(phone) = patterns::format_phone(number) {
                record.phone = phone;
                hinted = true;
            }
        }
    }

    for el in item.descendants().skip(1).filter_map(ElementRef::wrap) {
        let tag = el.value().name();
        let class = el.value().attr("class").unwrap_or("").to_lowercase();

        let text = element_text(&el);
        if text.is_empty() {
            continue;
        }
        let name_hint = matches!(tag, "h1" | "h2" | "h3" | "h4" | "h5" | "h6" | "strong" | "b")
            || class.contains("name")
            || class.contains("nome");
        if record.name.is_empty() && name_hint {
            if let Some(name) = patterns::extract_names(&text).into_iter().next() {
                record.name = name;
                hinted = true;
                continue;
            }
        }
        if record.phone.is_empty()
            && (class.contains("phone") || class.contains("telefone") || class.contains("tel"))
        {
            if let Some(phone) = patterns::extract_phones(&text).into_iter().next() {
                record.phone = phone;
                hinted = true;
                continue;
            }
        }
        if record.email.is_empty() && (class.contains("email") || class.contains("mail")) {
            if let Some(email) = patterns::extract_emails(&text).into_iter().next() {
                record.email = email;
                hinted = true;
            }
        }
    }

    if hinted {
        // hints may cover only part of the record; scan the item's full
        // text for whatever is still missing
        let full = element_text(item);
        if record.name.is_empty() {
            record.name = patterns::extract_names(&full).into_iter().next().unwrap_or_default();
        }
        if record.phone.is_empty() {
            record.phone = patterns::extract_phones(&full).into_iter().next().unwrap_or_default();
        }
        if record.email.is_empty() {
            record.email = patterns::extract_emails(&full).into_iter().next().unwrap_or_default();
        }
        if is_viable(&record) {
            return vec![Candidate::new(record, item.id())];
        }
        return Vec::new();
    }

    text::associate_block(&element_text(item))
        .into_iter()
        .map(|record| Candidate::new(record, item.id()))
        .collect()
}

#[derive(Clone, Copy)]
enum DlField {
    Name,
    Phone,
    Email,
    Unknown,
}

/// Walk `dt`/`dd` pairs in document order, accumulating a single record
/// for the whole list: the first non-empty value wins per field.
pub(super) fn extract_from_dls(doc: &Html, consumed: &mut HashSet<NodeId>) -> Vec<Candidate> {
    let mut out = Vec::new();
    for dl in doc.select(&DL_SELECTOR) {
        if consumed.contains(&dl.id()) {
            continue;
        }
        mark_consumed(&dl, consumed);

        let mut record = ContactRecord::default();
        let mut label = DlField::Unknown;
        for child in dl.children().filter_map(ElementRef::wrap) {
            match child.value().name() {
                "dt" => {
                    let term = element_text(&child);
                    label = if is_name_header(&term) {
                        DlField::Name
                    } else if is_phone_header(&term) {
                        DlField::Phone
                    } else if is_email_header(&term) {
                        DlField::Email
                    } else {
                        DlField::Unknown
                    };
                }
                "dd" => {
                    let text = element_text(&child);
                    match label {
                        DlField::Name if record.name.is_empty() => {
                            record.name = patterns::extract_names(&text)
                                .into_iter()
                                .next()
                                .unwrap_or_default();
                        }
                        DlField::Phone if record.phone.is_empty() => {
                            record.phone = patterns::extract_phones(&text)
                                .into_iter()
                                .next()
                                .unwrap_or_default();
                        }
                        DlField::Email if record.email.is_empty() => {
                            record.email = patterns::extract_emails(&text)
                                .into_iter()
                                .next()
                                .unwrap_or_default();
                        }
                        DlField::Unknown => {
                            if record.email.is_empty() {
                                record.email = patterns::extract_emails(&text)
                                    .into_iter()
                                    .next()
                                    .unwrap_or_default();
                            }
                            if record.phone.is_empty() {
                                record.phone = patterns::extract_phones(&text)
                                    .into_iter()
                                    .next()
                                    .unwrap_or_default();
                            }
                            if record.name.is_empty() {
                                record.name = patterns::extract_names(&text)
                                    .into_iter()
                                    .next()
                                    .unwrap_or_default();
                            }
                        }
                        _ => {}
                    }
                }
                _ => {}
            }
        }
        if is_viable(&record) {
            out.push(Candidate::new(record, dl.id()));
        }
    }
    out
}
