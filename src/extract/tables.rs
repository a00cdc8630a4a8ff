//! Table extraction: header-mapped, then cell-typed, then whole-row text.
//!
//! The fallback order is an explicit strategy list so it stays a visible,
//! testable contract: the first strategy producing any candidate for a
//! table wins and the rest are skipped.

use super::{element_text, is_viable, mark_consumed, text};
use crate::patterns::{self, is_email_header, is_name_header, is_phone_header};
use crate::selectors::{CELL_SELECTOR, ROW_SELECTOR, TABLE_SELECTOR};
use crate::types::{Candidate, ContactRecord};
use ego_tree::NodeId;
use scraper::{ElementRef, Html};
use std::collections::HashSet;

struct Row {
    cells: Vec<(NodeId, String)>,
}

impl Row {
    fn cell_ids(&self) -> Vec<NodeId> {
        self.cells.iter().map(|(id, _)| *id).collect()
    }
}

#[derive(Default)]
struct FieldColumns {
    name: Option<usize>,
    phone: Option<usize>,
    email: Option<usize>,
}

pub(super) fn extract_from_tables(doc: &Html, consumed: &mut HashSet<NodeId>) -> Vec<Candidate> {
    let mut out = Vec::new();
    for table in doc.select(&TABLE_SELECTOR) {
        // nested tables were consumed along with their outer table
        if consumed.contains(&table.id()) {
            continue;
        }
        mark_consumed(&table, consumed);
        let rows = collect_rows(&table);
        if rows.is_empty() {
            continue;
        }
        let strategies: [fn(&[Row]) -> Vec<Candidate>; 3] = [header_mapped, cell_typed, row_text];
        for strategy in strategies {
            let found = strategy(&rows);
            if !found.is_empty() {
                out.extend(found);
                break;
            }
        }
    }
    out
}

fn collect_rows(table: &ElementRef<'_>) -> Vec<Row> {
    table
        .select(&ROW_SELECTOR)
        .map(|tr| Row {
            cells: tr
                .select(&CELL_SELECTOR)
                .map(|cell| (cell.id(), element_text(&cell)))
                .collect(),
        })
        .filter(|row| !row.cells.is_empty())
        .collect()
}

/// Strategy 1: find a header row labeling name/phone/email columns and
/// map subsequent rows positionally, scanning the whole row for any field
/// the mapped cell did not yield.
fn header_mapped(rows: &[Row]) -> Vec<Candidate> {
    let Some((header_idx, cols)) = find_header(rows) else {
        return Vec::new();
    };
    let mut out = Vec::new();
    for row in &rows[header_idx + 1..] {
        let mut record = ContactRecord::default();
        if let Some((_, cell)) = cols.name.and_then(|i| row.cells.get(i)) {
            record.name = first_name(cell);
        }
        if let Some((_, cell)) = cols.phone.and_then(|i| row.cells.get(i)) {
            record.phone = first_phone(cell);
        }
        if let Some((_, cell)) = cols.email.and_then(|i| row.cells.get(i)) {
            record.email = first_email(cell);
        }
        fill_missing_from_cells(&mut record, row);
        if is_viable(&record) {
            out.push(Candidate {
                record,
                sources: row.cell_ids(),
            });
        }
    }
    out
}

fn find_header(rows: &[Row]) -> Option<(usize, FieldColumns)> {
    for (idx, row) in rows.iter().enumerate() {
        let mut cols = FieldColumns::default();
        for (i, (_, cell)) in row.cells.iter().enumerate() {
            // header labels are short words, never addresses or numbers
            if cell.contains('@') || cell.chars().any(|c| c.is_ascii_digit()) {
                continue;
            }
            if cols.name.is_none() && is_name_header(cell) {
                cols.name = Some(i);
            } else if cols.phone.is_none() && is_phone_header(cell) {
                cols.phone = Some(i);
            } else if cols.email.is_none() && is_email_header(cell) {
                cols.email = Some(i);
            }
        }
        if cols.name.is_some() || cols.phone.is_some() || cols.email.is_some() {
            return Some((idx, cols));
        }
    }
    None
}

/// Strategy 2: no usable header. Type each cell by its first successful
/// recognizer (email, then phone, then name) and associate same-row cells
/// by type.
fn cell_typed(rows: &[Row]) -> Vec<Candidate> {
    let mut out = Vec::new();
    for row in rows {
        let mut record = ContactRecord::default();
        for (_, cell) in &row.cells {
            if record.email.is_empty() {
                if let Some(email) = patterns::extract_emails(cell).into_iter().next() {
                    record.email = email;
                    continue;
                }
            }
            if record.phone.is_empty() {
                if let Some(phone) = patterns::extract_phones(cell).into_iter().next() {
                    record.phone = phone;
                    continue;
                }
            }
            if record.name.is_empty() {
                record.name = first_name(cell);
            }
        }
        // one type per cell means a mixed-content cell loses its name
        // here; rows that only half-resolve fall through to row_text
        if !record.name.is_empty() && record.has_contact_method() {
            out.push(Candidate {
                record,
                sources: row.cell_ids(),
            });
        }
    }
    out
}

/// Strategy 3: concatenate each row's text and run free-text extraction.
fn row_text(rows: &[Row]) -> Vec<Candidate> {
    let mut out = Vec::new();
    for row in rows {
        let joined = row
            .cells
            .iter()
            .map(|(_, cell)| cell.as_str())
            .collect::<Vec<_>>()
            .join(" ");
        for record in text::associate_block(&joined) {
            out.push(Candidate {
                record,
                sources: row.cell_ids(),
            });
        }
    }
    out
}

fn fill_missing_from_cells(record: &mut ContactRecord, row: &Row) {
    for (_, cell) in &row.cells {
        if record.name.is_empty() {
            record.name = first_name(cell);
        }
        if record.phone.is_empty() {
            record.phone = first_phone(cell);
        }
        if record.email.is_empty() {
            record.email = first_email(cell);
        }
    }
}

fn first_name(text: &str) -> String {
    patterns::extract_names(text).into_iter().next().unwrap_or_default()
}

fn first_phone(text: &str) -> String {
    patterns::extract_phones(text).into_iter().next().unwrap_or_default()
}

fn first_email(text: &str) -> String {
    patterns::extract_emails(text).into_iter().next().unwrap_or_default()
}
