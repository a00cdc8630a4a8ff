use crate::extract;
use crate::storage::KeyValueStore;
use crate::store::ContactBook;
use crate::types::ScanReport;
use crate::{GarimpoError, Result};
use chrono::Utc;
use std::time::Instant;
use url::Url;

// Helper function for logging - ignores errors to not break main operations
fn log_info(source: Option<&str>, event: &str, details: Option<&str>) -> crate::Result<()> {
    match crate::log::ActivityLogger::new() {
        Ok(logger) => logger.info(source, event, details),
        Err(_) => Ok(()), // Silently ignore logging errors
    }
}

fn log_error(source: Option<&str>, event: &str, details: Option<&str>) -> crate::Result<()> {
    match crate::log::ActivityLogger::new() {
        Ok(logger) => logger.error(source, event, details),
        Err(_) => Ok(()), // Silently ignore logging errors
    }
}

/* ------------ scan entrypoints ------------ */

/// Scan a rendered page and report what it holds, without touching any
/// store.
pub fn scan_html(html: &str, url: &str) -> Result<ScanReport> {
    let start_time = Instant::now();
    let url = match Url::parse(url) {
        Ok(u) => u,
        Err(_) => {
            let _ = log_error(Some(url), "scan_html", Some("invalid url"));
            return Err(GarimpoError::Other(format!("invalid url: {url}")));
        }
    };

    let outcome = extract::extract_contacts(html, url.as_str());
    let duration = start_time.elapsed();
    let details = format!(
        "{} records in {}ms",
        outcome.records.len(),
        duration.as_millis()
    );
    let _ = log_info(Some(url.as_str()), "scan_html", Some(&details));

    Ok(ScanReport {
        url: url.to_string(),
        records: outcome.records,
        confidence: outcome.confidence,
        scanned_at: Utc::now(),
    })
}

/// Scan a page and collect the results straight into a contact store.
/// Returns how many records the store accepted; duplicates and malformed
/// candidates are dropped silently.
pub fn scan_into<S: KeyValueStore>(book: &mut ContactBook<S>, html: &str) -> Result<usize> {
    let start_time = Instant::now();
    let report = scan_html(html, book.url())?;

    let mut accepted = 0;
    for record in report.records {
        if book.add(record) {
            accepted += 1;
        }
    }

    let duration = start_time.elapsed();
    let details = format!("accepted {accepted} in {}ms", duration.as_millis());
    let _ = log_info(Some(book.url()), "scan_into", Some(&details));
    Ok(accepted)
}
