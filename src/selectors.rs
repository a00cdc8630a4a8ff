//! Shared Selectors

use once_cell::sync::Lazy;
use scraper::Selector;

/// Selector for `<table>` elements.
pub static TABLE_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("table").expect("valid table selector"));

/// Selector for table rows.
pub static ROW_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("tr").expect("valid row selector"));

/// Selector for table cells, header or data.
pub static CELL_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("td, th").expect("valid cell selector"));

/// Selector for ordered and unordered lists.
pub static LIST_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("ul, ol").expect("valid list selector"));

/// Selector for definition lists.
pub static DL_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("dl").expect("valid dl selector"));

/// Selector for `mailto:` anchors.
pub static MAILTO_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse(r#"a[href^="mailto:"]"#).expect("valid mailto selector"));

/// Selector for `tel:` anchors.
pub static TEL_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse(r#"a[href^="tel:"]"#).expect("valid tel selector"));
