//! Highlighting
//!
//! Marks and unmarks the page elements backing extracted records. The
//! parse tree here is read-only, so side effects are expressed as
//! [`DomOp`] values for a host-page applier: class toggles per element
//! and a stylesheet injected exactly once under a well-known id.

use ego_tree::NodeId;
use std::collections::HashSet;

/// Class added to every highlighted element.
pub const HIGHLIGHT_CLASS: &str = "garimpo-highlight";

/// Id of the injected `<style>` element, used to guarantee single
/// injection and full removal.
pub const STYLE_ELEMENT_ID: &str = "garimpo-highlight-style";

/// Rules injected once per page.
pub const HIGHLIGHT_CSS: &str =
    ".garimpo-highlight { outline: 2px solid #f90; background: rgba(255, 153, 0, 0.15); }";

/// A single DOM side effect for the host page to apply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomOp {
    InjectStyle {
        element_id: &'static str,
        css: &'static str,
    },
    RemoveStyle {
        element_id: &'static str,
    },
    AddClass {
        node: NodeId,
        class: &'static str,
    },
    RemoveClass {
        node: NodeId,
        class: &'static str,
    },
}

/// Tracks which elements are currently highlighted so they can all be
/// cleared in one call. Idempotent: re-highlighting an element or
/// clearing a clean page emits no ops.
#[derive(Debug, Default)]
pub struct Highlighter {
    highlighted: HashSet<NodeId>,
    style_injected: bool,
}

impl Highlighter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark the given elements, injecting the stylesheet on first use.
    pub fn highlight(&mut self, nodes: &[NodeId]) -> Vec<DomOp> {
        let mut ops = Vec::new();
        for &node in nodes {
            if self.highlighted.insert(node) {
                if !self.style_injected {
                    self.style_injected = true;
                    ops.push(DomOp::InjectStyle {
                        element_id: STYLE_ELEMENT_ID,
                        css: HIGHLIGHT_CSS,
                    });
                }
                ops.push(DomOp::AddClass {
                    node,
                    class: HIGHLIGHT_CLASS,
                });
            }
        }
        ops
    }

    /// Unmark everything currently highlighted; the stylesheet stays for
    /// later highlights.
    pub fn unhighlight(&mut self) -> Vec<DomOp> {
        let mut ops: Vec<DomOp> = self
            .highlighted
            .drain()
            .map(|node| DomOp::RemoveClass {
                node,
                class: HIGHLIGHT_CLASS,
            })
            .collect();
        // drain order is unspecified; keep the op list deterministic
        ops.sort_by_key(|op| format!("{op:?}"));
        ops
    }

    /// Remove every lingering class and the injected stylesheet.
    pub fn teardown(&mut self) -> Vec<DomOp> {
        let mut ops = self.unhighlight();
        if self.style_injected {
            self.style_injected = false;
            ops.push(DomOp::RemoveStyle {
                element_id: STYLE_ELEMENT_ID,
            });
        }
        ops
    }

    pub fn is_highlighted(&self, node: NodeId) -> bool {
        self.highlighted.contains(&node)
    }

    pub fn count(&self) -> usize {
        self.highlighted.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use scraper::Html;

    fn some_nodes(n: usize) -> Vec<NodeId> {
        let doc = Html::parse_document("<p>a</p><p>b</p><p>c</p><p>d</p>");
        doc.root_element()
            .descendants()
            .map(|node| node.id())
            .take(n)
            .collect()
    }

    #[test]
    fn style_is_injected_exactly_once() {
        let mut hl = Highlighter::new();
        let nodes = some_nodes(3);
        let ops = hl.highlight(&nodes);
        let injections = ops
            .iter()
            .filter(|op| matches!(op, DomOp::InjectStyle { .. }))
            .count();
        assert_eq!(injections, 1);
        // later highlights reuse the stylesheet
        let more = some_nodes(4);
        let ops = hl.highlight(&more[3..]);
        assert!(ops
            .iter()
            .all(|op| !matches!(op, DomOp::InjectStyle { .. })));
    }

    #[test]
    fn highlighting_is_idempotent() {
        let mut hl = Highlighter::new();
        let nodes = some_nodes(2);
        let first = hl.highlight(&nodes);
        assert_eq!(first.len(), 3); // inject + 2 classes
        let second = hl.highlight(&nodes);
        assert!(second.is_empty());
        assert!(nodes.iter().all(|&node| hl.is_highlighted(node)));
        assert_eq!(hl.count(), 2);
    }

    #[test]
    fn unhighlight_clears_everything_in_one_call() {
        let mut hl = Highlighter::new();
        let nodes = some_nodes(3);
        hl.highlight(&nodes);
        let ops = hl.unhighlight();
        assert_eq!(ops.len(), 3);
        assert_eq!(hl.count(), 0);
        assert!(nodes.iter().all(|&node| !hl.is_highlighted(node)));
        assert!(hl.unhighlight().is_empty());
    }

    #[test]
    fn teardown_removes_classes_and_stylesheet() {
        let mut hl = Highlighter::new();
        let nodes = some_nodes(2);
        hl.highlight(&nodes);
        let ops = hl.teardown();
        assert!(ops.contains(&DomOp::RemoveStyle {
            element_id: STYLE_ELEMENT_ID
        }));
        assert_eq!(hl.count(), 0);
        // tearing down a clean highlighter is a no-op
        assert!(hl.teardown().is_empty());
    }
}
