//! Small scraper-based helpers shared by the site extractors.
//!
//! Every lookup degrades to `None` / empty rather than erroring; selector
//! misses are an expected condition on evolving markup.

use ego_tree::NodeId;
use regex::Regex;
use scraper::{ElementRef, Html, Selector};

/// Parse a CSS selector that is a compile-time constant.
pub(crate) fn css(selector: &str) -> Selector {
    Selector::parse(selector).expect("static css selector")
}

/// Whether `el` still hangs off the document root. Detaching a subtree only
/// unlinks it from the tree; `Html::select` walks the whole node arena, so
/// detached elements would otherwise keep matching lookups.
fn is_attached(doc: &Html, el: &ElementRef<'_>) -> bool {
    el.ancestors().last().map(|n| n.id()) == Some(doc.tree.root().id())
}

/// First attached element matching `selector`, in document order.
pub(crate) fn first<'a>(doc: &'a Html, selector: &str) -> Option<ElementRef<'a>> {
    doc.select(&css(selector)).find(|el| is_attached(doc, el))
}

/// First attached element among `tags` whose class attribute matches
/// `pattern`. Tags are tried in the given order, each searched in document
/// order.
pub(crate) fn first_by_class<'a>(
    doc: &'a Html,
    tags: &[&str],
    pattern: &Regex,
) -> Option<ElementRef<'a>> {
    for tag in tags {
        let sel = css(tag);
        let found = doc.select(&sel).find(|el| {
            is_attached(doc, el)
                && el
                    .value()
                    .attr("class")
                    .is_some_and(|class| pattern.is_match(class))
        });
        if found.is_some() {
            return found;
        }
    }
    None
}

/// Element text with each fragment trimmed, joined with line breaks.
pub(crate) fn text_with_breaks(el: ElementRef<'_>) -> String {
    el.text()
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

/// Element text with each fragment trimmed and concatenated.
pub(crate) fn text_concat(el: ElementRef<'_>) -> String {
    el.text().map(str::trim).filter(|t| !t.is_empty()).collect()
}

/// Detach every element named in `tags` from the whole document.
pub(crate) fn strip_tags(doc: &mut Html, tags: &[&str]) {
    let doomed: Vec<NodeId> = doc
        .tree
        .nodes()
        .filter(|node| {
            node.value()
                .as_element()
                .is_some_and(|el| tags.contains(&el.name()))
        })
        .map(|node| node.id())
        .collect();
    detach_all(doc, doomed);
}

/// Detach every element named in `tags` underneath `root`.
pub(crate) fn strip_tags_under(doc: &mut Html, root: NodeId, tags: &[&str]) {
    let doomed: Vec<NodeId> = match doc.tree.get(root) {
        Some(node) => node
            .descendants()
            .filter(|node| {
                node.value()
                    .as_element()
                    .is_some_and(|el| tags.contains(&el.name()))
            })
            .map(|node| node.id())
            .collect(),
        None => return,
    };
    detach_all(doc, doomed);
}

fn detach_all(doc: &mut Html, ids: Vec<NodeId>) {
    for id in ids {
        if let Some(mut node) = doc.tree.get_mut(id) {
            node.detach();
        }
    }
}
