// Copyright 2024 New Vector Ltd.
// Copyright 2022 The Matrix.org Foundation C.I.C.
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Element-Commercial
// Please see LICENSE in the repository root for full details.

//! Element processors: one function per kind of DOM node, looked up by tag
//! name in the context so callers can replace any of them.

pub mod block;
pub mod child;
pub mod element;
pub mod entity;
pub mod inline;
pub mod list;
pub mod table;
pub mod text;

use once_cell::sync::Lazy;

use crate::dom::{HtmlDom, NodeId};
use crate::format::default_styles::display_of;
use crate::model::BlockGroupContainer;

use super::context::DomToModelContext;
use super::options::{ElementProcessor, ElementProcessorMap};

pub use block::{block_processor, format_container_processor};
pub use child::child_processor;
pub use element::{element_processor, general_processor, known_element_processor};
pub use entity::entity_processor;
pub use inline::{br_processor, code_processor, hr_processor, image_processor, link_processor};
pub use list::{list_item_processor, list_processor};
pub use table::table_processor;
pub use text::text_processor;

/// Inline tags whose meaning is fully captured by their style.
const KNOWN_INLINE_TAGS: &[&str] = &[
    "span", "b", "strong", "i", "em", "u", "ins", "s", "strike", "del", "sub",
    "sup", "small", "big", "label", "mark",
];

/// Block tags read as plain paragraphs (or format containers).
const KNOWN_BLOCK_TAGS: &[&str] = &[
    "div", "center", "article", "aside", "section", "header", "footer", "main",
    "nav", "address", "figure", "figcaption", "dd", "dt", "dl",
];

/// Tags whose content never becomes editable text.
const SKIPPED_TAGS: &[&str] =
    &["script", "style", "head", "meta", "title", "template", "link"];

fn skip_processor(
    _group: &mut dyn BlockGroupContainer,
    _dom: &HtmlDom,
    _node: NodeId,
    _context: &mut DomToModelContext,
) {
}

pub static DEFAULT_ELEMENT_PROCESSORS: Lazy<ElementProcessorMap> = Lazy::new(|| {
    let mut map = ElementProcessorMap::new();
    let mut add = |key: &str, processor: ElementProcessor| {
        map.insert(key.to_owned(), processor);
    };

    add("#text", text_processor);
    add("child", child_processor);
    add("element", element_processor);
    add("entity", entity_processor);
    add("general", general_processor);
    add("*", general_processor);

    for tag in KNOWN_INLINE_TAGS.iter().chain(KNOWN_BLOCK_TAGS) {
        add(*tag, known_element_processor);
    }
    for tag in SKIPPED_TAGS {
        add(*tag, skip_processor);
    }
    for tag in ["p", "h1", "h2", "h3", "h4", "h5", "h6"] {
        add(tag, block_processor);
    }
    add("blockquote", format_container_processor);
    add("pre", format_container_processor);
    add("br", br_processor);
    add("img", image_processor);
    add("hr", hr_processor);
    add("a", link_processor);
    add("code", code_processor);
    add("ol", list_processor);
    add("ul", list_processor);
    add("li", list_item_processor);
    add("table", table_processor);
    map
});

/// Run the processor registered under `key`, falling back to the default
/// one when the caller removed it.
pub fn process(
    key: &str,
    group: &mut dyn BlockGroupContainer,
    dom: &HtmlDom,
    node: NodeId,
    context: &mut DomToModelContext,
) {
    let processor = context
        .processor(key)
        .or_else(|| context.default_element_processors.get(key).copied());
    if let Some(processor) = processor {
        processor(group, dom, node, context);
    }
}

/// Display of `node`, from its inline style or the default style of its tag.
pub(crate) fn node_display(dom: &HtmlDom, node: NodeId, context: &DomToModelContext) -> String {
    match dom.element(node) {
        Some(element) => {
            let default_style = context.default_style(element.tag());
            display_of(element, &default_style).to_owned()
        }
        None => "inline".to_owned(),
    }
}
