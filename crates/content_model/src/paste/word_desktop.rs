// Copyright 2024 New Vector Ltd.
// Copyright 2022 The Matrix.org Foundation C.I.C.
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Element-Commercial
// Please see LICENSE in the repository root for full details.

//! Word for desktop writes lists as plain paragraphs styled with
//! `mso-list: l<list> level<depth> lfo<override>`, prefixed by a span
//! holding the rendered bullet. These processors turn them back into list
//! items.

use once_cell::sync::Lazy;
use regex::Regex;

use super::BeforePasteEvent;
use crate::dom::{Element, HtmlDom, NodeId};
use crate::dom_to_model::processors::known_element_processor;
use crate::dom_to_model::DomToModelContext;
use crate::model::{
    create_list_item, create_list_level, Block, BlockGroupContainer,
    ListItem, ListLevel, ListType,
};

/// Dataset key tying the levels of one Word list together.
const WORD_LIST_ID: &str = "wordList";

static MSO_LIST: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\bl(\d+)\s+level(\d+)\s+lfo(\d+)").expect("invalid mso-list regex")
});

/// `1.`, `a)`, `(iv)` and the like.
static ORDERED_BULLET: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\(?(\d+|[a-zA-Z]|[ivxlcdmIVXLCDM]+)[.)]$").expect("invalid bullet regex")
});

#[derive(Clone, Debug, PartialEq, Eq)]
struct WordListInfo {
    list_id: String,
    depth: usize,
    list_type: ListType,
}

impl WordListInfo {
    fn parse(dom: &HtmlDom, node: NodeId, element: &Element) -> Option<Self> {
        let captures = MSO_LIST.captures(element.style().get("mso-list")?)?;
        let depth = captures.get(2)?.as_str().parse::<usize>().ok()?.max(1);
        let list_id = format!("{}-{}", &captures[1], &captures[3]);

        let bullet = dom
            .descendants(node)
            .into_iter()
            .find(|n| dom.element(*n).is_some_and(is_bullet_span))
            .map(|n| dom.text_content(n))
            .unwrap_or_default();
        let list_type = if ORDERED_BULLET.is_match(bullet.trim()) {
            ListType::Ordered
        } else {
            ListType::Unordered
        };

        Some(Self {
            list_id,
            depth,
            list_type,
        })
    }
}

fn is_bullet_span(element: &Element) -> bool {
    element.tag() == "span"
        && element
            .style()
            .get("mso-list")
            .is_some_and(|v| v.eq_ignore_ascii_case("ignore"))
}

/// Make the pasted fragment read Word list paragraphs as list items.
pub fn process_pasted_content(event: &mut BeforePasteEvent) {
    let option = std::mem::take(&mut event.dom_to_model_option);
    event.dom_to_model_option = option
        .with_processor("p", word_paragraph_processor)
        .with_processor("span", word_span_processor);
}

/// The last list item of `group`, ignoring the empty paragraphs that
/// separate blocks while reading.
fn previous_list_item(group: &dyn BlockGroupContainer) -> Option<&ListItem> {
    group
        .blocks()
        .iter()
        .rev()
        .find(|b| !b.as_paragraph().is_some_and(|p| p.segments.is_empty()))
        .and_then(Block::as_list_item)
}

fn levels_for(group: &dyn BlockGroupContainer, info: &WordListInfo) -> Vec<ListLevel> {
    let same_list = |level: &ListLevel| level.dataset.get(WORD_LIST_ID) == Some(&info.list_id);
    let mut levels: Vec<ListLevel> = previous_list_item(group)
        .filter(|item| item.levels.first().is_some_and(same_list))
        .map(|item| {
            item.levels
                .iter()
                .take(info.depth)
                .map(ListLevel::continued)
                .collect()
        })
        .unwrap_or_default();

    if levels.len() == info.depth
        && levels.last().is_some_and(|l| l.list_type != info.list_type)
    {
        levels.pop();
    }
    let is_new_list = levels.is_empty();
    while levels.len() < info.depth {
        let mut level = create_list_level(info.list_type, None);
        level.dataset.insert(WORD_LIST_ID.to_owned(), info.list_id.clone());
        if level.list_type == ListType::Ordered {
            level.format.thread.start_number_override = Some(1);
        }
        levels.push(level);
    }
    if is_new_list {
        tracing::trace!(list = %info.list_id, "new Word list");
    }
    levels
}

fn word_paragraph_processor(
    group: &mut dyn BlockGroupContainer,
    dom: &HtmlDom,
    node: NodeId,
    context: &mut DomToModelContext,
) {
    let info = dom
        .element(node)
        .and_then(|element| WordListInfo::parse(dom, node, element));
    let Some(info) = info else {
        if let Some(default) = context.default_element_processors.get("p").copied() {
            default(group, dom, node, context);
        }
        return;
    };

    let levels = levels_for(&*group, &info);
    let mut item = create_list_item(&levels, Some(&context.format.segment_format));
    known_element_processor(&mut item, dom, node, context);
    if let Some(Block::Paragraph(paragraph)) = item.blocks.first_mut() {
        paragraph.is_implicit = true;
        paragraph.format.margin.margin_left = None;
        paragraph.format.text_indent.text_indent = None;
    }
    group.blocks_mut().push(item.into());
}

/// Drops the span holding the bullet Word rendered itself.
fn word_span_processor(
    group: &mut dyn BlockGroupContainer,
    dom: &HtmlDom,
    node: NodeId,
    context: &mut DomToModelContext,
) {
    if dom.element(node).is_some_and(is_bullet_span) {
        return;
    }
    known_element_processor(group, dom, node, context);
}
