// Copyright 2024 New Vector Ltd.
// Copyright 2022 The Matrix.org Foundation C.I.C.
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Element-Commercial
// Please see LICENSE in the repository root for full details.

use crate::dom::{split_at_utf16, utf16_len, HtmlDom, NodeId};
use crate::model::{add_segment, create_text, Block, BlockGroupContainer};

use crate::dom_to_model::context::DomToModelContext;
use crate::dom_to_model::utils::{
    add_decorators, add_selection_marker, is_whitespace_only, parent_tag,
};

/// Add a text node, splitting it where the selection starts or ends inside
/// it. Offsets count UTF-16 code units.
pub fn text_processor(
    group: &mut dyn BlockGroupContainer,
    dom: &HtmlDom,
    node: NodeId,
    context: &mut DomToModelContext,
) {
    let Some(text) = dom.text(node) else {
        return;
    };
    if is_whitespace_only(text) && matches!(parent_tag(dom, node), Some("ol" | "ul")) {
        return;
    }

    let mut remaining = text.to_owned();
    let mut consumed = 0;
    if let Some(range) = context.range() {
        if range.start.node == node {
            let (head, tail) = split_at_utf16(&remaining, range.start.offset);
            add_text_segment(group, &head, context);
            context.is_in_selection = true;
            add_selection_marker(group, context);
            consumed = utf16_len(&head);
            remaining = tail;
        }
        if range.end.node == node {
            let end = range.end.offset.saturating_sub(consumed);
            let (head, tail) = split_at_utf16(&remaining, end);
            add_text_segment(group, &head, context);
            if !range.collapsed() {
                add_selection_marker(group, context);
            }
            context.is_in_selection = false;
            remaining = tail;
        }
    }
    add_text_segment(group, &remaining, context);
}

fn add_text_segment(
    group: &mut dyn BlockGroupContainer,
    text: &str,
    context: &DomToModelContext,
) {
    if text.is_empty() {
        return;
    }
    let paragraph = match group.blocks().last() {
        Some(Block::Paragraph(p)) => Some(p),
        _ => None,
    };
    let keep = !is_whitespace_only(text)
        || paragraph.is_some_and(|p| {
            !p.segments.is_empty() || p.format.white_space.is_preserved()
        })
        || context.format.block_format.white_space.is_preserved();
    if !keep {
        return;
    }

    let mut segment = create_text(text, Some(&context.format.segment_format));
    segment.is_selected = context.is_in_selection;
    add_decorators(&mut segment, context);
    add_segment(group, segment, Some(&context.format.block_format));
}
