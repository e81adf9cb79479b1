// Copyright 2024 New Vector Ltd.
// Copyright 2022 The Matrix.org Foundation C.I.C.
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Element-Commercial
// Please see LICENSE in the repository root for full details.

use crate::dom::{Element, HtmlDom, NodeId};
use crate::format::DatasetFormat;
use crate::model::{
    add_segment, create_selection_marker, BlockGroupContainer, Segment,
};

use super::context::DomToModelContext;

/// Copy the link and code of the surrounding elements onto `segment`.
pub fn add_decorators(segment: &mut Segment, context: &DomToModelContext) {
    segment.link = context.format.link.clone();
    segment.code = context.format.code.clone();
}

/// Text a browser would collapse to nothing between blocks.
pub fn is_whitespace_only(text: &str) -> bool {
    text.chars().all(|c| matches!(c, ' ' | '\t' | '\n' | '\r'))
}

pub fn parse_dataset(element: &Element) -> DatasetFormat {
    element.dataset().into_iter().collect()
}

pub fn add_selection_marker(
    group: &mut dyn BlockGroupContainer,
    context: &DomToModelContext,
) {
    let mut marker = create_selection_marker(Some(&context.format.segment_format));
    add_decorators(&mut marker, context);
    add_segment(group, marker, Some(&context.format.block_format));
}

/// Enter or leave the selection when the walk reaches the boundary before
/// child `index` of `parent`.
pub fn handle_regular_selection(
    group: &mut dyn BlockGroupContainer,
    parent: NodeId,
    index: usize,
    context: &mut DomToModelContext,
) {
    let Some(range) = context.range() else {
        return;
    };
    if range.start.node == parent && range.start.offset == index {
        context.is_in_selection = true;
        add_selection_marker(group, context);
    }
    if range.end.node == parent && range.end.offset == index {
        if !range.collapsed() {
            add_selection_marker(group, context);
        }
        context.is_in_selection = false;
    }
}

/// Lower-cased tag of `node`'s parent element, if any.
pub fn parent_tag(dom: &HtmlDom, node: NodeId) -> Option<&str> {
    dom.parent(node).and_then(|p| dom.tag(p))
}
