// Copyright 2024 New Vector Ltd.
// Copyright 2022 The Matrix.org Foundation C.I.C.
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Element-Commercial
// Please see LICENSE in the repository root for full details.

use crate::dom::{HtmlDom, NodeId};
use crate::format::default_styles::{display_of, is_block_display};
use crate::format::{is_entity_element, parse_format};
use crate::model::{
    add_block, add_segment, create_general_block, create_general_segment,
    BlockGroupContainer, SegmentKind,
};

use super::block::{block_processor, format_container_processor, should_be_format_container};
use super::process;
use crate::dom_to_model::context::DomToModelContext;

/// Dispatch an element to the processor of its tag, or to the entity
/// processor for entity wrappers.
pub fn element_processor(
    group: &mut dyn BlockGroupContainer,
    dom: &HtmlDom,
    node: NodeId,
    context: &mut DomToModelContext,
) {
    let Some(element) = dom.element(node) else {
        process("child", group, dom, node, context);
        return;
    };
    let key = if is_entity_element(element) {
        "entity"
    } else {
        element.tag()
    };
    match context.processor(key) {
        Some(processor) => processor(group, dom, node, context),
        None => process("*", group, dom, node, context),
    }
}

/// Elements that carry nothing but style: inline ones add to the segment
/// format, block ones become paragraphs or format containers.
pub fn known_element_processor(
    group: &mut dyn BlockGroupContainer,
    dom: &HtmlDom,
    node: NodeId,
    context: &mut DomToModelContext,
) {
    let Some(element) = dom.element(node) else {
        return;
    };
    let default_style = context.default_style(element.tag());

    if is_block_display(display_of(element, &default_style)) {
        if should_be_format_container(dom, node, context) {
            format_container_processor(group, dom, node, context);
        } else {
            block_processor(group, dom, node, context);
        }
        return;
    }

    context.with_format_scope(|ctx| {
        parse_format(
            &ctx.format_parsers.segment,
            &mut ctx.format.segment_format,
            element,
            &default_style,
        );
        process("child", group, dom, node, ctx);
    });
}

/// Fallback for elements the model has no concept of. The element is kept
/// by reference and its children are still read.
pub fn general_processor(
    group: &mut dyn BlockGroupContainer,
    dom: &HtmlDom,
    node: NodeId,
    context: &mut DomToModelContext,
) {
    let Some(element) = dom.element(node) else {
        return;
    };
    tracing::warn!("No processor for <{}>, keeping it as general content", element.tag());

    let default_style = context.default_style(element.tag());
    let selected_before = context.is_in_selection;

    if is_block_display(display_of(element, &default_style)) {
        let mut block = create_general_block(node);
        context.with_format_scope(|ctx| {
            ctx.format.link = None;
            process("child", &mut block, dom, node, ctx);
        });
        block.is_selected = selected_before && context.is_in_selection;
        add_block(group, block);
    } else {
        let mut segment =
            create_general_segment(node, Some(&context.format.segment_format));
        if let SegmentKind::General(block) = &mut segment.kind {
            process("child", block, dom, node, context);
        }
        segment.is_selected = selected_before && context.is_in_selection;
        add_segment(group, segment, Some(&context.format.block_format));
    }
}
