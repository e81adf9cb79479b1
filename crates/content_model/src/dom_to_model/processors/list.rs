// Copyright 2024 New Vector Ltd.
// Copyright 2022 The Matrix.org Foundation C.I.C.
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Element-Commercial
// Please see LICENSE in the repository root for full details.

use crate::dom::{Element, HtmlDom, NodeId};
use crate::format::parse_format;
use crate::model::{
    create_list_item, create_list_level, BlockGroupContainer, ListLevel,
    ListType,
};

use super::element::known_element_processor;
use super::process;
use crate::dom_to_model::context::{DomToModelContext, DomToModelListFormat};
use crate::dom_to_model::utils::parse_dataset;

/// `<ol>`/`<ul>`: push a level for the items inside it.
pub fn list_processor(
    group: &mut dyn BlockGroupContainer,
    dom: &HtmlDom,
    node: NodeId,
    context: &mut DomToModelContext,
) {
    let Some(element) = dom.element(node) else {
        return;
    };
    let default_style = context.default_style(element.tag());
    let list_type = if element.tag() == "ol" {
        ListType::Ordered
    } else {
        ListType::Unordered
    };

    let mut level = create_list_level(list_type, None);
    level.dataset = parse_dataset(element);
    parse_format(
        &context.format_parsers.list_level,
        &mut level.format,
        element,
        &default_style,
    );
    parse_thread(&mut level, element, &mut context.list_format);

    context.with_format_scope(|ctx| {
        parse_format(
            &ctx.format_parsers.segment_on_block,
            &mut ctx.format.segment_format,
            element,
            &default_style,
        );
        ctx.list_format.levels.push(level);
        process("child", group, dom, node, ctx);
        ctx.list_format.levels.pop();
    });
}

/// Work out whether an `<ol>` continues the numbering of the previous list
/// at the same depth, and record a start number override if it does not.
fn parse_thread(level: &mut ListLevel, element: &Element, list_format: &mut DomToModelListFormat) {
    let depth = list_format.levels.len();
    let counts = &mut list_format.thread_item_counts;

    match level.list_type {
        ListType::Ordered => {
            let start = element
                .get_attr("start")
                .and_then(|s| s.trim().parse::<u32>().ok())
                .unwrap_or(1);
            let continues = counts.get(depth).is_some_and(|count| i64::from(start) == count + 1);
            if !continues {
                level.format.thread.start_number_override = Some(start);
            }
            if counts.len() <= depth {
                counts.resize(depth + 1, 0);
            }
            counts[depth] = i64::from(start) - 1;
            counts.truncate(depth + 1);
        }
        ListType::Unordered => counts.truncate(depth),
    }
}

/// `<li>`: a list item carrying a snapshot of the enclosing levels. Nested
/// items are released to the list's group in document order once the
/// outermost item is done.
pub fn list_item_processor(
    group: &mut dyn BlockGroupContainer,
    dom: &HtmlDom,
    node: NodeId,
    context: &mut DomToModelContext,
) {
    if context.list_format.levels.is_empty() {
        known_element_processor(group, dom, node, context);
        return;
    }
    let Some(element) = dom.element(node) else {
        return;
    };
    let default_style = context.default_style(element.tag());

    let mut item = create_list_item(
        &context.list_format.levels,
        Some(&context.format.segment_format),
    );
    parse_format(
        &context.format_parsers.list_item,
        &mut item.format,
        element,
        &default_style,
    );
    parse_format(
        &context.format_parsers.segment_on_block,
        &mut item.format_holder.format,
        element,
        &default_style,
    );

    let is_dummy = element.style().get("display") == Some("block");
    let depth = item.levels.len() - 1;
    if let Some(level) = item.levels.last_mut() {
        if is_dummy {
            level.format.thread.display_for_dummy_item = Some("block".into());
        } else if level.list_type == ListType::Ordered {
            let counts = &mut context.list_format.thread_item_counts;
            if counts.len() <= depth {
                counts.resize(depth + 1, 0);
            }
            counts[depth] += 1;
        }
    }
    for level in context.list_format.levels.iter_mut() {
        level.format.thread.start_number_override = None;
    }

    let slot = context.list_format.open_item();
    context.with_format_scope(|ctx| {
        parse_format(
            &ctx.format_parsers.segment_on_block,
            &mut ctx.format.segment_format,
            element,
            &default_style,
        );
        ctx.format.block_decorator = None;
        process("child", &mut item, dom, node, ctx);
    });
    let released = context.list_format.close_item(slot, item.into());
    group.blocks_mut().extend(released);
}
