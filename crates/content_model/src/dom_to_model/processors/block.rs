// Copyright 2024 New Vector Ltd.
// Copyright 2022 The Matrix.org Foundation C.I.C.
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Element-Commercial
// Please see LICENSE in the repository root for full details.

use crate::dom::{HtmlDom, NodeId};
use crate::format::default_styles::is_block_display;
use crate::format::{parse_format, FormatContainerFormat, SegmentFormat};
use crate::model::{
    add_block, create_format_container, create_paragraph,
    create_paragraph_decorator, Block, BlockGroupContainer,
};

use super::{node_display, process};
use crate::dom_to_model::context::DomToModelContext;

const DECORATOR_TAGS: &[&str] = &["p", "h1", "h2", "h3", "h4", "h5", "h6"];

/// Style properties that make a block with block children a container of
/// its own rather than just another paragraph.
const CONTAINER_STYLE_PREFIXES: &[&str] = &["background", "border", "margin", "padding"];

/// A block element with block children and a visible box of its own.
pub fn should_be_format_container(
    dom: &HtmlDom,
    node: NodeId,
    context: &DomToModelContext,
) -> bool {
    let Some(element) = dom.element(node) else {
        return false;
    };
    let has_box = element.style().iter().any(|(name, _)| {
        CONTAINER_STYLE_PREFIXES.iter().any(|p| name.starts_with(p))
    });
    has_box
        && dom.children(node).iter().any(|child| {
            dom.is_element(*child) && is_block_display(&node_display(dom, *child, context))
        })
}

/// A block element becomes one paragraph, followed by an empty implicit
/// paragraph so that inline content after it does not join it.
pub fn block_processor(
    group: &mut dyn BlockGroupContainer,
    dom: &HtmlDom,
    node: NodeId,
    context: &mut DomToModelContext,
) {
    let Some(element) = dom.element(node) else {
        return;
    };
    let tag = element.tag();
    let default_style = context.default_style(tag);

    context.with_format_scope(|ctx| {
        ctx.format.block_format = ctx.format.block_format.inheritable();
        parse_format(
            &ctx.format_parsers.block,
            &mut ctx.format.block_format,
            element,
            &default_style,
        );

        let mut own_segment_format = SegmentFormat::default();
        parse_format(
            &ctx.format_parsers.segment_on_block,
            &mut own_segment_format,
            element,
            &default_style,
        );
        parse_format(
            &ctx.format_parsers.segment_on_block,
            &mut ctx.format.segment_format,
            element,
            &default_style,
        );

        let paragraph = if DECORATOR_TAGS.contains(&tag) {
            let decorator = create_paragraph_decorator(tag, Some(&own_segment_format));
            ctx.format.block_decorator = Some(decorator.clone());
            create_paragraph(false, Some(&ctx.format.block_format), None, Some(&decorator))
        } else {
            ctx.format.block_decorator = None;
            create_paragraph(
                false,
                Some(&ctx.format.block_format),
                Some(&own_segment_format),
                None,
            )
        };

        let first = group.blocks().len();
        add_block(group, paragraph);
        process("child", group, dom, node, ctx);

        if ctx.allow_cache_element && group.blocks().len() == first + 1 {
            if let Some(Block::Paragraph(p)) = group.blocks_mut().get_mut(first) {
                p.cached_element = Some(node);
            }
        }
    });

    add_block(
        group,
        create_paragraph(true, Some(&context.format.block_format), None, None),
    );
}

/// `<blockquote>`, `<pre>` and boxed `<div>`s: a group of blocks sharing
/// the format of the wrapper element.
pub fn format_container_processor(
    group: &mut dyn BlockGroupContainer,
    dom: &HtmlDom,
    node: NodeId,
    context: &mut DomToModelContext,
) {
    let Some(element) = dom.element(node) else {
        return;
    };
    let default_style = context.default_style(element.tag());

    let mut format = FormatContainerFormat::default();
    parse_format(&context.format_parsers.container, &mut format, element, &default_style);
    let mut container = create_format_container(element.tag(), Some(&format));
    if context.allow_cache_element {
        container.cached_element = Some(node);
    }

    context.with_format_scope(|ctx| {
        ctx.format.block_format = format.inherit_onto(&ctx.format.block_format);
        ctx.format.block_decorator = None;
        parse_format(
            &ctx.format_parsers.segment_on_block,
            &mut ctx.format.segment_format,
            element,
            &default_style,
        );
        process("child", &mut container, dom, node, ctx);
    });

    add_block(group, container);
    add_block(
        group,
        create_paragraph(true, Some(&context.format.block_format), None, None),
    );
}
