// Copyright 2024 New Vector Ltd.
// Copyright 2022 The Matrix.org Foundation C.I.C.
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Element-Commercial
// Please see LICENSE in the repository root for full details.

use crate::dom::{HtmlDom, NodeId};
use crate::format::parse_format;
use crate::model::{
    add_block, add_segment, create_br, create_divider, create_image,
    BlockGroupContainer, Code, Link, SegmentKind,
};

use super::element::known_element_processor;
use crate::dom_to_model::context::DomToModelContext;
use crate::dom_to_model::utils::{add_decorators, parse_dataset};

pub fn br_processor(
    group: &mut dyn BlockGroupContainer,
    _dom: &HtmlDom,
    _node: NodeId,
    context: &mut DomToModelContext,
) {
    let mut br = create_br(Some(&context.format.segment_format));
    br.is_selected = context.is_in_selection;
    add_decorators(&mut br, context);
    add_segment(group, br, Some(&context.format.block_format));
}

pub fn image_processor(
    group: &mut dyn BlockGroupContainer,
    dom: &HtmlDom,
    node: NodeId,
    context: &mut DomToModelContext,
) {
    let Some(element) = dom.element(node) else {
        return;
    };
    let default_style = context.default_style(element.tag());
    let mut segment = create_image(
        element.get_attr("src").unwrap_or_default(),
        Some(&context.format.segment_format),
    );
    let is_image_selection = context.selected_image() == Some(node);

    if let SegmentKind::Image(image) = &mut segment.kind {
        parse_format(&context.format_parsers.image, &mut image.format, element, &default_style);
        image.alt = element.get_attr("alt").map(str::to_owned);
        image.title = element.get_attr("title").map(str::to_owned);
        image.dataset = parse_dataset(element);
        image.is_selected_as_image_selection = is_image_selection;
    }
    segment.is_selected = context.is_in_selection || is_image_selection;
    add_decorators(&mut segment, context);
    add_segment(group, segment, Some(&context.format.block_format));
}

pub fn hr_processor(
    group: &mut dyn BlockGroupContainer,
    dom: &HtmlDom,
    node: NodeId,
    context: &mut DomToModelContext,
) {
    let Some(element) = dom.element(node) else {
        return;
    };
    let default_style = context.default_style(element.tag());
    let mut divider = create_divider(element.tag());
    parse_format(&context.format_parsers.divider, &mut divider.format, element, &default_style);
    divider.is_selected = context.is_in_selection;
    if context.allow_cache_element {
        divider.cached_element = Some(node);
    }
    add_block(group, divider);
}

/// `<a href>` decorates the segments inside it with a link. An anchor
/// without `href` is only a styled span.
pub fn link_processor(
    group: &mut dyn BlockGroupContainer,
    dom: &HtmlDom,
    node: NodeId,
    context: &mut DomToModelContext,
) {
    let Some(element) = dom.element(node) else {
        return;
    };
    if !element.has_attr("href") {
        known_element_processor(group, dom, node, context);
        return;
    }
    let default_style = context.default_style(element.tag());

    context.with_format_scope(|ctx| {
        let mut link = Link::default();
        parse_format(&ctx.format_parsers.link, &mut link.format, element, &default_style);
        link.dataset = parse_dataset(element);
        ctx.format.link = Some(link);
        known_element_processor(group, dom, node, ctx);
    });
}

pub fn code_processor(
    group: &mut dyn BlockGroupContainer,
    dom: &HtmlDom,
    node: NodeId,
    context: &mut DomToModelContext,
) {
    let Some(element) = dom.element(node) else {
        return;
    };
    let default_style = context.default_style(element.tag());

    context.with_format_scope(|ctx| {
        let mut code = Code::default();
        parse_format(&ctx.format_parsers.code, &mut code.format, element, &default_style);
        ctx.format.code = Some(code);
        known_element_processor(group, dom, node, ctx);
    });
}
