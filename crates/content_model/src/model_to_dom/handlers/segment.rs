// Copyright 2024 New Vector Ltd.
// Copyright 2022 The Matrix.org Foundation C.I.C.
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Element-Commercial
// Please see LICENSE in the repository root for full details.

use crate::dom::{HtmlDom, NodeId};
use crate::model::{Segment, SegmentKind};

use super::{apply_dataset, apply_to, strip_style};
use crate::model_to_dom::context::ModelToDomContext;
use crate::model_to_dom::options::ModelNode;

/// Dispatch a segment to its handler and track where the selection starts
/// and ends. A selection marker writes nothing but still moves the
/// selection to the current position.
pub fn handle_segment(
    dom: &mut HtmlDom,
    parent: NodeId,
    segment: &Segment,
    context: &mut ModelToDomContext,
    nodes: &mut Vec<NodeId>,
) {
    if segment.is_selected && context.selection.start.is_none() {
        context.selection.start = Some(context.selection.current);
    }

    let handlers = context.model_handlers;
    match &segment.kind {
        SegmentKind::Text { .. } => (handlers.text)(dom, parent, segment, context, nodes),
        SegmentKind::Br => (handlers.br)(dom, parent, segment, context, nodes),
        SegmentKind::Image(_) => (handlers.image)(dom, parent, segment, context, nodes),
        SegmentKind::General(_) => {
            (handlers.general_segment)(dom, parent, segment, context, nodes)
        }
        SegmentKind::Entity { .. } => {
            (handlers.entity_segment)(dom, parent, segment, context, nodes)
        }
        SegmentKind::SelectionMarker => {}
    }

    if segment.is_selected && context.selection.start.is_some() {
        context.selection.end = Some(context.selection.current);
    }
}

/// `<span>`, with `<a>` and `<code>` inside it for segments that have a
/// link or code. Returns the span and the element the segment content goes
/// into.
fn create_segment_container(
    dom: &mut HtmlDom,
    parent: NodeId,
    segment: &Segment,
    context: &ModelToDomContext,
) -> (NodeId, NodeId) {
    let span = dom.create_element("span");
    dom.append_child(parent, span);
    let mut inner = span;

    if let Some(link) = &segment.link {
        let a = dom.create_element("a");
        dom.append_child(inner, a);
        apply_to(dom, a, &context.format_appliers.link, &link.format);
        apply_dataset(dom, a, &link.dataset);
        inner = a;
    }
    if let Some(code) = &segment.code {
        let element = dom.create_element("code");
        dom.append_child(inner, element);
        apply_to(dom, element, &context.format_appliers.code, &code.format);
        strip_style(dom, element, &context.default_style("code"));
        inner = element;
    }
    (span, inner)
}

/// Segment format goes on the span, minus what the paragraph element
/// already provides.
pub(crate) fn handle_segment_common(
    dom: &mut HtmlDom,
    leaf: NodeId,
    span: NodeId,
    segment: &Segment,
    context: &mut ModelToDomContext,
) {
    if dom.children(leaf).is_empty() {
        context.selection.current.segment = Some(leaf);
    }
    apply_to(dom, span, &context.format_appliers.segment, &segment.format);
    strip_style(dom, span, &context.implicit_segment_style);
    context.node_created(ModelNode::Segment(segment), leaf);
}

pub fn handle_text(
    dom: &mut HtmlDom,
    parent: NodeId,
    segment: &Segment,
    context: &mut ModelToDomContext,
    nodes: &mut Vec<NodeId>,
) {
    let SegmentKind::Text { text } = &segment.kind else {
        return;
    };
    let (span, inner) = create_segment_container(dom, parent, segment, context);
    let node = dom.create_text(text);
    dom.append_child(inner, node);
    nodes.push(node);
    handle_segment_common(dom, node, span, segment, context);
}

pub fn handle_br(
    dom: &mut HtmlDom,
    parent: NodeId,
    segment: &Segment,
    context: &mut ModelToDomContext,
    nodes: &mut Vec<NodeId>,
) {
    let (span, inner) = create_segment_container(dom, parent, segment, context);
    let br = dom.create_element("br");
    dom.append_child(inner, br);
    nodes.push(br);
    handle_segment_common(dom, br, span, segment, context);
}

pub fn handle_image(
    dom: &mut HtmlDom,
    parent: NodeId,
    segment: &Segment,
    context: &mut ModelToDomContext,
    nodes: &mut Vec<NodeId>,
) {
    let SegmentKind::Image(image) = &segment.kind else {
        return;
    };
    let (span, inner) = create_segment_container(dom, parent, segment, context);
    let img = dom.create_element("img");
    dom.append_child(inner, img);

    if let Some(element) = dom.element_mut(img) {
        element.set_attr("src", &image.src);
        if let Some(alt) = &image.alt {
            element.set_attr("alt", alt);
        }
        if let Some(title) = &image.title {
            element.set_attr("title", title);
        }
    }
    apply_to(dom, img, &context.format_appliers.image, &image.format);
    apply_dataset(dom, img, &image.dataset);
    if image.is_selected_as_image_selection {
        context.selection.image = Some(img);
    }

    nodes.push(img);
    handle_segment_common(dom, img, span, segment, context);
}

/// An inline element the model does not understand: a shallow copy of it
/// with its content written inside.
pub fn handle_general_segment(
    dom: &mut HtmlDom,
    parent: NodeId,
    segment: &Segment,
    context: &mut ModelToDomContext,
    nodes: &mut Vec<NodeId>,
) {
    let SegmentKind::General(general) = &segment.kind else {
        return;
    };
    let (span, inner) = create_segment_container(dom, parent, segment, context);
    let node = match dom.clone_node_shallow(general.element) {
        Some(node) if dom.is_element(node) => node,
        _ => {
            tracing::warn!(element = ?general.element, "general segment element is missing");
            dom.create_element("span")
        }
    };
    dom.append_child(inner, node);

    let current = context.selection.current;
    (context.model_handlers.block_group_children)(dom, node, general, context);
    context.selection.current = current;

    nodes.push(node);
    handle_segment_common(dom, node, span, segment, context);
    context.selection.current.segment = Some(node);
}
