// Copyright 2024 New Vector Ltd.
// Copyright 2022 The Matrix.org Foundation C.I.C.
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Element-Commercial
// Please see LICENSE in the repository root for full details.

use crate::dom::{CssStyle, Element, HtmlDom, NodeId};
use crate::format::apply_format;
use crate::model::{Paragraph, SegmentKind};

use super::{apply_to, strip_style};
use crate::model_to_dom::context::{BlockAndSegmentNode, ModelToDomContext};
use crate::model_to_dom::options::ModelNode;
use crate::model_to_dom::reuse::{reuse_cached_element, usable_cached_element};

fn paragraph_tag(paragraph: &Paragraph) -> &str {
    paragraph
        .decorator
        .as_ref()
        .map(|d| d.tag_name.as_str())
        .unwrap_or("div")
}

/// An implicit paragraph is written without an element of its own unless
/// it carries something only an element can hold.
fn needs_wrapper(paragraph: &Paragraph, context: &ModelToDomContext) -> bool {
    !paragraph.is_implicit
        || paragraph.decorator.is_some()
        || paragraph.segment_format.is_some()
        || (paragraph.format != context.inherited_block_format
            && paragraph.segments.iter().any(|s| !s.is_marker()))
}

/// A cached element can stand for a paragraph whose content the editor has
/// not touched since it was read.
fn can_reuse(paragraph: &Paragraph) -> bool {
    paragraph
        .segments
        .iter()
        .all(|s| !s.is_selected && !matches!(s.kind, SegmentKind::General(_)))
}

pub fn handle_paragraph(
    dom: &mut HtmlDom,
    parent: NodeId,
    paragraph: &Paragraph,
    context: &mut ModelToDomContext,
    ref_node: Option<NodeId>,
) -> Option<NodeId> {
    let tag = paragraph_tag(paragraph);

    if context.allow_cache_element && can_reuse(paragraph) {
        if let Some(cached) =
            usable_cached_element(dom, parent, paragraph.cached_element, tag)
        {
            let next = reuse_cached_element(dom, parent, cached, ref_node);
            context.node_created(ModelNode::Paragraph(paragraph), cached);
            return next;
        }
    }

    let wrapped = needs_wrapper(paragraph, context);
    let container = dom.create_element(tag);
    dom.insert_before(parent, container, ref_node);

    let implicit_style = if wrapped {
        context.selection.current = BlockAndSegmentNode {
            block: Some(container),
            segment: None,
        };
        write_paragraph_format(dom, container, paragraph, context)
    } else {
        context.selection.current = BlockAndSegmentNode {
            block: Some(parent),
            segment: dom.previous_sibling(container),
        };
        CssStyle::default()
    };

    let saved_style = std::mem::replace(&mut context.implicit_segment_style, implicit_style);
    for segment in &paragraph.segments {
        let mut nodes = Vec::new();
        (context.model_handlers.segment)(dom, container, segment, context, &mut nodes);
    }
    context.implicit_segment_style = saved_style;

    if wrapped {
        context.node_created(ModelNode::Paragraph(paragraph), container);
    } else {
        dom.unwrap(container);
    }
    ref_node
}

/// Write block, decorator and segment formats onto the paragraph element.
/// Returns the style its segments inherit from it.
fn write_paragraph_format(
    dom: &mut HtmlDom,
    node: NodeId,
    paragraph: &Paragraph,
    context: &ModelToDomContext,
) -> CssStyle {
    let appliers = &context.format_appliers;
    apply_to(dom, node, &appliers.block, &paragraph.format);

    let mut scratch = Element::new("span");
    if let Some(decorator) = &paragraph.decorator {
        apply_format(&appliers.segment_on_block, &decorator.format, &mut scratch);
    }
    if let Some(segment_format) = &paragraph.segment_format {
        apply_format(&appliers.segment_on_block, segment_format, &mut scratch);
    }
    if let Some(element) = dom.element_mut(node) {
        element.style_mut().merge(scratch.style());
    }

    let default_style = context.default_style(paragraph_tag(paragraph));
    strip_style(dom, node, &default_style);

    let mut inherited = default_style;
    inherited.merge(scratch.style());
    inherited
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::format::{BlockFormat, SegmentFormat};
    use crate::model::{create_paragraph, create_paragraph_decorator, create_text};
    use crate::model_to_dom::ModelToDomOption;

    fn write(paragraph: &Paragraph) -> HtmlDom {
        let mut dom = HtmlDom::new();
        let mut context = ModelToDomContext::new(&ModelToDomOption::default());
        let root = dom.root();
        handle_paragraph(&mut dom, root, paragraph, &mut context, None);
        dom
    }

    #[test]
    fn implicit_paragraph_has_no_element() {
        let mut paragraph = create_paragraph(true, None, None, None);
        paragraph.segments.push(create_text("a", None));
        assert_eq!(write(&paragraph).to_html(), "<span>a</span>");
    }

    #[test]
    fn heading_keeps_its_tag_without_default_style() {
        let decorator = create_paragraph_decorator("h1", None);
        let mut bold = SegmentFormat::default();
        bold.font.font_weight = Some("bold".into());
        let mut paragraph = create_paragraph(false, None, None, Some(&decorator));
        paragraph.segments.push(create_text("a", Some(&bold)));
        assert_eq!(write(&paragraph).to_html(), "<h1><span>a</span></h1>");
    }

    #[test]
    fn block_format_is_written_to_the_element() {
        let mut format = BlockFormat::default();
        format.text_align.text_align = Some("center".into());
        let mut paragraph = create_paragraph(false, Some(&format), None, None);
        paragraph.segments.push(create_text("a", None));
        assert_eq!(
            write(&paragraph).to_html(),
            r#"<div style="text-align: center;"><span>a</span></div>"#
        );
    }
}
