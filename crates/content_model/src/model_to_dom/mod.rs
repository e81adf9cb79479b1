// Copyright 2024 New Vector Ltd.
// Copyright 2022 The Matrix.org Foundation C.I.C.
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Element-Commercial
// Please see LICENSE in the repository root for full details.

//! Writing a Content Model back into an HTML tree.

pub mod context;
pub mod handlers;
pub mod options;
pub mod reuse;

pub use context::{
    BlockAndSegmentNode, ListStackItem, ModelToDomContext,
    ModelToDomListFormat, ModelToDomSelectionContext,
};
pub use handlers::DEFAULT_MODEL_HANDLERS;
pub use options::{
    BlockHandler, ContentModelHandlerMap, ContentModelHandlerOverride,
    ModelNode, ModelToDomOption, OnNodeCreated, SegmentHandler,
};
pub use reuse::reuse_cached_element;

use crate::dom::{DomSelection, HtmlDom, NodeId};
use crate::model::ContentModelDocument;

/// Replace the children of `parent` with the content of `model` and return
/// the selection the model carries, expressed in the written tree.
///
/// Elements remembered by the model are reused in place unless
/// `disable_cache_element` is set.
///
/// Entities are written by moving their wrapper element, so `dom` must be
/// the tree the model was read from. An entity whose wrapper is not an
/// element of `dom` is dropped with a warning.
pub fn create_dom_from_model(
    model: &ContentModelDocument,
    dom: &mut HtmlDom,
    parent: NodeId,
    option: &ModelToDomOption,
) -> Option<DomSelection> {
    let mut context = ModelToDomContext::new(option);
    (context.model_handlers.block_group_children)(dom, parent, model, &mut context);

    let selection = context.selection.resolve(dom);
    tracing::debug!(
        "Wrote {} blocks, selection: {:?}",
        model.blocks.len(),
        selection.map(|s| s.selection_type())
    );
    selection
}

#[cfg(test)]
mod test {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;
    use crate::dom::{DomPosition, DomRange};
    use crate::dom_to_model::{create_content_model, DomToModelOption};
    use crate::model::{
        create_paragraph, create_selection_marker, create_text, Block,
    };

    fn write(model: &ContentModelDocument) -> (HtmlDom, Option<DomSelection>) {
        let mut dom = HtmlDom::new();
        let root = dom.root();
        let selection =
            create_dom_from_model(model, &mut dom, root, &ModelToDomOption::default());
        (dom, selection)
    }

    fn paragraph_with(segments: Vec<crate::model::Segment>) -> Block {
        let mut paragraph = create_paragraph(false, None, None, None);
        paragraph.segments = segments;
        paragraph.into()
    }

    #[test]
    fn collapsed_selection_is_placed_after_the_text_before_it() {
        let mut marker = create_selection_marker(None);
        marker.is_selected = true;
        let model = ContentModelDocument {
            blocks: vec![paragraph_with(vec![
                create_text("te", None),
                marker,
                create_text("st", None),
            ])],
            ..Default::default()
        };

        let (dom, selection) = write(&model);
        assert_eq!(dom.to_html(), "<div><span>te</span><span>st</span></div>");

        let range = *selection.unwrap().as_range().unwrap();
        assert!(range.collapsed());
        assert_eq!(dom.text(range.start.node), Some("te"));
        assert_eq!(range.start.offset, 2);
    }

    #[test]
    fn marker_at_paragraph_start_selects_the_block_start() {
        let mut marker = create_selection_marker(None);
        marker.is_selected = true;
        let model = ContentModelDocument {
            blocks: vec![paragraph_with(vec![marker, create_text("a", None)])],
            ..Default::default()
        };

        let (dom, selection) = write(&model);
        let range = *selection.unwrap().as_range().unwrap();
        let div = dom.children(dom.root())[0];
        assert_eq!(range.start, DomPosition::new(div, 0));
    }

    #[test]
    fn entities_are_moved_within_the_tree_they_were_read_from() {
        let mut dom = HtmlDom::parse(
            r#"<div>a</div><div class="_Entity _EType_widget _EId_1">w</div>"#,
        );
        let root = dom.root();
        let wrapper = dom.children(root)[1];
        let model = create_content_model(&dom, root, &DomToModelOption::default(), None);
        assert!(model.blocks.iter().any(|b| matches!(b, Block::Entity(_))));

        create_dom_from_model(&model, &mut dom, root, &ModelToDomOption::default());

        assert_eq!(dom.parent(wrapper), Some(root));
        assert_eq!(dom.text_content(wrapper), "w");
    }

    #[test]
    fn existing_children_are_replaced() {
        let mut dom = HtmlDom::parse("<p>old</p><p>older</p>");
        let root = dom.root();
        let model = ContentModelDocument {
            blocks: vec![paragraph_with(vec![create_text("new", None)])],
            ..Default::default()
        };
        create_dom_from_model(&model, &mut dom, root, &ModelToDomOption::default());
        assert_eq!(dom.to_html(), "<div><span>new</span></div>");
    }

    #[test]
    fn untouched_paragraphs_reuse_their_elements() {
        let mut dom = HtmlDom::parse(r#"<div id="a">a</div><div id="b">b</div>"#);
        let root = dom.root();
        let first = dom.children(root)[0];
        let mut model =
            create_content_model(&dom, root, &DomToModelOption::default(), None);
        model.blocks.remove(1);

        create_dom_from_model(&model, &mut dom, root, &ModelToDomOption::default());
        assert_eq!(dom.children(root)[0], first);
        assert_eq!(dom.to_html(), r#"<div id="a">a</div>"#);
    }

    #[test]
    fn selection_survives_a_round_trip() {
        let dom = HtmlDom::parse("<div>hello</div>");
        let div = dom.children(dom.root())[0];
        let text = dom.children(div)[0];
        let selection = DomSelection::range(DomRange::new(
            DomPosition::new(text, 1),
            DomPosition::new(text, 3),
        ));
        let option = DomToModelOption {
            disable_cache_element: true,
            ..Default::default()
        };
        let model = create_content_model(&dom, dom.root(), &option, Some(selection));

        let (written, selection) = write(&model);
        assert_eq!(
            written.to_html(),
            "<div><span>h</span><span>el</span><span>lo</span></div>"
        );
        let range = *selection.unwrap().as_range().unwrap();
        assert_eq!(written.text(range.start.node), Some("h"));
        assert_eq!(range.start.offset, 1);
        assert_eq!(written.text(range.end.node), Some("el"));
        assert_eq!(range.end.offset, 2);
    }

    #[test]
    fn node_created_is_reported_for_each_paragraph() {
        let created = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&created);
        let option = ModelToDomOption::default().with_on_node_created(move |model, node| {
            if let ModelNode::Paragraph(_) = model {
                sink.borrow_mut().push(node);
            }
        });
        let model = ContentModelDocument {
            blocks: vec![
                paragraph_with(vec![create_text("a", None)]),
                paragraph_with(vec![create_text("b", None)]),
            ],
            ..Default::default()
        };

        let mut dom = HtmlDom::new();
        let root = dom.root();
        create_dom_from_model(&model, &mut dom, root, &option);
        assert_eq!(*created.borrow(), dom.children(root).to_vec());
    }

    #[test]
    fn handlers_can_be_overridden() {
        fn upper_text(
            dom: &mut HtmlDom,
            parent: NodeId,
            segment: &crate::model::Segment,
            _context: &mut ModelToDomContext,
            nodes: &mut Vec<NodeId>,
        ) {
            if let Some(text) = segment.text() {
                let node = dom.create_text(&text.to_uppercase());
                dom.append_child(parent, node);
                nodes.push(node);
            }
        }
        let option = ModelToDomOption {
            model_handler_override: ContentModelHandlerOverride {
                text: Some(upper_text as SegmentHandler),
                ..Default::default()
            },
            ..Default::default()
        };
        let model = ContentModelDocument {
            blocks: vec![paragraph_with(vec![create_text("a", None)])],
            ..Default::default()
        };

        let mut dom = HtmlDom::new();
        let root = dom.root();
        create_dom_from_model(&model, &mut dom, root, &option);
        assert_eq!(dom.to_html(), "<div>A</div>");
    }
}
