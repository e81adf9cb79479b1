// Copyright 2024 New Vector Ltd.
// Copyright 2022 The Matrix.org Foundation C.I.C.
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Element-Commercial
// Please see LICENSE in the repository root for full details.

use crate::dom::{HtmlDom, NodeId};
use crate::format::{entity_class_names, EntityInfoFormat};
use crate::model::{Entity, Segment, SegmentKind};

use crate::model_to_dom::context::ModelToDomContext;
use crate::model_to_dom::options::ModelNode;
use crate::model_to_dom::reuse::reuse_cached_element;

/// The wrapper of an entity is host content and is moved into place as is.
fn usable_wrapper(dom: &HtmlDom, parent: NodeId, wrapper: NodeId) -> bool {
    let usable = dom.is_element(wrapper) && !dom.is_ancestor_or_self(wrapper, parent);
    if !usable {
        tracing::warn!(?wrapper, "entity wrapper is missing, entity dropped");
    }
    usable
}

fn add_entity_classes(dom: &mut HtmlDom, wrapper: NodeId, format: &EntityInfoFormat) {
    if let Some(element) = dom.element_mut(wrapper) {
        for class in entity_class_names(format) {
            element.add_class(&class);
        }
    }
}

pub fn handle_entity_block(
    dom: &mut HtmlDom,
    parent: NodeId,
    entity: &Entity,
    context: &mut ModelToDomContext,
    ref_node: Option<NodeId>,
) -> Option<NodeId> {
    if !usable_wrapper(dom, parent, entity.wrapper) {
        return ref_node;
    }
    let next = reuse_cached_element(dom, parent, entity.wrapper, ref_node);
    add_entity_classes(dom, entity.wrapper, &entity.entity_format);
    context.node_created(ModelNode::Entity(entity), entity.wrapper);
    next
}

pub fn handle_entity_segment(
    dom: &mut HtmlDom,
    parent: NodeId,
    segment: &Segment,
    context: &mut ModelToDomContext,
    nodes: &mut Vec<NodeId>,
) {
    let SegmentKind::Entity {
        wrapper,
        entity_format,
    } = &segment.kind
    else {
        return;
    };
    if !usable_wrapper(dom, parent, *wrapper) {
        return;
    }
    dom.append_child(parent, *wrapper);
    add_entity_classes(dom, *wrapper, entity_format);
    nodes.push(*wrapper);

    context.selection.current.segment = Some(*wrapper);
    context.node_created(ModelNode::Segment(segment), *wrapper);
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::model_to_dom::ModelToDomOption;

    #[test]
    fn entity_wrapper_is_moved_and_tagged() {
        let mut dom = HtmlDom::new();
        let wrapper = dom.create_element("span");
        let text = dom.create_text("@x");
        dom.append_child(wrapper, text);
        let target = dom.create_element("div");
        let root = dom.root();
        dom.append_child(root, target);

        let format = EntityInfoFormat {
            entity_type: Some("mention".into()),
            id: Some("x".into()),
            ..Default::default()
        };
        let segment = Segment::new(
            SegmentKind::Entity {
                wrapper,
                entity_format: format,
            },
            Default::default(),
        );
        let mut context = ModelToDomContext::new(&ModelToDomOption::default());
        handle_entity_segment(&mut dom, target, &segment, &mut context, &mut Vec::new());

        assert_eq!(dom.parent(wrapper), Some(target));
        assert!(dom.element(wrapper).unwrap().has_class("_Entity"));
        assert!(dom.element(wrapper).unwrap().has_class("_EType_mention"));
        assert_eq!(context.selection.current.segment, Some(wrapper));
    }
}
