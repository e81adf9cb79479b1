// Copyright 2024 New Vector Ltd.
// Copyright 2022 The Matrix.org Foundation C.I.C.
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Element-Commercial
// Please see LICENSE in the repository root for full details.

use crate::dom::{HtmlDom, NodeId};
use crate::model::{
    Block, BlockGroup, BlockGroupContainer, Divider, FormatContainer,
    GeneralBlock,
};

use super::{apply_to, strip_style};
use crate::model_to_dom::context::ModelToDomContext;
use crate::model_to_dom::options::ModelNode;
use crate::model_to_dom::reuse::{reuse_cached_element, usable_cached_element};

pub fn handle_block(
    dom: &mut HtmlDom,
    parent: NodeId,
    block: &Block,
    context: &mut ModelToDomContext,
    ref_node: Option<NodeId>,
) -> Option<NodeId> {
    let handlers = context.model_handlers;
    match block {
        Block::Paragraph(paragraph) => {
            (handlers.paragraph)(dom, parent, paragraph, context, ref_node)
        }
        Block::Table(table) => (handlers.table)(dom, parent, table, context, ref_node),
        Block::Divider(divider) => {
            (handlers.divider)(dom, parent, divider, context, ref_node)
        }
        Block::Entity(entity) => {
            (handlers.entity_block)(dom, parent, entity, context, ref_node)
        }
        Block::BlockGroup(BlockGroup::FormatContainer(container)) => {
            (handlers.format_container)(dom, parent, container, context, ref_node)
        }
        Block::BlockGroup(BlockGroup::ListItem(item)) => {
            (handlers.list_item)(dom, parent, item, context, ref_node)
        }
        Block::BlockGroup(BlockGroup::General(general)) => {
            (handlers.general_block)(dom, parent, general, context, ref_node)
        }
    }
}

/// Write the blocks of `group` as the children of `parent`. Existing
/// children are reused when blocks remember them, everything else that was
/// in `parent` is removed.
pub fn handle_block_group_children(
    dom: &mut HtmlDom,
    parent: NodeId,
    group: &dyn BlockGroupContainer,
    context: &mut ModelToDomContext,
) {
    let saved_stack = std::mem::take(&mut context.list_format.node_stack);
    let mut ref_node = dom.first_child(parent);

    for (index, block) in group.blocks().iter().enumerate() {
        // Consecutive list items share their list elements.
        if index == 0 || block.as_list_item().is_none() {
            context.list_format.node_stack.clear();
        }
        ref_node = (context.model_handlers.block)(dom, parent, block, context, ref_node);
    }

    while let Some(node) = ref_node {
        ref_node = dom.next_sibling(node);
        dom.remove(node);
    }
    context.list_format.node_stack = saved_stack;
}

pub fn handle_divider(
    dom: &mut HtmlDom,
    parent: NodeId,
    divider: &Divider,
    context: &mut ModelToDomContext,
    ref_node: Option<NodeId>,
) -> Option<NodeId> {
    let cached = context
        .allow_cache_element
        .then(|| usable_cached_element(dom, parent, divider.cached_element, &divider.tag_name))
        .flatten();

    let (node, ref_node) = match cached {
        Some(element) => (element, reuse_cached_element(dom, parent, element, ref_node)),
        None => {
            let element = dom.create_element(&divider.tag_name);
            dom.insert_before(parent, element, ref_node);
            apply_to(dom, element, &context.format_appliers.divider, &divider.format);
            strip_style(dom, element, &context.default_style(&divider.tag_name));
            (element, ref_node)
        }
    };
    context.node_created(ModelNode::Divider(divider), node);
    ref_node
}

/// `<blockquote>` and friends. A cached container element is kept but its
/// children are always written again.
pub fn handle_format_container(
    dom: &mut HtmlDom,
    parent: NodeId,
    container: &FormatContainer,
    context: &mut ModelToDomContext,
    ref_node: Option<NodeId>,
) -> Option<NodeId> {
    if container.blocks.is_empty() {
        return ref_node;
    }
    let cached = context
        .allow_cache_element
        .then(|| usable_cached_element(dom, parent, container.cached_element, &container.tag_name))
        .flatten();

    let (node, ref_node) = match cached {
        Some(element) => {
            let next = reuse_cached_element(dom, parent, element, ref_node);
            dom.clear_children(element);
            (element, next)
        }
        None => {
            let element = dom.create_element(&container.tag_name);
            dom.insert_before(parent, element, ref_node);
            apply_to(dom, element, &context.format_appliers.container, &container.format);
            strip_style(dom, element, &context.default_style(&container.tag_name));
            (element, ref_node)
        }
    };
    context.node_created(ModelNode::FormatContainer(container), node);

    let inherited = container.format.inherit_onto(&context.inherited_block_format);
    let saved = std::mem::replace(&mut context.inherited_block_format, inherited);
    (context.model_handlers.block_group_children)(dom, node, container, context);
    context.inherited_block_format = saved;

    ref_node
}

/// A block the model does not understand: a shallow copy of its element
/// with the blocks inside written into it.
pub fn handle_general_block(
    dom: &mut HtmlDom,
    parent: NodeId,
    general: &GeneralBlock,
    context: &mut ModelToDomContext,
    ref_node: Option<NodeId>,
) -> Option<NodeId> {
    let node = match dom.clone_node_shallow(general.element) {
        Some(node) if dom.is_element(node) => node,
        _ => {
            tracing::warn!(element = ?general.element, "general block element is missing");
            dom.create_element("div")
        }
    };
    dom.insert_before(parent, node, ref_node);
    context.node_created(ModelNode::GeneralBlock(general), node);
    (context.model_handlers.block_group_children)(dom, node, general, context);
    ref_node
}
