// Copyright 2024 New Vector Ltd.
// Copyright 2022 The Matrix.org Foundation C.I.C.
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Element-Commercial
// Please see LICENSE in the repository root for full details.

use crate::dom::{HtmlDom, NodeId};
use crate::format::ListThreadFormat;
use crate::model::{ListItem, ListLevel, ListType};

use super::{apply_dataset, apply_to, strip_style};
use crate::model_to_dom::context::{
    ListStackItem, ModelToDomContext, ModelToDomListFormat,
};
use crate::model_to_dom::options::ModelNode;

/// An open list element can take the next item of `level` when both are
/// the same kind of list and the item does not restart numbering.
pub(crate) fn can_share(open: &ListLevel, level: &ListLevel) -> bool {
    let without_thread = |l: &ListLevel| {
        let mut format = l.format.clone();
        format.thread = ListThreadFormat::default();
        format
    };
    open.list_type == level.list_type
        && level.format.thread.start_number_override.is_none()
        && open.dataset == level.dataset
        && without_thread(open) == without_thread(level)
}

/// Make sure the `<ol>`/`<ul>` elements for every level of `item` are
/// open, reusing the ones opened for the previous item where possible.
pub fn handle_list(
    dom: &mut HtmlDom,
    parent: NodeId,
    item: &ListItem,
    context: &mut ModelToDomContext,
    ref_node: Option<NodeId>,
) -> Option<NodeId> {
    let stack = &mut context.list_format.node_stack;
    if stack.is_empty() {
        stack.push(ListStackItem {
            node: parent,
            level: None,
        });
    }

    let mut layer = 0;
    while layer < item.levels.len()
        && stack
            .get(layer + 1)
            .and_then(|open| open.level.as_ref())
            .is_some_and(|open| can_share(open, &item.levels[layer]))
    {
        layer += 1;
    }
    stack.truncate(layer + 1);

    for (index, level) in item.levels.iter().enumerate().skip(layer) {
        let list = dom.create_element(level.list_type.tag());
        let list_parent = context
            .list_format
            .node_stack
            .last()
            .map_or(parent, |open| open.node);
        dom.insert_before(list_parent, list, if index == 0 { ref_node } else { None });
        context.list_format.node_stack.push(ListStackItem {
            node: list,
            level: Some(level.clone()),
        });

        write_thread(dom, list, level, &mut context.list_format);
        apply_to(dom, list, &context.format_appliers.list_level, &level.format);
        apply_dataset(dom, list, &level.dataset);
        strip_style(dom, list, &context.default_style(level.list_type.tag()));
        context.node_created(ModelNode::ListLevel(level), list);
    }
    ref_node
}

/// Keep numbering running across lists at the same depth and write `start`
/// where a list does not begin at 1.
fn write_thread(
    dom: &mut HtmlDom,
    list: NodeId,
    level: &ListLevel,
    list_format: &mut ModelToDomListFormat,
) {
    let depth = list_format.node_stack.len().saturating_sub(2);
    let counts = &mut list_format.thread_item_counts;

    match level.list_type {
        ListType::Ordered => {
            if counts.len() <= depth {
                counts.resize(depth + 1, 0);
            }
            if let Some(start) = level.format.thread.start_number_override {
                counts[depth] = i64::from(start) - 1;
            }
            counts.truncate(depth + 1);
            let start = counts[depth] + 1;
            if start != 1 {
                if let Some(element) = dom.element_mut(list) {
                    element.set_attr("start", &start.to_string());
                }
            }
        }
        ListType::Unordered => counts.truncate(depth),
    }
}

pub fn handle_list_item(
    dom: &mut HtmlDom,
    parent: NodeId,
    item: &ListItem,
    context: &mut ModelToDomContext,
    ref_node: Option<NodeId>,
) -> Option<NodeId> {
    let ref_node = (context.model_handlers.list)(dom, parent, item, context, ref_node);

    let li = dom.create_element("li");
    let stack = &context.list_format.node_stack;
    match stack.last() {
        Some(open) if stack.len() > 1 => dom.append_child(open.node, li),
        _ => dom.insert_before(parent, li, ref_node),
    }

    let depth = stack.len().saturating_sub(2);
    if item.is_dummy() {
        if let Some(element) = dom.element_mut(li) {
            element.style_mut().set("display", "block");
        }
    } else if stack.len() > 1
        && item.levels.last().is_some_and(|l| l.list_type == ListType::Ordered)
    {
        let counts = &mut context.list_format.thread_item_counts;
        if counts.len() <= depth {
            counts.resize(depth + 1, 0);
        }
        counts[depth] += 1;
    }

    apply_to(dom, li, &context.format_appliers.segment_on_block, &item.format_holder.format);
    apply_to(dom, li, &context.format_appliers.list_item, &item.format);
    strip_style(dom, li, &context.default_style("li"));
    context.node_created(ModelNode::ListItem(item), li);

    (context.model_handlers.block_group_children)(dom, li, item, context);
    ref_node
}
