// Copyright 2024 New Vector Ltd.
// Copyright 2022 The Matrix.org Foundation C.I.C.
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Element-Commercial
// Please see LICENSE in the repository root for full details.

use crate::dom::{HtmlDom, NodeId};
use crate::format::is_entity_element;

/// The cached element of a block, if it can still be written into `parent`:
/// it exists in `dom`, has the expected tag and does not contain `parent`.
pub fn usable_cached_element(
    dom: &HtmlDom,
    parent: NodeId,
    cached: Option<NodeId>,
    tag: &str,
) -> Option<NodeId> {
    let cached = cached?;
    let usable = dom.tag(cached).is_some_and(|t| t.eq_ignore_ascii_case(tag))
        && !dom.is_ancestor_or_self(cached, parent);
    if !usable {
        tracing::warn!(?cached, tag, "ignoring stale cached element");
        return None;
    }
    Some(cached)
}

/// Put `element` before `ref_node` in `parent`. When `element` already
/// sits further along in `parent`, the nodes in between are dropped and it
/// stays in place. Entities in between are kept.
///
/// Returns the node the next sibling should be inserted before.
pub fn reuse_cached_element(
    dom: &mut HtmlDom,
    parent: NodeId,
    element: NodeId,
    ref_node: Option<NodeId>,
) -> Option<NodeId> {
    let mut ref_node = ref_node;
    if dom.parent(element) == Some(parent) {
        while let Some(node) =
            ref_node.filter(|n| *n != element && !is_entity_node(dom, *n))
        {
            ref_node = dom.next_sibling(node);
            dom.remove(node);
        }
        if ref_node == Some(element) {
            return dom.next_sibling(element);
        }
    }
    dom.insert_before(parent, element, ref_node);
    ref_node
}

fn is_entity_node(dom: &HtmlDom, node: NodeId) -> bool {
    dom.element(node).is_some_and(is_entity_element)
}
