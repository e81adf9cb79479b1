// Copyright 2024 New Vector Ltd.
// Copyright 2022 The Matrix.org Foundation C.I.C.
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Element-Commercial
// Please see LICENSE in the repository root for full details.

use crate::dom::{HtmlDom, NodeId, NodeKind};
use crate::model::BlockGroupContainer;

use super::process;
use crate::dom_to_model::context::DomToModelContext;
use crate::dom_to_model::utils::handle_regular_selection;

/// Process every child of `parent`, entering and leaving the selection at
/// the child boundaries it starts or ends on.
pub fn child_processor(
    group: &mut dyn BlockGroupContainer,
    dom: &HtmlDom,
    parent: NodeId,
    context: &mut DomToModelContext,
) {
    let children = dom.children(parent);
    for (index, child) in children.iter().enumerate() {
        handle_regular_selection(group, parent, index, context);
        process_child_node(group, dom, *child, context);
    }
    handle_regular_selection(group, parent, children.len(), context);
}

pub fn process_child_node(
    group: &mut dyn BlockGroupContainer,
    dom: &HtmlDom,
    child: NodeId,
    context: &mut DomToModelContext,
) {
    match dom.kind(child) {
        Some(NodeKind::Element(element)) => {
            if element.style().get("display") != Some("none") {
                process("element", group, dom, child, context);
            }
        }
        Some(NodeKind::Text(_)) => process("#text", group, dom, child, context),
        _ => {}
    }
}
