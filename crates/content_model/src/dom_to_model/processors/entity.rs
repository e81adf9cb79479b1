// Copyright 2024 New Vector Ltd.
// Copyright 2022 The Matrix.org Foundation C.I.C.
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Element-Commercial
// Please see LICENSE in the repository root for full details.

use crate::dom::{HtmlDom, NodeId};
use crate::format::default_styles::{display_of, is_block_display};
use crate::format::parse_entity_format;
use crate::model::{
    add_block, add_segment, create_entity, create_entity_segment,
    BlockGroupContainer,
};

use crate::dom_to_model::context::DomToModelContext;
use crate::dom_to_model::utils::add_decorators;

/// Entities are kept as their wrapper element. Their content is owned by
/// the host and never read.
pub fn entity_processor(
    group: &mut dyn BlockGroupContainer,
    dom: &HtmlDom,
    node: NodeId,
    context: &mut DomToModelContext,
) {
    let Some(element) = dom.element(node) else {
        return;
    };
    let default_style = context.default_style(element.tag());
    let mut entity = create_entity(
        node,
        parse_entity_format(element),
        Some(&context.format.segment_format),
    );
    entity.is_selected = context.is_in_selection;

    if is_block_display(display_of(element, &default_style)) {
        add_block(group, entity);
    } else {
        let mut segment = create_entity_segment(entity);
        add_decorators(&mut segment, context);
        add_segment(group, segment, Some(&context.format.block_format));
    }
}
