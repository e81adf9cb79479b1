// Copyright 2024 New Vector Ltd.
// Copyright 2022 The Matrix.org Foundation C.I.C.
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Element-Commercial
// Please see LICENSE in the repository root for full details.

mod block;
mod entity;
mod list;
mod paragraph;
mod segment;
mod table;

pub use block::{
    handle_block, handle_block_group_children, handle_divider,
    handle_format_container, handle_general_block,
};
pub use entity::{handle_entity_block, handle_entity_segment};
pub use list::{handle_list, handle_list_item};
pub(crate) use list::can_share;
pub use paragraph::handle_paragraph;
pub use segment::{
    handle_br, handle_general_segment, handle_image, handle_segment,
    handle_text,
};
pub use table::handle_table;

use crate::dom::{CssStyle, Element, HtmlDom, NodeId};
use crate::format::default_styles::strip_default_style;
use crate::format::{apply_format, DatasetFormat, FormatApplier};

use super::options::ContentModelHandlerMap;

pub static DEFAULT_MODEL_HANDLERS: ContentModelHandlerMap = ContentModelHandlerMap {
    block: handle_block,
    block_group_children: handle_block_group_children,
    paragraph: handle_paragraph,
    table: handle_table,
    divider: handle_divider,
    entity_block: handle_entity_block,
    format_container: handle_format_container,
    general_block: handle_general_block,
    list: handle_list,
    list_item: handle_list_item,
    segment: handle_segment,
    text: handle_text,
    br: handle_br,
    image: handle_image,
    general_segment: handle_general_segment,
    entity_segment: handle_entity_segment,
};

/// Run `appliers` against the element `node`.
pub(crate) fn apply_to<F>(
    dom: &mut HtmlDom,
    node: NodeId,
    appliers: &[FormatApplier<F>],
    format: &F,
) {
    if let Some(element) = dom.element_mut(node) {
        apply_format(appliers, format, element);
    }
}

/// Drop style declarations of `node` that are already provided by `style`.
pub(crate) fn strip_style(dom: &mut HtmlDom, node: NodeId, style: &CssStyle) {
    if let Some(element) = dom.element_mut(node) {
        strip_default_style(element, style);
    }
}

pub(crate) fn apply_dataset(dom: &mut HtmlDom, node: NodeId, dataset: &DatasetFormat) {
    if let Some(element) = dom.element_mut(node) {
        write_dataset(element, dataset);
    }
}

fn write_dataset(element: &mut Element, dataset: &DatasetFormat) {
    for (key, value) in dataset {
        element.set_dataset(key, value);
    }
}
