// Copyright 2024 New Vector Ltd.
// Copyright 2022 The Matrix.org Foundation C.I.C.
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Element-Commercial
// Please see LICENSE in the repository root for full details.

use crate::dom::{
    utf16_len, CssStyle, DomPosition, DomRange, DomSelection, HtmlDom, NodeId,
    TableSelection,
};
use crate::format::default_styles::default_style_of;
use crate::format::{
    BlockFormat, FormatAppliers, DEFAULT_FORMAT_APPLIERS, DEFAULT_STYLES,
};
use crate::model::ListLevel;

use super::handlers::DEFAULT_MODEL_HANDLERS;
use super::options::{
    ContentModelHandlerMap, ModelNode, ModelToDomOption, OnNodeCreated,
};

/// One open list element. The bottom entry is the element the lists are
/// written into and has no level.
#[derive(Clone, Debug)]
pub struct ListStackItem {
    pub node: NodeId,
    pub level: Option<ListLevel>,
}

#[derive(Clone, Debug, Default)]
pub struct ModelToDomListFormat {
    pub node_stack: Vec<ListStackItem>,
    /// Number of items written so far in the running list of each depth.
    pub thread_item_counts: Vec<i64>,
}

/// Where the last written content ended: the block element it went into
/// and the last leaf node written there, if any.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BlockAndSegmentNode {
    pub block: Option<NodeId>,
    pub segment: Option<NodeId>,
}

/// Selection collected while writing.
#[derive(Clone, Debug, Default)]
pub struct ModelToDomSelectionContext {
    pub current: BlockAndSegmentNode,
    pub start: Option<BlockAndSegmentNode>,
    pub end: Option<BlockAndSegmentNode>,
    pub image: Option<NodeId>,
    pub table: Option<TableSelection>,
}

impl ModelToDomSelectionContext {
    /// The selection to hand back to the caller. An image selection wins,
    /// then a regular range, then selected table cells.
    pub fn resolve(&self, dom: &HtmlDom) -> Option<DomSelection> {
        if let Some(image) = self.image {
            return Some(DomSelection::Image { image });
        }
        if let (Some(start), Some(end)) = (self.start, self.end) {
            if let (Some(start), Some(end)) =
                (position_of(dom, start), position_of(dom, end))
            {
                return Some(DomSelection::range(DomRange::new(start, end)));
            }
        }
        self.table.map(DomSelection::Table)
    }
}

/// The position right after `pos.segment`, or the start of `pos.block`
/// when nothing was written into it yet.
fn position_of(dom: &HtmlDom, pos: BlockAndSegmentNode) -> Option<DomPosition> {
    match pos.segment {
        None => pos.block.map(|block| DomPosition::new(block, 0)),
        Some(segment) => match dom.text(segment) {
            Some(text) => Some(DomPosition::new(segment, utf16_len(text))),
            None => {
                let parent = dom.parent(segment)?;
                let index = dom.index_in_parent(segment)?;
                Some(DomPosition::new(parent, index + 1))
            }
        },
    }
}

pub struct ModelToDomContext {
    pub format_appliers: FormatAppliers,
    pub default_format_appliers: &'static FormatAppliers,
    pub model_handlers: ContentModelHandlerMap,
    pub default_model_handlers: &'static ContentModelHandlerMap,
    pub list_format: ModelToDomListFormat,
    pub selection: ModelToDomSelectionContext,
    /// Block format an implicit paragraph can have and still be written
    /// without a wrapper element.
    pub inherited_block_format: BlockFormat,
    /// Style the element of the current paragraph already provides to its
    /// segments.
    pub implicit_segment_style: CssStyle,
    pub allow_cache_element: bool,
    on_node_created: Option<OnNodeCreated>,
}

impl ModelToDomContext {
    pub fn new(option: &ModelToDomOption) -> Self {
        Self {
            format_appliers: FormatAppliers::build(
                &option.format_applier_override,
                &option.additional_format_appliers,
            ),
            default_format_appliers: &DEFAULT_FORMAT_APPLIERS,
            model_handlers: DEFAULT_MODEL_HANDLERS
                .with_overrides(&option.model_handler_override),
            default_model_handlers: &DEFAULT_MODEL_HANDLERS,
            list_format: ModelToDomListFormat::default(),
            selection: ModelToDomSelectionContext::default(),
            inherited_block_format: BlockFormat::default(),
            implicit_segment_style: CssStyle::default(),
            allow_cache_element: !option.disable_cache_element,
            on_node_created: option.on_node_created.clone(),
        }
    }

    pub fn default_style(&self, tag: &str) -> CssStyle {
        default_style_of(&DEFAULT_STYLES, tag)
    }

    pub fn node_created(&self, model: ModelNode<'_>, node: NodeId) {
        if let Some(callback) = &self.on_node_created {
            callback(model, node);
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn position_after_text_is_its_utf16_length() {
        let mut dom = HtmlDom::new();
        let div = dom.create_element("div");
        let text = dom.create_text("a😀");
        dom.append_child(dom.root(), div);
        dom.append_child(div, text);

        let pos = BlockAndSegmentNode {
            block: Some(div),
            segment: Some(text),
        };
        assert_eq!(position_of(&dom, pos), Some(DomPosition::new(text, 3)));
    }

    #[test]
    fn position_after_element_is_the_next_child_index() {
        let mut dom = HtmlDom::new();
        let div = dom.create_element("div");
        let span = dom.create_element("span");
        let br = dom.create_element("br");
        dom.append_child(dom.root(), div);
        dom.append_child(div, span);
        dom.append_child(span, br);

        let pos = BlockAndSegmentNode {
            block: Some(div),
            segment: Some(br),
        };
        assert_eq!(position_of(&dom, pos), Some(DomPosition::new(span, 1)));

        let empty = BlockAndSegmentNode {
            block: Some(div),
            segment: None,
        };
        assert_eq!(position_of(&dom, empty), Some(DomPosition::new(div, 0)));
    }

    #[test]
    fn image_selection_wins_over_range() {
        let mut dom = HtmlDom::new();
        let img = dom.create_element("img");
        dom.append_child(dom.root(), img);
        let at_root = BlockAndSegmentNode {
            block: Some(dom.root()),
            segment: None,
        };
        let selection = ModelToDomSelectionContext {
            start: Some(at_root),
            end: Some(at_root),
            image: Some(img),
            ..Default::default()
        };
        assert_eq!(
            selection.resolve(&dom),
            Some(DomSelection::Image { image: img })
        );
    }
}
