// Copyright 2024 New Vector Ltd.
// Copyright 2022 The Matrix.org Foundation C.I.C.
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Element-Commercial
// Please see LICENSE in the repository root for full details.

use std::rc::Rc;

use crate::dom::{HtmlDom, NodeId};
use crate::format::{AdditionalFormatAppliers, FormatApplierOverride};
use crate::model::{
    Block, BlockGroupContainer, Divider, Entity, FormatContainer, GeneralBlock,
    ListItem, ListLevel, Paragraph, Segment, Table, TableCell, TableRow,
};

use super::context::ModelToDomContext;

/// Writes one block before `ref_node` in `parent` and returns the node the
/// next sibling block goes before.
pub type BlockHandler<T> = fn(
    &mut HtmlDom,
    NodeId,
    &T,
    &mut ModelToDomContext,
    Option<NodeId>,
) -> Option<NodeId>;

/// Appends one segment to `parent`, pushing the nodes created for it.
pub type SegmentHandler =
    fn(&mut HtmlDom, NodeId, &Segment, &mut ModelToDomContext, &mut Vec<NodeId>);

/// Writes all blocks of a group into `parent`, replacing what was there.
pub type BlockGroupChildrenHandler =
    fn(&mut HtmlDom, NodeId, &dyn BlockGroupContainer, &mut ModelToDomContext);

/// A model node a DOM node was created for.
#[derive(Clone, Copy, Debug)]
pub enum ModelNode<'a> {
    Paragraph(&'a Paragraph),
    Table(&'a Table),
    TableRow(&'a TableRow),
    TableCell(&'a TableCell),
    Divider(&'a Divider),
    Entity(&'a Entity),
    FormatContainer(&'a FormatContainer),
    GeneralBlock(&'a GeneralBlock),
    ListItem(&'a ListItem),
    ListLevel(&'a ListLevel),
    Segment(&'a Segment),
}

/// Called once for every DOM node created for a model node.
pub type OnNodeCreated = Rc<dyn Fn(ModelNode<'_>, NodeId)>;

macro_rules! model_handlers {
    ( $( $(#[$meta:meta])* $name:ident: $ty:ty ),* $(,)? ) => {
        /// The handler of every model node kind.
        #[derive(Clone, Copy)]
        pub struct ContentModelHandlerMap {
            $( $(#[$meta])* pub $name: $ty, )*
        }

        /// Replacements for some of the default handlers.
        #[derive(Clone, Copy, Default)]
        pub struct ContentModelHandlerOverride {
            $( pub $name: Option<$ty>, )*
        }

        impl ContentModelHandlerMap {
            /// `self` with every handler set in `overrides` replaced.
            pub fn with_overrides(&self, overrides: &ContentModelHandlerOverride) -> Self {
                Self {
                    $( $name: overrides.$name.unwrap_or(self.$name), )*
                }
            }
        }
    };
}

model_handlers! {
    /// Dispatches a block to the handler of its kind.
    block: BlockHandler<Block>,
    block_group_children: BlockGroupChildrenHandler,
    paragraph: BlockHandler<Paragraph>,
    table: BlockHandler<Table>,
    divider: BlockHandler<Divider>,
    entity_block: BlockHandler<Entity>,
    format_container: BlockHandler<FormatContainer>,
    general_block: BlockHandler<GeneralBlock>,
    /// Makes sure the list elements an item lives in exist.
    list: BlockHandler<ListItem>,
    list_item: BlockHandler<ListItem>,
    /// Dispatches a segment to the handler of its kind.
    segment: SegmentHandler,
    text: SegmentHandler,
    br: SegmentHandler,
    image: SegmentHandler,
    general_segment: SegmentHandler,
    entity_segment: SegmentHandler,
}

/// Options for writing a model into a DOM tree.
#[derive(Clone, Default)]
pub struct ModelToDomOption {
    pub format_applier_override: FormatApplierOverride,
    pub additional_format_appliers: AdditionalFormatAppliers,
    pub model_handler_override: ContentModelHandlerOverride,
    pub on_node_created: Option<OnNodeCreated>,
    /// Always create new elements, even when a block remembers the element
    /// it was read from.
    pub disable_cache_element: bool,
}

impl ModelToDomOption {
    pub fn with_on_node_created(
        mut self,
        callback: impl Fn(ModelNode<'_>, NodeId) + 'static,
    ) -> Self {
        self.on_node_created = Some(Rc::new(callback));
        self
    }
}
