// Copyright 2024 New Vector Ltd.
// Copyright 2022 The Matrix.org Foundation C.I.C.
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Element-Commercial
// Please see LICENSE in the repository root for full details.

use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display};

use super::block::Block;
use super::list::ListItem;
use crate::dom::NodeId;
use crate::format::{BlockFormat, FormatContainerFormat, SegmentFormat};

fn is_false(value: &bool) -> bool {
    !*value
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Display, AsRefStr)]
pub enum BlockGroupType {
    Document,
    FormatContainer,
    ListItem,
    TableCell,
    General,
}

/// Anything that owns an ordered list of blocks.
pub trait BlockGroupContainer {
    fn block_group_type(&self) -> BlockGroupType;

    fn blocks(&self) -> &[Block];

    fn blocks_mut(&mut self) -> &mut Vec<Block>;
}

/// The root of a Content Model.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentModelDocument {
    pub blocks: Vec<Block>,
    /// Default segment format of the editor, used for new content.
    #[serde(default)]
    pub format: SegmentFormat,
}

impl BlockGroupContainer for ContentModelDocument {
    fn block_group_type(&self) -> BlockGroupType {
        BlockGroupType::Document
    }

    fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    fn blocks_mut(&mut self) -> &mut Vec<Block> {
        &mut self.blocks
    }
}

/// Block groups that can appear inside a blocks array.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "blockGroupType")]
pub enum BlockGroup {
    FormatContainer(FormatContainer),
    ListItem(ListItem),
    General(GeneralBlock),
}

impl BlockGroup {
    pub fn as_container(&self) -> &dyn BlockGroupContainer {
        match self {
            BlockGroup::FormatContainer(c) => c,
            BlockGroup::ListItem(c) => c,
            BlockGroup::General(c) => c,
        }
    }

    pub fn as_container_mut(&mut self) -> &mut dyn BlockGroupContainer {
        match self {
            BlockGroup::FormatContainer(c) => c,
            BlockGroup::ListItem(c) => c,
            BlockGroup::General(c) => c,
        }
    }

    pub fn clear_cached_element(&mut self) {
        if let BlockGroup::FormatContainer(c) = self {
            c.cached_element = None;
        }
    }
}

/// A block element wrapping other blocks, e.g. `<blockquote>`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormatContainer {
    pub tag_name: String,
    pub blocks: Vec<Block>,
    #[serde(default)]
    pub format: FormatContainerFormat,
    #[serde(skip)]
    pub cached_element: Option<NodeId>,
}

impl BlockGroupContainer for FormatContainer {
    fn block_group_type(&self) -> BlockGroupType {
        BlockGroupType::FormatContainer
    }

    fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    fn blocks_mut(&mut self) -> &mut Vec<Block> {
        &mut self.blocks
    }
}

/// An element nothing else understands. It is cloned (without children)
/// when written back, and its children are modelled as usual.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneralBlock {
    pub element: NodeId,
    pub blocks: Vec<Block>,
    #[serde(default)]
    pub format: BlockFormat,
    #[serde(default, skip_serializing_if = "is_false")]
    pub is_selected: bool,
}

impl BlockGroupContainer for GeneralBlock {
    fn block_group_type(&self) -> BlockGroupType {
        BlockGroupType::General
    }

    fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    fn blocks_mut(&mut self) -> &mut Vec<Block> {
        &mut self.blocks
    }
}
