// Copyright 2024 New Vector Ltd.
// Copyright 2022 The Matrix.org Foundation C.I.C.
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Element-Commercial
// Please see LICENSE in the repository root for full details.

use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display};

use super::block_group::{BlockGroup, BlockGroupContainer};
use super::list::ListItem;
use super::paragraph::Paragraph;
use super::table::Table;
use crate::dom::NodeId;
use crate::format::{DividerFormat, EntityInfoFormat, SegmentFormat};

fn is_false(value: &bool) -> bool {
    !*value
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "blockType")]
pub enum Block {
    Paragraph(Paragraph),
    Table(Table),
    Divider(Divider),
    Entity(Entity),
    BlockGroup(BlockGroup),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Display, AsRefStr)]
pub enum BlockType {
    Paragraph,
    Table,
    Divider,
    Entity,
    BlockGroup,
}

/// `<hr>` or an empty `<div>` used as a separator.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Divider {
    pub tag_name: String,
    #[serde(default)]
    pub format: DividerFormat,
    #[serde(default, skip_serializing_if = "is_false")]
    pub is_selected: bool,
    #[serde(skip)]
    pub cached_element: Option<NodeId>,
}

/// Opaque content owned by the host application. The wrapper element is
/// reused as is when the model is written back.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Entity {
    pub wrapper: NodeId,
    pub entity_format: EntityInfoFormat,
    #[serde(default)]
    pub format: SegmentFormat,
    #[serde(default, skip_serializing_if = "is_false")]
    pub is_selected: bool,
}

impl Block {
    pub fn block_type(&self) -> BlockType {
        match self {
            Block::Paragraph(_) => BlockType::Paragraph,
            Block::Table(_) => BlockType::Table,
            Block::Divider(_) => BlockType::Divider,
            Block::Entity(_) => BlockType::Entity,
            Block::BlockGroup(_) => BlockType::BlockGroup,
        }
    }

    pub fn as_paragraph(&self) -> Option<&Paragraph> {
        match self {
            Block::Paragraph(p) => Some(p),
            _ => None,
        }
    }

    pub fn as_paragraph_mut(&mut self) -> Option<&mut Paragraph> {
        match self {
            Block::Paragraph(p) => Some(p),
            _ => None,
        }
    }

    pub fn as_list_item(&self) -> Option<&ListItem> {
        match self {
            Block::BlockGroup(BlockGroup::ListItem(item)) => Some(item),
            _ => None,
        }
    }

    pub fn as_list_item_mut(&mut self) -> Option<&mut ListItem> {
        match self {
            Block::BlockGroup(BlockGroup::ListItem(item)) => Some(item),
            _ => None,
        }
    }

    pub fn as_group(&self) -> Option<&dyn BlockGroupContainer> {
        match self {
            Block::BlockGroup(group) => Some(group.as_container()),
            _ => None,
        }
    }

    pub fn as_group_mut(&mut self) -> Option<&mut dyn BlockGroupContainer> {
        match self {
            Block::BlockGroup(group) => Some(group.as_container_mut()),
            _ => None,
        }
    }

    /// Forget the element this block was read from, so it is written out
    /// fresh next time.
    pub fn clear_cached_element(&mut self) {
        match self {
            Block::Paragraph(p) => p.cached_element = None,
            Block::Table(t) => t.cached_element = None,
            Block::Divider(d) => d.cached_element = None,
            Block::Entity(_) => {}
            Block::BlockGroup(group) => group.clear_cached_element(),
        }
    }
}
