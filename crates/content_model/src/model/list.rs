// Copyright 2024 New Vector Ltd.
// Copyright 2022 The Matrix.org Foundation C.I.C.
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Element-Commercial
// Please see LICENSE in the repository root for full details.

use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

use super::block::Block;
use super::block_group::{BlockGroupContainer, BlockGroupType};
use super::segment::{Segment, SegmentKind};
use crate::format::{DatasetFormat, ListItemFormat, ListLevelFormat, SegmentFormat};

#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
pub enum ListType {
    #[serde(rename = "OL")]
    #[strum(serialize = "ol")]
    Ordered,
    #[serde(rename = "UL")]
    #[strum(serialize = "ul")]
    Unordered,
}

impl ListType {
    pub fn tag(&self) -> &'static str {
        match self {
            ListType::Ordered => "ol",
            ListType::Unordered => "ul",
        }
    }
}

/// One `<ol>`/`<ul>` a list item is nested in.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListLevel {
    pub list_type: ListType,
    #[serde(default)]
    pub format: ListLevelFormat,
    #[serde(default, skip_serializing_if = "DatasetFormat::is_empty")]
    pub dataset: DatasetFormat,
}

impl ListLevel {
    pub fn new(list_type: ListType) -> Self {
        Self {
            list_type,
            format: ListLevelFormat::default(),
            dataset: DatasetFormat::default(),
        }
    }

    /// A copy that continues the numbering of this level instead of
    /// restarting it.
    pub fn continued(&self) -> Self {
        let mut level = self.clone();
        level.format.thread.start_number_override = None;
        level.format.thread.display_for_dummy_item = None;
        level
    }
}

/// A list item. `levels` is the whole chain of lists it sits in, outermost
/// first, so sibling items at different depths never share a list node.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListItem {
    pub blocks: Vec<Block>,
    pub levels: Vec<ListLevel>,
    /// Keeps the segment format of an item whose content is empty.
    pub format_holder: Segment,
    #[serde(default)]
    pub format: ListItemFormat,
}

impl ListItem {
    pub fn new(levels: Vec<ListLevel>, format_holder_format: SegmentFormat) -> Self {
        Self {
            blocks: Vec::new(),
            levels,
            format_holder: Segment::new(
                SegmentKind::SelectionMarker,
                format_holder_format,
            ),
            format: ListItemFormat::default(),
        }
    }

    pub fn depth(&self) -> usize {
        self.levels.len()
    }

    /// Remove the innermost level. Once no level is left the item is about
    /// to become plain content, so its paragraphs stop being implicit.
    pub fn outdent(&mut self) -> Option<ListLevel> {
        let removed = self.levels.pop();
        if self.levels.is_empty() {
            self.blocks
                .iter_mut()
                .filter_map(Block::as_paragraph_mut)
                .for_each(|p| p.set_not_implicit());
        }
        removed
    }

    pub fn is_dummy(&self) -> bool {
        self.levels.last().is_some_and(|l| {
            l.format.thread.display_for_dummy_item.as_deref() == Some("block")
        })
    }
}

impl BlockGroupContainer for ListItem {
    fn block_group_type(&self) -> BlockGroupType {
        BlockGroupType::ListItem
    }

    fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    fn blocks_mut(&mut self) -> &mut Vec<Block> {
        &mut self.blocks
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn list_type_serializes_as_tag_name() {
        assert_eq!(
            serde_json::to_string(&ListType::Ordered).unwrap(),
            r#""OL""#
        );
        assert_eq!(ListType::Unordered.tag(), "ul");
    }

    #[test]
    fn outdenting_the_last_level_makes_paragraphs_real() {
        let mut item = ListItem::new(
            vec![ListLevel::new(ListType::Ordered), ListLevel::new(ListType::Unordered)],
            SegmentFormat::default(),
        );
        item.blocks
            .push(crate::model::create_paragraph(true, None, None, None).into());

        assert!(item.outdent().is_some());
        assert!(item.blocks[0].as_paragraph().unwrap().is_implicit);

        assert!(item.outdent().is_some());
        assert!(!item.blocks[0].as_paragraph().unwrap().is_implicit);
        assert!(item.outdent().is_none());
    }

    #[test]
    fn continued_level_drops_thread_state() {
        let mut level = ListLevel::new(ListType::Ordered);
        level.format.thread.start_number_override = Some(3);
        level.format.thread.display_for_dummy_item = Some("block".into());
        level.format.list_style.list_style_type = Some("decimal".into());

        let continued = level.continued();

        assert_eq!(continued.format.thread.start_number_override, None);
        assert_eq!(continued.format.thread.display_for_dummy_item, None);
        assert_eq!(
            continued.format.list_style.list_style_type.as_deref(),
            Some("decimal")
        );
    }
}
