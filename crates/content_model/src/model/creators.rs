// Copyright 2024 New Vector Ltd.
// Copyright 2022 The Matrix.org Foundation C.I.C.
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Element-Commercial
// Please see LICENSE in the repository root for full details.

//! Shorthands for building model nodes, mostly used by the converters and
//! by tests.

use super::block::{Block, Divider, Entity};
use super::block_group::{
    BlockGroup, ContentModelDocument, FormatContainer, GeneralBlock,
};
use super::list::{ListItem, ListLevel, ListType};
use super::paragraph::{Paragraph, ParagraphDecorator};
use super::segment::{Image, Segment, SegmentKind};
use super::table::{Table, TableCell, TableRow};
use crate::dom::NodeId;
use crate::format::{
    BlockFormat, EntityInfoFormat, FormatContainerFormat, ListLevelFormat,
    SegmentFormat, TableCellFormat, TableFormat,
};

pub fn create_empty_model(default_format: Option<SegmentFormat>) -> ContentModelDocument {
    ContentModelDocument {
        blocks: Vec::new(),
        format: default_format.unwrap_or_default(),
    }
}

pub fn create_paragraph(
    is_implicit: bool,
    format: Option<&BlockFormat>,
    segment_format: Option<&SegmentFormat>,
    decorator: Option<&ParagraphDecorator>,
) -> Paragraph {
    Paragraph {
        segments: Vec::new(),
        format: format.cloned().unwrap_or_default(),
        segment_format: segment_format.filter(|f| !f.is_empty()).cloned(),
        decorator: decorator.cloned(),
        is_implicit,
        cached_element: None,
    }
}

pub fn create_paragraph_decorator(
    tag_name: &str,
    format: Option<&SegmentFormat>,
) -> ParagraphDecorator {
    ParagraphDecorator {
        tag_name: tag_name.to_ascii_lowercase(),
        format: format.cloned().unwrap_or_default(),
    }
}

pub fn create_text(text: &str, format: Option<&SegmentFormat>) -> Segment {
    Segment::new(
        SegmentKind::Text {
            text: text.to_owned(),
        },
        format.cloned().unwrap_or_default(),
    )
}

pub fn create_br(format: Option<&SegmentFormat>) -> Segment {
    Segment::new(SegmentKind::Br, format.cloned().unwrap_or_default())
}

/// A selected marker. Markers only exist to carry a selection.
pub fn create_selection_marker(format: Option<&SegmentFormat>) -> Segment {
    let mut marker = Segment::new(
        SegmentKind::SelectionMarker,
        format.cloned().unwrap_or_default(),
    );
    marker.is_selected = true;
    marker
}

pub fn create_image(src: &str, format: Option<&SegmentFormat>) -> Segment {
    Segment::new(
        SegmentKind::Image(Image {
            src: src.to_owned(),
            ..Default::default()
        }),
        format.cloned().unwrap_or_default(),
    )
}

pub fn create_general_segment(element: NodeId, format: Option<&SegmentFormat>) -> Segment {
    Segment::new(
        SegmentKind::General(create_general_block(element)),
        format.cloned().unwrap_or_default(),
    )
}

pub fn create_general_block(element: NodeId) -> GeneralBlock {
    GeneralBlock {
        element,
        blocks: Vec::new(),
        format: BlockFormat::default(),
        is_selected: false,
    }
}

pub fn create_entity(
    wrapper: NodeId,
    entity_format: EntityInfoFormat,
    format: Option<&SegmentFormat>,
) -> Entity {
    Entity {
        wrapper,
        entity_format,
        format: format.cloned().unwrap_or_default(),
        is_selected: false,
    }
}

/// The inline form of an entity.
pub fn create_entity_segment(entity: Entity) -> Segment {
    let mut segment = Segment::new(
        SegmentKind::Entity {
            wrapper: entity.wrapper,
            entity_format: entity.entity_format,
        },
        entity.format,
    );
    segment.is_selected = entity.is_selected;
    segment
}

pub fn create_divider(tag_name: &str) -> Divider {
    Divider {
        tag_name: tag_name.to_ascii_lowercase(),
        format: Default::default(),
        is_selected: false,
        cached_element: None,
    }
}

pub fn create_format_container(
    tag_name: &str,
    format: Option<&FormatContainerFormat>,
) -> FormatContainer {
    FormatContainer {
        tag_name: tag_name.to_ascii_lowercase(),
        blocks: Vec::new(),
        format: format.cloned().unwrap_or_default(),
        cached_element: None,
    }
}

pub fn create_list_level(
    list_type: ListType,
    format: Option<&ListLevelFormat>,
) -> ListLevel {
    let mut level = ListLevel::new(list_type);
    if let Some(format) = format {
        level.format = format.clone();
    }
    level
}

/// A list item with copies of `levels`.
pub fn create_list_item(
    levels: &[ListLevel],
    format_holder_format: Option<&SegmentFormat>,
) -> ListItem {
    ListItem::new(
        levels.to_vec(),
        format_holder_format.cloned().unwrap_or_default(),
    )
}

pub fn create_table(row_count: usize, format: Option<&TableFormat>) -> Table {
    Table {
        rows: (0..row_count)
            .map(|_| TableRow {
                height: 0.0,
                format: BlockFormat::default(),
                cells: Vec::new(),
                cached_element: None,
            })
            .collect(),
        widths: Vec::new(),
        format: format.cloned().unwrap_or_default(),
        dataset: Default::default(),
        cached_element: None,
    }
}

pub fn create_table_cell(
    span_left: bool,
    span_above: bool,
    is_header: bool,
    format: Option<&TableCellFormat>,
) -> TableCell {
    TableCell {
        blocks: Vec::new(),
        format: format.cloned().unwrap_or_default(),
        span_left,
        span_above,
        is_header,
        is_selected: false,
        dataset: Default::default(),
        cached_element: None,
    }
}

impl From<Paragraph> for Block {
    fn from(value: Paragraph) -> Self {
        Block::Paragraph(value)
    }
}

impl From<Table> for Block {
    fn from(value: Table) -> Self {
        Block::Table(value)
    }
}

impl From<Divider> for Block {
    fn from(value: Divider) -> Self {
        Block::Divider(value)
    }
}

impl From<Entity> for Block {
    fn from(value: Entity) -> Self {
        Block::Entity(value)
    }
}

impl From<ListItem> for Block {
    fn from(value: ListItem) -> Self {
        Block::BlockGroup(BlockGroup::ListItem(value))
    }
}

impl From<FormatContainer> for Block {
    fn from(value: FormatContainer) -> Self {
        Block::BlockGroup(BlockGroup::FormatContainer(value))
    }
}

impl From<GeneralBlock> for Block {
    fn from(value: GeneralBlock) -> Self {
        Block::BlockGroup(BlockGroup::General(value))
    }
}
