// Copyright 2024 New Vector Ltd.
// Copyright 2022 The Matrix.org Foundation C.I.C.
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Element-Commercial
// Please see LICENSE in the repository root for full details.

//! Read-only questions about where the selection is in a model.

use super::block::Block;
use super::block_group::BlockGroupContainer;
use super::paragraph::Paragraph;
use super::segment::{Segment, SegmentKind};

pub fn has_selection_in_segment(segment: &Segment) -> bool {
    segment.is_selected
        || match &segment.kind {
            SegmentKind::General(g) => has_selection_in_group(g),
            _ => false,
        }
}

pub fn has_selection_in_group(group: &dyn BlockGroupContainer) -> bool {
    group.blocks().iter().any(has_selection_in_block)
}

pub fn has_selection_in_block(block: &Block) -> bool {
    match block {
        Block::Paragraph(p) => p.segments.iter().any(has_selection_in_segment),
        Block::Table(t) => t.rows.iter().any(|row| {
            row.cells
                .iter()
                .any(|cell| cell.is_selected || has_selection_in_group(cell))
        }),
        Block::Divider(d) => d.is_selected,
        Block::Entity(e) => e.is_selected,
        Block::BlockGroup(group) => has_selection_in_group(group.as_container()),
    }
}

/// A paragraph with nothing in it but selection markers.
pub fn is_empty_paragraph(paragraph: &Paragraph) -> bool {
    paragraph.is_empty()
}

/// Every selected segment of `group`, in document order. List format
/// holders count when their whole item is selected.
pub fn get_selected_segments<'a>(
    group: &'a dyn BlockGroupContainer,
    include_format_holder: bool,
) -> Vec<&'a Segment> {
    let mut result = Vec::new();
    collect_selected_segments(group, include_format_holder, &mut result);
    result
}

fn collect_selected_segments<'a>(
    group: &'a dyn BlockGroupContainer,
    include_format_holder: bool,
    out: &mut Vec<&'a Segment>,
) {
    for block in group.blocks() {
        match block {
            Block::Paragraph(p) => {
                for segment in &p.segments {
                    if segment.is_selected {
                        out.push(segment);
                    }
                    if let SegmentKind::General(g) = &segment.kind {
                        collect_selected_segments(g, include_format_holder, out);
                    }
                }
            }
            Block::Table(t) => {
                for cell in t.rows.iter().flat_map(|r| r.cells.iter()) {
                    collect_selected_segments(cell, include_format_holder, out);
                }
            }
            Block::BlockGroup(group) => {
                let before = out.len();
                collect_selected_segments(
                    group.as_container(),
                    include_format_holder,
                    out,
                );
                if let (true, Some(item)) = (include_format_holder, block.as_list_item()) {
                    let all_selected = out.len() > before
                        && item.blocks.iter().all(|b| match b {
                            Block::Paragraph(p) => p
                                .segments
                                .iter()
                                .all(|s| s.is_selected),
                            _ => has_selection_in_block(b),
                        });
                    if all_selected {
                        out.push(&item.format_holder);
                    }
                }
            }
            Block::Divider(_) | Block::Entity(_) => {}
        }
    }
}
