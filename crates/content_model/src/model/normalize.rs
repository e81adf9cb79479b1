// Copyright 2024 New Vector Ltd.
// Copyright 2022 The Matrix.org Foundation C.I.C.
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Element-Commercial
// Please see LICENSE in the repository root for full details.

//! Tidying a model after it was parsed or edited.

use super::block::Block;
use super::block_group::{BlockGroup, BlockGroupContainer};
use super::creators::create_br;
use super::paragraph::Paragraph;
use super::segment::{Segment, SegmentKind};

/// Normalize every block of `group`, recursively, and drop blocks that
/// ended up empty. List items without levels are replaced by their content.
pub fn normalize_content_model(group: &mut dyn BlockGroupContainer) {
    let blocks = group.blocks_mut();
    let mut i = blocks.len();
    while i > 0 {
        i -= 1;
        match &mut blocks[i] {
            Block::Paragraph(p) => normalize_paragraph(p),
            Block::Table(t) => {
                for cell in t.rows.iter_mut().flat_map(|r| r.cells.iter_mut()) {
                    normalize_content_model(cell);
                }
            }
            Block::BlockGroup(g) => normalize_content_model(g.as_container_mut()),
            Block::Divider(_) | Block::Entity(_) => {}
        }

        if let Block::BlockGroup(BlockGroup::ListItem(item)) = &mut blocks[i] {
            if item.levels.is_empty() {
                let mut hoisted = std::mem::take(&mut item.blocks);
                hoisted
                    .iter_mut()
                    .filter_map(Block::as_paragraph_mut)
                    .for_each(Paragraph::set_not_implicit);
                blocks.splice(i..=i, hoisted);
                continue;
            }
        }

        if is_block_empty(&blocks[i]) {
            blocks.remove(i);
        }
    }
}

fn is_block_empty(block: &Block) -> bool {
    match block {
        Block::Paragraph(p) => p.segments.is_empty(),
        Block::Table(t) => t.rows.iter().all(|r| r.cells.is_empty()),
        Block::BlockGroup(BlockGroup::General(_)) => false,
        Block::BlockGroup(g) => g.as_container().blocks().is_empty(),
        Block::Divider(_) | Block::Entity(_) => false,
    }
}

/// Keep a real paragraph visible and free of redundant line breaks:
/// - a paragraph whose last segment is a marker after nothing (or after a
///   `<br>`) gets a `<br>`, otherwise the line would collapse,
/// - a single trailing `<br>` after other content is dropped,
/// - empty unselected text is removed and neighbouring text with the same
///   decorations is merged.
pub fn normalize_paragraph(paragraph: &mut Paragraph) {
    let segments = &mut paragraph.segments;
    if !paragraph.is_implicit && !segments.is_empty() {
        let len = segments.len();
        let last_is_marker = segments[len - 1].is_marker();
        let second_last_is_br_or_none =
            len < 2 || segments[len - 2].is_br();

        if last_is_marker && second_last_is_br_or_none {
            let format = segments[len - 1].format.clone();
            segments.push(create_br(Some(&format)));
        } else if len > 1 && segments[len - 1].is_br() {
            let visible: Vec<&Segment> =
                segments.iter().filter(|s| !s.is_marker()).collect();
            if visible.len() > 1 && !visible[visible.len() - 2].is_br() {
                segments.pop();
            }
        }
    }

    segments.retain(|s| !matches!(&s.kind, SegmentKind::Text { text } if text.is_empty() && !s.is_selected));
    merge_texts(segments);
}

fn merge_texts(segments: &mut Vec<Segment>) {
    let mut merged: Vec<Segment> = Vec::with_capacity(segments.len());
    for segment in segments.drain(..) {
        if let (Some(previous), Some(text)) = (merged.last_mut(), segment.text()) {
            if previous.same_decoration(&segment) {
                if let Some(previous_text) = previous.text_mut() {
                    previous_text.push_str(text);
                    continue;
                }
            }
        }
        merged.push(segment);
    }
    *segments = merged;
}
