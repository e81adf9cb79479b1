// Copyright 2024 New Vector Ltd.
// Copyright 2022 The Matrix.org Foundation C.I.C.
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Element-Commercial
// Please see LICENSE in the repository root for full details.

//! Appending content to a block group while it is being built.

use super::block::Block;
use super::block_group::BlockGroupContainer;
use super::creators::create_paragraph;
use super::paragraph::Paragraph;
use super::segment::Segment;
use crate::format::{BlockFormat, SegmentFormat};

pub fn add_block(group: &mut dyn BlockGroupContainer, block: impl Into<Block>) {
    group.blocks_mut().push(block.into());
}

/// The last block of `group` when it is a paragraph, otherwise a new
/// implicit paragraph appended to it.
pub fn ensure_paragraph<'a>(
    group: &'a mut dyn BlockGroupContainer,
    block_format: Option<&BlockFormat>,
    segment_format: Option<&SegmentFormat>,
) -> &'a mut Paragraph {
    let blocks = group.blocks_mut();
    if !matches!(blocks.last(), Some(Block::Paragraph(_))) {
        blocks.push(create_paragraph(true, block_format, segment_format, None).into());
    }
    match blocks.last_mut() {
        Some(Block::Paragraph(p)) => p,
        _ => unreachable!("a paragraph was just pushed"),
    }
}

/// Append `segment` to the paragraph at the end of `group`.
///
/// Selection markers collapse into a selected neighbour: a marker after a
/// selected segment is dropped, and a selected segment after a selected
/// marker replaces the marker.
pub fn add_segment<'a>(
    group: &'a mut dyn BlockGroupContainer,
    segment: Segment,
    block_format: Option<&BlockFormat>,
) -> &'a mut Paragraph {
    let paragraph = ensure_paragraph(group, block_format, None);
    let last_selected = paragraph.segments.last().map(|s| (s.is_marker(), s.is_selected));

    if segment.is_marker() {
        match last_selected {
            Some((_, true)) if segment.is_selected => {}
            _ => paragraph.segments.push(segment),
        }
    } else {
        if segment.is_selected && last_selected == Some((true, true)) {
            paragraph.segments.pop();
        }
        paragraph.segments.push(segment);
    }
    paragraph
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::model::creators::*;
    use crate::model::ContentModelDocument;

    fn selected_text(text: &str) -> Segment {
        let mut segment = create_text(text, None);
        segment.is_selected = true;
        segment
    }

    #[test]
    fn segments_go_into_an_implicit_paragraph() {
        let mut model = ContentModelDocument::default();
        add_segment(&mut model, create_text("a", None), None);
        add_segment(&mut model, create_text("b", None), None);

        assert_eq!(model.blocks.len(), 1);
        let paragraph = model.blocks[0].as_paragraph().unwrap();
        assert!(paragraph.is_implicit);
        assert_eq!(paragraph.text(), "ab");
    }

    #[test]
    fn marker_is_dropped_after_selected_segment() {
        let mut model = ContentModelDocument::default();
        add_segment(&mut model, selected_text("a"), None);
        let paragraph = add_segment(&mut model, create_selection_marker(None), None);
        assert_eq!(paragraph.segments.len(), 1);
    }

    #[test]
    fn selected_segment_replaces_marker() {
        let mut model = ContentModelDocument::default();
        add_segment(&mut model, create_selection_marker(None), None);
        let paragraph = add_segment(&mut model, selected_text("a"), None);
        assert_eq!(paragraph.segments.len(), 1);
        assert_eq!(paragraph.segments[0].text(), Some("a"));
    }

    #[test]
    fn unselected_segment_keeps_marker() {
        let mut model = ContentModelDocument::default();
        add_segment(&mut model, create_selection_marker(None), None);
        let paragraph = add_segment(&mut model, create_text("a", None), None);
        assert_eq!(paragraph.segments.len(), 2);
    }
}
