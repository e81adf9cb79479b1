// Copyright 2024 New Vector Ltd.
// Copyright 2022 The Matrix.org Foundation C.I.C.
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Element-Commercial
// Please see LICENSE in the repository root for full details.

use super::paths::{group_at_mut, InsertPoint, ParagraphPath};
use crate::model::{
    create_br, create_paragraph, normalize_paragraph, ContentModelDocument,
    Paragraph,
};

/// Cut `paragraph` at the segment `marker`. The marker and everything after
/// it move into the returned paragraph, which keeps the formats and the
/// decorator of the original.
pub fn split_paragraph_at(paragraph: &mut Paragraph, marker: usize) -> Paragraph {
    let mut new_paragraph = create_paragraph(
        false,
        Some(&paragraph.format),
        paragraph.segment_format.as_ref(),
        paragraph.decorator.as_ref(),
    );
    let marker = marker.min(paragraph.segments.len());
    new_paragraph.segments = paragraph.segments.split_off(marker);

    paragraph.set_not_implicit();
    if paragraph.is_empty() {
        let format = new_paragraph
            .segments
            .first()
            .map(|s| s.format.clone())
            .unwrap_or_default();
        paragraph.segments.push(create_br(Some(&format)));
    }
    paragraph.cached_element = None;

    normalize_paragraph(paragraph);
    normalize_paragraph(&mut new_paragraph);
    new_paragraph
}

/// Split the paragraph of `insert_point` and move the insert point into the
/// second half. Returns where the new paragraph is.
pub fn split_paragraph(
    model: &mut ContentModelDocument,
    insert_point: &mut InsertPoint,
) -> Option<ParagraphPath> {
    let group = group_at_mut(model, &insert_point.paragraph.path)?;
    let index = insert_point.paragraph.index;
    let paragraph = group.blocks_mut().get_mut(index)?.as_paragraph_mut()?;

    let new_paragraph = split_paragraph_at(paragraph, insert_point.marker);
    insert_point.marker = new_paragraph.marker_index().unwrap_or(0);
    group.blocks_mut().insert(index + 1, new_paragraph.into());
    insert_point.paragraph.index = index + 1;

    tracing::trace!(at = ?insert_point.paragraph, "split paragraph");
    Some(insert_point.paragraph.clone())
}
