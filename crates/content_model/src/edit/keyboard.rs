// Copyright 2024 New Vector Ltd.
// Copyright 2022 The Matrix.org Foundation C.I.C.
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Element-Commercial
// Please see LICENSE in the repository root for full details.

//! Edits triggered by typing: Enter, Backspace/Delete and text input.

use super::context::{
    run_edit_steps, DeleteResult, DeleteSelectionContext,
    FormatContentModelContext,
};
use super::delete_selection::delete_selection;
use super::paths::paragraph_at_mut;
use super::steps::{
    CLEAR_DELETE_RESULT, DELETE_COLLAPSED_SELECTION_BACKWARD,
    DELETE_COLLAPSED_SELECTION_FORWARD, DELETE_EMPTY_QUOTE,
    HANDLE_ENTER_ON_LIST, HANDLE_ENTER_ON_PARAGRAPH,
};
use crate::model::{create_text, normalize_content_model, ContentModelDocument};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DeleteDirection {
    Backward,
    Forward,
}

/// Enter, or Shift+Enter with `shift` set. Removes the selected content,
/// then breaks the line at the cursor. Without Shift the list and quote
/// around the cursor are taken into account.
pub fn keyboard_enter(
    model: &mut ContentModelDocument,
    shift: bool,
    mut format_context: Option<&mut FormatContentModelContext>,
) -> DeleteResult {
    let result = delete_selection(model, &[], format_context.as_deref_mut());
    if result.insert_point.is_none() {
        tracing::debug!("enter without selection ignored");
        return result.delete_result;
    }

    let steps = if shift {
        vec![CLEAR_DELETE_RESULT, HANDLE_ENTER_ON_PARAGRAPH]
    } else {
        vec![
            CLEAR_DELETE_RESULT,
            HANDLE_ENTER_ON_LIST,
            DELETE_EMPTY_QUOTE,
            HANDLE_ENTER_ON_PARAGRAPH,
        ]
    };
    let mut context = DeleteSelectionContext::from_result(model, result, format_context);
    run_edit_steps(&steps, &mut context);
    let delete_result = context.delete_result;

    normalize_content_model(model);
    model.assert_invariants();
    tracing::debug!(shift, result = %delete_result, "enter");
    delete_result
}

/// Backspace or Delete. An expanded selection is removed, a collapsed one
/// removes one grapheme or joins paragraphs across the cursor.
pub fn keyboard_delete(
    model: &mut ContentModelDocument,
    direction: DeleteDirection,
    format_context: Option<&mut FormatContentModelContext>,
) -> DeleteResult {
    let step = match direction {
        DeleteDirection::Backward => DELETE_COLLAPSED_SELECTION_BACKWARD,
        DeleteDirection::Forward => DELETE_COLLAPSED_SELECTION_FORWARD,
    };
    let result = delete_selection(model, &[step], format_context);

    if !matches!(
        result.delete_result,
        DeleteResult::NotDeleted | DeleteResult::NothingToDelete
    ) {
        normalize_content_model(model);
    }
    model.assert_invariants();
    tracing::debug!(?direction, result = %result.delete_result, "delete");
    result.delete_result
}

/// Type `text` at the cursor, replacing the selected content. The text
/// takes the format of the cursor. Returns false when there is no cursor.
pub fn insert_text(
    model: &mut ContentModelDocument,
    text: &str,
    format_context: Option<&mut FormatContentModelContext>,
) -> bool {
    let result = delete_selection(model, &[], format_context);
    let Some(insert_point) = result.insert_point else {
        return false;
    };
    let Some(paragraph) = paragraph_at_mut(model, &insert_point.paragraph) else {
        return false;
    };
    let Some(marker) = paragraph.segments.get(insert_point.marker).cloned() else {
        return false;
    };

    let previous = insert_point
        .marker
        .checked_sub(1)
        .and_then(|i| paragraph.segments.get_mut(i))
        .filter(|previous| {
            previous.format == marker.format
                && previous.link == marker.link
                && previous.code == marker.code
        })
        .and_then(|previous| previous.text_mut());

    match previous {
        Some(previous) => previous.push_str(text),
        None => {
            let mut segment = create_text(text, Some(&marker.format));
            segment.link = marker.link.clone();
            segment.code = marker.code.clone();
            paragraph.segments.insert(insert_point.marker, segment);
        }
    }
    paragraph.cached_element = None;

    normalize_content_model(model);
    model.assert_invariants();
    true
}
