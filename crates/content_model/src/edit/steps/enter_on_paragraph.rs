// Copyright 2024 New Vector Ltd.
// Copyright 2022 The Matrix.org Foundation C.I.C.
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Element-Commercial
// Please see LICENSE in the repository root for full details.

use crate::edit::context::{DeleteResult, DeleteSelectionContext};
use crate::edit::split_paragraph::split_paragraph;

pub fn should_handle_enter_on_paragraph(context: &DeleteSelectionContext<'_>) -> bool {
    context.delete_result != DeleteResult::Range
}

/// Split the paragraph at the cursor.
pub fn handle_enter_on_paragraph(context: &mut DeleteSelectionContext<'_>) {
    let Some(mut insert_point) = context.insert_point.clone() else {
        return;
    };
    if split_paragraph(&mut *context.model, &mut insert_point).is_some() {
        context.set_insert_point(insert_point);
        context.delete_result = DeleteResult::Range;
    }
}

/// Let the following steps act even if content was deleted already.
pub fn clear_delete_result(context: &mut DeleteSelectionContext<'_>) {
    context.delete_result = DeleteResult::NotDeleted;
}
