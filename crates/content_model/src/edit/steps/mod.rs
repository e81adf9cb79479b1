// Copyright 2024 New Vector Ltd.
// Copyright 2022 The Matrix.org Foundation C.I.C.
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Element-Commercial
// Please see LICENSE in the repository root for full details.

//! The edit steps run by [super::delete_selection] and
//! [super::run_edit_steps].

mod delete_collapsed;
mod delete_empty_quote;
mod enter_on_list;
mod enter_on_paragraph;

pub use delete_collapsed::{
    delete_collapsed_selection_backward, delete_collapsed_selection_forward,
};
pub use delete_empty_quote::delete_empty_quote;
pub use enter_on_list::{handle_enter_on_list, should_handle_enter_on_list};
pub use enter_on_paragraph::{
    clear_delete_result, handle_enter_on_paragraph,
    should_handle_enter_on_paragraph,
};

use super::context::{DeleteSelectionContext, EditStep};

fn always(_: &DeleteSelectionContext<'_>) -> bool {
    true
}

pub const CLEAR_DELETE_RESULT: EditStep =
    EditStep::guarded("clear_delete_result", always, clear_delete_result);

pub const HANDLE_ENTER_ON_LIST: EditStep = EditStep::guarded(
    "handle_enter_on_list",
    should_handle_enter_on_list,
    handle_enter_on_list,
);

pub const DELETE_EMPTY_QUOTE: EditStep =
    EditStep::new("delete_empty_quote", delete_empty_quote);

pub const HANDLE_ENTER_ON_PARAGRAPH: EditStep = EditStep::guarded(
    "handle_enter_on_paragraph",
    should_handle_enter_on_paragraph,
    handle_enter_on_paragraph,
);

pub const DELETE_COLLAPSED_SELECTION_BACKWARD: EditStep = EditStep::new(
    "delete_collapsed_selection_backward",
    delete_collapsed_selection_backward,
);

pub const DELETE_COLLAPSED_SELECTION_FORWARD: EditStep = EditStep::new(
    "delete_collapsed_selection_forward",
    delete_collapsed_selection_forward,
);
