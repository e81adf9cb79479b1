// Copyright 2024 New Vector Ltd.
// Copyright 2022 The Matrix.org Foundation C.I.C.
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Element-Commercial
// Please see LICENSE in the repository root for full details.

//! Editing a Content Model in place: deleting the selection and running
//! the steps behind Enter, Backspace and Delete.

pub mod context;
pub mod delete_selection;
pub mod keyboard;
pub mod list_number;
pub mod paths;
pub mod split_paragraph;
pub mod steps;

pub use context::{
    run_edit_steps, AnnounceData, DeleteResult, DeleteSelectionContext,
    DeleteSelectionResult, DeletedEntity, EditStep, EntityOperation,
    FormatContentModelContext, KnownAnnounceStrings,
};
pub use delete_selection::delete_selection;
pub use keyboard::{insert_text, keyboard_delete, keyboard_enter, DeleteDirection};
pub use list_number::get_list_number;
pub use paths::{GroupStep, InsertPoint, ParagraphPath};
pub use split_paragraph::{split_paragraph, split_paragraph_at};
