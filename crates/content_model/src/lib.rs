// Copyright 2024 New Vector Ltd.
// Copyright 2022 The Matrix.org Foundation C.I.C.
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Element-Commercial
// Please see LICENSE in the repository root for full details.

//! A Content Model for a contentEditable editor: an HTML tree is read into
//! a plain tree of blocks and segments, edited there, and written back.

pub mod dom;
pub mod dom_to_model;
pub mod edit;
mod error;
pub mod format;
pub mod model;
pub mod model_to_dom;
pub mod paste;

pub use crate::dom::{
    DomPosition, DomRange, DomSelection, Element, HtmlDom, NodeId,
    TableSelection,
};
pub use crate::dom_to_model::{create_content_model, DomToModelOption};
pub use crate::edit::{
    delete_selection, insert_text, keyboard_delete, keyboard_enter,
    run_edit_steps, split_paragraph, DeleteDirection, DeleteResult,
    DeleteSelectionContext, DeleteSelectionResult, EditStep,
    FormatContentModelContext, InsertPoint,
};
pub use crate::error::{HtmlParseError, MetadataError};
pub use crate::model::{
    normalize_content_model, Block, BlockGroup, BlockGroupContainer,
    ContentModelDocument, ListItem, ListLevel, ListType, Paragraph, Segment,
    SegmentType, Table, ToTree,
};
pub use crate::model_to_dom::{create_dom_from_model, ModelToDomOption};
pub use crate::paste::{create_paste_model, BeforePasteEvent};
