// Copyright 2024 New Vector Ltd.
// Copyright 2022 The Matrix.org Foundation C.I.C.
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Element-Commercial
// Please see LICENSE in the repository root for full details.

//! The Content Model: a serializable tree of blocks and segments that
//! mirrors an editable DOM.

pub mod add;
pub mod block;
pub mod block_group;
pub mod creators;
pub mod invariants;
pub mod list;
pub mod normalize;
pub mod paragraph;
pub mod segment;
pub mod selection;
pub mod table;
pub mod to_tree;

pub use add::{add_block, add_segment, ensure_paragraph};
pub use block::{Block, BlockType, Divider, Entity};
pub use block_group::{
    BlockGroup, BlockGroupContainer, BlockGroupType, ContentModelDocument,
    FormatContainer, GeneralBlock,
};
pub use creators::*;
pub use list::{ListItem, ListLevel, ListType};
pub use normalize::{normalize_content_model, normalize_paragraph};
pub use paragraph::{Paragraph, ParagraphDecorator};
pub use segment::{Code, Image, Link, Segment, SegmentKind, SegmentType};
pub use selection::{
    get_selected_segments, has_selection_in_block, has_selection_in_group,
    is_empty_paragraph,
};
pub use table::{Table, TableCell, TableRow};
pub use to_tree::ToTree;
