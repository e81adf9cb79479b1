// Copyright 2024 New Vector Ltd.
// Copyright 2022 The Matrix.org Foundation C.I.C.
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Element-Commercial
// Please see LICENSE in the repository root for full details.

use super::html_dom::NodeId;

/// A boundary point: a node plus an offset into it. For text nodes the offset
/// counts UTF-16 code units, for other nodes it is a child index.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DomPosition {
    pub node: NodeId,
    pub offset: usize,
}

impl DomPosition {
    pub fn new(node: NodeId, offset: usize) -> Self {
        Self { node, offset }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DomRange {
    pub start: DomPosition,
    pub end: DomPosition,
}

impl DomRange {
    pub fn new(start: DomPosition, end: DomPosition) -> Self {
        Self { start, end }
    }

    pub fn collapsed_at(position: DomPosition) -> Self {
        Self {
            start: position,
            end: position,
        }
    }

    pub fn collapsed(&self) -> bool {
        self.start == self.end
    }
}

/// A rectangle of selected cells inside one table element.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TableSelection {
    pub table: NodeId,
    pub first_row: usize,
    pub last_row: usize,
    pub first_column: usize,
    pub last_column: usize,
}

impl TableSelection {
    pub fn contains(&self, row: usize, column: usize) -> bool {
        (self.first_row..=self.last_row).contains(&row)
            && (self.first_column..=self.last_column).contains(&column)
    }
}

/// The selection of an editor, in exactly one of its three shapes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DomSelection {
    Range { range: DomRange, is_reverted: bool },
    Table(TableSelection),
    Image { image: NodeId },
}

impl DomSelection {
    pub fn range(range: DomRange) -> Self {
        Self::Range {
            range,
            is_reverted: false,
        }
    }

    pub fn as_range(&self) -> Option<&DomRange> {
        match self {
            Self::Range { range, .. } => Some(range),
            _ => None,
        }
    }

    pub fn selection_type(&self) -> &'static str {
        match self {
            Self::Range { .. } => "range",
            Self::Table(_) => "table",
            Self::Image { .. } => "image",
        }
    }
}
