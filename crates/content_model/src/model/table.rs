// Copyright 2024 New Vector Ltd.
// Copyright 2022 The Matrix.org Foundation C.I.C.
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Element-Commercial
// Please see LICENSE in the repository root for full details.

use serde::{Deserialize, Serialize};

use super::block::Block;
use super::block_group::{BlockGroupContainer, BlockGroupType};
use crate::dom::NodeId;
use crate::format::{BlockFormat, DatasetFormat, TableCellFormat, TableFormat};

fn is_false(value: &bool) -> bool {
    !*value
}

fn is_zero(value: &f64) -> bool {
    *value == 0.0
}

/// A grid of cells. Every row has one cell per entry of `widths`; cells
/// covered by a colspan or rowspan are kept as `span_left`/`span_above`
/// placeholders.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Table {
    pub rows: Vec<TableRow>,
    /// Column widths in px, 0 when unknown.
    #[serde(default)]
    pub widths: Vec<f64>,
    #[serde(default)]
    pub format: TableFormat,
    #[serde(default, skip_serializing_if = "DatasetFormat::is_empty")]
    pub dataset: DatasetFormat,
    #[serde(skip)]
    pub cached_element: Option<NodeId>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableRow {
    /// Row height in px, 0 when unknown.
    #[serde(default, skip_serializing_if = "is_zero")]
    pub height: f64,
    #[serde(default)]
    pub format: BlockFormat,
    pub cells: Vec<TableCell>,
    #[serde(skip)]
    pub cached_element: Option<NodeId>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableCell {
    pub blocks: Vec<Block>,
    #[serde(default)]
    pub format: TableCellFormat,
    #[serde(default, skip_serializing_if = "is_false")]
    pub span_left: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    pub span_above: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    pub is_header: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    pub is_selected: bool,
    #[serde(default, skip_serializing_if = "DatasetFormat::is_empty")]
    pub dataset: DatasetFormat,
    #[serde(skip)]
    pub cached_element: Option<NodeId>,
}

impl TableCell {
    /// A placeholder or a real cell is only rendered when it is not
    /// covered by a neighbour.
    pub fn is_placeholder(&self) -> bool {
        self.span_left || self.span_above
    }
}

impl BlockGroupContainer for TableCell {
    fn block_group_type(&self) -> BlockGroupType {
        BlockGroupType::TableCell
    }

    fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    fn blocks_mut(&mut self) -> &mut Vec<Block> {
        &mut self.blocks
    }
}

impl Table {
    pub fn column_count(&self) -> usize {
        self.rows.iter().map(|r| r.cells.len()).max().unwrap_or(0)
    }

    pub fn is_whole_table_selected(&self) -> bool {
        let mut cells = self.rows.iter().flat_map(|r| r.cells.iter()).peekable();
        cells.peek().is_some() && cells.all(|c| c.is_selected)
    }

    /// Pad short rows with empty cells and keep `widths` in step with the
    /// widest row.
    pub fn normalize(&mut self) {
        let columns = self.column_count();
        for row in &mut self.rows {
            while row.cells.len() < columns {
                row.cells.push(TableCell::default());
                row.cached_element = None;
            }
        }
        self.widths.resize(columns, 0.0);
    }

    /// Drop the cached elements of the table and of every row and cell.
    pub fn clear_cached_elements(&mut self) {
        self.cached_element = None;
        for row in &mut self.rows {
            row.cached_element = None;
            for cell in &mut row.cells {
                cell.cached_element = None;
            }
        }
    }
}
