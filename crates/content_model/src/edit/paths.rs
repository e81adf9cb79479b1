// Copyright 2024 New Vector Ltd.
// Copyright 2022 The Matrix.org Foundation C.I.C.
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Element-Commercial
// Please see LICENSE in the repository root for full details.

//! Addressing blocks inside a model by index paths, so edits can hold on to
//! a location while mutating the tree.

use crate::model::{Block, BlockGroup, BlockGroupContainer, Paragraph};

/// One step down from a block group into a nested one.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GroupStep {
    /// Into the block group at this index.
    Block(usize),
    /// Into a cell of the table at index `block`.
    Cell {
        block: usize,
        row: usize,
        column: usize,
    },
}

impl GroupStep {
    pub fn block_index(&self) -> usize {
        match *self {
            GroupStep::Block(index) => index,
            GroupStep::Cell { block, .. } => block,
        }
    }
}

/// A paragraph: the groups leading to it, outermost first, and its index in
/// the innermost one.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ParagraphPath {
    pub path: Vec<GroupStep>,
    pub index: usize,
}

impl ParagraphPath {
    pub fn new(path: Vec<GroupStep>, index: usize) -> Self {
        Self { path, index }
    }

    /// The steps down to the innermost table cell, if the paragraph is
    /// inside a table.
    pub fn table_context(&self) -> Option<&[GroupStep]> {
        table_context(&self.path)
    }
}

pub fn table_context(path: &[GroupStep]) -> Option<&[GroupStep]> {
    path.iter()
        .rposition(|step| matches!(step, GroupStep::Cell { .. }))
        .map(|i| &path[..=i])
}

/// Where an edit happens: the paragraph and the index of its selection
/// marker.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InsertPoint {
    pub paragraph: ParagraphPath,
    pub marker: usize,
}

impl InsertPoint {
    pub fn path(&self) -> &[GroupStep] {
        &self.paragraph.path
    }
}

fn step_into<'a>(
    group: &'a dyn BlockGroupContainer,
    step: GroupStep,
) -> Option<&'a dyn BlockGroupContainer> {
    match step {
        GroupStep::Block(index) => group.blocks().get(index)?.as_group(),
        GroupStep::Cell { block, row, column } => match group.blocks().get(block)? {
            Block::Table(table) => table
                .rows
                .get(row)?
                .cells
                .get(column)
                .map(|cell| cell as &dyn BlockGroupContainer),
            _ => None,
        },
    }
}

fn step_into_mut<'a>(
    group: &'a mut dyn BlockGroupContainer,
    step: GroupStep,
) -> Option<&'a mut dyn BlockGroupContainer> {
    match step {
        GroupStep::Block(index) => group.blocks_mut().get_mut(index)?.as_group_mut(),
        GroupStep::Cell { block, row, column } => match group.blocks_mut().get_mut(block)? {
            Block::Table(table) => table
                .rows
                .get_mut(row)?
                .cells
                .get_mut(column)
                .map(|cell| cell as &mut dyn BlockGroupContainer),
            _ => None,
        },
    }
}

pub fn group_at<'a>(
    root: &'a dyn BlockGroupContainer,
    path: &[GroupStep],
) -> Option<&'a dyn BlockGroupContainer> {
    let mut group = root;
    for step in path {
        group = step_into(group, *step)?;
    }
    Some(group)
}

pub fn group_at_mut<'a>(
    root: &'a mut dyn BlockGroupContainer,
    path: &[GroupStep],
) -> Option<&'a mut dyn BlockGroupContainer> {
    let mut group = root;
    for step in path {
        group = step_into_mut(group, *step)?;
    }
    Some(group)
}

pub fn paragraph_at<'a>(
    root: &'a dyn BlockGroupContainer,
    at: &ParagraphPath,
) -> Option<&'a Paragraph> {
    group_at(root, &at.path)?.blocks().get(at.index)?.as_paragraph()
}

pub fn paragraph_at_mut<'a>(
    root: &'a mut dyn BlockGroupContainer,
    at: &ParagraphPath,
) -> Option<&'a mut Paragraph> {
    group_at_mut(root, &at.path)?
        .blocks_mut()
        .get_mut(at.index)?
        .as_paragraph_mut()
}

/// Index into `path` of the step entering the closest enclosing group of
/// one of `types`. The search gives up at any group in `stop_at`, and at
/// table cells unless they are searched for.
pub fn closest_ancestor(
    root: &dyn BlockGroupContainer,
    path: &[GroupStep],
    types: &[AncestorType],
    stop_at: &[AncestorType],
) -> Option<usize> {
    for (i, step) in path.iter().enumerate().rev() {
        let kind = match *step {
            GroupStep::Cell { .. } => AncestorType::TableCell,
            GroupStep::Block(index) => {
                let parent = group_at(root, &path[..i])?;
                match parent.blocks().get(index)? {
                    Block::BlockGroup(BlockGroup::ListItem(_)) => AncestorType::ListItem,
                    Block::BlockGroup(BlockGroup::FormatContainer(_)) => {
                        AncestorType::FormatContainer
                    }
                    _ => AncestorType::Other,
                }
            }
        };
        if types.contains(&kind) {
            return Some(i);
        }
        if stop_at.contains(&kind) || kind == AncestorType::TableCell {
            return None;
        }
    }
    None
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AncestorType {
    ListItem,
    FormatContainer,
    TableCell,
    Other,
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::model::{
        create_format_container, create_list_item, create_paragraph,
        create_table, create_table_cell, create_text, ContentModelDocument,
        ListLevel, ListType,
    };

    fn model() -> ContentModelDocument {
        let mut cell = create_table_cell(false, false, false, None);
        let mut in_cell = create_paragraph(false, None, None, None);
        in_cell.segments.push(create_text("cell", None));
        cell.blocks.push(in_cell.into());
        let mut table = create_table(1, None);
        table.rows[0].cells.push(cell);
        table.widths = vec![0.0];

        let mut quote = create_format_container("blockquote", None);
        let mut item = create_list_item(&[ListLevel::new(ListType::Ordered)], None);
        item.blocks.push(create_paragraph(false, None, None, None).into());
        quote.blocks.push(item.into());

        ContentModelDocument {
            blocks: vec![table.into(), quote.into()],
            ..Default::default()
        }
    }

    #[test]
    fn paths_reach_into_cells_and_groups() {
        let model = model();
        let in_cell = ParagraphPath::new(
            vec![GroupStep::Cell {
                block: 0,
                row: 0,
                column: 0,
            }],
            0,
        );
        assert_eq!(paragraph_at(&model, &in_cell).unwrap().text(), "cell");
        assert!(in_cell.table_context().is_some());

        let in_item =
            ParagraphPath::new(vec![GroupStep::Block(1), GroupStep::Block(0)], 0);
        assert!(paragraph_at(&model, &in_item).is_some());
        assert!(in_item.table_context().is_none());
        assert!(paragraph_at(&model, &ParagraphPath::new(vec![GroupStep::Block(0)], 0)).is_none());
    }

    #[test]
    fn closest_ancestor_finds_the_innermost_match() {
        let model = model();
        let path = [GroupStep::Block(1), GroupStep::Block(0)];
        assert_eq!(
            closest_ancestor(&model, &path, &[AncestorType::ListItem], &[]),
            Some(1)
        );
        assert_eq!(
            closest_ancestor(&model, &path, &[AncestorType::FormatContainer], &[]),
            Some(0)
        );
        assert_eq!(
            closest_ancestor(
                &model,
                &path,
                &[AncestorType::FormatContainer],
                &[AncestorType::ListItem]
            ),
            None
        );
    }
}
