// Copyright 2024 New Vector Ltd.
// Copyright 2022 The Matrix.org Foundation C.I.C.
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Element-Commercial
// Please see LICENSE in the repository root for full details.

//! Removing the selected content of a model and collapsing the selection to
//! one marker.

use super::context::{
    run_edit_steps, DeleteResult, DeleteSelectionContext, DeleteSelectionResult,
    DeletedEntity, EditStep, EntityOperation, FormatContentModelContext,
};
use super::paths::{
    group_at_mut, paragraph_at_mut, table_context, GroupStep, InsertPoint,
    ParagraphPath,
};
use crate::dom::NodeId;
use crate::format::EntityInfoFormat;
use crate::model::{
    create_br, create_paragraph, create_selection_marker, has_selection_in_group,
    Block, BlockGroup, BlockGroupContainer, ContentModelDocument, Paragraph,
    Segment, SegmentKind, Table,
};

/// Delete the selected content of `model`, then run `steps` while nothing
/// has been deleted, then join the paragraphs the selection started and
/// ended in.
///
/// A collapsed selection deletes nothing and only yields its insert point,
/// leaving the steps to decide what to remove.
pub fn delete_selection(
    model: &mut ContentModelDocument,
    steps: &[EditStep],
    format_context: Option<&mut FormatContentModelContext>,
) -> DeleteSelectionResult {
    let mut context = DeleteSelectionContext::new(model, format_context);
    delete_expanded_selection(&mut context);
    run_edit_steps(steps, &mut context);
    merge_paragraph_after_delete(&mut context);

    tracing::debug!(
        result = %context.delete_result,
        insert_point = ?context.insert_point,
        "delete selection"
    );
    context.into_result()
}

fn delete_expanded_selection(context: &mut DeleteSelectionContext<'_>) {
    let mut walk = DeleteWalk::default();
    walk.delete_in_group(&mut *context.model, &mut Vec::new());

    if let Some(insert_point) = &walk.insert_point {
        if !walk.tail.is_empty() {
            if let Some(paragraph) = paragraph_at_mut(&mut *context.model, &insert_point.paragraph) {
                paragraph.segments.append(&mut walk.tail);
            }
        }
    }

    if let Some(format_context) = context.format_context.as_deref_mut() {
        format_context.deleted_entities.append(&mut walk.deleted_entities);
    }
    context.delete_result = if walk.deleted {
        DeleteResult::Range
    } else {
        DeleteResult::NotDeleted
    };
    context.last_paragraph = walk.last_paragraph.or_else(|| {
        walk.insert_point.as_ref().map(|ip| ip.paragraph.clone())
    });
    context.insert_point = walk.insert_point;
}

/// Document order walk over everything selected. The first selected
/// position becomes the insert point, everything selected after it is
/// removed.
#[derive(Default)]
struct DeleteWalk {
    insert_point: Option<InsertPoint>,
    last_paragraph: Option<ParagraphPath>,
    deleted: bool,
    /// Unselected end of the last paragraph the selection reaches inside a
    /// table it entered from outside. It moves to the insert point unless
    /// the selection continues past the table.
    tail: Vec<Segment>,
    deleted_entities: Vec<DeletedEntity>,
}

impl DeleteWalk {
    fn delete_in_group(&mut self, group: &mut dyn BlockGroupContainer, path: &mut Vec<GroupStep>) {
        let mut i = 0;
        while i < group.blocks().len() {
            let remove = match &mut group.blocks_mut()[i] {
                Block::Paragraph(paragraph) => {
                    self.delete_in_paragraph(paragraph, ParagraphPath::new(path.clone(), i));
                    false
                }
                Block::Divider(divider) => divider.is_selected,
                Block::Entity(entity) => {
                    if entity.is_selected {
                        self.record_entity(entity.wrapper, &entity.entity_format);
                    }
                    entity.is_selected
                }
                Block::BlockGroup(BlockGroup::General(general)) if general.is_selected => true,
                Block::BlockGroup(inner) => {
                    path.push(GroupStep::Block(i));
                    self.delete_in_group(inner.as_container_mut(), path);
                    path.pop();
                    false
                }
                Block::Table(table) => self.delete_in_table(table, path, i),
            };

            if remove {
                self.deleted = true;
                if self.insert_point.is_none() {
                    self.replace_with_marker(group, path, i);
                    i += 1;
                } else {
                    group.blocks_mut().remove(i);
                }
            } else {
                i += 1;
            }
        }
    }

    fn replace_with_marker(&mut self, group: &mut dyn BlockGroupContainer, path: &[GroupStep], i: usize) {
        let mut paragraph = create_paragraph(false, None, None, None);
        paragraph.segments.push(create_selection_marker(None));
        paragraph.segments.push(create_br(None));
        group.blocks_mut()[i] = paragraph.into();

        let at = ParagraphPath::new(path.to_vec(), i);
        self.last_paragraph = Some(at.clone());
        self.insert_point = Some(InsertPoint {
            paragraph: at,
            marker: 0,
        });
    }

    fn delete_in_paragraph(&mut self, paragraph: &mut Paragraph, at: ParagraphPath) {
        if !paragraph.has_selection() {
            return;
        }

        let mut j = 0;
        while j < paragraph.segments.len() {
            if !paragraph.segments[j].is_selected {
                j += 1;
                continue;
            }

            if self.insert_point.is_none() {
                if !paragraph.segments[j].is_marker() {
                    let segment = &paragraph.segments[j];
                    let mut marker = create_selection_marker(Some(&segment.format));
                    marker.link = segment.link.clone();
                    marker.code = segment.code.clone();
                    let removed = std::mem::replace(&mut paragraph.segments[j], marker);
                    self.record_segment(&removed);
                    self.deleted = true;
                }
                self.insert_point = Some(InsertPoint {
                    paragraph: at.clone(),
                    marker: j,
                });
                j += 1;
            } else {
                let removed = paragraph.segments.remove(j);
                if !removed.is_marker() {
                    self.record_segment(&removed);
                    self.deleted = true;
                }
                self.tail.clear();
            }
        }

        paragraph.cached_element = None;
        self.last_paragraph = Some(at);
    }

    /// Returns true when the whole table goes away.
    fn delete_in_table(&mut self, table: &mut Table, path: &mut Vec<GroupStep>, block: usize) -> bool {
        let has_selection = table
            .rows
            .iter()
            .flat_map(|r| r.cells.iter())
            .any(|c| c.is_selected || has_selection_in_group(c));
        if !has_selection {
            return false;
        }

        let entered_from_outside = self.insert_point.is_some();
        if entered_from_outside
            && table
                .rows
                .iter()
                .flat_map(|r| r.cells.iter())
                .all(|c| c.is_selected || is_group_fully_selected(c))
        {
            self.tail.clear();
            return true;
        }
        if table.is_whole_table_selected() {
            self.tail.clear();
            return true;
        }
        let tail = if entered_from_outside {
            unselected_tail(table)
        } else {
            Vec::new()
        };

        table.cached_element = None;
        for row_index in 0..table.rows.len() {
            table.rows[row_index].cached_element = None;
            for column in 0..table.rows[row_index].cells.len() {
                let cell = &mut table.rows[row_index].cells[column];
                cell.cached_element = None;
                let step = GroupStep::Cell {
                    block,
                    row: row_index,
                    column,
                };

                if cell.is_selected {
                    cell.is_selected = false;
                    self.deleted = true;
                    let mut paragraph = create_paragraph(false, None, None, None);
                    if self.insert_point.is_none() {
                        paragraph.segments.push(create_selection_marker(None));
                        let mut cell_path = path.clone();
                        cell_path.push(step);
                        let at = ParagraphPath::new(cell_path, 0);
                        self.insert_point = Some(InsertPoint {
                            paragraph: at.clone(),
                            marker: 0,
                        });
                        self.last_paragraph = Some(at);
                    }
                    paragraph.segments.push(create_br(None));
                    cell.blocks = vec![paragraph.into()];
                    continue;
                }

                let touched: Vec<bool> = cell
                    .blocks
                    .iter()
                    .map(|b| b.as_paragraph().is_some_and(Paragraph::has_selection))
                    .collect();
                path.push(step);
                self.delete_in_group(cell, path);
                path.pop();

                if entered_from_outside && touched.contains(&true) {
                    let mut touched = touched.into_iter();
                    cell.blocks.retain(|b| {
                        let was_touched = touched.next().unwrap_or(false);
                        !(was_touched
                            && b.as_paragraph().is_some_and(|p| p.segments.iter().all(Segment::is_br)))
                    });
                    if cell.blocks.is_empty() {
                        let mut paragraph = create_paragraph(false, None, None, None);
                        paragraph.segments.push(create_br(None));
                        cell.blocks.push(paragraph.into());
                    }
                }
            }
        }

        if entered_from_outside {
            self.tail = tail;
            // Paths into the table may be stale, nothing in it is joined
            // with the insert point.
            self.last_paragraph = self.insert_point.as_ref().map(|ip| ip.paragraph.clone());
        }
        false
    }

    fn record_segment(&mut self, segment: &Segment) {
        if let SegmentKind::Entity {
            wrapper,
            entity_format,
        } = &segment.kind
        {
            self.record_entity(*wrapper, entity_format);
        }
    }

    fn record_entity(&mut self, wrapper: NodeId, entity_format: &EntityInfoFormat) {
        self.deleted_entities.push(DeletedEntity {
            wrapper,
            entity_format: entity_format.clone(),
            operation: EntityOperation::Overwrite,
        });
    }
}

/// Every block of `group` is selected, or is a paragraph made only of
/// selected segments.
fn is_group_fully_selected(group: &dyn BlockGroupContainer) -> bool {
    group.blocks().iter().all(|block| match block {
        Block::Paragraph(p) => p.segments.iter().all(|s| s.is_selected || s.is_br())
            && p.has_selection(),
        Block::Divider(d) => d.is_selected,
        Block::Entity(e) => e.is_selected,
        Block::BlockGroup(BlockGroup::General(g)) => g.is_selected,
        Block::BlockGroup(inner) => is_group_fully_selected(inner.as_container()),
        Block::Table(t) => t.is_whole_table_selected(),
    })
}

/// Split off whatever follows the last selected segment of the last
/// paragraph the selection reaches inside the table. Selected cells are
/// emptied as a whole and are not looked at.
fn unselected_tail(table: &mut Table) -> Vec<Segment> {
    let mut last: Option<&mut Paragraph> = None;
    for cell in table
        .rows
        .iter_mut()
        .flat_map(|r| r.cells.iter_mut())
        .filter(|c| !c.is_selected)
    {
        for block in cell.blocks.iter_mut() {
            if let Block::Paragraph(p) = block {
                if p.has_selection() {
                    last = Some(p);
                }
            }
        }
    }

    let Some(paragraph) = last else {
        return Vec::new();
    };
    let Some(end) = paragraph.segments.iter().rposition(|s| s.is_selected) else {
        return Vec::new();
    };
    paragraph.cached_element = None;
    paragraph
        .segments
        .split_off(end + 1)
        .into_iter()
        .filter(|s| !s.is_br())
        .collect()
}

/// Join the paragraph where the selection ended into the one where it
/// started, unless they live in different table cells.
fn merge_paragraph_after_delete(context: &mut DeleteSelectionContext<'_>) {
    if context.delete_result != DeleteResult::Range {
        return;
    }
    let (Some(insert_point), Some(last)) = (&context.insert_point, &context.last_paragraph) else {
        return;
    };
    if *last == insert_point.paragraph
        || table_context(&last.path) != insert_point.paragraph.table_context()
    {
        return;
    }

    let Some(group) = group_at_mut(&mut *context.model, &last.path) else {
        return;
    };
    let Some(Block::Paragraph(_)) = group.blocks().get(last.index) else {
        return;
    };
    let Block::Paragraph(mut merged) = group.blocks_mut().remove(last.index) else {
        return;
    };

    let insert_paragraph = insert_point.paragraph.clone();
    if let Some(paragraph) = paragraph_at_mut(&mut *context.model, &insert_paragraph) {
        if paragraph.segments.last().is_some_and(Segment::is_br) {
            paragraph.segments.pop();
        }
        paragraph.segments.append(&mut merged.segments);
        paragraph.cached_element = None;
        tracing::trace!(?insert_paragraph, "merged paragraph after delete");
    }
    context.last_paragraph = Some(insert_paragraph);
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::model::{
        create_divider, create_table, create_table_cell, create_text,
        SegmentType,
    };

    fn selected(mut segment: Segment) -> Segment {
        segment.is_selected = true;
        segment
    }

    fn paragraph(segments: Vec<Segment>) -> Block {
        let mut paragraph = create_paragraph(false, None, None, None);
        paragraph.segments = segments;
        paragraph.into()
    }

    fn types(block: &Block) -> Vec<SegmentType> {
        block
            .as_paragraph()
            .unwrap()
            .segments
            .iter()
            .map(Segment::segment_type)
            .collect()
    }

    #[test]
    fn collapsed_selection_deletes_nothing() {
        let mut model = ContentModelDocument {
            blocks: vec![paragraph(vec![
                create_text("a", None),
                create_selection_marker(None),
            ])],
            ..Default::default()
        };
        let result = delete_selection(&mut model, &[], None);
        assert_eq!(result.delete_result, DeleteResult::NotDeleted);
        assert_eq!(
            result.insert_point,
            Some(InsertPoint {
                paragraph: ParagraphPath::new(Vec::new(), 0),
                marker: 1,
            })
        );
    }

    #[test]
    fn no_selection_has_no_insert_point() {
        let mut model = ContentModelDocument {
            blocks: vec![paragraph(vec![create_text("a", None)])],
            ..Default::default()
        };
        let result = delete_selection(&mut model, &[], None);
        assert_eq!(result.insert_point, None);
    }

    #[test]
    fn selection_across_paragraphs_is_joined() {
        let mut model = ContentModelDocument {
            blocks: vec![
                paragraph(vec![create_text("ab", None), selected(create_text("cd", None))]),
                paragraph(vec![selected(create_text("ef", None))]),
                paragraph(vec![selected(create_text("gh", None)), create_text("ij", None)]),
            ],
            ..Default::default()
        };

        let result = delete_selection(&mut model, &[], None);

        assert_eq!(result.delete_result, DeleteResult::Range);
        assert_eq!(model.blocks.len(), 2);
        assert_eq!(
            types(&model.blocks[0]),
            vec![SegmentType::Text, SegmentType::SelectionMarker, SegmentType::Text]
        );
        assert_eq!(model.blocks[0].as_paragraph().unwrap().text(), "abij");
        assert_eq!(types(&model.blocks[1]), Vec::<SegmentType>::new());
    }

    #[test]
    fn selected_divider_becomes_the_insert_point() {
        let mut divider = create_divider("hr");
        divider.is_selected = true;
        let mut model = ContentModelDocument {
            blocks: vec![divider.into(), paragraph(vec![create_text("a", None)])],
            ..Default::default()
        };

        let result = delete_selection(&mut model, &[], None);

        assert_eq!(result.delete_result, DeleteResult::Range);
        assert_eq!(
            types(&model.blocks[0]),
            vec![SegmentType::SelectionMarker, SegmentType::Br]
        );
    }

    #[test]
    fn selected_cells_are_emptied() {
        let mut table = create_table(1, None);
        table.rows[0].cells = vec![create_table_cell(false, false, false, None); 3];
        table.widths = vec![0.0; 3];
        for (column, cell) in table.rows[0].cells.iter_mut().enumerate() {
            cell.is_selected = column < 2;
            cell.blocks.push(paragraph(vec![create_text("x", None)]));
        }
        let mut model = ContentModelDocument {
            blocks: vec![table.into()],
            ..Default::default()
        };

        let result = delete_selection(&mut model, &[], None);

        assert_eq!(result.delete_result, DeleteResult::Range);
        let Block::Table(table) = &model.blocks[0] else {
            panic!("table expected");
        };
        assert_eq!(
            types(&table.rows[0].cells[0].blocks[0]),
            vec![SegmentType::SelectionMarker, SegmentType::Br]
        );
        assert_eq!(types(&table.rows[0].cells[1].blocks[0]), vec![SegmentType::Br]);
        assert_eq!(table.rows[0].cells[2].blocks[0].as_paragraph().unwrap().text(), "x");
        assert!(!table.rows[0].cells[0].is_selected);
        model.explicitly_assert_invariants();
    }

    fn cell_texts(table: &Table) -> Vec<Vec<String>> {
        table
            .rows
            .iter()
            .flat_map(|r| r.cells.iter())
            .map(|c| {
                c.blocks
                    .iter()
                    .map(|b| b.as_paragraph().unwrap().text())
                    .collect()
            })
            .collect()
    }

    #[test]
    fn selection_entering_a_table_keeps_unselected_cells() {
        let mut table = create_table(2, None);
        let mut head = create_table_cell(false, false, false, None);
        head.blocks.push(paragraph(vec![selected(create_text("c", None)), create_text("d", None)]));
        head.blocks.push(paragraph(vec![create_text("keep1", None)]));
        let keep = |text: &str| {
            let mut cell = create_table_cell(false, false, false, None);
            cell.blocks.push(paragraph(vec![create_text(text, None)]));
            cell
        };
        table.rows[0].cells = vec![head, keep("keep2")];
        table.rows[1].cells = vec![keep("keep3"), keep("keep4")];
        table.widths = vec![100.0, 100.0];
        let mut model = ContentModelDocument {
            blocks: vec![
                paragraph(vec![create_text("a", None), selected(create_text("b", None))]),
                table.into(),
            ],
            ..Default::default()
        };

        let result = delete_selection(&mut model, &[], None);

        assert_eq!(result.delete_result, DeleteResult::Range);
        assert_eq!(model.blocks.len(), 2);
        assert_eq!(
            types(&model.blocks[0]),
            vec![SegmentType::Text, SegmentType::SelectionMarker, SegmentType::Text]
        );
        assert_eq!(model.blocks[0].as_paragraph().unwrap().text(), "ad");
        let Block::Table(table) = &model.blocks[1] else {
            panic!("table expected");
        };
        assert_eq!(
            cell_texts(table),
            vec![
                vec!["keep1".to_owned()],
                vec!["keep2".to_owned()],
                vec!["keep3".to_owned()],
                vec!["keep4".to_owned()],
            ]
        );
        model.explicitly_assert_invariants();
    }

    #[test]
    fn table_selected_to_its_end_from_outside_is_removed() {
        let mut table = create_table(1, None);
        let mut first = create_table_cell(false, false, false, None);
        first.blocks.push(paragraph(vec![selected(create_text("c", None))]));
        let mut second = create_table_cell(false, false, false, None);
        second.is_selected = true;
        second.blocks.push(paragraph(vec![create_text("e", None)]));
        table.rows[0].cells = vec![first, second];
        table.widths = vec![100.0, 100.0];
        let mut model = ContentModelDocument {
            blocks: vec![
                paragraph(vec![create_text("a", None), selected(create_text("b", None))]),
                table.into(),
            ],
            ..Default::default()
        };

        let result = delete_selection(&mut model, &[], None);

        assert_eq!(result.delete_result, DeleteResult::Range);
        assert_eq!(model.blocks.len(), 1);
        assert_eq!(model.blocks[0].as_paragraph().unwrap().text(), "a");
    }

    #[test]
    fn deleted_entities_are_reported_as_overwritten() {
        let mut entity = crate::model::create_entity(
            NodeId::from_raw(3),
            Default::default(),
            None,
        );
        entity.is_selected = true;
        let mut model = ContentModelDocument {
            blocks: vec![
                paragraph(vec![selected(create_text("a", None))]),
                entity.into(),
            ],
            ..Default::default()
        };
        let mut format_context = FormatContentModelContext::default();

        delete_selection(&mut model, &[], Some(&mut format_context));

        assert_eq!(model.blocks.len(), 1);
        assert_eq!(format_context.deleted_entities.len(), 1);
        assert_eq!(
            format_context.deleted_entities[0].operation,
            EntityOperation::Overwrite
        );
    }
}
