// Copyright 2024 New Vector Ltd.
// Copyright 2022 The Matrix.org Foundation C.I.C.
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Element-Commercial
// Please see LICENSE in the repository root for full details.

//! Backspace and Delete with a collapsed selection.

use unicode_segmentation::UnicodeSegmentation;

use crate::edit::context::{DeleteResult, DeleteSelectionContext, EntityOperation};
use crate::edit::paths::{
    closest_ancestor, group_at, group_at_mut, paragraph_at_mut, AncestorType,
    GroupStep, InsertPoint, ParagraphPath,
};
use crate::model::{Block, BlockGroup, ContentModelDocument, Paragraph, Segment};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Direction {
    Backward,
    Forward,
}

impl Direction {
    fn entity_operation(self) -> EntityOperation {
        match self {
            Direction::Backward => EntityOperation::RemoveFromEnd,
            Direction::Forward => EntityOperation::RemoveFromStart,
        }
    }
}

/// Backspace: delete the grapheme or inline element before the cursor, or
/// join the paragraph into the previous one.
pub fn delete_collapsed_selection_backward(context: &mut DeleteSelectionContext<'_>) {
    delete_collapsed(context, Direction::Backward);
}

/// Delete: delete the grapheme or inline element after the cursor, or
/// join the next paragraph into this one.
pub fn delete_collapsed_selection_forward(context: &mut DeleteSelectionContext<'_>) {
    delete_collapsed(context, Direction::Forward);
}

fn delete_collapsed(context: &mut DeleteSelectionContext<'_>, direction: Direction) {
    let Some(insert_point) = context.insert_point.clone() else {
        return;
    };

    let deleted = match paragraph_at_mut(&mut *context.model, &insert_point.paragraph) {
        Some(paragraph) => delete_in_paragraph(paragraph, insert_point.marker, direction),
        None => return,
    };

    match deleted {
        Some((marker, removed)) => {
            if let Some(removed) = removed {
                context.record_deleted_segment(&removed, direction.entity_operation());
            }
            context.set_insert_point(InsertPoint {
                paragraph: insert_point.paragraph,
                marker,
            });
            context.delete_result = DeleteResult::SingleChar;
        }
        None => match direction {
            Direction::Backward => delete_at_paragraph_start(context, insert_point),
            Direction::Forward => delete_at_paragraph_end(context, insert_point),
        },
    }
}

/// Remove one grapheme or one segment next to the marker. Returns the new
/// marker index and the segment if it was removed whole, or `None` at the
/// edge of the paragraph.
fn delete_in_paragraph(
    paragraph: &mut Paragraph,
    marker: usize,
    direction: Direction,
) -> Option<(usize, Option<Segment>)> {
    let (target, marker_after) = match direction {
        Direction::Backward => {
            let target = marker.checked_sub(1)?;
            (target, target)
        }
        Direction::Forward => {
            let target = marker + 1;
            let len = paragraph.segments.len();
            if target >= len || (target + 1 == len && paragraph.segments[target].is_br()) {
                return None;
            }
            (target, marker)
        }
    };
    paragraph.cached_element = None;

    if let Some(text) = paragraph.segments[target].text_mut() {
        match direction {
            Direction::Backward => {
                let cut = text.grapheme_indices(true).next_back().map_or(0, |(i, _)| i);
                text.truncate(cut);
            }
            Direction::Forward => {
                let cut = text
                    .grapheme_indices(true)
                    .nth(1)
                    .map_or(text.len(), |(i, _)| i);
                text.replace_range(..cut, "");
            }
        }
        if !text.is_empty() {
            return Some((marker, None));
        }
        paragraph.segments.remove(target);
        return Some((marker_after, None));
    }

    let removed = paragraph.segments.remove(target);
    tracing::trace!(segment = %removed.segment_type(), "deleted segment next to cursor");
    Some((marker_after, Some(removed)))
}

enum Neighbour {
    Paragraph(ParagraphPath),
    /// A divider or an entity, removed as a whole.
    Block(Vec<GroupStep>, usize),
    None,
}

fn neighbour_kind(block: &Block, path: &[GroupStep], index: usize) -> Option<Neighbour> {
    match block {
        Block::Paragraph(_) => Some(Neighbour::Paragraph(ParagraphPath::new(path.to_vec(), index))),
        Block::Divider(_) | Block::Entity(_) => Some(Neighbour::Block(path.to_vec(), index)),
        Block::Table(_) | Block::BlockGroup(BlockGroup::General(_)) => Some(Neighbour::None),
        Block::BlockGroup(_) => None,
    }
}

/// The closest block before `at` in document order, descending into block
/// groups but never into or out of table cells.
fn previous_neighbour(model: &ContentModelDocument, at: &ParagraphPath) -> Neighbour {
    let mut path = at.path.clone();
    let mut previous = at.index.checked_sub(1);
    loop {
        match previous {
            Some(index) => {
                let Some(group) = group_at(model, &path) else {
                    return Neighbour::None;
                };
                let Some(block) = group.blocks().get(index) else {
                    return Neighbour::None;
                };
                if let Some(found) = neighbour_kind(block, &path, index) {
                    return found;
                }
                let len = block.as_group().map_or(0, |g| g.blocks().len());
                path.push(GroupStep::Block(index));
                previous = len.checked_sub(1);
            }
            None => match path.pop() {
                Some(GroupStep::Block(index)) => previous = index.checked_sub(1),
                Some(GroupStep::Cell { .. }) | None => return Neighbour::None,
            },
        }
    }
}

fn next_neighbour(model: &ContentModelDocument, at: &ParagraphPath) -> Neighbour {
    let mut path = at.path.clone();
    let mut next = at.index + 1;
    loop {
        let Some(group) = group_at(model, &path) else {
            return Neighbour::None;
        };
        match group.blocks().get(next) {
            Some(block) => {
                if let Some(found) = neighbour_kind(block, &path, next) {
                    return found;
                }
                path.push(GroupStep::Block(next));
                next = 0;
            }
            None => match path.pop() {
                Some(GroupStep::Block(index)) => next = index + 1,
                Some(GroupStep::Cell { .. }) | None => return Neighbour::None,
            },
        }
    }
}

fn take_paragraph(model: &mut ContentModelDocument, at: &ParagraphPath) -> Option<Paragraph> {
    let group = group_at_mut(model, &at.path)?;
    if !matches!(group.blocks().get(at.index), Some(Block::Paragraph(_))) {
        return None;
    }
    match group.blocks_mut().remove(at.index) {
        Block::Paragraph(paragraph) => Some(paragraph),
        _ => None,
    }
}

/// Append `segments` to `target`, dropping the line break that ended it.
/// Returns the number of segments `target` held before.
fn append_segments(target: &mut Paragraph, mut segments: Vec<Segment>) -> usize {
    if target.segments.last().is_some_and(Segment::is_br) {
        target.segments.pop();
    }
    let offset = target.segments.len();
    target.segments.append(&mut segments);
    target.cached_element = None;
    offset
}

fn remove_block(context: &mut DeleteSelectionContext<'_>, path: &[GroupStep], index: usize, direction: Direction) {
    let Some(group) = group_at_mut(&mut *context.model, path) else {
        return;
    };
    if index >= group.blocks().len() {
        return;
    }
    let removed = group.blocks_mut().remove(index);
    if let Block::Entity(entity) = &removed {
        context.record_deleted_entity(entity.wrapper, &entity.entity_format, direction.entity_operation());
    }
    tracing::trace!(block = %removed.block_type(), "deleted block next to cursor");
    context.delete_result = DeleteResult::Range;
}

fn delete_at_paragraph_start(context: &mut DeleteSelectionContext<'_>, insert_point: InsertPoint) {
    let path = &insert_point.paragraph.path;
    if insert_point.paragraph.index == 0 {
        let item_step = closest_ancestor(
            &*context.model,
            path,
            &[AncestorType::ListItem],
            &[AncestorType::FormatContainer],
        );
        if let Some(item_step) = item_step.filter(|step| step + 1 == path.len()) {
            let item = group_at_mut(&mut *context.model, &path[..item_step])
                .and_then(|group| group.blocks_mut().get_mut(path[item_step].block_index()))
                .and_then(Block::as_list_item_mut);
            if let Some(item) = item.filter(|item| !item.levels.is_empty()) {
                item.outdent();
                tracing::trace!(depth = item.levels.len(), "backspace outdented list item");
                context.delete_result = DeleteResult::Range;
                return;
            }
        }
    }

    match previous_neighbour(&*context.model, &insert_point.paragraph) {
        Neighbour::Paragraph(target) => {
            let Some(source) = take_paragraph(&mut *context.model, &insert_point.paragraph) else {
                return;
            };
            let Some(paragraph) = paragraph_at_mut(&mut *context.model, &target) else {
                return;
            };
            let offset = append_segments(paragraph, source.segments);
            context.set_insert_point(InsertPoint {
                paragraph: target,
                marker: offset + insert_point.marker,
            });
            context.delete_result = DeleteResult::Range;
        }
        Neighbour::Block(block_path, index) => {
            remove_block(context, &block_path, index, Direction::Backward);
            let mut moved = insert_point.paragraph.clone();
            shift_after_removal(&mut moved, &block_path, index);
            context.set_insert_point(InsertPoint {
                paragraph: moved,
                marker: insert_point.marker,
            });
        }
        Neighbour::None => context.delete_result = DeleteResult::NothingToDelete,
    }
}

fn delete_at_paragraph_end(context: &mut DeleteSelectionContext<'_>, insert_point: InsertPoint) {
    match next_neighbour(&*context.model, &insert_point.paragraph) {
        Neighbour::Paragraph(next) => {
            let Some(source) = take_paragraph(&mut *context.model, &next) else {
                return;
            };
            let Some(paragraph) = paragraph_at_mut(&mut *context.model, &insert_point.paragraph) else {
                return;
            };
            append_segments(paragraph, source.segments);
            context.set_insert_point(insert_point);
            context.delete_result = DeleteResult::Range;
        }
        Neighbour::Block(block_path, index) => {
            remove_block(context, &block_path, index, Direction::Forward);
        }
        Neighbour::None => context.delete_result = DeleteResult::NothingToDelete,
    }
}

/// Fix `at` after the block `removed` of the group at `group_path` was
/// removed before it.
fn shift_after_removal(at: &mut ParagraphPath, group_path: &[GroupStep], removed: usize) {
    if at.path.len() == group_path.len() {
        if at.index > removed {
            at.index -= 1;
        }
        return;
    }
    if let Some(GroupStep::Block(index)) = at.path.get_mut(group_path.len()) {
        if *index > removed {
            *index -= 1;
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::dom::NodeId;
    use crate::edit::context::FormatContentModelContext;
    use crate::model::{
        create_br, create_divider, create_entity, create_entity_segment,
        create_list_item, create_paragraph, create_selection_marker,
        create_text, ListLevel, ListType,
    };

    fn paragraph(segments: Vec<Segment>) -> Block {
        let mut paragraph = create_paragraph(false, None, None, None);
        paragraph.segments = segments;
        paragraph.into()
    }

    fn run(
        model: &mut ContentModelDocument,
        at: ParagraphPath,
        marker: usize,
        forward: bool,
    ) -> (DeleteResult, Option<InsertPoint>) {
        let mut context = DeleteSelectionContext::new(model, None);
        context.set_insert_point(InsertPoint { paragraph: at, marker });
        if forward {
            delete_collapsed_selection_forward(&mut context);
        } else {
            delete_collapsed_selection_backward(&mut context);
        }
        (context.delete_result, context.insert_point)
    }

    fn root(index: usize) -> ParagraphPath {
        ParagraphPath::new(Vec::new(), index)
    }

    #[test]
    fn backspace_removes_one_grapheme() {
        let mut model = ContentModelDocument {
            blocks: vec![paragraph(vec![
                create_text("ae\u{301}", None),
                create_selection_marker(None),
            ])],
            ..Default::default()
        };
        let (result, insert_point) = run(&mut model, root(0), 1, false);
        assert_eq!(result, DeleteResult::SingleChar);
        assert_eq!(insert_point.unwrap().marker, 1);
        assert_eq!(model.blocks[0].as_paragraph().unwrap().text(), "a");
    }

    #[test]
    fn delete_removes_the_next_grapheme() {
        let mut model = ContentModelDocument {
            blocks: vec![paragraph(vec![
                create_selection_marker(None),
                create_text("\u{1F44D}\u{1F3FD}b", None),
            ])],
            ..Default::default()
        };
        let (result, _) = run(&mut model, root(0), 0, true);
        assert_eq!(result, DeleteResult::SingleChar);
        assert_eq!(model.blocks[0].as_paragraph().unwrap().text(), "b");
    }

    #[test]
    fn backspace_at_start_joins_the_previous_paragraph() {
        let mut model = ContentModelDocument {
            blocks: vec![
                paragraph(vec![create_text("a", None), create_br(None)]),
                paragraph(vec![create_selection_marker(None), create_text("b", None)]),
            ],
            ..Default::default()
        };
        let (result, insert_point) = run(&mut model, root(1), 0, false);
        assert_eq!(result, DeleteResult::Range);
        assert_eq!(
            insert_point,
            Some(InsertPoint {
                paragraph: root(0),
                marker: 1,
            })
        );
        assert_eq!(model.blocks.len(), 1);
        assert_eq!(model.blocks[0].as_paragraph().unwrap().text(), "ab");
    }

    #[test]
    fn delete_at_end_joins_the_next_paragraph() {
        let mut model = ContentModelDocument {
            blocks: vec![
                paragraph(vec![create_text("a", None), create_selection_marker(None)]),
                paragraph(vec![create_text("b", None)]),
            ],
            ..Default::default()
        };
        let (result, _) = run(&mut model, root(0), 1, true);
        assert_eq!(result, DeleteResult::Range);
        assert_eq!(model.blocks.len(), 1);
        assert_eq!(model.blocks[0].as_paragraph().unwrap().text(), "ab");
    }

    #[test]
    fn backspace_at_document_start_has_nothing_to_delete() {
        let mut model = ContentModelDocument {
            blocks: vec![paragraph(vec![create_selection_marker(None)])],
            ..Default::default()
        };
        let (result, _) = run(&mut model, root(0), 0, false);
        assert_eq!(result, DeleteResult::NothingToDelete);
    }

    #[test]
    fn backspace_after_divider_removes_it() {
        let mut model = ContentModelDocument {
            blocks: vec![
                create_divider("hr").into(),
                paragraph(vec![create_selection_marker(None), create_text("a", None)]),
            ],
            ..Default::default()
        };
        let (result, insert_point) = run(&mut model, root(1), 0, false);
        assert_eq!(result, DeleteResult::Range);
        assert_eq!(insert_point.unwrap().paragraph, root(0));
        assert_eq!(model.blocks.len(), 1);
    }

    #[test]
    fn backspace_at_list_item_start_outdents() {
        let mut item = create_list_item(&[ListLevel::new(ListType::Ordered)], None);
        item.blocks.push(paragraph(vec![create_selection_marker(None), create_text("a", None)]));
        let mut model = ContentModelDocument {
            blocks: vec![item.into()],
            ..Default::default()
        };
        let at = ParagraphPath::new(vec![GroupStep::Block(0)], 0);
        let (result, _) = run(&mut model, at, 0, false);
        assert_eq!(result, DeleteResult::Range);
        assert!(model.blocks[0].as_list_item().unwrap().levels.is_empty());
    }

    #[test]
    fn backspace_into_a_list_joins_its_last_paragraph() {
        let mut item = create_list_item(&[ListLevel::new(ListType::Ordered)], None);
        item.blocks.push(paragraph(vec![create_text("a", None)]));
        let mut model = ContentModelDocument {
            blocks: vec![
                item.into(),
                paragraph(vec![create_selection_marker(None), create_text("b", None)]),
            ],
            ..Default::default()
        };
        let (_, insert_point) = run(&mut model, root(1), 0, false);
        assert_eq!(
            insert_point.unwrap().paragraph,
            ParagraphPath::new(vec![GroupStep::Block(0)], 0)
        );
        assert_eq!(model.blocks.len(), 1);
        let item = model.blocks[0].as_list_item().unwrap();
        assert_eq!(item.blocks[0].as_paragraph().unwrap().text(), "ab");
    }

    #[test]
    fn backspace_over_an_entity_reports_it() {
        let entity = create_entity(NodeId::from_raw(4), Default::default(), None);
        let mut model = ContentModelDocument {
            blocks: vec![paragraph(vec![
                create_entity_segment(entity),
                create_selection_marker(None),
            ])],
            ..Default::default()
        };
        let mut format_context = FormatContentModelContext::default();
        let mut context = DeleteSelectionContext::new(&mut model, Some(&mut format_context));
        context.set_insert_point(InsertPoint {
            paragraph: root(0),
            marker: 1,
        });
        delete_collapsed_selection_backward(&mut context);
        assert_eq!(context.delete_result, DeleteResult::SingleChar);
        drop(context);

        assert_eq!(format_context.deleted_entities.len(), 1);
        assert_eq!(
            format_context.deleted_entities[0].operation,
            EntityOperation::RemoveFromEnd
        );
    }
}
