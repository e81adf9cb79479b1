// Copyright 2024 New Vector Ltd.
// Copyright 2022 The Matrix.org Foundation C.I.C.
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Element-Commercial
// Please see LICENSE in the repository root for full details.

use crate::edit::context::{
    AnnounceData, DeleteResult, DeleteSelectionContext, KnownAnnounceStrings,
};
use crate::edit::list_number::get_list_number;
use crate::edit::paths::{
    closest_ancestor, group_at_mut, AncestorType, GroupStep, InsertPoint,
    ParagraphPath,
};
use crate::edit::split_paragraph::split_paragraph_at;
use crate::model::{Block, ListItem, ListType};

pub fn should_handle_enter_on_list(context: &DeleteSelectionContext<'_>) -> bool {
    matches!(
        context.delete_result,
        DeleteResult::NotDeleted | DeleteResult::NothingToDelete
    )
}

/// Enter inside a list item. An empty item is outdented by one level, any
/// other item is split at the cursor into two items.
pub fn handle_enter_on_list(context: &mut DeleteSelectionContext<'_>) {
    let Some(insert_point) = context.insert_point.clone() else {
        return;
    };
    let path = &insert_point.paragraph.path;
    let Some(item_step) = closest_ancestor(
        &*context.model,
        path,
        &[AncestorType::ListItem],
        &[AncestorType::FormatContainer],
    ) else {
        tracing::trace!("enter outside of a list item");
        return;
    };
    if item_step + 1 != path.len() {
        tracing::trace!("cursor is nested below the list item");
        return;
    }

    let parent_path = path[..item_step].to_vec();
    let item_index = path[item_step].block_index();
    let Some(group) = group_at_mut(&mut *context.model, &parent_path) else {
        return;
    };
    let Some(item) = group.blocks_mut().get_mut(item_index).and_then(Block::as_list_item_mut) else {
        return;
    };
    let paragraph_index = insert_point.paragraph.index;
    let single_block = item.blocks.len() == 1;
    let Some(paragraph) = item
        .blocks
        .get_mut(paragraph_index)
        .and_then(Block::as_paragraph_mut)
    else {
        return;
    };

    if single_block && (paragraph.is_marker_and_br_only() || paragraph.is_empty()) {
        let removed = item.outdent();
        tracing::trace!(
            depth = item.levels.len(),
            "enter on empty list item, outdented"
        );
        if removed.is_some() {
            context.delete_result = DeleteResult::Range;
        }
        return;
    }

    let marker = paragraph
        .segments
        .get(insert_point.marker)
        .map(|s| s.format.clone())
        .unwrap_or_default();
    let new_paragraph = split_paragraph_at(paragraph, insert_point.marker);
    let new_marker = new_paragraph.marker_index().unwrap_or(0);

    let mut new_item = ListItem::new(
        item.levels.iter().map(|level| level.continued()).collect(),
        marker,
    );
    new_item.format = item.format.clone();
    new_item.blocks.push(new_paragraph.into());
    new_item
        .blocks
        .extend(item.blocks.drain(paragraph_index + 1..));
    let new_depth = new_item.levels.len();
    let new_type = new_item.levels.last().map(|l| l.list_type);

    let blocks = group.blocks_mut();
    blocks.insert(item_index + 1, new_item.into());

    if let Some(next) = blocks.get_mut(item_index + 2).and_then(Block::as_list_item_mut) {
        if next.levels.len() >= new_depth {
            for level in next.levels.iter_mut().take(new_depth) {
                level.format.thread.start_number_override = None;
            }
        }
    }

    let number = get_list_number(&*group, item_index + 1);

    let mut new_path = parent_path;
    new_path.push(GroupStep::Block(item_index + 1));
    context.set_insert_point(InsertPoint {
        paragraph: ParagraphPath::new(new_path, 0),
        marker: new_marker,
    });
    context.delete_result = DeleteResult::Range;

    let announce = match (new_type, number) {
        (Some(ListType::Ordered), Some(number)) => Some(AnnounceData {
            default_strings: Some(KnownAnnounceStrings::AnnounceListItemNumbering),
            format_strings: vec![number.to_string()],
            text: None,
        }),
        (Some(ListType::Unordered), _) => Some(AnnounceData {
            default_strings: Some(KnownAnnounceStrings::AnnounceListItemBullet),
            format_strings: Vec::new(),
            text: None,
        }),
        _ => None,
    };
    if let Some(announce) = announce {
        context.announce(announce);
    }
    tracing::trace!(?number, "enter split list item");
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::edit::context::FormatContentModelContext;
    use crate::model::{
        create_br, create_list_item, create_paragraph, create_selection_marker,
        create_text, ContentModelDocument, ListLevel, Segment, SegmentType,
    };

    fn item_with(levels: &[ListLevel], segments: Vec<Segment>) -> Block {
        let mut item = create_list_item(levels, None);
        let mut paragraph = create_paragraph(true, None, None, None);
        paragraph.segments = segments;
        item.blocks.push(paragraph.into());
        item.into()
    }

    fn run(model: &mut ContentModelDocument, item: usize, marker: usize) -> DeleteResult {
        let mut context = DeleteSelectionContext::new(model, None);
        context.set_insert_point(InsertPoint {
            paragraph: ParagraphPath::new(vec![GroupStep::Block(item)], 0),
            marker,
        });
        handle_enter_on_list(&mut context);
        context.delete_result
    }

    fn text_of(block: &Block) -> String {
        block.as_list_item().unwrap().blocks[0].as_paragraph().unwrap().text()
    }

    #[test]
    fn enter_in_the_middle_splits_the_item() {
        let mut level = ListLevel::new(ListType::Ordered);
        level.format.list_style.list_style_type = Some("decimal".into());
        level.format.thread.start_number_override = Some(1);
        let mut model = ContentModelDocument {
            blocks: vec![item_with(
                &[level],
                vec![
                    create_text("te", None),
                    create_selection_marker(None),
                    create_text("st", None),
                ],
            )],
            ..Default::default()
        };

        assert_eq!(run(&mut model, 0, 1), DeleteResult::Range);

        assert_eq!(model.blocks.len(), 2);
        assert_eq!(text_of(&model.blocks[0]), "te");
        assert_eq!(text_of(&model.blocks[1]), "st");
        let new_item = model.blocks[1].as_list_item().unwrap();
        assert_eq!(new_item.levels[0].format.thread.start_number_override, None);
        assert_eq!(
            new_item.levels[0].format.list_style.list_style_type.as_deref(),
            Some("decimal")
        );
        assert_eq!(
            new_item.blocks[0].as_paragraph().unwrap().segments[0].segment_type(),
            SegmentType::SelectionMarker
        );
    }

    #[test]
    fn enter_on_empty_item_outdents() {
        let mut model = ContentModelDocument {
            blocks: vec![item_with(
                &[ListLevel::new(ListType::Unordered)],
                vec![create_selection_marker(None), create_br(None)],
            )],
            ..Default::default()
        };

        assert_eq!(run(&mut model, 0, 0), DeleteResult::Range);
        let item = model.blocks[0].as_list_item().unwrap();
        assert!(item.levels.is_empty());
        assert!(!item.blocks[0].as_paragraph().unwrap().is_implicit);

        assert_eq!(run(&mut model, 0, 0), DeleteResult::NotDeleted);
        assert!(model.blocks[0].as_list_item().unwrap().levels.is_empty());
    }

    #[test]
    fn split_of_a_nested_item_copies_the_whole_level_chain() {
        let mut outer = ListLevel::new(ListType::Ordered);
        outer.format.list_style.list_style_type = Some("decimal".into());
        outer.format.thread.start_number_override = Some(3);
        let mut inner = ListLevel::new(ListType::Unordered);
        inner.format.list_style.list_style_type = Some("circle".into());
        inner.dataset.insert("editingInfo".into(), "{}".into());
        let mut model = ContentModelDocument {
            blocks: vec![item_with(
                &[outer, inner],
                vec![
                    create_text("ab", None),
                    create_selection_marker(None),
                    create_text("cd", None),
                ],
            )],
            ..Default::default()
        };

        assert_eq!(run(&mut model, 0, 1), DeleteResult::Range);

        let first = model.blocks[0].as_list_item().unwrap();
        let second = model.blocks[1].as_list_item().unwrap();
        assert_eq!(first.levels[0].format.thread.start_number_override, Some(3));
        assert_eq!(second.levels.len(), 2);
        assert_eq!(
            second.levels.iter().map(|l| l.list_type).collect::<Vec<_>>(),
            vec![ListType::Ordered, ListType::Unordered]
        );
        assert!(second
            .levels
            .iter()
            .all(|l| l.format.thread.start_number_override.is_none()));
        assert_eq!(
            second.levels[1].format.list_style.list_style_type.as_deref(),
            Some("circle")
        );
        assert_eq!(second.levels[1].dataset, first.levels[1].dataset);
        assert_eq!(text_of(&model.blocks[1]), "cd");
    }

    #[test]
    fn following_item_continues_numbering() {
        let level = ListLevel::new(ListType::Ordered);
        let mut restart = level.clone();
        restart.format.thread.start_number_override = Some(4);
        let mut model = ContentModelDocument {
            blocks: vec![
                item_with(
                    &[level],
                    vec![create_text("a", None), create_selection_marker(None)],
                ),
                item_with(&[restart], vec![create_text("b", None)]),
            ],
            ..Default::default()
        };
        let mut format_context = FormatContentModelContext::default();
        let mut context = DeleteSelectionContext::new(&mut model, Some(&mut format_context));
        context.set_insert_point(InsertPoint {
            paragraph: ParagraphPath::new(vec![GroupStep::Block(0)], 0),
            marker: 1,
        });
        handle_enter_on_list(&mut context);
        drop(context);

        assert_eq!(model.blocks.len(), 3);
        let last = model.blocks[2].as_list_item().unwrap();
        assert_eq!(last.levels[0].format.thread.start_number_override, None);
        assert_eq!(
            format_context.announce_data,
            Some(AnnounceData {
                default_strings: Some(KnownAnnounceStrings::AnnounceListItemNumbering),
                format_strings: vec!["2".into()],
                text: None,
            })
        );
    }

    #[test]
    fn paragraph_outside_of_lists_is_left_alone() {
        let mut paragraph = create_paragraph(false, None, None, None);
        paragraph.segments.push(create_selection_marker(None));
        let mut model = ContentModelDocument {
            blocks: vec![paragraph.into()],
            ..Default::default()
        };
        let mut context = DeleteSelectionContext::new(&mut model, None);
        context.set_insert_point(InsertPoint {
            paragraph: ParagraphPath::new(Vec::new(), 0),
            marker: 0,
        });
        handle_enter_on_list(&mut context);
        assert_eq!(context.delete_result, DeleteResult::NotDeleted);
    }
}
