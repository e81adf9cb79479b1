// Copyright 2024 New Vector Ltd.
// Copyright 2022 The Matrix.org Foundation C.I.C.
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Element-Commercial
// Please see LICENSE in the repository root for full details.

use crate::edit::context::{DeleteResult, DeleteSelectionContext};
use crate::edit::paths::{
    closest_ancestor, group_at_mut, AncestorType, InsertPoint, ParagraphPath,
};
use crate::model::{Block, BlockGroup, FormatContainer};

fn is_empty_line(block: &Block) -> bool {
    block
        .as_paragraph()
        .is_some_and(|p| p.is_marker_and_br_only() || p.is_empty())
}

/// Enter on an empty line of a quote leaves the quote. A quote holding
/// nothing but that line is unwrapped, otherwise the line moves out after
/// the quote and the rest of the quote continues below it.
pub fn delete_empty_quote(context: &mut DeleteSelectionContext<'_>) {
    let Some(insert_point) = context.insert_point.clone() else {
        return;
    };
    let path = &insert_point.paragraph.path;
    let Some(quote_step) = closest_ancestor(
        &*context.model,
        path,
        &[AncestorType::FormatContainer, AncestorType::ListItem],
        &[],
    ) else {
        return;
    };
    if quote_step + 1 != path.len() {
        return;
    }

    let parent_path = path[..quote_step].to_vec();
    let quote_index = path[quote_step].block_index();
    let Some(group) = group_at_mut(&mut *context.model, &parent_path) else {
        return;
    };
    let blocks = group.blocks_mut();
    let Some(Block::BlockGroup(BlockGroup::FormatContainer(quote))) = blocks.get_mut(quote_index)
    else {
        return;
    };
    let line = insert_point.paragraph.index;
    if quote.tag_name != "blockquote" || !quote.blocks.get(line).is_some_and(is_empty_line) {
        return;
    }

    let new_index = if quote.blocks.len() == 1 {
        let content = std::mem::take(&mut quote.blocks);
        blocks.splice(quote_index..=quote_index, content);
        tracing::trace!("unwrapped empty quote");
        quote_index
    } else {
        let rest = quote.blocks.split_off(line + 1);
        let mut paragraph = quote.blocks.remove(line);
        paragraph.clear_cached_element();
        quote.cached_element = None;
        let remainder = (!rest.is_empty()).then(|| FormatContainer {
            tag_name: quote.tag_name.clone(),
            blocks: rest,
            format: quote.format.clone(),
            cached_element: None,
        });

        let new_index = if quote.blocks.is_empty() {
            blocks[quote_index] = paragraph;
            quote_index
        } else {
            blocks.insert(quote_index + 1, paragraph);
            quote_index + 1
        };
        if let Some(remainder) = remainder {
            blocks.insert(new_index + 1, remainder.into());
        }
        tracing::trace!("moved empty line out of quote");
        new_index
    };

    context.set_insert_point(InsertPoint {
        paragraph: ParagraphPath::new(parent_path, new_index),
        marker: insert_point.marker,
    });
    context.delete_result = DeleteResult::Range;
}
