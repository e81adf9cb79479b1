// Copyright 2024 New Vector Ltd.
// Copyright 2022 The Matrix.org Foundation C.I.C.
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Element-Commercial
// Please see LICENSE in the repository root for full details.

use crate::model::{BlockGroupContainer, ListLevel, ListType};
use crate::model_to_dom::handlers::can_share;

/// The number displayed in front of the list item at `index` of `group`,
/// counted the same way the items are numbered when written out. `None` for
/// bullets, dummy items and blocks that are not list items.
pub fn get_list_number(group: &dyn BlockGroupContainer, index: usize) -> Option<i64> {
    let mut counts: Vec<i64> = Vec::new();
    let mut open: Vec<ListLevel> = Vec::new();

    for (i, block) in group.blocks().iter().enumerate().take(index + 1) {
        let Some(item) = block.as_list_item() else {
            open.clear();
            continue;
        };

        let shared = open
            .iter()
            .zip(&item.levels)
            .take_while(|(open, level)| can_share(open, level))
            .count();
        open.truncate(shared);

        for (depth, level) in item.levels.iter().enumerate().skip(shared) {
            match level.list_type {
                ListType::Ordered => {
                    if counts.len() <= depth {
                        counts.resize(depth + 1, 0);
                    }
                    if let Some(start) = level.format.thread.start_number_override {
                        counts[depth] = i64::from(start) - 1;
                    }
                    counts.truncate(depth + 1);
                }
                ListType::Unordered => counts.truncate(depth),
            }
            open.push(level.clone());
        }

        let Some(last) = item.levels.last() else {
            continue;
        };
        let depth = item.levels.len() - 1;
        let numbered = last.list_type == ListType::Ordered && !item.is_dummy();
        if numbered {
            if counts.len() <= depth {
                counts.resize(depth + 1, 0);
            }
            counts[depth] += 1;
        }

        if i == index {
            return if numbered { counts.get(depth).copied() } else { None };
        }
    }
    None
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::model::{create_list_item, create_paragraph, ContentModelDocument};

    #[test]
    fn numbering_continues_across_interruptions() {
        let ol = ListLevel::new(ListType::Ordered);
        let model = ContentModelDocument {
            blocks: vec![
                create_list_item(&[ol.clone()], None).into(),
                create_list_item(&[ol.clone()], None).into(),
                create_paragraph(false, None, None, None).into(),
                create_list_item(&[ol], None).into(),
            ],
            ..Default::default()
        };
        assert_eq!(get_list_number(&model, 0), Some(1));
        assert_eq!(get_list_number(&model, 1), Some(2));
        assert_eq!(get_list_number(&model, 2), None);
        assert_eq!(get_list_number(&model, 3), Some(3));
    }

    #[test]
    fn override_restarts_and_bullets_have_no_number() {
        let ol = ListLevel::new(ListType::Ordered);
        let mut restart = ol.clone();
        restart.format.thread.start_number_override = Some(10);
        let model = ContentModelDocument {
            blocks: vec![
                create_list_item(&[ol.clone()], None).into(),
                create_list_item(&[restart], None).into(),
                create_list_item(&[ol.clone()], None).into(),
                create_list_item(&[ol, ListLevel::new(ListType::Unordered)], None).into(),
            ],
            ..Default::default()
        };
        assert_eq!(get_list_number(&model, 1), Some(10));
        assert_eq!(get_list_number(&model, 2), Some(11));
        assert_eq!(get_list_number(&model, 3), None);
    }
}
