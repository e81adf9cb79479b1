// Copyright 2024 New Vector Ltd.
// Copyright 2022 The Matrix.org Foundation C.I.C.
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Element-Commercial
// Please see LICENSE in the repository root for full details.

use super::block::Block;
use super::block_group::{BlockGroupContainer, ContentModelDocument};
use super::segment::SegmentKind;

impl ContentModelDocument {
    /// Check the structural invariants when running tests or when the
    /// `assert-invariants` feature is on. Does nothing otherwise.
    pub fn assert_invariants(&self) {
        cfg_if::cfg_if! {
            if #[cfg(any(test, feature = "assert-invariants"))] {
                self.explicitly_assert_invariants();
            }
        }
    }

    /// Panics if the model is structurally broken:
    /// - more than one selection marker while nothing else is selected,
    /// - a table row whose cell count differs from the column widths.
    pub fn explicitly_assert_invariants(&self) {
        let mut stats = Stats::default();
        visit_group(self, &mut stats);
        assert!(
            stats.markers <= 1 || stats.other_selected > 0,
            "a collapsed selection has {} selection markers",
            stats.markers
        );
    }
}

#[derive(Default)]
struct Stats {
    markers: usize,
    other_selected: usize,
}

fn visit_group(group: &dyn BlockGroupContainer, stats: &mut Stats) {
    for block in group.blocks() {
        match block {
            Block::Paragraph(p) => {
                for segment in &p.segments {
                    match &segment.kind {
                        SegmentKind::SelectionMarker => stats.markers += 1,
                        SegmentKind::General(g) => visit_group(g, stats),
                        _ if segment.is_selected => stats.other_selected += 1,
                        _ => {}
                    }
                }
            }
            Block::Table(t) => {
                for (i, row) in t.rows.iter().enumerate() {
                    assert_eq!(
                        row.cells.len(),
                        t.widths.len(),
                        "row {i} of a table has {} cells for {} columns",
                        row.cells.len(),
                        t.widths.len()
                    );
                    for cell in &row.cells {
                        if cell.is_selected {
                            stats.other_selected += 1;
                        }
                        visit_group(cell, stats);
                    }
                }
            }
            Block::Divider(d) => {
                if d.is_selected {
                    stats.other_selected += 1;
                }
            }
            Block::Entity(e) => {
                if e.is_selected {
                    stats.other_selected += 1;
                }
            }
            Block::BlockGroup(g) => visit_group(g.as_container(), stats),
        }
    }
}
