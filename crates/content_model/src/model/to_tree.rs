// Copyright 2024 New Vector Ltd.
// Copyright 2022 The Matrix.org Foundation C.I.C.
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Element-Commercial
// Please see LICENSE in the repository root for full details.

//! Ascii tree rendering of a model, for tests and debugging.
//!
//! ```text
//! ├>p
//! │ ├>"te"
//! │ └>|
//! └>li ol
//!   └>p (implicit)
//!     └>br
//! ```

use super::block::Block;
use super::block_group::{BlockGroup, ContentModelDocument};
use super::paragraph::Paragraph;
use super::segment::{Segment, SegmentKind};
use super::table::{TableCell, TableRow};

pub trait ToTree {
    /// One line describing this node. Empty for the root.
    fn tree_label(&self) -> String;

    fn tree_children(&self) -> Vec<&dyn ToTree> {
        Vec::new()
    }

    fn to_tree(&self) -> String
    where
        Self: Sized,
    {
        let mut out = String::new();
        let label = self.tree_label();
        if !label.is_empty() {
            out.push_str(&label);
            out.push('\n');
        }
        write_children(self, "", &mut out);
        out
    }
}

fn write_children(node: &dyn ToTree, prefix: &str, out: &mut String) {
    let children = node.tree_children();
    let count = children.len();
    for (i, child) in children.into_iter().enumerate() {
        let is_last = i + 1 == count;
        out.push_str(prefix);
        out.push_str(if is_last { "└>" } else { "├>" });
        out.push_str(&child.tree_label());
        out.push('\n');
        let child_prefix =
            format!("{prefix}{}", if is_last { "  " } else { "│ " });
        write_children(child, &child_prefix, out);
    }
}

fn flag(out: &mut String, set: bool, name: &str) {
    if set {
        out.push_str(" (");
        out.push_str(name);
        out.push(')');
    }
}

impl ToTree for ContentModelDocument {
    fn tree_label(&self) -> String {
        String::new()
    }

    fn tree_children(&self) -> Vec<&dyn ToTree> {
        self.blocks.iter().map(|b| b as &dyn ToTree).collect()
    }
}

impl ToTree for Block {
    fn tree_label(&self) -> String {
        match self {
            Block::Paragraph(p) => paragraph_label(p),
            Block::Table(_) => String::from("table"),
            Block::Divider(d) => {
                let mut label = d.tag_name.clone();
                flag(&mut label, d.is_selected, "selected");
                label
            }
            Block::Entity(e) => {
                let mut label = format!(
                    "entity {}",
                    e.entity_format.entity_type.as_deref().unwrap_or("")
                );
                flag(&mut label, e.is_selected, "selected");
                label
            }
            Block::BlockGroup(BlockGroup::FormatContainer(c)) => c.tag_name.clone(),
            Block::BlockGroup(BlockGroup::ListItem(item)) => {
                let mut label = String::from("li");
                for level in &item.levels {
                    label.push(' ');
                    label.push_str(level.list_type.tag());
                }
                label
            }
            Block::BlockGroup(BlockGroup::General(g)) => {
                let mut label = String::from("general");
                flag(&mut label, g.is_selected, "selected");
                label
            }
        }
    }

    fn tree_children(&self) -> Vec<&dyn ToTree> {
        match self {
            Block::Paragraph(p) => {
                p.segments.iter().map(|s| s as &dyn ToTree).collect()
            }
            Block::Table(t) => t.rows.iter().map(|r| r as &dyn ToTree).collect(),
            Block::Divider(_) | Block::Entity(_) => Vec::new(),
            Block::BlockGroup(group) => group
                .as_container()
                .blocks()
                .iter()
                .map(|b| b as &dyn ToTree)
                .collect(),
        }
    }
}

fn paragraph_label(paragraph: &Paragraph) -> String {
    let mut label = paragraph
        .decorator
        .as_ref()
        .map(|d| d.tag_name.clone())
        .unwrap_or_else(|| String::from("p"));
    flag(&mut label, paragraph.is_implicit, "implicit");
    label
}

impl ToTree for TableRow {
    fn tree_label(&self) -> String {
        String::from("tr")
    }

    fn tree_children(&self) -> Vec<&dyn ToTree> {
        self.cells.iter().map(|c| c as &dyn ToTree).collect()
    }
}

impl ToTree for TableCell {
    fn tree_label(&self) -> String {
        let mut label = String::from(if self.is_header { "th" } else { "td" });
        flag(&mut label, self.span_left, "span-left");
        flag(&mut label, self.span_above, "span-above");
        flag(&mut label, self.is_selected, "selected");
        label
    }

    fn tree_children(&self) -> Vec<&dyn ToTree> {
        self.blocks.iter().map(|b| b as &dyn ToTree).collect()
    }
}

impl ToTree for Segment {
    fn tree_label(&self) -> String {
        let mut label = match &self.kind {
            SegmentKind::Text { text } => format!("\"{text}\""),
            SegmentKind::Image(image) => format!("img \"{}\"", image.src),
            SegmentKind::Br => String::from("br"),
            SegmentKind::SelectionMarker => String::from("|"),
            SegmentKind::General(_) => String::from("general"),
            SegmentKind::Entity { entity_format, .. } => format!(
                "entity {}",
                entity_format.entity_type.as_deref().unwrap_or("")
            ),
        };
        if let Some(link) = &self.link {
            label.push_str(&format!(
                " a \"{}\"",
                link.format.link.href.as_deref().unwrap_or("")
            ));
        }
        flag(&mut label, self.code.is_some(), "code");
        // Markers only ever exist selected
        flag(&mut label, self.is_selected && !self.is_marker(), "selected");
        label
    }

    fn tree_children(&self) -> Vec<&dyn ToTree> {
        match &self.kind {
            SegmentKind::General(g) => {
                g.blocks.iter().map(|b| b as &dyn ToTree).collect()
            }
            _ => Vec::new(),
        }
    }
}

#[cfg(test)]
mod test {
    use indoc::indoc;

    use super::*;
    use crate::model::creators::*;
    use crate::model::list::ListType;

    #[test]
    fn renders_nested_blocks_as_ascii_tree() {
        let mut paragraph = create_paragraph(false, None, None, None);
        paragraph.segments.push(create_text("te", None));
        paragraph.segments.push(create_selection_marker(None));

        let mut item = create_list_item(
            &[create_list_level(ListType::Ordered, None)],
            None,
        );
        let mut inner = create_paragraph(true, None, None, None);
        inner.segments.push(create_br(None));
        item.blocks.push(inner.into());

        let model = ContentModelDocument {
            blocks: vec![paragraph.into(), item.into()],
            ..Default::default()
        };

        assert_eq!(
            model.to_tree(),
            indoc! {r#"
                ├>p
                │ ├>"te"
                │ └>|
                └>li ol
                  └>p (implicit)
                    └>br
            "#}
        );
    }
}
