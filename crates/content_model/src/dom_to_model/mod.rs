// Copyright 2024 New Vector Ltd.
// Copyright 2022 The Matrix.org Foundation C.I.C.
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Element-Commercial
// Please see LICENSE in the repository root for full details.

//! Reading an HTML tree into a Content Model.

pub mod context;
pub mod options;
pub mod processors;
pub mod utils;

pub use context::{DomToModelContext, DomToModelFormatContext, DomToModelListFormat};
pub use options::{DomToModelOption, ElementProcessor, ElementProcessorMap};
pub use processors::DEFAULT_ELEMENT_PROCESSORS;

use crate::dom::{DomSelection, HtmlDom, NodeId};
use crate::model::{create_empty_model, normalize_content_model, ContentModelDocument};

/// Build a model from the children of `root` (or from `root` itself with
/// `include_root`). `selection_override` wins over the selection in
/// `option`. Never fails: content that cannot be understood is kept as
/// general blocks and segments.
pub fn create_content_model(
    dom: &HtmlDom,
    root: NodeId,
    option: &DomToModelOption,
    selection_override: Option<DomSelection>,
) -> ContentModelDocument {
    let mut context = DomToModelContext::new(option, selection_override);
    let mut model = create_empty_model(None);

    let key = if option.include_root { "element" } else { "child" };
    processors::process(key, &mut model, dom, root, &mut context);
    normalize_content_model(&mut model);

    tracing::debug!(
        "Created content model with {} blocks from {} nodes",
        model.blocks.len(),
        dom.descendants(root).len()
    );
    model
}

#[cfg(test)]
mod test {
    use indoc::indoc;

    use super::*;
    use crate::dom::{DomPosition, DomRange};
    use crate::model::{Block, BlockGroup, SegmentKind, ToTree};

    fn parse(html: &str) -> ContentModelDocument {
        let dom = HtmlDom::parse(html);
        create_content_model(&dom, dom.root(), &DomToModelOption::default(), None)
    }

    #[test]
    fn inline_content_becomes_an_implicit_paragraph() {
        let model = parse("hello <b>world</b>");
        assert_eq!(
            model.to_tree(),
            indoc! {r#"
            └>p (implicit)
              ├>"hello "
              └>"world"
            "#}
        );
    }

    #[test]
    fn block_elements_close_implicit_paragraphs() {
        let model = parse("a<div>b</div>c<h1>d</h1>");
        assert_eq!(
            model.to_tree(),
            indoc! {r#"
            ├>p (implicit)
            │ └>"a"
            ├>p
            │ └>"b"
            ├>p (implicit)
            │ └>"c"
            └>h1
              └>"d"
            "#}
        );
    }

    #[test]
    fn inline_formats_are_inherited() {
        let model = parse(r#"<span style="color: red">a<i>b</i></span>"#);
        let paragraph = model.blocks[0].as_paragraph().unwrap();
        let b = &paragraph.segments[1];
        assert_eq!(b.format.text_color.text_color.as_deref(), Some("red"));
        assert_eq!(b.format.font.italic, Some(true));
        assert_eq!(paragraph.segments[0].format.font.italic, None);
    }

    #[test]
    fn collapsed_selection_splits_text() {
        let dom = HtmlDom::parse("<div>test</div>");
        let div = dom.children(dom.root())[0];
        let text = dom.children(div)[0];
        let selection =
            DomSelection::range(DomRange::collapsed_at(DomPosition::new(text, 2)));

        let model = create_content_model(
            &dom,
            dom.root(),
            &DomToModelOption::default(),
            Some(selection),
        );

        assert_eq!(
            model.to_tree(),
            indoc! {r#"
            └>p
              ├>"te"
              ├>|
              └>"st"
            "#}
        );
        model.assert_invariants();
    }

    #[test]
    fn expanded_selection_marks_segments() {
        let dom = HtmlDom::parse("<div>abc</div>");
        let div = dom.children(dom.root())[0];
        let text = dom.children(div)[0];
        let selection = DomSelection::range(DomRange::new(
            DomPosition::new(text, 1),
            DomPosition::new(text, 2),
        ));

        let model = create_content_model(
            &dom,
            dom.root(),
            &DomToModelOption::default(),
            Some(selection),
        );

        let paragraph = model.blocks[0].as_paragraph().unwrap();
        let selected: Vec<bool> = paragraph.segments.iter().map(|s| s.is_selected).collect();
        assert_eq!(selected, vec![false, true, false]);
    }

    #[test]
    fn nested_lists_produce_flat_items_with_level_chains() {
        let model = parse("<ol><li>a<ul><li>b</li></ul></li><li>c</li></ol>");
        let depths: Vec<usize> = model
            .blocks
            .iter()
            .filter_map(Block::as_list_item)
            .map(|item| item.depth())
            .collect();
        assert_eq!(depths, vec![1, 2, 1]);

        let first = model.blocks[0].as_list_item().unwrap();
        let third = model.blocks[2].as_list_item().unwrap();
        assert_eq!(first.levels[0].format.thread.start_number_override, Some(1));
        assert_eq!(third.levels[0].format.thread.start_number_override, None);
    }

    #[test]
    fn separate_lists_continue_numbering_when_start_matches() {
        let model = parse(r#"<ol><li>a</li></ol><p>x</p><ol start="2"><li>b</li></ol>"#);
        let items: Vec<_> = model.blocks.iter().filter_map(Block::as_list_item).collect();
        assert_eq!(items.len(), 2);
        assert_eq!(items[1].levels[0].format.thread.start_number_override, None);
    }

    #[test]
    fn tables_are_read_into_a_grid() {
        let model = parse(
            r#"<table><tbody><tr><td colspan="2" style="width: 100px">a</td></tr><tr><td>b</td><td>c</td></tr></tbody></table>"#,
        );
        let Block::Table(table) = &model.blocks[0] else {
            panic!("expected a table");
        };
        assert_eq!(table.rows.len(), 2);
        assert_eq!(table.widths, vec![50.0, 50.0]);
        assert!(table.rows[0].cells[1].span_left);
        assert!(!table.rows[1].cells[1].span_left);
        model.assert_invariants();
    }

    #[test]
    fn blockquote_becomes_format_container() {
        let model = parse("<blockquote><div>a</div></blockquote>");
        assert!(matches!(
            &model.blocks[0],
            Block::BlockGroup(BlockGroup::FormatContainer(c)) if c.tag_name == "blockquote"
        ));
    }

    #[test]
    fn entities_keep_their_wrapper() {
        let model = parse(r#"a<span class="_Entity _EType_mention _EId_x _EReadonly_1">@x</span>"#);
        let paragraph = model.blocks[0].as_paragraph().unwrap();
        let SegmentKind::Entity { entity_format, .. } = &paragraph.segments[1].kind else {
            panic!("expected an entity");
        };
        assert_eq!(entity_format.entity_type.as_deref(), Some("mention"));
        assert_eq!(paragraph.segments.len(), 2);
    }

    #[test]
    fn unknown_elements_are_kept_as_general_content() {
        let model = parse("<foo-bar>x</foo-bar>");
        let paragraph = model.blocks[0].as_paragraph().unwrap();
        assert!(matches!(paragraph.segments[0].kind, SegmentKind::General(_)));
    }

    #[test]
    fn links_decorate_segments() {
        let model = parse(r#"<a href="https://example.org">x</a>"#);
        let segment = &model.blocks[0].as_paragraph().unwrap().segments[0];
        let link = segment.link.as_ref().unwrap();
        assert_eq!(link.format.link.href.as_deref(), Some("https://example.org"));
    }
}
