// Copyright 2024 New Vector Ltd.
// Copyright 2022 The Matrix.org Foundation C.I.C.
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Element-Commercial
// Please see LICENSE in the repository root for full details.

use content_model::edit::split_paragraph_at;
use content_model::format::SegmentFormat;
use content_model::model::{
    create_br, create_list_item, create_list_level, create_paragraph,
    create_selection_marker, create_table, create_table_cell, create_text,
};
use content_model::paste::process_paste_event;
use content_model::{
    create_content_model, create_dom_from_model, create_paste_model,
    delete_selection, keyboard_delete, keyboard_enter, BeforePasteEvent,
    Block, ContentModelDocument, DeleteDirection, DeleteResult, DomPosition,
    DomRange, DomSelection, DomToModelOption, HtmlDom, ListLevel, ListType,
    ModelToDomOption, Segment, SegmentType, ToTree,
};
use indoc::indoc;
use speculoos::{assert_that, prelude::*, AssertionFailure, Spec};

fn paragraph(segments: Vec<Segment>) -> Block {
    let mut paragraph = create_paragraph(false, None, None, None);
    paragraph.segments = segments;
    paragraph.into()
}

fn selected(mut segment: Segment) -> Segment {
    segment.is_selected = true;
    segment
}

fn model_of(blocks: Vec<Block>) -> ContentModelDocument {
    ContentModelDocument {
        blocks,
        ..Default::default()
    }
}

fn list_item(levels: &[ListLevel], segments: Vec<Segment>) -> Block {
    let mut item = create_list_item(levels, None);
    let mut paragraph = create_paragraph(true, None, None, None);
    paragraph.segments = segments;
    item.blocks.push(paragraph.into());
    item.into()
}

fn list_items(model: &ContentModelDocument) -> usize {
    model.blocks.iter().filter(|b| b.as_list_item().is_some()).count()
}

fn segment_types(block: &Block) -> Vec<SegmentType> {
    block
        .as_paragraph()
        .map(|p| p.segments.iter().map(Segment::segment_type).collect())
        .unwrap_or_default()
}

fn write_html(model: &ContentModelDocument) -> String {
    let mut dom = HtmlDom::new();
    let root = dom.root();
    create_dom_from_model(model, &mut dom, root, &ModelToDomOption::default());
    dom.to_html()
}

fn read_html(html: &str) -> ContentModelDocument {
    let dom = HtmlDom::parse(html);
    let option = DomToModelOption {
        disable_cache_element: true,
        ..Default::default()
    };
    create_content_model(&dom, dom.root(), &option, None)
}

trait Roundtrips<T> {
    fn roundtrips(&self);
}

impl<'s, T> Roundtrips<T> for Spec<'s, T>
where
    T: AsRef<str>,
{
    fn roundtrips(&self) {
        let model = read_html(self.subject.as_ref());
        model.explicitly_assert_invariants();

        let written = write_html(&model);
        let reread = read_html(&written);
        if reread.to_tree() != model.to_tree() {
            AssertionFailure::from_spec(self)
                .with_expected(model.to_tree())
                .with_actual(reread.to_tree())
                .fail();
        }
    }
}

#[test]
fn models_survive_a_round_trip_through_the_dom() {
    assert_that!("plain text").roundtrips();
    assert_that!("<div>a<b>b</b>c</div><div>d</div>").roundtrips();
    assert_that!("<h1>title</h1><p>body</p>").roundtrips();
    assert_that!("<ol><li>one</li><li>two<ul><li>nested</li></ul></li></ol>")
        .roundtrips();
    assert_that!("<blockquote><div>quoted</div></blockquote>").roundtrips();
    assert_that!(r#"<div>a <a href="https://matrix.org">link</a></div>"#)
        .roundtrips();
}

#[test]
fn enter_splits_a_paragraph_mid_text() {
    let mut model = model_of(vec![paragraph(vec![
        create_text("te", None),
        create_selection_marker(None),
        create_text("st", None),
    ])]);

    let result = keyboard_enter(&mut model, false, None);

    assert_that!(result).is_equal_to(DeleteResult::Range);
    assert_eq!(
        model.to_tree(),
        indoc! {r#"
            ├>p
            │ └>"te"
            └>p
              ├>|
              └>"st"
        "#}
    );
}

#[test]
fn enter_on_an_empty_list_item_outdents_it_to_a_paragraph() {
    let mut model = model_of(vec![list_item(
        &[create_list_level(ListType::Unordered, None)],
        vec![create_selection_marker(None), create_br(None)],
    )]);

    let result = keyboard_enter(&mut model, false, None);

    assert_that!(result).is_equal_to(DeleteResult::Range);
    assert_that!(list_items(&model)).is_equal_to(0);
    assert_that!(model.blocks).has_length(1);
    assert_eq!(
        segment_types(&model.blocks[0]).first(),
        Some(&SegmentType::SelectionMarker)
    );
}

#[test]
fn repeated_enter_on_an_empty_item_stops_outdenting() {
    let levels = [
        create_list_level(ListType::Ordered, None),
        create_list_level(ListType::Unordered, None),
    ];
    let mut model = model_of(vec![list_item(
        &levels,
        vec![create_selection_marker(None), create_br(None)],
    )]);

    keyboard_enter(&mut model, false, None);
    let item = model.blocks[0].as_list_item().unwrap();
    assert_that!(item.levels).has_length(1);

    keyboard_enter(&mut model, false, None);
    assert_that!(list_items(&model)).is_equal_to(0);

    // Now a plain paragraph: Enter breaks the line instead
    keyboard_enter(&mut model, false, None);
    assert_that!(list_items(&model)).is_equal_to(0);
    assert_that!(model.blocks).has_length(2);
    model.explicitly_assert_invariants();
}

#[test]
fn enter_in_the_middle_of_a_list_item_splits_it() {
    let mut level = create_list_level(ListType::Ordered, None);
    level.format.list_style.list_style_type = Some("decimal".into());
    level.format.thread.start_number_override = Some(1);
    let mut model = model_of(vec![list_item(
        &[level],
        vec![
            create_text("te", None),
            create_selection_marker(None),
            create_text("st", None),
        ],
    )]);

    keyboard_enter(&mut model, false, None);

    assert_eq!(
        model.to_tree(),
        indoc! {r#"
            ├>li ol
            │ └>p
            │   └>"te"
            └>li ol
              └>p
                ├>|
                └>"st"
        "#}
    );
    let first = model.blocks[0].as_list_item().unwrap();
    let second = model.blocks[1].as_list_item().unwrap();
    assert_that!(first.levels[0].format.thread.start_number_override).is_equal_to(Some(1));
    assert_that!(second.levels[0].format.thread.start_number_override).is_none();
    assert_that!(second.levels[0].format.list_style.list_style_type.as_deref())
        .is_equal_to(Some("decimal"));
}

#[test]
fn selection_from_a_paragraph_into_a_table_collapses_to_one_marker() {
    let mut table = create_table(1, None);
    let mut first = create_table_cell(false, false, false, None);
    first
        .blocks
        .push(paragraph(vec![selected(create_text("c", None)), create_text("d", None)]));
    let mut second = create_table_cell(false, false, false, None);
    second.blocks.push(paragraph(vec![create_text("e", None)]));
    table.rows[0].cells = vec![first, second];
    table.widths = vec![100.0, 100.0];

    let mut model = model_of(vec![
        paragraph(vec![create_text("a", None), selected(create_text("b", None))]),
        table.into(),
    ]);

    let result = delete_selection(&mut model, &[], None);

    assert_that!(result.delete_result).is_equal_to(DeleteResult::Range);
    assert_eq!(
        model.to_tree(),
        indoc! {r#"
            ├>p
            │ ├>"a"
            │ ├>|
            │ └>"d"
            └>table
              └>tr
                ├>td
                │ └>p
                │   └>br
                └>td
                  └>p
                    └>"e"
        "#}
    );
    assert_that!(result.insert_point.map(|ip| ip.marker)).is_equal_to(Some(1));
}

#[test]
fn selection_entering_a_larger_table_only_removes_what_it_covers() {
    let cell = |blocks: Vec<Block>| {
        let mut cell = create_table_cell(false, false, false, None);
        cell.blocks = blocks;
        cell
    };
    let mut table = create_table(2, None);
    table.rows[0].cells = vec![
        cell(vec![
            paragraph(vec![selected(create_text("c", None)), create_text("d", None)]),
            paragraph(vec![create_text("keep1", None)]),
        ]),
        cell(vec![paragraph(vec![create_text("keep2", None)])]),
    ];
    table.rows[1].cells = vec![
        cell(vec![paragraph(vec![create_text("keep3", None)])]),
        cell(vec![paragraph(vec![create_text("keep4", None)])]),
    ];
    table.widths = vec![100.0, 100.0];

    let mut model = model_of(vec![
        paragraph(vec![create_text("a", None), selected(create_text("b", None))]),
        table.into(),
    ]);

    delete_selection(&mut model, &[], None);

    assert_eq!(
        model.to_tree(),
        indoc! {r#"
            ├>p
            │ ├>"a"
            │ ├>|
            │ └>"d"
            └>table
              ├>tr
              │ ├>td
              │ │ └>p
              │ │   └>"keep1"
              │ └>td
              │   └>p
              │     └>"keep2"
              └>tr
                ├>td
                │ └>p
                │   └>"keep3"
                └>td
                  └>p
                    └>"keep4"
        "#}
    );
    model.explicitly_assert_invariants();
}

fn implicit_paragraph(segments: Vec<Segment>) -> Block {
    let mut paragraph = create_paragraph(true, None, None, None);
    paragraph.segments = segments;
    paragraph.into()
}

#[test]
fn enter_outdent_keeps_its_own_line_after_a_round_trip() {
    let ol = create_list_level(ListType::Ordered, None);
    let mut model = model_of(vec![
        list_item(&[ol.clone()], vec![create_text("abc", None)]),
        list_item(&[ol], vec![create_selection_marker(None), create_br(None)]),
        implicit_paragraph(vec![create_text("tail", None)]),
    ]);

    keyboard_enter(&mut model, false, None);

    let outdented = model.blocks[1].as_paragraph().unwrap();
    assert_that!(outdented.is_implicit).is_false();

    let reread = read_html(&write_html(&model));
    assert_that!(reread.blocks).has_length(3);
    assert_that!(list_items(&reread)).is_equal_to(1);
    assert_eq!(segment_types(&reread.blocks[1]), vec![SegmentType::Br]);
    assert_that!(reread.blocks[2].as_paragraph().unwrap().text()).is_equal_to("tail".to_owned());
}

#[test]
fn backspace_outdent_keeps_its_own_line_after_a_round_trip() {
    let ol = create_list_level(ListType::Ordered, None);
    let mut model = model_of(vec![
        list_item(&[ol.clone()], vec![create_text("abc", None)]),
        list_item(&[ol], vec![create_selection_marker(None), create_text("def", None)]),
        implicit_paragraph(vec![create_text("tail", None)]),
    ]);

    let result = keyboard_delete(&mut model, DeleteDirection::Backward, None);

    assert_that!(result).is_equal_to(DeleteResult::Range);
    assert_that!(list_items(&model)).is_equal_to(1);

    let reread = read_html(&write_html(&model));
    assert_that!(reread.blocks).has_length(3);
    let outdented = reread.blocks[1].as_paragraph().unwrap();
    assert_that!(outdented.is_implicit).is_false();
    assert_that!(outdented.text()).is_equal_to("def".to_owned());
    assert_that!(reread.blocks[2].as_paragraph().unwrap().text()).is_equal_to("tail".to_owned());
}

#[test]
fn backspace_joins_a_paragraph_with_the_previous_one() {
    let mut model = model_of(vec![
        paragraph(vec![create_text("ab", None)]),
        paragraph(vec![create_selection_marker(None), create_text("cd", None)]),
    ]);

    let result = keyboard_delete(&mut model, DeleteDirection::Backward, None);

    assert_that!(result).is_equal_to(DeleteResult::Range);
    assert_that!(model.blocks).has_length(1);
    assert_that!(model.blocks[0].as_paragraph().unwrap().text()).is_equal_to("abcd".to_owned());
}

#[test]
fn splitting_then_joining_a_paragraph_gives_it_back() {
    let mut bold = SegmentFormat::default();
    bold.font.font_weight = Some("bold".into());
    let mut italic = SegmentFormat::default();
    italic.font.italic = Some(true);

    let segments = vec![
        create_text("a", Some(&bold)),
        create_text("b", None),
        create_selection_marker(None),
        create_text("c", Some(&italic)),
    ];
    let mut original = create_paragraph(false, None, None, None);
    original.segments = segments.clone();

    let new_paragraph = split_paragraph_at(&mut original, 2);

    let mut joined = original.segments.clone();
    joined.extend(new_paragraph.segments.iter().cloned());
    assert_that!(joined).is_equal_to(segments);
}

#[test]
fn dom_selection_has_exactly_one_shape() {
    let dom = HtmlDom::parse("<div>hello</div>");
    let div = dom.children(dom.root())[0];
    let text = dom.children(div)[0];
    let range = DomRange::new(DomPosition::new(text, 1), DomPosition::new(text, 4));
    let option = DomToModelOption {
        disable_cache_element: true,
        ..Default::default()
    };
    let model = create_content_model(&dom, dom.root(), &option, Some(DomSelection::range(range)));

    let mut written = HtmlDom::new();
    let root = written.root();
    let selection = create_dom_from_model(&model, &mut written, root, &ModelToDomOption::default());
    assert_that!(selection.map(|s| s.selection_type())).is_equal_to(Some("range"));

    let mut table = create_table(1, None);
    let mut cell = create_table_cell(false, false, false, None);
    cell.is_selected = true;
    cell.blocks.push(paragraph(vec![create_text("x", None)]));
    table.rows[0].cells.push(cell);
    table.widths = vec![100.0];
    let model = model_of(vec![table.into()]);

    let mut written = HtmlDom::new();
    let root = written.root();
    let selection = create_dom_from_model(&model, &mut written, root, &ModelToDomOption::default());
    assert_that!(selection.map(|s| s.selection_type())).is_equal_to(Some("table"));
}

#[test]
fn word_lists_are_pasted_as_list_items() {
    let html = indoc! {r#"
        <html xmlns:w="urn:schemas-microsoft-com:office:word"><body><!--StartFragment--><p style="mso-list:l0 level1 lfo1"><span style="mso-list:Ignore">1.<span>&nbsp;</span></span>first</p><p style="mso-list:l0 level1 lfo1"><span style="mso-list:Ignore">2.<span>&nbsp;</span></span>second</p><!--EndFragment--></body></html>
    "#};
    let mut event = BeforePasteEvent::from_clipboard_html(html);
    assert!(event.is_from_word_desktop());

    process_paste_event(&mut event);
    let model = create_paste_model(&event);

    assert_that!(list_items(&model)).is_equal_to(2);
    let written = write_html(&model);
    assert_that!(written.matches("<ol").count()).is_equal_to(1);
    assert!(written.contains("first"));
    assert!(!written.contains("1."));
}
