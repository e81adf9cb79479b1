// Copyright 2024 New Vector Ltd.
// Copyright 2022 The Matrix.org Foundation C.I.C.
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Element-Commercial
// Please see LICENSE in the repository root for full details.

use crate::dom::{HtmlDom, NodeId, TableSelection};
use crate::model::{Table, TableCell, TableRow};

use super::{apply_dataset, apply_to, strip_style};
use crate::model_to_dom::context::ModelToDomContext;
use crate::model_to_dom::options::ModelNode;
use crate::model_to_dom::reuse::{reuse_cached_element, usable_cached_element};

/// Write a table. Placeholder cells are folded back into the `rowspan` and
/// `colspan` of the cell they belong to, and selected cells become a table
/// selection.
pub fn handle_table(
    dom: &mut HtmlDom,
    parent: NodeId,
    table: &Table,
    context: &mut ModelToDomContext,
    ref_node: Option<NodeId>,
) -> Option<NodeId> {
    if table.rows.iter().all(|row| row.cells.is_empty()) {
        return ref_node;
    }

    let cached = cached_element(dom, parent, table.cached_element, "table", context);
    let (node, ref_node) = match cached {
        Some(element) => {
            let next = reuse_cached_element(dom, parent, element, ref_node);
            dom.clear_children(element);
            (element, next)
        }
        None => {
            let element = dom.create_element("table");
            dom.insert_before(parent, element, ref_node);
            apply_to(dom, element, &context.format_appliers.table, &table.format);
            apply_dataset(dom, element, &table.dataset);
            strip_style(dom, element, &context.default_style("table"));
            (element, ref_node)
        }
    };
    context.node_created(ModelNode::Table(table), node);

    // Lists inside cells never continue lists outside the table.
    let saved_list_format = std::mem::take(&mut context.list_format);
    let tbody = dom.create_element("tbody");
    dom.append_child(node, tbody);

    let mut selection: Option<TableSelection> = None;
    for (row_index, row) in table.rows.iter().enumerate() {
        if row.cells.is_empty() {
            continue;
        }
        let tr = write_row(dom, tbody, row, context);

        for (column, cell) in row.cells.iter().enumerate() {
            if cell.is_selected {
                extend_selection(&mut selection, node, row_index, column);
            }
            if !cell.is_placeholder() {
                write_cell(dom, tr, table, row_index, column, cell, context);
            }
        }
    }

    context.list_format = saved_list_format;
    if context.selection.table.is_none() {
        context.selection.table = selection;
    }
    ref_node
}

fn cached_element(
    dom: &HtmlDom,
    parent: NodeId,
    cached: Option<NodeId>,
    tag: &str,
    context: &ModelToDomContext,
) -> Option<NodeId> {
    if context.allow_cache_element {
        usable_cached_element(dom, parent, cached, tag)
    } else {
        None
    }
}

fn extend_selection(
    selection: &mut Option<TableSelection>,
    table: NodeId,
    row: usize,
    column: usize,
) {
    let s = selection.get_or_insert(TableSelection {
        table,
        first_row: row,
        last_row: row,
        first_column: column,
        last_column: column,
    });
    s.first_row = s.first_row.min(row);
    s.last_row = s.last_row.max(row);
    s.first_column = s.first_column.min(column);
    s.last_column = s.last_column.max(column);
}

fn write_row(
    dom: &mut HtmlDom,
    tbody: NodeId,
    row: &TableRow,
    context: &ModelToDomContext,
) -> NodeId {
    let tr = match cached_element(dom, tbody, row.cached_element, "tr", context) {
        Some(tr) => {
            dom.clear_children(tr);
            tr
        }
        None => {
            let tr = dom.create_element("tr");
            apply_to(dom, tr, &context.format_appliers.table_row, &row.format);
            if row.height > 0.0 {
                if let Some(element) = dom.element_mut(tr) {
                    element.style_mut().set("height", &format!("{}px", row.height));
                }
            }
            strip_style(dom, tr, &context.default_style("tr"));
            tr
        }
    };
    dom.append_child(tbody, tr);
    context.node_created(ModelNode::TableRow(row), tr);
    tr
}

fn write_cell(
    dom: &mut HtmlDom,
    tr: NodeId,
    table: &Table,
    row_index: usize,
    column: usize,
    cell: &TableCell,
    context: &mut ModelToDomContext,
) {
    let tag = if cell.is_header { "th" } else { "td" };
    let cached = cached_element(dom, tr, cell.cached_element, tag, context);
    let td = match cached {
        Some(td) => {
            dom.clear_children(td);
            td
        }
        None => dom.create_element(tag),
    };
    dom.append_child(tr, td);

    let row_span = 1 + table.rows[row_index + 1..]
        .iter()
        .take_while(|r| r.cells.get(column).is_some_and(|c| c.span_above))
        .count();
    let col_span = 1 + table.rows[row_index].cells[column + 1..]
        .iter()
        .take_while(|c| c.span_left)
        .count();

    if let Some(element) = dom.element_mut(td) {
        if row_span > 1 {
            element.set_attr("rowspan", &row_span.to_string());
        }
        if col_span > 1 {
            element.set_attr("colspan", &col_span.to_string());
        }
    }

    if cached.is_none() {
        apply_to(dom, td, &context.format_appliers.table_cell, &cell.format);
        apply_dataset(dom, td, &cell.dataset);
        let width: f64 = table.widths.iter().skip(column).take(col_span).sum();
        if row_index == 0 && width > 0.0 {
            if let Some(element) = dom.element_mut(td) {
                element.style_mut().set("width", &format!("{width}px"));
            }
        }
        strip_style(dom, td, &context.default_style(tag));
    }
    context.node_created(ModelNode::TableCell(cell), td);

    let inherited = context.inherited_block_format.inheritable();
    let saved = std::mem::replace(&mut context.inherited_block_format, inherited);
    (context.model_handlers.block_group_children)(dom, td, cell, context);
    context.inherited_block_format = saved;
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::model::{create_table, create_table_cell};
    use crate::model_to_dom::ModelToDomOption;

    fn write(table: &Table) -> (HtmlDom, ModelToDomContext) {
        let mut dom = HtmlDom::new();
        let mut context = ModelToDomContext::new(&ModelToDomOption::default());
        let root = dom.root();
        handle_table(&mut dom, root, table, &mut context, None);
        (dom, context)
    }

    #[test]
    fn placeholders_become_spans() {
        let mut table = create_table(2, None);
        table.rows[0].cells = vec![
            create_table_cell(false, false, false, None),
            create_table_cell(true, false, false, None),
        ];
        table.rows[1].cells = vec![
            create_table_cell(false, true, false, None),
            create_table_cell(true, true, false, None),
        ];
        table.widths = vec![10.0, 20.0];

        let (dom, _) = write(&table);
        assert_eq!(
            dom.to_html(),
            r#"<table><tbody><tr><td rowspan="2" colspan="2" style="width: 30px;"></td></tr><tr></tr></tbody></table>"#
        );
    }

    #[test]
    fn selected_cells_make_a_table_selection() {
        let mut table = create_table(2, None);
        for row in &mut table.rows {
            row.cells = vec![
                create_table_cell(false, false, false, None),
                create_table_cell(false, false, false, None),
            ];
        }
        table.rows[0].cells[1].is_selected = true;
        table.rows[1].cells[1].is_selected = true;

        let (dom, context) = write(&table);
        let selection = context.selection.table.unwrap();
        assert_eq!(dom.tag(selection.table), Some("table"));
        assert_eq!((selection.first_row, selection.last_row), (0, 1));
        assert_eq!((selection.first_column, selection.last_column), (1, 1));
    }

    #[test]
    fn table_without_cells_is_skipped() {
        let table = create_table(1, None);
        let (dom, _) = write(&table);
        assert_eq!(dom.to_html(), "");
    }
}
