// Copyright 2024 New Vector Ltd.
// Copyright 2022 The Matrix.org Foundation C.I.C.
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Element-Commercial
// Please see LICENSE in the repository root for full details.

use crate::dom::{DomSelection, HtmlDom, NodeId, TableSelection};
use crate::format::handlers::parse_px;
use crate::format::parse_format;
use crate::model::{
    add_block, create_table, create_table_cell, BlockGroupContainer, TableCell,
};

use super::process;
use crate::dom_to_model::context::DomToModelContext;
use crate::dom_to_model::utils::parse_dataset;

const ROW_GROUP_TAGS: &[&str] = &["thead", "tbody", "tfoot"];

/// `<tr>` elements of a table, in order, looking through row groups.
fn table_rows(dom: &HtmlDom, table: NodeId) -> Vec<NodeId> {
    let mut rows = Vec::new();
    for child in dom.children(table) {
        match dom.tag(*child) {
            Some("tr") => rows.push(*child),
            Some(tag) if ROW_GROUP_TAGS.contains(&tag) => rows.extend(
                dom.children(*child)
                    .iter()
                    .filter(|c| dom.tag(**c) == Some("tr")),
            ),
            _ => {}
        }
    }
    rows
}

fn span_attr(dom: &HtmlDom, cell: NodeId, name: &str) -> usize {
    dom.element(cell)
        .and_then(|e| e.get_attr(name))
        .and_then(|v| v.trim().parse::<usize>().ok())
        .filter(|v| *v > 0)
        .unwrap_or(1)
}

/// Read a table into a rectangular grid. Cells spanning several columns or
/// rows leave placeholder cells (`span_left`/`span_above`) in the slots
/// they cover.
pub fn table_processor(
    group: &mut dyn BlockGroupContainer,
    dom: &HtmlDom,
    node: NodeId,
    context: &mut DomToModelContext,
) {
    let Some(element) = dom.element(node) else {
        return;
    };
    let saved_list_format = std::mem::take(&mut context.list_format);
    let default_style = context.default_style(element.tag());
    let rows = table_rows(dom, node);

    let mut table = create_table(rows.len(), None);
    parse_format(&context.format_parsers.table, &mut table.format, element, &default_style);
    table.dataset = parse_dataset(element);
    if context.allow_cache_element {
        table.cached_element = Some(node);
    }
    let table_selection = match context.selection {
        Some(DomSelection::Table(selection)) if selection.table == node => Some(selection),
        _ => None,
    };

    let mut grid: Vec<Vec<Option<TableCell>>> = vec![Vec::new(); rows.len()];
    for (row_index, tr) in rows.iter().enumerate() {
        if let Some(tr_element) = dom.element(*tr) {
            let row = &mut table.rows[row_index];
            let tr_default = context.default_style("tr");
            parse_format(&context.format_parsers.table_row, &mut row.format, tr_element, &tr_default);
            row.height = tr_element
                .style()
                .get("height")
                .and_then(parse_px)
                .unwrap_or_default();
            if context.allow_cache_element {
                row.cached_element = Some(*tr);
            }
        }

        let mut column = 0;
        for td in dom.children(*tr) {
            let Some(tag @ ("td" | "th")) = dom.tag(*td) else {
                continue;
            };
            while matches!(grid[row_index].get(column), Some(Some(_))) {
                column += 1;
            }
            let col_span = span_attr(dom, *td, "colspan");
            let row_span = span_attr(dom, *td, "rowspan").min(rows.len() - row_index);

            let cell = read_cell(dom, *td, tag == "th", row_index, column, table_selection, context);

            if row_index == 0 {
                let width = dom
                    .element(*td)
                    .and_then(|e| e.style().get("width"))
                    .and_then(parse_px)
                    .unwrap_or_default();
                if table.widths.len() < column + col_span {
                    table.widths.resize(column + col_span, 0.0);
                }
                for w in &mut table.widths[column..column + col_span] {
                    *w = width / col_span as f64;
                }
            }

            let (format, is_header, is_selected) =
                (cell.format.clone(), cell.is_header, cell.is_selected);
            let mut cell = Some(cell);
            for row_offset in 0..row_span {
                for col_offset in 0..col_span {
                    let slot = match cell.take() {
                        Some(cell) => cell,
                        None => {
                            let mut placeholder = create_table_cell(
                                col_offset > 0,
                                row_offset > 0,
                                is_header,
                                Some(&format),
                            );
                            placeholder.is_selected = is_selected;
                            placeholder
                        }
                    };
                    let target = &mut grid[row_index + row_offset];
                    let target_column = column + col_offset;
                    if target.len() <= target_column {
                        target.resize(target_column + 1, None);
                    }
                    target[target_column] = Some(slot);
                }
            }
            column += col_span;
        }
    }

    for (row, cells) in table.rows.iter_mut().zip(grid) {
        row.cells = cells
            .into_iter()
            .map(|c| c.unwrap_or_else(|| create_table_cell(false, false, false, None)))
            .collect();
    }
    table.normalize();

    add_block(group, table);
    context.list_format = saved_list_format;
}

fn read_cell(
    dom: &HtmlDom,
    td: NodeId,
    is_header: bool,
    row: usize,
    column: usize,
    table_selection: Option<TableSelection>,
    context: &mut DomToModelContext,
) -> TableCell {
    let mut cell = create_table_cell(false, false, is_header, None);
    let Some(element) = dom.element(td) else {
        return cell;
    };
    let default_style = context.default_style(element.tag());
    parse_format(&context.format_parsers.table_cell, &mut cell.format, element, &default_style);
    cell.dataset = parse_dataset(element);
    if context.allow_cache_element {
        cell.cached_element = Some(td);
    }

    let selected_before = context.is_in_selection;
    context.with_format_scope(|ctx| {
        ctx.format.block_format = ctx.format.block_format.inheritable();
        ctx.format.block_decorator = None;
        parse_format(
            &ctx.format_parsers.segment_on_block,
            &mut ctx.format.segment_format,
            element,
            &default_style,
        );
        process("child", &mut cell, dom, td, ctx);
    });
    cell.is_selected = table_selection.is_some_and(|s| s.contains(row, column))
        || (selected_before && context.is_in_selection);
    cell
}
