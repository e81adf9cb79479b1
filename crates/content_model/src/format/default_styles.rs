// Copyright 2024 New Vector Ltd.
// Copyright 2022 The Matrix.org Foundation C.I.C.
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Element-Commercial
// Please see LICENSE in the repository root for full details.

//! What a browser would apply to a tag without any inline style.
//!
//! Parsers fall back to these values, so `<b>` reads as bold and `<h1>` as
//! a 2em heading. When the model is written back, values equal to the tag
//! default are left out again.

use std::collections::HashMap;

use once_cell::sync::Lazy;

use crate::dom::{CssStyle, Element};

pub type DefaultStyleMap = HashMap<String, CssStyle>;

const BLOCK_TAGS: &[&str] = &[
    "address",
    "article",
    "aside",
    "center",
    "dd",
    "details",
    "dialog",
    "div",
    "dl",
    "dt",
    "fieldset",
    "figcaption",
    "figure",
    "footer",
    "form",
    "header",
    "main",
    "nav",
    "section",
    "summary",
];

pub static DEFAULT_STYLES: Lazy<DefaultStyleMap> = Lazy::new(|| {
    let mut map: DefaultStyleMap = BLOCK_TAGS
        .iter()
        .map(|tag| (tag.to_string(), CssStyle::parse("display: block")))
        .collect();

    let mut add = |tag: &str, css: &str| {
        map.insert(tag.to_owned(), CssStyle::parse(css));
    };
    add("p", "display: block; margin-top: 1em; margin-bottom: 1em");
    add(
        "h1",
        "display: block; font-size: 2em; font-weight: bold; margin-top: 0.67em; margin-bottom: 0.67em",
    );
    add(
        "h2",
        "display: block; font-size: 1.5em; font-weight: bold; margin-top: 0.83em; margin-bottom: 0.83em",
    );
    add(
        "h3",
        "display: block; font-size: 1.17em; font-weight: bold; margin-top: 1em; margin-bottom: 1em",
    );
    add(
        "h4",
        "display: block; font-weight: bold; margin-top: 1.33em; margin-bottom: 1.33em",
    );
    add(
        "h5",
        "display: block; font-size: 0.83em; font-weight: bold; margin-top: 1.67em; margin-bottom: 1.67em",
    );
    add(
        "h6",
        "display: block; font-size: 0.67em; font-weight: bold; margin-top: 2.33em; margin-bottom: 2.33em",
    );
    add(
        "blockquote",
        "display: block; margin-top: 1em; margin-bottom: 1em; margin-left: 40px; margin-right: 40px",
    );
    add("pre", "display: block; white-space: pre; margin-top: 1em; margin-bottom: 1em");
    add("ol", "display: block");
    add("ul", "display: block");
    add("li", "display: list-item");
    add("table", "display: table");
    add("thead", "display: table-header-group");
    add("tbody", "display: table-row-group");
    add("tfoot", "display: table-footer-group");
    add("tr", "display: table-row");
    add("td", "display: table-cell");
    add("th", "display: table-cell");
    add("hr", "display: block");

    add("b", "font-weight: bold");
    add("strong", "font-weight: bold");
    add("i", "font-style: italic");
    add("em", "font-style: italic");
    add("u", "text-decoration: underline");
    add("ins", "text-decoration: underline");
    add("s", "text-decoration: line-through");
    add("strike", "text-decoration: line-through");
    add("del", "text-decoration: line-through");
    add("sub", "vertical-align: sub; font-size: smaller");
    add("sup", "vertical-align: super; font-size: smaller");
    add("code", "font-family: monospace");
    add("center", "display: block; text-align: center");
    map
});

/// The default style of `tag` in `styles`, empty for unknown tags.
pub fn default_style_of(styles: &DefaultStyleMap, tag: &str) -> CssStyle {
    styles.get(tag).cloned().unwrap_or_default()
}

/// Display from the inline style, falling back to the tag default.
pub fn display_of<'a>(element: &'a Element, default_style: &'a CssStyle) -> &'a str {
    element
        .style()
        .get("display")
        .or_else(|| default_style.get("display"))
        .unwrap_or("inline")
}

pub fn is_block_display(display: &str) -> bool {
    !display.starts_with("inline") && display != "contents" && display != "none"
}

/// Remove inline style declarations that only repeat the tag default.
pub fn strip_default_style(element: &mut Element, default_style: &CssStyle) {
    let redundant: Vec<String> = element
        .style()
        .iter()
        .filter(|(name, value)| default_style.get(name) == Some(*value))
        .map(|(name, _)| name.to_owned())
        .collect();
    for name in redundant {
        element.style_mut().remove(&name);
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn inline_tags_default_to_inline_display() {
        let span = Element::new("span");
        let style = default_style_of(&DEFAULT_STYLES, "span");
        assert!(!is_block_display(display_of(&span, &style)));

        let div = Element::new("div");
        let style = default_style_of(&DEFAULT_STYLES, "div");
        assert!(is_block_display(display_of(&div, &style)));
    }

    #[test]
    fn explicit_display_wins_over_default() {
        let mut div = Element::new("div");
        div.set_attr("style", "display: inline-block");
        let style = default_style_of(&DEFAULT_STYLES, "div");
        assert!(!is_block_display(display_of(&div, &style)));
    }

    #[test]
    fn stripping_keeps_values_that_differ_from_default() {
        let mut h1 = Element::new("h1");
        h1.set_attr("style", "font-weight: bold; color: red; font-size: 3em");
        strip_default_style(&mut h1, &DEFAULT_STYLES["h1"]);
        assert_eq!(h1.style().to_string(), "color: red; font-size: 3em;");
    }
}
