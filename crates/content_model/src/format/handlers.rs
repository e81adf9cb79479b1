// Copyright 2024 New Vector Ltd.
// Copyright 2022 The Matrix.org Foundation C.I.C.
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Element-Commercial
// Please see LICENSE in the repository root for full details.

//! Reading fragments from elements and writing them back.
//!
//! `parse` only overwrites a value when the element (or the default style of
//! its tag) has one, so a fragment inherited from an ancestor survives
//! elements that say nothing about it. `apply` is the inverse and only
//! writes values that are set.

use std::str::FromStr;

use once_cell::sync::Lazy;
use regex::Regex;

use super::format_key::FormatKey;
use super::fragments::*;
use crate::dom::{CssStyle, Element};

/// Parse and apply for one fragment type.
pub trait FragmentHandler {
    const KEY: FormatKey;

    fn parse(&mut self, element: &Element, default_style: &CssStyle);

    fn apply(&self, element: &mut Element);
}

/// Reads one fragment of `F` from an element. The last argument is the
/// default style of the element's tag.
pub type FormatParser<F> = fn(&mut F, &Element, &CssStyle);

/// Writes one fragment of `F` onto an element.
pub type FormatApplier<F> = fn(&F, &mut Element);

/// A parser/applier pair for one fragment of the composite `F`.
pub struct FormatHandler<F> {
    pub key: FormatKey,
    pub parse: FormatParser<F>,
    pub apply: FormatApplier<F>,
}

impl<F> Clone for FormatHandler<F> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<F> Copy for FormatHandler<F> {}

fn parse_fragment<F, T>(format: &mut F, element: &Element, default: &CssStyle)
where
    F: AsMut<T>,
    T: FragmentHandler,
{
    format.as_mut().parse(element, default);
}

fn apply_fragment<F, T>(format: &F, element: &mut Element)
where
    F: AsRef<T>,
    T: FragmentHandler,
{
    format.as_ref().apply(element);
}

/// The handler of fragment `T` inside composite `F`.
pub fn handler<F, T>() -> FormatHandler<F>
where
    F: AsRef<T> + AsMut<T>,
    T: FragmentHandler,
{
    FormatHandler {
        key: T::KEY,
        parse: parse_fragment::<F, T>,
        apply: apply_fragment::<F, T>,
    }
}

/// Explicit inline style first, then the tag default.
fn style_value<'a>(
    element: &'a Element,
    default_style: &'a CssStyle,
    name: &str,
) -> Option<&'a str> {
    element
        .style()
        .get(name)
        .or_else(|| default_style.get(name))
        .filter(|v| !v.is_empty())
}

fn set_style(element: &mut Element, name: &str, value: &Option<String>) {
    if let Some(value) = value {
        element.style_mut().set(name, value);
    }
}

fn set_attr(element: &mut Element, name: &str, value: &Option<String>) {
    if let Some(value) = value {
        element.set_attr(name, value);
    }
}

/// Expand a 1 to 4 value box shorthand (`margin: 1px 2px`) into
/// top/right/bottom/left.
fn expand_box_shorthand(value: &str) -> Option<[String; 4]> {
    let parts: Vec<&str> = value.split_whitespace().collect();
    let [top, right, bottom, left] = match parts.as_slice() {
        [all] => [*all, *all, *all, *all],
        [vertical, horizontal] => [*vertical, *horizontal, *vertical, *horizontal],
        [top, horizontal, bottom] => [*top, *horizontal, *bottom, *horizontal],
        [top, right, bottom, left] => [*top, *right, *bottom, *left],
        _ => return None,
    };
    Some([top.into(), right.into(), bottom.into(), left.into()])
}

/// Parse `<prefix>` shorthand and `<prefix>-<side>` longhands into 4 sides.
fn parse_box(
    element: &Element,
    default_style: &CssStyle,
    prefix: &str,
    sides: [&mut Option<String>; 4],
) {
    let expanded = style_value(element, default_style, prefix)
        .and_then(expand_box_shorthand);
    for (i, (side, target)) in ["top", "right", "bottom", "left"]
        .iter()
        .zip(sides)
        .enumerate()
    {
        let longhand = style_value(element, default_style, &format!("{prefix}-{side}"))
            .map(str::to_owned)
            .or_else(|| expanded.as_ref().map(|e| e[i].clone()));
        if let Some(value) = longhand {
            *target = Some(value);
        }
    }
}

fn element_direction(element: &Element) -> Direction {
    element
        .style()
        .get("direction")
        .or_else(|| element.get_attr("dir"))
        .and_then(|d| Direction::from_str(&d.to_ascii_lowercase()).ok())
        .unwrap_or(Direction::Ltr)
}

static PX_VALUE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\s*(-?\d+(?:\.\d+)?)\s*(?:px)?\s*$").expect("invalid px regex")
});

/// Parse `12px` or `12` into a number of pixels.
pub fn parse_px(value: &str) -> Option<f64> {
    PX_VALUE
        .captures(value)
        .and_then(|c| c.get(1))
        .and_then(|m| m.as_str().parse().ok())
}

impl FragmentHandler for TextColorFormat {
    const KEY: FormatKey = FormatKey::TextColor;

    fn parse(&mut self, element: &Element, default_style: &CssStyle) {
        let value = style_value(element, default_style, "color").or_else(|| {
            (element.tag() == "font")
                .then(|| element.get_attr("color"))
                .flatten()
        });
        if let Some(color) = value {
            self.text_color = Some(color.to_owned());
        }
    }

    fn apply(&self, element: &mut Element) {
        set_style(element, "color", &self.text_color);
    }
}

impl FragmentHandler for BackgroundColorFormat {
    const KEY: FormatKey = FormatKey::BackgroundColor;

    fn parse(&mut self, element: &Element, default_style: &CssStyle) {
        let value = style_value(element, default_style, "background-color")
            .or_else(|| element.get_attr("bgcolor"));
        match value {
            Some("transparent") | None => {}
            Some(color) => self.background_color = Some(color.to_owned()),
        }
    }

    fn apply(&self, element: &mut Element) {
        set_style(element, "background-color", &self.background_color);
    }
}

impl FragmentHandler for FontFormat {
    const KEY: FormatKey = FormatKey::Font;

    fn parse(&mut self, element: &Element, default_style: &CssStyle) {
        let is_font_tag = element.tag() == "font";
        if let Some(family) = style_value(element, default_style, "font-family")
            .or_else(|| is_font_tag.then(|| element.get_attr("face")).flatten())
        {
            self.font_family = Some(family.to_owned());
        }
        if let Some(size) = style_value(element, default_style, "font-size") {
            self.font_size = Some(size.to_owned());
        }
        if let Some(weight) = style_value(element, default_style, "font-weight") {
            self.font_weight = match weight {
                "normal" | "400" => None,
                other => Some(other.to_owned()),
            };
        }
        match style_value(element, default_style, "font-style") {
            Some("italic" | "oblique") => self.italic = Some(true),
            Some("normal") => self.italic = None,
            _ => {}
        }
        if let Some(spacing) = style_value(element, default_style, "letter-spacing")
        {
            self.letter_spacing = Some(spacing.to_owned());
        }
    }

    fn apply(&self, element: &mut Element) {
        set_style(element, "font-family", &self.font_family);
        set_style(element, "font-size", &self.font_size);
        set_style(element, "font-weight", &self.font_weight);
        if self.italic == Some(true) {
            element.style_mut().set("font-style", "italic");
        }
        set_style(element, "letter-spacing", &self.letter_spacing);
    }
}

impl FragmentHandler for TextDecorationFormat {
    const KEY: FormatKey = FormatKey::TextDecoration;

    fn parse(&mut self, element: &Element, default_style: &CssStyle) {
        let value = style_value(element, default_style, "text-decoration")
            .or_else(|| style_value(element, default_style, "text-decoration-line"));
        if let Some(value) = value {
            if value.contains("none") {
                self.underline = None;
                self.strikethrough = None;
            }
            if value.contains("underline") {
                self.underline = Some(true);
            }
            if value.contains("line-through") {
                self.strikethrough = Some(true);
            }
        }
    }

    fn apply(&self, element: &mut Element) {
        let mut values = Vec::new();
        if self.underline == Some(true) {
            values.push("underline");
        }
        if self.strikethrough == Some(true) {
            values.push("line-through");
        }
        if !values.is_empty() {
            element.style_mut().set("text-decoration", &values.join(" "));
        }
    }
}

impl FragmentHandler for SuperOrSubScriptFormat {
    const KEY: FormatKey = FormatKey::SuperOrSubScript;

    fn parse(&mut self, element: &Element, default_style: &CssStyle) {
        match style_value(element, default_style, "vertical-align") {
            Some(v @ ("super" | "sub")) => {
                self.super_or_sub_script = Some(v.to_owned())
            }
            Some("baseline") => self.super_or_sub_script = None,
            _ => {}
        }
    }

    fn apply(&self, element: &mut Element) {
        set_style(element, "vertical-align", &self.super_or_sub_script);
    }
}

impl FragmentHandler for DirectionFormat {
    const KEY: FormatKey = FormatKey::Direction;

    fn parse(&mut self, element: &Element, default_style: &CssStyle) {
        let value = style_value(element, default_style, "direction")
            .or_else(|| element.get_attr("dir"));
        if let Some(direction) =
            value.and_then(|d| Direction::from_str(&d.to_ascii_lowercase()).ok())
        {
            self.direction = Some(direction);
        }
    }

    fn apply(&self, element: &mut Element) {
        if let Some(direction) = self.direction {
            element.style_mut().set("direction", direction.as_ref());
        }
    }
}

impl FragmentHandler for TextAlignFormat {
    const KEY: FormatKey = FormatKey::TextAlign;

    fn parse(&mut self, element: &Element, default_style: &CssStyle) {
        let value = style_value(element, default_style, "text-align")
            .or_else(|| element.get_attr("align"));
        let rtl = element_direction(element) == Direction::Rtl;
        let align = match value.map(str::to_ascii_lowercase).as_deref() {
            Some("left") => Some(if rtl { "end" } else { "start" }),
            Some("right") => Some(if rtl { "start" } else { "end" }),
            Some("start") => Some("start"),
            Some("end") => Some("end"),
            Some("center") => Some("center"),
            Some("justify") => Some("justify"),
            _ => None,
        };
        if let Some(align) = align {
            self.text_align = Some(align.to_owned());
        }
    }

    fn apply(&self, element: &mut Element) {
        let rtl = element_direction(element) == Direction::Rtl;
        let value = match self.text_align.as_deref() {
            Some("start") => Some(if rtl { "right" } else { "left" }),
            Some("end") => Some(if rtl { "left" } else { "right" }),
            Some(other) => Some(other),
            None => None,
        };
        if let Some(value) = value {
            element.style_mut().set("text-align", value);
        }
    }
}

impl FragmentHandler for MarginFormat {
    const KEY: FormatKey = FormatKey::Margin;

    fn parse(&mut self, element: &Element, default_style: &CssStyle) {
        parse_box(
            element,
            default_style,
            "margin",
            [
                &mut self.margin_top,
                &mut self.margin_right,
                &mut self.margin_bottom,
                &mut self.margin_left,
            ],
        );
    }

    fn apply(&self, element: &mut Element) {
        set_style(element, "margin-top", &self.margin_top);
        set_style(element, "margin-right", &self.margin_right);
        set_style(element, "margin-bottom", &self.margin_bottom);
        set_style(element, "margin-left", &self.margin_left);
    }
}

impl FragmentHandler for PaddingFormat {
    const KEY: FormatKey = FormatKey::Padding;

    fn parse(&mut self, element: &Element, default_style: &CssStyle) {
        parse_box(
            element,
            default_style,
            "padding",
            [
                &mut self.padding_top,
                &mut self.padding_right,
                &mut self.padding_bottom,
                &mut self.padding_left,
            ],
        );
    }

    fn apply(&self, element: &mut Element) {
        set_style(element, "padding-top", &self.padding_top);
        set_style(element, "padding-right", &self.padding_right);
        set_style(element, "padding-bottom", &self.padding_bottom);
        set_style(element, "padding-left", &self.padding_left);
    }
}

macro_rules! single_style_fragment {
    ($fragment:ident, $key:ident, $field:ident, $css:literal) => {
        impl FragmentHandler for $fragment {
            const KEY: FormatKey = FormatKey::$key;

            fn parse(&mut self, element: &Element, default_style: &CssStyle) {
                if let Some(value) = style_value(element, default_style, $css) {
                    self.$field = Some(value.to_owned());
                }
            }

            fn apply(&self, element: &mut Element) {
                set_style(element, $css, &self.$field);
            }
        }
    };
}

single_style_fragment!(LineHeightFormat, LineHeight, line_height, "line-height");
single_style_fragment!(WhiteSpaceFormat, WhiteSpace, white_space, "white-space");
single_style_fragment!(TextIndentFormat, TextIndent, text_indent, "text-indent");
single_style_fragment!(FloatFormat, Float, float, "float");
single_style_fragment!(
    VerticalAlignFormat,
    VerticalAlign,
    vertical_align,
    "vertical-align"
);

impl FragmentHandler for BorderFormat {
    const KEY: FormatKey = FormatKey::Border;

    fn parse(&mut self, element: &Element, default_style: &CssStyle) {
        if let Some(all) = style_value(element, default_style, "border") {
            for side in [
                &mut self.border_top,
                &mut self.border_right,
                &mut self.border_bottom,
                &mut self.border_left,
            ] {
                *side = Some(all.to_owned());
            }
        }
        for (name, side) in [
            ("border-top", &mut self.border_top),
            ("border-right", &mut self.border_right),
            ("border-bottom", &mut self.border_bottom),
            ("border-left", &mut self.border_left),
            ("border-radius", &mut self.border_radius),
        ] {
            if let Some(value) = style_value(element, default_style, name) {
                *side = Some(value.to_owned());
            }
        }
    }

    fn apply(&self, element: &mut Element) {
        set_style(element, "border-top", &self.border_top);
        set_style(element, "border-right", &self.border_right);
        set_style(element, "border-bottom", &self.border_bottom);
        set_style(element, "border-left", &self.border_left);
        set_style(element, "border-radius", &self.border_radius);
    }
}

impl FragmentHandler for BorderBoxFormat {
    const KEY: FormatKey = FormatKey::BorderBox;

    fn parse(&mut self, element: &Element, default_style: &CssStyle) {
        if style_value(element, default_style, "box-sizing") == Some("border-box")
        {
            self.use_border_box = Some(true);
        }
    }

    fn apply(&self, element: &mut Element) {
        if self.use_border_box == Some(true) {
            element.style_mut().set("box-sizing", "border-box");
        }
    }
}

impl FragmentHandler for SizeFormat {
    const KEY: FormatKey = FormatKey::Size;

    fn parse(&mut self, element: &Element, default_style: &CssStyle) {
        for (name, target) in [
            ("width", &mut self.width),
            ("height", &mut self.height),
            ("max-width", &mut self.max_width),
            ("max-height", &mut self.max_height),
            ("min-width", &mut self.min_width),
            ("min-height", &mut self.min_height),
        ] {
            if let Some(value) = style_value(element, default_style, name) {
                *target = Some(value.to_owned());
            }
        }
        // Plain number attributes like <img width="100">
        for (name, target) in
            [("width", &mut self.width), ("height", &mut self.height)]
        {
            if target.is_none() {
                if let Some(px) = element.get_attr(name).and_then(parse_px) {
                    *target = Some(format!("{px}px"));
                }
            }
        }
    }

    fn apply(&self, element: &mut Element) {
        set_style(element, "width", &self.width);
        set_style(element, "height", &self.height);
        set_style(element, "max-width", &self.max_width);
        set_style(element, "max-height", &self.max_height);
        set_style(element, "min-width", &self.min_width);
        set_style(element, "min-height", &self.min_height);
    }
}

impl FragmentHandler for DisplayFormat {
    const KEY: FormatKey = FormatKey::Display;

    // Only an explicit display counts, every tag has a default one.
    fn parse(&mut self, element: &Element, _default_style: &CssStyle) {
        if let Some(display) = element.style().get("display") {
            self.display = Some(display.to_owned());
        }
    }

    fn apply(&self, element: &mut Element) {
        set_style(element, "display", &self.display);
    }
}

impl FragmentHandler for IdFormat {
    const KEY: FormatKey = FormatKey::Id;

    fn parse(&mut self, element: &Element, _default_style: &CssStyle) {
        if let Some(id) = element.get_attr("id") {
            self.id = Some(id.to_owned());
        }
    }

    fn apply(&self, element: &mut Element) {
        set_attr(element, "id", &self.id);
    }
}

impl FragmentHandler for HyperLinkFormat {
    const KEY: FormatKey = FormatKey::HyperLink;

    fn parse(&mut self, element: &Element, _default_style: &CssStyle) {
        for (attr, target) in [
            ("href", &mut self.href),
            ("target", &mut self.target),
            ("title", &mut self.anchor_title),
            ("name", &mut self.name),
            ("rel", &mut self.rel),
            ("class", &mut self.anchor_class),
        ] {
            if let Some(value) = element.get_attr(attr) {
                *target = Some(value.to_owned());
            }
        }
    }

    fn apply(&self, element: &mut Element) {
        set_attr(element, "href", &self.href);
        set_attr(element, "target", &self.target);
        set_attr(element, "title", &self.anchor_title);
        set_attr(element, "name", &self.name);
        set_attr(element, "rel", &self.rel);
        set_attr(element, "class", &self.anchor_class);
    }
}

impl FragmentHandler for ListStyleFormat {
    const KEY: FormatKey = FormatKey::ListStyle;

    fn parse(&mut self, element: &Element, default_style: &CssStyle) {
        if let Some(position) =
            style_value(element, default_style, "list-style-position")
        {
            self.list_style_position = Some(position.to_owned());
        }
        if let Some(style_type) =
            style_value(element, default_style, "list-style-type")
        {
            self.list_style_type = Some(style_type.to_owned());
        }
    }

    fn apply(&self, element: &mut Element) {
        set_style(element, "list-style-position", &self.list_style_position);
        set_style(element, "list-style-type", &self.list_style_type);
    }
}

impl FragmentHandler for TableLayoutFormat {
    const KEY: FormatKey = FormatKey::TableLayout;

    fn parse(&mut self, element: &Element, default_style: &CssStyle) {
        if let Some(layout) = style_value(element, default_style, "table-layout") {
            self.table_layout = Some(layout.to_owned());
        }
        if let Some(collapse) =
            style_value(element, default_style, "border-collapse")
        {
            self.border_collapse = Some(collapse.to_owned());
        }
    }

    fn apply(&self, element: &mut Element) {
        set_style(element, "table-layout", &self.table_layout);
        set_style(element, "border-collapse", &self.border_collapse);
    }
}

/// Run `parsers` in order against `element`.
pub fn parse_format<F>(
    parsers: &[FormatParser<F>],
    format: &mut F,
    element: &Element,
    default_style: &CssStyle,
) {
    for parse in parsers {
        parse(format, element, default_style);
    }
}

/// Run `appliers` in order against `element`.
pub fn apply_format<F>(
    appliers: &[FormatApplier<F>],
    format: &F,
    element: &mut Element,
) {
    for apply in appliers {
        apply(format, element);
    }
}
