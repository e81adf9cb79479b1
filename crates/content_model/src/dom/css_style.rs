// Copyright 2024 New Vector Ltd.
// Copyright 2022 The Matrix.org Foundation C.I.C.
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Element-Commercial
// Please see LICENSE in the repository root for full details.

use std::fmt;

/// An ordered list of CSS declarations, as found in a `style` attribute.
///
/// Property names are stored lower-cased. Setting an existing property keeps
/// its position, so serializing a parsed style gives back the same order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CssStyle {
    declarations: Vec<(String, String)>,
}

impl CssStyle {
    pub fn parse(css: &str) -> Self {
        let mut style = Self::default();
        for declaration in split_outside_brackets(css, ';') {
            if let Some((name, value)) = declaration.split_once(':') {
                let name = name.trim();
                let value = value.trim();
                if !name.is_empty() && !value.is_empty() {
                    style.set(name, value);
                }
            }
        }
        style
    }

    pub fn from_pairs<'a>(
        pairs: impl IntoIterator<Item = (&'a str, &'a str)>,
    ) -> Self {
        let mut style = Self::default();
        for (name, value) in pairs {
            style.set(name, value);
        }
        style
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.declarations
            .iter()
            .find(|(n, _v)| n.eq_ignore_ascii_case(name))
            .map(|(_n, v)| v.as_str())
    }

    pub fn set(&mut self, name: &str, value: &str) {
        let name = name.to_ascii_lowercase();
        if let Some(existing) =
            self.declarations.iter_mut().find(|(n, _v)| *n == name)
        {
            existing.1 = value.to_owned();
        } else {
            self.declarations.push((name, value.to_owned()));
        }
    }

    /// Set the property when `value` is `Some`, remove it otherwise.
    pub fn set_or_remove(&mut self, name: &str, value: Option<&str>) {
        match value {
            Some(v) if !v.is_empty() => self.set(name, v),
            _ => self.remove(name),
        }
    }

    pub fn remove(&mut self, name: &str) {
        self.declarations
            .retain(|(n, _v)| !n.eq_ignore_ascii_case(name));
    }

    pub fn is_empty(&self) -> bool {
        self.declarations.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.declarations
            .iter()
            .map(|(n, v)| (n.as_str(), v.as_str()))
    }

    /// Overlay `other` onto this style.
    pub fn merge(&mut self, other: &CssStyle) {
        for (name, value) in other.iter() {
            self.set(name, value);
        }
    }
}

impl fmt::Display for CssStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self
            .declarations
            .iter()
            .map(|(n, v)| format!("{n}: {v};"))
            .collect();
        write!(f, "{}", parts.join(" "))
    }
}

/// Split on `separator`, ignoring separators inside quotes or parentheses,
/// e.g. `url(data:image/png;base64,...)` or `font-family: "a;b"`.
fn split_outside_brackets(input: &str, separator: char) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut depth = 0usize;
    let mut quote: Option<char> = None;
    let mut start = 0;
    for (i, c) in input.char_indices() {
        match (quote, c) {
            (Some(q), c) if c == q => quote = None,
            (Some(_), _) => {}
            (None, '"') | (None, '\'') => quote = Some(c),
            (None, '(') => depth += 1,
            (None, ')') => depth = depth.saturating_sub(1),
            (None, c) if c == separator && depth == 0 => {
                parts.push(&input[start..i]);
                start = i + c.len_utf8();
            }
            _ => {}
        }
    }
    parts.push(&input[start..]);
    parts
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn parses_and_serializes_declarations_in_order() {
        let style = CssStyle::parse("color:red; FONT-SIZE: 10pt ;;");
        assert_eq!(style.get("font-size"), Some("10pt"));
        assert_eq!(style.get("color"), Some("red"));
        assert_eq!(style.to_string(), "color: red; font-size: 10pt;");
    }

    #[test]
    fn semicolons_inside_brackets_and_quotes_are_kept() {
        let style = CssStyle::parse(
            r#"background-image: url(data:image/png;base64,AAA); font-family: "a;b""#,
        );
        assert_eq!(
            style.get("background-image"),
            Some("url(data:image/png;base64,AAA)")
        );
        assert_eq!(style.get("font-family"), Some(r#""a;b""#));
    }

    #[test]
    fn setting_an_existing_property_keeps_position() {
        let mut style = CssStyle::parse("a: 1; b: 2");
        style.set("a", "3");
        style.set_or_remove("b", None);
        style.set_or_remove("c", Some("4"));
        assert_eq!(style.to_string(), "a: 3; c: 4;");
    }
}
