// Copyright 2024 New Vector Ltd.
// Copyright 2022 The Matrix.org Foundation C.I.C.
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Element-Commercial
// Please see LICENSE in the repository root for full details.

//! Format categories: which fragments are read from (and written to) each
//! kind of element, and in what order.
//!
//! Parsers and appliers share one order per category, so writing a format
//! and parsing it back visits the fragments the same way. Callers can
//! replace or drop a fragment's parser or applier by [FormatKey], and append
//! their own after the defaults.

use once_cell::sync::Lazy;

use super::format_key::FormatKey;
use super::formats::*;
use super::fragments::*;
use super::handlers::{handler, FormatApplier, FormatHandler, FormatParser};

fn overlay<F, P: Copy>(
    handlers: &[FormatHandler<F>],
    pick: impl Fn(&FormatHandler<F>) -> P,
    overrides: &[(FormatKey, Option<P>)],
    additional: &[P],
) -> Vec<P> {
    handlers
        .iter()
        .filter_map(|h| match overrides.iter().find(|(key, _)| *key == h.key) {
            Some((_, replacement)) => *replacement,
            None => Some(pick(h)),
        })
        .chain(additional.iter().copied())
        .collect()
}

macro_rules! format_categories {
    (
        $(
            $(#[$meta:meta])*
            $category:ident: $format:ty = [ $( $fragment:ty ),* $(,)? ]
        ),* $(,)?
    ) => {
        /// The default handlers of every category.
        pub struct FormatHandlers {
            $( $(#[$meta])* pub $category: Vec<FormatHandler<$format>>, )*
        }

        /// Effective parsers of every category, in run order.
        #[derive(Clone)]
        pub struct FormatParsers {
            $( $(#[$meta])* pub $category: Vec<FormatParser<$format>>, )*
        }

        /// Effective appliers of every category, in run order.
        #[derive(Clone)]
        pub struct FormatAppliers {
            $( $(#[$meta])* pub $category: Vec<FormatApplier<$format>>, )*
        }

        /// Replacements for default parsers. `None` drops the parser.
        #[derive(Clone, Default)]
        pub struct FormatParserOverride {
            $( pub $category: Vec<(FormatKey, Option<FormatParser<$format>>)>, )*
        }

        /// Replacements for default appliers. `None` drops the applier.
        #[derive(Clone, Default)]
        pub struct FormatApplierOverride {
            $( pub $category: Vec<(FormatKey, Option<FormatApplier<$format>>)>, )*
        }

        /// Parsers that run after the defaults of their category.
        #[derive(Clone, Default)]
        pub struct AdditionalFormatParsers {
            $( pub $category: Vec<FormatParser<$format>>, )*
        }

        /// Appliers that run after the defaults of their category.
        #[derive(Clone, Default)]
        pub struct AdditionalFormatAppliers {
            $( pub $category: Vec<FormatApplier<$format>>, )*
        }

        pub static DEFAULT_FORMAT_HANDLERS: Lazy<FormatHandlers> =
            Lazy::new(|| FormatHandlers {
                $( $category: vec![ $( handler::<$format, $fragment>() ),* ], )*
            });

        impl FormatParsers {
            pub fn build(
                overrides: &FormatParserOverride,
                additional: &AdditionalFormatParsers,
            ) -> Self {
                Self {
                    $(
                        $category: overlay(
                            &DEFAULT_FORMAT_HANDLERS.$category,
                            |h| h.parse,
                            &overrides.$category,
                            &additional.$category,
                        ),
                    )*
                }
            }
        }

        impl FormatAppliers {
            pub fn build(
                overrides: &FormatApplierOverride,
                additional: &AdditionalFormatAppliers,
            ) -> Self {
                Self {
                    $(
                        $category: overlay(
                            &DEFAULT_FORMAT_HANDLERS.$category,
                            |h| h.apply,
                            &overrides.$category,
                            &additional.$category,
                        ),
                    )*
                }
            }
        }
    };
}

format_categories! {
    block: BlockFormat = [
        DirectionFormat,
        TextAlignFormat,
        LineHeightFormat,
        WhiteSpaceFormat,
        BackgroundColorFormat,
        MarginFormat,
        PaddingFormat,
        TextIndentFormat,
        BorderFormat,
    ],
    segment: SegmentFormat = [
        TextColorFormat,
        BackgroundColorFormat,
        FontFormat,
        TextDecorationFormat,
        SuperOrSubScriptFormat,
    ],
    /// Segment format read from block elements. Backgrounds stay on the
    /// block.
    segment_on_block: SegmentFormat = [
        TextColorFormat,
        FontFormat,
        TextDecorationFormat,
    ],
    table: TableFormat = [
        IdFormat,
        DirectionFormat,
        TextAlignFormat,
        BackgroundColorFormat,
        MarginFormat,
        BorderFormat,
        BorderBoxFormat,
        TableLayoutFormat,
        SizeFormat,
        DisplayFormat,
    ],
    table_row: BlockFormat = [
        BackgroundColorFormat,
    ],
    table_cell: TableCellFormat = [
        DirectionFormat,
        TextAlignFormat,
        WhiteSpaceFormat,
        BackgroundColorFormat,
        TextColorFormat,
        PaddingFormat,
        BorderFormat,
        BorderBoxFormat,
        VerticalAlignFormat,
    ],
    image: ImageFormat = [
        IdFormat,
        SizeFormat,
        MarginFormat,
        PaddingFormat,
        BorderFormat,
        BorderBoxFormat,
        DisplayFormat,
        FloatFormat,
        VerticalAlignFormat,
    ],
    list_level: ListLevelFormat = [
        DirectionFormat,
        TextAlignFormat,
        BackgroundColorFormat,
        MarginFormat,
        PaddingFormat,
        ListStyleFormat,
    ],
    list_item: ListItemFormat = [
        DirectionFormat,
        TextAlignFormat,
        LineHeightFormat,
        BackgroundColorFormat,
        MarginFormat,
        PaddingFormat,
        TextIndentFormat,
        ListStyleFormat,
    ],
    divider: DividerFormat = [
        DisplayFormat,
        SizeFormat,
        MarginFormat,
        PaddingFormat,
        BorderFormat,
    ],
    container: FormatContainerFormat = [
        DirectionFormat,
        TextAlignFormat,
        LineHeightFormat,
        WhiteSpaceFormat,
        BackgroundColorFormat,
        MarginFormat,
        PaddingFormat,
        BorderFormat,
        SizeFormat,
        DisplayFormat,
    ],
    link: LinkFormat = [
        HyperLinkFormat,
        TextColorFormat,
        BackgroundColorFormat,
        TextDecorationFormat,
        DisplayFormat,
        MarginFormat,
        PaddingFormat,
        BorderFormat,
        SizeFormat,
    ],
    code: CodeFormat = [
        FontFormat,
        DisplayFormat,
    ],
}

pub static DEFAULT_FORMAT_PARSERS: Lazy<FormatParsers> = Lazy::new(|| {
    FormatParsers::build(
        &FormatParserOverride::default(),
        &AdditionalFormatParsers::default(),
    )
});

pub static DEFAULT_FORMAT_APPLIERS: Lazy<FormatAppliers> = Lazy::new(|| {
    FormatAppliers::build(
        &FormatApplierOverride::default(),
        &AdditionalFormatAppliers::default(),
    )
});

#[cfg(test)]
mod test {
    use super::*;
    use crate::dom::{CssStyle, Element};
    use crate::format::handlers::parse_format;

    fn red_everything(format: &mut SegmentFormat, _: &Element, _: &CssStyle) {
        format.text_color.text_color = Some("red".into());
    }

    fn italic_everything(format: &mut SegmentFormat, _: &Element, _: &CssStyle) {
        format.font.italic = Some(true);
    }

    #[test]
    fn categories_keep_their_declared_order() {
        let keys: Vec<FormatKey> = DEFAULT_FORMAT_HANDLERS
            .code
            .iter()
            .map(|h| h.key)
            .collect();
        assert_eq!(keys, vec![FormatKey::Font, FormatKey::Display]);
        assert_eq!(DEFAULT_FORMAT_PARSERS.block.len(), 9);
    }

    #[test]
    fn overrides_replace_or_drop_parsers() {
        let overrides = FormatParserOverride {
            segment: vec![
                (FormatKey::TextColor, Some(red_everything as FormatParser<_>)),
                (FormatKey::Font, None),
            ],
            ..Default::default()
        };
        let additional = AdditionalFormatParsers {
            segment: vec![italic_everything as FormatParser<SegmentFormat>],
            ..Default::default()
        };
        let parsers = FormatParsers::build(&overrides, &additional);

        let mut element = Element::new("span");
        element.set_attr("style", "color: blue; font-size: 10pt");
        let mut format = SegmentFormat::default();
        parse_format(&parsers.segment, &mut format, &element, &CssStyle::default());

        assert_eq!(format.text_color.text_color.as_deref(), Some("red"));
        assert_eq!(format.font.font_size, None);
        assert_eq!(format.font.italic, Some(true));
        assert_eq!(parsers.segment.len(), DEFAULT_FORMAT_PARSERS.segment.len());
    }
}
