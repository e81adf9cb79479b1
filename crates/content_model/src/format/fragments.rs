// Copyright 2024 New Vector Ltd.
// Copyright 2022 The Matrix.org Foundation C.I.C.
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Element-Commercial
// Please see LICENSE in the repository root for full details.

//! Format fragments: the small records every composite format is built from.
//!
//! A fragment only holds values. Reading a fragment from an element and
//! writing it back lives in [super::handlers].

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

macro_rules! format_fragment {
    (
        $(#[$meta:meta])*
        $name:ident {
            $( $(#[$field_meta:meta])* $field:ident: $ty:ty ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
        #[serde(rename_all = "camelCase")]
        pub struct $name {
            $(
                $(#[$field_meta])*
                #[serde(default, skip_serializing_if = "Option::is_none")]
                pub $field: Option<$ty>,
            )*
        }
    };
}

format_fragment!(TextColorFormat { text_color: String });

format_fragment!(BackgroundColorFormat {
    background_color: String,
});

format_fragment!(
    /// Font family, size, weight, style and letter spacing.
    FontFormat {
        font_family: String,
        font_size: String,
        font_weight: String,
        italic: bool,
        letter_spacing: String,
    }
);

format_fragment!(TextDecorationFormat {
    underline: bool,
    strikethrough: bool,
});

format_fragment!(
    /// `super` or `sub`.
    SuperOrSubScriptFormat {
        super_or_sub_script: String,
    }
);

#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Direction {
    Ltr,
    Rtl,
}

format_fragment!(DirectionFormat { direction: Direction });

format_fragment!(
    /// Logical alignment: `start`, `center`, `end` or `justify`. `left` and
    /// `right` are resolved against the element direction when parsed.
    TextAlignFormat {
        text_align: String,
    }
);

format_fragment!(MarginFormat {
    margin_top: String,
    margin_right: String,
    margin_bottom: String,
    margin_left: String,
});

format_fragment!(PaddingFormat {
    padding_top: String,
    padding_right: String,
    padding_bottom: String,
    padding_left: String,
});

format_fragment!(LineHeightFormat { line_height: String });

format_fragment!(WhiteSpaceFormat { white_space: String });

impl WhiteSpaceFormat {
    /// True for the `white-space` values that keep runs of spaces.
    pub fn is_preserved(&self) -> bool {
        matches!(
            self.white_space.as_deref(),
            Some("pre" | "pre-wrap" | "pre-line" | "break-spaces")
        )
    }
}

format_fragment!(TextIndentFormat { text_indent: String });

format_fragment!(BorderFormat {
    border_top: String,
    border_right: String,
    border_bottom: String,
    border_left: String,
    border_radius: String,
});

format_fragment!(BorderBoxFormat { use_border_box: bool });

format_fragment!(SizeFormat {
    width: String,
    height: String,
    max_width: String,
    max_height: String,
    min_width: String,
    min_height: String,
});

format_fragment!(DisplayFormat { display: String });

format_fragment!(FloatFormat { float: String });

format_fragment!(VerticalAlignFormat { vertical_align: String });

format_fragment!(IdFormat { id: String });

format_fragment!(
    /// Anchor attributes of a link.
    HyperLinkFormat {
        href: String,
        target: String,
        anchor_title: String,
        name: String,
        rel: String,
        anchor_class: String,
    }
);

format_fragment!(
    /// Numbering state of one list level.
    ListThreadFormat {
        /// Number of the first item when it does not continue the previous
        /// list of the same depth.
        start_number_override: u32,
        /// Set to `block` for an item that only holds content of a previous
        /// item and takes no number.
        display_for_dummy_item: String,
    }
);

format_fragment!(ListStyleFormat {
    list_style_position: String,
    list_style_type: String,
});

format_fragment!(TableLayoutFormat {
    table_layout: String,
    border_collapse: String,
});

format_fragment!(
    /// Identity of an entity, round-tripped through the wrapper classes.
    EntityInfoFormat {
        entity_type: String,
        id: String,
        is_readonly: bool,
        is_fake_entity: bool,
    }
);

/// `data-*` attributes, keyed by their camelCase dataset name.
pub type DatasetFormat = BTreeMap<String, String>;
