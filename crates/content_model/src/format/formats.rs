// Copyright 2024 New Vector Ltd.
// Copyright 2022 The Matrix.org Foundation C.I.C.
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Element-Commercial
// Please see LICENSE in the repository root for full details.

//! Composite formats, one per kind of model node.
//!
//! A composite flattens its fragments when serialized, so a block format
//! serializes as `{"marginTop": "1em", "textAlign": "center"}`. Each
//! fragment is reachable through `AsRef`/`AsMut`, which is what lets one
//! fragment handler serve every composite that contains the fragment.

use serde::{Deserialize, Serialize};

use super::fragments::*;

macro_rules! composite_format {
    (
        $(#[$meta:meta])*
        $name:ident {
            $( $field:ident: $fragment:ident ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
        pub struct $name {
            $(
                #[serde(flatten)]
                pub $field: $fragment,
            )*
        }

        impl $name {
            pub fn is_empty(&self) -> bool {
                *self == Self::default()
            }
        }

        $(
            impl AsRef<$fragment> for $name {
                fn as_ref(&self) -> &$fragment {
                    &self.$field
                }
            }

            impl AsMut<$fragment> for $name {
                fn as_mut(&mut self) -> &mut $fragment {
                    &mut self.$field
                }
            }
        )*
    };
}

composite_format!(
    /// Format of a paragraph and other block level content.
    BlockFormat {
        direction: DirectionFormat,
        text_align: TextAlignFormat,
        line_height: LineHeightFormat,
        white_space: WhiteSpaceFormat,
        background: BackgroundColorFormat,
        margin: MarginFormat,
        padding: PaddingFormat,
        text_indent: TextIndentFormat,
        border: BorderFormat,
    }
);

impl BlockFormat {
    /// The part of a block format that nested blocks inherit.
    pub fn inheritable(&self) -> BlockFormat {
        BlockFormat {
            direction: self.direction.clone(),
            text_align: self.text_align.clone(),
            line_height: self.line_height.clone(),
            white_space: self.white_space.clone(),
            ..Default::default()
        }
    }
}

composite_format!(
    /// Format of inline content: text, line breaks, images and markers.
    SegmentFormat {
        text_color: TextColorFormat,
        background: BackgroundColorFormat,
        font: FontFormat,
        decoration: TextDecorationFormat,
        script: SuperOrSubScriptFormat,
    }
);

composite_format!(TableFormat {
    id: IdFormat,
    direction: DirectionFormat,
    text_align: TextAlignFormat,
    background: BackgroundColorFormat,
    margin: MarginFormat,
    border: BorderFormat,
    border_box: BorderBoxFormat,
    layout: TableLayoutFormat,
    size: SizeFormat,
    display: DisplayFormat,
});

composite_format!(TableCellFormat {
    direction: DirectionFormat,
    text_align: TextAlignFormat,
    white_space: WhiteSpaceFormat,
    background: BackgroundColorFormat,
    text_color: TextColorFormat,
    padding: PaddingFormat,
    border: BorderFormat,
    border_box: BorderBoxFormat,
    vertical_align: VerticalAlignFormat,
});

composite_format!(ImageFormat {
    id: IdFormat,
    size: SizeFormat,
    margin: MarginFormat,
    padding: PaddingFormat,
    border: BorderFormat,
    border_box: BorderBoxFormat,
    display: DisplayFormat,
    float: FloatFormat,
    vertical_align: VerticalAlignFormat,
});

composite_format!(
    /// Format of one `<ol>`/`<ul>` level of a list item.
    ListLevelFormat {
        thread: ListThreadFormat,
        direction: DirectionFormat,
        text_align: TextAlignFormat,
        background: BackgroundColorFormat,
        margin: MarginFormat,
        padding: PaddingFormat,
        list_style: ListStyleFormat,
    }
);

composite_format!(ListItemFormat {
    direction: DirectionFormat,
    text_align: TextAlignFormat,
    line_height: LineHeightFormat,
    background: BackgroundColorFormat,
    margin: MarginFormat,
    padding: PaddingFormat,
    text_indent: TextIndentFormat,
    list_style: ListStyleFormat,
});

composite_format!(DividerFormat {
    display: DisplayFormat,
    size: SizeFormat,
    margin: MarginFormat,
    padding: PaddingFormat,
    border: BorderFormat,
});

composite_format!(
    /// Format of a block wrapper such as `<blockquote>`.
    FormatContainerFormat {
        direction: DirectionFormat,
        text_align: TextAlignFormat,
        line_height: LineHeightFormat,
        white_space: WhiteSpaceFormat,
        background: BackgroundColorFormat,
        margin: MarginFormat,
        padding: PaddingFormat,
        border: BorderFormat,
        size: SizeFormat,
        display: DisplayFormat,
    }
);

impl FormatContainerFormat {
    /// The block format children of this container inherit when the
    /// container sits in a block whose inherited format is `outer`.
    pub fn inherit_onto(&self, outer: &BlockFormat) -> BlockFormat {
        let outer = outer.inheritable();
        BlockFormat {
            direction: pick(&self.direction, outer.direction),
            text_align: pick(&self.text_align, outer.text_align),
            line_height: pick(&self.line_height, outer.line_height),
            white_space: pick(&self.white_space, outer.white_space),
            ..Default::default()
        }
    }
}

fn pick<T: Clone + Default + PartialEq>(own: &T, inherited: T) -> T {
    if *own == T::default() {
        inherited
    } else {
        own.clone()
    }
}

composite_format!(LinkFormat {
    link: HyperLinkFormat,
    text_color: TextColorFormat,
    background: BackgroundColorFormat,
    decoration: TextDecorationFormat,
    display: DisplayFormat,
    margin: MarginFormat,
    padding: PaddingFormat,
    border: BorderFormat,
    size: SizeFormat,
});

composite_format!(CodeFormat {
    font: FontFormat,
    display: DisplayFormat,
});
