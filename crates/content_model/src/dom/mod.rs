// Copyright 2024 New Vector Ltd.
// Copyright 2022 The Matrix.org Foundation C.I.C.
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Element-Commercial
// Please see LICENSE in the repository root for full details.

pub mod css_style;
pub mod dom_selection;
pub mod html_dom;
pub mod parser;
pub mod to_html;
pub mod utf16;

pub use css_style::CssStyle;
pub use dom_selection::{DomPosition, DomRange, DomSelection, TableSelection};
pub use html_dom::{Element, HtmlDom, NodeId, NodeKind};
pub use utf16::{split_at_utf16, utf16_len};
