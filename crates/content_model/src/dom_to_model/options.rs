// Copyright 2024 New Vector Ltd.
// Copyright 2022 The Matrix.org Foundation C.I.C.
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Element-Commercial
// Please see LICENSE in the repository root for full details.

use std::collections::HashMap;

use crate::dom::{CssStyle, DomSelection, HtmlDom, NodeId};
use crate::format::{AdditionalFormatParsers, FormatParserOverride};
use crate::model::BlockGroupContainer;

use super::context::DomToModelContext;

/// Folds the DOM node `node` into `group`.
pub type ElementProcessor =
    fn(&mut dyn BlockGroupContainer, &HtmlDom, NodeId, &mut DomToModelContext);

/// Processors keyed by lower-cased tag name, plus the special keys
/// `#text`, `child`, `element`, `entity`, `general` and `*`.
pub type ElementProcessorMap = HashMap<String, ElementProcessor>;

#[derive(Clone, Default)]
pub struct DomToModelOption {
    /// Read the root element itself rather than only its children.
    pub include_root: bool,
    pub selection_range: Option<DomSelection>,
    /// Replacement processors. `None` removes the default one, so the
    /// element falls back to `*`.
    pub processor_override: Vec<(String, Option<ElementProcessor>)>,
    /// Replacement default styles per tag. `None` removes the default.
    pub default_style_override: Vec<(String, Option<CssStyle>)>,
    pub format_parser_override: FormatParserOverride,
    pub additional_format_parsers: AdditionalFormatParsers,
    pub disable_cache_element: bool,
}

impl DomToModelOption {
    pub fn with_selection(mut self, selection: DomSelection) -> Self {
        self.selection_range = Some(selection);
        self
    }

    pub fn with_processor(mut self, key: &str, processor: ElementProcessor) -> Self {
        self.processor_override.push((key.to_owned(), Some(processor)));
        self
    }
}
