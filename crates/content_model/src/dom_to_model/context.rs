// Copyright 2024 New Vector Ltd.
// Copyright 2022 The Matrix.org Foundation C.I.C.
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Element-Commercial
// Please see LICENSE in the repository root for full details.

use crate::dom::{CssStyle, DomRange, DomSelection, NodeId};
use crate::format::default_styles::{default_style_of, DefaultStyleMap};
use crate::format::{
    BlockFormat, FormatParsers, SegmentFormat, DEFAULT_FORMAT_PARSERS,
    DEFAULT_STYLES,
};
use crate::model::{Block, Code, Link, ListLevel, ParagraphDecorator};

use super::options::{DomToModelOption, ElementProcessor, ElementProcessorMap};
use super::processors::DEFAULT_ELEMENT_PROCESSORS;

/// List state while walking nested `<ol>`/`<ul>` elements.
#[derive(Clone, Debug, Default)]
pub struct DomToModelListFormat {
    /// The lists enclosing the current element, outermost first.
    pub levels: Vec<ListLevel>,
    /// Number of items seen so far in the running list of each depth.
    pub thread_item_counts: Vec<i64>,
    /// Items whose `<li>` is still being read, plus the nested items they
    /// produced. Slots keep document order.
    pub(crate) pending_items: Vec<Option<Block>>,
    pub(crate) open_items: usize,
}

impl DomToModelListFormat {
    pub(crate) fn open_item(&mut self) -> usize {
        self.open_items += 1;
        self.pending_items.push(None);
        self.pending_items.len() - 1
    }

    /// Store the finished item in its slot. Returns the items to append to
    /// the list parent once the outermost item is done.
    pub(crate) fn close_item(&mut self, slot: usize, item: Block) -> Vec<Block> {
        if let Some(entry) = self.pending_items.get_mut(slot) {
            *entry = Some(item);
        }
        self.open_items = self.open_items.saturating_sub(1);
        if self.open_items == 0 {
            self.pending_items.drain(..).flatten().collect()
        } else {
            Vec::new()
        }
    }
}

/// Formats that apply to content while an element is being read. Saved and
/// restored around every element that changes them.
#[derive(Clone, Debug, Default)]
pub struct DomToModelFormatContext {
    pub segment_format: SegmentFormat,
    pub block_format: BlockFormat,
    pub link: Option<Link>,
    pub code: Option<Code>,
    pub block_decorator: Option<ParagraphDecorator>,
}

pub struct DomToModelContext {
    pub format: DomToModelFormatContext,
    pub is_in_selection: bool,
    pub selection: Option<DomSelection>,
    pub list_format: DomToModelListFormat,
    pub element_processors: ElementProcessorMap,
    pub default_element_processors: &'static ElementProcessorMap,
    pub format_parsers: FormatParsers,
    pub default_format_parsers: &'static FormatParsers,
    pub default_styles: DefaultStyleMap,
    pub allow_cache_element: bool,
}

impl DomToModelContext {
    pub fn new(option: &DomToModelOption, selection: Option<DomSelection>) -> Self {
        let mut element_processors = DEFAULT_ELEMENT_PROCESSORS.clone();
        for (tag, processor) in &option.processor_override {
            match processor {
                Some(p) => {
                    element_processors.insert(tag.to_ascii_lowercase(), *p);
                }
                None => {
                    element_processors.remove(&tag.to_ascii_lowercase());
                }
            }
        }

        let mut default_styles = DEFAULT_STYLES.clone();
        for (tag, style) in &option.default_style_override {
            match style {
                Some(style) => {
                    default_styles.insert(tag.to_ascii_lowercase(), style.clone());
                }
                None => {
                    default_styles.remove(&tag.to_ascii_lowercase());
                }
            }
        }

        Self {
            format: DomToModelFormatContext::default(),
            is_in_selection: false,
            selection: selection.or(option.selection_range),
            list_format: DomToModelListFormat::default(),
            element_processors,
            default_element_processors: &DEFAULT_ELEMENT_PROCESSORS,
            format_parsers: FormatParsers::build(
                &option.format_parser_override,
                &option.additional_format_parsers,
            ),
            default_format_parsers: &DEFAULT_FORMAT_PARSERS,
            default_styles,
            allow_cache_element: !option.disable_cache_element,
        }
    }

    /// Run `callback` and put every inherited format back afterwards.
    pub fn with_format_scope<R>(&mut self, callback: impl FnOnce(&mut Self) -> R) -> R {
        let saved = self.format.clone();
        let result = callback(self);
        self.format = saved;
        result
    }

    pub fn processor(&self, key: &str) -> Option<ElementProcessor> {
        self.element_processors.get(key).copied()
    }

    pub fn default_style(&self, tag: &str) -> CssStyle {
        default_style_of(&self.default_styles, tag)
    }

    pub fn range(&self) -> Option<DomRange> {
        self.selection.as_ref().and_then(|s| s.as_range()).copied()
    }

    pub fn selected_image(&self) -> Option<NodeId> {
        match self.selection {
            Some(DomSelection::Image { image }) => Some(image),
            _ => None,
        }
    }
}
