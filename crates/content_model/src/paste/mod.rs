// Copyright 2024 New Vector Ltd.
// Copyright 2022 The Matrix.org Foundation C.I.C.
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Element-Commercial
// Please see LICENSE in the repository root for full details.

//! Pasted HTML. Importers for a particular source adjust the conversion
//! options of a [BeforePasteEvent] before the fragment is read.

pub mod word_desktop;

use std::fmt;

use crate::dom::HtmlDom;
use crate::dom_to_model::{create_content_model, DomToModelOption};
use crate::model::ContentModelDocument;

/// Replaces the default merge of a pasted model into the target model.
pub type MergePasteCallback = fn(&mut ContentModelDocument, ContentModelDocument);

pub struct BeforePasteEvent {
    /// The pasted content, with the clipboard's surrounding document
    /// stripped.
    pub fragment: HtmlDom,
    /// Markup that came before the fragment in the clipboard HTML.
    pub html_before: String,
    /// Markup that came after the fragment in the clipboard HTML.
    pub html_after: String,
    pub dom_to_model_option: DomToModelOption,
    pub customized_merge: Option<MergePasteCallback>,
}

impl BeforePasteEvent {
    pub fn new(fragment: HtmlDom) -> Self {
        Self {
            fragment,
            html_before: String::new(),
            html_after: String::new(),
            dom_to_model_option: DomToModelOption::default(),
            customized_merge: None,
        }
    }

    /// Split clipboard HTML at its `<!--StartFragment-->` and
    /// `<!--EndFragment-->` comments and parse what lies between them.
    /// Without the comments the whole text is the fragment.
    pub fn from_clipboard_html(html: &str) -> Self {
        const START: &str = "<!--StartFragment-->";
        const END: &str = "<!--EndFragment-->";

        let (before, rest) = match html.find(START) {
            Some(start) => (&html[..start], &html[start + START.len()..]),
            None => ("", html),
        };
        let (fragment, after) = match rest.find(END) {
            Some(end) => (&rest[..end], &rest[end + END.len()..]),
            None => (rest, ""),
        };

        let mut event = Self::new(HtmlDom::parse(fragment));
        event.html_before = before.to_owned();
        event.html_after = after.to_owned();
        event
    }

    /// Whether the clipboard HTML was written by Word for desktop.
    pub fn is_from_word_desktop(&self) -> bool {
        let head = self.html_before.to_ascii_lowercase();
        head.contains("urn:schemas-microsoft-com:office:word")
            || head.contains(r#"content="word.document""#)
    }
}

impl fmt::Debug for BeforePasteEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BeforePasteEvent")
            .field("nodes", &self.fragment.len())
            .field("html_before", &self.html_before.len())
            .field("html_after", &self.html_after.len())
            .field("processor_override", &self.dom_to_model_option.processor_override.len())
            .field("customized_merge", &self.customized_merge.is_some())
            .finish()
    }
}

/// Run the clipboard importers that recognise the source of the event.
pub fn process_paste_event(event: &mut BeforePasteEvent) {
    if event.is_from_word_desktop() {
        tracing::debug!("pasting content from Word desktop");
        word_desktop::process_pasted_content(event);
    }
}

/// Read the pasted fragment with the options the importers left on the
/// event. The cached elements point into the fragment, so they are never
/// recorded.
pub fn create_paste_model(event: &BeforePasteEvent) -> ContentModelDocument {
    let mut option = event.dom_to_model_option.clone();
    option.disable_cache_element = true;
    option.include_root = false;
    create_content_model(&event.fragment, event.fragment.root(), &option, None)
}

/// Append the pasted model to `target`, or hand both to the importer's
/// merge callback when it set one.
pub fn merge_paste_model(
    target: &mut ContentModelDocument,
    event: &BeforePasteEvent,
) {
    let pasted = create_paste_model(event);
    match event.customized_merge {
        Some(merge) => merge(target, pasted),
        None => target.blocks.extend(pasted.blocks),
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::model::{Block, BlockGroupContainer};

    #[test]
    fn clipboard_html_is_split_at_the_fragment_comments() {
        let event = BeforePasteEvent::from_clipboard_html(
            "<html><body><!--StartFragment--><p>a</p><!--EndFragment--></body></html>",
        );
        assert_eq!(event.html_before, "<html><body>");
        assert_eq!(event.html_after, "</body></html>");

        let model = create_paste_model(&event);
        assert_eq!(model.blocks.len(), 1);
        assert_eq!(model.blocks[0].as_paragraph().unwrap().text(), "a");
    }

    #[test]
    fn html_without_fragment_comments_is_pasted_whole() {
        let event = BeforePasteEvent::from_clipboard_html("<b>bold</b>");
        assert!(event.html_before.is_empty());
        assert!(!event.is_from_word_desktop());
        let model = create_paste_model(&event);
        assert_eq!(model.blocks[0].as_paragraph().unwrap().text(), "bold");
    }

    #[test]
    fn pasted_model_never_caches_elements() {
        let event = BeforePasteEvent::new(HtmlDom::parse("<p>a</p>"));
        let model = create_paste_model(&event);
        assert!(model.blocks.iter().all(|b| match b {
            Block::Paragraph(p) => p.cached_element.is_none(),
            _ => true,
        }));
    }

    fn keep_first_block(target: &mut ContentModelDocument, pasted: ContentModelDocument) {
        target.blocks.extend(pasted.blocks.into_iter().take(1));
    }

    #[test]
    fn customized_merge_replaces_the_default_one() {
        let mut event = BeforePasteEvent::new(HtmlDom::parse("<p>a</p><p>b</p>"));
        let mut target = ContentModelDocument::default();
        merge_paste_model(&mut target, &event);
        assert_eq!(target.blocks().len(), 2);

        event.customized_merge = Some(keep_first_block);
        let mut target = ContentModelDocument::default();
        merge_paste_model(&mut target, &event);
        assert_eq!(target.blocks().len(), 1);
    }
}
