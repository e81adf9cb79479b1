// Copyright 2024 New Vector Ltd.
// Copyright 2022 The Matrix.org Foundation C.I.C.
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Element-Commercial
// Please see LICENSE in the repository root for full details.

use serde::{Deserialize, Serialize};

use super::segment::{Segment, SegmentType};
use crate::dom::NodeId;
use crate::format::{BlockFormat, SegmentFormat};

fn is_false(value: &bool) -> bool {
    !*value
}

/// Heading or `<p>` semantics wrapped around a paragraph.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParagraphDecorator {
    pub tag_name: String,
    #[serde(default)]
    pub format: SegmentFormat,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Paragraph {
    pub segments: Vec<Segment>,
    #[serde(default)]
    pub format: BlockFormat,
    /// Segment format declared on the paragraph element itself.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub segment_format: Option<SegmentFormat>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub decorator: Option<ParagraphDecorator>,
    /// Inline content that had no block element of its own.
    #[serde(default, skip_serializing_if = "is_false")]
    pub is_implicit: bool,
    #[serde(skip)]
    pub cached_element: Option<NodeId>,
}

impl Paragraph {
    pub fn has_selection(&self) -> bool {
        self.segments.iter().any(|s| s.is_selected)
    }

    pub fn marker_index(&self) -> Option<usize> {
        self.segments.iter().position(Segment::is_marker)
    }

    /// True when nothing but selection markers is left.
    pub fn is_empty(&self) -> bool {
        self.segments.iter().all(Segment::is_marker)
    }

    /// The paragraph holds a marker, a single `<br>` and nothing else.
    pub fn is_marker_and_br_only(&self) -> bool {
        let types: Vec<SegmentType> =
            self.segments.iter().map(Segment::segment_type).collect();
        types == [SegmentType::SelectionMarker, SegmentType::Br]
    }

    /// Turn an implicit paragraph into a real one, e.g. before splitting it.
    pub fn set_not_implicit(&mut self) {
        if self.is_implicit {
            self.is_implicit = false;
            self.cached_element = None;
        }
    }

    /// Plain text of all text segments.
    pub fn text(&self) -> String {
        self.segments.iter().filter_map(Segment::text).collect()
    }
}
