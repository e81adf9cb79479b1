// Copyright 2024 New Vector Ltd.
// Copyright 2022 The Matrix.org Foundation C.I.C.
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Element-Commercial
// Please see LICENSE in the repository root for full details.

use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display};

use super::block_group::GeneralBlock;
use crate::dom::NodeId;
use crate::format::{
    CodeFormat, DatasetFormat, EntityInfoFormat, ImageFormat, LinkFormat,
    SegmentFormat,
};

fn is_false(value: &bool) -> bool {
    !*value
}

/// Inline content of a paragraph.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Segment {
    pub kind: SegmentKind,
    #[serde(default)]
    pub format: SegmentFormat,
    #[serde(default, skip_serializing_if = "is_false")]
    pub is_selected: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<Link>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<Code>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "segmentType")]
pub enum SegmentKind {
    Text {
        text: String,
    },
    Image(Image),
    Br,
    /// Zero width cursor position.
    SelectionMarker,
    /// An element the model does not understand, kept with its children.
    General(GeneralBlock),
    #[serde(rename_all = "camelCase")]
    Entity {
        wrapper: NodeId,
        entity_format: EntityInfoFormat,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Display, AsRefStr)]
pub enum SegmentType {
    Text,
    Image,
    Br,
    SelectionMarker,
    General,
    Entity,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Image {
    pub src: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alt: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default)]
    pub format: ImageFormat,
    #[serde(default, skip_serializing_if = "DatasetFormat::is_empty")]
    pub dataset: DatasetFormat,
    /// Selected as a single image rather than as part of a range.
    #[serde(default, skip_serializing_if = "is_false")]
    pub is_selected_as_image_selection: bool,
}

/// Hyperlink decorator of a segment.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Link {
    pub format: LinkFormat,
    #[serde(default, skip_serializing_if = "DatasetFormat::is_empty")]
    pub dataset: DatasetFormat,
}

/// Inline code decorator of a segment.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Code {
    pub format: CodeFormat,
}

impl Segment {
    pub fn new(kind: SegmentKind, format: SegmentFormat) -> Self {
        Self {
            kind,
            format,
            is_selected: false,
            link: None,
            code: None,
        }
    }

    pub fn segment_type(&self) -> SegmentType {
        match self.kind {
            SegmentKind::Text { .. } => SegmentType::Text,
            SegmentKind::Image(_) => SegmentType::Image,
            SegmentKind::Br => SegmentType::Br,
            SegmentKind::SelectionMarker => SegmentType::SelectionMarker,
            SegmentKind::General(_) => SegmentType::General,
            SegmentKind::Entity { .. } => SegmentType::Entity,
        }
    }

    pub fn is_marker(&self) -> bool {
        matches!(self.kind, SegmentKind::SelectionMarker)
    }

    pub fn is_br(&self) -> bool {
        matches!(self.kind, SegmentKind::Br)
    }

    pub fn text(&self) -> Option<&str> {
        match &self.kind {
            SegmentKind::Text { text } => Some(text),
            _ => None,
        }
    }

    pub fn text_mut(&mut self) -> Option<&mut String> {
        match &mut self.kind {
            SegmentKind::Text { text } => Some(text),
            _ => None,
        }
    }

    /// True when `other` renders with exactly the same decorations, so
    /// text of both can live in one segment.
    pub fn same_decoration(&self, other: &Segment) -> bool {
        self.format == other.format
            && self.link == other.link
            && self.code == other.code
            && self.is_selected == other.is_selected
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn segments_serialize_with_their_type_tag() {
        let segment = Segment::new(
            SegmentKind::Text { text: "hi".into() },
            SegmentFormat::default(),
        );
        let json = serde_json::to_string(&segment).unwrap();
        assert_eq!(
            json,
            r#"{"kind":{"segmentType":"Text","text":"hi"},"format":{}}"#
        );
        let back: Segment = serde_json::from_str(&json).unwrap();
        assert_eq!(back, segment);
    }

    #[test]
    fn decoration_comparison_includes_selection() {
        let a = Segment::new(SegmentKind::Br, SegmentFormat::default());
        let mut b = a.clone();
        assert!(a.same_decoration(&b));
        b.is_selected = true;
        assert!(!a.same_decoration(&b));
    }
}
