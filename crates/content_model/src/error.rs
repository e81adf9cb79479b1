// Copyright 2024 New Vector Ltd.
// Copyright 2022 The Matrix.org Foundation C.I.C.
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Element-Commercial
// Please see LICENSE in the repository root for full details.

use thiserror::Error;

/// Returned by [crate::dom::HtmlDom::parse_strict] when html5ever had to
/// recover from malformed markup.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("failed to parse html: {}", parse_errors.join("; "))]
pub struct HtmlParseError {
    pub parse_errors: Vec<String>,
}

#[derive(Debug, Error)]
pub enum MetadataError {
    #[error("editing info is not valid json: {0}")]
    InvalidJson(#[from] serde_json::Error),
    #[error("editing info for {kind} does not pass validation: {reason}")]
    Invalid { kind: &'static str, reason: String },
}
