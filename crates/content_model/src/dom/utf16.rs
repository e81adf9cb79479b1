// Copyright 2024 New Vector Ltd.
// Copyright 2022 The Matrix.org Foundation C.I.C.
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Element-Commercial
// Please see LICENSE in the repository root for full details.

//! Text offsets in DOM positions count UTF-16 code units, like browser ranges.

use widestring::Utf16String;

pub fn utf16_len(text: &str) -> usize {
    Utf16String::from_str(text).len()
}

/// Split `text` at a UTF-16 offset. Offsets past the end clamp to the end, an
/// offset inside a surrogate pair moves to the start of the pair.
pub fn split_at_utf16(text: &str, offset: usize) -> (String, String) {
    let wide = Utf16String::from_str(text);
    let units = wide.as_slice();
    let mut offset = offset.min(units.len());
    if offset > 0
        && offset < units.len()
        && (0xDC00..=0xDFFF).contains(&units[offset])
    {
        offset -= 1;
    }
    let (head, tail) = units.split_at(offset);
    (
        String::from_utf16_lossy(head),
        String::from_utf16_lossy(tail),
    )
}
