// Copyright 2024 New Vector Ltd.
// Copyright 2022 The Matrix.org Foundation C.I.C.
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Element-Commercial
// Please see LICENSE in the repository root for full details.

use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumIter, EnumString};

/// Names every format fragment. Overrides of parsers and appliers are keyed
/// by it.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
    AsRefStr,
)]
#[serde(rename_all = "camelCase")]
#[strum(serialize_all = "camelCase")]
pub enum FormatKey {
    TextColor,
    BackgroundColor,
    Font,
    TextDecoration,
    SuperOrSubScript,
    Direction,
    TextAlign,
    Margin,
    Padding,
    LineHeight,
    WhiteSpace,
    TextIndent,
    Border,
    BorderBox,
    Size,
    Display,
    Float,
    VerticalAlign,
    Id,
    HyperLink,
    ListThread,
    ListStyle,
    TableLayout,
    EntityInfo,
}

#[cfg(test)]
mod test {
    use std::str::FromStr;

    use strum::IntoEnumIterator;

    use super::*;

    #[test]
    fn keys_use_camel_case_names() {
        assert_eq!(FormatKey::SuperOrSubScript.to_string(), "superOrSubScript");
        assert_eq!(FormatKey::from_str("hyperLink").unwrap(), FormatKey::HyperLink);
    }

    #[test]
    fn every_key_round_trips_through_its_name() {
        for key in FormatKey::iter() {
            assert_eq!(FormatKey::from_str(key.as_ref()).unwrap(), key);
        }
    }
}
