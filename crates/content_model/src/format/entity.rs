// Copyright 2024 New Vector Ltd.
// Copyright 2022 The Matrix.org Foundation C.I.C.
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Element-Commercial
// Please see LICENSE in the repository root for full details.

//! Entity identity is stored in the class list of the wrapper element:
//! `_Entity _EType_<type> _EId_<id> _EReadonly_<0|1>`.

use super::fragments::EntityInfoFormat;
use crate::dom::Element;

pub const ENTITY_INFO_NAME: &str = "_Entity";
pub const ENTITY_TYPE_PREFIX: &str = "_EType_";
pub const ENTITY_ID_PREFIX: &str = "_EId_";
pub const ENTITY_READONLY_PREFIX: &str = "_EReadonly_";

/// True for elements the converters treat as opaque entities: real
/// entity wrappers and `contenteditable="false"` islands.
pub fn is_entity_element(element: &Element) -> bool {
    element.has_class(ENTITY_INFO_NAME)
        || element
            .get_attr("contenteditable")
            .is_some_and(|v| v.eq_ignore_ascii_case("false"))
}

pub fn parse_entity_format(wrapper: &Element) -> EntityInfoFormat {
    let mut is_entity = false;
    let mut format = EntityInfoFormat::default();
    for class in wrapper.class_list() {
        if class == ENTITY_INFO_NAME {
            is_entity = true;
        } else if let Some(entity_type) = class.strip_prefix(ENTITY_TYPE_PREFIX) {
            format.entity_type = Some(entity_type.to_owned());
        } else if let Some(id) = class.strip_prefix(ENTITY_ID_PREFIX) {
            format.id = Some(id.to_owned());
        } else if let Some(readonly) = class.strip_prefix(ENTITY_READONLY_PREFIX) {
            format.is_readonly = Some(readonly == "1");
        }
    }
    if !is_entity {
        format.is_fake_entity = Some(true);
        format.is_readonly = Some(true);
    }
    format
}

/// Classes to put on the wrapper of a real entity. Fake entities get none.
pub fn entity_class_names(format: &EntityInfoFormat) -> Vec<String> {
    if format.is_fake_entity == Some(true) {
        return Vec::new();
    }
    let mut classes = vec![
        ENTITY_INFO_NAME.to_owned(),
        format!(
            "{ENTITY_TYPE_PREFIX}{}",
            format.entity_type.as_deref().unwrap_or_default()
        ),
    ];
    if let Some(id) = &format.id {
        classes.push(format!("{ENTITY_ID_PREFIX}{id}"));
    }
    classes.push(format!(
        "{ENTITY_READONLY_PREFIX}{}",
        if format.is_readonly == Some(true) { "1" } else { "0" }
    ));
    classes
}
