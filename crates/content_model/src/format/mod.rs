// Copyright 2024 New Vector Ltd.
// Copyright 2022 The Matrix.org Foundation C.I.C.
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Element-Commercial
// Please see LICENSE in the repository root for full details.

pub mod categories;
pub mod default_styles;
pub mod entity;
pub mod format_key;
pub mod formats;
pub mod fragments;
pub mod handlers;
pub mod metadata;

pub use categories::{
    AdditionalFormatAppliers, AdditionalFormatParsers, FormatAppliers,
    FormatApplierOverride, FormatParserOverride, FormatParsers,
    DEFAULT_FORMAT_APPLIERS, DEFAULT_FORMAT_PARSERS,
};
pub use default_styles::{DefaultStyleMap, DEFAULT_STYLES};
pub use entity::{entity_class_names, is_entity_element, parse_entity_format};
pub use format_key::FormatKey;
pub use formats::*;
pub use fragments::*;
pub use handlers::{
    apply_format, parse_format, FormatApplier, FormatHandler, FormatParser,
    FragmentHandler,
};
pub use metadata::{
    get_metadata, update_metadata, ImageMetadata, ListMetadata, Metadata,
    TableMetadata,
};
