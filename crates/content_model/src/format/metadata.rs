// Copyright 2024 New Vector Ltd.
// Copyright 2022 The Matrix.org Foundation C.I.C.
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Element-Commercial
// Please see LICENSE in the repository root for full details.

//! Typed editing metadata, stored as JSON in `data-editing-info`.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use super::fragments::DatasetFormat;
use crate::error::MetadataError;

/// Dataset key holding the JSON metadata.
pub const EDITING_INFO_KEY: &str = "editingInfo";

pub trait Metadata: Serialize + DeserializeOwned {
    const KIND: &'static str;

    /// Reject decoded values that are well formed JSON but make no sense.
    fn validate(&self) -> Result<(), String> {
        Ok(())
    }
}

/// Decode the metadata of `dataset`. `Ok(None)` when there is none.
pub fn get_metadata<T: Metadata>(
    dataset: &DatasetFormat,
) -> Result<Option<T>, MetadataError> {
    let Some(json) = dataset.get(EDITING_INFO_KEY) else {
        return Ok(None);
    };
    let metadata: T = serde_json::from_str(json)?;
    metadata
        .validate()
        .map_err(|reason| MetadataError::Invalid {
            kind: T::KIND,
            reason,
        })?;
    Ok(Some(metadata))
}

/// Let `callback` change the metadata of `dataset` and store the result.
/// Returning `None` from the callback removes the metadata.
pub fn update_metadata<T: Metadata>(
    dataset: &mut DatasetFormat,
    callback: impl FnOnce(Option<T>) -> Option<T>,
) -> Result<Option<T>, MetadataError> {
    let current = get_metadata(dataset)?;
    let updated = callback(current);
    match &updated {
        Some(metadata) => {
            dataset.insert(
                EDITING_INFO_KEY.to_owned(),
                serde_json::to_string(metadata)?,
            );
        }
        None => {
            dataset.remove(EDITING_INFO_KEY);
        }
    }
    Ok(updated)
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TableMetadata {
    pub top_border_color: Option<String>,
    pub bottom_border_color: Option<String>,
    pub vertical_border_color: Option<String>,
    pub has_header_row: bool,
    pub header_row_color: Option<String>,
    pub has_first_column: bool,
    pub has_banded_rows: bool,
    pub has_banded_columns: bool,
    pub bg_color_even: Option<String>,
    pub bg_color_odd: Option<String>,
    pub table_border_format: Option<u8>,
    pub vertical_align: Option<String>,
}

impl Metadata for TableMetadata {
    const KIND: &'static str = "table";

    fn validate(&self) -> Result<(), String> {
        match self.table_border_format {
            Some(format) if format > 10 => {
                Err(format!("unknown table border format {format}"))
            }
            _ => Ok(()),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ListMetadata {
    pub ordered_style_type: Option<u8>,
    pub unordered_style_type: Option<u8>,
    pub apply_list_style_from_level: bool,
}

impl Metadata for ListMetadata {
    const KIND: &'static str = "list";
}

/// `list-style-type` of an ordered list from its style number.
pub fn ordered_list_style(style_type: u8) -> Option<&'static str> {
    match style_type {
        1 => Some("decimal"),
        2 => Some("lower-alpha"),
        3 => Some("lower-roman"),
        4 => Some("upper-alpha"),
        5 => Some("upper-roman"),
        _ => None,
    }
}

/// `list-style-type` of an unordered list from its style number.
pub fn unordered_list_style(style_type: u8) -> Option<&'static str> {
    match style_type {
        1 => Some("disc"),
        2 => Some("circle"),
        3 => Some("square"),
        _ => None,
    }
}

/// Crop, rotation and resize state of an image.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ImageMetadata {
    pub src: Option<String>,
    pub width_px: Option<f64>,
    pub height_px: Option<f64>,
    pub natural_width: Option<f64>,
    pub natural_height: Option<f64>,
    pub left_percent: Option<f64>,
    pub right_percent: Option<f64>,
    pub top_percent: Option<f64>,
    pub bottom_percent: Option<f64>,
    pub angle_rad: Option<f64>,
    pub flipped_horizontal: Option<bool>,
    pub flipped_vertical: Option<bool>,
}

impl Metadata for ImageMetadata {
    const KIND: &'static str = "image";

    fn validate(&self) -> Result<(), String> {
        let crops = [
            self.left_percent,
            self.right_percent,
            self.top_percent,
            self.bottom_percent,
        ];
        if crops.iter().flatten().any(|p| !(0.0..=1.0).contains(p)) {
            return Err(String::from("crop percentages must be within 0..=1"));
        }
        Ok(())
    }
}
