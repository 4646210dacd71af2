// SPDX-License-Identifier: AGPL-3.0-only
// Copyright (C) 2024 Jonathan Lee
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License version 3
// as published by the Free Software Foundation.
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.
// See the GNU Affero General Public License for more details.
// You should have received a copy of the GNU Affero General Public License
// along with this program. If not, see https://www.gnu.org/licenses/.

use thiserror::Error;
#[derive(Error, Debug)]
pub enum PileMapError {
    #[error("Dataset error: {0}")]
    Data(#[from] DataError),
    #[error("Detail layout error: {0}")]
    Layout(#[from] LayoutError),
}
#[derive(Error, Debug)]
pub enum DataError {
    #[error("Data file '{path}' does not exist")]
    FileNotFound { path: String },
    #[error("Failed to open workbook '{path}': {source}")]
    WorkbookError {
        path: String,
        #[source]
        source: calamine::Error,
    },
    #[error("Failed to parse CSV file '{path}': {source}")]
    CsvError {
        path: String,
        #[source]
        source: csv::Error,
    },
    #[error("Workbook '{path}' has no sheet named '{sheet}'")]
    SheetNotFound { path: String, sheet: String },
    #[error("Workbook '{path}' contains no sheets")]
    NoSheets { path: String },
    #[error("Data file '{path}' has no header row")]
    MissingHeader { path: String },
    #[error("Required column '{column}' not found in '{path}'")]
    ColumnNotFound { path: String, column: String },
    #[error("Unsupported data format: {format}")]
    UnsupportedFormat { format: String },
}
#[derive(Error, Debug)]
pub enum LayoutError {
    #[error("Failed to parse YAML layout: {source}")]
    YamlParseError {
        #[from]
        source: serde_yaml::Error,
    },
    #[error("Failed to read layout file '{path}': {source}")]
    LayoutFileError {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("Layout defines no sections")]
    EmptyLayout,
    #[error("Section {index} has an empty title")]
    UntitledSection { index: usize },
    #[error("Duplicate section title found: '{title}'")]
    DuplicateSection { title: String },
    #[error("Section '{section}' has a field with an empty column name")]
    EmptyColumn { section: String },
}
pub type Result<T> = std::result::Result<T, PileMapError>;
pub type DataResult<T> = std::result::Result<T, DataError>;
pub type LayoutResult<T> = std::result::Result<T, LayoutError>;
