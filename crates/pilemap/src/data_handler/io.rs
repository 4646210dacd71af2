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

use crate::data_handler::common::CellValue;
use crate::data_handler::dataset::Dataset;
use crate::error::{DataError, DataResult};
use calamine::{open_workbook_auto, Data, Reader};
use std::path::Path;
use tracing::{debug, info};
const WORKBOOK_EXTENSIONS: [&str; 5] = ["xlsx", "xlsm", "xlsb", "xls", "ods"];
#[derive(Debug, Clone, Default)]
pub struct SheetReader {
    sheet: Option<String>,
}
impl SheetReader {
    pub fn new() -> Self {
        Self::default()
    }
    /// Reads the named worksheet instead of the first one.
    pub fn with_sheet(mut self, sheet: impl Into<String>) -> Self {
        self.sheet = Some(sheet.into());
        self
    }
    pub fn read_file(&self, path: &Path) -> DataResult<Dataset> {
        if !path.exists() {
            return Err(DataError::FileNotFound {
                path: path.display().to_string(),
            });
        }
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();
        let dataset = match extension.as_str() {
            "csv" => self.read_csv(path)?,
            ext if WORKBOOK_EXTENSIONS.contains(&ext) => self.read_workbook(path)?,
            other => {
                return Err(DataError::UnsupportedFormat {
                    format: if other.is_empty() {
                        path.display().to_string()
                    } else {
                        other.to_string()
                    },
                })
            }
        };
        info!(
            dataset = %dataset.metadata.name,
            id = %dataset.metadata.id,
            rows = dataset.metadata.row_count,
            columns = dataset.metadata.column_count,
            skipped = dataset.metadata.skipped_rows,
            "dataset loaded"
        );
        Ok(dataset)
    }
    fn read_workbook(&self, path: &Path) -> DataResult<Dataset> {
        let workbook_error = |source| DataError::WorkbookError {
            path: path.display().to_string(),
            source,
        };
        let mut workbook = open_workbook_auto(path).map_err(workbook_error)?;
        let sheet_names = workbook.sheet_names();
        let sheet = match &self.sheet {
            Some(name) if sheet_names.contains(name) => name.clone(),
            Some(name) => {
                return Err(DataError::SheetNotFound {
                    path: path.display().to_string(),
                    sheet: name.clone(),
                })
            }
            None => sheet_names.first().cloned().ok_or_else(|| DataError::NoSheets {
                path: path.display().to_string(),
            })?,
        };
        debug!(%sheet, "reading worksheet");
        let range = workbook.worksheet_range(&sheet).map_err(workbook_error)?;
        let mut rows = range.rows();
        let headers: Vec<String> = rows
            .next()
            .ok_or_else(|| DataError::MissingHeader {
                path: path.display().to_string(),
            })?
            .iter()
            .map(ToString::to_string)
            .collect();
        let body: Vec<Vec<CellValue>> = rows
            .map(|row| row.iter().map(cell_from_workbook).collect())
            .collect();
        Dataset::from_rows(dataset_name(path), headers, body, Some(path.to_path_buf()))
    }
    fn read_csv(&self, path: &Path) -> DataResult<Dataset> {
        let csv_error = |source| DataError::CsvError {
            path: path.display().to_string(),
            source,
        };
        let mut reader = csv::ReaderBuilder::new()
            .flexible(true)
            .from_path(path)
            .map_err(csv_error)?;
        let headers: Vec<String> = reader
            .headers()
            .map_err(csv_error)?
            .iter()
            .map(str::to_string)
            .collect();
        if headers.iter().all(|h| h.trim().is_empty()) {
            return Err(DataError::MissingHeader {
                path: path.display().to_string(),
            });
        }
        let mut body = Vec::new();
        for record in reader.records() {
            let record = record.map_err(csv_error)?;
            body.push(record.iter().map(CellValue::from).collect());
        }
        Dataset::from_rows(dataset_name(path), headers, body, Some(path.to_path_buf()))
    }
}
fn dataset_name(path: &Path) -> String {
    path.file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("dataset")
        .to_string()
}
/// Error cells (`#N/A`, `#DIV/0!`) read as empty.
fn cell_from_workbook(cell: &Data) -> CellValue {
    match cell {
        Data::Empty | Data::Error(_) => CellValue::Empty,
        Data::Int(i) => CellValue::Integer(*i),
        Data::Float(f) => CellValue::Number(*f),
        Data::Bool(b) => CellValue::Boolean(*b),
        Data::String(s) => CellValue::from(s.as_str()),
        other => CellValue::Text(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use calamine::CellErrorType;

    #[test]
    fn test_workbook_cells_map_to_values() {
        assert_eq!(cell_from_workbook(&Data::Empty), CellValue::Empty);
        assert_eq!(cell_from_workbook(&Data::Error(CellErrorType::NA)), CellValue::Empty);
        assert_eq!(cell_from_workbook(&Data::Error(CellErrorType::Div0)), CellValue::Empty);
        assert_eq!(cell_from_workbook(&Data::Int(64)).display_text(), "64");
        assert_eq!(cell_from_workbook(&Data::Float(30.0)).display_text(), "30");
        assert_eq!(cell_from_workbook(&Data::Float(34.9)).display_text(), "34.9");
        assert_eq!(cell_from_workbook(&Data::Bool(true)).display_text(), "true");
        assert_eq!(
            cell_from_workbook(&Data::String("  ".into())),
            CellValue::from("  ")
        );
    }
}
