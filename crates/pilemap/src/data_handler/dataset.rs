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

use crate::data_handler::common::{
    CellValue, DatasetId, DatasetMetadata, IMAGE_COLUMN, LATITUDE_COLUMN, LONGITUDE_COLUMN,
    NAME_COLUMN, REQUIRED_COLUMNS,
};
use crate::error::{DataError, DataResult};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::path::PathBuf;
use tracing::{debug, warn};
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    row: usize,
    latitude: f64,
    longitude: f64,
    values: IndexMap<String, CellValue>,
}
impl Record {
    pub fn row(&self) -> usize {
        self.row
    }
    pub fn latitude(&self) -> f64 {
        self.latitude
    }
    pub fn longitude(&self) -> f64 {
        self.longitude
    }
    pub fn get(&self, column: &str) -> Option<&CellValue> {
        self.values.get(column)
    }
    /// Display text of a column; missing columns read as empty.
    pub fn text(&self, column: &str) -> String {
        self.get(column).map(CellValue::display_text).unwrap_or_default()
    }
    pub fn name(&self) -> Option<String> {
        non_empty(self.text(NAME_COLUMN))
    }
    pub fn image(&self) -> Option<String> {
        non_empty(self.text(IMAGE_COLUMN)).map(|s| s.trim().to_string())
    }
    pub fn values(&self) -> impl Iterator<Item = (&str, &CellValue)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v))
    }
    pub fn matches(&self, latitude: f64, longitude: f64) -> bool {
        self.latitude == latitude && self.longitude == longitude
    }
}
fn non_empty(value: String) -> Option<String> {
    if value.trim().is_empty() {
        None
    } else {
        Some(value)
    }
}
/// Exact-equality key over a coordinate pair. `0.0` and `-0.0` share a key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct CoordinateKey(u64, u64);
impl CoordinateKey {
    fn new(latitude: f64, longitude: f64) -> Option<Self> {
        if !latitude.is_finite() || !longitude.is_finite() {
            return None;
        }
        Some(Self(canonical_bits(latitude), canonical_bits(longitude)))
    }
}
fn canonical_bits(value: f64) -> u64 {
    if value == 0.0 {
        0.0_f64.to_bits()
    } else {
        value.to_bits()
    }
}
/// A clicked marker: its coordinates plus the row id carried in the figure.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Selection {
    pub lat: f64,
    pub lon: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub row: Option<usize>,
}
impl Selection {
    pub fn at(lat: f64, lon: f64) -> Self {
        Self { lat, lon, row: None }
    }
    pub fn with_row(mut self, row: usize) -> Self {
        self.row = Some(row);
        self
    }
}
#[derive(Debug, Clone)]
pub struct Dataset {
    pub metadata: DatasetMetadata,
    columns: Vec<String>,
    records: Vec<Record>,
    index: HashMap<CoordinateKey, usize>,
}
impl Dataset {
    pub fn from_rows<I>(
        name: impl Into<String>,
        raw_headers: Vec<String>,
        rows: I,
        source_path: Option<PathBuf>,
    ) -> DataResult<Self>
    where
        I: IntoIterator<Item = Vec<CellValue>>,
    {
        let name = name.into();
        let origin = source_path
            .as_ref()
            .map_or_else(|| name.clone(), |p| p.display().to_string());
        let columns: Vec<String> = raw_headers
            .iter()
            .enumerate()
            .map(|(i, raw)| normalize_header(raw, i))
            .collect();
        for required in REQUIRED_COLUMNS {
            if !columns.iter().any(|c| c == required) {
                return Err(DataError::ColumnNotFound {
                    path: origin,
                    column: required.to_string(),
                });
            }
        }
        let mut records = Vec::new();
        let mut index = HashMap::new();
        let mut skipped_rows = 0;
        for (line, cells) in rows.into_iter().enumerate() {
            if cells.iter().all(CellValue::is_empty) {
                debug!(line, "skipping blank row");
                skipped_rows += 1;
                continue;
            }
            let mut values = IndexMap::with_capacity(columns.len());
            let mut cells = cells.into_iter();
            for column in &columns {
                let value = cells.next().unwrap_or_default();
                values.entry(column.clone()).or_insert(value);
            }
            let latitude = values.get(LATITUDE_COLUMN).and_then(CellValue::as_f64);
            let longitude = values.get(LONGITUDE_COLUMN).and_then(CellValue::as_f64);
            let (Some(latitude), Some(longitude)) = (latitude, longitude) else {
                warn!(
                    line,
                    structure = %values.get(NAME_COLUMN).map(CellValue::display_text).unwrap_or_default(),
                    "row has no usable coordinates, skipping"
                );
                skipped_rows += 1;
                continue;
            };
            let row = records.len();
            if let Some(key) = CoordinateKey::new(latitude, longitude) {
                match index.entry(key) {
                    Entry::Vacant(slot) => {
                        slot.insert(row);
                    }
                    Entry::Occupied(first) => {
                        warn!(
                            row,
                            first = *first.get(),
                            latitude,
                            longitude,
                            "duplicate coordinates, first row wins"
                        );
                    }
                }
            }
            records.push(Record {
                row,
                latitude,
                longitude,
                values,
            });
        }
        let metadata = DatasetMetadata {
            id: DatasetId::new(),
            name,
            row_count: records.len(),
            column_count: columns.len(),
            skipped_rows,
            loaded_at: chrono::Utc::now(),
            source_path,
        };
        Ok(Self {
            metadata,
            columns,
            records,
            index,
        })
    }
    pub fn len(&self) -> usize {
        self.records.len()
    }
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
    pub fn columns(&self) -> &[String] {
        &self.columns
    }
    pub fn has_column(&self, column: &str) -> bool {
        self.columns.iter().any(|c| c == column)
    }
    pub fn records(&self) -> &[Record] {
        &self.records
    }
    pub fn get(&self, row: usize) -> Option<&Record> {
        self.records.get(row)
    }
    /// First record whose coordinates equal the pair exactly.
    pub fn lookup(&self, latitude: f64, longitude: f64) -> Option<&Record> {
        let key = CoordinateKey::new(latitude, longitude)?;
        self.index.get(&key).and_then(|&row| self.records.get(row))
    }
    pub fn lookup_linear(&self, latitude: f64, longitude: f64) -> Option<&Record> {
        self.records
            .iter()
            .find(|record| record.matches(latitude, longitude))
    }
    /// Prefers the row id when it still points at the selected coordinates.
    pub fn resolve(&self, selection: &Selection) -> Option<&Record> {
        if let Some(record) = selection.row.and_then(|row| self.get(row)) {
            if record.matches(selection.lat, selection.lon) {
                return Some(record);
            }
            debug!(row = record.row, "row id does not match selection, using coordinates");
        }
        self.lookup(selection.lat, selection.lon)
    }
}
/// Trims header whitespace (and a UTF-8 BOM); blank headers get a positional name.
pub fn normalize_header(raw: &str, position: usize) -> String {
    let trimmed = raw.trim_start_matches('\u{feff}').trim();
    if trimmed.is_empty() {
        format!("Unnamed: {position}")
    } else {
        trimmed.to_string()
    }
}
