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

pub mod common;
pub mod dataset;
pub mod io;
pub use common::{
    CellValue, DatasetId, DatasetMetadata, IMAGE_COLUMN, LATITUDE_COLUMN, LONGITUDE_COLUMN,
    NAME_COLUMN, REQUIRED_COLUMNS,
};
pub use dataset::{normalize_header, Dataset, Record, Selection};
pub use io::SheetReader;
pub fn load<P: AsRef<std::path::Path>>(path: P) -> crate::error::DataResult<Dataset> {
    SheetReader::new().read_file(path.as_ref())
}
