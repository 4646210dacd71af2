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

use pilemap::data_handler::{self, SheetReader};
use pilemap::{CellValue, DataError, PileMap, Selection, NO_DATA_TEXT};
use std::io::Write;
use rust_xlsxwriter::Workbook;
use tempfile::NamedTempFile;

fn csv_file(content: &str) -> NamedTempFile {
    let mut file = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
    write!(file, "{content}").unwrap();
    file
}

/// Two sheets: "Sites" with padded headers and typed cells, "Piles" with one record.
fn workbook_file() -> NamedTempFile {
    let file = tempfile::Builder::new().suffix(".xlsx").tempfile().unwrap();
    let mut workbook = Workbook::new();
    let sites = workbook.add_worksheet().set_name("Sites").unwrap();
    for (col, header) in [" Structures ", "Latitude ", " Longitude", "Pile length (m)", "Piles"]
        .into_iter()
        .enumerate()
    {
        sites.write_string(0, col as u16, header).unwrap();
    }
    sites.write_string(1, 0, "Tower A").unwrap();
    sites.write_number(1, 1, 12.97).unwrap();
    sites.write_number(1, 2, 77.59).unwrap();
    sites.write_number(1, 3, 30.0).unwrap();
    sites.write_number(1, 4, 64).unwrap();
    sites.write_string(2, 0, "Messeturm").unwrap();
    sites.write_number(2, 1, 50.1122).unwrap();
    sites.write_number(2, 2, 8.6521).unwrap();
    sites.write_number(2, 3, 34.9).unwrap();
    let piles = workbook.add_worksheet().set_name("Piles").unwrap();
    for (col, header) in ["Structures", "Latitude", "Longitude"].into_iter().enumerate() {
        piles.write_string(0, col as u16, header).unwrap();
    }
    piles.write_string(1, 0, "Westend 1").unwrap();
    piles.write_number(1, 1, 50.1129).unwrap();
    piles.write_number(1, 2, 8.6632).unwrap();
    workbook.save(file.path()).unwrap();
    file
}

const SITES: &str = " Structures ,Location,Latitude , Longitude,Reference 1
Tower A,Bangalore,12.97,77.59,
Messeturm,Frankfurt,50.1122,8.6521,\"Katzenbach, R. (2000)\"
Duplicate,Somewhere,12.97,77.59,
Westend 1,Frankfurt,50.1129,8.6632,
";

#[test]
fn test_load_csv_trims_headers() {
    let file = csv_file(SITES);
    let dataset = data_handler::load(file.path()).unwrap();
    assert_eq!(
        dataset.columns(),
        ["Structures", "Location", "Latitude", "Longitude", "Reference 1"]
    );
    assert_eq!(dataset.len(), 4);
    assert_eq!(dataset.metadata.row_count, 4);
    assert_eq!(dataset.metadata.column_count, 5);
    assert_eq!(dataset.metadata.skipped_rows, 0);
    assert_eq!(
        dataset.records()[1].get("Reference 1"),
        Some(&CellValue::Text("Katzenbach, R. (2000)".into()))
    );
}

#[test]
fn test_every_record_is_found_by_its_coordinates() {
    let file = csv_file(SITES);
    let dataset = data_handler::load(file.path()).unwrap();
    for record in dataset.records() {
        let found = dataset
            .lookup(record.latitude(), record.longitude())
            .unwrap();
        let first = dataset
            .records()
            .iter()
            .find(|r| r.matches(record.latitude(), record.longitude()))
            .unwrap();
        assert_eq!(found.row(), first.row());
    }
}

#[test]
fn test_duplicate_coordinates_resolve_to_first_row() {
    let file = csv_file(SITES);
    let dataset = data_handler::load(file.path()).unwrap();
    let found = dataset.lookup(12.97, 77.59).unwrap();
    assert_eq!(found.name().as_deref(), Some("Tower A"));
    assert_eq!(found.row(), 0);
}

#[test]
fn test_index_agrees_with_linear_scan() {
    let file = csv_file(SITES);
    let dataset = data_handler::load(file.path()).unwrap();
    let probes = [
        (12.97, 77.59),
        (50.1122, 8.6521),
        (50.1129, 8.6632),
        (50.1122, 8.6632),
        (12.970_000_000_000_001, 77.59),
        (0.0, 0.0),
        (f64::NAN, 1.0),
    ];
    for (lat, lon) in probes {
        assert_eq!(
            dataset.lookup(lat, lon).map(|r| r.row()),
            dataset.lookup_linear(lat, lon).map(|r| r.row()),
            "probe ({lat}, {lon})"
        );
    }
}

#[test]
fn test_absent_coordinates_are_not_found() {
    let file = csv_file(SITES);
    let dataset = data_handler::load(file.path()).unwrap();
    assert!(dataset.lookup(12.97, 77.6).is_none());
    assert!(dataset.lookup(-12.97, 77.59).is_none());
}

#[test]
fn test_resolve_prefers_matching_row_id() {
    let file = csv_file(SITES);
    let dataset = data_handler::load(file.path()).unwrap();
    let by_row = dataset
        .resolve(&Selection::at(12.97, 77.59).with_row(2))
        .unwrap();
    assert_eq!(by_row.name().as_deref(), Some("Duplicate"));
    let stale = dataset
        .resolve(&Selection::at(50.1122, 8.6521).with_row(3))
        .unwrap();
    assert_eq!(stale.name().as_deref(), Some("Messeturm"));
    let out_of_range = dataset
        .resolve(&Selection::at(50.1129, 8.6632).with_row(99))
        .unwrap();
    assert_eq!(out_of_range.row(), 3);
    assert!(dataset
        .resolve(&Selection::at(1.0, 1.0).with_row(0))
        .is_none());
}

#[test]
fn test_missing_latitude_column_is_fatal() {
    let file = csv_file("Structures,Lat,Longitude\nTower A,12.97,77.59\n");
    let err = data_handler::load(file.path()).unwrap_err();
    assert!(matches!(err, DataError::ColumnNotFound { ref column, .. } if column == "Latitude"));
}

#[test]
fn test_missing_file_is_fatal() {
    let dir = tempfile::tempdir().unwrap();
    let err = data_handler::load(dir.path().join("absent.xlsx")).unwrap_err();
    assert!(matches!(err, DataError::FileNotFound { .. }));
    assert!(err.to_string().contains("absent.xlsx"));
}

#[test]
fn test_unsupported_extension_is_rejected() {
    let mut file = tempfile::Builder::new().suffix(".txt").tempfile().unwrap();
    write!(file, "Structures,Latitude,Longitude\n").unwrap();
    let err = SheetReader::new().read_file(file.path()).unwrap_err();
    assert!(matches!(err, DataError::UnsupportedFormat { ref format } if format == "txt"));
}

#[test]
fn test_corrupt_workbook_is_fatal() {
    let mut file = tempfile::Builder::new().suffix(".xlsx").tempfile().unwrap();
    write!(file, "this is not a zip archive").unwrap();
    let err = data_handler::load(file.path()).unwrap_err();
    assert!(matches!(err, DataError::WorkbookError { .. }));
}

#[test]
fn test_rows_with_unparseable_coordinates_are_skipped() {
    let file = csv_file("Structures,Latitude,Longitude\nTower A,north,77.59\nTower B,1.5,2.5\n");
    let dataset = data_handler::load(file.path()).unwrap();
    assert_eq!(dataset.len(), 1);
    assert_eq!(dataset.metadata.skipped_rows, 1);
    assert_eq!(dataset.records()[0].name().as_deref(), Some("Tower B"));
}

#[test]
fn test_pile_map_from_path_selects_records() {
    let file = csv_file(SITES);
    let map = PileMap::from_path(file.path()).unwrap();
    let view = map.select(Some(&Selection::at(50.1122, 8.6521)));
    let references = view.section("References").unwrap();
    assert_eq!(references.line_texts(), ["Katzenbach, R. (2000)"]);
    assert_eq!(
        map.select(Some(&Selection::at(0.5, 0.5))).message(),
        Some(NO_DATA_TEXT)
    );
    assert_eq!(map.figure()["data"][0]["lat"].as_array().unwrap().len(), 4);
}

#[test]
fn test_load_workbook_reads_first_sheet() {
    let file = workbook_file();
    let dataset = data_handler::load(file.path()).unwrap();
    assert_eq!(
        dataset.columns(),
        ["Structures", "Latitude", "Longitude", "Pile length (m)", "Piles"]
    );
    assert_eq!(dataset.len(), 2);
    assert_eq!(dataset.metadata.name, file.path().file_stem().unwrap().to_str().unwrap());
    let tower = dataset.lookup(12.97, 77.59).unwrap();
    assert_eq!(tower.name().as_deref(), Some("Tower A"));
    assert_eq!(tower.text("Pile length (m)"), "30");
    assert_eq!(tower.text("Piles"), "64");
    let messeturm = dataset.lookup(50.1122, 8.6521).unwrap();
    assert_eq!(messeturm.text("Pile length (m)"), "34.9");
    assert!(messeturm.get("Piles").map_or(true, CellValue::is_empty));
}

#[test]
fn test_load_workbook_named_sheet() {
    let file = workbook_file();
    let dataset = SheetReader::new()
        .with_sheet("Piles")
        .read_file(file.path())
        .unwrap();
    assert_eq!(dataset.columns(), ["Structures", "Latitude", "Longitude"]);
    assert_eq!(dataset.len(), 1);
    assert_eq!(
        dataset.lookup(50.1129, 8.6632).and_then(|r| r.name()).as_deref(),
        Some("Westend 1")
    );
    assert!(dataset.lookup(12.97, 77.59).is_none());
}

#[test]
fn test_missing_sheet_is_fatal() {
    let file = workbook_file();
    let err = SheetReader::new()
        .with_sheet("Rafts")
        .read_file(file.path())
        .unwrap_err();
    assert!(matches!(err, DataError::SheetNotFound { ref sheet, .. } if sheet == "Rafts"));
}

#[test]
fn test_selection_json_keeps_exact_coordinates() {
    let (lat, lon) = (-9.619_375_974_871_005_f64, 154.821_103_137_157_02_f64);
    let body = r#"{"lat":-9.619375974871005,"lon":154.82110313715702,"row":0}"#;
    let selection: Selection = serde_json::from_str(body).unwrap();
    assert_eq!(selection.lat.to_bits(), lat.to_bits());
    assert_eq!(selection.lon.to_bits(), lon.to_bits());
    let echoed: Selection =
        serde_json::from_str(&serde_json::to_string(&Selection::at(lat, lon)).unwrap()).unwrap();
    assert_eq!(echoed.lat.to_bits(), lat.to_bits());
    assert_eq!(echoed.lon.to_bits(), lon.to_bits());
}
