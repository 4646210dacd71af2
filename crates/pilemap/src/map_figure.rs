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

use crate::data_handler::Dataset;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
pub const TRACE_NAME: &str = "CPRF details & Soil condition Data";
pub const MARKER_SIZE: u32 = 30;
pub const MARKER_COLOUR: &str = "rgb(240, 49, 49)";
pub const LAND_COLOUR: &str = "rgb(217,217,217)";
pub const TILE_STYLE: &str = "open-street-map";
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum MapStyle {
    /// Static natural-earth projection.
    #[default]
    Geo,
    /// Slippy tile map.
    Tiles,
}
impl MapStyle {
    pub fn trace_type(self) -> &'static str {
        match self {
            Self::Geo => "scattergeo",
            Self::Tiles => "scattermapbox",
        }
    }
}
#[derive(Debug, Clone, Copy)]
pub struct MapFigure;
impl MapFigure {
    /// Plotly `{data, layout}` document with one marker per record.
    pub fn build(dataset: &Dataset, style: MapStyle) -> Value {
        let records = dataset.records();
        let lat: Vec<f64> = records.iter().map(|r| r.latitude()).collect();
        let lon: Vec<f64> = records.iter().map(|r| r.longitude()).collect();
        let names: Vec<String> = records
            .iter()
            .map(|r| r.name().unwrap_or_default())
            .collect();
        let rows: Vec<[usize; 1]> = records.iter().map(|r| [r.row()]).collect();
        let mut marker = json!({
            "size": MARKER_SIZE,
            "color": MARKER_COLOUR,
        });
        if style == MapStyle::Geo {
            // scattermapbox markers take no outline
            marker["line"] = json!({ "width": 2, "color": "white" });
        }
        let trace = json!({
            "type": style.trace_type(),
            "mode": "markers",
            "name": TRACE_NAME,
            "showlegend": true,
            "lat": lat,
            "lon": lon,
            "hovertext": names,
            "customdata": rows,
            "hovertemplate": "%{hovertext}<extra></extra>",
            "marker": marker,
        });
        let mut layout = json!({
            "legend": { "x": 0.99, "y": 0.01, "xanchor": "right", "yanchor": "bottom" },
            "margin": { "l": 0, "r": 0, "t": 0, "b": 0 },
            "autosize": true,
        });
        match style {
            MapStyle::Geo => {
                layout["geo"] = json!({
                    "projection": { "type": "natural earth" },
                    "showland": true,
                    "landcolor": LAND_COLOUR,
                    "showcountries": true,
                    "showcoastlines": false,
                    "countrycolor": "white",
                    "showframe": false,
                    "resolution": 50,
                });
            }
            MapStyle::Tiles => {
                let (centre_lat, centre_lon) = centre(&lat, &lon);
                layout["mapbox"] = json!({
                    "style": TILE_STYLE,
                    "center": { "lat": centre_lat, "lon": centre_lon },
                    "zoom": 1,
                });
            }
        }
        json!({ "data": [trace], "layout": layout })
    }
}
fn centre(lat: &[f64], lon: &[f64]) -> (f64, f64) {
    if lat.is_empty() {
        return (0.0, 0.0);
    }
    let n = lat.len() as f64;
    (lat.iter().sum::<f64>() / n, lon.iter().sum::<f64>() / n)
}
