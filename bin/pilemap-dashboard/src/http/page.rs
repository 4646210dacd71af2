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

//! The single dashboard page. Plotly draws the map from `/api/figure`; a
//! marker click posts the point to `/api/select` and the returned fragment
//! replaces the sidebar.

pub const PAGE_TITLE: &str = "Foundation System Configuration and Performance Parameters";
pub const PLOTLY_JS: &str = "https://cdn.plot.ly/plotly-2.35.2.min.js";
pub const BOOTSTRAP_CSS: &str =
    "https://cdn.jsdelivr.net/npm/bootstrap@5.3.3/dist/css/bootstrap.min.css";

const STYLE: &str = r#"
#sidebar { position: fixed; top: 0; left: 0; bottom: 0; width: 25%; padding: 2rem 1rem; background-color: #f8f9fa; overflow-y: auto; }
#sidebar h2 { font-size: 1.3rem; font-weight: bold; }
#content { margin-left: 25%; padding: 2rem 1rem; }
#map-plot { height: 90vh; }
.detail-title { font-size: 1rem; font-weight: bold; margin-top: 1rem; }
.detail-image { width: 100%; margin-bottom: 1rem; }
.detail-line { font-size: 0.85rem; }
.detail-label { font-weight: bold; }
"#;

const SCRIPT: &str = r#"
(async () => {
  const info = document.getElementById("marker-info");
  const map = document.getElementById("map-plot");
  const figure = await (await fetch("api/figure")).json();
  await Plotly.newPlot(map, figure.data, figure.layout, { responsive: true });
  map.on("plotly_click", async (event) => {
    const p = event.points && event.points[0];
    const point = p ? {
      lat: p.lat,
      lon: p.lon,
      row: Array.isArray(p.customdata) ? p.customdata[0] : p.customdata,
    } : null;
    const response = await fetch("api/select", {
      method: "POST",
      headers: { "content-type": "application/json" },
      body: JSON.stringify({ point }),
    });
    info.innerHTML = await response.text();
  });
})();
"#;

pub fn render_index() -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>{PAGE_TITLE}</title>
<link rel="stylesheet" href="{BOOTSTRAP_CSS}">
<style>{STYLE}</style>
<script src="{PLOTLY_JS}"></script>
</head>
<body>
<div id="sidebar">
<h2>{PAGE_TITLE}</h2>
<hr>
<div id="marker-info" class="lead">{prompt}</div>
</div>
<div id="content"><div id="map-plot"></div></div>
<script>{SCRIPT}</script>
</body>
</html>
"#,
        prompt = pilemap::PROMPT_TEXT,
    )
}
