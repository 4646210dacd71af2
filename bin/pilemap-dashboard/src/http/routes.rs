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

use crate::http::{error::ApiError, page};
use crate::state::AppState;
use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Query, State,
    },
    response::Html,
    routing::{get, post},
    Json, Router,
};
use pilemap::{DatasetMetadata, DetailView, Selection};
use serde::{Deserialize, Serialize};
use tower_http::{services::ServeDir, trace::TraceLayer};
use tracing::debug;

/// Body of a marker click. A `null` point means nothing is selected.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SelectRequest {
    #[serde(default)]
    pub point: Option<Selection>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct DetailQuery {
    pub lat: Option<f64>,
    pub lon: Option<f64>,
    pub row: Option<usize>,
}

impl DetailQuery {
    fn selection(&self) -> Result<Option<Selection>, ApiError> {
        match (self.lat, self.lon) {
            (Some(lat), Some(lon)) => Ok(Some(Selection {
                lat,
                lon,
                row: self.row,
            })),
            (None, None) => Ok(None),
            _ => Err(ApiError::bad_request("lat and lon must be given together")),
        }
    }
}

pub fn build_router(state: AppState) -> Router {
    let assets = ServeDir::new(&state.assets_dir);
    let assets_route = format!("/{}", state.map.renderer().assets_prefix());
    Router::new()
        .route("/", get(index))
        .route("/health", get(health))
        .route("/api/figure", get(figure))
        .route("/api/dataset", get(dataset))
        .route("/api/select", post(select))
        .route("/api/detail", get(detail))
        .nest_service(&assets_route, assets)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn index() -> Html<String> {
    Html(page::render_index())
}

async fn health() -> &'static str {
    "ok"
}

async fn figure(State(state): State<AppState>) -> Json<serde_json::Value> {
    Json(state.map.figure())
}

async fn dataset(State(state): State<AppState>) -> Json<DatasetMetadata> {
    Json(state.map.dataset().metadata.clone())
}

async fn select(
    State(state): State<AppState>,
    payload: Result<Json<SelectRequest>, JsonRejection>,
) -> Result<Html<String>, ApiError> {
    let Json(request) = payload?;
    let view = state.map.select(request.point.as_ref());
    debug!(point = ?request.point, kind = view_kind(&view), "selection rendered");
    Ok(Html(view.to_html()))
}

async fn detail(
    State(state): State<AppState>,
    query: Result<Query<DetailQuery>, QueryRejection>,
) -> Result<Json<DetailView>, ApiError> {
    let Query(query) = query?;
    let selection = query.selection()?;
    Ok(Json(state.map.select(selection.as_ref())))
}

fn view_kind(view: &DetailView) -> &'static str {
    match view {
        DetailView::Prompt { .. } => "prompt",
        DetailView::NoData { .. } => "no_data",
        DetailView::Record { .. } => "record",
    }
}
