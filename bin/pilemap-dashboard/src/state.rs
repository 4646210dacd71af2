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

use crate::config::DashboardConfig;
use anyhow::{bail, Context, Result};
use pilemap::{DetailLayout, DetailRenderer, PileMap, SheetReader};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, warn};

/// Read-only state shared by every handler.
#[derive(Clone)]
pub struct AppState {
    pub map: Arc<PileMap>,
    pub assets_dir: PathBuf,
}

impl AppState {
    pub fn new(map: PileMap, assets_dir: impl Into<PathBuf>) -> Self {
        Self {
            map: Arc::new(map),
            assets_dir: assets_dir.into(),
        }
    }

    pub fn from_config(config: &DashboardConfig) -> Result<Self> {
        let mut reader = SheetReader::new();
        if let Some(sheet) = &config.data.sheet {
            reader = reader.with_sheet(sheet.clone());
        }
        let dataset = reader.read_file(&config.data.path).with_context(|| {
            format!("failed to load dataset from {}", config.data.path.display())
        })?;
        let layout = match &config.detail.layout {
            Some(path) => DetailLayout::from_yaml_file(path)
                .with_context(|| format!("failed to load detail layout from {}", path.display()))?,
            None => DetailLayout::default(),
        };
        if config.assets.route.trim_matches('/').is_empty() {
            bail!("assets.route must name a path below the site root");
        }
        let renderer = DetailRenderer::new(layout)
            .with_policy(config.detail.empty_values)
            .with_placeholder(config.detail.placeholder.clone())
            .with_assets_prefix(config.assets.route.clone());
        if !config.assets.dir.is_dir() {
            warn!(
                dir = %config.assets.dir.display(),
                "assets directory not found, record images will not load"
            );
        }
        info!(
            records = dataset.len(),
            style = ?config.map.style,
            empty_values = ?config.detail.empty_values,
            "dashboard state ready"
        );
        Ok(Self::new(
            PileMap::new(dataset, renderer, config.map.style),
            config.assets.dir.clone(),
        ))
    }
}
