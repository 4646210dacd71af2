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

//! Dashboard settings. Every key has a default, so an absent file is fine.

use config::{Config, ConfigError, File};
use pilemap::{EmptyValuePolicy, MapStyle};
use serde::{Deserialize, Serialize};
use std::net::{IpAddr, SocketAddr};
use std::path::{Path, PathBuf};

pub const DEFAULT_CONFIG_NAME: &str = "pilemap";
pub const DEFAULT_DATA_PATH: &str = "Updated_CPRF_structure_data.xlsx";
pub const DEFAULT_PORT: u16 = 8050;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    pub data: DataConfig,
    pub assets: AssetsConfig,
    pub server: ServerConfig,
    pub map: MapConfig,
    pub detail: DetailConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DataConfig {
    pub path: PathBuf,
    pub sheet: Option<String>,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from(DEFAULT_DATA_PATH),
            sheet: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AssetsConfig {
    pub dir: PathBuf,
    /// URL path the directory is mounted at; image sources use the same prefix.
    pub route: String,
}

impl Default for AssetsConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("assets"),
            route: pilemap::detail::DEFAULT_ASSETS_PREFIX.to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: IpAddr,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: IpAddr::from([127, 0, 0, 1]),
            port: DEFAULT_PORT,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct MapConfig {
    pub style: MapStyle,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DetailConfig {
    pub empty_values: EmptyValuePolicy,
    pub placeholder: String,
    /// YAML section layout; the built-in one is used when unset.
    pub layout: Option<PathBuf>,
}

impl Default for DetailConfig {
    fn default() -> Self {
        Self {
            empty_values: EmptyValuePolicy::default(),
            placeholder: pilemap::detail::DEFAULT_PLACEHOLDER.to_string(),
            layout: None,
        }
    }
}

impl DashboardConfig {
    /// Reads `path` when given, otherwise an optional `pilemap.{toml,yaml,json}`
    /// from the working directory.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let source = match path {
            Some(path) => File::from(path).required(true),
            None => File::with_name(DEFAULT_CONFIG_NAME).required(false),
        };
        Config::builder()
            .add_source(source)
            .build()?
            .try_deserialize()
    }

    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.server.host, self.server.port)
    }
}
