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

pub mod data_handler;
pub mod detail;
pub mod error;
pub mod layout;
pub mod map_figure;

pub use data_handler::{CellValue, Dataset, DatasetMetadata, Record, Selection, SheetReader};
pub use detail::{
    DetailLine, DetailRenderer, DetailView, EmptyValuePolicy, RenderedSection, SelectionOutcome,
    NO_DATA_TEXT, PROMPT_TEXT,
};
pub use error::{DataError, LayoutError, PileMapError, Result};
pub use layout::{DetailLayout, FieldKind, FieldSpec, SectionSpec};
pub use map_figure::{MapFigure, MapStyle};
use tracing::warn;

/// A loaded dataset together with the way it is drawn and described.
pub struct PileMap {
    dataset: Dataset,
    renderer: DetailRenderer,
    style: MapStyle,
}
impl PileMap {
    pub fn new(dataset: Dataset, renderer: DetailRenderer, style: MapStyle) -> Self {
        let missing = renderer.layout().missing_columns(&dataset);
        if !missing.is_empty() {
            warn!(columns = ?missing, "layout columns absent from dataset, they will render empty");
        }
        Self {
            dataset,
            renderer,
            style,
        }
    }
    pub fn from_path<P: AsRef<std::path::Path>>(path: P) -> Result<Self> {
        let dataset = data_handler::load(path)?;
        Ok(Self::new(dataset, DetailRenderer::default(), MapStyle::default()))
    }
    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }
    pub fn renderer(&self) -> &DetailRenderer {
        &self.renderer
    }
    pub fn style(&self) -> MapStyle {
        self.style
    }
    /// One click: resolve the selection and render the sidebar view.
    pub fn select(&self, selection: Option<&Selection>) -> DetailView {
        let outcome = match selection {
            None => SelectionOutcome::NoSelection,
            Some(selection) => self.dataset.resolve(selection).into(),
        };
        self.renderer.render(outcome)
    }
    pub fn figure(&self) -> serde_json::Value {
        MapFigure::build(&self.dataset, self.style)
    }
}
