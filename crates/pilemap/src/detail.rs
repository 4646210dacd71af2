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

//! Turns a selection outcome into the sectioned view shown in the sidebar.
//!
//! The view is plain data: it serialises to JSON for API consumers and
//! renders itself as an HTML fragment through `Display`.

use crate::data_handler::Record;
use crate::layout::{DetailLayout, FieldKind, SectionSpec};
use askama_escape::{escape, Html};
use serde::{Deserialize, Serialize};
use std::fmt;
pub const PROMPT_TEXT: &str = "Click a marker to see details.";
pub const NO_DATA_TEXT: &str = "No data found for this point.";
pub const DEFAULT_PLACEHOLDER: &str = "N/A";
pub const DEFAULT_ASSETS_PREFIX: &str = "assets";
/// What happens to a labelled field whose value is empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum EmptyValuePolicy {
    #[default]
    Placeholder,
    Omit,
}
#[derive(Debug, Clone, Copy)]
pub enum SelectionOutcome<'a> {
    NoSelection,
    NotFound,
    Found(&'a Record),
}
impl<'a> From<Option<&'a Record>> for SelectionOutcome<'a> {
    fn from(record: Option<&'a Record>) -> Self {
        record.map_or(Self::NotFound, Self::Found)
    }
}
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DetailLine {
    Labelled { label: String, value: String },
    Citation { text: String },
}
impl DetailLine {
    pub fn text(&self) -> String {
        match self {
            Self::Labelled { label, value } => format!("{label}: {value}"),
            Self::Citation { text } => text.clone(),
        }
    }
}
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderedSection {
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    pub lines: Vec<DetailLine>,
}
impl RenderedSection {
    pub fn line_texts(&self) -> Vec<String> {
        self.lines.iter().map(DetailLine::text).collect()
    }
}
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DetailView {
    Prompt { message: String },
    NoData { message: String },
    Record {
        row: usize,
        title: String,
        sections: Vec<RenderedSection>,
    },
}
impl DetailView {
    pub fn prompt() -> Self {
        Self::Prompt {
            message: PROMPT_TEXT.to_string(),
        }
    }
    pub fn no_data() -> Self {
        Self::NoData {
            message: NO_DATA_TEXT.to_string(),
        }
    }
    pub fn sections(&self) -> &[RenderedSection] {
        match self {
            Self::Record { sections, .. } => sections,
            _ => &[],
        }
    }
    /// First section whose title starts with `prefix`.
    pub fn section(&self, prefix: &str) -> Option<&RenderedSection> {
        self.sections().iter().find(|s| s.title.starts_with(prefix))
    }
    pub fn message(&self) -> Option<&str> {
        match self {
            Self::Prompt { message } | Self::NoData { message } => Some(message),
            Self::Record { .. } => None,
        }
    }
    pub fn to_html(&self) -> String {
        self.to_string()
    }
}
impl fmt::Display for DetailView {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Prompt { message } | Self::NoData { message } => {
                write!(f, "{}", escape(message, Html))
            }
            Self::Record {
                row,
                title,
                sections,
            } => {
                write!(f, "<div class=\"detail\" data-row=\"{row}\">")?;
                for section in sections {
                    write!(f, "<h5 class=\"detail-title\">{}</h5>", escape(&section.title, Html))?;
                    if let Some(src) = &section.image {
                        write!(
                            f,
                            "<img class=\"detail-image\" src=\"{}\" alt=\"{}\">",
                            escape(src, Html),
                            escape(title, Html)
                        )?;
                    }
                    for line in &section.lines {
                        match line {
                            DetailLine::Labelled { label, value } => write!(
                                f,
                                "<p class=\"detail-line\"><span class=\"detail-label\">{}: </span><span>{}</span></p>",
                                escape(label, Html),
                                escape(value, Html)
                            )?,
                            DetailLine::Citation { text } => write!(
                                f,
                                "<p class=\"detail-line detail-reference\"><span>{}</span></p>",
                                escape(text, Html)
                            )?,
                        }
                    }
                    f.write_str("<hr>")?;
                }
                f.write_str("</div>")
            }
        }
    }
}
#[derive(Debug, Clone)]
pub struct DetailRenderer {
    layout: DetailLayout,
    policy: EmptyValuePolicy,
    placeholder: String,
    assets_prefix: String,
}
impl DetailRenderer {
    pub fn new(layout: DetailLayout) -> Self {
        Self {
            layout,
            policy: EmptyValuePolicy::default(),
            placeholder: DEFAULT_PLACEHOLDER.to_string(),
            assets_prefix: DEFAULT_ASSETS_PREFIX.to_string(),
        }
    }
    pub fn with_policy(mut self, policy: EmptyValuePolicy) -> Self {
        self.policy = policy;
        self
    }
    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = placeholder.into();
        self
    }
    /// URL path, relative to the page, that record images are served under.
    pub fn with_assets_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.assets_prefix = prefix.into().trim_matches('/').to_string();
        self
    }
    pub fn layout(&self) -> &DetailLayout {
        &self.layout
    }
    pub fn policy(&self) -> EmptyValuePolicy {
        self.policy
    }
    pub fn assets_prefix(&self) -> &str {
        &self.assets_prefix
    }
    pub fn render(&self, outcome: SelectionOutcome<'_>) -> DetailView {
        match outcome {
            SelectionOutcome::NoSelection => DetailView::prompt(),
            SelectionOutcome::NotFound => DetailView::no_data(),
            SelectionOutcome::Found(record) => self.render_record(record),
        }
    }
    pub fn render_record(&self, record: &Record) -> DetailView {
        let sections = self
            .layout
            .sections
            .iter()
            .map(|spec| self.render_section(spec, record))
            .collect();
        DetailView::Record {
            row: record.row(),
            title: record.name().unwrap_or_default(),
            sections,
        }
    }
    fn render_section(&self, spec: &SectionSpec, record: &Record) -> RenderedSection {
        let image = if spec.show_image {
            record
                .image()
                .map(|file| format!("{}/{file}", self.assets_prefix))
        } else {
            None
        };
        let lines = spec
            .fields
            .iter()
            .filter_map(|field| {
                let value = record.text(&field.column);
                let empty = value.trim().is_empty();
                match field.kind {
                    FieldKind::Citation if empty => None,
                    FieldKind::Citation => Some(DetailLine::Citation { text: value }),
                    FieldKind::Labelled if empty => match self.policy {
                        EmptyValuePolicy::Placeholder => Some(DetailLine::Labelled {
                            label: field.label().to_string(),
                            value: self.placeholder.clone(),
                        }),
                        EmptyValuePolicy::Omit => None,
                    },
                    FieldKind::Labelled => Some(DetailLine::Labelled {
                        label: field.label().to_string(),
                        value,
                    }),
                }
            })
            .collect();
        RenderedSection {
            title: spec.title.clone(),
            image,
            lines,
        }
    }
}
impl Default for DetailRenderer {
    fn default() -> Self {
        Self::new(DetailLayout::default())
    }
}
