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

//! Declarative description of the detail panel: which sections appear, in
//! which order, and which columns each one shows.

use crate::data_handler::Dataset;
use crate::error::{LayoutError, LayoutResult};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::Path;
pub const DEFAULT_LAYOUT_YAML: &str = include_str!("../config/detail_layout.yml");
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum FieldKind {
    #[default]
    Labelled,
    Citation,
}
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldSpec {
    pub column: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default)]
    pub kind: FieldKind,
}
impl FieldSpec {
    pub fn labelled(column: impl Into<String>) -> Self {
        Self {
            column: column.into(),
            label: None,
            kind: FieldKind::Labelled,
        }
    }
    pub fn citation(column: impl Into<String>) -> Self {
        Self {
            column: column.into(),
            label: None,
            kind: FieldKind::Citation,
        }
    }
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }
    pub fn label(&self) -> &str {
        self.label.as_deref().unwrap_or(&self.column)
    }
}
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectionSpec {
    pub title: String,
    #[serde(default)]
    pub show_image: bool,
    #[serde(default)]
    pub fields: Vec<FieldSpec>,
}
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetailLayout {
    pub sections: Vec<SectionSpec>,
}
impl DetailLayout {
    pub fn from_yaml_str(yaml: &str) -> LayoutResult<Self> {
        let layout: Self = serde_yaml::from_str(yaml)?;
        layout.validate()?;
        Ok(layout)
    }
    pub fn from_yaml_file<P: AsRef<Path>>(path: P) -> LayoutResult<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| LayoutError::LayoutFileError {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_yaml_str(&content)
    }
    pub fn validate(&self) -> LayoutResult<()> {
        if self.sections.is_empty() {
            return Err(LayoutError::EmptyLayout);
        }
        let mut seen = HashSet::new();
        for (index, section) in self.sections.iter().enumerate() {
            let title = section.title.trim();
            if title.is_empty() {
                return Err(LayoutError::UntitledSection { index });
            }
            if !seen.insert(title) {
                return Err(LayoutError::DuplicateSection {
                    title: title.to_string(),
                });
            }
            if section.fields.iter().any(|f| f.column.trim().is_empty()) {
                return Err(LayoutError::EmptyColumn {
                    section: title.to_string(),
                });
            }
        }
        Ok(())
    }
    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.sections
            .iter()
            .flat_map(|s| s.fields.iter().map(|f| f.column.as_str()))
    }
    /// Layout columns the dataset does not provide; they render as empty.
    pub fn missing_columns<'a>(&'a self, dataset: &Dataset) -> Vec<&'a str> {
        self.columns().filter(|c| !dataset.has_column(c)).collect()
    }
}
impl Default for DetailLayout {
    fn default() -> Self {
        Self::from_yaml_str(DEFAULT_LAYOUT_YAML).expect("built-in detail layout is valid")
    }
}
#[cfg(test)]
mod tests {
    use super::*;
    #[test]
    fn test_builtin_layout_shape() {
        let layout = DetailLayout::default();
        let titles: Vec<&str> = layout.sections.iter().map(|s| s.title.as_str()).collect();
        assert_eq!(titles.len(), 5);
        assert!(titles[0].starts_with("Project Overview"));
        assert!(titles[1].starts_with("Foundation Geometry"));
        assert!(titles[2].starts_with("Structural Response"));
        assert!(titles[3].starts_with("Instrumentation"));
        assert_eq!(titles[4], "References");
        assert!(layout.sections[0].show_image);
        assert_eq!(layout.sections[0].fields[0].column, "Structures");
        let references = &layout.sections[4].fields;
        assert_eq!(references.len(), 6);
        assert!(references.iter().all(|f| f.kind == FieldKind::Citation));
        assert_eq!(layout.columns().count(), 7 + 8 + 7 + 4 + 6);
    }
    #[test]
    fn test_label_defaults_to_column() {
        let field = FieldSpec::labelled("Pile Spacing");
        assert_eq!(field.label(), "Pile Spacing");
        assert_eq!(field.with_label("Spacing").label(), "Spacing");
    }
    #[test]
    fn test_rejects_duplicate_titles() {
        let yaml = r#"
sections:
  - title: Overview
    fields: [{ column: Structures }]
  - title: " Overview "
    fields: []
"#;
        let err = DetailLayout::from_yaml_str(yaml).unwrap_err();
        assert!(matches!(err, LayoutError::DuplicateSection { ref title } if title == "Overview"));
    }
    #[test]
    fn test_rejects_empty_layout_and_blank_columns() {
        assert!(matches!(
            DetailLayout::from_yaml_str("sections: []"),
            Err(LayoutError::EmptyLayout)
        ));
        let yaml = "sections:\n  - title: Overview\n    fields:\n      - column: \"  \"\n";
        assert!(matches!(
            DetailLayout::from_yaml_str(yaml),
            Err(LayoutError::EmptyColumn { .. })
        ));
    }
    #[test]
    fn test_unknown_kind_is_a_parse_error() {
        let yaml = "sections:\n  - title: Refs\n    fields:\n      - { column: Reference 1, kind: footnote }\n";
        assert!(matches!(
            DetailLayout::from_yaml_str(yaml),
            Err(LayoutError::YamlParseError { .. })
        ));
    }
}
