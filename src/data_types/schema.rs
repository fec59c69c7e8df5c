use serde::{Deserialize, Serialize};

use super::axis::{ColumnDescription, ContentsKind};

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct ColumnSchema {
    pub name: String,
    pub kind: ContentsKind,
    /// Name shown to the user; defaults to the column name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
}

/// Columns of the remote table.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
#[serde(transparent)]
pub struct Schema {
    columns: Vec<ColumnSchema>,
}

impl Schema {
    pub fn new(columns: Vec<ColumnSchema>) -> Self {
        Self { columns }
    }

    pub fn from_descriptions(columns: &[ColumnDescription]) -> Self {
        Self::new(
            columns
                .iter()
                .map(|c| ColumnSchema {
                    name: c.name.clone(),
                    kind: c.kind,
                    display_name: None,
                })
                .collect(),
        )
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    pub fn find(&self, name: &str) -> Option<&ColumnSchema> {
        self.columns.iter().find(|c| c.name == name)
    }

    pub fn description(&self, name: &str) -> Option<ColumnDescription> {
        self.find(name).map(|c| ColumnDescription::new(c.name.clone(), c.kind))
    }

    pub fn display_name(&self, name: &str) -> String {
        self.find(name)
            .and_then(|c| c.display_name.clone())
            .unwrap_or_else(|| name.to_string())
    }

    pub fn columns(&self) -> &[ColumnSchema] {
        &self.columns
    }
}
