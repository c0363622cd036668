use std::fs;

use serde::{Deserialize, Serialize};

use crate::encoding::{errors::EncodingError, serde_primitives::hex_bytes};

/// Catalog of every named encoder shipped with the crate.
pub const DEFAULT_CATALOG_JSON: &str = include_str!("../../config/function_catalog.json");

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Parameter {
    #[serde(rename = "type")]
    pub kind: String,
    pub name: String,
}

/// One named encoder: its parameter list in call order and what it returns.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FunctionEntry {
    pub name: String,
    pub params: Vec<Parameter>,
    pub return_type: String,
}

impl FunctionEntry {
    /// `name(type name, ...)`
    pub fn signature(&self) -> String {
        let params: Vec<String> =
            self.params.iter().map(|p| format!("{} {}", p.kind, p.name)).collect();
        format!("{}({})", self.name, params.join(", "))
    }
}

/// Ordered list of function entries, as produced by the catalog generator.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FunctionCatalog {
    entries: Vec<FunctionEntry>,
}

impl FunctionCatalog {
    pub fn from_json_str(json: &str) -> Result<Self, EncodingError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Reads the catalog at `path`, or the embedded one when no path is given.
    pub fn load(path: Option<&str>) -> Result<Self, EncodingError> {
        match path {
            Some(path) => {
                let json = fs::read_to_string(path).map_err(|e| {
                    EncodingError::FatalError(format!(
                        "Error reading catalog file from {}: {}",
                        path, e
                    ))
                })?;
                Self::from_json_str(&json)
            }
            None => Self::from_json_str(DEFAULT_CATALOG_JSON),
        }
    }

    pub fn entries(&self) -> &[FunctionEntry] {
        &self.entries
    }

    pub fn get(&self, name: &str) -> Option<&FunctionEntry> {
        self.entries
            .iter()
            .find(|entry| entry.name == name)
    }
}

/// An expected output for one named encoder call.
///
/// Arguments are kept as strings and typed by the catalog entry of the same name. `case`
/// tells apart several fixtures of one function.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GoldenFixture {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub case: Option<String>,
    pub args: Vec<String>,
    #[serde(with = "hex_bytes")]
    pub expected: Vec<u8>,
}

impl GoldenFixture {
    pub fn label(&self) -> String {
        match &self.case {
            Some(case) => format!("{}[{}]", self.name, case),
            None => self.name.clone(),
        }
    }

    pub fn load_all(path: &str) -> Result<Vec<Self>, EncodingError> {
        let json = fs::read_to_string(path).map_err(|e| {
            EncodingError::FatalError(format!("Error reading fixtures file from {}: {}", path, e))
        })?;
        Ok(serde_json::from_str(&json)?)
    }
}
