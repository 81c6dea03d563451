use crate::utils::error::Result;
use crate::utils::validation::{validate_symbol, validate_symbols};
use serde::{Deserialize, Deserializer, Serialize};
use std::path::PathBuf;

/// One gene as returned by the annotation service. Every field is optional.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GeneRecord {
    #[serde(default, deserialize_with = "lenient_text")]
    pub symbol: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub entrezgene: Option<String>,
    /// Input term echoed back by batch responses.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub query: Option<String>,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub notfound: bool,
}

impl GeneRecord {
    pub fn new(symbol: &str, name: &str, entrezgene: &str) -> Self {
        Self {
            symbol: Some(symbol.to_string()),
            name: Some(name.to_string()),
            entrezgene: Some(entrezgene.to_string()),
            ..Default::default()
        }
    }
}

// Entrez IDs arrive as JSON numbers; keep every scalar as text.
fn lenient_text<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        None | Some(serde_json::Value::Null) => None,
        Some(serde_json::Value::String(s)) => Some(s),
        Some(other) => Some(other.to_string()),
    })
}

/// Shape of a single-mode response: hits wrapped in an object.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct HitList {
    #[serde(default)]
    pub hits: Vec<GeneRecord>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryRequest {
    Single { symbol: String },
    Batch { symbols: Vec<String> },
}

impl QueryRequest {
    pub fn single(symbol: &str) -> Result<Self> {
        Ok(Self::Single {
            symbol: validate_symbol(symbol)?,
        })
    }

    pub fn batch(symbols: &[String]) -> Result<Self> {
        Ok(Self::Batch {
            symbols: validate_symbols(symbols)?,
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum QueryResult {
    Single(Option<GeneRecord>),
    Batch(Vec<GeneRecord>),
}

/// A command as seen by the dispatcher. Arguments stay optional so that a
/// missing one can be reported as a usage error instead of aborting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Single { gene_symbol: Option<String> },
    Batch { text_file: Option<PathBuf> },
    Extract { gene_symbol: Option<String> },
}
