pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::cli::{CliConfig, ExtractConfig, QueryCommand};

pub use adapters::{http::MyGeneClient, storage::LocalStorage};
pub use config::ServiceConfig;
pub use crate::core::{dispatcher::QueryDispatcher, extractor::extract, extractor::PathExpression};
pub use utils::error::{GeneQueryError, Result};
