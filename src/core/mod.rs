pub mod dispatcher;
pub mod extractor;
pub mod report;

pub use crate::domain::model::{Command, GeneRecord, QueryRequest, QueryResult};
pub use crate::domain::ports::{ConfigProvider, GeneService, Storage};
pub use crate::utils::error::Result;
