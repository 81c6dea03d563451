use crate::domain::model::{GeneRecord, QueryRequest, QueryResult};
use crate::utils::error::Result;
use async_trait::async_trait;
use std::path::Path;

pub trait Storage: Send + Sync {
    fn read_to_string(
        &self,
        path: &Path,
    ) -> impl std::future::Future<Output = Result<String>> + Send;
}

pub trait ConfigProvider: Send + Sync {
    fn base_url(&self) -> &str;
}

/// Remote gene annotation lookups. Each call performs exactly one request.
#[async_trait]
pub trait GeneService: Send + Sync {
    /// First hit for `symbol`, restricted to symbol/name/entrezgene.
    async fn query_one(&self, symbol: &str) -> Result<Option<GeneRecord>>;

    /// One record per matched symbol, in the order the service returns them.
    async fn query_many(&self, symbols: &[String]) -> Result<Vec<GeneRecord>>;

    /// Whole response document for `symbol` with no field restriction.
    async fn query_raw(&self, symbol: &str) -> Result<serde_json::Value>;

    async fn execute(&self, request: &QueryRequest) -> Result<QueryResult> {
        match request {
            QueryRequest::Single { symbol } => Ok(QueryResult::Single(self.query_one(symbol).await?)),
            QueryRequest::Batch { symbols } => Ok(QueryResult::Batch(self.query_many(symbols).await?)),
        }
    }
}
