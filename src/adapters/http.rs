use crate::domain::model::{GeneRecord, HitList};
use crate::domain::ports::{ConfigProvider, GeneService};
use crate::utils::error::{GeneQueryError, Result};
use crate::utils::validation::{validate_symbol, validate_symbols};
use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;

pub const DEFAULT_BASE_URL: &str = "https://mygene.info/v3";

const SINGLE_FIELDS: &str = "symbol,name,entrezgene";
const BATCH_FIELDS: &str = "name,symbol,entrezgene";

/// Client for the MyGene.info `query` endpoint.
#[derive(Debug, Clone)]
pub struct MyGeneClient {
    base_url: String,
    client: Client,
}

impl MyGeneClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            client: Client::new(),
        }
    }

    pub fn from_config<C: ConfigProvider>(config: &C) -> Self {
        Self::new(config.base_url())
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn query_endpoint(&self) -> String {
        format!("{}/query", self.base_url.trim_end_matches('/'))
    }

    async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T> {
        let status = response.status();
        tracing::debug!("Gene service response status: {}", status);

        if !status.is_success() {
            return Err(GeneQueryError::HttpStatus {
                status: status.as_u16(),
            });
        }

        let body = response.text().await?;
        Ok(serde_json::from_str(&body)?)
    }
}

#[async_trait]
impl GeneService for MyGeneClient {
    async fn query_one(&self, symbol: &str) -> Result<Option<GeneRecord>> {
        let symbol = validate_symbol(symbol)?;
        let endpoint = self.query_endpoint();
        tracing::debug!("GET {} q={}", endpoint, symbol);

        let response = self
            .client
            .get(&endpoint)
            .query(&[
                ("q", symbol.as_str()),
                ("fields", SINGLE_FIELDS),
                ("fetch_all", "false"),
            ])
            .send()
            .await?;

        let hit_list: HitList = Self::read_json(response).await?;
        Ok(hit_list.hits.into_iter().next())
    }

    async fn query_many(&self, symbols: &[String]) -> Result<Vec<GeneRecord>> {
        let symbols = validate_symbols(symbols)?;
        let joined = symbols.join(",");
        let endpoint = self.query_endpoint();
        tracing::debug!("POST {} with {} symbols", endpoint, symbols.len());

        let response = self
            .client
            .post(&endpoint)
            .form(&[
                ("q", joined.as_str()),
                ("scopes", "symbol"),
                ("fields", BATCH_FIELDS),
            ])
            .send()
            .await?;

        let records: Vec<GeneRecord> = Self::read_json(response).await?;
        for record in records.iter().filter(|r| r.notfound) {
            tracing::warn!(
                "⚠️ Service reported no match for '{}'",
                record.query.as_deref().unwrap_or("?")
            );
        }
        Ok(records)
    }

    async fn query_raw(&self, symbol: &str) -> Result<serde_json::Value> {
        let symbol = validate_symbol(symbol)?;
        let endpoint = self.query_endpoint();
        tracing::debug!("GET {} q={} fields=all", endpoint, symbol);

        let response = self
            .client
            .get(&endpoint)
            .query(&[("q", symbol.as_str()), ("fields", "all")])
            .send()
            .await?;

        Self::read_json(response).await
    }
}
