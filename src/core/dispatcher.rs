use crate::core::extractor::extract;
use crate::core::report::{render_batch, render_matches, render_single};
use crate::domain::model::{Command, GeneRecord, QueryRequest, QueryResult};
use crate::domain::ports::{GeneService, Storage};
use crate::utils::error::{GeneQueryError, Result};
use crate::utils::validation::{validate_required_field, validate_symbol};
use serde_json::Value;
use std::path::Path;

/// Selector applied by the extraction command.
pub const SYMBOL_SELECTOR: &str = "$..symbol";

/// Non-blank, trimmed lines in file order.
pub fn parse_symbols(content: &str) -> Vec<String> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

/// Runs one command against a gene service. Holds no state between commands.
pub struct QueryDispatcher<G: GeneService, S: Storage> {
    service: G,
    storage: S,
}

impl<G: GeneService, S: Storage> QueryDispatcher<G, S> {
    pub fn new(service: G, storage: S) -> Self {
        Self { service, storage }
    }

    pub async fn single(&self, gene_symbol: Option<&str>) -> Result<GeneRecord> {
        let symbol = validate_required_field("a gene symbol (--gene-symbol)", gene_symbol)?;
        let request = QueryRequest::single(symbol)?;

        match self.service.execute(&request).await? {
            QueryResult::Single(Some(record)) => Ok(record),
            QueryResult::Single(None) | QueryResult::Batch(_) => Err(GeneQueryError::NotFound {
                query: symbol.trim().to_string(),
            }),
        }
    }

    pub async fn read_symbols(&self, path: &Path) -> Result<Vec<String>> {
        let content = self.storage.read_to_string(path).await?;
        let symbols = parse_symbols(&content);
        tracing::debug!("Read {} symbols from {}", symbols.len(), path.display());
        Ok(symbols)
    }

    pub async fn batch(&self, text_file: Option<&Path>) -> Result<Vec<GeneRecord>> {
        let path = validate_required_field("a text file (--text-file)", text_file)?;
        let symbols = self.read_symbols(path).await?;
        let request = QueryRequest::batch(&symbols)?;

        match self.service.execute(&request).await? {
            QueryResult::Batch(records) => {
                if records.len() != symbols.len() {
                    tracing::info!(
                        "Service returned {} records for {} symbols",
                        records.len(),
                        symbols.len()
                    );
                }
                Ok(records)
            }
            QueryResult::Single(record) => Ok(record.into_iter().collect()),
        }
    }

    pub async fn extract(&self, gene_symbol: Option<&str>) -> Result<Vec<Value>> {
        let symbol = validate_required_field("a gene symbol (--gene-symbol)", gene_symbol)?;
        let symbol = validate_symbol(symbol)?;
        let document = self.service.query_raw(&symbol).await?;
        extract(&document, SYMBOL_SELECTOR)
    }

    /// Runs `command` and returns the text to print on success.
    pub async fn execute(&self, command: &Command) -> Result<String> {
        match command {
            Command::Single { gene_symbol } => {
                let record = self.single(gene_symbol.as_deref()).await?;
                Ok(render_single(&record))
            }
            Command::Batch { text_file } => {
                let records = self.batch(text_file.as_deref()).await?;
                Ok(render_batch(&records))
            }
            Command::Extract { gene_symbol } => {
                let matches = self.extract(gene_symbol.as_deref()).await?;
                tracing::debug!("{} matches for {}", matches.len(), SYMBOL_SELECTOR);
                Ok(render_matches(&matches))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::error::ErrorKind;
    use async_trait::async_trait;
    use serde_json::json;
    use std::collections::HashMap;
    use std::path::PathBuf;
    use std::sync::{Arc, Mutex};
    use tokio_test::{assert_err, assert_ok};

    #[derive(Clone, Default)]
    struct MockStorage {
        files: HashMap<PathBuf, String>,
    }

    impl MockStorage {
        fn with_file(path: &str, content: &str) -> Self {
            let mut files = HashMap::new();
            files.insert(PathBuf::from(path), content.to_string());
            Self { files }
        }
    }

    impl Storage for MockStorage {
        async fn read_to_string(&self, path: &Path) -> Result<String> {
            self.files
                .get(path)
                .cloned()
                .ok_or_else(|| GeneQueryError::FileNotFound {
                    path: path.to_path_buf(),
                })
        }
    }

    #[derive(Clone, Default)]
    struct MockService {
        hits: HashMap<String, GeneRecord>,
        raw: Option<Value>,
        fail_status: Option<u16>,
        calls: Arc<Mutex<Vec<Vec<String>>>>,
    }

    impl MockService {
        fn with_hit(symbol: &str, name: &str, entrez: &str) -> Self {
            let mut service = Self::default();
            service
                .hits
                .insert(symbol.to_string(), GeneRecord::new(symbol, name, entrez));
            service
        }

        fn failing(status: u16) -> Self {
            Self {
                fail_status: Some(status),
                ..Default::default()
            }
        }

        fn record_call(&self, symbols: Vec<String>) -> Result<()> {
            self.calls.lock().unwrap().push(symbols);
            match self.fail_status {
                Some(status) => Err(GeneQueryError::HttpStatus { status }),
                None => Ok(()),
            }
        }

        fn calls(&self) -> Vec<Vec<String>> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl GeneService for MockService {
        async fn query_one(&self, symbol: &str) -> Result<Option<GeneRecord>> {
            self.record_call(vec![symbol.to_string()])?;
            Ok(self.hits.get(symbol).cloned())
        }

        async fn query_many(&self, symbols: &[String]) -> Result<Vec<GeneRecord>> {
            self.record_call(symbols.to_vec())?;
            Ok(symbols
                .iter()
                .filter_map(|s| self.hits.get(s).cloned())
                .collect())
        }

        async fn query_raw(&self, symbol: &str) -> Result<Value> {
            self.record_call(vec![symbol.to_string()])?;
            Ok(self.raw.clone().unwrap_or_else(|| json!({"hits": []})))
        }
    }

    #[test]
    fn test_parse_symbols_skips_blank_lines() {
        assert_eq!(parse_symbols("BRCA1\n\nTP53\n"), vec!["BRCA1", "TP53"]);
        assert_eq!(parse_symbols("  EGFR \r\n\t\n CDK2"), vec!["EGFR", "CDK2"]);
        assert!(parse_symbols("\n \n").is_empty());
    }

    #[tokio::test]
    async fn test_single_renders_three_fields() {
        let service = MockService::with_hit("TP53", "tumor protein p53", "7157");
        let dispatcher = QueryDispatcher::new(service.clone(), MockStorage::default());

        let output = assert_ok!(
            dispatcher
                .execute(&Command::Single {
                    gene_symbol: Some(" TP53 ".to_string())
                })
                .await
        );

        assert_eq!(
            output,
            "Gene Information:\nSymbol: TP53\nName: tumor protein p53\nEntrezGene ID: 7157\n"
        );
        assert_eq!(service.calls(), vec![vec!["TP53".to_string()]]);
    }

    #[tokio::test]
    async fn test_single_without_symbol_is_usage_error() {
        let service = MockService::default();
        let dispatcher = QueryDispatcher::new(service.clone(), MockStorage::default());

        let err = assert_err!(dispatcher.execute(&Command::Single { gene_symbol: None }).await);

        assert_eq!(err.kind(), ErrorKind::Usage);
        assert!(service.calls().is_empty());
    }

    #[tokio::test]
    async fn test_single_no_hit_is_not_found() {
        let dispatcher = QueryDispatcher::new(MockService::default(), MockStorage::default());

        let err = assert_err!(dispatcher.single(Some("NOTAGENE")).await);
        assert!(matches!(err, GeneQueryError::NotFound { ref query } if query == "NOTAGENE"));
    }

    #[tokio::test]
    async fn test_single_http_error_is_reported() {
        let dispatcher = QueryDispatcher::new(MockService::failing(503), MockStorage::default());

        let err = assert_err!(dispatcher.single(Some("BRCA1")).await);
        assert_eq!(err.kind(), ErrorKind::HttpStatus);
    }

    #[tokio::test]
    async fn test_batch_queries_non_blank_symbols_in_order() {
        let mut service = MockService::with_hit("BRCA1", "BRCA1 DNA repair associated", "672");
        service.hits.insert(
            "TP53".to_string(),
            GeneRecord::new("TP53", "tumor protein p53", "7157"),
        );
        let storage = MockStorage::with_file("genes.txt", "BRCA1\n\nTP53\n");
        let dispatcher = QueryDispatcher::new(service.clone(), storage);

        let output = assert_ok!(
            dispatcher
                .execute(&Command::Batch {
                    text_file: Some(PathBuf::from("genes.txt"))
                })
                .await
        );

        assert_eq!(
            service.calls(),
            vec![vec!["BRCA1".to_string(), "TP53".to_string()]]
        );
        assert_eq!(
            output,
            "Symbol: BRCA1\nName: BRCA1 DNA repair associated\nEntrezGene ID: 672\n\n\
             Symbol: TP53\nName: tumor protein p53\nEntrezGene ID: 7157\n\n"
        );
    }

    #[tokio::test]
    async fn test_batch_missing_file_skips_query() {
        let service = MockService::default();
        let dispatcher = QueryDispatcher::new(service.clone(), MockStorage::default());

        let err = assert_err!(dispatcher.batch(Some(Path::new("missing.txt"))).await);

        assert!(matches!(err, GeneQueryError::FileNotFound { .. }));
        assert!(service.calls().is_empty());
    }

    #[tokio::test]
    async fn test_batch_blank_file_is_rejected_before_query() {
        let service = MockService::default();
        let storage = MockStorage::with_file("blank.txt", "\n  \n");
        let dispatcher = QueryDispatcher::new(service.clone(), storage);

        let err = assert_err!(dispatcher.batch(Some(Path::new("blank.txt"))).await);

        assert_eq!(err.kind(), ErrorKind::Usage);
        assert!(service.calls().is_empty());
    }

    #[tokio::test]
    async fn test_batch_without_path_is_usage_error() {
        let dispatcher = QueryDispatcher::new(MockService::default(), MockStorage::default());
        let err = assert_err!(dispatcher.execute(&Command::Batch { text_file: None }).await);
        assert_eq!(err.kind(), ErrorKind::Usage);
    }

    #[tokio::test]
    async fn test_batch_failure_emits_no_records() {
        let storage = MockStorage::with_file("genes.txt", "BRCA1\n");
        let dispatcher = QueryDispatcher::new(MockService::failing(500), storage);

        let result = dispatcher
            .execute(&Command::Batch {
                text_file: Some(PathBuf::from("genes.txt")),
            })
            .await;

        assert!(matches!(result, Err(GeneQueryError::HttpStatus { status: 500 })));
    }

    #[tokio::test]
    async fn test_batch_unmatched_symbols_are_not_reconciled() {
        let service = MockService::with_hit("TP53", "tumor protein p53", "7157");
        let storage = MockStorage::with_file("genes.txt", "NOTAGENE\nTP53\n");
        let dispatcher = QueryDispatcher::new(service, storage);

        let records = assert_ok!(dispatcher.batch(Some(Path::new("genes.txt"))).await);
        assert_eq!(records, vec![GeneRecord::new("TP53", "tumor protein p53", "7157")]);
    }

    #[tokio::test]
    async fn test_extract_collects_symbols_at_every_depth() {
        let service = MockService {
            raw: Some(json!({
                "hits": [{
                    "symbol": "CDK2",
                    "homologene": {"genes": [{"symbol": "Cdk2"}]}
                }]
            })),
            ..Default::default()
        };
        let dispatcher = QueryDispatcher::new(service, MockStorage::default());

        let output = assert_ok!(
            dispatcher
                .execute(&Command::Extract {
                    gene_symbol: Some("CDK2".to_string())
                })
                .await
        );
        assert_eq!(output, "[\"CDK2\",\"Cdk2\"]\n");
    }

    #[tokio::test]
    async fn test_extract_without_matches_prints_empty_list() {
        let dispatcher = QueryDispatcher::new(MockService::default(), MockStorage::default());
        let matches = assert_ok!(dispatcher.extract(Some("NOTAGENE")).await);
        assert!(matches.is_empty());
    }

    #[tokio::test]
    async fn test_extract_without_symbol_is_usage_error() {
        let service = MockService::default();
        let dispatcher = QueryDispatcher::new(service.clone(), MockStorage::default());

        let err = assert_err!(dispatcher.extract(None).await);
        assert_eq!(err.kind(), ErrorKind::Usage);
        assert!(service.calls().is_empty());
    }
}
