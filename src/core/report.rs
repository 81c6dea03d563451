use crate::domain::model::GeneRecord;
use crate::utils::error::GeneQueryError;
use serde_json::Value;

const SYMBOL_LABEL: &str = "Symbol";
const NAME_LABEL: &str = "Name";
const ENTREZ_LABEL: &str = "EntrezGene ID";

fn placeholder(label: &str) -> String {
    format!("{} not available", label)
}

fn field_line(label: &str, value: Option<&str>) -> String {
    match value {
        Some(value) => format!("{}: {}", label, value),
        None => format!("{}: {}", label, placeholder(label)),
    }
}

/// Three-line block: symbol, name, Entrez ID.
pub fn render_record(record: &GeneRecord) -> String {
    [
        field_line(SYMBOL_LABEL, record.symbol.as_deref()),
        field_line(NAME_LABEL, record.name.as_deref()),
        field_line(ENTREZ_LABEL, record.entrezgene.as_deref()),
    ]
    .join("\n")
}

pub fn render_single(record: &GeneRecord) -> String {
    format!("Gene Information:\n{}\n", render_record(record))
}

/// Every record followed by a blank line, in the order given.
pub fn render_batch(records: &[GeneRecord]) -> String {
    records
        .iter()
        .map(|record| format!("{}\n\n", render_record(record)))
        .collect()
}

pub fn render_matches(matches: &[Value]) -> String {
    format!("{}\n", Value::Array(matches.to_vec()))
}

/// Diagnostic for a failed command. The process still exits normally.
pub fn report_failure(error: &GeneQueryError) {
    tracing::error!("❌ Command failed: {} (Kind: {:?})", error, error.kind());
    tracing::debug!("💡 Recovery suggestion: {}", error.recovery_suggestion());
    eprintln!("{}", error.user_friendly_message());
}

/// Reads back a block produced by [`render_record`]. Placeholders become `None`.
pub fn parse_record_block(block: &str) -> Option<GeneRecord> {
    let mut record = GeneRecord::default();
    let mut seen = false;

    for line in block.lines() {
        let Some((label, value)) = line.split_once(": ") else {
            continue;
        };
        let value = (value != placeholder(label)).then(|| value.to_string());
        match label {
            SYMBOL_LABEL => record.symbol = value,
            NAME_LABEL => record.name = value,
            ENTREZ_LABEL => record.entrezgene = value,
            _ => continue,
        }
        seen = true;
    }

    seen.then_some(record)
}
