use crate::config::ServiceConfig;
use crate::domain::model::Command;
use crate::utils::error::Result;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Options shared by both binaries.
#[derive(Debug, Clone, Args)]
pub struct ServiceArgs {
    /// Override the gene service root, e.g. https://mygene.info/v3
    #[arg(long, global = true)]
    pub base_url: Option<String>,

    /// Path to a TOML configuration file
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

impl ServiceArgs {
    pub fn resolve(&self) -> Result<ServiceConfig> {
        ServiceConfig::resolve(self.config.as_deref(), self.base_url.as_deref())
    }
}

#[derive(Debug, Clone, Parser)]
#[command(name = "gene-query")]
#[command(about = "Retrieve gene information from MyGene.info")]
pub struct CliConfig {
    #[command(flatten)]
    pub service: ServiceArgs,

    #[command(subcommand)]
    pub command: Option<QueryCommand>,
}

#[derive(Debug, Clone, Subcommand)]
pub enum QueryCommand {
    /// Perform a single gene query
    Single {
        /// Gene symbol to query
        #[arg(long)]
        gene_symbol: Option<String>,
    },
    /// Perform a batch gene query
    Batch {
        /// Path to a txt file containing gene symbols
        #[arg(short, long)]
        text_file: Option<PathBuf>,
    },
}

impl From<QueryCommand> for Command {
    fn from(command: QueryCommand) -> Self {
        match command {
            QueryCommand::Single { gene_symbol } => Command::Single { gene_symbol },
            QueryCommand::Batch { text_file } => Command::Batch { text_file },
        }
    }
}

#[derive(Debug, Clone, Parser)]
#[command(name = "gene-extract")]
#[command(about = "Look up a gene and list every symbol found in the raw response")]
pub struct ExtractConfig {
    #[command(flatten)]
    pub service: ServiceArgs,

    /// Gene symbol to query
    #[arg(long)]
    pub gene_symbol: Option<String>,
}

impl ExtractConfig {
    pub fn to_command(&self) -> Command {
        Command::Extract {
            gene_symbol: self.gene_symbol.clone(),
        }
    }
}
