use clap::{CommandFactory, Parser};
use gene_query::core::report::report_failure;
use gene_query::domain::model::Command;
use gene_query::utils::logger;
use gene_query::{CliConfig, LocalStorage, MyGeneClient, QueryDispatcher};

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let config = CliConfig::parse();

    // 初始化日誌
    logger::init_cli_logger(config.service.verbose);
    tracing::debug!("CLI config: {:?}", config);

    let Some(query_command) = config.command.clone() else {
        CliConfig::command().print_help()?;
        return Ok(());
    };

    let service_config = match config.service.resolve() {
        Ok(service_config) => service_config,
        Err(e) => {
            tracing::error!("❌ Configuration validation failed: {}", e);
            tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
            eprintln!("❌ {}", e.user_friendly_message());
            std::process::exit(1);
        }
    };
    tracing::debug!("Using gene service at {}", service_config.base_url);

    let client = MyGeneClient::from_config(&service_config);
    let dispatcher = QueryDispatcher::new(client, LocalStorage::new());

    let command = Command::from(query_command);
    match dispatcher.execute(&command).await {
        Ok(output) => print!("{}", output),
        Err(e) => report_failure(&e),
    }

    Ok(())
}
