use clap::Parser;
use gene_query::core::report::report_failure;
use gene_query::utils::logger;
use gene_query::{ExtractConfig, LocalStorage, MyGeneClient, QueryDispatcher};

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let config = ExtractConfig::parse();

    logger::init_cli_logger(config.service.verbose);
    tracing::debug!("CLI config: {:?}", config);

    let service_config = match config.service.resolve() {
        Ok(service_config) => service_config,
        Err(e) => {
            tracing::error!("❌ Configuration validation failed: {}", e);
            eprintln!("❌ {}", e.user_friendly_message());
            std::process::exit(1);
        }
    };

    let dispatcher = QueryDispatcher::new(
        MyGeneClient::from_config(&service_config),
        LocalStorage::new(),
    );

    match dispatcher.execute(&config.to_command()).await {
        Ok(output) => print!("{}", output),
        Err(e) => report_failure(&e),
    }

    Ok(())
}
