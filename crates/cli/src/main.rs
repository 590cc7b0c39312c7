mod cli;

use clap::Parser;

use bibliotek_api::config::Settings;
use bibliotek_lookup::OpenLibraryClient;

use crate::cli::Commands;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    let cli = cli::Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    match cli.command {
        Commands::Serve { config } => {
            let settings = Settings::load(config.as_deref())?;
            tracing::info!(
                host = %settings.server.host,
                port = settings.server.port,
                "starting catalog service"
            );
            bibliotek_api::serve(settings).await?;
        }
        Commands::Search { title, author } => {
            let client = OpenLibraryClient::new();
            match client.search(&title, author.as_deref()).await? {
                Some(info) => println!("{}", serde_json::to_string_pretty(&info)?),
                None => println!("no results for '{title}'"),
            }
        }
    }

    Ok(())
}
