use anyhow::Result;
use articlenest::api;
use articlenest::config::Config;
use articlenest::provider::TavilyClient;
use articlenest::ui::{HttpGateway, Level, Notification, Notifier, SearchSession};
use clap::{Parser, Subcommand};
use std::sync::Arc;

#[derive(Parser)]
#[command(name = "articlenest", about = "Search gateway for the ArticleNest UI")]
struct Cli {
    #[arg(long, global = true, default_value = "info")]
    log_level: tracing::Level,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run the search gateway
    Serve {
        #[arg(long)]
        host: Option<String>,
        #[arg(long)]
        port: Option<u16>,
        /// Origin allowed by CORS, overrides FRONTEND_URI
        #[arg(long)]
        allowed_origin: Option<String>,
    },
    /// Send one query to a running gateway and print the result cards
    Search {
        query: String,
        #[arg(long, env = "GATEWAY_URL", default_value = "http://localhost:8080")]
        gateway: String,
    },
}

struct StderrNotifier;

impl Notifier for StderrNotifier {
    fn notify(&mut self, notification: Notification) {
        match notification.level {
            Level::Success => eprintln!("✔ {}", notification.message),
            Level::Error => eprintln!("✘ {}", notification.message),
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_max_level(cli.log_level)
        .with_target(true)
        .init();

    match cli.command {
        Command::Serve {
            host,
            port,
            allowed_origin,
        } => {
            let mut overrides = Vec::new();
            if let Some(host) = host {
                overrides.push(("HOST", host));
            }
            if let Some(port) = port {
                overrides.push(("PORT", port.to_string()));
            }
            if let Some(origin) = allowed_origin {
                overrides.push(("FRONTEND_URI", origin));
            }
            let config = Config::from_env_with(&overrides)?;

            let provider = TavilyClient::new(config.tavily_api_key.clone(), config.tavily.clone());
            api::serve(&config, Arc::new(provider)).await?;
        }
        Command::Search { query, gateway } => {
            let gateway = HttpGateway::new(&gateway)?;
            let mut session = SearchSession::new(gateway, StderrNotifier);
            session.set_query(query);
            session.submit().await;

            for item in &session.state().results {
                println!("{}\n{}\n{}\n", item.title, item.preview(), item.url);
            }
        }
    }
    Ok(())
}
