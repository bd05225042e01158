use std::env;
use std::sync::Arc;

use clap::Parser;
use dotenvy::dotenv;

use crm_admin::cli::{self, Cli};
use crm_admin::models::config::ClientConfig;
use crm_admin::repository::HttpRepository;
use crm_admin::session::{FileSessionStore, InMemorySessionStore, SessionStore};

#[tokio::main]
async fn main() {
    dotenv().ok(); // Load .env file
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    let cli = Cli::parse();

    // Select config profile (defaults to `local`).
    let app_env = env::var("APP_ENV").unwrap_or_else(|_| "local".into());

    let mut client_config = match ClientConfig::load(&app_env) {
        Ok(client_config) => client_config,
        Err(err) => {
            log::error!("Error loading client config: {}", err);
            std::process::exit(1);
        }
    };

    if let Some(api_url) = cli.api_url {
        client_config.api_url = api_url;
    }

    let session: Arc<dyn SessionStore> = match &client_config.session_file {
        Some(path) => Arc::new(FileSessionStore::new(path)),
        None => Arc::new(InMemorySessionStore::new()),
    };

    let repo = match HttpRepository::new(&client_config, session) {
        Ok(repo) => repo,
        Err(err) => {
            log::error!("Failed to build API client: {err}");
            std::process::exit(1);
        }
    };

    if let Err(err) = cli::run(cli.command, &repo).await {
        log::error!("{err}");
        std::process::exit(1);
    }
}
