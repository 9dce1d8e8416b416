use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "fortune")]
#[command(about = "Conversational fortune-telling server", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the HTTP API
    Serve {
        #[arg(short, long, default_value = "5000")]
        port: u16,
        #[arg(short = 'H', long, default_value = "127.0.0.1")]
        host: String,
    },
    /// Create or upgrade the PostgreSQL schema
    Migrate,
    /// Insert sample history for a user
    SeedDemo {
        #[arg(short, long)]
        user_id: String,
    },
}

pub(crate) fn get_database_url() -> Option<String> {
    std::env::var("DATABASE_URL").ok().filter(|url| !url.trim().is_empty())
}

pub(crate) fn require_database_url() -> Result<String> {
    get_database_url()
        .ok_or_else(|| anyhow::anyhow!("DATABASE_URL environment variable must be set"))
}

pub(crate) fn get_api_key() -> Result<String> {
    std::env::var("FORTUNE_LLM_API_KEY")
        .or_else(|_| std::env::var("OPENAI_API_KEY"))
        .map_err(|_| anyhow::anyhow!("FORTUNE_LLM_API_KEY or OPENAI_API_KEY must be set"))
}

pub(crate) fn get_base_url() -> String {
    std::env::var("FORTUNE_LLM_API_URL")
        .unwrap_or_else(|_| fortune_llm::DEFAULT_BASE_URL.to_owned())
}

pub(crate) fn get_model() -> String {
    std::env::var("FORTUNE_LLM_MODEL").unwrap_or_else(|_| fortune_llm::DEFAULT_MODEL.to_owned())
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("info".parse()?))
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Serve { port, host } => commands::serve::run(port, host).await?,
        Commands::Migrate => commands::migrate::run().await?,
        Commands::SeedDemo { user_id } => commands::seed_demo::run(&user_id).await?,
    }

    Ok(())
}
