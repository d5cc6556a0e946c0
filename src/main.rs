use std::net::SocketAddr;
use std::path::Path;

use anyhow::Context;
use clap::{Parser, Subcommand};

use relfinder::api::{AppState, create_router};
use relfinder::config::CONFIG;
use relfinder::data_models::FormInput;
use relfinder::lookup::WikiTreeClient;
use relfinder::render;
use relfinder::widget::Widget;

#[derive(Parser, Debug)]
#[command(name = "relfinder", version, about = "Famous Relative Finder")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Serve the widget page (default)
    Serve {
        #[arg(long, help = "Address to listen on (defaults to RELFINDER_ADDR)")]
        addr: Option<SocketAddr>,
    },
    /// Run one search from the terminal
    Search {
        /// First and last name
        full_name: String,
        #[arg(long)]
        birth_year: String,
        #[arg(long)]
        birth_place: String,
        #[arg(long, help = "Print the final widget state as JSON")]
        json: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .with_target(true)
        .init();

    let cli = Cli::parse();
    match cli.command.unwrap_or(Commands::Serve { addr: None }) {
        Commands::Serve { addr } => serve(addr.unwrap_or(CONFIG.bind_addr)).await,
        Commands::Search {
            full_name,
            birth_year,
            birth_place,
            json,
        } => search(FormInput::new(full_name, birth_year, birth_place), json).await,
    }
}

async fn serve(addr: SocketAddr) -> anyhow::Result<()> {
    let host_path = Path::new(&CONFIG.static_dir).join("index.html");
    let host_page = tokio::fs::read_to_string(&host_path)
        .await
        .with_context(|| format!("failed to read host page {}", host_path.display()))?;

    // fail at startup rather than on every request
    render::mount(&host_page, &CONFIG.container_id, "")?;

    let router = create_router(AppState::from_config(host_page), &CONFIG.static_dir);
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    tracing::info!("serving on http://{}", listener.local_addr()?);
    tracing::info!("lookup endpoint: {}", CONFIG.lookup_endpoint);

    axum::serve(listener, router)
        .with_graceful_shutdown(async {
            tokio::signal::ctrl_c().await.ok();
        })
        .await?;
    Ok(())
}

async fn search(input: FormInput, json: bool) -> anyhow::Result<()> {
    let widget = Widget::new(WikiTreeClient::from_config(), CONFIG.failure_policy);
    let state = widget.submit(&input).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&state)?);
    } else {
        println!("{}", render::render_text(&state));
    }
    Ok(())
}
