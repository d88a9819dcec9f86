use legalens::analysis::AnalysisMode;
use legalens::api;
use legalens::commands::{self, ReplSession};
use legalens::config::AppConfig;
use legalens::providers::gemini::GeminiProvider;
use legalens::providers::traits::CompletionProvider;

use clap::Parser;
use colored::Colorize;
use dotenv::dotenv;
use rustyline::error::ReadlineError;
use rustyline::history::DefaultHistory;
use rustyline::Editor;
use std::net::SocketAddr;
use std::path::PathBuf;
use tokio::net::TcpListener;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Gemini API key; falls back to GEMINI_API_KEY
    #[arg(short, long)]
    api_key: Option<String>,

    /// Run the web UI/API instead of the interactive console
    #[arg(long)]
    serve: bool,

    #[arg(long, default_value = "3000")]
    port: u16,

    /// Document to load on startup (console mode)
    #[arg(long)]
    document: Option<PathBuf>,

    /// Analysis mode: quick or detailed
    #[arg(long, default_value = "quick")]
    mode: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();
    env_logger::init();

    let args = Args::parse();

    let config = AppConfig::from_env_with_key(args.api_key.clone())?;
    let (mode, _) = legalens::analysis::lookup(&args.mode)?;

    if args.serve {
        return serve(config, args.port).await;
    }

    run_console(config, mode, args.document).await
}

async fn serve(config: AppConfig, port: u16) -> anyhow::Result<()> {
    let app = api::create_api(config);
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let listener = TcpListener::bind(addr).await?;

    println!(
        "🌐 {} listening on {}",
        "Legalens".bright_cyan(),
        format!("http://{}", addr).bright_yellow()
    );

    axum::serve(listener, app).await?;
    Ok(())
}

async fn run_console(
    config: AppConfig,
    mode: AnalysisMode,
    document: Option<PathBuf>,
) -> anyhow::Result<()> {
    println!(
        "{}",
        "⚖️  Legalens — document Q&A and post drafting".bright_cyan()
    );
    println!("Type 'help' for commands, 'exit' to quit.\n");

    let provider: Box<dyn CompletionProvider + Send + Sync> =
        Box::new(GeminiProvider::from_config(&config));
    let mut session = ReplSession::new(provider, config, mode);

    if let Some(path) = document {
        if let Err(e) = session.load_document(&path).await {
            println!("{}", format!("❌ {}", e).bright_red());
        }
    }

    let mut rl: Editor<(), DefaultHistory> = Editor::new()?;

    loop {
        match rl.readline("legalens> ") {
            Ok(line) => {
                let line = line.trim();
                if line.is_empty() {
                    continue;
                }
                let _ = rl.add_history_entry(line);

                if line == "exit" || line == "quit" {
                    break;
                }

                if let Err(e) = commands::handle_command(line, &mut session).await {
                    println!("{}", format!("❌ {}", e).bright_red());
                }
            }
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => break,
            Err(e) => {
                eprintln!("Input error: {}", e);
                break;
            }
        }
    }

    if let Some(chain) = session.chain.take() {
        chain.teardown().await;
    }
    println!("👋 Bye.");
    Ok(())
}
