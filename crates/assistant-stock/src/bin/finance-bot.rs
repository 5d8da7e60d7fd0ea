//! Finance Assistant CLI
//!
//! An interactive command-line interface for stock questions.
//!
//! # Usage
//!
//! ```bash
//! # Set up environment variables
//! export OPENAI_API_KEY="sk-..."
//! export OPENAI_MODEL="gpt-3.5-turbo"
//!
//! # Run the bot
//! cargo run --bin finance-bot -p assistant-stock
//! ```

use assistant_llm::providers::OpenAIProvider;
use assistant_stock::{Assistant, AssistantConfig, TurnOutcome, YahooMarketData, build_catalog};
use std::env;
use std::io::{self, BufRead, Write};
use std::sync::Arc;

fn print_banner() {
    println!(
        r"
╔══════════════════════════════════════════════════════════════╗
║                   Finance Assistant Bot                      ║
║                                                              ║
║  Ask about stocks in natural language:                       ║
║    What is AAPL trading at?                                  ║
║    Show me the 50 day moving average for MSFT                ║
║    Is TSLA overbought right now?                             ║
║    Plot NVDA over the last year                              ║
║                                                              ║
║  /exit to quit                                               ║
╚══════════════════════════════════════════════════════════════╝
"
    );
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            env::var("RUST_LOG").unwrap_or_else(|_| "warn,assistant_stock=info".to_string()),
        )
        .init();

    print_banner();

    let provider = Arc::new(OpenAIProvider::from_env()?);
    let config = AssistantConfig::from_env()?;

    println!("Configuration:");
    println!("  API Base: {}", provider.config().api_base);
    println!("  Model: {}", config.model);
    println!("  Chart path: {}", config.chart_path.display());
    println!();

    let market = Arc::new(YahooMarketData::new());
    let catalog = build_catalog(market, config.chart_path.clone());
    let mut assistant = Assistant::new(provider, catalog, config);

    println!("Ready!\n");

    // Run REPL
    let stdin = io::stdin();
    let mut stdout = io::stdout();

    loop {
        print!("you> ");
        stdout.flush()?;

        let mut input = String::new();
        match stdin.lock().read_line(&mut input) {
            Ok(0) => {
                // EOF
                println!("\nGoodbye!");
                break;
            }
            Ok(_) => {}
            Err(e) => {
                eprintln!("Error reading input: {e}");
                continue;
            }
        }

        let input = input.trim();
        if input.is_empty() {
            continue;
        }
        if input == "/exit" {
            println!("Goodbye!");
            break;
        }

        match assistant.handle(input).await {
            Ok(TurnOutcome::Reply(text)) => {
                println!("{text}\n");
            }
            Ok(TurnOutcome::Chart(path)) => {
                println!("Chart saved to {}\n", path.display());
            }
            Err(e) => {
                eprintln!("Error: {e}\n");
            }
        }
    }

    Ok(())
}
