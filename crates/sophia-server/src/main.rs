//! Sophia Server CLI
//!
//! Starts the HTTP server for the conversational orchestrator.

use sophia_server::{config::ServerConfig, start_server, ServerError};
use std::env;
use std::process;

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

async fn run() -> Result<(), ServerError> {
    let args: Vec<String> = env::args().collect();

    let config = if args.len() > 2 && args[1] == "--config" {
        ServerConfig::from_file(&args[2])?
    } else if args.len() > 1 && args[1] == "--help" {
        print_help();
        process::exit(0);
    } else {
        eprintln!("Warning: No config file specified, using default configuration");
        eprintln!("Usage: sophia-server --config <path-to-config.toml>");
        eprintln!();
        ServerConfig::default_test_config()
    };

    start_server(config).await?;

    Ok(())
}

fn print_help() {
    println!("Sophia Server - Conversational graph-building assistant");
    println!();
    println!("USAGE:");
    println!("    sophia-server --config <path-to-config.toml>");
    println!();
    println!("OPTIONS:");
    println!("    --config <file>    Load configuration from TOML file");
    println!("    --help             Print this help message");
    println!();
    println!("CONFIGURATION:");
    println!("    bind_address       IP address to bind (default '127.0.0.1')");
    println!("    bind_port          Port number (default 5000)");
    println!("    [brain]            Orchestrator settings:");
    println!("      max_history                    messages kept per session (default 50)");
    println!("      max_snapshots                  graph snapshots kept per session (default 10)");
    println!("      model_name                     model recorded on suggestions");
    println!("      default_suggestion_confidence  confidence when none is given (default 0.7)");
    println!("      scope_content_ids_by_session   prefix content ids with the session id");
    println!("      session_idle_timeout_secs      reap idle sessions, 0 disables (default 0)");
    println!();
    println!("LOGGING:");
    println!("    Set RUST_LOG (e.g. RUST_LOG=debug) to change verbosity.");
    println!();
}
