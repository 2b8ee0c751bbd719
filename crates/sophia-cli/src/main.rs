//! Sophia CLI - talk to the graph-building assistant from a terminal.

use clap::Parser;
use sophia_brain::Brain;
use sophia_cli::{load_graph, repl, Cli, Command, Config, Formatter, ReplCommand, Session};
use tracing_subscriber::EnvFilter;

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run() -> sophia_cli::Result<()> {
    let cli = Cli::parse();

    // Library logs go to stderr and stay quiet unless RUST_LOG says otherwise
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let config = Config::load(cli.config.as_deref())?;

    let format = cli
        .format
        .map(Into::into)
        .unwrap_or(config.settings.format);
    let color_enabled = !cli.no_color && config.settings.color;
    let formatter = Formatter::new(format, color_enabled);

    let mut session = Session::new(Brain::new(config.brain.clone()), cli.session);
    if let Some(path) = &cli.graph {
        session.set_graph(Some(load_graph(path)?));
    }

    match cli.command {
        Some(Command::Ask(args)) => {
            let message = ReplCommand::Message(args.message.join(" "));
            if let Some(output) = session.execute(message, &formatter)? {
                println!("{}", output);
            }
        }
        None | Some(Command::Repl) => {
            repl::run_repl(&mut session, &formatter, config.settings.history_size)?;
        }
    }

    Ok(())
}
