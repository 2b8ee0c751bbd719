//! Interactive REPL (Read-Eval-Print Loop) mode.
//!
//! Plain lines go to the orchestrator as messages; lines starting with `/`
//! are local commands.

use crate::config::Config;
use crate::error::{CliError, Result};
use crate::output::Formatter;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use sophia_brain::Brain;
use sophia_domain::GraphDocument;
use std::fs;
use std::path::{Path, PathBuf};

/// A parsed REPL line.
#[derive(Debug, Clone, PartialEq)]
pub enum ReplCommand {
    /// Send text to the orchestrator
    Message(String),
    /// Load a graph document used for later messages
    Graph(PathBuf),
    /// Stop sending a graph document
    NoGraph,
    /// Show the conversation summary
    Summary,
    /// Show provenance statistics
    Stats,
    /// List capabilities
    Capabilities,
    /// Clear the conversation
    Clear,
    /// Review tracked content
    Review {
        /// Content id
        content_id: String,
        /// Rating, validated by the ledger
        rating: u8,
        /// Free-form notes
        notes: String,
    },
    /// Show help
    Help,
    /// Leave the REPL
    Exit,
}

/// Parse one non-empty REPL line.
pub fn parse_repl_command(line: &str) -> Result<ReplCommand> {
    let line = line.trim();
    let Some(command) = line.strip_prefix('/') else {
        return Ok(ReplCommand::Message(line.to_string()));
    };

    let mut parts = command.split_whitespace();
    let name = parts.next().unwrap_or_default();
    let args: Vec<&str> = parts.collect();

    match name {
        "exit" | "quit" | "q" => Ok(ReplCommand::Exit),
        "help" | "?" => Ok(ReplCommand::Help),
        "graph" => match args.first() {
            Some(path) => Ok(ReplCommand::Graph(PathBuf::from(path))),
            None => Err(CliError::InvalidInput("Usage: /graph <file>".to_string())),
        },
        "nograph" => Ok(ReplCommand::NoGraph),
        "summary" => Ok(ReplCommand::Summary),
        "stats" => Ok(ReplCommand::Stats),
        "capabilities" => Ok(ReplCommand::Capabilities),
        "clear" => Ok(ReplCommand::Clear),
        "review" => parse_review_command(&args),
        _ => Err(CliError::InvalidInput(format!(
            "Unknown command: /{}. Type /help for available commands.",
            name
        ))),
    }
}

fn parse_review_command(args: &[&str]) -> Result<ReplCommand> {
    let usage = || CliError::InvalidInput("Usage: /review <content_id> <rating 1-5> [notes]".to_string());

    let content_id = args.first().ok_or_else(usage)?;
    let rating = args
        .get(1)
        .and_then(|r| r.parse::<u8>().ok())
        .ok_or_else(usage)?;

    Ok(ReplCommand::Review {
        content_id: content_id.to_string(),
        rating,
        notes: args.get(2..).map(|rest| rest.join(" ")).unwrap_or_default(),
    })
}

/// Read a graph document from a JSON file.
pub fn load_graph(path: &Path) -> Result<GraphDocument> {
    let contents = fs::read_to_string(path)?;
    Ok(GraphDocument::from_json(&contents)?)
}

/// Orchestrator plus the session and graph the terminal is bound to.
pub struct Session {
    brain: Brain,
    session_id: String,
    graph: Option<GraphDocument>,
}

impl Session {
    /// Bind to `session_id`, or to a freshly created session
    pub fn new(brain: Brain, session_id: Option<String>) -> Self {
        let session_id = match session_id {
            Some(id) => {
                brain.sessions().get_or_create(&id);
                id
            }
            None => brain.create_session(),
        };

        Self {
            brain,
            session_id,
            graph: None,
        }
    }

    /// Session id in use
    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    /// Graph document sent with each message
    pub fn graph(&self) -> Option<&GraphDocument> {
        self.graph.as_ref()
    }

    /// Replace the graph document
    pub fn set_graph(&mut self, graph: Option<GraphDocument>) {
        self.graph = graph;
    }

    /// The orchestrator
    pub fn brain(&self) -> &Brain {
        &self.brain
    }

    /// Run one command, returning text to print; `None` means exit
    pub fn execute(&mut self, command: ReplCommand, formatter: &Formatter) -> Result<Option<String>> {
        let output = match command {
            ReplCommand::Exit => return Ok(None),
            ReplCommand::Help => help_text(),
            ReplCommand::Message(text) => {
                let response = self
                    .brain
                    .process(&self.session_id, &text, self.graph.as_ref())?;
                formatter.format_response(&response)?
            }
            ReplCommand::Graph(path) => {
                let graph = load_graph(&path)?;
                let message = format!(
                    "Loaded {} ({} nodes, {} links)",
                    path.display(),
                    graph.nodes.len(),
                    graph.links.len()
                );
                self.graph = Some(graph);
                formatter.success(&message)
            }
            ReplCommand::NoGraph => {
                self.graph = None;
                formatter.info("Messages will be sent without a graph")
            }
            ReplCommand::Summary => {
                formatter.format_summary(&self.brain.context_summary(&self.session_id)?)?
            }
            ReplCommand::Stats => formatter.format_stats(&self.brain.provenance_stats())?,
            ReplCommand::Capabilities => formatter.format_capabilities(self.brain.capabilities())?,
            ReplCommand::Clear => {
                self.brain.clear_context(&self.session_id)?;
                formatter.success("Conversation cleared")
            }
            ReplCommand::Review {
                content_id,
                rating,
                notes,
            } => {
                let level = self
                    .brain
                    .review_content(&content_id, "cli", rating, &notes)?;
                let score = self.brain.ledger().quality_score(&content_id);
                formatter.review_recorded(&content_id, level, score)
            }
        };
        Ok(Some(output))
    }
}

/// Run the interactive REPL.
pub fn run_repl(session: &mut Session, formatter: &Formatter, history_size: usize) -> Result<()> {
    println!(
        "{}",
        formatter.info("Sophia REPL - Type /help for commands, /exit to quit")
    );
    println!("{}", formatter.info(&format!("Session: {}", session.session_id())));
    println!();

    let editor_config = rustyline::Config::builder()
        .max_history_size(history_size)?
        .build();
    let mut editor = DefaultEditor::with_config(editor_config)?;

    let history_path = get_history_path()?;
    let _ = editor.load_history(&history_path);

    loop {
        let prompt = if session.graph().is_some() {
            "sophia [graph]> "
        } else {
            "sophia> "
        };

        match editor.readline(prompt) {
            Ok(line) => {
                let line = line.trim();
                if line.is_empty() {
                    continue;
                }

                editor.add_history_entry(line).ok();

                match parse_repl_command(line).and_then(|cmd| session.execute(cmd, formatter)) {
                    Ok(Some(output)) => println!("{}\n", output),
                    Ok(None) => {
                        println!("{}", formatter.info("Goodbye!"));
                        break;
                    }
                    Err(e) => eprintln!("{}", formatter.error(&e.to_string())),
                }
            }
            Err(ReadlineError::Interrupted) => {
                println!("{}", formatter.info("Use /exit to quit"));
            }
            Err(ReadlineError::Eof) => {
                break;
            }
            Err(err) => {
                eprintln!("{}", formatter.error(&format!("Error: {}", err)));
                break;
            }
        }
    }

    editor.save_history(&history_path).ok();

    Ok(())
}

fn get_history_path() -> Result<PathBuf> {
    let dir = Config::dir()?;
    fs::create_dir_all(&dir)?;
    Ok(dir.join("history.txt"))
}

fn help_text() -> String {
    [
        "Type a message to talk to Sophia, or use a command:",
        "",
        "  /graph <file>                   - Send this graph (JSON) with later messages",
        "  /nograph                        - Stop sending a graph",
        "  /summary                        - Conversation summary",
        "  /stats                          - Provenance statistics",
        "  /capabilities                   - What Sophia can do",
        "  /clear                          - Clear the conversation",
        "  /review <id> <rating> [notes]   - Rate suggested content (1-5)",
        "  /help, /?                       - Show this help",
        "  /exit, /quit, /q                - Exit REPL",
    ]
    .join("\n")
}
