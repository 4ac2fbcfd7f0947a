//! medassist: command-line health and medication assistant.
//!
//! Usage:
//!   medassist chat
//!   medassist ask "I have a headache and took Tylenol"
//!   medassist interaction aspirin ibuprofen
//!   medassist medication advil --age 8
//!   medassist medications
//!   medassist backends

use std::{
    io::{self, BufRead, Write},
    path::{Path, PathBuf},
    sync::Arc,
};

use clap::{Args, Parser, Subcommand};
use tracing::warn;
use tracing_subscriber::EnvFilter;

use medassist_audit::InMemoryJournal;
use medassist_backends::{
    available_backends, build_label_lookup, build_router, build_triage_service, AssistantConfig,
};
use medassist_contracts::{
    error::{AssistError, AssistResult},
    profile::UserProfile,
    session::BackendKind,
};
use medassist_core::{Assistant, Session};
use medassist_knowledge::{normalize, KnowledgeBase, DISCLAIMER};
use medassist_triage::KeywordTriage;

// ── CLI definition ────────────────────────────────────────────────────────────

/// medassist: general health and medication information, never a diagnosis.
#[derive(Parser)]
#[command(
    name = "medassist",
    about = "Health and medication information assistant",
    long_about = "Answers general health questions with triage-aware safety banners,\n\
                  medication details, and interaction checks. Not a substitute for\n\
                  professional medical advice."
)]
struct Cli {
    /// Path to a TOML configuration file.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Generation backend: local, openai, anthropic or groq.
    #[arg(long, global = true)]
    backend: Option<String>,

    #[command(flatten)]
    profile: ProfileArgs,

    #[command(subcommand)]
    command: Command,
}

#[derive(Args)]
struct ProfileArgs {
    /// Your name.
    #[arg(long, global = true, default_value = "Guest")]
    name: String,

    /// Your age in years (0 to 120).
    #[arg(long, global = true, default_value_t = 30)]
    age: u32,

    /// Medical conditions, e.g. "kidney disease, ulcer".
    #[arg(long, global = true, default_value = "")]
    conditions: String,
}

impl ProfileArgs {
    fn to_profile(&self) -> UserProfile {
        let mut profile = UserProfile {
            name: self.name.clone(),
            conditions: self.conditions.clone(),
            ..UserProfile::default()
        };
        profile.set_age(self.age);
        profile
    }
}

#[derive(Subcommand)]
enum Command {
    /// Interactive chat session.
    Chat {
        /// Write the session journal as JSON to this file on exit.
        #[arg(long)]
        journal: Option<PathBuf>,
    },
    /// Ask a single question.
    Ask {
        #[arg(required = true, num_args = 1..)]
        question: Vec<String>,
    },
    /// Check two medications for known interactions.
    Interaction { first: String, second: String },
    /// Show details for one medication.
    Medication { name: String },
    /// List the medications in the knowledge base.
    Medications,
    /// List the generation backends available with this configuration.
    Backends,
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() {
    // Set RUST_LOG=debug for verbose output.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_target(false)
        .compact()
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(&cli) {
        eprintln!("medassist error: {}", e);
        std::process::exit(1);
    }
}

fn run(cli: &Cli) -> AssistResult<()> {
    let config = AssistantConfig::load(cli.config.as_deref())?.with_env();

    match &cli.command {
        Command::Medications => list_medications(&load_knowledge(&config)?),
        Command::Backends => list_backends(&config),
        Command::Interaction { first, second } => {
            check_interaction(&load_knowledge(&config)?, first, second)
        }
        Command::Medication { name } => {
            let (assistant, _) = build_assistant(&config)?;
            let session = Session::new(cli.profile.to_profile());
            match assistant.medication_details(&session, name) {
                Some(details) => println!("{details}\n{DISCLAIMER}"),
                None => println!("I don't have information about '{}'.", normalize(name)),
            }
            Ok(())
        }
        Command::Ask { question } => {
            let (assistant, _) = build_assistant(&config)?;
            let mut session = new_session(cli, &config)?;
            println!("{}", assistant.respond(&mut session, &question.join(" ")));
            assistant.end_session(&session);
            Ok(())
        }
        Command::Chat { journal: journal_path } => {
            let (assistant, journal) = build_assistant(&config)?;
            let mut session = new_session(cli, &config)?;
            chat(&assistant, &mut session)?;
            assistant.end_session(&session);
            if let Some(path) = journal_path {
                write_journal(&journal, &session, path)?;
            }
            Ok(())
        }
    }
}

// ── Wiring ────────────────────────────────────────────────────────────────────

fn load_knowledge(config: &AssistantConfig) -> AssistResult<KnowledgeBase> {
    match &config.knowledge_path {
        Some(path) => KnowledgeBase::from_file(path),
        None => KnowledgeBase::builtin(),
    }
}

fn build_assistant(config: &AssistantConfig) -> AssistResult<(Assistant, InMemoryJournal)> {
    let knowledge = Arc::new(load_knowledge(config)?);
    let triage = match &config.triage_policy_path {
        Some(path) => KeywordTriage::from_file(path, knowledge.clone())?,
        None => KeywordTriage::builtin(knowledge.clone())?,
    };
    let journal = InMemoryJournal::new();

    let mut assistant = Assistant::new(
        knowledge,
        Box::new(triage),
        build_router(config)?,
        Box::new(journal.clone()),
    );
    if let Some(service) = build_triage_service(config)? {
        assistant = assistant.with_triage_service(service);
    }
    if let Some(labels) = build_label_lookup(config)? {
        assistant = assistant.with_label_lookup(labels);
    }
    Ok((assistant, journal))
}

/// The `--backend` flag wins over the config file.
fn selected_backend(cli: &Cli, config: &AssistantConfig) -> AssistResult<Option<BackendKind>> {
    match &cli.backend {
        Some(id) => BackendKind::from_id(id).map(Some).ok_or_else(|| AssistError::ConfigError {
            reason: format!("unknown backend '{}'", id),
        }),
        None => config.selected_backend(),
    }
}

fn new_session(cli: &Cli, config: &AssistantConfig) -> AssistResult<Session> {
    let mut session = Session::new(cli.profile.to_profile());
    if let Some(kind) = selected_backend(cli, config)? {
        if !available_backends(config).contains(&kind) {
            warn!(backend = %kind, "selected backend has no credentials, falling back to local");
        }
        session.select_backend(kind);
    }
    Ok(session)
}

// ── Commands ──────────────────────────────────────────────────────────────────

fn list_medications(knowledge: &KnowledgeBase) -> AssistResult<()> {
    for name in knowledge.medication_names() {
        println!("{name}");
    }
    Ok(())
}

fn list_backends(config: &AssistantConfig) -> AssistResult<()> {
    let selected = config.selected_backend()?;
    for (idx, kind) in available_backends(config).into_iter().enumerate() {
        let marker = match selected {
            Some(s) if s == kind => " (selected)",
            None if idx == 0 => " (default)",
            _ => "",
        };
        println!("{:<10} {}{}", kind.id(), kind.label(), marker);
    }
    Ok(())
}

fn check_interaction(knowledge: &KnowledgeBase, first: &str, second: &str) -> AssistResult<()> {
    println!("{}", knowledge.check_interaction(first, second).message);
    Ok(())
}

fn chat(assistant: &Assistant, session: &mut Session) -> AssistResult<()> {
    println!("medassist: describe your symptoms or ask about a medication.");
    println!("Commands: /backend <id>, /backends, /quit");
    println!();

    let stdin = io::stdin();
    let mut stdout = io::stdout();
    loop {
        print!("{}> ", session.profile.name);
        stdout.flush().map_err(io_error)?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line).map_err(io_error)? == 0 {
            break;
        }
        let line = line.trim();

        match line {
            "" => continue,
            "/quit" | "/exit" => break,
            "/backends" => {
                for kind in assistant.router().available() {
                    println!("  {:<10} {}", kind.id(), kind.label());
                }
            }
            _ if line.starts_with("/backend ") => {
                let id = line.trim_start_matches("/backend ").trim();
                match BackendKind::from_id(id) {
                    Some(kind) => {
                        session.select_backend(kind);
                        println!("Using {}.", kind.label());
                    }
                    None => println!("Unknown backend '{id}'."),
                }
            }
            _ => println!("\n{}\n", assistant.respond(session, line)),
        }
    }
    Ok(())
}

fn write_journal(journal: &InMemoryJournal, session: &Session, path: &Path) -> AssistResult<()> {
    if !journal.verify_integrity() {
        warn!(session_id = %session.id(), "journal failed integrity check");
    }
    let Some(log) = journal.take_sealed(session.id()) else {
        return Ok(());
    };
    let json = serde_json::to_string_pretty(&log).map_err(|e| AssistError::JournalWriteFailed {
        reason: format!("failed to serialize journal: {}", e),
    })?;
    std::fs::write(path, json).map_err(|e| AssistError::JournalWriteFailed {
        reason: format!("failed to write journal '{}': {}", path.display(), e),
    })
}

fn io_error(e: io::Error) -> AssistError {
    AssistError::Io { reason: e.to_string() }
}
