//! CLI entrypoint for colloquy
//!
//! Wires the layers together with dependency injection: config file +
//! environment for the gateway credential, a guest ledger for budget
//! enforcement, a console sink for incremental output.

use anyhow::{Context, Result, bail};
use async_trait::async_trait;
use clap::Parser;
use colloquy_application::{
    ApiCredential, DebateOrchestrator, HaltReason, Ledger, LedgerAccountant, MessageSink,
    RunStatus, SessionConfig, SinkError, TranscriptLogger, UsageAccountant,
};
use colloquy_domain::{
    AccountingMode, AgentConfig, AgentId, ConversationMessage, ConversationTone, ExpertSettings,
    Identity, Model, PersonalityIntensity, Roster, Scenario, Speaker, Topic, TurnOrder,
};
use colloquy_infrastructure::{
    ConfigLoader, FileConfig, GuestLedger, JsonlTranscriptLogger, OpenRouterGateway,
};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Multi-agent AI debate engine
#[derive(Parser)]
#[command(name = "colloquy", version, about)]
struct Cli {
    /// Debate topic
    topic: Option<String>,

    /// Agent spec: "vendor/model" or "vendor/model=persona text".
    /// Repeat up to three times (positions A, B, C).
    #[arg(short, long = "agent")]
    agent: Vec<String>,

    /// Number of rounds
    #[arg(short, long)]
    rounds: Option<u32>,

    /// Turn order: sequential, random, or popcorn
    #[arg(short, long)]
    order: Option<TurnOrder>,

    /// Scenario: debate, brainstorm, or panel
    #[arg(long)]
    scenario: Option<Scenario>,

    /// Accounting mode: credit or tokens
    #[arg(long)]
    accounting: Option<AccountingMode>,

    /// Budget for this session (credits or tokens, per accounting mode)
    #[arg(long)]
    budget: Option<u64>,

    /// Human message delivered after the configured rounds
    #[arg(long)]
    interject: Option<String>,

    /// Sampling temperature override (enables expert settings)
    #[arg(long)]
    temperature: Option<f32>,

    /// Conversation tone: cordial, neutral, or spirited
    #[arg(long)]
    tone: Option<String>,

    /// Agreement bias, 0 (contrarian) to 100 (agreeable)
    #[arg(long)]
    agreement_bias: Option<u8>,

    /// Persona intensity: subtle, moderate, or strong
    #[arg(long)]
    intensity: Option<String>,

    /// Explicit config file path
    #[arg(long)]
    config: Option<PathBuf>,

    /// Skip config files and use built-in defaults
    #[arg(long)]
    no_config: bool,

    /// Write a JSONL transcript to this path
    #[arg(long)]
    transcript: Option<PathBuf>,

    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress the banner
    #[arg(short, long)]
    quiet: bool,
}

/// Sink that prints each message as it completes.
struct ConsoleSink;

#[async_trait]
impl MessageSink for ConsoleSink {
    async fn deliver(&self, message: &ConversationMessage) -> Result<(), SinkError> {
        let tag = match message.speaker {
            Speaker::Agent(id) => format!("{} ({})", message.display_name, id),
            Speaker::Human => message.display_name.clone(),
        };
        println!("\n--- round {} | {} ---", message.round, tag);
        println!("{}", message.message);
        if message.fallback_used
            && let Some(original) = &message.original_model
        {
            println!(
                "(served by {} instead of {})",
                message.model.as_ref().map(Model::as_str).unwrap_or("?"),
                original
            );
        }
        Ok(())
    }
}

const DEFAULT_PERSONAS: [&str; 3] = [
    "You are an optimist who argues from opportunity and upside.",
    "You are a skeptic who stress-tests claims and hunts for weak evidence.",
    "You are a pragmatist who cares about what actually works in practice.",
];

/// Parse one --agent spec into a config for the given position.
fn parse_agent(spec: &str, position: usize, default_model: &str) -> Result<AgentConfig> {
    let id = AgentId::first(3)
        .get(position)
        .copied()
        .context("at most three agents")?;
    let (model_str, persona) = match spec.split_once('=') {
        Some((model, persona)) => (model.trim(), persona.trim().to_string()),
        None => (spec.trim(), DEFAULT_PERSONAS[position].to_string()),
    };
    let model = if model_str.is_empty() {
        Model::new(default_model)
    } else {
        Model::new(model_str)
    };
    Ok(AgentConfig::new(id, model, persona))
}

fn expert_settings(cli: &Cli) -> Result<Option<ExpertSettings>> {
    if cli.temperature.is_none()
        && cli.tone.is_none()
        && cli.agreement_bias.is_none()
        && cli.intensity.is_none()
    {
        return Ok(None);
    }
    let defaults = ExpertSettings::default();
    let tone = match cli.tone.as_deref() {
        None => defaults.conversation_tone,
        Some("cordial") => ConversationTone::Cordial,
        Some("neutral") => ConversationTone::Neutral,
        Some("spirited") => ConversationTone::Spirited,
        Some(other) => bail!("unknown tone: {other}"),
    };
    let intensity = match cli.intensity.as_deref() {
        None => defaults.personality_intensity,
        Some("subtle") => PersonalityIntensity::Subtle,
        Some("moderate") => PersonalityIntensity::Moderate,
        Some("strong") => PersonalityIntensity::Strong,
        Some(other) => bail!("unknown intensity: {other}"),
    };
    Ok(Some(ExpertSettings::new(
        tone,
        cli.agreement_bias.unwrap_or(defaults.agreement_bias),
        intensity,
        cli.temperature.unwrap_or(defaults.temperature),
    )))
}

fn print_status(status: &RunStatus) {
    match status {
        RunStatus::Complete => println!("\nConversation complete."),
        RunStatus::Halted(HaltReason::BudgetExhausted { remaining }) => {
            println!("\nConversation stopped: budget exhausted ({remaining} remaining).");
        }
        RunStatus::Halted(HaltReason::RateLimited { remediation }) => {
            println!("\nConversation paused: {remediation}");
        }
        RunStatus::Halted(reason) => println!("\nConversation stopped: {reason}"),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    let file_config: FileConfig = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_ref()).map_err(|e| anyhow::anyhow!(e))?
    };

    let topic = match &cli.topic {
        Some(t) => Topic::try_new(t.clone()).context("topic cannot be empty")?,
        None => bail!("a topic is required"),
    };

    // Agents: CLI specs, or two default-model agents with canned personas.
    let agents: Vec<AgentConfig> = if cli.agent.is_empty() {
        (0..2)
            .map(|i| parse_agent("", i, &file_config.session.default_model))
            .collect::<Result<_>>()?
    } else {
        cli.agent
            .iter()
            .enumerate()
            .map(|(i, spec)| parse_agent(spec, i, &file_config.session.default_model))
            .collect::<Result<_>>()?
    };
    let roster = Roster::new(agents)?;

    let rounds = cli.rounds.unwrap_or(file_config.session.rounds);
    let turn_order = cli.order.unwrap_or(file_config.session.turn_order);
    let scenario = cli.scenario.unwrap_or(file_config.session.scenario);
    let accounting = cli.accounting.unwrap_or(file_config.session.accounting);

    // === Dependency Injection ===
    let credential = std::env::var(&file_config.gateway.api_key_env)
        .ok()
        .map(ApiCredential::new);
    let gateway = Arc::new(
        OpenRouterGateway::with_base_url(&file_config.gateway.base_url, credential)
            .with_pricing(file_config.pricing_table()),
    );

    let identity = Identity::guest(format!("cli-{}", std::process::id()));
    let budget = cli.budget.unwrap_or(match accounting {
        AccountingMode::Credit => file_config.budget.guest_credits,
        AccountingMode::TokenBudget => file_config.budget.guest_tokens,
    });
    let ledger: Arc<dyn Ledger> = Arc::new(
        GuestLedger::new(budget).with_credit_cost(file_config.budget.credit_cost_per_call),
    );
    let accountant: Arc<dyn UsageAccountant> = Arc::new(LedgerAccountant::new(
        ledger,
        identity.clone(),
        accounting,
    ));

    let mut session = SessionConfig::new(identity, roster, rounds)?
        .with_scenario(scenario)
        .with_turn_order(turn_order)
        .with_accounting_mode(accounting)
        .with_response_length(file_config.session.response_length);
    if let Some(coordinator) = &file_config.session.coordinator_model {
        session = session.with_coordinator_model(Model::new(coordinator));
    }
    if let Some(settings) = expert_settings(&cli)? {
        session = session.with_expert_settings(settings);
    }

    if !cli.quiet {
        println!("colloquy - multi-agent debate");
        println!("Topic:  {topic}");
        println!(
            "Agents: {}",
            session
                .agents()
                .iter()
                .map(|a| format!("{} ({})", a.id, a.model))
                .collect::<Vec<_>>()
                .join(", ")
        );
        println!("Order:  {turn_order} | Rounds: {rounds} | Budget: {budget} ({accounting:?})");
    }

    let mut orchestrator = DebateOrchestrator::new(gateway, session, accountant, topic);
    if let Some(path) = &cli.transcript {
        let logger = JsonlTranscriptLogger::open(path)
            .with_context(|| format!("cannot open transcript file {}", path.display()))?;
        orchestrator =
            orchestrator.with_transcript_logger(Arc::new(logger) as Arc<dyn TranscriptLogger>);
    }

    info!("starting debate run");
    let sink = ConsoleSink;
    let report = orchestrator.run(&sink).await?;
    print_status(&report.status);

    if let Some(message) = &cli.interject
        && report.status.is_complete()
    {
        println!("\n>>> {message}");
        let reply_report = orchestrator.respond_to_user_message(message, &sink).await?;
        print_status(&reply_report.status);
    }

    Ok(())
}
