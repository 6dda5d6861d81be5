//! Command-line interface for the earnings war room
//!
//! Loads a JSON dataset bundle and either runs the offline signal engine
//! (`analyze`) or drives one of the agent loops against the Anthropic API
//! (`questions`, `defend`), printing events as they stream in.

use anyhow::{Context, bail};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::info;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};
use warroom_agent::{AgentEvent, AgentLoop, DefenseVariant, QuestionVariant, parse_questions};
use warroom_core::DataBundle;
use warroom_llm::LlmProvider;
use warroom_llm::providers::AnthropicProvider;
use warroom_signals::{KpiSummary, SignalEngine};
use warroom_tools::{ToolRegistry, defense_catalog, research_catalog};

#[derive(Parser, Debug)]
#[command(name = "warroom")]
#[command(about = "Earnings war room: anticipate analyst questions and draft defenses", long_about = None)]
struct Args {
    /// Path to the JSON dataset bundle
    #[arg(short, long)]
    data: PathBuf,

    /// Model identifier for agent runs
    #[arg(long, default_value = "claude-sonnet-4-5-20250929")]
    model: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the signal engine offline and print KPIs plus findings
    Analyze,
    /// Research the dataset and generate anticipated analyst questions
    Questions,
    /// Build an executive defense brief for one analyst question
    Defend {
        /// The analyst question to defend against
        #[arg(short, long)]
        question: String,
    },
}

/// Initialize tracing subscriber with default configuration
fn init_tracing() {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer())
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    let args = Args::parse();

    let json = std::fs::read_to_string(&args.data)
        .with_context(|| format!("reading dataset bundle {}", args.data.display()))?;
    let bundle = Arc::new(DataBundle::from_json_str(&json).context("parsing dataset bundle")?);
    info!(ticker = %bundle.subject_ticker, "dataset loaded");

    match args.command {
        Command::Analyze => analyze(&bundle),
        Command::Questions => {
            let registry = research_catalog(Arc::clone(&bundle));
            let variant = QuestionVariant::new(bundle.subject_ticker.clone());
            let events = run_loop(variant, registry, &args.model).await?;
            report_questions(&events);
            Ok(())
        }
        Command::Defend { question } => {
            let engine = SignalEngine::new(&bundle.metrics, &bundle.peer_financials);
            let Some(kpis) = engine.latest_kpis() else {
                bail!("dataset bundle has no quarterly metrics to defend with");
            };
            let registry = defense_catalog(Arc::clone(&bundle));
            let variant = DefenseVariant::new(bundle.subject_ticker.clone(), question, &kpis);
            run_loop(variant, registry, &args.model).await?;
            Ok(())
        }
    }
}

/// Offline analysis: no network, deterministic output.
fn analyze(bundle: &DataBundle) -> anyhow::Result<()> {
    let engine = SignalEngine::new(&bundle.metrics, &bundle.peer_financials);

    match engine.latest_kpis() {
        Some(kpis) => print_kpis(&kpis),
        None => println!("No quarterly metrics in bundle"),
    }

    let report = engine.analyze();

    println!("\nDETECTED ANOMALIES:");
    if report.anomalies.is_empty() {
        println!("- No major anomalies detected");
    }
    for a in &report.anomalies {
        println!("- [{}] {}: {} ({})", a.threat, a.metric, a.description, a.quarter);
    }

    println!("\nCOMPETITIVE GAPS:");
    if report.gaps.is_empty() {
        println!("- No competitor comparisons available");
    }
    for g in &report.gaps {
        let status = if g.advantage { "ahead" } else { "behind" };
        println!(
            "- vs {}: {} {:.1}% vs {:.1}% ({status})",
            g.competitor, bundle.subject_ticker, g.own_growth_pct, g.competitor_growth_pct
        );
    }

    Ok(())
}

fn print_kpis(kpis: &KpiSummary) {
    println!("KEY METRICS ({}):", kpis.quarter);
    println!("{}", kpis.to_bullets());
}

/// Spawn a loop, print events as they arrive, and return them all.
async fn run_loop(
    variant: impl warroom_agent::LoopVariant + 'static,
    registry: ToolRegistry,
    model: &str,
) -> anyhow::Result<Vec<AgentEvent>> {
    let provider: Arc<dyn LlmProvider> =
        Arc::new(AnthropicProvider::from_env().context("configuring Anthropic provider")?);

    let (tx, mut rx) = mpsc::unbounded_channel();
    let agent = AgentLoop::new(variant, provider, registry, model);
    let handle = tokio::spawn(agent.run(tx));

    let mut events = Vec::new();
    while let Some(event) = rx.recv().await {
        print_event(&event);
        events.push(event);
    }
    handle.await.context("agent task panicked")?;

    Ok(events)
}

fn print_event(event: &AgentEvent) {
    match event {
        AgentEvent::ToolCall { name, input } => println!("[tool] {name} {input}"),
        AgentEvent::ToolResult { preview } => println!("{preview}\n"),
        AgentEvent::Complete { content } | AgentEvent::FinalResult { content } => {
            println!("\n{content}");
        }
        AgentEvent::Error { message } => eprintln!("error: {message}"),
    }
}

/// Print the structured question records parsed from the final output.
fn report_questions(events: &[AgentEvent]) {
    let Some(AgentEvent::FinalResult { content }) = events
        .iter()
        .find(|e| matches!(e, AgentEvent::FinalResult { .. }))
    else {
        return;
    };

    let records = parse_questions(content);
    if records.is_empty() {
        return;
    }

    println!("\nPARSED QUESTIONS:");
    for (i, record) in records.iter().enumerate() {
        println!("{}. [{}] {}", i + 1, record.threat, record.question);
        if let Some(source) = &record.source {
            println!("   Source: {source}");
        }
        if let Some(data_point) = &record.data_point {
            println!("   Data: {data_point}");
        }
    }
}
