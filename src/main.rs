use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::info;

use collection_agent::{
    config::AgentConfig, logging, session::SessionStats, CollectionAgent, SharedAgent, TurnOutcome,
};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Configuration file (json, yaml or toml)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Base URL of the intent classification service (defaults to CLASSIFIER_BASE_URL)
    #[arg(short = 'u', long)]
    classifier_url: Option<String>,

    /// Seed for reproducible sessions
    #[arg(short, long)]
    seed: Option<u64>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

fn load_config(cli: &Cli) -> Result<AgentConfig> {
    let mut config = match &cli.config {
        Some(path) => AgentConfig::load(path)
            .with_context(|| format!("Failed to load config file: {}", path.display()))?,
        None => {
            let default_path = AgentConfig::default_config_path();
            if default_path.exists() {
                AgentConfig::load(&default_path).with_context(|| {
                    format!("Failed to load config file: {}", default_path.display())
                })?
            } else {
                AgentConfig::default()
            }
        }
    };

    if let Some(url) = &cli.classifier_url {
        config.classifier.base_url = Some(url.clone());
    }
    if cli.seed.is_some() {
        config.learning.seed = cli.seed;
    }

    Ok(config)
}

fn print_outcome(outcome: &TurnOutcome, reply: &str) {
    let intent = &outcome.classified_intent;
    println!(
        "[system] Intent: {} ({}) | Confidence: {:.1}% | Reward: {:.2} | Q-Value: {:.3}",
        intent.name(),
        intent.impact(),
        intent.confidence * 100.0,
        outcome.reward,
        outcome.q_value
    );
    println!(
        "[agent] {}\n        Strategy: {}{}",
        reply,
        outcome.new_strategy,
        if outcome.strategy_changed { " (Changed!)" } else { "" }
    );
}

fn print_stats(stats: &SessionStats, epsilon: f64, learning_rate: f64) {
    println!(
        "[stats] episodes: {} | current reward: {:.2} | total reward: {:.2} | strategy changes: {} | epsilon: {:.3} | learning rate: {}",
        stats.episodes,
        stats.current_reward,
        stats.total_reward,
        stats.strategy_changes,
        epsilon,
        learning_rate
    );
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();
    let cli = Cli::parse();

    if cli.verbose {
        logging::init_verbose_logging(true)?;
    } else {
        logging::init_logging(true)?;
    }

    let config = load_config(&cli)?;
    let agent = SharedAgent::new(
        CollectionAgent::new(&config).context("Failed to start collection session")?,
    );

    let initial = agent.stats().await;
    info!(
        "Starting collection agent v{} in state {}",
        collection_agent::version(),
        initial.state
    );
    println!(
        "[system] Session started! Initial strategy: {} (State: {})",
        initial.strategy, initial.state
    );
    println!(
        "[agent] {}\n        Strategy: {}",
        agent.generate_response().await,
        initial.strategy
    );

    let mut session = SessionStats::new();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    while let Some(line) = lines.next_line().await.context("Failed to read input")? {
        let text = line.trim();
        match text {
            "" => continue,
            "/quit" | "/exit" => break,
            "/stats" => {
                let stats = agent.stats().await;
                print_stats(&session, stats.epsilon, stats.learning_rate);
                continue;
            }
            _ => {}
        }

        let outcome = agent.process_turn(text).await;
        session.record(&outcome);
        let reply = agent.generate_response().await;
        print_outcome(&outcome, reply);
    }

    let stats = agent.stats().await;
    print_stats(&session, stats.epsilon, stats.learning_rate);
    info!("Session finished after {} episodes", session.episodes);

    Ok(())
}
