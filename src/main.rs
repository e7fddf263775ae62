use clap::Parser;
use sweagent::agent::{Agent, AgentConfig, State, SweAgent};
use sweagent::brain::{Brain, BrainConfig};
use sweagent::{Action, Observation};
use tracing::{Level, info, warn};
use tracing_subscriber::fmt;

/// Dry-run host: asks the agent for actions without executing them
#[derive(Debug, Parser)]
#[command(name = "sweagent")]
#[command(about = "Run a software engineering agent against a goal")]
struct Args {
    /// Goal for the agent
    #[arg(short, long)]
    goal: String,

    /// Maximum number of steps
    #[arg(short, long, default_value = "10")]
    steps: u32,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    fmt()
        .with_max_level(Level::INFO)
        .with_target(true)
        .with_file(true)
        .with_line_number(true)
        .init();

    let args = Args::parse();

    let brain_config = BrainConfig::from_env()?;
    let agent_config = AgentConfig::from_env()?;

    info!(
        model = %brain_config.default_model,
        memory_window = agent_config.memory_window,
        max_retries = agent_config.max_retries,
        "Configuration loaded"
    );

    let brain = Brain::new(brain_config).await?;
    let mut agent = SweAgent::new(brain, agent_config);

    let mut previous: Option<Action> = None;
    for step in 1..=args.steps {
        let mut state = State::new(args.goal.clone());
        if let Some(action) = previous.take() {
            state = state.with_update(action, Observation::Null);
        }

        let action = agent.step(&state).await?;
        println!("{}", serde_json::to_string_pretty(&action)?);

        if agent.is_complete() {
            info!(step = step, "agent finished");
            return Ok(());
        }
        previous = Some(action);
    }

    warn!(steps = args.steps, "step limit reached before the agent finished");
    Ok(())
}
