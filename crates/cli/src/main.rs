//! Interactive funnel chat
//!
//! Reads one message per line from stdin and prints the reply followed by
//! the state the conversation moved to. Type `exit` to quit.

mod generator;

use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, Layer};

use setter_agent::{FunnelAgent, InMemoryHistoryStore, TurnInput};
use setter_config::{load_settings, Settings};
use setter_core::{AttributeStore, ConversationState};

use generator::TemplateReplyGenerator;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Priority: env vars > config/{env}.yaml > config/default.yaml > defaults
    let env = std::env::var("SETTER_AGENT_ENV").ok();
    let settings = match load_settings(env.as_deref()) {
        Ok(settings) => settings,
        Err(e) => {
            // tracing is not initialized yet
            eprintln!("Warning: Failed to load config: {}. Using defaults.", e);
            Settings::default()
        }
    };

    init_tracing(&settings);
    tracing::info!(
        environment = ?settings.environment,
        version = env!("CARGO_PKG_VERSION"),
        "Starting setter-chat"
    );

    let history = Arc::new(InMemoryHistoryStore::new(settings.agent.history_window));
    let agent = FunnelAgent::from_settings(&settings, Arc::new(TemplateReplyGenerator), history)?;

    let user_id = std::env::var("SETTER_USER_ID").unwrap_or_else(|_| "local".to_string());
    let mut state = ConversationState::Entry;
    let mut attributes = AttributeStore::new();

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdout = tokio::io::stdout();

    stdout.write_all(b"> ").await?;
    stdout.flush().await?;

    while let Some(line) = lines.next_line().await? {
        let message = line.trim();
        if message.eq_ignore_ascii_case("exit") {
            break;
        }
        if message.is_empty() {
            stdout.write_all(b"> ").await?;
            stdout.flush().await?;
            continue;
        }

        let result = agent
            .process_message(TurnInput::new(&user_id, message, state, attributes))
            .await?;

        let output = format!(
            "{}\n[STATE \u{2192} {}] (progress {})\n",
            result.reply, result.next_state, result.progress_score
        );
        stdout.write_all(output.as_bytes()).await?;

        state = result.next_state;
        attributes = result.attributes;

        if state.is_terminal() {
            tracing::info!(user_id = %user_id, "Conversation ended");
            break;
        }
        stdout.write_all(b"> ").await?;
        stdout.flush().await?;
    }

    stdout.flush().await?;
    Ok(())
}

fn init_tracing(settings: &Settings) {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        let level = &settings.observability.log_level;
        format!("setter={}", level).into()
    });

    let subscriber = tracing_subscriber::registry().with(env_filter);
    let fmt_layer = if settings.observability.log_json {
        tracing_subscriber::fmt::layer()
            .json()
            .with_writer(std::io::stderr)
            .boxed()
    } else {
        tracing_subscriber::fmt::layer()
            .with_writer(std::io::stderr)
            .boxed()
    };
    subscriber.with(fmt_layer).init();
}
