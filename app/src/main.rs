//! Terminal todo list.
//!
//! Reads commands from stdin, renders the list to stdout and logs to stderr.

use anyhow::Context;
use todo::shell::{Reply, Shell, ShellError};
use todo::{AppConfig, TodoEnvironment, TodoReducer, TodoState, TodoStore};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = AppConfig::from_env();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_new(&config.log_filter)
                .unwrap_or_else(|_| todo::config::DEFAULT_LOG_FILTER.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    tracing::info!(show_ids = config.show_ids, "Starting todo shell");

    let store = TodoStore::new(TodoState::new(), TodoReducer::new(), TodoEnvironment::system());
    let shell = Shell::new(store.clone(), config.clone());

    println!("{}", shell.banner().await);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    while let Some(line) = lines.next_line().await.context("failed to read stdin")? {
        match shell.handle_line(&line).await {
            Ok(Reply::Output(text)) => println!("{text}"),
            Ok(Reply::Quit) => break,
            Err(ShellError::Store(error)) => return Err(error).context("store stopped"),
            Err(error) => println!("error: {error}"),
        }
    }

    store
        .shutdown(config.shutdown_timeout())
        .await
        .context("shutdown did not complete")?;

    tracing::info!("Goodbye");
    Ok(())
}
