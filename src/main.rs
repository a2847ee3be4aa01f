//! dish-explorer terminal entry point.
//!
//! Wires the HTTP client into the search controller and drives it from
//! line commands on stdin. Listings go to stdout, logs to stderr.

use std::sync::Arc;

use anyhow::Context;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::broadcast;
use tracing_subscriber::EnvFilter;

use dish_explorer::api::DishClient;
use dish_explorer::cli::{self, Command};
use dish_explorer::config::{ExplorerConfig, LogFormat};
use dish_explorer::domain::{EventBus, ViewEvent};
use dish_explorer::service::{ControllerSettings, SearchController};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration
    let config = ExplorerConfig::from_env().context("loading configuration")?;

    // Initialize tracing
    init_tracing(config.log_format);
    tracing::info!(
        base_url = %config.base_url,
        page_limit = config.page_limit,
        "starting dish-explorer"
    );

    // Build client and controller
    let client = Arc::new(DishClient::new(&config).context("building catalog client")?);
    let event_bus = EventBus::new(config.event_bus_capacity);
    let controller = SearchController::new(
        client,
        ControllerSettings::from(&config),
        event_bus.clone(),
    );

    let printer = tokio::spawn(print_suggestions(event_bus.subscribe()));

    controller.mount().await;
    controller.settle().await;
    print!("{}", cli::render_page(&controller.snapshot().await));
    println!("type `help` for commands");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await.context("reading stdin")? {
        let command = match line.parse::<Command>() {
            Ok(command) => command,
            Err(cli::CommandError::Empty) => continue,
            Err(e) => {
                println!("{e}");
                continue;
            }
        };

        match command {
            Command::Name(text) => controller.set_name_search(&text).await,
            Command::Ingredients(text) => controller.set_ingredient_search(&text).await,
            Command::Next => {
                if !controller.next_page().await {
                    println!("already on the last page");
                    continue;
                }
            }
            Command::Previous => {
                if !controller.previous_page().await {
                    println!("already on the first page");
                    continue;
                }
            }
            Command::Pick(n) => {
                let snapshot = controller.snapshot().await;
                let picked = snapshot
                    .state
                    .show_suggestions
                    .then(|| snapshot.state.suggestions.get(n.saturating_sub(1)))
                    .flatten();
                let Some(suggestion) = picked else {
                    println!("no suggestion #{n}");
                    continue;
                };
                controller.select_suggestion(suggestion).await;
            }
            Command::Refresh => controller.refresh().await,
            Command::Show => {}
            Command::Help => {
                println!("{}", cli::HELP);
                continue;
            }
            Command::Quit => break,
        }

        controller.settle().await;
        print!("{}", cli::render_page(&controller.snapshot().await));
    }

    controller.shutdown();
    printer.abort();
    tracing::info!("dish-explorer stopped");
    Ok(())
}

fn init_tracing(format: LogFormat) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);
    match format {
        LogFormat::Json => builder.json().init(),
        LogFormat::Text => builder.init(),
    }
}

/// Prints the suggestion list whenever it becomes visible.
async fn print_suggestions(mut rx: broadcast::Receiver<ViewEvent>) {
    loop {
        match rx.recv().await {
            Ok(ViewEvent::SuggestionsChanged {
                suggestions,
                visible: true,
                ..
            }) => {
                println!("suggestions (pick <n>):");
                print!("{}", cli::render_suggestions(&suggestions));
            }
            Ok(_) => {}
            Err(broadcast::error::RecvError::Lagged(n)) => {
                tracing::warn!(lagged = n, "suggestion printer lagged behind event bus");
            }
            Err(broadcast::error::RecvError::Closed) => break,
        }
    }
}
