mod commands;
mod config;
mod lookup;
mod render;

use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use client_core::{CatalogClient, HttpTransport};
use commands::{help_text, Command};
use controller::{spawn_load, Catalog, LoadEvent};
use shared::domain::PageSize;
use tokio::{
    io::{AsyncBufReadExt, BufReader},
    task::JoinSet,
};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(about = "Browse a remote catalog from the terminal")]
struct Args {
    #[arg(long)]
    base_url: Option<String>,
    #[arg(long)]
    resource: Option<String>,
    #[arg(long)]
    catalog_size: Option<usize>,
    #[arg(long)]
    batch_size: Option<usize>,
    #[arg(long, value_parser = parse_page_size)]
    page_size: Option<PageSize>,
    #[arg(long)]
    log_level: Option<String>,
}

fn parse_page_size(raw: &str) -> Result<PageSize, String> {
    raw.parse::<usize>()
        .map_err(|err| err.to_string())
        .and_then(PageSize::try_from)
}

fn apply_args(mut settings: config::Settings, args: Args) -> config::Settings {
    if let Some(v) = args.base_url {
        settings.base_url = v;
    }
    if let Some(v) = args.resource {
        settings.resource = v;
    }
    if let Some(v) = args.catalog_size {
        settings.catalog_size = v;
    }
    if let Some(v) = args.batch_size.filter(|n| *n > 0) {
        settings.batch_size = v;
    }
    if let Some(v) = args.page_size {
        settings.page_size = v;
    }
    if let Some(v) = args.log_level {
        settings.log_level = v;
    }
    settings
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let (settings, config_problem) = config::load_settings();
    let settings = apply_args(settings, args);

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&settings.log_level))
        .context("invalid log level")?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    if let Some(problem) = config_problem {
        warn!(file = config::CONFIG_FILE, error = %problem, "catalog: ignoring unreadable config file");
    }

    let base_url = config::normalize_base_url(&settings.base_url)?;
    info!(
        base_url = %base_url,
        resource = %settings.resource,
        catalog_size = settings.catalog_size,
        batch_size = settings.batch_size,
        "catalog: starting"
    );

    let client = Arc::new(CatalogClient::new(
        HttpTransport::new(base_url).with_resource(settings.resource.clone()),
    ));
    let mut catalog = Catalog::with_page_size(settings.page_size);
    catalog.begin_load();
    let mut task = spawn_load(Arc::clone(&client), settings.loader());

    println!("{}", help_text());
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut loading = true;
    let mut input_open = true;
    let mut lookups = JoinSet::new();

    while loading || input_open || !lookups.is_empty() {
        tokio::select! {
            event = task.events.recv(), if loading => match event {
                Some(event) => {
                    let finished = matches!(
                        event,
                        LoadEvent::Completed | LoadEvent::Failed { .. } | LoadEvent::Cancelled
                    );
                    if catalog.apply(event) {
                        let snapshot = catalog.snapshot();
                        if finished {
                            print!("{}", render::render_snapshot(&snapshot));
                        } else if let Some(status) = render::render_status(&snapshot) {
                            println!("{status}");
                        }
                    }
                }
                None => loading = false,
            },
            done = lookups.join_next(), if !lookups.is_empty() => match done {
                Some(Ok(text)) => print!("{text}"),
                Some(Err(err)) => warn!(error = %err, "catalog: detail lookup task failed"),
                None => {}
            },
            line = lines.next_line(), if input_open => {
                let Some(line) = line.context("failed to read stdin")? else {
                    input_open = false;
                    continue;
                };
                if line.trim().is_empty() {
                    print!("{}", render::render_snapshot(&catalog.snapshot()));
                    continue;
                }
                match Command::parse(&line) {
                    Ok(Command::Quit) => break,
                    Ok(Command::Help) => println!("{}", help_text()),
                    Ok(Command::Show(key)) => match catalog.find_detail(&key) {
                        Some(row) => print!("{}", render::render_detail(&row)),
                        None => {
                            lookup::spawn_lookup(&mut lookups, Arc::clone(&client), key);
                        }
                    },
                    Ok(command) => {
                        command.apply(&mut catalog);
                        print!("{}", render::render_snapshot(&catalog.snapshot()));
                    }
                    Err(err) => println!("{err}"),
                }
            }
        }
    }

    if loading {
        info!("catalog: cancelling load");
        task.cancel.cancel();
    }
    lookups.abort_all();
    if let Err(err) = task.handle.await {
        warn!(error = %err, "catalog: loader task ended abnormally");
    }
    Ok(())
}
