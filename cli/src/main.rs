mod backend;
mod view;

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;
use todolist_core::{join_words, Config, Filter};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::backend::Backend;

#[derive(Parser)]
#[command(name = "todolist")]
#[command(about = "A todo list kept in a local file or a remote collection", long_about = None)]
struct Cli {
    /// Use the remote collection at this base URL (e.g. http://localhost:3000/api)
    #[arg(long, global = true)]
    remote: Option<String>,

    /// Directory for the local todo file (default: ~/.todolist)
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// Add a new todo (usage: add Buy milk)
    Add {
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        args: Vec<String>,
    },
    /// List todos: all, active or completed
    List {
        #[arg(default_value = "all")]
        filter: Filter,
    },
    /// Mark a todo done, or not done again
    Toggle {
        /// ID or unique ID prefix
        id: String,
    },
    /// Replace the text of a todo
    Edit {
        /// ID or unique ID prefix
        id: String,
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        text: Vec<String>,
    },
    /// Delete a todo
    Remove {
        /// ID or unique ID prefix
        id: String,
    },
    /// Delete every completed todo
    ClearCompleted,
    /// Show total, active and completed counts
    Stats,
    /// Show the effective configuration
    Config {
        /// Write it to the config file
        #[arg(long)]
        save: bool,
    },
}

const DEFAULT_LOG_FILTER: &str = "todolist_core=info,todolist=info";

/// Logs go to stderr so command output on stdout stays clean.
fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::new(
        std::env::var("RUST_LOG").unwrap_or_else(|_| DEFAULT_LOG_FILTER.into()),
    );

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn effective_config(cli: &Cli) -> Config {
    let mut config = Config::load();
    if let Some(url) = &cli.remote {
        config = config.with_remote(url.clone());
    }
    if let Some(dir) = &cli.data_dir {
        config = config.with_data_dir(dir.clone());
    }
    config
}

#[tokio::main]
async fn main() -> ExitCode {
    init_tracing();
    let cli = Cli::parse();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<()> {
    let config = effective_config(&cli);

    if let Some(Commands::Config { save }) = cli.command {
        return show_config(&config, save);
    }

    let mut backend = Backend::open(&config)?;
    backend.load().await?;
    let result = run_command(&mut backend, &config, cli.command).await;
    backend.close();
    result
}

fn show_config(config: &Config, save: bool) -> Result<()> {
    println!("{}", config.to_pretty_json()?);
    if save {
        let path = config.save()?;
        println!("Saved to {}", path.display());
    }
    Ok(())
}

async fn run_command(
    backend: &mut Backend,
    config: &Config,
    command: Option<Commands>,
) -> Result<()> {
    match command {
        Some(Commands::Add { args }) => {
            let text = join_words(&args);
            match backend.add(&text).await? {
                Some(todo) => view::show_todo("Added", &todo, &backend.short_ids()),
                None => println!("Error: Todo text is required."),
            }
        }
        Some(Commands::List { filter }) => {
            view::show_list(
                &backend.filter(filter),
                filter,
                &backend.counts(),
                &backend.short_ids(),
            );
        }
        Some(Commands::Toggle { id }) => {
            let id = backend.resolve(&id)?;
            let todo = backend.toggle(&id).await?;
            view::show_todo("Updated", &todo, &backend.short_ids());
        }
        Some(Commands::Edit { id, text }) => {
            let id = backend.resolve(&id)?;
            match backend.edit(&id, &join_words(&text)).await? {
                Some(todo) => view::show_todo("Updated", &todo, &backend.short_ids()),
                None => println!("Error: Todo text is required."),
            }
        }
        Some(Commands::Remove { id }) => {
            let id = backend.resolve(&id)?;
            let todo = backend.remove(&id).await?;
            view::show_todo("Removed", &todo, &backend.short_ids());
        }
        Some(Commands::ClearCompleted) => {
            let removed = backend.clear_completed().await?;
            println!("Removed {} completed todo(s).", removed);
        }
        Some(Commands::Stats) => {
            view::show_stats(&backend.counts());
        }
        Some(Commands::Config { save }) => show_config(config, save)?,
        None => {
            // No subcommand: show everything
            view::show_list(
                &backend.filter(Filter::All),
                Filter::All,
                &backend.counts(),
                &backend.short_ids(),
            );
        }
    }
    Ok(())
}
