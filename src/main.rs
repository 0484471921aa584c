use std::path::PathBuf;

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(version, about)]
struct Args {
    /// The command to execute
    #[command(subcommand)]
    command: FlexcatCommand,
}

#[derive(Parser)]
struct InitArgs {
    /// The path to initialize the wiki in
    path: PathBuf,

    /// Whether to create the directory if it doesn't exist
    #[arg(short, long, default_value = "false")]
    create: bool,
}

#[derive(Parser)]
struct ImportArgs {
    /// YAML file of pages to import
    file: PathBuf,

    /// The path to the configuration file
    #[arg(short, long, default_value = "flexcat.yaml")]
    config_file: Option<PathBuf>,
}

#[derive(Parser)]
struct ViewArgs {
    /// Title of the page to render, e.g. "Category:Muppet Wiki"
    title: String,

    /// Start listing at this sort key
    #[arg(long)]
    from: Option<String>,

    /// List members sorting before this sort key
    #[arg(long)]
    until: Option<String>,

    /// Render as a diff view
    #[arg(long)]
    diff: Option<String>,

    /// Whether a diff view shows only the diff
    #[arg(long)]
    diffonly: Option<String>,

    /// The path to the configuration file
    #[arg(short, long, default_value = "flexcat.yaml")]
    config_file: Option<PathBuf>,
}

#[derive(Parser)]
struct QueryArgs {
    /// Category to list
    category: String,

    /// Which status to intersect with ("no" or "yes")
    #[arg(short, long)]
    answered: Option<String>,

    /// Maximum number of rows, or "max"
    #[arg(short, long)]
    limit: Option<String>,

    /// The path to the configuration file
    #[arg(short, long, default_value = "flexcat.yaml")]
    config_file: Option<PathBuf>,
}

#[derive(Parser)]
struct ServeArgs {
    /// The address to bind to
    #[arg(short, long, default_value = "0.0.0.0")]
    bind: String,

    /// The port to bind to
    #[arg(short, long, default_value = "3000")]
    port: u16,

    /// The path to the configuration file
    #[arg(short, long, default_value = "flexcat.yaml")]
    config_file: Option<PathBuf>,
}

#[derive(Subcommand)]
enum FlexcatCommand {
    /// Initialize a new wiki
    Init(InitArgs),

    /// Import pages from a YAML file
    Import(ImportArgs),

    /// Render a page to stdout
    View(ViewArgs),

    /// Run the categoriesonanswers listing and print its JSON
    Query(QueryArgs),

    /// Serve pages and the query API on a local port
    Serve(ServeArgs),
}

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    let args = Args::parse();

    match args.command {
        FlexcatCommand::Init(args) => {
            commands::init::run(&args).await?;
        }
        FlexcatCommand::Import(args) => {
            commands::import::run(&args)?;
        }
        FlexcatCommand::View(args) => {
            commands::view::run(&args)?;
        }
        FlexcatCommand::Query(args) => {
            commands::query::run(&args)?;
        }
        FlexcatCommand::Serve(args) => {
            commands::serve::run(&args).await?;
        }
    }

    Ok(())
}
