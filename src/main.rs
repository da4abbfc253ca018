mod commands;
mod logging;
mod render;
mod utils;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

use commands::Context;

#[derive(Parser)]
#[command(name = "taskdir")]
#[command(about = "Keep tasks grouped by category and mirror new ones into your calendar")]
struct Cli {
    /// Print debug logs to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Read and write tasks here instead of the configured data_dir
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Tasks in progress and task groups
    Home,
    /// Manage categories
    Category {
        #[command(subcommand)]
        command: CategoryCommand,
    },
    /// Manage tasks
    Task {
        #[command(subcommand)]
        command: TaskCommand,
    },
}

#[derive(Subcommand)]
enum CategoryCommand {
    Add {
        title: String,
    },
    List,
    /// Show a category and its tasks
    Show {
        /// Category title or id
        category: String,
    },
    /// Remove a category together with all of its tasks
    Remove {
        /// Category title or id
        category: String,

        /// Don't ask for confirmation
        #[arg(short, long)]
        yes: bool,
    },
}

#[derive(Subcommand)]
enum TaskCommand {
    Add {
        title: String,

        /// Category title or id
        #[arg(short, long)]
        category: Option<String>,

        #[arg(short, long)]
        description: Option<String>,

        /// Checklist entry (repeatable)
        #[arg(short = 't', long = "todo")]
        todo: Vec<String>,

        /// Start date (YYYY-MM-DD or DD/MM/YYYY)
        #[arg(short, long)]
        start: Option<String>,

        /// End date (YYYY-MM-DD or DD/MM/YYYY)
        #[arg(short, long)]
        end: Option<String>,

        /// Start time (HH:MM)
        #[arg(long)]
        start_time: Option<String>,

        /// End time (HH:MM)
        #[arg(long)]
        end_time: Option<String>,

        /// Only save locally, don't add a calendar event
        #[arg(long)]
        no_calendar: bool,
    },
    List {
        /// Only tasks of this category (title or id)
        #[arg(short, long)]
        category: Option<String>,

        /// Order by start date instead of creation
        #[arg(long)]
        by_date: bool,
    },
    Show {
        /// Task id, id prefix or title
        task: String,
    },
    Remove {
        /// Task id, id prefix or title
        task: String,
    },
    /// Toggle a checklist entry between not started and done
    Check {
        /// Task id, id prefix or title
        task: String,

        /// Entry number as shown by `task show`, or its id
        item: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    logging::init(cli.verbose);

    let ctx = Context::load(cli.data_dir)?;

    match cli.command {
        Commands::Home => commands::home::run(&ctx),
        Commands::Category { command } => match command {
            CategoryCommand::Add { title } => commands::category::add(&ctx, title),
            CategoryCommand::List => commands::category::list(&ctx),
            CategoryCommand::Show { category } => commands::category::show(&ctx, &category),
            CategoryCommand::Remove { category, yes } => {
                commands::category::remove(&ctx, &category, yes)
            }
        },
        Commands::Task { command } => match command {
            TaskCommand::Add {
                title,
                category,
                description,
                todo,
                start,
                end,
                start_time,
                end_time,
                no_calendar,
            } => {
                let args = commands::task::AddArgs {
                    title,
                    category,
                    description,
                    todo,
                    start,
                    end,
                    start_time,
                    end_time,
                };
                commands::task::add(&ctx, args, !no_calendar).await
            }
            TaskCommand::List { category, by_date } => {
                commands::task::list(&ctx, category.as_deref(), by_date)
            }
            TaskCommand::Show { task } => commands::task::show(&ctx, &task),
            TaskCommand::Remove { task } => commands::task::remove(&ctx, &task),
            TaskCommand::Check { task, item } => commands::task::check(&ctx, &task, &item),
        },
    }
}
