use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use lilacash::cli::summary::DEFAULT_MONTHS;
use lilacash::cli::transactions::{AddArgs, EditArgs, ListArgs};
use lilacash::core::log::init_logging;

#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to optional configuration file
    #[arg(short, long, global = true)]
    config_path: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Create default configuration
    Setup,
    /// Record a new income or expense
    Add {
        /// income or expense
        #[arg(short = 't', long = "type")]
        kind: String,
        /// Positive amount
        #[arg(short, long, allow_hyphen_values = true)]
        amount: String,
        #[arg(long, default_value = "")]
        category: String,
        #[arg(long, default_value = "")]
        note: String,
        /// Date as YYYY-MM-DD, defaults to today
        #[arg(long)]
        date: Option<String>,
    },
    /// Edit fields of an existing transaction
    Edit {
        id: String,
        #[arg(short = 't', long = "type")]
        kind: Option<String>,
        #[arg(short, long, allow_hyphen_values = true)]
        amount: Option<String>,
        #[arg(long)]
        category: Option<String>,
        #[arg(long)]
        note: Option<String>,
        #[arg(long)]
        date: Option<String>,
    },
    /// Delete a transaction
    Delete { id: String },
    /// List transactions
    List {
        /// all, income or expense
        #[arg(long = "type", default_value = "all")]
        kind: String,
        /// all or an exact category name
        #[arg(long, default_value = "all")]
        category: String,
        /// date_desc, date_asc, amount_desc or amount_asc
        #[arg(long, default_value = "date_desc")]
        sort: String,
    },
    /// Show income, expense and balance totals
    Balance,
    /// List known categories
    Categories,
    /// Show per-month income, expense and saving
    Monthly {
        /// Number of recent months to show
        #[arg(short, long, default_value_t = DEFAULT_MONTHS)]
        months: usize,
    },
    /// Show or set the display currency
    Currency { code: Option<String> },
}

impl From<Commands> for lilacash::AppCommand {
    fn from(cmd: Commands) -> lilacash::AppCommand {
        match cmd {
            Commands::Add {
                kind,
                amount,
                category,
                note,
                date,
            } => lilacash::AppCommand::Add(AddArgs {
                kind,
                amount,
                category,
                note,
                date,
            }),
            Commands::Edit {
                id,
                kind,
                amount,
                category,
                note,
                date,
            } => lilacash::AppCommand::Edit(EditArgs {
                id,
                kind,
                amount,
                category,
                note,
                date,
            }),
            Commands::Delete { id } => lilacash::AppCommand::Delete { id },
            Commands::List {
                kind,
                category,
                sort,
            } => lilacash::AppCommand::List(ListArgs {
                kind,
                category,
                sort,
            }),
            Commands::Balance => lilacash::AppCommand::Balance,
            Commands::Categories => lilacash::AppCommand::Categories,
            Commands::Monthly { months } => lilacash::AppCommand::Monthly { months },
            Commands::Currency { code } => lilacash::AppCommand::Currency { code },
            Commands::Setup => unreachable!("Setup command should be handled separately"),
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    let result = match cli.command {
        Some(Commands::Setup) => match cli.config_path.as_deref() {
            Some(path) => lilacash::cli::setup::setup_at_path(path),
            None => lilacash::cli::setup::setup(),
        },
        Some(cmd) => lilacash::run_command(cmd.into(), cli.config_path.as_deref()),
        None => {
            Cli::command().print_help()?;
            Ok(())
        }
    };

    if let Err(e) = &result {
        tracing::error!(error = %e, "Application failed");
    }
    result
}
