use anyhow::Result;
use clap::{Parser, Subcommand};

use expense_tracker::cli::{
    handle_add, handle_category_command, handle_export, handle_forecast, handle_history,
    handle_list, handle_remove, handle_reset, handle_summary_command, handle_total, AddArgs,
    CategoryCommands, ExportArgs, ForecastArgs, RemoveArgs, SummaryCommands,
};
use expense_tracker::config::{paths::ExpensePaths, settings::Settings};
use expense_tracker::storage::Storage;

#[derive(Parser)]
#[command(
    name = "expense",
    version,
    about = "Personal expense ledger with category summaries and spending forecasts",
    long_about = "Record expenses, tag them with categories, review totals by \
                  category, date or month, and project future spending with a \
                  linear trend."
)]
struct Cli {
    /// Show informational log output on stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Record a new expense
    Add(AddArgs),

    /// Remove an expense by its position in `list`
    #[command(alias = "rm")]
    Remove(RemoveArgs),

    /// List all expenses in the order they were added
    #[command(alias = "ls")]
    List,

    /// Show the sum of all expenses
    Total,

    /// Category management commands
    #[command(subcommand)]
    Category(CategoryCommands),

    /// Spending summaries
    #[command(subcommand)]
    Summary(SummaryCommands),

    /// Project future spending from the recorded trend
    Forecast(ForecastArgs),

    /// Export all data as JSON or YAML
    Export(ExportArgs),

    /// Show recent changes from the audit log
    History {
        /// Number of entries to show
        #[arg(short, long, default_value = "20")]
        limit: usize,
    },

    /// Delete all expenses and categories
    Reset {
        /// Confirm the reset
        #[arg(long)]
        force: bool,
    },

    /// Show current configuration and paths
    Config,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    expense_tracker::init_tracing(cli.verbose);

    let paths = ExpensePaths::new()?;
    let settings = Settings::load_or_create(&paths)?;

    let mut storage = Storage::new(paths.clone())?;
    storage.set_audit_enabled(settings.audit_enabled);

    let (mut session, report) = storage.load_session()?;
    if !report.skipped.is_empty() {
        eprintln!(
            "Warning: skipped {} malformed row(s) in {}",
            report.skipped.len(),
            storage.expenses.path().display()
        );
    }

    match cli.command {
        Some(Commands::Add(args)) => handle_add(&storage, &mut session, &settings, args)?,
        Some(Commands::Remove(args)) => handle_remove(&storage, &mut session, &settings, args)?,
        Some(Commands::List) => handle_list(&session, &settings)?,
        Some(Commands::Total) => handle_total(&session, &settings)?,
        Some(Commands::Category(cmd)) => handle_category_command(&storage, &mut session, cmd)?,
        Some(Commands::Summary(cmd)) => handle_summary_command(&session, &settings, cmd)?,
        Some(Commands::Forecast(args)) => handle_forecast(&session, &settings, args)?,
        Some(Commands::Export(args)) => handle_export(&storage, &session, args)?,
        Some(Commands::History { limit }) => handle_history(&storage, limit)?,
        Some(Commands::Reset { force }) => handle_reset(&storage, &mut session, force)?,
        Some(Commands::Config) => {
            if !paths.settings_file().exists() {
                settings.save(&paths)?;
            }
            println!("Expense Tracker Configuration");
            println!("=============================");
            println!("Base directory:  {}", paths.base_dir().display());
            println!("Expenses file:   {}", paths.expenses_file().display());
            println!("Categories file: {}", paths.categories_file().display());
            println!("Settings file:   {}", paths.settings_file().display());
            println!("Audit log:       {}", storage.audit().path().display());
            println!();
            println!("Settings:");
            println!("  Currency symbol:     {}", settings.currency_symbol);
            println!("  Date format:         {}", settings.date_format);
            println!("  Default granularity: {}", settings.default_granularity);
            println!("  Daily horizon:       {}", settings.daily_horizon);
            println!("  Monthly horizon:     {}", settings.monthly_horizon);
            println!("  Audit enabled:       {}", settings.audit_enabled);
        }
        None => {
            println!("Expense Tracker - personal expense ledger");
            println!();
            println!("Run 'expense --help' for usage information.");
        }
    }

    Ok(())
}
