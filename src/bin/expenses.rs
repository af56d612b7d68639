use std::error::Error;

use clap::{Parser, Subcommand};
use time::OffsetDateTime;
use tracing_subscriber::{EnvFilter, Layer, layer::SubscriberExt, util::SubscriberInitExt};

use expense_tracker::{
    ALL_CATEGORIES, CategoryFilter, Clock, Expense, ExpenseId, ExpensePatch, ExpenseService,
    ExpenseStats, Latency, Session, SystemClock, filter_by_category,
    formatting::{
        DEFAULT_CURRENCY, DEFAULT_PERCENTAGE_DECIMALS, DEFAULT_TRUNCATION_SUFFIX,
        capitalize_words, format_currency, format_large_number, format_percentage,
        format_relative_time_at, parse_date, truncate_text,
    },
    sort_expenses_by_key, timezone, total_amount,
};

/// The max number of graphemes to display in the description column before
/// truncating.
const MAX_DESCRIPTION_GRAPHEMES: usize = 28;

/// Track expenses in a throwaway in-memory store.
///
/// Every run starts from the same three sample expenses, applies one command
/// and prints the result.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// ISO 4217 code of the currency to display amounts in.
    #[arg(long, global = true, default_value = DEFAULT_CURRENCY)]
    currency: String,

    /// IANA timezone to display dates in, e.g. "Pacific/Auckland". Defaults to UTC.
    #[arg(long, global = true)]
    timezone: Option<String>,

    /// Wait before each call like a slow network would.
    #[arg(long, global = true)]
    simulate_latency: bool,

    /// Print JSON instead of a table.
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List expenses.
    List {
        /// Only show this category, or "All".
        #[arg(long, default_value = ALL_CATEGORIES)]
        category: String,

        /// One of newest, oldest, highest or lowest.
        #[arg(long, default_value = "newest")]
        sort: String,
    },
    /// Add an expense, then list every expense.
    Add {
        #[arg(long)]
        title: String,

        #[arg(long, allow_negative_numbers = true)]
        amount: f64,

        #[arg(long)]
        category: String,

        #[arg(long, default_value = "")]
        description: String,

        /// YYYY-MM-DD or RFC 3339. Defaults to now.
        #[arg(long, value_parser = parse_date)]
        date: Option<OffsetDateTime>,
    },
    /// Change fields of an expense.
    Update {
        id: ExpenseId,

        #[arg(long)]
        title: Option<String>,

        #[arg(long, allow_negative_numbers = true)]
        amount: Option<f64>,

        #[arg(long)]
        category: Option<String>,

        #[arg(long)]
        description: Option<String>,

        /// YYYY-MM-DD or RFC 3339.
        #[arg(long, value_parser = parse_date)]
        date: Option<OffsetDateTime>,
    },
    /// Delete an expense, then list the remaining expenses.
    Delete { id: ExpenseId },
    /// List expenses dated between two dates (inclusive).
    Range {
        /// YYYY-MM-DD or RFC 3339.
        #[arg(long, value_parser = parse_date)]
        start: OffsetDateTime,

        /// YYYY-MM-DD or RFC 3339.
        #[arg(long, value_parser = parse_date)]
        end: OffsetDateTime,
    },
    /// Show totals per category.
    Stats,
}

/// Renders library values as text or JSON on stdout.
struct Output {
    currency: String,
    timezone: Option<String>,
    json: bool,
    now: OffsetDateTime,
}

impl Output {
    fn print_expenses(&self, expenses: &[Expense]) -> Result<(), Box<dyn Error>> {
        if self.json {
            println!("{}", serde_json::to_string_pretty(expenses)?);
            return Ok(());
        }

        if expenses.is_empty() {
            println!("No expenses yet. Add your first expense!");
            return Ok(());
        }

        for expense in expenses {
            let date = match &self.timezone {
                Some(timezone_name) => timezone::to_local(expense.date, timezone_name)?,
                None => expense.date,
            };

            println!(
                "{:>4}  {:<14}  {:<16}  {:<16}  {:<28}  {:>12}",
                expense.id,
                format_relative_time_at(date, self.now),
                truncate_text(&expense.title, 16, DEFAULT_TRUNCATION_SUFFIX),
                capitalize_words(&expense.category),
                truncate_text(
                    &expense.description,
                    MAX_DESCRIPTION_GRAPHEMES,
                    DEFAULT_TRUNCATION_SUFFIX
                ),
                format_currency(expense.amount, &self.currency),
            );
        }

        println!(
            "Total: {}",
            format_currency(total_amount(expenses), &self.currency)
        );

        Ok(())
    }

    fn print_stats(&self, stats: &ExpenseStats) -> Result<(), Box<dyn Error>> {
        if self.json {
            println!("{}", serde_json::to_string_pretty(stats)?);
            return Ok(());
        }

        println!("Expenses: {}", format_large_number(stats.count as f64));
        println!(
            "Total:    {}",
            format_currency(stats.total_amount, &self.currency)
        );
        println!(
            "Average:  {}",
            format_currency(stats.average_amount, &self.currency)
        );

        for (category, totals) in &stats.per_category {
            // A zero total gives NaN, which renders as "0%".
            let share = totals.total / stats.total_amount;

            println!(
                "  {:<20}  {:>4}  {:>12}  {:>7}",
                capitalize_words(category),
                totals.count,
                format_currency(totals.total, &self.currency),
                format_percentage(share, DEFAULT_PERCENTAGE_DECIMALS),
            );
        }

        Ok(())
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    setup_logging();

    let args = Args::parse();

    let now = SystemClock.now();

    if let Some(timezone_name) = &args.timezone {
        timezone::get_offset_at(timezone_name, now)?;
    }

    let latency = if args.simulate_latency {
        Latency::simulated()
    } else {
        Latency::none()
    };

    let mut session = Session::new(latency);
    let user = session.restore().await;
    tracing::info!("Signed in as {} <{}>", user.name, user.email);

    let mut service = ExpenseService::new(latency);
    let output = Output {
        currency: args.currency,
        timezone: args.timezone,
        json: args.json,
        now,
    };

    match args.command {
        Command::List { category, sort } => {
            let expenses = service.get_expenses().await;
            let expenses = filter_by_category(&expenses, &CategoryFilter::from(category.as_str()));
            let expenses = sort_expenses_by_key(&expenses, &sort);

            output.print_expenses(&expenses)?;
        }
        Command::Add {
            title,
            amount,
            category,
            description,
            date,
        } => {
            let mut builder = Expense::build(&title, amount, &category).description(&description);
            if let Some(date) = date {
                builder = builder.date(date);
            }

            let expense = service.create_expense(builder).await;
            tracing::info!("Added expense {}", expense.id);

            output.print_expenses(&service.get_expenses().await)?;
        }
        Command::Update {
            id,
            title,
            amount,
            category,
            description,
            date,
        } => {
            let patch = ExpensePatch {
                title,
                amount,
                category,
                description,
                date,
            };

            if patch.is_empty() {
                tracing::warn!("No fields given, expense {id} is unchanged");
            }

            let expense = service.update_expense(id, patch).await?;

            output.print_expenses(&[expense])?;
        }
        Command::Delete { id } => {
            service.delete_expense(id).await?;
            tracing::info!("Deleted expense {id}");

            output.print_expenses(&service.get_expenses().await)?;
        }
        Command::Range { start, end } => {
            let expenses = service.get_expenses_by_date_range(start..=end).await;

            output.print_expenses(&expenses)?;
        }
        Command::Stats => {
            let stats = service.get_expense_stats().await;

            output.print_stats(&stats)?;
        }
    }

    session.log_out().await;

    Ok(())
}

fn setup_logging() {
    let stderr_log = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false);

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(stderr_log.with_filter(filter))
        .init();
}
