use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use serde::Serialize;
use tracing_subscriber::EnvFilter;

use duty_manager_lib::application::commands;
use duty_manager_lib::application::dto::{DutyView, StaffSummary};
use duty_manager_lib::config::{StoreConfig, DEFAULT_DATABASE_PATH, DEFAULT_MAX_CONNECTIONS};
use duty_manager_lib::domain::models::{DutyInput, Staff};
use duty_manager_lib::{open_store, AppServices};

#[derive(Parser)]
#[command(name = "duty_tools")]
#[command(version = "0.1.0")]
#[command(about = "Manage staff duties and compensatory days off", long_about = None)]
struct Cli {
    /// SQLite database file
    #[arg(long, env = "DUTY_DB", default_value = DEFAULT_DATABASE_PATH, global = true)]
    db: PathBuf,

    #[arg(long, default_value_t = DEFAULT_MAX_CONNECTIONS, global = true)]
    max_connections: u32,

    /// Print results as JSON
    #[arg(long, global = true)]
    json: bool,

    /// Debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create the database and apply the schema
    Init,

    /// Staff with pending and received days off
    Overview {
        /// name | rank | pending | received
        #[arg(short, long)]
        order_by: Option<String>,
    },

    #[command(subcommand)]
    Staff(StaffCommand),

    #[command(subcommand)]
    Duty(DutyCommand),
}

#[derive(Subcommand)]
enum StaffCommand {
    Add {
        name: String,
        #[arg(short, long)]
        rank: Option<String>,
    },
    List {
        /// name | rank
        #[arg(short, long)]
        order_by: Option<String>,
    },
    Edit {
        id: i64,
        name: String,
        #[arg(short, long)]
        rank: Option<String>,
    },
    /// Delete a staff member and all of their duties
    Delete { id: i64 },
    /// Duty history of one staff member
    Duties {
        id: i64,
        /// date | off | honorary
        #[arg(short, long)]
        order_by: Option<String>,
    },
}

#[derive(Subcommand)]
enum DutyCommand {
    Add(DutyArgs),
    List {
        /// YYYY-MM
        #[arg(short, long)]
        month: Option<String>,
    },
    Edit {
        id: i64,
        #[command(flatten)]
        duty: DutyArgs,
    },
    Delete { id: i64 },
    /// Months that have duties, most recent first
    Months,
}

#[derive(Args)]
struct DutyArgs {
    /// DD/MM/YYYY
    duty_date: String,
    staff_id: i64,
    #[arg(long)]
    day_off_given: bool,
    /// DD/MM/YYYY
    #[arg(long)]
    day_off_date: Option<String>,
    #[arg(long)]
    honorary: bool,
    #[arg(short, long, default_value = "")]
    description: String,
}

impl From<DutyArgs> for DutyInput {
    fn from(args: DutyArgs) -> Self {
        DutyInput {
            duty_date: args.duty_date,
            staff_id: args.staff_id,
            day_off_given: args.day_off_given,
            day_off_date: args.day_off_date,
            honorary: args.honorary,
            description: args.description,
        }
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose {
        "duty_manager_lib=debug,duty_tools=debug"
    } else {
        "duty_manager_lib=info,duty_tools=info"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn print_staff(staff: &[Staff]) {
    for s in staff {
        println!("{:>5}  {:<30}  {}", s.id, s.name, s.rank_or_empty());
    }
}

fn print_summaries(staff: &[StaffSummary]) {
    println!("{:>5}  {:<30}  {:<15}  {:>7}  {:>8}", "id", "name", "rank", "pending", "received");
    for s in staff {
        println!(
            "{:>5}  {:<30}  {:<15}  {:>7}  {:>8}",
            s.id, s.name, s.rank, s.pending_days_off, s.received_days_off
        );
    }
}

fn print_duties(duties: &[DutyView]) {
    for d in duties {
        let mut flags = Vec::new();
        if d.day_off_given {
            flags.push("off-given");
        }
        if d.honorary {
            flags.push("honorary");
        }
        println!(
            "{:>5}  {}  {:<25}  off: {:<10}  [{}]  {}",
            d.id,
            d.duty_date_long,
            d.staff_name,
            d.day_off_date,
            flags.join(","),
            d.description
        );
    }
}

async fn run_staff(services: &AppServices, command: StaffCommand, json: bool) -> Result<()> {
    match command {
        StaffCommand::Add { name, rank } => {
            let id = commands::add_staff(services, &name, rank.as_deref()).await?;
            println!("{}", id);
        }
        StaffCommand::List { order_by } => {
            let staff = commands::staff_directory(services, order_by.as_deref()).await?;
            if json {
                print_json(&staff)?;
            } else {
                print_staff(&staff);
            }
        }
        StaffCommand::Edit { id, name, rank } => {
            commands::edit_staff(services, id, &name, rank.as_deref())
                .await
                .with_context(|| format!("failed to edit staff {}", id))?;
        }
        StaffCommand::Delete { id } => {
            commands::remove_staff(services, id)
                .await
                .with_context(|| format!("failed to delete staff {}", id))?;
        }
        StaffCommand::Duties { id, order_by } => {
            let history = commands::staff_duty_history(services, id, order_by.as_deref()).await?;
            if json {
                print_json(&history)?;
            } else {
                println!(
                    "{} {} (order: {})",
                    history.staff.rank_or_empty(),
                    history.staff.name,
                    history.order_by
                );
                print_duties(&history.duties);
            }
        }
    }
    Ok(())
}

async fn run_duty(services: &AppServices, command: DutyCommand, json: bool) -> Result<()> {
    match command {
        DutyCommand::Add(args) => {
            let id = commands::add_duty(services, &args.into()).await?;
            println!("{}", id);
        }
        DutyCommand::List { month } => {
            let board = commands::duty_board(services, month.as_deref()).await?;
            if json {
                print_json(&board)?;
            } else {
                print_duties(&board.duties);
            }
        }
        DutyCommand::Edit { id, duty } => {
            commands::edit_duty(services, id, &duty.into())
                .await
                .with_context(|| format!("failed to edit duty {}", id))?;
        }
        DutyCommand::Delete { id } => {
            commands::remove_duty(services, id)
                .await
                .with_context(|| format!("failed to delete duty {}", id))?;
        }
        DutyCommand::Months => {
            let months = services.duty.enumerate_months(&services.locale).await?;
            if json {
                print_json(&months)?;
            } else {
                for m in months {
                    println!("{}  {}", m.key, m.label);
                }
            }
        }
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = StoreConfig::new(&cli.db).with_max_connections(cli.max_connections);
    let pool = open_store(&config)
        .await
        .with_context(|| format!("failed to open database {}", cli.db.display()))?;
    let services = AppServices::new(pool);

    match cli.command {
        Commands::Init => {
            tracing::info!(path = %cli.db.display(), "database ready");
        }
        Commands::Overview { order_by } => {
            let overview = commands::staff_overview(&services, order_by.as_deref()).await?;
            if cli.json {
                print_json(&overview)?;
            } else {
                println!("order: {}", overview.order_by);
                print_summaries(&overview.staff);
                println!();
                println!("pending days off: {}", overview.staff_with_pending.len());
            }
        }
        Commands::Staff(command) => run_staff(&services, command, cli.json).await?,
        Commands::Duty(command) => run_duty(&services, command, cli.json).await?,
    }

    Ok(())
}
