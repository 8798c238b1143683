mod commands;
mod input;
mod output;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::process;

use commands::schedule::{CompareArgs, ExtraEmiArgs, ScheduleArgs, StepUpArgs};

/// Mortgage repayment projections and prepayment strategy comparisons
#[derive(Parser)]
#[command(
    name = "emi",
    version,
    about = "Mortgage repayment projections with decimal precision",
    long_about = "Projects a mortgage amortisation schedule and compares repayment \
                  strategies: the plain level-pay schedule, one or more extra EMIs \
                  paid at each year end, and an annual percentage step-up of the EMI."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format
    #[arg(long, default_value = "json", global = true)]
    output: OutputFormat,
}

#[derive(Subcommand)]
enum Commands {
    /// Project the plain amortisation schedule
    Schedule(ScheduleArgs),
    /// Project the schedule with extra EMIs paid at each year end
    ExtraEmi(ExtraEmiArgs),
    /// Project the schedule with an annual EMI step-up
    StepUp(StepUpArgs),
    /// Compare all three repayment strategies side by side
    Compare(CompareArgs),
    /// Print version information
    Version,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Csv,
    Minimal,
}

fn main() {
    let cli = Cli::parse();

    let result: Result<serde_json::Value, Box<dyn std::error::Error>> = match cli.command {
        Commands::Schedule(args) => commands::schedule::run_schedule(args),
        Commands::ExtraEmi(args) => commands::schedule::run_extra_emi(args),
        Commands::StepUp(args) => commands::schedule::run_step_up(args),
        Commands::Compare(args) => commands::schedule::run_compare(args),
        Commands::Version => {
            println!("emi {}", env!("CARGO_PKG_VERSION"));
            return;
        }
    };

    match result {
        Ok(value) => {
            output::format_output(&cli.output, &value);
            process::exit(0);
        }
        Err(e) => {
            eprintln!("{}: {}", "error".red().bold(), e);
            process::exit(1);
        }
    }
}
