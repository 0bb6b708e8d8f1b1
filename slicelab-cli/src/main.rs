//! Slicelab CLI: simulate and compare TWAP/VWAP order slicing.
//!
//! Commands:
//! - `run`: execute one order from a TOML config or command-line flags
//! - `sweep`: execute the order at every valid start index and summarize slippage

use anyhow::{bail, Context, Result};
use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use slicelab_core::{Order, Side, Strategy};
use slicelab_runner::config::DEFAULT_BARS_FROM_END;
use slicelab_runner::{
    export_sweep_csv, load_market_data, render_report, render_sweep, run_execution,
    save_artifacts, sweep_start_indices, DataConfig, ExecutionSection, RunConfig, StartPoint,
    SweepConfig,
};

#[derive(Parser)]
#[command(
    name = "slicelab",
    about = "Slicelab CLI: TWAP/VWAP execution slicing simulator"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Execute one order and compare strategies over the same window.
    Run {
        /// Path to a TOML config file. Replaces the data, order, strategy and start flags.
        #[arg(
            long,
            conflicts_with_all = [
                "data", "synthetic", "bars", "seed", "size", "direction", "slices",
                "strategy", "start_index", "start_date", "from_end",
            ]
        )]
        config: Option<PathBuf>,

        #[command(flatten)]
        data: DataArgs,

        #[command(flatten)]
        order: OrderArgs,

        /// Strategy to run.
        #[arg(long, value_enum, default_value_t = StrategyArg::Both)]
        strategy: StrategyArg,

        /// Zero-based index of the first bar in the window.
        #[arg(long, conflicts_with_all = ["start_date", "from_end"])]
        start_index: Option<usize>,

        /// Date (YYYY-MM-DD) of the first bar in the window.
        #[arg(long, conflicts_with = "from_end")]
        start_date: Option<String>,

        /// Start this many bars before the end of the data. Defaults to 50.
        #[arg(long)]
        from_end: Option<usize>,

        /// Output directory for report JSON and slice CSVs.
        #[arg(long, default_value = "results")]
        output_dir: PathBuf,

        /// Print results without writing artifacts.
        #[arg(long, default_value_t = false)]
        no_save: bool,
    },
    /// Execute the order at every valid start index and summarize slippage.
    Sweep {
        #[command(flatten)]
        data: DataArgs,

        #[command(flatten)]
        order: OrderArgs,

        /// Strategy to sweep.
        #[arg(long, value_enum, default_value_t = StrategyArg::Both)]
        strategy: StrategyArg,

        /// Evaluate every n-th start index.
        #[arg(long, default_value_t = 1)]
        stride: usize,

        /// Write every sweep point to this CSV file.
        #[arg(long)]
        output: Option<PathBuf>,
    },
}

#[derive(Args)]
struct DataArgs {
    /// CSV file with Date, Open, High, Low, Close, Volume columns.
    #[arg(long, conflicts_with = "synthetic")]
    data: Option<PathBuf>,

    /// Use seeded synthetic bars instead of a CSV file.
    #[arg(long, default_value_t = false)]
    synthetic: bool,

    /// Number of synthetic bars.
    #[arg(long, default_value_t = 252)]
    bars: usize,

    /// Seed for synthetic bars.
    #[arg(long, default_value_t = 42)]
    seed: u64,
}

#[derive(Args)]
struct OrderArgs {
    /// Total shares to execute.
    #[arg(long, default_value_t = 100_000.0)]
    size: f64,

    /// Order direction: buy or sell.
    #[arg(long, default_value = "buy")]
    direction: Side,

    /// Number of daily slices.
    #[arg(long, default_value_t = slicelab_core::domain::DEFAULT_NUM_SLICES)]
    slices: usize,
}

#[derive(Clone, Copy, ValueEnum)]
enum StrategyArg {
    Twap,
    Vwap,
    Both,
}

impl StrategyArg {
    fn strategies(self) -> Vec<Strategy> {
        match self {
            Self::Twap => vec![Strategy::Twap],
            Self::Vwap => vec![Strategy::Vwap],
            Self::Both => Strategy::ALL.to_vec(),
        }
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Run {
            config,
            data,
            order,
            strategy,
            start_index,
            start_date,
            from_end,
            output_dir,
            no_save,
        } => {
            let run_config = match config {
                Some(path) => RunConfig::from_file(&path)
                    .with_context(|| format!("failed to load config {}", path.display()))?,
                None => {
                    let start = start_point(start_index, start_date.as_deref(), from_end)?;
                    RunConfig {
                        data: data_config(&data)?,
                        order: build_order(&order)?,
                        execution: ExecutionSection {
                            strategies: strategy.strategies(),
                            start,
                        },
                    }
                }
            };
            run_cmd(&run_config, &output_dir, no_save)
        }
        Commands::Sweep {
            data,
            order,
            strategy,
            stride,
            output,
        } => sweep_cmd(&data, &order, strategy, stride, output),
    }
}

fn run_cmd(config: &RunConfig, output_dir: &std::path::Path, no_save: bool) -> Result<()> {
    let report = run_execution(config)?;

    println!();
    print!("{}", render_report(&report));

    if !no_save {
        let run_dir = save_artifacts(&report, output_dir)?;
        println!("Artifacts saved to: {}", run_dir.display());
    }

    Ok(())
}

fn sweep_cmd(
    data: &DataArgs,
    order: &OrderArgs,
    strategy: StrategyArg,
    stride: usize,
    output: Option<PathBuf>,
) -> Result<()> {
    let loaded = load_market_data(&data_config(data)?)?;
    let order = build_order(order)?;
    let config = SweepConfig {
        strategies: strategy.strategies(),
        stride,
    };

    let result = sweep_start_indices(&loaded.data, &order, &config)?;

    println!();
    if loaded.has_synthetic {
        println!("NOTE: results are based on SYNTHETIC data");
    }
    println!(
        "Order: {} {} shares in {} slices, {} windows",
        order.direction(),
        order.size(),
        order.num_slices(),
        result.points.len() / config.strategies.len().max(1)
    );
    print!("{}", render_sweep(&result));

    if let Some(path) = output {
        std::fs::write(&path, export_sweep_csv(&result)?)
            .with_context(|| format!("failed to write {}", path.display()))?;
        println!("Sweep points saved to: {}", path.display());
    }

    Ok(())
}

fn data_config(args: &DataArgs) -> Result<DataConfig> {
    match (&args.data, args.synthetic) {
        (Some(path), false) => Ok(DataConfig::csv(path)),
        (None, true) => Ok(DataConfig::synthetic(args.bars, args.seed)),
        (Some(_), true) => bail!("--data and --synthetic are mutually exclusive"),
        (None, false) => bail!("one of --data, --synthetic or --config is required"),
    }
}

fn build_order(args: &OrderArgs) -> Result<Order> {
    Ok(Order::new(args.size, args.direction, args.slices)?)
}

fn start_point(
    start_index: Option<usize>,
    start_date: Option<&str>,
    from_end: Option<usize>,
) -> Result<StartPoint> {
    if let Some(index) = start_index {
        return Ok(StartPoint::Index(index));
    }
    if let Some(date) = start_date {
        let date = NaiveDate::parse_from_str(date, "%Y-%m-%d")
            .with_context(|| format!("invalid --start-date '{date}' (expected YYYY-MM-DD)"))?;
        return Ok(StartPoint::Date(date));
    }
    Ok(StartPoint::FromEnd(from_end.unwrap_or(DEFAULT_BARS_FROM_END)))
}
