//! StopRisk CLI: loss-at-stop and time-to-stop estimates.
//!
//! Commands:
//! - `calc`: build a request from flags and print the report
//! - `run`: execute a request from a TOML config file
//! - `intervals`: list the known bar interval labels

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use stoprisk_core::config::{
    MarketConfig, PositionConfig, RequestConfig, VolatilityConfig, DEFAULT_ATR_PERIOD,
};
use stoprisk_core::domain::{BarInterval, Instrument, Side};
use stoprisk_core::report::RiskReport;
use stoprisk_core::risk::{calculate, StopInput};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "stoprisk",
    about = "StopRisk: loss at stop and median time to stop for a crypto position"
)]
struct Cli {
    /// Log intermediate values to stderr (overridden by RUST_LOG).
    #[arg(long, short, global = true, default_value_t = false)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute risk for a position described on the command line.
    Calc {
        /// Traded pair, e.g. BTC-USDT. A bare symbol is quoted in USDT.
        #[arg(long)]
        instrument: Option<Instrument>,

        /// Candle file (.csv or .json), oldest candle first.
        #[arg(long)]
        candles: Option<PathBuf>,

        /// Bar interval of the candle file: 1m, 5m, 15m, 1H, 4H, 1D or <n>s.
        #[arg(long, default_value = "1H")]
        interval: BarInterval,

        /// ATR lookback in bars.
        #[arg(long, default_value_t = DEFAULT_ATR_PERIOD)]
        period: usize,

        /// Custom ATR in price units (skips the ATR computation).
        #[arg(long, allow_negative_numbers = true)]
        atr: Option<f64>,

        /// Position direction: long or short.
        #[arg(long, default_value = "long")]
        side: Side,

        /// Position size in quote currency.
        #[arg(long, allow_negative_numbers = true)]
        notional: f64,

        /// Stop distance as a percentage of the last price. Wins over --stop-level.
        #[arg(long, allow_negative_numbers = true)]
        stop_pct: Option<f64>,

        /// Stop as an absolute price level.
        #[arg(long, allow_negative_numbers = true)]
        stop_level: Option<f64>,

        /// Independent quote used instead of the last close.
        #[arg(long, allow_negative_numbers = true)]
        last_price: Option<f64>,

        /// Keep only the most recent N candles.
        #[arg(long)]
        limit: Option<usize>,

        /// Print the report as JSON.
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// Compute risk for a request stored in a TOML file.
    Run {
        /// Path to a TOML request file.
        #[arg(long)]
        config: PathBuf,

        /// Print the report as JSON.
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// List known bar interval labels and their length in seconds.
    Intervals,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Calc {
            instrument,
            candles,
            interval,
            period,
            atr,
            side,
            notional,
            stop_pct,
            stop_level,
            last_price,
            limit,
            json,
        } => {
            let config = RequestConfig {
                market: MarketConfig {
                    instrument,
                    candles,
                    interval,
                    limit,
                    last_price,
                },
                volatility: VolatilityConfig { period, atr },
                position: PositionConfig { side, notional },
                stop: StopInput {
                    percent: stop_pct,
                    level: stop_level,
                },
                base_dir: None,
            };
            config.validate()?;
            run_request(&config, json)
        }
        Commands::Run { config, json } => {
            let request_config = RequestConfig::from_file(&config)
                .with_context(|| format!("loading {}", config.display()))?;
            run_request(&request_config, json)
        }
        Commands::Intervals => {
            for interval in BarInterval::KNOWN {
                println!("{:<4} {:>6} s", interval.label(), interval.seconds());
            }
            Ok(())
        }
    }
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run_request(config: &RequestConfig, json: bool) -> Result<()> {
    let request = config.build_request()?;
    info!(candles = request.series.len(), side = %request.side, "running calculation");

    let result = calculate(&request)?;
    let report =
        RiskReport::new(&request, result).with_instrument(config.market.instrument.clone());

    if json {
        println!("{}", report.to_json()?);
    } else {
        println!("{report}");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("stoprisk").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn negative_numbers_reach_the_engine() {
        let cli = parse(&["calc", "--notional", "-5", "--atr", "-1", "--stop-pct", "1"]);
        match cli.command {
            Commands::Calc { notional, atr, .. } => {
                assert_eq!(notional, -5.0);
                assert_eq!(atr, Some(-1.0));
            }
            _ => panic!("expected calc"),
        }
    }

    #[test]
    fn instrument_flag_parses_pair() {
        let cli = parse(&["calc", "--instrument", "ETH-USDC", "--notional", "10"]);
        match cli.command {
            Commands::Calc { instrument, .. } => {
                let inst = instrument.unwrap();
                assert_eq!(inst.base(), "ETH");
                assert_eq!(inst.quote(), "USDC");
            }
            _ => panic!("expected calc"),
        }
    }

    #[test]
    fn malformed_instrument_rejected() {
        let args = ["stoprisk", "calc", "--instrument", "BTC-", "--notional", "10"];
        assert!(Cli::try_parse_from(args).is_err());
    }
}
