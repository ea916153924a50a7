//! One-shot queries against the scoring service.
//!
//! Commands:
//! - `signals`: fetch the ranked list, apply local filters, print a table or JSON
//! - `history`: fetch daily closes for one ticker
//! - `config`: print the resolved configuration

mod report;

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use signalradar_core::state::{MainViewState, ModalViewState};
use signalradar_core::{HttpSignalApi, InlineDispatcher, Radar, RadarConfig};

#[derive(Parser)]
#[command(
    name = "signalradar",
    version,
    about = "Ranked technical signals from the scoring service"
)]
struct Cli {
    /// Config file (TOML). Defaults to <config dir>/signalradar/config.toml when present.
    #[arg(long, global = true, env = "SIGNALRADAR_CONFIG")]
    config: Option<PathBuf>,

    /// Scoring service base URL; overrides file and environment.
    #[arg(long, global = true)]
    api_base: Option<String>,

    /// Per-request timeout in seconds.
    #[arg(long, global = true)]
    timeout: Option<u64>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch ranked signals and print those passing the filters.
    Signals {
        /// Rows to request (clamped to 1..=50). Defaults to the configured limit.
        #[arg(long, allow_negative_numbers = true)]
        limit: Option<i64>,

        /// Custom symbols, comma or space separated (e.g. "aapl, msft").
        #[arg(long)]
        tickers: Option<String>,

        /// Minimum composite score.
        #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
        min_score: f64,

        /// Lower RSI bound (0-100).
        #[arg(long, default_value_t = 0.0)]
        rsi_min: f64,

        /// Upper RSI bound (0-100).
        #[arg(long, default_value_t = 100.0)]
        rsi_max: f64,

        /// Only rows tagged "Bullish Momentum".
        #[arg(long, default_value_t = false)]
        bullish: bool,

        /// Only rows tagged "Strong Uptrend".
        #[arg(long, default_value_t = false)]
        uptrend: bool,

        /// Print JSON instead of a table.
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// Fetch daily closes for one ticker.
    History {
        ticker: String,

        /// Lookback in days (clamped to 30..=730). Defaults to the configured value.
        #[arg(long)]
        days: Option<u32>,

        /// Print JSON instead of a table.
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// Print the resolved configuration as TOML.
    Config,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = resolve_config(&cli)?;

    match cli.command {
        Commands::Signals {
            limit,
            tickers,
            min_score,
            rsi_min,
            rsi_max,
            bullish,
            uptrend,
            json,
        } => {
            let filters = Filters {
                min_score,
                rsi_min,
                rsi_max,
                bullish,
                uptrend,
            };
            run_signals(&config, limit, tickers, filters, json)
        }
        Commands::History { ticker, days, json } => {
            let mut config = config;
            if let Some(days) = days {
                config.history_days = days;
                config = config.normalized();
            }
            run_history(&config, &ticker, json)
        }
        Commands::Config => {
            print!("{}", config.to_toml().context("serializing config")?);
            Ok(())
        }
    }
}

/// Defaults → file → environment → flags.
fn resolve_config(cli: &Cli) -> Result<RadarConfig> {
    let mut config = RadarConfig::load(cli.config.as_deref()).context("loading configuration")?;
    if let Some(base) = &cli.api_base {
        config.api_base = base.clone();
    }
    if let Some(secs) = cli.timeout {
        config.timeout_secs = secs;
    }
    let config = config.normalized();
    config.base_url()?;
    tracing::debug!(
        api_base = %config.api_base,
        timeout_secs = config.timeout_secs,
        history_days = config.history_days,
        "resolved configuration"
    );
    Ok(config)
}

struct Filters {
    min_score: f64,
    rsi_min: f64,
    rsi_max: f64,
    bullish: bool,
    uptrend: bool,
}

fn connect(config: &RadarConfig) -> Result<Radar> {
    let api = HttpSignalApi::from_config(config).context("creating API client")?;
    Ok(Radar::new(config, Arc::new(api), Arc::new(InlineDispatcher)))
}

/// Long enough for the request's own timeout to fire first.
fn settle_budget(config: &RadarConfig) -> Duration {
    config.timeout().saturating_add(Duration::from_secs(1))
}

fn run_signals(
    config: &RadarConfig,
    limit: Option<i64>,
    tickers: Option<String>,
    filters: Filters,
    json: bool,
) -> Result<()> {
    let mut radar = connect(config)?;
    radar.update_criteria(|c| {
        c.set_min_score(filters.min_score);
        c.set_rsi_min(filters.rsi_min);
        c.set_rsi_max(filters.rsi_max);
        c.set_require_bullish(filters.bullish);
        c.set_require_uptrend(filters.uptrend);
    });

    let limit = limit.unwrap_or(config.default_limit.get() as i64);
    radar
        .signals_mut()
        .request_signals(limit, tickers.as_deref());
    if !radar.signals_mut().settle(settle_budget(config)) {
        bail!("signals request did not complete");
    }

    let snapshot = match radar.signals().state() {
        MainViewState::Loaded(snapshot) => snapshot,
        MainViewState::Failed(message) => bail!("{message}"),
        other => bail!("signals request ended in state {}", other.label()),
    };

    let criteria = radar.criteria();
    if json {
        let visible = radar.visible_rows();
        let value = report::signals_json(&snapshot.universe, &visible, criteria);
        println!("{}", serde_json::to_string_pretty(&value)?);
        return Ok(());
    }

    let ranked = radar.ranked_rows();
    print!("{}", report::signals_table(&ranked));
    println!();
    println!("{}", report::filter_footer(ranked.len(), snapshot.len(), criteria));
    println!("(Score is a composite of trend, RSI, recent returns, volume, and volatility.)");
    Ok(())
}

fn run_history(config: &RadarConfig, ticker: &str, json: bool) -> Result<()> {
    let mut radar = connect(config)?;
    radar.history_mut().open_history(ticker);
    if !radar.history_mut().settle(settle_budget(config)) {
        bail!("history request did not complete");
    }

    match radar.history().state() {
        ModalViewState::Loaded(_, history) => {
            if json {
                println!("{}", serde_json::to_string_pretty(&report::history_json(history))?);
            } else {
                print!("{}", report::history_table(history));
            }
            Ok(())
        }
        ModalViewState::Failed(ticker, message) if ticker.is_empty() => bail!("{message}"),
        ModalViewState::Failed(ticker, message) => bail!("{ticker}: {message}"),
        other => bail!("history request ended unexpectedly: {other:?}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn signals_flags_parse() {
        let cli = Cli::try_parse_from([
            "signalradar",
            "--api-base",
            "http://10.1.1.1:8000",
            "signals",
            "--limit",
            "25",
            "--tickers",
            "aapl, msft",
            "--rsi-min",
            "30",
            "--bullish",
            "--json",
        ])
        .unwrap();
        assert_eq!(cli.api_base.as_deref(), Some("http://10.1.1.1:8000"));
        match cli.command {
            Commands::Signals {
                limit,
                tickers,
                rsi_min,
                rsi_max,
                bullish,
                uptrend,
                json,
                ..
            } => {
                assert_eq!(limit, Some(25));
                assert_eq!(tickers.as_deref(), Some("aapl, msft"));
                assert_eq!(rsi_min, 30.0);
                assert_eq!(rsi_max, 100.0);
                assert!(bullish && !uptrend && json);
            }
            _ => panic!("expected signals"),
        }
    }

    #[test]
    fn history_takes_positional_ticker() {
        let cli = Cli::try_parse_from(["signalradar", "history", "spy", "--days", "60"]).unwrap();
        match cli.command {
            Commands::History { ticker, days, json } => {
                assert_eq!(ticker, "spy");
                assert_eq!(days, Some(60));
                assert!(!json);
            }
            _ => panic!("expected history"),
        }
    }

    #[test]
    fn settle_budget_outlasts_request_timeout() {
        let mut config = RadarConfig::default();
        assert_eq!(settle_budget(&config), Duration::from_secs(21));
        config.timeout_secs = u64::MAX;
        assert_eq!(settle_budget(&config), Duration::MAX);
    }

    #[test]
    fn global_flags_work_after_subcommand() {
        let cli = Cli::try_parse_from(["signalradar", "config", "--timeout", "5"]).unwrap();
        assert_eq!(cli.timeout, Some(5));
        assert!(matches!(cli.command, Commands::Config));
    }
}
