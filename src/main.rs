//! polymarket_best_bid - Main Entry Point
//!
//! Places one GTC limit buy one tick above the best bid of an outcome token,
//! capped by a price ceiling, or lists cheap outcomes worth bidding on.

use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use rust_decimal::Decimal;
use tracing::{info, warn, Level};
use tracing_subscriber::FmtSubscriber;

use polymarket_best_bid::bot::{self, BidParams, RunOutcome};
use polymarket_best_bid::config::{load_config, AppConfig, Overrides};
use polymarket_best_bid::polymarket::allowances::allowance_report;
use polymarket_best_bid::polymarket::discovery::{filter_by_question, find_low_price_outcomes, MarketDetails};
use polymarket_best_bid::{PolymarketClient, PolymarketRestClient};

/// CLI arguments for the application
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to configuration file (optional)
    #[arg(short, long, default_value = "config.toml", global = true)]
    config: String,

    /// Log level (trace, debug, info, warn, error); defaults to settings.log_level
    #[arg(long, global = true)]
    log_level: Option<String>,

    /// Log output format
    #[arg(long, value_enum, default_value_t = LogFormat::Text, global = true)]
    log_format: LogFormat,

    #[command(subcommand)]
    command: Command,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum LogFormat {
    Text,
    Json,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Bid one tick above the best bid of a token
    Bid {
        /// Outcome token id
        #[arg(long)]
        token_id: String,

        /// Price ceiling, e.g. 0.05
        #[arg(long)]
        max_price: Option<Decimal>,

        /// Shares to order
        #[arg(long)]
        size: Option<Decimal>,

        /// Only report the order that would be placed
        #[arg(long)]
        dry_run: bool,

        /// Place a real order; wins over --dry-run
        #[arg(long)]
        no_dry_run: bool,
    },
    /// List active outcomes priced at or below a ceiling
    Markets {
        /// Price ceiling; defaults to the configured max bid price
        #[arg(long)]
        max_price: Option<Decimal>,

        /// Number of markets to scan
        #[arg(long, default_value_t = 100)]
        limit: u32,

        /// Only markets whose question contains this text (case-insensitive)
        #[arg(long)]
        query: Option<String>,
    },
    /// Show one market by condition id
    Market {
        /// Market condition id
        condition_id: String,
    },
    /// List the contracts that must be approved before trading
    Allowances,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let args = Args::parse();

    let config = load_config(Some(args.config.as_str())).context("failed to load configuration")?;

    init_logging(
        args.log_level.as_deref().unwrap_or(&config.settings.log_level),
        args.log_format,
    )?;

    info!("Starting polymarket_best_bid");
    info!("Configuration file: {}", args.config);

    match args.command {
        Command::Bid {
            token_id,
            max_price,
            size,
            dry_run,
            no_dry_run,
        } => {
            let overrides = Overrides {
                max_bid_price: max_price,
                order_size: size,
                dry_run: Overrides::dry_run_from_flags(dry_run, no_dry_run),
            };
            run_bid(config.with_overrides(&overrides), token_id).await
        }
        Command::Markets {
            max_price,
            limit,
            query,
        } => {
            let max_price = max_price.unwrap_or(config.bot.max_bid_price);
            run_markets(&config, max_price, limit, query.as_deref().unwrap_or("")).await
        }
        Command::Market { condition_id } => run_market(&config, &condition_id).await,
        Command::Allowances => {
            show_allowances();
            Ok(())
        }
    }
}

fn init_logging(log_level: &str, format: LogFormat) -> Result<()> {
    let level = match log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let builder = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(true)
        .with_file(true)
        .with_line_number(true);

    match format {
        LogFormat::Text => tracing::subscriber::set_global_default(builder.finish())?,
        LogFormat::Json => tracing::subscriber::set_global_default(builder.json().finish())?,
    }
    Ok(())
}

async fn run_bid(config: AppConfig, token_id: String) -> Result<()> {
    config.validate()?;
    info!("Configuration: {}", config.redacted_summary());

    let params = BidParams::from_config(&config, token_id)?;
    let timeout = Duration::from_secs(config.settings.request_timeout_seconds);
    let mut client = PolymarketClient::new(&config.polymarket, timeout)?;

    if !params.dry_run {
        client
            .authenticate()
            .await
            .context("failed to obtain API credentials")?;
    }

    let outcome = bot::run(&params, &client, &client)
        .await
        .with_context(|| format!("bid run for token {} failed", params.token_id))?;

    match &outcome {
        RunOutcome::NoEligibleBid { snapshot, max_price } => info!(
            best_bid = ?snapshot.best_bid,
            max_price = %max_price,
            "No order placed"
        ),
        RunOutcome::Simulated { intent } => info!(
            price = %intent.price,
            size = %intent.size,
            "Dry run complete; pass --no-dry-run to place the order"
        ),
        RunOutcome::Submitted { ack, .. } => info!(
            order_id = ack.order_id().unwrap_or("-"),
            response = %ack,
            "Order submitted"
        ),
    }
    Ok(())
}

fn rest_client(config: &AppConfig) -> Result<PolymarketRestClient> {
    let timeout = Duration::from_secs(config.settings.request_timeout_seconds);
    Ok(PolymarketRestClient::with_timeout(
        &config.polymarket.host,
        &config.polymarket.gamma_url,
        timeout,
    )?)
}

async fn run_markets(config: &AppConfig, max_price: Decimal, limit: u32, query: &str) -> Result<()> {
    let markets = rest_client(config)?
        .get_gamma_markets(Some(limit), Some(true))
        .await
        .context("failed to fetch markets")?;
    let markets = filter_by_question(markets, query);
    let outcomes = find_low_price_outcomes(&markets, max_price);

    info!(
        scanned = markets.len(),
        found = outcomes.len(),
        max_price = %max_price,
        "Low-price outcomes"
    );
    for outcome in &outcomes {
        info!(
            question = outcome.question.as_deref().unwrap_or("-"),
            outcome = %outcome.outcome,
            token_id = outcome.token_id.as_deref().unwrap_or("-"),
            price = %outcome.price,
            condition_id = outcome.condition_id.as_deref().unwrap_or("-"),
            "Candidate"
        );
    }
    Ok(())
}

async fn run_market(config: &AppConfig, condition_id: &str) -> Result<()> {
    let market = rest_client(config)?
        .get_gamma_market(condition_id)
        .await
        .with_context(|| format!("failed to fetch market {}", condition_id))?;

    let Some(market) = market else {
        warn!(condition_id, "Market not found");
        return Ok(());
    };

    let details = MarketDetails::from(&market);
    info!(
        question = details.question.as_deref().unwrap_or("N/A"),
        condition_id = details.condition_id.as_deref().unwrap_or("N/A"),
        volume = details.volume.as_deref().unwrap_or("N/A"),
        liquidity = details.liquidity.as_deref().unwrap_or("N/A"),
        end_date = details.end_date.as_deref().unwrap_or("N/A"),
        "Market"
    );
    for token in &details.outcomes {
        info!(
            outcome = %token.outcome,
            token_id = token.token_id.as_deref().unwrap_or("N/A"),
            price = ?token.price,
            "Outcome"
        );
    }
    Ok(())
}

fn show_allowances() {
    let report = allowance_report();

    info!(
        usdc = report.usdc,
        conditional_tokens = report.conditional_tokens,
        "Approve these contracts to spend USDC and conditional tokens before trading"
    );
    for spender in &report.spenders {
        info!(name = spender.name, address = spender.address, "Contract to approve");
    }
    info!(url = %report.explorer_url, "Check current allowances on PolygonScan");
}
