use std::time::Duration;

use anyhow::Context;
use clap::{Parser, Subcommand};
use inquire::{CustomType, Password, PasswordDisplayMode};
use kair_core::{City, Config, Dashboard, DataProvider, ProviderId, provider_from_config};
use tracing::info;

use crate::render;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "kair", version, about = "Karnataka weather and air-quality monitor")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Store the Gemini API key and refresh interval.
    Configure,

    /// Fetch once and print every city plus the selected city's details.
    Show {
        /// City to show in detail; defaults to the first one.
        #[arg(long)]
        city: Option<City>,

        /// Print the readings as JSON instead.
        #[arg(long)]
        json: bool,

        /// Search provider to use (gemini, offline).
        #[arg(long, value_parser = parse_provider)]
        provider: Option<ProviderId>,

        /// Skip the search provider and show placeholder data.
        #[arg(long, conflicts_with = "provider")]
        offline: bool,
    },

    /// Keep refreshing until interrupted.
    Watch {
        /// City to show in detail; defaults to the first one.
        #[arg(long)]
        city: Option<City>,

        /// Seconds between refreshes; defaults to the configured interval.
        #[arg(long)]
        interval: Option<u64>,

        /// Search provider to use (gemini, offline).
        #[arg(long, value_parser = parse_provider)]
        provider: Option<ProviderId>,

        /// Skip the search provider and show placeholder data.
        #[arg(long, conflicts_with = "provider")]
        offline: bool,
    },

    /// Classify an AQI value.
    Classify {
        #[arg(allow_negative_numbers = true)]
        aqi: i32,
    },
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        match self.command {
            Command::Configure => configure()?,
            Command::Show { city, json, provider, offline } => {
                let config = Config::load()?;
                let mut dash = build_dashboard(&config, pick_provider(provider, offline))?;

                dash.refresh().await;
                if let Some(city) = city {
                    dash.select(city);
                }

                if json {
                    let out = serde_json::to_string_pretty(dash.readings())
                        .context("Failed to serialize readings")?;
                    println!("{out}");
                } else {
                    print!("{}", render::dashboard(&dash));
                }
            }
            Command::Watch { city, interval, provider, offline } => {
                let config = Config::load()?;
                let period = interval
                    .map(|secs| Duration::from_secs(secs.max(1)))
                    .unwrap_or_else(|| config.refresh_interval());
                let dash = build_dashboard(&config, pick_provider(provider, offline))?;

                watch(dash, city, period).await?;
            }
            Command::Classify { aqi } => {
                print!("{}", render::classification(aqi));
            }
        }

        Ok(())
    }
}

fn parse_provider(value: &str) -> anyhow::Result<ProviderId> {
    ProviderId::try_from(value)
}

/// `--offline` is shorthand for `--provider offline`; Gemini is the default.
fn pick_provider(provider: Option<ProviderId>, offline: bool) -> ProviderId {
    if offline { ProviderId::Offline } else { provider.unwrap_or(ProviderId::Gemini) }
}

fn build_dashboard(config: &Config, id: ProviderId) -> anyhow::Result<Dashboard> {
    let source = provider_from_config(id, config)?;

    info!(provider = %id, "Using search provider");
    Ok(Dashboard::new(DataProvider::new(source)))
}

fn configure() -> anyhow::Result<()> {
    let mut config = Config::load()?;

    let api_key = Password::new("Gemini API key:")
        .with_display_mode(PasswordDisplayMode::Masked)
        .without_confirmation()
        .with_help_message("Leave empty to keep the current key")
        .prompt()
        .context("Failed to read API key")?;

    if !api_key.trim().is_empty() {
        config.set_api_key(api_key.trim().to_string());
    } else if config.api_key.is_none() {
        println!("No API key stored; `kair show` will need GEMINI_API_KEY or --offline.");
    }

    config.refresh_interval_secs = CustomType::<u64>::new("Refresh interval (seconds):")
        .with_default(config.refresh_interval_secs)
        .with_error_message("Please enter a whole number of seconds")
        .prompt()
        .context("Failed to read refresh interval")?;

    let path = config.save()?;
    println!("Configuration saved to {}", path.display());

    Ok(())
}

async fn watch(dash: Dashboard, city: Option<City>, period: Duration) -> anyhow::Result<()> {
    let term = console::Term::stdout();
    let ctrl_c = async { tokio::signal::ctrl_c().await.context("Failed to listen for Ctrl-C") };

    watch_until(dash, city, period, ctrl_c, |dash| {
        term.clear_screen().context("Failed to clear terminal")?;
        print!("{}", render::dashboard(dash));
        println!("\nRefreshing every {}s. Press Ctrl-C to quit.", period.as_secs());
        Ok(())
    })
    .await
}

/// Refreshes and draws every `period` until `shutdown` resolves.
///
/// A fetch still in flight when `shutdown` resolves is dropped and nothing more is drawn.
async fn watch_until<S, D>(
    mut dash: Dashboard,
    mut city: Option<City>,
    period: Duration,
    shutdown: S,
    mut draw: D,
) -> anyhow::Result<()>
where
    S: Future<Output = anyhow::Result<()>>,
    D: FnMut(&Dashboard) -> anyhow::Result<()>,
{
    let mut ticker = tokio::time::interval(period);
    ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                tokio::select! {
                    _ = dash.refresh() => {}
                    res = &mut shutdown => {
                        res?;
                        info!("Stopping watch during refresh");
                        break;
                    }
                }
                if let Some(city) = city.take() {
                    dash.select(city);
                }
                draw(&dash)?;
            }
            res = &mut shutdown => {
                res?;
                info!("Stopping watch");
                break;
            }
        }
    }

    Ok(())
}
