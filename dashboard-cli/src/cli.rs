use anyhow::{Context, anyhow};
use chrono::Local;
use clap::{Parser, Subcommand};
use dashboard_core::{
    Config, Dashboard, JsonFileStore, OpenWeatherGateway, Phase, UnitSystem,
    config::API_KEY_ENV,
};
use inquire::{InquireError, Password, PasswordDisplayMode, Select, Text};

use crate::{
    prompt::{self, PromptCommand},
    render::{render, render_recent},
};

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "weather-dashboard", version, about = "Smart Weather Dashboard")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Store the OpenWeatherMap API key and default units.
    Configure,

    /// Show current weather, forecast and advice for a city.
    Show {
        /// City name, e.g. "Paris".
        city: String,

        /// Display Fahrenheit and mph instead of Celsius and m/s.
        #[arg(long)]
        imperial: bool,
    },

    /// Search repeatedly from a prompt.
    Interactive {
        /// Start in Fahrenheit and mph.
        #[arg(long)]
        imperial: bool,
    },

    /// List recent searches.
    Recent,
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        let config = Config::load()?;

        match self.command {
            Command::Configure => configure(config),
            Command::Show { city, imperial } => show(&config, &city, imperial).await,
            Command::Interactive { imperial } => interactive(&config, imperial).await,
            Command::Recent => {
                let dashboard = open_dashboard(&config, false)?;
                println!("{}", render_recent(dashboard.recent().names()));
                Ok(())
            }
        }
    }
}

fn open_dashboard(config: &Config, imperial: bool) -> anyhow::Result<Dashboard<JsonFileStore>> {
    let store = JsonFileStore::new(Config::storage_file_path()?);
    tracing::debug!(path = %store.path().display(), "using storage file");

    let units = if imperial { UnitSystem::Imperial } else { config.default_units() };
    Ok(Dashboard::new(store).with_units(units))
}

fn configure(mut config: Config) -> anyhow::Result<()> {
    let api_key = Password::new("OpenWeatherMap API key:")
        .with_display_mode(PasswordDisplayMode::Masked)
        .without_confirmation()
        .prompt()
        .context("Failed to read API key")?;

    let api_key = api_key.trim().to_string();
    if api_key.is_empty() {
        return Err(anyhow!("API key must not be empty"));
    }

    let units = Select::new("Default units:", vec![UnitSystem::Metric, UnitSystem::Imperial])
        .prompt()
        .context("Failed to read unit preference")?;

    config.set_api_key(api_key);
    config.units = Some(units);
    config.save()?;

    println!("Saved configuration to {}", Config::config_file_path()?.display());
    Ok(())
}

fn print_key_hint(config: &Config) {
    if config.resolved_api_key().is_none() {
        eprintln!("Hint: run `weather-dashboard configure` or set {API_KEY_ENV}.");
    }
}

async fn show(config: &Config, city: &str, imperial: bool) -> anyhow::Result<()> {
    let gateway = OpenWeatherGateway::from_config(config)?;
    let mut dashboard = open_dashboard(config, imperial)?;

    dashboard.set_input(city);
    if dashboard.search(&gateway, city).await == Phase::Error {
        print_key_hint(config);
        let message = dashboard.error().unwrap_or("Search failed").to_string();
        return Err(anyhow!(message));
    }

    print!("{}", render(&dashboard.view(Local::now().date_naive())));
    Ok(())
}

async fn interactive(config: &Config, imperial: bool) -> anyhow::Result<()> {
    let gateway = OpenWeatherGateway::from_config(config)?;
    let mut dashboard = open_dashboard(config, imperial)?;

    println!("{}", prompt::HELP);
    if !dashboard.recent().is_empty() {
        println!("{}", render_recent(dashboard.recent().names()));
    }

    loop {
        let line = match Text::new("City:").with_help_message(":h for help").prompt() {
            Ok(line) => line,
            Err(InquireError::OperationCanceled | InquireError::OperationInterrupted) => break,
            Err(err) => return Err(err.into()),
        };

        // Typed searches replace the input field; recent shortcuts leave it alone.
        let (city, typed) = match prompt::parse(&line) {
            PromptCommand::Search(city) => (city, true),
            PromptCommand::Recent(n) => match dashboard.recent().nth(n) {
                Some(city) => (city.to_string(), false),
                None => {
                    println!("No recent search #{n}.");
                    continue;
                }
            },
            PromptCommand::ToggleUnits => {
                dashboard.toggle_units();
                print!("{}", render(&dashboard.view(Local::now().date_naive())));
                continue;
            }
            PromptCommand::ListRecent => {
                println!("{}", render_recent(dashboard.recent().names()));
                continue;
            }
            PromptCommand::Help => {
                println!("{}", prompt::HELP);
                continue;
            }
            PromptCommand::Unknown(cmd) => {
                println!("Unknown command `{cmd}`. {}", prompt::HELP);
                continue;
            }
            PromptCommand::Empty => continue,
            PromptCommand::Quit => break,
        };

        if !dashboard.can_submit() {
            continue;
        }

        if typed {
            dashboard.set_input(city.as_str());
        }

        if dashboard.search(&gateway, &city).await == Phase::Error {
            print_key_hint(config);
        }
        print!("{}", render(&dashboard.view(Local::now().date_naive())));
    }

    Ok(())
}
