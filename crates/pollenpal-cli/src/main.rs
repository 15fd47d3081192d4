mod render;

use std::io::Write as _;
use std::process::ExitCode;

use clap::{CommandFactory, Parser};
use pollenpal_core::{advise, PollenRecord};
use pollenpal_scraper::{ClientSettings, PollenClient, ScraperError};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::EnvFilter;

use crate::render::Sections;

const NOT_FOUND_MESSAGE: &str = "❌ No data found. Please check the location and try again.";

const NO_PREVIOUS_MESSAGE: &str = "❌ No previous data available. Please query a location first.";

const USAGE_EXAMPLES: &str = "\
Examples:
  pollenpal-cli London
  pollenpal-cli 'CF14 2LX' --forecast --advice
  pollenpal-cli --interactive";

const INTERACTIVE_HELP: &str = "\
Available commands:
  forecast  - Show 5-day forecast for last queried location
  detailed  - Show detailed breakdown
  advice    - Show health advice
  help      - Show this help
  quit/exit - Exit the programme";

#[derive(Debug, Parser)]
#[command(name = "pollenpal-cli")]
#[command(about = "UK pollen levels, forecast and health advice")]
#[allow(clippy::struct_excessive_bools)]
struct Cli {
    /// City or postcode to check (e.g. "London" or "SW1A 1AA")
    city: Option<String>,
    /// Show 5-day forecast
    #[arg(short, long)]
    forecast: bool,
    /// Show detailed breakdown by pollen type
    #[arg(short, long)]
    detailed: bool,
    /// Show health advice
    #[arg(short, long)]
    advice: bool,
    /// Prompt for locations and commands on stdin
    #[arg(short, long)]
    interactive: bool,
    /// Output the raw record as JSON
    #[arg(long)]
    json: bool,
    /// Country sent upstream (defaults to `POLLENPAL_COUNTRY`, then UK)
    #[arg(long)]
    country: Option<String>,
}

impl Cli {
    fn sections(&self) -> Sections {
        Sections {
            forecast: self.forecast,
            detailed: self.detailed,
            advice: self.advice,
        }
    }
}

/// One line of interactive input.
#[derive(Debug, PartialEq, Eq)]
enum Command<'a> {
    Quit,
    Help,
    Forecast,
    Detailed,
    Advice,
    Empty,
    Query(&'a str),
}

fn parse_command(input: &str) -> Command<'_> {
    let trimmed = input.trim();
    match trimmed.to_lowercase().as_str() {
        "" => Command::Empty,
        "quit" | "exit" | "q" => Command::Quit,
        "help" => Command::Help,
        "forecast" => Command::Forecast,
        "detailed" => Command::Detailed,
        "advice" => Command::Advice,
        _ => Command::Query(trimmed),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let config = pollenpal_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let client = PollenClient::new(&ClientSettings::from_app_config(&config))?;
    let country = cli
        .country
        .clone()
        .unwrap_or_else(|| config.default_country.clone());

    if cli.interactive {
        run_interactive(&client, &country, cli.json).await?;
        return Ok(ExitCode::SUCCESS);
    }

    let Some(city) = cli.city.as_deref() else {
        Cli::command().print_help()?;
        println!("\n{USAGE_EXAMPLES}");
        return Ok(ExitCode::FAILURE);
    };

    run_once(&client, &cli, city, &country).await
}

async fn run_once(
    client: &PollenClient,
    cli: &Cli,
    city: &str,
    country: &str,
) -> anyhow::Result<ExitCode> {
    let (output, _) = query(client, city, country, cli.sections(), cli.json).await?;
    println!("{output}");
    Ok(ExitCode::SUCCESS)
}

/// Fetches `city` and renders the outcome. Fetch failures and unknown
/// locations become printable messages; only JSON encoding can fail.
async fn query(
    client: &PollenClient,
    city: &str,
    country: &str,
    sections: Sections,
    json: bool,
) -> anyhow::Result<(String, Option<PollenRecord>)> {
    if !json {
        println!("\n🔍 Fetching pollen data for: {city}");
    }
    let result = client.fetch_record(city, country).await;
    if let Err(e) = &result {
        tracing::warn!(city, country, error = %e, "pollen fetch failed");
    }
    let output = render_outcome(&result, sections, json)?;
    Ok((output, result.ok().flatten()))
}

fn render_outcome(
    result: &Result<Option<PollenRecord>, ScraperError>,
    sections: Sections,
    json: bool,
) -> anyhow::Result<String> {
    Ok(match result {
        Ok(Some(record)) if json => serde_json::to_string_pretty(record)?,
        Ok(Some(record)) => render::report(record, sections),
        Ok(None) => NOT_FOUND_MESSAGE.to_string(),
        Err(e) => format!("❌ Error fetching data: {e}\n{NOT_FOUND_MESSAGE}"),
    })
}

async fn run_interactive(client: &PollenClient, country: &str, json: bool) -> anyhow::Result<()> {
    println!("🌾 UK Pollen Tracker - Interactive Mode");
    println!("Enter 'quit' or 'exit' to stop");
    println!("Commands: forecast, detailed, advice, help");
    println!();

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut last: Option<PollenRecord> = None;

    loop {
        print!("Enter city/postcode (or command): ");
        std::io::stdout().flush()?;

        let Some(line) = lines.next_line().await? else {
            println!("\n👋 Goodbye!");
            break;
        };

        match parse_command(&line) {
            Command::Quit => {
                println!("👋 Goodbye!");
                break;
            }
            Command::Help => println!("\n{INTERACTIVE_HELP}"),
            Command::Empty => {}
            Command::Forecast => {
                println!("{}", render_last(last.as_ref(), render::forecast_table));
            }
            Command::Detailed => {
                println!("{}", render_last(last.as_ref(), render::detailed_analysis));
            }
            Command::Advice => println!(
                "{}",
                render_last(last.as_ref(), |record| {
                    render::advice_section(&advise(Some(record)))
                })
            ),
            Command::Query(city) => {
                let (output, record) = query(client, city, country, Sections::ALL, json).await?;
                println!("{output}");
                if record.is_some() {
                    last = record;
                }
            }
        }
    }

    Ok(())
}

fn render_last(last: Option<&PollenRecord>, section: impl Fn(&PollenRecord) -> String) -> String {
    last.map_or_else(|| NO_PREVIOUS_MESSAGE.to_string(), section)
}
