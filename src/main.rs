//! Console transport for the Skycast session flow.
//!
//! Reads line commands from stdin, maps them onto typed [`Event`]s, and
//! prints the flow's responses. Stands in for a real chat transport.

use std::io::{BufRead, Write};
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};

use skycast_flow::{Event, Response, SessionFlow};
use skycast_forecast::ForecastClient;
use skycast_geo::GeoClient;
use skycast_store::{UserId, UserStore};

/// The single local user this transport serves.
const CONSOLE_USER: UserId = 0;

#[tokio::main]
async fn main() -> Result<()> {
    skycast_core::init()?;

    let (config, _validation) = skycast_core::Config::load_validated()?;

    if let Some(parent) = config.store.users_file.parent() {
        std::fs::create_dir_all(parent).context("Failed to create data directory")?;
    }
    let store = Arc::new(UserStore::open(&config.store.users_file)?);

    let geo = GeoClient::new(
        &config.geo.base_url,
        &config.geo.language,
        Duration::from_secs(config.geo.timeout_secs),
    )?;
    let forecast = ForecastClient::new(
        &config.forecast.base_url,
        Duration::from_secs(config.forecast.timeout_secs),
    )?;

    let flow = SessionFlow::new(store, geo, forecast, config.geo.search_limit);

    tracing::info!("Skycast console transport started");
    println!("Skycast - city forecasts in your terminal");
    println!("Commands: /start /help /search /fav /addfav /week /month");
    println!("          /loc <lat> <lon> /pick <id> /favset <id> /favdel <id> /quit");

    let stdin = std::io::stdin();
    let mut lines = stdin.lock().lines();
    loop {
        print!("> ");
        std::io::stdout().flush()?;

        let Some(line) = lines.next() else { break };
        let line = line?;
        let trimmed = line.trim();
        if trimmed == "/quit" {
            break;
        }

        let Some(event) = parse_event(trimmed) else {
            println!("Usage: /loc <lat> <lon>, /pick <id>, /favset <id>, /favdel <id>");
            continue;
        };

        match flow.handle(CONSOLE_USER, event).await {
            Ok(response) => print_response(&response),
            Err(e) => {
                tracing::error!(error = %e, "event handling failed");
                println!("{}", e.user_message());
            }
        }
    }

    Ok(())
}

/// Map a console line onto a flow event. `None` means malformed arguments.
fn parse_event(line: &str) -> Option<Event> {
    let mut parts = line.split_whitespace();
    let event = match parts.next() {
        Some("/start") => Event::Start,
        Some("/help") => Event::Help,
        Some("/search") => Event::BeginSearch,
        Some("/fav") => Event::ShowFavorites,
        Some("/addfav") => Event::AddFavorite,
        Some("/week") => Event::WeeklyForecast,
        Some("/month") => Event::MonthlyForecast,
        Some("/loc") => {
            let latitude = parts.next()?.parse().ok()?;
            let longitude = parts.next()?.parse().ok()?;
            Event::DeviceLocation {
                latitude,
                longitude,
            }
        }
        Some("/pick") => Event::PickCandidate(parts.next()?.to_string()),
        Some("/favset") => Event::SetCurrentFromFavorite(parts.next()?.to_string()),
        Some("/favdel") => Event::DeleteFavorite(parts.next()?.to_string()),
        _ => Event::Text(line.to_string()),
    };
    Some(event)
}

fn print_response(response: &Response) {
    println!("{}", response.text());

    // Candidate and favorite ids are needed for /pick, /favset, /favdel.
    match response {
        Response::Candidates(locations)
        | Response::Favorites(locations)
        | Response::FavoriteRemoved {
            favorites: locations,
        } => {
            for location in locations {
                println!("  id={}", location.id);
            }
        }
        Response::Forecast { icons, .. } => {
            for icon in icons {
                println!("  icon: {}", icon);
            }
        }
        _ => {}
    }
}
