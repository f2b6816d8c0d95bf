use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use futures::future::join_all;
use tracing::{debug, warn};
use tracing_subscriber::EnvFilter;

use meetup_finder::config::LoggingConfig;
use meetup_finder::places::{self, MAX_VENUES_ADDED};
use meetup_finder::{
    GeoPoint, GoogleMapsClient, LocationParser, LocationResolver, MeetupCenter,
    MeetupCenterCalculator, MeetupConfig, MeetupError, PlanningSession,
};

#[derive(Debug, Parser)]
#[command(name = "meetup-finder")]
#[command(version, about = "Find a fair meetup point and nearby venues for a group")]
struct Cli {
    /// Path to a TOML config file
    #[arg(long, global = true, env = "MEETUP_CONFIG")]
    config: Option<PathBuf>,

    /// Log at debug level
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Compute the meetup center of literal coordinates
    Center {
        /// A point as "LAT,LNG"; repeat for each person
        #[arg(short, long = "point", value_parser = parse_point, required = true)]
        points: Vec<GeoPoint>,

        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },
    /// Geocode addresses or venues, compute their center and optionally find venues
    Plan {
        /// Addresses, venue names or "LAT,LNG" coordinates
        #[arg(required = true)]
        inputs: Vec<String>,

        /// Venue search to run around the center, e.g. "cafes" or "sushi"
        #[arg(short, long)]
        search: Option<String>,
    },
}

fn parse_point(value: &str) -> std::result::Result<GeoPoint, String> {
    LocationParser::parse_coordinates(value)
        .ok_or_else(|| format!("expected LAT,LNG within range, got '{value}'"))
}

fn init_logging(logging: &LoggingConfig, verbose: bool) -> Result<()> {
    let level = if verbose { "debug" } else { logging.level.as_str() };
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(format!("meetup_finder={level}")))?;

    let builder = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr);
    if logging.format == "json" {
        builder.json().init();
    } else {
        builder.init();
    }
    Ok(())
}

fn print_center(center: Option<&MeetupCenter>) {
    match center {
        None => println!("No meetup center yet: add at least one address."),
        Some(center) => {
            println!("Meetup center: {}", center.centroid.format_coordinates());
            match center.radius_meters {
                Some(radius) => println!("Search radius: {radius:.0} m"),
                None => println!("Search radius: n/a (add a second address)"),
            }
        }
    }
}

fn print_session(session: &PlanningSession) {
    println!("Planning around {} location(s):", session.len());
    for entry in session.entries() {
        let marker = if entry.is_point_of_interest() { "*" } else { "-" };
        println!(
            "  {marker} {} {} ({})",
            entry.id,
            entry.display_name(),
            entry.location.format_coordinates()
        );
    }
    print_center(session.center());
}

async fn run_plan(config: &MeetupConfig, inputs: &[String], search: Option<&str>) -> Result<()> {
    let client = GoogleMapsClient::from_config(&config.google)?;

    let resolved = join_all(
        inputs
            .iter()
            .map(|input| LocationResolver::resolve(&client, input)),
    )
    .await;

    let mut session = PlanningSession::new();
    for (input, result) in inputs.iter().zip(resolved) {
        let place = match result {
            Ok(place) => place,
            Err(e) => {
                warn!("Could not resolve '{}': {}", input, e);
                eprintln!("Skipping '{input}': {}", e.user_message());
                continue;
            }
        };

        let (kind, place_name) = places::classify(input, &place);
        if let Err(e) = session.add_place(&place, kind, place_name) {
            eprintln!("Skipping '{input}': {}", e.user_message());
        }
    }

    print_session(&session);

    if let Some(query) = search {
        match places::find_venues(&client, &session, query).await {
            Ok(venues) => {
                debug!("Found {} venue(s), adding up to {}", venues.len(), MAX_VENUES_ADDED);
                let added = places::add_venues(&mut session, &venues);
                println!();
                println!("Found {} {query}:", added.len());
                for venue in &venues {
                    println!("  * {} - {}", venue.name, venue.label());
                }
                println!();
                print_session(&session);
            }
            Err(e @ (MeetupError::NoVenuesFound { .. } | MeetupError::NoMeetupCenter)) => {
                eprintln!("{}", e.user_message());
            }
            Err(e) => return Err(e).context("Venue search failed"),
        }
    }

    if !session.is_empty() {
        println!();
        println!("Share: {}", session.shareable_items().join(" | "));
    }

    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = MeetupConfig::load_from_path(cli.config.clone())?;
    init_logging(&config.logging, cli.verbose)?;

    match cli.command {
        Commands::Center { points, json } => {
            let center = MeetupCenterCalculator::meetup_center_for_points(&points);
            if json {
                println!("{}", serde_json::to_string_pretty(&center)?);
            } else {
                print_center(center.as_ref());
            }
        }
        Commands::Plan { inputs, search } => {
            run_plan(&config, &inputs, search.as_deref()).await?;
        }
    }

    Ok(())
}
