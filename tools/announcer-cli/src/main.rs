use std::fs::File;
use std::io::{self, BufReader};
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use chrono::TimeDelta;
use clap::{Args as ClapArgs, Parser, Subcommand};
use trip_announcer::provider::loader::load_directory;
use trip_announcer::{parse_service_time, Coordinates, DirectionId, RouteNumber, ScheduleProvider};

use announcer_cli::{run_session, ConsoleInput, ConsoleViewer, PositionSource, ScriptedInput, TripAnnouncer};

#[derive(Parser, Debug)]
#[command(
    name = "announcer-cli",
    author,
    version,
    about = "Announce the next stops of a bus trip from its live position",
    long_about = "Loads trimmed GTFS tables (routes, trips, stops, stop_times as CSV), \
                  picks the trip being run and prints a countdown to every stop ahead \
                  each time a new position is entered."
)]
struct Args {
    /// Directory holding routes.csv, trips.csv, stops.csv and stop_times.csv
    #[arg(short, long, env = "ANNOUNCER_DATA_DIR", default_value = "useful_data")]
    data: PathBuf,

    /// Verbose output (show debug messages)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Follow a trip and print the next stops for every position fix
    Announce(AnnounceArgs),

    /// List the headsigns served by a route
    Headsigns {
        /// Route number (e.g. 200)
        #[arg(short, long)]
        route: String,
    },

    /// List the stops closest to a position
    Nearby {
        /// Position as lat,lon
        #[arg(allow_hyphen_values = true)]
        position: Coordinates,

        /// Number of stops to list
        #[arg(short = 'n', long, default_value_t = 5)]
        count: usize,
    },
}

#[derive(ClapArgs, Debug)]
struct AnnounceArgs {
    /// Route number (e.g. 200)
    #[arg(short, long)]
    route: String,

    /// Headsign of the trip, used to work out its direction
    #[arg(long, conflicts_with = "direction")]
    headsign: Option<String>,

    /// Direction of the trip (outbound/inbound or 0/1)
    #[arg(long)]
    direction: Option<DirectionId>,

    /// Time of day (H:MM or H:MM:SS) used to pick the trip being run
    #[arg(short, long, value_parser = parse_service_time)]
    time: Option<TimeDelta>,

    /// Current position as lat,lon; also the first fix of the session
    #[arg(short, long, allow_hyphen_values = true)]
    position: Option<Coordinates>,

    /// File with one lat,lon fix per line instead of prompting
    #[arg(long)]
    positions: Option<PathBuf>,

    /// Show at most this many stops per update
    #[arg(short, long)]
    limit: Option<usize>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(if args.verbose { "debug" } else { "info" }),
    )
    .format_timestamp(None)
    .init();

    if !args.data.is_dir() {
        bail!("Schedule directory does not exist: {}", args.data.display());
    }

    let provider = load_directory(&args.data)
        .with_context(|| format!("Failed to load schedule from {}", args.data.display()))?;

    match args.command {
        Command::Announce(announce) => run_announce(&provider, announce),
        Command::Headsigns { route } => {
            for headsign in provider.headsigns(&RouteNumber::new(route))? {
                println!("{}", headsign);
            }
            Ok(())
        }
        Command::Nearby { position, count } => {
            for stop in provider.nearest_stops(position, count) {
                let id = stop.stop_id.as_ref().map(|id| id.as_str()).unwrap_or("-");
                println!("{} | {} | {}", id, stop.name, stop.coordinates);
            }
            Ok(())
        }
    }
}

fn run_announce(provider: &dyn ScheduleProvider, args: AnnounceArgs) -> Result<()> {
    let route_number = RouteNumber::new(&args.route);

    let direction = match (args.direction, &args.headsign) {
        (Some(direction), _) => direction,
        (None, Some(headsign)) => provider.direction_for(&route_number, headsign)?,
        (None, None) => {
            let headsigns = provider.headsigns(&route_number)?;
            let listed: Vec<&str> = headsigns.iter().map(|h| &**h).collect();
            bail!(
                "Either --headsign or --direction is required. Route {} serves: {}",
                route_number,
                listed.join(", ")
            );
        }
    };

    let route = provider
        .get_stops(&route_number, direction, args.time, args.position)
        .with_context(|| format!("Failed to find a trip on route {}", route_number))?;

    log::info!(
        "Following route {} ({}) trip {} with {} stops",
        route.number(),
        route.headsign().unwrap_or("no headsign"),
        route.trip_id().map(|t| t.as_str()).unwrap_or("-"),
        route.stops().len()
    );

    let mut source: Box<dyn PositionSource> = match &args.positions {
        Some(path) => {
            let file = File::open(path).with_context(|| format!("Failed to open {}", path.display()))?;
            Box::new(ScriptedInput::from_reader(BufReader::new(file))?)
        }
        None => Box::new(ConsoleInput::new(io::stdin().lock(), io::stdout())),
    };

    let mut viewer = ConsoleViewer::new(io::stdout());
    if let Some(limit) = args.limit {
        viewer = viewer.with_limit(limit);
    }

    let mut announcer = TripAnnouncer::new(route);
    let mut shown = 0;

    if let Some(position) = args.position {
        let mut first = ScriptedInput::new([position]);
        shown += run_session(&mut announcer, &mut first, &mut viewer)?;
    }
    shown += run_session(&mut announcer, source.as_mut(), &mut viewer)?;

    log::info!("Session ended after {} updates", shown);
    Ok(())
}
