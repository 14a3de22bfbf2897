//! CLI entry point for the MBTA realtime client.
//!
//! One subcommand per API endpoint; results are printed to stdout as JSON.

use anyhow::Result;
use chrono::{DateTime, Utc};
use clap::{Args, Parser, Subcommand};
use mbta_rt::output::{print_json, print_pretty};
use mbta_rt::{AlertFlags, MbtaClient, MbtaConfig, ScheduleQuery};
use serde::Serialize;
use std::ffi::OsStr;
use std::fmt::Debug;
use std::path::Path;
use tracing::info;
use tracing_subscriber::{
    EnvFilter, Layer,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

#[derive(Parser)]
#[command(name = "mbta_rt")]
#[command(about = "Query the MBTA v2 realtime API", long_about = None)]
struct Cli {
    /// Print Rust debug output instead of JSON
    #[arg(long, global = true, default_value_t = false)]
    pretty: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct AlertArgs {
    /// Include accessibility alerts (elevators, escalators)
    #[arg(long, default_value_t = false)]
    access_alerts: bool,

    /// Leave out service alerts
    #[arg(long, default_value_t = false)]
    no_service_alerts: bool,
}

impl From<AlertArgs> for AlertFlags {
    fn from(args: AlertArgs) -> Self {
        AlertFlags {
            include_access_alerts: args.access_alerts,
            include_service_alerts: !args.no_service_alerts,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// List stops nearest to a location
    StopsByLocation {
        #[arg(allow_negative_numbers = true)]
        lat: f64,
        #[arg(allow_negative_numbers = true)]
        lon: f64,
    },
    /// List the stops of a route, per direction
    StopsByRoute { route: String },
    /// List the routes serving a stop
    RoutesByStop { stop: String },
    /// Scheduled departures at a stop
    SchedulesByStop {
        stop: String,
        #[arg(long)]
        route: Option<String>,
        #[arg(long)]
        direction: Option<String>,
        /// RFC 3339 timestamp or seconds since the epoch
        #[arg(long, value_parser = parse_datetime)]
        date: Option<DateTime<Utc>>,
        /// Minutes of schedule to return
        #[arg(long)]
        max_time: Option<u32>,
        #[arg(long)]
        max_trips: Option<u32>,
    },
    /// Scheduled trips for one or more routes
    SchedulesByRoutes {
        #[arg(required = true, value_delimiter = ',')]
        routes: Vec<String>,
        #[arg(long, value_parser = parse_datetime)]
        date: Option<DateTime<Utc>>,
        #[arg(long)]
        max_time: Option<u32>,
        #[arg(long)]
        max_trips: Option<u32>,
    },
    /// Scheduled stops of a single trip
    SchedulesByTrip {
        trip: String,
        #[arg(long, value_parser = parse_datetime)]
        date: Option<DateTime<Utc>>,
    },
    /// Predicted departures at a stop
    PredictionsByStop {
        stop: String,
        #[command(flatten)]
        alerts: AlertArgs,
    },
    /// Predictions and alerts for one or more routes
    PredictionsByRoutes {
        #[arg(required = true, value_delimiter = ',')]
        routes: Vec<String>,
        #[command(flatten)]
        alerts: AlertArgs,
    },
    /// Vehicle positions for one or more routes
    VehiclesByRoutes {
        #[arg(required = true, value_delimiter = ',')]
        routes: Vec<String>,
        #[command(flatten)]
        alerts: AlertArgs,
    },
    /// Predicted stops of a single trip
    PredictionsByTrip { trip: String },
    /// Vehicle position for a single trip
    VehiclesByTrip { trip: String },
    /// List every route, grouped by mode
    Routes,
    /// Show the API server's clock
    ServerTime,
}

#[derive(Debug, Serialize)]
struct RoutePredictions {
    mode: Vec<mbta_rt::models::Mode>,
    alert_headers: Vec<mbta_rt::models::Alert>,
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok(); // Load .env file

    // Logging setup: colored stderr + JSON rolling log file
    let log_file_path =
        std::env::var("LOG_FILE_PATH").unwrap_or_else(|_| "logs/mbta_rt.log".to_string());
    let log_dir = Path::new(&log_file_path)
        .parent()
        .unwrap_or(Path::new("logs"));
    let log_file_name = Path::new(&log_file_path)
        .file_name()
        .unwrap_or(OsStr::new("mbta_rt.log"));

    let file_appender = tracing_appender::rolling::daily(log_dir, log_file_name);
    let (non_blocking_file, _file_guard) = tracing_appender::non_blocking(file_appender);

    let stderr_layer = fmt::layer()
        .with_target(true)
        .with_span_events(FmtSpan::CLOSE)
        .with_ansi(true)
        .with_writer(std::io::stderr)
        .with_filter(EnvFilter::from_env("RUST_LOG").add_directive("info".parse()?));

    let json_layer = fmt::layer()
        .json()
        .with_current_span(true)
        .with_span_list(true)
        .with_writer(non_blocking_file)
        .with_filter(EnvFilter::from_env("RUST_LOG_JSON").add_directive("debug".parse()?));

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(json_layer)
        .init();

    let cli = Cli::parse();
    let client = MbtaClient::with_config(MbtaConfig::from_env()?)?;
    info!(base_url = %client.config().base_url, "Using MBTA API");
    let pretty = cli.pretty;

    match cli.command {
        Commands::StopsByLocation { lat, lon } => {
            emit(pretty, &client.get_stops_by_location(lat, lon)?)
        }
        Commands::StopsByRoute { route } => emit(pretty, &client.get_stops_by_route(&route)?),
        Commands::RoutesByStop { stop } => emit(pretty, &client.get_routes_by_stop(&stop)?),
        Commands::SchedulesByStop {
            stop,
            route,
            direction,
            date,
            max_time,
            max_trips,
        } => {
            let query = ScheduleQuery {
                route_id: route,
                direction_id: direction,
                date,
                max_time,
                max_trips,
            };
            emit(pretty, &client.get_schedules_by_stop(&stop, &query)?)
        }
        Commands::SchedulesByRoutes {
            routes,
            date,
            max_time,
            max_trips,
        } => emit(
            pretty,
            &client.get_schedules_by_routes(routes, date, max_time, max_trips)?,
        ),
        Commands::SchedulesByTrip { trip, date } => {
            emit(pretty, &client.get_schedules_by_trip(&trip, date)?)
        }
        Commands::PredictionsByStop { stop, alerts } => {
            emit(pretty, &client.get_predictions_by_stop(&stop, alerts.into())?)
        }
        Commands::PredictionsByRoutes { routes, alerts } => {
            let (mode, alert_headers) = client.get_predictions_by_routes(routes, alerts.into())?;
            info!(
                modes = mode.len(),
                alerts = alert_headers.len(),
                "Predictions fetched"
            );
            emit(pretty, &RoutePredictions { mode, alert_headers })
        }
        Commands::VehiclesByRoutes { routes, alerts } => {
            emit(pretty, &client.get_vehicles_by_routes(routes, alerts.into())?)
        }
        Commands::PredictionsByTrip { trip } => {
            emit(pretty, &client.get_predictions_by_trip(&trip)?)
        }
        Commands::VehiclesByTrip { trip } => emit(pretty, &client.get_vehicles_by_trip(&trip)?),
        Commands::Routes => emit(pretty, &client.get_routes()?),
        Commands::ServerTime => emit(pretty, &client.get_server_time()?),
    }
}

fn emit<T: Serialize + Debug>(pretty: bool, value: &T) -> Result<()> {
    if pretty {
        print_pretty(value)
    } else {
        print_json(value)
    }
}

/// Accepts either seconds since the epoch or an RFC 3339 timestamp.
fn parse_datetime(s: &str) -> Result<DateTime<Utc>, String> {
    if let Ok(secs) = s.parse::<i64>() {
        return DateTime::<Utc>::from_timestamp(secs, 0)
            .ok_or_else(|| format!("timestamp out of range: {s}"));
    }
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| format!("invalid date {s:?}: {e}"))
}
