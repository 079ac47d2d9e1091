mod cards;
mod route;
mod themes;

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use storeloc_core::{Coordinate, LocationId, TravelProfile};
use storeloc_kit::FitPolicy;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "storeloc")]
#[command(about = "Store locator kit command line interface")]
struct Cli {
    /// GeoJSON feature collection of store locations.
    #[arg(
        long,
        global = true,
        env = "STORELOC_PLACES_PATH",
        default_value = "./config/places.geojson"
    )]
    places: PathBuf,

    /// Optional YAML file of additional themes.
    #[arg(long, global = true, env = "STORELOC_THEMES_PATH")]
    themes: Option<PathBuf>,

    #[arg(long, global = true, env = "STORELOC_LOG_LEVEL", default_value = "info")]
    log_level: String,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// List built-in and file-defined themes.
    Themes,
    /// Print the card carousel for an origin.
    Cards {
        /// User position as `lng,lat`.
        #[arg(long, allow_hyphen_values = true)]
        origin: Coordinate,
        #[arg(long, default_value = "blue")]
        theme: String,
        /// Measured slider width in points.
        #[arg(long, default_value_t = 375.0)]
        width: f64,
        /// Active card index.
        #[arg(long, default_value_t = 0)]
        select: usize,
    },
    /// Fetch a route from an origin to the selected store.
    Route {
        #[arg(long, allow_hyphen_values = true)]
        origin: Coordinate,
        /// Select by index (as if chosen by the application).
        #[arg(long, conflicts_with = "id")]
        select: Option<usize>,
        /// Select by location id (as if the marker was tapped).
        #[arg(long)]
        id: Option<LocationId>,
        #[arg(long, default_value = "blue")]
        theme: String,
        /// Overrides `STORELOC_TRAVEL_PROFILE`.
        #[arg(long)]
        profile: Option<TravelProfile>,
        #[arg(long, value_enum, default_value_t = FitArg::SkipTaps)]
        fit: FitArg,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum FitArg {
    SkipTaps,
    Always,
    Never,
}

impl From<FitArg> for FitPolicy {
    fn from(arg: FitArg) -> Self {
        match arg {
            FitArg::SkipTaps => FitPolicy::SkipDirectTaps,
            FitArg::Always => FitPolicy::Always,
            FitArg::Never => FitPolicy::Never,
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let env_filter =
        EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(&cli.log_level))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Some(Commands::Themes) => themes::run_list_themes(cli.themes.as_deref())?,
        Some(Commands::Cards {
            origin,
            theme,
            width,
            select,
        }) => cards::run_print_cards(
            &cli.places,
            cli.themes.as_deref(),
            &theme,
            origin,
            width,
            select,
        )?,
        Some(Commands::Route {
            origin,
            select,
            id,
            theme,
            profile,
            fit,
        }) => {
            let mut config = storeloc_core::load_app_config()?;
            config.places_path = cli.places;
            config.themes_path = cli.themes;
            let target = match (select, id) {
                (_, Some(id)) => route::Target::Id(id),
                (Some(index), None) => route::Target::Index(index),
                (None, None) => route::Target::Initial,
            };
            route::run_route(&config, &theme, origin, target, profile, fit.into()).await?;
        }
        None => println!("storeloc: run with --help to list commands"),
    }

    Ok(())
}

#[cfg(test)]
mod tests;
