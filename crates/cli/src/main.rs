//! PlaceMap CLI - search for local places and list the ones that land on the map

use std::process::ExitCode;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use placemap_cloud::blocking::{http_pipeline, SearchPipelineBlocking};
use placemap_cloud::geocoder::API_KEY_ENV;
use placemap_cloud::search_client::ENDPOINT_ENV;
use placemap_cloud::{GeocoderOptions, PipelineOptions, SearchEndpoint};
use placemap_core::{Coord, GeoRegion, MarkerRenderer, RegionFilter, ResolvedPlace, SearchQuery};

// ─── CLI structure ──────────────────────────────────────────────────────

#[derive(Parser)]
#[command(name = "placemap")]
#[command(author, version, about = "Search local places and pin them on a map", long_about = None)]
struct Cli {
    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run one search cycle and print the places that would be pinned
    Search(SearchArgs),
    /// Show a region's bounds, optionally testing a point against it
    Region {
        /// Preset name or min_lat,max_lat,min_lng,max_lng
        #[arg(default_value = "western-ma")]
        bounds: String,
        /// Latitude to test
        #[arg(long, requires = "lng", allow_hyphen_values = true)]
        lat: Option<f64>,
        /// Longitude to test
        #[arg(long, requires = "lat", allow_hyphen_values = true)]
        lng: Option<f64>,
    },
}

#[derive(Args)]
struct SearchArgs {
    /// Search service base URL, or "local" for http://127.0.0.1:8000
    #[arg(short, long, env = ENDPOINT_ENV, default_value = "local")]
    endpoint: String,
    /// Business category to search for
    #[arg(short, long, default_value = SearchQuery::DEFAULT_CATEGORY)]
    category: String,
    /// Free-text area to search in
    #[arg(short, long, default_value = SearchQuery::DEFAULT_LOCATION)]
    location: String,
    /// Map service credential used for geocoding
    #[arg(long, env = API_KEY_ENV, hide_env_values = true)]
    api_key: Option<String>,
    /// Display region: preset name or min_lat,max_lat,min_lng,max_lng
    #[arg(short, long, default_value = "western-ma", allow_hyphen_values = true)]
    bounds: String,
    /// Show every geocoded place regardless of region
    #[arg(long, conflicts_with = "bounds")]
    no_region_filter: bool,
    /// Seconds to wait for the search service
    #[arg(long, default_value = "30")]
    search_timeout: u64,
    /// Seconds to wait for each geocode call
    #[arg(long, default_value = "10")]
    geocode_timeout: u64,
    /// Print the full resolved list as JSON
    #[arg(long)]
    json: bool,
}

// ─── Helpers ────────────────────────────────────────────────────────────

fn setup_logging(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::INFO };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish();
    if tracing::subscriber::set_global_default(subscriber).is_err() {
        eprintln!("warning: a global tracing subscriber was already set");
    }
}

fn spinner(msg: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::default_spinner().template("{spinner:.green} {msg}") {
        pb.set_style(style);
    }
    pb.set_message(msg.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}

fn region_filter(args: &SearchArgs) -> Result<RegionFilter> {
    if args.no_region_filter {
        return Ok(RegionFilter::Disabled);
    }
    let region: GeoRegion = args
        .bounds
        .parse()
        .with_context(|| format!("Invalid region: {}", args.bounds))?;
    Ok(RegionFilter::Bounded(region))
}

/// Prints the pinned places, or the failure, to the terminal.
struct TerminalRenderer {
    json: bool,
    displayed: usize,
}

impl MarkerRenderer for TerminalRenderer {
    fn render_markers(&mut self, places: &[ResolvedPlace]) {
        self.displayed = places.len();
        if self.json {
            return;
        }
        for (i, place) in places.iter().enumerate() {
            let Some(coord) = place.coord() else {
                continue;
            };
            println!("{:>3}. {}", i + 1, place.record.title);
            println!("     {}", place.record.address);
            println!("     {}  {}", coord, place.record.maps_uri);
        }
    }

    fn report_error(&mut self, message: &str) {
        eprintln!("{}", message);
    }
}

// ─── Commands ───────────────────────────────────────────────────────────

fn run_search(args: SearchArgs) -> Result<ExitCode> {
    let query = SearchQuery::new(args.category.clone(), args.location.clone())
        .context("Invalid search query")?;
    let filter = region_filter(&args)?;

    let mut geocoder = GeocoderOptions::default();
    geocoder.api_key = args.api_key.clone().filter(|k| !k.trim().is_empty());
    if geocoder.api_key.is_none() {
        tracing::warn!("no {} set; every address will be left unresolved", API_KEY_ENV);
    }

    let options = PipelineOptions {
        search_timeout: Duration::from_secs(args.search_timeout),
        geocode_timeout: Duration::from_secs(args.geocode_timeout),
        filter,
    };

    let endpoint = SearchEndpoint::from_str_or_url(&args.endpoint);
    info!("Searching {} for '{}' in {}", endpoint.search_url(), query.category, query.location);

    let pipeline = http_pipeline(endpoint, geocoder, options)
        .context("Failed to build search pipeline")?;
    let pipeline = SearchPipelineBlocking::new(pipeline).context("Failed to start runtime")?;

    let mut renderer = TerminalRenderer {
        json: args.json,
        displayed: 0,
    };

    let start = Instant::now();
    let pb = spinner("Searching and geocoding...");
    let result = pipeline.run_cycle(&query, &mut renderer);
    pb.finish_and_clear();

    let outcome = match result {
        Ok(outcome) => outcome,
        Err(_) => return Ok(ExitCode::FAILURE),
    };

    if args.json {
        let doc = serde_json::json!({
            "resolved": outcome.resolved,
            "displayed": outcome.displayed,
        });
        println!(
            "{}",
            serde_json::to_string_pretty(&doc).context("Failed to encode results")?
        );
    } else {
        println!(
            "{} results, {} unresolved, {} on the map",
            outcome.resolved.len(),
            outcome.unresolved_count(),
            renderer.displayed
        );
    }
    info!("Processing time: {:.2?}", start.elapsed());

    Ok(ExitCode::SUCCESS)
}

fn run_region(bounds: &str, point: Option<(f64, f64)>) -> Result<ExitCode> {
    let region: GeoRegion = bounds
        .parse()
        .with_context(|| format!("Invalid region: {}", bounds))?;

    println!(
        "lat {:.4} ..= {:.4}, lng {:.4} ..= {:.4}",
        region.min_lat, region.max_lat, region.min_lng, region.max_lng
    );
    println!("center {}", region.center());

    if let Some((lat, lng)) = point {
        let coord = Coord::new(lat, lng);
        let inside = region.contains(coord);
        println!("{} is {}", coord, if inside { "inside" } else { "outside" });
        if !inside {
            return Ok(ExitCode::FAILURE);
        }
    }
    Ok(ExitCode::SUCCESS)
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    setup_logging(cli.verbose);

    match cli.command {
        Commands::Search(args) => run_search(args),
        Commands::Region { bounds, lat, lng } => run_region(&bounds, lat.zip(lng)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_definition_is_valid() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn search_defaults() {
        let cli = Cli::try_parse_from(["placemap", "search"]).unwrap();
        let Commands::Search(args) = cli.command else {
            panic!("expected search");
        };
        assert_eq!(args.category, "pediatrician");
        assert_eq!(args.location, "Western Massachusetts, MA");
        assert_eq!(
            region_filter(&args).unwrap(),
            RegionFilter::Bounded(GeoRegion::WESTERN_MASSACHUSETTS)
        );
    }

    #[test]
    fn explicit_bounds_and_disabled_filter() {
        let cli =
            Cli::try_parse_from(["placemap", "search", "--bounds", "41,43,-74,-71"]).unwrap();
        let Commands::Search(args) = cli.command else {
            panic!("expected search");
        };
        let filter = region_filter(&args).unwrap();
        assert_eq!(filter.region().map(|r| r.min_lng), Some(-74.0));

        let cli = Cli::try_parse_from(["placemap", "search", "--no-region-filter"]).unwrap();
        let Commands::Search(args) = cli.command else {
            panic!("expected search");
        };
        assert_eq!(region_filter(&args).unwrap(), RegionFilter::Disabled);
    }

    #[test]
    fn region_point_check() {
        assert_eq!(
            run_region("western-ma", Some((42.37, -72.52))).unwrap(),
            ExitCode::SUCCESS
        );
        assert_eq!(
            run_region("western-ma", Some((40.0, -72.52))).unwrap(),
            ExitCode::FAILURE
        );
    }
}
