use census_regions::region::{DatasetPaths, RegionResolver, Resolved};
use clap::Parser;
use serde::Serialize;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Census Regions — US region resolution from free text.
///
/// Resolves a location string to a state, county, or place, or reports the
/// ambiguous candidate set when a county name is shared across states.
///
/// Examples:
///   regions Illinois
///   regions "Cook County, IL"
///   regions "Washington County"
///   regions "Highland Park city"
///   regions --validate 60035
#[derive(Parser)]
#[command(name = "regions", version, about, long_about = None)]
struct Cli {
    /// Location query (positional). Example: regions "Cook County, IL"
    #[arg(index = 1)]
    query_positional: Option<String>,

    /// Location query (named). Example: --query "Highland Park"
    #[arg(long)]
    query: Option<String>,

    /// Print per-type validity booleans instead of resolving.
    #[arg(long)]
    validate: bool,

    /// Path to the county FIPS table (JSON).
    #[arg(long, default_value = "data/us-counties.json")]
    counties: PathBuf,

    /// Path to the census place file (pipe-delimited).
    #[arg(long, default_value = "data/us-places.txt")]
    places: PathBuf,

    /// Verbose logging.
    #[arg(long, short = 'v')]
    verbose: bool,
}

#[derive(Serialize)]
struct Validity {
    query: String,
    state: bool,
    zip_code: bool,
    county: bool,
    region: bool,
}

fn init_logger(verbose: bool) {
    let filter = if verbose {
        EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new("census_regions=debug,info"))
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("census_regions=warn"))
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr)
                .compact(),
        )
        .init();
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_logger(cli.verbose);

    let query = match cli.query.as_deref().or(cli.query_positional.as_deref()) {
        Some(q) => q.to_string(),
        None => {
            eprintln!("Error: No location specified.");
            eprintln!();
            eprintln!("Usage:");
            eprintln!("  regions Illinois");
            eprintln!("  regions \"Cook County, IL\"");
            eprintln!("  regions \"Washington County\"");
            eprintln!("  regions --validate 60035");
            std::process::exit(1);
        }
    };

    // ── Load reference data ─────────────────────────────────────
    // `load` only returns once the place stream is fully consumed, so the
    // resolver below is safe for place queries.

    let paths = DatasetPaths { counties: cli.counties, places: cli.places };
    let resolver = RegionResolver::load(&paths).await.unwrap_or_else(|e| {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    });

    // ── Validate or resolve ─────────────────────────────────────

    if cli.validate {
        let validity = Validity {
            state: resolver.is_valid_state(&query),
            zip_code: resolver.is_valid_zip_code(&query),
            county: resolver.is_valid_county(&query),
            region: resolver.is_valid_region(&query),
            query,
        };
        println!("{}", serde_json::to_string_pretty(&validity).unwrap());
        return;
    }

    match resolver.resolve(&query) {
        Some(resolved) => {
            if let Resolved::Counties(list) = &resolved {
                eprintln!(
                    "  Ambiguous county name '{}' — {} matches. Add a state: \"{}, {}\"",
                    query,
                    list.len(),
                    list[0].name,
                    list[0].state,
                );
            }
            println!("{}", serde_json::to_string_pretty(&resolved).unwrap());
        }
        None => {
            eprintln!("Error: No US region found for '{}'", query);
            std::process::exit(1);
        }
    }
}
