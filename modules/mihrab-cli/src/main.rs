use std::sync::Arc;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

use mihrab_common::{Config, Coordinate, Masjid};
use mihrab_feed::{FeedPipeline, OverpassClient};
use mihrab_geo::{find_within, qibla};
use mihrab_locate::{IpApiProvider, LocationCache, NominatimClient};
use mihrab_store::{FavoritesStore, KvStore};

#[derive(Parser)]
#[command(name = "mihrab")]
#[command(about = "Masjid directory: nearby search, Qibla direction, favorites")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch masjid data from OpenStreetMap (all missing states, or one)
    Fetch {
        /// Fetch a single state by slug, e.g. new_jersey
        #[arg(long)]
        state: Option<String>,
    },

    /// Remove unnamed entries from the collected data
    Cleanup,

    /// List masajid near a position, closest first
    Nearby {
        /// Search radius in miles
        #[arg(long)]
        radius: Option<f64>,

        /// Latitude (omit to use the cached/acquired location)
        #[arg(long)]
        lat: Option<f64>,

        /// Longitude (omit to use the cached/acquired location)
        #[arg(long)]
        lon: Option<f64>,
    },

    /// Direction and distance to the Kaaba
    Qibla {
        #[arg(long)]
        lat: Option<f64>,

        #[arg(long)]
        lon: Option<f64>,
    },

    /// Show the current location (acquiring one if needed)
    Locate {
        /// Discard the cached location and acquire a fresh one
        #[arg(long)]
        refresh: bool,
    },

    /// Manage saved masajid
    #[command(subcommand)]
    Favorites(FavoritesCommand),
}

#[derive(Subcommand)]
enum FavoritesCommand {
    /// List favorites, most recently added first
    List,
    /// Add a masjid by id
    Add { id: String },
    /// Remove a masjid by id
    Remove { id: String },
    /// Toggle membership for a masjid by id
    Toggle { id: String },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("mihrab=info".parse()?))
        .init();

    let config = Config::from_env();
    let cli = Cli::parse();

    match cli.command {
        Commands::Fetch { state } => fetch(&config, state.as_deref()).await,
        Commands::Cleanup => cleanup(&config),
        Commands::Nearby { radius, lat, lon } => nearby(&config, radius, lat, lon).await,
        Commands::Qibla { lat, lon } => qibla_cmd(&config, lat, lon).await,
        Commands::Locate { refresh } => locate(&config, refresh).await,
        Commands::Favorites(cmd) => favorites(&config, cmd),
    }
}

fn pipeline(config: &Config) -> FeedPipeline {
    FeedPipeline::new(
        OverpassClient::new(&config.overpass_url),
        config.states_dir(),
        config.index_file(),
    )
}

fn location_cache(config: &Config) -> Result<LocationCache> {
    let kv = KvStore::open(config.kv_dir()).context("opening key-value store")?;
    let provider = Arc::new(IpApiProvider::new(&config.ip_api_url));
    Ok(LocationCache::new(kv, provider).with_geocoder(NominatimClient::new(&config.nominatim_url)))
}

fn favorites_store(config: &Config) -> Result<FavoritesStore> {
    let kv = KvStore::open(config.kv_dir()).context("opening key-value store")?;
    Ok(FavoritesStore::new(kv))
}

/// Resolve the query origin: explicit coordinates when given, otherwise the
/// cached location (acquiring one if the cache is stale or empty).
async fn resolve_origin(
    config: &Config,
    lat: Option<f64>,
    lon: Option<f64>,
) -> Result<Coordinate> {
    match (lat, lon) {
        (Some(lat), Some(lon)) => {
            let coord = Coordinate::new(lat, lon);
            if !coord.is_valid() {
                bail!("coordinates out of range: {lat}, {lon}");
            }
            Ok(coord)
        }
        (None, None) => {
            let cache = location_cache(config)?;
            let loc = cache
                .get_or_request()
                .await
                .context("could not determine your location (pass --lat/--lon instead)")?;
            Ok(loc.coordinate())
        }
        _ => bail!("--lat and --lon must be given together"),
    }
}

async fn fetch(config: &Config, state: Option<&str>) -> Result<()> {
    let pipeline = pipeline(config);
    match state {
        Some(slug) => {
            let count = pipeline.fetch_state(slug).await?;
            println!("Fetched {count} masajid for {}", mihrab_feed::state_title(slug));
        }
        None => {
            let summary = pipeline.run().await?;
            println!(
                "Fetched {} states ({} masajid), skipped {}, failed {}",
                summary.fetched,
                summary.total_masajid,
                summary.skipped,
                summary.failed.len()
            );
            if !summary.failed.is_empty() {
                println!("Failed states: {}", summary.failed.join(", "));
            }
        }
    }
    Ok(())
}

fn cleanup(config: &Config) -> Result<()> {
    let summary = pipeline(config).cleanup()?;
    println!(
        "Removed {} unnamed entries, {} masajid remaining",
        summary.removed, summary.remaining
    );
    Ok(())
}

async fn nearby(
    config: &Config,
    radius: Option<f64>,
    lat: Option<f64>,
    lon: Option<f64>,
) -> Result<()> {
    let origin = resolve_origin(config, lat, lon).await?;
    let radius = radius.unwrap_or(config.default_radius_miles);

    let entries = pipeline(config)
        .load_entries()
        .context("loading the masjid directory (run `mihrab fetch` first)")?;
    if entries.is_empty() {
        bail!("the masjid directory is empty; run `mihrab fetch` first");
    }

    let favorites = favorites_store(config)?;
    let matches = find_within(origin, &entries, radius);
    info!(count = matches.len(), radius, "Nearby query complete");

    if matches.is_empty() {
        println!("No masajid within {radius} miles.");
        return Ok(());
    }

    for m in matches {
        let star = if favorites.is_favorite(&m.masjid.id) { "*" } else { " " };
        let address = m.masjid.address.display_line();
        if address.is_empty() {
            println!("{star} {:>6.2} mi  {}  [{}]", m.distance_miles, m.masjid.name, m.masjid.id);
        } else {
            println!(
                "{star} {:>6.2} mi  {} — {}  [{}]",
                m.distance_miles, m.masjid.name, address, m.masjid.id
            );
        }
    }
    Ok(())
}

async fn qibla_cmd(config: &Config, lat: Option<f64>, lon: Option<f64>) -> Result<()> {
    let origin = resolve_origin(config, lat, lon).await?;
    let q = qibla(origin);
    println!(
        "Qibla: {:.1}° ({}) — {:.0} km / {:.0} mi to the Kaaba",
        q.bearing_degrees, q.compass, q.distance_km, q.distance_miles
    );
    Ok(())
}

async fn locate(config: &Config, refresh: bool) -> Result<()> {
    let cache = location_cache(config)?;
    let loc = if refresh {
        cache.request().await?
    } else {
        cache.get_or_request().await?
    };

    let place = loc.city.as_deref().unwrap_or("your location");
    println!("{place}: {:.4}, {:.4}", loc.lat, loc.lon);
    Ok(())
}

fn find_masjid(config: &Config, id: &str) -> Result<Masjid> {
    pipeline(config)
        .load_entries()?
        .into_iter()
        .find(|m| m.id == id)
        .with_context(|| format!("no masjid with id {id} in the directory"))
}

fn favorites(config: &Config, cmd: FavoritesCommand) -> Result<()> {
    let store = favorites_store(config)?;
    match cmd {
        FavoritesCommand::List => {
            let favorites = store.list();
            if favorites.is_empty() {
                println!("No favorites saved.");
            }
            for f in favorites {
                let address = f.address.display_line();
                if address.is_empty() {
                    println!("{}  [{}]", f.name, f.id);
                } else {
                    println!("{} — {}  [{}]", f.name, address, f.id);
                }
            }
        }
        FavoritesCommand::Add { id } => {
            store.add(&find_masjid(config, &id)?);
            println!("Added {id}");
        }
        FavoritesCommand::Remove { id } => {
            store.remove(&id);
            println!("Removed {id}");
        }
        FavoritesCommand::Toggle { id } => {
            let now_favorite = store.toggle(&find_masjid(config, &id)?);
            println!(
                "{id} is {} a favorite",
                if now_favorite { "now" } else { "no longer" }
            );
        }
    }
    Ok(())
}
