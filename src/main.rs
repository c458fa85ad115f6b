use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use geojoin::dataset::Dataset;
use geojoin::getter::refresh;
use geojoin::output::{markers, to_feature_collection};
use geojoin::source::{Location, Source};
use geojoin::Schema;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "geojoin")]
#[command(about = "Join census metrics onto GeoJSON boundary regions")]
struct Args {
    /// Boundary collection: a path or an http(s) URL
    #[arg(long, env = "GEOJOIN_GEOJSON")]
    geojson: String,

    /// Read the boundary collection from this entry of a zip archive
    #[arg(long)]
    zip_entry: Option<String>,

    /// Census CSV: a path or an http(s) URL
    #[arg(long, env = "GEOJOIN_CENSUS")]
    census: String,

    /// Feature property holding the region name (default: st_nm)
    #[arg(long)]
    region_name_property: Option<String>,

    /// Feature property holding the region code (default: state_code)
    #[arg(long)]
    region_code_property: Option<String>,

    /// Census column holding the region name (default: "State or union territory")
    #[arg(long)]
    name_column: Option<String>,

    /// Census column holding the metric, e.g. "12,345/km²" (default: "Density[a]")
    #[arg(long)]
    metric_column: Option<String>,

    /// Where to write the joined GeoJSON
    #[arg(short, long, default_value = "out.geojson")]
    out: PathBuf,

    /// Also write one centroid marker per region as JSON
    #[arg(long)]
    markers: Option<PathBuf>,
}

impl Args {
    fn schema(&self) -> Schema {
        let mut schema = Schema::default();
        if let Some(property) = &self.region_name_property {
            schema.region_name_property = property.clone();
        }
        if let Some(property) = &self.region_code_property {
            schema.region_code_property = property.clone();
        }
        if let Some(column) = &self.name_column {
            schema.name_column = column.clone();
        }
        if let Some(column) = &self.metric_column {
            schema.metric_column = column.clone();
        }
        schema
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();

    let mut geojson = Source::new(args.geojson.parse::<Location>()?);
    if let Some(entry) = &args.zip_entry {
        geojson = geojson.in_zip(entry);
    }
    let dataset = Dataset {
        geojson,
        census: Source::new(args.census.parse::<Location>()?),
        schema: args.schema(),
    };

    let snapshot = refresh(&dataset).await?;

    let out = geojson::GeoJson::from(to_feature_collection(&snapshot.regions, &snapshot.joined));
    std::fs::write(&args.out, out.to_string())?;
    info!("Wrote {} features to {}", snapshot.joined.len(), args.out.display());

    if let Some(path) = &args.markers {
        let markers = markers(&snapshot.regions, &snapshot.joined);
        std::fs::write(path, serde_json::to_string_pretty(&markers)?)?;
        info!("Wrote {} markers to {}", markers.len(), path.display());
    }

    Ok(())
}
