use std::path::{Path, PathBuf};

use clap::Parser;
use polars::prelude::*;
use tracing_subscriber::EnvFilter;

use geojoin::getter::{snapshot, Getter};
use geojoin::india::IndiaStates;
use geojoin::output::{markers, to_dataframe, to_feature_collection};

#[derive(Parser)]
#[command(name = "india")]
#[command(about = "Population density of Indian states, joined to their boundaries")]
struct Args {
    /// Directory holding states_india.geojson and india_census.csv
    #[arg(short, long, default_value = "datasets")]
    data_dir: PathBuf,

    /// Directory to write joined outputs into
    #[arg(short, long, default_value = "data")]
    out_dir: PathBuf,
}

fn write_df(file_name: &Path, df: &mut DataFrame) -> anyhow::Result<()> {
    let mut file = std::fs::File::create(file_name)?;
    CsvWriter::new(&mut file).finish(df)?;
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();
    let india = IndiaStates::in_dir(&args.data_dir);
    std::fs::create_dir_all(&args.out_dir)?;

    // Census data
    let census = india.census().await?;
    println!("Census:");
    println!("{}", census);

    // Join
    let geojson = india.geojson().await?;
    let snapshot = snapshot(&geojson, &census, &india.schema())?;
    let mut joined = to_dataframe(&snapshot.joined)?;
    println!("Joined:");
    println!("{}", joined);
    write_df(&args.out_dir.join("joined.csv"), &mut joined)?;

    // Choropleth and scatter layers
    let choropleth =
        geojson::GeoJson::from(to_feature_collection(&snapshot.regions, &snapshot.joined));
    std::fs::write(args.out_dir.join("india_density.geojson"), choropleth.to_string())?;
    let markers = markers(&snapshot.regions, &snapshot.joined);
    std::fs::write(
        args.out_dir.join("india_markers.json"),
        serde_json::to_string_pretty(&markers)?,
    )?;

    Ok(())
}
