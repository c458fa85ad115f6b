use async_trait::async_trait;
use census::JoinedRecord;
use geojson::FeatureCollection;
use polars::prelude::DataFrame;
use tracing::info;

use crate::error::Result;
use crate::join::join;
use crate::metrics::load_metrics;
use crate::region::{load_regions, RegionSet};
use crate::schema::Schema;

/// Gets census and boundary data for a given dataset.
#[async_trait]
pub trait Getter {
    /// Gets the census table.
    async fn census(&self) -> Result<DataFrame>;
    /// Gets the boundary collection.
    async fn geojson(&self) -> Result<FeatureCollection>;
    /// Names of the properties and columns that key the join.
    fn schema(&self) -> Schema {
        Schema::default()
    }
}

/// Regions and joined records produced by one render cycle.
#[derive(Debug, Clone)]
pub struct Snapshot {
    pub regions: RegionSet,
    pub joined: Vec<JoinedRecord>,
}

/// Runs one render cycle: fetches both documents and joins them afresh.
pub async fn refresh<G: Getter + Sync + ?Sized>(getter: &G) -> Result<Snapshot> {
    let geojson = getter.geojson().await?;
    let census = getter.census().await?;
    snapshot(&geojson, &census, &getter.schema())
}

/// Joins already fetched documents.
pub fn snapshot(
    geojson: &FeatureCollection,
    census: &DataFrame,
    schema: &Schema,
) -> Result<Snapshot> {
    let regions = load_regions(geojson, schema)?;
    let metrics = load_metrics(census, schema)?;
    let joined = join(&regions, &metrics)?;
    info!(
        "Joined {} census rows onto {} regions",
        joined.len(),
        regions.len()
    );
    Ok(Snapshot { regions, joined })
}
