use async_trait::async_trait;
use geojson::FeatureCollection;
use polars::prelude::DataFrame;

use crate::error::Result;
use crate::getter::Getter;
use crate::metrics::read_census;
use crate::schema::Schema;
use crate::source::Source;

/// Any boundary collection and census table, joined with a given schema.
#[derive(Debug, Clone)]
pub struct Dataset {
    pub geojson: Source,
    pub census: Source,
    pub schema: Schema,
}

pub(crate) async fn fetch_census(source: &Source) -> Result<DataFrame> {
    read_census(source.fetch().await?)
}

pub(crate) async fn fetch_geojson(source: &Source) -> Result<FeatureCollection> {
    let data = source.fetch().await?;
    Ok(String::from_utf8(data)?.parse()?)
}

#[async_trait]
impl Getter for Dataset {
    async fn census(&self) -> Result<DataFrame> {
        fetch_census(&self.census).await
    }
    async fn geojson(&self) -> Result<FeatureCollection> {
        fetch_geojson(&self.geojson).await
    }
    fn schema(&self) -> Schema {
        self.schema.clone()
    }
}
