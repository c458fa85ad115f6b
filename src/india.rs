use std::path::Path;

use async_trait::async_trait;
use geojson::FeatureCollection;
use polars::prelude::DataFrame;

use crate::dataset::{fetch_census, fetch_geojson};
use crate::error::Result;
use crate::getter::Getter;
use crate::source::Source;

pub const GEOJSON_FILE: &str = "states_india.geojson";
pub const CENSUS_FILE: &str = "india_census.csv";

/// Population density of Indian states and union territories.
#[derive(Debug, Clone)]
pub struct IndiaStates {
    pub geojson: Source,
    pub census: Source,
}

impl IndiaStates {
    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        let dir = dir.as_ref();
        Self {
            geojson: Source::file(dir.join(GEOJSON_FILE)),
            census: Source::file(dir.join(CENSUS_FILE)),
        }
    }
}

impl Default for IndiaStates {
    fn default() -> Self {
        Self::in_dir("datasets")
    }
}

#[async_trait]
impl Getter for IndiaStates {
    async fn census(&self) -> Result<DataFrame> {
        fetch_census(&self.census).await
    }
    async fn geojson(&self) -> Result<FeatureCollection> {
        fetch_geojson(&self.geojson).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::getter::refresh;

    const STATES: &str = r#"{
      "type": "FeatureCollection",
      "features": [
        {"type": "Feature",
         "geometry": {"type": "Polygon", "coordinates": [[[72.6, 15.6], [80.9, 15.6], [80.9, 22.0], [72.6, 22.0], [72.6, 15.6]]]},
         "properties": {"st_nm": "Maharashtra", "state_code": "MH"}},
        {"type": "Feature",
         "geometry": {"type": "Polygon", "coordinates": [[[74.8, 8.2], [77.4, 8.2], [77.4, 12.8], [74.8, 12.8], [74.8, 8.2]]]},
         "properties": {"st_nm": "Kerala", "state_code": "KL"}}
      ]
    }"#;

    fn write_dataset(dir: &Path, census: &str) {
        std::fs::write(dir.join(GEOJSON_FILE), STATES).unwrap();
        std::fs::write(dir.join(CENSUS_FILE), census).unwrap();
    }

    #[tokio::test]
    async fn test_india_states() {
        let dir = tempfile::tempdir().unwrap();
        write_dataset(
            dir.path(),
            "State or union territory,Density[a]\nMaharashtra,365/km²\nKerala,860/km²\n",
        );
        let india = IndiaStates::in_dir(dir.path());
        let snapshot = refresh(&india).await.unwrap();
        let pairs: Vec<_> = snapshot
            .joined
            .iter()
            .map(|j| (j.region_id.as_str(), j.metric()))
            .collect();
        assert_eq!(pairs, [("MH", 365), ("KL", 860)]);
        assert_eq!(snapshot.regions.len(), 2);
    }

    #[tokio::test]
    async fn unknown_state_fails_the_cycle() {
        let dir = tempfile::tempdir().unwrap();
        write_dataset(
            dir.path(),
            "State or union territory,Density[a]\nKerala,860/km²\nGoa,394/km²\n",
        );
        let result = refresh(&IndiaStates::in_dir(dir.path())).await;
        assert!(matches!(result, Err(Error::UnresolvedRegion(names)) if names == ["Goa"]));
    }
}
