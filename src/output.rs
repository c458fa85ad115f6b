use census::JoinedRecord;
use geo::Centroid;
use geojson::{feature::Id, Feature, FeatureCollection};
use polars::prelude::*;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::region::RegionSet;

/// Choropleth layer: one feature per joined record, keyed by region id.
pub fn to_feature_collection(regions: &RegionSet, joined: &[JoinedRecord]) -> FeatureCollection {
    joined
        .iter()
        .map(|j| {
            let mut feature = Feature {
                bbox: None,
                geometry: regions.by_id(&j.region_id).and_then(|r| r.geometry.clone()),
                id: Some(Id::String(j.region_id.clone())),
                properties: None,
                foreign_members: None,
            };
            for (column, value) in &j.record.extra {
                feature.set_property(column.as_str(), value.as_str());
            }
            // Derived properties win over census columns of the same name
            feature.set_property("name", j.name());
            feature.set_property("metric", j.metric());
            feature.set_property("raw_metric", j.record.raw_metric.as_str());
            feature
        })
        .collect()
}

/// A scatter-geo marker placed at the centroid of its region.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Marker {
    pub region_id: String,
    pub name: String,
    pub metric: u64,
    pub lon: f64,
    pub lat: f64,
}

/// Scatter layer. Records whose region has no usable geometry get no marker.
pub fn markers(regions: &RegionSet, joined: &[JoinedRecord]) -> Vec<Marker> {
    joined
        .iter()
        .filter_map(|j| {
            let geometry = regions.by_id(&j.region_id)?.geometry.as_ref()?;
            let geometry: geo::Geometry<f64> = geometry.value.clone().try_into().ok()?;
            let centroid = geometry.centroid()?;
            Some(Marker {
                region_id: j.region_id.clone(),
                name: j.name().to_string(),
                metric: j.metric(),
                lon: centroid.x(),
                lat: centroid.y(),
            })
        })
        .collect()
}

pub fn to_dataframe(joined: &[JoinedRecord]) -> Result<DataFrame> {
    let ids: Vec<&str> = joined.iter().map(|j| j.region_id.as_str()).collect();
    let names: Vec<&str> = joined.iter().map(|j| j.name()).collect();
    let metrics: Vec<u64> = joined.iter().map(|j| j.metric()).collect();
    let raw: Vec<&str> = joined
        .iter()
        .map(|j| j.record.raw_metric.as_str())
        .collect();
    Ok(DataFrame::new(vec![
        Series::new("id", ids),
        Series::new("name", names),
        Series::new("metric", metrics),
        Series::new("raw_metric", raw),
    ])?)
}

#[cfg(test)]
mod tests {
    use census::MetricRecord;
    use geojson::{Geometry, Value};

    use super::*;
    use crate::region::Region;

    fn square(x: f64, y: f64) -> Geometry {
        Geometry::new(Value::Polygon(vec![vec![
            vec![x, y],
            vec![x + 2.0, y],
            vec![x + 2.0, y + 2.0],
            vec![x, y + 2.0],
            vec![x, y],
        ]]))
    }

    fn fixture() -> (RegionSet, Vec<JoinedRecord>) {
        let regions = RegionSet::new([
            Region::new("MH", "Maharashtra").with_geometry(square(72.0, 16.0)),
            Region::new("XX", "Nowhere"),
        ])
        .unwrap();
        let joined = vec![
            JoinedRecord {
                region_id: "MH".into(),
                record: MetricRecord::new("Maharashtra", "365/km²")
                    .unwrap()
                    .with_extra("Rank", "2"),
            },
            JoinedRecord {
                region_id: "XX".into(),
                record: MetricRecord::new("Nowhere", "0/km²").unwrap(),
            },
        ];
        (regions, joined)
    }

    #[test]
    fn features_carry_id_and_metric() {
        let (regions, joined) = fixture();
        let collection = to_feature_collection(&regions, &joined);
        assert_eq!(collection.features.len(), 2);
        let first = &collection.features[0];
        assert_eq!(first.id, Some(Id::String("MH".into())));
        assert_eq!(first.geometry, Some(square(72.0, 16.0)));
        assert_eq!(first.property("metric"), Some(&serde_json::json!(365)));
        assert_eq!(first.property("Rank"), Some(&serde_json::json!("2")));
        assert!(collection.features[1].geometry.is_none());
    }

    #[test]
    fn census_columns_do_not_shadow_metric() {
        let regions = RegionSet::new([Region::new("KL", "Kerala")]).unwrap();
        let joined = vec![JoinedRecord {
            region_id: "KL".into(),
            record: MetricRecord::new("Kerala", "860/km²")
                .unwrap()
                .with_extra("metric", "people per km2")
                .with_extra("name", "Keralam")
                .with_extra("Rank", "13"),
        }];
        let collection = to_feature_collection(&regions, &joined);
        let feature = &collection.features[0];
        assert_eq!(feature.property("metric"), Some(&serde_json::json!(860)));
        assert_eq!(feature.property("name"), Some(&serde_json::json!("Kerala")));
        assert_eq!(feature.property("Rank"), Some(&serde_json::json!("13")));
    }

    #[test]
    fn markers_sit_at_centroids() {
        let (regions, joined) = fixture();
        let markers = markers(&regions, &joined);
        assert_eq!(markers.len(), 1);
        assert_eq!(markers[0].region_id, "MH");
        assert_eq!(markers[0].metric, 365);
        assert!((markers[0].lon - 73.0).abs() < 1e-9);
        assert!((markers[0].lat - 17.0).abs() < 1e-9);
    }

    #[test]
    fn dataframe_columns() {
        let (_, joined) = fixture();
        let df = to_dataframe(&joined).unwrap();
        assert_eq!(df.shape(), (2, 4));
        assert_eq!(df.get_column_names(), ["id", "name", "metric", "raw_metric"]);
        assert_eq!(df.column("metric").unwrap().u64().unwrap().get(0), Some(365));
    }
}
