use std::collections::HashMap;

use geojson::{Feature, FeatureCollection, Geometry};
use serde_json::Value;
use tracing::debug;

use crate::error::{Error, GeometryIssue, GeometryProblem, Result};
use crate::schema::Schema;

/// One administrative area of a boundary collection.
#[derive(Debug, Clone, PartialEq)]
pub struct Region {
    pub id: String,
    pub name: String,
    // Passed through to the renderer as-is
    pub geometry: Option<Geometry>,
}

impl Region {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            geometry: None,
        }
    }

    pub fn with_geometry(mut self, geometry: Geometry) -> Self {
        self.geometry = Some(geometry);
        self
    }
}

/// A loaded boundary collection. Ids and names are unique; document order is
/// kept.
#[derive(Debug, Clone, Default)]
pub struct RegionSet {
    regions: Vec<Region>,
    by_name: HashMap<String, usize>,
    by_id: HashMap<String, usize>,
}

impl RegionSet {
    /// Builds a set from regions in order, failing with every duplicate id or
    /// name found.
    pub fn new(regions: impl IntoIterator<Item = Region>) -> Result<Self> {
        Self::build(regions.into_iter().enumerate(), Vec::new())
    }

    fn build(
        regions: impl Iterator<Item = (usize, Region)>,
        mut issues: Vec<GeometryIssue>,
    ) -> Result<Self> {
        let mut set = RegionSet::default();
        for (feature, region) in regions {
            if set.by_id.contains_key(&region.id) {
                issues.push(GeometryIssue {
                    feature,
                    problem: GeometryProblem::DuplicateCode(region.id),
                });
                continue;
            }
            if set.by_name.contains_key(&region.name) {
                issues.push(GeometryIssue {
                    feature,
                    problem: GeometryProblem::DuplicateName(region.name),
                });
                continue;
            }
            let index = set.regions.len();
            set.by_id.insert(region.id.clone(), index);
            set.by_name.insert(region.name.clone(), index);
            set.regions.push(region);
        }
        if !issues.is_empty() {
            issues.sort_by_key(|issue| issue.feature);
            return Err(Error::MalformedGeometry(issues));
        }
        Ok(set)
    }

    pub fn by_name(&self, name: &str) -> Option<&Region> {
        self.by_name.get(name).map(|&i| &self.regions[i])
    }

    pub fn by_id(&self, id: &str) -> Option<&Region> {
        self.by_id.get(id).map(|&i| &self.regions[i])
    }

    pub fn iter(&self) -> impl Iterator<Item = &Region> {
        self.regions.iter()
    }

    pub fn len(&self) -> usize {
        self.regions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }
}

fn property(feature: &Feature, key: &str) -> std::result::Result<String, GeometryProblem> {
    match feature.property(key) {
        None | Some(Value::Null) => Err(GeometryProblem::MissingProperty(key.to_string())),
        Some(Value::String(s)) if s.trim().is_empty() => {
            Err(GeometryProblem::MissingProperty(key.to_string()))
        }
        Some(Value::String(s)) => Ok(s.clone()),
        // `state_code` is stored as a number in some boundary files
        Some(Value::Number(n)) => Ok(n.to_string()),
        Some(_) => Err(GeometryProblem::InvalidProperty(key.to_string())),
    }
}

/// Reads every feature of `collection` into a region keyed by the schema's
/// name and code properties.
pub fn load_regions(collection: &FeatureCollection, schema: &Schema) -> Result<RegionSet> {
    let mut issues = Vec::new();
    let mut regions = Vec::with_capacity(collection.features.len());
    for (index, feature) in collection.features.iter().enumerate() {
        let name = property(feature, &schema.region_name_property);
        let code = property(feature, &schema.region_code_property);
        match (name, code) {
            (Ok(name), Ok(id)) => regions.push((
                index,
                Region {
                    id,
                    name,
                    geometry: feature.geometry.clone(),
                },
            )),
            (name, code) => {
                for problem in [name.err(), code.err()].into_iter().flatten() {
                    issues.push(GeometryIssue {
                        feature: index,
                        problem,
                    });
                }
            }
        }
    }
    let set = RegionSet::build(regions.into_iter(), issues)?;
    debug!("Loaded {} regions", set.len());
    Ok(set)
}

/// Parses a GeoJSON FeatureCollection document, then loads its regions.
pub fn parse_regions(document: &str, schema: &Schema) -> Result<RegionSet> {
    let collection: FeatureCollection = document.parse()?;
    load_regions(&collection, schema)
}
