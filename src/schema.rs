/// Names that bind a boundary collection and a census table to regions and
/// metric records. Defaults match `states_india.geojson` and
/// `india_census.csv`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Schema {
    pub region_name_property: String,
    pub region_code_property: String,
    pub name_column: String,
    pub metric_column: String,
}

impl Default for Schema {
    fn default() -> Self {
        Self {
            region_name_property: "st_nm".to_string(),
            region_code_property: "state_code".to_string(),
            name_column: "State or union territory".to_string(),
            metric_column: "Density[a]".to_string(),
        }
    }
}
