use census::{JoinedRecord, MetricRecord};
use tracing::{debug, warn};

use crate::error::{Error, Result};
use crate::region::RegionSet;

/// Attaches the id of the region whose display name matches each record
/// exactly. Output keeps input order.
///
/// Fails with `UnresolvedRegion` naming every record that matched nothing.
pub fn join(regions: &RegionSet, metrics: &[MetricRecord]) -> Result<Vec<JoinedRecord>> {
    let mut joined = Vec::with_capacity(metrics.len());
    let mut unresolved = Vec::new();
    for record in metrics {
        match regions.by_name(&record.name) {
            Some(region) => joined.push(JoinedRecord {
                region_id: region.id.clone(),
                record: record.clone(),
            }),
            None => unresolved.push(record.name.clone()),
        }
    }
    if !unresolved.is_empty() {
        warn!("{} metric records match no region", unresolved.len());
        return Err(Error::UnresolvedRegion(unresolved));
    }
    debug!("Joined {} records", joined.len());
    Ok(joined)
}
