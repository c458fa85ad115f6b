pub mod dataset;
pub mod error;
pub mod getter;
pub mod india;
pub mod join;
pub mod metrics;
pub mod output;
pub mod region;
pub mod schema;
pub mod source;

pub use census::{JoinedRecord, MetricRecord};
pub use error::{Error, Result};
pub use join::join;
pub use metrics::{load_metrics, parse_metrics};
pub use region::{load_regions, parse_regions, Region, RegionSet};
pub use schema::Schema;
