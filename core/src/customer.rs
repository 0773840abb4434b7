use crate::types::{Interest, SimTime};
use serde::{Deserialize, Serialize};

/// A customer call, as supplied by the data source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerRecord {
    pub arrival_time: SimTime,
    pub interest:     Interest,
    pub sale_closed:  bool,
}
