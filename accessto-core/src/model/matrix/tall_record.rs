use serde::{Deserialize, Serialize};

/// one row of a stacked (tall) cost table, the shape delivered by routing
/// engines. `travel_time` is `NaN` for pairs the router could not connect.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq)]
pub struct TallRecord {
    pub origin_id: i64,
    pub destination_id: i64,
    pub travel_time: f64,
}

impl TallRecord {
    pub fn new(origin_id: i64, destination_id: i64, travel_time: f64) -> TallRecord {
        TallRecord {
            origin_id,
            destination_id,
            travel_time,
        }
    }
}
