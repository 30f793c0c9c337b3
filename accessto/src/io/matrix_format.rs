use serde::{Deserialize, Serialize};

/// layout of a matrix file.
#[derive(Deserialize, Serialize, Clone, Copy, Debug, Default, PartialEq, Eq, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum MatrixFormat {
    /// one (origin_id, destination_id, travel_time) row per pair
    #[default]
    Tall,
    /// one row per origin, one column per destination
    Wide,
}

impl std::fmt::Display for MatrixFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = serde_json::to_string(self)
            .unwrap_or(String::from(""))
            .replace('\"', "");
        write!(f, "{s}")
    }
}
