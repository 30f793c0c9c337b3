use serde::{Deserialize, Serialize};

/// which side of the cost matrix a dual measure is computed for.
#[derive(Deserialize, Serialize, Clone, Copy, Debug, Default, Hash, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    /// one result per origin, looking across destinations
    #[default]
    FromOrigins,
    /// one result per destination, looking across origins
    ToDestinations,
}

impl Direction {
    pub fn new(reverse_direction: bool) -> Direction {
        if reverse_direction {
            Direction::ToDestinations
        } else {
            Direction::FromOrigins
        }
    }

    pub fn is_reversed(&self) -> bool {
        matches!(self, Direction::ToDestinations)
    }
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = serde_json::to_string(self)
            .unwrap_or(String::from(""))
            .replace('\"', "");
        write!(f, "{s}")
    }
}
