mod access_result;
mod direction;
pub mod dual;
mod normalization;
pub mod primal;

pub use access_result::AccessResult;
pub use direction::Direction;
pub use dual::{
    closest_opportunity, has_opportunity, nth_closest_opportunity, NO_OPPORTUNITY_COST,
};
pub use normalization::Normalization;
pub use primal::{calc_access_to_opportunities, ACCESS_SERIES_NAME};
