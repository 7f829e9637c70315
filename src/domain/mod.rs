// Domain types and value objects
mod decision;
mod price_point;

pub use decision::{Decision, DecisionError};
pub use price_point::{PriceField, PricePoint, RawCandle};
