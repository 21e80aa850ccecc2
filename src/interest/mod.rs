pub mod compound;
pub mod periodic;

pub use compound::{checked_powi, discount_factor, future_value_factor, powf_approx};
pub use periodic::periodic_rate;
