//! Trip-record transformation stages.
//!
//! - **datetime**: calendar/duration feature derivation, raw timestamp removal
//! - **flag**: two-valued store-and-forward code to 1/0
//! - **filter**: combined validity mask built once, applied once
//! - **narrow**: float/integer downcasting and dictionary encoding

pub mod datetime;
pub mod error;
pub mod filter;
pub mod flag;
pub mod narrow;

pub use datetime::extract_time_features;
pub use error::TransformError;
pub use filter::{apply_validity_mask, build_validity_mask};
pub use flag::encode_store_fwd_flag;
pub use narrow::narrow_types;
