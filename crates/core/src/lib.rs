//! sink-core
//!
//! Core library for estimating the CO2 sink capacity of a site from a top-down
//! map image and matching the remaining emission gap against regional
//! afforestation policy.
//!
//! The pipeline is classification -> area reconstruction -> absorption ->
//! gap -> policy verdict. Obtaining the image and loading the policy table are
//! left to callers (see `services::snapshot` and `policy::PolicyRepository`), so
//! every computation here is a pure function of its inputs and a `Calibration`.

pub mod analysis;
pub mod calibration;
pub mod emissions;
pub mod error;
pub mod model;
pub mod policy;
pub mod services;

pub use calibration::Calibration;
pub use error::{SinkError, SinkResult};

/// Returns the library version as encoded at compile time.
///
/// Useful for tests and for frontends to report consistent version info.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
