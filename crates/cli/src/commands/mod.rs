pub mod analyze;
pub mod assess;
pub mod batch;
pub mod calibration;
pub mod emissions;
pub mod policies;
pub mod util;

pub use analyze::*;
pub use assess::*;
pub use batch::*;
pub use calibration::*;
pub use emissions::*;
pub use policies::*;
pub use util::*;
