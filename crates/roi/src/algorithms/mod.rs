pub mod threshold;
pub mod contours;
pub mod polygon;
pub mod filter;
pub mod scaling;
pub mod simplification;
pub mod metrics;

pub use threshold::*;
pub use contours::*;
pub use polygon::*;
pub use filter::*;
pub use scaling::*;
pub use simplification::*;
pub use metrics::*;
