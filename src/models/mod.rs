pub mod metrics;
pub mod aggregate;
pub mod archetype;
pub mod address;
pub mod wrap;
pub mod error;

pub use metrics::*;
pub use aggregate::*;
pub use archetype::*;
pub use address::*;
pub use wrap::*;
pub use error::*;
