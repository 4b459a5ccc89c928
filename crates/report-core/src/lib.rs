pub mod coerce;
pub mod error;
pub mod provider;
pub mod types;

pub use coerce::*;
pub use error::*;
pub use provider::*;
pub use types::*;
