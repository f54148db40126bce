pub mod config;
pub mod filter;
pub mod stats;
pub mod ticket;

pub use config::*;
pub use filter::*;
pub use stats::*;
pub use ticket::*;
