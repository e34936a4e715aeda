pub use config::*;
pub use error::*;
pub use registry::*;
pub use report::*;
pub use runner::*;
pub use scorer::*;

mod config;
mod error;
mod registry;
mod report;
mod runner;
mod scorer;
