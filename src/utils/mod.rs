pub mod table;
pub mod errors;
pub mod config;

pub use table::Table;
pub use errors::{ChartError, ConfigError, FetchError, PipelineError};
pub use config::Config;
