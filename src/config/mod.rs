/// Configuration system
///
/// - `macros`: the `config_struct!` macro
/// - `schemas`: every configuration structure with its defaults
/// - `utils`: loading and global access helpers
pub mod macros;
pub mod schemas;
pub mod utils;

pub use schemas::{Config, GatewayConfig, LoggingConfig, PortfolioConfig};
pub use utils::{get_config_clone, load_config_from_path, read_config_file, with_config};
