pub mod configs;
pub mod defaults;
pub mod env;
pub mod validate;

pub use configs::{AppConfig, DatabaseConfig, GeneralConfig, LoggingConfig};
pub use env::load_dotenv;
