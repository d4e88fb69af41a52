pub mod data;
pub mod io;
pub mod store;


pub use data::{is_configured_url, Config};
pub use io::ConfigError;
pub use store::ConfigStore;
