pub mod paths;
pub mod settings;

pub use paths::AppPaths;
pub use settings::{AppConfig, OllamaConfig, RagConfig, ServerConfig};
