mod filesystem;
mod loader;
mod model;

pub use filesystem::{FileSystem, RealFileSystem};
pub use loader::{ConfigLoader, FileConfigLoader, LOCAL_CONFIG_NAME};
pub use model::{Config, DEFAULT_GIT_PROGRAM, GitConfig};

#[cfg(test)]
#[path = "loader_tests.rs"]
mod tests;
