/// Warehouse config asset loading and session bootstrap.
pub mod config_loader;
