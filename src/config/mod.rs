//! Configuration loading and management for the mileage module.
//!
//! The configuration holds the company-scoped accounting settings (default
//! mileage journal, default payable account) and the resource kinds entries
//! may reference.
//!
//! # Example
//!
//! ```no_run
//! use employee_mileage::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/mileage").unwrap();
//! println!("Loaded module: {}", config.module().name);
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{
    AccountingConfig, CompanySettings, MileageConfig, ModuleMetadata, ResourceOption,
    ResourcesConfig,
};
