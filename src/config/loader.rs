//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading the mileage
//! configuration from YAML files.

use std::fs;
use std::path::Path;

use crate::error::{MileageError, MileageResult};
use crate::models::ResourceKind;

use super::types::{
    AccountingConfig, CompanySettings, MileageConfig, ModuleMetadata, ResourceOption,
    ResourcesConfig,
};

/// Loads and provides access to the mileage configuration.
///
/// # Directory Structure
///
/// ```text
/// config/mileage/
/// ├── module.yaml      # Module metadata
/// ├── accounting.yaml  # Per-company journal and default payable account
/// └── resources.yaml   # Resource kinds entries may reference
/// ```
///
/// # Example
///
/// ```no_run
/// use employee_mileage::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/mileage").unwrap();
/// let journal = loader.employee_mileage_journal("acme").unwrap();
/// println!("Mileage journal: {}", journal);
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    config: MileageConfig,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// Returns an error if any file is missing or contains invalid YAML.
    pub fn load<P: AsRef<Path>>(path: P) -> MileageResult<Self> {
        let path = path.as_ref();

        let metadata = Self::load_yaml::<ModuleMetadata>(&path.join("module.yaml"))?;
        let accounting = Self::load_yaml::<AccountingConfig>(&path.join("accounting.yaml"))?;
        let resources = Self::load_yaml::<ResourcesConfig>(&path.join("resources.yaml"))?;

        Ok(Self::from_config(MileageConfig::new(
            metadata,
            accounting,
            resources.resources,
        )))
    }

    /// Wraps an already built configuration.
    pub fn from_config(config: MileageConfig) -> Self {
        Self { config }
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> MileageResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| MileageError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| MileageError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    /// Returns the underlying configuration.
    pub fn config(&self) -> &MileageConfig {
        &self.config
    }

    /// Returns the module metadata.
    pub fn module(&self) -> &ModuleMetadata {
        self.config.module()
    }

    /// Gets the default mileage journal of a company.
    ///
    /// Returns `MissingMileageJournal` when the company has none configured.
    pub fn employee_mileage_journal(&self, company: &str) -> MileageResult<&str> {
        self.config
            .company(company)
            .and_then(|s| s.employee_mileage_journal.as_deref())
            .ok_or_else(|| MileageError::MissingMileageJournal {
                company: company.to_string(),
            })
    }

    /// Sets the default mileage journal of a company.
    pub fn set_employee_mileage_journal(&mut self, company: &str, journal: impl Into<String>) {
        self.config.company_mut(company).employee_mileage_journal = Some(journal.into());
    }

    /// Gets the default payable account of a company, if configured.
    pub fn default_account_payable(&self, company: &str) -> Option<&str> {
        self.config
            .company(company)
            .and_then(|s: &CompanySettings| s.default_account_payable.as_deref())
    }

    /// Returns true if entries may reference resources of `kind`.
    pub fn is_selectable(&self, kind: ResourceKind) -> bool {
        self.config.resources().iter().any(|r| r.kind == kind)
    }

    /// Returns the resource selection offered to users, starting with the empty choice.
    pub fn resource_selection(&self) -> Vec<(Option<ResourceKind>, String)> {
        std::iter::once((None, String::new()))
            .chain(
                self.config
                    .resources()
                    .iter()
                    .map(|ResourceOption { kind, label }| (Some(*kind), label.clone())),
            )
            .collect()
    }
}
