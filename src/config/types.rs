//! Configuration types for the mileage module.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from YAML configuration files.

use serde::Deserialize;
use std::collections::HashMap;

use crate::models::ResourceKind;

/// Metadata about the module.
#[derive(Debug, Clone, Deserialize)]
pub struct ModuleMetadata {
    /// Technical code of the module (e.g., "employee_mileage").
    pub code: String,
    /// Human-readable name.
    pub name: String,
    /// Configuration version.
    pub version: String,
}

/// Accounting settings for one company.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CompanySettings {
    /// Journal mileage moves are recorded in.
    #[serde(default)]
    pub employee_mileage_journal: Option<String>,
    /// Payable account used for parties without their own.
    #[serde(default)]
    pub default_account_payable: Option<String>,
}

/// accounting.yaml file structure.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AccountingConfig {
    /// Map of company identifier to its settings.
    #[serde(default)]
    pub companies: HashMap<String, CompanySettings>,
}

/// A selectable resource kind with its label.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ResourceOption {
    /// The resource kind.
    pub kind: ResourceKind,
    /// Label shown to users.
    pub label: String,
}

/// resources.yaml file structure.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ResourcesConfig {
    /// Resource kinds entries may reference, in display order.
    #[serde(default)]
    pub resources: Vec<ResourceOption>,
}

/// The complete mileage configuration loaded from YAML files.
#[derive(Debug, Clone)]
pub struct MileageConfig {
    metadata: ModuleMetadata,
    accounting: AccountingConfig,
    resources: Vec<ResourceOption>,
}

impl MileageConfig {
    /// Creates a new MileageConfig from its component parts.
    pub fn new(
        metadata: ModuleMetadata,
        accounting: AccountingConfig,
        resources: Vec<ResourceOption>,
    ) -> Self {
        Self {
            metadata,
            accounting,
            resources,
        }
    }

    /// Returns the module metadata.
    pub fn module(&self) -> &ModuleMetadata {
        &self.metadata
    }

    /// Returns the settings of a company, if any are configured.
    pub fn company(&self, company: &str) -> Option<&CompanySettings> {
        self.accounting.companies.get(company)
    }

    /// Returns the settings of a company for modification, creating empty ones.
    pub fn company_mut(&mut self, company: &str) -> &mut CompanySettings {
        self.accounting
            .companies
            .entry(company.to_string())
            .or_default()
    }

    /// Returns the selectable resource kinds.
    pub fn resources(&self) -> &[ResourceOption] {
        &self.resources
    }
}
