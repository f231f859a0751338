//! Shared fixtures for service tests.

use std::str::FromStr;

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::config::{AccountingConfig, ConfigLoader, MileageConfig, ModuleMetadata, ResourceOption};
use crate::ledger::InMemoryLedger;
use crate::models::{
    Account, Address, Company, Currency, Employee, FiscalPeriod, Journal, NewMileageEntry,
    NewPeriod, Party, ResourceKind,
};
use crate::registry::Registry;

use super::{Context, MileageService};

pub(super) fn dec(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

pub(super) fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 3, 2).unwrap()
}

pub(super) fn ctx() -> Context {
    Context::new("acme").with_today(today())
}

pub(super) fn distance_entry(distance: u32) -> NewMileageEntry {
    NewMileageEntry {
        address: "addr_1".to_string(),
        distance: Some(distance),
        ..Default::default()
    }
}

pub(super) fn amount_entry(amount: &str) -> NewMileageEntry {
    NewMileageEntry {
        address: "addr_1".to_string(),
        amount: Some(dec(amount)),
        ..Default::default()
    }
}

pub(super) fn new_period(mileage: Vec<NewMileageEntry>) -> NewPeriod {
    NewPeriod {
        name: "March 2026".to_string(),
        employee: Some("emp_001".to_string()),
        mileage,
    }
}

/// A service for company "acme" with one employee paid 6.8785 per km, a
/// March 2026 fiscal period and only project work selectable.
pub(super) fn create_service() -> MileageService {
    let mut registry = Registry::new();
    registry.add_company(Company {
        id: "acme".to_string(),
        name: "ACME".to_string(),
        currency: Currency {
            code: "EUR".to_string(),
            digits: 2,
        },
    });
    registry.add_party(Party {
        id: "party_customer".to_string(),
        name: "Customer".to_string(),
        account_payable: None,
        addresses: vec![Address {
            id: "addr_1".to_string(),
            street: "Main Street 1".to_string(),
            city: Some("Springfield".to_string()),
        }],
    });
    registry.add_party(Party {
        id: "party_emp".to_string(),
        name: "Employee".to_string(),
        account_payable: Some("4000".to_string()),
        addresses: vec![],
    });
    registry
        .add_employee(Employee {
            id: "emp_001".to_string(),
            company: "acme".to_string(),
            party: "party_emp".to_string(),
            price_per_km: Some(dec("6.8785")),
            debit_account: Some("6250".to_string()),
        })
        .unwrap();

    let mut config = ConfigLoader::from_config(MileageConfig::new(
        ModuleMetadata {
            code: "employee_mileage".to_string(),
            name: "Employee Mileage".to_string(),
            version: "test".to_string(),
        },
        AccountingConfig::default(),
        vec![ResourceOption {
            kind: ResourceKind::ProjectWork,
            label: "Project Work".to_string(),
        }],
    ));
    config.set_employee_mileage_journal("acme", "MISC");

    let mut ledger = InMemoryLedger::new();
    ledger.add_account(Account {
        code: "6250".to_string(),
        name: "Travel expenses".to_string(),
        party_required: false,
    });
    ledger.add_account(Account {
        code: "4000".to_string(),
        name: "Payable".to_string(),
        party_required: true,
    });
    ledger.add_journal(Journal {
        code: "MISC".to_string(),
        name: "Miscellaneous".to_string(),
    });
    ledger.add_fiscal_period(FiscalPeriod {
        id: "2026-03".to_string(),
        company: "acme".to_string(),
        start_date: NaiveDate::from_ymd_opt(2026, 3, 1).unwrap(),
        end_date: NaiveDate::from_ymd_opt(2026, 3, 31).unwrap(),
        open: true,
    });

    MileageService::new(config, registry, ledger)
}
