//! Company, party and employee registry.
//!
//! The registry is the read side of the company module as seen by mileage
//! posting: it resolves employees to parties, addresses to labels and the
//! active company to its currency.

use std::collections::HashMap;

use crate::error::{MileageError, MileageResult};
use crate::models::{Address, Company, Currency, Employee, Party};

/// In-memory registry of companies, parties and employees.
#[derive(Debug, Clone, Default)]
pub struct Registry {
    companies: HashMap<String, Company>,
    parties: HashMap<String, Party>,
    employees: HashMap<String, Employee>,
}

impl Registry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces a company.
    pub fn add_company(&mut self, company: Company) {
        self.companies.insert(company.id.clone(), company);
    }

    /// Adds or replaces a party.
    pub fn add_party(&mut self, party: Party) {
        self.parties.insert(party.id.clone(), party);
    }

    /// Adds or replaces an employee.
    ///
    /// The employee's company and party must already be registered.
    pub fn add_employee(&mut self, employee: Employee) -> MileageResult<()> {
        self.company(&employee.company)?;
        self.party(&employee.party)?;
        self.employees.insert(employee.id.clone(), employee);
        Ok(())
    }

    /// Looks up a company.
    pub fn company(&self, id: &str) -> MileageResult<&Company> {
        self.companies
            .get(id)
            .ok_or_else(|| MileageError::not_found("company", id))
    }

    /// Looks up a party.
    pub fn party(&self, id: &str) -> MileageResult<&Party> {
        self.parties
            .get(id)
            .ok_or_else(|| MileageError::not_found("party", id))
    }

    /// Looks up an employee.
    pub fn employee(&self, id: &str) -> MileageResult<&Employee> {
        self.employees
            .get(id)
            .ok_or_else(|| MileageError::not_found("employee", id))
    }

    /// Looks up an employee for modification.
    pub fn employee_mut(&mut self, id: &str) -> MileageResult<&mut Employee> {
        self.employees
            .get_mut(id)
            .ok_or_else(|| MileageError::not_found("employee", id))
    }

    /// Returns the party of an employee.
    pub fn employee_party(&self, employee: &Employee) -> MileageResult<&Party> {
        self.party(&employee.party)
    }

    /// Looks up an address across all parties.
    pub fn address(&self, id: &str) -> MileageResult<&Address> {
        self.parties
            .values()
            .flat_map(|p| p.addresses.iter())
            .find(|a| a.id == id)
            .ok_or_else(|| MileageError::not_found("address", id))
    }

    /// Returns the currency employee amounts are expressed in.
    ///
    /// The currency comes from the active company, not from the employee record;
    /// without an active company there is none.
    pub fn employee_currency(&self, active_company: Option<&str>) -> Option<&Currency> {
        active_company
            .and_then(|id| self.companies.get(id))
            .map(|c| &c.currency)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_registry() -> Registry {
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
                city: None,
            }],
        });
        registry.add_party(Party {
            id: "party_emp".to_string(),
            name: "Employee".to_string(),
            account_payable: None,
            addresses: vec![],
        });
        registry
            .add_employee(Employee {
                id: "emp_001".to_string(),
                company: "acme".to_string(),
                party: "party_emp".to_string(),
                price_per_km: None,
                debit_account: None,
            })
            .unwrap();
        registry
    }

    #[test]
    fn test_employee_lookup() {
        let registry = create_registry();
        let employee = registry.employee("emp_001").unwrap();
        assert_eq!(registry.employee_party(employee).unwrap().name, "Employee");
    }

    #[test]
    fn test_unknown_employee_returns_not_found() {
        let registry = create_registry();
        match registry.employee("emp_404") {
            Err(MileageError::RecordNotFound { model, id }) => {
                assert_eq!(model, "employee");
                assert_eq!(id, "emp_404");
            }
            other => panic!("Expected RecordNotFound, got {:?}", other),
        }
    }

    #[test]
    fn test_employee_requires_known_party() {
        let mut registry = create_registry();
        let result = registry.add_employee(Employee {
            id: "emp_002".to_string(),
            company: "acme".to_string(),
            party: "missing".to_string(),
            price_per_km: None,
            debit_account: None,
        });
        assert!(matches!(
            result,
            Err(MileageError::RecordNotFound { model: "party", .. })
        ));
    }

    #[test]
    fn test_address_lookup_across_parties() {
        let registry = create_registry();
        assert_eq!(registry.address("addr_1").unwrap().rec_name(), "Main Street 1");
        assert!(registry.address("addr_2").is_err());
    }

    #[test]
    fn test_employee_currency_follows_active_company() {
        let registry = create_registry();
        assert_eq!(registry.employee_currency(Some("acme")).unwrap().code, "EUR");
        assert!(registry.employee_currency(None).is_none());
        assert!(registry.employee_currency(Some("unknown")).is_none());
    }
}
