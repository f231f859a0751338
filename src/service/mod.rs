//! The mileage service: record storage, validation and workflow.
//!
//! [`MileageService`] owns the mileage periods and entries, and talks to the
//! [`Registry`] and a [`Ledger`] for everything else. Every public operation is
//! one unit of work: when it fails, nothing it did is kept.

mod context;
mod workflow;

#[cfg(test)]
mod test_support;

use std::collections::HashMap;

use tracing::{debug, warn};
use uuid::Uuid;

use crate::config::ConfigLoader;
use crate::error::{MileageError, MileageResult};
use crate::ledger::{InMemoryLedger, Ledger};
use crate::models::{
    Currency, MileageEntry, MileagePeriod, NewMileageEntry, NewPeriod, PeriodUpdate, ResourceKind,
};
use crate::registry::Registry;

pub use context::Context;

/// Stores mileage periods and entries and runs their workflow.
#[derive(Debug, Clone)]
pub struct MileageService<L = InMemoryLedger> {
    config: ConfigLoader,
    registry: Registry,
    ledger: L,
    periods: HashMap<Uuid, MileagePeriod>,
    entries: HashMap<Uuid, MileageEntry>,
}

impl<L: Ledger + Clone> MileageService<L> {
    /// Creates an empty service.
    pub fn new(config: ConfigLoader, registry: Registry, ledger: L) -> Self {
        Self {
            config,
            registry,
            ledger,
            periods: HashMap::new(),
            entries: HashMap::new(),
        }
    }

    /// Returns the configuration.
    pub fn config(&self) -> &ConfigLoader {
        &self.config
    }

    /// Returns the configuration for modification.
    pub fn config_mut(&mut self) -> &mut ConfigLoader {
        &mut self.config
    }

    /// Returns the registry.
    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Returns the registry for modification.
    pub fn registry_mut(&mut self) -> &mut Registry {
        &mut self.registry
    }

    /// Returns the ledger.
    pub fn ledger(&self) -> &L {
        &self.ledger
    }

    /// Returns the ledger for modification.
    pub fn ledger_mut(&mut self) -> &mut L {
        &mut self.ledger
    }

    /// Runs `op`, restoring all records and the ledger if it fails.
    fn atomically<T>(&mut self, op: impl FnOnce(&mut Self) -> MileageResult<T>) -> MileageResult<T> {
        let periods = self.periods.clone();
        let entries = self.entries.clone();
        let ledger = self.ledger.clone();

        let result = op(self);
        if let Err(err) = &result {
            warn!(error = %err, "Mileage operation rolled back");
            self.periods = periods;
            self.entries = entries;
            self.ledger = ledger;
        }
        result
    }

    /// Looks up a period.
    pub fn period(&self, id: Uuid) -> MileageResult<&MileagePeriod> {
        self.periods
            .get(&id)
            .ok_or_else(|| MileageError::not_found("period", id))
    }

    fn period_mut(&mut self, id: Uuid) -> MileageResult<&mut MileagePeriod> {
        self.periods
            .get_mut(&id)
            .ok_or_else(|| MileageError::not_found("period", id))
    }

    /// Returns all periods of an employee.
    pub fn periods_of_employee(&self, employee: &str) -> Vec<&MileagePeriod> {
        self.periods
            .values()
            .filter(|p| p.employee == employee)
            .collect()
    }

    /// Creates a draft period together with its entries.
    ///
    /// The employee defaults to the context employee.
    pub fn create_period(&mut self, ctx: &Context, input: NewPeriod) -> MileageResult<MileagePeriod> {
        let employee = input
            .employee
            .or_else(|| ctx.employee.clone())
            .ok_or_else(|| MileageError::InvalidPeriod {
                field: "employee".to_string(),
                message: "is required".to_string(),
            })?;
        self.registry.employee(&employee)?;

        let period = MileagePeriod::new(input.name, employee)?;
        let period_id = period.id;
        self.atomically(|svc| {
            svc.periods.insert(period_id, period);
            for entry in input.mileage {
                svc.add_entry(ctx, period_id, entry)?;
            }
            debug!(period_id = %period_id, "Mileage period created");
            svc.period(period_id).cloned()
        })
    }

    /// Changes the name or employee of a draft period.
    pub fn update_period(&mut self, id: Uuid, update: PeriodUpdate) -> MileageResult<MileagePeriod> {
        self.period(id)?.ensure_editable()?;

        if let Some(name) = &update.name {
            if name.trim().is_empty() {
                return Err(MileageError::InvalidPeriod {
                    field: "name".to_string(),
                    message: "is required".to_string(),
                });
            }
        }
        if let Some(employee) = &update.employee {
            self.registry.employee(employee)?;
        }

        let period = self.period_mut(id)?;
        if let Some(name) = update.name {
            period.name = name;
        }
        if let Some(employee) = update.employee {
            period.employee = employee;
        }
        Ok(period.clone())
    }

    /// Deletes a draft or cancelled period and its entries.
    pub fn delete_period(&mut self, id: Uuid) -> MileageResult<()> {
        self.period(id)?.ensure_deletable()?;
        if let Some(period) = self.periods.remove(&id) {
            for entry in &period.mileage {
                self.entries.remove(entry);
            }
        }
        debug!(period_id = %id, "Mileage period deleted");
        Ok(())
    }

    /// Copies periods with their entries. Every copy starts as a draft.
    pub fn copy_periods(&mut self, ids: &[Uuid]) -> MileageResult<Vec<MileagePeriod>> {
        self.atomically(|svc| {
            let mut copies = Vec::with_capacity(ids.len());
            for id in ids {
                let source = svc.period(*id)?.clone();
                let mut copy = source.duplicate();

                for entry_id in &source.mileage {
                    let mut entry = svc.entry(*entry_id)?.clone();
                    entry.id = Uuid::new_v4();
                    entry.period = copy.id;
                    copy.mileage.push(entry.id);
                    svc.entries.insert(entry.id, entry);
                }

                debug!(source = %source.id, copy = %copy.id, "Mileage period copied");
                svc.periods.insert(copy.id, copy.clone());
                copies.push(copy);
            }
            Ok(copies)
        })
    }

    /// Looks up an entry.
    pub fn entry(&self, id: Uuid) -> MileageResult<&MileageEntry> {
        self.entries
            .get(&id)
            .ok_or_else(|| MileageError::not_found("mileage", id))
    }

    /// Returns the entries of a period in insertion order.
    pub fn period_entries(&self, id: Uuid) -> MileageResult<Vec<&MileageEntry>> {
        self.period(id)?
            .mileage
            .iter()
            .map(|entry| self.entry(*entry))
            .collect()
    }

    /// Adds an entry to a draft period.
    pub fn add_entry(
        &mut self,
        ctx: &Context,
        period_id: Uuid,
        input: NewMileageEntry,
    ) -> MileageResult<MileageEntry> {
        self.period(period_id)?.ensure_editable()?;

        let entry = MileageEntry::from_input(period_id, input, ctx.today);
        self.validate_entry(&entry)?;

        self.period_mut(period_id)?.mileage.push(entry.id);
        self.entries.insert(entry.id, entry.clone());
        Ok(entry)
    }

    /// Replaces the fields of an entry of a draft period.
    pub fn update_entry(
        &mut self,
        ctx: &Context,
        id: Uuid,
        input: NewMileageEntry,
    ) -> MileageResult<MileageEntry> {
        let mut entry = self.entry(id)?.clone();
        self.period(entry.period)?.ensure_editable()?;

        entry.apply(input, ctx.today);
        self.validate_entry(&entry)?;

        self.entries.insert(id, entry.clone());
        Ok(entry)
    }

    /// Removes an entry from a draft period.
    pub fn delete_entry(&mut self, id: Uuid) -> MileageResult<()> {
        let period_id = self.entry(id)?.period;
        let period = self.period_mut(period_id)?;
        period.ensure_editable()?;

        period.mileage.retain(|entry| *entry != id);
        self.entries.remove(&id);
        Ok(())
    }

    /// Returns the display name of an entry.
    pub fn entry_rec_name(&self, id: Uuid) -> MileageResult<String> {
        let entry = self.entry(id)?;
        let address = self.registry.address(&entry.address)?;
        Ok(entry.rec_name(&address.rec_name()))
    }

    /// Returns the currency of employee amounts in the context company.
    pub fn employee_currency(&self, ctx: &Context) -> Option<&Currency> {
        self.registry.employee_currency(Some(&ctx.company))
    }

    /// Returns the resource kinds offered to users.
    pub fn resource_selection(&self) -> Vec<(Option<ResourceKind>, String)> {
        self.config.resource_selection()
    }

    fn validate_entry(&self, entry: &MileageEntry) -> MileageResult<()> {
        let address = self.registry.address(&entry.address)?;
        entry.validate(&address.rec_name())?;

        if let Some(resource) = &entry.resource {
            if !self.config.is_selectable(resource.kind()) {
                return Err(MileageError::ResourceNotSelectable {
                    kind: resource.kind().as_str().to_string(),
                });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::test_support::*;
    use super::*;
    use crate::models::{PeriodState, Resource};

    #[test]
    fn test_create_period_with_entries() {
        let mut service = create_service();
        let period = service
            .create_period(&ctx(), new_period(vec![distance_entry(4), amount_entry("2.50")]))
            .unwrap();

        assert_eq!(period.state, PeriodState::Draft);
        assert_eq!(period.employee, "emp_001");
        assert_eq!(period.mileage.len(), 2);

        let entries = service.period_entries(period.id).unwrap();
        assert_eq!(entries[0].distance, Some(4));
        assert_eq!(entries[0].date, today());
        assert_eq!(entries[1].amount, Some(dec("2.50")));
    }

    #[test]
    fn test_employee_defaults_to_context() {
        let mut service = create_service();
        let input = NewPeriod {
            name: "March".to_string(),
            employee: None,
            mileage: vec![],
        };
        let period = service
            .create_period(&ctx().with_employee("emp_001"), input.clone())
            .unwrap();
        assert_eq!(period.employee, "emp_001");

        assert!(matches!(
            service.create_period(&ctx(), input),
            Err(MileageError::InvalidPeriod { .. })
        ));
    }

    #[test]
    fn test_unknown_employee_is_rejected() {
        let mut service = create_service();
        let mut input = new_period(vec![]);
        input.employee = Some("emp_404".to_string());
        assert!(matches!(
            service.create_period(&ctx(), input),
            Err(MileageError::RecordNotFound { model: "employee", .. })
        ));
    }

    #[test]
    fn test_invalid_entry_discards_whole_period() {
        let mut service = create_service();
        let empty = NewMileageEntry {
            address: "addr_1".to_string(),
            ..Default::default()
        };
        let result = service.create_period(&ctx(), new_period(vec![distance_entry(4), empty]));

        match result {
            Err(MileageError::MissingDistanceAndAmount { record }) => {
                assert_eq!(record, "Main Street 1, Springfield");
            }
            other => panic!("Expected MissingDistanceAndAmount, got {:?}", other),
        }
        assert!(service.periods_of_employee("emp_001").is_empty());
    }

    #[test]
    fn test_update_entry_is_validated() {
        let mut service = create_service();
        let period = service
            .create_period(&ctx(), new_period(vec![distance_entry(4)]))
            .unwrap();
        let entry_id = period.mileage[0];

        let result = service.update_entry(
            &ctx(),
            entry_id,
            NewMileageEntry {
                address: "addr_1".to_string(),
                distance: Some(0),
                ..Default::default()
            },
        );
        assert!(matches!(
            result,
            Err(MileageError::MissingDistanceAndAmount { .. })
        ));
        assert_eq!(service.entry(entry_id).unwrap().distance, Some(4));

        let updated = service.update_entry(&ctx(), entry_id, distance_entry(9)).unwrap();
        assert_eq!(updated.distance, Some(9));
        assert_eq!(updated.id, entry_id);
    }

    #[test]
    fn test_entries_frozen_after_confirm() {
        let mut service = create_service();
        let period = service
            .create_period(&ctx(), new_period(vec![distance_entry(4)]))
            .unwrap();
        service.confirm(&[period.id]).unwrap();

        assert!(matches!(
            service.add_entry(&ctx(), period.id, distance_entry(1)),
            Err(MileageError::PeriodNotEditable { .. })
        ));
        assert!(matches!(
            service.update_entry(&ctx(), period.mileage[0], distance_entry(1)),
            Err(MileageError::PeriodNotEditable { .. })
        ));
        assert!(matches!(
            service.delete_entry(period.mileage[0]),
            Err(MileageError::PeriodNotEditable { .. })
        ));
        assert!(matches!(
            service.update_period(period.id, PeriodUpdate::default()),
            Err(MileageError::PeriodNotEditable { .. })
        ));
    }

    #[test]
    fn test_delete_entry() {
        let mut service = create_service();
        let period = service
            .create_period(&ctx(), new_period(vec![distance_entry(4), distance_entry(5)]))
            .unwrap();

        service.delete_entry(period.mileage[0]).unwrap();
        let entries = service.period_entries(period.id).unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].distance, Some(5));
        assert!(service.entry(period.mileage[0]).is_err());
    }

    #[test]
    fn test_update_period() {
        let mut service = create_service();
        let period = service.create_period(&ctx(), new_period(vec![])).unwrap();

        let updated = service
            .update_period(
                period.id,
                PeriodUpdate {
                    name: Some("April".to_string()),
                    employee: None,
                },
            )
            .unwrap();
        assert_eq!(updated.name, "April");
        assert_eq!(updated.employee, "emp_001");

        assert!(service
            .update_period(
                period.id,
                PeriodUpdate {
                    name: None,
                    employee: Some("emp_404".to_string()),
                },
            )
            .is_err());
    }

    #[test]
    fn test_delete_period_removes_entries() {
        let mut service = create_service();
        let period = service
            .create_period(&ctx(), new_period(vec![distance_entry(4)]))
            .unwrap();
        service.delete_period(period.id).unwrap();
        assert!(service.period(period.id).is_err());
        assert!(service.entry(period.mileage[0]).is_err());
    }

    #[test]
    fn test_confirmed_period_cannot_be_deleted() {
        let mut service = create_service();
        let period = service
            .create_period(&ctx(), new_period(vec![distance_entry(4)]))
            .unwrap();
        service.confirm(&[period.id]).unwrap();
        assert!(matches!(
            service.delete_period(period.id),
            Err(MileageError::PeriodNotDeletable { .. })
        ));
    }

    #[test]
    fn test_copy_resets_state_and_copies_entries() {
        let mut service = create_service();
        let period = service
            .create_period(&ctx(), new_period(vec![distance_entry(4)]))
            .unwrap();
        service.confirm(&[period.id]).unwrap();
        service.post(&ctx(), &[period.id]).unwrap();

        let copies = service.copy_periods(&[period.id]).unwrap();
        let copy = &copies[0];
        assert_eq!(copy.state, PeriodState::Draft);
        assert!(copy.account_move.is_none());
        assert_ne!(copy.mileage, period.mileage);

        let entries = service.period_entries(copy.id).unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].period, copy.id);
        assert_eq!(entries[0].distance, Some(4));

        assert_eq!(service.period(period.id).unwrap().state, PeriodState::Posted);
    }

    #[test]
    fn test_copy_with_unknown_id_copies_nothing() {
        let mut service = create_service();
        let period = service.create_period(&ctx(), new_period(vec![])).unwrap();
        let result = service.copy_periods(&[period.id, Uuid::new_v4()]);
        assert!(result.is_err());
        assert_eq!(service.periods_of_employee("emp_001").len(), 1);
    }

    #[test]
    fn test_entry_rec_name() {
        let mut service = create_service();
        let mut input = distance_entry(4);
        input.description = Some("client visit".to_string());
        let period = service.create_period(&ctx(), new_period(vec![input])).unwrap();
        assert_eq!(
            service.entry_rec_name(period.mileage[0]).unwrap(),
            "Main Street 1, Springfield - client visit"
        );
    }

    #[test]
    fn test_unknown_address_is_rejected() {
        let mut service = create_service();
        let period = service.create_period(&ctx(), new_period(vec![])).unwrap();
        let mut input = distance_entry(4);
        input.address = "addr_404".to_string();
        assert!(matches!(
            service.add_entry(&ctx(), period.id, input),
            Err(MileageError::RecordNotFound { model: "address", .. })
        ));
    }

    #[test]
    fn test_resource_must_be_selectable() {
        let mut service = create_service();
        let period = service.create_period(&ctx(), new_period(vec![])).unwrap();

        let mut input = distance_entry(4);
        input.resource = Some(Resource::ProjectWork("work_1".to_string()));
        assert!(service.add_entry(&ctx(), period.id, input).is_ok());

        let mut input = distance_entry(4);
        input.resource = Some(Resource::SaleOpportunity("opp_1".to_string()));
        match service.add_entry(&ctx(), period.id, input) {
            Err(MileageError::ResourceNotSelectable { kind }) => {
                assert_eq!(kind, "sale_opportunity");
            }
            other => panic!("Expected ResourceNotSelectable, got {:?}", other),
        }
    }

    #[test]
    fn test_employee_currency_from_context_company() {
        let service = create_service();
        assert_eq!(service.employee_currency(&ctx()).unwrap().code, "EUR");
    }
}
