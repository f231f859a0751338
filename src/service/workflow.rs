//! Workflow actions on batches of mileage periods.
//!
//! Each action takes a list of period ids and moves every period one step
//! through the state graph. A batch is all or nothing: if any period fails,
//! no period changes state and no move is left in the ledger.

use std::collections::HashSet;

use tracing::info;
use uuid::Uuid;

use crate::error::{MileageError, MileageResult};
use crate::ledger::Ledger;
use crate::models::{MileageEntry, MileagePeriod, PeriodState};
use crate::posting::post_period;

use super::{Context, MileageService};

impl<L: Ledger + Clone> MileageService<L> {
    /// Sends cancelled periods back to draft.
    pub fn draft(&mut self, ids: &[Uuid]) -> MileageResult<Vec<MileagePeriod>> {
        self.transition_each(ids, PeriodState::Draft, |_, _| Ok(()))
    }

    /// Freezes draft periods.
    pub fn confirm(&mut self, ids: &[Uuid]) -> MileageResult<Vec<MileagePeriod>> {
        self.transition_each(ids, PeriodState::Confirmed, |_, _| Ok(()))
    }

    /// Creates the accounting move of each confirmed period.
    pub fn post(&mut self, ctx: &Context, ids: &[Uuid]) -> MileageResult<Vec<MileagePeriod>> {
        self.transition_each(ids, PeriodState::Posted, |svc, id| {
            let period = svc
                .periods
                .get(&id)
                .ok_or_else(|| MileageError::not_found("period", id))?;
            let entries = period
                .mileage
                .iter()
                .map(|entry| {
                    svc.entries
                        .get(entry)
                        .ok_or_else(|| MileageError::not_found("mileage", entry))
                })
                .collect::<MileageResult<Vec<&MileageEntry>>>()?;

            let posted = post_period(
                period,
                &entries,
                &ctx.company,
                ctx.today,
                &svc.registry,
                &svc.config,
                &mut svc.ledger,
            )?;
            svc.period_mut(id)?.account_move = Some(posted.move_id);
            Ok(())
        })
    }

    /// Cancels periods, reversing the move of posted ones.
    ///
    /// A period whose move is already a cancellation keeps it as is.
    pub fn cancel(&mut self, ctx: &Context, ids: &[Uuid]) -> MileageResult<Vec<MileagePeriod>> {
        self.transition_each(ids, PeriodState::Cancelled, |svc, id| {
            let Some(move_id) = svc.period(id)?.account_move else {
                return Ok(());
            };
            let cancellation = svc.ledger.cancel_move(move_id, ctx.today)?.id;
            svc.period_mut(id)?.account_move = Some(cancellation);
            Ok(())
        })
    }

    fn transition_each(
        &mut self,
        ids: &[Uuid],
        to: PeriodState,
        mut effect: impl FnMut(&mut Self, Uuid) -> MileageResult<()>,
    ) -> MileageResult<Vec<MileagePeriod>> {
        let mut seen = HashSet::new();
        let ids: Vec<Uuid> = ids.iter().copied().filter(|id| seen.insert(*id)).collect();

        self.atomically(|svc| {
            let mut changed = Vec::with_capacity(ids.len());
            for id in ids {
                svc.period(id)?.check_transition(to)?;
                effect(svc, id)?;

                let period = svc.period_mut(id)?;
                let from = period.transition(to)?;
                info!(period_id = %id, from = %from, to = %to, "Mileage period transitioned");
                changed.push(period.clone());
            }
            Ok(changed)
        })
    }
}
