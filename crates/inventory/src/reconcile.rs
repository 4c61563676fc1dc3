//! Best-effort stock reconciliation for one order.
//!
//! Units are decremented strictly in order, one remote call each. A failed
//! decrement is recorded and the batch carries on, so every unit is always
//! attempted and the result lists exactly which ones did not go through.
//! Two units for the same product/variant are two calls; they are never merged.

use tracing::{error, info};

use stocksync_catalog::ResolvedUnit;
use stocksync_core::VariantId;

use crate::service::InventoryService;

/// Overall reconciliation status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReconcileStatus {
    Success,
    Fail,
}

impl ReconcileStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReconcileStatus::Success => "SUCCESS",
            ReconcileStatus::Fail => "FAIL",
        }
    }
}

impl core::fmt::Display for ReconcileStatus {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnitOutcome {
    pub unit: ResolvedUnit,
    pub succeeded: bool,
}

/// One outcome per resolved unit, in the order the units were attempted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReconciliationResult {
    outcomes: Vec<UnitOutcome>,
}

impl ReconciliationResult {
    pub fn from_outcomes(outcomes: Vec<UnitOutcome>) -> Self {
        Self { outcomes }
    }

    pub fn outcomes(&self) -> &[UnitOutcome] {
        &self.outcomes
    }

    pub fn len(&self) -> usize {
        self.outcomes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.outcomes.is_empty()
    }

    /// SUCCESS iff every unit succeeded (vacuously true for an empty order).
    pub fn status(&self) -> ReconcileStatus {
        if self.outcomes.iter().all(|o| o.succeeded) {
            ReconcileStatus::Success
        } else {
            ReconcileStatus::Fail
        }
    }

    pub fn failed(&self) -> impl Iterator<Item = &UnitOutcome> {
        self.outcomes.iter().filter(|o| !o.succeeded)
    }

    pub fn succeeded_count(&self) -> usize {
        self.outcomes.iter().filter(|o| o.succeeded).count()
    }
}

/// Applies resolved units to an inventory service.
#[derive(Debug)]
pub struct InventoryReconciler<S> {
    service: S,
}

impl<S> InventoryReconciler<S> {
    pub fn new(service: S) -> Self {
        Self { service }
    }

    pub fn service(&self) -> &S {
        &self.service
    }
}

impl<S> InventoryReconciler<S>
where
    S: InventoryService,
{
    pub async fn reconcile(&self, units: Vec<ResolvedUnit>) -> ReconciliationResult {
        let mut outcomes = Vec::with_capacity(units.len());

        for unit in units {
            let product_id = unit.entry.product_id();
            let variant_id = unit.entry.variant_id().unwrap_or(VariantId::NONE);

            let succeeded = match self
                .service
                .decrement(product_id, variant_id, unit.quantity)
                .await
            {
                Ok(()) => {
                    info!(
                        product = %unit.entry.display_name(),
                        quantity = unit.quantity,
                        "updated inventory"
                    );
                    true
                }
                Err(e) => {
                    error!(
                        product = %unit.entry.display_name(),
                        product_id = %product_id,
                        variant_id = %variant_id,
                        quantity = unit.quantity,
                        error = %e,
                        "failed to update inventory"
                    );
                    false
                }
            };

            outcomes.push(UnitOutcome { unit, succeeded });
        }

        ReconciliationResult::from_outcomes(outcomes)
    }
}
