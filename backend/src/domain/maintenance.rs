//! Per-apartment maintenance charges and their payment history.

use std::fmt;
use std::sync::Arc;

use chrono::{DateTime, NaiveDate, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use uuid::Uuid;

/// Identifier of a maintenance charge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ChargeId(Uuid);

impl ChargeId {
    /// A fresh random identifier.
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for ChargeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Payment state of a charge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChargeStatus {
    /// Not yet paid.
    Pending,
    /// Settled; `paid_at` records when.
    Paid,
}

/// An amount an apartment owes for upkeep.
///
/// Amounts are in minor currency units so no rounding is involved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MaintenanceCharge {
    /// Ledger identifier.
    pub id: ChargeId,
    /// Apartment billed.
    pub apartment: String,
    /// What the charge covers, e.g. `October maintenance`.
    pub description: String,
    /// Amount in minor units; never zero.
    pub amount_minor: u64,
    /// Payment deadline.
    pub due_on: NaiveDate,
    /// Whether the charge is settled.
    pub status: ChargeStatus,
    /// Set once, on the first payment.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub paid_at: Option<DateTime<Utc>>,
}

/// Every charge raised against every apartment, in the order raised.
pub struct MaintenanceLedger {
    charges: Vec<MaintenanceCharge>,
    clock: Arc<dyn Clock>,
}

impl MaintenanceLedger {
    /// An empty ledger stamping payments with `clock`.
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            charges: Vec::new(),
            clock,
        }
    }

    /// Raise a pending charge against `apartment`.
    pub fn raise_charge(
        &mut self,
        apartment: impl Into<String>,
        description: impl Into<String>,
        amount_minor: u64,
        due_on: NaiveDate,
    ) -> MaintenanceCharge {
        let charge = MaintenanceCharge {
            id: ChargeId::random(),
            apartment: apartment.into(),
            description: description.into(),
            amount_minor,
            due_on,
            status: ChargeStatus::Pending,
            paid_at: None,
        };
        info!(
            charge_id = %charge.id,
            apartment = %charge.apartment,
            amount_minor,
            due_on = %due_on,
            "maintenance charge raised"
        );
        self.charges.push(charge.clone());
        charge
    }

    /// Look up a charge by id.
    pub fn find(&self, charge_id: ChargeId) -> Option<&MaintenanceCharge> {
        self.charges.iter().find(|charge| charge.id == charge_id)
    }

    /// Settle a charge. Paying twice returns the charge unchanged.
    pub fn mark_paid(&mut self, charge_id: ChargeId) -> Option<MaintenanceCharge> {
        let now = self.clock.utc();
        let Some(charge) = self.charges.iter_mut().find(|charge| charge.id == charge_id) else {
            warn!(charge_id = %charge_id, "payment for unknown charge ignored");
            return None;
        };
        if charge.status == ChargeStatus::Pending {
            charge.status = ChargeStatus::Paid;
            charge.paid_at = Some(now);
            info!(charge_id = %charge_id, apartment = %charge.apartment, "maintenance charge paid");
        }
        Some(charge.clone())
    }

    /// Unpaid charges for `apartment`, earliest due first.
    pub fn pending_for(&self, apartment: &str) -> Vec<&MaintenanceCharge> {
        let mut pending: Vec<_> = self
            .charges
            .iter()
            .filter(|charge| charge.apartment == apartment && charge.status == ChargeStatus::Pending)
            .collect();
        pending.sort_by_key(|charge| charge.due_on);
        pending
    }

    /// Paid charges for `apartment`, most recently paid first.
    pub fn history_for(&self, apartment: &str) -> Vec<&MaintenanceCharge> {
        let mut paid: Vec<_> = self
            .charges
            .iter()
            .filter(|charge| charge.apartment == apartment && charge.status == ChargeStatus::Paid)
            .collect();
        paid.sort_by(|a, b| b.paid_at.cmp(&a.paid_at));
        paid
    }

    /// Total still owed by `apartment`, in minor units.
    pub fn outstanding_for(&self, apartment: &str) -> u64 {
        self.pending_for(apartment)
            .iter()
            .map(|charge| charge.amount_minor)
            .sum()
    }
}
