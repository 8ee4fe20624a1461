//! Stock movements.
//!
//! Stock changes only through movements. Each applied movement updates the
//! item and yields a ledger entry recording the level before and after.

use chrono::Utc;
use rust_decimal::Decimal;
use thiserror::Error;
use tracing::{info, instrument, warn};
use uuid::Uuid;

use bakehouse_core::{HistoryEntryId, StockMovementType, UserId};

use crate::models::{InventoryItem, StockHistoryEntry, StockMovement};

/// Rejected stock movements.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StockError {
    /// The movement would leave less than nothing on hand.
    #[error("stock for {item_id} cannot go below zero ({current} + ({delta}) = {result})")]
    NegativeStock {
        item_id: String,
        current: Decimal,
        delta: Decimal,
        result: Decimal,
    },

    /// A movement must move something.
    #[error("movement quantity cannot be zero")]
    ZeroQuantity,
}

/// Signed change a movement applies to the stock level.
///
/// Purchases always add and usage or waste always subtract, whatever sign
/// the caller used. Adjustments and corrections keep their sign.
#[must_use]
pub fn movement_delta(movement_type: StockMovementType, quantity: Decimal) -> Decimal {
    match movement_type {
        StockMovementType::Purchase => quantity.abs(),
        StockMovementType::Usage | StockMovementType::Waste => -quantity.abs(),
        StockMovementType::Adjustment | StockMovementType::Correction => quantity,
    }
}

/// Apply `movement` to `item` and return the ledger entry for it.
///
/// The item is left unchanged if the movement is rejected.
///
/// # Errors
///
/// - `StockError::ZeroQuantity` if the movement quantity is zero
/// - `StockError::NegativeStock` if the new level would be below zero
#[instrument(skip_all, fields(item_id = item.item_id(), movement = %movement.movement_type))]
pub fn apply_stock_movement<T>(
    item: &mut T,
    movement: &StockMovement,
    created_by: &UserId,
) -> Result<StockHistoryEntry, StockError>
where
    T: InventoryItem + ?Sized,
{
    if movement.quantity.is_zero() {
        return Err(StockError::ZeroQuantity);
    }

    let previous_stock = item.current_stock();
    let delta = movement_delta(movement.movement_type, movement.quantity);
    let new_stock = previous_stock + delta;

    if new_stock < Decimal::ZERO {
        warn!(%previous_stock, %delta, "Rejected stock movement below zero");
        return Err(StockError::NegativeStock {
            item_id: item.item_id().to_string(),
            current: previous_stock,
            delta,
            result: new_stock,
        });
    }

    item.set_current_stock(new_stock);

    let quantity = delta.abs();
    let entry = StockHistoryEntry {
        id: HistoryEntryId::new(Uuid::new_v4().to_string()),
        item_id: item.item_id().to_string(),
        movement_type: movement.movement_type,
        quantity,
        previous_stock,
        new_stock,
        reason: movement.reason.clone(),
        notes: movement.notes.clone(),
        unit_cost: movement.unit_cost,
        total_cost: movement.unit_cost.map(|cost| cost * quantity),
        supplier_id: movement
            .supplier_id
            .clone()
            .or_else(|| item.supplier_id().cloned()),
        created_at: Utc::now(),
        created_by: created_by.clone(),
    };

    info!(%previous_stock, %new_stock, status = ?item.status(), "Stock updated");
    Ok(entry)
}
