//! Append-only stock and price history records.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use bakehouse_core::{HistoryEntryId, StockMovementType, SupplierId, UserId};

/// A requested change to an item's stock level.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockMovement {
    /// Kind of movement.
    pub movement_type: StockMovementType,
    /// Signed change in stock, in the item's unit.
    pub quantity: Decimal,
    /// Why the stock moved.
    pub reason: String,
    #[serde(default)]
    pub notes: Option<String>,
    /// Cost per unit paid, for purchases.
    #[serde(default)]
    pub unit_cost: Option<Decimal>,
    #[serde(default)]
    pub supplier_id: Option<SupplierId>,
}

/// Ledger entry written for every applied stock movement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockHistoryEntry {
    pub id: HistoryEntryId,
    /// ID of the ingredient or packaging that moved.
    pub item_id: String,
    pub movement_type: StockMovementType,
    /// Absolute quantity moved.
    pub quantity: Decimal,
    pub previous_stock: Decimal,
    pub new_stock: Decimal,
    pub reason: String,
    pub notes: Option<String>,
    pub unit_cost: Option<Decimal>,
    /// `quantity * unit_cost`, when a unit cost was recorded.
    pub total_cost: Option<Decimal>,
    pub supplier_id: Option<SupplierId>,
    pub created_at: DateTime<Utc>,
    pub created_by: UserId,
}

/// Ledger entry written for every recorded price change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceHistoryEntry {
    pub id: HistoryEntryId,
    /// ID of the ingredient or packaging whose price changed.
    pub item_id: String,
    pub price: Decimal,
    pub previous_price: Option<Decimal>,
    /// Percentage change against `previous_price`.
    pub change_percentage: Option<Decimal>,
    pub supplier_id: Option<SupplierId>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub created_by: UserId,
}
