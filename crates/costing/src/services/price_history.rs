//! Purchase price history and alerts.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use tracing::{info, instrument, warn};
use uuid::Uuid;

use bakehouse_core::{HistoryEntryId, PriceTrend, SupplierId, UserId};

use crate::error::CostingError;
use crate::models::{InventoryItem, PriceHistoryEntry};

/// Change percentage above which a price alert is raised by default.
pub const DEFAULT_PRICE_ALERT_THRESHOLD: Decimal = Decimal::from_parts(20, 0, 0, false, 0);

/// Changes within this percentage count as stable.
const SIGNIFICANT_CHANGE: Decimal = Decimal::ONE;

/// Difference between two prices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PriceChange {
    pub change: Decimal,
    /// Change relative to the previous price; zero when there was no price.
    pub percentage: Decimal,
    pub trend: PriceTrend,
}

/// Compare a price against the one it replaces.
#[must_use]
pub fn price_change(current: Decimal, previous: Decimal) -> PriceChange {
    let change = current - previous;
    let percentage = if previous.is_zero() {
        Decimal::ZERO
    } else {
        change / previous * Decimal::ONE_HUNDRED
    };
    let trend = if percentage > SIGNIFICANT_CHANGE {
        PriceTrend::Up
    } else if percentage < -SIGNIFICANT_CHANGE {
        PriceTrend::Down
    } else {
        PriceTrend::Stable
    };

    PriceChange {
        change,
        percentage,
        trend,
    }
}

/// Set a new purchase price on `item` and return the history entry for it.
///
/// # Errors
///
/// Returns `InvalidQuantity` if `new_price` is negative.
#[instrument(skip_all, fields(item_id = item.item_id(), %new_price))]
pub fn record_price_change<T>(
    item: &mut T,
    new_price: Decimal,
    supplier_id: Option<SupplierId>,
    notes: Option<String>,
    created_by: &UserId,
) -> Result<PriceHistoryEntry, CostingError>
where
    T: InventoryItem + ?Sized,
{
    if new_price < Decimal::ZERO {
        return Err(CostingError::InvalidQuantity(format!(
            "price cannot be negative (got {new_price})"
        )));
    }

    let previous_price = item.current_price();
    let change = price_change(new_price, previous_price);
    item.set_current_price(new_price);

    info!(%previous_price, percentage = %change.percentage, "Price updated");

    Ok(PriceHistoryEntry {
        id: HistoryEntryId::new(Uuid::new_v4().to_string()),
        item_id: item.item_id().to_string(),
        price: new_price,
        previous_price: Some(previous_price),
        change_percentage: (!previous_price.is_zero()).then_some(change.percentage),
        supplier_id: supplier_id.or_else(|| item.supplier_id().cloned()),
        notes,
        created_at: Utc::now(),
        created_by: created_by.clone(),
    })
}

/// Mean of the prices recorded at or after `since`.
#[must_use]
pub fn average_price(history: &[PriceHistoryEntry], since: DateTime<Utc>) -> Option<Decimal> {
    let prices: Vec<Decimal> = history
        .iter()
        .filter(|entry| entry.created_at >= since)
        .map(|entry| entry.price)
        .collect();

    if prices.is_empty() {
        return None;
    }
    let total: Decimal = prices.iter().sum();
    Some(total / Decimal::from(prices.len()))
}

/// A price change large enough to flag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PriceAlert {
    pub item_id: String,
    pub previous_price: Decimal,
    pub price: Decimal,
    pub change_percentage: Decimal,
    pub trend: PriceTrend,
}

/// Flag the most recent change in `history` if it moved by more than
/// `threshold` percent in either direction.
#[must_use]
pub fn price_alert(history: &[PriceHistoryEntry], threshold: Decimal) -> Option<PriceAlert> {
    let latest = history.iter().max_by_key(|entry| entry.created_at)?;
    let previous_price = latest.previous_price?;
    let change = price_change(latest.price, previous_price);

    if change.percentage.abs() <= threshold {
        return None;
    }

    warn!(
        item_id = %latest.item_id,
        %previous_price,
        price = %latest.price,
        percentage = %change.percentage,
        "Price alert"
    );
    Some(PriceAlert {
        item_id: latest.item_id.clone(),
        previous_price,
        price: latest.price,
        change_percentage: change.percentage,
        trend: change.trend,
    })
}
