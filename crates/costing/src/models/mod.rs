//! Domain models for the bakery back office.

pub mod history;
pub mod ingredient;
pub mod inventory;
pub mod packaging;
pub mod product;
pub mod recipe;
pub mod settings;

pub use history::{PriceHistoryEntry, StockHistoryEntry, StockMovement};
pub use ingredient::Ingredient;
pub use inventory::InventoryItem;
pub use packaging::Packaging;
pub use product::{Product, ProductPackageItem, ProductRecipeItem, format_sku};
pub use recipe::{Recipe, RecipeItem, RecipeStep};
pub use settings::RecipeSettings;
