//! In-memory catalog of bakery records.
//!
//! A catalog is an immutable snapshot: it is loaded once (asynchronously,
//! from a YAML or JSON file) and then borrowed by every computation through
//! the resolver traits. Nothing is fetched while arithmetic runs.

use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{info, instrument};

use bakehouse_core::{IngredientId, PackagingId, ProductId, RecipeId};

use crate::error::CostingError;
use crate::models::{Ingredient, Packaging, Product, Recipe, RecipeSettings};
use crate::resolver::{IngredientResolver, PackagingResolver, RecipeResolver};
use crate::services::product_pricing::{ProductPricing, compute_product_pricing};
use crate::services::recipe_cost::{RecipeCost, compute_recipe_cost};

/// Errors raised while loading a catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to read catalog {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid YAML catalog: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("invalid JSON catalog: {0}")]
    Json(#[from] serde_json::Error),

    #[error("unsupported catalog format: {0} (expected .yaml, .yml or .json)")]
    UnsupportedFormat(PathBuf),

    #[error("duplicate {kind} id: {id}")]
    DuplicateId { kind: &'static str, id: String },
}

/// On-disk shape of a catalog file.
#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(default)]
struct CatalogFile {
    settings: RecipeSettings,
    ingredients: Vec<Ingredient>,
    packaging: Vec<Packaging>,
    recipes: Vec<Recipe>,
    products: Vec<Product>,
}

/// Immutable snapshot of every record the engine needs.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    settings: RecipeSettings,
    ingredients: BTreeMap<IngredientId, Ingredient>,
    packaging: BTreeMap<PackagingId, Packaging>,
    recipes: BTreeMap<RecipeId, Recipe>,
    products: BTreeMap<ProductId, Product>,
}

impl Catalog {
    /// Load a catalog file, choosing the format by extension.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError` if the file cannot be read or parsed, its
    /// extension is not recognized, or two records share an ID.
    #[instrument(skip_all, fields(path = %path.as_ref().display()))]
    pub async fn load(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let path = path.as_ref();
        let format = Format::from_path(path)?;
        let contents = tokio::fs::read_to_string(path)
            .await
            .map_err(|source| CatalogError::Io {
                path: path.to_path_buf(),
                source,
            })?;

        let catalog = match format {
            Format::Yaml => Self::from_yaml_str(&contents)?,
            Format::Json => Self::from_json_str(&contents)?,
        };

        info!(
            ingredients = catalog.ingredients.len(),
            packaging = catalog.packaging.len(),
            recipes = catalog.recipes.len(),
            products = catalog.products.len(),
            "Catalog loaded"
        );
        Ok(catalog)
    }

    /// Parse a YAML catalog.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::Yaml` or `CatalogError::DuplicateId`.
    pub fn from_yaml_str(contents: &str) -> Result<Self, CatalogError> {
        Self::from_file(serde_yaml::from_str(contents)?)
    }

    /// Parse a JSON catalog.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::Json` or `CatalogError::DuplicateId`.
    pub fn from_json_str(contents: &str) -> Result<Self, CatalogError> {
        Self::from_file(serde_json::from_str(contents)?)
    }

    /// Build a catalog from record lists.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::DuplicateId` if two records of the same kind
    /// share an ID.
    pub fn from_parts(
        settings: RecipeSettings,
        ingredients: Vec<Ingredient>,
        packaging: Vec<Packaging>,
        recipes: Vec<Recipe>,
        products: Vec<Product>,
    ) -> Result<Self, CatalogError> {
        Self::from_file(CatalogFile {
            settings,
            ingredients,
            packaging,
            recipes,
            products,
        })
    }

    fn from_file(file: CatalogFile) -> Result<Self, CatalogError> {
        Ok(Self {
            settings: file.settings,
            ingredients: index("ingredient", file.ingredients, |i| i.id.clone())?,
            packaging: index("packaging", file.packaging, |p| p.id.clone())?,
            recipes: index("recipe", file.recipes, |r| r.id.clone())?,
            products: index("product", file.products, |p| p.id.clone())?,
        })
    }

    #[must_use]
    pub const fn settings(&self) -> &RecipeSettings {
        &self.settings
    }

    /// Replace the settings, e.g. with environment overrides applied.
    #[must_use]
    pub fn with_settings(mut self, settings: RecipeSettings) -> Self {
        self.settings = settings;
        self
    }

    pub fn ingredients(&self) -> impl Iterator<Item = &Ingredient> {
        self.ingredients.values()
    }

    pub fn packaging_items(&self) -> impl Iterator<Item = &Packaging> {
        self.packaging.values()
    }

    pub fn recipes(&self) -> impl Iterator<Item = &Recipe> {
        self.recipes.values()
    }

    pub fn products(&self) -> impl Iterator<Item = &Product> {
        self.products.values()
    }

    #[must_use]
    pub fn product(&self, id: &ProductId) -> Option<&Product> {
        self.products.get(id)
    }

    /// Cost one batch of a recipe in this catalog.
    ///
    /// # Errors
    ///
    /// Returns `UnknownRecipe` if `id` is not in the catalog, or any error
    /// from [`compute_recipe_cost`].
    pub fn recipe_cost(&self, id: &RecipeId) -> Result<RecipeCost, CostingError> {
        let recipe = self
            .recipe(id)
            .ok_or_else(|| CostingError::UnknownRecipe(id.clone()))?;
        compute_recipe_cost(recipe, self, self)
    }

    /// Cost per yield unit of every recipe `product` uses.
    ///
    /// # Errors
    ///
    /// Returns `UnknownRecipe` for a reference missing from the catalog, or
    /// any error from [`compute_recipe_cost`].
    pub fn recipe_costs_for(&self, product: &Product) -> Result<HashMap<RecipeId, Decimal>, CostingError> {
        product
            .product_recipes
            .iter()
            .map(|item| {
                let cost = self.recipe_cost(&item.recipe_id)?;
                Ok((item.recipe_id.clone(), cost.cost_per_yield_unit))
            })
            .collect()
    }

    /// Unit price of every packaging item `product` uses.
    ///
    /// # Errors
    ///
    /// Returns `UnknownPackaging` for a reference missing from the catalog,
    /// or `InvalidQuantity` for a non-positive measurement value.
    pub fn packaging_costs_for(
        &self,
        product: &Product,
    ) -> Result<HashMap<PackagingId, Decimal>, CostingError> {
        product
            .product_packages
            .iter()
            .map(|item| {
                let packaging = self
                    .packaging(&item.packaging_id)
                    .ok_or_else(|| CostingError::UnknownPackaging(item.packaging_id.clone()))?;
                Ok((item.packaging_id.clone(), packaging.unit_price()?))
            })
            .collect()
    }

    /// Resolve costs for `product` and price it.
    ///
    /// # Errors
    ///
    /// Any error from [`Catalog::recipe_costs_for`],
    /// [`Catalog::packaging_costs_for`] or [`compute_product_pricing`].
    pub fn price_product(&self, product: &Product) -> Result<ProductPricing, CostingError> {
        let recipe_costs = self.recipe_costs_for(product)?;
        let packaging_costs = self.packaging_costs_for(product)?;
        compute_product_pricing(product, &recipe_costs, &packaging_costs)
    }
}

impl IngredientResolver for Catalog {
    fn ingredient(&self, id: &IngredientId) -> Option<&Ingredient> {
        self.ingredients.get(id)
    }
}

impl RecipeResolver for Catalog {
    fn recipe(&self, id: &RecipeId) -> Option<&Recipe> {
        self.recipes.get(id)
    }
}

impl PackagingResolver for Catalog {
    fn packaging(&self, id: &PackagingId) -> Option<&Packaging> {
        self.packaging.get(id)
    }
}

enum Format {
    Yaml,
    Json,
}

impl Format {
    fn from_path(path: &Path) -> Result<Self, CatalogError> {
        match path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase)
            .as_deref()
        {
            Some("yaml" | "yml") => Ok(Self::Yaml),
            Some("json") => Ok(Self::Json),
            _ => Err(CatalogError::UnsupportedFormat(path.to_path_buf())),
        }
    }
}

fn index<K, V>(
    kind: &'static str,
    records: Vec<V>,
    key: impl Fn(&V) -> K,
) -> Result<BTreeMap<K, V>, CatalogError>
where
    K: Ord + std::fmt::Display,
{
    let mut map = BTreeMap::new();
    for record in records {
        let id = key(&record);
        if map.contains_key(&id) {
            return Err(CatalogError::DuplicateId {
                kind,
                id: id.to_string(),
            });
        }
        map.insert(id, record);
    }
    Ok(map)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use bakehouse_core::Unit;

    use crate::services::recipe_cost::tests::dec;

    const CATALOG: &str = r#"
settings:
  labor_hour_rate: "30"
ingredients:
  - id: ing_flour
    name: Farinha
    unit: kg
    measurement_value: "1"
    current_price: "5.50"
packaging:
  - id: pkg_box
    name: Caixa
    unit: unit
    measurement_value: "10"
    current_price: "15.00"
recipes:
  - id: rec_base
    name: Massa Base
    recipe_items:
      - type: ingredient
        ingredient_id: ing_flour
        quantity: "500"
        unit: g
    generated_amount: "1"
    generated_unit: unit
    servings: 8
products:
  - id: prod_cake
    name: Bolo
    product_recipes:
      - recipe_id: rec_base
        portions: "2"
    product_packages:
      - packaging_id: pkg_box
        quantity: "1"
    price: "12.00"
    markup: "100"
"#;

    #[test]
    fn test_parse_yaml_and_price_product() {
        let catalog = Catalog::from_yaml_str(CATALOG).unwrap();
        assert_eq!(catalog.settings().labor_hour_rate, dec("30"));
        assert_eq!(
            catalog.recipe_cost(&RecipeId::new("rec_base")).unwrap().total_cost,
            dec("2.75")
        );

        let product = catalog.product(&ProductId::new("prod_cake")).unwrap();
        let pricing = catalog.price_product(product).unwrap();
        assert_eq!(pricing.cost_price, dec("7.00"));
        assert_eq!(pricing.suggested_price, dec("14.00"));
    }

    #[test]
    fn test_unknown_references_in_product() {
        let catalog = Catalog::from_yaml_str(CATALOG).unwrap();
        let mut product = catalog.product(&ProductId::new("prod_cake")).unwrap().clone();
        product.product_packages[0].packaging_id = PackagingId::new("pkg_ghost");
        assert_eq!(
            catalog.packaging_costs_for(&product).unwrap_err(),
            CostingError::UnknownPackaging(PackagingId::new("pkg_ghost"))
        );

        product.product_recipes[0].recipe_id = RecipeId::new("rec_ghost");
        assert_eq!(
            catalog.recipe_costs_for(&product).unwrap_err(),
            CostingError::UnknownRecipe(RecipeId::new("rec_ghost"))
        );
    }

    #[test]
    fn test_duplicate_ids_are_rejected() {
        let yaml = r#"
ingredients:
  - { id: a, name: Sal, unit: g, measurement_value: "1", current_price: "1" }
  - { id: a, name: Sal, unit: g, measurement_value: "1", current_price: "1" }
"#;
        let err = Catalog::from_yaml_str(yaml).unwrap_err();
        assert!(matches!(err, CatalogError::DuplicateId { kind: "ingredient", .. }));
    }

    #[test]
    fn test_json_catalog() {
        let json = r#"{"ingredients": [{"id": "egg", "name": "Ovo", "unit": "dozen",
            "measurement_value": "1", "current_price": "12.00"}]}"#;
        let catalog = Catalog::from_json_str(json).unwrap();
        let egg = catalog.ingredient(&IngredientId::new("egg")).unwrap();
        assert_eq!(egg.unit, Unit::Dozen);
        assert_eq!(catalog.recipes().count(), 0);
    }

    #[tokio::test]
    async fn test_load_from_disk() {
        let dir = std::env::temp_dir().join(format!("bakehouse-catalog-{}", uuid::Uuid::new_v4()));
        tokio::fs::create_dir_all(&dir).await.unwrap();
        let path = dir.join("catalog.yaml");
        tokio::fs::write(&path, CATALOG).await.unwrap();

        let catalog = Catalog::load(&path).await.unwrap();
        assert_eq!(catalog.products().count(), 1);

        tokio::fs::remove_dir_all(&dir).await.unwrap();
    }

    #[tokio::test]
    async fn test_load_rejects_unknown_extension() {
        let err = Catalog::load("catalog.toml").await.unwrap_err();
        assert!(matches!(err, CatalogError::UnsupportedFormat(_)));
    }

    #[tokio::test]
    async fn test_load_missing_file() {
        let err = Catalog::load("/nonexistent/bakehouse/catalog.json").await.unwrap_err();
        assert!(matches!(err, CatalogError::Io { .. }));
    }
}
