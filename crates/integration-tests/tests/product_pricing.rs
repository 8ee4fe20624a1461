//! Integration tests for product pricing over the fixture catalog.

#![allow(clippy::unwrap_used)]

use std::collections::HashMap;

use bakehouse_core::{MarginViability, PackagingId, ProductId, RecipeId};
use bakehouse_costing::models::{Product, ProductRecipeItem, format_sku};
use bakehouse_costing::validation::validate_product;
use bakehouse_costing::{CostingError, compute_product_pricing};
use bakehouse_integration_tests::{dec, load_bakery};

fn product_id(s: &str) -> ProductId {
    ProductId::new(s)
}

#[tokio::test]
async fn test_cake_pricing() {
    let catalog = load_bakery().await.unwrap();
    let cake = catalog.product(&product_id("prod_chocolate_cake")).unwrap();

    assert_eq!(cake.sku.as_deref(), Some(format_sku("bolo", "choc", 1).as_str()));

    let pricing = catalog.price_product(cake).unwrap();
    assert_eq!(pricing.cost_price, dec("30.65"));

    let rounded = pricing.rounded();
    assert_eq!(rounded.suggested_price, dec("76.63"));
    assert_eq!(rounded.profit_margin, dec("65.91"));
    assert_eq!(pricing.viability(), MarginViability::Good);
}

#[tokio::test]
async fn test_portions_multiply_cost_per_yield_unit() {
    let catalog = load_bakery().await.unwrap();
    let cupcakes = catalog.product(&product_id("prod_cupcake_box")).unwrap();

    let recipe_costs = catalog.recipe_costs_for(cupcakes).unwrap();
    assert_eq!(recipe_costs.get(&RecipeId::new("rec_cupcake")), Some(&dec("0.991")));

    let packaging_costs = catalog.packaging_costs_for(cupcakes).unwrap();
    assert_eq!(
        packaging_costs.get(&PackagingId::new("pkg_cupcake_box")),
        Some(&dec("2.00"))
    );

    let pricing = compute_product_pricing(cupcakes, &recipe_costs, &packaging_costs).unwrap();
    assert_eq!(pricing.cost_price, dec("7.946"));
    assert_eq!(pricing.rounded().cost_price, dec("7.95"));
    assert_eq!(pricing.rounded().suggested_price, dec("23.84"));
    assert_eq!(pricing.rounded().profit_margin, dec("73.51"));
}

#[tokio::test]
async fn test_every_fixture_product_is_valid() {
    let catalog = load_bakery().await.unwrap();
    for product in catalog.products() {
        assert!(validate_product(product).is_ok(), "{} should be valid", product.id);
    }
}

#[tokio::test]
async fn test_unknown_packaging_blocks_pricing() {
    let catalog = load_bakery().await.unwrap();
    let mut cake = catalog
        .product(&product_id("prod_chocolate_cake"))
        .unwrap()
        .clone();
    cake.product_packages[1].packaging_id = PackagingId::new("pkg_discontinued");

    assert_eq!(
        catalog.price_product(&cake).unwrap_err(),
        CostingError::UnknownPackaging(PackagingId::new("pkg_discontinued"))
    );
}

#[test]
fn test_caller_supplied_costs() {
    let product = Product {
        id: product_id("prod_torta"),
        name: "Torta de Limão".to_string(),
        sku: None,
        category: None,
        product_recipes: vec![ProductRecipeItem {
            recipe_id: RecipeId::new("rec_torta"),
            portions: dec("1"),
        }],
        product_packages: vec![],
        price: dec("0"),
        markup: dec("50"),
        is_active: true,
    };
    let recipe_costs = HashMap::from([(RecipeId::new("rec_torta"), dec("10.00"))]);

    let pricing = compute_product_pricing(&product, &recipe_costs, &HashMap::new()).unwrap();
    assert_eq!(pricing.suggested_price, dec("15.00"));
    assert_eq!(pricing.profit_margin, dec("0"));

    assert_eq!(
        compute_product_pricing(&product, &HashMap::new(), &HashMap::new()).unwrap_err(),
        CostingError::MissingRecipeCost(RecipeId::new("rec_torta"))
    );
}
