//! Catalog statistics - pure aggregation over the full record set

use serde::Serialize;
use utoipa::ToSchema;

use crate::models::{Product, ProductType};

/// Grouped count and inventory value for one category
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CategoryBreakdown {
    pub category: String,
    pub count: u64,
    pub total_value: f64,
}

/// Grouped count and inventory value for one visibility type
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TypeBreakdown {
    #[serde(rename = "type")]
    pub product_type: ProductType,
    pub count: u64,
    pub total_value: f64,
}

/// Aggregate statistics over the whole catalog
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProductStats {
    pub total_products: u64,
    pub total_inventory_value: f64,
    pub total_discounted_value: f64,
    pub average_price: f64,
    pub out_of_stock_count: u64,
    pub products_by_category: Vec<CategoryBreakdown>,
    pub products_by_type: Vec<TypeBreakdown>,
}

impl ProductStats {
    fn empty() -> Self {
        Self {
            total_products: 0,
            total_inventory_value: 0.0,
            total_discounted_value: 0.0,
            average_price: 0.0,
            out_of_stock_count: 0,
            products_by_category: Vec::new(),
            products_by_type: Vec::new(),
        }
    }
}

/// Round a currency aggregate to 2 decimal places.
fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Compute catalog statistics over the full record set.
///
/// Breakdown groups appear in first-seen order. Currency aggregates are
/// rounded to 2 decimal places; an empty catalog yields the all-zero result.
pub fn compute_stats(products: &[Product]) -> ProductStats {
    if products.is_empty() {
        return ProductStats::empty();
    }

    let mut total_inventory_value = 0.0;
    let mut total_discounted_value = 0.0;
    let mut out_of_stock_count = 0;

    for product in products {
        let value = product.price * product.quantity as f64;
        total_inventory_value += value;

        if let Some(discount) = product.discount_price {
            total_discounted_value += discount * product.quantity as f64;
        }

        if product.quantity == 0 {
            out_of_stock_count += 1;
        }
    }

    let total_products = products.len() as u64;
    let average_price = total_inventory_value / total_products as f64;

    let mut by_category: Vec<CategoryBreakdown> = Vec::new();
    for product in products {
        let value = product.price * product.quantity as f64;
        match by_category
            .iter_mut()
            .find(|entry| entry.category == product.category)
        {
            Some(entry) => {
                entry.count += 1;
                entry.total_value += value;
            }
            None => by_category.push(CategoryBreakdown {
                category: product.category.clone(),
                count: 1,
                total_value: value,
            }),
        }
    }

    let mut by_type: Vec<TypeBreakdown> = Vec::new();
    for product in products {
        let value = product.price * product.quantity as f64;
        match by_type
            .iter_mut()
            .find(|entry| entry.product_type == product.product_type)
        {
            Some(entry) => {
                entry.count += 1;
                entry.total_value += value;
            }
            None => by_type.push(TypeBreakdown {
                product_type: product.product_type,
                count: 1,
                total_value: value,
            }),
        }
    }

    for entry in &mut by_category {
        entry.total_value = round2(entry.total_value);
    }
    for entry in &mut by_type {
        entry.total_value = round2(entry.total_value);
    }

    ProductStats {
        total_products,
        total_inventory_value: round2(total_inventory_value),
        total_discounted_value: round2(total_discounted_value),
        average_price: round2(average_price),
        out_of_stock_count,
        products_by_category: by_category,
        products_by_type: by_type,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::CreateProduct;

    fn product(
        sku: &str,
        category: &str,
        product_type: ProductType,
        price: f64,
        discount: Option<f64>,
        quantity: i64,
    ) -> Product {
        Product::new(CreateProduct {
            sku: sku.to_string(),
            name: format!("Product {}", sku),
            description: None,
            category: category.to_string(),
            product_type,
            price,
            discount_price: discount,
            quantity,
        })
    }

    #[test]
    fn test_empty_catalog_yields_zero_result() {
        let stats = compute_stats(&[]);

        assert_eq!(stats.total_products, 0);
        assert_eq!(stats.total_inventory_value, 0.0);
        assert_eq!(stats.total_discounted_value, 0.0);
        assert_eq!(stats.average_price, 0.0);
        assert_eq!(stats.out_of_stock_count, 0);
        assert!(stats.products_by_category.is_empty());
        assert!(stats.products_by_type.is_empty());
    }

    #[test]
    fn test_totals_and_average() {
        let products = vec![
            product("A-1", "Tools", ProductType::Public, 10.0, None, 5),
            product("A-2", "Tools", ProductType::Public, 20.0, Some(15.0), 2),
            product("A-3", "Toys", ProductType::Private, 4.5, None, 0),
        ];

        let stats = compute_stats(&products);

        assert_eq!(stats.total_products, 3);
        // 10*5 + 20*2 + 4.5*0
        assert_eq!(stats.total_inventory_value, 90.0);
        // only A-2 has a discount: 15*2
        assert_eq!(stats.total_discounted_value, 30.0);
        assert_eq!(stats.average_price, 30.0);
        assert_eq!(stats.out_of_stock_count, 1);
    }

    #[test]
    fn test_breakdowns_keep_first_seen_order() {
        let products = vec![
            product("B-1", "Tools", ProductType::Private, 1.0, None, 1),
            product("B-2", "Toys", ProductType::Public, 2.0, None, 1),
            product("B-3", "Tools", ProductType::Public, 3.0, None, 1),
        ];

        let stats = compute_stats(&products);

        let categories: Vec<&str> = stats
            .products_by_category
            .iter()
            .map(|entry| entry.category.as_str())
            .collect();
        assert_eq!(categories, vec!["Tools", "Toys"]);
        assert_eq!(stats.products_by_category[0].count, 2);
        assert_eq!(stats.products_by_category[0].total_value, 4.0);
        assert_eq!(stats.products_by_category[1].count, 1);

        let types: Vec<ProductType> = stats
            .products_by_type
            .iter()
            .map(|entry| entry.product_type)
            .collect();
        assert_eq!(types, vec![ProductType::Private, ProductType::Public]);
        assert_eq!(stats.products_by_type[1].count, 2);
    }

    #[test]
    fn test_currency_aggregates_rounded_to_cents() {
        // 0.1 * 3 accumulates floating point noise
        let products = vec![
            product("C-1", "Misc", ProductType::Public, 0.1, None, 1),
            product("C-2", "Misc", ProductType::Public, 0.1, None, 1),
            product("C-3", "Misc", ProductType::Public, 0.1, None, 1),
        ];

        let stats = compute_stats(&products);

        assert_eq!(stats.total_inventory_value, 0.3);
        assert_eq!(stats.average_price, 0.1);
        assert_eq!(stats.products_by_category[0].total_value, 0.3);
    }

    #[test]
    fn test_out_of_stock_products_still_counted_in_groups() {
        let products = vec![product("D-1", "Tools", ProductType::Public, 9.99, None, 0)];

        let stats = compute_stats(&products);

        assert_eq!(stats.out_of_stock_count, 1);
        assert_eq!(stats.total_inventory_value, 0.0);
        assert_eq!(stats.products_by_category[0].count, 1);
        assert_eq!(stats.products_by_category[0].total_value, 0.0);
    }
}
