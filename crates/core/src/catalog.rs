use std::collections::HashMap;

use rust_decimal::Decimal;

use crate::domain::product::{Product, ProductId};
use crate::errors::CatalogError;

/// Immutable product catalog held in memory for the lifetime of the process.
///
/// Construction validates the dataset once; afterwards the catalog is
/// read-only and safe to share across request handlers without locking.
/// Insertion order is preserved and is the order list queries return.
#[derive(Debug)]
pub struct Catalog {
    products: Vec<Product>,
    index: HashMap<ProductId, usize>,
}

impl Catalog {
    pub fn new(products: Vec<Product>) -> Result<Self, CatalogError> {
        let mut index = HashMap::with_capacity(products.len());

        for (position, product) in products.iter().enumerate() {
            if product.id.0.trim().is_empty() {
                return Err(CatalogError::EmptyId { position });
            }
            if product.name.trim().is_empty() {
                return Err(CatalogError::EmptyName { id: product.id.0.clone() });
            }
            if product.price < Decimal::ZERO {
                return Err(CatalogError::NegativePrice {
                    id: product.id.0.clone(),
                    price: product.price,
                });
            }
            if index.insert(product.id.clone(), position).is_some() {
                return Err(CatalogError::DuplicateId { id: product.id.0.clone() });
            }
        }

        Ok(Self { products, index })
    }

    /// Builds the catalog from the shipped dataset.
    pub fn builtin() -> Result<Self, CatalogError> {
        Self::new(builtin_products())
    }

    /// Keyed lookup through the id index. Exact, case-sensitive match.
    pub fn get(&self, product_id: &ProductId) -> Option<&Product> {
        self.index.get(product_id).map(|&position| &self.products[position])
    }

    /// All products in insertion order.
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}

/// Canonical dataset served by the API. Ids are a stable contract for
/// consumers; new entries are appended, existing ones are never reordered.
pub fn builtin_products() -> Vec<Product> {
    fn product(
        id: &str,
        name: &str,
        category: &str,
        price: i64,
        tags: &[&str],
    ) -> Product {
        Product {
            id: ProductId(id.to_string()),
            name: name.to_string(),
            category: category.to_string(),
            price: Decimal::new(price, 0),
            tags: tags.iter().map(|tag| tag.to_string()).collect(),
        }
    }

    vec![
        product("p1", "Lenovo IdeaPad 3", "laptop", 52_000, &["coding", "budget", "student"]),
        product("p2", "MacBook Air M2", "laptop", 114_900, &["premium", "portable", "battery"]),
        product("p3", "HP Victus 15", "laptop", 65_000, &["gaming", "budget"]),
        product("p4", "Dell XPS 13", "laptop", 135_000, &["premium", "compact", "business"]),
        product("p5", "Asus TUF Gaming A15", "laptop", 78_000, &["gaming", "rugged"]),
        product("p6", "Razer Blade 15", "laptop", 180_000, &["gaming", "high-refresh", "powerful"]),
        product("p7", "Samsung Galaxy S23", "phone", 74_999, &["android", "flagship", "camera"]),
        product("p8", "iPhone 15", "phone", 79_900, &["ios", "camera"]),
        product("p9", "Redmi Note 13", "phone", 17_999, &["android", "budget", "student"]),
        product("p10", "Sony WH-1000XM5", "audio", 29_990, &["wireless", "noise-cancelling", "travel"]),
        product("p11", "boAt Airdopes 141", "audio", 1_499, &["wireless", "budget"]),
        product("p12", "Logitech MX Master 3S", "accessory", 8_995, &["productivity", "wireless", "ergonomic"]),
    ]
}
