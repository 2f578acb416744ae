use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ProductId(pub String);

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub category: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    pub tags: Vec<String>,
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;

    use super::{Product, ProductId};

    #[test]
    fn product_serializes_price_as_json_number() {
        let product = Product {
            id: ProductId("p1".to_string()),
            name: "Lenovo IdeaPad 3".to_string(),
            category: "laptop".to_string(),
            price: Decimal::new(52_000, 0),
            tags: vec!["coding".to_string(), "budget".to_string()],
        };

        let json = serde_json::to_value(&product).expect("product should serialize");
        assert_eq!(json["id"], "p1");
        assert_eq!(json["price"], 52000.0);
        assert_eq!(json["tags"][1], "budget");
    }

    #[test]
    fn product_round_trips_through_json() {
        let raw = r#"{
            "id": "p9",
            "name": "Redmi Note 13",
            "category": "phone",
            "price": 17999.0,
            "tags": ["android", "budget", "student"]
        }"#;

        let product: Product = serde_json::from_str(raw).expect("product should deserialize");
        assert_eq!(product.id, ProductId("p9".to_string()));
        assert_eq!(product.price, Decimal::new(17_999, 0));
        assert_eq!(product.tags.len(), 3);
    }
}
