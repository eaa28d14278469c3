use crate::model::Product;
use chrono::Utc;
use rust_decimal::Decimal;
use uuid::Uuid;

pub fn product(name: &str, price: Decimal) -> Product {
    let now = Utc::now();
    Product {
        id: Uuid::new_v4(),
        name: name.to_string(),
        description: format!("{name} description"),
        price,
        original_price: None,
        category: "Rings".to_string(),
        material: None,
        collection: None,
        images: Vec::new(),
        rating: 4.0,
        stock: 10,
        featured: false,
        is_new: false,
        on_sale: false,
        created_at: now,
        updated_at: now,
    }
}
