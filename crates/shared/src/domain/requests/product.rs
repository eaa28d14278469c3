use crate::model::Product;
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use sqlx::{Postgres, QueryBuilder};
use std::{cmp::Ordering, str::FromStr};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

pub const DEFAULT_PAGE_SIZE: i64 = 12;
pub const MAX_PAGE_SIZE: i64 = 100;

/// Raw catalog query string. Every value stays a string so that malformed input
/// degrades to "absent" instead of rejecting the request.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct FindAllProductsQuery {
    pub page: Option<String>,
    pub limit: Option<String>,
    pub category: Option<String>,
    pub material: Option<String>,
    pub collection: Option<String>,
    pub min_price: Option<String>,
    pub max_price: Option<String>,
    pub featured: Option<String>,
    pub is_new: Option<String>,
    pub on_sale: Option<String>,
    /// One of `price_asc`, `price_desc`, `name_asc`, `name_desc`, `popular`, `newest`.
    pub sort: Option<String>,
    pub search: Option<String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortOrder {
    PriceAsc,
    PriceDesc,
    NameAsc,
    NameDesc,
    Popular,
    #[default]
    Newest,
}

impl SortOrder {
    /// Unknown values sort by newest.
    pub fn parse(value: Option<&str>) -> Self {
        match value.map(str::trim) {
            Some("price_asc") => SortOrder::PriceAsc,
            Some("price_desc") => SortOrder::PriceDesc,
            Some("name_asc") => SortOrder::NameAsc,
            Some("name_desc") => SortOrder::NameDesc,
            Some("popular") => SortOrder::Popular,
            _ => SortOrder::Newest,
        }
    }

    pub fn order_by(&self) -> &'static str {
        match self {
            SortOrder::PriceAsc => "price ASC, id ASC",
            SortOrder::PriceDesc => "price DESC, id ASC",
            SortOrder::NameAsc => "name ASC, id ASC",
            SortOrder::NameDesc => "name DESC, id ASC",
            SortOrder::Popular => "rating DESC, id ASC",
            SortOrder::Newest => "created_at DESC, id ASC",
        }
    }

    /// In-memory equivalent of [`SortOrder::order_by`].
    pub fn compare(&self, a: &Product, b: &Product) -> Ordering {
        let primary = match self {
            SortOrder::PriceAsc => a.price.cmp(&b.price),
            SortOrder::PriceDesc => b.price.cmp(&a.price),
            SortOrder::NameAsc => a.name.cmp(&b.name),
            SortOrder::NameDesc => b.name.cmp(&a.name),
            SortOrder::Popular => b.rating.total_cmp(&a.rating),
            SortOrder::Newest => b.created_at.cmp(&a.created_at),
        };
        primary.then_with(|| a.id.cmp(&b.id))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProductFilter {
    pub category: Option<String>,
    pub material: Option<String>,
    pub collection: Option<String>,
    pub min_price: Option<Decimal>,
    pub max_price: Option<Decimal>,
    pub featured: bool,
    pub is_new: bool,
    pub on_sale: bool,
    pub search: Option<String>,
    pub sort: SortOrder,
    pub page: i64,
    pub limit: i64,
}

impl Default for ProductFilter {
    fn default() -> Self {
        Self {
            category: None,
            material: None,
            collection: None,
            min_price: None,
            max_price: None,
            featured: false,
            is_new: false,
            on_sale: false,
            search: None,
            sort: SortOrder::Newest,
            page: 1,
            limit: DEFAULT_PAGE_SIZE,
        }
    }
}

impl ProductFilter {
    pub fn from_query(query: &FindAllProductsQuery) -> Self {
        let page = parse_positive(query.page.as_deref()).unwrap_or(1);
        let limit = parse_positive(query.limit.as_deref())
            .unwrap_or(DEFAULT_PAGE_SIZE)
            .min(MAX_PAGE_SIZE);

        Self {
            category: non_empty(query.category.as_deref()),
            material: non_empty(query.material.as_deref()),
            collection: non_empty(query.collection.as_deref()),
            min_price: parse_price(query.min_price.as_deref()),
            max_price: parse_price(query.max_price.as_deref()),
            featured: is_true(query.featured.as_deref()),
            is_new: is_true(query.is_new.as_deref()),
            on_sale: is_true(query.on_sale.as_deref()),
            search: non_empty(query.search.as_deref()),
            sort: SortOrder::parse(query.sort.as_deref()),
            page,
            limit,
        }
    }

    /// Saturates, so an absurd `page` just lands past the last row.
    pub fn offset(&self) -> i64 {
        (self.page - 1).max(0).saturating_mul(self.limit)
    }

    /// `ceil(total / limit)`, zero when nothing matched.
    pub fn total_pages(&self, total: i64) -> i64 {
        if total <= 0 {
            0
        } else {
            (total + self.limit - 1) / self.limit
        }
    }

    /// `%term%` with LIKE metacharacters in the term escaped.
    pub fn search_pattern(&self) -> Option<String> {
        self.search.as_deref().map(|term| {
            let mut escaped = String::with_capacity(term.len() + 2);
            escaped.push('%');
            for ch in term.chars() {
                if matches!(ch, '\\' | '%' | '_') {
                    escaped.push('\\');
                }
                escaped.push(ch);
            }
            escaped.push('%');
            escaped
        })
    }

    /// Appends the WHERE clause for this filter. Shared by the page query and the count query.
    pub fn push_where(&self, qb: &mut QueryBuilder<'_, Postgres>) {
        qb.push(" WHERE 1=1");

        if let Some(category) = &self.category {
            qb.push(" AND category = ").push_bind(category.clone());
        }
        if let Some(material) = &self.material {
            qb.push(" AND material = ").push_bind(material.clone());
        }
        if let Some(collection) = &self.collection {
            qb.push(" AND collection = ").push_bind(collection.clone());
        }
        if let Some(min) = self.min_price {
            qb.push(" AND price >= ").push_bind(min);
        }
        if let Some(max) = self.max_price {
            qb.push(" AND price <= ").push_bind(max);
        }
        if self.featured {
            qb.push(" AND featured = TRUE");
        }
        if self.is_new {
            qb.push(" AND is_new = TRUE");
        }
        if self.on_sale {
            qb.push(" AND on_sale = TRUE");
        }
        if let Some(pattern) = self.search_pattern() {
            qb.push(" AND (name ILIKE ")
                .push_bind(pattern.clone())
                .push(" OR description ILIKE ")
                .push_bind(pattern)
                .push(")");
        }
    }

    pub fn push_order_and_page(&self, qb: &mut QueryBuilder<'_, Postgres>) {
        qb.push(" ORDER BY ")
            .push(self.sort.order_by())
            .push(" LIMIT ")
            .push_bind(self.limit)
            .push(" OFFSET ")
            .push_bind(self.offset());
    }

    /// In-memory equivalent of [`ProductFilter::push_where`].
    pub fn matches(&self, product: &Product) -> bool {
        if let Some(category) = &self.category {
            if &product.category != category {
                return false;
            }
        }
        if let Some(material) = &self.material {
            if product.material.as_ref() != Some(material) {
                return false;
            }
        }
        if let Some(collection) = &self.collection {
            if product.collection.as_ref() != Some(collection) {
                return false;
            }
        }
        if self.min_price.is_some_and(|min| product.price < min) {
            return false;
        }
        if self.max_price.is_some_and(|max| product.price > max) {
            return false;
        }
        if (self.featured && !product.featured)
            || (self.is_new && !product.is_new)
            || (self.on_sale && !product.on_sale)
        {
            return false;
        }
        if let Some(term) = &self.search {
            let term = term.to_lowercase();
            if !product.name.to_lowercase().contains(&term)
                && !product.description.to_lowercase().contains(&term)
            {
                return false;
            }
        }
        true
    }
}

fn non_empty(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

fn is_true(value: Option<&str>) -> bool {
    value.map(str::trim) == Some("true")
}

fn parse_positive(value: Option<&str>) -> Option<i64> {
    value
        .and_then(|v| v.trim().parse::<i64>().ok())
        .filter(|v| *v >= 1)
}

fn parse_price(value: Option<&str>) -> Option<Decimal> {
    let raw = value?.trim();
    Decimal::from_str(raw)
        .or_else(|_| Decimal::from_scientific(raw))
        .ok()
        .filter(|price| !price.is_sign_negative())
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateProductRequest {
    pub name: String,
    pub description: String,
    pub price: Decimal,
    #[serde(default)]
    pub original_price: Option<Decimal>,
    pub category: String,
    #[serde(default)]
    pub material: Option<String>,
    #[serde(default)]
    pub collection: Option<String>,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default)]
    pub rating: f64,
    #[serde(default)]
    pub stock: i32,
    #[serde(default)]
    pub featured: bool,
    #[serde(default)]
    pub is_new: bool,
    #[serde(default)]
    pub on_sale: bool,
}

/// Admin update body. Numbers and flags are accepted either as JSON values or as
/// strings, the way HTML forms submit them.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProductRequest {
    #[validate(
        required(message = "name is required"),
        length(min = 1, message = "name is required")
    )]
    #[serde(default)]
    pub name: Option<String>,

    #[validate(
        required(message = "description is required"),
        length(min = 1, message = "description is required")
    )]
    #[serde(default)]
    pub description: Option<String>,

    #[validate(required(message = "price is required"))]
    #[serde(default, deserialize_with = "lenient::decimal")]
    pub price: Option<Decimal>,

    #[serde(default, deserialize_with = "lenient::decimal")]
    pub original_price: Option<Decimal>,

    #[validate(
        required(message = "category is required"),
        length(min = 1, message = "category is required")
    )]
    #[serde(default)]
    pub category: Option<String>,

    #[serde(default)]
    pub material: Option<String>,

    #[serde(default)]
    pub collection: Option<String>,

    #[serde(default, deserialize_with = "lenient::flag")]
    pub featured: bool,

    #[serde(default, deserialize_with = "lenient::flag")]
    pub is_new: bool,

    #[serde(default, deserialize_with = "lenient::flag")]
    pub on_sale: bool,

    #[serde(default, deserialize_with = "lenient::integer")]
    pub stock: Option<i32>,

    #[serde(default, deserialize_with = "lenient::images")]
    pub images: Option<Vec<String>>,
}

mod lenient {
    use super::*;

    pub fn decimal<'de, D: Deserializer<'de>>(d: D) -> Result<Option<Decimal>, D::Error> {
        Ok(match Option::<Value>::deserialize(d)? {
            Some(Value::Number(n)) => Decimal::from_str(&n.to_string())
                .or_else(|_| Decimal::from_scientific(&n.to_string()))
                .ok(),
            Some(Value::String(s)) => Decimal::from_str(s.trim()).ok(),
            _ => None,
        })
    }

    pub fn flag<'de, D: Deserializer<'de>>(d: D) -> Result<bool, D::Error> {
        Ok(match Option::<Value>::deserialize(d)? {
            Some(Value::Bool(b)) => b,
            Some(Value::String(s)) => s.trim() == "true",
            _ => false,
        })
    }

    pub fn integer<'de, D: Deserializer<'de>>(d: D) -> Result<Option<i32>, D::Error> {
        Ok(match Option::<Value>::deserialize(d)? {
            Some(Value::Number(n)) => n.as_i64().and_then(|v| i32::try_from(v).ok()),
            Some(Value::String(s)) => s.trim().parse().ok(),
            _ => None,
        })
    }

    pub fn images<'de, D: Deserializer<'de>>(d: D) -> Result<Option<Vec<String>>, D::Error> {
        Ok(match Option::<Value>::deserialize(d)? {
            Some(Value::String(s)) if !s.is_empty() => Some(vec![s]),
            Some(Value::Array(items)) => Some(
                items
                    .into_iter()
                    .filter_map(|v| v.as_str().map(str::to_string))
                    .collect(),
            ),
            _ => None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::testing::product;
    use serde_json::json;

    fn query(pairs: &[(&str, &str)]) -> FindAllProductsQuery {
        let value: serde_json::Map<String, Value> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), Value::String(v.to_string())))
            .collect();
        serde_json::from_value(Value::Object(value)).unwrap()
    }

    #[test]
    fn defaults_when_nothing_given() {
        let filter = ProductFilter::from_query(&FindAllProductsQuery::default());
        assert_eq!(filter, ProductFilter::default());
        assert_eq!(filter.offset(), 0);
    }

    #[test]
    fn malformed_values_are_ignored() {
        let filter = ProductFilter::from_query(&query(&[
            ("page", "abc"),
            ("limit", "-3"),
            ("minPrice", "cheap"),
            ("maxPrice", "-5"),
            ("featured", "1"),
            ("sort", "random"),
        ]));
        assert_eq!(filter.page, 1);
        assert_eq!(filter.limit, DEFAULT_PAGE_SIZE);
        assert_eq!(filter.min_price, None);
        assert_eq!(filter.max_price, None);
        assert!(!filter.featured);
        assert_eq!(filter.sort, SortOrder::Newest);
    }

    #[test]
    fn limit_is_capped() {
        let filter = ProductFilter::from_query(&query(&[("limit", "500"), ("page", "3")]));
        assert_eq!(filter.limit, MAX_PAGE_SIZE);
        assert_eq!(filter.offset(), 200);
    }

    #[test]
    fn huge_page_saturates_offset() {
        let filter = ProductFilter::from_query(&query(&[("page", "9223372036854775807")]));
        assert_eq!(filter.page, i64::MAX);
        assert_eq!(filter.offset(), i64::MAX);
    }

    #[test]
    fn total_pages_is_ceiling_and_zero_when_empty() {
        let filter = ProductFilter::default();
        assert_eq!(filter.total_pages(0), 0);
        assert_eq!(filter.total_pages(1), 1);
        assert_eq!(filter.total_pages(12), 1);
        assert_eq!(filter.total_pages(13), 2);
    }

    #[test]
    fn search_escapes_like_wildcards() {
        let filter = ProductFilter {
            search: Some(r"50%_off\".into()),
            ..Default::default()
        };
        assert_eq!(filter.search_pattern().as_deref(), Some(r"%50\%\_off\\%"));
    }

    #[test]
    fn where_clause_binds_each_active_predicate() {
        let filter = ProductFilter::from_query(&query(&[
            ("category", "Rings"),
            ("minPrice", "10"),
            ("maxPrice", "99.5"),
            ("onSale", "true"),
            ("search", "gold"),
        ]));
        let mut qb = QueryBuilder::<Postgres>::new("SELECT COUNT(*) FROM products");
        filter.push_where(&mut qb);

        assert_eq!(
            qb.sql(),
            "SELECT COUNT(*) FROM products WHERE 1=1 AND category = $1 AND price >= $2 \
             AND price <= $3 AND on_sale = TRUE AND (name ILIKE $4 OR description ILIKE $5)"
        );
    }

    #[test]
    fn order_and_page_follow_sort() {
        let filter = ProductFilter::from_query(&query(&[("sort", "price_desc")]));
        let mut qb = QueryBuilder::<Postgres>::new("SELECT * FROM products");
        filter.push_order_and_page(&mut qb);
        assert_eq!(
            qb.sql(),
            "SELECT * FROM products ORDER BY price DESC, id ASC LIMIT $1 OFFSET $2"
        );
    }

    #[test]
    fn matches_applies_every_predicate() {
        let mut ring = product("Gold Ring", Decimal::from(50));
        ring.on_sale = true;
        ring.material = Some("Gold".into());
        let necklace = {
            let mut p = product("Silver Chain", Decimal::from(150));
            p.category = "Necklaces".into();
            p
        };

        let filter = ProductFilter::from_query(&query(&[
            ("minPrice", "10"),
            ("maxPrice", "100"),
            ("onSale", "true"),
            ("search", "GOLD"),
        ]));
        assert!(filter.matches(&ring));
        assert!(!filter.matches(&necklace));

        let by_material = ProductFilter::from_query(&query(&[("material", "Silver")]));
        assert!(!by_material.matches(&ring));
    }

    #[test]
    fn price_bounds_are_inclusive() {
        let p = product("Band", Decimal::from(20));
        let filter = ProductFilter::from_query(&query(&[("minPrice", "20"), ("maxPrice", "20")]));
        assert!(filter.matches(&p));
    }

    #[test]
    fn compare_sorts_by_price_descending() {
        let mut items = vec![
            product("a", Decimal::from(10)),
            product("b", Decimal::from(50)),
            product("c", Decimal::from(30)),
        ];
        items.sort_by(|a, b| SortOrder::PriceDesc.compare(a, b));
        let prices: Vec<_> = items.iter().map(|p| p.price).collect();
        assert_eq!(prices, vec![Decimal::from(50), Decimal::from(30), Decimal::from(10)]);
    }

    #[test]
    fn update_body_accepts_form_style_values() {
        let req: UpdateProductRequest = serde_json::from_value(json!({
            "name": "Ring",
            "description": "Nice",
            "price": "19.99",
            "category": "Rings",
            "featured": "true",
            "onSale": true,
            "stock": "7",
            "images": "/images/ring.jpg"
        }))
        .unwrap();

        assert_eq!(req.price, Some(Decimal::new(1999, 2)));
        assert!(req.featured);
        assert!(req.on_sale);
        assert!(!req.is_new);
        assert_eq!(req.stock, Some(7));
        assert_eq!(req.images, Some(vec!["/images/ring.jpg".to_string()]));
        assert!(req.validate().is_ok());
    }

    #[test]
    fn update_body_requires_core_fields() {
        let req: UpdateProductRequest =
            serde_json::from_value(json!({ "name": "Ring", "price": 10 })).unwrap();
        let errors = req.validate().unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("description"));
        assert!(fields.contains_key("category"));
        assert!(!fields.contains_key("price"));
    }
}
