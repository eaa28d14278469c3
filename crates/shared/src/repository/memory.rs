//! In-memory implementation of the repository traits, for tests.

use crate::{
    abstract_trait::{
        ProductCommandRepositoryTrait, ProductQueryRepositoryTrait, UserCommandRepositoryTrait,
        UserQueryRepositoryTrait,
    },
    catalog::{SaleUpdate, canonical_images},
    domain::requests::{CreateProductRequest, CreateUserRecord, ProductFilter, UpdateProductRequest},
    errors::RepositoryError,
    model::{CatalogCounts, Facets, Product, ReviewWithUser, User, UserRole},
};
use async_trait::async_trait;
use chrono::{Duration, Utc};
use std::{
    collections::BTreeSet,
    sync::atomic::{AtomicBool, Ordering},
};
use tokio::sync::RwLock;
use uuid::Uuid;

#[derive(Default)]
pub struct MemoryStore {
    products: RwLock<Vec<Product>>,
    reviews: RwLock<Vec<ReviewWithUser>>,
    users: RwLock<Vec<User>>,
    failing: AtomicBool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_products(products: Vec<Product>) -> Self {
        Self {
            products: RwLock::new(products),
            ..Self::default()
        }
    }

    /// Makes every subsequent call fail with a storage error.
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    pub async fn products(&self) -> Vec<Product> {
        self.products.read().await.clone()
    }

    pub async fn add_review(&self, review: ReviewWithUser) {
        self.reviews.write().await.push(review);
    }

    pub async fn add_user(&self, user: User) {
        self.users.write().await.push(user);
    }

    fn check(&self) -> Result<(), RepositoryError> {
        if self.failing.load(Ordering::SeqCst) {
            Err(RepositoryError::Custom("storage unavailable".to_string()))
        } else {
            Ok(())
        }
    }

    fn build(req: &CreateProductRequest, offset: i64) -> Product {
        // Later inserts get later timestamps so "newest" ordering is deterministic.
        let now = Utc::now() + Duration::milliseconds(offset);
        let images = serde_json::to_value(&req.images).unwrap_or_default();
        Product {
            id: Uuid::new_v4(),
            name: req.name.clone(),
            description: req.description.clone(),
            price: req.price,
            original_price: req.original_price,
            category: req.category.clone(),
            material: req.material.clone(),
            collection: req.collection.clone(),
            images: canonical_images(&images),
            rating: req.rating,
            stock: req.stock,
            featured: req.featured,
            is_new: req.is_new,
            on_sale: req.on_sale,
            created_at: now,
            updated_at: now,
        }
    }
}

fn distinct<'a>(values: impl Iterator<Item = Option<&'a String>>) -> Vec<String> {
    values
        .flatten()
        .cloned()
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

#[async_trait]
impl ProductQueryRepositoryTrait for MemoryStore {
    async fn find_all(
        &self,
        filter: &ProductFilter,
    ) -> Result<(Vec<Product>, i64), RepositoryError> {
        self.check()?;
        let mut matched: Vec<Product> = self
            .products
            .read()
            .await
            .iter()
            .filter(|p| filter.matches(p))
            .cloned()
            .collect();
        matched.sort_by(|a, b| filter.sort.compare(a, b));

        let total = matched.len() as i64;
        let page = matched
            .into_iter()
            .skip(usize::try_from(filter.offset()).unwrap_or(usize::MAX))
            .take(filter.limit as usize)
            .collect();
        Ok((page, total))
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Product>, RepositoryError> {
        self.check()?;
        Ok(self.products.read().await.iter().find(|p| p.id == id).cloned())
    }

    async fn find_reviews(&self, product_id: Uuid) -> Result<Vec<ReviewWithUser>, RepositoryError> {
        self.check()?;
        let mut reviews: Vec<ReviewWithUser> = self
            .reviews
            .read()
            .await
            .iter()
            .filter(|r| r.product_id == product_id)
            .cloned()
            .collect();
        reviews.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(reviews)
    }

    async fn find_curated(&self) -> Result<Vec<Product>, RepositoryError> {
        self.check()?;
        Ok(self
            .products
            .read()
            .await
            .iter()
            .filter(|p| p.featured || p.is_new || p.on_sale)
            .cloned()
            .collect())
    }

    async fn find_every(&self) -> Result<Vec<Product>, RepositoryError> {
        self.check()?;
        Ok(self.products().await)
    }

    async fn counts(&self) -> Result<CatalogCounts, RepositoryError> {
        self.check()?;
        let products = self.products.read().await;
        let count = |pred: fn(&Product) -> bool| products.iter().filter(|p| pred(p)).count() as i64;
        Ok(CatalogCounts {
            total: products.len() as i64,
            featured: count(|p| p.featured),
            is_new: count(|p| p.is_new),
            on_sale: count(|p| p.on_sale),
        })
    }

    async fn facets(&self) -> Result<Facets, RepositoryError> {
        self.check()?;
        let products = self.products.read().await;
        Ok(Facets {
            categories: distinct(products.iter().map(|p| Some(&p.category))),
            materials: distinct(products.iter().map(|p| p.material.as_ref())),
            collections: distinct(products.iter().map(|p| p.collection.as_ref())),
        })
    }
}

#[async_trait]
impl ProductCommandRepositoryTrait for MemoryStore {
    async fn create_product(&self, req: &CreateProductRequest) -> Result<Product, RepositoryError> {
        self.check()?;
        let mut products = self.products.write().await;
        let product = Self::build(req, products.len() as i64);
        products.push(product.clone());
        Ok(product)
    }

    async fn update_product(
        &self,
        id: Uuid,
        req: &UpdateProductRequest,
    ) -> Result<Product, RepositoryError> {
        self.check()?;
        let mut products = self.products.write().await;
        let product = products
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or(RepositoryError::NotFound)?;

        if let Some(name) = &req.name {
            product.name = name.clone();
        }
        if let Some(description) = &req.description {
            product.description = description.clone();
        }
        if let Some(price) = req.price {
            product.price = price;
        }
        if req.original_price.is_some() {
            product.original_price = req.original_price;
        }
        if let Some(category) = &req.category {
            product.category = category.clone();
        }
        if req.material.is_some() {
            product.material = req.material.clone();
        }
        if req.collection.is_some() {
            product.collection = req.collection.clone();
        }
        if let Some(stock) = req.stock {
            product.stock = stock;
        }
        if let Some(images) = &req.images {
            product.images = images.iter().filter(|i| !i.is_empty()).cloned().collect();
        }
        product.featured = req.featured;
        product.is_new = req.is_new;
        product.on_sale = req.on_sale;
        product.updated_at = Utc::now();

        Ok(product.clone())
    }

    async fn delete_product(&self, id: Uuid) -> Result<(), RepositoryError> {
        self.check()?;
        let mut products = self.products.write().await;
        let before = products.len();
        products.retain(|p| p.id != id);
        if products.len() == before {
            return Err(RepositoryError::NotFound);
        }
        self.reviews.write().await.retain(|r| r.product_id != id);
        Ok(())
    }

    async fn delete_all_products(&self) -> Result<u64, RepositoryError> {
        self.check()?;
        let mut products = self.products.write().await;
        let deleted = products.len() as u64;
        products.clear();
        self.reviews.write().await.clear();
        Ok(deleted)
    }

    async fn replace_all(
        &self,
        items: &[CreateProductRequest],
    ) -> Result<Vec<Product>, RepositoryError> {
        self.check()?;
        let created: Vec<Product> = items
            .iter()
            .enumerate()
            .map(|(i, item)| Self::build(item, i as i64))
            .collect();
        *self.products.write().await = created.clone();
        self.reviews.write().await.clear();
        Ok(created)
    }

    async fn reset_tags(&self) -> Result<u64, RepositoryError> {
        self.check()?;
        let mut products = self.products.write().await;
        for product in products.iter_mut() {
            product.featured = false;
            product.is_new = false;
            product.on_sale = false;
        }
        Ok(products.len() as u64)
    }

    async fn mark_featured(&self, ids: &[Uuid]) -> Result<u64, RepositoryError> {
        self.check()?;
        let mut marked = 0;
        for product in self.products.write().await.iter_mut().filter(|p| ids.contains(&p.id)) {
            product.featured = true;
            marked += 1;
        }
        Ok(marked)
    }

    async fn mark_new(&self, ids: &[Uuid]) -> Result<u64, RepositoryError> {
        self.check()?;
        let mut marked = 0;
        for product in self.products.write().await.iter_mut().filter(|p| ids.contains(&p.id)) {
            product.is_new = true;
            marked += 1;
        }
        Ok(marked)
    }

    async fn mark_on_sale(&self, update: &SaleUpdate) -> Result<(), RepositoryError> {
        self.check()?;
        let mut products = self.products.write().await;
        let product = products
            .iter_mut()
            .find(|p| p.id == update.id)
            .ok_or(RepositoryError::NotFound)?;
        product.on_sale = true;
        product.original_price = Some(update.original_price);
        product.price = update.price;
        Ok(())
    }
}

#[async_trait]
impl UserQueryRepositoryTrait for MemoryStore {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepositoryError> {
        self.check()?;
        Ok(self
            .users
            .read()
            .await
            .iter()
            .find(|u| u.email.eq_ignore_ascii_case(email))
            .cloned())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, RepositoryError> {
        self.check()?;
        Ok(self.users.read().await.iter().find(|u| u.id == id).cloned())
    }
}

#[async_trait]
impl UserCommandRepositoryTrait for MemoryStore {
    async fn create_user(&self, req: &CreateUserRecord) -> Result<User, RepositoryError> {
        self.check()?;
        let mut users = self.users.write().await;
        if users.iter().any(|u| u.email.eq_ignore_ascii_case(&req.email)) {
            return Err(RepositoryError::AlreadyExists(
                "Email already registered".to_string(),
            ));
        }
        let user = User {
            id: Uuid::new_v4(),
            email: req.email.clone(),
            password: req.password_hash.clone(),
            name: req.name.clone(),
            role: UserRole::User,
            image: None,
            created_at: Utc::now(),
        };
        users.push(user.clone());
        Ok(user)
    }
}
