use crate::{
    abstract_trait::ProductCommandRepositoryTrait,
    catalog::SaleUpdate,
    config::ConnectionPool,
    domain::requests::{CreateProductRequest, UpdateProductRequest},
    errors::RepositoryError,
    model::{Product, ProductRow},
    repository::product::query::PRODUCT_COLUMNS,
};
use async_trait::async_trait;
use sqlx::{PgConnection, types::Json};
use tracing::{error, info};
use uuid::Uuid;

pub struct ProductCommandRepository {
    db: ConnectionPool,
}

impl ProductCommandRepository {
    pub fn new(db: ConnectionPool) -> Self {
        Self { db }
    }

    async fn insert(
        conn: &mut PgConnection,
        product: &CreateProductRequest,
    ) -> Result<Product, sqlx::Error> {
        let sql = format!(
            r#"
            INSERT INTO products (
                name, description, price, original_price, category, material, collection,
                images, rating, stock, featured, is_new, on_sale
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)
            RETURNING {PRODUCT_COLUMNS}
            "#
        );

        let row = sqlx::query_as::<_, ProductRow>(&sql)
            .bind(&product.name)
            .bind(&product.description)
            .bind(product.price)
            .bind(product.original_price)
            .bind(&product.category)
            .bind(&product.material)
            .bind(&product.collection)
            .bind(Json(&product.images))
            .bind(product.rating)
            .bind(product.stock)
            .bind(product.featured)
            .bind(product.is_new)
            .bind(product.on_sale)
            .fetch_one(conn)
            .await?;

        Ok(Product::from(row))
    }
}

#[async_trait]
impl ProductCommandRepositoryTrait for ProductCommandRepository {
    async fn create_product(
        &self,
        product: &CreateProductRequest,
    ) -> Result<Product, RepositoryError> {
        let mut conn = self.db.acquire().await.map_err(RepositoryError::from)?;

        let result = Self::insert(&mut *conn, product).await.map_err(|err| {
            error!("❌ Failed to create product {}: {:?}", product.name, err);
            RepositoryError::from(err)
        })?;

        info!("✅ Created product ID {} ({})", result.id, result.name);
        Ok(result)
    }

    async fn update_product(
        &self,
        id: Uuid,
        product: &UpdateProductRequest,
    ) -> Result<Product, RepositoryError> {
        let sql = format!(
            r#"
            UPDATE products
            SET name = COALESCE($2, name),
                description = COALESCE($3, description),
                price = COALESCE($4, price),
                original_price = COALESCE($5, original_price),
                category = COALESCE($6, category),
                material = COALESCE($7, material),
                collection = COALESCE($8, collection),
                featured = $9,
                is_new = $10,
                on_sale = $11,
                stock = COALESCE($12, stock),
                images = COALESCE($13, images),
                updated_at = now()
            WHERE id = $1
            RETURNING {PRODUCT_COLUMNS}
            "#
        );

        let row = sqlx::query_as::<_, ProductRow>(&sql)
            .bind(id)
            .bind(&product.name)
            .bind(&product.description)
            .bind(product.price)
            .bind(product.original_price)
            .bind(&product.category)
            .bind(&product.material)
            .bind(&product.collection)
            .bind(product.featured)
            .bind(product.is_new)
            .bind(product.on_sale)
            .bind(product.stock)
            .bind(product.images.as_ref().map(Json))
            .fetch_optional(&self.db)
            .await
            .map_err(|err| {
                error!("❌ Failed to update product ID {}: {:?}", id, err);
                RepositoryError::from(err)
            })?
            .ok_or(RepositoryError::NotFound)?;

        info!("🔄 Updated product ID {}", row.id);
        Ok(Product::from(row))
    }

    async fn delete_product(&self, id: Uuid) -> Result<(), RepositoryError> {
        info!("❌ Deleting product: {}", id);

        let result = sqlx::query("DELETE FROM products WHERE id = $1")
            .bind(id)
            .execute(&self.db)
            .await
            .map_err(|e| {
                error!("❌ Failed to delete product {}: {:?}", id, e);
                RepositoryError::from(e)
            })?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        info!("✅ Product ID {} permanently deleted", id);
        Ok(())
    }

    async fn delete_all_products(&self) -> Result<u64, RepositoryError> {
        info!("❌ Deleting all products");

        let result = sqlx::query("DELETE FROM products")
            .execute(&self.db)
            .await
            .map_err(|e| {
                error!("❌ Failed to delete all products: {:?}", e);
                RepositoryError::from(e)
            })?;

        info!("✅ Deleted {} products", result.rows_affected());
        Ok(result.rows_affected())
    }

    async fn replace_all(
        &self,
        items: &[CreateProductRequest],
    ) -> Result<Vec<Product>, RepositoryError> {
        let mut tx = self.db.begin().await.map_err(RepositoryError::from)?;

        sqlx::query("DELETE FROM products")
            .execute(&mut *tx)
            .await
            .map_err(|e| {
                error!("❌ Failed to clear products before seeding: {:?}", e);
                RepositoryError::from(e)
            })?;

        let mut created = Vec::with_capacity(items.len());
        for item in items {
            let product = Self::insert(&mut *tx, item).await.map_err(|e| {
                error!("❌ Failed to seed product {}: {:?}", item.name, e);
                RepositoryError::from(e)
            })?;
            created.push(product);
        }

        tx.commit().await.map_err(RepositoryError::from)?;

        info!("🌱 Seeded {} products", created.len());
        Ok(created)
    }

    async fn reset_tags(&self) -> Result<u64, RepositoryError> {
        let result = sqlx::query(
            "UPDATE products SET featured = FALSE, is_new = FALSE, on_sale = FALSE, updated_at = now()",
        )
        .execute(&self.db)
        .await
        .map_err(|e| {
            error!("❌ Failed to reset product tags: {:?}", e);
            RepositoryError::from(e)
        })?;

        Ok(result.rows_affected())
    }

    async fn mark_featured(&self, ids: &[Uuid]) -> Result<u64, RepositoryError> {
        let result = sqlx::query(
            "UPDATE products SET featured = TRUE, updated_at = now() WHERE id = ANY($1)",
        )
        .bind(ids.to_vec())
        .execute(&self.db)
        .await
        .map_err(|e| {
            error!("❌ Failed to mark featured products: {:?}", e);
            RepositoryError::from(e)
        })?;

        Ok(result.rows_affected())
    }

    async fn mark_new(&self, ids: &[Uuid]) -> Result<u64, RepositoryError> {
        let result = sqlx::query(
            "UPDATE products SET is_new = TRUE, updated_at = now() WHERE id = ANY($1)",
        )
        .bind(ids.to_vec())
        .execute(&self.db)
        .await
        .map_err(|e| {
            error!("❌ Failed to mark new products: {:?}", e);
            RepositoryError::from(e)
        })?;

        Ok(result.rows_affected())
    }

    async fn mark_on_sale(&self, update: &SaleUpdate) -> Result<(), RepositoryError> {
        sqlx::query(
            r#"
            UPDATE products
            SET on_sale = TRUE, original_price = $2, price = $3, updated_at = now()
            WHERE id = $1
            "#,
        )
        .bind(update.id)
        .bind(update.original_price)
        .bind(update.price)
        .execute(&self.db)
        .await
        .map_err(|e| {
            error!("❌ Failed to mark product {} on sale: {:?}", update.id, e);
            RepositoryError::from(e)
        })?;

        info!(
            "🏷️ Product {} on sale: {} -> {} ({}% off)",
            update.id, update.original_price, update.price, update.percent
        );
        Ok(())
    }
}
