use crate::{
    abstract_trait::ProductQueryRepositoryTrait,
    config::ConnectionPool,
    domain::requests::ProductFilter,
    errors::RepositoryError,
    model::{CatalogCounts, Facets, Product, ProductRow, ReviewWithUser},
};
use async_trait::async_trait;
use sqlx::{Postgres, QueryBuilder};
use tracing::{error, info};
use uuid::Uuid;

pub(crate) const PRODUCT_COLUMNS: &str = "id, name, description, price, original_price, category, \
     material, collection, images, rating, stock, featured, is_new, on_sale, created_at, updated_at";

#[derive(Clone)]
pub struct ProductQueryRepository {
    db: ConnectionPool,
}

impl ProductQueryRepository {
    pub fn new(db: ConnectionPool) -> Self {
        Self { db }
    }

    async fn distinct_column(&self, column: &str) -> Result<Vec<String>, RepositoryError> {
        let sql = format!(
            "SELECT DISTINCT {column} FROM products WHERE {column} IS NOT NULL ORDER BY {column}"
        );

        sqlx::query_scalar::<_, String>(&sql)
            .fetch_all(&self.db)
            .await
            .map_err(|e| {
                error!("❌ Failed to fetch distinct {column}: {:?}", e);
                RepositoryError::from(e)
            })
    }
}

#[async_trait]
impl ProductQueryRepositoryTrait for ProductQueryRepository {
    async fn find_all(
        &self,
        filter: &ProductFilter,
    ) -> Result<(Vec<Product>, i64), RepositoryError> {
        info!(
            "🔍 Fetching products page={} limit={} sort={:?} search={:?}",
            filter.page, filter.limit, filter.sort, filter.search
        );

        let mut conn = self.db.acquire().await.map_err(|e| {
            error!("❌ Failed to acquire DB connection: {:?}", e);
            RepositoryError::from(e)
        })?;

        let mut count_qb = QueryBuilder::<Postgres>::new("SELECT COUNT(*) FROM products");
        filter.push_where(&mut count_qb);

        let total: i64 = count_qb
            .build_query_scalar::<i64>()
            .fetch_one(&mut *conn)
            .await
            .map_err(|e| {
                error!("❌ Failed to count products: {:?}", e);
                RepositoryError::from(e)
            })?;

        let mut page_qb = QueryBuilder::<Postgres>::new(format!(
            "SELECT {PRODUCT_COLUMNS} FROM products"
        ));
        filter.push_where(&mut page_qb);
        filter.push_order_and_page(&mut page_qb);

        let rows = page_qb
            .build_query_as::<ProductRow>()
            .fetch_all(&mut *conn)
            .await
            .map_err(|e| {
                error!("❌ Failed to fetch products: {:?}", e);
                RepositoryError::from(e)
            })?;

        info!("✅ Found {} products (total {})", rows.len(), total);

        Ok((rows.into_iter().map(Product::from).collect(), total))
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Product>, RepositoryError> {
        info!("🆔 Fetching product by ID: {}", id);

        let sql = format!("SELECT {PRODUCT_COLUMNS} FROM products WHERE id = $1");
        let row = sqlx::query_as::<_, ProductRow>(&sql)
            .bind(id)
            .fetch_optional(&self.db)
            .await
            .map_err(|e| {
                error!("❌ Failed to fetch product {}: {:?}", id, e);
                RepositoryError::from(e)
            })?;

        Ok(row.map(Product::from))
    }

    async fn find_reviews(&self, product_id: Uuid) -> Result<Vec<ReviewWithUser>, RepositoryError> {
        sqlx::query_as::<_, ReviewWithUser>(
            r#"
            SELECT
                r.id,
                r.product_id,
                r.rating,
                r.comment,
                r.created_at,
                u.id AS user_id,
                u.name AS user_name,
                u.image AS user_image
            FROM reviews r
            JOIN users u ON u.id = r.user_id
            WHERE r.product_id = $1
            ORDER BY r.created_at DESC
            "#,
        )
        .bind(product_id)
        .fetch_all(&self.db)
        .await
        .map_err(|e| {
            error!("❌ Failed to fetch reviews for {}: {:?}", product_id, e);
            RepositoryError::from(e)
        })
    }

    async fn find_curated(&self) -> Result<Vec<Product>, RepositoryError> {
        let sql = format!(
            "SELECT {PRODUCT_COLUMNS} FROM products WHERE featured OR is_new OR on_sale"
        );

        let rows = sqlx::query_as::<_, ProductRow>(&sql)
            .fetch_all(&self.db)
            .await
            .map_err(|e| {
                error!("❌ Failed to fetch curated products: {:?}", e);
                RepositoryError::from(e)
            })?;

        Ok(rows.into_iter().map(Product::from).collect())
    }

    async fn find_every(&self) -> Result<Vec<Product>, RepositoryError> {
        let sql = format!("SELECT {PRODUCT_COLUMNS} FROM products ORDER BY created_at, id");

        let rows = sqlx::query_as::<_, ProductRow>(&sql)
            .fetch_all(&self.db)
            .await
            .map_err(|e| {
                error!("❌ Failed to fetch all products: {:?}", e);
                RepositoryError::from(e)
            })?;

        Ok(rows.into_iter().map(Product::from).collect())
    }

    async fn counts(&self) -> Result<CatalogCounts, RepositoryError> {
        sqlx::query_as::<_, CatalogCounts>(
            r#"
            SELECT
                COUNT(*) AS total,
                COUNT(*) FILTER (WHERE featured) AS featured,
                COUNT(*) FILTER (WHERE is_new) AS is_new,
                COUNT(*) FILTER (WHERE on_sale) AS on_sale
            FROM products
            "#,
        )
        .fetch_one(&self.db)
        .await
        .map_err(|e| {
            error!("❌ Failed to count catalog: {:?}", e);
            RepositoryError::from(e)
        })
    }

    async fn facets(&self) -> Result<Facets, RepositoryError> {
        Ok(Facets {
            categories: self.distinct_column("category").await?,
            materials: self.distinct_column("material").await?,
            collections: self.distinct_column("collection").await?,
        })
    }
}
