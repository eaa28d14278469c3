use crate::{
    abstract_trait::{DynProductQueryRepository, ProductQueryServiceTrait},
    domain::{
        requests::{FindAllProductsQuery, ProductFilter},
        responses::{
            ProductDetailResponse, ProductFacetsResponse, ProductResponse, ProductsResponse,
            ReviewResponse,
        },
    },
    errors::ServiceError,
    service::product::parse_product_id,
    utils::{Method, Metrics, TracingContext},
};
use async_trait::async_trait;
use prometheus_client::registry::Registry;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{error, info};

pub struct ProductQueryService {
    pub query: DynProductQueryRepository,
    pub metrics: Arc<Mutex<Metrics>>,
}

impl ProductQueryService {
    pub async fn new(
        query: DynProductQueryRepository,
        metrics: Arc<Mutex<Metrics>>,
        registry: Arc<Mutex<Registry>>,
    ) -> Self {
        metrics.lock().await.register(
            &mut *registry.lock().await,
            "product_query_service",
            "ProductQueryService",
        );

        Self { query, metrics }
    }
}

#[async_trait]
impl ProductQueryServiceTrait for ProductQueryService {
    async fn find_all(&self, req: &FindAllProductsQuery) -> Result<ProductsResponse, ServiceError> {
        let filter = ProductFilter::from_query(req);
        info!(
            "🔍 Listing products | page={} limit={} sort={:?}",
            filter.page, filter.limit, filter.sort
        );

        let tracing_ctx = TracingContext::start("product", "find_all_products");

        let (products, total) = match self.query.find_all(&filter).await {
            Ok(result) => result,
            Err(err) => {
                error!("❌ Failed to fetch products: {err:?}");
                tracing_ctx
                    .error(&self.metrics, Method::Get, "Failed to fetch products")
                    .await;
                return Err(ServiceError::Repo(err));
            }
        };

        let response = ProductsResponse {
            products: products.into_iter().map(ProductResponse::from).collect(),
            total_count: total,
            current_page: filter.page,
            total_pages: filter.total_pages(total),
        };

        tracing_ctx
            .success(&self.metrics, Method::Get, "Products retrieved successfully")
            .await;

        Ok(response)
    }

    async fn find_by_id(&self, id: &str) -> Result<ProductDetailResponse, ServiceError> {
        info!("🆔 Fetching product by ID: {id}");

        let tracing_ctx = TracingContext::start("product", "find_product_by_id");

        let product_id = match parse_product_id(id) {
            Ok(product_id) => product_id,
            Err(err) => {
                tracing_ctx
                    .error(&self.metrics, Method::Get, "Invalid product ID")
                    .await;
                return Err(err);
            }
        };

        let product = match self.query.find_by_id(product_id).await {
            Ok(Some(product)) => product,
            Ok(None) => {
                tracing_ctx
                    .error(&self.metrics, Method::Get, "Product not found")
                    .await;
                return Err(ServiceError::NotFound("Product".to_string()));
            }
            Err(err) => {
                error!("❌ Failed to fetch product {product_id}: {err:?}");
                tracing_ctx
                    .error(&self.metrics, Method::Get, "Failed to fetch product")
                    .await;
                return Err(ServiceError::Repo(err));
            }
        };

        let reviews = match self.query.find_reviews(product_id).await {
            Ok(reviews) => reviews,
            Err(err) => {
                error!("❌ Failed to fetch reviews for {product_id}: {err:?}");
                tracing_ctx
                    .error(&self.metrics, Method::Get, "Failed to fetch reviews")
                    .await;
                return Err(ServiceError::Repo(err));
            }
        };

        tracing_ctx
            .success(&self.metrics, Method::Get, "Product retrieved successfully")
            .await;

        Ok(ProductDetailResponse {
            product: ProductResponse::from(product),
            reviews: reviews.into_iter().map(ReviewResponse::from).collect(),
        })
    }

    async fn facets(&self) -> Result<ProductFacetsResponse, ServiceError> {
        let tracing_ctx = TracingContext::start("product", "product_facets");

        match self.query.facets().await {
            Ok(facets) => {
                tracing_ctx
                    .success(&self.metrics, Method::Get, "Facets retrieved successfully")
                    .await;
                Ok(ProductFacetsResponse::from(facets))
            }
            Err(err) => {
                error!("❌ Failed to fetch facets: {err:?}");
                tracing_ctx
                    .error(&self.metrics, Method::Get, "Failed to fetch facets")
                    .await;
                Err(ServiceError::Repo(err))
            }
        }
    }
}
