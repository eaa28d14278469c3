use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

/// A review joined with the reviewer's public fields.
#[derive(Debug, Clone, FromRow)]
pub struct ReviewWithUser {
    pub id: Uuid,
    pub product_id: Uuid,
    pub rating: i32,
    pub comment: String,
    pub created_at: DateTime<Utc>,
    pub user_id: Uuid,
    pub user_name: String,
    pub user_image: Option<String>,
}
