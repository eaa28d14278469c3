use crate::{
    abstract_trait::UserCommandRepositoryTrait,
    config::ConnectionPool,
    domain::requests::CreateUserRecord,
    errors::RepositoryError,
    model::{User, UserRole, UserRow},
};
use async_trait::async_trait;
use tracing::{error, info};

pub struct UserCommandRepository {
    db: ConnectionPool,
}

impl UserCommandRepository {
    pub fn new(db: ConnectionPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl UserCommandRepositoryTrait for UserCommandRepository {
    async fn create_user(&self, req: &CreateUserRecord) -> Result<User, RepositoryError> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            INSERT INTO users (email, password, name, role)
            VALUES ($1, $2, $3, $4)
            RETURNING id, email, password, name, role, image, created_at
            "#,
        )
        .bind(&req.email)
        .bind(&req.password_hash)
        .bind(&req.name)
        .bind(UserRole::User.as_str())
        .fetch_one(&self.db)
        .await
        .map_err(|e| {
            error!("❌ Failed to create user {}: {:?}", req.email, e);
            RepositoryError::from_unique(e, "Email already registered")
        })?;

        info!("✅ Created user {}", row.id);
        Ok(User::from(row))
    }
}
