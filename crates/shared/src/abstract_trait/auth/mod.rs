use crate::{
    domain::{
        requests::{LoginRequest, RegisterRequest},
        responses::{ApiResponse, LoginResponse, UserResponse},
    },
    errors::ServiceError,
};
use anyhow::Result;
use async_trait::async_trait;
use std::sync::Arc;
use uuid::Uuid;

pub type DynLoginService = Arc<dyn LoginServiceTrait + Send + Sync>;
pub type DynRegisterService = Arc<dyn RegisterServiceTrait + Send + Sync>;
pub type DynIdentityService = Arc<dyn IdentityServiceTrait + Send + Sync>;

#[async_trait]
pub trait LoginServiceTrait {
    async fn login(&self, req: &LoginRequest) -> Result<ApiResponse<LoginResponse>, ServiceError>;
}

#[async_trait]
pub trait RegisterServiceTrait {
    async fn register(
        &self,
        req: &RegisterRequest,
    ) -> Result<ApiResponse<UserResponse>, ServiceError>;
}

#[async_trait]
pub trait IdentityServiceTrait {
    async fn get_me(&self, user_id: Uuid) -> Result<ApiResponse<UserResponse>, ServiceError>;
}
