use crate::{abstract_trait::JwtServiceTrait, errors::ServiceError, model::UserRole};
use anyhow::Result;
use chrono::{Duration, Utc};
use jsonwebtoken::{
    DecodingKey, EncodingKey, Header, Validation, decode, encode, errors::ErrorKind,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: Uuid,
    pub role: UserRole,
    pub exp: usize,
    pub iat: usize,
}

impl Claims {
    pub fn new(sub: Uuid, role: UserRole, exp: usize, iat: usize) -> Self {
        Claims { sub, role, exp, iat }
    }

    pub fn is_admin(&self) -> bool {
        self.role == UserRole::Admin
    }
}

#[derive(Debug, Clone)]
pub struct JwtConfig {
    pub jwt_secret: String,
    pub ttl: Duration,
}

impl JwtConfig {
    pub fn new(jwt_secret: &str) -> Self {
        JwtConfig {
            jwt_secret: jwt_secret.to_string(),
            ttl: Duration::hours(24),
        }
    }

    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }
}

impl JwtServiceTrait for JwtConfig {
    fn generate_token(&self, user_id: Uuid, role: UserRole) -> Result<String, ServiceError> {
        let now = Utc::now();
        let iat = now.timestamp() as usize;
        let exp = (now + self.ttl).timestamp() as usize;

        let claims = Claims::new(user_id, role, exp, iat);

        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.jwt_secret.as_ref()),
        )
        .map_err(ServiceError::Jwt)
    }

    fn verify_token(&self, token: &str) -> Result<Claims, ServiceError> {
        let decoding_key = DecodingKey::from_secret(self.jwt_secret.as_ref());
        let token_data = decode::<Claims>(token, &decoding_key, &Validation::default())
            .map_err(|err| match err.kind() {
                ErrorKind::ExpiredSignature => ServiceError::TokenExpired,
                _ => ServiceError::Jwt(err),
            })?;

        Ok(token_data.claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_subject_and_role() {
        let jwt = JwtConfig::new("secret");
        let id = Uuid::new_v4();

        let token = jwt.generate_token(id, UserRole::Admin).unwrap();
        let claims = jwt.verify_token(&token).unwrap();

        assert_eq!(claims.sub, id);
        assert!(claims.is_admin());
    }

    #[test]
    fn rejects_foreign_signature() {
        let token = JwtConfig::new("one")
            .generate_token(Uuid::new_v4(), UserRole::User)
            .unwrap();
        assert!(JwtConfig::new("two").verify_token(&token).is_err());
    }

    #[test]
    fn expired_token_is_reported() {
        let jwt = JwtConfig::new("secret").with_ttl(Duration::hours(-2));
        let token = jwt.generate_token(Uuid::new_v4(), UserRole::User).unwrap();
        assert!(matches!(jwt.verify_token(&token), Err(ServiceError::TokenExpired)));
    }
}
