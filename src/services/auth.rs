// src/services/auth.rs

use chrono::Utc;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};

use crate::{
    common::error::AppError,
    models::auth::{Claims, NewUser, RegisterUserPayload, User, UserRole},
    services::UserService,
};

#[derive(Clone)]
pub struct AuthService {
    users: UserService,
    jwt_secret: String,
}

impl AuthService {
    pub fn new(users: UserService, jwt_secret: String) -> Self {
        Self { users, jwt_secret }
    }

    pub async fn register_user(
        &self,
        payload: RegisterUserPayload,
    ) -> Result<(String, User), AppError> {
        // Ninguém vira admin pelo registro público
        if payload.role == UserRole::Admin {
            return Err(AppError::Forbidden);
        }

        let user = self
            .users
            .create_user(NewUser {
                email: payload.email,
                password: payload.password,
                first_name: payload.first_name,
                last_name: payload.last_name,
                phone: payload.phone,
                role: payload.role,
            })
            .await?;

        let token = self.create_token(&user)?;
        Ok((token, user))
    }

    pub async fn login_user(
        &self,
        email: &str,
        password: &str,
    ) -> Result<(String, User), AppError> {
        let user = self.users.authenticate(email, password).await?;
        let token = self.create_token(&user)?;
        Ok((token, user))
    }

    pub async fn validate_token(&self, token: &str) -> Result<User, AppError> {
        let validation = Validation::default();
        let token_data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.jwt_secret.as_ref()),
            &validation,
        )
        .map_err(|_| AppError::InvalidToken)?;

        self.users
            .find_by_id(token_data.claims.sub)
            .await?
            .ok_or(AppError::InvalidToken)
    }

    fn create_token(&self, user: &User) -> Result<String, AppError> {
        let now = Utc::now();
        let expires_at = now + chrono::Duration::days(7);

        let claims = Claims {
            sub: user.id,
            role: user.role,
            exp: expires_at.timestamp() as usize,
            iat: now.timestamp() as usize,
        };

        Ok(encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.jwt_secret.as_ref()),
        )?)
    }
}
