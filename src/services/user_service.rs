// src/services/user_service.rs

use std::sync::Arc;

use bcrypt::{hash, verify};
use chrono::Utc;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::{Repository, Store},
    models::auth::{NewUser, NotificationPreferences, UpdateUserPayload, User, UserRole},
};

#[derive(Clone)]
pub struct UserService {
    repo: Repository<User>,
    bcrypt_cost: u32,
}

impl UserService {
    pub fn new(store: Arc<dyn Store>, bcrypt_cost: u32) -> Self {
        Self {
            repo: Repository::new(store),
            bcrypt_cost,
        }
    }

    pub async fn create_user(&self, input: NewUser) -> Result<User, AppError> {
        let email = input.email.trim().to_lowercase();

        if self.find_by_email(&email).await?.is_some() {
            return Err(AppError::EmailAlreadyExists);
        }

        // Hashing fora do runtime async
        let password = input.password;
        let cost = self.bcrypt_cost;
        let hashed_password = tokio::task::spawn_blocking(move || hash(&password, cost))
            .await
            .map_err(|e| anyhow::anyhow!("Falha na task de hashing: {}", e))??;

        let now = Utc::now();
        let user = User {
            id: Uuid::new_v4(),
            email,
            password: hashed_password,
            first_name: input.first_name,
            last_name: input.last_name,
            phone: input.phone,
            role: input.role,
            notification_preferences: NotificationPreferences::default(),
            created_at: now,
            updated_at: now,
        };

        self.repo.save(&user).await?;
        tracing::info!("Usuário {} criado ({})", user.id, user.role.as_str());
        Ok(user)
    }

    pub async fn get_user(&self, id: Uuid) -> Result<User, AppError> {
        self.repo.get(id).await
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, AppError> {
        self.repo.find_by_id(id).await
    }

    // Busca um usuário pelo seu e-mail (sem diferenciar maiúsculas)
    pub async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        let email = email.trim().to_lowercase();
        let mut found = self.repo.find_by("email", email.as_str()).await?;
        if found.len() > 1 {
            tracing::warn!("{} usuários com o e-mail {}", found.len(), email);
        }
        Ok(found.pop())
    }

    pub async fn list_users(&self) -> Result<Vec<User>, AppError> {
        let mut users = self.repo.list().await?;
        users.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        Ok(users)
    }

    pub async fn list_by_role(&self, role: UserRole) -> Result<Vec<User>, AppError> {
        self.repo.find_by("role", role.as_str()).await
    }

    pub async fn update_user(&self, id: Uuid, input: UpdateUserPayload) -> Result<User, AppError> {
        let mut user = self.repo.get(id).await?;

        if let Some(first_name) = input.first_name {
            user.first_name = first_name;
        }
        if let Some(last_name) = input.last_name {
            user.last_name = last_name;
        }
        if input.phone.is_some() {
            user.phone = input.phone;
        }
        user.updated_at = Utc::now();

        self.repo.save(&user).await?;
        Ok(user)
    }

    pub async fn update_notification_preferences(
        &self,
        id: Uuid,
        preferences: NotificationPreferences,
    ) -> Result<User, AppError> {
        let mut user = self.repo.get(id).await?;
        user.notification_preferences = preferences;
        user.updated_at = Utc::now();

        self.repo.save(&user).await?;
        Ok(user)
    }

    /// Confere e-mail e senha. Qualquer falha vira `InvalidCredentials`.
    pub async fn authenticate(&self, email: &str, password: &str) -> Result<User, AppError> {
        let user = self
            .find_by_email(email)
            .await?
            .ok_or(AppError::InvalidCredentials)?;

        let password_clone = password.to_owned();
        let password_hash_clone = user.password.clone();

        // Executa a verificação em um thread separado
        let is_password_valid =
            tokio::task::spawn_blocking(move || verify(&password_clone, &password_hash_clone))
                .await
                .map_err(|e| anyhow::anyhow!("Falha na task de verificação de senha: {}", e))?
                .unwrap_or(false);

        if !is_password_valid {
            return Err(AppError::InvalidCredentials);
        }

        Ok(user)
    }
}
