//! User account service.
//!
//! Registration, login and profile management for citizens. Admin accounts
//! are provisioned directly in the database, never through registration.

use chrono::Utc;
use pedika_common::{
    AppError, AppResult, Config, create_token, hash_password, verify_password, verify_token,
};
use pedika_db::{
    entities::{user, user::Role},
    repositories::UserRepository,
};
use regex::Regex;
use sea_orm::Set;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Digits appended to the first name to form a username.
const USERNAME_SUFFIX_LEN: usize = 8;

/// How many generated usernames to try before giving up.
const USERNAME_ATTEMPTS: usize = 5;

/// Indonesian mobile number: `08` followed by 9 to 11 digits.
static PHONE_RE: std::sync::LazyLock<Regex> =
    std::sync::LazyLock::new(|| Regex::new(r"^08[0-9]{9,11}$").unwrap());

pub(crate) fn validate_phone(phone: &str) -> AppResult<()> {
    if PHONE_RE.is_match(phone) {
        Ok(())
    } else {
        Err(AppError::Validation(
            "Phone number must start with 08 and be 11 to 13 digits long".to_string(),
        ))
    }
}

/// Input for registering a citizen account.
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterInput {
    #[validate(length(min = 1, max = 128))]
    pub full_name: String,

    #[validate(email)]
    pub email: String,

    pub phone: String,

    #[validate(length(min = 8, max = 128))]
    pub password: String,
}

/// Input for logging in.
#[derive(Debug, Deserialize, Validate)]
pub struct LoginInput {
    /// Email, username or phone number.
    #[validate(length(min = 1, max = 128))]
    pub identifier: String,

    #[validate(length(min = 1, max = 128))]
    pub password: String,
}

/// Input for updating a profile.
#[derive(Debug, Default, Deserialize, Validate)]
pub struct UpdateProfileInput {
    #[validate(length(min = 1, max = 128))]
    pub full_name: Option<String>,

    pub phone: Option<String>,

    /// Photo URL (set by API layer after upload).
    pub photo_url: Option<String>,

    #[validate(length(max = 128))]
    pub province: Option<String>,

    #[validate(length(max = 128))]
    pub city: Option<String>,

    #[validate(length(max = 128))]
    pub district: Option<String>,

    #[validate(length(max = 128))]
    pub village: Option<String>,

    #[validate(length(max = 10))]
    pub postal_code: Option<String>,

    #[validate(length(max = 256))]
    pub street: Option<String>,
}

/// Input for changing a password.
#[derive(Debug, Deserialize, Validate)]
pub struct ChangePasswordInput {
    #[validate(length(min = 1, max = 128))]
    pub current_password: String,

    #[validate(length(min = 8, max = 128))]
    pub new_password: String,
}

/// A signed token plus the authenticated user.
#[derive(Debug, Serialize)]
pub struct TokenResponse {
    pub token: String,
    pub user: user::Model,
}

/// User service for business logic.
#[derive(Clone)]
pub struct UserService {
    user_repo: UserRepository,
    jwt_secret: String,
    token_expiry_hours: i64,
}

impl UserService {
    /// Create a new user service.
    #[must_use]
    pub fn new(user_repo: UserRepository, config: &Config) -> Self {
        Self {
            user_repo,
            jwt_secret: config.auth.jwt_secret.clone(),
            token_expiry_hours: config.auth.token_expiry_hours,
        }
    }

    /// Register a citizen account.
    ///
    /// The username is derived from the first name plus random digits;
    /// the caller never picks one.
    pub async fn register(&self, input: RegisterInput) -> AppResult<user::Model> {
        input.validate()?;
        validate_phone(&input.phone)?;

        let username = self.generate_username(&input.full_name).await?;

        let taken = self
            .user_repo
            .count_by_contact(&input.email, &input.phone, &username)
            .await?;
        if taken > 0 {
            return Err(AppError::Validation(
                "Email or phone number is already registered".to_string(),
            ));
        }

        let password_hash = hash_password(&input.password)?;

        let model = user::ActiveModel {
            full_name: Set(input.full_name),
            email: Set(input.email),
            phone: Set(input.phone),
            username: Set(username),
            password_hash: Set(password_hash),
            role: Set(Role::Masyarakat),
            created_at: Set(Utc::now().into()),
            ..Default::default()
        };

        // The unique indexes are the real guard; the count above only
        // produces a friendlier error for the common case.
        let user = match self.user_repo.create(model).await {
            Ok(user) => user,
            Err(AppError::DuplicateKey(_)) => {
                return Err(AppError::Validation(
                    "Email or phone number is already registered".to_string(),
                ));
            }
            Err(e) => return Err(e),
        };

        tracing::info!(user_id = user.id, "citizen account registered");

        Ok(user)
    }

    /// Authenticate by email, username or phone, returning a signed token.
    pub async fn login(&self, input: LoginInput) -> AppResult<TokenResponse> {
        input.validate()?;

        let user = self
            .user_repo
            .find_by_identifier(&input.identifier)
            .await?
            .ok_or(AppError::Unauthorized)?;

        if !verify_password(&input.password, &user.password_hash)? {
            return Err(AppError::Unauthorized);
        }

        let token = create_token(
            user.id,
            user.role.into(),
            &self.jwt_secret,
            self.token_expiry_hours,
        )?;

        Ok(TokenResponse { token, user })
    }

    /// Resolve a bearer token to its user row.
    ///
    /// A valid signature pointing at a deleted account is still
    /// `Unauthorized`; the row is the source of truth for the role.
    pub async fn authenticate_token(&self, token: &str) -> AppResult<user::Model> {
        let claims = verify_token(token, &self.jwt_secret)?;
        self.user_repo
            .find_by_id(claims.sub)
            .await?
            .ok_or(AppError::Unauthorized)
    }

    /// A user's own profile.
    pub async fn profile(&self, user_id: i32) -> AppResult<user::Model> {
        self.user_repo.get_by_id(user_id).await
    }

    /// Update profile fields. Email and username are fixed at registration.
    pub async fn update_profile(
        &self,
        user_id: i32,
        input: UpdateProfileInput,
    ) -> AppResult<user::Model> {
        input.validate()?;
        if let Some(phone) = &input.phone {
            validate_phone(phone)?;
        }

        let user = self.user_repo.get_by_id(user_id).await?;

        let mut model: user::ActiveModel = user.into();
        if let Some(full_name) = input.full_name {
            model.full_name = Set(full_name);
        }
        if let Some(phone) = input.phone {
            model.phone = Set(phone);
        }
        if let Some(photo_url) = input.photo_url {
            model.photo_url = Set(Some(photo_url));
        }
        if let Some(province) = input.province {
            model.province = Set(Some(province));
        }
        if let Some(city) = input.city {
            model.city = Set(Some(city));
        }
        if let Some(district) = input.district {
            model.district = Set(Some(district));
        }
        if let Some(village) = input.village {
            model.village = Set(Some(village));
        }
        if let Some(postal_code) = input.postal_code {
            model.postal_code = Set(Some(postal_code));
        }
        if let Some(street) = input.street {
            model.street = Set(Some(street));
        }
        model.updated_at = Set(Some(Utc::now().into()));

        self.user_repo.update(model).await
    }

    /// Change a password after verifying the current one.
    pub async fn change_password(
        &self,
        user_id: i32,
        input: ChangePasswordInput,
    ) -> AppResult<user::Model> {
        input.validate()?;

        let user = self.user_repo.get_by_id(user_id).await?;

        if !verify_password(&input.current_password, &user.password_hash)? {
            return Err(AppError::BadRequest(
                "Current password is incorrect".to_string(),
            ));
        }

        let password_hash = hash_password(&input.new_password)?;

        let mut model: user::ActiveModel = user.into();
        model.password_hash = Set(password_hash);
        model.updated_at = Set(Some(Utc::now().into()));

        self.user_repo.update(model).await
    }

    async fn generate_username(&self, full_name: &str) -> AppResult<String> {
        use rand::Rng;

        let base: String = full_name
            .split_whitespace()
            .next()
            .unwrap_or("warga")
            .chars()
            .filter(char::is_ascii_alphanumeric)
            .map(|c| c.to_ascii_lowercase())
            .collect();
        let base = if base.is_empty() {
            "warga".to_string()
        } else {
            base
        };

        for _ in 0..USERNAME_ATTEMPTS {
            let suffix: String = {
                let mut rng = rand::thread_rng();
                (0..USERNAME_SUFFIX_LEN)
                    .map(|_| rng.gen_range(0..10).to_string())
                    .collect()
            };
            let candidate = format!("{base}{suffix}");

            if self.user_repo.find_by_username(&candidate).await?.is_none() {
                return Ok(candidate);
            }
        }

        Err(AppError::Internal(
            "Failed to generate a unique username".to_string(),
        ))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use sea_orm::{DatabaseBackend, DatabaseConnection, MockDatabase, MockExecResult};
    use std::sync::Arc;

    fn test_config() -> Config {
        Config {
            server: pedika_common::config::ServerConfig {
                host: "127.0.0.1".to_string(),
                port: 3000,
                url: "http://localhost:3000".to_string(),
                log_format: "text".to_string(),
            },
            database: pedika_common::config::DatabaseConfig {
                url: "postgres://localhost/pedika_test".to_string(),
                max_connections: 5,
                min_connections: 1,
            },
            auth: pedika_common::config::AuthConfig {
                jwt_secret: "test-secret".to_string(),
                token_expiry_hours: 24,
            },
            storage: pedika_common::config::StorageSettings::default(),
        }
    }

    fn build_service(db: &Arc<DatabaseConnection>) -> UserService {
        UserService::new(UserRepository::new(Arc::clone(db)), &test_config())
    }

    fn mock_user(id: i32, password: &str) -> user::Model {
        user::Model {
            id,
            full_name: "Siti Rahma".to_string(),
            email: "siti@example.com".to_string(),
            phone: "081234567890".to_string(),
            username: "siti12345678".to_string(),
            password_hash: hash_password(password).unwrap(),
            role: Role::Masyarakat,
            photo_url: None,
            province: None,
            city: None,
            district: None,
            village: None,
            postal_code: None,
            street: None,
            created_at: Utc::now().into(),
            updated_at: None,
        }
    }

    #[test]
    fn test_phone_validation() {
        assert!(validate_phone("081234567890").is_ok());
        assert!(validate_phone("08123456789").is_ok());
        assert!(validate_phone("0812345678901").is_ok());
        assert!(validate_phone("0812345678").is_err());
        assert!(validate_phone("08123456789012").is_err());
        assert!(validate_phone("621234567890").is_err());
        assert!(validate_phone("08-1234-5678").is_err());
    }

    #[tokio::test]
    async fn test_register_rejects_invalid_phone() {
        let db = Arc::new(MockDatabase::new(DatabaseBackend::Postgres).into_connection());
        let service = build_service(&db);

        let input = RegisterInput {
            full_name: "Siti Rahma".to_string(),
            email: "siti@example.com".to_string(),
            phone: "12345".to_string(),
            password: "rahasia-123".to_string(),
        };

        let result = service.register(input).await;
        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    #[tokio::test]
    async fn test_register_rejects_taken_contact() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                // Username probe finds no collision.
                .append_query_results([Vec::<user::Model>::new()])
                // Contact check finds an existing account.
                .append_query_results([[maplit::btreemap! {
                    "num_items" => sea_orm::Value::BigInt(Some(1))
                }]])
                .into_connection(),
        );
        let service = build_service(&db);

        let input = RegisterInput {
            full_name: "Siti Rahma".to_string(),
            email: "siti@example.com".to_string(),
            phone: "081234567890".to_string(),
            password: "rahasia-123".to_string(),
        };

        let result = service.register(input).await;
        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    #[tokio::test]
    async fn test_register_creates_citizen() {
        let created = mock_user(1, "rahasia-123");

        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                // Username probe finds no collision.
                .append_query_results([Vec::<user::Model>::new()])
                // Contact check is clean.
                .append_query_results([[maplit::btreemap! {
                    "num_items" => sea_orm::Value::BigInt(Some(0))
                }]])
                .append_query_results([[created.clone()]])
                .append_exec_results([MockExecResult {
                    last_insert_id: 1,
                    rows_affected: 1,
                }])
                .into_connection(),
        );
        let service = build_service(&db);

        let input = RegisterInput {
            full_name: "Siti Rahma".to_string(),
            email: "siti@example.com".to_string(),
            phone: "081234567890".to_string(),
            password: "rahasia-123".to_string(),
        };

        let user = service.register(input).await.unwrap();
        assert_eq!(user.role, Role::Masyarakat);
        assert_eq!(user.email, "siti@example.com");
    }

    #[tokio::test]
    async fn test_login_unknown_identifier_rejected() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([Vec::<user::Model>::new()])
                .into_connection(),
        );
        let service = build_service(&db);

        let input = LoginInput {
            identifier: "tidak-ada@example.com".to_string(),
            password: "rahasia-123".to_string(),
        };

        let result = service.login(input).await;
        assert!(matches!(result, Err(AppError::Unauthorized)));
    }

    #[tokio::test]
    async fn test_login_wrong_password_rejected() {
        let user = mock_user(1, "rahasia-123");

        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[user]])
                .into_connection(),
        );
        let service = build_service(&db);

        let input = LoginInput {
            identifier: "siti@example.com".to_string(),
            password: "salah-total".to_string(),
        };

        let result = service.login(input).await;
        assert!(matches!(result, Err(AppError::Unauthorized)));
    }

    #[tokio::test]
    async fn test_login_issues_token() {
        let user = mock_user(1, "rahasia-123");

        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[user]])
                .into_connection(),
        );
        let service = build_service(&db);

        let input = LoginInput {
            identifier: "siti@example.com".to_string(),
            password: "rahasia-123".to_string(),
        };

        let response = service.login(input).await.unwrap();
        assert!(!response.token.is_empty());

        let claims = pedika_common::verify_token(&response.token, "test-secret").unwrap();
        assert_eq!(claims.sub, 1);
        assert_eq!(claims.role, pedika_common::Role::Masyarakat);
    }

    #[tokio::test]
    async fn test_authenticate_token_resolves_user() {
        let user = mock_user(1, "rahasia-123");

        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[user]])
                .into_connection(),
        );
        let service = build_service(&db);

        let token =
            create_token(1, pedika_common::Role::Masyarakat, "test-secret", 24).unwrap();
        let resolved = service.authenticate_token(&token).await.unwrap();
        assert_eq!(resolved.id, 1);
    }

    #[tokio::test]
    async fn test_authenticate_token_rejects_deleted_account() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([Vec::<user::Model>::new()])
                .into_connection(),
        );
        let service = build_service(&db);

        let token =
            create_token(42, pedika_common::Role::Masyarakat, "test-secret", 24).unwrap();
        let result = service.authenticate_token(&token).await;
        assert!(matches!(result, Err(AppError::Unauthorized)));
    }

    #[tokio::test]
    async fn test_authenticate_token_rejects_garbage() {
        let db = Arc::new(MockDatabase::new(DatabaseBackend::Postgres).into_connection());
        let service = build_service(&db);

        let result = service.authenticate_token("not.a.token").await;
        assert!(matches!(result, Err(AppError::Unauthorized)));
    }

    #[tokio::test]
    async fn test_change_password_requires_current() {
        let user = mock_user(1, "rahasia-123");

        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[user]])
                .into_connection(),
        );
        let service = build_service(&db);

        let input = ChangePasswordInput {
            current_password: "salah-total".to_string(),
            new_password: "rahasia-baru-456".to_string(),
        };

        let result = service.change_password(1, input).await;
        assert!(matches!(result, Err(AppError::BadRequest(_))));
    }
}
