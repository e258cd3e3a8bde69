use std::collections::BTreeSet;

use async_trait::async_trait;
use auth::Role;
use sqlx::FromRow;
use sqlx::PgPool;

use crate::domain::user::models::NewUser;
use crate::domain::user::models::User;
use crate::domain::user::models::Username;
use crate::domain::user::ports::CredentialStore;
use crate::user::errors::AuthError;

const USERS_PRIMARY_KEY: &str = "users_pkey";

pub struct PostgresCredentialStore {
    pool: PgPool,
}

impl PostgresCredentialStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct UserRow {
    username: String,
    password_hash: String,
    enabled: bool,
}

impl TryFrom<UserRow> for User {
    type Error = AuthError;

    fn try_from(row: UserRow) -> Result<Self, Self::Error> {
        // Stored rows were validated on insert; failing now is corruption
        let username = Username::new(row.username)
            .map_err(|e| AuthError::DatabaseError(format!("Corrupt stored username: {}", e)))?;

        Ok(User {
            username,
            password_hash: row.password_hash,
            enabled: row.enabled,
        })
    }
}

fn parse_stored_roles(rows: Vec<String>) -> Result<BTreeSet<Role>, AuthError> {
    rows.into_iter()
        .map(|role| {
            Role::new(role)
                .map_err(|e| AuthError::DatabaseError(format!("Corrupt stored role: {}", e)))
        })
        .collect()
}

fn database_error(e: sqlx::Error) -> AuthError {
    AuthError::DatabaseError(e.to_string())
}

#[async_trait]
impl CredentialStore for PostgresCredentialStore {
    async fn exists_user(&self, username: &Username) -> Result<bool, AuthError> {
        sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM users WHERE username = $1)")
            .bind(username.as_str())
            .fetch_one(&self.pool)
            .await
            .map_err(database_error)
    }

    async fn get_user(&self, username: &Username) -> Result<Option<User>, AuthError> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT username, password_hash, enabled
            FROM users
            WHERE username = $1
            "#,
        )
        .bind(username.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(database_error)?;

        row.map(User::try_from).transpose()
    }

    async fn get_roles(&self, username: &Username) -> Result<BTreeSet<Role>, AuthError> {
        let rows = sqlx::query_scalar::<_, String>(
            r#"
            SELECT role
            FROM user_roles
            WHERE username = $1
            "#,
        )
        .bind(username.as_str())
        .fetch_all(&self.pool)
        .await
        .map_err(database_error)?;

        parse_stored_roles(rows)
    }

    async fn save_user(&self, user: NewUser) -> Result<(), AuthError> {
        let mut tx = self.pool.begin().await.map_err(database_error)?;

        sqlx::query(
            r#"
            INSERT INTO users (username, password_hash)
            VALUES ($1, $2)
            "#,
        )
        .bind(user.username.as_str())
        .bind(&user.password_hash)
        .execute(&mut *tx)
        .await
        .map_err(|e| {
            if let Some(db_err) = e.as_database_error() {
                if db_err.is_unique_violation() && db_err.constraint() == Some(USERS_PRIMARY_KEY)
                {
                    return AuthError::UserAlreadyExists(user.username.to_string());
                }
            }
            database_error(e)
        })?;

        for role in &user.roles {
            sqlx::query(
                r#"
                INSERT INTO user_roles (username, role)
                VALUES ($1, $2)
                "#,
            )
            .bind(user.username.as_str())
            .bind(role.as_str())
            .execute(&mut *tx)
            .await
            .map_err(database_error)?;
        }

        tx.commit().await.map_err(database_error)?;

        Ok(())
    }
}
