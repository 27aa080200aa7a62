// src/services/user_service.rs
use crate::{
    error::{AppError, AppResult},
    models::user::{Role, User, UserSummary},
    services::auth_service,
};
use chrono::Utc;
use sqlx::SqlitePool;
use uuid::Uuid;

// (id, username, name, password, role)
const DEMO_USERS: &[(&str, &str, &str, &str, Role)] = &[
    ("u_abhinav", "abhinav", "Abhinav", "abhinav123", Role::Student),
    ("u_astitva", "astitva", "Astitva", "astitva123", Role::Student),
    ("u_harsh", "harsh", "Harsh", "harsh123", Role::Student),
    ("u_admin", "admin", "Administrator", "admin123", Role::Admin),
];

pub async fn find_user_by_username(db_pool: &SqlitePool, username: &str) -> AppResult<Option<User>> {
    tracing::debug!("Looking up user by username: {}", username);
    let user = sqlx::query_as::<_, User>(
        r#"
        SELECT id, username, name, password_hash, role, created_at
        FROM users
        WHERE username = ?1
        "#,
    )
    .bind(username)
    .fetch_optional(db_pool)
    .await?;

    if user.is_none() {
        tracing::debug!("User '{}' not found.", username);
    }
    Ok(user)
}

/// All users without their password digests, ordered by username.
pub async fn find_all_users(db_pool: &SqlitePool) -> AppResult<Vec<UserSummary>> {
    tracing::debug!("Listing all users...");
    let users = sqlx::query_as::<_, UserSummary>(
        r#"
        SELECT id, username, name, role, created_at
        FROM users
        ORDER BY username ASC
        "#,
    )
    .fetch_all(db_pool)
    .await?;
    tracing::debug!("Found {} users.", users.len());
    Ok(users)
}

/// Inserts a new user with a bcrypt digest of `raw_password`.
/// A taken username is reported as `Conflict` and leaves the table untouched.
pub async fn create_user(
    db_pool: &SqlitePool,
    id: Option<&str>,
    username: &str,
    name: &str,
    raw_password: &str,
    role: Role,
    bcrypt_cost: u32,
) -> AppResult<User> {
    tracing::info!("Creating user: {}", username);

    if find_user_by_username(db_pool, username).await?.is_some() {
        tracing::warn!("Cannot create user: username '{}' already exists.", username);
        return Err(AppError::Conflict("username already exists".into()));
    }

    let password_hash = auth_service::hash_password(raw_password, bcrypt_cost).await?;
    let user = User {
        id: id.map(str::to_string).unwrap_or_else(|| Uuid::new_v4().to_string()),
        username: username.to_string(),
        name: name.to_string(),
        password_hash,
        role,
        created_at: Utc::now(),
    };

    let insert = sqlx::query(
        r#"
        INSERT INTO users (id, username, name, password_hash, role, created_at)
        VALUES (?1, ?2, ?3, ?4, ?5, ?6)
        "#,
    )
    .bind(&user.id)
    .bind(&user.username)
    .bind(&user.name)
    .bind(&user.password_hash)
    .bind(user.role)
    .bind(user.created_at)
    .execute(db_pool)
    .await;

    // Another request may have taken the name between the lookup and the insert.
    if let Err(sqlx::Error::Database(db_err)) = &insert {
        if db_err.is_unique_violation() {
            tracing::warn!("Cannot create user: username '{}' already exists.", username);
            return Err(AppError::Conflict("username already exists".into()));
        }
    }
    insert?;

    tracing::info!("✅ User '{}' created with id {}.", user.username, user.id);
    Ok(user)
}

/// Inserts the demo accounts whose usernames are not taken yet. Existing rows
/// are never modified or removed. Returns how many accounts were added.
pub async fn seed_demo_users(db_pool: &SqlitePool, bcrypt_cost: u32) -> AppResult<usize> {
    let mut created = 0;
    for &(id, username, name, password, role) in DEMO_USERS {
        if find_user_by_username(db_pool, username).await?.is_some() {
            continue;
        }
        match create_user(db_pool, Some(id), username, name, password, role, bcrypt_cost).await {
            Ok(_) => created += 1,
            Err(AppError::Conflict(_)) => {}
            Err(e) => return Err(e),
        }
    }
    tracing::info!("🌱 Demo seeding added {} user(s).", created);
    Ok(created)
}
