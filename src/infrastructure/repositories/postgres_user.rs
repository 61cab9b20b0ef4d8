// src/infrastructure/repositories/postgres_user.rs
use super::{
    error::{is_foreign_key_violation, like_pattern},
    map_sqlx,
};
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::user::{
    Email, NewUser, PasswordHash, Role, User, UserId, UserName, UserRepository, UserUpdate,
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool, Postgres, QueryBuilder};

const COLUMNS: &str = "id, name, email, role, bio, password_hash, created_at, updated_at";

#[derive(Clone)]
pub struct PostgresUserRepository {
    pool: PgPool,
}

impl PostgresUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn find_one(&self, column: &str, value: &str) -> DomainResult<Option<User>> {
        let sql = format!("SELECT {COLUMNS} FROM users WHERE {column} = $1");
        let row = sqlx::query_as::<_, UserRow>(&sql)
            .bind(value)
            .fetch_optional(&self.pool)
            .await
            .map_err(map_sqlx)?;

        row.map(User::try_from).transpose()
    }
}

#[derive(Debug, FromRow)]
struct UserRow {
    id: i64,
    name: String,
    email: Option<String>,
    role: String,
    bio: Option<String>,
    password_hash: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<UserRow> for User {
    type Error = DomainError;

    fn try_from(row: UserRow) -> Result<Self, Self::Error> {
        Ok(User {
            id: UserId::new(row.id)?,
            name: UserName::new(row.name)?,
            email: row.email.map(Email::new).transpose()?,
            role: row.role.parse::<Role>()?,
            bio: row.bio,
            password_hash: row.password_hash.map(PasswordHash::new).transpose()?,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn count(&self) -> DomainResult<u64> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(1) FROM users")
            .fetch_one(&self.pool)
            .await
            .map(|count| u64::try_from(count).unwrap_or_default())
            .map_err(map_sqlx)
    }

    async fn insert(&self, new_user: NewUser) -> DomainResult<User> {
        let NewUser {
            name,
            email,
            role,
            bio,
            password_hash,
            created_at,
        } = new_user;

        let sql = format!(
            "INSERT INTO users (name, email, role, bio, password_hash, created_at, updated_at)
             VALUES ($1, $2, $3, $4, $5, $6, $6)
             RETURNING {COLUMNS}"
        );
        let row = sqlx::query_as::<_, UserRow>(&sql)
            .bind(name.as_str())
            .bind(email.as_ref().map(Email::as_str))
            .bind(role.as_str())
            .bind(bio)
            .bind(password_hash.as_ref().map(PasswordHash::as_str))
            .bind(created_at)
            .fetch_one(&self.pool)
            .await
            .map_err(map_sqlx)?;

        User::try_from(row)
    }

    async fn find_by_id(&self, id: UserId) -> DomainResult<Option<User>> {
        let sql = format!("SELECT {COLUMNS} FROM users WHERE id = $1");
        let row = sqlx::query_as::<_, UserRow>(&sql)
            .bind(i64::from(id))
            .fetch_optional(&self.pool)
            .await
            .map_err(map_sqlx)?;

        row.map(User::try_from).transpose()
    }

    async fn find_by_email(&self, email: &Email) -> DomainResult<Option<User>> {
        self.find_one("email", email.as_str()).await
    }

    async fn find_by_name(&self, name: &UserName) -> DomainResult<Option<User>> {
        self.find_one("name", name.as_str()).await
    }

    /// The no-op `DO UPDATE` makes `RETURNING` yield the existing row on
    /// conflict, so concurrent callers all get the same user.
    async fn find_or_create_by_name(&self, new_user: NewUser) -> DomainResult<User> {
        let sql = format!(
            "INSERT INTO users (name, email, role, bio, password_hash, created_at, updated_at)
             VALUES ($1, $2, $3, $4, $5, $6, $6)
             ON CONFLICT (name) DO UPDATE SET name = EXCLUDED.name
             RETURNING {COLUMNS}"
        );
        let row = sqlx::query_as::<_, UserRow>(&sql)
            .bind(new_user.name.as_str())
            .bind(new_user.email.as_ref().map(Email::as_str))
            .bind(new_user.role.as_str())
            .bind(new_user.bio)
            .bind(new_user.password_hash.as_ref().map(PasswordHash::as_str))
            .bind(new_user.created_at)
            .fetch_one(&self.pool)
            .await
            .map_err(map_sqlx)?;

        User::try_from(row)
    }

    async fn update(&self, update: UserUpdate) -> DomainResult<User> {
        let UserUpdate {
            id,
            name,
            email,
            role,
            bio,
            password_hash,
            updated_at,
        } = update;

        let mut builder: QueryBuilder<Postgres> =
            QueryBuilder::new("UPDATE users SET updated_at = ");
        builder.push_bind(updated_at);

        if let Some(name) = name {
            builder.push(", name = ");
            builder.push_bind(String::from(name));
        }
        if let Some(email) = email {
            builder.push(", email = ");
            builder.push_bind(email.map(String::from));
        }
        if let Some(role) = role {
            builder.push(", role = ");
            builder.push_bind(role.as_str());
        }
        if let Some(bio) = bio {
            builder.push(", bio = ");
            builder.push_bind(bio);
        }
        if let Some(hash) = password_hash {
            builder.push(", password_hash = ");
            builder.push_bind(hash.as_str().to_string());
        }

        builder.push(" WHERE id = ");
        builder.push_bind(i64::from(id));
        builder.push(" RETURNING ");
        builder.push(COLUMNS);

        let row = builder
            .build_query_as::<UserRow>()
            .fetch_optional(&self.pool)
            .await
            .map_err(map_sqlx)?
            .ok_or_else(|| DomainError::NotFound("user not found".into()))?;

        User::try_from(row)
    }

    async fn delete(&self, id: UserId) -> DomainResult<()> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(i64::from(id))
            .execute(&self.pool)
            .await
            .map_err(|err| {
                if is_foreign_key_violation(&err) {
                    DomainError::Conflict("user still authors content".into())
                } else {
                    map_sqlx(err)
                }
            })?;
        if result.rows_affected() == 0 {
            return Err(DomainError::NotFound("user not found".into()));
        }
        Ok(())
    }

    async fn list(&self, search: Option<&str>) -> DomainResult<Vec<User>> {
        let mut builder: QueryBuilder<Postgres> = QueryBuilder::new("SELECT ");
        builder.push(COLUMNS);
        builder.push(" FROM users");
        if let Some(term) = search.map(str::trim).filter(|s| !s.is_empty()) {
            let pattern = like_pattern(term);
            builder.push(" WHERE name ILIKE ");
            builder.push_bind(pattern.clone());
            builder.push(" OR email ILIKE ");
            builder.push_bind(pattern);
        }
        builder.push(" ORDER BY name ASC");

        let rows = builder
            .build_query_as::<UserRow>()
            .fetch_all(&self.pool)
            .await
            .map_err(map_sqlx)?;

        rows.into_iter().map(User::try_from).collect()
    }
}
