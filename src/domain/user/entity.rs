// src/domain/user/entity.rs
use crate::domain::user::value_objects::{Email, PasswordHash, Role, UserId, UserName};
use chrono::{DateTime, Utc};

#[derive(Debug, Clone)]
pub struct User {
    pub id: UserId,
    pub name: UserName,
    pub email: Option<Email>,
    pub role: Role,
    pub bio: Option<String>,
    pub password_hash: Option<PasswordHash>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Bylines created from the editor have no password and cannot sign in.
    pub fn can_sign_in(&self) -> bool {
        self.password_hash.is_some() && self.email.is_some()
    }
}

#[derive(Debug, Clone)]
pub struct NewUser {
    pub name: UserName,
    pub email: Option<Email>,
    pub role: Role,
    pub bio: Option<String>,
    pub password_hash: Option<PasswordHash>,
    pub created_at: DateTime<Utc>,
}

impl NewUser {
    pub fn author(name: UserName, created_at: DateTime<Utc>) -> Self {
        Self {
            name,
            email: None,
            role: Role::Author,
            bio: None,
            password_hash: None,
            created_at,
        }
    }
}

#[derive(Debug, Clone)]
pub struct UserUpdate {
    pub id: UserId,
    pub name: Option<UserName>,
    pub email: Option<Option<Email>>,
    pub role: Option<Role>,
    pub bio: Option<Option<String>>,
    pub password_hash: Option<PasswordHash>,
    pub updated_at: DateTime<Utc>,
}

impl UserUpdate {
    pub fn new(id: UserId, updated_at: DateTime<Utc>) -> Self {
        Self {
            id,
            name: None,
            email: None,
            role: None,
            bio: None,
            password_hash: None,
            updated_at,
        }
    }

    pub fn with_name(mut self, name: UserName) -> Self {
        self.name = Some(name);
        self
    }

    pub fn with_email(mut self, email: Option<Email>) -> Self {
        self.email = Some(email);
        self
    }

    pub fn with_role(mut self, role: Role) -> Self {
        self.role = Some(role);
        self
    }

    pub fn with_bio(mut self, bio: Option<String>) -> Self {
        self.bio = Some(bio);
        self
    }

    pub fn with_password_hash(mut self, password_hash: PasswordHash) -> Self {
        self.password_hash = Some(password_hash);
        self
    }
}
