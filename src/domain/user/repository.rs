use crate::domain::errors::DomainResult;
use crate::domain::user::{
    entity::{NewUser, User, UserUpdate},
    value_objects::{Email, UserId, UserName},
};
use async_trait::async_trait;

#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn count(&self) -> DomainResult<u64>;

    async fn insert(&self, new_user: NewUser) -> DomainResult<User>;

    async fn find_by_id(&self, id: UserId) -> DomainResult<Option<User>>;

    async fn find_by_email(&self, email: &Email) -> DomainResult<Option<User>>;

    /// Returns the user with `new_user.name`, inserting it when absent. Must be
    /// a single atomic operation so concurrent callers with the same new name
    /// end up with one row.
    async fn find_or_create_by_name(&self, new_user: NewUser) -> DomainResult<User>;

    async fn update(&self, update: UserUpdate) -> DomainResult<User>;

    async fn delete(&self, id: UserId) -> DomainResult<()>;

    async fn list(&self, search: Option<&str>) -> DomainResult<Vec<User>>;

    async fn find_by_name(&self, name: &UserName) -> DomainResult<Option<User>>;
}
