// src/application/queries/users.rs
use crate::{
    application::{
        capability::ensure_capability,
        dto::{AuthenticatedUser, UserDto, UserProfileDto},
        error::{ApplicationError, ApplicationResult},
        ports::time::Clock,
    },
    domain::{
        errors::non_blank,
        user::{UserId, UserRepository},
    },
};
use std::sync::Arc;

pub struct UserQueryService {
    user_repo: Arc<dyn UserRepository>,
    clock: Arc<dyn Clock>,
}

pub struct ListUsersQuery {
    pub q: Option<String>,
}

impl UserQueryService {
    pub fn new(user_repo: Arc<dyn UserRepository>, clock: Arc<dyn Clock>) -> Self {
        Self { user_repo, clock }
    }

    pub async fn get_profile(
        &self,
        actor: &AuthenticatedUser,
    ) -> ApplicationResult<UserProfileDto> {
        let user = self
            .user_repo
            .find_by_id(actor.id)
            .await?
            .ok_or_else(|| ApplicationError::not_found("user not found"))?;

        Ok(UserProfileDto::from_parts(user, actor, self.clock.now()))
    }

    pub async fn get_user(&self, actor: &AuthenticatedUser, id: i64) -> ApplicationResult<UserDto> {
        let user_id = UserId::new(id)?;
        if actor.id != user_id {
            ensure_capability(actor, "users", "manage")?;
        }
        self.user_repo
            .find_by_id(user_id)
            .await?
            .map(Into::into)
            .ok_or_else(|| ApplicationError::not_found("user not found"))
    }

    /// Editors need the author list to fill the byline picker, so
    /// `content:update` is enough to list users.
    pub async fn list_users(
        &self,
        actor: &AuthenticatedUser,
        query: ListUsersQuery,
    ) -> ApplicationResult<Vec<UserDto>> {
        if !actor.has_capability("content", "update") {
            ensure_capability(actor, "users", "manage")?;
        }

        let search = non_blank(query.q);
        let users = self.user_repo.list(search.as_deref()).await?;
        Ok(users.into_iter().map(Into::into).collect())
    }
}
