use super::UserCommandService;
use crate::{
    application::{
        capability::ensure_capability,
        dto::AuthenticatedUser,
        error::{ApplicationError, ApplicationResult},
    },
    domain::{
        content::{ContentFilter, ContentKind, StatusFilter},
        user::UserId,
    },
};

impl UserCommandService {
    pub async fn delete_user(&self, actor: &AuthenticatedUser, id: i64) -> ApplicationResult<()> {
        ensure_capability(actor, "users", "manage")?;
        let user_id = UserId::new(id)?;
        if actor.id == user_id {
            return Err(ApplicationError::conflict("you cannot delete your own account"));
        }
        if self.user_repo.find_by_id(user_id).await?.is_none() {
            return Err(ApplicationError::not_found("user not found"));
        }

        let filter = ContentFilter {
            status: StatusFilter::All,
            author_id: Some(user_id),
            ..ContentFilter::default()
        };
        for kind in ContentKind::ALL {
            if self.content_repo.count(kind, &filter).await? > 0 {
                return Err(ApplicationError::conflict(format!(
                    "user still authors {}; reassign or delete them first",
                    kind.plural()
                )));
            }
        }

        self.user_repo.delete(user_id).await?;
        tracing::info!(user_id = id, "user deleted");
        Ok(())
    }
}
