use super::ContentCommandService;
use crate::{
    application::{
        dto::AuthenticatedUser,
        editor::AuthorRef,
        error::{ApplicationError, ApplicationResult},
    },
    domain::user::{NewUser, UserId, UserName},
};

impl ContentCommandService {
    /// Maps the editor's author field to a user id. A typed byline that does
    /// not match an existing user creates an author account in the same
    /// statement.
    pub(super) async fn resolve_author(
        &self,
        actor: &AuthenticatedUser,
        author: Option<AuthorRef>,
    ) -> ApplicationResult<UserId> {
        match author {
            None => Ok(actor.id),
            Some(AuthorRef::Id(raw)) => {
                let id = UserId::new(raw)?;
                self.user_repo
                    .find_by_id(id)
                    .await?
                    .map(|user| user.id)
                    .ok_or_else(|| ApplicationError::validation(format!("author {raw} does not exist")))
            }
            Some(AuthorRef::Name(name)) => {
                let name = UserName::new(name)?;
                let user = self
                    .user_repo
                    .find_or_create_by_name(NewUser::author(name, self.clock.now()))
                    .await?;
                Ok(user.id)
            }
        }
    }
}
