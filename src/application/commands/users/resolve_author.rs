use super::UserCommandService;
use crate::{
    application::{
        capability::ensure_capability,
        dto::{AuthenticatedUser, UserDto},
        error::ApplicationResult,
    },
    domain::user::{NewUser, UserName},
};

pub struct ResolveAuthorCommand {
    pub name: String,
}

impl UserCommandService {
    /// Returns the user with this display name, creating an author byline
    /// when there is none. Concurrent calls with the same new name yield the
    /// same user.
    pub async fn resolve_author(
        &self,
        actor: &AuthenticatedUser,
        command: ResolveAuthorCommand,
    ) -> ApplicationResult<UserDto> {
        ensure_capability(actor, "content", "create")?;
        let name = UserName::new(command.name)?;
        let user = self
            .user_repo
            .find_or_create_by_name(NewUser::author(name, self.clock.now()))
            .await?;
        Ok(user.into())
    }
}
