use super::{UserCommandService, password::validate_password};
use crate::{
    application::{
        capability::ensure_capability,
        dto::{AuthenticatedUser, UserDto},
        error::{ApplicationError, ApplicationResult},
    },
    domain::{
        errors::non_blank,
        user::{Email, PasswordHash, Role, UserId, UserName, UserUpdate},
    },
};

#[derive(Default)]
pub struct UpdateUserCommand {
    pub user_id: i64,
    pub name: Option<String>,
    pub email: Option<Option<String>>,
    pub role: Option<Role>,
    pub bio: Option<Option<String>>,
    pub password: Option<String>,
}

impl UserCommandService {
    /// Users may edit their own profile; everything else and any role change
    /// needs `users:manage`.
    pub async fn update_user(
        &self,
        actor: &AuthenticatedUser,
        command: UpdateUserCommand,
    ) -> ApplicationResult<UserDto> {
        let user_id = UserId::new(command.user_id)?;
        if actor.id != user_id || command.role.is_some() {
            ensure_capability(actor, "users", "manage")?;
        }

        let current = self
            .user_repo
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| ApplicationError::not_found("user not found"))?;

        let mut update = UserUpdate::new(user_id, self.clock.now());
        let mut changed = false;

        if let Some(name) = command.name {
            let name = UserName::new(name)?;
            if name != current.name {
                if self.user_repo.find_by_name(&name).await?.is_some() {
                    return Err(ApplicationError::conflict(
                        "a user with this name already exists",
                    ));
                }
                update = update.with_name(name);
                changed = true;
            }
        }
        if let Some(email) = command.email {
            let email = non_blank(email).map(Email::new).transpose()?;
            update = update.with_email(email);
            changed = true;
        }
        if let Some(role) = command.role {
            update = update.with_role(role);
            changed = true;
        }
        if let Some(bio) = command.bio {
            update = update.with_bio(non_blank(bio));
            changed = true;
        }
        if let Some(password) = command.password {
            validate_password(&password)?;
            let hash = PasswordHash::new(self.password_hasher.hash(&password).await?)?;
            update = update.with_password_hash(hash);
            changed = true;
        }

        if !changed {
            return Err(ApplicationError::validation(
                "at least one field must be provided",
            ));
        }

        let user = self.user_repo.update(update).await?;
        Ok(user.into())
    }
}
