use super::{UserCommandService, password::validate_password};
use crate::{
    application::{
        capability::require_capability,
        dto::{AuthenticatedUser, UserDto},
        error::{ApplicationError, ApplicationResult},
    },
    domain::{
        errors::non_blank,
        user::{Email, NewUser, PasswordHash, Role, UserName},
    },
};

pub struct CreateUserCommand {
    pub name: String,
    pub email: Option<String>,
    pub password: Option<String>,
    pub role: Option<Role>,
    pub bio: Option<String>,
}

impl UserCommandService {
    /// The first account is open to anyone and becomes an admin; later
    /// accounts need `users:manage`.
    pub async fn create_user(
        &self,
        actor: Option<&AuthenticatedUser>,
        command: CreateUserCommand,
    ) -> ApplicationResult<UserDto> {
        let name = UserName::new(command.name)?;
        let email = non_blank(command.email).map(Email::new).transpose()?;
        let existing = self.user_repo.count().await?;

        let role = if existing == 0 {
            if email.is_none() || command.password.is_none() {
                return Err(ApplicationError::validation(
                    "the first account needs an email and a password",
                ));
            }
            Role::Admin
        } else {
            require_capability(actor, "users", "manage")?;
            command.role.unwrap_or_default()
        };

        self.ensure_available(&name, email.as_ref()).await?;

        let password_hash = match command.password {
            Some(password) => {
                if email.is_none() {
                    return Err(ApplicationError::validation(
                        "an account with a password needs an email",
                    ));
                }
                validate_password(&password)?;
                Some(PasswordHash::new(self.password_hasher.hash(&password).await?)?)
            }
            None => None,
        };

        let new_user = NewUser {
            name,
            email,
            role,
            bio: non_blank(command.bio),
            password_hash,
            created_at: self.clock.now(),
        };
        let user = self.user_repo.insert(new_user).await?;
        tracing::info!(user_id = user.id.0, role = %user.role, "user created");
        Ok(user.into())
    }

    pub(super) async fn ensure_available(
        &self,
        name: &UserName,
        email: Option<&Email>,
    ) -> ApplicationResult<()> {
        if self.user_repo.find_by_name(name).await?.is_some() {
            return Err(ApplicationError::conflict("a user with this name already exists"));
        }
        if let Some(email) = email {
            if self.user_repo.find_by_email(email).await?.is_some() {
                return Err(ApplicationError::conflict(
                    "a user with this email already exists",
                ));
            }
        }
        Ok(())
    }
}
