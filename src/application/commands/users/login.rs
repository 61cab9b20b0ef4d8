use super::UserCommandService;
use crate::{
    application::{
        dto::{LoginResponseDto, TokenSubject},
        error::{ApplicationError, ApplicationResult},
    },
    domain::user::{Email, User},
};

pub struct LoginCommand {
    pub email: String,
    pub password: String,
}

impl UserCommandService {
    pub async fn login(&self, command: LoginCommand) -> ApplicationResult<LoginResponseDto> {
        let user = self
            .find_and_authenticate_user(&command.email, &command.password)
            .await?;

        let subject = TokenSubject {
            user_id: user.id,
            name: user.name.to_string(),
            role: user.role,
            capabilities: user.role.default_capabilities(),
        };
        let token = self.token_manager.issue(subject).await?;
        tracing::info!(user_id = user.id.0, "user signed in");

        Ok(LoginResponseDto {
            token,
            user: user.into(),
        })
    }

    async fn find_and_authenticate_user(
        &self,
        email: &str,
        password: &str,
    ) -> ApplicationResult<User> {
        let invalid = || ApplicationError::unauthorized("invalid credentials");
        let email = Email::new(email).map_err(|_| invalid())?;
        let user = self
            .user_repo
            .find_by_email(&email)
            .await?
            .ok_or_else(invalid)?;

        let hash = user.password_hash.as_ref().ok_or_else(invalid)?;
        self.password_hasher.verify(password, hash.as_str()).await?;
        Ok(user)
    }
}
