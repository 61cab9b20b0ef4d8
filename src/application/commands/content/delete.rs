use super::ContentCommandService;
use crate::{
    application::{
        capability::ensure_capability, dto::AuthenticatedUser, error::ApplicationResult,
    },
    domain::content::ContentKind,
};

impl ContentCommandService {
    pub async fn delete_content(
        &self,
        actor: &AuthenticatedUser,
        kind: ContentKind,
        id: i64,
    ) -> ApplicationResult<()> {
        ensure_capability(actor, "content", "delete")?;
        let item = self.load(kind, id).await?;
        self.write_repo.delete(kind, item.id).await?;
        tracing::info!(kind = %kind, id, "content deleted");
        Ok(())
    }
}
