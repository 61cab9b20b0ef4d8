use crate::application::{
    dto::AuthenticatedUser,
    error::{ApplicationError, ApplicationResult},
};

pub fn ensure_capability(
    actor: &AuthenticatedUser,
    resource: &str,
    action: &str,
) -> ApplicationResult<()> {
    if actor.has_capability(resource, action) {
        Ok(())
    } else {
        Err(ApplicationError::forbidden(format!(
            "missing capability {resource}:{action}"
        )))
    }
}

/// Same as [`ensure_capability`] for endpoints that also accept anonymous
/// callers.
pub fn require_capability(
    actor: Option<&AuthenticatedUser>,
    resource: &str,
    action: &str,
) -> ApplicationResult<()> {
    let actor = actor.ok_or_else(|| ApplicationError::unauthorized("authentication required"))?;
    ensure_capability(actor, resource, action)
}

pub fn can(actor: Option<&AuthenticatedUser>, resource: &str, action: &str) -> bool {
    actor.is_some_and(|a| a.has_capability(resource, action))
}
