use super::ContentCommandService;
use crate::{
    application::{
        dto::CounterDto,
        error::{ApplicationError, ApplicationResult},
    },
    domain::content::{ContentKind, Counter},
};

pub struct RecordEngagementCommand {
    pub kind: ContentKind,
    pub id: i64,
    pub counter: Counter,
}

impl ContentCommandService {
    /// Anonymous view/like/share counters. Drafts are invisible here.
    pub async fn record_engagement(
        &self,
        command: RecordEngagementCommand,
    ) -> ApplicationResult<CounterDto> {
        let item = self.load(command.kind, command.id).await?;
        if !item.published {
            return Err(ApplicationError::not_found(format!(
                "{} not found",
                command.kind
            )));
        }
        let count = self
            .write_repo
            .increment(command.kind, item.id, command.counter)
            .await?;
        Ok(CounterDto { count })
    }
}
