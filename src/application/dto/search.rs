use serde::{Deserialize, Serialize};

use super::content::ContentDto;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResultsDto {
    pub query: String,
    pub articles: Vec<ContentDto>,
    pub poems: Vec<ContentDto>,
    pub total: usize,
}
