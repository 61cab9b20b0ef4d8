// src/presentation/http/controllers/categories.rs
use crate::application::dto::CategoryDto;
use crate::domain::content::Category;
use crate::presentation::http::response::ApiResponse;

pub async fn list_categories() -> ApiResponse<Vec<CategoryDto>> {
    ApiResponse::ok(Category::ALL.into_iter().map(CategoryDto::from).collect())
}
