//! Learn-tab content endpoints (static article library).

use axum::extract::Path;
use axum::Json;

use crate::api::error::ApiError;
use crate::content::{self, Article, ArticleSummary};

/// `GET /api/content` — article index.
pub async fn index() -> Json<Vec<ArticleSummary>> {
    Json(content::article_index())
}

/// `GET /api/content/:slug` — one article.
pub async fn article(Path(slug): Path<String>) -> Result<Json<Article>, ApiError> {
    content::article_by_slug(&slug)
        .map(Json)
        .ok_or_else(|| ApiError::NotFound(format!("Article {slug}")))
}
