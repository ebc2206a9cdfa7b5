use actix_web::HttpResponse;

use crate::models::{ApiResponse, ErrorCode};

pub mod assignments;
pub mod auth;
pub mod courses;
pub mod notifications;
pub mod parents;
pub mod submissions;
pub mod users;

pub use assignments::configure_assignments_routes;
pub use auth::configure_auth_routes;
pub use courses::configure_courses_routes;
pub use notifications::configure_notifications_routes;
pub use parents::configure_parents_routes;
pub use submissions::configure_submissions_routes;
pub use users::configure_user_routes;

/// 未匹配到任何路由时的兜底 404
pub async fn not_found() -> HttpResponse {
    HttpResponse::NotFound().json(ApiResponse::error_empty(
        ErrorCode::NotFound,
        "Resource not found",
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::http::StatusCode;

    #[actix_web::test]
    async fn test_not_found_fallback() {
        let response = not_found().await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
