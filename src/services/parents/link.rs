use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use crate::models::users::entities::UserRole;
use crate::models::{ApiResponse, ErrorCode};

use super::ParentService;

/// 绑定家长与学生（仅管理员路由可达）
pub async fn handle_link_child(
    service: &ParentService,
    parent_id: i64,
    student_id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    // 两端都要存在
    match storage.get_user_by_id(UserRole::Parent, parent_id).await {
        Ok(Some(_)) => {}
        Ok(None) => {
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::UserNotFound,
                "Parent not found",
            )));
        }
        Err(e) => {
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("Failed to look up parent: {e}"),
                )),
            );
        }
    }
    match storage.get_user_by_id(UserRole::Student, student_id).await {
        Ok(Some(_)) => {}
        Ok(None) => {
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::UserNotFound,
                "Student not found",
            )));
        }
        Err(e) => {
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("Failed to look up student: {e}"),
                )),
            );
        }
    }

    match storage.link_child(parent_id, student_id).await {
        Ok(true) => {
            tracing::info!("Parent {} linked to student {}", parent_id, student_id);
            Ok(HttpResponse::Ok().json(ApiResponse::<()>::success_empty(
                "Child linked successfully",
            )))
        }
        Ok(false) => Ok(HttpResponse::Conflict().json(ApiResponse::error_empty(
            ErrorCode::ChildAlreadyLinked,
            "This child is already linked to the parent",
        ))),
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("Failed to link child: {e}"),
            )),
        ),
    }
}

pub async fn handle_unlink_child(
    service: &ParentService,
    parent_id: i64,
    student_id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.unlink_child(parent_id, student_id).await {
        Ok(true) => {
            tracing::info!("Parent {} unlinked from student {}", parent_id, student_id);
            Ok(HttpResponse::Ok().json(ApiResponse::<()>::success_empty(
                "Child unlinked successfully",
            )))
        }
        Ok(false) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::ChildNotLinked,
            "This child is not linked to the parent",
        ))),
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("Failed to unlink child: {e}"),
            )),
        ),
    }
}
