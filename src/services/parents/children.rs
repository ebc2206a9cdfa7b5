use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use crate::middlewares::RequireJWT;
use crate::models::assignments::requests::AssignmentListQuery;
use crate::models::courses::requests::CourseListQuery;
use crate::models::parents::responses::ChildrenListResponse;
use crate::models::users::entities::User;
use crate::models::{ApiResponse, ErrorCode};

use super::ParentService;

/// 家长查看自己名下的孩子
pub async fn handle_list_children(
    service: &ParentService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let current_user = match RequireJWT::extract_user_claims(request) {
        Some(user) => user,
        None => {
            return Ok(HttpResponse::Unauthorized().json(ApiResponse::error_empty(
                ErrorCode::Unauthorized,
                "Authentication required",
            )));
        }
    };

    match storage.list_children(current_user.id).await {
        Ok(items) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            ChildrenListResponse { items },
            "Children retrieved successfully",
        ))),
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("Failed to list children: {e}"),
            )),
        ),
    }
}

/// 家长只读查看孩子的课程
pub async fn handle_list_child_courses(
    service: &ParentService,
    student_id: i64,
    query: CourseListQuery,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let current_user = match require_own_child(service, student_id, request).await {
        Ok(user) => user,
        Err(response) => return Ok(response),
    };

    match storage.list_student_courses(student_id, query).await {
        Ok(response) => {
            tracing::debug!(
                "Parent {} viewed courses of child {}",
                current_user.id,
                student_id
            );
            Ok(HttpResponse::Ok().json(ApiResponse::success(
                response,
                "Courses retrieved successfully",
            )))
        }
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("Failed to list courses: {e}"),
            )),
        ),
    }
}

/// 家长只读查看孩子的作业
pub async fn handle_list_child_assignments(
    service: &ParentService,
    student_id: i64,
    query: AssignmentListQuery,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    if let Err(response) = require_own_child(service, student_id, request).await {
        return Ok(response);
    }

    match storage.list_student_assignments(student_id, query).await {
        Ok(response) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            response,
            "Assignments retrieved successfully",
        ))),
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("Failed to list assignments: {e}"),
            )),
        ),
    }
}

/// 确认目标学生确实是当前家长的孩子
async fn require_own_child(
    service: &ParentService,
    student_id: i64,
    request: &HttpRequest,
) -> Result<User, HttpResponse> {
    let storage = service.get_storage(request);

    let current_user = match RequireJWT::extract_user_claims(request) {
        Some(user) => user,
        None => {
            return Err(HttpResponse::Unauthorized().json(ApiResponse::error_empty(
                ErrorCode::Unauthorized,
                "Authentication required",
            )));
        }
    };

    match storage.is_child_of(current_user.id, student_id).await {
        Ok(true) => Ok(current_user),
        Ok(false) => Err(HttpResponse::Forbidden().json(ApiResponse::error_empty(
            ErrorCode::ChildNotLinked,
            "This student is not linked to your account",
        ))),
        Err(e) => Err(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("Failed to check parent link: {e}"),
            )),
        ),
    }
}
