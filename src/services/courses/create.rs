use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use crate::middlewares::RequireJWT;
use crate::models::courses::requests::CreateCourseRequest;
use crate::models::courses::responses::CourseResponse;
use crate::models::users::entities::UserRole;
use crate::models::{ApiResponse, ErrorCode};

use super::CourseService;

/// 创建课程。教师只能给自己建课，管理员可通过 teacher_id 代任意教师建课。
pub async fn handle_create_course(
    service: &CourseService,
    course_data: CreateCourseRequest,
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

    let teacher_id = match current_user.role {
        UserRole::Teacher => current_user.id,
        UserRole::Admin => match course_data.teacher_id {
            Some(teacher_id) => teacher_id,
            None => {
                return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
                    ErrorCode::BadRequest,
                    "teacher_id is required when creating a course as admin",
                )));
            }
        },
        _ => {
            return Ok(HttpResponse::Forbidden().json(ApiResponse::error_empty(
                ErrorCode::Forbidden,
                "Only teachers and admins can create courses",
            )));
        }
    };

    // 确认教师存在
    match storage.get_user_by_id(UserRole::Teacher, teacher_id).await {
        Ok(Some(_)) => {}
        Ok(None) => {
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::UserNotFound,
                "Teacher not found",
            )));
        }
        Err(e) => {
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("Failed to look up teacher: {e}"),
                )),
            );
        }
    }

    match storage.create_course(teacher_id, course_data).await {
        Ok(course) => {
            tracing::info!("Course {} created for teacher {}", course.id, teacher_id);
            Ok(HttpResponse::Created().json(ApiResponse::success(
                CourseResponse { course },
                "Course created successfully",
            )))
        }
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("Failed to create course: {e}"),
            )),
        ),
    }
}
