use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use crate::middlewares::RequireJWT;
use crate::models::PaginationQuery;
use crate::models::courses::entities::Course;
use crate::models::courses::requests::EnrollStudentRequest;
use crate::models::users::entities::{User, UserRole};
use crate::models::{ApiResponse, ErrorCode};

use super::{CourseService, can_manage_course};

/// 选课。只有授课教师或管理员可以把学生加进课程。
pub async fn handle_enroll_student(
    service: &CourseService,
    course_id: i64,
    enroll_data: EnrollStudentRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let (_, course) = match load_managed_course(service, course_id, request).await {
        Ok(pair) => pair,
        Err(response) => return Ok(response),
    };

    // 确认学生存在
    match storage
        .get_user_by_id(UserRole::Student, enroll_data.student_id)
        .await
    {
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

    match storage
        .enroll_student(course.id, enroll_data.student_id)
        .await
    {
        Ok(true) => {
            tracing::info!(
                "Student {} enrolled in course {}",
                enroll_data.student_id,
                course.id
            );
            Ok(HttpResponse::Ok().json(ApiResponse::<()>::success_empty(
                "Student enrolled successfully",
            )))
        }
        Ok(false) => Ok(HttpResponse::Conflict().json(ApiResponse::error_empty(
            ErrorCode::StudentAlreadyEnrolled,
            "Student is already enrolled in this course",
        ))),
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("Failed to enroll student: {e}"),
            )),
        ),
    }
}

/// 退课
pub async fn handle_unenroll_student(
    service: &CourseService,
    course_id: i64,
    student_id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let (_, course) = match load_managed_course(service, course_id, request).await {
        Ok(pair) => pair,
        Err(response) => return Ok(response),
    };

    match storage.unenroll_student(course.id, student_id).await {
        Ok(true) => Ok(HttpResponse::Ok().json(ApiResponse::<()>::success_empty(
            "Student unenrolled successfully",
        ))),
        Ok(false) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::StudentNotEnrolled,
            "Student is not enrolled in this course",
        ))),
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("Failed to unenroll student: {e}"),
            )),
        ),
    }
}

/// 课程学生名单（授课教师或管理员）
pub async fn handle_list_course_students(
    service: &CourseService,
    course_id: i64,
    query: PaginationQuery,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let (_, course) = match load_managed_course(service, course_id, request).await {
        Ok(pair) => pair,
        Err(response) => return Ok(response),
    };

    match storage.list_course_students(course.id, query).await {
        Ok(response) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            response,
            "Course students retrieved successfully",
        ))),
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("Failed to list course students: {e}"),
            )),
        ),
    }
}

/// 取课程并做归属检查，失败时直接给出响应
async fn load_managed_course(
    service: &CourseService,
    course_id: i64,
    request: &HttpRequest,
) -> Result<(User, Course), HttpResponse> {
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

    let course = match storage.get_course_by_id(course_id).await {
        Ok(Some(course)) => course,
        Ok(None) => {
            return Err(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::CourseNotFound,
                "Course not found",
            )));
        }
        Err(e) => {
            return Err(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("Failed to retrieve course: {e}"),
                )),
            );
        }
    };

    if !can_manage_course(&current_user, &course) {
        return Err(HttpResponse::Forbidden().json(ApiResponse::error_empty(
            ErrorCode::Forbidden,
            "Only the course teacher or an admin can manage enrollment",
        )));
    }

    Ok((current_user, course))
}
