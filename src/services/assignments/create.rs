use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use crate::middlewares::RequireJWT;
use crate::models::PaginationQuery;
use crate::models::assignments::entities::Assignment;
use crate::models::assignments::requests::CreateAssignmentRequest;
use crate::models::assignments::responses::AssignmentResponse;
use crate::models::courses::entities::Course;
use crate::models::users::entities::UserRole;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::courses::can_manage_course;

use super::AssignmentService;

/// 在课程下布置作业，并通知所有已选课学生
pub async fn handle_create_assignment(
    service: &AssignmentService,
    course_id: i64,
    assignment_data: CreateAssignmentRequest,
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

    let course = match storage.get_course_by_id(course_id).await {
        Ok(Some(course)) => course,
        Ok(None) => {
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::CourseNotFound,
                "Course not found",
            )));
        }
        Err(e) => {
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("Failed to retrieve course: {e}"),
                )),
            );
        }
    };

    if !can_manage_course(&current_user, &course) {
        return Ok(HttpResponse::Forbidden().json(ApiResponse::error_empty(
            ErrorCode::Forbidden,
            "Only the course teacher or an admin can create assignments",
        )));
    }

    // 管理员代布置时归属仍记在授课教师名下
    let assigned_by = course.teacher_id;

    match storage
        .create_assignment(course.id, assigned_by, assignment_data)
        .await
    {
        Ok(assignment) => {
            tracing::info!(
                "Assignment {} created in course {} by user {} ({})",
                assignment.id,
                course.id,
                current_user.id,
                current_user.role
            );
            notify_enrolled_students(&storage, &course, &assignment).await;
            Ok(HttpResponse::Created().json(ApiResponse::success(
                AssignmentResponse { assignment },
                "Assignment created successfully",
            )))
        }
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("Failed to create assignment: {e}"),
            )),
        ),
    }
}

/// 给课程里的每个学生发一条新作业通知。通知失败只记日志，不影响作业创建。
async fn notify_enrolled_students(
    storage: &std::sync::Arc<dyn crate::storage::Storage>,
    course: &Course,
    assignment: &Assignment,
) {
    let title = format!("New assignment: {}", assignment.title);
    let body = match assignment.due_by {
        Some(due_by) => format!(
            "A new assignment was posted in {}. Due by {}.",
            course.name,
            due_by.format("%Y-%m-%d %H:%M UTC")
        ),
        None => format!("A new assignment was posted in {}.", course.name),
    };

    let mut page = 1;
    loop {
        let batch = match storage
            .list_course_students(course.id, PaginationQuery { page, size: 100 })
            .await
        {
            Ok(batch) => batch,
            Err(e) => {
                tracing::error!(
                    "Failed to list students of course {} for notification: {}",
                    course.id,
                    e
                );
                return;
            }
        };

        for student in &batch.items {
            if let Err(e) = storage
                .create_notification(UserRole::Student, student.id, &title, &body)
                .await
            {
                tracing::error!(
                    "Failed to notify student {} about assignment {}: {}",
                    student.id,
                    assignment.id,
                    e
                );
            }
        }

        if page >= batch.pagination.total_pages {
            break;
        }
        page += 1;
    }
}
