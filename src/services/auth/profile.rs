use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use crate::middlewares::RequireJWT;
use crate::models::auth::requests::UpdateProfileRequest;
use crate::models::users::entities::UserRole;
use crate::models::users::requests::UpdateUserRequest;
use crate::models::users::responses::UserResponse;
use crate::models::{ApiResponse, ErrorCode};
use crate::utils::validate::{normalize_bio, normalize_date_of_birth, validate_email};

use super::AuthService;

pub async fn handle_update_profile(
    service: &AuthService,
    update_data: UpdateProfileRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    // 获取当前用户信息
    let current_user = match RequireJWT::extract_user_claims(request) {
        Some(user) => user,
        None => {
            return Ok(HttpResponse::Unauthorized().json(ApiResponse::error_empty(
                ErrorCode::Unauthorized,
                "Authentication required",
            )));
        }
    };

    // 验证新邮箱：格式 + 所有角色集合范围内的唯一性
    if let Some(ref email) = update_data.email {
        if let Err(e) = validate_email(email) {
            return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
                ErrorCode::UserEmailInvalid,
                e.message(),
            )));
        }
        match storage.find_user_by_email(email).await {
            Ok(Some(existing))
                if existing.id != current_user.id || existing.role != current_user.role =>
            {
                return Ok(HttpResponse::Conflict().json(ApiResponse::error_empty(
                    ErrorCode::UserEmailAlreadyExists,
                    "Email already exists",
                )));
            }
            Ok(_) => {}
            Err(e) => {
                return Ok(
                    HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                        ErrorCode::InternalServerError,
                        format!("Failed to check email uniqueness: {e}"),
                    )),
                );
            }
        }
    }

    // 规范化简介和出生日期
    let bio = match update_data.bio {
        Some(ref bio) => match normalize_bio(Some(bio)) {
            Ok(bio) => Some(bio),
            Err(e) => {
                return Ok(HttpResponse::BadRequest()
                    .json(ApiResponse::error_empty(ErrorCode::UserBioInvalid, e.message())));
            }
        },
        None => None,
    };
    let date_of_birth = match update_data.date_of_birth {
        Some(ref date) => match normalize_date_of_birth(Some(date)) {
            Ok(date) => Some(date),
            Err(e) => {
                return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
                    ErrorCode::UserDateOfBirthInvalid,
                    e.message(),
                )));
            }
        },
        None => None,
    };

    // subjects 只对教师角色有意义，其他角色的提交直接忽略
    let subjects = if current_user.role == UserRole::Teacher {
        update_data.subjects
    } else {
        None
    };

    // 构建更新请求（不包含 activated，用户无权修改自己的激活状态）
    let storage_update = UpdateUserRequest {
        email: update_data.email,
        password: None,
        first_name: update_data.first_name,
        last_name: update_data.last_name,
        bio,
        date_of_birth,
        avatar_url: update_data.avatar_url,
        activated: None,
        subjects,
    };

    match storage
        .update_user(current_user.role, current_user.id, storage_update)
        .await
    {
        Ok(Some(user)) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            UserResponse { user },
            "Profile updated successfully",
        ))),
        Ok(None) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::UserNotFound,
            "User not found",
        ))),
        Err(e) => Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::UserUpdateFailed,
            format!("Failed to update profile: {e}"),
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::{Result, SchoolSystemError};
    use crate::models::users::entities::User;
    use crate::models::{
        PaginationQuery,
        assignments::{
            entities::Assignment,
            requests::{AssignmentListQuery, CreateAssignmentRequest, UpdateAssignmentRequest},
            responses::AssignmentListResponse,
        },
        courses::{
            entities::Course,
            requests::{CourseListQuery, CreateCourseRequest, UpdateCourseRequest},
            responses::{CourseListResponse, CourseStudentListResponse},
        },
        notifications::{
            entities::Notification, requests::NotificationListQuery,
            responses::NotificationListResponse,
        },
        submissions::{
            entities::Submission,
            requests::{CreateSubmissionRequest, SubmissionListQuery},
            responses::SubmissionListResponse,
        },
        users::requests::{CreateUserRequest, UserListQuery},
        users::responses::UserListResponse,
    };
    use crate::storage::Storage;
    use actix_web::HttpMessage;
    use actix_web::http::StatusCode;
    use actix_web::test::TestRequest;
    use std::sync::Arc;

    // 邮箱唯一性检查落到存储层时直接报错的测试桩，
    // 其他方法一旦被调用会 panic，说明更新没有被中止
    struct BrokenEmailLookupStorage;

    #[async_trait::async_trait]
    impl Storage for BrokenEmailLookupStorage {
        async fn create_user(&self, _user: CreateUserRequest) -> Result<User> {
            unimplemented!()
        }
        async fn get_user_by_id(&self, _role: UserRole, _id: i64) -> Result<Option<User>> {
            unimplemented!()
        }
        async fn get_user_by_email(&self, _role: UserRole, _email: &str) -> Result<Option<User>> {
            unimplemented!()
        }
        async fn find_user_by_email(&self, _email: &str) -> Result<Option<User>> {
            Err(SchoolSystemError::database_operation("email lookup failed"))
        }
        async fn list_users_with_pagination(
            &self,
            _query: UserListQuery,
        ) -> Result<UserListResponse> {
            unimplemented!()
        }
        async fn update_user(
            &self,
            _role: UserRole,
            _id: i64,
            _update: UpdateUserRequest,
        ) -> Result<Option<User>> {
            unimplemented!()
        }
        async fn delete_user(&self, _role: UserRole, _id: i64) -> Result<bool> {
            unimplemented!()
        }
        async fn update_last_login(&self, _role: UserRole, _id: i64) -> Result<bool> {
            unimplemented!()
        }
        async fn count_users(&self, _role: UserRole) -> Result<u64> {
            unimplemented!()
        }
        async fn count_all_users(&self) -> Result<u64> {
            unimplemented!()
        }
        async fn create_course(
            &self,
            _teacher_id: i64,
            _course: CreateCourseRequest,
        ) -> Result<Course> {
            unimplemented!()
        }
        async fn get_course_by_id(&self, _course_id: i64) -> Result<Option<Course>> {
            unimplemented!()
        }
        async fn list_courses_with_pagination(
            &self,
            _query: CourseListQuery,
        ) -> Result<CourseListResponse> {
            unimplemented!()
        }
        async fn update_course(
            &self,
            _course_id: i64,
            _update: UpdateCourseRequest,
        ) -> Result<Option<Course>> {
            unimplemented!()
        }
        async fn delete_course(&self, _course_id: i64) -> Result<bool> {
            unimplemented!()
        }
        async fn enroll_student(&self, _course_id: i64, _student_id: i64) -> Result<bool> {
            unimplemented!()
        }
        async fn unenroll_student(&self, _course_id: i64, _student_id: i64) -> Result<bool> {
            unimplemented!()
        }
        async fn is_student_enrolled(&self, _course_id: i64, _student_id: i64) -> Result<bool> {
            unimplemented!()
        }
        async fn list_course_students(
            &self,
            _course_id: i64,
            _query: PaginationQuery,
        ) -> Result<CourseStudentListResponse> {
            unimplemented!()
        }
        async fn list_student_courses(
            &self,
            _student_id: i64,
            _query: CourseListQuery,
        ) -> Result<CourseListResponse> {
            unimplemented!()
        }
        async fn link_child(&self, _parent_id: i64, _student_id: i64) -> Result<bool> {
            unimplemented!()
        }
        async fn unlink_child(&self, _parent_id: i64, _student_id: i64) -> Result<bool> {
            unimplemented!()
        }
        async fn is_child_of(&self, _parent_id: i64, _student_id: i64) -> Result<bool> {
            unimplemented!()
        }
        async fn list_children(&self, _parent_id: i64) -> Result<Vec<User>> {
            unimplemented!()
        }
        async fn list_parents_of_student(&self, _student_id: i64) -> Result<Vec<User>> {
            unimplemented!()
        }
        async fn create_assignment(
            &self,
            _course_id: i64,
            _assigned_by: i64,
            _assignment: CreateAssignmentRequest,
        ) -> Result<Assignment> {
            unimplemented!()
        }
        async fn get_assignment_by_id(&self, _assignment_id: i64) -> Result<Option<Assignment>> {
            unimplemented!()
        }
        async fn list_course_assignments(
            &self,
            _course_id: i64,
            _query: AssignmentListQuery,
        ) -> Result<AssignmentListResponse> {
            unimplemented!()
        }
        async fn list_student_assignments(
            &self,
            _student_id: i64,
            _query: AssignmentListQuery,
        ) -> Result<AssignmentListResponse> {
            unimplemented!()
        }
        async fn update_assignment(
            &self,
            _assignment_id: i64,
            _update: UpdateAssignmentRequest,
        ) -> Result<Option<Assignment>> {
            unimplemented!()
        }
        async fn delete_assignment(&self, _assignment_id: i64) -> Result<bool> {
            unimplemented!()
        }
        async fn upsert_submission(
            &self,
            _assignment_id: i64,
            _student_id: i64,
            _submission: CreateSubmissionRequest,
        ) -> Result<Submission> {
            unimplemented!()
        }
        async fn get_submission_by_id(&self, _submission_id: i64) -> Result<Option<Submission>> {
            unimplemented!()
        }
        async fn get_submission_by_assignment_and_student(
            &self,
            _assignment_id: i64,
            _student_id: i64,
        ) -> Result<Option<Submission>> {
            unimplemented!()
        }
        async fn list_assignment_submissions(
            &self,
            _assignment_id: i64,
            _query: SubmissionListQuery,
        ) -> Result<SubmissionListResponse> {
            unimplemented!()
        }
        async fn list_student_submissions(
            &self,
            _student_id: i64,
            _query: SubmissionListQuery,
        ) -> Result<SubmissionListResponse> {
            unimplemented!()
        }
        async fn grade_submission(
            &self,
            _submission_id: i64,
            _grade: f64,
            _graded_by: i64,
        ) -> Result<Option<Submission>> {
            unimplemented!()
        }
        async fn create_notification(
            &self,
            _role: UserRole,
            _user_id: i64,
            _title: &str,
            _body: &str,
        ) -> Result<Notification> {
            unimplemented!()
        }
        async fn list_notifications_with_pagination(
            &self,
            _role: UserRole,
            _user_id: i64,
            _query: NotificationListQuery,
        ) -> Result<NotificationListResponse> {
            unimplemented!()
        }
        async fn get_unread_notification_count(
            &self,
            _role: UserRole,
            _user_id: i64,
        ) -> Result<i64> {
            unimplemented!()
        }
        async fn mark_notification_read(
            &self,
            _role: UserRole,
            _user_id: i64,
            _notification_id: i64,
        ) -> Result<bool> {
            unimplemented!()
        }
        async fn mark_all_notifications_read(
            &self,
            _role: UserRole,
            _user_id: i64,
        ) -> Result<i64> {
            unimplemented!()
        }
    }

    #[actix_web::test]
    async fn test_email_check_store_error_aborts_update() {
        let service = AuthService {
            storage: Some(Arc::new(BrokenEmailLookupStorage)),
        };
        let request = TestRequest::default().to_http_request();
        request.extensions_mut().insert(User {
            id: 1,
            role: UserRole::Student,
            email: "old@example.com".to_string(),
            password_hash: String::new(),
            first_name: "Stu".to_string(),
            last_name: "Dent".to_string(),
            bio: "Hello".to_string(),
            date_of_birth: "01-01-2000".to_string(),
            avatar_url: None,
            activated: true,
            subjects: None,
            last_login: None,
            created_at: chrono::Utc::now(),
            updated_at: chrono::Utc::now(),
        });

        let update_data = UpdateProfileRequest {
            email: Some("new@example.com".to_string()),
            first_name: None,
            last_name: None,
            bio: None,
            date_of_birth: None,
            avatar_url: None,
            subjects: None,
        };

        let response = handle_update_profile(&service, update_data, &request)
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
