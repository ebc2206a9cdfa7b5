use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use crate::models::users::entities::UserRole;
use crate::models::users::requests::UpdateUserRequest;
use crate::models::users::responses::UserResponse;
use crate::models::{ApiResponse, ErrorCode};
use crate::utils::password::hash_password;
use crate::utils::validate::{
    normalize_bio, normalize_date_of_birth, validate_email, validate_password,
};

use super::UserService;

/// 管理员更新用户，字段均为可选的部分更新
pub async fn handle_update_user(
    service: &UserService,
    role: UserRole,
    user_id: i64,
    mut update_data: UpdateUserRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    if let Some(ref email) = update_data.email {
        if let Err(e) = validate_email(email) {
            return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
                ErrorCode::UserEmailInvalid,
                e.message(),
            )));
        }
        // 换邮箱时在所有角色集合中查重，允许撞到自己
        match storage.find_user_by_email(email).await {
            Ok(Some(existing)) if existing.id != user_id || existing.role != role => {
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
                        format!("Failed to check email: {e}"),
                    )),
                );
            }
        }
    }

    if let Some(ref password) = update_data.password {
        if let Err(e) = validate_password(password) {
            return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
                ErrorCode::UserPasswordInvalid,
                e.message(),
            )));
        }
        match hash_password(password) {
            Ok(hash) => update_data.password = Some(hash),
            Err(e) => {
                tracing::error!("Password hashing failed: {}", e);
                return Ok(
                    HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                        ErrorCode::InternalServerError,
                        "Password hashing failed",
                    )),
                );
            }
        }
    }

    if let Some(ref bio) = update_data.bio {
        match normalize_bio(Some(bio)) {
            Ok(bio) => update_data.bio = Some(bio),
            Err(e) => {
                return Ok(HttpResponse::BadRequest()
                    .json(ApiResponse::error_empty(ErrorCode::UserBioInvalid, e.message())));
            }
        }
    }

    if let Some(ref date_of_birth) = update_data.date_of_birth {
        match normalize_date_of_birth(Some(date_of_birth)) {
            Ok(date) => update_data.date_of_birth = Some(date),
            Err(e) => {
                return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
                    ErrorCode::UserDateOfBirthInvalid,
                    e.message(),
                )));
            }
        }
    }

    // subjects 只对教师有意义
    if role != UserRole::Teacher {
        update_data.subjects = None;
    }

    match storage.update_user(role, user_id, update_data).await {
        Ok(Some(user)) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            UserResponse { user },
            "User updated successfully",
        ))),
        Ok(None) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::UserNotFound,
            "User not found",
        ))),
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::UserUpdateFailed,
                format!("Failed to update user: {e}"),
            )),
        ),
    }
}
