use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use crate::models::users::requests::{CreateUserRequest, UpdateUserRequest};
use crate::models::users::responses::UserResponse;
use crate::models::{ApiResponse, ErrorCode};
use crate::utils::password::hash_password;
use crate::utils::validate::{
    normalize_bio, normalize_date_of_birth, validate_email, validate_password,
};

use super::UserService;

/// 管理员创建用户，创建后直接激活
pub async fn handle_create_user(
    service: &UserService,
    mut user_data: CreateUserRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    if let Err(e) = validate_email(&user_data.email) {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::UserEmailInvalid,
            e.message(),
        )));
    }
    if let Err(e) = validate_password(&user_data.password) {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::UserPasswordInvalid,
            e.message(),
        )));
    }
    match normalize_bio(user_data.bio.as_deref()) {
        Ok(bio) => user_data.bio = Some(bio),
        Err(e) => {
            return Ok(HttpResponse::BadRequest()
                .json(ApiResponse::error_empty(ErrorCode::UserBioInvalid, e.message())));
        }
    }
    match normalize_date_of_birth(user_data.date_of_birth.as_deref()) {
        Ok(date) => user_data.date_of_birth = Some(date),
        Err(e) => {
            return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
                ErrorCode::UserDateOfBirthInvalid,
                e.message(),
            )));
        }
    }

    // 邮箱在所有角色集合中唯一
    match storage.find_user_by_email(&user_data.email).await {
        Ok(Some(_)) => {
            return Ok(HttpResponse::Conflict().json(ApiResponse::error_empty(
                ErrorCode::UserEmailAlreadyExists,
                "Email already exists",
            )));
        }
        Ok(None) => {}
        Err(e) => {
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::UserCreationFailed,
                    format!("Failed to create user: {e}"),
                )),
            );
        }
    }

    let password_hash = match hash_password(&user_data.password) {
        Ok(hash) => hash,
        Err(e) => {
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::UserCreationFailed,
                    format!("Password hashing failed: {e}"),
                )),
            );
        }
    };
    user_data.password = password_hash;

    match storage.create_user(user_data).await {
        Ok(user) => {
            // 管理员创建的账号不走激活流程，直接置为已激活
            let activate = UpdateUserRequest {
                activated: Some(true),
                ..Default::default()
            };
            match storage.update_user(user.role, user.id, activate).await {
                Ok(Some(user)) => Ok(HttpResponse::Created().json(ApiResponse::success(
                    UserResponse { user },
                    "User created successfully",
                ))),
                Ok(None) => Ok(HttpResponse::InternalServerError().json(
                    ApiResponse::error_empty(
                        ErrorCode::UserCreationFailed,
                        "User vanished during creation",
                    ),
                )),
                Err(e) => Ok(
                    HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                        ErrorCode::UserCreationFailed,
                        format!("Failed to activate created user: {e}"),
                    )),
                ),
            }
        }
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::UserCreationFailed,
                format!("Failed to create user: {e}"),
            )),
        ),
    }
}
