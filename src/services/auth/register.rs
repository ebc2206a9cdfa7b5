use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use crate::models::auth::responses::RegisterResponse;
use crate::models::users::entities::UserRole;
use crate::models::{ApiResponse, ErrorCode, users::requests::CreateUserRequest};
use crate::utils::jwt::JwtUtils;
use crate::utils::password::hash_password;
use crate::utils::validate::{
    normalize_bio, normalize_date_of_birth, validate_email, validate_password,
};

use super::AuthService;

pub async fn handle_register(
    service: &AuthService,
    mut create_request: CreateUserRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    // 公开注册只开放学生 / 教师 / 家长，管理员账号走管理端的用户接口
    if create_request.role == UserRole::Admin {
        return Ok(HttpResponse::Forbidden().json(ApiResponse::error_empty(
            ErrorCode::Forbidden,
            "Admin accounts cannot be created through public registration",
        )));
    }

    let storage = service.get_storage(request);

    // 1. 验证邮箱格式
    if let Err(e) = validate_email(&create_request.email) {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::UserEmailInvalid,
            e.message(),
        )));
    }

    // 2. 验证密码策略
    if let Err(e) = validate_password(&create_request.password) {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::UserPasswordInvalid,
            e.message(),
        )));
    }

    // 3. 规范化简介和出生日期（空值落默认）
    match normalize_bio(create_request.bio.as_deref()) {
        Ok(bio) => create_request.bio = Some(bio),
        Err(e) => {
            return Ok(HttpResponse::BadRequest()
                .json(ApiResponse::error_empty(ErrorCode::UserBioInvalid, e.message())));
        }
    }
    match normalize_date_of_birth(create_request.date_of_birth.as_deref()) {
        Ok(date) => create_request.date_of_birth = Some(date),
        Err(e) => {
            return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
                ErrorCode::UserDateOfBirthInvalid,
                e.message(),
            )));
        }
    }

    // 4. 邮箱必须在所有角色集合中都未被使用，
    //    否则登录探测会让后注册的账号永远无法登录
    match storage.find_user_by_email(&create_request.email).await {
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
                    ErrorCode::RegisterFailed,
                    format!("Register failed: {e}"),
                )),
            );
        }
    }

    // 5. 哈希密码
    let password_hash = match hash_password(&create_request.password) {
        Ok(hash) => hash,
        Err(e) => {
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::RegisterFailed,
                    format!("Password hashing failed: {e}"),
                )),
            );
        }
    };
    create_request.password = password_hash;

    // 6. 创建用户并签发激活令牌（邮件发送不在服务范围内，令牌随响应返回）
    match storage.create_user(create_request).await {
        Ok(user) => match JwtUtils::generate_activation_token(user.id, &user.role.to_string()) {
            Ok(activation_token) => {
                tracing::info!("User {} ({}) registered", user.id, user.role);
                Ok(HttpResponse::Created().json(ApiResponse::success(
                    RegisterResponse {
                        user,
                        activation_token,
                    },
                    "Registration successful, activate the account to log in",
                )))
            }
            Err(e) => {
                tracing::error!("Failed to generate activation token: {}", e);
                Ok(
                    HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                        ErrorCode::RegisterFailed,
                        "Registration succeeded but activation token could not be issued",
                    )),
                )
            }
        },
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::RegisterFailed,
                format!("Register failed: {e}"),
            )),
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::http::StatusCode;
    use actix_web::test::TestRequest;

    #[actix_web::test]
    async fn test_register_rejects_admin_role() {
        let service = AuthService::new_lazy();
        let request = TestRequest::default().to_http_request();
        let create_request = CreateUserRequest {
            role: UserRole::Admin,
            email: "intruder@example.com".to_string(),
            password: "Sup3r-secret!".to_string(),
            first_name: "Eve".to_string(),
            last_name: "Nobody".to_string(),
            bio: None,
            date_of_birth: None,
            avatar_url: None,
            subjects: None,
        };

        let response = handle_register(&service, create_request, &request)
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::FORBIDDEN);
    }
}
