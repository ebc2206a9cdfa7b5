use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::str::FromStr;

use crate::middlewares::RequireJWT;
use crate::models::auth::requests::{
    ChangePasswordRequest, RequestPasswordResetRequest, ResetPasswordRequest,
};
use crate::models::auth::responses::PasswordResetTokenResponse;
use crate::models::users::entities::UserRole;
use crate::models::users::requests::UpdateUserRequest;
use crate::models::{ApiResponse, ErrorCode};
use crate::utils::jwt::JwtUtils;
use crate::utils::password::{hash_password, verify_password};
use crate::utils::validate::validate_password;

use super::AuthService;

/// 修改密码（已登录，需验证旧密码）
pub async fn handle_change_password(
    service: &AuthService,
    change_request: ChangePasswordRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let current_user = match RequireJWT::extract_user_claims(request) {
        Some(user) => user,
        None => {
            return Ok(HttpResponse::Unauthorized().json(ApiResponse::error_empty(
                ErrorCode::Unauthorized,
                "Authentication required",
            )));
        }
    };

    // 验证旧密码
    if !verify_password(&change_request.old_password, &current_user.password_hash) {
        return Ok(HttpResponse::Unauthorized().json(ApiResponse::error_empty(
            ErrorCode::AuthFailed,
            "Old password is incorrect",
        )));
    }

    // 新密码策略
    if let Err(e) = validate_password(&change_request.new_password) {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::UserPasswordInvalid,
            e.message(),
        )));
    }

    apply_new_password(
        service,
        request,
        current_user.role,
        current_user.id,
        &change_request.new_password,
    )
    .await?;

    tracing::info!(
        "User {} ({}) changed password",
        current_user.id,
        current_user.role
    );
    Ok(HttpResponse::Ok().json(ApiResponse::<()>::success_empty(
        "Password changed successfully",
    )))
}

/// 请求重置密码令牌。邮件投递不在服务范围内，令牌直接返回并记录日志。
pub async fn handle_request_password_reset(
    service: &AuthService,
    reset_request: RequestPasswordResetRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);
    let config = service.get_config();

    match storage.find_user_by_email(&reset_request.email).await {
        Ok(Some(user)) => {
            match JwtUtils::generate_reset_token(user.id, &user.role.to_string()) {
                Ok(reset_token) => {
                    tracing::info!(
                        "Password reset token issued for user {} ({})",
                        user.id,
                        user.role
                    );
                    Ok(HttpResponse::Ok().json(ApiResponse::success(
                        PasswordResetTokenResponse {
                            reset_token,
                            expires_in: config.jwt.reset_token_expiry * 60,
                        },
                        "Password reset token issued",
                    )))
                }
                Err(e) => {
                    tracing::error!("Failed to generate reset token: {}", e);
                    Ok(
                        HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                            ErrorCode::InternalServerError,
                            "Failed to issue reset token",
                        )),
                    )
                }
            }
        }
        Ok(None) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::UserNotFound,
            "No account found for this email",
        ))),
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("Failed to look up email: {e}"),
            )),
        ),
    }
}

/// 凭重置令牌设置新密码
pub async fn handle_reset_password(
    service: &AuthService,
    reset_request: ResetPasswordRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let claims = match JwtUtils::verify_reset_token(&reset_request.token) {
        Ok(claims) => claims,
        Err(e) => {
            tracing::info!("Invalid password reset token: {}", e);
            return Ok(HttpResponse::Unauthorized().json(ApiResponse::error_empty(
                ErrorCode::TokenInvalid,
                "Reset token is invalid or expired",
            )));
        }
    };

    let (role, user_id) = match parse_claims(&claims.role, &claims.sub) {
        Some(pair) => pair,
        None => {
            return Ok(HttpResponse::Unauthorized().json(ApiResponse::error_empty(
                ErrorCode::TokenInvalid,
                "Reset token is malformed",
            )));
        }
    };

    if let Err(e) = validate_password(&reset_request.new_password) {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::UserPasswordInvalid,
            e.message(),
        )));
    }

    apply_new_password(service, request, role, user_id, &reset_request.new_password).await?;

    tracing::info!("User {} ({}) reset password via token", user_id, role);
    Ok(HttpResponse::Ok().json(ApiResponse::<()>::success_empty(
        "Password reset successfully",
    )))
}

fn parse_claims(role: &str, sub: &str) -> Option<(UserRole, i64)> {
    let role = UserRole::from_str(role).ok()?;
    let user_id = sub.parse::<i64>().ok()?;
    Some((role, user_id))
}

async fn apply_new_password(
    service: &AuthService,
    request: &HttpRequest,
    role: UserRole,
    user_id: i64,
    new_password: &str,
) -> ActixResult<()> {
    let storage = service.get_storage(request);

    let password_hash = hash_password(new_password).map_err(|e| {
        tracing::error!("Password hashing failed: {}", e);
        actix_web::error::ErrorInternalServerError("Password hashing failed")
    })?;

    let update = UpdateUserRequest {
        password: Some(password_hash),
        ..Default::default()
    };

    storage
        .update_user(role, user_id, update)
        .await
        .map_err(|e| {
            tracing::error!("Failed to update password: {}", e);
            actix_web::error::ErrorInternalServerError("Failed to update password")
        })?;

    Ok(())
}
