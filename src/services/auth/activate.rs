use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::str::FromStr;

use crate::models::users::entities::UserRole;
use crate::models::users::requests::UpdateUserRequest;
use crate::models::users::responses::UserResponse;
use crate::models::{ApiResponse, ErrorCode};
use crate::utils::jwt::JwtUtils;

use super::AuthService;

/// 凭激活令牌激活账号
pub async fn handle_activate(
    service: &AuthService,
    token: String,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let claims = match JwtUtils::verify_activation_token(&token) {
        Ok(claims) => claims,
        Err(e) => {
            tracing::info!("Invalid activation token: {}", e);
            return Ok(HttpResponse::Unauthorized().json(ApiResponse::error_empty(
                ErrorCode::TokenInvalid,
                "Activation token is invalid or expired",
            )));
        }
    };

    let role = match UserRole::from_str(&claims.role) {
        Ok(role) => role,
        Err(_) => {
            return Ok(HttpResponse::Unauthorized().json(ApiResponse::error_empty(
                ErrorCode::TokenInvalid,
                "Activation token is malformed",
            )));
        }
    };
    let user_id = match claims.sub.parse::<i64>() {
        Ok(id) => id,
        Err(_) => {
            return Ok(HttpResponse::Unauthorized().json(ApiResponse::error_empty(
                ErrorCode::TokenInvalid,
                "Activation token is malformed",
            )));
        }
    };

    let update = UpdateUserRequest {
        activated: Some(true),
        ..Default::default()
    };

    match storage.update_user(role, user_id, update).await {
        Ok(Some(user)) => {
            tracing::info!("User {} ({}) activated", user.id, user.role);
            Ok(HttpResponse::Ok().json(ApiResponse::success(
                UserResponse { user },
                "Account activated successfully",
            )))
        }
        Ok(None) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::UserNotFound,
            "User not found",
        ))),
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("Failed to activate account: {e}"),
            )),
        ),
    }
}
