//! 路径参数安全提取器。
//!
//! 直接用 `web::Path<i64>` 在解析失败时会返回 actix 默认的 400 文本，
//! 这里统一换成 ApiResponse 格式，并且要求 ID 为正整数。

use actix_web::dev::Payload;
use actix_web::{FromRequest, HttpRequest, HttpResponse};
use std::future::{Ready, ready};

use crate::models::{ApiResponse, ErrorCode};

macro_rules! define_id_extractor {
    ($(#[$doc:meta])* $name:ident, $param:literal) => {
        $(#[$doc])*
        #[derive(Debug, Clone, Copy)]
        pub struct $name(pub i64);

        impl FromRequest for $name {
            type Error = actix_web::Error;
            type Future = Ready<Result<Self, Self::Error>>;

            fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
                let parsed = req
                    .match_info()
                    .get($param)
                    .and_then(|raw| raw.parse::<i64>().ok())
                    .filter(|id| *id > 0);

                ready(match parsed {
                    Some(id) => Ok($name(id)),
                    None => {
                        let response = HttpResponse::BadRequest().json(ApiResponse::<()>::error_empty(
                            ErrorCode::BadRequest,
                            format!("Invalid path parameter: {}", $param),
                        ));
                        Err(actix_web::error::InternalError::from_response(
                            "invalid path parameter",
                            response,
                        )
                        .into())
                    }
                })
            }
        }
    };
}

define_id_extractor!(
    /// 通用 `{id}` 参数
    SafeIdI64,
    "id"
);
define_id_extractor!(SafeCourseIdI64, "course_id");
define_id_extractor!(SafeParentIdI64, "parent_id");
define_id_extractor!(SafeAssignmentIdI64, "assignment_id");
define_id_extractor!(SafeSubmissionIdI64, "submission_id");
define_id_extractor!(SafeStudentIdI64, "student_id");
define_id_extractor!(SafeNotificationIdI64, "notification_id");

/// `{role}` 路径参数，解析为 [`UserRole`]
#[derive(Debug, Clone, Copy)]
pub struct SafeUserRole(pub crate::models::users::entities::UserRole);

impl FromRequest for SafeUserRole {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        use std::str::FromStr;

        let parsed = req
            .match_info()
            .get("role")
            .and_then(|raw| crate::models::users::entities::UserRole::from_str(raw).ok());

        ready(match parsed {
            Some(role) => Ok(SafeUserRole(role)),
            None => {
                let response = HttpResponse::BadRequest().json(ApiResponse::<()>::error_empty(
                    ErrorCode::BadRequest,
                    "Invalid path parameter: role",
                ));
                Err(actix_web::error::InternalError::from_response(
                    "invalid path parameter",
                    response,
                )
                .into())
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::users::entities::UserRole;
    use actix_web::dev::Payload;
    use actix_web::test::TestRequest;

    #[actix_web::test]
    async fn test_valid_id_extraction() {
        let req = TestRequest::default().param("id", "7").to_http_request();
        let id = SafeIdI64::from_request(&req, &mut Payload::None)
            .await
            .unwrap();
        assert_eq!(id.0, 7);
    }

    #[actix_web::test]
    async fn test_rejects_non_positive_and_garbage() {
        for raw in ["0", "-3", "abc"] {
            let req = TestRequest::default().param("id", raw).to_http_request();
            assert!(
                SafeIdI64::from_request(&req, &mut Payload::None)
                    .await
                    .is_err()
            );
        }
    }

    #[actix_web::test]
    async fn test_role_extraction() {
        let req = TestRequest::default()
            .param("role", "teacher")
            .to_http_request();
        let role = SafeUserRole::from_request(&req, &mut Payload::None)
            .await
            .unwrap();
        assert_eq!(role.0, UserRole::Teacher);

        let req = TestRequest::default()
            .param("role", "principal")
            .to_http_request();
        assert!(
            SafeUserRole::from_request(&req, &mut Payload::None)
                .await
                .is_err()
        );
    }
}
