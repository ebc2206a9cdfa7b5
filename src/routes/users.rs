use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::users::entities::UserRole;
use crate::models::users::requests::{CreateUserRequest, UpdateUserRequest, UserListQuery};
use crate::services::UserService;
use crate::utils::{SafeIdI64, SafeUserRole};

// 懒加载的全局 UserService 实例
static USER_SERVICE: Lazy<UserService> = Lazy::new(UserService::new_lazy);

// HTTP处理程序
pub async fn list_users(
    req: HttpRequest,
    query: web::Query<UserListQuery>,
) -> ActixResult<HttpResponse> {
    USER_SERVICE.list_users(query.into_inner(), &req).await
}

pub async fn create_user(
    req: HttpRequest,
    user_data: web::Json<CreateUserRequest>,
) -> ActixResult<HttpResponse> {
    USER_SERVICE.create_user(user_data.into_inner(), &req).await
}

pub async fn get_user(
    req: HttpRequest,
    role: SafeUserRole,
    user_id: SafeIdI64,
) -> ActixResult<HttpResponse> {
    USER_SERVICE.get_user(role.0, user_id.0, &req).await
}

pub async fn update_user(
    req: HttpRequest,
    role: SafeUserRole,
    user_id: SafeIdI64,
    update_data: web::Json<UpdateUserRequest>,
) -> ActixResult<HttpResponse> {
    USER_SERVICE
        .update_user(role.0, user_id.0, update_data.into_inner(), &req)
        .await
}

pub async fn delete_user(
    req: HttpRequest,
    role: SafeUserRole,
    user_id: SafeIdI64,
) -> ActixResult<HttpResponse> {
    USER_SERVICE.delete_user(role.0, user_id.0, &req).await
}

// 配置路由。四个角色集合通过 {role} 路径段选择。
pub fn configure_user_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/users")
            .wrap(middlewares::RequireJWT)
            .service(
                web::scope("")
                    .wrap(middlewares::RequireRole::new_any(UserRole::admin_roles()))
                    .route("", web::get().to(list_users))
                    .route("", web::post().to(create_user))
                    .route("/{role}/{id}", web::get().to(get_user))
                    .route("/{role}/{id}", web::put().to(update_user))
                    .route("/{role}/{id}", web::delete().to(delete_user)),
            ),
    );
}
