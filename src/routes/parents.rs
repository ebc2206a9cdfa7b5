use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::assignments::requests::AssignmentListQuery;
use crate::models::courses::requests::CourseListQuery;
use crate::models::parents::requests::LinkChildRequest;
use crate::models::users::entities::UserRole;
use crate::services::ParentService;
use crate::utils::{SafeParentIdI64, SafeStudentIdI64};

// 懒加载的全局 ParentService 实例
static PARENT_SERVICE: Lazy<ParentService> = Lazy::new(ParentService::new_lazy);

// HTTP处理程序
pub async fn link_child(
    req: HttpRequest,
    parent_id: SafeParentIdI64,
    link_data: web::Json<LinkChildRequest>,
) -> ActixResult<HttpResponse> {
    PARENT_SERVICE
        .link_child(parent_id.0, link_data.student_id, &req)
        .await
}

pub async fn unlink_child(
    req: HttpRequest,
    parent_id: SafeParentIdI64,
    student_id: SafeStudentIdI64,
) -> ActixResult<HttpResponse> {
    PARENT_SERVICE
        .unlink_child(parent_id.0, student_id.0, &req)
        .await
}

pub async fn list_children(req: HttpRequest) -> ActixResult<HttpResponse> {
    PARENT_SERVICE.list_children(&req).await
}

pub async fn list_child_courses(
    req: HttpRequest,
    student_id: SafeStudentIdI64,
    query: web::Query<CourseListQuery>,
) -> ActixResult<HttpResponse> {
    PARENT_SERVICE
        .list_child_courses(student_id.0, query.into_inner(), &req)
        .await
}

pub async fn list_child_assignments(
    req: HttpRequest,
    student_id: SafeStudentIdI64,
    query: web::Query<AssignmentListQuery>,
) -> ActixResult<HttpResponse> {
    PARENT_SERVICE
        .list_child_assignments(student_id.0, query.into_inner(), &req)
        .await
}

// 配置路由。绑定/解绑走管理员，其余是家长本人的只读视图。
pub fn configure_parents_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/parents")
            .wrap(middlewares::RequireJWT)
            .service(
                web::scope("/children")
                    .wrap(middlewares::RequireRole::new(&UserRole::Parent))
                    .route("", web::get().to(list_children))
                    .route("/{student_id}/courses", web::get().to(list_child_courses))
                    .route(
                        "/{student_id}/assignments",
                        web::get().to(list_child_assignments),
                    ),
            )
            .service(
                web::scope("/{parent_id}/children")
                    .wrap(middlewares::RequireRole::new_any(UserRole::admin_roles()))
                    .route("", web::post().to(link_child))
                    .route("/{student_id}", web::delete().to(unlink_child)),
            ),
    );
}
