pub mod children;
pub mod link;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::assignments::requests::AssignmentListQuery;
use crate::models::courses::requests::CourseListQuery;
use crate::storage::Storage;

pub struct ParentService {
    storage: Option<Arc<dyn Storage>>,
}

impl ParentService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> Arc<dyn Storage> {
        if let Some(storage) = &self.storage {
            storage.clone()
        } else {
            request
                .app_data::<actix_web::web::Data<Arc<dyn Storage>>>()
                .expect("Storage not found in app data")
                .get_ref()
                .clone()
        }
    }

    // 管理员绑定家长和学生
    pub async fn link_child(
        &self,
        parent_id: i64,
        student_id: i64,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        link::handle_link_child(self, parent_id, student_id, request).await
    }

    // 管理员解绑
    pub async fn unlink_child(
        &self,
        parent_id: i64,
        student_id: i64,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        link::handle_unlink_child(self, parent_id, student_id, request).await
    }

    // 家长查看自己的孩子
    pub async fn list_children(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        children::handle_list_children(self, request).await
    }

    // 家长只读查看孩子的课程
    pub async fn list_child_courses(
        &self,
        student_id: i64,
        query: CourseListQuery,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        children::handle_list_child_courses(self, student_id, query, request).await
    }

    // 家长只读查看孩子的作业
    pub async fn list_child_assignments(
        &self,
        student_id: i64,
        query: AssignmentListQuery,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        children::handle_list_child_assignments(self, student_id, query, request).await
    }
}
