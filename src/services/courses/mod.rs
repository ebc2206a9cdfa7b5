pub mod create;
pub mod delete;
pub mod enroll;
pub mod get;
pub mod list;
pub mod update;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::PaginationQuery;
use crate::models::courses::entities::Course;
use crate::models::courses::requests::{
    CourseListQuery, CreateCourseRequest, EnrollStudentRequest, UpdateCourseRequest,
};
use crate::models::users::entities::{User, UserRole};
use crate::storage::Storage;

pub struct CourseService {
    storage: Option<Arc<dyn Storage>>,
}

impl CourseService {
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

    pub async fn create_course(
        &self,
        course_data: CreateCourseRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        create::handle_create_course(self, course_data, request).await
    }

    pub async fn get_course(
        &self,
        course_id: i64,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        get::handle_get_course(self, course_id, request).await
    }

    pub async fn list_courses(
        &self,
        query: CourseListQuery,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        list::handle_list_courses(self, query, request).await
    }

    // 学生查看自己已选的课程
    pub async fn list_my_courses(
        &self,
        query: CourseListQuery,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        list::handle_list_my_courses(self, query, request).await
    }

    pub async fn update_course(
        &self,
        course_id: i64,
        update_data: UpdateCourseRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        update::handle_update_course(self, course_id, update_data, request).await
    }

    pub async fn delete_course(
        &self,
        course_id: i64,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        delete::handle_delete_course(self, course_id, request).await
    }

    pub async fn enroll_student(
        &self,
        course_id: i64,
        enroll_data: EnrollStudentRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        enroll::handle_enroll_student(self, course_id, enroll_data, request).await
    }

    pub async fn unenroll_student(
        &self,
        course_id: i64,
        student_id: i64,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        enroll::handle_unenroll_student(self, course_id, student_id, request).await
    }

    pub async fn list_course_students(
        &self,
        course_id: i64,
        query: PaginationQuery,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        enroll::handle_list_course_students(self, course_id, query, request).await
    }
}

/// 课程归属检查：管理员或授课教师本人可管理
pub(crate) fn can_manage_course(user: &User, course: &Course) -> bool {
    match user.role {
        UserRole::Admin => true,
        UserRole::Teacher => course.teacher_id == user.id,
        _ => false,
    }
}
