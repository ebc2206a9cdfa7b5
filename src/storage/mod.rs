use std::sync::Arc;

use crate::models::{
    assignments::{
        entities::Assignment,
        requests::{AssignmentListQuery, CreateAssignmentRequest, UpdateAssignmentRequest},
        responses::AssignmentListResponse,
    },
    courses::{
        entities::Course,
        requests::{CourseListQuery, CreateCourseRequest, UpdateCourseRequest},
        responses::{CourseListResponse, CourseStudentListResponse},
    },
    notifications::{
        entities::Notification, requests::NotificationListQuery,
        responses::NotificationListResponse,
    },
    submissions::{
        entities::Submission,
        requests::{CreateSubmissionRequest, SubmissionListQuery},
        responses::SubmissionListResponse,
    },
    users::{
        entities::{User, UserRole},
        requests::{CreateUserRequest, UpdateUserRequest, UserListQuery},
        responses::UserListResponse,
    },
};

use crate::models::PaginationQuery;

use crate::errors::Result;

pub mod sea_orm_storage;

#[async_trait::async_trait]
pub trait Storage: Send + Sync {
    /// 用户管理方法
    ///
    /// 每个角色一张独立集合，读写都必须带上角色。
    // 创建用户（落到请求中角色对应的集合）
    async fn create_user(&self, user: CreateUserRequest) -> Result<User>;
    // 在指定角色集合中按 ID 获取用户
    async fn get_user_by_id(&self, role: UserRole, id: i64) -> Result<Option<User>>;
    // 在指定角色集合中按邮箱获取用户
    async fn get_user_by_email(&self, role: UserRole, email: &str) -> Result<Option<User>>;
    // 按登录探查顺序在所有角色集合中查找邮箱
    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>>;
    // 列出指定角色集合中的用户
    async fn list_users_with_pagination(&self, query: UserListQuery) -> Result<UserListResponse>;
    // 更新用户信息
    async fn update_user(
        &self,
        role: UserRole,
        id: i64,
        update: UpdateUserRequest,
    ) -> Result<Option<User>>;
    // 删除用户
    async fn delete_user(&self, role: UserRole, id: i64) -> Result<bool>;
    // 更新用户最后登录时间
    async fn update_last_login(&self, role: UserRole, id: i64) -> Result<bool>;
    // 统计指定角色集合中的用户数量
    async fn count_users(&self, role: UserRole) -> Result<u64>;
    // 统计所有角色集合中的用户总数
    async fn count_all_users(&self) -> Result<u64>;

    /// 课程管理方法
    // 创建课程
    async fn create_course(&self, teacher_id: i64, course: CreateCourseRequest) -> Result<Course>;
    // 通过ID获取课程信息
    async fn get_course_by_id(&self, course_id: i64) -> Result<Option<Course>>;
    // 列出课程
    async fn list_courses_with_pagination(
        &self,
        query: CourseListQuery,
    ) -> Result<CourseListResponse>;
    // 更新课程信息
    async fn update_course(
        &self,
        course_id: i64,
        update: UpdateCourseRequest,
    ) -> Result<Option<Course>>;
    // 删除课程
    async fn delete_course(&self, course_id: i64) -> Result<bool>;

    /// 选课管理方法
    // 学生选入课程，已选过则返回 false
    async fn enroll_student(&self, course_id: i64, student_id: i64) -> Result<bool>;
    // 学生退出课程
    async fn unenroll_student(&self, course_id: i64, student_id: i64) -> Result<bool>;
    // 学生是否已选该课程
    async fn is_student_enrolled(&self, course_id: i64, student_id: i64) -> Result<bool>;
    // 列出课程下的学生
    async fn list_course_students(
        &self,
        course_id: i64,
        query: PaginationQuery,
    ) -> Result<CourseStudentListResponse>;
    // 列出学生选的课程
    async fn list_student_courses(
        &self,
        student_id: i64,
        query: CourseListQuery,
    ) -> Result<CourseListResponse>;

    /// 家长关联方法
    // 关联家长与学生，已关联则返回 false
    async fn link_child(&self, parent_id: i64, student_id: i64) -> Result<bool>;
    // 解除家长与学生的关联
    async fn unlink_child(&self, parent_id: i64, student_id: i64) -> Result<bool>;
    // 学生是否为该家长的孩子
    async fn is_child_of(&self, parent_id: i64, student_id: i64) -> Result<bool>;
    // 列出家长的孩子
    async fn list_children(&self, parent_id: i64) -> Result<Vec<User>>;
    // 列出学生的家长
    async fn list_parents_of_student(&self, student_id: i64) -> Result<Vec<User>>;

    /// 作业管理方法
    // 发布作业
    async fn create_assignment(
        &self,
        course_id: i64,
        assigned_by: i64,
        assignment: CreateAssignmentRequest,
    ) -> Result<Assignment>;
    // 通过ID获取作业
    async fn get_assignment_by_id(&self, assignment_id: i64) -> Result<Option<Assignment>>;
    // 列出课程下的作业
    async fn list_course_assignments(
        &self,
        course_id: i64,
        query: AssignmentListQuery,
    ) -> Result<AssignmentListResponse>;
    // 列出学生所有已选课程的作业
    async fn list_student_assignments(
        &self,
        student_id: i64,
        query: AssignmentListQuery,
    ) -> Result<AssignmentListResponse>;
    // 更新作业
    async fn update_assignment(
        &self,
        assignment_id: i64,
        update: UpdateAssignmentRequest,
    ) -> Result<Option<Assignment>>;
    // 删除作业
    async fn delete_assignment(&self, assignment_id: i64) -> Result<bool>;

    /// 提交管理方法
    // 提交作业；同一学生重复提交会覆盖之前的提交内容
    async fn upsert_submission(
        &self,
        assignment_id: i64,
        student_id: i64,
        submission: CreateSubmissionRequest,
    ) -> Result<Submission>;
    // 通过ID获取提交
    async fn get_submission_by_id(&self, submission_id: i64) -> Result<Option<Submission>>;
    // 获取某学生对某作业的提交
    async fn get_submission_by_assignment_and_student(
        &self,
        assignment_id: i64,
        student_id: i64,
    ) -> Result<Option<Submission>>;
    // 列出作业下的全部提交
    async fn list_assignment_submissions(
        &self,
        assignment_id: i64,
        query: SubmissionListQuery,
    ) -> Result<SubmissionListResponse>;
    // 列出学生的全部提交
    async fn list_student_submissions(
        &self,
        student_id: i64,
        query: SubmissionListQuery,
    ) -> Result<SubmissionListResponse>;
    // 给提交打分
    async fn grade_submission(
        &self,
        submission_id: i64,
        grade: f64,
        graded_by: i64,
    ) -> Result<Option<Submission>>;

    /// 通知方法
    // 投递一条通知
    async fn create_notification(
        &self,
        role: UserRole,
        user_id: i64,
        title: &str,
        body: &str,
    ) -> Result<Notification>;
    // 列出用户的通知
    async fn list_notifications_with_pagination(
        &self,
        role: UserRole,
        user_id: i64,
        query: NotificationListQuery,
    ) -> Result<NotificationListResponse>;
    // 未读通知数量
    async fn get_unread_notification_count(&self, role: UserRole, user_id: i64) -> Result<i64>;
    // 标记单条通知为已读
    async fn mark_notification_read(
        &self,
        role: UserRole,
        user_id: i64,
        notification_id: i64,
    ) -> Result<bool>;
    // 标记全部通知为已读，返回标记数量
    async fn mark_all_notifications_read(&self, role: UserRole, user_id: i64) -> Result<i64>;
}

pub async fn create_storage() -> Result<Arc<dyn Storage>> {
    let storage = sea_orm_storage::SeaOrmStorage::new_async().await?;
    Ok(Arc::new(storage))
}
