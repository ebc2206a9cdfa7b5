//! SeaORM 存储实现
//!
//! 统一的数据库存储层，支持 SQLite、PostgreSQL 和 MySQL。
//! 每个用户角色对应一张独立的表，角色间互不可见。

mod assignments;
mod courses;
mod notifications;
mod parents;
mod submissions;
mod users;

use crate::config::AppConfig;
use crate::errors::{Result, SchoolSystemError};
use migration::{Migrator, MigratorTrait};
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use std::time::Duration;
use tracing::info;

/// SeaORM 存储实现
#[derive(Clone)]
pub struct SeaOrmStorage {
    pub(crate) db: DatabaseConnection,
}

impl SeaOrmStorage {
    /// 创建新的 SeaORM 存储实例
    pub async fn new_async() -> Result<Self> {
        let config = AppConfig::get();
        let db_url = Self::build_database_url(&config.database.url)?;

        // 根据数据库类型选择连接方式
        let db = if db_url.starts_with("sqlite://") {
            Self::connect_sqlite(&db_url, config).await?
        } else {
            Self::connect_generic(&db_url, config).await?
        };

        // 运行迁移
        Migrator::up(&db, None)
            .await
            .map_err(|e| SchoolSystemError::database_operation(format!("数据库迁移失败: {e}")))?;

        info!("SeaORM 存储初始化完成，数据库: {}", db_url);

        Ok(Self { db })
    }

    /// SQLite 专用连接（WAL + pragma 优化）
    async fn connect_sqlite(url: &str, config: &AppConfig) -> Result<DatabaseConnection> {
        use sea_orm::SqlxSqliteConnector;
        use sea_orm::sqlx::sqlite::{
            SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous,
        };
        use std::str::FromStr;

        let opt = SqliteConnectOptions::from_str(url)
            .map_err(|e| SchoolSystemError::database_config(format!("SQLite URL 解析失败: {e}")))?
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .synchronous(SqliteSynchronous::Normal)
            .busy_timeout(Duration::from_secs(5))
            .pragma("cache_size", "-64000")
            .pragma("temp_store", "memory")
            .pragma("mmap_size", "536870912")
            .pragma("wal_autocheckpoint", "1000");

        let pool = SqlitePoolOptions::new()
            .max_connections(config.database.pool_size)
            .min_connections(1)
            .test_before_acquire(true)
            .acquire_timeout(Duration::from_secs(config.database.timeout))
            .idle_timeout(Duration::from_secs(300))
            .connect_with(opt)
            .await
            .map_err(|e| SchoolSystemError::database_connection(format!("SQLite 连接失败: {e}")))?;

        Ok(SqlxSqliteConnector::from_sqlx_sqlite_pool(pool))
    }

    /// 通用连接（PostgreSQL、MySQL 等）
    async fn connect_generic(url: &str, config: &AppConfig) -> Result<DatabaseConnection> {
        let mut opt = ConnectOptions::new(url);
        opt.max_connections(config.database.pool_size)
            .min_connections(5)
            .connect_timeout(Duration::from_secs(config.database.timeout))
            .acquire_timeout(Duration::from_secs(config.database.timeout))
            .idle_timeout(Duration::from_secs(600))
            .max_lifetime(Duration::from_secs(1800))
            .sqlx_logging(false)
            .sqlx_logging_level(tracing::log::LevelFilter::Debug);

        Database::connect(opt)
            .await
            .map_err(|e| SchoolSystemError::database_connection(format!("无法连接到数据库: {e}")))
    }

    /// 从 URL 自动推断数据库类型并构建连接 URL
    fn build_database_url(url: &str) -> Result<String> {
        if url.starts_with("sqlite://") {
            Ok(url.to_string())
        } else if url.ends_with(".db") || url.ends_with(".sqlite") || url == ":memory:" {
            Ok(format!("sqlite://{}?mode=rwc", url))
        } else if url.starts_with("postgres://")
            || url.starts_with("postgresql://")
            || url.starts_with("mysql://")
            || url.starts_with("mariadb://")
        {
            Ok(url.to_string())
        } else {
            Err(SchoolSystemError::database_config(format!(
                "无法从 URL 推断数据库类型: {url}. 支持: sqlite://, postgres://, mysql://, 或 .db/.sqlite 文件路径"
            )))
        }
    }
}

// Storage trait 实现
use crate::models::{
    PaginationQuery,
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
use crate::storage::Storage;
use async_trait::async_trait;

#[async_trait]
impl Storage for SeaOrmStorage {
    // 用户模块
    async fn create_user(&self, user: CreateUserRequest) -> Result<User> {
        self.create_user_impl(user).await
    }

    async fn get_user_by_id(&self, role: UserRole, id: i64) -> Result<Option<User>> {
        self.get_user_by_id_impl(role, id).await
    }

    async fn get_user_by_email(&self, role: UserRole, email: &str) -> Result<Option<User>> {
        self.get_user_by_email_impl(role, email).await
    }

    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>> {
        self.find_user_by_email_impl(email).await
    }

    async fn list_users_with_pagination(&self, query: UserListQuery) -> Result<UserListResponse> {
        self.list_users_with_pagination_impl(query).await
    }

    async fn update_user(
        &self,
        role: UserRole,
        id: i64,
        update: UpdateUserRequest,
    ) -> Result<Option<User>> {
        self.update_user_impl(role, id, update).await
    }

    async fn delete_user(&self, role: UserRole, id: i64) -> Result<bool> {
        self.delete_user_impl(role, id).await
    }

    async fn update_last_login(&self, role: UserRole, id: i64) -> Result<bool> {
        self.update_last_login_impl(role, id).await
    }

    async fn count_users(&self, role: UserRole) -> Result<u64> {
        self.count_users_impl(role).await
    }

    async fn count_all_users(&self) -> Result<u64> {
        self.count_all_users_impl().await
    }

    // 课程模块
    async fn create_course(&self, teacher_id: i64, course: CreateCourseRequest) -> Result<Course> {
        self.create_course_impl(teacher_id, course).await
    }

    async fn get_course_by_id(&self, course_id: i64) -> Result<Option<Course>> {
        self.get_course_by_id_impl(course_id).await
    }

    async fn list_courses_with_pagination(
        &self,
        query: CourseListQuery,
    ) -> Result<CourseListResponse> {
        self.list_courses_with_pagination_impl(query).await
    }

    async fn update_course(
        &self,
        course_id: i64,
        update: UpdateCourseRequest,
    ) -> Result<Option<Course>> {
        self.update_course_impl(course_id, update).await
    }

    async fn delete_course(&self, course_id: i64) -> Result<bool> {
        self.delete_course_impl(course_id).await
    }

    // 选课模块
    async fn enroll_student(&self, course_id: i64, student_id: i64) -> Result<bool> {
        self.enroll_student_impl(course_id, student_id).await
    }

    async fn unenroll_student(&self, course_id: i64, student_id: i64) -> Result<bool> {
        self.unenroll_student_impl(course_id, student_id).await
    }

    async fn is_student_enrolled(&self, course_id: i64, student_id: i64) -> Result<bool> {
        self.is_student_enrolled_impl(course_id, student_id).await
    }

    async fn list_course_students(
        &self,
        course_id: i64,
        query: PaginationQuery,
    ) -> Result<CourseStudentListResponse> {
        self.list_course_students_impl(course_id, query).await
    }

    async fn list_student_courses(
        &self,
        student_id: i64,
        query: CourseListQuery,
    ) -> Result<CourseListResponse> {
        self.list_student_courses_impl(student_id, query).await
    }

    // 家长模块
    async fn link_child(&self, parent_id: i64, student_id: i64) -> Result<bool> {
        self.link_child_impl(parent_id, student_id).await
    }

    async fn unlink_child(&self, parent_id: i64, student_id: i64) -> Result<bool> {
        self.unlink_child_impl(parent_id, student_id).await
    }

    async fn is_child_of(&self, parent_id: i64, student_id: i64) -> Result<bool> {
        self.is_child_of_impl(parent_id, student_id).await
    }

    async fn list_children(&self, parent_id: i64) -> Result<Vec<User>> {
        self.list_children_impl(parent_id).await
    }

    async fn list_parents_of_student(&self, student_id: i64) -> Result<Vec<User>> {
        self.list_parents_of_student_impl(student_id).await
    }

    // 作业模块
    async fn create_assignment(
        &self,
        course_id: i64,
        assigned_by: i64,
        assignment: CreateAssignmentRequest,
    ) -> Result<Assignment> {
        self.create_assignment_impl(course_id, assigned_by, assignment)
            .await
    }

    async fn get_assignment_by_id(&self, assignment_id: i64) -> Result<Option<Assignment>> {
        self.get_assignment_by_id_impl(assignment_id).await
    }

    async fn list_course_assignments(
        &self,
        course_id: i64,
        query: AssignmentListQuery,
    ) -> Result<AssignmentListResponse> {
        self.list_course_assignments_impl(course_id, query).await
    }

    async fn list_student_assignments(
        &self,
        student_id: i64,
        query: AssignmentListQuery,
    ) -> Result<AssignmentListResponse> {
        self.list_student_assignments_impl(student_id, query).await
    }

    async fn update_assignment(
        &self,
        assignment_id: i64,
        update: UpdateAssignmentRequest,
    ) -> Result<Option<Assignment>> {
        self.update_assignment_impl(assignment_id, update).await
    }

    async fn delete_assignment(&self, assignment_id: i64) -> Result<bool> {
        self.delete_assignment_impl(assignment_id).await
    }

    // 提交模块
    async fn upsert_submission(
        &self,
        assignment_id: i64,
        student_id: i64,
        submission: CreateSubmissionRequest,
    ) -> Result<Submission> {
        self.upsert_submission_impl(assignment_id, student_id, submission)
            .await
    }

    async fn get_submission_by_id(&self, submission_id: i64) -> Result<Option<Submission>> {
        self.get_submission_by_id_impl(submission_id).await
    }

    async fn get_submission_by_assignment_and_student(
        &self,
        assignment_id: i64,
        student_id: i64,
    ) -> Result<Option<Submission>> {
        self.get_submission_by_assignment_and_student_impl(assignment_id, student_id)
            .await
    }

    async fn list_assignment_submissions(
        &self,
        assignment_id: i64,
        query: SubmissionListQuery,
    ) -> Result<SubmissionListResponse> {
        self.list_assignment_submissions_impl(assignment_id, query)
            .await
    }

    async fn list_student_submissions(
        &self,
        student_id: i64,
        query: SubmissionListQuery,
    ) -> Result<SubmissionListResponse> {
        self.list_student_submissions_impl(student_id, query).await
    }

    async fn grade_submission(
        &self,
        submission_id: i64,
        grade: f64,
        graded_by: i64,
    ) -> Result<Option<Submission>> {
        self.grade_submission_impl(submission_id, grade, graded_by)
            .await
    }

    // 通知模块
    async fn create_notification(
        &self,
        role: UserRole,
        user_id: i64,
        title: &str,
        body: &str,
    ) -> Result<Notification> {
        self.create_notification_impl(role, user_id, title, body)
            .await
    }

    async fn list_notifications_with_pagination(
        &self,
        role: UserRole,
        user_id: i64,
        query: NotificationListQuery,
    ) -> Result<NotificationListResponse> {
        self.list_notifications_with_pagination_impl(role, user_id, query)
            .await
    }

    async fn get_unread_notification_count(&self, role: UserRole, user_id: i64) -> Result<i64> {
        self.get_unread_notification_count_impl(role, user_id).await
    }

    async fn mark_notification_read(
        &self,
        role: UserRole,
        user_id: i64,
        notification_id: i64,
    ) -> Result<bool> {
        self.mark_notification_read_impl(role, user_id, notification_id)
            .await
    }

    async fn mark_all_notifications_read(&self, role: UserRole, user_id: i64) -> Result<i64> {
        self.mark_all_notifications_read_impl(role, user_id).await
    }
}
