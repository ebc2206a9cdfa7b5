//! 数据模型定义
//!
//! 按领域划分的请求 / 响应 / 实体模型，以及统一响应封装。

pub mod assignments;
pub mod auth;
pub mod common;
pub mod courses;
pub mod notifications;
pub mod parents;
pub mod submissions;
pub mod users;

pub use common::error_code::ErrorCode;
pub use common::pagination::{PaginationInfo, PaginationQuery};
pub use common::response::ApiResponse;

/// 程序启动时间，注入到 app_data 用于运行状态上报
#[derive(Debug, Clone)]
pub struct AppStartTime {
    pub start_datetime: chrono::DateTime<chrono::Utc>,
}
