use serde::{Deserialize, Serialize};
use ts_rs::TS;

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/course.ts")]
pub struct Course {
    // 唯一 ID
    pub id: i64,
    // 授课教师 ID
    pub teacher_id: i64,
    // 课程名称
    pub name: String,
    // 学科
    pub subject: String,
    // 课程描述
    pub description: Option<String>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}
