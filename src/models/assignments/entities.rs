use serde::{Deserialize, Serialize};
use ts_rs::TS;

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/assignment.ts")]
pub struct Assignment {
    // 唯一 ID
    pub id: i64,
    // 关联的课程 ID
    pub course_id: i64,
    // 布置作业的教师 ID
    pub assigned_by: i64,
    // 作业标题
    pub title: String,
    // 作业描述
    pub content: Option<String>,
    // 附件的不透明 blob 名称（上传本身不在本服务范围内）
    pub attachments: Vec<String>,
    // 截止时间
    pub due_by: Option<chrono::DateTime<chrono::Utc>>,
    // 预计完成分钟数
    pub estimated_minutes: Option<i32>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}
