use serde::{Deserialize, Serialize};
use ts_rs::TS;

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/submission.ts")]
pub struct Submission {
    // 唯一 ID
    pub id: i64,
    // 对应的作业 ID
    pub assignment_id: i64,
    // 提交学生 ID
    pub student_id: i64,
    // 提交正文
    pub content: Option<String>,
    // 附件的不透明 blob 名称
    pub attachments: Vec<String>,
    // 评分，未评分时为空
    pub grade: Option<f64>,
    // 评分教师 ID
    pub graded_by: Option<i64>,
    pub submitted_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}
