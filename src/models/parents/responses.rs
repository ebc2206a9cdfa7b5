use serde::Serialize;
use ts_rs::TS;

use crate::models::users::entities::User;

/// 家长名下的孩子列表
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/parent.ts")]
pub struct ChildrenListResponse {
    pub items: Vec<User>,
}
