use serde::Deserialize;
use ts_rs::TS;

use super::entities::UserRole;

// 创建用户请求（注册 / 管理员创建共用）
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/user.ts")]
pub struct CreateUserRequest {
    pub role: UserRole,
    pub email: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
    #[serde(default)]
    pub bio: Option<String>,
    #[serde(default)]
    pub date_of_birth: Option<String>,
    #[serde(default)]
    pub avatar_url: Option<String>,
    /// 仅教师角色有效
    #[serde(default)]
    pub subjects: Option<Vec<String>>,
}

// 更新用户请求（管理员）
#[derive(Debug, Default, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/user.ts")]
pub struct UpdateUserRequest {
    pub email: Option<String>,
    /// 已经哈希过的密码，由服务层填入
    #[ts(skip)]
    pub password: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub bio: Option<String>,
    pub date_of_birth: Option<String>,
    pub avatar_url: Option<String>,
    pub activated: Option<bool>,
    pub subjects: Option<Vec<String>>,
}

// 用户列表查询参数
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/user.ts")]
pub struct UserListQuery {
    pub role: UserRole,
    pub page: Option<i64>,
    pub size: Option<i64>,
    /// 按邮箱或姓名模糊搜索
    pub search: Option<String>,
    pub activated: Option<bool>,
}
