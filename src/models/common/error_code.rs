use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// 业务错误码
///
/// 与 HTTP 状态码独立，前端依据 code 分支处理。
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/api.ts")]
#[repr(i32)]
pub enum ErrorCode {
    Success = 0,

    // 通用
    BadRequest = 1400,
    Unauthorized = 1401,
    Forbidden = 1403,
    NotFound = 1404,
    InternalServerError = 1500,

    // 认证
    AuthFailed = 2001,
    RegisterFailed = 2002,
    AccountNotActivated = 2003,
    TokenInvalid = 2004,

    // 用户
    UserNotFound = 3001,
    UserEmailInvalid = 3002,
    UserEmailAlreadyExists = 3003,
    UserPasswordInvalid = 3004,
    UserBioInvalid = 3005,
    UserDateOfBirthInvalid = 3006,
    UserCreationFailed = 3007,
    UserUpdateFailed = 3008,

    // 课程
    CourseNotFound = 4001,
    StudentNotEnrolled = 4002,
    StudentAlreadyEnrolled = 4003,

    // 作业与提交
    AssignmentNotFound = 5001,
    SubmissionNotFound = 5002,

    // 家长
    ChildNotLinked = 6001,
    ChildAlreadyLinked = 6002,

    // 通知
    NotificationNotFound = 7001,
}
