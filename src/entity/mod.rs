//! SeaORM 数据库实体
//!
//! 每个角色集合对应一张独立的表，列结构一致。

pub mod admins;
pub mod assignments;
pub mod course_students;
pub mod courses;
pub mod notifications;
pub mod parent_students;
pub mod parents;
pub mod prelude;
pub mod students;
pub mod submissions;
pub mod teachers;
