//! 家长-子女关联存储操作

use super::SeaOrmStorage;
use crate::entity::parent_students::{ActiveModel, Column, Entity as ParentStudents};
use crate::entity::parents::{Column as ParentColumn, Entity as Parents};
use crate::entity::students::{Column as StudentColumn, Entity as Students};
use crate::errors::{Result, SchoolSystemError};
use crate::models::users::entities::User;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    Set,
};

impl SeaOrmStorage {
    /// 关联家长与学生，已关联返回 false
    pub async fn link_child_impl(&self, parent_id: i64, student_id: i64) -> Result<bool> {
        if self.is_child_of_impl(parent_id, student_id).await? {
            return Ok(false);
        }

        let now = chrono::Utc::now().timestamp();

        let model = ActiveModel {
            parent_id: Set(parent_id),
            student_id: Set(student_id),
            linked_at: Set(now),
            ..Default::default()
        };

        model
            .insert(&self.db)
            .await
            .map_err(|e| SchoolSystemError::database_operation(format!("关联家长学生失败: {e}")))?;

        Ok(true)
    }

    /// 解除家长与学生的关联
    pub async fn unlink_child_impl(&self, parent_id: i64, student_id: i64) -> Result<bool> {
        let result = ParentStudents::delete_many()
            .filter(
                Condition::all()
                    .add(Column::ParentId.eq(parent_id))
                    .add(Column::StudentId.eq(student_id)),
            )
            .exec(&self.db)
            .await
            .map_err(|e| SchoolSystemError::database_operation(format!("解除家长关联失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }

    /// 学生是否为该家长的孩子
    pub async fn is_child_of_impl(&self, parent_id: i64, student_id: i64) -> Result<bool> {
        let count = ParentStudents::find()
            .filter(
                Condition::all()
                    .add(Column::ParentId.eq(parent_id))
                    .add(Column::StudentId.eq(student_id)),
            )
            .count(&self.db)
            .await
            .map_err(|e| SchoolSystemError::database_operation(format!("查询家长关联失败: {e}")))?;

        Ok(count > 0)
    }

    /// 列出家长的孩子
    pub async fn list_children_impl(&self, parent_id: i64) -> Result<Vec<User>> {
        let links = ParentStudents::find()
            .filter(Column::ParentId.eq(parent_id))
            .all(&self.db)
            .await
            .map_err(|e| SchoolSystemError::database_operation(format!("查询家长关联失败: {e}")))?;

        let student_ids: Vec<i64> = links.iter().map(|l| l.student_id).collect();
        if student_ids.is_empty() {
            return Ok(vec![]);
        }

        let students = Students::find()
            .filter(StudentColumn::Id.is_in(student_ids))
            .order_by_asc(StudentColumn::Id)
            .all(&self.db)
            .await
            .map_err(|e| SchoolSystemError::database_operation(format!("查询学生列表失败: {e}")))?;

        Ok(students.into_iter().map(|m| m.into_user()).collect())
    }

    /// 列出学生的家长（发通知时用）
    pub async fn list_parents_of_student_impl(&self, student_id: i64) -> Result<Vec<User>> {
        let links = ParentStudents::find()
            .filter(Column::StudentId.eq(student_id))
            .all(&self.db)
            .await
            .map_err(|e| SchoolSystemError::database_operation(format!("查询家长关联失败: {e}")))?;

        let parent_ids: Vec<i64> = links.iter().map(|l| l.parent_id).collect();
        if parent_ids.is_empty() {
            return Ok(vec![]);
        }

        let parents = Parents::find()
            .filter(ParentColumn::Id.is_in(parent_ids))
            .order_by_asc(ParentColumn::Id)
            .all(&self.db)
            .await
            .map_err(|e| SchoolSystemError::database_operation(format!("查询家长列表失败: {e}")))?;

        Ok(parents.into_iter().map(|m| m.into_user()).collect())
    }
}
