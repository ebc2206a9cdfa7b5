//! 作业存储操作

use super::SeaOrmStorage;
use crate::entity::assignments::{ActiveModel, Column, Entity as Assignments};
use crate::entity::course_students::{Column as CourseStudentColumn, Entity as CourseStudents};
use crate::errors::{Result, SchoolSystemError};
use crate::models::{
    PaginationInfo,
    assignments::{
        entities::Assignment,
        requests::{AssignmentListQuery, CreateAssignmentRequest, UpdateAssignmentRequest},
        responses::AssignmentListResponse,
    },
};
use crate::utils::escape_like_pattern;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    Select, Set,
};

impl SeaOrmStorage {
    /// 发布作业
    pub async fn create_assignment_impl(
        &self,
        course_id: i64,
        assigned_by: i64,
        req: CreateAssignmentRequest,
    ) -> Result<Assignment> {
        let now = chrono::Utc::now().timestamp();

        let attachments = if req.attachments.is_empty() {
            None
        } else {
            Some(serde_json::to_string(&req.attachments)?)
        };

        let model = ActiveModel {
            course_id: Set(course_id),
            assigned_by: Set(assigned_by),
            title: Set(req.title),
            content: Set(req.content),
            attachments: Set(attachments),
            due_by: Set(req.due_by.map(|dt| dt.timestamp())),
            estimated_minutes: Set(req.estimated_minutes),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| SchoolSystemError::database_operation(format!("创建作业失败: {e}")))?;

        Ok(result.into_assignment())
    }

    /// 通过 ID 获取作业
    pub async fn get_assignment_by_id_impl(
        &self,
        assignment_id: i64,
    ) -> Result<Option<Assignment>> {
        let result = Assignments::find_by_id(assignment_id)
            .one(&self.db)
            .await
            .map_err(|e| SchoolSystemError::database_operation(format!("查询作业失败: {e}")))?;

        Ok(result.map(|m| m.into_assignment()))
    }

    /// 分页列出课程下的作业
    pub async fn list_course_assignments_impl(
        &self,
        course_id: i64,
        query: AssignmentListQuery,
    ) -> Result<AssignmentListResponse> {
        let select = Assignments::find().filter(Column::CourseId.eq(course_id));
        self.paginate_assignments(select, query).await
    }

    /// 分页列出学生所有已选课程的作业
    pub async fn list_student_assignments_impl(
        &self,
        student_id: i64,
        query: AssignmentListQuery,
    ) -> Result<AssignmentListResponse> {
        let enrollments = CourseStudents::find()
            .filter(CourseStudentColumn::StudentId.eq(student_id))
            .all(&self.db)
            .await
            .map_err(|e| SchoolSystemError::database_operation(format!("查询选课关联失败: {e}")))?;

        let course_ids: Vec<i64> = enrollments.iter().map(|e| e.course_id).collect();

        if course_ids.is_empty() {
            let page = query.page.unwrap_or(1).max(1);
            let size = query.size.unwrap_or(10).clamp(1, 100);
            return Ok(AssignmentListResponse {
                items: vec![],
                pagination: PaginationInfo {
                    page,
                    page_size: size,
                    total: 0,
                    total_pages: 0,
                },
            });
        }

        let select = Assignments::find().filter(Column::CourseId.is_in(course_ids));
        self.paginate_assignments(select, query).await
    }

    /// 更新作业
    pub async fn update_assignment_impl(
        &self,
        assignment_id: i64,
        update: UpdateAssignmentRequest,
    ) -> Result<Option<Assignment>> {
        let existing = self.get_assignment_by_id_impl(assignment_id).await?;
        if existing.is_none() {
            return Ok(None);
        }

        let now = chrono::Utc::now().timestamp();

        let mut model = ActiveModel {
            id: Set(assignment_id),
            updated_at: Set(now),
            ..Default::default()
        };

        if let Some(title) = update.title {
            model.title = Set(title);
        }
        if let Some(content) = update.content {
            model.content = Set(Some(content));
        }
        if let Some(attachments) = update.attachments {
            model.attachments = Set(Some(serde_json::to_string(&attachments)?));
        }
        if let Some(due_by) = update.due_by {
            model.due_by = Set(Some(due_by.timestamp()));
        }
        if let Some(estimated_minutes) = update.estimated_minutes {
            model.estimated_minutes = Set(Some(estimated_minutes));
        }

        let result = model
            .update(&self.db)
            .await
            .map_err(|e| SchoolSystemError::database_operation(format!("更新作业失败: {e}")))?;

        Ok(Some(result.into_assignment()))
    }

    /// 删除作业（提交随外键级联删除）
    pub async fn delete_assignment_impl(&self, assignment_id: i64) -> Result<bool> {
        let result = Assignments::delete_by_id(assignment_id)
            .exec(&self.db)
            .await
            .map_err(|e| SchoolSystemError::database_operation(format!("删除作业失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }

    /// 作业列表的公共分页逻辑
    async fn paginate_assignments(
        &self,
        mut select: Select<Assignments>,
        query: AssignmentListQuery,
    ) -> Result<AssignmentListResponse> {
        let page = query.page.unwrap_or(1).max(1) as u64;
        let size = query.size.unwrap_or(10).clamp(1, 100) as u64;

        if let Some(ref search) = query.search
            && !search.trim().is_empty()
        {
            let escaped = escape_like_pattern(search.trim());
            select = select.filter(
                Condition::any()
                    .add(Column::Title.contains(&escaped))
                    .add(Column::Content.contains(&escaped)),
            );
        }

        select = select.order_by_desc(Column::CreatedAt);

        let paginator = select.paginate(&self.db, size);
        let total = paginator
            .num_items()
            .await
            .map_err(|e| SchoolSystemError::database_operation(format!("查询作业总数失败: {e}")))?;
        let pages = paginator
            .num_pages()
            .await
            .map_err(|e| SchoolSystemError::database_operation(format!("查询作业页数失败: {e}")))?;
        let assignments = paginator
            .fetch_page(page - 1)
            .await
            .map_err(|e| SchoolSystemError::database_operation(format!("查询作业列表失败: {e}")))?;

        Ok(AssignmentListResponse {
            items: assignments
                .into_iter()
                .map(|m| m.into_assignment())
                .collect(),
            pagination: PaginationInfo {
                page: page as i64,
                page_size: size as i64,
                total: total as i64,
                total_pages: pages as i64,
            },
        })
    }
}
