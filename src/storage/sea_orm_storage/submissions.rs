//! 提交存储操作

use super::SeaOrmStorage;
use crate::entity::submissions::{ActiveModel, Column, Entity as Submissions};
use crate::errors::{Result, SchoolSystemError};
use crate::models::{
    PaginationInfo,
    submissions::{
        entities::Submission,
        requests::{CreateSubmissionRequest, SubmissionListQuery},
        responses::SubmissionListResponse,
    },
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    Select, Set,
};

impl SeaOrmStorage {
    /// 提交作业；同一学生对同一作业的重复提交覆盖旧内容
    pub async fn upsert_submission_impl(
        &self,
        assignment_id: i64,
        student_id: i64,
        req: CreateSubmissionRequest,
    ) -> Result<Submission> {
        let now = chrono::Utc::now().timestamp();

        let attachments = if req.attachments.is_empty() {
            None
        } else {
            Some(serde_json::to_string(&req.attachments)?)
        };

        let existing = self
            .get_submission_by_assignment_and_student_impl(assignment_id, student_id)
            .await?;

        if let Some(existing) = existing {
            // 重新提交会清掉已有评分
            let model = ActiveModel {
                id: Set(existing.id),
                content: Set(req.content),
                attachments: Set(attachments),
                grade: Set(None),
                graded_by: Set(None),
                updated_at: Set(now),
                ..Default::default()
            };

            let result = model
                .update(&self.db)
                .await
                .map_err(|e| SchoolSystemError::database_operation(format!("更新提交失败: {e}")))?;

            return Ok(result.into_submission());
        }

        let model = ActiveModel {
            assignment_id: Set(assignment_id),
            student_id: Set(student_id),
            content: Set(req.content),
            attachments: Set(attachments),
            submitted_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| SchoolSystemError::database_operation(format!("创建提交失败: {e}")))?;

        Ok(result.into_submission())
    }

    /// 通过 ID 获取提交
    pub async fn get_submission_by_id_impl(
        &self,
        submission_id: i64,
    ) -> Result<Option<Submission>> {
        let result = Submissions::find_by_id(submission_id)
            .one(&self.db)
            .await
            .map_err(|e| SchoolSystemError::database_operation(format!("查询提交失败: {e}")))?;

        Ok(result.map(|m| m.into_submission()))
    }

    /// 获取某学生对某作业的提交
    pub async fn get_submission_by_assignment_and_student_impl(
        &self,
        assignment_id: i64,
        student_id: i64,
    ) -> Result<Option<Submission>> {
        let result = Submissions::find()
            .filter(
                Condition::all()
                    .add(Column::AssignmentId.eq(assignment_id))
                    .add(Column::StudentId.eq(student_id)),
            )
            .one(&self.db)
            .await
            .map_err(|e| SchoolSystemError::database_operation(format!("查询提交失败: {e}")))?;

        Ok(result.map(|m| m.into_submission()))
    }

    /// 分页列出作业下的全部提交
    pub async fn list_assignment_submissions_impl(
        &self,
        assignment_id: i64,
        query: SubmissionListQuery,
    ) -> Result<SubmissionListResponse> {
        let select = Submissions::find().filter(Column::AssignmentId.eq(assignment_id));
        self.paginate_submissions(select, query).await
    }

    /// 分页列出学生的全部提交
    pub async fn list_student_submissions_impl(
        &self,
        student_id: i64,
        query: SubmissionListQuery,
    ) -> Result<SubmissionListResponse> {
        let select = Submissions::find().filter(Column::StudentId.eq(student_id));
        self.paginate_submissions(select, query).await
    }

    /// 给提交打分
    pub async fn grade_submission_impl(
        &self,
        submission_id: i64,
        grade: f64,
        graded_by: i64,
    ) -> Result<Option<Submission>> {
        let existing = self.get_submission_by_id_impl(submission_id).await?;
        if existing.is_none() {
            return Ok(None);
        }

        let now = chrono::Utc::now().timestamp();

        let model = ActiveModel {
            id: Set(submission_id),
            grade: Set(Some(grade)),
            graded_by: Set(Some(graded_by)),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model
            .update(&self.db)
            .await
            .map_err(|e| SchoolSystemError::database_operation(format!("提交评分失败: {e}")))?;

        Ok(Some(result.into_submission()))
    }

    /// 提交列表的公共分页逻辑
    async fn paginate_submissions(
        &self,
        select: Select<Submissions>,
        query: SubmissionListQuery,
    ) -> Result<SubmissionListResponse> {
        let page = query.page.unwrap_or(1).max(1) as u64;
        let size = query.size.unwrap_or(10).clamp(1, 100) as u64;

        let select = select.order_by_desc(Column::SubmittedAt);

        let paginator = select.paginate(&self.db, size);
        let total = paginator
            .num_items()
            .await
            .map_err(|e| SchoolSystemError::database_operation(format!("查询提交总数失败: {e}")))?;
        let pages = paginator
            .num_pages()
            .await
            .map_err(|e| SchoolSystemError::database_operation(format!("查询提交页数失败: {e}")))?;
        let submissions = paginator
            .fetch_page(page - 1)
            .await
            .map_err(|e| SchoolSystemError::database_operation(format!("查询提交列表失败: {e}")))?;

        Ok(SubmissionListResponse {
            items: submissions
                .into_iter()
                .map(|m| m.into_submission())
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
