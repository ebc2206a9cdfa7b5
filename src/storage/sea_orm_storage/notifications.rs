//! 通知存储操作

use super::SeaOrmStorage;
use crate::entity::notifications::{ActiveModel, Column, Entity as Notifications};
use crate::errors::{Result, SchoolSystemError};
use crate::models::{
    PaginationInfo,
    notifications::{
        entities::Notification, requests::NotificationListQuery,
        responses::NotificationListResponse,
    },
    users::entities::UserRole,
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    Set,
};

impl SeaOrmStorage {
    /// 接收者条件：通知用 (user_role, user_id) 定位
    fn recipient_condition(role: UserRole, user_id: i64) -> Condition {
        Condition::all()
            .add(Column::UserRole.eq(role.to_string()))
            .add(Column::UserId.eq(user_id))
    }

    /// 投递一条通知
    pub async fn create_notification_impl(
        &self,
        role: UserRole,
        user_id: i64,
        title: &str,
        body: &str,
    ) -> Result<Notification> {
        let now = chrono::Utc::now().timestamp();

        let model = ActiveModel {
            user_role: Set(role.to_string()),
            user_id: Set(user_id),
            title: Set(title.to_string()),
            body: Set(body.to_string()),
            read: Set(false),
            created_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| SchoolSystemError::database_operation(format!("创建通知失败: {e}")))?;

        Ok(result.into_notification())
    }

    /// 分页列出用户的通知
    pub async fn list_notifications_with_pagination_impl(
        &self,
        role: UserRole,
        user_id: i64,
        query: NotificationListQuery,
    ) -> Result<NotificationListResponse> {
        let page = query.page.unwrap_or(1).max(1) as u64;
        let size = query.size.unwrap_or(10).clamp(1, 100) as u64;

        let mut select = Notifications::find().filter(Self::recipient_condition(role, user_id));

        if query.unread_only.unwrap_or(false) {
            select = select.filter(Column::Read.eq(false));
        }

        select = select.order_by_desc(Column::CreatedAt);

        let paginator = select.paginate(&self.db, size);
        let total = paginator
            .num_items()
            .await
            .map_err(|e| SchoolSystemError::database_operation(format!("查询通知总数失败: {e}")))?;
        let pages = paginator
            .num_pages()
            .await
            .map_err(|e| SchoolSystemError::database_operation(format!("查询通知页数失败: {e}")))?;
        let notifications = paginator
            .fetch_page(page - 1)
            .await
            .map_err(|e| SchoolSystemError::database_operation(format!("查询通知列表失败: {e}")))?;

        Ok(NotificationListResponse {
            items: notifications
                .into_iter()
                .map(|m| m.into_notification())
                .collect(),
            pagination: PaginationInfo {
                page: page as i64,
                page_size: size as i64,
                total: total as i64,
                total_pages: pages as i64,
            },
        })
    }

    /// 未读通知数量
    pub async fn get_unread_notification_count_impl(
        &self,
        role: UserRole,
        user_id: i64,
    ) -> Result<i64> {
        let count = Notifications::find()
            .filter(Self::recipient_condition(role, user_id))
            .filter(Column::Read.eq(false))
            .count(&self.db)
            .await
            .map_err(|e| SchoolSystemError::database_operation(format!("统计未读通知失败: {e}")))?;

        Ok(count as i64)
    }

    /// 标记单条通知为已读（只能标记自己的通知）
    pub async fn mark_notification_read_impl(
        &self,
        role: UserRole,
        user_id: i64,
        notification_id: i64,
    ) -> Result<bool> {
        let result = Notifications::update_many()
            .col_expr(Column::Read, sea_orm::sea_query::Expr::value(true))
            .filter(Self::recipient_condition(role, user_id))
            .filter(Column::Id.eq(notification_id))
            .exec(&self.db)
            .await
            .map_err(|e| SchoolSystemError::database_operation(format!("标记通知已读失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }

    /// 标记全部通知为已读，返回标记数量
    pub async fn mark_all_notifications_read_impl(
        &self,
        role: UserRole,
        user_id: i64,
    ) -> Result<i64> {
        let result = Notifications::update_many()
            .col_expr(Column::Read, sea_orm::sea_query::Expr::value(true))
            .filter(Self::recipient_condition(role, user_id))
            .filter(Column::Read.eq(false))
            .exec(&self.db)
            .await
            .map_err(|e| SchoolSystemError::database_operation(format!("标记全部已读失败: {e}")))?;

        Ok(result.rows_affected as i64)
    }
}
