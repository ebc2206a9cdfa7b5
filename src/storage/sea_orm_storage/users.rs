use super::SeaOrmStorage;
use crate::errors::{Result, SchoolSystemError};
use crate::models::{
    PaginationInfo,
    users::{
        entities::{User, UserRole},
        requests::{CreateUserRequest, UpdateUserRequest, UserListQuery},
        responses::UserListResponse,
    },
};
use crate::utils::escape_like_pattern;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    Set,
};

/// 把同一段查询逻辑展开到四个角色集合上。
///
/// 四张表列结构一致（教师多一个 subjects 列），实体模块在宏体内
/// 以 `$entity` 别名出现，调用方写一份逻辑即可。
macro_rules! for_role {
    ($role:expr, $entity:ident, $body:block) => {
        match $role {
            UserRole::Student => {
                use crate::entity::students as $entity;
                $body
            }
            UserRole::Teacher => {
                use crate::entity::teachers as $entity;
                $body
            }
            UserRole::Parent => {
                use crate::entity::parents as $entity;
                $body
            }
            UserRole::Admin => {
                use crate::entity::admins as $entity;
                $body
            }
        }
    };
}

impl SeaOrmStorage {
    /// 创建用户，写入角色对应的集合
    pub async fn create_user_impl(&self, req: CreateUserRequest) -> Result<User> {
        let now = chrono::Utc::now().timestamp();
        let role = req.role;

        // 教师集合多一个 subjects 列，单独走教师实体
        if role == UserRole::Teacher {
            use crate::entity::teachers;

            let subjects = req
                .subjects
                .as_ref()
                .map(serde_json::to_string)
                .transpose()?;

            let model = teachers::ActiveModel {
                email: Set(req.email),
                password_hash: Set(req.password),
                first_name: Set(req.first_name),
                last_name: Set(req.last_name),
                bio: Set(req.bio.unwrap_or_default()),
                date_of_birth: Set(req.date_of_birth.unwrap_or_default()),
                avatar_url: Set(req.avatar_url),
                activated: Set(false),
                subjects: Set(subjects),
                created_at: Set(now),
                updated_at: Set(now),
                ..Default::default()
            };

            let result = model
                .insert(&self.db)
                .await
                .map_err(|e| SchoolSystemError::database_operation(format!("创建用户失败: {e}")))?;

            return Ok(result.into_user());
        }

        for_role!(role, ent, {
            let model = ent::ActiveModel {
                email: Set(req.email),
                password_hash: Set(req.password),
                first_name: Set(req.first_name),
                last_name: Set(req.last_name),
                bio: Set(req.bio.unwrap_or_default()),
                date_of_birth: Set(req.date_of_birth.unwrap_or_default()),
                avatar_url: Set(req.avatar_url),
                activated: Set(false),
                created_at: Set(now),
                updated_at: Set(now),
                ..Default::default()
            };

            let result = model
                .insert(&self.db)
                .await
                .map_err(|e| SchoolSystemError::database_operation(format!("创建用户失败: {e}")))?;

            Ok(result.into_user())
        })
    }

    /// 在指定角色集合中按 ID 获取用户
    pub async fn get_user_by_id_impl(&self, role: UserRole, id: i64) -> Result<Option<User>> {
        for_role!(role, ent, {
            let result = ent::Entity::find_by_id(id)
                .one(&self.db)
                .await
                .map_err(|e| SchoolSystemError::database_operation(format!("查询用户失败: {e}")))?;

            Ok(result.map(|m| m.into_user()))
        })
    }

    /// 在指定角色集合中按邮箱获取用户
    pub async fn get_user_by_email_impl(&self, role: UserRole, email: &str) -> Result<Option<User>> {
        for_role!(role, ent, {
            let result = ent::Entity::find()
                .filter(ent::Column::Email.eq(email))
                .one(&self.db)
                .await
                .map_err(|e| SchoolSystemError::database_operation(format!("查询用户失败: {e}")))?;

            Ok(result.map(|m| m.into_user()))
        })
    }

    /// 按固定探查顺序在各角色集合中查找邮箱，返回第一个命中
    pub async fn find_user_by_email_impl(&self, email: &str) -> Result<Option<User>> {
        for role in UserRole::probe_order() {
            if let Some(user) = self.get_user_by_email_impl(*role, email).await? {
                return Ok(Some(user));
            }
        }
        Ok(None)
    }

    /// 分页列出指定角色集合中的用户
    pub async fn list_users_with_pagination_impl(
        &self,
        query: UserListQuery,
    ) -> Result<UserListResponse> {
        let page = query.page.unwrap_or(1).max(1) as u64;
        let size = query.size.unwrap_or(10).clamp(1, 100) as u64;

        for_role!(query.role, ent, {
            let mut select = ent::Entity::find();

            // 搜索条件
            if let Some(ref search) = query.search
                && !search.trim().is_empty()
            {
                let escaped = escape_like_pattern(search.trim());
                select = select.filter(
                    Condition::any()
                        .add(ent::Column::Email.contains(&escaped))
                        .add(ent::Column::FirstName.contains(&escaped))
                        .add(ent::Column::LastName.contains(&escaped)),
                );
            }

            // 激活状态筛选
            if let Some(activated) = query.activated {
                select = select.filter(ent::Column::Activated.eq(activated));
            }

            select = select.order_by_desc(ent::Column::CreatedAt);

            let paginator = select.paginate(&self.db, size);
            let total = paginator.num_items().await.map_err(|e| {
                SchoolSystemError::database_operation(format!("查询用户总数失败: {e}"))
            })?;
            let pages = paginator.num_pages().await.map_err(|e| {
                SchoolSystemError::database_operation(format!("查询用户页数失败: {e}"))
            })?;
            let users = paginator.fetch_page(page - 1).await.map_err(|e| {
                SchoolSystemError::database_operation(format!("查询用户列表失败: {e}"))
            })?;

            Ok(UserListResponse {
                items: users.into_iter().map(|m| m.into_user()).collect(),
                pagination: PaginationInfo {
                    page: page as i64,
                    page_size: size as i64,
                    total: total as i64,
                    total_pages: pages as i64,
                },
            })
        })
    }

    /// 更新用户信息
    pub async fn update_user_impl(
        &self,
        role: UserRole,
        id: i64,
        update: UpdateUserRequest,
    ) -> Result<Option<User>> {
        // 先检查用户是否存在
        if self.get_user_by_id_impl(role, id).await?.is_none() {
            return Ok(None);
        }

        // subjects 列只有教师集合有，单独更新
        if role == UserRole::Teacher
            && let Some(ref subjects) = update.subjects
        {
            use crate::entity::teachers;

            let raw = serde_json::to_string(subjects)?;
            teachers::Entity::update_many()
                .col_expr(
                    teachers::Column::Subjects,
                    sea_orm::sea_query::Expr::value(raw),
                )
                .filter(teachers::Column::Id.eq(id))
                .exec(&self.db)
                .await
                .map_err(|e| {
                    SchoolSystemError::database_operation(format!("更新教师科目失败: {e}"))
                })?;
        }

        let now = chrono::Utc::now().timestamp();

        for_role!(role, ent, {
            let mut model = ent::ActiveModel {
                id: Set(id),
                updated_at: Set(now),
                ..Default::default()
            };

            if let Some(email) = update.email {
                model.email = Set(email);
            }
            if let Some(password) = update.password {
                model.password_hash = Set(password);
            }
            if let Some(first_name) = update.first_name {
                model.first_name = Set(first_name);
            }
            if let Some(last_name) = update.last_name {
                model.last_name = Set(last_name);
            }
            if let Some(bio) = update.bio {
                model.bio = Set(bio);
            }
            if let Some(date_of_birth) = update.date_of_birth {
                model.date_of_birth = Set(date_of_birth);
            }
            if let Some(avatar_url) = update.avatar_url {
                model.avatar_url = Set(Some(avatar_url));
            }
            if let Some(activated) = update.activated {
                model.activated = Set(activated);
            }

            model
                .update(&self.db)
                .await
                .map_err(|e| SchoolSystemError::database_operation(format!("更新用户失败: {e}")))?;
        });

        self.get_user_by_id_impl(role, id).await
    }

    /// 删除用户
    pub async fn delete_user_impl(&self, role: UserRole, id: i64) -> Result<bool> {
        for_role!(role, ent, {
            let result = ent::Entity::delete_by_id(id)
                .exec(&self.db)
                .await
                .map_err(|e| SchoolSystemError::database_operation(format!("删除用户失败: {e}")))?;

            Ok(result.rows_affected > 0)
        })
    }

    /// 更新用户最后登录时间
    pub async fn update_last_login_impl(&self, role: UserRole, id: i64) -> Result<bool> {
        let now = chrono::Utc::now().timestamp();

        for_role!(role, ent, {
            let result = ent::Entity::update_many()
                .col_expr(ent::Column::LastLogin, sea_orm::sea_query::Expr::value(now))
                .filter(ent::Column::Id.eq(id))
                .exec(&self.db)
                .await
                .map_err(|e| {
                    SchoolSystemError::database_operation(format!("更新最后登录时间失败: {e}"))
                })?;

            Ok(result.rows_affected > 0)
        })
    }

    /// 统计指定角色集合中的用户数量
    pub async fn count_users_impl(&self, role: UserRole) -> Result<u64> {
        for_role!(role, ent, {
            let count = ent::Entity::find().count(&self.db).await.map_err(|e| {
                SchoolSystemError::database_operation(format!("统计用户数量失败: {e}"))
            })?;

            Ok(count)
        })
    }

    /// 统计所有角色集合中的用户总数
    pub async fn count_all_users_impl(&self) -> Result<u64> {
        let mut total = 0u64;
        for role in UserRole::all_roles() {
            total += self.count_users_impl(*role).await?;
        }
        Ok(total)
    }
}
