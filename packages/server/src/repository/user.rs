use async_trait::async_trait;
use sea_orm::*;

use super::{ListFilter, RepoError, RepoResult, UserRepository, name_like};
use crate::entity::user;
use crate::models::user::{ProfileDraft, UserDraft};

pub struct SqlUserRepository {
    db: DatabaseConnection,
}

impl SqlUserRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    fn select(filter: &ListFilter) -> Select<user::Entity> {
        let mut select = user::Entity::find();
        if let Some(pattern) = filter.search_pattern() {
            select = select.filter(
                Condition::any()
                    .add(name_like(user::Column::FullName, pattern.clone()))
                    .add(name_like(user::Column::Email, pattern)),
            );
        }
        select
    }
}

fn not_found(id: i32) -> RepoError {
    RepoError::NotFound { entity: "user", id }
}

#[async_trait]
impl UserRepository for SqlUserRepository {
    async fn create(&self, draft: UserDraft) -> RepoResult<user::Model> {
        let now = chrono::Utc::now();
        let model = user::ActiveModel {
            email: Set(draft.email),
            full_name: Set(draft.full_name),
            phone: Set(draft.phone),
            role: Set(draft.role),
            password_hash: Set(draft.password_hash),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };
        model.insert(&self.db).await.map_err(|e| match e.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(_)) => {
                RepoError::Conflict("Email is already registered".into())
            }
            _ => RepoError::from(e),
        })
    }

    async fn find_by_id(&self, id: i32) -> RepoResult<user::Model> {
        user::Entity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or_else(|| not_found(id))
    }

    async fn find_by_email(&self, email: &str) -> RepoResult<Option<user::Model>> {
        Ok(user::Entity::find()
            .filter(user::Column::Email.eq(email))
            .one(&self.db)
            .await?)
    }

    async fn find_all(&self, filter: &ListFilter) -> RepoResult<Vec<user::Model>> {
        Ok(Self::select(filter)
            .order_by_asc(user::Column::FullName)
            .order_by_asc(user::Column::Id)
            .offset(filter.offset)
            .limit(filter.limit)
            .all(&self.db)
            .await?)
    }

    async fn count(&self, filter: &ListFilter) -> RepoResult<u64> {
        Ok(Self::select(filter).count(&self.db).await?)
    }

    async fn update_profile(&self, id: i32, draft: ProfileDraft) -> RepoResult<user::Model> {
        let existing = self.find_by_id(id).await?;
        let mut active: user::ActiveModel = existing.into();
        active.full_name = Set(draft.full_name);
        active.phone = Set(draft.phone);
        if let Some(url) = draft.avatar_url {
            active.avatar_url = Set(Some(url));
        }
        active.updated_at = Set(chrono::Utc::now());
        Ok(active.update(&self.db).await?)
    }

    async fn delete(&self, id: i32) -> RepoResult<()> {
        let result = user::Entity::delete_by_id(id).exec(&self.db).await?;
        if result.rows_affected == 0 {
            return Err(not_found(id));
        }
        Ok(())
    }
}
