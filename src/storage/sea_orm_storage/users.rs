use super::SeaOrmStorage;
use crate::entity::prelude::{ProfileActiveModel, Profiles, UserActiveModel, Users};
use crate::entity::{profiles, users};
use crate::errors::{FieldErrors, PlannerError, Result, is_unique_violation};
use crate::models::users::entities::{NewUser, Profile, ProfileChanges, User};
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, IntoActiveModel, QueryFilter, Set,
    TransactionTrait,
};

impl SeaOrmStorage {
    /// 在同一事务中创建用户及其档案
    pub async fn create_user_with_profile_impl(&self, new_user: NewUser) -> Result<User> {
        let now = chrono::Utc::now().timestamp();

        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| PlannerError::database_operation(format!("开启事务失败: {e}")))?;

        let user = UserActiveModel {
            username: Set(new_user.username),
            email: Set(new_user.email),
            password_hash: Set(new_user.password_hash),
            last_login: Set(None),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(&txn)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                FieldErrors::single("username", "A user with that username already exists.")
            } else {
                PlannerError::database_operation(format!("创建用户失败: {e}"))
            }
        })?;

        ProfileActiveModel {
            user_id: Set(user.id),
            program_level: Set(new_user.program_level.to_string()),
            program: Set(new_user.program),
            year_intake: Set(new_user.year_intake.to_string()),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(&txn)
        .await
        .map_err(|e| PlannerError::database_operation(format!("创建用户档案失败: {e}")))?;

        txn.commit()
            .await
            .map_err(|e| PlannerError::database_operation(format!("提交事务失败: {e}")))?;

        Ok(user.into_user())
    }

    /// 通过 ID 获取用户
    pub async fn get_user_by_id_impl(&self, id: i64) -> Result<Option<User>> {
        let result = Users::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| PlannerError::database_operation(format!("查询用户失败: {e}")))?;

        Ok(result.map(|m| m.into_user()))
    }

    /// 通过用户名获取用户
    pub async fn get_user_by_username_impl(&self, username: &str) -> Result<Option<User>> {
        Ok(self
            .find_user_model_by_username(username)
            .await?
            .map(|m| m.into_user()))
    }

    /// 获取用户及密码哈希
    pub async fn get_user_credentials_impl(
        &self,
        username: &str,
    ) -> Result<Option<(User, String)>> {
        Ok(self.find_user_model_by_username(username).await?.map(|m| {
            let hash = m.password_hash.clone();
            (m.into_user(), hash)
        }))
    }

    async fn find_user_model_by_username(&self, username: &str) -> Result<Option<users::Model>> {
        Users::find()
            .filter(users::Column::Username.eq(username))
            .one(&self.db)
            .await
            .map_err(|e| PlannerError::database_operation(format!("查询用户失败: {e}")))
    }

    /// 更新最后登录时间
    pub async fn update_last_login_impl(&self, id: i64) -> Result<bool> {
        let now = chrono::Utc::now().timestamp();
        let result = Users::update_many()
            .col_expr(users::Column::LastLogin, Expr::value(now))
            .filter(users::Column::Id.eq(id))
            .exec(&self.db)
            .await
            .map_err(|e| PlannerError::database_operation(format!("更新登录时间失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }

    /// 获取用户档案
    pub async fn get_profile_impl(&self, user_id: i64) -> Result<Option<Profile>> {
        let result = Profiles::find()
            .filter(profiles::Column::UserId.eq(user_id))
            .one(&self.db)
            .await
            .map_err(|e| PlannerError::database_operation(format!("查询用户档案失败: {e}")))?;

        Ok(result.map(|m| m.into_profile()))
    }

    /// 部分更新用户档案
    pub async fn update_profile_impl(
        &self,
        user_id: i64,
        changes: ProfileChanges,
    ) -> Result<Option<Profile>> {
        let Some(model) = Profiles::find()
            .filter(profiles::Column::UserId.eq(user_id))
            .one(&self.db)
            .await
            .map_err(|e| PlannerError::database_operation(format!("查询用户档案失败: {e}")))?
        else {
            return Ok(None);
        };

        if changes.is_empty() {
            return Ok(Some(model.into_profile()));
        }

        let mut active = model.into_active_model();
        if let Some(level) = changes.program_level {
            active.program_level = Set(level.to_string());
        }
        if let Some(program) = changes.program {
            active.program = Set(program);
        }
        if let Some(intake) = changes.year_intake {
            active.year_intake = Set(intake.to_string());
        }
        active.updated_at = Set(chrono::Utc::now().timestamp());

        let updated = active
            .update(&self.db)
            .await
            .map_err(|e| PlannerError::database_operation(format!("更新用户档案失败: {e}")))?;

        Ok(Some(updated.into_profile()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::common::choices::{ProgramLevel, YearIntake};
    use crate::storage::sea_orm_storage::test_support::new_user;

    #[actix_web::test]
    async fn test_create_user_with_profile() {
        let storage = SeaOrmStorage::in_memory().await.unwrap();
        let user = storage
            .create_user_with_profile_impl(new_user("alice"))
            .await
            .unwrap();

        let profile = storage.get_profile_impl(user.id).await.unwrap().unwrap();
        assert_eq!(profile.program, "Computer Science");
        assert_eq!(profile.program_level, ProgramLevel::Undergrad);

        let (found, hash) = storage
            .get_user_credentials_impl("alice")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(found.id, user.id);
        assert_eq!(hash, "hash");
    }

    #[actix_web::test]
    async fn test_duplicate_username_is_field_error_and_leaves_no_profile() {
        let storage = SeaOrmStorage::in_memory().await.unwrap();
        storage
            .create_user_with_profile_impl(new_user("alice"))
            .await
            .unwrap();

        let err = storage
            .create_user_with_profile_impl(new_user("alice"))
            .await
            .unwrap_err();
        match err {
            PlannerError::Fields(errors) => assert!(errors.get("username").is_some()),
            other => panic!("unexpected error: {other}"),
        }

        let profiles = Profiles::find().all(&storage.db).await.unwrap();
        assert_eq!(profiles.len(), 1);
    }

    #[actix_web::test]
    async fn test_update_profile_partial_and_missing() {
        let storage = SeaOrmStorage::in_memory().await.unwrap();
        let user = storage
            .create_user_with_profile_impl(new_user("carol"))
            .await
            .unwrap();

        let updated = storage
            .update_profile_impl(
                user.id,
                ProfileChanges {
                    year_intake: Some(YearIntake::Sem2),
                    ..Default::default()
                },
            )
            .await
            .unwrap()
            .unwrap();
        assert_eq!(updated.year_intake, YearIntake::Sem2);
        assert_eq!(updated.program, "Computer Science");

        let missing = storage
            .update_profile_impl(9999, ProfileChanges::default())
            .await
            .unwrap();
        assert!(missing.is_none());
    }

    #[actix_web::test]
    async fn test_update_last_login() {
        let storage = SeaOrmStorage::in_memory().await.unwrap();
        let user = storage
            .create_user_with_profile_impl(new_user("dave"))
            .await
            .unwrap();
        assert!(user.last_login.is_none());

        assert!(storage.update_last_login_impl(user.id).await.unwrap());
        let reloaded = storage.get_user_by_id_impl(user.id).await.unwrap().unwrap();
        assert!(reloaded.last_login.is_some());
    }
}
