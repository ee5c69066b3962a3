use super::SeaOrmStorage;
use crate::entity::prelude::{ProgramActiveModel, Programs};
use crate::entity::programs;
use crate::errors::{PlannerError, Result};
use crate::models::common::choices::ProgramLevel;
use crate::models::programs::{entities::Program, requests::ProgramSearchQuery};
use crate::utils::escape_like_pattern;
use sea_orm::sea_query::{Expr, ExprTrait, Func, LikeExpr, OnConflict};
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter, QueryOrder, QuerySelect, Set};

impl SeaOrmStorage {
    /// 按层次与名称子串搜索学位项目
    pub async fn search_programs_impl(&self, query: ProgramSearchQuery) -> Result<Vec<Program>> {
        let mut select = Programs::find();

        if let Some(level) = query.level {
            select = select.filter(programs::Column::Level.eq(level.to_string()));
        }

        // 大小写不敏感：两侧统一转小写后 LIKE
        if let Some(search) = query.search.as_deref() {
            let pattern = format!("%{}%", escape_like_pattern(&search.to_lowercase()));
            select = select.filter(
                Expr::expr(Func::lower(Expr::col(programs::Column::Name)))
                    .like(LikeExpr::new(pattern).escape('\\')),
            );
        }

        let models = select
            .order_by_asc(programs::Column::Name)
            .limit(query.limit)
            .all(&self.db)
            .await
            .map_err(|e| PlannerError::database_operation(format!("查询学位项目失败: {e}")))?;

        Ok(models.into_iter().map(|m| m.into_program()).collect())
    }

    /// 按名称获取或创建学位项目
    pub async fn get_or_create_program_impl(
        &self,
        name: &str,
        level: ProgramLevel,
    ) -> Result<Program> {
        Programs::insert(ProgramActiveModel {
            name: Set(name.to_string()),
            level: Set(level.to_string()),
            ..Default::default()
        })
        .on_conflict(
            OnConflict::column(programs::Column::Name)
                .do_nothing()
                .to_owned(),
        )
        .exec_without_returning(&self.db)
        .await
        .map_err(|e| PlannerError::database_operation(format!("创建学位项目失败: {e}")))?;

        Programs::find()
            .filter(programs::Column::Name.eq(name))
            .one(&self.db)
            .await
            .map_err(|e| PlannerError::database_operation(format!("查询学位项目失败: {e}")))?
            .map(|m| m.into_program())
            .ok_or_else(|| PlannerError::not_found(format!("Program '{name}' not found")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::programs::requests::{PROGRAM_SEARCH_LIMIT, ProgramSearchParams};

    async fn seeded() -> SeaOrmStorage {
        let storage = SeaOrmStorage::in_memory().await.unwrap();
        for (name, level) in [
            ("Bachelor of Engineering (Honours)", ProgramLevel::Undergrad),
            ("Master of Engineering", ProgramLevel::Postgrad),
            ("Bachelor of Computer Science", ProgramLevel::Undergrad),
            ("Master of Data_Science", ProgramLevel::Postgrad),
        ] {
            storage.get_or_create_program_impl(name, level).await.unwrap();
        }
        storage
    }

    fn query(level: Option<&str>, search: Option<&str>) -> ProgramSearchQuery {
        ProgramSearchParams {
            level: level.map(str::to_string),
            search: search.map(str::to_string),
        }
        .into()
    }

    #[actix_web::test]
    async fn test_search_is_case_insensitive_substring() {
        let storage = seeded().await;
        let names: Vec<String> = storage
            .search_programs_impl(query(None, Some("ENGINEER")))
            .await
            .unwrap()
            .into_iter()
            .map(|p| p.name)
            .collect();
        assert_eq!(
            names,
            vec!["Bachelor of Engineering (Honours)", "Master of Engineering"]
        );
    }

    #[actix_web::test]
    async fn test_level_filter_and_unknown_level_ignored() {
        let storage = seeded().await;
        let postgrad = storage
            .search_programs_impl(query(Some("POSTGRAD"), None))
            .await
            .unwrap();
        assert_eq!(postgrad.len(), 2);
        assert!(postgrad.iter().all(|p| p.level == ProgramLevel::Postgrad));

        let all = storage
            .search_programs_impl(query(Some("DOCTORATE"), None))
            .await
            .unwrap();
        assert_eq!(all.len(), 4);
    }

    #[actix_web::test]
    async fn test_wildcards_are_literal() {
        let storage = seeded().await;
        let hits = storage
            .search_programs_impl(query(None, Some("data_sci")))
            .await
            .unwrap();
        assert_eq!(hits.len(), 1);
        let none = storage
            .search_programs_impl(query(None, Some("%")))
            .await
            .unwrap();
        assert!(none.is_empty());
    }

    #[actix_web::test]
    async fn test_results_capped() {
        let storage = SeaOrmStorage::in_memory().await.unwrap();
        for i in 0..60 {
            storage
                .get_or_create_program_impl(&format!("Program {i:02}"), ProgramLevel::Undergrad)
                .await
                .unwrap();
        }
        let hits = storage.search_programs_impl(query(None, None)).await.unwrap();
        assert_eq!(hits.len() as u64, PROGRAM_SEARCH_LIMIT);
    }

    #[actix_web::test]
    async fn test_get_or_create_program_is_idempotent() {
        let storage = SeaOrmStorage::in_memory().await.unwrap();
        let a = storage
            .get_or_create_program_impl("Bachelor of Arts", ProgramLevel::Undergrad)
            .await
            .unwrap();
        let b = storage
            .get_or_create_program_impl("Bachelor of Arts", ProgramLevel::Undergrad)
            .await
            .unwrap();
        assert_eq!(a.id, b.id);
    }
}
