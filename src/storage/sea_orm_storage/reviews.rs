use super::SeaOrmStorage;
use crate::entity::course_reviews;
use crate::entity::prelude::{CourseReviewActiveModel, CourseReviews, Users};
use crate::errors::{PlannerError, Result, is_foreign_key_violation};
use crate::models::reviews::{
    entities::{CourseReview, ReviewWrite},
    requests::ReviewInput,
};
use sea_orm::sea_query::{Expr, OnConflict};
use sea_orm::{
    ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, QueryOrder, Set, TransactionTrait,
};

impl SeaOrmStorage {
    /// 课程的全部评价（附带用户名），按创建顺序
    pub async fn list_reviews_impl(&self, course_id: i64) -> Result<Vec<CourseReview>> {
        let rows = CourseReviews::find()
            .filter(course_reviews::Column::CourseId.eq(course_id))
            .order_by_asc(course_reviews::Column::CreatedAt)
            .order_by_asc(course_reviews::Column::Id)
            .find_also_related(Users)
            .all(&self.db)
            .await
            .map_err(|e| PlannerError::database_operation(format!("查询课程评价失败: {e}")))?;

        Ok(rows
            .into_iter()
            .map(|(review, user)| review.into_review(user.map(|u| u.username).unwrap_or_default()))
            .collect())
    }

    /// 新建或覆盖评价
    ///
    /// 先以 ON CONFLICT DO NOTHING 插入；插入成功即为新建，
    /// 否则覆盖已有行的分数与描述（描述缺失时清空为空串）。
    pub async fn upsert_review_impl(
        &self,
        user_id: i64,
        course_id: i64,
        input: ReviewInput,
    ) -> Result<(CourseReview, ReviewWrite)> {
        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| PlannerError::database_operation(format!("开启事务失败: {e}")))?;

        let inserted = CourseReviews::insert(CourseReviewActiveModel {
            user_id: Set(user_id),
            course_id: Set(course_id),
            review: Set(input.review),
            description: Set(input.description.clone()),
            created_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        })
        .on_conflict(
            OnConflict::columns([
                course_reviews::Column::UserId,
                course_reviews::Column::CourseId,
            ])
            .do_nothing()
            .to_owned(),
        )
        .exec_without_returning(&txn)
        .await
        .map_err(|e| {
            if is_foreign_key_violation(&e) {
                PlannerError::not_found("Not found")
            } else {
                PlannerError::database_operation(format!("创建课程评价失败: {e}"))
            }
        })?;

        let write = if inserted > 0 {
            ReviewWrite::Created
        } else {
            CourseReviews::update_many()
                .col_expr(course_reviews::Column::Review, Expr::value(input.review))
                .col_expr(
                    course_reviews::Column::Description,
                    Expr::value(input.description.unwrap_or_default()),
                )
                .filter(course_reviews::Column::UserId.eq(user_id))
                .filter(course_reviews::Column::CourseId.eq(course_id))
                .exec(&txn)
                .await
                .map_err(|e| {
                    PlannerError::database_operation(format!("更新课程评价失败: {e}"))
                })?;
            ReviewWrite::Updated
        };

        let review = Self::find_review(&txn, user_id, course_id).await?;

        txn.commit()
            .await
            .map_err(|e| PlannerError::database_operation(format!("提交事务失败: {e}")))?;

        Ok((review, write))
    }

    async fn find_review<C: ConnectionTrait>(
        conn: &C,
        user_id: i64,
        course_id: i64,
    ) -> Result<CourseReview> {
        let (review, user) = CourseReviews::find()
            .filter(course_reviews::Column::UserId.eq(user_id))
            .filter(course_reviews::Column::CourseId.eq(course_id))
            .find_also_related(Users)
            .one(conn)
            .await
            .map_err(|e| PlannerError::database_operation(format!("查询课程评价失败: {e}")))?
            .ok_or_else(|| PlannerError::database_operation("评价写入后未找到"))?;

        Ok(review.into_review(user.map(|u| u.username).unwrap_or_default()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::reviews::entities::average_rating;

    fn input(review: f64, description: Option<&str>) -> ReviewInput {
        ReviewInput {
            review,
            description: description.map(str::to_string),
        }
    }

    #[actix_web::test]
    async fn test_resubmission_overwrites_single_row() {
        let storage = SeaOrmStorage::in_memory().await.unwrap();
        let bob = storage.test_user("bob").await;
        let course = storage.test_course("COMP1100").await;

        let (first, write) = storage
            .upsert_review_impl(bob.id, course.id, input(4.5, None))
            .await
            .unwrap();
        assert_eq!(write, ReviewWrite::Created);
        assert_eq!(first.username, "bob");
        assert_eq!(first.description, None);

        let (second, write) = storage
            .upsert_review_impl(bob.id, course.id, input(3.0, Some("changed")))
            .await
            .unwrap();
        assert_eq!(write, ReviewWrite::Updated);
        assert_eq!(second.id, first.id);

        let reviews = storage.list_reviews_impl(course.id).await.unwrap();
        assert_eq!(reviews.len(), 1);
        assert_eq!(reviews[0].review, 3.0);
        assert_eq!(reviews[0].description.as_deref(), Some("changed"));
    }

    #[actix_web::test]
    async fn test_missing_description_clears_on_update() {
        let storage = SeaOrmStorage::in_memory().await.unwrap();
        let user = storage.test_user("erin").await;
        let course = storage.test_course("CSSE1001").await;

        storage
            .upsert_review_impl(user.id, course.id, input(2.0, Some("meh")))
            .await
            .unwrap();
        let (review, _) = storage
            .upsert_review_impl(user.id, course.id, input(2.5, None))
            .await
            .unwrap();
        assert_eq!(review.description.as_deref(), Some(""));
        assert_eq!(review.review, 2.5);
    }

    #[actix_web::test]
    async fn test_reviews_from_several_users() {
        let storage = SeaOrmStorage::in_memory().await.unwrap();
        let course = storage.test_course("CSSE2002").await;
        for (name, score) in [("u1", 4.5), ("u2", 3.0), ("u3", 4.0)] {
            let user = storage.test_user(name).await;
            storage
                .upsert_review_impl(user.id, course.id, input(score, None))
                .await
                .unwrap();
        }

        let reviews = storage.list_reviews_impl(course.id).await.unwrap();
        assert_eq!(reviews.len(), 3);
        assert_eq!(average_rating(&reviews), 3.8);

        let other = storage.test_course("MATH1061").await;
        assert!(storage.list_reviews_impl(other.id).await.unwrap().is_empty());
    }

    #[actix_web::test]
    async fn test_review_for_missing_course_is_not_found() {
        let storage = SeaOrmStorage::in_memory().await.unwrap();
        let user = storage.test_user("kim").await;

        let err = storage
            .upsert_review_impl(user.id, 9999, input(4.0, None))
            .await
            .unwrap_err();
        assert!(matches!(err, PlannerError::NotFound(_)));
    }
}
