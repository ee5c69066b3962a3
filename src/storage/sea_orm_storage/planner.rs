use super::SeaOrmStorage;
use crate::entity::prelude::{
    Courses, PlannedCourseActiveModel, PlannedCourses, SemesterActiveModel, Semesters,
};
use crate::entity::{planned_courses, semesters};
use crate::errors::{PlannerError, Result, is_foreign_key_violation, is_unique_violation};
use crate::models::planner::entities::{MAX_SEMESTER, PlannedCourse, Semester, SemesterRemoval};
use crate::models::planner::requests::unknown_course;
use sea_orm::sea_query::{Expr, OnConflict};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, Set,
    TransactionTrait,
};

impl SeaOrmStorage {
    /// 用户的学期列表，按学期号升序
    pub async fn list_semesters_impl(&self, user_id: i64) -> Result<Vec<Semester>> {
        Self::semesters_of(&self.db, user_id).await
    }

    async fn semesters_of<C: ConnectionTrait>(conn: &C, user_id: i64) -> Result<Vec<Semester>> {
        let models = Semesters::find()
            .filter(semesters::Column::UserId.eq(user_id))
            .order_by_asc(semesters::Column::SemesterNumber)
            .all(conn)
            .await
            .map_err(|e| PlannerError::database_operation(format!("查询学期失败: {e}")))?;

        Ok(models.into_iter().map(|m| m.into_semester()).collect())
    }

    /// 用户没有任何学期时创建 1..=count，返回当前学期列表
    pub async fn ensure_default_semesters_impl(
        &self,
        user_id: i64,
        count: i32,
    ) -> Result<Vec<Semester>> {
        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| PlannerError::database_operation(format!("开启事务失败: {e}")))?;

        let existing = Semesters::find()
            .filter(semesters::Column::UserId.eq(user_id))
            .count(&txn)
            .await
            .map_err(|e| PlannerError::database_operation(format!("统计学期失败: {e}")))?;

        if existing == 0 && count > 0 {
            let now = chrono::Utc::now().timestamp();
            let models = (1..=count).map(|number| SemesterActiveModel {
                user_id: Set(user_id),
                semester_number: Set(number),
                created_at: Set(now),
                ..Default::default()
            });

            // 并发的首次访问可能同时插入，冲突的行直接跳过
            Semesters::insert_many(models)
                .on_conflict(
                    OnConflict::columns([
                        semesters::Column::UserId,
                        semesters::Column::SemesterNumber,
                    ])
                    .do_nothing()
                    .to_owned(),
                )
                .exec_without_returning(&txn)
                .await
                .map_err(|e| PlannerError::database_operation(format!("创建默认学期失败: {e}")))?;
        }

        let semesters = Self::semesters_of(&txn, user_id).await?;

        txn.commit()
            .await
            .map_err(|e| PlannerError::database_operation(format!("提交事务失败: {e}")))?;

        Ok(semesters)
    }

    /// 追加下一个学期
    ///
    /// 学期号取已有学期与已规划课程中的最大值加一，
    /// 保证新学期不会与仍引用旧学期号的课程重叠。超过 `MAX_SEMESTER` 时拒绝。
    pub async fn create_next_semester_impl(&self, user_id: i64) -> Result<Semester> {
        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| PlannerError::database_operation(format!("开启事务失败: {e}")))?;

        let max_semester = Semesters::find()
            .filter(semesters::Column::UserId.eq(user_id))
            .order_by_desc(semesters::Column::SemesterNumber)
            .one(&txn)
            .await
            .map_err(|e| PlannerError::database_operation(format!("查询学期失败: {e}")))?
            .map(|m| m.semester_number)
            .unwrap_or(0);

        let max_planned = PlannedCourses::find()
            .filter(planned_courses::Column::UserId.eq(user_id))
            .order_by_desc(planned_courses::Column::Semester)
            .one(&txn)
            .await
            .map_err(|e| PlannerError::database_operation(format!("查询规划课程失败: {e}")))?
            .map(|m| m.semester)
            .unwrap_or(0);

        let next = max_semester
            .max(max_planned)
            .checked_add(1)
            .filter(|next| *next <= MAX_SEMESTER)
            .ok_or_else(|| {
                PlannerError::conflict(format!(
                    "Cannot add more than {MAX_SEMESTER} semesters."
                ))
            })?;

        let model = SemesterActiveModel {
            user_id: Set(user_id),
            semester_number: Set(next),
            created_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        };

        let created = model
            .insert(&txn)
            .await
            .map_err(|e| {
                if is_unique_violation(&e) {
                    PlannerError::conflict(format!("Semester {next} already exists"))
                } else {
                    PlannerError::database_operation(format!("创建学期失败: {e}"))
                }
            })?;

        txn.commit()
            .await
            .map_err(|e| PlannerError::database_operation(format!("提交事务失败: {e}")))?;

        Ok(created.into_semester())
    }

    /// 删除学期号最大的学期，学期内仍有课程时拒绝
    pub async fn remove_latest_semester_impl(&self, user_id: i64) -> Result<SemesterRemoval> {
        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| PlannerError::database_operation(format!("开启事务失败: {e}")))?;

        let Some(latest) = Semesters::find()
            .filter(semesters::Column::UserId.eq(user_id))
            .order_by_desc(semesters::Column::SemesterNumber)
            .one(&txn)
            .await
            .map_err(|e| PlannerError::database_operation(format!("查询学期失败: {e}")))?
        else {
            return Ok(SemesterRemoval::NoSemesters);
        };

        let courses = PlannedCourses::find()
            .filter(planned_courses::Column::UserId.eq(user_id))
            .filter(planned_courses::Column::Semester.eq(latest.semester_number))
            .count(&txn)
            .await
            .map_err(|e| PlannerError::database_operation(format!("统计规划课程失败: {e}")))?;

        if courses > 0 {
            return Ok(SemesterRemoval::HasCourses(latest.semester_number, courses));
        }

        Semesters::delete_by_id(latest.id)
            .exec(&txn)
            .await
            .map_err(|e| PlannerError::database_operation(format!("删除学期失败: {e}")))?;

        txn.commit()
            .await
            .map_err(|e| PlannerError::database_operation(format!("提交事务失败: {e}")))?;

        Ok(SemesterRemoval::Removed(latest.into_semester()))
    }

    /// 用户的规划课程，按学期、加入顺序排序
    pub async fn list_planned_courses_impl(&self, user_id: i64) -> Result<Vec<PlannedCourse>> {
        let rows = PlannedCourses::find()
            .filter(planned_courses::Column::UserId.eq(user_id))
            .order_by_asc(planned_courses::Column::Semester)
            .order_by_asc(planned_courses::Column::Id)
            .find_also_related(Courses)
            .all(&self.db)
            .await
            .map_err(|e| PlannerError::database_operation(format!("查询规划课程失败: {e}")))?;

        Ok(rows
            .into_iter()
            .map(|(planned, course)| planned.into_planned_course(course))
            .collect())
    }

    async fn find_planned_course<C: ConnectionTrait>(
        conn: &C,
        user_id: i64,
        course_id: i64,
    ) -> Result<Option<PlannedCourse>> {
        let row = PlannedCourses::find()
            .filter(planned_courses::Column::UserId.eq(user_id))
            .filter(planned_courses::Column::CourseId.eq(course_id))
            .find_also_related(Courses)
            .one(conn)
            .await
            .map_err(|e| PlannerError::database_operation(format!("查询规划课程失败: {e}")))?;

        Ok(row.map(|(planned, course)| planned.into_planned_course(course)))
    }

    /// 规划课程；已规划过的课程移动到新学期而非重复添加
    pub async fn upsert_planned_course_impl(
        &self,
        user_id: i64,
        course_id: i64,
        semester: i32,
    ) -> Result<PlannedCourse> {
        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| PlannerError::database_operation(format!("开启事务失败: {e}")))?;

        PlannedCourses::insert(PlannedCourseActiveModel {
            user_id: Set(user_id),
            course_id: Set(course_id),
            semester: Set(semester),
            ..Default::default()
        })
        .on_conflict(
            OnConflict::columns([
                planned_courses::Column::UserId,
                planned_courses::Column::CourseId,
            ])
            .update_column(planned_courses::Column::Semester)
            .to_owned(),
        )
        .exec_without_returning(&txn)
        .await
        .map_err(|e| {
            // 课程在校验之后被删除
            if is_foreign_key_violation(&e) {
                unknown_course(course_id)
            } else {
                PlannerError::database_operation(format!("保存规划课程失败: {e}"))
            }
        })?;

        let planned = Self::find_planned_course(&txn, user_id, course_id)
            .await?
            .ok_or_else(|| PlannerError::database_operation("规划课程写入后未找到"))?;

        txn.commit()
            .await
            .map_err(|e| PlannerError::database_operation(format!("提交事务失败: {e}")))?;

        Ok(planned)
    }

    /// 修改已规划课程的学期，不存在时返回 None
    pub async fn update_planned_course_semester_impl(
        &self,
        user_id: i64,
        course_id: i64,
        semester: i32,
    ) -> Result<Option<PlannedCourse>> {
        let result = PlannedCourses::update_many()
            .col_expr(planned_courses::Column::Semester, Expr::value(semester))
            .filter(planned_courses::Column::UserId.eq(user_id))
            .filter(planned_courses::Column::CourseId.eq(course_id))
            .exec(&self.db)
            .await
            .map_err(|e| PlannerError::database_operation(format!("更新规划课程失败: {e}")))?;

        if result.rows_affected == 0 {
            return Ok(None);
        }

        Self::find_planned_course(&self.db, user_id, course_id).await
    }

    pub async fn delete_planned_course_impl(&self, user_id: i64, course_id: i64) -> Result<bool> {
        let result = PlannedCourses::delete_many()
            .filter(planned_courses::Column::UserId.eq(user_id))
            .filter(planned_courses::Column::CourseId.eq(course_id))
            .exec(&self.db)
            .await
            .map_err(|e| PlannerError::database_operation(format!("删除规划课程失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::planner::entities::DEFAULT_SEMESTER_COUNT;

    fn numbers(semesters: &[Semester]) -> Vec<i32> {
        semesters.iter().map(|s| s.semester_number).collect()
    }

    #[actix_web::test]
    async fn test_default_semesters_created_once() {
        let storage = SeaOrmStorage::in_memory().await.unwrap();
        let user = storage.test_user("carol").await;

        let first = storage
            .ensure_default_semesters_impl(user.id, DEFAULT_SEMESTER_COUNT)
            .await
            .unwrap();
        assert_eq!(numbers(&first), vec![1, 2, 3, 4]);

        let second = storage
            .ensure_default_semesters_impl(user.id, DEFAULT_SEMESTER_COUNT)
            .await
            .unwrap();
        assert_eq!(first, second);
    }

    #[actix_web::test]
    async fn test_add_and_remove_semesters_stay_contiguous() {
        let storage = SeaOrmStorage::in_memory().await.unwrap();
        let user = storage.test_user("dave").await;
        storage
            .ensure_default_semesters_impl(user.id, DEFAULT_SEMESTER_COUNT)
            .await
            .unwrap();

        let fifth = storage.create_next_semester_impl(user.id).await.unwrap();
        assert_eq!(fifth.semester_number, 5);

        match storage.remove_latest_semester_impl(user.id).await.unwrap() {
            SemesterRemoval::Removed(sem) => assert_eq!(sem.semester_number, 5),
            other => panic!("unexpected removal result: {other:?}"),
        }

        let semesters = storage.list_semesters_impl(user.id).await.unwrap();
        assert_eq!(numbers(&semesters), vec![1, 2, 3, 4]);
    }

    #[actix_web::test]
    async fn test_remove_refused_when_latest_has_courses() {
        let storage = SeaOrmStorage::in_memory().await.unwrap();
        let user = storage.test_user("frank").await;
        let course = storage.test_course("COMP1100").await;
        storage
            .ensure_default_semesters_impl(user.id, DEFAULT_SEMESTER_COUNT)
            .await
            .unwrap();
        storage
            .upsert_planned_course_impl(user.id, course.id, 4)
            .await
            .unwrap();

        assert_eq!(
            storage.remove_latest_semester_impl(user.id).await.unwrap(),
            SemesterRemoval::HasCourses(4, 1)
        );
        assert_eq!(storage.list_semesters_impl(user.id).await.unwrap().len(), 4);
    }

    #[actix_web::test]
    async fn test_remove_without_semesters() {
        let storage = SeaOrmStorage::in_memory().await.unwrap();
        let user = storage.test_user("gina").await;
        assert_eq!(
            storage.remove_latest_semester_impl(user.id).await.unwrap(),
            SemesterRemoval::NoSemesters
        );
    }

    #[actix_web::test]
    async fn test_next_semester_skips_past_planned_courses() {
        let storage = SeaOrmStorage::in_memory().await.unwrap();
        let user = storage.test_user("hank").await;
        let course = storage.test_course("CSSE1001").await;
        storage
            .ensure_default_semesters_impl(user.id, DEFAULT_SEMESTER_COUNT)
            .await
            .unwrap();
        storage
            .upsert_planned_course_impl(user.id, course.id, 7)
            .await
            .unwrap();

        let next = storage.create_next_semester_impl(user.id).await.unwrap();
        assert_eq!(next.semester_number, 8);
    }

    #[actix_web::test]
    async fn test_next_semester_refused_past_upper_bound() {
        let storage = SeaOrmStorage::in_memory().await.unwrap();
        let user = storage.test_user("ivy").await;
        let course = storage.test_course("CSSE2002").await;

        storage
            .upsert_planned_course_impl(user.id, course.id, MAX_SEMESTER)
            .await
            .unwrap();
        let err = storage.create_next_semester_impl(user.id).await.unwrap_err();
        assert!(matches!(err, PlannerError::Conflict(_)));

        // 直接写入的极端学期号也不会溢出
        storage
            .upsert_planned_course_impl(user.id, course.id, i32::MAX)
            .await
            .unwrap();
        let err = storage.create_next_semester_impl(user.id).await.unwrap_err();
        assert!(matches!(err, PlannerError::Conflict(_)));
        assert!(storage.list_semesters_impl(user.id).await.unwrap().is_empty());
    }

    #[actix_web::test]
    async fn test_planned_courses_listed_by_semester_then_insertion() {
        let storage = SeaOrmStorage::in_memory().await.unwrap();
        let user = storage.test_user("lena").await;
        for (code, semester) in [("MATH1061", 2), ("CSSE1001", 1), ("COMP1100", 2)] {
            let course = storage.test_course(code).await;
            storage
                .upsert_planned_course_impl(user.id, course.id, semester)
                .await
                .unwrap();
        }

        let codes: Vec<String> = storage
            .list_planned_courses_impl(user.id)
            .await
            .unwrap()
            .into_iter()
            .map(|p| p.course_code)
            .collect();
        assert_eq!(codes, vec!["CSSE1001", "MATH1061", "COMP1100"]);
    }

    #[actix_web::test]
    async fn test_planning_missing_course_is_field_error() {
        let storage = SeaOrmStorage::in_memory().await.unwrap();
        let user = storage.test_user("jack").await;

        let err = storage
            .upsert_planned_course_impl(user.id, 9999, 1)
            .await
            .unwrap_err();
        match err {
            PlannerError::Fields(errors) => assert!(errors.get("course_id").is_some()),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[actix_web::test]
    async fn test_planning_same_course_moves_it() {
        let storage = SeaOrmStorage::in_memory().await.unwrap();
        let user = storage.test_user("ivy").await;
        let course = storage.test_course("CSSE2002").await;

        let first = storage
            .upsert_planned_course_impl(user.id, course.id, 1)
            .await
            .unwrap();
        assert_eq!(first.course_code, "CSSE2002");
        assert_eq!(first.semester, 1);

        let moved = storage
            .upsert_planned_course_impl(user.id, course.id, 3)
            .await
            .unwrap();
        assert_eq!(moved.id, first.id);
        assert_eq!(moved.semester, 3);

        let planned = storage.list_planned_courses_impl(user.id).await.unwrap();
        assert_eq!(planned.len(), 1);
        assert_eq!(planned[0].semester, 3);
    }

    #[actix_web::test]
    async fn test_update_and_delete_planned_course() {
        let storage = SeaOrmStorage::in_memory().await.unwrap();
        let user = storage.test_user("jack").await;
        let course = storage.test_course("MATH1061").await;

        assert!(
            storage
                .update_planned_course_semester_impl(user.id, course.id, 2)
                .await
                .unwrap()
                .is_none()
        );

        storage
            .upsert_planned_course_impl(user.id, course.id, 1)
            .await
            .unwrap();
        let updated = storage
            .update_planned_course_semester_impl(user.id, course.id, 2)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(updated.semester, 2);

        assert!(storage.delete_planned_course_impl(user.id, course.id).await.unwrap());
        assert!(!storage.delete_planned_course_impl(user.id, course.id).await.unwrap());
    }

    #[actix_web::test]
    async fn test_planned_courses_are_per_user() {
        let storage = SeaOrmStorage::in_memory().await.unwrap();
        let a = storage.test_user("kate").await;
        let b = storage.test_user("liam").await;
        let course = storage.test_course("INFS1200").await;

        storage
            .upsert_planned_course_impl(a.id, course.id, 1)
            .await
            .unwrap();
        assert!(storage.list_planned_courses_impl(b.id).await.unwrap().is_empty());
        assert!(!storage.delete_planned_course_impl(b.id, course.id).await.unwrap());
    }
}
