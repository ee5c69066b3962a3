use super::SeaOrmStorage;
use crate::entity::prelude::{
    AssessmentActiveModel, Assessments, CourseActiveModel, CoursePrerequisiteActiveModel,
    CoursePrerequisites, Courses,
};
use crate::entity::{assessments, course_prerequisites, courses};
use crate::errors::{PlannerError, Result};
use crate::models::courses::entities::{Assessment, Course, NewAssessment, NewCourse};
use sea_orm::sea_query::OnConflict;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, Set,
    TransactionTrait,
};

impl SeaOrmStorage {
    /// 全部课程，按课程代码排序
    pub async fn list_courses_impl(&self) -> Result<Vec<Course>> {
        let models = Courses::find()
            .order_by_asc(courses::Column::Code)
            .all(&self.db)
            .await
            .map_err(|e| PlannerError::database_operation(format!("查询课程列表失败: {e}")))?;

        Ok(models.into_iter().map(|m| m.into_course()).collect())
    }

    pub async fn get_course_by_id_impl(&self, id: i64) -> Result<Option<Course>> {
        let result = Courses::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| PlannerError::database_operation(format!("查询课程失败: {e}")))?;

        Ok(result.map(|m| m.into_course()))
    }

    pub async fn count_courses_impl(&self) -> Result<u64> {
        Courses::find()
            .count(&self.db)
            .await
            .map_err(|e| PlannerError::database_operation(format!("统计课程数量失败: {e}")))
    }

    /// 课程的考核项，按 ID 排序
    pub async fn list_assessments_impl(&self, course_id: i64) -> Result<Vec<Assessment>> {
        let models = Assessments::find()
            .filter(assessments::Column::CourseId.eq(course_id))
            .order_by_asc(assessments::Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| PlannerError::database_operation(format!("查询考核项失败: {e}")))?;

        Ok(models.into_iter().map(|m| m.into_assessment()).collect())
    }

    /// 直接先修课程代码
    pub async fn list_prerequisite_codes_impl(&self, course_id: i64) -> Result<Vec<String>> {
        let prereq_ids: Vec<i64> = CoursePrerequisites::find()
            .filter(course_prerequisites::Column::CourseId.eq(course_id))
            .all(&self.db)
            .await
            .map_err(|e| PlannerError::database_operation(format!("查询先修关系失败: {e}")))?
            .into_iter()
            .map(|link| link.prereq_id)
            .collect();

        if prereq_ids.is_empty() {
            return Ok(Vec::new());
        }

        let prereqs = Courses::find()
            .filter(courses::Column::Id.is_in(prereq_ids))
            .order_by_asc(courses::Column::Code)
            .all(&self.db)
            .await
            .map_err(|e| PlannerError::database_operation(format!("查询先修课程失败: {e}")))?;

        Ok(prereqs.into_iter().map(|m| m.code).collect())
    }

    /// 按代码获取或创建课程，新建时一并写入考核项
    pub async fn get_or_create_course_impl(
        &self,
        course: NewCourse,
        new_assessments: Vec<NewAssessment>,
    ) -> Result<(Course, bool)> {
        let existing = Courses::find()
            .filter(courses::Column::Code.eq(course.code.as_str()))
            .one(&self.db)
            .await
            .map_err(|e| PlannerError::database_operation(format!("查询课程失败: {e}")))?;
        if let Some(model) = existing {
            return Ok((model.into_course(), false));
        }

        // 权重为空或在 [0, 100] 内
        if let Some(weight) = new_assessments
            .iter()
            .filter_map(|a| a.weight)
            .find(|w| !(0..=100).contains(w))
        {
            return Err(PlannerError::validation(format!(
                "Assessment weight must be between 0 and 100, got {weight}"
            )));
        }

        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| PlannerError::database_operation(format!("开启事务失败: {e}")))?;

        let created = CourseActiveModel {
            code: Set(course.code),
            name: Set(course.name),
            level: Set(course.level),
            credits: Set(course.credits),
            aim: Set(course.aim),
            assessment_type: Set(course.assessment_type.map(|t| t.to_string())),
            study_area: Set(course.study_area.map(|a| a.to_string())),
            offered_sem_1: Set(course.offered_sem_1),
            offered_sem_2: Set(course.offered_sem_2),
            offered_summer: Set(course.offered_summer),
            description: Set(course.description),
            ..Default::default()
        }
        .insert(&txn)
        .await
        .map_err(|e| PlannerError::database_operation(format!("创建课程失败: {e}")))?;

        for item in new_assessments {
            AssessmentActiveModel {
                course_id: Set(created.id),
                category: Set(item.category),
                task: Set(item.task),
                mode: Set(item.mode),
                grading_type: Set(item.grading_type.to_string()),
                weight: Set(item.weight),
                description: Set(item.description),
                hurdle: Set(item.hurdle),
                hurdle_description: Set(item.hurdle_description),
                ..Default::default()
            }
            .insert(&txn)
            .await
            .map_err(|e| PlannerError::database_operation(format!("创建考核项失败: {e}")))?;
        }

        txn.commit()
            .await
            .map_err(|e| PlannerError::database_operation(format!("提交事务失败: {e}")))?;

        Ok((created.into_course(), true))
    }

    /// 添加先修关系，已存在时返回 false
    pub async fn add_prerequisite_impl(&self, course_id: i64, prereq_id: i64) -> Result<bool> {
        if course_id == prereq_id {
            return Err(PlannerError::validation(
                "A course cannot be its own prerequisite",
            ));
        }

        let rows = CoursePrerequisites::insert(CoursePrerequisiteActiveModel {
            course_id: Set(course_id),
            prereq_id: Set(prereq_id),
            ..Default::default()
        })
        .on_conflict(
            OnConflict::columns([
                course_prerequisites::Column::CourseId,
                course_prerequisites::Column::PrereqId,
            ])
            .do_nothing()
            .to_owned(),
        )
        .exec_without_returning(&self.db)
        .await
        .map_err(|e| PlannerError::database_operation(format!("添加先修关系失败: {e}")))?;

        Ok(rows > 0)
    }
}
