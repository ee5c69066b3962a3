//! 课程实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "courses")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[sea_orm(unique)]
    pub code: String,
    pub name: String,
    pub level: i32,
    pub credits: i32,
    #[sea_orm(column_type = "Text")]
    pub aim: String,
    pub assessment_type: Option<String>,
    pub study_area: Option<String>,
    #[sea_orm(column_name = "offered_sem_1")]
    pub offered_sem_1: bool,
    #[sea_orm(column_name = "offered_sem_2")]
    pub offered_sem_2: bool,
    pub offered_summer: bool,
    #[sea_orm(column_type = "Text")]
    pub description: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::assessments::Entity")]
    Assessments,
    #[sea_orm(has_many = "super::course_reviews::Entity")]
    CourseReviews,
    #[sea_orm(has_many = "super::planned_courses::Entity")]
    PlannedCourses,
}

impl Related<super::assessments::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Assessments.def()
    }
}

impl Related<super::course_reviews::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::CourseReviews.def()
    }
}

impl Related<super::planned_courses::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::PlannedCourses.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_course(self) -> crate::models::courses::entities::Course {
        use crate::models::courses::entities::Course;

        Course {
            id: self.id,
            code: self.code,
            name: self.name,
            level: self.level,
            credits: self.credits,
            aim: self.aim,
            // 历史数据中的未知取值按空处理
            assessment_type: self.assessment_type.and_then(|v| v.parse().ok()),
            study_area: self.study_area.and_then(|v| v.parse().ok()),
            offered_sem_1: self.offered_sem_1,
            offered_sem_2: self.offered_sem_2,
            offered_summer: self.offered_summer,
            description: self.description,
        }
    }
}
