//! 课程考核项实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "assessments")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub course_id: i64,
    pub category: String,
    pub task: String,
    pub mode: String,
    pub grading_type: String,
    pub weight: Option<i32>,
    #[sea_orm(column_type = "Text")]
    pub description: String,
    pub hurdle: bool,
    #[sea_orm(column_type = "Text", nullable)]
    pub hurdle_description: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::courses::Entity",
        from = "Column::CourseId",
        to = "super::courses::Column::Id",
        on_delete = "Cascade"
    )]
    Course,
}

impl Related<super::courses::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Course.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_assessment(self) -> crate::models::courses::entities::Assessment {
        use crate::models::common::choices::GradingType;
        use crate::models::courses::entities::Assessment;

        Assessment {
            id: self.id,
            course_id: self.course_id,
            category: self.category,
            task: self.task,
            mode: self.mode,
            grading_type: self
                .grading_type
                .parse::<GradingType>()
                .unwrap_or(GradingType::Percentage),
            weight: self.weight,
            description: self.description,
            hurdle: self.hurdle,
            hurdle_description: self.hurdle_description,
        }
    }
}
