//! 已规划课程实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "planned_courses")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub user_id: i64,
    pub course_id: i64,
    pub semester: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::UserId",
        to = "super::users::Column::Id",
        on_delete = "Cascade"
    )]
    User,
    #[sea_orm(
        belongs_to = "super::courses::Entity",
        from = "Column::CourseId",
        to = "super::courses::Column::Id",
        on_delete = "Cascade"
    )]
    Course,
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl Related<super::courses::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Course.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// 转换为业务模型，课程代码与名称来自关联查询
    pub fn into_planned_course(
        self,
        course: Option<super::courses::Model>,
    ) -> crate::models::planner::entities::PlannedCourse {
        use crate::models::planner::entities::PlannedCourse;

        let (course_code, course_name) = course.map(|c| (c.code, c.name)).unwrap_or_default();
        PlannedCourse {
            id: self.id,
            user_id: self.user_id,
            course_id: self.course_id,
            course_code,
            course_name,
            semester: self.semester,
        }
    }
}
