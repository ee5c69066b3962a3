//! 用户档案实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "profiles")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[sea_orm(unique)]
    pub user_id: i64,
    pub program_level: String,
    pub program: String,
    pub year_intake: String,
    pub updated_at: i64,
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
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_profile(self) -> crate::models::users::entities::Profile {
        use crate::models::common::choices::{ProgramLevel, YearIntake};
        use crate::models::users::entities::Profile;

        Profile {
            id: self.id,
            user_id: self.user_id,
            program_level: self
                .program_level
                .parse::<ProgramLevel>()
                .unwrap_or(ProgramLevel::Undergrad),
            program: self.program,
            year_intake: self
                .year_intake
                .parse::<YearIntake>()
                .unwrap_or(YearIntake::Sem1),
        }
    }
}
