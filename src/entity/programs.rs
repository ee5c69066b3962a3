//! 学位项目实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "programs")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[sea_orm(unique)]
    pub name: String,
    pub level: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_program(self) -> crate::models::programs::entities::Program {
        use crate::models::common::choices::ProgramLevel;
        use crate::models::programs::entities::Program;

        Program {
            id: self.id,
            name: self.name,
            level: self
                .level
                .parse::<ProgramLevel>()
                .unwrap_or(ProgramLevel::Undergrad),
        }
    }
}
