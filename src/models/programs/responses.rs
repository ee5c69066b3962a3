use serde::Serialize;
use ts_rs::TS;

use super::entities::Program;
use crate::models::common::choices::ProgramLevel;

// 项目列表行
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/program.ts")]
pub struct ProgramResponse {
    pub id: i64,
    pub name: String,
    pub level: ProgramLevel,
    pub level_label: String,
}

impl From<Program> for ProgramResponse {
    fn from(program: Program) -> Self {
        Self {
            id: program.id,
            level_label: program.level.label().to_string(),
            name: program.name,
            level: program.level,
        }
    }
}
