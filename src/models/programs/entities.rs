use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::models::common::choices::ProgramLevel;

// 学位项目
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/program.ts")]
pub struct Program {
    pub id: i64,
    pub name: String,
    pub level: ProgramLevel,
}
