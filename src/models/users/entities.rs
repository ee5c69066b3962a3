use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::models::common::choices::{ProgramLevel, YearIntake};

// 用户
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/user.ts")]
pub struct User {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub last_login: Option<chrono::DateTime<chrono::Utc>>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

// 用户档案（与用户一对一）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/user.ts")]
pub struct Profile {
    #[serde(skip)]
    pub id: i64,
    #[serde(skip)]
    pub user_id: i64,
    pub program_level: ProgramLevel,
    pub program: String,
    pub year_intake: YearIntake,
}

// 档案部分更新（已校验）
#[derive(Debug, Clone, Default)]
pub struct ProfileChanges {
    pub program_level: Option<ProgramLevel>,
    pub program: Option<String>,
    pub year_intake: Option<YearIntake>,
}

impl ProfileChanges {
    pub fn is_empty(&self) -> bool {
        self.program_level.is_none() && self.program.is_none() && self.year_intake.is_none()
    }
}

// 注册时创建的新用户（已校验）
#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub program_level: ProgramLevel,
    pub program: String,
    pub year_intake: YearIntake,
}
