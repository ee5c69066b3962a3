use serde::Serialize;
use ts_rs::TS;

use crate::models::users::entities::Profile;

// 令牌对（注册 / 登录后返回）
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/auth.ts")]
pub struct TokenPairResponse {
    pub access: String,
    pub refresh: String,
}

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/auth.ts")]
pub struct AccessTokenResponse {
    pub access: String,
}

// 当前用户信息
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/auth.ts")]
pub struct MeResponse {
    pub username: String,
    pub email: String,
    pub profile: Option<Profile>,
}
