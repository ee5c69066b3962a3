//! 业务数据模型
//!
//! 与 `entity` 模块中的数据库实体分离，供服务层和 HTTP 层使用。

pub mod auth;
pub mod common;
pub mod courses;
pub mod planner;
pub mod programs;
pub mod reviews;
pub mod users;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

pub use common::{ApiResponse, ChoiceOption, HealthResponse};

/// 程序启动时间
#[derive(Debug, Clone)]
pub struct AppStartTime {
    pub start_datetime: chrono::DateTime<chrono::Utc>,
}

/// API 错误码
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/api.ts")]
#[repr(i32)]
pub enum ErrorCode {
    Success = 0,

    // 通用错误
    BadRequest = 1000,
    ValidationFailed = 1001,
    Unauthorized = 1002,
    NotFound = 1004,
    Conflict = 1009,
    InternalServerError = 1500,

    // 认证相关
    AuthFailed = 2000,
}
