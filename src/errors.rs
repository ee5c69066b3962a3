//! 统一错误处理模块
//!
//! 使用宏自动生成错误类型，支持错误代码和类型名称。
//! 错误类型实现了 `ResponseError`，可以直接在处理函数中用 `?` 传播。

use std::collections::BTreeMap;
use std::fmt;

use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use serde::Serialize;
use ts_rs::TS;

use crate::models::{ApiResponse, ErrorCode};

/// 字段级校验错误：字段名 -> 错误信息列表
#[derive(Debug, Clone, Default, PartialEq, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/api.ts")]
pub struct FieldErrors(BTreeMap<String, Vec<String>>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.0.entry(field.into()).or_default().push(message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, field: &str) -> Option<&[String]> {
        self.0.get(field).map(Vec::as_slice)
    }

    /// 没有错误时返回 `Ok(())`
    pub fn into_result(self) -> Result<()> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(PlannerError::Fields(self))
        }
    }

    /// 单字段错误的便捷构造
    pub fn single(field: impl Into<String>, message: impl Into<String>) -> PlannerError {
        let mut errors = Self::new();
        errors.add(field, message);
        PlannerError::Fields(errors)
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self
            .0
            .iter()
            .map(|(field, messages)| format!("{field}: {}", messages.join(" ")))
            .collect();
        write!(f, "{}", parts.join("; "))
    }
}

/// 定义错误类型的宏
///
/// 自动生成：
/// - enum 定义（外加固定的 `Fields` 字段级校验变体）
/// - code() 方法 - 返回错误代码
/// - error_type() 方法 - 返回错误类型名称
/// - message() 方法 - 返回错误详情
/// - 便捷构造函数
macro_rules! define_planner_errors {
    ($(
        $variant:ident($code:literal, $type_name:literal)
    ),* $(,)?) => {
        #[derive(Debug, Clone)]
        pub enum PlannerError {
            $($variant(String),)*
            Fields(FieldErrors),
        }

        impl PlannerError {
            /// 获取错误代码
            pub fn code(&self) -> &'static str {
                match self {
                    $(PlannerError::$variant(_) => $code,)*
                    PlannerError::Fields(_) => "E100",
                }
            }

            /// 获取错误类型名称
            pub fn error_type(&self) -> &'static str {
                match self {
                    $(PlannerError::$variant(_) => $type_name,)*
                    PlannerError::Fields(_) => "Field Validation Error",
                }
            }

            /// 获取错误详情
            pub fn message(&self) -> String {
                match self {
                    $(PlannerError::$variant(msg) => msg.clone(),)*
                    PlannerError::Fields(errors) => errors.to_string(),
                }
            }
        }

        // 生成便捷构造函数
        paste::paste! {
            impl PlannerError {
                $(
                    pub fn [<$variant:snake>]<T: Into<String>>(msg: T) -> Self {
                        PlannerError::$variant(msg.into())
                    }
                )*
            }
        }
    };
}

define_planner_errors! {
    CacheConnection("E001", "Cache Connection Error"),
    CachePluginNotFound("E002", "Cache Plugin Not Found"),
    DatabaseConfig("E003", "Database Configuration Error"),
    DatabaseConnection("E004", "Database Connection Error"),
    DatabaseOperation("E005", "Database Operation Error"),
    Validation("E007", "Validation Error"),
    NotFound("E008", "Resource Not Found"),
    Serialization("E009", "Serialization Error"),
    Conflict("E010", "State Conflict"),
    Authentication("E012", "Authentication Error"),
    PasswordHash("E013", "Password Hash Error"),
    Token("E014", "Token Error"),
}

impl PlannerError {
    /// 格式化为彩色输出（用于开发环境）
    #[cfg(debug_assertions)]
    pub fn format_colored(&self) -> String {
        format!(
            "\x1b[1;31m[ERROR]\x1b[0m \x1b[33m{}\x1b[0m \x1b[31m{}\x1b[0m\n  {}",
            self.code(),
            self.error_type(),
            self.message()
        )
    }

    /// 格式化为简洁输出
    pub fn format_simple(&self) -> String {
        format!("{}: {}", self.error_type(), self.message())
    }

    /// 对应的 API 错误码
    pub fn api_code(&self) -> ErrorCode {
        match self {
            PlannerError::Validation(_) | PlannerError::Fields(_) => ErrorCode::ValidationFailed,
            PlannerError::NotFound(_) => ErrorCode::NotFound,
            PlannerError::Conflict(_) => ErrorCode::Conflict,
            PlannerError::Authentication(_) | PlannerError::Token(_) => ErrorCode::Unauthorized,
            _ => ErrorCode::InternalServerError,
        }
    }

    /// 是否为内部错误（详情不应暴露给客户端）
    pub fn is_internal(&self) -> bool {
        self.api_code() == ErrorCode::InternalServerError
    }
}

impl fmt::Display for PlannerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_simple())
    }
}

impl std::error::Error for PlannerError {}

impl ResponseError for PlannerError {
    fn status_code(&self) -> StatusCode {
        match self.api_code() {
            // 状态冲突（例如删除非空学期）按 400 返回
            ErrorCode::ValidationFailed | ErrorCode::Conflict => StatusCode::BAD_REQUEST,
            ErrorCode::NotFound => StatusCode::NOT_FOUND,
            ErrorCode::Unauthorized => StatusCode::UNAUTHORIZED,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();

        if self.is_internal() {
            tracing::error!("{}", self.format_simple());
            return HttpResponse::build(status).json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                "Internal server error",
            ));
        }

        match self {
            PlannerError::Fields(errors) => HttpResponse::build(status).json(ApiResponse::error(
                ErrorCode::ValidationFailed,
                errors.clone(),
                "Validation failed",
            )),
            _ => HttpResponse::build(status)
                .json(ApiResponse::error_empty(self.api_code(), self.message())),
        }
    }
}

// 为常见的错误类型实现 From trait
impl From<sea_orm::DbErr> for PlannerError {
    fn from(err: sea_orm::DbErr) -> Self {
        PlannerError::DatabaseOperation(err.to_string())
    }
}

impl From<std::io::Error> for PlannerError {
    fn from(err: std::io::Error) -> Self {
        PlannerError::DatabaseConfig(err.to_string())
    }
}

impl From<serde_json::Error> for PlannerError {
    fn from(err: serde_json::Error) -> Self {
        PlannerError::Serialization(err.to_string())
    }
}

impl From<jsonwebtoken::errors::Error> for PlannerError {
    fn from(err: jsonwebtoken::errors::Error) -> Self {
        PlannerError::Token(err.to_string())
    }
}

impl From<FieldErrors> for PlannerError {
    fn from(errors: FieldErrors) -> Self {
        PlannerError::Fields(errors)
    }
}

/// 判断数据库错误是否为唯一约束冲突
pub fn is_unique_violation(err: &sea_orm::DbErr) -> bool {
    matches!(
        err.sql_err(),
        Some(sea_orm::SqlErr::UniqueConstraintViolation(_))
    )
}

/// 判断数据库错误是否为外键约束冲突
pub fn is_foreign_key_violation(err: &sea_orm::DbErr) -> bool {
    matches!(
        err.sql_err(),
        Some(sea_orm::SqlErr::ForeignKeyConstraintViolation(_))
    )
}

pub type Result<T> = std::result::Result<T, PlannerError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(PlannerError::cache_connection("test").code(), "E001");
        assert_eq!(PlannerError::database_config("test").code(), "E003");
        assert_eq!(PlannerError::validation("test").code(), "E007");
        assert_eq!(PlannerError::conflict("test").code(), "E010");
        assert_eq!(PlannerError::authentication("test").code(), "E012");
    }

    #[test]
    fn test_error_types() {
        assert_eq!(
            PlannerError::not_found("test").error_type(),
            "Resource Not Found"
        );
        assert_eq!(
            PlannerError::validation("test").error_type(),
            "Validation Error"
        );
    }

    #[test]
    fn test_format_simple() {
        let err = PlannerError::validation("Invalid semester");
        let formatted = err.format_simple();
        assert!(formatted.contains("Validation Error"));
        assert!(formatted.contains("Invalid semester"));
    }

    #[test]
    fn test_status_codes() {
        assert_eq!(
            PlannerError::not_found("x").status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            PlannerError::conflict("x").status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            FieldErrors::single("review", "bad").status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            PlannerError::authentication("x").status_code(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            PlannerError::database_operation("x").status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_field_errors_collect_messages() {
        let mut errors = FieldErrors::new();
        assert!(errors.clone().into_result().is_ok());

        errors.add("password", "Ensure this field has at least 8 characters.");
        errors.add("email", "Enter a valid email address.");
        assert_eq!(errors.get("email").map(|m| m.len()), Some(1));

        let err = errors.into_result().unwrap_err();
        assert_eq!(err.code(), "E100");
        assert!(err.message().contains("password"));
    }

    #[test]
    fn test_constraint_helpers_ignore_other_errors() {
        let err = sea_orm::DbErr::Custom("boom".into());
        assert!(!is_foreign_key_violation(&err));
        assert!(!is_unique_violation(&err));
        assert!(PlannerError::from(err).is_internal());
    }
}
