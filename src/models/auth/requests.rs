use serde::Deserialize;
use ts_rs::TS;

use crate::errors::FieldErrors;
use crate::models::common::choices::{ProgramLevel, YearIntake};
use crate::models::users::entities::ProfileChanges;
use crate::utils::validate::{
    REQUIRED, parse_choice, require_non_blank, validate_email, validate_password,
    validate_username,
};

// 注册请求（来自HTTP请求）
//
// 字段全部可选，缺失字段由 validate() 统一报告为字段错误。
#[derive(Debug, Default, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/auth.ts")]
pub struct RegisterRequest {
    pub username: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub program_level: Option<String>,
    pub program: Option<String>,
    pub year_intake: Option<String>,
}

/// 校验通过的注册信息（密码仍为明文）
#[derive(Debug, Clone)]
pub struct Registration {
    pub username: String,
    pub email: String,
    pub password: String,
    pub program_level: ProgramLevel,
    pub program: String,
    pub year_intake: YearIntake,
}

impl RegisterRequest {
    pub fn validate(self) -> Result<Registration, FieldErrors> {
        let mut errors = FieldErrors::new();

        let username = match self.username {
            Some(name) => match validate_username(&name) {
                Ok(()) => Some(name),
                Err(msg) => {
                    errors.add("username", msg);
                    None
                }
            },
            None => {
                errors.add("username", REQUIRED);
                None
            }
        };

        let email = match self.email {
            Some(email) => {
                let email = email.trim().to_string();
                match validate_email(&email) {
                    Ok(()) => Some(email),
                    Err(msg) => {
                        errors.add("email", msg);
                        None
                    }
                }
            }
            None => {
                errors.add("email", REQUIRED);
                None
            }
        };

        let password = match self.password {
            Some(password) => match validate_password(&password) {
                Ok(()) => Some(password),
                Err(msg) => {
                    errors.add("password", msg);
                    None
                }
            },
            None => {
                errors.add("password", REQUIRED);
                None
            }
        };

        let program_level = required_choice::<ProgramLevel>(
            &mut errors,
            "program_level",
            self.program_level.as_deref(),
        );
        let year_intake =
            required_choice::<YearIntake>(&mut errors, "year_intake", self.year_intake.as_deref());

        let program = match self.program {
            Some(program) => match require_non_blank(&program) {
                Ok(()) => Some(program.trim().to_string()),
                Err(msg) => {
                    errors.add("program", msg);
                    None
                }
            },
            None => {
                errors.add("program", REQUIRED);
                None
            }
        };

        match (username, email, password, program_level, program, year_intake) {
            (
                Some(username),
                Some(email),
                Some(password),
                Some(program_level),
                Some(program),
                Some(year_intake),
            ) if errors.is_empty() => Ok(Registration {
                username,
                email,
                password,
                program_level,
                program,
                year_intake,
            }),
            _ => Err(errors),
        }
    }
}

fn required_choice<T: std::str::FromStr<Err = String>>(
    errors: &mut FieldErrors,
    field: &str,
    value: Option<&str>,
) -> Option<T> {
    match value {
        Some(raw) => match parse_choice::<T>(raw) {
            Ok(choice) => Some(choice),
            Err(msg) => {
                errors.add(field, msg);
                None
            }
        },
        None => {
            errors.add(field, REQUIRED);
            None
        }
    }
}

// 获取令牌请求
#[derive(Debug, Default, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/auth.ts")]
pub struct TokenObtainRequest {
    pub username: Option<String>,
    pub password: Option<String>,
}

impl TokenObtainRequest {
    pub fn validate(self) -> Result<(String, String), FieldErrors> {
        let mut errors = FieldErrors::new();
        if self.username.as_deref().is_none_or(|u| u.is_empty()) {
            errors.add("username", REQUIRED);
        }
        if self.password.as_deref().is_none_or(|p| p.is_empty()) {
            errors.add("password", REQUIRED);
        }
        match (self.username, self.password) {
            (Some(username), Some(password)) if errors.is_empty() => Ok((username, password)),
            _ => Err(errors),
        }
    }
}

// 刷新令牌请求
#[derive(Debug, Default, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/auth.ts")]
pub struct TokenRefreshRequest {
    pub refresh: Option<String>,
}

// 档案部分更新请求
#[derive(Debug, Default, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/auth.ts")]
pub struct UpdateProfileRequest {
    pub program_level: Option<String>,
    pub program: Option<String>,
    pub year_intake: Option<String>,
}

impl UpdateProfileRequest {
    pub fn validate(self) -> Result<ProfileChanges, FieldErrors> {
        let mut errors = FieldErrors::new();
        let mut changes = ProfileChanges::default();

        if let Some(raw) = self.program_level.as_deref() {
            match parse_choice::<ProgramLevel>(raw) {
                Ok(level) => changes.program_level = Some(level),
                Err(msg) => errors.add("program_level", msg),
            }
        }
        if let Some(program) = self.program {
            match require_non_blank(&program) {
                Ok(()) => changes.program = Some(program.trim().to_string()),
                Err(msg) => errors.add("program", msg),
            }
        }
        if let Some(raw) = self.year_intake.as_deref() {
            match parse_choice::<YearIntake>(raw) {
                Ok(intake) => changes.year_intake = Some(intake),
                Err(msg) => errors.add("year_intake", msg),
            }
        }

        if errors.is_empty() {
            Ok(changes)
        } else {
            Err(errors)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn alice() -> RegisterRequest {
        RegisterRequest {
            username: Some("alice".into()),
            email: Some("alice@example.com".into()),
            password: Some("password123".into()),
            program_level: Some("UNDERGRAD".into()),
            program: Some("Computer Science".into()),
            year_intake: Some("SEM1".into()),
        }
    }

    #[test]
    fn test_register_valid() {
        let reg = alice().validate().unwrap();
        assert_eq!(reg.username, "alice");
        assert_eq!(reg.program_level, ProgramLevel::Undergrad);
        assert_eq!(reg.year_intake, YearIntake::Sem1);
    }

    #[test]
    fn test_register_reports_every_bad_field() {
        let req = RegisterRequest {
            password: Some("short".into()),
            email: Some("not-an-email".into()),
            program_level: Some("PHD".into()),
            ..Default::default()
        };
        let errors = req.validate().unwrap_err();
        assert!(errors.get("username").is_some());
        assert!(errors.get("email").is_some());
        assert!(errors.get("password").is_some());
        assert!(errors.get("program_level").is_some());
        assert!(errors.get("program").is_some());
        assert!(errors.get("year_intake").is_some());
    }

    #[test]
    fn test_update_profile_partial() {
        let changes = UpdateProfileRequest {
            program: Some("Software Engineering".into()),
            ..Default::default()
        }
        .validate()
        .unwrap();
        assert_eq!(changes.program.as_deref(), Some("Software Engineering"));
        assert!(changes.program_level.is_none());

        let errors = UpdateProfileRequest {
            year_intake: Some("SEM3".into()),
            ..Default::default()
        }
        .validate()
        .unwrap_err();
        assert!(errors.get("year_intake").is_some());
    }

    #[test]
    fn test_token_request_requires_both_fields() {
        let errors = TokenObtainRequest {
            username: Some("alice".into()),
            password: None,
        }
        .validate()
        .unwrap_err();
        assert!(errors.get("password").is_some());
        assert!(errors.get("username").is_none());
    }
}
