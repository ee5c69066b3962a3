use once_cell::sync::Lazy;
use regex::Regex;

/// 缺失必填字段时的提示
pub const REQUIRED: &str = "This field is required.";

const BLANK: &str = "This field may not be blank.";

/// 用户名允许的最大长度
pub const USERNAME_MAX_LEN: usize = 150;

/// 密码最小长度
pub const PASSWORD_MIN_LEN: usize = 8;

static USERNAME_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[\w.@+-]+$").expect("Invalid username regex"));

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}$").expect("Invalid email regex")
});

pub fn validate_username(username: &str) -> Result<(), &'static str> {
    if username.is_empty() {
        return Err(BLANK);
    }
    if username.chars().count() > USERNAME_MAX_LEN {
        return Err("Ensure this field has no more than 150 characters.");
    }
    // 字母、数字及 @ . + - _
    if !USERNAME_RE.is_match(username) {
        return Err(
            "Enter a valid username. This value may contain only letters, numbers, and @/./+/-/_ characters.",
        );
    }
    Ok(())
}

pub fn validate_email(email: &str) -> Result<(), &'static str> {
    if email.is_empty() {
        return Err(BLANK);
    }
    if !EMAIL_RE.is_match(email) {
        return Err("Enter a valid email address.");
    }
    Ok(())
}

pub fn validate_password(password: &str) -> Result<(), &'static str> {
    if password.is_empty() {
        return Err(BLANK);
    }
    if password.chars().count() < PASSWORD_MIN_LEN {
        return Err("Ensure this field has at least 8 characters.");
    }
    Ok(())
}

pub fn require_non_blank(value: &str) -> Result<(), &'static str> {
    if value.trim().is_empty() {
        Err(BLANK)
    } else {
        Ok(())
    }
}

/// 解析枚举选项，失败时返回面向用户的提示
pub fn parse_choice<T: std::str::FromStr<Err = String>>(value: &str) -> Result<T, String> {
    value.parse::<T>()
}

/// 评分范围 [0, 5]，最多一位小数
pub fn validate_review_score(score: f64) -> Result<(), &'static str> {
    if !score.is_finite() {
        return Err("A valid number is required.");
    }
    if score < 0.0 {
        return Err("Ensure this value is greater than or equal to 0.");
    }
    if score > 5.0 {
        return Err("Ensure this value is less than or equal to 5.");
    }
    let scaled = score * 10.0;
    if (scaled - scaled.round()).abs() > 1e-9 {
        return Err("Ensure that there are no more than 1 decimal places.");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::common::choices::ProgramLevel;

    #[test]
    fn test_username_rules() {
        assert!(validate_username("alice").is_ok());
        assert!(validate_username("a.b@c+d-e_f").is_ok());
        assert!(validate_username("").is_err());
        assert!(validate_username("has space").is_err());
        assert!(validate_username(&"x".repeat(151)).is_err());
        assert!(validate_username(&"x".repeat(150)).is_ok());
    }

    #[test]
    fn test_email_rules() {
        assert!(validate_email("alice@example.com").is_ok());
        assert!(validate_email("alice@example").is_err());
        assert!(validate_email("alice.example.com").is_err());
    }

    #[test]
    fn test_password_min_length() {
        assert!(validate_password("password123").is_ok());
        assert!(validate_password("1234567").is_err());
        assert!(validate_password("12345678").is_ok());
    }

    #[test]
    fn test_review_score() {
        assert!(validate_review_score(0.0).is_ok());
        assert!(validate_review_score(5.0).is_ok());
        assert!(validate_review_score(3.7).is_ok());
        assert!(validate_review_score(5.1).is_err());
        assert!(validate_review_score(-1.0).is_err());
        assert!(validate_review_score(2.55).is_err());
        assert!(validate_review_score(f64::NAN).is_err());
    }

    #[test]
    fn test_parse_choice_message() {
        assert!(parse_choice::<ProgramLevel>("UNDERGRAD").is_ok());
        let msg = parse_choice::<ProgramLevel>("PHD").unwrap_err();
        assert_eq!(msg, "\"PHD\" is not a valid choice.");
    }
}
