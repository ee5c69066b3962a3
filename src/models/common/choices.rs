//! 固定枚举选项
//!
//! 每个枚举同时提供存储值（value）和展示名称（label），
//! 前端下拉框通过 `choices()` 获取 `{value, label}` 列表。

use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// 枚举选项 `{value, label}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/choices.ts")]
pub struct ChoiceOption {
    pub value: String,
    pub label: String,
}

/// 定义选项枚举的宏
///
/// 自动生成：
/// - enum 定义（serde 按存储值序列化）
/// - as_str() / label() 方法
/// - choices() 静态选项列表
/// - Display / FromStr
macro_rules! define_choices {
    (
        $(#[$meta:meta])*
        $name:ident {
            $($variant:ident => ($value:literal, $label:literal)),* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
        #[ts(export, export_to = "../frontend/src/types/generated/choices.ts")]
        pub enum $name {
            $(
                #[serde(rename = $value)]
                $variant,
            )*
        }

        impl $name {
            /// 存储值
            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $value,)*
                }
            }

            /// 展示名称
            pub fn label(&self) -> &'static str {
                match self {
                    $($name::$variant => $label,)*
                }
            }

            pub fn choices() -> Vec<ChoiceOption> {
                vec![
                    $(ChoiceOption {
                        value: $value.to_string(),
                        label: $label.to_string(),
                    },)*
                ]
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.as_str())
            }
        }

        impl std::str::FromStr for $name {
            type Err = String;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($value => Ok($name::$variant),)*
                    _ => Err(format!("\"{s}\" is not a valid choice.")),
                }
            }
        }
    };
}

define_choices! {
    /// 学位层次
    ProgramLevel {
        Undergrad => ("UNDERGRAD", "Undergraduate"),
        Postgrad => ("POSTGRAD", "Postgraduate"),
    }
}

define_choices! {
    /// 入学学期
    YearIntake {
        Sem1 => ("SEM1", "Semester 1"),
        Sem2 => ("SEM2", "Semester 2"),
    }
}

define_choices! {
    /// 课程考核方式
    AssessmentType {
        Exam => ("EXAM", "Exam"),
        Project => ("PROJECT", "Project"),
        Assignment => ("ASSIGNMENT", "Assignment"),
        Mix => ("MIX", "Mix"),
    }
}

define_choices! {
    /// 学科领域
    StudyArea {
        Bel => ("BEL", "Business, Economics & Law"),
        Eait => ("EAIT", "Engineering, Architecture & Information Technology"),
        Habs => ("HABS", "Health & Behavioural Sciences"),
        Hmb => ("HMB", "Health, Medicine and Behavioural Sciences"),
        Hass => ("HASS", "Humanities, Arts & Social Sciences"),
        Sci => ("SCI", "Science"),
    }
}

define_choices! {
    /// 评分方式
    GradingType {
        Percentage => ("percentage", "Percentage"),
        PassFail => ("pass_fail", "Pass/Fail"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_choices_list_values_and_labels() {
        let levels = ProgramLevel::choices();
        assert_eq!(levels.len(), 2);
        assert_eq!(levels[0].value, "UNDERGRAD");
        assert_eq!(levels[0].label, "Undergraduate");
        assert_eq!(StudyArea::choices().len(), 6);
        assert_eq!(AssessmentType::choices()[3].value, "MIX");
    }

    #[test]
    fn test_from_str_and_display() {
        assert_eq!("SEM2".parse::<YearIntake>(), Ok(YearIntake::Sem2));
        assert!("sem2".parse::<YearIntake>().is_err());
        assert_eq!(GradingType::PassFail.to_string(), "pass_fail");
        assert_eq!(StudyArea::Eait.label(), "Engineering, Architecture & Information Technology");
    }

    #[test]
    fn test_serde_uses_stored_value() {
        let json = serde_json::to_string(&ProgramLevel::Postgrad).unwrap();
        assert_eq!(json, "\"POSTGRAD\"");
        let level: ProgramLevel = serde_json::from_str("\"UNDERGRAD\"").unwrap();
        assert_eq!(level, ProgramLevel::Undergrad);
    }
}
