use serde::Deserialize;
use ts_rs::TS;

use crate::errors::{FieldErrors, PlannerError};
use crate::models::common::deserialize_optional_i64;
use crate::models::planner::entities::MAX_SEMESTER;
use crate::utils::validate::REQUIRED;

/// 引用的课程不存在时的字段错误
pub fn unknown_course(course_id: i64) -> PlannerError {
    FieldErrors::single(
        "course_id",
        format!("Invalid pk \"{course_id}\" - object does not exist."),
    )
}

// 规划课程请求（POST / PATCH 共用）
#[derive(Debug, Default, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/planner.ts")]
pub struct PlannedCourseRequest {
    #[serde(default, deserialize_with = "deserialize_optional_i64")]
    pub course_id: Option<i64>,
    #[serde(default, deserialize_with = "deserialize_optional_i64")]
    pub semester: Option<i64>,
}

impl PlannedCourseRequest {
    /// 返回 (course_id, semester)
    pub fn validate(&self) -> Result<(i64, i32), FieldErrors> {
        let mut errors = FieldErrors::new();

        if self.course_id.is_none() {
            errors.add("course_id", REQUIRED);
        }
        let semester = match self.semester {
            None => {
                errors.add("semester", REQUIRED);
                None
            }
            Some(value) if value < 1 => {
                errors.add("semester", "Ensure this value is greater than or equal to 1.");
                None
            }
            Some(value) if value > i64::from(MAX_SEMESTER) => {
                errors.add(
                    "semester",
                    format!("Ensure this value is less than or equal to {MAX_SEMESTER}."),
                );
                None
            }
            Some(value) => i32::try_from(value).ok(),
        };

        match (self.course_id, semester) {
            (Some(course_id), Some(semester)) if errors.is_empty() => Ok((course_id, semester)),
            _ => Err(errors),
        }
    }
}

// 移除规划课程请求
#[derive(Debug, Default, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/planner.ts")]
pub struct RemovePlannedCourseRequest {
    #[serde(default, deserialize_with = "deserialize_optional_i64")]
    pub course_id: Option<i64>,
}
