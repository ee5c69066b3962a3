use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// 首次访问规划器时自动创建的学期数量
pub const DEFAULT_SEMESTER_COUNT: i32 = 4;

/// 学期号上限
pub const MAX_SEMESTER: i32 = 100;

// 学期
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/planner.ts")]
pub struct Semester {
    pub id: i64,
    #[serde(skip)]
    pub user_id: i64,
    pub semester_number: i32,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

// 已规划课程（附带课程代码与名称）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/planner.ts")]
pub struct PlannedCourse {
    pub id: i64,
    #[serde(skip)]
    pub user_id: i64,
    pub course_id: i64,
    pub course_code: String,
    pub course_name: String,
    pub semester: i32,
}

/// 删除最新学期的结果
#[derive(Debug, Clone, PartialEq)]
pub enum SemesterRemoval {
    Removed(Semester),
    NoSemesters,
    /// 最新学期中仍有课程（学期号，课程数）
    HasCourses(i32, u64),
}
