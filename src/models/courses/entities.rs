use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::models::common::choices::{AssessmentType, GradingType, StudyArea};

// 课程
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/course.ts")]
pub struct Course {
    pub id: i64,
    pub code: String,
    pub name: String,
    pub level: i32,
    pub credits: i32,
    pub aim: String,
    pub assessment_type: Option<AssessmentType>,
    pub study_area: Option<StudyArea>,
    pub offered_sem_1: bool,
    pub offered_sem_2: bool,
    pub offered_summer: bool,
    pub description: String,
}

// 课程考核项
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/course.ts")]
pub struct Assessment {
    pub id: i64,
    #[serde(skip)]
    pub course_id: i64,
    pub category: String,
    pub task: String,
    pub mode: String,
    pub grading_type: GradingType,
    /// 权重百分比（0-100），通过/不通过类考核可为空
    pub weight: Option<i32>,
    pub description: String,
    pub hurdle: bool,
    pub hurdle_description: Option<String>,
}

// 新课程（种子数据使用）
#[derive(Debug, Clone)]
pub struct NewCourse {
    pub code: String,
    pub name: String,
    pub level: i32,
    pub credits: i32,
    pub aim: String,
    pub assessment_type: Option<AssessmentType>,
    pub study_area: Option<StudyArea>,
    pub offered_sem_1: bool,
    pub offered_sem_2: bool,
    pub offered_summer: bool,
    pub description: String,
}

#[derive(Debug, Clone)]
pub struct NewAssessment {
    pub category: String,
    pub task: String,
    pub mode: String,
    pub grading_type: GradingType,
    pub weight: Option<i32>,
    pub description: String,
    pub hurdle: bool,
    pub hurdle_description: Option<String>,
}
