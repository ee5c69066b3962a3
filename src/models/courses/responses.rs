use serde::Serialize;
use ts_rs::TS;

use super::entities::{Assessment, Course};
use crate::models::reviews::responses::ReviewDetailResponse;

// 课程详情：课程字段 + 考核项、评价、评分汇总与直接先修课程代码
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/course.ts")]
pub struct CourseDetailResponse {
    #[serde(flatten)]
    #[ts(flatten)]
    pub course: Course,
    pub assessments: Vec<Assessment>,
    pub reviews: Vec<ReviewDetailResponse>,
    pub average_rating: f64,
    pub total_reviews: usize,
    pub prerequisites: Vec<String>,
}
