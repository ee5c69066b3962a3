use serde::Deserialize;
use ts_rs::TS;

use crate::errors::FieldErrors;
use crate::models::common::deserialize_optional_f64;
use crate::utils::validate::{REQUIRED, validate_review_score};

// 提交评价请求
#[derive(Debug, Default, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/review.ts")]
pub struct ReviewSubmitRequest {
    #[serde(default, deserialize_with = "deserialize_optional_f64")]
    pub review: Option<f64>,
    pub description: Option<String>,
}

/// 校验通过的评价内容
#[derive(Debug, Clone, PartialEq)]
pub struct ReviewInput {
    pub review: f64,
    pub description: Option<String>,
}

impl ReviewSubmitRequest {
    pub fn validate(self) -> Result<ReviewInput, FieldErrors> {
        let Some(score) = self.review else {
            return Err(field_error("review", REQUIRED));
        };
        validate_review_score(score).map_err(|msg| field_error("review", msg))?;
        Ok(ReviewInput {
            review: score,
            description: self.description,
        })
    }
}

fn field_error(field: &str, message: &str) -> FieldErrors {
    let mut errors = FieldErrors::new();
    errors.add(field, message);
    errors
}
