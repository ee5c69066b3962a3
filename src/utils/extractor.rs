//! 路径参数提取器
//!
//! 路径中的 ID 必须是正整数，否则按资源不存在处理。

use actix_web::{FromRequest, HttpRequest, dev::Payload};
use futures_util::future::{Ready, ready};

use crate::errors::PlannerError;

fn parse_positive_id(req: &HttpRequest, name: &str) -> Result<i64, PlannerError> {
    req.match_info()
        .get(name)
        .and_then(|raw| raw.parse::<i64>().ok())
        .filter(|id| *id > 0)
        .ok_or_else(|| PlannerError::not_found("Not found"))
}

/// 路径中的课程 ID（`{course_id}`）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SafeCourseIdI64(pub i64);

impl FromRequest for SafeCourseIdI64 {
    type Error = PlannerError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        ready(parse_positive_id(req, "course_id").map(SafeCourseIdI64))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::test::TestRequest;

    #[actix_web::test]
    async fn test_extracts_positive_id() {
        let req = TestRequest::default()
            .param("course_id", "12")
            .to_http_request();
        let id = SafeCourseIdI64::extract(&req).await.unwrap();
        assert_eq!(id, SafeCourseIdI64(12));
    }

    #[actix_web::test]
    async fn test_rejects_invalid_id() {
        for raw in ["abc", "0", "-3"] {
            let req = TestRequest::default()
                .param("course_id", raw)
                .to_http_request();
            assert!(SafeCourseIdI64::extract(&req).await.is_err());
        }
    }
}
