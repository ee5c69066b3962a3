use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use crate::models::courses::responses::CourseDetailResponse;
use crate::models::reviews::entities::average_rating;

use super::CourseService;

pub async fn get_course_detail(
    service: &CourseService,
    request: &HttpRequest,
    course_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    let course = service.require_course(&storage, course_id).await?;

    let assessments = storage.list_assessments(course.id).await?;
    let reviews = storage.list_reviews(course.id).await?;
    let prerequisites = storage.list_prerequisite_codes(course.id).await?;

    // 平均分基于原始分数
    let average_rating = average_rating(&reviews);
    let total_reviews = reviews.len();

    Ok(HttpResponse::Ok().json(CourseDetailResponse {
        course,
        assessments,
        reviews: reviews.into_iter().map(Into::into).collect(),
        average_rating,
        total_reviews,
        prerequisites,
    }))
}
