use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use crate::errors::PlannerError;
use crate::models::reviews::{
    entities::ReviewWrite, requests::ReviewSubmitRequest, responses::ReviewResponse,
};
use crate::services::current_user;

use super::CourseService;

pub async fn list_reviews(
    service: &CourseService,
    request: &HttpRequest,
    course_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    let course = service.require_course(&storage, course_id).await?;

    let reviews: Vec<ReviewResponse> = storage
        .list_reviews(course.id)
        .await?
        .into_iter()
        .map(Into::into)
        .collect();

    Ok(HttpResponse::Ok().json(reviews))
}

pub async fn submit_review(
    service: &CourseService,
    request: &HttpRequest,
    course_id: i64,
    review_request: ReviewSubmitRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    let user = current_user(request)?;
    let course = service.require_course(&storage, course_id).await?;

    let input = review_request.validate().map_err(PlannerError::from)?;
    let (review, write) = storage.upsert_review(user.id, course.id, input).await?;

    tracing::info!(
        "User {} {} review for {}",
        user.username,
        match write {
            ReviewWrite::Created => "created",
            ReviewWrite::Updated => "updated",
        },
        course.code
    );

    let response = ReviewResponse::from(review);
    Ok(match write {
        ReviewWrite::Created => HttpResponse::Created().json(response),
        ReviewWrite::Updated => HttpResponse::Ok().json(response),
    })
}
