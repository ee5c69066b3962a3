use actix_web::{HttpResponse, Result as ActixResult};

use crate::models::common::choices::{AssessmentType, ProgramLevel, StudyArea};

pub async fn list_assessment_types() -> ActixResult<HttpResponse> {
    Ok(HttpResponse::Ok().json(AssessmentType::choices()))
}

pub async fn list_study_areas() -> ActixResult<HttpResponse> {
    Ok(HttpResponse::Ok().json(StudyArea::choices()))
}

pub async fn list_program_levels() -> ActixResult<HttpResponse> {
    Ok(HttpResponse::Ok().json(ProgramLevel::choices()))
}
