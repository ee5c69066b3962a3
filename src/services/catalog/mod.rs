pub mod choices;
pub mod programs;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::errors::Result;
use crate::models::programs::requests::ProgramSearchParams;
use crate::storage::Storage;

pub struct CatalogService {
    storage: Option<Arc<dyn Storage>>,
}

impl CatalogService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> Result<Arc<dyn Storage>> {
        match &self.storage {
            Some(storage) => Ok(storage.clone()),
            None => super::storage_from_request(request),
        }
    }

    pub async fn list_assessment_types(&self) -> ActixResult<HttpResponse> {
        choices::list_assessment_types().await
    }

    pub async fn list_study_areas(&self) -> ActixResult<HttpResponse> {
        choices::list_study_areas().await
    }

    pub async fn list_program_levels(&self) -> ActixResult<HttpResponse> {
        choices::list_program_levels().await
    }

    // 学位项目搜索
    pub async fn search_programs(
        &self,
        request: &HttpRequest,
        params: ProgramSearchParams,
    ) -> ActixResult<HttpResponse> {
        programs::search_programs(self, request, params).await
    }
}
