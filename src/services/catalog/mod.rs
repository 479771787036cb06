pub mod courses;
pub mod tags;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::catalog::requests::{CreateCourseRequest, CreateTagRequest};
use crate::storage::Storage;

use super::app_data;

pub struct CatalogService {
    storage: Option<Arc<dyn Storage>>,
}

impl CatalogService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> Arc<dyn Storage> {
        match &self.storage {
            Some(storage) => storage.clone(),
            None => app_data::<dyn Storage>(request),
        }
    }

    pub async fn list_courses(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        courses::list_courses(self, request).await
    }

    pub async fn create_course(
        &self,
        request: &HttpRequest,
        course: CreateCourseRequest,
    ) -> ActixResult<HttpResponse> {
        courses::create_course(self, request, course).await
    }

    pub async fn list_tags(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        tags::list_tags(self, request).await
    }

    pub async fn create_tag(
        &self,
        request: &HttpRequest,
        tag: CreateTagRequest,
    ) -> ActixResult<HttpResponse> {
        tags::create_tag(self, request, tag).await
    }
}

// 去掉首尾空白，空串视为未填写
pub(crate) fn optional_text(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
