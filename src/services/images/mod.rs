pub mod download;
pub mod upload;

use actix_multipart::Multipart;
use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::object_storage::ObjectStorage;

use super::app_data;

pub struct ImageService {
    objects: Option<Arc<dyn ObjectStorage>>,
}

impl ImageService {
    pub fn new_lazy() -> Self {
        Self { objects: None }
    }

    pub(crate) fn get_object_storage(&self, request: &HttpRequest) -> Arc<dyn ObjectStorage> {
        match &self.objects {
            Some(objects) => objects.clone(),
            None => app_data::<dyn ObjectStorage>(request),
        }
    }

    // 上传并规范化题目图片
    pub async fn handle_upload(
        &self,
        request: &HttpRequest,
        payload: Multipart,
    ) -> ActixResult<HttpResponse> {
        upload::handle_upload(self, request, payload).await
    }

    pub async fn handle_download(
        &self,
        request: &HttpRequest,
        filename: String,
    ) -> ActixResult<HttpResponse> {
        download::handle_download(self, request, filename).await
    }
}
