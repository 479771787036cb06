pub mod student;
pub mod teacher;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::dashboard::requests::TeacherDashboardQuery;
use crate::storage::Storage;

use super::app_data;

pub struct DashboardService {
    storage: Option<Arc<dyn Storage>>,
}

impl DashboardService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> Arc<dyn Storage> {
        match &self.storage {
            Some(storage) => storage.clone(),
            None => app_data::<dyn Storage>(request),
        }
    }

    pub async fn teacher_dashboard(
        &self,
        request: &HttpRequest,
        query: TeacherDashboardQuery,
    ) -> ActixResult<HttpResponse> {
        teacher::teacher_dashboard(self, request, query).await
    }

    pub async fn student_dashboard(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        student::student_dashboard(self, request).await
    }
}
