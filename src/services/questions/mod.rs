pub mod create;
pub mod list;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::questions::requests::{CreateQuestionRequest, QuestionListQuery};
use crate::storage::Storage;

use super::app_data;

pub struct QuestionService {
    storage: Option<Arc<dyn Storage>>,
}

impl QuestionService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> Arc<dyn Storage> {
        match &self.storage {
            Some(storage) => storage.clone(),
            None => app_data::<dyn Storage>(request),
        }
    }

    pub async fn create_question(
        &self,
        request: &HttpRequest,
        question: CreateQuestionRequest,
    ) -> ActixResult<HttpResponse> {
        create::create_question(self, request, question).await
    }

    pub async fn list_questions(
        &self,
        request: &HttpRequest,
        query: QuestionListQuery,
    ) -> ActixResult<HttpResponse> {
        list::list_questions(self, request, query).await
    }
}
