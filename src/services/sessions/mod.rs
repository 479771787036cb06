pub mod create;
pub mod delete;
pub mod detail;
pub mod join;
pub mod overview;
pub mod quiz;
pub mod saga;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::cache::ObjectCache;
use crate::models::ErrorCode;
use crate::models::sessions::{SessionDraft, entities::Session, requests::SubmitAnswerRequest};
use crate::storage::Storage;

use super::{app_data, backend_error, not_found_or_denied};

pub use saga::{CompensationPolicy, SagaReport, SagaStep, SessionCreationSaga};

pub struct SessionService {
    storage: Option<Arc<dyn Storage>>,
    cache: Option<Arc<dyn ObjectCache>>,
}

impl SessionService {
    pub fn new_lazy() -> Self {
        Self {
            storage: None,
            cache: None,
        }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> Arc<dyn Storage> {
        match &self.storage {
            Some(storage) => storage.clone(),
            None => app_data::<dyn Storage>(request),
        }
    }

    pub(crate) fn get_cache(&self, request: &HttpRequest) -> Arc<dyn ObjectCache> {
        match &self.cache {
            Some(cache) => cache.clone(),
            None => app_data::<dyn ObjectCache>(request),
        }
    }

    pub async fn create_session(
        &self,
        request: &HttpRequest,
        draft: SessionDraft,
    ) -> ActixResult<HttpResponse> {
        create::create_session(self, request, draft).await
    }

    pub async fn delete_session(
        &self,
        request: &HttpRequest,
        session_id: i64,
    ) -> ActixResult<HttpResponse> {
        delete::delete_session(self, request, session_id).await
    }

    pub async fn get_session(
        &self,
        request: &HttpRequest,
        session_id: i64,
    ) -> ActixResult<HttpResponse> {
        detail::get_session(self, request, session_id).await
    }

    pub async fn join_session(
        &self,
        request: &HttpRequest,
        session_id: i64,
    ) -> ActixResult<HttpResponse> {
        join::join_session(self, request, session_id).await
    }

    // 当前题目，没有则抽一道
    pub async fn current_question(
        &self,
        request: &HttpRequest,
        session_id: i64,
    ) -> ActixResult<HttpResponse> {
        quiz::current_question(self, request, session_id).await
    }

    pub async fn next_question(
        &self,
        request: &HttpRequest,
        session_id: i64,
    ) -> ActixResult<HttpResponse> {
        quiz::next_question(self, request, session_id).await
    }

    pub async fn submit_answer(
        &self,
        request: &HttpRequest,
        session_id: i64,
        answer: SubmitAnswerRequest,
    ) -> ActixResult<HttpResponse> {
        quiz::submit_answer(self, request, session_id, answer).await
    }
}

/// 读取会话，不存在时返回 404
pub(crate) async fn load_session(
    storage: &Arc<dyn Storage>,
    session_id: i64,
) -> Result<Session, HttpResponse> {
    match storage.get_session_by_id(session_id).await {
        Ok(Some(session)) => Ok(session),
        Ok(None) => Err(not_found_or_denied(ErrorCode::SessionNotFound, "Session")),
        Err(e) => Err(backend_error(
            ErrorCode::InternalServerError,
            "Failed to load session",
            e,
        )),
    }
}
