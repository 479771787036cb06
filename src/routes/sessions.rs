use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::sessions::{SessionDraft, requests::SubmitAnswerRequest};
use crate::services::SessionService;
use crate::utils::SafeSessionIdI64;

// 懒加载的全局 SessionService 实例
static SESSION_SERVICE: Lazy<SessionService> = Lazy::new(SessionService::new_lazy);

pub async fn create_session(
    req: HttpRequest,
    draft: web::Json<SessionDraft>,
) -> ActixResult<HttpResponse> {
    SESSION_SERVICE
        .create_session(&req, draft.into_inner())
        .await
}

pub async fn delete_session(
    req: HttpRequest,
    session_id: SafeSessionIdI64,
) -> ActixResult<HttpResponse> {
    SESSION_SERVICE.delete_session(&req, session_id.0).await
}

pub async fn get_session(
    req: HttpRequest,
    session_id: SafeSessionIdI64,
) -> ActixResult<HttpResponse> {
    SESSION_SERVICE.get_session(&req, session_id.0).await
}

pub async fn join_session(
    req: HttpRequest,
    session_id: SafeSessionIdI64,
) -> ActixResult<HttpResponse> {
    SESSION_SERVICE.join_session(&req, session_id.0).await
}

pub async fn current_question(
    req: HttpRequest,
    session_id: SafeSessionIdI64,
) -> ActixResult<HttpResponse> {
    SESSION_SERVICE.current_question(&req, session_id.0).await
}

pub async fn next_question(
    req: HttpRequest,
    session_id: SafeSessionIdI64,
) -> ActixResult<HttpResponse> {
    SESSION_SERVICE.next_question(&req, session_id.0).await
}

pub async fn submit_answer(
    req: HttpRequest,
    session_id: SafeSessionIdI64,
    answer: web::Json<SubmitAnswerRequest>,
) -> ActixResult<HttpResponse> {
    SESSION_SERVICE
        .submit_answer(&req, session_id.0, answer.into_inner())
        .await
}

// 配置路由
pub fn configure_session_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/sessions")
            .wrap(middlewares::RequireJWT)
            .route(
                "",
                web::post()
                    .to(create_session)
                    .wrap(middlewares::RequireTeacher),
            )
            .service(
                web::resource("/{session_id}")
                    .route(web::get().to(get_session))
                    .route(
                        web::delete()
                            .to(delete_session)
                            .wrap(middlewares::RequireTeacher),
                    ),
            )
            .route("/{session_id}/join", web::post().to(join_session))
            .route("/{session_id}/question", web::get().to(current_question))
            .route("/{session_id}/question/next", web::post().to(next_question))
            .route("/{session_id}/answer", web::post().to(submit_answer)),
    );
}
