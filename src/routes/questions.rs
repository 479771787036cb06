use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::questions::requests::{CreateQuestionRequest, QuestionListQuery};
use crate::services::QuestionService;

// 懒加载的全局 QuestionService 实例
static QUESTION_SERVICE: Lazy<QuestionService> = Lazy::new(QuestionService::new_lazy);

pub async fn list_questions(
    req: HttpRequest,
    query: web::Query<QuestionListQuery>,
) -> ActixResult<HttpResponse> {
    QUESTION_SERVICE
        .list_questions(&req, query.into_inner())
        .await
}

pub async fn create_question(
    req: HttpRequest,
    question: web::Json<CreateQuestionRequest>,
) -> ActixResult<HttpResponse> {
    QUESTION_SERVICE
        .create_question(&req, question.into_inner())
        .await
}

// 配置路由
pub fn configure_question_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/questions")
            .wrap(middlewares::RequireTeacher)
            .wrap(middlewares::RequireJWT)
            .route("", web::get().to(list_questions))
            .route("", web::post().to(create_question)),
    );
}
