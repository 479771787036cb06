//! 作答循环：出题、换题、提交
//!
//! 每个 (会话, 邮箱) 的当前轮次以 JSON 存在对象缓存里，换题或缓存淘汰前一直有效。

use std::sync::Arc;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use rand::seq::IndexedRandom;
use tracing::{debug, info};

use super::SessionService;
use crate::cache::{CacheResult, ObjectCache};
use crate::models::{
    ApiResponse, ErrorCode,
    sessions::{
        QuizRound,
        entities::Session,
        requests::SubmitAnswerRequest,
        responses::QuestionServeResponse,
        round::SubmitOutcome,
    },
};
use crate::services::{backend_error, bad_request, current_user, not_found_or_denied};
use crate::storage::Storage;

const NO_QUESTIONS_MESSAGE: &str = "No questions are available for this session";

pub async fn current_question(
    service: &SessionService,
    request: &HttpRequest,
    session_id: i64,
) -> ActixResult<HttpResponse> {
    let user = match current_user(request) {
        Ok(user) => user,
        Err(resp) => return Ok(resp),
    };
    let storage = service.get_storage(request);
    let cache = service.get_cache(request);
    let key = QuizRound::cache_key(session_id, &user.email);

    let session = match open_session(&storage, &cache, &key, session_id).await {
        Ok(session) => session,
        Err(resp) => return Ok(resp),
    };

    if let CacheResult::Found(round) = cache.get_json::<QuizRound>(&key).await {
        return Ok(serve_response(QuestionServeResponse::Question {
            round: round.view(),
        }));
    }

    serve_new_question(&storage, &cache, &session, &user.email).await
}

/// 丢弃当前轮次后重新抽题，允许抽到重复题目
pub async fn next_question(
    service: &SessionService,
    request: &HttpRequest,
    session_id: i64,
) -> ActixResult<HttpResponse> {
    let user = match current_user(request) {
        Ok(user) => user,
        Err(resp) => return Ok(resp),
    };
    let storage = service.get_storage(request);
    let cache = service.get_cache(request);
    let key = QuizRound::cache_key(session_id, &user.email);

    let session = match open_session(&storage, &cache, &key, session_id).await {
        Ok(session) => session,
        Err(resp) => return Ok(resp),
    };
    cache.remove(&key).await;

    serve_new_question(&storage, &cache, &session, &user.email).await
}

pub async fn submit_answer(
    service: &SessionService,
    request: &HttpRequest,
    session_id: i64,
    answer: SubmitAnswerRequest,
) -> ActixResult<HttpResponse> {
    let user = match current_user(request) {
        Ok(user) => user,
        Err(resp) => return Ok(resp),
    };
    let storage = service.get_storage(request);
    let cache = service.get_cache(request);
    let key = QuizRound::cache_key(session_id, &user.email);

    if let Err(resp) = open_session(&storage, &cache, &key, session_id).await {
        return Ok(resp);
    }

    // 判分只用缓存里的本轮数据
    let mut round = match cache.get_json::<QuizRound>(&key).await {
        CacheResult::Found(round) => round,
        CacheResult::NotFound | CacheResult::ExistsButNoValue => {
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::QuizRoundNotFound,
                "No active question, please fetch a question first",
            )));
        }
    };

    match round.submit(answer.answer_id) {
        Ok(SubmitOutcome::Graded { correct }) => {
            info!(
                "{} answered question {} in session {}: {}",
                user.email,
                round.question.id,
                session_id,
                if correct { "correct" } else { "incorrect" }
            );
            if let Err(e) = cache.insert_json(key, &round, 0).await {
                return Ok(backend_error(
                    ErrorCode::InternalServerError,
                    "Failed to store quiz round",
                    e,
                ));
            }
        }
        Ok(SubmitOutcome::AlreadyRevealed) => {
            debug!("Round already revealed for {} in session {}", user.email, session_id);
        }
        Err(msg) => return Ok(bad_request(ErrorCode::AnswerInvalid, msg)),
    }

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        round.view(),
        "Answer submitted successfully",
    )))
}

/// 会话必须存在、未过期且处于激活状态，否则清掉该用户的轮次缓存
async fn open_session(
    storage: &Arc<dyn Storage>,
    cache: &Arc<dyn ObjectCache>,
    key: &str,
    session_id: i64,
) -> Result<Session, HttpResponse> {
    let rejection = match storage.get_session_by_id(session_id).await {
        Ok(Some(session)) if session.is_expired() => {
            bad_request(ErrorCode::SessionExpired, "This session has expired")
        }
        Ok(Some(session)) if !session.is_active => {
            bad_request(ErrorCode::SessionInactive, "This session is not active")
        }
        Ok(Some(session)) => return Ok(session),
        Ok(None) => not_found_or_denied(ErrorCode::SessionNotFound, "Session"),
        Err(e) => {
            return Err(backend_error(
                ErrorCode::InternalServerError,
                "Failed to load session",
                e,
            ));
        }
    };

    debug!("Dropping quiz round {} for unavailable session", key);
    cache.remove(key).await;
    Err(rejection)
}

async fn serve_new_question(
    storage: &Arc<dyn Storage>,
    cache: &Arc<dyn ObjectCache>,
    session: &Session,
    email: &str,
) -> ActixResult<HttpResponse> {
    let session_id = session.id;

    let scope = match storage.get_session_scope(session).await {
        Ok(scope) => scope,
        Err(e) => {
            return Ok(backend_error(
                ErrorCode::InternalServerError,
                "Failed to load session scope",
                e,
            ));
        }
    };
    let eligible = match storage.list_eligible_question_ids(&scope).await {
        Ok(ids) => ids,
        Err(e) => {
            return Ok(backend_error(
                ErrorCode::InternalServerError,
                "Failed to load eligible questions",
                e,
            ));
        }
    };

    let Some(question_id) = pick_question(&eligible) else {
        return Ok(no_questions());
    };

    let payload = match storage.get_question_with_answers(question_id).await {
        Ok(Some(payload)) => payload,
        Ok(None) => return Ok(no_questions()),
        Err(e) => {
            return Ok(backend_error(
                ErrorCode::InternalServerError,
                "Failed to load question",
                e,
            ));
        }
    };

    let round = QuizRound::new(session_id, payload);
    if let Err(e) = cache
        .insert_json(QuizRound::cache_key(session_id, email), &round, 0)
        .await
    {
        return Ok(backend_error(
            ErrorCode::InternalServerError,
            "Failed to store quiz round",
            e,
        ));
    }
    debug!("Served question {} to {} in session {}", question_id, email, session_id);

    Ok(serve_response(QuestionServeResponse::Question {
        round: round.view(),
    }))
}

/// 等概率抽取，不记录历史
fn pick_question(eligible: &[i64]) -> Option<i64> {
    let mut rng = rand::rng();
    eligible.choose(&mut rng).copied()
}

fn no_questions() -> HttpResponse {
    serve_response(QuestionServeResponse::NoQuestionsAvailable {
        message: NO_QUESTIONS_MESSAGE.to_string(),
    })
}

fn serve_response(body: QuestionServeResponse) -> HttpResponse {
    HttpResponse::Ok().json(ApiResponse::success(body, "Question retrieved successfully"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pick_question_empty() {
        assert_eq!(pick_question(&[]), None);
    }

    #[test]
    fn test_pick_question_within_pool() {
        let pool = [4, 8, 15];
        for _ in 0..20 {
            let picked = pick_question(&pool).unwrap();
            assert!(pool.contains(&picked));
        }
    }
}
