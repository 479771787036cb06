/*!
 * 教师权限中间件
 *
 * 必须在 RequireJWT 之后使用。按当前用户邮箱解析角色，
 * 只放行教师，并把 [`Teacher`] 写入请求扩展。
 *
 * ```rust,ignore
 * web::scope("/api/v1/classes")
 *     .wrap(RequireTeacher)
 *     .wrap(RequireJWT)
 * ```
 *
 * 角色查询失败时按 `identity.fail_open` 处理：放行策略下视为学生（403），
 * 否则返回 503。
 */

use actix_service::{Service, Transform};
use actix_web::{
    Error, HttpMessage,
    body::EitherBody,
    dev::{ServiceRequest, ServiceResponse},
    http::StatusCode,
};
use futures_util::future::{LocalBoxFuture, Ready, ready};
use std::{rc::Rc, sync::Arc};
use tracing::info;

use super::create_error_response;
use crate::config::AppConfig;
use crate::identity::RoleResolver;
use crate::models::{
    ErrorCode,
    teachers::{entities::Teacher, roles::Role},
    users::entities::CurrentUser,
};

#[derive(Clone)]
pub struct RequireTeacher;

impl<S, B> Transform<S, ServiceRequest> for RequireTeacher
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = RequireTeacherMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RequireTeacherMiddleware {
            service: Rc::new(service),
        }))
    }
}

pub struct RequireTeacherMiddleware<S> {
    service: Rc<S>,
}

impl<S, B> Service<ServiceRequest> for RequireTeacherMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(
        &self,
        ctx: &mut std::task::Context<'_>,
    ) -> std::task::Poll<Result<(), Self::Error>> {
        self.service.poll_ready(ctx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let srv = self.service.clone();

        Box::pin(async move {
            let Some(user) = req.extensions().get::<CurrentUser>().cloned() else {
                info!(
                    "Teacher check failed: no current user. Make sure RequireJWT middleware is applied first."
                );
                return Ok(req.into_response(
                    create_error_response(
                        StatusCode::UNAUTHORIZED,
                        ErrorCode::Unauthorized,
                        "Authentication required",
                    )
                    .map_into_right_body(),
                ));
            };

            let Some(resolver) = req
                .app_data::<actix_web::web::Data<Arc<dyn RoleResolver>>>()
                .map(|data| data.get_ref().clone())
            else {
                return Ok(req.into_response(
                    create_error_response(
                        StatusCode::SERVICE_UNAVAILABLE,
                        ErrorCode::ServiceUnavailable,
                        "Role resolver not configured",
                    )
                    .map_into_right_body(),
                ));
            };

            let fail_open = AppConfig::get().identity.fail_open;
            let role = resolver
                .resolve(&user.email)
                .await
                .into_role(&user.email, fail_open);

            match role {
                Ok(Role::Teacher(teacher)) => {
                    req.extensions_mut().insert(teacher);
                    let res = srv.call(req).await?.map_into_left_body();
                    Ok(res)
                }
                Ok(Role::Student) => {
                    info!("Teacher access denied for {}", user.email);
                    Ok(req.into_response(
                        create_error_response(
                            StatusCode::FORBIDDEN,
                            ErrorCode::Forbidden,
                            "Teacher access required",
                        )
                        .map_into_right_body(),
                    ))
                }
                Err(_) => Ok(req.into_response(
                    create_error_response(
                        StatusCode::SERVICE_UNAVAILABLE,
                        ErrorCode::ServiceUnavailable,
                        "Unable to determine user role, please try again later",
                    )
                    .map_into_right_body(),
                )),
            }
        })
    }
}

impl RequireTeacher {
    /// 从请求扩展中提取教师信息
    /// 此函数应该在应用了RequireTeacher中间件的路由处理程序中使用
    pub fn extract_teacher(req: &actix_web::HttpRequest) -> Option<Teacher> {
        req.extensions().get::<Teacher>().cloned()
    }
}
