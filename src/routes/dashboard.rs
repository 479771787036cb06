use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::dashboard::requests::TeacherDashboardQuery;
use crate::services::DashboardService;

// 懒加载的全局 DashboardService 实例
static DASHBOARD_SERVICE: Lazy<DashboardService> = Lazy::new(DashboardService::new_lazy);

pub async fn teacher_dashboard(
    req: HttpRequest,
    query: web::Query<TeacherDashboardQuery>,
) -> ActixResult<HttpResponse> {
    DASHBOARD_SERVICE
        .teacher_dashboard(&req, query.into_inner())
        .await
}

pub async fn student_dashboard(req: HttpRequest) -> ActixResult<HttpResponse> {
    DASHBOARD_SERVICE.student_dashboard(&req).await
}

// 配置路由
pub fn configure_dashboard_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/dashboard")
            .wrap(middlewares::RequireJWT)
            .route(
                "/teacher",
                web::get()
                    .to(teacher_dashboard)
                    .wrap(middlewares::RequireTeacher),
            )
            .route("/student", web::get().to(student_dashboard)),
    );
}
