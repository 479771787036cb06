use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::classes::requests::{AddMembersRequest, CreateClassRequest, UpdateClassRequest};
use crate::services::ClassService;
use crate::utils::{SafeClassIdI64, SafeMemberIdI64};

// 懒加载的全局 CLASS_SERVICE 实例
static CLASS_SERVICE: Lazy<ClassService> = Lazy::new(ClassService::new_lazy);

// HTTP处理程序
pub async fn create_class(
    req: HttpRequest,
    class_data: web::Json<CreateClassRequest>,
) -> ActixResult<HttpResponse> {
    CLASS_SERVICE
        .create_class(&req, class_data.into_inner())
        .await
}

pub async fn get_class(req: HttpRequest, class_id: SafeClassIdI64) -> ActixResult<HttpResponse> {
    CLASS_SERVICE.get_class(&req, class_id.0).await
}

pub async fn update_class(
    req: HttpRequest,
    class_id: SafeClassIdI64,
    update_data: web::Json<UpdateClassRequest>,
) -> ActixResult<HttpResponse> {
    CLASS_SERVICE
        .update_class(&req, class_id.0, update_data.into_inner())
        .await
}

pub async fn delete_class(req: HttpRequest, class_id: SafeClassIdI64) -> ActixResult<HttpResponse> {
    CLASS_SERVICE.delete_class(&req, class_id.0).await
}

pub async fn add_members(
    req: HttpRequest,
    class_id: SafeClassIdI64,
    members: web::Json<AddMembersRequest>,
) -> ActixResult<HttpResponse> {
    CLASS_SERVICE
        .add_members(&req, class_id.0, members.into_inner())
        .await
}

pub async fn remove_member(
    req: HttpRequest,
    class_id: SafeClassIdI64,
    member_id: SafeMemberIdI64,
) -> ActixResult<HttpResponse> {
    CLASS_SERVICE
        .remove_member(&req, class_id.0, member_id.0)
        .await
}

// 配置路由
pub fn configure_classes_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/classes")
            .wrap(middlewares::RequireTeacher)
            .wrap(middlewares::RequireJWT)
            .route("", web::post().to(create_class))
            .service(
                web::resource("/{class_id}")
                    .route(web::get().to(get_class))
                    .route(web::put().to(update_class))
                    .route(web::delete().to(delete_class)),
            )
            .route("/{class_id}/members", web::post().to(add_members))
            .route(
                "/{class_id}/members/{member_id}",
                web::delete().to(remove_member),
            ),
    );
}
