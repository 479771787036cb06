pub mod create;
pub mod delete;
pub mod get;
pub mod members;
pub mod update;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::classes::entities::Class;
use crate::models::classes::requests::{AddMembersRequest, CreateClassRequest, UpdateClassRequest};
use crate::models::ErrorCode;
use crate::storage::Storage;
use crate::utils::validate::normalize_email;

use super::{app_data, backend_error, not_found_or_denied};

pub struct ClassService {
    storage: Option<Arc<dyn Storage>>,
}

impl ClassService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> Arc<dyn Storage> {
        match &self.storage {
            Some(storage) => storage.clone(),
            None => app_data::<dyn Storage>(request),
        }
    }

    pub async fn create_class(
        &self,
        request: &HttpRequest,
        class_data: CreateClassRequest,
    ) -> ActixResult<HttpResponse> {
        create::create_class(self, request, class_data).await
    }

    // 班级详情（含成员）
    pub async fn get_class(&self, request: &HttpRequest, class_id: i64) -> ActixResult<HttpResponse> {
        get::get_class(self, request, class_id).await
    }

    pub async fn update_class(
        &self,
        request: &HttpRequest,
        class_id: i64,
        update_data: UpdateClassRequest,
    ) -> ActixResult<HttpResponse> {
        update::update_class(self, request, class_id, update_data).await
    }

    pub async fn delete_class(
        &self,
        request: &HttpRequest,
        class_id: i64,
    ) -> ActixResult<HttpResponse> {
        delete::delete_class(self, request, class_id).await
    }

    pub async fn add_members(
        &self,
        request: &HttpRequest,
        class_id: i64,
        members: AddMembersRequest,
    ) -> ActixResult<HttpResponse> {
        members::add_members(self, request, class_id, members).await
    }

    pub async fn remove_member(
        &self,
        request: &HttpRequest,
        class_id: i64,
        member_id: i64,
    ) -> ActixResult<HttpResponse> {
        members::remove_member(self, request, class_id, member_id).await
    }
}

/// 读取教师名下的班级，不存在或不属于该教师时统一返回 404
pub(crate) async fn load_owned_class(
    storage: &Arc<dyn Storage>,
    class_id: i64,
    teacher_id: i64,
) -> Result<Class, HttpResponse> {
    match storage.get_class_by_id(class_id).await {
        Ok(Some(class)) if class.teacher_id == teacher_id => Ok(class),
        Ok(_) => Err(not_found_or_denied(ErrorCode::ClassNotFound, "Class")),
        Err(e) => Err(backend_error(
            ErrorCode::InternalServerError,
            "Failed to load class",
            e,
        )),
    }
}

/// 规范化邮箱并去掉空白项
pub(crate) fn normalize_candidates(emails: &[String]) -> Vec<String> {
    emails
        .iter()
        .map(|e| normalize_email(e))
        .filter(|e| !e.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_candidates() {
        let input = vec![
            " Alice@School.edu ".to_string(),
            "   ".to_string(),
            "bob@school.edu".to_string(),
        ];
        assert_eq!(
            normalize_candidates(&input),
            vec!["alice@school.edu", "bob@school.edu"]
        );
    }
}
