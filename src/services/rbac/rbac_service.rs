//! 역할 기반 접근 제어(RBAC) 서비스
//!
//! 역할/권한 관리와 함께, 권한 미들웨어가 사용하는 "관리자 → 역할 → 권한"
//! 해석을 담당합니다.
//!
//! ```text
//! user_roles ──(role_id)──▶ role_permissions ──(permission_id)──▶ permissions
//! ```

use std::sync::Arc;
use mongodb::bson::oid::ObjectId;
use crate::{
    domain::dto::admin::{
        CreateRoleRequest, PermissionListQuery, PermissionRequest, PermissionResponse, RoleListQuery,
        RolePermissionsResponse, RoleResponse, UpdateRoleRequest,
    },
    domain::dto::common::PageResult,
    domain::entities::admin::{Permission, Role},
    errors::{AppError, AppResult, ErrorCode},
    repositories::admin::{
        permission_list_filter, role_list_filter, PermissionRepository, RolePermissionRepository,
        RoleRepository, UserRoleRepository,
    },
    services::rbac::route_matcher::{dedupe_ids, permission_allows},
    utils::string_utils::parse_object_id,
};
use singleton_macro::service;

#[service(name = "rbac")]
pub struct RbacService {
    roles: Arc<RoleRepository>,
    permissions: Arc<PermissionRepository>,
    role_permissions: Arc<RolePermissionRepository>,
    user_roles: Arc<UserRoleRepository>,
}

impl RbacService {
    // ---- 역할 ----

    pub async fn list_roles(&self, query: &RoleListQuery) -> AppResult<PageResult<RoleResponse>> {
        let page = query.page_query();
        let filter = role_list_filter(query.keyword.as_deref(), query.status);
        let (roles, total) = self.roles.list(filter, &page).await?;

        Ok(PageResult::new(roles, total, &page).map(RoleResponse::from))
    }

    pub async fn get_role(&self, id: &str) -> AppResult<RoleResponse> {
        Ok(self.load_role(&parse_object_id(id)?).await?.into())
    }

    pub async fn create_role(&self, req: CreateRoleRequest) -> AppResult<RoleResponse> {
        let role_code = req.role_code.trim().to_string();

        if self.roles.find_by_code(&role_code).await?.is_some() {
            return Err(AppError::business_with(ErrorCode::RecordExists, role_code));
        }

        let role = self
            .roles
            .create(Role::new(req.role_name.trim().to_string(), role_code, req.description, req.status))
            .await?;

        log::info!("[RBAC] role created: {} ({})", role.role_code, role.id.map(|id| id.to_hex()).unwrap_or_default());
        Ok(role.into())
    }

    pub async fn update_role(&self, id: &str, req: UpdateRoleRequest) -> AppResult<RoleResponse> {
        let role_id = parse_object_id(id)?;

        let role = self
            .roles
            .update(&role_id, req.role_name.trim(), &req.description, req.status)
            .await?
            .ok_or_else(|| AppError::business(ErrorCode::RecordNotFound))?;

        log::info!("[RBAC] role updated: {}", role.role_code);
        Ok(role.into())
    }

    /// 시스템 역할은 삭제할 수 없습니다. 역할에 걸린 권한/관리자 연결도 함께 제거합니다.
    pub async fn delete_role(&self, id: &str) -> AppResult<()> {
        let role_id = parse_object_id(id)?;
        let role = self.load_role(&role_id).await?;

        if role.is_system() {
            return Err(AppError::business_with(ErrorCode::NoPermission, "系统角色不可删除"));
        }

        self.roles.delete(&role_id).await?;
        let unlinked_permissions = self.role_permissions.delete_by_role(&role_id).await?;
        let unlinked_users = self.user_roles.delete_by_role(&role_id).await?;

        log::info!(
            "[RBAC] role deleted: {} (permissions: {}, users: {})",
            role.role_code, unlinked_permissions, unlinked_users
        );
        Ok(())
    }

    async fn load_role(&self, role_id: &ObjectId) -> AppResult<Role> {
        self.roles
            .find_by_id(role_id)
            .await?
            .ok_or_else(|| AppError::business(ErrorCode::RecordNotFound))
    }

    // ---- 권한 ----

    pub async fn list_permissions(&self, query: &PermissionListQuery) -> AppResult<PageResult<PermissionResponse>> {
        let page = query.page_query();
        let filter = permission_list_filter(query.module.as_deref(), query.keyword.as_deref());
        let (permissions, total) = self.permissions.list(filter, &page).await?;

        Ok(PageResult::new(permissions, total, &page).map(PermissionResponse::from))
    }

    pub async fn get_permission(&self, id: &str) -> AppResult<PermissionResponse> {
        let permission_id = parse_object_id(id)?;
        self.permissions
            .find_by_id(&permission_id)
            .await?
            .map(PermissionResponse::from)
            .ok_or_else(|| AppError::business(ErrorCode::RecordNotFound))
    }

    pub async fn create_permission(&self, req: PermissionRequest) -> AppResult<PermissionResponse> {
        let permission = permission_from_request(req);

        if self.permissions.find_by_code(&permission.permission_code).await?.is_some() {
            return Err(AppError::business_with(ErrorCode::RecordExists, permission.permission_code));
        }

        let permission = self.permissions.create(permission).await?;
        log::info!(
            "[RBAC] permission created: {} {} {}",
            permission.permission_code, permission.http_method, permission.api_route
        );
        Ok(permission.into())
    }

    /// 권한 코드는 다른 권한과 겹칠 수 없습니다.
    pub async fn update_permission(&self, id: &str, req: PermissionRequest) -> AppResult<PermissionResponse> {
        let permission_id = parse_object_id(id)?;
        let permission = permission_from_request(req);

        if let Some(existing) = self.permissions.find_by_code(&permission.permission_code).await? {
            if existing.id != Some(permission_id) {
                return Err(AppError::business_with(ErrorCode::RecordExists, permission.permission_code));
            }
        }

        let updated = self
            .permissions
            .update(&permission_id, &permission)
            .await?
            .ok_or_else(|| AppError::business(ErrorCode::RecordNotFound))?;

        log::info!("[RBAC] permission updated: {}", updated.permission_code);
        Ok(updated.into())
    }

    pub async fn delete_permission(&self, id: &str) -> AppResult<()> {
        let permission_id = parse_object_id(id)?;

        if !self.permissions.delete(&permission_id).await? {
            return Err(AppError::business(ErrorCode::RecordNotFound));
        }
        self.role_permissions.delete_by_permission(&permission_id).await?;

        log::info!("[RBAC] permission deleted: {}", id);
        Ok(())
    }

    // ---- 역할-권한 ----

    /// 역할의 권한 집합을 요청 목록으로 통째로 교체합니다.
    pub async fn assign_permissions(&self, role_id: &str, permission_ids: &[String]) -> AppResult<RolePermissionsResponse> {
        let role_id = parse_object_id(role_id)?;
        self.load_role(&role_id).await?;

        let ids = permission_ids
            .iter()
            .map(|id| parse_object_id(id))
            .collect::<AppResult<Vec<_>>>()?;
        let ids = dedupe_ids(ids);

        let found = self.permissions.find_by_ids(&ids).await?;
        if found.len() != ids.len() {
            return Err(AppError::business_with(ErrorCode::RecordNotFound, "permission"));
        }

        self.role_permissions.replace_for_role(&role_id, &ids).await?;
        log::info!("[RBAC] role {} permissions replaced: {} items", role_id.to_hex(), ids.len());

        Ok(RolePermissionsResponse {
            role_id: role_id.to_hex(),
            permission_ids: ids.iter().map(|id| id.to_hex()).collect(),
        })
    }

    pub async fn remove_permission(&self, role_id: &str, permission_id: &str) -> AppResult<()> {
        let role_id = parse_object_id(role_id)?;
        let permission_id = parse_object_id(permission_id)?;

        if !self.role_permissions.remove(&role_id, &permission_id).await? {
            return Err(AppError::business(ErrorCode::RecordNotFound));
        }
        Ok(())
    }

    pub async fn role_permission_ids(&self, role_id: &str) -> AppResult<RolePermissionsResponse> {
        let role_id = parse_object_id(role_id)?;
        let ids = self.role_permissions.find_permission_ids(&role_id).await?;

        Ok(RolePermissionsResponse {
            role_id: role_id.to_hex(),
            permission_ids: ids.iter().map(|id| id.to_hex()).collect(),
        })
    }

    // ---- 관리자-역할 ----

    /// 이미 연결된 역할이면 변화 없이 성공합니다.
    pub async fn assign_role(&self, user_id: &str, role_id: &str) -> AppResult<()> {
        let user_id = parse_object_id(user_id)?;
        let role_id = parse_object_id(role_id)?;
        self.load_role(&role_id).await?;

        if self.user_roles.assign(&user_id, &role_id).await? {
            log::info!("[RBAC] role {} assigned to {}", role_id.to_hex(), user_id.to_hex());
        }
        Ok(())
    }

    pub async fn remove_role(&self, user_id: &str, role_id: &str) -> AppResult<()> {
        let user_id = parse_object_id(user_id)?;
        let role_id = parse_object_id(role_id)?;

        if !self.user_roles.remove(&user_id, &role_id).await? {
            return Err(AppError::business(ErrorCode::RecordNotFound));
        }
        Ok(())
    }

    pub async fn remove_all_roles(&self, user_id: &str) -> AppResult<u64> {
        let user_id = parse_object_id(user_id)?;
        self.user_roles.remove_all(&user_id).await
    }

    pub async fn user_roles(&self, user_id: &ObjectId) -> AppResult<Vec<Role>> {
        let role_ids = self.user_roles.find_role_ids(user_id).await?;
        self.roles.find_by_ids(&role_ids).await
    }

    pub async fn user_roles_detail(&self, user_id: &str) -> AppResult<Vec<RoleResponse>> {
        let user_id = parse_object_id(user_id)?;
        Ok(self.user_roles(&user_id).await?.into_iter().map(RoleResponse::from).collect())
    }

    /// 로그인/사용자 정보 응답에 담기는 역할 코드 목록
    pub async fn role_codes(&self, user_id: &ObjectId) -> AppResult<Vec<String>> {
        Ok(self
            .user_roles(user_id)
            .await?
            .into_iter()
            .map(|role| role.role_code)
            .collect())
    }

    // ---- 권한 판정 ----

    /// 관리자가 가진 모든 역할의 권한 합집합 (중복 제거)
    pub async fn user_permissions(&self, user_id: &ObjectId) -> AppResult<Vec<Permission>> {
        let role_ids = self.user_roles.find_role_ids(user_id).await?;
        if role_ids.is_empty() {
            return Ok(Vec::new());
        }

        let permission_ids = self.role_permissions.find_permission_ids_for_roles(&role_ids).await?;
        let permission_ids = dedupe_ids(permission_ids);

        self.permissions.find_by_ids(&permission_ids).await
    }

    pub async fn user_permission_list(&self, user_id: &str) -> AppResult<Vec<PermissionResponse>> {
        let user_id = parse_object_id(user_id)?;
        Ok(self
            .user_permissions(&user_id)
            .await?
            .into_iter()
            .map(PermissionResponse::from)
            .collect())
    }

    /// 경로/메서드 접근 허용 여부
    pub async fn has_permission(&self, user_id: &str, route: &str, method: &str) -> AppResult<bool> {
        let user_id = parse_object_id(user_id)?;
        let permissions = self.user_permissions(&user_id).await?;

        Ok(permission_allows(&permissions, route, method))
    }
}

fn permission_from_request(req: PermissionRequest) -> Permission {
    Permission::new(
        req.permission_name.trim().to_string(),
        req.permission_name_en.trim().to_string(),
        req.permission_code.trim().to_string(),
        req.api_route.trim().to_string(),
        req.http_method,
        req.module.trim().to_string(),
        req.description,
        req.description_en,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_permission_from_request_normalizes_fields() {
        let req = PermissionRequest {
            permission_name: " 角色列表 ".to_string(),
            permission_name_en: "Role list".to_string(),
            permission_code: " role:list ".to_string(),
            api_route: "/api/admin/roles ".to_string(),
            http_method: "get".to_string(),
            module: "rbac".to_string(),
            description: String::new(),
            description_en: String::new(),
        };

        let permission = permission_from_request(req);

        assert_eq!(permission.permission_name, "角色列表");
        assert_eq!(permission.permission_code, "role:list");
        assert_eq!(permission.api_route, "/api/admin/roles");
        assert_eq!(permission.http_method, "GET");
    }
}
