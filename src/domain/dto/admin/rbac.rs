//! 역할/권한 관리 DTO

use serde::{Deserialize, Serialize};
use validator::Validate;
use crate::domain::dto::common::PageQuery;
use crate::domain::entities::admin::{Permission, Role};

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RoleListQuery {
    pub page: Option<u64>,
    pub page_size: Option<u64>,
    /// 역할 이름 부분 검색
    pub keyword: Option<String>,
    /// 상태 필터, 음수 또는 미지정이면 전체
    pub status: Option<i32>,
}

impl RoleListQuery {
    pub fn page_query(&self) -> PageQuery {
        PageQuery::new(self.page, self.page_size)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateRoleRequest {
    #[validate(length(min = 1, max = 50, message = "角色名称长度为1-50"))]
    pub role_name: String,
    #[validate(length(min = 1, max = 50, message = "角色代码长度为1-50"))]
    pub role_code: String,
    #[serde(default)]
    pub description: String,
    #[serde(default = "default_status")]
    pub status: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct UpdateRoleRequest {
    #[validate(length(min = 1, max = 50, message = "角色名称长度为1-50"))]
    pub role_name: String,
    #[serde(default)]
    pub description: String,
    #[validate(range(min = 0, max = 1, message = "状态只能为0或1"))]
    pub status: i32,
}

fn default_status() -> i32 {
    1
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoleResponse {
    pub id: String,
    pub role_name: String,
    pub role_code: String,
    pub is_system: i32,
    pub description: String,
    pub status: i32,
    pub created_time: i64,
    pub updated_time: i64,
}

impl From<Role> for RoleResponse {
    fn from(role: Role) -> Self {
        Self {
            id: role.id.map(|id| id.to_hex()).unwrap_or_default(),
            role_name: role.role_name,
            role_code: role.role_code,
            is_system: role.is_system,
            description: role.description,
            status: role.status,
            created_time: role.created_time,
            updated_time: role.updated_time,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PermissionListQuery {
    pub page: Option<u64>,
    pub page_size: Option<u64>,
    pub module: Option<String>,
    /// 중문/영문 권한 이름 부분 검색
    pub keyword: Option<String>,
}

impl PermissionListQuery {
    pub fn page_query(&self) -> PageQuery {
        PageQuery::new(self.page, self.page_size)
    }
}

/// 권한 생성/수정 요청
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct PermissionRequest {
    #[validate(length(min = 1, max = 100, message = "权限名称不能为空"))]
    pub permission_name: String,
    #[serde(default)]
    pub permission_name_en: String,
    #[validate(length(min = 1, max = 100, message = "权限代码不能为空"))]
    pub permission_code: String,
    #[validate(length(min = 1, message = "接口路由不能为空"))]
    pub api_route: String,
    #[validate(custom(function = "validate_http_method"))]
    pub http_method: String,
    #[serde(default)]
    pub module: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub description_en: String,
}

fn validate_http_method(method: &str) -> Result<(), validator::ValidationError> {
    match method.to_uppercase().as_str() {
        "GET" | "POST" | "PUT" | "DELETE" | "PATCH" => Ok(()),
        _ => Err(validator::ValidationError::new("invalid_http_method")
            .with_message("请求方法无效".into())),
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PermissionResponse {
    pub id: String,
    pub permission_name: String,
    pub permission_name_en: String,
    pub permission_code: String,
    pub api_route: String,
    pub http_method: String,
    pub module: String,
    pub description: String,
    pub description_en: String,
    pub created_time: i64,
    pub updated_time: i64,
}

impl From<Permission> for PermissionResponse {
    fn from(permission: Permission) -> Self {
        Self {
            id: permission.id.map(|id| id.to_hex()).unwrap_or_default(),
            permission_name: permission.permission_name,
            permission_name_en: permission.permission_name_en,
            permission_code: permission.permission_code,
            api_route: permission.api_route,
            http_method: permission.http_method,
            module: permission.module,
            description: permission.description,
            description_en: permission.description_en,
            created_time: permission.created_time,
            updated_time: permission.updated_time,
        }
    }
}

/// 역할 권한 전체 교체 요청
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AssignPermissionsRequest {
    #[serde(default)]
    pub permission_ids: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct RolePermissionsResponse {
    pub role_id: String,
    pub permission_ids: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssignRoleRequest {
    pub role_id: String,
}
