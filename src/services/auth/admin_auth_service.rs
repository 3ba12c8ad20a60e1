//! 관리자 인증 서비스
//!
//! 로그인, 로그아웃, 내 정보 조회, 비밀번호 변경을 담당합니다.
//! 로그인과 비밀번호 변경은 작업 로그로 남습니다.

use std::sync::Arc;
use crate::{
    domain::dto::admin::auth::{
        AdminLoginRequest, AdminLoginResponse, AdminUserInfoResponse, AdminUserResponse, ChangePasswordRequest,
    },
    domain::dto::common::MessageResponse,
    domain::models::{auth::AdminContext, request_meta::RequestMeta},
    errors::{AppError, AppResult, ErrorCode},
    repositories::admin::AdminUserRepository,
    services::admin::{OperationEntry, OperationLogService},
    services::auth::password::{hash_password, verify_password},
    services::auth::TokenService,
    services::rbac::RbacService,
};
use singleton_macro::service;

/// 관리자 비밀번호 최소 길이 (문자 수)
pub const ADMIN_PASSWORD_MIN_LENGTH: usize = 6;

#[service(name = "admin_auth")]
pub struct AdminAuthService {
    admins: Arc<AdminUserRepository>,
    tokens: Arc<TokenService>,
    rbac: Arc<RbacService>,
    operation_logs: Arc<OperationLogService>,
}

/// 로그인 요청의 필수 항목을 순서대로 확인하고 정리된 아이디를 돌려줍니다.
///
/// `verify_code`는 비어 있는지만 확인합니다. 관리자 계정에 OTP 시크릿이
/// 저장되지 않으므로 코드 값 자체는 검증하지 않습니다.
pub fn validate_login_request(req: &AdminLoginRequest) -> AppResult<String> {
    let username = req.username.trim();

    if username.is_empty() {
        return Err(AppError::business_with(ErrorCode::ParamsError, "邮箱或用户名不能为空"));
    }
    if req.password.is_empty() {
        return Err(AppError::business_with(ErrorCode::ParamsError, "密码不能为空"));
    }
    if req.verify_code.trim().is_empty() {
        return Err(AppError::business_with(ErrorCode::ParamsError, "Google验证码不能为空"));
    }

    Ok(username.to_string())
}

pub fn validate_change_password(req: &ChangePasswordRequest) -> AppResult<()> {
    if req.old_password.is_empty() {
        return Err(AppError::business_with(ErrorCode::ParamsError, "旧密码不能为空"));
    }
    if req.new_password.is_empty() {
        return Err(AppError::business_with(ErrorCode::ParamsError, "新密码不能为空"));
    }
    if req.new_password.chars().count() < ADMIN_PASSWORD_MIN_LENGTH {
        return Err(AppError::business_with(ErrorCode::ParamsError, "新密码长度不能少于6位"));
    }

    Ok(())
}

impl AdminAuthService {
    pub async fn login(&self, req: AdminLoginRequest, meta: &RequestMeta) -> AppResult<AdminLoginResponse> {
        let username = validate_login_request(&req)?;

        let admin = match self.admins.find_active_by_username(&username).await? {
            Some(admin) if verify_password(&req.password, &admin.password_hash) => admin,
            _ => {
                log::warn!("[AdminLogin] 로그인 실패: username={}, ip={}", username, meta.ip);
                self.operation_logs.record(
                    "",
                    &username,
                    meta,
                    OperationEntry::new("login", "auth", "管理员登录"),
                    Some("邮箱或用户名或密码错误"),
                );
                return Err(AppError::business_with(ErrorCode::Unauthorized, "邮箱或用户名或密码错误"));
            }
        };

        let admin_id = admin
            .id
            .ok_or_else(|| AppError::InternalError("관리자 ID 누락".to_string()))?;

        self.admins.update_last_login(&admin_id).await?;
        let token = self.tokens.issue_admin_token(&admin)?;
        let roles = self.rbac.role_codes(&admin_id).await?;

        self.operation_logs.record(
            &admin.id_string(),
            &admin.username,
            meta,
            OperationEntry::new("login", "auth", "管理员登录").target("admin_user", admin.id_string()),
            None,
        );
        log::info!("[AdminLogin] 로그인 성공: {} ({})", admin.username, admin_id);

        Ok(AdminLoginResponse {
            token,
            user: AdminUserResponse::from(&admin),
            roles,
        })
    }

    pub async fn logout(&self, context: &AdminContext) -> AppResult<MessageResponse> {
        self.tokens.blacklist(&context.token).await?;
        log::info!("[AdminLogout] {} ({})", context.admin.username, context.admin_id());

        Ok(MessageResponse::new("登出成功"))
    }

    pub async fn userinfo(&self, context: &AdminContext) -> AppResult<AdminUserInfoResponse> {
        let admin_id = context
            .admin
            .id
            .ok_or_else(|| AppError::business(ErrorCode::UserNotExist))?;
        let roles = self.rbac.role_codes(&admin_id).await?;

        Ok(AdminUserInfoResponse {
            user: AdminUserResponse::from(&context.admin),
            roles,
        })
    }

    /// 비밀번호를 바꾸고 `first_login`을 1로 표시합니다.
    pub async fn change_password(
        &self,
        context: &AdminContext,
        req: ChangePasswordRequest,
        meta: &RequestMeta,
    ) -> AppResult<MessageResponse> {
        validate_change_password(&req)?;

        let admin_id = context
            .admin
            .id
            .ok_or_else(|| AppError::business(ErrorCode::UserNotExist))?;

        let current_hash = self
            .admins
            .find_password_hash(&admin_id)
            .await?
            .ok_or_else(|| AppError::business(ErrorCode::UserNotExist))?;
        if !verify_password(&req.old_password, &current_hash) {
            return Err(AppError::business_with(ErrorCode::ParamsError, "旧密码错误"));
        }
        let password_hash = hash_password(&req.new_password)?;

        if !self.admins.update_password(&admin_id, &password_hash).await? {
            return Err(AppError::business(ErrorCode::UpdateFailed));
        }

        self.operation_logs.record(
            &context.admin_id(),
            &context.admin.username,
            meta,
            OperationEntry::new("update", "auth", "修改密码").target("admin_user", context.admin_id()),
            None,
        );
        log::info!("[AdminChangePassword] {} ({})", context.admin.username, admin_id);

        Ok(MessageResponse::new("密码修改成功"))
    }
}
