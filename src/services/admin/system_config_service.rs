//! 시스템 설정(키-값) 서비스

use std::collections::BTreeMap;
use std::sync::Arc;
use crate::{
    domain::dto::admin::{CreateSystemConfigRequest, SystemConfigResponse, UpdateSystemConfigRequest},
    domain::dto::common::{PageQuery, PageResult},
    domain::entities::admin::SystemConfig,
    errors::{AppError, AppResult, ErrorCode},
    repositories::admin::SystemConfigRepository,
    utils::string_utils::parse_object_id,
};
use singleton_macro::service;

#[service(name = "system_config")]
pub struct SystemConfigService {
    repo: Arc<SystemConfigRepository>,
}

/// 수치형 설정값 파싱 (앞뒤 공백 허용)
pub fn parse_config_float(key: &str, raw: &str) -> AppResult<f64> {
    raw.trim()
        .parse::<f64>()
        .map_err(|_| AppError::business_with(ErrorCode::InvalidFormat, key))
}

/// 새 설명이 비어 있으면 기존 설명을 유지합니다.
fn merge_description(existing: &str, requested: &str) -> String {
    if requested.is_empty() {
        existing.to_string()
    } else {
        requested.to_string()
    }
}

impl SystemConfigService {
    pub async fn get_value(&self, key: &str) -> AppResult<String> {
        self.repo
            .find_by_key(key)
            .await?
            .map(|config| config.config_value)
            .ok_or_else(|| AppError::business_with(ErrorCode::RecordNotFound, key))
    }

    pub async fn get_float(&self, key: &str) -> AppResult<f64> {
        let raw = self.get_value(key).await?;
        parse_config_float(key, &raw)
    }

    /// 전체 설정을 키 순으로 정렬된 맵으로 반환합니다.
    pub async fn get_all(&self) -> AppResult<BTreeMap<String, String>> {
        Ok(self
            .repo
            .find_all()
            .await?
            .into_iter()
            .map(|config| (config.config_key, config.config_value))
            .collect())
    }

    pub async fn list(&self, page: &PageQuery) -> AppResult<PageResult<SystemConfigResponse>> {
        let (configs, total) = self.repo.list(page).await?;
        Ok(PageResult::new(configs, total, page).map(SystemConfigResponse::from))
    }

    pub async fn create(&self, req: CreateSystemConfigRequest) -> AppResult<SystemConfigResponse> {
        let key = req.config_key.trim().to_string();

        if self.repo.find_by_key(&key).await?.is_some() {
            return Err(AppError::business_with(ErrorCode::RecordExists, key));
        }

        let config = self
            .repo
            .create(SystemConfig::new(key, req.config_value, req.config_desc))
            .await?;

        log::info!("[SystemConfig] created: {}", config.config_key);
        Ok(config.into())
    }

    pub async fn update(&self, id: &str, req: UpdateSystemConfigRequest) -> AppResult<SystemConfigResponse> {
        let object_id = parse_object_id(id)?;
        let existing = self
            .repo
            .find_by_id(&object_id)
            .await?
            .ok_or_else(|| AppError::business(ErrorCode::RecordNotFound))?;

        let description = merge_description(&existing.config_desc, &req.config_desc);
        let updated = self
            .repo
            .update(&object_id, &req.config_value, &description)
            .await?
            .ok_or_else(|| AppError::business(ErrorCode::RecordNotFound))?;

        log::info!("[SystemConfig] updated: {}", updated.config_key);
        Ok(updated.into())
    }

    pub async fn delete(&self, id: &str) -> AppResult<()> {
        let object_id = parse_object_id(id)?;

        if !self.repo.delete(&object_id).await? {
            return Err(AppError::business(ErrorCode::RecordNotFound));
        }

        log::info!("[SystemConfig] deleted: {}", id);
        Ok(())
    }
}
