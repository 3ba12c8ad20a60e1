//! 인앱 후원 서비스
//!
//! 영수증 형식 확인 → 상품 금액 조회 → App Store 검증 → 후원 누적 순서로
//! 처리합니다. 후원 누적은 `transaction_id` 기준으로 한 번만 반영됩니다.

use std::sync::Arc;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use mongodb::bson::oid::ObjectId;
use singleton_macro::service;
use crate::{
    config::IapConfig,
    domain::dto::support::{VerifyIosSupportRequest, VerifyIosSupportResponse},
    domain::entities::users::{SupportOrder, User},
    domain::models::auth::AuthenticatedUser,
    errors::{AppError, AppResult, ErrorCode},
    services::support::apple_receipt_verifier::ReceiptVerifier,
    services::support::support_ledger::SupportLedger,
};

pub const IOS_PLATFORM: &str = "ios";

/// 누적 후원액에 따른 등급 (0-5)
pub fn resolve_support_level(total_amount: f64) -> i32 {
    match total_amount {
        t if t >= 500.0 => 5,
        t if t >= 300.0 => 4,
        t if t >= 100.0 => 3,
        t if t >= 50.0 => 2,
        t if t >= 5.0 => 1,
        _ => 0,
    }
}

/// 후원액을 더하고 등급을 다시 계산합니다. 첫 후원이면 VIP가 됩니다.
pub fn accumulate_support(user: &mut User, amount: f64) {
    user.support_total_amount += amount;
    user.support_level = resolve_support_level(user.support_total_amount);
    if user.support_total_amount > 0.0 && user.vip == 0 {
        user.vip = 1;
    }
}

/// 클라이언트가 base64 영수증 대신 다른 형식을 보냈는지 확인합니다.
pub fn validate_receipt_format(receipt_data: &str) -> AppResult<()> {
    if receipt_data.matches('.').count() == 2 {
        log::warn!("[VerifyIOSSupportPurchase] jws receipt detected, client should send base64 receipt");
        return Err(AppError::business_with(
            ErrorCode::ParamsError,
            "receipt_data 为 JWS 格式，请使用 base64 收据",
        ));
    }

    let trimmed = receipt_data.trim();
    if trimmed.starts_with('{') || trimmed.starts_with('[') {
        log::warn!("[VerifyIOSSupportPurchase] json receipt detected");
        return Err(AppError::business_with(
            ErrorCode::ParamsError,
            "receipt_data 应为 App Store base64 收据",
        ));
    }

    if STANDARD.decode(receipt_data).is_err() {
        return Err(AppError::business_with(ErrorCode::ParamsError, "receipt_data 格式错误"));
    }

    Ok(())
}

/// 후원 누적 결과
#[derive(Debug)]
pub struct SupportOutcome {
    pub user: User,
    /// 이번 요청으로 새 주문이 기록되었는지 여부
    pub created: bool,
}

#[service(name = "support")]
pub struct SupportService {
    ledger: Arc<dyn SupportLedger>,
    verifier: Arc<dyn ReceiptVerifier>,
}

impl SupportService {
    #[cfg(test)]
    pub(crate) fn with_parts(ledger: Arc<dyn SupportLedger>, verifier: Arc<dyn ReceiptVerifier>) -> Self {
        Self { ledger, verifier }
    }

    pub async fn verify_ios_purchase(
        &self,
        user: &AuthenticatedUser,
        req: VerifyIosSupportRequest,
    ) -> AppResult<VerifyIosSupportResponse> {
        let user_id = ObjectId::parse_str(&user.user_id)
            .map_err(|_| AppError::business_with(ErrorCode::Unauthorized, "请先登录"))?;

        if req.product_id.is_empty() || req.transaction_id.is_empty() || req.receipt_data.is_empty() {
            return Err(AppError::business_with(ErrorCode::ParamsError, "缺少必要参数"));
        }
        log::info!(
            "[VerifyIOSSupportPurchase] user={} product={} tx={} receipt_len={}",
            user.user_id,
            req.product_id,
            req.transaction_id,
            req.receipt_data.len()
        );

        validate_receipt_format(&req.receipt_data)?;

        let amount = IapConfig::product_amount(&req.product_id)
            .ok_or_else(|| AppError::business_with(ErrorCode::ParamsError, "未知商品"))?;

        let verified = self.verifier.verify(&req.receipt_data).await.map_err(|e| {
            log::error!("[VerifyIOSSupportPurchase] 验单失败: {}", e);
            AppError::business_with(ErrorCode::ServerError, "验单失败")
        })?;
        if !verified {
            log::warn!(
                "[VerifyIOSSupportPurchase] receipt not verified user={} product={} tx={}",
                user.user_id,
                req.product_id,
                req.transaction_id
            );
            return Err(AppError::business_with(ErrorCode::ParamsError, "验单未通过"));
        }

        let outcome = self
            .add_support_by_transaction(&user_id, &req.product_id, &req.transaction_id, amount, &req.receipt_data)
            .await
            .map_err(|e| {
                log::error!("[VerifyIOSSupportPurchase] 写入赞助失败: {}", e);
                AppError::business_with(ErrorCode::ServerError, "写入赞助失败")
            })?;

        if !outcome.created {
            log::info!("[VerifyIOSSupportPurchase] transaction reused: {}", req.transaction_id);
        }
        log::info!(
            "[VerifyIOSSupportPurchase] success user={} product={} tx={} amount={:.2} total={:.2} level={}",
            user.user_id,
            req.product_id,
            req.transaction_id,
            amount,
            outcome.user.support_total_amount,
            outcome.user.support_level
        );

        Ok(VerifyIosSupportResponse {
            support_total_amount: outcome.user.support_total_amount,
            support_level: outcome.user.support_level,
            amount,
            transaction_id: req.transaction_id,
        })
    }

    /// 거래 ID 단위로 한 번만 후원액을 누적합니다.
    ///
    /// 이미 기록된 거래면 현재 사용자 정보를 `created = false`로 돌려주고,
    /// 새 거래면 주문 기록과 사용자 갱신을 원장에 한 단위로 반영합니다.
    pub async fn add_support_by_transaction(
        &self,
        user_id: &ObjectId,
        product_id: &str,
        transaction_id: &str,
        amount: f64,
        receipt_data: &str,
    ) -> AppResult<SupportOutcome> {
        if self.ledger.find_order(transaction_id).await?.is_some() {
            let user = self
                .ledger
                .find_user(user_id)
                .await?
                .ok_or_else(|| AppError::NotFound(format!("user {}", user_id.to_hex())))?;
            return Ok(SupportOutcome { user, created: false });
        }

        let order = SupportOrder::new(*user_id, IOS_PLATFORM, product_id, transaction_id, amount, receipt_data);
        let user = self.ledger.record(&order).await?;

        Ok(SupportOutcome { user, created: true })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;
    use async_trait::async_trait;

    /// 메모리 후원 원장
    #[derive(Default)]
    struct MemoryLedger {
        users: Mutex<Vec<User>>,
        orders: Mutex<Vec<SupportOrder>>,
        records: AtomicUsize,
    }

    #[async_trait]
    impl SupportLedger for MemoryLedger {
        async fn find_order(&self, transaction_id: &str) -> AppResult<Option<SupportOrder>> {
            let orders = self.orders.lock().unwrap();
            Ok(orders.iter().find(|o| o.transaction_id == transaction_id).cloned())
        }

        async fn find_user(&self, user_id: &ObjectId) -> AppResult<Option<User>> {
            let users = self.users.lock().unwrap();
            Ok(users.iter().find(|u| u.id.as_ref() == Some(user_id)).cloned())
        }

        async fn record(&self, order: &SupportOrder) -> AppResult<User> {
            self.records.fetch_add(1, Ordering::SeqCst);
            let mut users = self.users.lock().unwrap();
            let user = users
                .iter_mut()
                .find(|u| u.id.as_ref() == Some(&order.user_id))
                .ok_or_else(|| AppError::NotFound("user".to_string()))?;

            accumulate_support(user, order.amount);
            self.orders.lock().unwrap().push(order.clone());
            Ok(user.clone())
        }
    }

    struct FixedVerifier(bool);

    #[async_trait]
    impl ReceiptVerifier for FixedVerifier {
        async fn verify(&self, _receipt_data: &str) -> AppResult<bool> {
            Ok(self.0)
        }
    }

    fn member() -> User {
        let mut user = User::new(
            1234567890,
            "alice".to_string(),
            "alice@example.com".to_string(),
            "hash".to_string(),
            "pay".to_string(),
        );
        user.id = Some(ObjectId::new());
        user
    }

    fn fixture(verified: bool) -> (SupportService, Arc<MemoryLedger>, ObjectId) {
        let user = member();
        let user_id = user.id.unwrap();
        let ledger = Arc::new(MemoryLedger::default());
        ledger.users.lock().unwrap().push(user);

        let service = SupportService::with_parts(ledger.clone(), Arc::new(FixedVerifier(verified)));
        (service, ledger, user_id)
    }

    fn authenticated(user_id: &ObjectId) -> AuthenticatedUser {
        AuthenticatedUser {
            user_id: user_id.to_hex(),
            username: "alice".to_string(),
            is_admin: false,
            token: String::new(),
        }
    }

    fn purchase(transaction_id: &str) -> VerifyIosSupportRequest {
        VerifyIosSupportRequest {
            product_id: "com.yourapp.support.50".to_string(),
            transaction_id: transaction_id.to_string(),
            receipt_data: STANDARD.encode(b"receipt"),
        }
    }

    #[test]
    fn test_accumulate_support_sets_level_and_vip() {
        let mut user = member();

        accumulate_support(&mut user, 4.0);
        assert_eq!(user.support_level, 0);
        assert_eq!(user.vip, 1);

        accumulate_support(&mut user, 96.0);
        assert_eq!(user.support_total_amount, 100.0);
        assert_eq!(user.support_level, 3);
    }

    #[actix_web::test]
    async fn test_same_transaction_is_credited_once() {
        let (service, ledger, user_id) = fixture(true);

        let first = service
            .add_support_by_transaction(&user_id, "p", "tx-1", 50.0, "r")
            .await
            .unwrap();
        assert!(first.created);
        assert_eq!(first.user.support_total_amount, 50.0);
        assert_eq!(first.user.support_level, 2);

        let second = service
            .add_support_by_transaction(&user_id, "p", "tx-1", 50.0, "r")
            .await
            .unwrap();
        assert!(!second.created);
        assert_eq!(second.user.support_total_amount, 50.0);
        assert_eq!(ledger.records.load(Ordering::SeqCst), 1);
        assert_eq!(ledger.orders.lock().unwrap().len(), 1);
    }

    #[actix_web::test]
    async fn test_verify_ios_purchase_replay_returns_same_total() {
        let (service, ledger, user_id) = fixture(true);
        let user = authenticated(&user_id);

        let first = service.verify_ios_purchase(&user, purchase("tx-9")).await.unwrap();
        let replay = service.verify_ios_purchase(&user, purchase("tx-9")).await.unwrap();

        assert_eq!(first.amount, 50.0);
        assert_eq!(replay.support_total_amount, 50.0);
        assert_eq!(replay.support_level, 2);
        assert_eq!(ledger.records.load(Ordering::SeqCst), 1);
    }

    #[actix_web::test]
    async fn test_unverified_receipt_records_nothing() {
        let (service, ledger, user_id) = fixture(false);

        let err = service
            .verify_ios_purchase(&authenticated(&user_id), purchase("tx-2"))
            .await
            .unwrap_err();

        assert_eq!(detail(err), "验单未通过");
        assert_eq!(ledger.records.load(Ordering::SeqCst), 0);
    }

    #[actix_web::test]
    async fn test_unknown_product_rejected_before_verification() {
        let (service, ledger, user_id) = fixture(true);
        let mut req = purchase("tx-3");
        req.product_id = "com.other.product".to_string();

        let err = service.verify_ios_purchase(&authenticated(&user_id), req).await.unwrap_err();

        assert_eq!(detail(err), "未知商品");
        assert!(ledger.orders.lock().unwrap().is_empty());
    }

    fn detail(err: AppError) -> String {
        err.client_detail().unwrap_or_default().to_string()
    }

    #[test]
    fn test_support_level_thresholds() {
        assert_eq!(resolve_support_level(0.0), 0);
        assert_eq!(resolve_support_level(4.99), 0);
        assert_eq!(resolve_support_level(5.0), 1);
        assert_eq!(resolve_support_level(49.0), 1);
        assert_eq!(resolve_support_level(50.0), 2);
        assert_eq!(resolve_support_level(100.0), 3);
        assert_eq!(resolve_support_level(300.0), 4);
        assert_eq!(resolve_support_level(500.0), 5);
        assert_eq!(resolve_support_level(1500.0), 5);
    }

    #[test]
    fn test_jws_receipt_rejected() {
        let err = validate_receipt_format("aGVhZGVy.cGF5bG9hZA.c2ln").unwrap_err();
        assert_eq!(detail(err), "receipt_data 为 JWS 格式，请使用 base64 收据");
    }

    #[test]
    fn test_json_receipt_rejected() {
        let err = validate_receipt_format("  {\"receipt\": 1}").unwrap_err();
        assert_eq!(detail(err), "receipt_data 应为 App Store base64 收据");

        let err = validate_receipt_format("[1,2]").unwrap_err();
        assert_eq!(detail(err), "receipt_data 应为 App Store base64 收据");
    }

    #[test]
    fn test_non_base64_receipt_rejected() {
        let err = validate_receipt_format("not base64!").unwrap_err();
        assert_eq!(err.error_code(), ErrorCode::ParamsError);
        assert_eq!(detail(err), "receipt_data 格式错误");
    }

    #[test]
    fn test_base64_receipt_accepted() {
        let receipt = STANDARD.encode(b"app store receipt bytes");
        assert!(validate_receipt_format(&receipt).is_ok());
    }
}
