//! 사용자 플랫폼 회원 서비스
//!
//! 인증 코드 발송, 회원가입, 로그인, 비밀번호 찾기, 로그아웃, 내 정보 조회를
//! 담당합니다. 각 단계의 오류 코드는 클라이언트와 합의된 순서대로 검사합니다.

use std::sync::Arc;
use async_trait::async_trait;
use mongodb::bson::oid::ObjectId;
use singleton_macro::service;
use crate::{
    domain::dto::common::MessageResponse,
    domain::dto::users::{
        AuthResponse, ForgotPasswordRequest, LoginRequest, RegisterRequest, SendCodeRequest, SendCodeResponse,
        UserInfoResponse,
    },
    domain::entities::users::User,
    domain::models::auth::AuthenticatedUser,
    errors::{AppError, AppResult, ErrorCode},
    repositories::users::UserRepository,
    services::auth::password::{check_password_strength, hash_password, is_six_digits, verify_password},
    services::auth::TokenService,
    services::users::verification_code_service::{CodePurpose, VerificationCodeService},
    utils::random::random_uid,
};

/// uid 충돌 시 재시도 횟수
const UID_MAX_ATTEMPTS: usize = 5;

/// 비밀번호 찾기에서 바꿀 비밀번호 종류
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PasswordKind {
    Login,
    Pay,
}

impl PasswordKind {
    /// 0과 1은 로그인 비밀번호, 2는 결제 비밀번호
    pub fn from_type(password_type: i32) -> Option<Self> {
        match password_type {
            0 | 1 => Some(PasswordKind::Login),
            2 => Some(PasswordKind::Pay),
            _ => None,
        }
    }
}

/// 회원가입 요청의 형식 검사 (DB 조회 전 단계)
pub fn validate_register_request(req: &RegisterRequest) -> AppResult<()> {
    let required = [&req.username, &req.email, &req.password, &req.pay_password, &req.code];
    if required.iter().any(|value| value.trim().is_empty()) {
        return Err(AppError::business(ErrorCode::RequiredFieldsEmpty));
    }
    if !check_password_strength(&req.password) {
        return Err(AppError::business(ErrorCode::PasswordStrength));
    }
    if !is_six_digits(&req.pay_password) {
        return Err(AppError::business(ErrorCode::PayPasswordFormat));
    }
    if req.invite_code.trim().is_empty() {
        return Err(AppError::business(ErrorCode::InviteCodeEmpty));
    }

    Ok(())
}

/// 비밀번호 찾기 요청의 형식 검사. 바꿀 비밀번호 종류를 돌려줍니다.
pub fn validate_forgot_request(req: &ForgotPasswordRequest) -> AppResult<PasswordKind> {
    if req.email.trim().is_empty() || req.code.trim().is_empty() {
        return Err(AppError::business(ErrorCode::EmailCodeEmpty));
    }

    PasswordKind::from_type(req.password_type).ok_or_else(|| AppError::business(ErrorCode::PasswordTypeInvalid))
}

/// 새 비밀번호 검사. 통과하면 저장할 평문을 돌려줍니다.
pub fn check_new_password(kind: PasswordKind, req: &ForgotPasswordRequest) -> AppResult<&str> {
    match kind {
        PasswordKind::Login => {
            if req.new_password.is_empty() {
                return Err(AppError::business(ErrorCode::NewPasswordEmpty));
            }
            if !check_password_strength(&req.new_password) {
                return Err(AppError::business(ErrorCode::PasswordStrength));
            }
            Ok(&req.new_password)
        }
        PasswordKind::Pay => {
            if !is_six_digits(&req.pay_password) {
                return Err(AppError::business(ErrorCode::PayPasswordFormat));
            }
            Ok(&req.pay_password)
        }
    }
}

/// 회원 계정 저장소
///
/// 운영에서는 [`UserRepository`]가 구현하며 시작 시점에
/// `ServiceLocator::set::<dyn MemberStore>`로 바인딩됩니다.
#[async_trait]
pub trait MemberStore: Send + Sync {
    async fn find_by_id(&self, id: &ObjectId) -> AppResult<Option<User>>;
    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>>;
    async fn find_by_username(&self, username: &str) -> AppResult<Option<User>>;
    async fn email_exists(&self, email: &str) -> AppResult<bool>;
    async fn username_exists(&self, username: &str) -> AppResult<bool>;
    async fn uid_exists(&self, uid: i64) -> AppResult<bool>;
    async fn create(&self, user: User) -> AppResult<User>;
    async fn update_last_login(&self, id: &ObjectId) -> AppResult<()>;
    /// 대상이 없으면 false
    async fn update_password(&self, id: &ObjectId, password_hash: &str) -> AppResult<bool>;
    /// 대상이 없으면 false
    async fn update_pay_password(&self, id: &ObjectId, pay_password_hash: &str) -> AppResult<bool>;
}

#[async_trait]
impl MemberStore for UserRepository {
    async fn find_by_id(&self, id: &ObjectId) -> AppResult<Option<User>> {
        UserRepository::find_by_id(self, id).await
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        UserRepository::find_by_email(self, email).await
    }

    async fn find_by_username(&self, username: &str) -> AppResult<Option<User>> {
        UserRepository::find_by_username(self, username).await
    }

    async fn email_exists(&self, email: &str) -> AppResult<bool> {
        UserRepository::email_exists(self, email).await
    }

    async fn username_exists(&self, username: &str) -> AppResult<bool> {
        UserRepository::username_exists(self, username).await
    }

    async fn uid_exists(&self, uid: i64) -> AppResult<bool> {
        UserRepository::uid_exists(self, uid).await
    }

    async fn create(&self, user: User) -> AppResult<User> {
        UserRepository::create(self, user).await
    }

    async fn update_last_login(&self, id: &ObjectId) -> AppResult<()> {
        UserRepository::update_last_login(self, id).await
    }

    async fn update_password(&self, id: &ObjectId, password_hash: &str) -> AppResult<bool> {
        UserRepository::update_password(self, id, password_hash).await
    }

    async fn update_pay_password(&self, id: &ObjectId, pay_password_hash: &str) -> AppResult<bool> {
        UserRepository::update_pay_password(self, id, pay_password_hash).await
    }
}

#[service(name = "member")]
pub struct MemberService {
    users: Arc<dyn MemberStore>,
    codes: Arc<VerificationCodeService>,
    tokens: Arc<TokenService>,
}

impl MemberService {
    #[cfg(test)]
    pub(crate) fn with_parts(
        users: Arc<dyn MemberStore>,
        codes: Arc<VerificationCodeService>,
        tokens: Arc<TokenService>,
    ) -> Self {
        Self { users, codes, tokens }
    }

    pub async fn send_code(&self, req: SendCodeRequest) -> AppResult<SendCodeResponse> {
        let email = req.email.trim();
        if email.is_empty() {
            return Err(AppError::business(ErrorCode::EmailEmpty));
        }

        let purpose = CodePurpose::from_type(req.code_type.trim())
            .ok_or_else(|| AppError::business(ErrorCode::TypeInvalid))?;

        let registered = self.users.email_exists(email).await?;
        match purpose {
            CodePurpose::Register if registered => {
                return Err(AppError::business(ErrorCode::EmailAlreadyRegistered));
            }
            CodePurpose::ForgotPassword if !registered => {
                return Err(AppError::business(ErrorCode::EmailNotRegistered));
            }
            _ => {}
        }

        let expire_time = self.codes.send(email, purpose).await?;
        Ok(SendCodeResponse { expire_time })
    }

    pub async fn register(&self, req: RegisterRequest) -> AppResult<AuthResponse> {
        validate_register_request(&req)?;

        let username = req.username.trim();
        let email = req.email.trim();

        if self.users.username_exists(username).await? {
            return Err(AppError::business(ErrorCode::UsernameAlreadyUsed));
        }
        if self.users.email_exists(email).await? {
            return Err(AppError::business(ErrorCode::EmailAlreadyRegistered));
        }
        if !self.codes.verify(email, CodePurpose::Register, req.code.trim()).await {
            return Err(AppError::business(ErrorCode::VerifyCodeInvalid));
        }

        let uid = self.generate_uid().await?;
        let password_hash = hash_password(&req.password)?;
        let pay_password_hash = hash_password(&req.pay_password)?;

        let user = User::new(uid, username.to_string(), email.to_string(), password_hash, pay_password_hash);
        let user = self.users.create(user).await.map_err(|e| {
            log::error!("[Register] 회원 생성 실패 {}: {}", email, e);
            AppError::business(ErrorCode::RegisterFailed)
        })?;

        self.codes.consume(email, CodePurpose::Register).await;

        let token = self.tokens.issue_user_token(&user)?;
        log::info!("[Register] 회원가입 완료: {} (uid={})", user.username, user.uid);

        Ok(AuthResponse {
            token,
            user_info: UserInfoResponse::from(&user),
            has_parent: Some(!req.invite_code.trim().is_empty()),
        })
    }

    pub async fn login(&self, req: LoginRequest) -> AppResult<AuthResponse> {
        let username = req.username.trim();
        if username.is_empty() || req.password.is_empty() {
            return Err(AppError::business(ErrorCode::UsernamePasswordEmpty));
        }

        let user = match self.users.find_by_username(username).await? {
            Some(user) if verify_password(&req.password, &user.password_hash) => user,
            _ => {
                log::warn!("[Login] 로그인 실패: {}", username);
                return Err(AppError::business(ErrorCode::UsernamePasswordWrong));
            }
        };

        if !user.is_active() {
            return Err(AppError::business(ErrorCode::AccountDisabled));
        }

        if let Some(id) = user.id {
            if let Err(e) = self.users.update_last_login(&id).await {
                log::warn!("[Login] 마지막 로그인 시각 갱신 실패 {}: {}", username, e);
            }
        }

        let token = self.tokens.issue_user_token(&user)?;
        log::info!("[Login] 로그인 성공: {} (uid={})", user.username, user.uid);

        Ok(AuthResponse {
            token,
            user_info: UserInfoResponse::from(&user),
            has_parent: None,
        })
    }

    pub async fn forgot_password(&self, req: ForgotPasswordRequest) -> AppResult<MessageResponse> {
        let kind = validate_forgot_request(&req)?;
        let email = req.email.trim();

        if !self.codes.verify(email, CodePurpose::ForgotPassword, req.code.trim()).await {
            return Err(AppError::business(ErrorCode::VerifyCodeInvalid));
        }

        let user = self
            .users
            .find_by_email(email)
            .await?
            .ok_or_else(|| AppError::business(ErrorCode::UserNotExist))?;
        let user_id = user.id.ok_or_else(|| AppError::business(ErrorCode::UserNotExist))?;

        let new_password = check_new_password(kind, &req)?;
        let password_hash = hash_password(new_password)?;

        let updated = match kind {
            PasswordKind::Login => self.users.update_password(&user_id, &password_hash).await,
            PasswordKind::Pay => self.users.update_pay_password(&user_id, &password_hash).await,
        };
        match updated {
            Ok(true) => {}
            Ok(false) => return Err(AppError::business(ErrorCode::ResetPasswordFailed)),
            Err(e) => {
                log::error!("[ForgotPassword] 비밀번호 갱신 실패 {}: {}", email, e);
                return Err(AppError::business(ErrorCode::ResetPasswordFailed));
            }
        }

        self.codes.consume(email, CodePurpose::ForgotPassword).await;
        log::info!("[ForgotPassword] {:?} 비밀번호 재설정: {}", kind, user.username);

        Ok(MessageResponse::new("密码重置成功"))
    }

    pub async fn logout(&self, user: &AuthenticatedUser) -> AppResult<MessageResponse> {
        self.tokens.blacklist(&user.token).await?;
        log::info!("[Logout] {} ({})", user.username, user.user_id);

        Ok(MessageResponse::new("退出登录成功"))
    }

    pub async fn user_info(&self, user: &AuthenticatedUser) -> AppResult<UserInfoResponse> {
        let id = ObjectId::parse_str(&user.user_id)
            .map_err(|_| AppError::business(ErrorCode::GetUserInfoFailed))?;

        self.users
            .find_by_id(&id)
            .await?
            .map(|user| UserInfoResponse::from(&user))
            .ok_or_else(|| AppError::business(ErrorCode::GetUserInfoFailed))
    }

    async fn generate_uid(&self) -> AppResult<i64> {
        for _ in 0..UID_MAX_ATTEMPTS {
            let uid = random_uid();
            if !self.users.uid_exists(uid).await? {
                return Ok(uid);
            }
        }

        log::error!("[Register] uid 생성 재시도 초과");
        Err(AppError::business(ErrorCode::RegisterFailed))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;
    use crate::caching::store::{CacheStore, MemoryCacheStore};
    use crate::domain::entities::users::USER_STATUS_DISABLED;
    use crate::repositories::tokens::TokenBlacklistRepository;
    use crate::services::auth::password::hash_password_with_cost;
    use crate::services::users::verification_code_service::tests::RecordingMailer;

    /// 메모리 회원 저장소
    #[derive(Default)]
    struct MemoryMembers {
        users: Mutex<Vec<User>>,
        /// 앞에서부터 이 횟수만큼 uid가 이미 쓰였다고 답합니다.
        taken_uid_answers: AtomicUsize,
        uid_checks: AtomicUsize,
        /// true면 비밀번호 갱신 대상이 없다고 답합니다.
        lose_updates: bool,
    }

    impl MemoryMembers {
        fn with_user(user: User) -> Self {
            let members = Self::default();
            members.users.lock().unwrap().push(user);
            members
        }

        fn find(&self, pred: impl Fn(&User) -> bool) -> Option<User> {
            self.users.lock().unwrap().iter().find(|&u| pred(u)).cloned()
        }

        fn set_field(&self, id: &ObjectId, apply: impl Fn(&mut User)) -> bool {
            if self.lose_updates {
                return false;
            }
            let mut users = self.users.lock().unwrap();
            match users.iter_mut().find(|u| u.id.as_ref() == Some(id)) {
                Some(user) => {
                    apply(user);
                    true
                }
                None => false,
            }
        }
    }

    #[async_trait]
    impl MemberStore for MemoryMembers {
        async fn find_by_id(&self, id: &ObjectId) -> AppResult<Option<User>> {
            Ok(self.find(|u| u.id.as_ref() == Some(id)))
        }

        async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
            Ok(self.find(|u| u.email == email))
        }

        async fn find_by_username(&self, username: &str) -> AppResult<Option<User>> {
            Ok(self.find(|u| u.username == username))
        }

        async fn email_exists(&self, email: &str) -> AppResult<bool> {
            Ok(self.find(|u| u.email == email).is_some())
        }

        async fn username_exists(&self, username: &str) -> AppResult<bool> {
            Ok(self.find(|u| u.username == username).is_some())
        }

        async fn uid_exists(&self, uid: i64) -> AppResult<bool> {
            self.uid_checks.fetch_add(1, Ordering::SeqCst);
            let taken = self
                .taken_uid_answers
                .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
                .is_ok();
            Ok(taken || self.find(|u| u.uid == uid).is_some())
        }

        async fn create(&self, mut user: User) -> AppResult<User> {
            user.id = Some(ObjectId::new());
            self.users.lock().unwrap().push(user.clone());
            Ok(user)
        }

        async fn update_last_login(&self, id: &ObjectId) -> AppResult<()> {
            self.set_field(id, |u| u.last_login_time = 1);
            Ok(())
        }

        async fn update_password(&self, id: &ObjectId, password_hash: &str) -> AppResult<bool> {
            Ok(self.set_field(id, |u| u.password_hash = password_hash.to_string()))
        }

        async fn update_pay_password(&self, id: &ObjectId, pay_password_hash: &str) -> AppResult<bool> {
            Ok(self.set_field(id, |u| u.pay_password_hash = pay_password_hash.to_string()))
        }
    }

    struct Fixture {
        service: MemberService,
        members: Arc<MemoryMembers>,
        cache: Arc<MemoryCacheStore>,
    }

    fn fixture(members: MemoryMembers) -> Fixture {
        let members = Arc::new(members);
        let cache = Arc::new(MemoryCacheStore::new());
        let codes = VerificationCodeService::with_parts(cache.clone(), Arc::new(RecordingMailer::default()));
        let tokens = TokenService::with_blacklist(Arc::new(TokenBlacklistRepository::with_cache(cache.clone())));

        Fixture {
            service: MemberService::with_parts(members.clone(), Arc::new(codes), Arc::new(tokens)),
            members,
            cache,
        }
    }

    fn stored_user(username: &str, email: &str, password: &str) -> User {
        let mut user = User::new(
            1234567890,
            username.to_string(),
            email.to_string(),
            hash_password_with_cost(password, 4).unwrap(),
            hash_password_with_cost("123456", 4).unwrap(),
        );
        user.id = Some(ObjectId::new());
        user
    }

    async fn seed_code(cache: &MemoryCacheStore, purpose: CodePurpose, email: &str, code: &str) {
        cache.set_value(&purpose.cache_key(email), code, Some(300)).await.unwrap();
    }

    fn register_request() -> RegisterRequest {
        RegisterRequest {
            username: "alice".to_string(),
            email: "alice@example.com".to_string(),
            password: "Passw0rd!".to_string(),
            pay_password: "123456".to_string(),
            code: "654321".to_string(),
            invite_code: "INV001".to_string(),
        }
    }

    fn code_of<T: std::fmt::Debug>(result: AppResult<T>) -> ErrorCode {
        result.unwrap_err().error_code()
    }

    #[test]
    fn test_register_validation_order() {
        assert!(validate_register_request(&register_request()).is_ok());

        let mut req = register_request();
        req.code = " ".to_string();
        req.password = "weak".to_string();
        assert_eq!(code_of(validate_register_request(&req)), ErrorCode::RequiredFieldsEmpty);

        let mut req = register_request();
        req.password = "password1!".to_string();
        req.pay_password = "12ab".to_string();
        assert_eq!(code_of(validate_register_request(&req)), ErrorCode::PasswordStrength);

        let mut req = register_request();
        req.pay_password = "12345".to_string();
        req.invite_code = String::new();
        assert_eq!(code_of(validate_register_request(&req)), ErrorCode::PayPasswordFormat);

        let mut req = register_request();
        req.invite_code = String::new();
        assert_eq!(code_of(validate_register_request(&req)), ErrorCode::InviteCodeEmpty);
    }

    #[test]
    fn test_password_kind_from_type() {
        assert_eq!(PasswordKind::from_type(0), Some(PasswordKind::Login));
        assert_eq!(PasswordKind::from_type(1), Some(PasswordKind::Login));
        assert_eq!(PasswordKind::from_type(2), Some(PasswordKind::Pay));
        assert_eq!(PasswordKind::from_type(3), None);
    }

    #[test]
    fn test_forgot_request_validation() {
        let mut req = ForgotPasswordRequest {
            email: "a@b.c".to_string(),
            code: "".to_string(),
            password_type: 9,
            ..Default::default()
        };
        assert_eq!(code_of(validate_forgot_request(&req)), ErrorCode::EmailCodeEmpty);

        req.code = "123456".to_string();
        assert_eq!(code_of(validate_forgot_request(&req)), ErrorCode::PasswordTypeInvalid);

        req.password_type = 0;
        assert_eq!(validate_forgot_request(&req).unwrap(), PasswordKind::Login);
    }

    #[test]
    fn test_new_password_checks() {
        let mut req = ForgotPasswordRequest::default();
        assert_eq!(code_of(check_new_password(PasswordKind::Login, &req)), ErrorCode::NewPasswordEmpty);

        req.new_password = "weakpass".to_string();
        assert_eq!(code_of(check_new_password(PasswordKind::Login, &req)), ErrorCode::PasswordStrength);

        req.new_password = "Str0ng#Pass".to_string();
        assert_eq!(check_new_password(PasswordKind::Login, &req).unwrap(), "Str0ng#Pass");

        req.pay_password = "12345a".to_string();
        assert_eq!(code_of(check_new_password(PasswordKind::Pay, &req)), ErrorCode::PayPasswordFormat);

        req.pay_password = "000111".to_string();
        assert_eq!(check_new_password(PasswordKind::Pay, &req).unwrap(), "000111");
    }

    #[actix_web::test]
    async fn test_register_checks_username_then_email_then_code() {
        // 사용자명과 이메일이 모두 사용 중이고 코드도 틀리면 사용자명이 먼저
        let f = fixture(MemoryMembers::with_user(stored_user("alice", "alice@example.com", "Passw0rd!")));
        let err = f.service.register(register_request()).await.unwrap_err();
        assert_eq!(err.error_code(), ErrorCode::UsernameAlreadyUsed);

        let f = fixture(MemoryMembers::with_user(stored_user("bob", "alice@example.com", "Passw0rd!")));
        let err = f.service.register(register_request()).await.unwrap_err();
        assert_eq!(err.error_code(), ErrorCode::EmailAlreadyRegistered);

        let f = fixture(MemoryMembers::default());
        seed_code(&f.cache, CodePurpose::Register, "alice@example.com", "000000").await;
        let err = f.service.register(register_request()).await.unwrap_err();
        assert_eq!(err.error_code(), ErrorCode::VerifyCodeInvalid);
        assert!(f.members.users.lock().unwrap().is_empty());
    }

    #[actix_web::test]
    async fn test_register_consumes_code() {
        let f = fixture(MemoryMembers::default());
        seed_code(&f.cache, CodePurpose::Register, "alice@example.com", "654321").await;

        let response = f.service.register(register_request()).await.unwrap();

        assert!(!response.token.is_empty());
        assert_eq!(response.has_parent, Some(true));
        assert!(!f.cache.exists("REGISTER_CODE:alice@example.com").await.unwrap());

        let saved = f.members.find(|u| u.username == "alice").unwrap();
        assert!((1_000_000_000..=9_999_999_999).contains(&saved.uid));
        assert!(verify_password("Passw0rd!", &saved.password_hash));
        assert!(verify_password("123456", &saved.pay_password_hash));
    }

    #[actix_web::test]
    async fn test_uid_generation_retries_five_times() {
        let members = MemoryMembers { taken_uid_answers: AtomicUsize::new(4), ..Default::default() };
        let f = fixture(members);
        assert!(f.service.generate_uid().await.is_ok());
        assert_eq!(f.members.uid_checks.load(Ordering::SeqCst), 5);

        let members = MemoryMembers { taken_uid_answers: AtomicUsize::new(5), ..Default::default() };
        let f = fixture(members);
        let err = f.service.generate_uid().await.unwrap_err();
        assert_eq!(err.error_code(), ErrorCode::RegisterFailed);
        assert_eq!(f.members.uid_checks.load(Ordering::SeqCst), 5);
    }

    #[actix_web::test]
    async fn test_login_reports_wrong_password_before_disabled() {
        let mut user = stored_user("carol", "carol@example.com", "Passw0rd!");
        user.status = USER_STATUS_DISABLED;
        let f = fixture(MemoryMembers::with_user(user));

        let wrong = LoginRequest { username: "carol".to_string(), password: "nope".to_string() };
        assert_eq!(code_of(f.service.login(wrong).await), ErrorCode::UsernamePasswordWrong);

        let unknown = LoginRequest { username: "dave".to_string(), password: "Passw0rd!".to_string() };
        assert_eq!(code_of(f.service.login(unknown).await), ErrorCode::UsernamePasswordWrong);

        let right = LoginRequest { username: "carol".to_string(), password: "Passw0rd!".to_string() };
        assert_eq!(code_of(f.service.login(right).await), ErrorCode::AccountDisabled);
    }

    #[actix_web::test]
    async fn test_login_success_records_last_login() {
        let f = fixture(MemoryMembers::with_user(stored_user("erin", "erin@example.com", "Passw0rd!")));

        let req = LoginRequest { username: " erin ".to_string(), password: "Passw0rd!".to_string() };
        let response = f.service.login(req).await.unwrap();

        assert!(!response.token.is_empty());
        assert_eq!(response.has_parent, None);
        assert_eq!(f.members.find(|u| u.username == "erin").unwrap().last_login_time, 1);
    }

    fn forgot_request(email: &str) -> ForgotPasswordRequest {
        ForgotPasswordRequest {
            email: email.to_string(),
            code: "111222".to_string(),
            new_password: "N3w#Password".to_string(),
            password_type: 1,
            ..Default::default()
        }
    }

    #[actix_web::test]
    async fn test_forgot_password_error_codes() {
        let f = fixture(MemoryMembers::with_user(stored_user("frank", "frank@example.com", "Passw0rd!")));

        // 코드 없음
        let err = f.service.forgot_password(forgot_request("frank@example.com")).await.unwrap_err();
        assert_eq!(err.error_code(), ErrorCode::VerifyCodeInvalid);

        // 코드는 맞지만 가입되지 않은 주소
        seed_code(&f.cache, CodePurpose::ForgotPassword, "ghost@example.com", "111222").await;
        let err = f.service.forgot_password(forgot_request("ghost@example.com")).await.unwrap_err();
        assert_eq!(err.error_code(), ErrorCode::UserNotExist);

        let members = MemoryMembers { lose_updates: true, ..Default::default() };
        members.users.lock().unwrap().push(stored_user("frank", "frank@example.com", "Passw0rd!"));
        let f = fixture(members);
        seed_code(&f.cache, CodePurpose::ForgotPassword, "frank@example.com", "111222").await;
        let err = f.service.forgot_password(forgot_request("frank@example.com")).await.unwrap_err();
        assert_eq!(err.error_code(), ErrorCode::ResetPasswordFailed);
        assert!(f.cache.exists("FORGOT_CODE:frank@example.com").await.unwrap());
    }

    #[actix_web::test]
    async fn test_forgot_password_updates_hash_and_consumes_code() {
        let f = fixture(MemoryMembers::with_user(stored_user("gina", "gina@example.com", "Passw0rd!")));
        seed_code(&f.cache, CodePurpose::ForgotPassword, "gina@example.com", "111222").await;

        f.service.forgot_password(forgot_request("gina@example.com")).await.unwrap();

        let saved = f.members.find(|u| u.username == "gina").unwrap();
        assert!(verify_password("N3w#Password", &saved.password_hash));
        assert!(!f.cache.exists("FORGOT_CODE:gina@example.com").await.unwrap());

        // 결제 비밀번호
        seed_code(&f.cache, CodePurpose::ForgotPassword, "gina@example.com", "111222").await;
        let mut req = forgot_request("gina@example.com");
        req.password_type = 2;
        req.pay_password = "987654".to_string();
        f.service.forgot_password(req).await.unwrap();

        let saved = f.members.find(|u| u.username == "gina").unwrap();
        assert!(verify_password("987654", &saved.pay_password_hash));
        assert!(verify_password("N3w#Password", &saved.password_hash));
    }
}
