//! # 사용자 리포지토리 구현
//!
//! 프런트 회원(`users` 컬렉션)의 데이터 액세스 계층입니다.
//!
//! ## 인덱스
//!
//! - `uid` (unique) - 10자리 공개 사용자 번호
//! - `username` (unique)
//! - `email` (unique)
//!
//! 후원 누적 갱신은 호출자가 연 [`ClientSession`] 안에서 수행되어
//! 주문 기록과 같은 트랜잭션으로 묶입니다.

use std::sync::Arc;
use chrono::Utc;
use mongodb::{
    bson::{doc, oid::ObjectId},
    options::IndexOptions,
    ClientSession, IndexModel,
};
use crate::{
    db::Database,
    domain::entities::users::User,
    errors::{AppError, AppResult},
};
use singleton_macro::repository;

/// 사용자 데이터 액세스 리포지토리
#[repository(name = "user", collection = "users")]
pub struct UserRepository {
    db: Arc<Database>,
}

impl UserRepository {
    pub async fn find_by_id(&self, id: &ObjectId) -> AppResult<Option<User>> {
        Ok(self.collection::<User>().find_one(doc! { "_id": *id }).await?)
    }

    pub async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        Ok(self.collection::<User>().find_one(doc! { "email": email }).await?)
    }

    pub async fn find_by_username(&self, username: &str) -> AppResult<Option<User>> {
        Ok(self.collection::<User>().find_one(doc! { "username": username }).await?)
    }

    pub async fn email_exists(&self, email: &str) -> AppResult<bool> {
        let count = self.collection::<User>().count_documents(doc! { "email": email }).await?;
        Ok(count > 0)
    }

    pub async fn username_exists(&self, username: &str) -> AppResult<bool> {
        let count = self.collection::<User>().count_documents(doc! { "username": username }).await?;
        Ok(count > 0)
    }

    pub async fn uid_exists(&self, uid: i64) -> AppResult<bool> {
        let count = self.collection::<User>().count_documents(doc! { "uid": uid }).await?;
        Ok(count > 0)
    }

    /// 새 사용자를 저장하고 생성된 `_id`를 채워 반환합니다.
    pub async fn create(&self, mut user: User) -> AppResult<User> {
        let result = self.collection::<User>().insert_one(&user).await?;
        user.id = result.inserted_id.as_object_id();
        Ok(user)
    }

    pub async fn update_last_login(&self, id: &ObjectId) -> AppResult<()> {
        let now = Utc::now().timestamp();
        self.collection::<User>()
            .update_one(
                doc! { "_id": *id },
                doc! { "$set": { "last_login_time": now, "updated_time": now } },
            )
            .await?;
        Ok(())
    }

    /// 로그인 비밀번호 해시 교체. 대상이 없으면 false
    pub async fn update_password(&self, id: &ObjectId, password_hash: &str) -> AppResult<bool> {
        self.update_field(id, "password_hash", password_hash).await
    }

    /// 결제 비밀번호 해시 교체. 대상이 없으면 false
    pub async fn update_pay_password(&self, id: &ObjectId, pay_password_hash: &str) -> AppResult<bool> {
        self.update_field(id, "pay_password_hash", pay_password_hash).await
    }

    async fn update_field(&self, id: &ObjectId, field: &str, value: &str) -> AppResult<bool> {
        let result = self
            .collection::<User>()
            .update_one(
                doc! { "_id": *id },
                doc! { "$set": { field: value, "updated_time": Utc::now().timestamp() } },
            )
            .await?;
        Ok(result.matched_count > 0)
    }

    /// 트랜잭션 안에서 사용자 조회
    pub async fn find_by_id_in_session(
        &self,
        id: &ObjectId,
        session: &mut ClientSession,
    ) -> AppResult<Option<User>> {
        Ok(self
            .collection::<User>()
            .find_one(doc! { "_id": *id })
            .session(&mut *session)
            .await?)
    }

    /// 트랜잭션 안에서 후원 누적액, 등급, VIP 여부를 기록합니다.
    pub async fn update_support_in_session(
        &self,
        id: &ObjectId,
        total_amount: f64,
        level: i32,
        vip: i32,
        session: &mut ClientSession,
    ) -> AppResult<()> {
        let result = self
            .collection::<User>()
            .update_one(
                doc! { "_id": *id },
                doc! { "$set": {
                    "support_total_amount": total_amount,
                    "support_level": level,
                    "vip": vip,
                    "updated_time": Utc::now().timestamp(),
                } },
            )
            .session(&mut *session)
            .await?;

        if result.matched_count == 0 {
            return Err(AppError::NotFound(format!("user {}", id.to_hex())));
        }
        Ok(())
    }
}

impl UserRepository {
    /// 시작 시점에 `users` 인덱스를 생성합니다.
    pub async fn create_indexes(&self) -> AppResult<()> {
        let unique = |key: &str| {
            IndexModel::builder()
                .keys(doc! { key: 1 })
                .options(IndexOptions::builder()
                    .unique(true)
                    .name(format!("{}_unique", key))
                    .build())
                .build()
        };

        self.collection::<User>()
            .create_indexes([unique("uid"), unique("username"), unique("email")])
            .await?;

        log::debug!("users 인덱스 생성 완료");
        Ok(())
    }
}
