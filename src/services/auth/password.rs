//! 비밀번호 해싱과 형식 정책
//!
//! 로그인/결제 비밀번호 모두 bcrypt 해시로 저장합니다. cost는 실행 환경별
//! [`PasswordConfig::bcrypt_cost`]를 따릅니다.

use unicode_properties::{GeneralCategory, GeneralCategoryGroup, UnicodeGeneralCategory};
use crate::config::PasswordConfig;
use crate::errors::{AppError, AppResult};

pub fn hash_password(plain: &str) -> AppResult<String> {
    hash_password_with_cost(plain, PasswordConfig::bcrypt_cost())
}

pub fn hash_password_with_cost(plain: &str, cost: u32) -> AppResult<String> {
    bcrypt::hash(plain, cost).map_err(|e| AppError::InternalError(format!("비밀번호 해싱 실패: {}", e)))
}

/// 해시 형식이 잘못된 경우도 불일치로 취급합니다.
pub fn verify_password(plain: &str, hash: &str) -> bool {
    match bcrypt::verify(plain, hash) {
        Ok(matched) => matched,
        Err(e) => {
            log::warn!("비밀번호 해시 검증 실패: {}", e);
            false
        }
    }
}

/// 8바이트 이상이며 대문자, 소문자, 숫자, 특수문자를 모두 포함해야 합니다.
///
/// 길이는 UTF-8 바이트 수로 셉니다. 문자 분류는 유니코드 일반 범주를 따르며
/// 특수문자는 구두점(P*) 또는 기호(S*) 범주입니다.
pub fn check_password_strength(password: &str) -> bool {
    if password.len() < 8 {
        return false;
    }

    let mut has_upper = false;
    let mut has_lower = false;
    let mut has_digit = false;
    let mut has_special = false;

    for ch in password.chars() {
        match ch.general_category() {
            GeneralCategory::UppercaseLetter => has_upper = true,
            GeneralCategory::LowercaseLetter => has_lower = true,
            GeneralCategory::DecimalNumber => has_digit = true,
            _ => {
                if matches!(
                    ch.general_category_group(),
                    GeneralCategoryGroup::Punctuation | GeneralCategoryGroup::Symbol
                ) {
                    has_special = true;
                }
            }
        }
    }

    has_upper && has_lower && has_digit && has_special
}

/// 결제 비밀번호 형식 (숫자 6자리)
pub fn is_six_digits(value: &str) -> bool {
    value.len() == 6 && value.bytes().all(|b| b.is_ascii_digit())
}
