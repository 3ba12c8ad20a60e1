//! 보안 난수 기반 코드 생성
//!
//! 인증 코드, 사용자 번호, 업로드 파일명에 사용하는 숫자열을 만듭니다.
//! 모두 운영체제 CSPRNG(`OsRng`)를 사용합니다.

use rand::Rng;
use rand::rngs::OsRng;

/// `len`자리 숫자 문자열 (앞자리 0 허용)
pub fn random_digits(len: usize) -> String {
    let mut rng = OsRng;
    (0..len)
        .map(|_| char::from(b'0' + rng.gen_range(0..10u8)))
        .collect()
}

/// 10자리 공개 사용자 번호 (1_000_000_000 ..= 9_999_999_999)
pub fn random_uid() -> i64 {
    OsRng.gen_range(1_000_000_000i64..=9_999_999_999i64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_random_digits_shape() {
        for _ in 0..50 {
            let code = random_digits(6);
            assert_eq!(code.len(), 6);
            assert!(code.chars().all(|c| c.is_ascii_digit()));
        }
        assert_eq!(random_digits(3).len(), 3);
    }

    #[test]
    fn test_random_uid_has_ten_digits() {
        for _ in 0..50 {
            assert_eq!(random_uid().to_string().len(), 10);
        }
    }
}
