//! 요청 부가 정보 (작업 로그, IP 화이트리스트용)

use actix_web::HttpRequest;
use actix_web::http::header::USER_AGENT;

/// 요청 경로, 메서드, 클라이언트 IP, User-Agent
#[derive(Debug, Clone, Default)]
pub struct RequestMeta {
    pub path: String,
    pub method: String,
    pub ip: String,
    pub user_agent: String,
}

impl RequestMeta {
    pub fn from_request(req: &HttpRequest) -> Self {
        Self {
            path: req.path().to_string(),
            method: req.method().to_string(),
            ip: client_ip(req),
            user_agent: req
                .headers()
                .get(USER_AGENT)
                .and_then(|value| value.to_str().ok())
                .unwrap_or_default()
                .to_string(),
        }
    }
}

/// 클라이언트 IP
///
/// `Forwarded` / `X-Forwarded-For` 헤더가 있으면 첫 번째 주소, 없으면 피어 주소입니다.
/// 포트는 제거합니다.
///
/// 전달 헤더는 클라이언트가 임의로 넣을 수 있으므로, 앞단의 신뢰할 수 있는
/// 리버스 프록시가 `Forwarded` / `X-Forwarded-For`를 덮어쓰는 배치를 전제로 합니다.
/// 이 값은 IP 화이트리스트와 작업 로그에 그대로 쓰입니다.
pub fn client_ip(req: &HttpRequest) -> String {
    let info = req.connection_info();
    let addr = info.realip_remote_addr().unwrap_or_default();
    strip_port(addr).to_string()
}

fn strip_port(addr: &str) -> &str {
    let addr = addr.trim();

    // [::1]:8080
    if let Some(rest) = addr.strip_prefix('[') {
        return rest.split(']').next().unwrap_or(rest);
    }

    // IPv4 주소에 포트가 붙은 경우만 자릅니다. (IPv6에는 ':'가 여러 개)
    match addr.matches(':').count() {
        1 => addr.split(':').next().unwrap_or(addr),
        _ => addr,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::test::TestRequest;

    #[test]
    fn test_strip_port() {
        assert_eq!(strip_port("10.0.0.1:5000"), "10.0.0.1");
        assert_eq!(strip_port("10.0.0.1"), "10.0.0.1");
        assert_eq!(strip_port("[::1]:8080"), "::1");
        assert_eq!(strip_port("fe80::1"), "fe80::1");
    }

    #[test]
    fn test_forwarded_header_wins() {
        let req = TestRequest::post()
            .uri("/api/admin/role")
            .insert_header(("X-Forwarded-For", "203.0.113.7, 10.0.0.1"))
            .insert_header((USER_AGENT, "curl/8"))
            .to_http_request();

        let meta = RequestMeta::from_request(&req);

        assert_eq!(meta.ip, "203.0.113.7");
        assert_eq!(meta.path, "/api/admin/role");
        assert_eq!(meta.method, "POST");
        assert_eq!(meta.user_agent, "curl/8");
    }

    #[test]
    fn test_peer_address_without_forwarding_headers() {
        let req = TestRequest::get()
            .peer_addr("192.0.2.10:51234".parse().unwrap())
            .to_http_request();

        assert_eq!(client_ip(&req), "192.0.2.10");
    }
}
