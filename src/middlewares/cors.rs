//! CORS 설정
//!
//! 모든 Origin을 허용하고, 토큰/언어 헤더를 받을 수 있도록 구성합니다.
//! Preflight(`OPTIONS`) 요청은 actix-cors가 직접 응답합니다.

use actix_cors::Cors;
use actix_web::http::header::{self, HeaderName};

pub fn configure_cors() -> Cors {
    Cors::default()
        .allow_any_origin()
        .allowed_methods(vec!["GET", "POST", "PUT", "DELETE", "OPTIONS"])
        .allowed_headers(vec![
            header::AUTHORIZATION,
            header::CONTENT_TYPE,
            header::ACCEPT_LANGUAGE,
            HeaderName::from_static("token"),
            HeaderName::from_static("language"),
        ])
        .expose_headers(vec![header::AUTHORIZATION, header::CONTENT_LENGTH])
        .supports_credentials()
        .max_age(3600)
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{http::StatusCode, test, web, App, HttpResponse};

    #[actix_web::test]
    async fn test_preflight_answered() {
        let app = test::init_service(
            App::new()
                .wrap(configure_cors())
                .route("/api/backend/user/login", web::post().to(|| async { HttpResponse::Ok().finish() })),
        )
        .await;

        let req = test::TestRequest::default()
            .method(actix_web::http::Method::OPTIONS)
            .uri("/api/backend/user/login")
            .insert_header((header::ORIGIN, "https://portal.example.com"))
            .insert_header((header::ACCESS_CONTROL_REQUEST_METHOD, "POST"))
            .insert_header((header::ACCESS_CONTROL_REQUEST_HEADERS, "token, content-type"))
            .to_request();
        let res = test::call_service(&app, req).await;

        assert_eq!(res.status(), StatusCode::OK);
        let allow_origin = res.headers().get(header::ACCESS_CONTROL_ALLOW_ORIGIN).unwrap();
        assert_eq!(allow_origin, "https://portal.example.com");
    }

    #[actix_web::test]
    async fn test_simple_request_exposes_headers() {
        let app = test::init_service(
            App::new()
                .wrap(configure_cors())
                .route("/health", web::get().to(|| async { HttpResponse::Ok().finish() })),
        )
        .await;

        let req = test::TestRequest::get()
            .uri("/health")
            .insert_header((header::ORIGIN, "https://portal.example.com"))
            .to_request();
        let res = test::call_service(&app, req).await;

        assert_eq!(res.status(), StatusCode::OK);
        assert!(res.headers().contains_key(header::ACCESS_CONTROL_EXPOSE_HEADERS));
        assert_eq!(
            res.headers().get(header::ACCESS_CONTROL_ALLOW_CREDENTIALS).unwrap(),
            "true"
        );
    }
}
