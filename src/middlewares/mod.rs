//! 미들웨어 모듈
//!
//! ActixWeb 요청 처리 파이프라인에서 사용되는 미들웨어들을 제공합니다.
//!
//! # 제공 미들웨어
//!
//! ### 세션 미들웨어 (SessionMiddleware)
//! - 쿠키에서 세션 ID 추출
//! - Redis 세션 해석 및 사용자 레코드 로드
//! - 인증 주체를 request extension에 저장
//! - 요청을 거부하지 않음: 인증 여부 분기는 핸들러의 책임
//!
//! # 사용 방법
//!
//! ```rust,ignore
//! use actix_web::{App, HttpServer};
//! use crate::middlewares::SessionMiddleware;
//!
//! HttpServer::new(|| {
//!     App::new()
//!         .wrap(SessionMiddleware::default()) // 모든 라우트에서 세션 복원
//!         .configure(configure_all_routes)
//! })
//! ```

pub mod session_middleware;
mod session_inner;

// 미들웨어 재export
pub use session_middleware::SessionMiddleware;
pub use session_inner::extract_session_id;
