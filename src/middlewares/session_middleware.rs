//! 세션 미들웨어
//!
//! ActixWeb 요청 파이프라인에서 세션 쿠키를 해석하고
//! 인증 주체를 요청 컨텍스트에 복원합니다.

use std::future::{ready, Ready};
use std::rc::Rc;

use actix_web::{
    dev::{Service, ServiceRequest, ServiceResponse, Transform},
    Error, Result,
};

use crate::middlewares::session_inner::SessionMiddlewareService;

/// 쿠키 기반 세션 미들웨어
///
/// 매 요청마다 세션 쿠키 → Redis 세션 → MongoDB 사용자 순으로
/// 인증 주체를 복원합니다. 복원에 실패해도 요청은 비로그인 상태로
/// 계속 진행되며, 접근 제어는 각 핸들러가 수행합니다.
#[derive(Default)]
pub struct SessionMiddleware;

impl SessionMiddleware {
    /// 새로운 세션 미들웨어 생성
    pub fn new() -> Self {
        Self
    }
}

/// ActixWeb Transform trait 구현
impl<S, B> Transform<S, ServiceRequest> for SessionMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Transform = SessionMiddlewareService<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(SessionMiddlewareService {
            service: Rc::new(service),
        }))
    }
}
