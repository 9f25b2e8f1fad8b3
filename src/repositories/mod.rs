//! 리포지토리 모듈
//!
//! 데이터 액세스 계층을 제공합니다. 각 리포지토리는 `#[repository]` 매크로로
//! 싱글톤 등록되며 MongoDB 컬렉션과 Redis 캐시를 함께 사용합니다.

pub mod users;
