//! 도서 관리 서비스의 도메인 모델.

mod book;
mod user;

pub use book::*;
pub use user::*;
