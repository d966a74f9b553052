//! User record storage.
//!
//! The auth service only depends on the [`UserStore`] trait; Postgres and
//! in-memory implementations live alongside it.

pub mod models;
pub mod postgres;
pub mod memory;

use async_trait::async_trait;
use uuid::Uuid;

use crate::error::AppError;
use models::{NewUser, User, UserUpdate};

pub use memory::MemoryUserStore;
pub use postgres::PgUserStore;

/// Repository interface over user records. `update` and `delete` are part of
/// the interface but not exercised by the sign-up/login flows.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserStore: Send + Sync {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, AppError>;

    async fn create(&self, new_user: NewUser) -> Result<User, AppError>;

    async fn update(&self, id: Uuid, changes: UserUpdate) -> Result<Option<User>, AppError>;

    async fn delete(&self, id: Uuid) -> Result<bool, AppError>;
}
