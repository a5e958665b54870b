//! Roster Core
//!
//! Shared domain types, the storage trait and error handling for Roster.
//!
//! This crate is used by every other crate in the workspace: the storage layer
//! implements [`UserStore`], the view renders [`User`] lists and the server and
//! client exchange [`User`] records as JSON.
//!
//! # Example
//!
//! ```rust
//! use roster_core::types::{CreateUser, User};
//!
//! let request = CreateUser::new("seed1", "seed1@mail.com");
//! assert!(request.validate().is_ok());
//!
//! let user = User {
//!     id: 1,
//!     username: "seed1".to_string(),
//!     email: "seed1@mail.com".to_string(),
//!     active: true,
//!     admin: false,
//!     created_at: "2024-01-01T00:00:00+00:00".to_string(),
//! };
//! assert!(user.active);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod error;
pub mod storage;
pub mod types;

// Re-export commonly used types
pub use error::{Result, RosterError};
pub use storage::UserStore;
pub use types::{CreateUser, User, UserId};
