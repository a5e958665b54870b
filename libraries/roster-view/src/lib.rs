//! Roster View
//!
//! Renders user lists as an element tree that can be inspected, turned into
//! HTML, or serialized into a deterministic snapshot.
//!
//! # Example
//!
//! ```rust
//! use roster_core::User;
//! use roster_view::users_list;
//!
//! let users = vec![User {
//!     id: 1,
//!     username: "seed1".to_string(),
//!     email: "seed1@mail.com".to_string(),
//!     active: true,
//!     admin: false,
//!     created_at: String::new(),
//! }];
//!
//! let tree = users_list(&users);
//! let headings = tree.find("h4");
//! assert_eq!(headings.len(), 1);
//! assert_eq!(headings[0].text(), "seed1");
//! assert_eq!(
//!     tree.to_html(),
//!     r#"<div><h4 class="card card-body bg-light">seed1</h4></div>"#
//! );
//! ```

mod element;
mod error;
mod snapshot;
mod users_list;

pub use element::{Element, Node};
pub use error::{Result, ViewError};
pub use snapshot::{SnapshotOutcome, SnapshotStore, UPDATE_SNAPSHOTS_ENV};
pub use users_list::{render_page, users_list, users_page, USER_CARD_CLASS};
