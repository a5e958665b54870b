//! Roster Client
//!
//! HTTP client library for the Roster users API.
//!
//! # Features
//!
//! - **Users**: list, fetch and add user records
//! - **Authentication**: login with username/password, current-user status
//! - **Health**: ping the service
//!
//! # Example
//!
//! ```ignore
//! use roster_client::{ClientConfig, RosterClient};
//! use roster_view::users_list;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = RosterClient::new(ClientConfig::new("http://localhost:5000"))?;
//!
//!     let users = client.list_users().await?;
//!     println!("{}", users_list(&users).to_html());
//!
//!     Ok(())
//! }
//! ```

mod client;
mod error;
mod types;

pub use client::RosterClient;
pub use error::{ClientError, Result};
pub use types::{ClientConfig, Envelope, LoginResponse, UsersData};
