//! Heroku Platform API Client
//!
//! A Rust client library for the parts of the Heroku Platform API (v3) that
//! manage Private Spaces. Provides type-safe models and methods for the space
//! lifecycle and its outbound NAT sources.
//!
//! # Example
//!
//! ```no_run
//! use heroku_client::{HerokuClient, SpaceState};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = HerokuClient::new(
//!     "https://api.heroku.com".to_string(),
//!     "your-api-key".to_string(),
//! )?;
//!
//! let space = client.create_space("tftest-abc", "my-org", "us", false).await?;
//!
//! // NAT sources only exist once the space is allocated
//! let space = client.get_space(&space.id).await?;
//! if space.state == SpaceState::Allocated {
//!     let nat = client.get_space_nat(&space.id).await?;
//!     println!("egress sources: {:?}", nat.sources);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! # Features
//!
//! - **Space Operations**: create, info, rename, delete
//! - **NAT Operations**: read the outbound sources of an allocated space
//! - **Mocking**: `MockHerokuClient` behind the `test-util` feature

pub mod client;
pub mod common;
pub mod error;
pub mod models;
#[path = "trait.rs"]
pub mod heroku_trait;
#[cfg(feature = "test-util")]
pub mod mock;

pub use client::{HerokuClient, USER_AGENT};
pub use common::HttpClient;
pub use error::HerokuError;
pub use models::*;
pub use heroku_trait::HerokuClientTrait;
#[cfg(feature = "test-util")]
pub use mock::{InjectedFailure, MockCall, MockHerokuClient, MockOperation};
