//! External system integrations for Minote.
//!
//! - [`minote`] - Xiaomi Cloud Notes service integration
//!
//! # Design Pattern
//!
//! Adapters isolate external dependencies behind a trait so the export
//! pipeline can be tested against in-memory implementations. All network
//! access goes through [`minote::Transport`]:
//!
//! ```rust,no_run
//! use minote::adapters::minote::{HttpTransport, NoteServiceClient, SessionCookies};
//! use std::sync::Arc;
//! use std::time::Duration;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let cookies = SessionCookies::parse("userId=42; serviceToken=abc")?;
//! let transport = Arc::new(HttpTransport::new(&cookies)?);
//! let client = NoteServiceClient::new(
//!     transport,
//!     "https://i.mi.com/",
//!     Duration::from_secs(30),
//!     200,
//! )?;
//! client.probe().await?;
//! # Ok(())
//! # }
//! ```

pub mod minote;
