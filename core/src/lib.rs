//! Client core for the posts service.
//!
//! # Overview
//! Keeps a local collection of posts in sync with a REST backend exposing
//! `/v1/posts` (list, create, delete). A view reads `PostStore` snapshots,
//! subscribes to changes and forwards user intents to the `SyncController`.
//!
//! # Design
//! - `PostsClient` is stateless: `build_*` produces an `HttpRequest`,
//!   `parse_*` consumes an `HttpResponse`. A `Transport` does the I/O in
//!   between; `HttpGateway` joins the two behind the `PostsGateway` trait.
//! - `PostStore` is the only mutable state and is changed only by the
//!   controller.
//! - `SyncController` runs each intent as begin → gateway call →
//!   complete/fail and never retries.
//! - DTOs are defined independently from the mock-server crate; integration
//!   tests catch schema drift.

pub mod client;
pub mod config;
pub mod controller;
pub mod error;
pub mod filter;
pub mod gateway;
pub mod http;
pub mod notify;
pub mod store;
pub mod theme;
pub mod transport;
pub mod types;

pub use client::PostsClient;
pub use config::{AppMode, Config, ListEnvelope};
pub use controller::{FetchOutcome, SyncController};
pub use error::{ApiError, ConfigError, SyncError, ValidationError};
pub use filter::{filter_posts, ListView};
pub use gateway::{HttpGateway, PostsGateway};
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use notify::{LogNotifier, Notice, NoticeLevel, NoticeLog, Notifier};
pub use store::{PostCollectionState, PostStore, SubscriptionId};
pub use theme::ThemeMode;
pub use transport::{Transport, UreqTransport};
pub use types::{NewPost, Post, PostId};
