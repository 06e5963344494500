//! docdesk
//!
//! Operator front-end for a document question-answering backend: an admin
//! panel that manages the PDF corpus and a chat widget that asks questions
//! and shows structured answer cards.
//!
//! # Architecture
//!
//! - **Gateway**: one async trait over the backend's HTTP endpoints, with a
//!   `reqwest` implementation
//! - **Controllers**: [`DocumentManager`] and [`ChatWidget`] own the
//!   operator-facing state machines and drive an abstract view
//! - **Views**: an in-memory page model rendered to htmx fragments, and a
//!   terminal renderer for the subcommands
//!
//! # Modules
//!
//! - [`admin`]: document admin controller and replace session
//! - [`chat`]: chat widget controller and transcript
//! - [`gateway`]: backend gateway trait and HTTP client
//! - [`view`]: view traits, formatting and renderers
//! - [`web`]: axum router serving the admin and chat pages

// Allow pedantic clippy warnings that don't add value for this codebase
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::missing_fields_in_debug)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::cargo_common_metadata)]
#![allow(clippy::multiple_crate_versions)]

pub mod admin;
pub mod chat;
pub mod config;
pub mod error;
pub mod gateway;
pub mod model;
pub mod view;
pub mod web;

pub use admin::DocumentManager;
pub use chat::ChatWidget;
pub use error::{Error, Result};
pub use gateway::{BackendGateway, HttpGateway};
