//! Document admin panel.
//!
//! - [`DocumentManager`]: list, open, upload, delete and replace documents
//! - [`ReplaceSession`]: which document a pending replacement targets
//!
//! # Example
//!
//! ```rust
//! use docdesk::admin::ReplaceSession;
//!
//! let mut session = ReplaceSession::default();
//! session.begin("a.pdf");
//! session.begin("b.pdf");
//! assert_eq!(session.target(), Some("b.pdf"));
//!
//! session.clear();
//! assert!(!session.is_pending());
//! ```

mod manager;
mod replace;

pub use manager::DocumentManager;
pub use replace::ReplaceSession;
