//! Per-client session state for the heart-risk predictor.
//!
//! A [`Session`] is an explicit value owned by whoever serves one client;
//! nothing here is global except the read-only locale/theme catalog and the
//! shared oracle held by [`PredictionWorkflow`]. All operations are
//! synchronous and leave the session consistent on failure.

pub mod catalog;
pub mod error;
pub mod navigation;
pub mod options;
pub mod report;
pub mod session;
pub mod workflow;

pub use catalog::{locale, palette, CatalogError, LocaleTable, Palette};
pub use error::SessionError;
pub use navigation::{default_page, is_reachable, reachable_pages, NavigationOutcome};
pub use options::{decode_choice, decode_form};
pub use report::{render_report, REPORT_CONTENT_TYPE, REPORT_FILE_NAME};
pub use session::Session;
pub use workflow::PredictionWorkflow;
