//! # userline - Terminal Client for the User API
//!
//! Creates and lists users against a `/api/users` endpoint and shows the raw
//! server answer in a single result pane.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────┐   UserInput   ┌──────────────┐  UserRequest  ┌─────────────┐
//! │    Form     │──────────────▶│  UserPanel   │──────────────▶│  Transport  │
//! │             │               │              │               │             │
//! │ - name      │               │ - run        │◀──────────────│ - reqwest   │
//! │ - email     │               │ - dispatch   │  ApiResponse  │ - fakes in  │
//! │ - password  │               │ - outcomes   │               │   tests     │
//! └─────────────┘               └──────┬───────┘               └─────────────┘
//!                                      │ "Response: 201\n..." / "Error: ..."
//!                                      ▼
//!                               ┌──────────────┐
//!                               │ResultDisplay │
//!                               │ - verbatim   │
//!                               │ - safe render│
//!                               └──────────────┘
//! ```

pub mod client;
pub mod cmd_args;
pub mod config;
pub mod display;
pub mod form;
pub mod panel;
pub mod profile;

// Re-export main types for easy access
pub use client::{ApiResponse, HttpTransport, Operation, Transport, UserRequest};
pub use display::{ResultDisplay, SharedDisplay};
pub use form::{FormSource, MemoryForm, UserInput};
pub use panel::{OutcomeMessage, RequestOutcome, UserPanel};
pub use profile::{get_blank_profile, IniProfile, IniProfileStore};
