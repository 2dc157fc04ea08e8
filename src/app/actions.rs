//! Actions representing side effects to be executed by the plugin runtime.
//!
//! The event handler returns a `Vec<Action>` after processing each event. The
//! library never calls Zellij directly; `main.rs` translates each action into the
//! matching host call, which keeps the whole application layer testable on the
//! native target.

use std::collections::BTreeMap;

/// Commands representing side effects to be executed by the plugin runtime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Sends an HTTP GET request.
    ///
    /// The response comes back as a web request result event carrying the same
    /// `context`, which identifies the issuing provider and generation.
    WebRequest {
        url: String,
        context: BTreeMap<String, String>,
    },

    /// Requests a timer event after `seconds`, used to enforce request
    /// deadlines.
    ScheduleTimeout { seconds: u64 },

    /// Opens an external link with the configured open command.
    OpenLink { url: String },

    /// Hides the plugin pane.
    CloseFocus,
}
