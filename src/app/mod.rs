//! Application layer coordinating state, events, and actions.
//!
//! This layer sits between the plugin runtime (main.rs) and the search layer.
//! It implements a unidirectional data flow:
//!
//! ```text
//! User Input / Host Events → Event Handler → State Mutations → Actions → Side Effects
//!                                  ↑                                        ↓
//!                                  └──────── Web Responses / Timers ────────┘
//! ```
//!
//! # Modules
//!
//! - [`actions`]: Side effect commands emitted by the event handler
//! - [`handler`]: Event processing and state transitions
//! - [`modes`]: Input, focus and layout mode types
//! - [`state`]: Central application state container and view model computation
//!
//! # Example
//!
//! ```rust
//! use apidex::app::{handle_event, AppState, Event, Settings};
//! use apidex::search::Backend;
//! use apidex::Theme;
//!
//! let mut state = AppState::new(Settings::default(), Backend::default(), Theme::default());
//! let (_render, actions) = handle_event(&mut state, &Event::MoveDown, 0)?;
//! assert!(actions.is_empty());
//! # Ok::<(), apidex::ApidexError>(())
//! ```

pub mod actions;
pub mod handler;
pub mod modes;
pub mod state;

pub use actions::Action;
pub use handler::{handle_event, Event};
pub use modes::{Breakpoint, Focus, InputMode, ResultViewType, SortOption};
pub use state::{AppState, Settings, DEFAULT_ALTERNATIVES};
