//! Top-level rendering coordinator.
//!
//! Rendering is a two-step process: the [`AppState`] is projected into a
//! [`UIViewModel`], which the components then draw.

use crate::app::AppState;
use crate::ui::components;

/// Renders the plugin UI to stdout for a pane of `rows` x `cols`.
///
/// Does not clear the screen; the host redraws the pane on every render.
pub fn render(state: &AppState, rows: usize, cols: usize) {
    let _span = tracing::trace_span!("render", rows, cols).entered();
    let viewmodel = state.compute_viewmodel(rows, cols);
    components::render_layout(&viewmodel, &state.theme, rows, cols);
}
