/// User interface widgets
///
/// Stateless view builders; all state lives in `state::viewer::Viewer`.
/// - `toolbar.rs` - action buttons and status line
/// - `sidebar.rs` - the library list
/// - `canvas.rs` - the scrollable document canvas
pub mod canvas;
pub mod sidebar;
pub mod toolbar;
