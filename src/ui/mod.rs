// UI module - handles all TUI rendering using Ratatui
//
// Architecture:
// - render: Main orchestration function that coordinates all rendering
// - exhibitor_list: Renders the hall plan markers with favorite stars
// - status_bar: Renders bottom status bar with sync state and hotkeys
// - selector: Renders the watchlist selection modal and create form
// - dialogs: Renders the session-expired notice
// - toast: Renders toast notifications (brief pop-up messages)

pub mod dialogs;
pub mod exhibitor_list;
pub mod render;
pub mod selector;
pub mod status_bar;
pub mod toast;

pub use render::render;
