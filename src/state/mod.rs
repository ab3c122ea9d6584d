//! Session-owned presentation state

pub mod view_state;

pub use view_state::{SortState, ViewMode, ViewState};
