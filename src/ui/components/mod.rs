//! Reusable UI components

mod button;
mod dialog;

pub use button::{render_button, render_button_row, ButtonSpec, BUTTON_HEIGHT};
pub use dialog::render_error_dialog;
