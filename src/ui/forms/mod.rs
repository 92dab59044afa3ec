//! Form rendering module
//!
//! - `field_renderer`: per-kind field drawing and heights
//! - `form_page`: the wizard screen
//! - `login`: the registration screen

mod field_renderer;
mod form_page;
mod login;

pub use field_renderer::draw_text_input;
pub use form_page::draw as draw_form_page;
pub use login::draw as draw_login;
