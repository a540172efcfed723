//! Human-readable renderings of a trained model.

mod dot;
mod html;

pub use dot::to_dot;
pub use html::{to_html, write_html};
