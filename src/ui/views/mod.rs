pub mod scanner;

pub use scanner::{draw_alert, draw_input, draw_result};
