mod input;

pub use input::{CodeInput, InputResult};
