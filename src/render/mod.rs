pub mod renderer;

pub use renderer::{AnswerView, Renderer};
