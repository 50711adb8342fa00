//! Producers of raw stack text.

/// Anything that can capture the current call stack as text
///
/// The text must follow the two-line-per-frame convention understood by
/// `parser::split_frames`.
pub trait StackSource {
    fn capture(&self) -> String;
}

impl<F> StackSource for F
where
    F: Fn() -> String,
{
    fn capture(&self) -> String {
        self()
    }
}

/// Fixed stack text, useful for replaying captured stacks
#[derive(Debug, Clone)]
pub struct CapturedStack(pub String);

impl StackSource for CapturedStack {
    fn capture(&self) -> String {
        self.0.clone()
    }
}
