//! Frame splitter for raw stack-trace text.
//!
//! A frame is two lines: the call description, then an indented location
//! line of the form `<file>:<line>` with an optional ` +0x<hex>` offset.
//!
//! ```text
//! main.isError({0x104486073?, 0xc?})
//!     /path/to/file/main.go:24 +0x9f
//! ```
//!
//! Anything that does not fit this pair (goroutine headers, blank lines,
//! `created by` annotations) is skipped.

use super::schema::RawFrame;
use log::debug;

/// Prefix of the annotation naming the function that spawned a goroutine
const CREATED_BY_PREFIX: &str = "created by ";

/// Splitter state while walking the lines
enum State<'a> {
    /// Looking for a line that can describe a call
    SeekingCall,
    /// Holding a candidate call line, expecting its location next
    SeekingLocation(&'a str),
}

/// Split raw stack text into frames, top of stack first
///
/// **Public** - first stage of parsing
///
/// Never fails; text with no recognizable frames yields an empty vector.
pub fn split_frames(stack: &str) -> Vec<RawFrame<'_>> {
    let mut frames = Vec::new();
    let mut state = State::SeekingCall;

    for line in stack.lines() {
        state = match state {
            State::SeekingCall => candidate_call(line),
            // Blank lines between a call and its location are tolerated
            State::SeekingLocation(call_description) if line.trim().is_empty() => {
                State::SeekingLocation(call_description)
            }
            State::SeekingLocation(call_description) => match parse_location(line) {
                Some((file, line_number)) => {
                    frames.push(RawFrame {
                        call_description,
                        file,
                        line: line_number,
                    });
                    State::SeekingCall
                }
                // The rejected line may itself start the next frame
                None => candidate_call(line),
            },
        };
    }

    debug!("Split {} frames from stack text", frames.len());
    frames
}

/// Decide whether a line can open a frame
///
/// **Private** - internal helper for split_frames
fn candidate_call(line: &str) -> State<'_> {
    let trimmed = line.trim();
    if trimmed.is_empty() || trimmed.starts_with(CREATED_BY_PREFIX) {
        State::SeekingCall
    } else {
        State::SeekingLocation(trimmed)
    }
}

/// Parse a location line into (file, line)
///
/// **Private** - internal helper for split_frames
///
/// The line must be indented. A trailing ` +0x<hex>` offset is ignored.
fn parse_location(line: &str) -> Option<(&str, &str)> {
    if !line.starts_with(char::is_whitespace) {
        return None;
    }
    let location = strip_offset(line.trim());

    let (file, line_number) = location.rsplit_once(':')?;
    if file.is_empty() || line_number.is_empty() || !line_number.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }

    Some((file, line_number))
}

/// Remove a trailing ` +0x<hex>` program-counter offset, if present
///
/// **Private** - internal utility
fn strip_offset(location: &str) -> &str {
    match location.rsplit_once(" +0x") {
        Some((head, hex))
            if !hex.is_empty() && hex.bytes().all(|b| matches!(b, b'0'..=b'9' | b'a'..=b'f')) =>
        {
            head
        }
        _ => location,
    }
}
