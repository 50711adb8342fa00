//! Strip argument lists from call descriptions.

/// Remove the trailing argument list from a call description
///
/// **Public** - second stage of parsing
///
/// Trailing whitespace is trimmed, then the string is scanned backwards
/// tracking parenthesis depth. When depth returns to zero the string is cut
/// at that opening parenthesis. When no group is cut the input is returned
/// exactly as given, trailing whitespace included.
///
/// # Example
/// ```
/// use stacktrace_to_graph::parser::clean_function_name;
///
/// assert_eq!(clean_function_name("main.isError({0x1,0x2})"), "main.isError");
/// assert_eq!(clean_function_name("main.funcA()(arg)"), "main.funcA()");
/// ```
pub fn clean_function_name(description: &str) -> &str {
    let trimmed = description.trim_end();

    // Signed so a stray '(' drives the depth negative instead of closing a group
    let mut depth: isize = 0;
    for (index, byte) in trimmed.bytes().enumerate().rev() {
        match byte {
            b')' => depth += 1,
            b'(' => {
                depth -= 1;
                if depth == 0 {
                    return &trimmed[..index];
                }
            }
            _ => {}
        }
    }

    description
}
