/// Removes `{ ... }` comment regions from formula source.
///
/// Braces nest: only text at depth zero is kept. A stray `}` at depth zero
/// is dropped, and an unbalanced `{` swallows the rest of the input.
///
/// # Parameters
/// - `source`: Raw formula text.
///
/// # Returns
/// The text with every comment region removed.
///
/// # Example
/// ```
/// use formulang::interpreter::comment::trim_comment;
///
/// let src = "MA5:MA(C,5);{five day {simple} average}\nX:=1;";
/// assert_eq!(trim_comment(src), "MA5:MA(C,5);\nX:=1;");
/// ```
#[must_use]
pub fn trim_comment(source: &str) -> String {
    let mut depth = 0_usize;
    let mut kept = String::with_capacity(source.len());

    for c in source.chars() {
        match c {
            '{' => depth += 1,
            '}' => depth = depth.saturating_sub(1),
            _ if depth == 0 => kept.push(c),
            _ => {},
        }
    }

    kept
}
