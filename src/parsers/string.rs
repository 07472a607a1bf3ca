/// Characters removed or collapsed by the cleaners: whitespace and `+`.
fn is_filler(c: char) -> bool {
    c.is_whitespace() || c == '+'
}

/// Removes every whitespace character and `+`.
#[must_use]
pub fn clean(arg: &str) -> String {
    arg.chars().filter(|c| !is_filler(*c)).collect()
}

/// Collapses runs of whitespace and `+` into single spaces and trims the ends.
#[must_use]
pub fn clean_white(arg: &str) -> String {
    arg.split(is_filler)
        .filter(|word| !word.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}
