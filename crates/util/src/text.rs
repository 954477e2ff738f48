//! Display-text cosmetics for labels and descriptions.

/// Title-cases a label, treating `-`, `_` and whitespace as word breaks.
///
/// Identities in the model tend to arrive as `store-true` or
/// `output_file`; backends show them as `Store True` / `Output File`.
pub fn title_case(input: &str) -> String {
    input
        .split(|c: char| c == '-' || c == '_' || c.is_whitespace())
        .filter(|word| !word.is_empty())
        .map(capitalize)
        .collect::<Vec<String>>()
        .join(" ")
}

/// Upper-cases the first character and leaves the rest untouched.
pub fn sentence_case(input: &str) -> String {
    capitalize(input)
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn title_case_splits_on_separators() {
        assert_eq!(title_case("store-true"), "Store True");
        assert_eq!(title_case("output_file"), "Output File");
        assert_eq!(title_case("choose one of the following"), "Choose One Of The Following");
        assert_eq!(title_case(""), "");
    }

    #[test]
    fn sentence_case_touches_only_the_first_char() {
        assert_eq!(sentence_case("optional arg store true"), "Optional arg store true");
        assert_eq!(sentence_case(""), "");
        assert_eq!(sentence_case("X already"), "X already");
    }
}
