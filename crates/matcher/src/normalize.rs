//! Text normalization shared by every match stage.

/// Lower-case and trim.
///
/// Applied once to the incoming message and to every keyword and synonym
/// before comparison, so all stages agree on what "equal" means.
pub fn normalize(text: &str) -> String {
    text.trim().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lowercases_and_trims() {
        assert_eq!(normalize("  PriCing \n"), "pricing");
        assert_eq!(normalize("Ärger"), "ärger");
    }

    #[test]
    fn keeps_inner_whitespace() {
        assert_eq!(normalize(" Opening  Hours "), "opening  hours");
    }

    #[test]
    fn whitespace_only_becomes_empty() {
        assert!(normalize(" \t\r\n").is_empty());
    }
}
