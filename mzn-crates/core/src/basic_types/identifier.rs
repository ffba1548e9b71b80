/// Words which cannot be used as identifiers in a MiniZinc model.
const RESERVED_WORDS: &[&str] = &[
    "ann",
    "annotation",
    "any",
    "array",
    "bool",
    "case",
    "constraint",
    "default",
    "diff",
    "div",
    "else",
    "elseif",
    "endif",
    "enum",
    "false",
    "float",
    "function",
    "if",
    "in",
    "include",
    "int",
    "intersect",
    "let",
    "list",
    "maximize",
    "minimize",
    "mod",
    "not",
    "of",
    "op",
    "opt",
    "output",
    "par",
    "predicate",
    "record",
    "satisfy",
    "set",
    "solve",
    "string",
    "subset",
    "superset",
    "symdiff",
    "test",
    "then",
    "true",
    "tuple",
    "type",
    "union",
    "var",
    "where",
];

/// Returns whether `name` can be declared in a MiniZinc model.
///
/// A valid identifier starts with an ASCII letter, continues with ASCII letters, digits or
/// underscores, and is not a reserved word.
pub fn is_valid_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    let Some(first) = chars.next() else {
        return false;
    };

    first.is_ascii_alphabetic()
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        && !RESERVED_WORDS.contains(&name)
}

/// Replaces every character which may not occur in an identifier by an underscore.
pub(crate) fn sanitize_identifier(name: &str) -> String {
    name.chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '_' { c } else { '_' })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identifiers_must_start_with_a_letter() {
        assert!(is_valid_identifier("q_1"));
        assert!(!is_valid_identifier("1q"));
        assert!(!is_valid_identifier("_q"));
        assert!(!is_valid_identifier(""));
    }

    #[test]
    fn reserved_words_are_rejected() {
        assert!(!is_valid_identifier("solve"));
        assert!(!is_valid_identifier("var"));
        assert!(is_valid_identifier("solver"));
    }

    #[test]
    fn sanitizing_replaces_punctuation() {
        assert_eq!("bin_item_0__1", sanitize_identifier("bin_item_0_-1"));
        assert_eq!("a_b_c", sanitize_identifier("a(b,c"));
    }
}
