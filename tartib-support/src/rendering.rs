//! Text rendering for human-friendly diagnostics.
//!
//! Error messages name component types a lot. These helpers keep those
//! names readable: paths are joined into chains, module prefixes are
//! stripped, and near-miss names are offered as suggestions.

/// Renders a dependency chain as one line.
///
/// # Examples
/// ```
/// use tartib_support::rendering::render_chain;
///
/// let chain = vec!["UserService", "UserRepo", "UserService"];
/// assert_eq!(render_chain(&chain), "UserService → UserRepo → UserService");
/// ```
pub fn render_chain(chain: &[impl AsRef<str>]) -> String {
    chain
        .iter()
        .map(|entry| entry.as_ref())
        .collect::<Vec<_>>()
        .join(" → ")
}

/// Strips module paths from a type name, inside generics too.
///
/// ```
/// use tartib_support::rendering::shorten_type_name;
///
/// assert_eq!(shorten_type_name("my_app::services::UserService"), "UserService");
/// assert_eq!(
///     shorten_type_name("alloc::sync::Arc<dyn my_app::traits::Logger>"),
///     "Arc<dyn Logger>"
/// );
/// ```
pub fn shorten_type_name(full_name: &str) -> String {
    let mut result = String::with_capacity(full_name.len());
    let mut segment_start = 0;

    for (index, ch) in full_name.char_indices() {
        match ch {
            // A colon ends a path segment; after "::" the start sits past
            // both colons.
            ':' => segment_start = index + 1,
            '<' | '>' | ',' | ' ' | '(' | ')' | '[' | ']' => {
                result.push_str(&full_name[segment_start..index]);
                result.push(ch);
                segment_start = index + 1;
            }
            _ => {}
        }
    }

    result.push_str(&full_name[segment_start..]);
    result
}

/// Picks registered type names close to a requested one.
///
/// Exact short-name matches rank first, then substring matches, then
/// names sharing a prefix of at least three characters. Ties break
/// alphabetically so output is stable.
pub fn suggest_similar(
    requested: &str,
    available: &[&str],
    max_suggestions: usize,
) -> Vec<String> {
    let wanted = shorten_type_name(requested).to_lowercase();

    // Score as (tier, detail): exact short name, then substring, then a
    // shared prefix ranked by its length.
    let mut scored: Vec<((u8, usize), &str)> = available
        .iter()
        .filter_map(|&name| {
            let short = shorten_type_name(name).to_lowercase();
            let score = if short == wanted {
                (3, 0)
            } else if short.contains(&wanted) || wanted.contains(&short) {
                (2, short.len().min(wanted.len()))
            } else {
                let prefix = common_prefix(&short, &wanted);
                if prefix < 3 {
                    return None;
                }
                (1, prefix)
            };
            Some((score, name))
        })
        .collect();

    scored.sort_by(|a, b| b.0.cmp(&a.0).then_with(|| a.1.cmp(b.1)));
    scored
        .into_iter()
        .take(max_suggestions)
        .map(|(_, name)| name.to_string())
        .collect()
}

fn common_prefix(a: &str, b: &str) -> usize {
    a.chars()
        .zip(b.chars())
        .take_while(|(x, y)| x == y)
        .count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn render_simple_chain() {
        let chain = vec!["A", "B", "C", "A"];
        assert_eq!(render_chain(&chain), "A → B → C → A");
    }

    #[test]
    fn render_single_element_chain() {
        assert_eq!(render_chain(&["A"]), "A");
    }

    #[test]
    fn render_empty_chain() {
        let chain: Vec<&str> = vec![];
        assert_eq!(render_chain(&chain), "");
    }

    #[test]
    fn shorten_simple_path() {
        assert_eq!(
            shorten_type_name("my_app::services::UserService"),
            "UserService"
        );
    }

    #[test]
    fn shorten_with_generics() {
        assert_eq!(
            shorten_type_name("alloc::sync::Arc<dyn my_app::traits::Logger>"),
            "Arc<dyn Logger>"
        );
    }

    #[test]
    fn shorten_tuple_and_nested_generics() {
        assert_eq!(
            shorten_type_name("std::collections::HashMap<alloc::string::String, my_app::Entry>"),
            "HashMap<String, Entry>"
        );
    }

    #[test]
    fn shorten_no_path() {
        assert_eq!(shorten_type_name("String"), "String");
    }

    #[test]
    fn suggest_catches_typos() {
        let available = vec![
            "my_app::UserService",
            "my_app::UserRepository",
            "my_app::Logger",
            "my_app::Database",
        ];

        let suggestions = suggest_similar("UserServise", &available, 3);
        assert!(!suggestions.is_empty());
        assert!(suggestions[0].contains("UserService"));
    }

    #[test]
    fn suggest_prefers_exact_short_name() {
        let available = vec!["other_crate::Database", "my_app::DatabasePool"];
        let suggestions = suggest_similar("my_app::Database", &available, 2);
        assert_eq!(suggestions[0], "other_crate::Database");
    }

    #[test]
    fn suggest_no_match() {
        let available = vec!["my_app::Database"];
        assert!(suggest_similar("XyzQwv", &available, 3).is_empty());
    }

    #[test]
    fn suggest_respects_limit() {
        let available = vec!["a::Store", "b::Store", "c::Store"];
        assert_eq!(suggest_similar("Store", &available, 2).len(), 2);
    }
}
