//! Deterministic WiX element ids.
//!
//! WiX identifiers must start with a letter or underscore, may contain only
//! ASCII letters, digits, underscores and periods, and are limited to 72
//! characters. Ids here are `<Context>_<sha1 hex>`, which is always 50
//! characters or fewer and needs no persisted state.

use sha1::{Digest, Sha1};

/// Maximum identifier length accepted by the WiX compiler.
pub const MAX_ID_LEN: usize = 72;

/// Element kind the id is generated for.
///
/// The same key yields distinct ids per kind, so a directory and a file
/// sharing a path never collide.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum IdContext {
    Directory,
    Component,
    File,
    Shortcut,
}

impl IdContext {
    pub fn as_str(self) -> &'static str {
        match self {
            IdContext::Directory => "Directory",
            IdContext::Component => "Component",
            IdContext::File => "File",
            IdContext::Shortcut => "Shortcut",
        }
    }
}

/// Mangle `name` into an element id for `context`.
pub fn id_str(context: IdContext, name: &str) -> String {
    let digest = Sha1::digest(name.as_bytes());
    format!("{}_{}", context.as_str(), hex::encode(digest))
}

pub fn directory_id(name: &str) -> String {
    id_str(IdContext::Directory, name)
}

pub fn component_id(name: &str) -> String {
    id_str(IdContext::Component, name)
}

pub fn file_id(name: &str) -> String {
    id_str(IdContext::File, name)
}

pub fn shortcut_id(name: &str) -> String {
    id_str(IdContext::Shortcut, name)
}

/// Whether `id` satisfies the WiX identifier grammar.
pub fn is_valid_id(id: &str) -> bool {
    let mut chars = id.chars();
    let Some(first) = chars.next() else {
        return false;
    };
    (first.is_ascii_alphabetic() || first == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '.')
        && id.len() <= MAX_ID_LEN
}

#[cfg(test)]
mod tests {
    use super::*;

    const CONTEXTS: [IdContext; 4] = [
        IdContext::Directory,
        IdContext::Component,
        IdContext::File,
        IdContext::Shortcut,
    ];

    #[test]
    fn test_id_is_deterministic() {
        assert_eq!(file_id("app/main.bin"), file_id("app/main.bin"));
        assert_eq!(
            file_id("app/main.bin"),
            "File_".to_string() + &hex::encode(Sha1::digest(b"app/main.bin"))
        );
    }

    #[test]
    fn test_contexts_do_not_collide() {
        let ids: std::collections::HashSet<_> =
            CONTEXTS.iter().map(|c| id_str(*c, "app/lib")).collect();
        assert_eq!(ids.len(), CONTEXTS.len());
    }

    #[test]
    fn test_ids_are_legal_for_awkward_names() {
        let long = "very-long-segment/".repeat(40);
        let names: [&str; 7] = [
            "",
            "app/main.bin",
            "dir with spaces/ünïcödé – file.txt",
            "C:\\Users\\someone\\Python27\\Lib\\site-packages\\x.pyd",
            long.as_str(),
            "-leading-dash",
            "123",
        ];
        for name in names {
            for context in CONTEXTS {
                let id = id_str(context, name);
                assert!(is_valid_id(&id), "illegal id {id} for {name:?}");
            }
        }
    }

    #[test]
    fn test_is_valid_id_rejects_bad_grammar() {
        assert!(is_valid_id("TARGETDIR"));
        assert!(is_valid_id("_x.y"));
        assert!(!is_valid_id(""));
        assert!(!is_valid_id("1abc"));
        assert!(!is_valid_id("a-b"));
        assert!(!is_valid_id(&"a".repeat(MAX_ID_LEN + 1)));
    }

    #[test]
    fn test_distinct_names_give_distinct_ids() {
        assert_ne!(component_id("app/a"), component_id("app/b"));
        assert_ne!(directory_id("app"), directory_id("App"));
        assert!(shortcut_id("x").starts_with("Shortcut_"));
    }
}
