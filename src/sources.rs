//! Compiled-in registry of trusted upstream sources.
//!
//! Adding a source is a reviewed code change: append a [`SourceSpec`] to
//! [`SOURCES`] and, if its host is new, to [`ALLOWED_SOURCE_HOSTS`].

use std::collections::HashSet;

use crate::error::CatalogError;
use crate::fetcher::ensure_source_url_allowed;

/// Hosts that may be contacted at all. Compared case-insensitively.
pub const ALLOWED_SOURCE_HOSTS: &[&str] = &["openai.com", "api.github.com"];

/// Payload shape published by a source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParserKind {
    /// `{"creationTime": "...", "prefixes": [{"ipv4Prefix": "..."}, {"ipv6Prefix": "..."}]}`
    OpenAiPrefixes,
    /// `{"<key>": ["cidr", ...], ...}`
    JsonArrayKey { key: &'static str },
}

impl ParserKind {
    /// Name used in listings and logs.
    pub fn name(&self) -> &'static str {
        match self {
            ParserKind::OpenAiPrefixes => "openai_prefixes",
            ParserKind::JsonArrayKey { .. } => "json_array_key",
        }
    }

    /// Payload key, for parser kinds that have one.
    pub fn payload_key(&self) -> Option<&'static str> {
        match self {
            ParserKind::OpenAiPrefixes => None,
            ParserKind::JsonArrayKey { key } => Some(key),
        }
    }
}

/// Static descriptor of one trusted source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceSpec {
    pub set_id: &'static str,
    pub label: &'static str,
    pub provider: &'static str,
    pub source_url: &'static str,
    pub parser: ParserKind,
}

/// Registry order is catalog order.
pub const SOURCES: &[SourceSpec] = &[
    SourceSpec {
        set_id: "openai_gptbot",
        label: "OpenAI GPTBot",
        provider: "openai",
        source_url: "https://openai.com/gptbot.json",
        parser: ParserKind::OpenAiPrefixes,
    },
    SourceSpec {
        set_id: "openai_oai_searchbot",
        label: "OpenAI OAI-SearchBot",
        provider: "openai",
        source_url: "https://openai.com/searchbot.json",
        parser: ParserKind::OpenAiPrefixes,
    },
    SourceSpec {
        set_id: "openai_chatgpt_user",
        label: "OpenAI ChatGPT-User",
        provider: "openai",
        source_url: "https://openai.com/chatgpt-user.json",
        parser: ParserKind::OpenAiPrefixes,
    },
    SourceSpec {
        set_id: "github_copilot",
        label: "GitHub Copilot",
        provider: "github",
        source_url: "https://api.github.com/meta",
        parser: ParserKind::JsonArrayKey { key: "copilot" },
    },
];

/// Check a registry for duplicate or empty ids, disallowed URLs, and
/// array-key sources without a key.
pub fn validate_registry(sources: &[SourceSpec]) -> Result<(), CatalogError> {
    let mut seen = HashSet::new();

    for source in sources {
        if source.set_id.trim().is_empty() {
            return Err(CatalogError::Registry(format!(
                "source with URL {} has an empty set id",
                source.source_url
            )));
        }
        if !seen.insert(source.set_id) {
            return Err(CatalogError::Registry(format!(
                "duplicate set id '{}'",
                source.set_id
            )));
        }
        ensure_source_url_allowed(source.source_url).map_err(|e| {
            CatalogError::Registry(format!("{}: {}", source.set_id, e))
        })?;
        if let ParserKind::JsonArrayKey { key } = source.parser {
            if key.trim().is_empty() {
                return Err(CatalogError::Registry(format!(
                    "{} uses json_array_key without a payload key",
                    source.set_id
                )));
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_registry_is_valid() {
        assert!(validate_registry(SOURCES).is_ok());
    }

    #[test]
    fn test_builtin_registry_order() {
        let ids: Vec<_> = SOURCES.iter().map(|s| s.set_id).collect();
        assert_eq!(
            ids,
            vec![
                "openai_gptbot",
                "openai_oai_searchbot",
                "openai_chatgpt_user",
                "github_copilot"
            ]
        );
    }

    #[test]
    fn test_parser_kind_payload_key() {
        assert_eq!(ParserKind::OpenAiPrefixes.payload_key(), None);
        assert_eq!(
            ParserKind::JsonArrayKey { key: "copilot" }.payload_key(),
            Some("copilot")
        );
        assert_eq!(ParserKind::OpenAiPrefixes.name(), "openai_prefixes");
    }

    #[test]
    fn test_duplicate_set_id_rejected() {
        let sources = [SOURCES[0].clone(), SOURCES[0].clone()];
        let err = validate_registry(&sources).unwrap_err();
        assert!(err.to_string().contains("duplicate set id"));
    }

    #[test]
    fn test_http_source_rejected() {
        let sources = [SourceSpec {
            source_url: "http://openai.com/gptbot.json",
            ..SOURCES[0].clone()
        }];
        assert!(validate_registry(&sources).is_err());
    }

    #[test]
    fn test_foreign_host_rejected() {
        let sources = [SourceSpec {
            source_url: "https://example.com/ranges.json",
            ..SOURCES[0].clone()
        }];
        let err = validate_registry(&sources).unwrap_err();
        assert!(err.to_string().contains("example.com"));
    }

    #[test]
    fn test_empty_payload_key_rejected() {
        let sources = [SourceSpec {
            parser: ParserKind::JsonArrayKey { key: "" },
            ..SOURCES[3].clone()
        }];
        assert!(validate_registry(&sources).is_err());
    }
}
