use url::Url;

use crate::RegistryError;

/// Returns true when `input` looks like a registry endpoint: an absolute
/// `http`/`https` URL with a host.
pub fn is_uri(input: &str) -> bool {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return false;
    }
    match Url::parse(trimmed) {
        Ok(url) => matches!(url.scheme(), "http" | "https") && url.host_str().is_some(),
        Err(_) => false,
    }
}

/// Alias names double as file names in the alias directory, so anything that
/// would escape it or hide from the scanner is rejected.
pub fn validate_alias_name(alias: &str) -> Result<(), RegistryError> {
    let invalid = alias.is_empty()
        || alias.starts_with('.')
        || alias
            .chars()
            .any(|ch| matches!(ch, '/' | '\\') || ch.is_whitespace() || ch.is_control());
    if invalid {
        return Err(RegistryError::InvalidAlias {
            alias: alias.to_string(),
        });
    }
    Ok(())
}
