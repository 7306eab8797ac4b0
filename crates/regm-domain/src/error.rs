pub mod codes {
    pub const MISSING_ARGUMENT: &str = "RG100";
    pub const INVALID_ALIAS: &str = "RG101";
    pub const INVALID_URI: &str = "RG102";
    pub const ALIAS_EXISTS: &str = "RG110";
    pub const PRESET_PROTECTED: &str = "RG111";
    pub const ALIAS_NOT_FOUND: &str = "RG201";
    pub const IO_FAILURE: &str = "RG301";
}

/// Errors surfaced by the registry alias store.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum RegistryError {
    #[error("please supply {what}")]
    MissingArgument { what: &'static str },
    #[error("can't find alias '{alias}' in {source_dir}")]
    AliasNotFound { alias: String, source_dir: String },
    #[error("alias '{alias}' already exists")]
    AliasAlreadyExists { alias: String },
    #[error("can't delete preset registry '{alias}'")]
    PresetProtected { alias: String },
    #[error("'{uri}' is not a valid registry uri")]
    InvalidUri { uri: String, homepage: String },
    #[error("'{alias}' can't be used as an alias name")]
    InvalidAlias { alias: String },
    #[error("{action}: {message}")]
    Io { action: String, message: String },
}

impl RegistryError {
    pub fn io(action: impl Into<String>, err: &dyn std::fmt::Display) -> Self {
        Self::Io {
            action: action.into(),
            message: err.to_string(),
        }
    }

    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Self::MissingArgument { .. } => codes::MISSING_ARGUMENT,
            Self::InvalidAlias { .. } => codes::INVALID_ALIAS,
            Self::InvalidUri { .. } => codes::INVALID_URI,
            Self::AliasAlreadyExists { .. } => codes::ALIAS_EXISTS,
            Self::PresetProtected { .. } => codes::PRESET_PROTECTED,
            Self::AliasNotFound { .. } => codes::ALIAS_NOT_FOUND,
            Self::Io { .. } => codes::IO_FAILURE,
        }
    }

    #[must_use]
    pub fn reason(&self) -> &'static str {
        match self {
            Self::MissingArgument { .. } => "missing_argument",
            Self::InvalidAlias { .. } => "invalid_alias",
            Self::InvalidUri { .. } => "invalid_uri",
            Self::AliasAlreadyExists { .. } => "alias_exists",
            Self::PresetProtected { .. } => "preset_protected",
            Self::AliasNotFound { .. } => "alias_not_found",
            Self::Io { .. } => "io_failure",
        }
    }

    #[must_use]
    pub fn hint(&self) -> Option<String> {
        match self {
            Self::MissingArgument { .. } => {
                Some("pass the alias name as the first argument".to_string())
            }
            Self::AliasNotFound { .. } => {
                Some("run `regm ls` to see the aliases you can use".to_string())
            }
            Self::AliasAlreadyExists { alias } => Some(format!(
                "pick another name or run `regm del {alias}` first"
            )),
            Self::PresetProtected { .. } => {
                Some("only aliases added with `regm add` can be deleted".to_string())
            }
            Self::InvalidUri { .. } => {
                Some("registry uris must be absolute http(s) urls".to_string())
            }
            Self::InvalidAlias { .. } => Some(
                "use a plain name without path separators, whitespace, or a leading '.'"
                    .to_string(),
            ),
            Self::Io { .. } => None,
        }
    }

    /// Validation and lookup problems are the caller's to fix; I/O is ours.
    #[must_use]
    pub fn is_user_error(&self) -> bool {
        !matches!(self, Self::Io { .. })
    }
}
