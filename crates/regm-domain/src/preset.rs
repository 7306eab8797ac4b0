//! Compiled-in registry presets.
//!
//! Presets are listed before any user alias and can never be deleted. On a
//! name collision with a user alias the preset URI is the one that survives
//! the merge.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Preset {
    pub alias: &'static str,
    pub uri: &'static str,
}

/// Presets in display order.
pub const PRESETS: &[Preset] = &[
    Preset {
        alias: "npm",
        uri: "https://registry.npmjs.org/",
    },
    Preset {
        alias: "yarn",
        uri: "https://registry.yarnpkg.com/",
    },
    Preset {
        alias: "tencent",
        uri: "https://mirrors.cloud.tencent.com/npm/",
    },
    Preset {
        alias: "npmMirror",
        uri: "https://registry.npmmirror.com/",
    },
];

pub fn is_preset(alias: &str) -> bool {
    PRESETS.iter().any(|preset| preset.alias == alias)
}

pub fn preset_uri(alias: &str) -> Option<&'static str> {
    PRESETS
        .iter()
        .find(|preset| preset.alias == alias)
        .map(|preset| preset.uri)
}
