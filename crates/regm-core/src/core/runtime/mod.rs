pub(crate) mod effects;
mod response;

use std::fmt;

use serde::{Deserialize, Serialize};

pub use response::{format_status_message, to_json_response};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CommandGroup {
    List,
    Current,
    Use,
    Add,
    Del,
    Test,
}

impl fmt::Display for CommandGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            CommandGroup::List => "ls",
            CommandGroup::Current => "current",
            CommandGroup::Use => "use",
            CommandGroup::Add => "add",
            CommandGroup::Del => "del",
            CommandGroup::Test => "test",
        };
        f.write_str(name)
    }
}
