//! Fixed catalog of tools the model may invoke
//!
//! Each definition is declared once here and rendered into each backend's
//! declaration shape at request time. Names, parameter types, and required
//! lists are part of the contract with the model: the model builds calls from
//! exactly what is advertised, so changing any of it changes behavior.

use serde_json::{Map, Value, json};

pub const READ_FILE: &str = "read_file";
pub const WRITE_FILE: &str = "write_file";
pub const EDIT_FILE: &str = "edit_file";
pub const EXECUTE_COMMAND: &str = "execute_command";
pub const GLOB_SEARCH: &str = "glob_search";
pub const GREP_SEARCH: &str = "grep_search";

/// JSON Schema type of a tool parameter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParameterKind {
    String,
    Integer,
    Boolean,
}

impl ParameterKind {
    pub const fn json_type(self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Integer => "integer",
            Self::Boolean => "boolean",
        }
    }
}

/// One declared parameter of a tool
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ToolParameter {
    pub name: &'static str,
    pub kind: ParameterKind,
    pub description: &'static str,
    pub required: bool,
    /// Permitted values; empty means unrestricted
    pub allowed: &'static [&'static str],
}

impl ToolParameter {
    const fn required(name: &'static str, kind: ParameterKind, description: &'static str) -> Self {
        Self {
            name,
            kind,
            description,
            required: true,
            allowed: &[],
        }
    }

    const fn optional(name: &'static str, kind: ParameterKind, description: &'static str) -> Self {
        Self {
            name,
            kind,
            description,
            required: false,
            allowed: &[],
        }
    }

    const fn one_of(mut self, allowed: &'static [&'static str]) -> Self {
        self.allowed = allowed;
        self
    }

    fn schema(&self) -> Value {
        let mut property = Map::new();
        property.insert("type".to_owned(), json!(self.kind.json_type()));
        property.insert("description".to_owned(), json!(self.description));
        if !self.allowed.is_empty() {
            property.insert("enum".to_owned(), json!(self.allowed));
        }
        Value::Object(property)
    }
}

/// A tool advertised to the model
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ToolDefinition {
    pub name: &'static str,
    pub description: &'static str,
    pub parameters: &'static [ToolParameter],
}

impl ToolDefinition {
    /// JSON Schema object describing the tool's arguments
    pub fn input_schema(&self) -> Value {
        let properties: Map<std::string::String, Value> = self
            .parameters
            .iter()
            .map(|p| (p.name.to_owned(), p.schema()))
            .collect();

        json!({
            "type": "object",
            "properties": properties,
            "required": self.required_parameters().collect::<Vec<_>>(),
        })
    }

    /// Names of the parameters the model must supply
    pub fn required_parameters(&self) -> impl Iterator<Item = &'static str> {
        self.parameters.iter().filter(|p| p.required).map(|p| p.name)
    }
}

use ParameterKind::{Boolean, Integer, String};

const READ_FILE_PARAMS: &[ToolParameter] = &[
    ToolParameter::required("file_path", String, "Absolute path of the file to read"),
    ToolParameter::optional("offset", Integer, "Line number to start reading from"),
    ToolParameter::optional("limit", Integer, "Maximum number of lines to read"),
];

const WRITE_FILE_PARAMS: &[ToolParameter] = &[
    ToolParameter::required("file_path", String, "Absolute path of the file to write"),
    ToolParameter::required("content", String, "Full content to write to the file"),
];

const EDIT_FILE_PARAMS: &[ToolParameter] = &[
    ToolParameter::required("file_path", String, "Absolute path of the file to modify"),
    ToolParameter::required("old_string", String, "Exact text to replace"),
    ToolParameter::required("new_string", String, "Text to replace it with"),
    ToolParameter::optional(
        "replace_all",
        Boolean,
        "Replace every occurrence instead of requiring a unique match",
    ),
];

const EXECUTE_COMMAND_PARAMS: &[ToolParameter] = &[
    ToolParameter::required("command", String, "Shell command to execute"),
    ToolParameter::optional("timeout", Integer, "Timeout in milliseconds"),
    ToolParameter::optional("working_directory", String, "Directory to run the command in"),
];

const GLOB_SEARCH_PARAMS: &[ToolParameter] = &[
    ToolParameter::required("pattern", String, "Glob pattern such as `src/**/*.rs`"),
    ToolParameter::optional("path", String, "Directory to search from; defaults to the working directory"),
];

const GREP_SEARCH_PARAMS: &[ToolParameter] = &[
    ToolParameter::required("pattern", String, "Regular expression to search file contents for"),
    ToolParameter::optional("path", String, "File or directory to search; defaults to the working directory"),
    ToolParameter::optional(
        "output_mode",
        String,
        "`content` shows matching lines, `files_with_matches` lists files, `count` shows match counts",
    )
    .one_of(&["content", "files_with_matches", "count"]),
];

static REGISTRY: [ToolDefinition; 6] = [
    ToolDefinition {
        name: READ_FILE,
        description: "Read a file from the local filesystem, optionally a range of lines",
        parameters: READ_FILE_PARAMS,
    },
    ToolDefinition {
        name: WRITE_FILE,
        description: "Write content to a file, creating it or overwriting it",
        parameters: WRITE_FILE_PARAMS,
    },
    ToolDefinition {
        name: EDIT_FILE,
        description: "Replace an exact string in a file with a new string",
        parameters: EDIT_FILE_PARAMS,
    },
    ToolDefinition {
        name: EXECUTE_COMMAND,
        description: "Execute a shell command and return its output",
        parameters: EXECUTE_COMMAND_PARAMS,
    },
    ToolDefinition {
        name: GLOB_SEARCH,
        description: "Find files whose paths match a glob pattern",
        parameters: GLOB_SEARCH_PARAMS,
    },
    ToolDefinition {
        name: GREP_SEARCH,
        description: "Search file contents with a regular expression",
        parameters: GREP_SEARCH_PARAMS,
    },
];

/// Every tool, in declaration order
pub fn registry() -> &'static [ToolDefinition] {
    &REGISTRY
}

/// Look up a tool by name
pub fn find(name: &str) -> Option<&'static ToolDefinition> {
    REGISTRY.iter().find(|tool| tool.name == name)
}
