use serde::Serialize;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DiagnosticCategory {
    Warning,
    Error,
    Message,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct DiagnosticMessage {
    pub code: u32,
    pub category: DiagnosticCategory,
    pub message: &'static str,
}

pub mod diagnostic_codes {
    pub const REDECLARATION: u32 = 1001;
    pub const CONFLICTING_OVERLOADS: u32 = 1002;
}

pub mod diagnostic_messages {
    use super::{DiagnosticCategory, DiagnosticMessage, diagnostic_codes};

    pub const REDECLARATION: DiagnosticMessage = DiagnosticMessage {
        code: diagnostic_codes::REDECLARATION,
        category: DiagnosticCategory::Error,
        message: "Redeclaration: {0}",
    };

    pub const CONFLICTING_OVERLOADS: DiagnosticMessage = DiagnosticMessage {
        code: diagnostic_codes::CONFLICTING_OVERLOADS,
        category: DiagnosticCategory::Error,
        message: "'{0}' is already defined in {1}",
    };
}

pub const DIAGNOSTIC_MESSAGES: &[DiagnosticMessage] = &[
    diagnostic_messages::REDECLARATION,
    diagnostic_messages::CONFLICTING_OVERLOADS,
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Diagnostic {
    pub category: DiagnosticCategory,
    pub code: u32,
    pub file: String,
    pub start: u32,
    pub length: u32,
    pub message_text: String,
}

impl Diagnostic {
    pub fn error(
        file: impl Into<String>,
        start: u32,
        length: u32,
        message: impl Into<String>,
        code: u32,
    ) -> Self {
        Self {
            category: DiagnosticCategory::Error,
            message_text: message.into(),
            code,
            file: file.into(),
            start,
            length,
        }
    }

    /// Build a diagnostic from a message template, substituting `args`.
    pub fn from_message(
        file: impl Into<String>,
        start: u32,
        length: u32,
        message: DiagnosticMessage,
        args: &[&str],
    ) -> Self {
        Self {
            category: message.category,
            message_text: format_message(message.message, args),
            code: message.code,
            file: file.into(),
            start,
            length,
        }
    }
}

pub fn get_message_template(code: u32) -> Option<&'static str> {
    DIAGNOSTIC_MESSAGES
        .iter()
        .find(|m| m.code == code)
        .map(|m| m.message)
}

/// Fill `{N}` placeholders from `args` in a single pass over the template.
///
/// Argument text is never rescanned, so a member literally named `{1}` is
/// rendered as written. Placeholders without an argument are kept.
pub fn format_message(message: &str, args: &[&str]) -> String {
    let mut result = String::with_capacity(message.len());
    let mut rest = message;
    while let Some(open) = rest.find('{') {
        result.push_str(&rest[..open]);
        let after = &rest[open + 1..];
        let arg = after.find('}').and_then(|close| {
            let index: usize = after[..close].parse().ok()?;
            args.get(index).map(|arg| (*arg, close))
        });
        match arg {
            Some((arg, close)) => {
                result.push_str(arg);
                rest = &after[close + 1..];
            }
            None => {
                result.push('{');
                rest = after;
            }
        }
    }
    result.push_str(rest);
    result
}
