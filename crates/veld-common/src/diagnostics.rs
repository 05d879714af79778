//! Diagnostic model shared by all veld crates.
//!
//! Diagnostics carry a numeric code and a pre-formatted message. Message
//! templates live in `diagnostic_messages` and are instantiated with
//! [`format_message`]; semantic passes push `Diagnostic` values onto a sink
//! `Vec` owned by the caller, which may discard speculative entries by
//! truncating back to a checkpoint.

use crate::span::Span;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum DiagnosticCategory {
    Warning,
    Error,
    Suggestion,
    Message,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub category: DiagnosticCategory,
    pub code: u32,
    pub span: Span,
    pub message_text: String,
}

impl Diagnostic {
    pub fn error(span: Span, message: impl Into<String>, code: u32) -> Self {
        Self {
            category: DiagnosticCategory::Error,
            code,
            span,
            message_text: message.into(),
        }
    }
}

pub mod diagnostic_codes {
    //! Stable numeric codes for user-facing diagnostics.

    /// "a delegate declaration is only allowed inside an aggregate, not {0}"
    pub const DELEGATE_OUTSIDE_AGGREGATE: u32 = 5301;
    /// "undefined identifier {0}"
    pub const UNDEFINED_IDENTIFIER: u32 = 5302;
    /// "{0} is not a member of {1}"
    pub const NOT_A_MEMBER: u32 = 5303;
    /// "there can be only one tuple delegate"
    pub const CONFLICTING_TUPLE_DELEGATE: u32 = 5304;
    /// "delegate {0} is not reachable because {1} already converts to {2}"
    pub const UNREACHABLE_DELEGATE: u32 = 5305;
    /// "delegate {0} tries to override another delegate with type {1}"
    pub const OVERRIDING_DELEGATE: u32 = 5306;
    /// "no overload of {0} accepts a {1} receiver"
    pub const NO_QUALIFIER_COMPATIBLE_OVERLOAD: u32 = 5307;
    /// "cannot determine the return type of {0}"
    pub const UNRESOLVED_RETURN_TYPE: u32 = 5308;
    /// "cannot instantiate template {0}"
    pub const TEMPLATE_INSTANTIATION_FAILED: u32 = 5309;
    /// "overloads of {0} are ambiguous for a {1} receiver"
    pub const AMBIGUOUS_RECEIVER_OVERLOAD: u32 = 5310;
}

pub mod diagnostic_messages {
    use super::{DiagnosticCategory, diagnostic_codes};

    #[derive(Copy, Clone, Debug, PartialEq, Eq)]
    pub struct DiagnosticMessage {
        pub code: u32,
        pub category: DiagnosticCategory,
        pub message: &'static str,
    }

    pub const DIAGNOSTIC_MESSAGES: &[DiagnosticMessage] = &[
        DiagnosticMessage {
            code: diagnostic_codes::DELEGATE_OUTSIDE_AGGREGATE,
            category: DiagnosticCategory::Error,
            message: "a delegate declaration is only allowed inside an aggregate, not {0}",
        },
        DiagnosticMessage {
            code: diagnostic_codes::UNDEFINED_IDENTIFIER,
            category: DiagnosticCategory::Error,
            message: "undefined identifier {0}",
        },
        DiagnosticMessage {
            code: diagnostic_codes::NOT_A_MEMBER,
            category: DiagnosticCategory::Error,
            message: "{0} is not a member of {1}",
        },
        DiagnosticMessage {
            code: diagnostic_codes::CONFLICTING_TUPLE_DELEGATE,
            category: DiagnosticCategory::Error,
            message: "there can be only one tuple delegate",
        },
        DiagnosticMessage {
            code: diagnostic_codes::UNREACHABLE_DELEGATE,
            category: DiagnosticCategory::Error,
            message: "delegate {0} is not reachable because {1} already converts to {2}",
        },
        DiagnosticMessage {
            code: diagnostic_codes::OVERRIDING_DELEGATE,
            category: DiagnosticCategory::Error,
            message: "delegate {0} tries to override another delegate with type {1}",
        },
        DiagnosticMessage {
            code: diagnostic_codes::NO_QUALIFIER_COMPATIBLE_OVERLOAD,
            category: DiagnosticCategory::Error,
            message: "no overload of {0} accepts a {1} receiver",
        },
        DiagnosticMessage {
            code: diagnostic_codes::UNRESOLVED_RETURN_TYPE,
            category: DiagnosticCategory::Error,
            message: "cannot determine the return type of {0}",
        },
        DiagnosticMessage {
            code: diagnostic_codes::TEMPLATE_INSTANTIATION_FAILED,
            category: DiagnosticCategory::Error,
            message: "cannot instantiate template {0}",
        },
        DiagnosticMessage {
            code: diagnostic_codes::AMBIGUOUS_RECEIVER_OVERLOAD,
            category: DiagnosticCategory::Error,
            message: "overloads of {0} are ambiguous for a {1} receiver",
        },
    ];
}

pub fn get_message_template(code: u32) -> Option<&'static str> {
    diagnostic_messages::DIAGNOSTIC_MESSAGES
        .iter()
        .find(|m| m.code == code)
        .map(|m| m.message)
}

pub fn format_message(message: &str, args: &[&str]) -> String {
    let mut result = message.to_string();
    for (i, arg) in args.iter().enumerate() {
        result = result.replace(&format!("{{{i}}}"), arg);
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn templates_are_registered_for_all_codes() {
        for code in [
            diagnostic_codes::DELEGATE_OUTSIDE_AGGREGATE,
            diagnostic_codes::UNDEFINED_IDENTIFIER,
            diagnostic_codes::NOT_A_MEMBER,
            diagnostic_codes::CONFLICTING_TUPLE_DELEGATE,
            diagnostic_codes::UNREACHABLE_DELEGATE,
            diagnostic_codes::OVERRIDING_DELEGATE,
            diagnostic_codes::NO_QUALIFIER_COMPATIBLE_OVERLOAD,
            diagnostic_codes::UNRESOLVED_RETURN_TYPE,
            diagnostic_codes::TEMPLATE_INSTANTIATION_FAILED,
            diagnostic_codes::AMBIGUOUS_RECEIVER_OVERLOAD,
        ] {
            assert!(get_message_template(code).is_some(), "missing template for {code}");
        }
    }

    #[test]
    fn format_message_substitutes_positional_args() {
        let template = get_message_template(diagnostic_codes::NOT_A_MEMBER).unwrap();
        let text = format_message(template, &["x", "Window"]);
        assert_eq!(text, "x is not a member of Window");
    }
}
