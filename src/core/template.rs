//! Placeholder template engine
//!
//! A template is split on every `{}` token into literal segments. Arguments
//! are interleaved between the segments in order: missing arguments render
//! as [`MISSING_ARGUMENT`], surplus arguments are dropped.

use super::log_level::LogLevel;
use super::value::{normalize_type_labels, LogValue, ValueRenderer};

/// Token marking where one argument is inserted
pub const PLACEHOLDER: &str = "{}";

/// Text rendered for a placeholder that has no matching argument
pub const MISSING_ARGUMENT: &str = "not found!";

/// A template split into literal segments
///
/// `segments().len() == placeholder_count() + 1` always holds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template<'t> {
    segments: Vec<&'t str>,
}

impl<'t> Template<'t> {
    pub fn parse(template: &'t str) -> Self {
        Self {
            segments: template.split(PLACEHOLDER).collect(),
        }
    }

    #[inline]
    pub fn placeholder_count(&self) -> usize {
        self.segments.len() - 1
    }

    pub fn segments(&self) -> &[&'t str] {
        &self.segments
    }

    /// Interleave rendered arguments between the literal segments
    ///
    /// A template without placeholders behaves as if `{}` were appended to it
    /// whenever at least one argument is supplied.
    pub fn render(
        &self,
        level: LogLevel,
        args: &[LogValue<'_>],
        renderer: &dyn ValueRenderer,
    ) -> String {
        let implicit;
        let segments: &[&str] = if self.placeholder_count() == 0 && !args.is_empty() {
            implicit = [self.segments[0], ""];
            &implicit
        } else {
            &self.segments
        };

        let mut body = String::with_capacity(segments.iter().map(|s| s.len()).sum::<usize>() + 16);
        body.push_str(segments[0]);

        for (slot, segment) in segments[1..].iter().enumerate() {
            match args.get(slot) {
                Some(value) => body.push_str(&render_argument(level, value, renderer)),
                None => body.push_str(MISSING_ARGUMENT),
            }
            body.push_str(segment);
        }

        body
    }
}

/// Render one argument to its inserted text
///
/// Strings are used verbatim; MESSAGE level decodes foreign buffers first.
pub fn render_argument(level: LogLevel, value: &LogValue<'_>, renderer: &dyn ValueRenderer) -> String {
    match value {
        LogValue::Str(s) => normalize_type_labels(s).into_owned(),
        LogValue::Foreign(buffer) if level == LogLevel::Message => {
            normalize_type_labels(&buffer.decode()).into_owned()
        }
        other => normalize_type_labels(&renderer.render(other)).into_owned(),
    }
}

/// Build the message body for `template` and `args`
pub fn render_body(
    level: LogLevel,
    template: &str,
    args: &[LogValue<'_>],
    renderer: &dyn ValueRenderer,
) -> String {
    Template::parse(template).render(level, args, renderer)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::value::{DefaultRenderer, ForeignBuffer, ToLogValue};

    fn body(template: &str, args: &[LogValue<'_>]) -> String {
        render_body(LogLevel::Info, template, args, &DefaultRenderer)
    }

    struct Bracketing;

    impl ValueRenderer for Bracketing {
        fn render(&self, value: &LogValue<'_>) -> String {
            format!("<{}>", DefaultRenderer.render(value))
        }
    }

    #[test]
    fn test_parse_segments() {
        let template = Template::parse("Say: {}, {}");
        assert_eq!(template.segments(), ["Say: ", ", ", ""]);
        assert_eq!(template.placeholder_count(), 2);

        let plain = Template::parse("no tokens");
        assert_eq!(plain.segments(), ["no tokens"]);
        assert_eq!(plain.placeholder_count(), 0);
    }

    #[test]
    fn test_exact_arguments() {
        assert_eq!(
            body("Say: {}, {}", &[LogValue::Str("Hello"), LogValue::Str("World")]),
            "Say: Hello, World"
        );
        assert_eq!(body("Value: {}", &[42i32.to_log_value()]), "Value: 42");
    }

    #[test]
    fn test_implicit_append_without_placeholder() {
        assert_eq!(body("Value:", &[LogValue::Int(42)]), "Value:42");
        assert_eq!(
            body("Value:", &[LogValue::Int(1), LogValue::Int(2)]),
            "Value:1"
        );
        assert_eq!(body("just text", &[]), "just text");
    }

    #[test]
    fn test_missing_arguments_use_fallback() {
        assert_eq!(
            body("{} and {}", &[LogValue::Str("one")]),
            "one and not found!"
        );
        assert_eq!(body("{}{}", &[]), "not found!not found!");
    }

    #[test]
    fn test_excess_arguments_dropped() {
        assert_eq!(
            body("only {}", &[LogValue::Str("a"), LogValue::Str("b")]),
            "only a"
        );
    }

    #[test]
    fn test_strings_bypass_renderer() {
        let out = render_body(
            LogLevel::Info,
            "{} {}",
            &[LogValue::Str("text"), LogValue::Int(5)],
            &Bracketing,
        );
        assert_eq!(out, "text <5>");
    }

    #[test]
    fn test_type_label_substitution() {
        assert_eq!(
            body("{}", &[LogValue::Str("map[string]interface {}")]),
            "map[string]any"
        );
        let label = "[]interface {}";
        assert_eq!(body("{}", &[LogValue::display(&label)]), "[]any");
    }

    #[test]
    fn test_message_level_decodes_foreign_buffers() {
        let hello: [i8; 6] = [72, 101, 108, 108, 111, 0];
        let go = b"Go!\0";
        let args = [
            LogValue::Foreign(ForeignBuffer::Signed(&hello)),
            LogValue::Foreign(ForeignBuffer::Unsigned(go)),
        ];

        let decoded = render_body(LogLevel::Message, "Say: {}, {}", &args, &DefaultRenderer);
        assert_eq!(decoded, "Say: Hello, Go!");

        let generic = render_body(LogLevel::Info, "Say: {}, {}", &args, &DefaultRenderer);
        assert!(generic.contains("Signed"));
        assert!(!generic.contains("Hello"));
    }
}
