use colored::*;
use stone_core::{
    RouteDescriptor, SerializationError,
    response::{ResponseError, RouteOutcome},
    serde_json,
};
use std::fmt::Display;

/// A wrapper struct for a formatted, colored string.
///
/// Implements `Display` so it can be printed directly.
pub struct FormattedString(pub String);

pub struct RouteList(pub Vec<&'static RouteDescriptor>);

pub struct GenericError<T: Display>(pub &'static str, pub T);

impl std::fmt::Display for FormattedString {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f)?;
        writeln!(f, "{}", self.0)?;
        Ok(())
    }
}

impl From<serde_json::Value> for FormattedString {
    fn from(value: serde_json::Value) -> Self {
        FormattedString(serde_json::to_string_pretty(&value).unwrap_or_else(|_| value.to_string()))
    }
}

impl From<SerializationError> for FormattedString {
    fn from(err: SerializationError) -> Self {
        FormattedString(format!("{}\n\n'{}'", "Conversion Failed:".red().bold(), err))
    }
}

impl From<anyhow::Error> for FormattedString {
    fn from(err: anyhow::Error) -> Self {
        FormattedString(format!("{}\n\n'{:#}'", "Invalid Input:".red().bold(), err))
    }
}

impl From<ResponseError> for FormattedString {
    fn from(err: ResponseError) -> Self {
        let title = if err.is_deserialization() {
            "Contract Violation:"
        } else {
            "Request Failed:"
        };
        FormattedString(format!("{}\n\n'{}'", title.red().bold(), err))
    }
}

impl<T: Display> From<GenericError<T>> for FormattedString {
    fn from(GenericError(msg, err): GenericError<T>) -> Self {
        FormattedString(format!("{}:\n\n'{}'", msg.red().bold(), err))
    }
}

impl From<RouteOutcome> for FormattedString {
    fn from(outcome: RouteOutcome) -> Self {
        let (title, value) = match outcome {
            RouteOutcome::Success(value) => ("Success".green().bold(), value),
            RouteOutcome::RouteError(value) => ("Route Error".yellow().bold(), value),
        };

        let Some(value) = value else {
            return FormattedString(format!("{title} (no payload)"));
        };

        let body = serde_json::to_string_pretty(&value.serialize())
            .unwrap_or_else(|_| value.serialize().to_string());

        FormattedString(format!(
            "{} {}\n\n{}\n\n{}",
            title,
            short_type_name(value.type_name()).cyan(),
            value.describe(),
            body
        ))
    }
}

impl From<RouteList> for FormattedString {
    fn from(RouteList(routes): RouteList) -> Self {
        if routes.is_empty() {
            return FormattedString("No routes found.".yellow().to_string());
        }

        let mut out = String::new();
        out.push_str("Available Routes:\n");
        for route in routes {
            out.push_str(&format!("  - {}", route.full_name().green()));
            if route.deprecated() {
                out.push_str(&format!(" {}", "(deprecated)".yellow()));
            }
            out.push('\n');

            let result = route
                .result_converter()
                .map_or("none", |converter| short_type_name(converter.type_name()));
            let error = route
                .error_converter()
                .map_or("none", |converter| short_type_name(converter.type_name()));
            out.push_str(&format!("      result: {}  error: {}\n", result.cyan(), error.cyan()));

            for (key, value) in route.attrs() {
                out.push_str(&format!("      {key}: {value}\n"));
            }
        }
        FormattedString(out.trim_end().to_string())
    }
}

/// `stone_files::files::FileMetadata` -> `FileMetadata`
fn short_type_name(type_name: &str) -> &str {
    let base = type_name.split('<').next().unwrap_or(type_name);
    match base.rsplit_once("::") {
        Some((_, short)) if base.len() == type_name.len() => short,
        _ => type_name,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_type_name() {
        assert_eq!(short_type_name("stone_files::files::FileMetadata"), "FileMetadata");
        assert_eq!(short_type_name("u64"), "u64");
        assert_eq!(
            short_type_name("alloc::vec::Vec<alloc::string::String>"),
            "alloc::vec::Vec<alloc::string::String>"
        );
    }

    #[test]
    fn test_empty_route_list() {
        colored::control::set_override(false);
        assert_eq!(FormattedString::from(RouteList(vec![])).0, "No routes found.");
    }
}
