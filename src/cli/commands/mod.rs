//! Command handlers, grouped by the part of the ledger they touch.

pub mod bill;
pub mod config;
pub mod data;
pub mod installment;
pub mod person;
pub mod system;

use crate::cli::core::CommandError;
use crate::cli::registry::CommandRegistry;

pub fn register_all(registry: &mut CommandRegistry) {
    let groups = [
        person::definitions(),
        bill::definitions(),
        installment::definitions(),
        data::definitions(),
        config::definitions(),
        system::definitions(),
    ];
    for entry in groups.into_iter().flatten() {
        registry.register(entry);
    }
    registry.alias("quit", "exit");
    registry.alias("ls", "list");
}

/// Parses a zero-based index argument.
pub(crate) fn parse_index(raw: &str, label: &str) -> Result<usize, CommandError> {
    raw.trim().parse().map_err(|_| {
        CommandError::InvalidArguments(format!("{label} index must be a non-negative number"))
    })
}

/// Returns the argument at `position`, or the usage text as an error.
pub(crate) fn arg<'a>(args: &[&'a str], position: usize, usage: &str) -> Result<&'a str, CommandError> {
    args.get(position)
        .copied()
        .ok_or_else(|| CommandError::InvalidArguments(format!("usage: {usage}")))
}

pub(crate) fn usage_error(usage: &str) -> CommandError {
    CommandError::InvalidArguments(format!("usage: {usage}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn index_parsing_rejects_negative_and_text() {
        assert_eq!(parse_index("3", "person").unwrap(), 3);
        assert!(parse_index("-1", "person").is_err());
        assert!(parse_index("first", "bill").is_err());
    }

    #[test]
    fn missing_arguments_report_usage() {
        let err = arg(&["add"], 1, "person add <name>").unwrap_err();
        assert_eq!(err.to_string(), "usage: person add <name>");
    }
}
