use crate::cli::output;
use crate::cli::registry::{CommandEntry, CommandRegistry};

pub fn print_overview(registry: &CommandRegistry) {
    output::section("Available commands");
    for entry in registry.list() {
        output::line(format!("  {:<12} {}", entry.name, entry.description));
    }
    output::hint("Use `help <command>` for usage. Indices come from `list`.");
}

pub fn print_command(entry: &CommandEntry) {
    output::section(format!("Help: {}", entry.name));
    output::line(format!("  {}", entry.description));
    for usage in entry.usage.split(" | ") {
        output::line(format!("  usage: {}", usage));
    }
}
