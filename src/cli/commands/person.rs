use billbook_core::{CoreError, IndexTarget, SearchOutcome};

use crate::cli::core::{CommandResult, ShellContext};
use crate::cli::formatters;
use crate::cli::output;
use crate::cli::registry::CommandEntry;

use super::{arg, parse_index, usage_error};

const USAGE: &str = "person add <name> | person delete <index>";

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![
        CommandEntry::new("person", "Add or delete a person", USAGE, cmd_person),
        CommandEntry::new(
            "list",
            "Show people with their bills and installments",
            "list [person-index]",
            cmd_list,
        ),
        CommandEntry::new(
            "search",
            "Jump to the first person whose name starts with the query",
            "search <query>",
            cmd_search,
        ),
    ]
}

fn cmd_person(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    match arg(args, 0, USAGE)? {
        "add" => {
            let name = args[1..].join(" ");
            let index = context.session.add_person(&name)?;
            output::success(format!("Added `{}` at index {}.", name, index));
            Ok(())
        }
        "delete" | "rm" => {
            let index = parse_index(arg(args, 1, USAGE)?, "person")?;
            let ledger = context.session.ledger();
            let person = ledger
                .person(index)
                .ok_or(person_out_of_range(index, ledger.len()))?;
            let prompt = format!(
                "Delete {} and their {} bill(s)?",
                person.name,
                person.bills.len()
            );
            if !context.confirm(&prompt)? {
                output::info("Deletion cancelled.");
                return Ok(());
            }
            let removed = context.session.delete_person(index)?;
            output::success(format!("Deleted `{}`.", removed.name));
            Ok(())
        }
        _ => Err(usage_error(USAGE)),
    }
}

fn cmd_list(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let symbol = context.config.currency_symbol.as_str();
    let ledger = context.session.ledger();
    if let Some(raw) = args.first() {
        let index = parse_index(raw, "person")?;
        let person = ledger
            .person(index)
            .ok_or(person_out_of_range(index, ledger.len()))?;
        for line in formatters::person_lines(index, person, symbol) {
            output::line(line);
        }
        return Ok(());
    }

    output::section("People and Bills");
    if ledger.is_empty() {
        output::info("No people yet. Use `person add <name>` to start.");
        return Ok(());
    }
    for (index, person) in ledger.iter().enumerate() {
        for line in formatters::person_lines(index, person, symbol) {
            output::line(line);
        }
    }
    Ok(())
}

fn cmd_search(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let query = args.join(" ");
    match context.session.search(&query) {
        SearchOutcome::Found(index) => {
            if let Some(person) = context.session.ledger().person(index) {
                output::line(formatters::person_header(
                    index,
                    person,
                    &context.config.currency_symbol,
                ));
            }
        }
        SearchOutcome::NoMatch => output::warning("No match found"),
        SearchOutcome::Skipped => output::hint("Type part of a name to search."),
    }
    Ok(())
}

fn person_out_of_range(index: usize, len: usize) -> CoreError {
    CoreError::IndexOutOfRange {
        target: IndexTarget::Person,
        index,
        len,
    }
}
