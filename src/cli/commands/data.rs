use std::path::PathBuf;

use billbook_core::BalanceDrift;

use crate::cli::core::{CommandResult, ShellContext};
use crate::cli::formatters::{format_amount, totals_lines};
use crate::cli::output;
use crate::cli::registry::CommandEntry;

use super::arg;

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![
        CommandEntry::new(
            "summary",
            "Show totals across every person",
            "summary",
            cmd_summary,
        ),
        CommandEntry::new(
            "audit",
            "Find bills whose paid total disagrees with their installments",
            "audit",
            cmd_audit,
        ),
        CommandEntry::new(
            "export",
            "Write all data to a JSON file",
            "export [path]",
            cmd_export,
        ),
        CommandEntry::new(
            "import",
            "Replace all data with the contents of a JSON file",
            "import <path>",
            cmd_import,
        ),
        CommandEntry::new("clear", "Delete all stored data", "clear", cmd_clear),
    ]
}

fn cmd_summary(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let totals = context.session.totals();
    output::section("Summary");
    output::line(format!("People:      {}", context.session.ledger().len()));
    for line in totals_lines(&totals, &context.config.currency_symbol) {
        output::line(line);
    }
    Ok(())
}

fn cmd_audit(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let drift = context.session.audit();
    if drift.is_empty() {
        output::success("Every bill matches its installments.");
        return Ok(());
    }
    print_drift(&drift, &context.config.currency_symbol);
    Ok(())
}

fn cmd_export(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let path = match args.first() {
        Some(raw) => PathBuf::from(raw),
        None => context.config.default_export_path(),
    };
    context.session.export_to(&path)?;
    output::success(format!(
        "Exported {} people to {}.",
        context.session.ledger().len(),
        path.display()
    ));
    Ok(())
}

fn cmd_import(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let path = PathBuf::from(arg(args, 0, "import <path>")?);
    if !context.session.ledger().is_empty()
        && !context.confirm("Importing replaces all current data. Continue?")?
    {
        output::info("Import cancelled.");
        return Ok(());
    }
    let report = context.session.import_from(&path)?;
    output::success(format!(
        "Imported {} people from {}.",
        report.people,
        path.display()
    ));
    if !report.drift.is_empty() {
        print_drift(&report.drift, &context.config.currency_symbol);
    }
    Ok(())
}

fn cmd_clear(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    if !context.confirm("Delete all people, bills, and installments?")? {
        output::info("Clear cancelled.");
        return Ok(());
    }
    context.session.clear_all()?;
    output::success("All data cleared.");
    Ok(())
}

fn print_drift(drift: &[BalanceDrift], symbol: &str) {
    for entry in drift {
        output::warning(format!(
            "{} [{}] bill [{}]: paid {} but installments total {}",
            entry.person_name,
            entry.person_index,
            entry.bill_index,
            format_amount(symbol, entry.recorded_paid),
            format_amount(symbol, entry.installment_total)
        ));
    }
    output::hint("Stored paid totals are left as they are.");
}
