use billbook_config::EDITABLE_KEYS;

use crate::cli::core::{CommandError, CommandResult, ShellContext};
use crate::cli::output;
use crate::cli::registry::CommandEntry;

use super::{arg, usage_error};

const USAGE: &str = "config show | config set <key> <value>";

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![CommandEntry::new(
        "config",
        "Show or change preferences",
        USAGE,
        cmd_config,
    )]
}

fn cmd_config(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    match args.first().copied().unwrap_or("show") {
        "show" => {
            output::section("Preferences");
            for (key, value) in context.config.entries() {
                output::line(format!("  {:<18} {}", key, value));
            }
            Ok(())
        }
        "set" => set(context, args),
        _ => Err(usage_error(USAGE)),
    }
}

fn set(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let key = arg(args, 1, USAGE)?;
    let value = args.get(2..).map(|rest| rest.join(" ")).unwrap_or_default();

    let mut updated = context.config.clone();
    updated.set(key, &value).map_err(|err| {
        CommandError::InvalidArguments(format!(
            "{err}. Editable settings: {}",
            EDITABLE_KEYS.join(", ")
        ))
    })?;

    if let Some(manager) = &context.config_manager {
        manager.save(&updated)?;
    } else {
        output::hint("Preferences are not persisted in this session.");
    }
    context.config = updated;
    output::apply_config(&context.config);
    output::success(format!("Set {} to `{}`.", key, value.trim()));
    Ok(())
}
