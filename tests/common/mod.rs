use std::path::Path;

use assert_cmd::Command;

pub const BIN_NAME: &str = "billbook_cli";

/// Script-mode command with its data directory pointed at `home`.
pub fn script_command(home: &Path) -> Command {
    let mut cmd = Command::cargo_bin(BIN_NAME).expect("binary exists");
    cmd.env("BILLBOOK_CLI_SCRIPT", "1")
        .env("BILLBOOK_HOME", home)
        .env("NO_COLOR", "1")
        .env_remove("RUST_LOG");
    cmd
}
