use assert_cmd::Command;

/// A `counter_cli` command that is not affected by the environment the tests run in.
pub fn counter_cli() -> Command {
    let mut cmd = Command::cargo_bin("counter_cli").unwrap();
    cmd.env_remove("COUNTER_INITIAL");
    cmd
}
