use assert_cmd::Command;

pub fn stickyboard_cmd() -> Command {
    let mut cmd = Command::cargo_bin("stickyboard").unwrap();
    cmd.env_remove("STICKIES_ROOT");
    cmd.env_remove("RUST_LOG");
    cmd
}
