// Drives the compiled binary through a PTY: real event loop and crossterm
// input handling.
//
// Needs a TTY, so it is unix-only and ignored by default.
// Run with: `cargo test --test integration_min_session -- --ignored`.

#![cfg(unix)]

use std::time::Duration;

use expectrl::{spawn, Eof};

#[test]
#[ignore]
fn minimal_session_starts_and_exits() -> Result<(), Box<dyn std::error::Error>> {
    let bin = assert_cmd::cargo::cargo_bin("fastwrite");
    let cmd = format!("{} -t 15 -l english", bin.display());

    let mut p = spawn(cmd)?;
    std::thread::sleep(Duration::from_millis(200));

    p.send("the ")?;
    std::thread::sleep(Duration::from_millis(200));

    // ESC quits whether or not the summary is open
    p.send("\x1b")?;
    p.expect(Eof)?;
    Ok(())
}
