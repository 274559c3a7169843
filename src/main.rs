#![windows_subsystem = "windows"]
use std::io::{self, BufRead, Write};
use std::panic::AssertUnwindSafe;

mod model;
mod protocol;
mod services;
mod store;
mod theme;

fn main() {
    let stdin = io::stdin();
    let mut stdout = io::stdout();

    let mut session = protocol::Session::new();

    for line in stdin.lock().lines() {
        let line = match line {
            Ok(l) => l,
            Err(_) => continue,
        };

        if line.trim().is_empty() {
            continue;
        }

        let result =
            std::panic::catch_unwind(AssertUnwindSafe(|| protocol::handle(&line, &mut session)));

        let response = match result {
            Ok(resp) => resp,
            Err(_) => serde_json::json!({
                "status": "error",
                "message": "internal core error"
            })
            .to_string(),
        };

        if writeln!(stdout, "{response}").is_err() {
            break;
        }

        // Store updates triggered by the command go out after its response,
        // so the subscriber already holds the subscription id they reference.
        for event in session.events.drain() {
            if writeln!(stdout, "{event}").is_err() {
                break;
            }
        }

        let _ = stdout.flush();
    }
}
