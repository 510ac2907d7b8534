use std::io::{self, BufRead};

use sapper_core::{LineSource, MessageSink};

/// Reads player lines from stdin. EOF or a read failure ends the supply.
pub struct StdinSource;

impl LineSource for StdinSource {
    fn next_line(&mut self) -> Option<String> {
        let mut line = String::new();
        match io::stdin().lock().read_line(&mut line) {
            Ok(0) | Err(_) => None,
            Ok(_) => Some(line),
        }
    }
}

/// Writes board renderings and status lines to stdout.
pub struct StdoutSink;

impl MessageSink for StdoutSink {
    fn write_line(&mut self, line: &str) {
        println!("{line}");
    }
}
