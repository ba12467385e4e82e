//! Terminal title escape sequences.

use std::fs::OpenOptions;
use std::io::{self, Write};

const TTY_PATH: &str = "/dev/tty";

/// Drop control characters so the title cannot terminate the escape early.
pub fn sanitize(title: &str) -> String {
    title.chars().filter(|c| !c.is_control()).collect()
}

/// `ESC ] 0 ; title BEL`: sets both icon name and window title.
pub fn osc_title(title: &str) -> String {
    format!("\x1b]0;{}\x07", sanitize(title))
}

pub fn write_title<W: Write>(mut out: W, title: &str) -> io::Result<()> {
    out.write_all(osc_title(title).as_bytes())?;
    out.flush()
}

/// Write to the controlling terminal, or stderr when there is none.
pub fn set_title(title: &str) -> io::Result<()> {
    match OpenOptions::new().write(true).open(TTY_PATH) {
        Ok(tty) => write_title(tty, title),
        Err(e) => {
            tracing::debug!(error = %e, "no controlling terminal, writing to stderr");
            write_title(io::stderr().lock(), title)
        }
    }
}
