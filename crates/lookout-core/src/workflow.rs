//! GitHub Actions workflow-command logging.
//!
//! The runner interprets lines of the form `::command::data` in a step's
//! stdout. Plain lines show up as regular log output, so `info` is just a
//! println. Data must have `%`, CR, and LF percent-escaped or a multi-line
//! message would terminate the command early.

/// Log a plain informational line.
pub fn info(message: &str) {
    println!("{message}");
}

/// Log a debug line, visible when step debug logging is enabled.
pub fn debug(message: &str) {
    println!("::debug::{}", escape_data(message));
}

/// Log a notice annotation.
pub fn notice(message: &str) {
    println!("::notice::{}", escape_data(message));
}

/// Log a warning annotation.
pub fn warning(message: &str) {
    println!("::warning::{}", escape_data(message));
}

/// Log an error annotation. Does not change the step's exit status.
pub fn error(message: &str) {
    println!("::error::{}", escape_data(message));
}

fn escape_data(data: &str) -> String {
    data.replace('%', "%25")
        .replace('\r', "%0D")
        .replace('\n', "%0A")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escapes_percent_before_line_breaks() {
        assert_eq!(escape_data("50% done\nnext"), "50%25 done%0Anext");
    }

    #[test]
    fn escapes_carriage_returns() {
        assert_eq!(escape_data("a\r\nb"), "a%0D%0Ab");
    }

    #[test]
    fn plain_text_passes_through() {
        assert_eq!(escape_data("all good"), "all good");
    }
}
