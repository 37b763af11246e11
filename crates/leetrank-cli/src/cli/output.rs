//! Console output helpers shared by all subcommands.
//!
//! Global flags are carried in environment variables so every module can
//! check them without threading a context through.

use serde::Serialize;

pub const ENV_JSON: &str = "LEETRANK_JSON";
pub const ENV_QUIET: &str = "LEETRANK_QUIET";

fn flag(key: &str) -> bool {
    std::env::var(key).map(|v| v == "1").unwrap_or(false)
}

/// `--json` was given.
pub fn is_json() -> bool {
    flag(ENV_JSON)
}

/// `--quiet` was given.
pub fn is_quiet() -> bool {
    flag(ENV_QUIET)
}

/// Print a value as pretty JSON on stdout.
pub fn print_json<T: Serialize + ?Sized>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(s) => println!("{s}"),
        Err(e) => eprintln!("  Error: failed to serialize output: {e}"),
    }
}

/// Print a progress line unless `--quiet` or `--json` is active.
pub fn progress(line: impl AsRef<str>) {
    if !is_quiet() && !is_json() {
        println!("{}", line.as_ref());
    }
}

/// Format a rank with thousands separators (`1234567` -> `1,234,567`).
pub fn format_rank(rank: u64) -> String {
    let digits = rank.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_rank() {
        assert_eq!(format_rank(0), "0");
        assert_eq!(format_rank(999), "999");
        assert_eq!(format_rank(1000), "1,000");
        assert_eq!(format_rank(123456), "123,456");
        assert_eq!(format_rank(1234567), "1,234,567");
    }
}
