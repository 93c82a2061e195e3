//! Utility functions.

mod tasks;

pub use tasks::BackgroundTasks;

/// Parse a numeric Telegram user id from a command argument.
pub fn parse_user_id(arg: &str) -> Option<u64> {
    arg.split_whitespace().next()?.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_id_argument() {
        assert_eq!(parse_user_id(" 12345 extra"), Some(12345));
        assert_eq!(parse_user_id("@name"), None);
        assert_eq!(parse_user_id(""), None);
        assert_eq!(parse_user_id("-5"), None);
    }
}
