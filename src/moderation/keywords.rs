/// Terms that block a message without consulting the classifier.
pub const HARD_KEYWORDS: &[&str] = &["查档", "开户", "猎魔", "轰炸", "上分", "烟酒", "代付"];

/// First denylisted term contained in `text` (case-sensitive substring match).
pub fn find_hard_keyword(text: &str) -> Option<&'static str> {
    HARD_KEYWORDS.iter().copied().find(|k| text.contains(k))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matches_first_term_in_list_order() {
        assert_eq!(find_hard_keyword("专业代付 开户"), Some("开户"));
        assert_eq!(find_hard_keyword("轰炸机"), Some("轰炸"));
        assert_eq!(find_hard_keyword("hello"), None);
    }
}
