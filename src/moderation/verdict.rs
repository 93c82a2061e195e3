use std::fmt;

/// Why a message was blocked. Renders as the tag shown in the group notice.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Violation {
    ContactCard,
    HardKeyword(&'static str),
    Avatar,
    Bio,
    TextContent,
    ImageContent,
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ContactCard => f.write_str("发送名片"),
            Self::HardKeyword(term) => write!(f, "硬关键词[{term}]"),
            Self::Avatar => f.write_str("头像违规"),
            Self::Bio => f.write_str("Bio广告"),
            Self::TextContent => f.write_str("文本内容"),
            Self::ImageContent => f.write_str("图片内容"),
        }
    }
}

/// Pipeline result. With first-hit short-circuit there is at most one reason.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Verdict {
    pub violated: bool,
    pub reasons: Vec<Violation>,
}

impl Verdict {
    pub fn first(&self) -> Option<&Violation> {
        self.reasons.first()
    }
}

impl From<Option<Violation>> for Verdict {
    fn from(hit: Option<Violation>) -> Self {
        match hit {
            Some(v) => Self {
                violated: true,
                reasons: vec![v],
            },
            None => Self::default(),
        }
    }
}
