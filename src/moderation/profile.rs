//! One-time avatar and bio audit of a user.

use std::sync::Arc;

use tracing::{info, warn};

use super::classifier::{ContentClassifier, PROFILE_POLICY};
use super::message::Sender;
use super::ports::ChatPlatform;
use super::verdict::Violation;

#[derive(Clone)]
pub struct ProfileAuditor {
    platform: Arc<dyn ChatPlatform>,
    classifier: ContentClassifier,
}

impl ProfileAuditor {
    pub fn new(platform: Arc<dyn ChatPlatform>, classifier: ContentClassifier) -> Self {
        Self {
            platform,
            classifier,
        }
    }

    /// Avatar first; the bio is only checked when the avatar is clean or missing.
    pub async fn audit(&self, sender: &Sender) -> Option<Violation> {
        match self.platform.get_avatar(sender.id).await {
            Ok(Some(avatar)) => {
                if self.classifier.classify_image(&avatar).await {
                    info!("Avatar of {} flagged", sender.id);
                    return Some(Violation::Avatar);
                }
            }
            Ok(None) => {}
            Err(e) => warn!("Avatar lookup for {} failed: {}", sender.id, e),
        }

        let bio = match self.platform.get_user_bio(sender.id).await {
            Ok(bio) => bio.unwrap_or_default(),
            Err(e) => {
                warn!("Bio lookup for {} failed: {}", sender.id, e);
                String::new()
            }
        };

        if self
            .classifier
            .classify_text(&profile_text(sender, &bio), PROFILE_POLICY)
            .await
        {
            info!("Bio of {} flagged", sender.id);
            return Some(Violation::Bio);
        }

        None
    }
}

fn profile_text(sender: &Sender, bio: &str) -> String {
    format!(
        "Nick: {} {}\nBio: {}",
        sender.first_name,
        sender.last_name.as_deref().unwrap_or_default(),
        bio
    )
}
