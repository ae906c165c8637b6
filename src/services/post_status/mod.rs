// Post status service
// Date predicates over a post and the publish status they resolve to

use crate::models::post::{Post, PostStatus};
use crate::utils::date::Clock;

/// Classifies a post's publish date. `None` posts are never dated or published.
#[cfg_attr(test, mockall::automock)]
pub trait PostClassifier {
    /// Publish date lies in the future
    fn is_future_dated<'a>(&self, post: Option<&'a Post>) -> bool;
    /// Publish date was set earlier than the post was last touched
    fn is_back_dated<'a>(&self, post: Option<&'a Post>) -> bool;
    fn is_published<'a>(&self, post: Option<&'a Post>) -> bool;
}

/// Classifier comparing post timestamps against a clock
#[derive(Debug, Clone, Default)]
pub struct DateClassifier<C> {
    clock: C,
}

impl<C: Clock> DateClassifier<C> {
    pub fn new(clock: C) -> Self {
        Self { clock }
    }
}

impl<C: Clock> PostClassifier for DateClassifier<C> {
    fn is_future_dated<'a>(&self, post: Option<&'a Post>) -> bool {
        post.and_then(Post::publish_date)
            .map_or(false, |date| date > self.clock.now())
    }

    fn is_back_dated<'a>(&self, post: Option<&'a Post>) -> bool {
        let Some(post) = post else {
            return false;
        };
        let Some(date) = post.publish_date() else {
            return false;
        };
        let reference = post.modified_date().unwrap_or_else(|| self.clock.now());
        date < reference
    }

    fn is_published<'a>(&self, post: Option<&'a Post>) -> bool {
        let Some(post) = post else {
            return false;
        };
        match post.status {
            PostStatus::Publish | PostStatus::Private => true,
            // A scheduled post whose date has passed has gone live
            PostStatus::Future => post
                .publish_date()
                .map_or(false, |date| date <= self.clock.now()),
            _ => false,
        }
    }
}

/// What the collapsed header says about the post
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PublishStatus {
    Scheduled,
    Schedule,
    Published,
    Backdate,
    PublishImmediately,
}

impl PublishStatus {
    pub const ALL: [PublishStatus; 5] = [
        PublishStatus::Scheduled,
        PublishStatus::Schedule,
        PublishStatus::Published,
        PublishStatus::Backdate,
        PublishStatus::PublishImmediately,
    ];

    /// Pick the status in priority order: scheduled states win over
    /// back-dated ones, and "published" only qualifies a dated post.
    pub fn resolve(is_future_dated: bool, is_back_dated: bool, is_published: bool) -> Self {
        match (is_future_dated, is_back_dated, is_published) {
            (true, _, true) => PublishStatus::Scheduled,
            (true, _, false) => PublishStatus::Schedule,
            (false, true, true) => PublishStatus::Published,
            (false, true, false) => PublishStatus::Backdate,
            (false, false, _) => PublishStatus::PublishImmediately,
        }
    }

    pub fn classify(classifier: &dyn PostClassifier, post: Option<&Post>) -> Self {
        Self::resolve(
            classifier.is_future_dated(post),
            classifier.is_back_dated(post),
            classifier.is_published(post),
        )
    }

    /// Untranslated label
    pub fn label(&self) -> &'static str {
        match self {
            PublishStatus::Scheduled => "Scheduled",
            PublishStatus::Schedule => "Schedule",
            PublishStatus::Published => "Published",
            PublishStatus::Backdate => "Backdate",
            PublishStatus::PublishImmediately => "Publish Immediately",
        }
    }
}
