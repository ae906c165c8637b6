// Test fixtures - reusable test data
// Provides consistent posts and clocks across test files

#![allow(dead_code)]

use chrono::{DateTime, Local};
use publish_date::models::post::{Post, PostStatus};
use publish_date::utils::date::{parse_post_date, FixedClock};

/// Wednesday, Dec 4, 2024 at noon local time
pub fn now() -> DateTime<Local> {
    parse_post_date("2024-12-04 12:00").unwrap()
}

pub fn clock() -> FixedClock {
    FixedClock(now())
}

/// Sample posts for testing
pub mod posts {
    use super::*;

    /// Draft with no explicit date
    pub fn undated_draft() -> Post {
        Post::new("Undated draft")
    }

    /// Draft scheduled for tomorrow morning
    pub fn scheduled_draft() -> Post {
        Post::new("Scheduled draft").with_date("2024-12-05 10:00")
    }

    /// Scheduled post the server already accepted
    pub fn scheduled_future() -> Post {
        Post::new("Queued")
            .with_status(PostStatus::Future)
            .with_date("2024-12-20 08:30")
    }

    /// Draft given a historical date
    pub fn back_dated_draft() -> Post {
        Post::new("Back-dated draft")
            .with_date("2019-05-01 09:00")
            .with_modified("2024-12-03 17:00")
    }

    /// Live post with a historical date
    pub fn back_dated_published() -> Post {
        Post::new("Published long ago")
            .with_status(PostStatus::Publish)
            .with_date("2019-05-01 09:00")
            .with_modified("2024-12-03 17:00")
    }
}
