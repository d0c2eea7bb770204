// Copyright 2026 the Overplay Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Active-video selection.
//!
//! A page may carry many `<video>` elements: previews, ads, hidden players
//! left behind by client-side navigation. [`locate`] picks the one the
//! overlay should act on:
//!
//! 1. the first element that is playing and has loaded metadata;
//! 2. otherwise the first element with loaded metadata and a nonzero
//!    playback position (a video the viewer paused);
//! 3. otherwise nothing.
//!
//! A freshly inserted, never-started element is deliberately not a
//! candidate. The function has no side effects and is cheap enough to run
//! on every poll tick and every input event.

use crate::host::{HAVE_NOTHING, MediaElement};

/// Why a media element was chosen.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Priority {
    /// Playing with metadata loaded.
    Playing,
    /// Paused with metadata loaded and playback progress.
    Started,
}

/// Classifies a single element, or returns `None` if it is not a candidate.
#[must_use]
pub fn priority<M: MediaElement>(media: &M) -> Option<Priority> {
    if media.ready_state() == HAVE_NOTHING {
        return None;
    }
    if !media.is_paused() {
        Some(Priority::Playing)
    } else if media.current_time() > 0.0 {
        Some(Priority::Started)
    } else {
        None
    }
}

/// Returns the active element among `media`, which must be in document order.
#[must_use]
pub fn locate<M: MediaElement>(media: &[M]) -> Option<&M> {
    media
        .iter()
        .find(|m| priority(*m) == Some(Priority::Playing))
        .or_else(|| {
            media
                .iter()
                .find(|m| priority(*m) == Some(Priority::Started))
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::MediaId;
    use crate::test_host::FakeVideo;

    fn ids(found: Option<&FakeVideo>) -> Option<MediaId> {
        found.map(MediaElement::id)
    }

    #[test]
    fn empty_page_has_no_active_video() {
        let media: [FakeVideo; 0] = [];
        assert!(locate(&media).is_none(), "nothing to pick");
    }

    #[test]
    fn playing_beats_started_regardless_of_order() {
        let started = FakeVideo::new(1).loaded().at(42.0);
        let playing = FakeVideo::new(2).loaded().playing();
        let media = [started, playing];
        assert_eq!(ids(locate(&media)), Some(MediaId(2)), "playing wins");
    }

    #[test]
    fn first_in_document_order_wins_ties() {
        let media = [
            FakeVideo::new(1).loaded().playing(),
            FakeVideo::new(2).loaded().playing(),
        ];
        assert_eq!(ids(locate(&media)), Some(MediaId(1)), "first playing");

        let media = [
            FakeVideo::new(3).loaded().at(1.0),
            FakeVideo::new(4).loaded().at(9.0),
        ];
        assert_eq!(ids(locate(&media)), Some(MediaId(3)), "first started");
    }

    #[test]
    fn unloaded_elements_never_qualify() {
        let media = [FakeVideo::new(1).playing().at(3.0)];
        assert!(locate(&media).is_none(), "readyState 0 is ignored even when playing");
    }

    #[test]
    fn paused_video_stays_active_only_with_progress() {
        let video = FakeVideo::new(7).loaded().playing();
        let media = [video.clone()];
        assert_eq!(ids(locate(&media)), Some(MediaId(7)), "playing");

        video.pause();
        assert!(locate(&media).is_none(), "paused at 0s is not active");

        video.set_current_time(0.5);
        assert_eq!(ids(locate(&media)), Some(MediaId(7)), "paused with progress");
    }

    #[test]
    fn priority_classification() {
        assert_eq!(priority(&FakeVideo::new(1)), None, "unloaded");
        assert_eq!(priority(&FakeVideo::new(1).loaded()), None, "unstarted");
        assert_eq!(
            priority(&FakeVideo::new(1).loaded().playing()),
            Some(Priority::Playing),
            "playing"
        );
        assert_eq!(
            priority(&FakeVideo::new(1).loaded().at(2.0)),
            Some(Priority::Started),
            "started"
        );
    }
}
