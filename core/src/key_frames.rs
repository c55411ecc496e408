//! Key frame truncation
//!
//! Key frames are bit offsets into the frame stream. Any rewrite that changes
//! a frame's encoded length invalidates every offset after the first, so only
//! the first key frame survives.

use anonymiser_shared::KeyFrame;

/// Keep only the first key frame, returning how many were dropped
///
/// An empty list stays empty.
pub fn truncate_key_frames(key_frames: &mut Vec<KeyFrame>) -> usize {
    let dropped = key_frames.len().saturating_sub(1);
    key_frames.truncate(1);
    if dropped > 0 {
        tracing::debug!(dropped, "dropped stale key frames");
    }
    dropped
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::key_frames;

    #[test]
    fn test_keeps_first() {
        let mut frames = key_frames(4);
        let first = frames[0].clone();
        assert_eq!(truncate_key_frames(&mut frames), 3);
        assert_eq!(frames, vec![first]);
    }

    #[test]
    fn test_idempotent() {
        let mut frames = key_frames(3);
        truncate_key_frames(&mut frames);
        let once = frames.clone();
        assert_eq!(truncate_key_frames(&mut frames), 0);
        assert_eq!(frames, once);
        assert_eq!(frames.len(), 1);
    }

    #[test]
    fn test_empty_stays_empty() {
        let mut frames = Vec::new();
        assert_eq!(truncate_key_frames(&mut frames), 0);
        assert!(frames.is_empty());
    }
}
