//! Aggregation of Sightengine per-frame scores into a single verdict.
//!
//! The upstream response is never trusted: a missing or malformed
//! `data.frames` collection is treated as empty, and a frame without a
//! `type.ai_generated` score still counts toward the frame total with a
//! score of zero.

use serde_json::Value;

/// Mean per-frame score above which a video is classified as AI-generated.
/// Strict inequality: a mean of exactly 0.5 is not a positive verdict.
pub const AI_SCORE_THRESHOLD: f64 = 0.5;

/// Aggregate statistics over the frames in one upstream response.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameStats {
    /// Arithmetic mean of per-frame AI-generated scores; 0 with no frames.
    pub confidence: f64,
    /// Number of frame entries in the response, regardless of their content.
    pub frames_checked: usize,
    /// Whether `confidence` strictly exceeds [`AI_SCORE_THRESHOLD`].
    pub ai_detected: bool,
}

/// Summarize an upstream check response.
pub fn summarize(response: &Value) -> FrameStats {
    let frames = response
        .pointer("/data/frames")
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or(&[]);

    let confidence = if frames.is_empty() {
        0.0
    } else {
        let total: f64 = frames.iter().map(frame_score).sum();
        total / frames.len() as f64
    };

    FrameStats {
        confidence,
        frames_checked: frames.len(),
        ai_detected: confidence > AI_SCORE_THRESHOLD,
    }
}

fn frame_score(frame: &Value) -> f64 {
    frame
        .pointer("/type/ai_generated")
        .and_then(Value::as_f64)
        .unwrap_or(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn response_with_scores(scores: &[f64]) -> Value {
        let frames: Vec<Value> = scores
            .iter()
            .map(|s| json!({"type": {"ai_generated": s}}))
            .collect();
        json!({"status": "success", "data": {"frames": frames}})
    }

    #[test]
    fn no_frames_yields_zero_confidence_and_negative_verdict() {
        let stats = summarize(&response_with_scores(&[]));
        assert_eq!(stats.confidence, 0.0);
        assert_eq!(stats.frames_checked, 0);
        assert!(!stats.ai_detected);
    }

    #[test]
    fn missing_frames_collection_treated_as_empty() {
        for response in [
            json!({}),
            json!({"data": {}}),
            json!({"data": {"frames": "not-an-array"}}),
            json!({"status": "failure", "error": {"message": "no media"}}),
        ] {
            let stats = summarize(&response);
            assert_eq!(stats.frames_checked, 0);
            assert_eq!(stats.confidence, 0.0);
            assert!(!stats.ai_detected);
        }
    }

    #[test]
    fn mean_of_exactly_half_is_not_detected() {
        let stats = summarize(&response_with_scores(&[0.4, 0.6]));
        assert_eq!(stats.confidence, 0.5);
        assert!(!stats.ai_detected);
    }

    #[test]
    fn mean_above_half_is_detected() {
        let stats = summarize(&response_with_scores(&[0.9, 0.8, 0.7]));
        assert!(stats.confidence > 0.5);
        assert!(stats.ai_detected);
        assert_eq!(stats.frames_checked, 3);
    }

    #[test]
    fn frames_without_scores_still_count() {
        let response = json!({
            "data": {
                "frames": [
                    {"type": {"ai_generated": 0.9}},
                    {"type": {}},
                    {"position": 2},
                ]
            }
        });
        let stats = summarize(&response);
        assert_eq!(stats.frames_checked, 3);
        assert!((stats.confidence - 0.3).abs() < 1e-9);
        assert!(!stats.ai_detected);
    }

    #[test]
    fn single_high_score() {
        let stats = summarize(&response_with_scores(&[0.99]));
        assert_eq!(stats.frames_checked, 1);
        assert!(stats.ai_detected);
    }
}
