use crate::service::common_structs::EmotionDetection;
use crate::utilities::format_score;

pub const INVALID_TEXT_MESSAGE: &str = "Invalid text! Please try again.";
pub const SERVICE_UNAVAILABLE_MESSAGE: &str = "Emotion detection is unavailable right now. Please try again later.";


/// Renders a detection as the sentence returned to the user, or
/// `INVALID_TEXT_MESSAGE` when there is no dominant emotion.
pub fn format_emotion_response(detection: &EmotionDetection) -> String {
    let (Some(scores), Some(dominant_emotion)) = (detection.scores, detection.dominant_emotion) else {
        return INVALID_TEXT_MESSAGE.to_owned();
    };

    format!(
        "For the given statement, the system response is 'anger': {}, 'disgust': {}, 'fear': {}, 'joy': {}, and 'sadness': {}. The dominant emotion is {}.",
        format_score(scores.anger),
        format_score(scores.disgust),
        format_score(scores.fear),
        format_score(scores.joy),
        format_score(scores.sadness),
        dominant_emotion,
    )
}
