use std::fmt;
use serde::{Deserialize, Serialize};


#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Emotion {
    Anger,
    Disgust,
    Fear,
    Joy,
    Sadness,
}

impl Emotion {
    // response template order
    pub const ALL: [Emotion; 5] = [Emotion::Anger, Emotion::Disgust, Emotion::Fear, Emotion::Joy, Emotion::Sadness];

    pub fn label(&self) -> &'static str {
        match self {
            Emotion::Anger => "anger",
            Emotion::Disgust => "disgust",
            Emotion::Fear => "fear",
            Emotion::Joy => "joy",
            Emotion::Sadness => "sadness",
        }
    }
}

impl fmt::Display for Emotion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}


#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Default)]
pub struct EmotionScores {
    pub anger: f64,
    pub disgust: f64,
    pub fear: f64,
    pub joy: f64,
    pub sadness: f64,
}

impl EmotionScores {
    pub fn score(&self, emotion: Emotion) -> f64 {
        match emotion {
            Emotion::Anger => self.anger,
            Emotion::Disgust => self.disgust,
            Emotion::Fear => self.fear,
            Emotion::Joy => self.joy,
            Emotion::Sadness => self.sadness,
        }
    }

    /// Highest scoring emotion. Ties go to the earlier emotion in `Emotion::ALL`;
    /// NaN never wins. `None` only when every score is NaN.
    pub fn dominant_emotion(&self) -> Option<Emotion> {
        let mut dominant: Option<(Emotion, f64)> = None;
        for emotion in Emotion::ALL {
            let score = self.score(emotion);
            if score.is_nan() {
                continue;
            }
            match dominant {
                Some((_, best)) if score <= best => {},
                _ => dominant = Some((emotion, score)),
            }
        }
        dominant.map(|(emotion, _)| emotion)
    }
}


/// Outcome of one classification. Both fields are `None` when the text
/// could not be classified.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Default)]
pub struct EmotionDetection {
    pub scores: Option<EmotionScores>,
    pub dominant_emotion: Option<Emotion>,
}

impl EmotionDetection {
    pub fn unclassified() -> Self {
        Self::default()
    }
}

impl From<Option<EmotionScores>> for EmotionDetection {
    fn from(scores: Option<EmotionScores>) -> Self {
        let Some(scores) = scores else {
            return Self::unclassified();
        };
        match scores.dominant_emotion() {
            Some(dominant) => Self { scores: Some(scores), dominant_emotion: Some(dominant) },
            None => Self::unclassified(),
        }
    }
}
