use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use emotion_detection::formatter::{format_emotion_response, INVALID_TEXT_MESSAGE, SERVICE_UNAVAILABLE_MESSAGE};
use emotion_detection::service::CommonService;

const INDEX_PAGE: &str = include_str!("../static/index.html");
const TEXT_TO_ANALYZE: &str = "textToAnalyze";


// first value wins when the key is repeated
fn first_text_to_analyze(params: Vec<(String, String)>) -> Option<String> {
    params.into_iter()
        .find(|(key, _)| key == TEXT_TO_ANALYZE)
        .map(|(_, value)| value)
}


pub async fn emotion_detector(
    State(service): State<CommonService>,
    Query(params): Query<Vec<(String, String)>>
) -> Response {

    let Some(text_to_analyze) = first_text_to_analyze(params) else {
        tracing::info!("textToAnalyze not provided");
        return INVALID_TEXT_MESSAGE.into_response();
    };

    match service.detect_emotion(&text_to_analyze).await {
        Ok(detection) => format_emotion_response(&detection).into_response(),
        Err(error) => {
            tracing::error!(error = ?error, "error detecting emotion");
            (StatusCode::BAD_GATEWAY, SERVICE_UNAVAILABLE_MESSAGE).into_response()
        },
    }
}


pub async fn render_index_page() -> Html<&'static str> {
    Html(INDEX_PAGE)
}


#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use anyhow::{bail, Result};
    use async_trait::async_trait;
    use axum::body::Body;
    use axum::http::{header::CONTENT_TYPE, Request, StatusCode};
    use emotion_detection::service::common_structs::EmotionScores;
    use emotion_detection::service::{CommonService, EmotionClassifier};
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    use crate::build_router;

    // Returns fixed scores for any non-empty text, nothing for empty text.
    struct MockClassifier {
        scores: EmotionScores,
        calls: AtomicUsize,
    }

    #[async_trait]
    impl EmotionClassifier for MockClassifier {
        async fn classify(&self, text: &str) -> Result<Option<EmotionScores>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if text.is_empty() {
                return Ok(None);
            }
            Ok(Some(self.scores))
        }
    }

    struct FailingClassifier;

    #[async_trait]
    impl EmotionClassifier for FailingClassifier {
        async fn classify(&self, _text: &str) -> Result<Option<EmotionScores>> {
            bail!("connection refused")
        }
    }

    fn happy_classifier() -> Arc<MockClassifier> {
        Arc::new(MockClassifier {
            scores: EmotionScores { anger: 0.01, disgust: 0.01, fear: 0.01, joy: 0.95, sadness: 0.02 },
            calls: AtomicUsize::new(0),
        })
    }

    async fn get(service: CommonService, uri: &str) -> (StatusCode, String) {
        let response = build_router(service)
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        (status, String::from_utf8(bytes.to_vec()).unwrap())
    }

    #[tokio::test]
    async fn formats_detected_emotions() {
        let service = CommonService::new(happy_classifier());
        let (status, body) = get(service, "/emotionDetector?textToAnalyze=I%20am%20so%20happy%20today").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body,
            "For the given statement, the system response is 'anger': 0.01, 'disgust': 0.01, 'fear': 0.01, 'joy': 0.95, and 'sadness': 0.02. The dominant emotion is joy."
        );
    }

    #[tokio::test]
    async fn empty_text_is_invalid() {
        let classifier = happy_classifier();
        let service = CommonService::new(classifier.clone());
        let (status, body) = get(service, "/emotionDetector?textToAnalyze=").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "Invalid text! Please try again.");
        assert_eq!(classifier.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn missing_parameter_skips_classifier() {
        let classifier = happy_classifier();
        let service = CommonService::new(classifier.clone());
        let (status, body) = get(service, "/emotionDetector").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "Invalid text! Please try again.");
        assert_eq!(classifier.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn repeated_parameter_uses_first_value() {
        let classifier = happy_classifier();
        let service = CommonService::new(classifier.clone());
        let (status, body) = get(service, "/emotionDetector?textToAnalyze=happy&textToAnalyze=sad").await;

        assert_eq!(status, StatusCode::OK);
        assert!(body.ends_with("The dominant emotion is joy."));
        assert_eq!(classifier.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn first_value_is_taken_even_when_empty() {
        let service = CommonService::new(happy_classifier());
        let (status, body) = get(service, "/emotionDetector?other=1&textToAnalyze=&textToAnalyze=sad").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "Invalid text! Please try again.");
    }

    #[tokio::test]
    async fn classifier_failure_is_bad_gateway() {
        let service = CommonService::new(Arc::new(FailingClassifier));
        let (status, body) = get(service, "/emotionDetector?textToAnalyze=hello").await;

        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert_eq!(body, "Emotion detection is unavailable right now. Please try again later.");
    }

    #[tokio::test]
    async fn repeated_calls_give_same_answer() {
        let service = CommonService::new(happy_classifier());
        let (_, first) = get(service.clone(), "/emotionDetector?textToAnalyze=sunny+day").await;
        let (_, second) = get(service, "/emotionDetector?textToAnalyze=sunny+day").await;

        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn serves_landing_page() {
        let response = build_router(CommonService::new(happy_classifier()))
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let content_type = response.headers().get(CONTENT_TYPE).unwrap().to_str().unwrap().to_owned();
        assert!(content_type.starts_with("text/html"));

        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        assert!(String::from_utf8_lossy(&bytes).contains("/emotionDetector"));
    }
}
