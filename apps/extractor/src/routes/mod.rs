pub mod extract;
pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::state::AppState;

/// Largest accepted upload request (both documents together).
const MAX_UPLOAD_BYTES: usize = 25 * 1024 * 1024;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route("/api/v1/extract", post(extract::handle_extract))
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::{
        body::{to_bytes, Body},
        http::{Request, StatusCode},
    };
    use serde_json::Value;
    use tower::ServiceExt;

    use super::*;
    use crate::workflow::state::Grade;
    use crate::workflow::testing::{collaborators, ScriptedJudge, StubExtractor, StubOcr};
    use crate::workflow::{DocumentKind, Workflow};

    const BOUNDARY: &str = "extractor-test-boundary";

    enum Part<'a> {
        Text(&'a str, &'a str),
        File(&'a str, &'a str),
    }

    fn multipart_request(parts: &[Part<'_>]) -> Request<Body> {
        let mut body = String::new();
        for part in parts {
            body.push_str(&format!("--{BOUNDARY}\r\n"));
            match part {
                Part::Text(name, value) => body.push_str(&format!(
                    "Content-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n"
                )),
                Part::File(name, file_name) => body.push_str(&format!(
                    "Content-Disposition: form-data; name=\"{name}\"; filename=\"{file_name}\"\r\n\
                     Content-Type: application/pdf\r\n\r\n%PDF-1.4 sample\r\n"
                )),
            }
        }
        body.push_str(&format!("--{BOUNDARY}--\r\n"));

        Request::builder()
            .method("POST")
            .uri("/api/v1/extract")
            .header(
                "content-type",
                format!("multipart/form-data; boundary={BOUNDARY}"),
            )
            .body(Body::from(body))
            .unwrap()
    }

    fn router(ocr: &StubOcr, extractor: &StubExtractor, judge: &ScriptedJudge) -> Router {
        build_router(AppState {
            workflow: Arc::new(Workflow::new(collaborators(ocr, extractor, judge))),
        })
    }

    async fn json_body(response: axum::response::Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_health() {
        let app = router(
            &StubOcr::default(),
            &StubExtractor::default(),
            &ScriptedJudge::always_pass(),
        );
        let response = app
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(json_body(response).await["status"], "ok");
    }

    #[tokio::test]
    async fn test_extract_resume_only() {
        let (ocr, extractor, judge) =
            (StubOcr::default(), StubExtractor::default(), ScriptedJudge::always_pass());
        let response = router(&ocr, &extractor, &judge)
            .oneshot(multipart_request(&[
                Part::Text("mode", "resume_only"),
                Part::File("resume", "jane.pdf"),
            ]))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        assert_eq!(body["reflection_loop"], 1);
        assert_eq!(body["retried"], false);
        assert_eq!(body["final_verdicts"]["resume"]["grade"], "PASS");
        assert_eq!(body["resume_result"]["personal_info"]["full_name"], "Jane Doe");
        assert!(body.get("jd_result").is_none());
        assert_eq!(extractor.calls(DocumentKind::Resume), 1);
    }

    #[tokio::test]
    async fn test_extract_both_with_retry() {
        let (ocr, extractor) = (StubOcr::default(), StubExtractor::default());
        let judge = ScriptedJudge::scripted(&[Grade::Pass], &[Grade::Fail]);
        let response = router(&ocr, &extractor, &judge)
            .oneshot(multipart_request(&[
                Part::Text("mode", "both"),
                Part::File("resume", "jane.pdf"),
                Part::File("jd", "backend.pdf"),
            ]))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        assert_eq!(body["reflection_loop"], 2);
        assert_eq!(body["retried"], true);
        assert_eq!(body["judge_history"].as_array().unwrap().len(), 4);
        assert_eq!(body["final_verdicts"]["jd"]["grade"], "PASS");
    }

    #[tokio::test]
    async fn test_missing_required_file_is_rejected_before_ocr() {
        let (ocr, extractor, judge) =
            (StubOcr::default(), StubExtractor::default(), ScriptedJudge::always_pass());
        let response = router(&ocr, &extractor, &judge)
            .oneshot(multipart_request(&[
                Part::Text("mode", "resume_only"),
                Part::File("jd", "backend.pdf"),
            ]))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(json_body(response).await["error"]["code"], "VALIDATION_ERROR");
        assert_eq!(ocr.calls(), 0);
    }

    #[tokio::test]
    async fn test_unknown_mode_is_rejected() {
        let app = router(
            &StubOcr::default(),
            &StubExtractor::default(),
            &ScriptedJudge::always_pass(),
        );
        let response = app
            .oneshot(multipart_request(&[
                Part::Text("mode", "everything"),
                Part::File("resume", "jane.pdf"),
            ]))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_judge_outage_surfaces_as_bad_gateway() {
        let (ocr, extractor, judge) =
            (StubOcr::default(), StubExtractor::default(), ScriptedJudge::unavailable());
        let response = router(&ocr, &extractor, &judge)
            .oneshot(multipart_request(&[
                Part::Text("mode", "jd_only"),
                Part::File("jd", "backend.pdf"),
            ]))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
        assert_eq!(json_body(response).await["error"]["code"], "JUDGE_UNAVAILABLE");
    }
}
