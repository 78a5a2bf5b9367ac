mod support;

use support::backend::StubBackend;

use ckd_predictor::config::BackendUrl;
use ckd_predictor::prediction::api::MAX_PREDICTION_RESPONSE_BYTES;
use ckd_predictor::prediction::{
    FormInput, HttpPredictionBackend, PredictError, PredictionBackend,
};

fn form() -> FormInput {
    FormInput {
        sg: "1.02".into(),
        al: "3".into(),
        sc: "1.2".into(),
        hemo: "13.5".into(),
        pcv: "40".into(),
        htn: "1".into(),
    }
}

fn backend_for(url: &str) -> HttpPredictionBackend {
    HttpPredictionBackend::new(&BackendUrl::parse(url).expect("valid stub url"))
}

#[test]
fn posts_form_as_json_and_decodes_result() {
    let stub = StubBackend::respond(
        "200 OK",
        r#"{"data":{"classification":"1"},"probability":0.12}"#,
    );
    let result = backend_for(&stub.url).predict(&form()).expect("prediction");
    assert!(!result.has_ckd());
    assert_eq!(result.probability, 0.12);

    let request = stub.take_request();
    assert!(request.starts_with("POST /api/ckd/predict HTTP/1.1"));
    assert!(
        request
            .lines()
            .any(|line| line.eq_ignore_ascii_case("content-type: application/json"))
    );
    let (_, body) = request.split_once("\r\n\r\n").expect("request body");
    let sent: serde_json::Value = serde_json::from_str(body).expect("json body");
    assert_eq!(sent, serde_json::to_value(form()).expect("form json"));
}

#[test]
fn error_status_keeps_code_and_body() {
    let stub = StubBackend::respond("500 Internal Server Error", "boom");
    match backend_for(&stub.url).predict(&form()) {
        Err(PredictError::Status { code, body }) => {
            assert_eq!(code, 500);
            assert_eq!(body, "boom");
        }
        other => panic!("unexpected outcome: {other:?}"),
    }
}

#[test]
fn oversized_response_is_refused() {
    let stub = StubBackend::reply(format!(
        "HTTP/1.1 200 OK\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
        MAX_PREDICTION_RESPONSE_BYTES + 1
    ));
    let err = backend_for(&stub.url)
        .predict(&form())
        .expect_err("too large");
    assert!(matches!(err, PredictError::ResponseTooLarge(_)), "{err}");
}

#[test]
fn unreachable_backend_is_a_transport_error() {
    let err = backend_for(&StubBackend::unreachable_url())
        .predict(&form())
        .expect_err("nothing listening");
    assert!(matches!(err, PredictError::Transport(_)), "{err}");
}
