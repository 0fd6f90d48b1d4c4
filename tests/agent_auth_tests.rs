use actix_web::{http::StatusCode, test, HttpServer};
use chrono::Utc;
use ledgermind_auth::{
    create_agent_app, ChatMessage, ChatRequest, ChatResponse, CredentialStore, Credentials,
    SignedClient, Signer, Verifier, VerifyConfig, SIGNATURE_HEADER, TEST_MODE_HEADER,
};

const CLIENT_ID: &str = "e2e-runner";
const SECRET: &str = "integration-test-secret";
const CHAT_PATH: &str = "/agent/chat";

fn signer() -> Signer {
    Signer::new(Credentials::new(CLIENT_ID, SECRET))
}

fn verifier() -> Verifier {
    let mut store = CredentialStore::new();
    store.insert(CLIENT_ID, SECRET);
    Verifier::new(store, VerifyConfig::default())
}

fn ping_request() -> ChatRequest {
    ChatRequest {
        messages: vec![ChatMessage {
            role: "user".to_string(),
            content: "ping".to_string(),
        }],
    }
}

#[actix_web::test]
async fn signed_request_is_accepted_in_stub_mode() {
    let app = test::init_service(create_agent_app(verifier())).await;

    let signed = signer().sign_json("POST", CHAT_PATH, &ping_request()).unwrap();

    let mut req = test::TestRequest::post()
        .uri(CHAT_PATH)
        .insert_header(("content-type", "application/json"))
        .insert_header((TEST_MODE_HEADER, "stub"));
    for (name, value) in signed.headers.to_header_pairs() {
        req = req.insert_header((name, value));
    }
    let resp = test::call_service(&app, req.set_payload(signed.body).to_request()).await;

    assert_eq!(resp.status(), StatusCode::OK, "Signed request should pass");

    let body = test::read_body(resp).await;
    let json: ChatResponse = serde_json::from_slice(&body).expect("Failed to parse response");
    assert_eq!(json.mode, "stub");
    assert_eq!(json.reply, "ok");
}

#[actix_web::test]
async fn echo_mode_mirrors_the_last_user_message() {
    let app = test::init_service(create_agent_app(verifier())).await;

    let signed = signer().sign_json("POST", CHAT_PATH, &ping_request()).unwrap();

    let mut req = test::TestRequest::post()
        .uri(CHAT_PATH)
        .insert_header(("content-type", "application/json"))
        .insert_header((TEST_MODE_HEADER, "echo"));
    for (name, value) in signed.headers.to_header_pairs() {
        req = req.insert_header((name, value));
    }
    let resp = test::call_service(&app, req.set_payload(signed.body).to_request()).await;

    assert_eq!(resp.status(), StatusCode::OK);

    let body = test::read_body(resp).await;
    let json: ChatResponse = serde_json::from_slice(&body).expect("Failed to parse response");
    assert_eq!(json.reply, "ping");
}

#[actix_web::test]
async fn corrupted_signature_is_unauthorized() {
    let app = test::init_service(create_agent_app(verifier())).await;

    let signed = signer().sign_json("POST", CHAT_PATH, &ping_request()).unwrap();

    // Flip one character of the hex signature.
    let mut sig = signed.headers.signature.clone();
    let flipped = if sig.ends_with('0') { "1" } else { "0" };
    sig.replace_range(sig.len() - 1.., flipped);

    let req = test::TestRequest::post()
        .uri(CHAT_PATH)
        .insert_header(("content-type", "application/json"))
        .insert_header(("x-client-id", CLIENT_ID))
        .insert_header(("x-timestamp", signed.headers.timestamp_ms.to_string()))
        .insert_header((SIGNATURE_HEADER, sig))
        .set_payload(signed.body)
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    let body = test::read_body(resp).await;
    let body_str = std::str::from_utf8(&body).unwrap();
    assert!(body_str.contains("Invalid signature"));
}

#[actix_web::test]
async fn tampered_body_is_unauthorized() {
    let app = test::init_service(create_agent_app(verifier())).await;

    let signed = signer().sign_json("POST", CHAT_PATH, &ping_request()).unwrap();

    let mut req = test::TestRequest::post()
        .uri(CHAT_PATH)
        .insert_header(("content-type", "application/json"));
    for (name, value) in signed.headers.to_header_pairs() {
        req = req.insert_header((name, value));
    }
    // Transmit different bytes than were signed.
    let tampered = br#"{"messages":[{"role":"user","content":"pong"}]}"#.to_vec();
    let resp = test::call_service(&app, req.set_payload(tampered).to_request()).await;

    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn missing_auth_headers_is_bad_request() {
    let app = test::init_service(create_agent_app(verifier())).await;

    let req = test::TestRequest::post()
        .uri(CHAT_PATH)
        .insert_header(("content-type", "application/json"))
        .set_payload(serde_json::to_vec(&ping_request()).unwrap())
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn stale_timestamp_is_unauthorized() {
    let app = test::init_service(create_agent_app(verifier())).await;

    let stale_ts = Utc::now().timestamp_millis() - 400_000;
    let body = serde_json::to_vec(&ping_request()).unwrap();
    let signed = signer().sign_at("POST", CHAT_PATH, &body, stale_ts).unwrap();

    let mut req = test::TestRequest::post()
        .uri(CHAT_PATH)
        .insert_header(("content-type", "application/json"));
    for (name, value) in signed.headers.to_header_pairs() {
        req = req.insert_header((name, value));
    }
    let resp = test::call_service(&app, req.set_payload(signed.body).to_request()).await;

    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    let body = test::read_body(resp).await;
    let body_str = std::str::from_utf8(&body).unwrap();
    assert!(body_str.contains("Timestamp outside the accepted window"));
}

#[actix_web::test]
async fn unknown_client_gets_the_same_response_as_a_bad_signature() {
    let app = test::init_service(create_agent_app(verifier())).await;

    let stranger = Signer::new(Credentials::new("someone-else", SECRET));
    let signed = stranger.sign_json("POST", CHAT_PATH, &ping_request()).unwrap();

    let mut req = test::TestRequest::post()
        .uri(CHAT_PATH)
        .insert_header(("content-type", "application/json"));
    for (name, value) in signed.headers.to_header_pairs() {
        req = req.insert_header((name, value));
    }
    let resp = test::call_service(&app, req.set_payload(signed.body).to_request()).await;

    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    // Same body as the bad-signature case, so client ids cannot be probed.
    let body = test::read_body(resp).await;
    let body_str = std::str::from_utf8(&body).unwrap();
    assert!(body_str.contains("Invalid signature"));
}

#[actix_web::test]
async fn signed_client_round_trip_over_loopback() {
    let verifier = verifier();
    let server = HttpServer::new(move || create_agent_app(verifier.clone()))
        .workers(1)
        .bind(("127.0.0.1", 0))
        .expect("Failed to bind loopback server");
    let addr = server.addrs()[0];
    let server = server.run();
    let handle = server.handle();
    actix_web::rt::spawn(server);

    let client = SignedClient::new(format!("http://{addr}"), Credentials::new(CLIENT_ID, SECRET))
        .with_header(TEST_MODE_HEADER, "echo");

    let resp = client
        .post_json(CHAT_PATH, &ping_request())
        .await
        .expect("Signed request should transmit");
    assert_eq!(resp.status().as_u16(), 200);

    let json: ChatResponse = resp.json().await.expect("Failed to parse response");
    assert_eq!(json.reply, "ping");
    assert_eq!(json.mode, "echo");

    handle.stop(true).await;
}
