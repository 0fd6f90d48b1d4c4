use actix_web::HttpServer;
use ledgermind_auth::{create_agent_app, CredentialStore, Credentials, Verifier, VerifyConfig};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Initialize logger (make sure to run with RUST_LOG=info, for example)
    env_logger::init();

    let credentials = Credentials::from_env();
    if !credentials.has_secret() {
        eprintln!("AGENT_HMAC_SECRET is not set; all signed requests will be rejected");
    }
    let store = CredentialStore::with_credentials(&credentials);
    let verifier = Verifier::new(store, VerifyConfig::from_env());

    println!("Agent verifier running at http://127.0.0.1:8080");

    HttpServer::new(move || create_agent_app(verifier.clone()))
        .bind("127.0.0.1:8080")?
        .run()
        .await
}
