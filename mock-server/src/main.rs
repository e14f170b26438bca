use mock_server::ApiKey;
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> Result<(), std::io::Error> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let port = std::env::var("PORT").unwrap_or_else(|_| "3000".to_string());
    let client_id =
        std::env::var("FDB_MOCK_CLIENT_ID").unwrap_or_else(|_| "test-client".to_string());
    let client_secret =
        std::env::var("FDB_MOCK_CLIENT_SECRET").unwrap_or_else(|_| "test-secret".to_string());

    let addr = format!("127.0.0.1:{port}");
    let listener = TcpListener::bind(&addr).await?;
    log::info!("listening on {addr}{}", mock_server::API_ROOT);
    mock_server::run(listener, ApiKey::new(&client_id, &client_secret)).await
}
