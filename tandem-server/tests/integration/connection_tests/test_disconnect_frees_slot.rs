use std::time::Duration;
use tandem_core::ServerEvent;
use tandem_server::ServerConfig;

use crate::integration::init_tracing;
use crate::utils::{TestClient, spawn_server};

#[tokio::test]
async fn test_disconnect_frees_slot() {
    init_tracing();

    let addr = spawn_server(ServerConfig::default())
        .await
        .expect("Server failed to start");

    let mut a = TestClient::connect(addr).await.unwrap();
    a.join("solo").await.unwrap();
    assert_eq!(a.recv().await.unwrap(), ServerEvent::Created);

    // Dropping the last member discards the room
    a.close().await.unwrap();
    tokio::time::sleep(Duration::from_millis(200)).await;

    let mut b = TestClient::connect(addr).await.unwrap();
    b.join("solo").await.unwrap();
    assert_eq!(b.recv().await.unwrap(), ServerEvent::Created);

    b.close().await.unwrap();
}
