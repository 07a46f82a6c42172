use simroam_app::App;
use simroam_client::{ClientConfig, PlatformClient};

#[tokio::main]
async fn main() {
    simroam_observability::init();

    let config = ClientConfig::from_env();
    tracing::info!(base_url = %config.base_url, "connecting to platform backend");

    let client = PlatformClient::new(config);
    let app = App::new(client.clone(), client.clone());

    let resolver_task = app.start();
    let refresh_task = client.spawn_token_refresh();

    let mut snapshots = app.subscribe();
    let watcher = tokio::spawn(async move {
        while snapshots.changed().await.is_ok() {
            let snapshot = snapshots.borrow_and_update().clone();
            tracing::info!(
                state = ?snapshot.state(),
                admin = snapshot.is_admin(),
                "auth state changed"
            );
        }
    });

    tokio::signal::ctrl_c()
        .await
        .expect("failed to listen for shutdown signal");
    tracing::info!("shutting down");

    watcher.abort();
    refresh_task.abort();
    resolver_task.abort();
}
