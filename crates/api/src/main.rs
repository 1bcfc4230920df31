use almacen_auth::UserDirectory;

#[tokio::main]
async fn main() {
    almacen_observability::init();

    let admin_user = std::env::var("ALMACEN_ADMIN_USER").unwrap_or_else(|_| "admin".to_string());
    let admin_password = std::env::var("ALMACEN_ADMIN_PASSWORD").unwrap_or_else(|_| {
        tracing::warn!("ALMACEN_ADMIN_PASSWORD not set; using insecure dev default");
        "admin123".to_string()
    });
    let addr = std::env::var("ALMACEN_ADDR").unwrap_or_else(|_| "0.0.0.0:8080".to_string());

    let directory = UserDirectory::new().with_account(admin_user, admin_password, "Administrador");
    let app = almacen_api::app::build_app(directory).await;

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .unwrap_or_else(|e| panic!("failed to bind {addr}: {e}"));

    tracing::info!("listening on {}", listener.local_addr().unwrap());

    axum::serve(listener, app).await.unwrap();
}
