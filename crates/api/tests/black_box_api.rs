use almacen_auth::UserDirectory;
use reqwest::StatusCode;
use serde_json::json;

struct TestServer {
    base_url: String,
    handle: tokio::task::JoinHandle<()>,
}

impl TestServer {
    async fn spawn() -> Self {
        // Build app (same router as prod), but bind to an ephemeral port.
        let directory = UserDirectory::new().with_account("admin", "secret", "Administrador");
        let app = almacen_api::app::build_app(directory).await;
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("failed to bind ephemeral port");
        let addr = listener.local_addr().unwrap();
        let base_url = format!("http://{}", addr);

        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self { base_url, handle }
    }

    async fn login(&self, client: &reqwest::Client) -> String {
        let res = client
            .post(format!("{}/auth/login", self.base_url))
            .json(&json!({"username": "admin", "password": "secret"}))
            .send()
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::OK);
        let body: serde_json::Value = res.json().await.unwrap();
        body["token"].as_str().unwrap().to_string()
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

#[tokio::test]
async fn health_is_public_but_domain_routes_are_not() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let res = client
        .get(format!("{}/health", srv.base_url))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    let res = client
        .get(format!("{}/articles", srv.base_url))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn login_rejects_bad_credentials() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let res = client
        .post(format!("{}/auth/login", srv.base_url))
        .json(&json!({"username": "admin", "password": "wrong"}))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn whoami_reflects_the_session() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();
    let token = srv.login(&client).await;

    let res = client
        .get(format!("{}/whoami", srv.base_url))
        .bearer_auth(&token)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["username"], "admin");
    assert_eq!(body["display_name"], "Administrador");
}

#[tokio::test]
async fn logout_revokes_the_session() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();
    let token = srv.login(&client).await;

    let res = client
        .post(format!("{}/auth/logout", srv.base_url))
        .bearer_auth(&token)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::NO_CONTENT);

    let res = client
        .get(format!("{}/whoami", srv.base_url))
        .bearer_auth(&token)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn article_and_movement_lifecycle() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();
    let token = srv.login(&client).await;

    // Create an article; the name is normalized to uppercase.
    let res = client
        .post(format!("{}/articles", srv.base_url))
        .bearer_auth(&token)
        .json(&json!({"name": "papel bond", "unit_cost": "3.00"}))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::CREATED);
    let article: serde_json::Value = res.json().await.unwrap();
    assert_eq!(article["name"], "PAPEL BOND");
    let article_id = article["id"].as_i64().unwrap();

    // Record an entry; cost and author are captured server-side.
    let res = client
        .post(format!("{}/movements", srv.base_url))
        .bearer_auth(&token)
        .json(&json!({
            "article_id": article_id,
            "kind": "Entrada",
            "quantity": 100,
            "date": "2024-03-01",
            "description": "compra inicial"
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::CREATED);
    let movement: serde_json::Value = res.json().await.unwrap();
    assert_eq!(movement["unit_cost"], "3.00");
    assert_eq!(movement["author"], "Administrador");
    assert_eq!(movement["description"], "COMPRA INICIAL");

    // An exit bigger than the stock is rejected.
    let res = client
        .post(format!("{}/movements", srv.base_url))
        .bearer_auth(&token)
        .json(&json!({
            "article_id": article_id,
            "kind": "Salida",
            "quantity": 101,
            "date": "2024-03-02",
            "description": "entrega"
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["error"], "insufficient_stock");

    // A covered exit is accepted.
    let res = client
        .post(format!("{}/movements", srv.base_url))
        .bearer_auth(&token)
        .json(&json!({
            "article_id": article_id,
            "kind": "Salida",
            "quantity": 30,
            "date": "2024-03-02",
            "description": "entrega"
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::CREATED);

    // The control card folds both rows into running balances.
    let res = client
        .get(format!(
            "{}/reports/control-card?article={}",
            srv.base_url, article_id
        ))
        .bearer_auth(&token)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let card: serde_json::Value = res.json().await.unwrap();
    let rows = card["rows"].as_array().unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0]["balance"], 100);
    assert_eq!(rows[1]["balance"], 70);

    // The article cannot be deleted while it holds stock.
    let res = client
        .delete(format!("{}/articles/{}", srv.base_url, article_id))
        .bearer_auth(&token)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn stock_report_and_csv_export() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();
    let token = srv.login(&client).await;

    let res = client
        .post(format!("{}/articles", srv.base_url))
        .bearer_auth(&token)
        .json(&json!({"name": "tinta", "unit_cost": "9.50"}))
        .send()
        .await
        .unwrap();
    let article: serde_json::Value = res.json().await.unwrap();
    let article_id = article["id"].as_i64().unwrap();

    client
        .post(format!("{}/movements", srv.base_url))
        .bearer_auth(&token)
        .json(&json!({
            "article_id": article_id,
            "kind": "Entrada",
            "quantity": 4,
            "date": "2024-05-10",
            "description": "compra"
        }))
        .send()
        .await
        .unwrap();

    let res = client
        .get(format!("{}/reports/stock", srv.base_url))
        .bearer_auth(&token)
        .send()
        .await
        .unwrap();
    let rows: serde_json::Value = res.json().await.unwrap();
    assert_eq!(rows[0]["stock"], 4);
    assert_eq!(rows[0]["status"], "stock_bajo");

    let res = client
        .get(format!("{}/exports/stock.csv", srv.base_url))
        .bearer_auth(&token)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    assert!(res
        .headers()
        .get("content-type")
        .unwrap()
        .to_str()
        .unwrap()
        .starts_with("text/csv"));
    let csv = res.text().await.unwrap();
    assert!(csv.contains("TINTA"));
    assert!(csv.contains("Stock Bajo"));
}

#[tokio::test]
async fn consumption_report_values_exits_at_article_cost() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();
    let token = srv.login(&client).await;

    let res = client
        .post(format!("{}/articles", srv.base_url))
        .bearer_auth(&token)
        .json(&json!({"name": "papel", "unit_cost": "3.00"}))
        .send()
        .await
        .unwrap();
    let article: serde_json::Value = res.json().await.unwrap();
    let article_id = article["id"].as_i64().unwrap();

    for (kind, qty, date) in [
        ("Entrada", 100, "2024-01-10"),
        ("Salida", 10, "2024-03-05"),
        ("Salida", 5, "2024-06-01"),
    ] {
        client
            .post(format!("{}/movements", srv.base_url))
            .bearer_auth(&token)
            .json(&json!({
                "article_id": article_id,
                "kind": kind,
                "quantity": qty,
                "date": date,
                "description": "mov"
            }))
            .send()
            .await
            .unwrap();
    }

    let res = client
        .get(format!(
            "{}/reports/consumption?month=3&year=2024",
            srv.base_url
        ))
        .bearer_auth(&token)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let rows: serde_json::Value = res.json().await.unwrap();
    assert_eq!(rows[0]["name"], "PAPEL");
    assert_eq!(rows[0]["period_consumption"], "30.00");
    assert_eq!(rows[0]["annual_consumption"], "45.00");
    assert_eq!(rows[0]["stock"], 90);
    assert_eq!(rows[0]["balance_value"], "270.00");
}
