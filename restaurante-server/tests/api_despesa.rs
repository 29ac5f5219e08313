mod common;

use common::TestApp;
use http::StatusCode;
use serde_json::json;

#[tokio::test]
async fn test_despesa_crud() {
    let app = TestApp::new().await;

    let res = app
        .post(
            "/despesa",
            json!({
                "descricao": "Compra de gas",
                "categoria": "Cozinha",
                "valor": 10.005,
                "data": "2025-01-10"
            }),
        )
        .await;
    assert_eq!(res.status, StatusCode::CREATED, "{}", res.body);
    let id = res.body["id"].as_i64().unwrap();
    assert_eq!(res.location(), format!("/despesa/{id}"));
    assert_eq!(res.body["valor"], 10.01);
    assert_eq!(res.body["data"], "2025-01-10");

    let res = app
        .put(
            &format!("/despesa/{id}"),
            json!({"descricao": "Gas", "categoria": "Cozinha", "valor": 12.5}),
        )
        .await;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.body["valor"], 12.5);
    assert_eq!(res.body["data"], "2025-01-10");

    let res = app.get(&format!("/despesa/{id}")).await;
    assert_eq!(res.body["descricao"], "Gas");

    let res = app.delete(&format!("/despesa/{id}")).await;
    assert_eq!(res.status, StatusCode::NO_CONTENT);
    let res = app.get(&format!("/despesa/{id}")).await;
    assert_eq!(res.status, StatusCode::NOT_FOUND);
    assert_eq!(res.error_code(), 3001);
}

#[tokio::test]
async fn test_update_missing_despesa_has_no_side_effects() {
    let app = TestApp::new().await;
    let res = app
        .post(
            "/despesa",
            json!({"descricao": "Luz", "categoria": "Contas", "valor": 80, "data": "2025-02-01"}),
        )
        .await;
    let existing = res.body.clone();

    let res = app
        .put(
            "/despesa/999",
            json!({"descricao": "Agua", "categoria": "Contas", "valor": 30}),
        )
        .await;
    assert_eq!(res.status, StatusCode::NOT_FOUND);

    let res = app.get("/despesa").await;
    assert_eq!(res.body, json!([existing]));
}

#[tokio::test]
async fn test_negative_valor_rejected() {
    let app = TestApp::new().await;

    let res = app
        .post(
            "/despesa",
            json!({"descricao": "Estorno", "categoria": "Outros", "valor": -1}),
        )
        .await;
    assert_eq!(res.status, StatusCode::BAD_REQUEST);
    assert_eq!(res.error_code(), 3002);
}

#[tokio::test]
async fn test_list_most_recent_first() {
    let app = TestApp::new().await;

    for (descricao, data) in [("jan", "2025-01-15"), ("mar", "2025-03-15"), ("fev", "2025-02-15")] {
        let res = app
            .post(
                "/despesa",
                json!({"descricao": descricao, "categoria": "Geral", "valor": 1, "data": data}),
            )
            .await;
        assert_eq!(res.status, StatusCode::CREATED);
    }

    let res = app.get("/despesa").await;
    let descricoes: Vec<_> = res
        .body
        .as_array()
        .unwrap()
        .iter()
        .map(|d| d["descricao"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(descricoes, ["mar", "fev", "jan"]);
}
