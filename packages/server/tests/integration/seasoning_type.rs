use serde_json::json;

use crate::common::{TestApp, routes};

#[tokio::test]
async fn lists_seeded_types_in_id_order() {
    let app = TestApp::spawn().await;

    let res = app.get(routes::SEASONING_TYPES).await;
    assert_eq!(res.status, 200, "{}", res.text);
    let names: Vec<&str> = res
        .body
        .as_array()
        .unwrap()
        .iter()
        .map(|t| t["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, server::seed::DEFAULT_SEASONING_TYPES);
    assert_eq!(res.body[0]["id"], 1);
}

#[tokio::test]
async fn seeding_twice_adds_nothing() {
    let app = TestApp::spawn().await;
    server::seed::seed_seasoning_types(&app.db).await.unwrap();

    let res = app.get(routes::SEASONING_TYPES).await;
    assert_eq!(
        res.body.as_array().unwrap().len(),
        server::seed::DEFAULT_SEASONING_TYPES.len()
    );
}

#[tokio::test]
async fn creates_type_and_rejects_duplicates() {
    let app = TestApp::spawn().await;

    let res = app
        .post(routes::SEASONING_TYPES, &json!({ "name": " Mirin " }))
        .await;
    assert_eq!(res.status, 201, "{}", res.text);
    assert_eq!(res.body["name"], "Mirin");
    let id = res.id();

    let dup = app
        .post(routes::SEASONING_TYPES, &json!({ "name": "Mirin" }))
        .await;
    assert_eq!(dup.status, 409, "{}", dup.text);
    assert_eq!(dup.body["code"], "CONFLICT");

    let blank = app
        .post(routes::SEASONING_TYPES, &json!({ "name": "" }))
        .await;
    assert_eq!(blank.status, 400);

    // The new type is usable right away.
    let seasoning = app.create_seasoning("Hon Mirin", id, None).await;
    assert!(seasoning > 0);
}
