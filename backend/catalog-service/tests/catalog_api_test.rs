//! Tests of the Product/Tag API behind the token gate: CRUD flows, search,
//! tag association, and the structured domain error bodies.

mod common;

use actix_web::{http::StatusCode, test};
use serde_json::{json, Value};

use common::{bearer, init_app, login_token, test_state};

#[actix_web::test]
async fn full_product_lifecycle_with_user_token() {
    let app = init_app(test_state()).await;
    let token = login_token(&app, "user", "password").await;

    // Create a tag.
    let req = test::TestRequest::post()
        .uri("/api/tags")
        .insert_header(bearer(&token))
        .set_json(json!({ "name": "electronics" }))
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::CREATED);
    let tag: Value = test::read_body_json(res).await;
    let tag_id = tag["id"].as_i64().unwrap();

    // Create a product.
    let req = test::TestRequest::post()
        .uri("/api/products")
        .insert_header(bearer(&token))
        .set_json(json!({
            "name": "Laptop",
            "description": "A portable computer",
            "price": 999.99
        }))
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::CREATED);
    let product: Value = test::read_body_json(res).await;
    let product_id = product["id"].as_i64().unwrap();
    assert_eq!(product["tags"], json!([]));

    // Attach the tag.
    let req = test::TestRequest::post()
        .uri(&format!("/api/products/{}/tags/{}", product_id, tag_id))
        .insert_header(bearer(&token))
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::OK);
    let tagged: Value = test::read_body_json(res).await;
    assert_eq!(tagged["tags"][0]["name"], "electronics");

    // Find it through the tag.
    let req = test::TestRequest::get()
        .uri("/api/products/by-tag?name=electronics")
        .insert_header(bearer(&token))
        .to_request();
    let found: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(found.as_array().unwrap().len(), 1);
    assert_eq!(found[0]["name"], "Laptop");

    // And through name search.
    let req = test::TestRequest::get()
        .uri("/api/products/search?name=lap")
        .insert_header(bearer(&token))
        .to_request();
    let found: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(found.as_array().unwrap().len(), 1);

    // Update it.
    let req = test::TestRequest::put()
        .uri(&format!("/api/products/{}", product_id))
        .insert_header(bearer(&token))
        .set_json(json!({ "name": "Laptop Pro", "description": null, "price": 1299.0 }))
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::OK);
    let updated: Value = test::read_body_json(res).await;
    assert_eq!(updated["name"], "Laptop Pro");
    // Tag attachments survive updates.
    assert_eq!(updated["tags"][0]["id"], tag_id);

    // Delete it.
    let req = test::TestRequest::delete()
        .uri(&format!("/api/products/{}", product_id))
        .insert_header(bearer(&token))
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::NO_CONTENT);

    // Gone now, with the structured error body.
    let req = test::TestRequest::get()
        .uri(&format!("/api/products/{}", product_id))
        .insert_header(bearer(&token))
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    let body: Value = test::read_body_json(res).await;
    assert_eq!(body["status"], 404);
    assert_eq!(body["error"], "Not Found");
}

#[actix_web::test]
async fn deleting_a_tag_detaches_it_from_products() {
    let app = init_app(test_state()).await;
    let token = login_token(&app, "user", "password").await;

    let req = test::TestRequest::post()
        .uri("/api/tags")
        .insert_header(bearer(&token))
        .set_json(json!({ "name": "sale" }))
        .to_request();
    let tag: Value = test::call_and_read_body_json(&app, req).await;
    let tag_id = tag["id"].as_i64().unwrap();

    let req = test::TestRequest::post()
        .uri("/api/products")
        .insert_header(bearer(&token))
        .set_json(json!({ "name": "Mouse", "price": 25.0 }))
        .to_request();
    let product: Value = test::call_and_read_body_json(&app, req).await;
    let product_id = product["id"].as_i64().unwrap();

    let req = test::TestRequest::post()
        .uri(&format!("/api/products/{}/tags/{}", product_id, tag_id))
        .insert_header(bearer(&token))
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::OK);

    let req = test::TestRequest::delete()
        .uri(&format!("/api/tags/{}", tag_id))
        .insert_header(bearer(&token))
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::NO_CONTENT);

    let req = test::TestRequest::get()
        .uri(&format!("/api/products/{}", product_id))
        .insert_header(bearer(&token))
        .to_request();
    let product: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(product["tags"], json!([]));
}

#[actix_web::test]
async fn duplicate_tag_names_conflict() {
    let app = init_app(test_state()).await;
    let token = login_token(&app, "user", "password").await;

    let req = test::TestRequest::post()
        .uri("/api/tags")
        .insert_header(bearer(&token))
        .set_json(json!({ "name": "rust" }))
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::CREATED);

    let req = test::TestRequest::post()
        .uri("/api/tags")
        .insert_header(bearer(&token))
        .set_json(json!({ "name": "rust" }))
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::CONFLICT);

    let body: Value = test::read_body_json(res).await;
    assert_eq!(body["status"], 409);
    assert_eq!(body["error"], "Conflict");
}

#[actix_web::test]
async fn invalid_payloads_fail_validation() {
    let app = init_app(test_state()).await;
    let token = login_token(&app, "user", "password").await;

    // Single-character tag name violates the length bound.
    let req = test::TestRequest::post()
        .uri("/api/tags")
        .insert_header(bearer(&token))
        .set_json(json!({ "name": "x" }))
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    // Negative price is rejected.
    let req = test::TestRequest::post()
        .uri("/api/products")
        .insert_header(bearer(&token))
        .set_json(json!({ "name": "Keyboard", "price": -1.0 }))
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    let body: Value = test::read_body_json(res).await;
    assert_eq!(body["status"], 400);
    assert_eq!(body["error"], "Bad Request");
}

#[actix_web::test]
async fn admin_stats_reflect_catalog_counts() {
    let app = init_app(test_state()).await;
    let user_token = login_token(&app, "user", "password").await;
    let admin_token = login_token(&app, "admin", "admin").await;

    for name in ["Laptop", "Mouse"] {
        let req = test::TestRequest::post()
            .uri("/api/products")
            .insert_header(bearer(&user_token))
            .set_json(json!({ "name": name, "price": 10.0 }))
            .to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::CREATED);
    }

    let req = test::TestRequest::get()
        .uri("/api/admin/stats")
        .insert_header(bearer(&admin_token))
        .to_request();
    let stats: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(stats["totalProducts"], 2);
    assert_eq!(stats["totalTags"], 0);
}
