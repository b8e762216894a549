use serde_json::json;

use crate::common::{MISO_TYPE, SOY_SAUCE_TYPE, TestApp, days_from_now, iso, routes};

mod seasoning_listing {
    use super::*;

    #[tokio::test]
    async fn empty_store_returns_empty_page() {
        let app = TestApp::spawn().await;

        let res = app.get(routes::SEASONINGS).await;
        assert_eq!(res.status, 200, "{}", res.text);
        assert_eq!(res.body["data"], json!([]));
        assert_eq!(
            res.body["meta"],
            json!({
                "page": 1,
                "pageSize": 20,
                "totalItems": 0,
                "totalPages": 0,
                "hasNext": false,
                "hasPrevious": false,
            })
        );
    }

    #[tokio::test]
    async fn items_carry_expiry_fields() {
        let app = TestApp::spawn().await;
        app.create_seasoning("Expired", SOY_SAUCE_TYPE, Some(-1)).await;
        app.create_seasoning("Soon", SOY_SAUCE_TYPE, Some(3)).await;
        app.create_seasoning("Fresh", SOY_SAUCE_TYPE, Some(30)).await;
        app.create_seasoning("Unknown", SOY_SAUCE_TYPE, None).await;

        let res = app.get(routes::SEASONINGS).await;
        assert_eq!(res.status, 200, "{}", res.text);

        let data = res.body["data"].as_array().unwrap();
        let fields: Vec<(&str, Option<i64>, &str)> = data
            .iter()
            .map(|d| {
                (
                    d["name"].as_str().unwrap(),
                    d["daysUntilExpiry"].as_i64(),
                    d["expiryStatus"].as_str().unwrap(),
                )
            })
            .collect();
        assert_eq!(
            fields,
            [
                ("Expired", Some(-1), "expired"),
                ("Soon", Some(3), "expiring_soon"),
                ("Fresh", Some(30), "fresh"),
                ("Unknown", None, "unknown"),
            ]
        );
        assert!(data[3]["expiresAt"].is_null());
        assert!(data[3]["bestBeforeAt"].is_null());
        assert!(data[3]["daysUntilExpiry"].is_null());
    }

    #[tokio::test]
    async fn filters_by_type_and_search_then_sorts() {
        let app = TestApp::spawn().await;
        app.create_seasoning("Koikuchi Soy Sauce", SOY_SAUCE_TYPE, Some(10)).await;
        app.create_seasoning("Usukuchi Soy Sauce", SOY_SAUCE_TYPE, Some(5)).await;
        app.create_seasoning("Shiro Miso", MISO_TYPE, Some(15)).await;
        app.create_seasoning("Shiro Soy Sauce", SOY_SAUCE_TYPE, Some(3)).await;

        let res = app
            .get(&format!(
                "{}?typeId={SOY_SAUCE_TYPE}&search=soy%20sauce&sort=expiryAsc",
                routes::SEASONINGS
            ))
            .await;
        assert_eq!(res.status, 200, "{}", res.text);
        assert_eq!(
            res.names(),
            ["Shiro Soy Sauce", "Usukuchi Soy Sauce", "Koikuchi Soy Sauce"]
        );
        assert_eq!(res.body["meta"]["totalItems"], 3);
    }

    #[tokio::test]
    async fn expiry_sort_puts_unknown_last_both_ways() {
        let app = TestApp::spawn().await;
        app.create_seasoning("none", SOY_SAUCE_TYPE, None).await;
        app.create_seasoning("late", SOY_SAUCE_TYPE, Some(20)).await;
        app.create_seasoning("early", SOY_SAUCE_TYPE, Some(2)).await;

        let asc = app
            .get(&format!("{}?sort=expiryAsc", routes::SEASONINGS))
            .await;
        assert_eq!(asc.names(), ["early", "late", "none"]);

        let desc = app
            .get(&format!("{}?sort=expiryDesc", routes::SEASONINGS))
            .await;
        assert_eq!(desc.names(), ["late", "early", "none"]);
    }

    #[tokio::test]
    async fn name_sort_is_case_sensitive() {
        let app = TestApp::spawn().await;
        for name in ["banana", "Apple", "cherry"] {
            app.create_seasoning(name, SOY_SAUCE_TYPE, None).await;
        }

        let res = app.get(&format!("{}?sort=nameAsc", routes::SEASONINGS)).await;
        assert_eq!(res.names(), ["Apple", "banana", "cherry"]);

        let res = app.get(&format!("{}?sort=nameDesc", routes::SEASONINGS)).await;
        assert_eq!(res.names(), ["cherry", "banana", "Apple"]);
    }

    #[tokio::test]
    async fn expires_within_days_keeps_expired_and_drops_unknown() {
        let app = TestApp::spawn().await;
        app.create_seasoning("expired", SOY_SAUCE_TYPE, Some(-4)).await;
        app.create_seasoning("soon", SOY_SAUCE_TYPE, Some(6)).await;
        app.create_seasoning("later", SOY_SAUCE_TYPE, Some(9)).await;
        app.create_seasoning("unknown", SOY_SAUCE_TYPE, None).await;

        let res = app
            .get(&format!("{}?expiresWithinDays=7", routes::SEASONINGS))
            .await;
        assert_eq!(res.status, 200, "{}", res.text);
        assert_eq!(res.names(), ["expired", "soon"]);
    }

    #[tokio::test]
    async fn paginates_after_filtering() {
        let app = TestApp::spawn().await;
        for i in 1..=5 {
            app.create_seasoning(&format!("salt-{i}"), 1, None).await;
        }
        app.create_seasoning("pepper", 7, None).await;

        let res = app
            .get(&format!("{}?typeId=1&page=2&pageSize=2", routes::SEASONINGS))
            .await;
        assert_eq!(res.status, 200, "{}", res.text);
        assert_eq!(res.names(), ["salt-3", "salt-4"]);
        assert_eq!(
            res.body["meta"],
            json!({
                "page": 2,
                "pageSize": 2,
                "totalItems": 5,
                "totalPages": 3,
                "hasNext": true,
                "hasPrevious": true,
            })
        );

        let past_end = app
            .get(&format!("{}?typeId=1&page=9&pageSize=2", routes::SEASONINGS))
            .await;
        assert_eq!(past_end.status, 200);
        assert_eq!(past_end.body["data"], json!([]));
        assert_eq!(past_end.body["meta"]["hasNext"], false);
    }

    #[tokio::test]
    async fn rejects_invalid_query_parameters() {
        let app = TestApp::spawn().await;

        for query in [
            "page=0",
            "pageSize=0",
            "pageSize=101",
            "page=abc",
            "typeId=0",
            "sort=newest",
            "expiresWithinDays=-1",
        ] {
            let res = app.get(&format!("{}?{query}", routes::SEASONINGS)).await;
            assert_eq!(res.status, 400, "{query}: {}", res.text);
            assert_eq!(res.body["code"], "VALIDATION_ERROR", "{query}");
        }

        let long = "a".repeat(51);
        let res = app
            .get(&format!("{}?search={long}", routes::SEASONINGS))
            .await;
        assert_eq!(res.status, 400);
    }

    #[tokio::test]
    async fn blank_search_matches_everything() {
        let app = TestApp::spawn().await;
        app.create_seasoning("Salt", 1, None).await;
        app.create_seasoning("Sugar", 2, None).await;

        let res = app.get(&format!("{}?search=%20%20", routes::SEASONINGS)).await;
        assert_eq!(res.status, 200, "{}", res.text);
        assert_eq!(res.names(), ["Salt", "Sugar"]);
    }
}

mod seasoning_crud {
    use super::*;

    #[tokio::test]
    async fn create_returns_full_dto() {
        let app = TestApp::spawn().await;
        let best_before = iso(days_from_now(40));

        let res = app
            .post(
                routes::SEASONINGS,
                &json!({
                    "name": "  Rice Vinegar  ",
                    "typeId": 4,
                    "imageId": 12,
                    "bestBeforeAt": best_before,
                }),
            )
            .await;
        assert_eq!(res.status, 201, "{}", res.text);
        assert_eq!(res.body["name"], "Rice Vinegar");
        assert_eq!(res.body["typeId"], 4);
        assert_eq!(res.body["imageId"], 12);
        assert_eq!(res.body["bestBeforeAt"], best_before.as_str());
        assert!(res.body["expiresAt"].is_null());
        assert_eq!(res.body["daysUntilExpiry"], 40);
        assert_eq!(res.body["expiryStatus"], "fresh");
        assert!(res.body["createdAt"].is_string());
        assert_eq!(res.body["createdAt"], res.body["updatedAt"]);
    }

    #[tokio::test]
    async fn create_validates_payload() {
        let app = TestApp::spawn().await;

        let cases = [
            json!({ "name": "   ", "typeId": 1 }),
            json!({ "name": "a".repeat(257), "typeId": 1 }),
            json!({ "name": "Salt", "typeId": 0 }),
            json!({ "name": "Salt", "typeId": 999 }),
            json!({ "name": "Salt", "typeId": 1, "expiresAt": "tomorrow" }),
            json!({ "typeId": 1 }),
        ];
        for body in cases {
            let res = app.post(routes::SEASONINGS, &body).await;
            assert_eq!(res.status, 400, "{body}: {}", res.text);
            assert_eq!(res.body["code"], "VALIDATION_ERROR");
        }
    }

    #[tokio::test]
    async fn get_returns_seasoning_or_404() {
        let app = TestApp::spawn().await;
        let id = app.create_seasoning("Mirin", 2, Some(5)).await;

        let res = app.get(&routes::seasoning(id)).await;
        assert_eq!(res.status, 200, "{}", res.text);
        assert_eq!(res.id(), id);
        assert_eq!(res.body["expiryStatus"], "expiring_soon");

        let missing = app.get(&routes::seasoning(id + 100)).await;
        assert_eq!(missing.status, 404);
        assert_eq!(missing.body["code"], "NOT_FOUND");
    }

    #[tokio::test]
    async fn patch_updates_and_clears_fields() {
        let app = TestApp::spawn().await;
        let id = app.create_seasoning("Mirin", 2, Some(5)).await;

        let res = app
            .patch(
                &routes::seasoning(id),
                &json!({ "name": "Hon Mirin", "expiresAt": null }),
            )
            .await;
        assert_eq!(res.status, 200, "{}", res.text);
        assert_eq!(res.body["name"], "Hon Mirin");
        assert!(res.body["expiresAt"].is_null());
        assert_eq!(res.body["expiryStatus"], "unknown");
        assert_eq!(res.body["typeId"], 2);

        let stored = app.get(&routes::seasoning(id)).await;
        assert_eq!(stored.body["name"], "Hon Mirin");
    }

    #[tokio::test]
    async fn empty_patch_returns_current_resource() {
        let app = TestApp::spawn().await;
        let id = app.create_seasoning("Mirin", 2, Some(5)).await;
        let before = app.get(&routes::seasoning(id)).await;

        let res = app.patch(&routes::seasoning(id), &json!({})).await;
        assert_eq!(res.status, 200, "{}", res.text);
        assert_eq!(res.body["updatedAt"], before.body["updatedAt"]);
        assert_eq!(res.body["name"], "Mirin");
    }

    #[tokio::test]
    async fn patch_rejects_unknown_type_and_missing_seasoning() {
        let app = TestApp::spawn().await;
        let id = app.create_seasoning("Mirin", 2, None).await;

        let res = app
            .patch(&routes::seasoning(id), &json!({ "typeId": 999 }))
            .await;
        assert_eq!(res.status, 400, "{}", res.text);

        let res = app
            .patch(&routes::seasoning(id + 100), &json!({ "name": "x" }))
            .await;
        assert_eq!(res.status, 404, "{}", res.text);

        let res = app.patch(&routes::seasoning(id + 100), &json!({})).await;
        assert_eq!(res.status, 404, "{}", res.text);
    }

    #[tokio::test]
    async fn patch_missing_seasoning_is_not_found_before_type_check() {
        let app = TestApp::spawn().await;
        let id = app.create_seasoning("Mirin", 2, None).await;

        let res = app
            .patch(&routes::seasoning(id + 100), &json!({ "typeId": 999 }))
            .await;
        assert_eq!(res.status, 404, "{}", res.text);
        assert_eq!(res.body["code"], "NOT_FOUND");
    }

    #[tokio::test]
    async fn delete_removes_seasoning_and_memberships() {
        use sea_orm::{ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter};
        use server::entity::template_seasoning;

        let app = TestApp::spawn().await;
        let id = app.create_seasoning("Mirin", 2, None).await;
        let other = app.create_seasoning("Sake", 2, None).await;
        let template_id = app.create_template("Teriyaki", &[id, other]).await;

        let res = app.delete(&routes::seasoning(id)).await;
        assert_eq!(res.status, 204, "{}", res.text);

        assert_eq!(app.get(&routes::seasoning(id)).await.status, 404);
        let memberships = template_seasoning::Entity::find()
            .filter(template_seasoning::Column::SeasoningId.eq(id))
            .count(&app.db)
            .await
            .unwrap();
        assert_eq!(memberships, 0);

        let detail = app.get(&routes::template(template_id)).await;
        assert_eq!(detail.body["seasonings"].as_array().unwrap().len(), 1);

        let again = app.delete(&routes::seasoning(id)).await;
        assert_eq!(again.status, 404);
    }
}
