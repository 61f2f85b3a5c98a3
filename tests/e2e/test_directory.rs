use crate::e2e::helpers;

use helpers::fixtures::{
    BOUTIQUE_HOTELS_ID, DIVE_SHOP_COUNT, DIVING_ID, FOOD_ID, HOTELS_ID, SEA_RESTAURANT_ID,
    TOURISM_ID,
};
use helpers::TestContext;
use hyper::StatusCode;
use pretty_assertions::assert_eq;
use serde_json::Value;
use test_context::test_context;

fn find<'a>(items: &'a Value, id: &str) -> &'a Value {
    items
        .as_array()
        .expect("Expected an array")
        .iter()
        .find(|item| item["id"] == id)
        .unwrap_or_else(|| panic!("No item with id {}", id))
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_list_categories_with_derived_counts(ctx: &TestContext) {
    let response = ctx.client.get("/api/categories").await.unwrap();

    response.assert_status(StatusCode::OK);
    let categories = &response.body()["categories"];
    assert_eq!(categories.as_array().unwrap().len(), 2);

    let tourism = find(categories, TOURISM_ID);
    assert_eq!(tourism["name"], "Tourism");
    assert_eq!(tourism["icon"], "🏖️");
    assert_eq!(tourism["subcategory_count"], 3);
    // dive shops, two hotels and the grill
    assert_eq!(tourism["business_count"], DIVE_SHOP_COUNT + 3);

    let food = find(categories, FOOD_ID);
    assert_eq!(food["subcategory_count"], 1);
    assert_eq!(food["business_count"], 2);
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_count_a_business_under_every_linked_category(ctx: &TestContext) {
    let response = ctx.client.get("/api/categories").await.unwrap();

    response.assert_status(StatusCode::OK);
    let categories = &response.body()["categories"];
    let total: u64 = categories
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["business_count"].as_u64().unwrap())
        .sum();

    // 66 business records, the grill is linked to Tourism and Food
    assert_eq!(total, (DIVE_SHOP_COUNT + 4 + 1) as u64);
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_report_table_failures_as_bad_gateway(ctx: &TestContext) {
    ctx.airtable.fail("Businesses");

    let response = ctx.client.get("/api/categories").await.unwrap();

    response
        .assert_status(StatusCode::BAD_GATEWAY)
        .assert_error_message("503");
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_list_subcategories_of_a_category(ctx: &TestContext) {
    let response = ctx
        .client
        .get(&format!("/api/categories/{}/subcategories", TOURISM_ID))
        .await
        .unwrap();

    response.assert_status(StatusCode::OK);
    let subcategories = &response.body()["subcategories"];
    assert_eq!(subcategories.as_array().unwrap().len(), 3);

    let diving = find(subcategories, DIVING_ID);
    assert_eq!(diving["name"], "Diving Centers");
    assert_eq!(diving["business_count"], DIVE_SHOP_COUNT);
    assert_eq!(diving["category_id"], TOURISM_ID);

    let hotels = find(subcategories, HOTELS_ID);
    assert_eq!(hotels["description"], "");
    assert_eq!(hotels["business_count"], 1);

    let boutique = find(subcategories, BOUTIQUE_HOTELS_ID);
    assert_eq!(boutique["name"], "Boutique Hotels");
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_return_no_subcategories_for_unknown_category(ctx: &TestContext) {
    let response = ctx
        .client
        .get("/api/categories/recMissing/subcategories")
        .await
        .unwrap();

    response.assert_status(StatusCode::OK);
    assert_eq!(response.body()["subcategories"], serde_json::json!([]));
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_return_localized_business_detail(ctx: &TestContext) {
    let response = ctx
        .client
        .get(&format!("/api/businesses/{}?locale=en", SEA_RESTAURANT_ID))
        .await
        .unwrap();

    response.assert_status(StatusCode::OK);
    let business = response.body();
    assert_eq!(business["id"], SEA_RESTAURANT_ID);
    assert_eq!(business["name"], "مطعم البحر");
    assert_eq!(business["display_name"], "Sea Restaurant");
    assert_eq!(business["display_description"], "Fresh seafood");
    assert_eq!(business["image"], "https://cdn.example.com/sea.jpg");
    assert_eq!(business["reviews"], 120);
    assert_eq!(business["is_premium"], true);
    assert_eq!(business["category_id"], FOOD_ID);
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_fall_back_to_default_name_for_other_locales(ctx: &TestContext) {
    let response = ctx
        .client
        .get(&format!("/api/businesses/{}?locale=ar", SEA_RESTAURANT_ID))
        .await
        .unwrap();

    response.assert_status(StatusCode::OK);
    assert_eq!(response.body()["display_name"], "مطعم البحر");
    assert_eq!(response.body()["display_description"], "مأكولات بحرية طازجة");
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_return_not_found_for_unknown_business(ctx: &TestContext) {
    let response = ctx.client.get("/api/businesses/recMissing").await.unwrap();

    response
        .assert_status(StatusCode::NOT_FOUND)
        .assert_error_message("recMissing");
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_reject_unsupported_locale(ctx: &TestContext) {
    let response = ctx
        .client
        .get(&format!("/api/businesses/{}?locale=xx", SEA_RESTAURANT_ID))
        .await
        .unwrap();

    response
        .assert_status(StatusCode::BAD_REQUEST)
        .assert_error_message("unsupported locale");
}
