use serde_json::{json, Value};

pub const TOURISM_ID: &str = "recCatTourism";
pub const FOOD_ID: &str = "recCatFood";
pub const DIVING_ID: &str = "recSubDiving";
pub const HOTELS_ID: &str = "recSubHotels";
/// Its name contains "Hotels", the name of another subcategory
pub const BOUTIQUE_HOTELS_ID: &str = "recSubBoutiqueHotels";
pub const RESTAURANTS_ID: &str = "recSubRestaurants";
pub const DIVAN_HOTEL_ID: &str = "recBizDivanHotel";
pub const BOUTIQUE_ID: &str = "recBizBoutique";
pub const SEA_RESTAURANT_ID: &str = "recBizSeaRestaurant";
/// Linked to both categories
pub const BEACH_GRILL_ID: &str = "recBizBeachGrill";

/// Number of diving businesses, enough to span two listing pages
pub const DIVE_SHOP_COUNT: usize = 62;

/// Raw Airtable records per table, in the shape the REST API returns them
#[derive(Debug, Clone)]
pub struct DirectoryFixtures {
    pub categories: Vec<Value>,
    pub subcategories: Vec<Value>,
    pub businesses: Vec<Value>,
}

impl DirectoryFixtures {
    pub fn aqaba() -> Self {
        let mut businesses: Vec<Value> = (1..=DIVE_SHOP_COUNT)
            .map(|n| {
                record(
                    &dive_shop_id(n),
                    json!({
                        "Name": format!("Dive Shop {:02}", n),
                        "Description": "Reef trips and PADI courses",
                        "Location": "South Beach",
                        "Phone": "+962 3 201 0000",
                        "Email": format!("shop{}@example.com", n),
                        "IsPremium": n == 1,
                        "Rating": 4.5,
                        "Category": [TOURISM_ID],
                        "Subcategory": [DIVING_ID],
                    }),
                )
            })
            .collect();

        businesses.push(record(
            DIVAN_HOTEL_ID,
            json!({
                "Name": "Divan Hotel",
                "Description": "Sea-view rooms",
                "Location": "Corniche",
                "Phone": "+962 3 202 0000",
                "Email": "stay@divan.example.com",
                "Website": "https://divan.example.com",
                "Category": [TOURISM_ID],
                "Subcategory": [HOTELS_ID],
            }),
        ));

        businesses.push(record(
            SEA_RESTAURANT_ID,
            json!({
                "Name": "مطعم البحر",
                "Name_EN": "Sea Restaurant",
                "Description": "مأكولات بحرية طازجة",
                "Description_EN": "Fresh seafood",
                "Location": "Old Town",
                "Phone": "+962 3 203 0000",
                "Email": "hello@sea.example.com",
                "Image": [{ "id": "att1", "url": "https://cdn.example.com/sea.jpg" }],
                "IsPremium": true,
                "Rating": 4.8,
                "Reviews": 120,
                "Category": [FOOD_ID],
                "Subcategory": [RESTAURANTS_ID],
            }),
        ));

        businesses.push(record(
            BOUTIQUE_ID,
            json!({
                "Name": "Coral Boutique Hotel",
                "Description": "Twelve rooms by the reef",
                "Location": "South Beach",
                "Phone": "+962 3 204 0000",
                "Email": "rooms@coral.example.com",
                "Category": [TOURISM_ID],
                "Subcategory": [BOUTIQUE_HOTELS_ID],
            }),
        ));

        businesses.push(record(
            BEACH_GRILL_ID,
            json!({
                "Name": "Beach Grill",
                "Description": "Sunset barbecue and snorkel rental",
                "Location": "Tala Bay",
                "Phone": "+962 3 205 0000",
                "Email": "grill@example.com",
                "Category": [TOURISM_ID, FOOD_ID],
                "Subcategory": [RESTAURANTS_ID],
            }),
        ));

        Self {
            categories: vec![
                record(
                    TOURISM_ID,
                    json!({ "Name": "Tourism", "Description": "Things to do", "Icon": "🏖️" }),
                ),
                record(
                    FOOD_ID,
                    json!({ "Name": "Food & Drink", "Description": "Where to eat", "Icon": "🍽️" }),
                ),
            ],
            subcategories: vec![
                record(
                    DIVING_ID,
                    json!({
                        "Name": "Diving Centers",
                        "Description": "Red Sea diving",
                        "Category": [TOURISM_ID],
                        "Businesses": (1..=DIVE_SHOP_COUNT).map(dive_shop_id).collect::<Vec<_>>(),
                    }),
                ),
                record(
                    HOTELS_ID,
                    json!({
                        "Name": "Hotels",
                        "Category": [TOURISM_ID],
                        "Businesses": [DIVAN_HOTEL_ID],
                    }),
                ),
                record(
                    BOUTIQUE_HOTELS_ID,
                    json!({
                        "Name": "Boutique Hotels",
                        "Category": [TOURISM_ID],
                        "Businesses": [BOUTIQUE_ID],
                    }),
                ),
                record(
                    RESTAURANTS_ID,
                    json!({
                        "Name": "Restaurants",
                        "Category": [FOOD_ID],
                        "Businesses": [SEA_RESTAURANT_ID, BEACH_GRILL_ID],
                    }),
                ),
            ],
            businesses,
        }
    }
}

pub fn dive_shop_id(n: usize) -> String {
    format!("recBizDive{:02}", n)
}

fn record(id: &str, fields: Value) -> Value {
    json!({
        "id": id,
        "createdTime": "2024-01-01T00:00:00.000Z",
        "fields": fields,
    })
}
