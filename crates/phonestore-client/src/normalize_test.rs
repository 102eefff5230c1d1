use rust_decimal::Decimal;
use serde_json::json;

use super::*;

fn raw(value: serde_json::Value) -> RawProduct {
    serde_json::from_value(value).expect("fixture should deserialize")
}

// -----------------------------------------------------------------------
// normalize_specs
// -----------------------------------------------------------------------

#[test]
fn flat_shape_maps_directly() {
    let product = raw(json!({
        "_id": "p1",
        "specs": {
            "os": "Android 14",
            "cpu": "Snapdragon 8 Gen 3",
            "rearCamera": "200 MP",
            "frontCamera": "12 MP",
            "screenTech": "Dynamic AMOLED 2X",
            "screenSize": "6.8 inches",
            "refreshRate": "120 Hz",
            "brightness": "2600 nits",
            "battery": "5000 mAh",
            "charging": "45 W"
        },
        "variant": { "ram": "12GB", "storage": "256GB" }
    }));

    let specs = normalize_specs(&product);
    assert_eq!(specs.os, "Android 14");
    assert_eq!(specs.rear_camera, "200 MP");
    assert_eq!(specs.screen_tech, "Dynamic AMOLED 2X");
    assert_eq!(specs.refresh_rate, "120 Hz");
    assert_eq!(specs.battery, "5000 mAh");
    assert_eq!(specs.charging, "45 W");
    assert_eq!(specs.ram, "12GB");
    assert_eq!(specs.storage, "256GB");
}

#[test]
fn nested_shape_maps_to_flat_keys() {
    let product = raw(json!({
        "_id": "p2",
        "specs": {
            "os": "iOS 17",
            "camera": { "main": "48 MP", "front": "12 MP" },
            "display": {
                "type": "Super Retina XDR",
                "size": "6.1 inches",
                "refresh_rate": "60 Hz",
                "brightness": "2000 nits"
            },
            "battery": { "capacity": "3349 mAh", "charging": "20 W" }
        }
    }));

    let specs = normalize_specs(&product);
    assert_eq!(specs.rear_camera, "48 MP");
    assert_eq!(specs.front_camera, "12 MP");
    assert_eq!(specs.screen_tech, "Super Retina XDR");
    assert_eq!(specs.screen_size, "6.1 inches");
    assert_eq!(specs.refresh_rate, "60 Hz");
    assert_eq!(specs.brightness, "2000 nits");
    assert_eq!(specs.battery, "3349 mAh");
    assert_eq!(specs.charging, "20 W");
}

#[test]
fn flat_key_wins_over_nested_key() {
    let product = raw(json!({
        "_id": "p3",
        "specs": {
            "rearCamera": "50 MP",
            "camera": { "main": "48 MP" }
        }
    }));
    assert_eq!(normalize_specs(&product).rear_camera, "50 MP");
}

#[test]
fn blank_flat_key_falls_through_to_nested() {
    let product = raw(json!({
        "_id": "p4",
        "specs": {
            "screenTech": "  ",
            "display": { "type": "OLED" }
        }
    }));
    assert_eq!(normalize_specs(&product).screen_tech, "OLED");
}

#[test]
fn product_details_used_when_specs_lack_key() {
    let product = raw(json!({
        "_id": "p5",
        "specs": { "os": "Android 14" },
        "productDetails": {
            "gpu": "Adreno 750",
            "camera": { "main": "50 MP" }
        }
    }));
    let specs = normalize_specs(&product);
    assert_eq!(specs.os, "Android 14");
    assert_eq!(specs.gpu, "Adreno 750");
    assert_eq!(specs.rear_camera, "50 MP");
}

#[test]
fn missing_keys_become_empty_strings() {
    let specs = normalize_specs(&raw(json!({ "_id": "p6" })));
    assert_eq!(specs, ProductSpecs::default());
}

// -----------------------------------------------------------------------
// normalize_product
// -----------------------------------------------------------------------

#[test]
fn normalize_product_converts_prices_to_whole_amounts() {
    let product = normalize_product(raw(json!({
        "_id": "p7",
        "name": "Galaxy S24 8GB/256GB",
        "baseProductName": "Galaxy S24",
        "originalPrice": 22990000,
        "discount": 10,
        "prices": { "256GB": 20690000.4, "512GB": 23990000 },
        "memoryOptions": ["256GB", "512GB"],
        "ramOptions": { "256GB": "8GB", "512GB": "8GB" },
        "variant": { "ram": "8GB", "storage": "256GB" }
    })));

    assert_eq!(product.id, "p7");
    assert_eq!(product.original_price, 22_990_000);
    assert_eq!(product.discount, Decimal::from(10));
    assert_eq!(product.prices.get("256GB"), Some(&20_690_000));
    assert_eq!(product.prices.get("512GB"), Some(&23_990_000));
    assert_eq!(product.variant.ram, "8GB");
    assert_eq!(product.ram_for_storage("512GB"), Some("8GB"));
}

#[test]
fn normalize_product_clamps_out_of_range_discount() {
    let product = normalize_product(raw(json!({ "_id": "p8", "discount": 150 })));
    assert_eq!(product.discount, Decimal::ONE_HUNDRED);

    let product = normalize_product(raw(json!({ "_id": "p9", "discount": -5 })));
    assert_eq!(product.discount, Decimal::ZERO);
}

#[test]
fn normalize_product_accepts_plain_id_and_single_image() {
    let product = normalize_product(raw(json!({
        "id": "p10",
        "image": "front.png"
    })));
    assert_eq!(product.id, "p10");
    assert_eq!(product.images, vec!["front.png".to_string()]);
}

#[test]
fn normalize_product_variant_falls_back_to_specs() {
    let product = normalize_product(raw(json!({
        "_id": "p11",
        "specs": { "ram": "6GB", "storage": "128GB" }
    })));
    assert_eq!(product.variant.ram, "6GB");
    assert_eq!(product.variant.storage, "128GB");
}

// -----------------------------------------------------------------------
// normalize_reviews
// -----------------------------------------------------------------------

#[test]
fn normalize_reviews_uses_server_stats() {
    let payload: RawProductReviews = serde_json::from_value(json!({
        "reviews": [
            { "_id": "r1", "user_id": { "name": "Lan" }, "rating": 5, "comment": "great" }
        ],
        "stats": { "1": 0, "2": 0, "3": 1, "4": 0, "5": 3, "total": 4, "average": 4.5 }
    }))
    .unwrap();

    let reviews = normalize_reviews(payload);
    assert_eq!(reviews.reviews[0].author, "Lan");
    assert_eq!(reviews.stats.total, 4);
    assert_eq!(reviews.stats.count(5), 3);
    assert_eq!(reviews.stats.average_display(), "4.5");
}

#[test]
fn normalize_reviews_recomputes_missing_stats() {
    let payload: RawProductReviews = serde_json::from_value(json!({
        "reviews": [
            { "_id": "r1", "rating": 4, "comment": "good" },
            { "_id": "r2", "user_id": { "name": " " }, "rating": 2, "comment": "meh" }
        ]
    }))
    .unwrap();

    let reviews = normalize_reviews(payload);
    assert_eq!(reviews.reviews[1].author, "Anonymous");
    assert_eq!(reviews.stats.total, 2);
    assert_eq!(reviews.stats.average_display(), "3.0");
}
