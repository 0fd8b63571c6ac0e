//! `$jsonSchema` validators per collection and generation.
//!
//! Enumerated fields are generated from the closed enums in `amazonas-core`.
//! Fields that are optional inside snapshots and summaries additionally
//! accept `null`.

use amazonas_core::{
    CollectionKind, OrderStatus, PaymentMethod, PaymentStatus, ProductStatus, SchemaGeneration,
};
use bson::{Bson, Document, doc};

fn bson_type(name: &str) -> Document {
    doc! { "bsonType": name }
}

fn bson_types(names: &[&str]) -> Document {
    doc! { "bsonType": names.to_vec() }
}

fn string() -> Document {
    bson_type("string")
}

fn nullable_string() -> Document {
    bson_types(&["string", "null"])
}

fn number() -> Document {
    bson_types(&["double", "decimal", "int"])
}

fn integer() -> Document {
    bson_types(&["int", "long"])
}

fn date() -> Document {
    bson_type("date")
}

fn nullable_date() -> Document {
    bson_types(&["date", "null"])
}

fn string_array() -> Document {
    doc! { "bsonType": ["array"], "items": string() }
}

fn open_object() -> Document {
    bson_type("object")
}

fn nullable_object() -> Document {
    bson_types(&["object", "null"])
}

fn one_of<T: Copy>(values: &[T], as_str: fn(T) -> &'static str, nullable: bool) -> Document {
    let mut allowed: Vec<Bson> = values.iter().map(|v| Bson::from(as_str(*v))).collect();
    if nullable {
        allowed.push(Bson::Null);
    }
    doc! { "enum": allowed }
}

fn object(required: &[&str], properties: Document) -> Document {
    let mut schema = doc! { "bsonType": "object" };
    if !required.is_empty() {
        schema.insert("required", required.to_vec());
    }
    schema.insert("properties", properties);
    schema
}

/// Shape shared by customer addresses, order shipping addresses and the
/// default address in customer snapshots.
pub fn address() -> Document {
    object(
        &["label", "street", "city", "state", "zip", "country"],
        doc! {
            "label": string(),
            "street": string(),
            "number": bson_types(&["string", "int"]),
            "complement": nullable_string(),
            "district": string(),
            "city": string(),
            "state": string(),
            "zip": string(),
            "country": string(),
            "is_default": bson_type("bool"),
        },
    )
}

/// Validator for `kind` in `generation`.
#[must_use]
pub fn validator(kind: CollectionKind, generation: SchemaGeneration) -> Document {
    match kind {
        CollectionKind::Customers => customers(),
        CollectionKind::Products => products(),
        CollectionKind::Carts => carts(generation),
        CollectionKind::Orders => orders(generation),
        CollectionKind::Reviews => reviews(generation),
        CollectionKind::Payments => payments(),
    }
}

fn customers() -> Document {
    object(
        &["customer_id", "name", "email", "created_at"],
        doc! {
            "_id": {},
            "customer_id": string(),
            "name": string(),
            "email": string(),
            "phones": string_array(),
            "addresses": { "bsonType": ["array"], "items": address() },
            "created_at": date(),
            "updated_at": nullable_date(),
        },
    )
}

fn products() -> Document {
    object(
        &["product_id", "title", "price", "category", "created_at"],
        doc! {
            "_id": {},
            "product_id": string(),
            "title": string(),
            "description": nullable_string(),
            "category": string(),
            "brand": nullable_string(),
            "price": number(),
            "currency": string(),
            "images": string_array(),
            "attributes": open_object(),
            "dimensions": object(&[], doc! {
                "weight_kg": number(),
                "width_cm": number(),
                "height_cm": number(),
                "depth_cm": number(),
            }),
            "stock": object(&[], doc! {
                "available": integer(),
                "reserved": integer(),
            }),
            "status": one_of(ProductStatus::ALL, ProductStatus::as_str, false),
            "created_at": date(),
            "updated_at": nullable_date(),
        },
    )
}

fn carts(generation: SchemaGeneration) -> Document {
    let mut item_properties = doc! {
        "product_id": string(),
        "qty": integer(),
        "variant": nullable_object(),
    };
    let mut item_required = vec!["product_id", "qty"];

    if generation.is_denormalized() {
        item_required.push("product_snapshot");
        item_properties.insert(
            "product_snapshot",
            object(
                &["title", "category", "price_at_add", "currency"],
                doc! {
                    "title": string(),
                    "description": nullable_string(),
                    "category": string(),
                    "brand": nullable_string(),
                    "attributes": open_object(),
                    "price_at_add": number(),
                    "currency": string(),
                    "images": string_array(),
                },
            ),
        );
    }

    object(
        &["customer_id", "items", "updated_at"],
        doc! {
            "_id": {},
            "customer_id": string(),
            "items": { "bsonType": "array", "items": object(&item_required, item_properties) },
            "updated_at": date(),
        },
    )
}

fn orders(generation: SchemaGeneration) -> Document {
    let mut required = vec!["order_id", "customer_id"];
    let mut properties = doc! {
        "_id": {},
        "order_id": string(),
        "customer_id": string(),
        "status": one_of(OrderStatus::ALL, OrderStatus::as_str, false),
    };
    let mut item_properties = doc! {
        "product_id": string(),
        "qty": integer(),
        "variant": nullable_object(),
    };
    let mut item_required = vec!["product_id", "qty"];

    if generation.is_denormalized() {
        required.push("customer_snapshot");
        properties.insert(
            "customer_snapshot",
            object(
                &["name", "email"],
                doc! {
                    "customer_id": nullable_string(),
                    "name": string(),
                    "email": string(),
                    "phones": string_array(),
                    "default_address": address(),
                },
            ),
        );
        item_required.push("product_snapshot");
        item_properties.insert(
            "product_snapshot",
            object(
                &["title", "category", "brand", "price_at_order", "currency"],
                doc! {
                    "title": string(),
                    "description": nullable_string(),
                    "category": string(),
                    "brand": nullable_string(),
                    "attributes": open_object(),
                    "price_at_order": number(),
                    "currency": string(),
                    "images": string_array(),
                    "status": one_of(ProductStatus::ALL, ProductStatus::as_str, true),
                },
            ),
        );
    } else {
        item_required.push("unit_price");
        item_properties.insert("unit_price", number());
    }

    required.extend(["status", "items", "total_amount", "currency", "created_at"]);
    properties.insert(
        "items",
        doc! { "bsonType": "array", "items": object(&item_required, item_properties) },
    );
    properties.insert("shipping_address", address());
    if generation.is_denormalized() {
        properties.insert(
            "payment_summary",
            object(
                &[],
                doc! {
                    "payment_id": nullable_string(),
                    "method": one_of(PaymentMethod::ALL, PaymentMethod::as_str, true),
                    "status": one_of(PaymentStatus::ALL, PaymentStatus::as_str, true),
                },
            ),
        );
    }
    properties.insert("total_amount", number());
    properties.insert("currency", string());
    properties.insert("created_at", date());
    properties.insert("updated_at", nullable_date());

    object(&required, properties)
}

fn reviews(generation: SchemaGeneration) -> Document {
    let mut required = vec!["review_id", "product_id", "customer_id", "rating", "created_at"];
    let mut properties = doc! {
        "_id": {},
        "review_id": string(),
        "product_id": string(),
        "customer_id": string(),
        "rating": { "bsonType": ["int", "long"], "minimum": 1, "maximum": 5 },
        "comment": nullable_string(),
    };

    if generation.is_denormalized() {
        required.extend(["product_snapshot", "customer_snapshot"]);
        properties.insert(
            "product_snapshot",
            object(
                &["title", "category", "brand"],
                doc! {
                    "title": string(),
                    "category": string(),
                    "brand": nullable_string(),
                },
            ),
        );
        properties.insert(
            "customer_snapshot",
            object(
                &["name", "email"],
                doc! {
                    "name": string(),
                    "email": string(),
                },
            ),
        );
    }
    properties.insert("created_at", date());

    object(&required, properties)
}

fn payments() -> Document {
    object(
        &[
            "payment_id",
            "order_id",
            "amount",
            "currency",
            "method",
            "status",
            "created_at",
        ],
        doc! {
            "_id": {},
            "payment_id": string(),
            "order_id": string(),
            "amount": number(),
            "currency": string(),
            "method": one_of(PaymentMethod::ALL, PaymentMethod::as_str, false),
            "status": one_of(PaymentStatus::ALL, PaymentStatus::as_str, false),
            "provider_ref": nullable_string(),
            "metadata": open_object(),
            "created_at": date(),
            "updated_at": nullable_date(),
        },
    )
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn required(schema: &Document) -> Vec<&str> {
        schema
            .get_array("required")
            .unwrap()
            .iter()
            .filter_map(Bson::as_str)
            .collect()
    }

    fn property<'a>(schema: &'a Document, path: &[&str]) -> &'a Document {
        path.iter().fold(schema, |current, key| {
            current.get_document("properties").unwrap().get_document(key).unwrap()
        })
    }

    fn item_schema(schema: &Document) -> &Document {
        property(schema, &["items"]).get_document("items").unwrap()
    }

    #[test]
    fn test_source_of_truth_collections_do_not_depend_on_generation() {
        for kind in [
            CollectionKind::Customers,
            CollectionKind::Products,
            CollectionKind::Payments,
        ] {
            assert_eq!(
                validator(kind, SchemaGeneration::V1),
                validator(kind, SchemaGeneration::V2),
                "{kind}"
            );
        }
    }

    #[test]
    fn test_v2_cart_items_require_snapshot() {
        let v2 = validator(CollectionKind::Carts, SchemaGeneration::V2);
        assert!(required(item_schema(&v2)).contains(&"product_snapshot"));
        let snapshot = property(item_schema(&v2), &["product_snapshot"]);
        assert!(required(snapshot).contains(&"price_at_add"));

        let v1 = validator(CollectionKind::Carts, SchemaGeneration::V1);
        assert!(!required(item_schema(&v1)).contains(&"product_snapshot"));
        assert!(
            !item_schema(&v1)
                .get_document("properties")
                .unwrap()
                .contains_key("product_snapshot")
        );
    }

    #[test]
    fn test_order_price_field_depends_on_generation() {
        let v2 = validator(CollectionKind::Orders, SchemaGeneration::V2);
        assert!(required(&v2).contains(&"customer_snapshot"));
        assert!(required(item_schema(&v2)).contains(&"product_snapshot"));
        assert!(
            required(property(item_schema(&v2), &["product_snapshot"]))
                .contains(&"price_at_order")
        );

        let v1 = validator(CollectionKind::Orders, SchemaGeneration::V1);
        assert!(!required(&v1).contains(&"customer_snapshot"));
        assert!(required(item_schema(&v1)).contains(&"unit_price"));
        assert!(
            !v1.get_document("properties")
                .unwrap()
                .contains_key("payment_summary")
        );
    }

    #[test]
    fn test_review_rating_is_bounded() {
        for generation in [SchemaGeneration::V1, SchemaGeneration::V2] {
            let reviews = validator(CollectionKind::Reviews, generation);
            let rating = property(&reviews, &["rating"]);
            assert_eq!(rating.get_i32("minimum").unwrap(), 1);
            assert_eq!(rating.get_i32("maximum").unwrap(), 5);
        }
        let v2 = validator(CollectionKind::Reviews, SchemaGeneration::V2);
        assert!(required(&v2).contains(&"product_snapshot"));
        assert!(required(&v2).contains(&"customer_snapshot"));
    }

    #[test]
    fn test_enums_come_from_core_types() {
        let orders = validator(CollectionKind::Orders, SchemaGeneration::V2);
        let statuses = property(&orders, &["status"]).get_array("enum").unwrap();
        assert_eq!(statuses.len(), OrderStatus::ALL.len());
        assert!(statuses.contains(&Bson::from("REFUNDED")));

        let summary_method = property(&orders, &["payment_summary", "method"])
            .get_array("enum")
            .unwrap();
        assert!(summary_method.contains(&Bson::Null));
        assert!(summary_method.contains(&Bson::from("PIX")));
    }

    #[test]
    fn test_address_shape_is_shared() {
        let customers = validator(CollectionKind::Customers, SchemaGeneration::V2);
        let orders = validator(CollectionKind::Orders, SchemaGeneration::V2);
        let customer_address = property(&customers, &["addresses"])
            .get_document("items")
            .unwrap();
        assert_eq!(customer_address, property(&orders, &["shipping_address"]));
        assert_eq!(
            customer_address,
            property(&orders, &["customer_snapshot", "default_address"])
        );
    }
}
