//! `amazonas schema` - print a collection definition.
//!
//! Output is relaxed Extended JSON, the same shape `mongosh` shows, so it can
//! be diffed against `db.getCollectionInfos()` of a provisioned database.

use amazonas_core::{CollectionKind, SchemaGeneration};
use amazonas_db::CollectionSchema;
use bson::Bson;

/// Print the validator and indexes of `kind` to stdout.
///
/// # Errors
///
/// Returns an error if the document cannot be rendered as JSON.
pub fn print(
    kind: CollectionKind,
    generation: SchemaGeneration,
) -> Result<(), Box<dyn std::error::Error>> {
    let rendered = render(kind, generation)?;

    #[allow(clippy::print_stdout)]
    {
        println!("{rendered}");
    }
    Ok(())
}

fn render(kind: CollectionKind, generation: SchemaGeneration) -> serde_json::Result<String> {
    let description = CollectionSchema::new(kind, generation).describe();
    serde_json::to_string_pretty(&Bson::Document(description).into_relaxed_extjson())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_render_orders_v2() {
        let json: serde_json::Value =
            serde_json::from_str(&render(CollectionKind::Orders, SchemaGeneration::V2).unwrap())
                .unwrap();

        assert_eq!(json["collection"], "orders");
        assert_eq!(json["validationLevel"], "moderate");
        let properties = &json["validator"]["$jsonSchema"]["properties"];
        assert!(properties.get("customer_snapshot").is_some());
        assert!(properties.get("payment_summary").is_some());

        let names: Vec<&str> = json["indexes"]
            .as_array()
            .unwrap()
            .iter()
            .map(|index| index["name"].as_str().unwrap())
            .collect();
        assert!(names.contains(&"ux_order_id"));
    }

    #[test]
    fn test_render_orders_v1_has_no_snapshots() {
        let json: serde_json::Value =
            serde_json::from_str(&render(CollectionKind::Orders, SchemaGeneration::V1).unwrap())
                .unwrap();
        let properties = &json["validator"]["$jsonSchema"]["properties"];
        assert!(properties.get("customer_snapshot").is_none());
        assert!(properties.get("payment_summary").is_none());
    }
}
