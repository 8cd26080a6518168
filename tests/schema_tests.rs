use record_column::{FieldDescriptor, Record, RecordColumn, generate_schema_for};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
enum Fuel {
    Petrol,
    Diesel,
    Electric,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Record)]
#[record(name = "Vehicle")]
struct VehicleRecord {
    plate: String,
    owner: Option<String>,
    #[record(default = [])]
    tags: Vec<String>,
    #[record(default = {})]
    extras: BTreeMap<String, i64>,
    #[record(hint = "str | int")]
    mileage: serde_json::Value,
    #[serde(rename = "isActive")]
    active: bool,
    #[record(default = "petrol")]
    fuel: Fuel,
    #[serde(skip)]
    cache: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Record)]
struct Address {
    street: String,
    city: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Record)]
struct Depot {
    name: String,
    address: Address,
    fleet: Vec<VehicleRecord>,
}

fn default_theme() -> String {
    "light".to_string()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Record)]
struct Prefs {
    owner: String,
    #[serde(default)]
    size: u32,
    #[serde(default = "default_theme")]
    theme: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Record)]
#[serde(default)]
struct Layout {
    columns: u32,
    gutter: u32,
}

impl Default for Layout {
    fn default() -> Self {
        Self { columns: 12, gutter: 2 }
    }
}

#[test]
fn derive_builds_descriptor_table() {
    assert_eq!(VehicleRecord::record_name(), "Vehicle");

    let fields = VehicleRecord::fields();
    let names: Vec<&str> = fields.iter().map(|f| f.name.as_str()).collect();
    assert_eq!(
        names,
        ["plate", "owner", "tags", "extras", "mileage", "isActive", "fuel", "cache"]
    );

    assert_eq!(fields[0], FieldDescriptor::new("plate", "String"));
    assert_eq!(fields[1].type_hint, "Option<String>");
    assert_eq!(fields[2].default, Some(json!([])));
    assert_eq!(fields[3].type_hint, "BTreeMap<String, i64>");
    assert_eq!(fields[3].default, Some(json!({})));
    assert_eq!(fields[4].type_hint, "str | int");
    assert!(!fields[7].init);
}

#[test]
fn schema_maps_every_form() {
    let schema = generate_schema_for::<VehicleRecord>();
    let properties = &schema["properties"];

    assert_eq!(properties["plate"], json!({"type": "string"}));
    assert_eq!(properties["owner"], json!({"type": "string"}));
    assert_eq!(
        properties["tags"],
        json!({"type": "array", "items": {"type": "string"}, "default": []})
    );
    assert_eq!(properties["extras"], json!({"type": "object", "default": {}}));
    assert_eq!(
        properties["mileage"],
        json!({"anyOf": [{"type": "string"}, {"type": "number"}]})
    );
    assert_eq!(properties["isActive"], json!({"type": "boolean"}));
    // enums have no scalar mapping; the default is still carried
    assert_eq!(properties["fuel"], json!({"default": "petrol"}));
    assert_eq!(properties["cache"], json!({"type": "string"}));
}

#[test]
fn required_is_exactly_constructor_fields_without_defaults() {
    let schema = generate_schema_for::<VehicleRecord>();
    assert_eq!(schema["required"], json!(["plate", "owner", "mileage", "isActive"]));

    let property_names: Vec<&String> = schema["properties"].as_object().unwrap().keys().collect();
    let field_names: Vec<String> = VehicleRecord::fields().into_iter().map(|f| f.name).collect();
    assert_eq!(property_names, field_names.iter().collect::<Vec<_>>());
}

#[test]
fn hydration_applies_defaults_and_enum_coercion() {
    let column = RecordColumn::<VehicleRecord>::new();
    let vehicle = column
        .hydrate(json!({"plate": "AB-123", "mileage": 42, "isActive": true, "fuel": "diesel"}))
        .unwrap();

    assert_eq!(vehicle.owner, None);
    assert!(vehicle.tags.is_empty());
    assert!(vehicle.extras.is_empty());
    assert_eq!(vehicle.mileage, json!(42));
    assert!(vehicle.active);
    assert_eq!(vehicle.fuel, Fuel::Diesel);
    assert_eq!(vehicle.cache, None);

    let defaulted = column
        .hydrate(json!({"plate": "CD-456", "mileage": "unknown", "isActive": false}))
        .unwrap();
    assert_eq!(defaulted.fuel, Fuel::Petrol);
}

#[test]
fn unknown_enum_variant_is_a_type_mismatch() {
    let column = RecordColumn::<VehicleRecord>::new();
    let err = column
        .hydrate(json!({"plate": "AB-123", "mileage": 1, "isActive": true, "fuel": "steam"}))
        .unwrap_err();
    assert_eq!(err.to_string(), "Value must be of type Vehicle");
}

#[test]
fn round_trip_is_lossless() {
    let column = RecordColumn::<VehicleRecord>::new();
    let vehicle = VehicleRecord {
        plate: "EF-789".to_string(),
        owner: Some("Zoë".to_string()),
        tags: vec!["fleet".to_string(), "van".to_string()],
        extras: BTreeMap::from([("seats".to_string(), 3)]),
        mileage: json!("n/a"),
        active: true,
        fuel: Fuel::Electric,
        cache: None,
    };

    let mapping = column.to_mapping(&vehicle).unwrap();
    assert_eq!(mapping["isActive"], json!(true));
    assert!(!mapping.contains_key("cache"));
    assert_eq!(column.hydrate(serde_json::Value::Object(mapping)).unwrap(), vehicle);

    let depots = RecordColumn::<Depot>::new();
    let depot = Depot {
        name: "North".to_string(),
        address: Address {
            street: "1 Quay Rd".to_string(),
            city: "Hull".to_string(),
        },
        fleet: vec![vehicle],
    };

    let mapping = depots.to_mapping(&depot).unwrap();
    assert_eq!(mapping["address"], json!({"street": "1 Quay Rd", "city": "Hull"}));
    assert_eq!(mapping["fleet"][0]["plate"], json!("EF-789"));
    assert_eq!(mapping["fleet"][0]["extras"], json!({"seats": 3}));
    assert_eq!(depots.hydrate(serde_json::Value::Object(mapping)).unwrap(), depot);

    let stored = depots
        .get_prep_value(&record_column::FieldValue::Record(depot.clone()))
        .unwrap();
    assert_eq!(depots.from_db_value(stored.as_deref()).unwrap(), Some(depot));
}

#[test]
fn serde_defaults_are_not_required() {
    let schema = generate_schema_for::<Prefs>();
    assert_eq!(schema["required"], json!(["owner"]));
    assert_eq!(schema["properties"]["size"], json!({"type": "number", "default": 0}));
    assert_eq!(schema["properties"]["theme"], json!({"type": "string", "default": "light"}));

    let prefs = RecordColumn::<Prefs>::new().hydrate(json!({"owner": "x"})).unwrap();
    assert_eq!(
        prefs,
        Prefs { owner: "x".to_string(), size: 0, theme: "light".to_string() }
    );
}

#[test]
fn container_serde_default_covers_every_field() {
    let schema = generate_schema_for::<Layout>();
    assert_eq!(schema["required"], json!([]));
    assert_eq!(schema["properties"]["columns"]["default"], json!(12));
    assert_eq!(schema["properties"]["gutter"]["default"], json!(2));
    assert_eq!(
        RecordColumn::<Layout>::new().hydrate(json!({"gutter": 4})).unwrap(),
        Layout { columns: 12, gutter: 4 }
    );
}

#[test]
fn deconstruct_exposes_record_shape() {
    let column = RecordColumn::<VehicleRecord>::with_options(
        record_column::ColumnOptions::new().name("vehicle").null(true),
    );
    let deconstructed = column.deconstruct();

    assert_eq!(deconstructed.name.as_deref(), Some("vehicle"));
    assert_eq!(deconstructed.path, "record_column::RecordColumn");
    assert_eq!(deconstructed.kwargs["null"], json!(true));
    assert_eq!(deconstructed.kwargs["record_type"], json!("Vehicle"));
    assert!(!deconstructed.kwargs.contains_key("blank"));
    assert_eq!(deconstructed.record_type, VehicleRecord::record_type());
    assert!(column.non_db_attrs().contains(&"record_type"));
}
