use cowl::{FieldError, Record, Sealed};
use cowl_json::{JsonError, JsonErrorKind, TokenErrorKind};

fn double(v: u64) -> u64 {
    v * 2
}

#[derive(Record, Default)]
struct Order {
    order_id: u64,
    #[cowl(setter = double)]
    price: u64,
    note: Option<String>,
    tags: Vec<String>,
}

#[derive(Record, Default)]
struct Receipt {
    total: f64,
    order: Order,
    #[cowl(skip_serializing)]
    draft_revision: u64,
}

#[test]
fn members_serialize_in_declaration_order() {
    let order = Sealed::new(&Order::default())
        .set("order_id", 1u64)
        .unwrap()
        .set("tags", vec!["a".to_string(), "b".to_string()])
        .unwrap();
    assert_eq!(
        cowl_json::to_string(&order).unwrap(),
        r#"{"order_id":1,"price":0,"note":null,"tags":["a","b"]}"#
    );
}

#[test]
fn round_trip_preserves_every_member_including_absent_ones() -> eyre::Result<()> {
    cowl_testhelpers::setup();

    let order = Sealed::new(&Order::default())
        .set("order_id", 12u64)?
        .set("price", 8u64)?;
    // The doubling setter ran on the way in...
    assert_eq!(order.get(|o| o.price), 16);

    let json = cowl_json::to_string(&order)?;
    let back: Sealed<Order> = cowl_json::from_str(&json)?;

    // ...and is not replayed on the way back: storage is restored verbatim.
    assert_eq!(back.get(|o| o.order_id), 12);
    assert_eq!(back.get(|o| o.price), 16);
    assert_eq!(back.get(|o| o.note.clone()), None);
    assert!(back.get(|o| o.tags.is_empty()));
    Ok(())
}

#[test]
fn nested_records_round_trip() {
    let receipt = Sealed::new(&Receipt::default())
        .set("total", 16.5f64)
        .unwrap()
        .update(|r| r.order.order_id = 3);

    let json = cowl_json::to_string(&receipt).unwrap();
    assert_eq!(
        json,
        r#"{"total":16.5,"order":{"order_id":3,"price":0,"note":null,"tags":[]}}"#
    );

    let back: Sealed<Receipt> = cowl_json::from_str(&json).unwrap();
    assert_eq!(back.get(|r| r.total), 16.5);
    assert_eq!(back.get(|r| r.order.order_id), 3);
}

#[test]
fn skipped_members_keep_their_default_on_ingest() {
    let receipt = Sealed::new(&Receipt::default()).update(|r| r.draft_revision = 9);
    let json = cowl_json::to_string(&receipt).unwrap();
    assert!(!json.contains("draft_revision"));

    let back: Sealed<Receipt> = cowl_json::from_str(&json).unwrap();
    assert_eq!(back.get(|r| r.draft_revision), 0);
}

#[test]
fn unknown_keys_are_field_resolution_errors() {
    let err = cowl_json::from_str::<Order>(r#"{"order_code":1}"#).unwrap_err();
    match err.kind {
        JsonErrorKind::Field(FieldError::NoSuchField { type_name, field }) => {
            assert_eq!(type_name, "Order");
            assert_eq!(field, "order_code");
        }
        other => panic!("expected a field resolution error, got {other:?}"),
    }
}

#[test]
fn uncoercible_values_are_conversion_errors() {
    let err = cowl_json::from_str::<Order>(r#"{"order_id":"one"}"#).unwrap_err();
    assert!(matches!(
        err.kind,
        JsonErrorKind::Field(FieldError::Coerce { field: "order_id", .. })
    ));
}

#[test]
fn numbers_coerce_through_the_shape_layer() {
    // A fractional JSON number truncates toward zero into an integer member.
    let back: Sealed<Order> = cowl_json::from_str(r#"{"order_id":6.7}"#).unwrap();
    assert_eq!(back.get(|o| o.order_id), 6);

    // And an integral JSON number widens into a float member.
    let receipt: Sealed<Receipt> = cowl_json::from_str(r#"{"total":4}"#).unwrap();
    assert_eq!(receipt.get(|r| r.total), 4.0);
}

#[test]
fn syntax_errors_carry_a_position() {
    let err: JsonError = cowl_json::from_str::<Order>("{\"order_id\" 1}").unwrap_err();
    assert!(matches!(err.kind, JsonErrorKind::UnexpectedToken { .. }));

    let err = cowl_json::from_str::<Order>("{\"note\":\"unterminated").unwrap_err();
    assert!(matches!(
        err.kind,
        JsonErrorKind::Token(TokenErrorKind::UnexpectedEof(_))
    ));
}

#[test]
fn top_level_must_be_an_object() {
    let err = cowl_json::from_str::<Order>("[1,2]").unwrap_err();
    assert!(matches!(err.kind, JsonErrorKind::UnexpectedToken { .. }));
}

#[test]
fn trailing_input_is_rejected() {
    let err = cowl_json::from_str::<Order>("{} {}").unwrap_err();
    assert!(matches!(
        err.kind,
        JsonErrorKind::UnexpectedToken {
            wanted: "end of input",
            ..
        }
    ));
}
