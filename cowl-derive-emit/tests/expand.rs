use cowl_derive_parse::TokenStream;

fn expand(source: &str) -> String {
    let input: TokenStream = source.parse().expect("test input must tokenize");
    cowl_derive_emit::cowl_derive(input).to_string()
}

#[test]
fn emits_record_and_field_type_impls() {
    let output = expand("struct Order { order_id: u64, note: Option<String> }");
    assert!(output.contains("Record for Order"));
    assert!(output.contains("FieldType for Order"));
    assert!(output.contains("\"order_id\""));
    assert!(output.contains("\"note\""));
}

#[test]
fn setter_attribute_routes_the_write_path() {
    let output = expand(
        "struct Order { #[cowl(setter = double)] price: u64 }",
    );
    assert!(output.contains("custom_setter"));
    assert!(output.contains("double"));
}

#[test]
fn flag_attributes_emit_field_flags() {
    let output = expand(
        "struct Card { #[cowl(sensitive)] number: String, #[cowl(skip_serializing)] scratch: u64 }",
    );
    assert!(output.contains("SENSITIVE"));
    assert!(output.contains("SKIP_SERIALIZING"));
}

#[test]
#[should_panic(expected = "requires named fields")]
fn tuple_structs_are_rejected() {
    expand("struct Pair(u32, u32);");
}
