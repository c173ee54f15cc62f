//! A `Record` impl written by hand, the way the derive macro would emit it.
//! Exercises the shape builder and the compiled operations without any
//! macro in the loop.

use cowl_core::{
    FieldDef, FieldError, FieldKind, FieldType, FieldValue, Record, RecordShape, ValueKind,
};

#[derive(Default, Debug, PartialEq)]
struct Account {
    id: u64,
    balance: i64,
    label: Option<String>,
}

/// Write logic for `balance`: negative balances clamp to zero.
fn clamp_balance(value: i64) -> i64 {
    value.max(0)
}

impl Record for Account {
    fn shape() -> &'static RecordShape<Self> {
        static SHAPE: RecordShape<Account> = {
            let fields: &'static [FieldDef<Account>] = &const {
                [
                    FieldDef::builder()
                        .name("id")
                        .kind(<u64 as FieldType>::KIND)
                        .read(|account: &Account| FieldType::into_value(account.id))
                        .write(|account: &mut Account, value: FieldValue| {
                            account.id = FieldType::from_value(value)?;
                            Ok(())
                        })
                        .load(|account: &mut Account, value: FieldValue| {
                            account.id = FieldType::from_value(value)?;
                            Ok(())
                        })
                        .copy(|target: &mut Account, source: &Account| {
                            target.id = FieldType::shallow_clone(&source.id);
                        })
                        .build(),
                    FieldDef::builder()
                        .name("balance")
                        .kind(<i64 as FieldType>::KIND)
                        .custom_setter()
                        .read(|account: &Account| FieldType::into_value(account.balance))
                        .write(|account: &mut Account, value: FieldValue| {
                            account.balance = clamp_balance(FieldType::from_value(value)?);
                            Ok(())
                        })
                        .load(|account: &mut Account, value: FieldValue| {
                            account.balance = FieldType::from_value(value)?;
                            Ok(())
                        })
                        .copy(|target: &mut Account, source: &Account| {
                            target.balance = FieldType::shallow_clone(&source.balance);
                        })
                        .build(),
                    FieldDef::builder()
                        .name("label")
                        .kind(<Option<String> as FieldType>::KIND)
                        .read(|account: &Account| {
                            FieldType::into_value(FieldType::shallow_clone(&account.label))
                        })
                        .write(|account: &mut Account, value: FieldValue| {
                            account.label = FieldType::from_value(value)?;
                            Ok(())
                        })
                        .load(|account: &mut Account, value: FieldValue| {
                            account.label = FieldType::from_value(value)?;
                            Ok(())
                        })
                        .copy(|target: &mut Account, source: &Account| {
                            target.label = FieldType::shallow_clone(&source.label);
                        })
                        .build(),
                ]
            };
            RecordShape::builder()
                .type_name("Account")
                .fields(fields)
                .construct(Account::default)
                .build()
        };
        &SHAPE
    }
}

#[test]
fn construct_is_default_initialized() {
    let account = Account::shape().construct();
    assert_eq!(account, Account::default());
}

#[test]
fn set_honors_custom_write_logic() -> eyre::Result<()> {
    let shape = Account::shape();
    let mut account = shape.construct();
    shape.set(&mut account, "balance", -50i64)?;
    assert_eq!(account.balance, 0);
    shape.set(&mut account, "balance", 120i64)?;
    assert_eq!(account.balance, 120);
    Ok(())
}

#[test]
fn clone_shallow_bypasses_custom_write_logic() {
    let source = Account {
        id: 7,
        balance: -13,
        label: Some("overdrawn".to_string()),
    };
    let copy = Account::shape().clone_shallow(&source);
    // The clamp setter never ran: raw storage is copied verbatim.
    assert_eq!(copy, source);
}

#[test]
fn unknown_names_fail_with_field_resolution_errors() {
    let shape = Account::shape();
    let mut account = shape.construct();
    let err = shape.set(&mut account, "iban", 1u64).unwrap_err();
    assert_eq!(
        err,
        FieldError::NoSuchField {
            type_name: "Account",
            field: "iban".to_string(),
        }
    );
}

#[test]
fn coercion_failures_name_the_field() {
    let shape = Account::shape();
    let mut account = shape.construct();
    let err = shape
        .set(&mut account, "id", "one".to_string())
        .unwrap_err();
    match err {
        FieldError::Coerce { field, source, .. } => {
            assert_eq!(field, "id");
            assert_eq!(
                source,
                cowl_core::CoerceError::wrong_kind(FieldKind::UInt, ValueKind::Text)
            );
        }
        other => panic!("expected a coerce error, got {other:?}"),
    }
}

#[test]
fn pairs_enumerate_in_declaration_order_and_round_trip_raw_storage() {
    let source = Account {
        id: 9,
        balance: -4,
        label: None,
    };
    let shape = Account::shape();
    let pairs = shape.to_pairs(&source);
    assert_eq!(
        pairs,
        vec![
            ("id", FieldValue::UInt(9)),
            ("balance", FieldValue::Int(-4)),
            ("label", FieldValue::Absent),
        ]
    );

    // Deserialization loads raw storage: the clamp setter does not run, so
    // the negative balance survives the round trip.
    let restored = shape.from_pairs(pairs).unwrap();
    assert_eq!(restored, source);
}

#[test]
fn field_lookup_is_cached_and_repeatable() {
    let shape = Account::shape();
    for _ in 0..3 {
        assert_eq!(shape.field_position("id"), Some(0));
        assert_eq!(shape.field_position("label"), Some(2));
        assert_eq!(shape.field_position("missing"), None);
    }
}
