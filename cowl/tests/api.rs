use cowl::{Draft, Record, Sealed};
use static_assertions::assert_impl_all;

#[derive(Record, Default)]
struct Order {
    order_id: u64,
    note: Option<String>,
}

assert_impl_all!(Sealed<Order>: Send, Sync, Clone);
assert_impl_all!(Draft<Order>: Send, Sync);

#[test]
fn wrapper_scenario() -> eyre::Result<()> {
    let w = Sealed::new(&Order::default());
    let w2 = w.set("order_id", 1u64)?;
    assert_eq!(w.get(|x| x.order_id), 0);
    assert_eq!(w2.get(|x| x.order_id), 1);
    Ok(())
}

#[test]
fn builder_scenario() {
    let w = Sealed::new(&Order::default());
    let mut b = w.to_draft();
    b.update(|x| x.order_id = 5);
    b.update(|x| x.order_id = 6);
    assert_eq!(b.get(|x| x.order_id), 6);
}

#[test]
fn shape_metadata_reflects_the_declaration() {
    let shape = Order::shape();
    assert_eq!(shape.type_name(), "Order");
    let names: Vec<_> = shape.fields().iter().map(|f| f.name).collect();
    assert_eq!(names, vec!["order_id", "note"]);
    assert!(!shape.fields()[0].has_setter);
}

#[test]
fn doc_comments_are_captured_into_the_shape() {
    /// A thing with documentation.
    #[derive(Record, Default)]
    struct Documented {
        /// How many there are.
        count: u32,
    }

    let shape = Documented::shape();
    assert_eq!(shape.doc(), &[" A thing with documentation."][..]);
    assert_eq!(shape.fields()[0].doc, &[" How many there are."][..]);
}
