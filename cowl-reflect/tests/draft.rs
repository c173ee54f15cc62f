use cowl::{Draft, Record, Sealed};

fn double(v: u64) -> u64 {
    v * 2
}

#[derive(Record, Default)]
struct Order {
    order_id: u64,
    #[cowl(setter = double)]
    price: u64,
    note: Option<String>,
}

#[test]
fn updates_accumulate_in_place_on_a_single_instance() {
    let w = Sealed::new(&Order::default());
    let mut b = w.to_draft();

    let before = b.value() as *const Order as usize;
    b.update(|o| o.order_id = 5);
    b.update(|o| o.order_id = 6);
    let after = b.value() as *const Order as usize;

    assert_eq!(b.get(|o| o.order_id), 6);
    // Same staged instance throughout, no cloning per change.
    assert_eq!(before, after);
}

#[test]
fn update_chains_fluently() {
    let mut b = Draft::<Order>::default();
    b.update(|o| o.order_id = 1)
        .update(|o| o.note = Some("rush".to_string()));
    assert_eq!(b.get(|o| o.order_id), 1);
    assert_eq!(b.get(|o| o.note.clone()), Some("rush".to_string()));
}

#[test]
fn seal_severs_the_link_to_the_draft() {
    let mut b = Draft::<Order>::default();
    b.update(|o| o.order_id = 7);
    let sealed = b.seal();

    // Further draft mutation cannot retroactively affect the wrapper.
    b.update(|o| o.order_id = 8);
    assert_eq!(sealed.get(|o| o.order_id), 7);
    assert_eq!(b.get(|o| o.order_id), 8);
}

#[test]
fn to_draft_then_seal_yields_a_distinct_wrapper() {
    let w = Sealed::new(&Order::default());
    let roundtripped = w.to_draft().seal();
    assert!(!core::ptr::eq(w.value(), roundtripped.value()));
    assert_eq!(
        w.get(|o| o.order_id),
        roundtripped.get(|o| o.order_id)
    );
}

#[test]
fn draft_set_honors_custom_write_logic() {
    let mut b = Draft::<Order>::default();
    b.set("price", 21u64).unwrap();
    assert_eq!(b.get(|o| o.price), 42);

    let sealed = b.seal();
    assert_eq!(sealed.get(|o| o.price), 42);
}

#[test]
fn draft_mutation_does_not_touch_the_source_wrapper() {
    let w = Sealed::new(&Order::default())
        .set("order_id", 1u64)
        .unwrap();
    let mut b = w.to_draft();
    b.update(|o| o.order_id = 2);
    assert_eq!(w.get(|o| o.order_id), 1);
}
