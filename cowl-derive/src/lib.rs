#![doc = include_str!("../README.md")]

/// Derives `cowl::Record` (and `cowl::FieldType`) for a struct with named
/// fields. The struct must implement `Default`.
///
/// Field attributes, under `#[cowl(...)]`:
/// - `setter = path`: a `fn(V) -> V` the write path routes through
/// - `sensitive`: redacted from `Debug` output of wrapped values
/// - `skip_serializing`: omitted from name/value pair enumeration
#[proc_macro_derive(Record, attributes(cowl))]
pub fn record_derive(input: proc_macro::TokenStream) -> proc_macro::TokenStream {
    cowl_derive_emit::cowl_derive(input.into()).into()
}
