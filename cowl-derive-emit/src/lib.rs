#![doc = include_str!("../README.md")]

use cowl_derive_parse::*;

mod process_struct;

/// Expands `#[derive(Record)]` for one type declaration.
pub fn cowl_derive(input: TokenStream) -> TokenStream {
    let mut i = input.to_token_iter();

    match i.parse::<Cons<Struct, EndOfStream>>() {
        Ok(it) => process_struct::process_struct(it.first),
        Err(err) => {
            panic!(
                "Could not parse type declaration (note: `#[derive(Record)]` supports \
                 plain structs with named fields, no generics): {}\nError: {}",
                input, err
            );
        }
    }
}
