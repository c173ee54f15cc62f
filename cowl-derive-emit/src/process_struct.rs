use cowl_derive_parse::{ToTokens, *};
use quote::quote;

/// Processes a struct declaration to implement `Record` (and `FieldType`, so
/// the type can itself be a member of another record).
///
/// Example input:
/// ```rust,ignore
/// struct Order {
///     order_id: u64,
///     price: u64,
/// }
/// ```
pub(crate) fn process_struct(parsed: Struct) -> TokenStream {
    let name = &parsed.name;
    let name_str = name.to_string();

    let fields = match &parsed.kind {
        StructKind::Struct { fields } => &fields.content.0,
        StructKind::Tuple { .. } => {
            panic!("#[derive(Record)] requires named fields; `{name_str}` is a tuple struct")
        }
        StructKind::Unit { .. } => {
            panic!("#[derive(Record)] requires named fields; `{name_str}` is a unit struct")
        }
    };

    let field_defs = fields
        .iter()
        .map(|field| gen_field(&field.value, name))
        .collect::<Vec<TokenStream>>();

    let container_doc = parsed.doc_lines();
    let maybe_doc = if container_doc.is_empty() {
        quote! {}
    } else {
        quote! { .doc(&[#(#container_doc),*]) }
    };

    quote! {
        #[automatically_derived]
        impl ::cowl::Record for #name {
            fn shape() -> &'static ::cowl::RecordShape<Self> {
                static SHAPE: ::cowl::RecordShape<#name> = {
                    let fields: &'static [::cowl::FieldDef<#name>] =
                        &const { [#(#field_defs),*] };
                    ::cowl::RecordShape::builder()
                        .type_name(#name_str)
                        #maybe_doc
                        .fields(fields)
                        .construct(<#name as ::core::default::Default>::default)
                        .build()
                };
                &SHAPE
            }
        }

        #[automatically_derived]
        impl ::cowl::FieldType for #name {
            const KIND: ::cowl::FieldKind = ::cowl::FieldKind::Record;

            fn shallow_clone(&self) -> Self {
                <Self as ::cowl::Record>::shape().clone_shallow(self)
            }

            fn into_value(self) -> ::cowl::FieldValue {
                <Self as ::cowl::Record>::shape().to_record_value(&self)
            }

            fn from_value(
                value: ::cowl::FieldValue,
            ) -> ::core::result::Result<Self, ::cowl::CoerceError> {
                <Self as ::cowl::Record>::shape().from_record_value(value)
            }
        }
    }
}

/// Generates one `::cowl::FieldDef` expression for a named field.
fn gen_field(field: &StructField, struct_name: &Ident) -> TokenStream {
    let field_name = &field.name;
    let field_name_str = field_name.to_string();
    let typ = field.typ.to_token_stream();

    let mut setter = None;
    let mut flags = quote! {};
    let mut flags_empty = true;
    for attr in field.cowl_attributes() {
        match attr {
            CowlInner::Setter(inner) => {
                setter = Some(inner.path.to_token_stream());
            }
            CowlInner::Sensitive(_) => {
                if flags_empty {
                    flags_empty = false;
                    flags = quote! { ::cowl::FieldFlags::SENSITIVE };
                } else {
                    flags = quote! { #flags.union(::cowl::FieldFlags::SENSITIVE) };
                }
            }
            CowlInner::SkipSerializing(_) => {
                if flags_empty {
                    flags_empty = false;
                    flags = quote! { ::cowl::FieldFlags::SKIP_SERIALIZING };
                } else {
                    flags = quote! { #flags.union(::cowl::FieldFlags::SKIP_SERIALIZING) };
                }
            }
        }
    }
    let maybe_flags = if flags_empty {
        quote! {}
    } else {
        quote! { .flags(#flags) }
    };

    let doc = field.doc_lines();
    let maybe_doc = if doc.is_empty() {
        quote! {}
    } else {
        quote! { .doc(&[#(#doc),*]) }
    };

    // The load path always assigns raw storage; the write path additionally
    // routes through the custom setter when one is declared.
    let load = quote! {
        |record: &mut #struct_name, value: ::cowl::FieldValue| {
            record.#field_name = ::cowl::FieldType::from_value(value)?;
            ::core::result::Result::Ok(())
        }
    };
    let (write, maybe_setter) = match setter {
        Some(path) => (
            quote! {
                |record: &mut #struct_name, value: ::cowl::FieldValue| {
                    record.#field_name = #path(::cowl::FieldType::from_value(value)?);
                    ::core::result::Result::Ok(())
                }
            },
            quote! { .custom_setter() },
        ),
        None => (load.clone(), quote! {}),
    };

    quote! {
        ::cowl::FieldDef::builder()
            .name(#field_name_str)
            .kind(<#typ as ::cowl::FieldType>::KIND)
            #maybe_flags
            #maybe_doc
            #maybe_setter
            .read(|record: &#struct_name| {
                ::cowl::FieldType::into_value(
                    ::cowl::FieldType::shallow_clone(&record.#field_name),
                )
            })
            .write(#write)
            .load(#load)
            .copy(|target: &mut #struct_name, source: &#struct_name| {
                target.#field_name = ::cowl::FieldType::shallow_clone(&source.#field_name);
            })
            .build()
    }
}
