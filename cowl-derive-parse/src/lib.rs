#![warn(missing_docs)]
#![doc = include_str!("../README.md")]

pub use unsynn::*;

keyword! {
    /// The "pub" keyword.
    pub KPub = "pub";
    /// The "struct" keyword.
    pub KStruct = "struct";
    /// The "doc" keyword.
    pub KDoc = "doc";
    /// The "crate" keyword.
    pub KCrate = "crate";
    /// The "in" keyword.
    pub KIn = "in";
    /// The "cowl" keyword.
    pub KCowl = "cowl";
    /// The "setter" keyword.
    pub KSetter = "setter";
    /// The "sensitive" keyword.
    pub KSensitive = "sensitive";
    /// The "skip_serializing" keyword.
    pub KSkipSerializing = "skip_serializing";
}

operator! {
    /// Represents the '=' operator.
    pub Eq = "=";
    /// Represents the ';' operator.
    pub Semi = ";";
}

/// Parses tokens and groups until `C` is found on the current token tree level.
pub type VerbatimUntil<C> = Many<Cons<Except<C>, AngleTokenTree>>;

/// Represents a module path, consisting of an optional path separator followed
/// by a path-separator-delimited sequence of identifiers.
pub type ModPath = Cons<Option<PathSep>, PathSepDelimited<Ident>>;

unsynn! {
    /// Parses either a `TokenTree` or `<...>` grouping (which is not a
    /// [`Group`] as far as proc-macros are concerned).
    #[derive(Clone)]
    pub struct AngleTokenTree(
        #[allow(clippy::type_complexity)]
        pub Either<Cons<Lt, Vec<Cons<Except<Gt>, AngleTokenTree>>, Gt>, TokenTree>,
    );

    /// Represents visibility modifiers for items.
    pub enum Vis {
        /// `pub(in? crate::foo::bar)`/`pub(in? ::foo::bar)`
        PubIn(Cons<KPub, ParenthesisGroupContaining<Cons<Option<KIn>, ModPath>>>),
        /// Public visibility, indicated by the "pub" keyword.
        Pub(KPub),
    }

    /// Represents an attribute annotation, typically in the form `#[attr]`.
    pub struct Attribute {
        /// The pound sign preceding the attribute.
        pub _pound: Pound,
        /// The content of the attribute enclosed in square brackets.
        pub body: BracketGroupContaining<AttributeInner>,
    }

    /// Represents the inner content of an attribute annotation.
    pub enum AttributeInner {
        /// A cowl attribute carrying field metadata.
        Cowl(CowlAttr),
        /// A documentation attribute.
        Doc(DocInner),
        /// Any other attribute, represented as a sequence of token trees.
        Any(Vec<TokenTree>),
    }

    /// Represents a cowl attribute: `#[cowl(...)]`.
    pub struct CowlAttr {
        /// The keyword for the cowl attribute.
        pub _cowl: KCowl,
        /// The inner content of the cowl attribute.
        pub inner: ParenthesisGroupContaining<CommaDelimitedVec<CowlInner>>,
    }

    /// Represents one entry inside a `#[cowl(...)]` attribute.
    pub enum CowlInner {
        /// A setter attribute naming the field's custom write logic
        /// (`#[cowl(setter = path::to::fn)]`).
        Setter(SetterInner),
        /// A sensitive attribute (`#[cowl(sensitive)]`).
        Sensitive(KSensitive),
        /// A skip_serializing attribute (`#[cowl(skip_serializing)]`).
        SkipSerializing(KSkipSerializing),
    }

    /// Inner value for `#[cowl(setter = ...)]`.
    pub struct SetterInner {
        /// The "setter" keyword.
        pub _kw_setter: KSetter,
        /// The equals sign '='.
        pub _eq: Eq,
        /// Path to a `fn(V) -> V` transforming the input before storage.
        pub path: ModPath,
    }

    /// Represents documentation for an item.
    pub struct DocInner {
        /// The "doc" keyword.
        pub _kw_doc: KDoc,
        /// The equality operator.
        pub _eq: Eq,
        /// The documentation content as a literal string.
        pub value: LiteralString,
    }

    /// Represents a struct definition.
    pub struct Struct {
        /// Attributes applied to the struct.
        pub attributes: Vec<Attribute>,
        /// The visibility modifier of the struct (e.g., `pub`).
        pub _vis: Option<Vis>,
        /// The "struct" keyword.
        pub _kw_struct: KStruct,
        /// The name of the struct.
        pub name: Ident,
        /// The variant of struct (named fields, tuple, or unit).
        pub kind: StructKind,
    }

    /// Represents the kind of a struct definition.
    ///
    /// Tuple and unit structs are parsed so that the emitter can reject them
    /// with a proper diagnostic instead of a generic parse failure.
    pub enum StructKind {
        /// A regular struct with named fields, e.g., `struct Foo { bar: u32 }`.
        Struct {
            /// The fields enclosed in braces `{}`.
            fields: BraceGroupContaining<CommaDelimitedVec<StructField>>,
        },
        /// A tuple struct, e.g., `struct Foo(u32, String);`.
        Tuple {
            /// The fields enclosed in parentheses `()`.
            fields: ParenthesisGroupContaining<CommaDelimitedVec<TupleField>>,
            /// The trailing semicolon `;`.
            _semi: Semi,
        },
        /// A unit struct, e.g., `struct Foo;`.
        Unit {
            /// The trailing semicolon `;`.
            _semi: Semi,
        },
    }

    /// Represents a field within a regular struct definition,
    /// e.g., `pub name: String`.
    pub struct StructField {
        /// Attributes applied to the field.
        pub attributes: Vec<Attribute>,
        /// Optional visibility modifier (e.g., `pub`).
        pub _vis: Option<Vis>,
        /// The name of the field.
        pub name: Ident,
        /// The colon separating the name and type.
        pub _colon: Colon,
        /// The type of the field.
        pub typ: VerbatimUntil<Comma>,
    }

    /// Represents a field within a tuple struct definition, e.g., `pub String`.
    pub struct TupleField {
        /// Attributes applied to the field.
        pub attributes: Vec<Attribute>,
        /// Optional visibility modifier (e.g., `pub`).
        pub _vis: Option<Vis>,
        /// The type of the field.
        pub typ: VerbatimUntil<Comma>,
    }
}

impl core::fmt::Display for AngleTokenTree {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match &self.0 {
            Either::First(it) => {
                write!(f, "<")?;
                for it in it.second.iter() {
                    write!(f, "{}", it.second)?;
                }
                write!(f, ">")?;
            }
            Either::Second(it) => write!(f, "{it}")?,
            Either::Third(Invalid) => unreachable!(),
            Either::Fourth(Invalid) => unreachable!(),
        };
        Ok(())
    }
}

/// Display the verbatim tokens until the given token.
pub struct VerbatimDisplay<'a, C>(pub &'a VerbatimUntil<C>);

impl<C> core::fmt::Display for VerbatimDisplay<'_, C> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        for tt in self.0.0.iter() {
            write!(f, "{}", tt.value.second)?;
        }
        Ok(())
    }
}

impl StructField {
    /// Returns an iterator over the `CowlInner` content of `#[cowl(...)]`
    /// attributes applied to this field.
    pub fn cowl_attributes(&self) -> impl Iterator<Item = &CowlInner> {
        self.attributes
            .iter()
            .filter_map(|attr| match &attr.body.content {
                AttributeInner::Cowl(c) => Some(&c.inner.content.0),
                _ => None,
            })
            .flatten()
            .map(|d| &d.value)
    }

    /// Returns the field's doc comment lines, quotes stripped.
    pub fn doc_lines(&self) -> Vec<String> {
        doc_lines(&self.attributes)
    }
}

impl Struct {
    /// Returns the struct's doc comment lines, quotes stripped.
    pub fn doc_lines(&self) -> Vec<String> {
        doc_lines(&self.attributes)
    }
}

fn doc_lines(attributes: &[Attribute]) -> Vec<String> {
    attributes
        .iter()
        .filter_map(|attr| match &attr.body.content {
            AttributeInner::Doc(doc) => Some(doc.value.as_str().replace("\\\"", "\"")),
            _ => None,
        })
        .collect()
}
