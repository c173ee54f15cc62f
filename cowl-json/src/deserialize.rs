use alloc::string::String;
use alloc::vec::Vec;

use cowl_core::{FieldValue, Record};
use cowl_reflect::Sealed;

use crate::tokenizer::{Span, Spanned, Token, Tokenizer};
use crate::{JsonError, JsonErrorKind};

/// Deserializes a JSON object into a wrapped record.
///
/// The wrapper is produced through the no-clone construction path
/// ([`Sealed::from_owned`]): the freshly built value is owned exclusively by
/// the deserializer, so no defensive copy cycle is spent on it. Member
/// values are coerced by the shape's raw-storage load path, which restores a
/// setter-transformed value verbatim. Unknown keys and uncoercible values
/// fail with [`JsonErrorKind::Field`].
pub fn from_str<T: Record>(json: &str) -> Result<Sealed<T>, JsonError> {
    let mut parser = Parser::new(json);
    let value = parser.parse_value()?;
    parser.expect_eof()?;

    match value.node {
        FieldValue::Record(pairs) => T::shape()
            .from_pairs(pairs)
            .map(Sealed::from_owned)
            .map_err(|err| JsonError {
                kind: JsonErrorKind::Field(err),
                span: value.span,
            }),
        other => Err(JsonError {
            kind: JsonErrorKind::UnexpectedToken {
                got: match other {
                    FieldValue::List(_) => "an array",
                    FieldValue::Absent => "null",
                    _ => "a scalar",
                },
                wanted: "an object",
            },
            span: value.span,
        }),
    }
}

struct Parser<'input> {
    tokenizer: Tokenizer<'input>,
}

fn unexpected(got: &Token, wanted: &'static str, span: Span) -> JsonError {
    JsonError {
        kind: JsonErrorKind::UnexpectedToken {
            got: got.describe(),
            wanted,
        },
        span,
    }
}

impl<'input> Parser<'input> {
    fn new(input: &'input str) -> Self {
        Self {
            tokenizer: Tokenizer::new(input),
        }
    }

    fn next(&mut self) -> Result<Spanned<Token>, JsonError> {
        self.tokenizer.next_token().map_err(JsonError::from)
    }

    fn expect_eof(&mut self) -> Result<(), JsonError> {
        let token = self.next()?;
        match token.node {
            Token::Eof => Ok(()),
            other => Err(unexpected(&other, "end of input", token.span)),
        }
    }

    fn parse_value(&mut self) -> Result<Spanned<FieldValue>, JsonError> {
        let token = self.next()?;
        self.parse_value_from(token)
    }

    fn parse_value_from(
        &mut self,
        token: Spanned<Token>,
    ) -> Result<Spanned<FieldValue>, JsonError> {
        let span = token.span;
        let node = match token.node {
            Token::Null => FieldValue::Absent,
            Token::True => FieldValue::Bool(true),
            Token::False => FieldValue::Bool(false),
            Token::I64(v) => FieldValue::Int(v),
            Token::U64(v) => FieldValue::UInt(v),
            Token::F64(v) => FieldValue::Float(v),
            Token::String(v) => FieldValue::Text(v),
            Token::LBracket => return self.finish_array(span),
            Token::LBrace => return self.finish_object(span),
            other => return Err(unexpected(&other, "a value", span)),
        };
        Ok(Spanned { node, span })
    }

    fn finish_array(&mut self, open: Span) -> Result<Spanned<FieldValue>, JsonError> {
        let mut items = Vec::new();
        let close;
        loop {
            let token = self.next()?;
            match token.node {
                Token::RBracket if items.is_empty() => {
                    close = token.span;
                    break;
                }
                _ => items.push(self.parse_value_from(token)?.node),
            }

            let separator = self.next()?;
            match separator.node {
                Token::Comma => continue,
                Token::RBracket => {
                    close = separator.span;
                    break;
                }
                other => return Err(unexpected(&other, "',' or ']'", separator.span)),
            }
        }
        Ok(Spanned {
            node: FieldValue::List(items),
            span: Span::new(open.start, close.end() - open.start),
        })
    }

    fn finish_object(&mut self, open: Span) -> Result<Spanned<FieldValue>, JsonError> {
        let mut pairs: Vec<(String, FieldValue)> = Vec::new();
        let close;
        loop {
            let token = self.next()?;
            let key_span = token.span;
            match token.node {
                Token::RBrace if pairs.is_empty() => {
                    close = key_span;
                    break;
                }
                Token::String(key) => {
                    let colon = self.next()?;
                    if !matches!(colon.node, Token::Colon) {
                        return Err(unexpected(&colon.node, "':'", colon.span));
                    }
                    let value = self.parse_value()?;
                    pairs.push((key, value.node));
                }
                other => return Err(unexpected(&other, "a key or '}'", key_span)),
            }

            let separator = self.next()?;
            match separator.node {
                Token::Comma => continue,
                Token::RBrace => {
                    close = separator.span;
                    break;
                }
                other => return Err(unexpected(&other, "',' or '}'", separator.span)),
            }
        }
        Ok(Spanned {
            node: FieldValue::Record(pairs),
            span: Span::new(open.start, close.end() - open.start),
        })
    }
}
