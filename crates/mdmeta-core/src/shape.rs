//! Shape notation: a compact text form for descriptors and field shapes.
//!
//! # Syntax
//!
//! Scalars:
//! - `*`: wildcard (descriptors only)
//! - `int`, `bool`, `string`, ...: a pin category
//! - `real(float)`: category with a sub-category
//! - `struct(GameplayTag)`: category with a referenced type
//! - `struct(?)`: unresolved reference (field shapes only)
//! - `delegate(@Owner::OnChanged)`: member reference
//!
//! Containers (one level, elements are scalars):
//! - `array<T>`, `set<T>`
//! - `map<K, V>`
//!
//! Type names are resolved by the caller, so both short names
//! (`GameplayTag`) and object paths (`/Script/GameplayTags.GameplayTag`)
//! work as long as the resolver knows them.

use std::ops::Range;

use logos::Logos;

use crate::descriptor::{Category, MemberReference, SubCategory, TypeDescriptor};
use crate::field::FieldType;
use crate::type_ref::TypeRef;

#[derive(Logos, Debug, Clone, PartialEq)]
#[logos(skip r"[ \t\n\r]+")]
enum Token<'src> {
    #[token("array")]
    Array,

    #[token("set")]
    Set,

    #[token("map")]
    Map,

    #[token("<")]
    LAngle,

    #[token(">")]
    RAngle,

    #[token("(")]
    LParen,

    #[token(")")]
    RParen,

    #[token(",")]
    Comma,

    #[token("*")]
    Star,

    #[token("?")]
    Question,

    #[token("@")]
    At,

    #[token("::")]
    ColonColon,

    // Short names and object paths
    #[regex(r"[A-Za-z_/][A-Za-z0-9_./]*", |lex| lex.slice())]
    Ident(&'src str),
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ShapeParseError {
    #[error("unexpected character {text:?} at {span:?}")]
    UnexpectedChar { text: String, span: Range<usize> },

    #[error("expected {expected}, found {found} at {span:?}")]
    Expected {
        expected: &'static str,
        found: String,
        span: Range<usize>,
    },

    #[error("unknown category `{name}` at {span:?}")]
    UnknownCategory { name: String, span: Range<usize> },

    #[error("unknown type `{name}` at {span:?}")]
    UnknownType { name: String, span: Range<usize> },

    #[error("nested containers are not supported (at {span:?})")]
    NestedContainer { span: Range<usize> },

    #[error("`{category}` does not accept this argument (at {span:?})")]
    UnexpectedArgument { category: String, span: Range<usize> },

    #[error("`{category}` requires a type argument (at {span:?})")]
    MissingArgument { category: String, span: Range<usize> },

    #[error("a field shape cannot be a wildcard (at {span:?})")]
    WildcardField { span: Range<usize> },
}

type Result<T> = std::result::Result<T, ShapeParseError>;

enum ArgKind<'src> {
    Unresolved,
    Name(&'src str),
    Member {
        parent: Option<&'src str>,
        name: &'src str,
    },
}

struct Arg<'src> {
    kind: ArgKind<'src>,
    span: Range<usize>,
}

struct Scalar<'src> {
    name: &'src str,
    span: Range<usize>,
    args: Vec<Arg<'src>>,
}

enum Shape<'src> {
    Scalar(Scalar<'src>),
    Array(Scalar<'src>),
    Set(Scalar<'src>),
    Map(Scalar<'src>, Scalar<'src>),
}

struct Parser<'src> {
    tokens: Vec<(Token<'src>, Range<usize>)>,
    pos: usize,
    input: &'src str,
}

impl<'src> Parser<'src> {
    fn new(input: &'src str) -> Result<Self> {
        let mut tokens = Vec::new();
        for (result, span) in Token::lexer(input).spanned() {
            match result {
                Ok(token) => tokens.push((token, span)),
                Err(_) => {
                    return Err(ShapeParseError::UnexpectedChar {
                        text: input[span.clone()].to_string(),
                        span,
                    });
                }
            }
        }

        Ok(Self {
            tokens,
            pos: 0,
            input,
        })
    }

    fn peek(&self) -> Option<&Token<'src>> {
        self.tokens.get(self.pos).map(|(t, _)| t)
    }

    fn advance(&mut self) -> Option<&Token<'src>> {
        let token = self.tokens.get(self.pos).map(|(t, _)| t);
        if token.is_some() {
            self.pos += 1;
        }
        token
    }

    fn current_span(&self) -> Range<usize> {
        self.tokens
            .get(self.pos)
            .map(|(_, s)| s.clone())
            .unwrap_or(self.input.len()..self.input.len())
    }

    fn found(&self) -> String {
        match self.tokens.get(self.pos) {
            Some((_, span)) => format!("`{}`", &self.input[span.clone()]),
            None => "end of input".to_string(),
        }
    }

    fn error(&self, expected: &'static str) -> ShapeParseError {
        ShapeParseError::Expected {
            expected,
            found: self.found(),
            span: self.current_span(),
        }
    }

    fn expect(&mut self, expected: Token<'src>, what: &'static str) -> Result<()> {
        match self.peek() {
            Some(t) if std::mem::discriminant(t) == std::mem::discriminant(&expected) => {
                self.advance();
                Ok(())
            }
            _ => Err(self.error(what)),
        }
    }

    fn parse(mut self) -> Result<Shape<'src>> {
        let shape = self.parse_shape()?;
        if self.pos < self.tokens.len() {
            return Err(self.error("end of input"));
        }
        Ok(shape)
    }

    fn parse_shape(&mut self) -> Result<Shape<'src>> {
        match self.peek() {
            Some(Token::Array) => {
                self.advance();
                self.expect(Token::LAngle, "`<`")?;
                let element = self.parse_element()?;
                self.expect(Token::RAngle, "`>`")?;
                Ok(Shape::Array(element))
            }
            Some(Token::Set) => {
                self.advance();
                self.expect(Token::LAngle, "`<`")?;
                let element = self.parse_element()?;
                self.expect(Token::RAngle, "`>`")?;
                Ok(Shape::Set(element))
            }
            Some(Token::Map) => {
                self.advance();
                self.expect(Token::LAngle, "`<`")?;
                let key = self.parse_element()?;
                self.expect(Token::Comma, "`,`")?;
                let value = self.parse_element()?;
                self.expect(Token::RAngle, "`>`")?;
                Ok(Shape::Map(key, value))
            }
            _ => Ok(Shape::Scalar(self.parse_scalar()?)),
        }
    }

    fn parse_element(&mut self) -> Result<Scalar<'src>> {
        if matches!(
            self.peek(),
            Some(Token::Array | Token::Set | Token::Map)
        ) {
            return Err(ShapeParseError::NestedContainer {
                span: self.current_span(),
            });
        }
        self.parse_scalar()
    }

    fn parse_scalar(&mut self) -> Result<Scalar<'src>> {
        let span = self.current_span();
        let name = match self.peek().cloned() {
            Some(Token::Star) => "*",
            Some(Token::Ident(name)) => name,
            _ => return Err(self.error("a category")),
        };
        self.advance();

        let mut args = Vec::new();
        if matches!(self.peek(), Some(Token::LParen)) {
            self.advance();
            loop {
                args.push(self.parse_arg()?);
                if matches!(self.peek(), Some(Token::Comma)) {
                    self.advance();
                    continue;
                }
                self.expect(Token::RParen, "`)` or `,`")?;
                break;
            }
        }

        Ok(Scalar { name, span, args })
    }

    fn parse_arg(&mut self) -> Result<Arg<'src>> {
        let span = self.current_span();
        let kind = match self.peek().cloned() {
            Some(Token::Question) => {
                self.advance();
                ArgKind::Unresolved
            }
            Some(Token::Ident(name)) => {
                self.advance();
                ArgKind::Name(name)
            }
            Some(Token::At) => {
                self.advance();
                let first = self.parse_ident("a member name")?;
                if matches!(self.peek(), Some(Token::ColonColon)) {
                    self.advance();
                    let name = self.parse_ident("a member name")?;
                    ArgKind::Member {
                        parent: Some(first),
                        name,
                    }
                } else {
                    ArgKind::Member {
                        parent: None,
                        name: first,
                    }
                }
            }
            _ => return Err(self.error("a type argument")),
        };
        Ok(Arg { kind, span })
    }

    fn parse_ident(&mut self, what: &'static str) -> Result<&'src str> {
        match self.peek().cloned() {
            Some(Token::Ident(name)) => {
                self.advance();
                Ok(name)
            }
            _ => Err(self.error(what)),
        }
    }
}

fn resolve_type(
    name: &str,
    span: &Range<usize>,
    resolve: &impl Fn(&str) -> Option<TypeRef>,
) -> Result<TypeRef> {
    resolve(name).ok_or_else(|| ShapeParseError::UnknownType {
        name: name.to_string(),
        span: span.clone(),
    })
}

fn resolve_member(
    parent: Option<&str>,
    name: &str,
    span: &Range<usize>,
    resolve: &impl Fn(&str) -> Option<TypeRef>,
) -> Result<MemberReference> {
    let parent = parent
        .map(|parent| resolve_type(parent, span, resolve))
        .transpose()?;
    Ok(MemberReference::new(parent, name))
}

/// Parses a descriptor, e.g. `map<int, struct(GameplayTag)>`.
pub fn parse_descriptor(
    input: &str,
    resolve: impl Fn(&str) -> Option<TypeRef>,
) -> Result<TypeDescriptor> {
    let lower = |scalar: &Scalar<'_>| lower_descriptor(scalar, &resolve);
    Ok(match Parser::new(input)?.parse()? {
        Shape::Scalar(scalar) => lower(&scalar)?,
        Shape::Array(element) => lower(&element)?.array(),
        Shape::Set(element) => lower(&element)?.set(),
        Shape::Map(key, value) => lower(&key)?.map_of(lower(&value)?),
    })
}

fn lower_descriptor(
    scalar: &Scalar<'_>,
    resolve: &impl Fn(&str) -> Option<TypeRef>,
) -> Result<TypeDescriptor> {
    let category =
        Category::from_name(scalar.name).ok_or_else(|| ShapeParseError::UnknownCategory {
            name: scalar.name.to_string(),
            span: scalar.span.clone(),
        })?;
    let unexpected = |span: &Range<usize>| ShapeParseError::UnexpectedArgument {
        category: category.to_string(),
        span: span.clone(),
    };
    let is_real = matches!(category, Category::Real | Category::Float | Category::Double);

    let mut desc = TypeDescriptor::new(category);
    for arg in &scalar.args {
        desc = match &arg.kind {
            ArgKind::Name(name) if is_real => match SubCategory::from_name(name) {
                Some(sub) => desc.with_sub_category(sub),
                None => return Err(unexpected(&arg.span)),
            },
            ArgKind::Name(_) if desc.referenced_type().is_some() => {
                return Err(unexpected(&arg.span));
            }
            ArgKind::Name(name) => {
                desc.with_referenced_type(resolve_type(name, &arg.span, resolve)?)
            }
            ArgKind::Member { parent, name } => {
                desc.with_member_reference(resolve_member(*parent, name, &arg.span, resolve)?)
            }
            ArgKind::Unresolved => return Err(unexpected(&arg.span)),
        };
    }
    Ok(desc)
}

/// Parses a field shape, e.g. `array<object(Actor)>`.
pub fn parse_field_type(
    input: &str,
    resolve: impl Fn(&str) -> Option<TypeRef>,
) -> Result<FieldType> {
    let lower = |scalar: &Scalar<'_>| lower_field(scalar, &resolve);
    Ok(match Parser::new(input)?.parse()? {
        Shape::Scalar(scalar) => lower(&scalar)?,
        Shape::Array(element) => FieldType::array_of(lower(&element)?),
        Shape::Set(element) => FieldType::set_of(lower(&element)?),
        Shape::Map(key, value) => FieldType::map_of(lower(&key)?, lower(&value)?),
    })
}

fn lower_field(
    scalar: &Scalar<'_>,
    resolve: &impl Fn(&str) -> Option<TypeRef>,
) -> Result<FieldType> {
    let unexpected = |span: &Range<usize>| ShapeParseError::UnexpectedArgument {
        category: scalar.name.to_string(),
        span: span.clone(),
    };

    let arg = match scalar.args.as_slice() {
        [] => None,
        [arg] => Some(arg),
        [_, extra, ..] => return Err(unexpected(&extra.span)),
    };

    // Referenced type of a class/struct/enum shape; `?` stays unresolved.
    let reference = || -> Result<Option<TypeRef>> {
        match arg {
            None => Err(ShapeParseError::MissingArgument {
                category: scalar.name.to_string(),
                span: scalar.span.clone(),
            }),
            Some(Arg {
                kind: ArgKind::Unresolved,
                ..
            }) => Ok(None),
            Some(Arg {
                kind: ArgKind::Name(name),
                span,
            }) => resolve_type(name, span, resolve).map(Some),
            Some(other) => Err(unexpected(&other.span)),
        }
    };
    let plain = |ty: FieldType| -> Result<FieldType> {
        match arg {
            None => Ok(ty),
            Some(other) => Err(unexpected(&other.span)),
        }
    };

    match scalar.name {
        "bool" => plain(FieldType::Bool),
        "int" => plain(FieldType::Int),
        "int64" => plain(FieldType::Int64),
        "float" => plain(FieldType::Float),
        "double" => plain(FieldType::Double),
        "string" => plain(FieldType::String),
        "name" => plain(FieldType::Name),
        "text" => plain(FieldType::Text),
        "real" => match arg {
            None => Ok(FieldType::Double),
            Some(Arg {
                kind: ArgKind::Name("double"),
                ..
            }) => Ok(FieldType::Double),
            Some(Arg {
                kind: ArgKind::Name("float"),
                ..
            }) => Ok(FieldType::Float),
            Some(other) => Err(unexpected(&other.span)),
        },
        "byte" if arg.is_none() => Ok(FieldType::Byte(None)),
        "byte" => Ok(FieldType::Byte(reference()?)),
        "enum" => Ok(FieldType::Enum(reference()?)),
        "struct" => Ok(FieldType::Struct(reference()?)),
        "object" => Ok(FieldType::Object(reference()?)),
        "softobject" => Ok(FieldType::SoftObject(reference()?)),
        "class" => Ok(FieldType::Class(reference()?)),
        "softclass" => Ok(FieldType::SoftClass(reference()?)),
        "interface" => Ok(FieldType::Interface(reference()?)),
        "delegate" => match arg {
            Some(Arg {
                kind: ArgKind::Member { parent, name },
                span,
            }) => Ok(FieldType::Delegate(resolve_member(
                *parent, name, span, resolve,
            )?)),
            Some(other) => Err(unexpected(&other.span)),
            None => Err(ShapeParseError::MissingArgument {
                category: scalar.name.to_string(),
                span: scalar.span.clone(),
            }),
        },
        "*" => Err(ShapeParseError::WildcardField {
            span: scalar.span.clone(),
        }),
        other => Err(ShapeParseError::UnknownCategory {
            name: other.to_string(),
            span: scalar.span.clone(),
        }),
    }
}
