// Copyright (C) 2026 Parity Technologies (UK) Ltd.
// SPDX-License-Identifier: GPL-3.0-or-later

//! Parser for the type-expression strings used in Substrate type tables, e.g.
//! `"Vec<(AccountId, Compact<Balance>)>"`, `"[u8; 32]"` or `"T::BlockNumber"`.
//!
//! Names that are not built in become [`TypeDef::Named`] references, left for
//! the registry to resolve.

use crate::schema::{Primitive, TypeDef};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("unexpected end of type expression '{0}'")]
    UnexpectedEnd(String),

    #[error("unexpected character '{ch}' at position {pos} in '{input}'")]
    UnexpectedChar { ch: char, pos: usize, input: String },

    #[error("unsupported generic type '{0}'")]
    UnknownGeneric(String),

    #[error("'{name}' takes {expected} type parameter(s), found {found}")]
    WrongArity {
        name: String,
        expected: usize,
        found: usize,
    },

    #[error("invalid array length '{0}'")]
    InvalidLength(String),

    #[error("type expression nests deeper than {limit} levels at position {pos}")]
    TooDeep { limit: usize, pos: usize },

    #[error("empty type expression")]
    Empty,
}

/// Deepest generic, tuple or array nesting a type expression may have.
pub const MAX_NESTING: usize = 128;

/// Parse a type expression into a [`TypeDef`].
pub fn parse_type(input: &str) -> Result<TypeDef, ParseError> {
    if input.trim().is_empty() {
        return Err(ParseError::Empty);
    }
    let mut parser = Parser {
        input,
        pos: 0,
        depth: 0,
    };
    let def = parser.parse()?;
    parser.skip_whitespace();
    match parser.peek() {
        None => Ok(def),
        Some(ch) => Err(parser.unexpected(ch)),
    }
}

struct Parser<'a> {
    input: &'a str,
    pos: usize,
    depth: usize,
}

impl<'a> Parser<'a> {
    fn peek(&self) -> Option<char> {
        self.input[self.pos..].chars().next()
    }

    fn skip_whitespace(&mut self) {
        while let Some(ch) = self.peek() {
            if !ch.is_whitespace() {
                break;
            }
            self.pos += ch.len_utf8();
        }
    }

    fn unexpected(&self, ch: char) -> ParseError {
        ParseError::UnexpectedChar {
            ch,
            pos: self.pos,
            input: self.input.to_string(),
        }
    }

    fn expect(&mut self, expected: char) -> Result<(), ParseError> {
        self.skip_whitespace();
        match self.peek() {
            Some(ch) if ch == expected => {
                self.pos += ch.len_utf8();
                Ok(())
            }
            Some(ch) => Err(self.unexpected(ch)),
            None => Err(ParseError::UnexpectedEnd(self.input.to_string())),
        }
    }

    /// Consume `ch` if it is next, ignoring whitespace.
    fn eat(&mut self, ch: char) -> bool {
        self.skip_whitespace();
        if self.peek() == Some(ch) {
            self.pos += ch.len_utf8();
            true
        } else {
            false
        }
    }

    fn parse(&mut self) -> Result<TypeDef, ParseError> {
        if self.depth >= MAX_NESTING {
            return Err(ParseError::TooDeep {
                limit: MAX_NESTING,
                pos: self.pos,
            });
        }
        self.depth += 1;
        let def = self.parse_item();
        self.depth -= 1;
        def
    }

    fn parse_item(&mut self) -> Result<TypeDef, ParseError> {
        self.skip_whitespace();
        match self.peek() {
            Some('(') => self.parse_tuple(),
            Some('[') => self.parse_array(),
            Some('<') => self.parse_qualified_path(),
            Some(ch) if ch.is_alphabetic() || ch == '_' => self.parse_named(),
            Some(ch) => Err(self.unexpected(ch)),
            None => Err(ParseError::UnexpectedEnd(self.input.to_string())),
        }
    }

    fn parse_tuple(&mut self) -> Result<TypeDef, ParseError> {
        self.expect('(')?;
        let items = self.parse_list(')')?;
        Ok(match items.len() {
            0 => TypeDef::Unit,
            _ => TypeDef::Tuple(items),
        })
    }

    /// Comma separated types up to `close`, tolerating a trailing comma.
    fn parse_list(&mut self, close: char) -> Result<Vec<TypeDef>, ParseError> {
        let mut items = Vec::new();
        loop {
            if self.eat(close) {
                return Ok(items);
            }
            items.push(self.parse()?);
            if !self.eat(',') {
                self.expect(close)?;
                return Ok(items);
            }
        }
    }

    fn parse_array(&mut self) -> Result<TypeDef, ParseError> {
        self.expect('[')?;
        let element = self.parse()?;
        self.expect(';')?;
        self.skip_whitespace();
        let start = self.pos;
        while self.peek().is_some_and(|ch| ch.is_ascii_digit() || ch == '_') {
            self.pos += 1;
        }
        let raw = &self.input[start..self.pos];
        let len = raw
            .replace('_', "")
            .parse::<usize>()
            .map_err(|_| ParseError::InvalidLength(raw.to_string()))?;
        self.expect(']')?;

        Ok(match element {
            TypeDef::Primitive(Primitive::U8) => TypeDef::Bytes(len),
            element => TypeDef::array(element, len),
        })
    }

    /// `<T as Trait>::Name` resolves to `Name`.
    fn parse_qualified_path(&mut self) -> Result<TypeDef, ParseError> {
        self.expect('<')?;
        let mut depth = 1;
        while depth > 0 {
            match self.peek() {
                Some(ch) => {
                    self.pos += ch.len_utf8();
                    match ch {
                        '<' => depth += 1,
                        '>' => depth -= 1,
                        _ => {}
                    }
                }
                None => return Err(ParseError::UnexpectedEnd(self.input.to_string())),
            }
        }
        self.expect(':')?;
        self.expect(':')?;
        self.parse_named()
    }

    fn parse_ident(&mut self) -> &'a str {
        let start = self.pos;
        while let Some(ch) = self.peek() {
            let path_separator = ch == ':' && self.input[self.pos..].starts_with("::");
            if ch.is_alphanumeric() || ch == '_' {
                self.pos += ch.len_utf8();
            } else if path_separator {
                self.pos += 2;
            } else {
                break;
            }
        }
        &self.input[start..self.pos]
    }

    fn parse_named(&mut self) -> Result<TypeDef, ParseError> {
        self.skip_whitespace();
        let path = self.parse_ident();
        // `T::AccountId`, `frame_system::Config::Index` and friends name their last segment.
        let name = path.rsplit("::").next().unwrap_or(path);
        if name.is_empty() {
            return match self.peek() {
                Some(ch) => Err(self.unexpected(ch)),
                None => Err(ParseError::UnexpectedEnd(self.input.to_string())),
            };
        }

        if self.eat('<') {
            let params = self.parse_list('>')?;
            return generic(name, params);
        }

        Ok(match name {
            "Null" => TypeDef::Unit,
            "Bytes" => TypeDef::sequence(TypeDef::Primitive(Primitive::U8)),
            _ => match Primitive::from_name(name) {
                Some(primitive) => TypeDef::Primitive(primitive),
                None => TypeDef::named(name),
            },
        })
    }
}

fn generic(name: &str, params: Vec<TypeDef>) -> Result<TypeDef, ParseError> {
    let arity = |expected: usize| -> Result<(), ParseError> {
        if params.len() == expected {
            Ok(())
        } else {
            Err(ParseError::WrongArity {
                name: name.to_string(),
                expected,
                found: params.len(),
            })
        }
    };

    match name {
        "Vec" | "BTreeSet" | "VecDeque" => {
            arity(1)?;
            Ok(TypeDef::sequence(first(params)))
        }
        "BTreeMap" | "HashMap" => {
            arity(2)?;
            Ok(TypeDef::sequence(TypeDef::Tuple(params)))
        }
        "Option" => {
            arity(1)?;
            Ok(TypeDef::option(first(params)))
        }
        "Compact" => {
            arity(1)?;
            Ok(TypeDef::compact(first(params)))
        }
        "Box" | "Cow" => {
            arity(1)?;
            Ok(first(params))
        }
        "PhantomData" => Ok(TypeDef::Unit),
        "Result" => {
            arity(2)?;
            let mut params = params.into_iter();
            let ok = params.next().unwrap_or(TypeDef::Unit);
            let err = params.next().unwrap_or(TypeDef::Unit);
            Ok(TypeDef::result(ok, err))
        }
        other => Err(ParseError::UnknownGeneric(other.to_string())),
    }
}

fn first(params: Vec<TypeDef>) -> TypeDef {
    params.into_iter().next().unwrap_or(TypeDef::Unit)
}
