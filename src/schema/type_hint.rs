//! Type Hint Grammar
//!
//! Field annotations are parsed by a small recursive-descent parser over a
//! closed set of forms:
//!
//! ```text
//! hint := term ( '|' term )*
//! term := 'Option' '<' hint '>' | 'Optional' '[' hint ']'
//!       | 'Vec' '<' hint '>'    | 'List' '[' hint ']' | 'list' '[' hint ']'
//!       | path [ ( '<' | '[' ) hint ( ',' hint )* ( '>' | ']' ) ]
//!       | '(' ')'
//! path := ident ( ( '::' | '.' ) ident )*
//! ```
//!
//! Whitespace, `&` and lifetimes are ignored, so both `Option < Vec < i64 > >`
//! (as rendered by the derive macro) and `Optional[int]` parse.

use super::error::{SchemaError, SchemaResult};
use serde_json::{Value as JsonValue, json};
use std::fmt;

/// JSON Schema primitive type names.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JsonType {
    String,
    Number,
    Object,
    Array,
    Boolean,
    Null,
}

impl JsonType {
    /// Maps a scalar type name to its JSON Schema type.
    pub fn from_scalar(name: &str) -> SchemaResult<Self> {
        match name {
            "str" | "String" | "char" | "Cow" => Ok(JsonType::String),
            "int" | "float" | "i8" | "i16" | "i32" | "i64" | "i128" | "isize" | "u8" | "u16"
            | "u32" | "u64" | "u128" | "usize" | "f32" | "f64" => Ok(JsonType::Number),
            "dict" | "HashMap" | "BTreeMap" | "IndexMap" | "Map" | "JsonMap" => Ok(JsonType::Object),
            "list" | "Vec" | "VecDeque" => Ok(JsonType::Array),
            "bool" => Ok(JsonType::Boolean),
            "None" | "()" => Ok(JsonType::Null),
            other => Err(SchemaError::UnhandledType(other.to_string())),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            JsonType::String => "string",
            JsonType::Number => "number",
            JsonType::Object => "object",
            JsonType::Array => "array",
            JsonType::Boolean => "boolean",
            JsonType::Null => "null",
        }
    }
}

impl fmt::Display for JsonType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeHint {
    Scalar(String),
    Optional(Box<TypeHint>),
    List(Box<TypeHint>),
    Union(Vec<TypeHint>),
}

impl TypeHint {
    pub fn parse(source: &str) -> SchemaResult<Self> {
        let tokens = tokenize(source)?;
        if tokens.is_empty() {
            return Err(SchemaError::invalid_hint(source, "empty type hint"));
        }

        let mut parser = HintParser {
            source,
            tokens,
            pos: 0,
        };
        let hint = parser.parse_union()?;
        if let Some(token) = parser.peek() {
            return Err(SchemaError::invalid_hint(
                source,
                format!("unexpected trailing {}", token),
            ));
        }
        Ok(hint)
    }

    /// Builds the JSON Schema fragment for this hint.
    pub fn to_fragment(&self) -> SchemaResult<JsonValue> {
        match self {
            TypeHint::Scalar(name) => Ok(json!({ "type": JsonType::from_scalar(name)?.as_str() })),
            // Optionality is only a hint; it does not add a null alternative.
            TypeHint::Optional(inner) => inner.to_fragment(),
            TypeHint::List(inner) => Ok(json!({
                "type": JsonType::Array.as_str(),
                "items": inner.to_fragment()?
            })),
            TypeHint::Union(members) => {
                let any_of = members
                    .iter()
                    .map(TypeHint::to_fragment)
                    .collect::<SchemaResult<Vec<_>>>()?;
                Ok(json!({ "anyOf": any_of }))
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Delim {
    Angle,
    Square,
    Paren,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Token {
    Ident(String),
    Open(Delim),
    Close(Delim),
    Pipe,
    Comma,
    PathSep,
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Ident(name) => write!(f, "'{}'", name),
            Token::Open(Delim::Angle) => f.write_str("'<'"),
            Token::Open(Delim::Square) => f.write_str("'['"),
            Token::Open(Delim::Paren) => f.write_str("'('"),
            Token::Close(Delim::Angle) => f.write_str("'>'"),
            Token::Close(Delim::Square) => f.write_str("']'"),
            Token::Close(Delim::Paren) => f.write_str("')'"),
            Token::Pipe => f.write_str("'|'"),
            Token::Comma => f.write_str("','"),
            Token::PathSep => f.write_str("'::'"),
        }
    }
}

fn is_ident_char(ch: char) -> bool {
    ch.is_alphanumeric() || ch == '_'
}

fn tokenize(source: &str) -> SchemaResult<Vec<Token>> {
    let mut tokens = Vec::new();
    let mut chars = source.chars().peekable();

    while let Some(ch) = chars.next() {
        match ch {
            c if c.is_whitespace() || c == '&' => {}
            '<' => tokens.push(Token::Open(Delim::Angle)),
            '>' => tokens.push(Token::Close(Delim::Angle)),
            '[' => tokens.push(Token::Open(Delim::Square)),
            ']' => tokens.push(Token::Close(Delim::Square)),
            '(' => tokens.push(Token::Open(Delim::Paren)),
            ')' => tokens.push(Token::Close(Delim::Paren)),
            '|' => tokens.push(Token::Pipe),
            ',' => tokens.push(Token::Comma),
            '.' => tokens.push(Token::PathSep),
            ':' => {
                if chars.next_if_eq(&':').is_none() {
                    return Err(SchemaError::invalid_hint(source, "expected '::'"));
                }
                tokens.push(Token::PathSep);
            }
            '\'' => {
                // lifetime, plus its separator when it leads a generic argument list
                while chars.next_if(|c| is_ident_char(*c)).is_some() {}
                while chars.next_if(|c| c.is_whitespace()).is_some() {}
                chars.next_if_eq(&',');
            }
            c if is_ident_char(c) => {
                let mut ident = String::from(c);
                while let Some(next) = chars.next_if(|c| is_ident_char(*c)) {
                    ident.push(next);
                }
                tokens.push(Token::Ident(ident));
            }
            other => {
                return Err(SchemaError::invalid_hint(
                    source,
                    format!("unexpected character '{}'", other),
                ));
            }
        }
    }

    Ok(tokens)
}

struct HintParser<'a> {
    source: &'a str,
    tokens: Vec<Token>,
    pos: usize,
}

impl HintParser<'_> {
    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos)
    }

    fn eat(&mut self, token: &Token) -> bool {
        if self.peek() == Some(token) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn expect(&mut self, token: Token) -> SchemaResult<()> {
        if self.eat(&token) {
            return Ok(());
        }
        let found = self
            .peek()
            .map(|t| t.to_string())
            .unwrap_or_else(|| "end of input".to_string());
        Err(self.error(format!("expected {}, found {}", token, found)))
    }

    fn error(&self, reason: String) -> SchemaError {
        SchemaError::invalid_hint(self.source, reason)
    }

    fn parse_union(&mut self) -> SchemaResult<TypeHint> {
        let mut members = vec![self.parse_term()?];
        while self.eat(&Token::Pipe) {
            members.push(self.parse_term()?);
        }

        if members.len() == 1 {
            Ok(members.remove(0))
        } else {
            Ok(TypeHint::Union(members))
        }
    }

    fn parse_term(&mut self) -> SchemaResult<TypeHint> {
        if self.eat(&Token::Open(Delim::Paren)) {
            self.expect(Token::Close(Delim::Paren))?;
            return Ok(TypeHint::Scalar("()".to_string()));
        }

        let name = self.parse_path()?;
        let delim = match self.peek() {
            Some(Token::Open(delim @ (Delim::Angle | Delim::Square))) => *delim,
            _ => return Ok(TypeHint::Scalar(name)),
        };
        self.pos += 1;

        // `Foo<'a>` leaves nothing between the brackets once the lifetime is dropped
        if self.eat(&Token::Close(delim)) {
            return Ok(TypeHint::Scalar(name));
        }

        let mut args = vec![self.parse_union()?];
        while self.eat(&Token::Comma) {
            args.push(self.parse_union()?);
        }
        self.expect(Token::Close(delim))?;

        match name.as_str() {
            "Option" | "Optional" => Ok(TypeHint::Optional(Box::new(self.single_arg(&name, args)?))),
            "Vec" | "VecDeque" | "List" | "list" => {
                Ok(TypeHint::List(Box::new(self.single_arg(&name, args)?)))
            }
            // Remaining generic arguments (map key/value types) do not affect the fragment.
            _ => Ok(TypeHint::Scalar(name)),
        }
    }

    /// Parses a possibly qualified path and returns its last segment.
    fn parse_path(&mut self) -> SchemaResult<String> {
        let mut last = self.parse_ident()?;
        while self.eat(&Token::PathSep) {
            last = self.parse_ident()?;
        }
        Ok(last)
    }

    fn parse_ident(&mut self) -> SchemaResult<String> {
        match self.tokens.get(self.pos) {
            Some(Token::Ident(name)) => {
                let name = name.clone();
                self.pos += 1;
                Ok(name)
            }
            Some(other) => Err(self.error(format!("expected a type name, found {}", other))),
            None => Err(self.error("expected a type name, found end of input".to_string())),
        }
    }

    fn single_arg(&self, name: &str, mut args: Vec<TypeHint>) -> SchemaResult<TypeHint> {
        if args.len() != 1 {
            return Err(self.error(format!(
                "{} takes exactly one type argument, found {}",
                name,
                args.len()
            )));
        }
        Ok(args.remove(0))
    }
}
