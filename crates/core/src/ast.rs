//! AST types produced by the parser and folded by the transformer.
//!
//! Nodes are plain `Debug + Clone` records, immutable once returned by the
//! parse function that built them. They live only for the duration of one
//! pipeline pass.

use serde::Serialize;

/// Root node: the ordered sequence of top-level directives in one file.
#[derive(Debug, Clone, PartialEq)]
pub struct File {
    pub body: Vec<TopLevel>,
}

impl File {
    /// Names referenced by `@include` directives, in source order.
    pub fn includes(&self) -> impl Iterator<Item = &str> {
        self.body.iter().filter_map(|node| match node {
            TopLevel::Include { name } => Some(name.as_str()),
            _ => None,
        })
    }
}

/// A file-level directive. All open with `@`; anything that is not one of
/// the four named directive kinds is an entity-class declaration.
#[derive(Debug, Clone, PartialEq)]
pub enum TopLevel {
    Declaration(Declaration),
    Include {
        name: String,
    },
    Mapsize {
        x: f64,
        y: f64,
    },
    MaterialExclusion {
        materials: Vec<String>,
    },
    AutoVisGroup {
        description: String,
        categories: Vec<Category>,
    },
}

/// An entity-class definition:
/// `@Class param(...)... = name : "description" [ body ]`.
#[derive(Debug, Clone, PartialEq)]
pub struct Declaration {
    pub class: String,
    pub name: String,
    pub description: Option<Literal>,
    pub parameters: Vec<Parameter>,
    pub body: Vec<BodyItem>,
}

/// A constructor-style modifier on a declaration, e.g. `base(Targetname)`
/// or `size(-16 -16 -16, 16 16 16)`.
#[derive(Debug, Clone, PartialEq)]
pub struct Parameter {
    pub name: String,
    pub properties: Vec<ParamValue>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ParamValue {
    Name(String),
    Literal(Literal),
}

impl ParamValue {
    pub fn to_text(&self) -> String {
        match self {
            ParamValue::Name(name) => name.clone(),
            ParamValue::Literal(literal) => literal.to_text(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum BodyItem {
    Property(Property),
    Connection(Connection),
    SpawnFlags { flags: Vec<Flag> },
}

/// An editable field on the entity. `proptype` is lower-cased; `"choices"`
/// unlocks the option list.
#[derive(Debug, Clone, PartialEq)]
pub struct Property {
    pub name: String,
    pub proptype: String,
    pub title: Option<Literal>,
    pub deflt: Option<Literal>,
    pub description: Option<Literal>,
    pub choices: Option<Vec<ChoiceOption>>,
}

/// One entry of a choices property.
#[derive(Debug, Clone, PartialEq)]
pub struct ChoiceOption {
    pub key: Literal,
    pub value: Literal,
}

/// An I/O port declaration. `direction` carries the raw keyword; the
/// transformer rejects anything other than `input`/`output`.
#[derive(Debug, Clone, PartialEq)]
pub struct Connection {
    pub direction: String,
    pub name: String,
    pub args: String,
    pub description: Option<Literal>,
}

/// One bit of a spawnflags bitfield.
#[derive(Debug, Clone, PartialEq)]
pub struct Flag {
    pub value: Literal,
    pub title: Literal,
    pub enabled: Literal,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Category {
    pub name: String,
    pub groups: Vec<VisGroup>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct VisGroup {
    pub name: String,
}

/// A terminal string or number value. Adjacent string tokens joined by `+`
/// concatenate into a single `Str`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Literal {
    Str(String),
    Number(f64),
}

impl Literal {
    /// Textual coercion: the string itself, or the number rendered as text.
    pub fn to_text(&self) -> String {
        match self {
            Literal::Str(s) => s.clone(),
            Literal::Number(n) => n.to_string(),
        }
    }

    /// Boolean coercion: a non-empty string or a nonzero number.
    pub fn truthy(&self) -> bool {
        match self {
            Literal::Str(s) => !s.is_empty(),
            Literal::Number(n) => *n != 0.0,
        }
    }

    /// Append a further string segment, stringifying a numeric head.
    pub(crate) fn concat(self, tail: &str) -> Literal {
        let mut text = match self {
            Literal::Str(s) => s,
            Literal::Number(n) => n.to_string(),
        };
        text.push_str(tail);
        Literal::Str(text)
    }
}
