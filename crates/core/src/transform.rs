//! Structural transformation: fold the AST into the flat declaration map.
//!
//! Only declarations contribute entries. `Mapsize`, `MaterialExclusion`,
//! and `AutoVisGroup` directives are syntax-checked by the parser but
//! deliberately absent from the map; `@include` directives are surfaced
//! through [`File::includes`] rather than the map, so callers can report
//! them without the transform doing any I/O.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::ast::{self, BodyItem, File, Literal, ParamValue, TopLevel};
use crate::error::FgdError;

/// The terminal artifact: declaration name -> declaration record.
pub type Declarations = BTreeMap<String, DeclarationRecord>;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DeclarationRecord {
    /// The declaring class, e.g. `PointClass` or `SolidClass`.
    #[serde(rename = "type")]
    pub class: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Parameter name -> that parameter's property values, coerced to text.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parameters: Option<BTreeMap<String, Vec<String>>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub properties: Option<Vec<PropertyRecord>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inputs: Option<Vec<ConnectionRecord>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub outputs: Option<Vec<ConnectionRecord>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub flags: Option<Vec<FlagRecord>>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PropertyRecord {
    /// The property type name, e.g. `integer`, `string`, `choices`.
    #[serde(rename = "type")]
    pub proptype: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deflt: Option<Literal>,
    /// Option key (textual) -> option value. Present only when an option
    /// clause was parsed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub choices: Option<BTreeMap<String, Literal>>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConnectionRecord {
    pub name: String,
    /// The argument type accepted or emitted by the port.
    #[serde(rename = "type")]
    pub args: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FlagRecord {
    pub title: Literal,
    pub value: Literal,
    pub enabled: bool,
}

/// Fold the AST body, left to right, into the declaration map.
/// A duplicate declaration name overwrites the earlier entry.
pub fn transform(ast: &File) -> Result<Declarations, FgdError> {
    let mut declarations = Declarations::new();
    for node in &ast.body {
        if let TopLevel::Declaration(decl) = node {
            declarations.insert(decl.name.clone(), reduce_declaration(decl)?);
        }
    }
    Ok(declarations)
}

fn reduce_declaration(decl: &ast::Declaration) -> Result<DeclarationRecord, FgdError> {
    let mut record = DeclarationRecord {
        class: decl.class.clone(),
        description: decl.description.as_ref().map(Literal::to_text),
        parameters: None,
        properties: None,
        inputs: None,
        outputs: None,
        flags: None,
    };

    for parameter in &decl.parameters {
        record.parameters.get_or_insert_with(BTreeMap::new).insert(
            parameter.name.clone(),
            parameter
                .properties
                .iter()
                .map(ParamValue::to_text)
                .collect(),
        );
    }

    for item in &decl.body {
        match item {
            BodyItem::Property(property) => {
                record
                    .properties
                    .get_or_insert_with(Vec::new)
                    .push(reduce_property(property));
            }
            BodyItem::Connection(connection) => {
                let port = ConnectionRecord {
                    name: connection.name.clone(),
                    args: connection.args.clone(),
                    description: connection.description.as_ref().map(Literal::to_text),
                };
                match connection.direction.as_str() {
                    "input" => record.inputs.get_or_insert_with(Vec::new).push(port),
                    "output" => record.outputs.get_or_insert_with(Vec::new).push(port),
                    other => {
                        return Err(FgdError::UnknownDirection {
                            direction: other.to_owned(),
                        })
                    }
                }
            }
            BodyItem::SpawnFlags { flags } => {
                record.flags = Some(
                    flags
                        .iter()
                        .map(|flag| FlagRecord {
                            title: flag.title.clone(),
                            value: flag.value.clone(),
                            enabled: flag.enabled.truthy(),
                        })
                        .collect(),
                );
            }
        }
    }

    Ok(record)
}

fn reduce_property(property: &ast::Property) -> PropertyRecord {
    PropertyRecord {
        proptype: property.proptype.clone(),
        name: property.name.clone(),
        title: property.title.as_ref().map(Literal::to_text),
        description: property.description.as_ref().map(Literal::to_text),
        deflt: property.deflt.clone(),
        choices: property.choices.as_ref().map(|options| {
            options
                .iter()
                .map(|option| (option.key.to_text(), option.value.clone()))
                .collect()
        }),
    }
}

// ──────────────────────────────────────────────
// Tests
// ──────────────────────────────────────────────
