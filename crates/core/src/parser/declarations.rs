use super::Parser;
use crate::ast::{Declaration, ParamValue, Parameter};
use crate::error::FgdError;
use crate::lexer::Token;

impl<'a> Parser<'a> {
    /// The class name is already consumed by the dispatcher: parameters run
    /// up to `=`, then the entity name, an optional `: "description"`, and
    /// the bracketed body.
    pub(super) fn parse_declaration(&mut self, class: String) -> Result<Declaration, FgdError> {
        let mut parameters = Vec::new();
        while !self.is_symbol('=') {
            parameters.push(self.parse_parameter()?);
        }
        self.advance(); // '='

        let name = self.take_name()?;

        let mut description = None;
        if self.eat_symbol(':') {
            description = Some(self.parse_string_literal()?);
        }

        self.expect_square('[')?;
        let mut body = Vec::new();
        while !self.is_square(']') {
            body.push(self.parse_body_item()?);
        }
        self.advance(); // ']'

        Ok(Declaration {
            class,
            name,
            description,
            parameters,
            body,
        })
    }

    /// A parameter name, optionally followed by a parenthesized list of
    /// names and literals; commas between items are optional.
    fn parse_parameter(&mut self) -> Result<Parameter, FgdError> {
        let name = self.take_name()?;
        let mut properties = Vec::new();
        if self.eat_paren('(') {
            while !self.is_paren(')') {
                match self.peek() {
                    Some(Token::Name(word)) => {
                        let word = word.clone();
                        self.advance();
                        properties.push(ParamValue::Name(word));
                    }
                    Some(Token::Str(_) | Token::Number(_)) => {
                        properties.push(ParamValue::Literal(self.parse_literal()?));
                    }
                    _ => return Err(self.expected("name, string, or number")),
                }
                if self.is_symbol(',') {
                    self.advance();
                }
            }
            self.advance(); // ')'
        }
        Ok(Parameter { name, properties })
    }
}
