use super::Parser;
use crate::ast::{BodyItem, ChoiceOption, Connection, Flag, Property};
use crate::error::FgdError;
use crate::lexer::Token;

impl<'a> Parser<'a> {
    /// Dispatch on the leading name: `input`/`output` open a connection,
    /// `spawnflags` (any casing) the flag bitfield, anything else a
    /// property.
    pub(super) fn parse_body_item(&mut self) -> Result<BodyItem, FgdError> {
        let keyword = match self.peek() {
            Some(Token::Name(name)) => name.clone(),
            _ => return Err(self.expected("name")),
        };

        if keyword == "input" || keyword == "output" {
            return Ok(BodyItem::Connection(self.parse_connection()?));
        }
        if keyword.eq_ignore_ascii_case("spawnflags") {
            return self.parse_spawn_flags();
        }
        Ok(BodyItem::Property(self.parse_property()?))
    }

    /// `input Name(argtype) : "description"` (description optional).
    fn parse_connection(&mut self) -> Result<Connection, FgdError> {
        let direction = self.take_name()?;
        let name = self.take_name()?;
        self.expect_paren('(')?;
        let args = self.take_name()?;
        self.expect_paren(')')?;

        let mut description = None;
        if self.eat_symbol(':') {
            description = Some(self.parse_string_literal()?);
        }

        Ok(Connection {
            direction,
            name,
            args,
            description,
        })
    }

    /// `spawnflags(flags) = [ value : title : enabled ... ]`. The
    /// parenthesized name is a placeholder and is discarded.
    fn parse_spawn_flags(&mut self) -> Result<BodyItem, FgdError> {
        self.advance(); // keyword
        self.expect_paren('(')?;
        self.take_name()?;
        self.expect_paren(')')?;
        self.expect_symbol('=')?;
        self.expect_square('[')?;

        let mut flags = Vec::new();
        while !self.is_square(']') {
            let value = self.parse_literal()?;
            self.expect_symbol(':')?;
            let title = self.parse_literal()?;
            self.expect_symbol(':')?;
            let enabled = self.parse_literal()?;
            flags.push(Flag {
                value,
                title,
                enabled,
            });
        }
        self.advance(); // ']'

        Ok(BodyItem::SpawnFlags { flags })
    }

    /// `name(type) [report|readonly] [: title] [: default] [: description]
    /// [= [ key : value ... ]]`.
    ///
    /// The three colon clauses are positional, not labeled. Each probe
    /// consumes its colon whether or not the clause follows; a default is
    /// absent exactly when two colons sit back to back, which is how an
    /// empty title slot (`: : 250`) still reaches the default clause.
    fn parse_property(&mut self) -> Result<Property, FgdError> {
        let name = self.take_name()?;
        self.expect_paren('(')?;
        let proptype = self.take_name()?.to_ascii_lowercase();
        self.expect_paren(')')?;

        if let Some(Token::Name(modifier)) = self.peek() {
            if matches!(modifier.as_str(), "report" | "readonly") {
                self.advance();
            }
        }

        let mut title = None;
        if self.eat_symbol(':') && self.is_str() {
            title = Some(self.parse_literal()?);
        }

        let mut deflt = None;
        if self.eat_symbol(':') && !self.is_symbol(':') {
            deflt = Some(self.parse_literal()?);
        }

        let mut description = None;
        if self.eat_symbol(':') && self.is_str() {
            description = Some(self.parse_literal()?);
        }

        let mut choices = None;
        if proptype == "choices" && self.eat_symbol('=') {
            self.expect_square('[')?;
            let mut options = Vec::new();
            while !self.is_square(']') {
                let key = self.parse_literal()?;
                self.expect_symbol(':')?;
                let value = self.parse_literal()?;
                options.push(ChoiceOption { key, value });
            }
            self.advance(); // ']'
            choices = Some(options);
        }

        Ok(Property {
            name,
            proptype,
            title,
            deflt,
            description,
            choices,
        })
    }
}
