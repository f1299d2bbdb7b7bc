//! Recursive-descent parser over the token stream.
//!
//! A single cursor moves monotonically forward; optional clauses are probed
//! with the non-strict `eat_*` helpers and one token of lookahead, never
//! with backtracking. Strict expectations (`expect_*`, `take_*`) abort the
//! whole parse on the first violation -- no recovery, no partial AST.

use crate::ast::{File, Literal, TopLevel};
use crate::error::FgdError;
use crate::lexer::Token;

mod body;
mod declarations;
mod directives;

/// Parse one token stream into a [`File`].
pub fn parse(tokens: &[Token]) -> Result<File, FgdError> {
    let mut p = Parser::new(tokens);
    p.parse_file()
}

pub(crate) struct Parser<'a> {
    tokens: &'a [Token],
    pos: usize,
}

impl<'a> Parser<'a> {
    fn new(tokens: &'a [Token]) -> Self {
        Parser { tokens, pos: 0 }
    }

    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos)
    }

    fn advance(&mut self) {
        self.pos += 1;
    }

    fn at_end(&self) -> bool {
        self.pos >= self.tokens.len()
    }

    /// Build the error for a failed strict expectation at the cursor.
    fn expected(&self, what: impl Into<String>) -> FgdError {
        match self.peek() {
            Some(token) => FgdError::UnexpectedToken {
                found: token.to_string(),
                expected: what.into(),
            },
            None => FgdError::UnexpectedEnd {
                expected: what.into(),
            },
        }
    }

    // -- Strict consumption --------------------------------------

    fn take_name(&mut self) -> Result<String, FgdError> {
        if let Some(Token::Name(name)) = self.peek() {
            let name = name.clone();
            self.advance();
            Ok(name)
        } else {
            Err(self.expected("name"))
        }
    }

    fn take_str(&mut self) -> Result<String, FgdError> {
        if let Some(Token::Str(s)) = self.peek() {
            let s = s.clone();
            self.advance();
            Ok(s)
        } else {
            Err(self.expected("string"))
        }
    }

    fn take_number(&mut self) -> Result<f64, FgdError> {
        if let Some(Token::Number(n)) = self.peek() {
            let n = *n;
            self.advance();
            Ok(n)
        } else {
            Err(self.expected("number"))
        }
    }

    fn expect_symbol(&mut self, c: char) -> Result<(), FgdError> {
        if self.eat_symbol(c) {
            Ok(())
        } else {
            Err(self.expected(format!("symbol({c})")))
        }
    }

    fn expect_paren(&mut self, c: char) -> Result<(), FgdError> {
        if self.eat_paren(c) {
            Ok(())
        } else {
            Err(self.expected(format!("paren({c})")))
        }
    }

    fn expect_square(&mut self, c: char) -> Result<(), FgdError> {
        if self.is_square(c) {
            self.advance();
            Ok(())
        } else {
            Err(self.expected(format!("square({c})")))
        }
    }

    // -- Non-strict probes ---------------------------------------

    fn is_symbol(&self, c: char) -> bool {
        matches!(self.peek(), Some(Token::Symbol(x)) if *x == c)
    }

    fn is_paren(&self, c: char) -> bool {
        matches!(self.peek(), Some(Token::Paren(x)) if *x == c)
    }

    fn is_square(&self, c: char) -> bool {
        matches!(self.peek(), Some(Token::Square(x)) if *x == c)
    }

    fn is_str(&self) -> bool {
        matches!(self.peek(), Some(Token::Str(_)))
    }

    /// Consume the token if it matches; report whether it did.
    fn eat_symbol(&mut self, c: char) -> bool {
        if self.is_symbol(c) {
            self.advance();
            true
        } else {
            false
        }
    }

    fn eat_paren(&mut self, c: char) -> bool {
        if self.is_paren(c) {
            self.advance();
            true
        } else {
            false
        }
    }

    // -- Top level -----------------------------------------------

    fn parse_file(&mut self) -> Result<File, FgdError> {
        let mut body = Vec::new();
        while !self.at_end() {
            body.push(self.parse_top_level()?);
        }
        Ok(File { body })
    }

    /// Every file-level directive opens with `@` and a name giving its kind.
    fn parse_top_level(&mut self) -> Result<TopLevel, FgdError> {
        self.expect_symbol('@')?;
        let directive = self.take_name()?;
        match directive.as_str() {
            "include" => self.parse_include(),
            "mapsize" => self.parse_mapsize(),
            "MaterialExclusion" => self.parse_material_exclusion(),
            "AutoVisGroup" => self.parse_auto_vis_group(),
            _ => Ok(TopLevel::Declaration(self.parse_declaration(directive)?)),
        }
    }

    // -- Literals ------------------------------------------------

    /// One string or number token, plus any `+ "..."` continuations.
    /// A `+` not followed by a string is consumed and ends the literal.
    fn parse_literal(&mut self) -> Result<Literal, FgdError> {
        let mut literal = match self.peek() {
            Some(Token::Str(s)) => Literal::Str(s.clone()),
            Some(Token::Number(n)) => Literal::Number(*n),
            _ => return Err(self.expected("string or number")),
        };
        self.advance();
        while self.eat_symbol('+') {
            if let Some(Token::Str(s)) = self.peek() {
                let tail = s.clone();
                self.advance();
                literal = literal.concat(&tail);
            }
        }
        Ok(literal)
    }

    /// A literal that must open with a string token.
    fn parse_string_literal(&mut self) -> Result<Literal, FgdError> {
        if !self.is_str() {
            return Err(self.expected("string"));
        }
        self.parse_literal()
    }
}

// ──────────────────────────────────────────────
// Tests
// ──────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{BodyItem, ParamValue};
    use crate::lexer::tokenize;

    fn parse_source(src: &str) -> File {
        let tokens = tokenize(src).expect("lexing should succeed");
        parse(&tokens).expect("parsing should succeed")
    }

    fn parse_error(src: &str) -> FgdError {
        let tokens = tokenize(src).expect("lexing should succeed");
        parse(&tokens).expect_err("parsing should fail")
    }

    fn only_declaration(file: &File) -> &crate::ast::Declaration {
        match &file.body[..] {
            [TopLevel::Declaration(decl)] => decl,
            other => panic!("expected a single declaration, got {:?}", other),
        }
    }

    #[test]
    fn empty_input_parses_to_empty_file() {
        let file = parse_source("");
        assert!(file.body.is_empty());
    }

    #[test]
    fn declaration_with_parameters_and_description() {
        let file = parse_source(
            r#"@PointClass base(Targetname, Angles) color(0 180 0) = info_target : "A target." []"#,
        );
        let decl = only_declaration(&file);
        assert_eq!(decl.class, "PointClass");
        assert_eq!(decl.name, "info_target");
        assert_eq!(decl.description, Some(Literal::Str("A target.".into())));
        assert_eq!(decl.parameters.len(), 2);
        assert_eq!(decl.parameters[0].name, "base");
        assert_eq!(
            decl.parameters[0].properties,
            vec![
                ParamValue::Name("Targetname".into()),
                ParamValue::Name("Angles".into()),
            ]
        );
        assert_eq!(
            decl.parameters[1].properties,
            vec![
                ParamValue::Literal(Literal::Number(0.0)),
                ParamValue::Literal(Literal::Number(180.0)),
                ParamValue::Literal(Literal::Number(0.0)),
            ]
        );
        assert!(decl.body.is_empty());
    }

    #[test]
    fn parameter_without_parens_has_no_properties() {
        let file = parse_source("@SolidClass worldbase = worldspawn []");
        let decl = only_declaration(&file);
        assert_eq!(decl.parameters.len(), 1);
        assert_eq!(decl.parameters[0].name, "worldbase");
        assert!(decl.parameters[0].properties.is_empty());
    }

    #[test]
    fn description_concatenates_adjacent_strings() {
        let file = parse_source(r#"@PointClass = light : "part one, " + "part two" []"#);
        let decl = only_declaration(&file);
        assert_eq!(
            decl.description,
            Some(Literal::Str("part one, part two".into()))
        );
    }

    #[test]
    fn comment_between_joined_strings_does_not_break_concatenation() {
        let file = parse_source(
            "@PointClass = light : \"part one, \" + // spans a comment\n\"part two\" []",
        );
        let decl = only_declaration(&file);
        assert_eq!(
            decl.description,
            Some(Literal::Str("part one, part two".into()))
        );
    }

    #[test]
    fn trailing_plus_stops_concatenation_without_error() {
        let file = parse_source(r#"@PointClass = light : "alone" + []"#);
        let decl = only_declaration(&file);
        assert_eq!(decl.description, Some(Literal::Str("alone".into())));
        assert!(decl.body.is_empty());
    }

    #[test]
    fn property_with_all_clauses() {
        let file = parse_source(
            r#"@PointClass = e [ speed(integer) : "Speed" : 100 : "How fast." ]"#,
        );
        let decl = only_declaration(&file);
        match &decl.body[..] {
            [BodyItem::Property(p)] => {
                assert_eq!(p.name, "speed");
                assert_eq!(p.proptype, "integer");
                assert_eq!(p.title, Some(Literal::Str("Speed".into())));
                assert_eq!(p.deflt, Some(Literal::Number(100.0)));
                assert_eq!(p.description, Some(Literal::Str("How fast.".into())));
                assert_eq!(p.choices, None);
            }
            other => panic!("expected one property, got {:?}", other),
        }
    }

    #[test]
    fn property_default_absent_between_back_to_back_colons() {
        let file = parse_source(
            r#"@PointClass = e [ targetname(target_source) : "Name" : : "Who I am." ]"#,
        );
        let decl = only_declaration(&file);
        match &decl.body[..] {
            [BodyItem::Property(p)] => {
                assert_eq!(p.title, Some(Literal::Str("Name".into())));
                assert_eq!(p.deflt, None);
                assert_eq!(p.description, Some(Literal::Str("Who I am.".into())));
            }
            other => panic!("expected one property, got {:?}", other),
        }
    }

    #[test]
    fn property_with_empty_title_still_takes_default() {
        let file = parse_source("@PointClass = e [ health(integer) : : 250 ]");
        let decl = only_declaration(&file);
        match &decl.body[..] {
            [BodyItem::Property(p)] => {
                assert_eq!(p.title, None);
                assert_eq!(p.deflt, Some(Literal::Number(250.0)));
                assert_eq!(p.description, None);
            }
            other => panic!("expected one property, got {:?}", other),
        }
    }

    #[test]
    fn property_with_bare_type_only() {
        let file = parse_source("@PointClass = e [ angles(angles) ]");
        let decl = only_declaration(&file);
        match &decl.body[..] {
            [BodyItem::Property(p)] => {
                assert_eq!(p.proptype, "angles");
                assert_eq!(p.title, None);
                assert_eq!(p.deflt, None);
                assert_eq!(p.description, None);
            }
            other => panic!("expected one property, got {:?}", other),
        }
    }

    #[test]
    fn property_type_is_lower_cased_and_modifier_consumed() {
        let file = parse_source(r#"@PointClass = e [ health(Integer) readonly : "HP" ]"#);
        let decl = only_declaration(&file);
        match &decl.body[..] {
            [BodyItem::Property(p)] => {
                assert_eq!(p.proptype, "integer");
                assert_eq!(p.title, Some(Literal::Str("HP".into())));
            }
            other => panic!("expected one property, got {:?}", other),
        }
    }

    #[test]
    fn choices_property_collects_option_pairs() {
        let file = parse_source(
            r#"@PointClass = e [ mode(choices) : "Mode" : 0 = [ 0 : "Off" 1 : "On" ] ]"#,
        );
        let decl = only_declaration(&file);
        match &decl.body[..] {
            [BodyItem::Property(p)] => {
                assert_eq!(p.proptype, "choices");
                assert_eq!(p.deflt, Some(Literal::Number(0.0)));
                let choices = p.choices.as_ref().expect("choices should be parsed");
                assert_eq!(choices.len(), 2);
                assert_eq!(choices[0].key, Literal::Number(0.0));
                assert_eq!(choices[0].value, Literal::Str("Off".into()));
                assert_eq!(choices[1].key, Literal::Number(1.0));
                assert_eq!(choices[1].value, Literal::Str("On".into()));
            }
            other => panic!("expected one property, got {:?}", other),
        }
    }

    #[test]
    fn choices_property_without_option_clause_has_none() {
        let file = parse_source(r#"@PointClass = e [ mode(choices) : "Mode" ]"#);
        let decl = only_declaration(&file);
        match &decl.body[..] {
            [BodyItem::Property(p)] => assert_eq!(p.choices, None),
            other => panic!("expected one property, got {:?}", other),
        }
    }

    #[test]
    fn connections_carry_direction_name_args_description() {
        let file = parse_source(
            r#"@PointClass = e [ input Enable(void) : "Turn on." output OnUser(string) ]"#,
        );
        let decl = only_declaration(&file);
        match &decl.body[..] {
            [BodyItem::Connection(a), BodyItem::Connection(b)] => {
                assert_eq!(a.direction, "input");
                assert_eq!(a.name, "Enable");
                assert_eq!(a.args, "void");
                assert_eq!(a.description, Some(Literal::Str("Turn on.".into())));
                assert_eq!(b.direction, "output");
                assert_eq!(b.name, "OnUser");
                assert_eq!(b.args, "string");
                assert_eq!(b.description, None);
            }
            other => panic!("expected two connections, got {:?}", other),
        }
    }

    #[test]
    fn spawnflags_collects_value_title_enabled_triples() {
        let file = parse_source(
            r#"@PointClass = e [ SpawnFlags(flags) = [ 1 : "Start Active" : 1 2 : "No Shadows" : 0 ] ]"#,
        );
        let decl = only_declaration(&file);
        match &decl.body[..] {
            [BodyItem::SpawnFlags { flags }] => {
                assert_eq!(flags.len(), 2);
                assert_eq!(flags[0].value, Literal::Number(1.0));
                assert_eq!(flags[0].title, Literal::Str("Start Active".into()));
                assert_eq!(flags[0].enabled, Literal::Number(1.0));
                assert_eq!(flags[1].enabled, Literal::Number(0.0));
            }
            other => panic!("expected spawnflags, got {:?}", other),
        }
    }

    #[test]
    fn include_directive() {
        let file = parse_source(r#"@include "base.fgd""#);
        assert_eq!(
            file.body,
            vec![TopLevel::Include {
                name: "base.fgd".into()
            }]
        );
        assert_eq!(file.includes().collect::<Vec<_>>(), vec!["base.fgd"]);
    }

    #[test]
    fn mapsize_directive() {
        let file = parse_source("@mapsize(-16384, 16384)");
        assert_eq!(
            file.body,
            vec![TopLevel::Mapsize {
                x: -16384.0,
                y: 16384.0
            }]
        );
    }

    #[test]
    fn material_exclusion_directive() {
        let file = parse_source(r#"@MaterialExclusion [ "debug" "editor" ]"#);
        assert_eq!(
            file.body,
            vec![TopLevel::MaterialExclusion {
                materials: vec!["debug".into(), "editor".into()]
            }]
        );
    }

    #[test]
    fn material_exclusion_may_be_empty() {
        let file = parse_source("@MaterialExclusion [ ]");
        assert_eq!(
            file.body,
            vec![TopLevel::MaterialExclusion { materials: vec![] }]
        );
    }

    #[test]
    fn auto_vis_group_directive_nests_categories_and_groups() {
        let file = parse_source(
            r#"@AutoVisGroup = "Brushes" [ "Triggers" [ "trigger_once" "trigger_multiple" ] "Lights" [ "light" ] ]"#,
        );
        match &file.body[..] {
            [TopLevel::AutoVisGroup {
                description,
                categories,
            }] => {
                assert_eq!(description, "Brushes");
                assert_eq!(categories.len(), 2);
                assert_eq!(categories[0].name, "Triggers");
                assert_eq!(categories[0].groups.len(), 2);
                assert_eq!(categories[0].groups[0].name, "trigger_once");
                assert_eq!(categories[1].name, "Lights");
                assert_eq!(categories[1].groups.len(), 1);
            }
            other => panic!("expected AutoVisGroup, got {:?}", other),
        }
    }

    #[test]
    fn top_level_must_open_with_at() {
        let err = parse_error("PointClass = e []");
        assert!(matches!(err, FgdError::UnexpectedToken { .. }), "{err:?}");
    }

    #[test]
    fn declaration_missing_equals_fails() {
        let err = parse_error("@SolidClass worldspawn [ ]");
        match err {
            FgdError::UnexpectedToken { found, expected } => {
                assert_eq!(found, "square([)");
                assert_eq!(expected, "name");
            }
            other => panic!("unexpected error {:?}", other),
        }
    }

    #[test]
    fn declaration_cut_off_mid_body_fails_with_end_of_input() {
        let err = parse_error(r#"@PointClass = e [ speed(integer) : "Speed""#);
        assert!(matches!(err, FgdError::UnexpectedEnd { .. }), "{err:?}");
    }

    #[test]
    fn unknown_body_token_fails() {
        let err = parse_error("@PointClass = e [ 42 ]");
        match err {
            FgdError::UnexpectedToken { found, .. } => assert_eq!(found, "number(42)"),
            other => panic!("unexpected error {:?}", other),
        }
    }
}
