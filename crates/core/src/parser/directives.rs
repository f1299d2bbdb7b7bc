use super::Parser;
use crate::ast::{Category, TopLevel, VisGroup};
use crate::error::FgdError;

impl<'a> Parser<'a> {
    /// `@include "file.fgd"`
    pub(super) fn parse_include(&mut self) -> Result<TopLevel, FgdError> {
        let name = self.take_str()?;
        Ok(TopLevel::Include { name })
    }

    /// `@mapsize(-16384, 16384)`
    pub(super) fn parse_mapsize(&mut self) -> Result<TopLevel, FgdError> {
        self.expect_paren('(')?;
        let x = self.take_number()?;
        self.expect_symbol(',')?;
        let y = self.take_number()?;
        self.expect_paren(')')?;
        Ok(TopLevel::Mapsize { x, y })
    }

    /// `@MaterialExclusion [ "dir" ... ]`
    pub(super) fn parse_material_exclusion(&mut self) -> Result<TopLevel, FgdError> {
        self.expect_square('[')?;
        let mut materials = Vec::new();
        while self.is_str() {
            materials.push(self.take_str()?);
        }
        self.expect_square(']')?;
        Ok(TopLevel::MaterialExclusion { materials })
    }

    /// `@AutoVisGroup = "desc" [ "category" [ "group" ... ] ... ]`
    pub(super) fn parse_auto_vis_group(&mut self) -> Result<TopLevel, FgdError> {
        self.expect_symbol('=')?;
        let description = self.take_str()?;
        self.expect_square('[')?;
        let mut categories = Vec::new();
        while self.is_str() {
            let name = self.take_str()?;
            self.expect_square('[')?;
            let mut groups = Vec::new();
            while self.is_str() {
                groups.push(VisGroup {
                    name: self.take_str()?,
                });
            }
            self.expect_square(']')?;
            categories.push(Category { name, groups });
        }
        self.expect_square(']')?;
        Ok(TopLevel::AutoVisGroup {
            description,
            categories,
        })
    }
}
