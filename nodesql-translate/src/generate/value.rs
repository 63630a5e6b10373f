//! Rendering of variables and constants under the expected type.

use super::SqlGenerator;
use crate::ast::Value;
use crate::dialect::quote_str;
use crate::error::{Result, TranslateError};
use crate::types::ValueType;
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use nodesql_vocab::nodes;

/// SQL timestamp literal format.
const SQL_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.3f";

impl SqlGenerator<'_, '_> {
    pub(super) fn variable(&mut self, name: &str) -> Result<()> {
        let ctx = self.ctx;
        let Some(var) = ctx.variables.get(name) else {
            self.out.push_str("NULL");
            return Ok(());
        };

        if let Some(substitute) = var.substitutes.first() {
            return self.visit(substitute);
        }

        if var.projection_type.is_materialized() {
            let expr = var
                .expressions
                .first()
                .ok_or_else(|| TranslateError::MissingExpression(name.to_string()))?;
            self.out.push_str(expr);
            return Ok(());
        }

        let column = |column: &str| {
            var.column(column)
                .ok_or_else(|| TranslateError::missing_alias(name))
        };
        let sql = match self.current() {
            ValueType::String | ValueType::Uri => column(nodes::SVALUE)?,
            ValueType::Int => column(nodes::IVALUE)?,
            ValueType::Double | ValueType::Decimal => column(nodes::DVALUE)?,
            ValueType::Bool => column(nodes::BVALUE)?,
            ValueType::Date => column(nodes::TVALUE)?,
            ValueType::TzDate => {
                let alias = var
                    .alias
                    .as_deref()
                    .ok_or_else(|| TranslateError::missing_alias(name))?;
                ctx.dialect.date_time_tz(alias)
            }
            ValueType::Term | ValueType::Node => var
                .primary_expression()
                .ok_or_else(|| TranslateError::missing_alias(name))?,
            other @ (ValueType::Any | ValueType::None) => {
                return Err(TranslateError::UnsupportedValueType(other))
            }
        };
        self.out.push_str(&sql);
        Ok(())
    }

    pub(super) fn constant(&mut self, value: &Value) -> Result<()> {
        let lexical = value.string_value();
        let sql = match self.current() {
            ValueType::String | ValueType::Uri => quote_str(lexical),
            ValueType::Int => lexical
                .trim()
                .parse::<i64>()
                .map_err(|_| TranslateError::invalid_literal("integer", lexical))?
                .to_string(),
            ValueType::Double | ValueType::Decimal => {
                let d = parse_double(lexical)
                    .ok_or_else(|| TranslateError::invalid_literal("double", lexical))?;
                format!("{d:?}")
            }
            ValueType::Bool => {
                if parse_bool(lexical) {
                    "TRUE".to_string()
                } else {
                    "FALSE".to_string()
                }
            }
            ValueType::Date => {
                let ts = parse_timestamp(lexical)
                    .ok_or_else(|| TranslateError::invalid_literal("date", lexical))?;
                format!("'{}'", ts.format(SQL_TIMESTAMP_FORMAT))
            }
            ValueType::Term | ValueType::Node => self.ctx.converter.convert(value)?.id.to_string(),
            other => return Err(TranslateError::UnsupportedValueType(other)),
        };
        self.out.push_str(&sql);
        Ok(())
    }
}

fn parse_double(lexical: &str) -> Option<f64> {
    lexical
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|d| d.is_finite())
}

fn parse_bool(lexical: &str) -> bool {
    let lexical = lexical.trim();
    lexical.eq_ignore_ascii_case("true") || lexical == "1"
}

/// Parse an xsd:dateTime, xsd:date or xsd:time lexical form; offsets are
/// normalized to UTC. Times land on 1970-01-01.
fn parse_timestamp(lexical: &str) -> Option<NaiveDateTime> {
    let lexical = lexical.trim();
    if let Some(dt) = parse_date_time(lexical) {
        return Some(dt);
    }
    if let (Some(date), Some(zone)) = (lexical.get(..10), lexical.get(10..)) {
        if NaiveDate::parse_from_str(date, "%Y-%m-%d").is_ok() {
            return parse_date_time(&format!("{date}T00:00:00{zone}"));
        }
    }
    if lexical.contains(':') && !lexical.contains('T') {
        return parse_date_time(&format!("1970-01-01T{lexical}"));
    }
    None
}

fn parse_date_time(lexical: &str) -> Option<NaiveDateTime> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(lexical) {
        return Some(dt.naive_utc());
    }
    NaiveDateTime::parse_from_str(lexical, "%Y-%m-%dT%H:%M:%S%.f").ok()
}
