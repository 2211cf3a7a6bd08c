//! Inline `style` attribute handling.
//!
//! Declarations are tokenized with `cssparser`; values are kept as the verbatim source slice so
//! nothing is normalized or reformatted. Property names are camel-cased for the output tree and
//! turned back into CSS names when serializing to HTML.

use cssparser::{
    AtRuleParser, CowRcStr, DeclarationParser, ParseError, Parser, ParserInput, ParserState,
    QualifiedRuleParser, RuleBodyItemParser, RuleBodyParser,
};
use std::collections::BTreeMap;

/// Camel-cased property name to verbatim value.
pub type StyleMap = BTreeMap<String, String>;

struct InlineStyleParser;

impl<'i> DeclarationParser<'i> for InlineStyleParser {
    type Declaration = (String, String);
    type Error = ();

    fn parse_value<'t>(
        &mut self,
        name: CowRcStr<'i>,
        input: &mut Parser<'i, 't>,
        _start: &ParserState,
    ) -> Result<Self::Declaration, ParseError<'i, Self::Error>> {
        let start = input.position();
        while input.next_including_whitespace_and_comments().is_ok() {}
        let value = input.slice_from(start).trim();
        if value.is_empty() {
            return Err(input.new_custom_error(()));
        }
        Ok((name.to_string(), value.to_string()))
    }
}

impl<'i> AtRuleParser<'i> for InlineStyleParser {
    type Prelude = ();
    type AtRule = (String, String);
    type Error = ();
}

impl<'i> QualifiedRuleParser<'i> for InlineStyleParser {
    type Prelude = ();
    type QualifiedRule = (String, String);
    type Error = ();
}

impl<'i> RuleBodyItemParser<'i, (String, String), ()> for InlineStyleParser {
    fn parse_declarations(&self) -> bool {
        true
    }

    fn parse_qualified(&self) -> bool {
        false
    }
}

/// Parse a declaration list (`color: red; margin-top: 1px`) into a camel-cased map.
///
/// A style string containing any malformed declaration yields an empty map. Later duplicates
/// override earlier ones, as in the cascade.
pub fn parse_style(source: &str) -> StyleMap {
    let mut input = ParserInput::new(source);
    let mut parser = Parser::new(&mut input);
    let mut declarations = InlineStyleParser;

    let mut style = StyleMap::new();
    for result in RuleBodyParser::new(&mut parser, &mut declarations) {
        match result {
            Ok((name, value)) => {
                style.insert(camel_case(&name), value);
            }
            Err((error, slice)) => {
                log::debug!("discarding malformed style `{source}` at `{slice}`: {error:?}");
                return StyleMap::new();
            }
        }
    }
    style
}

/// `margin-top` → `marginTop`, `-webkit-foo` → `WebkitFoo`, `-ms-foo` → `msFoo`.
///
/// Custom properties (`--name`) are case-sensitive and kept as written.
pub fn camel_case(name: &str) -> String {
    if name.starts_with("--") {
        return name.to_string();
    }
    let name = match name.strip_prefix("-ms-") {
        Some(rest) => format!("ms-{rest}"),
        None => name.to_string(),
    };

    let mut out = String::with_capacity(name.len());
    let mut chars = name.chars().peekable();
    while let Some(c) = chars.next() {
        match chars.peek() {
            Some(next) if c == '-' && next.is_ascii_lowercase() => {
                out.push(next.to_ascii_uppercase());
                chars.next();
            }
            _ => out.push(c),
        }
    }
    out
}

/// Inverse of [`camel_case`].
pub fn kebab_case(property: &str) -> String {
    if property.starts_with("--") {
        return property.to_string();
    }
    let property = match property.strip_prefix("ms") {
        Some(rest) if rest.starts_with(|c: char| c.is_ascii_uppercase()) => format!("-ms{rest}"),
        _ => property.to_string(),
    };

    let mut out = String::with_capacity(property.len() + 4);
    for c in property.chars() {
        if c.is_ascii_uppercase() {
            out.push('-');
            out.push(c.to_ascii_lowercase());
        } else {
            out.push(c);
        }
    }
    out
}

/// Render a style map back into a declaration list.
pub fn serialize_style(style: &StyleMap) -> String {
    style
        .iter()
        .map(|(property, value)| format!("{}: {value};", kebab_case(property)))
        .collect::<Vec<_>>()
        .join(" ")
}
