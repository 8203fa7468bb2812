// ABOUTME: nom-combinator reader: turns one line of source into a Value tree

use nom::{
    branch::alt,
    bytes::complete::take_while1,
    character::complete::{char, digit0, digit1, multispace0, multispace1},
    combinator::{opt, recognize},
    multi::many0,
    sequence::delimited,
    IResult, Parser,
};

use crate::value::Value;

/// Skip whitespace only — `;` has no production in the grammar, so it is
/// left for `parse_expr`'s alternatives to reject.
fn ws(input: &str) -> IResult<&str, ()> {
    many0(multispace1).map(|_| ()).parse(input)
}

/// `-?[0-9]+\.?[0-9]*`
fn parse_number(input: &str) -> IResult<&str, Value> {
    recognize((opt(char('-')), digit1, opt((char('.'), digit0))))
        .map(|num_str: &str| Value::Number(num_str.parse().unwrap_or(f64::NAN)))
        .parse(input)
}

/// `[a-zA-Z0-9_+\-*/\\=<>!&]+`
fn parse_symbol(input: &str) -> IResult<&str, Value> {
    const SYMBOL_CHARS: &str =
        "abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789_+-*/\\=<>!&";
    let (input, text) = take_while1(|c| SYMBOL_CHARS.contains(c))(input)?;
    Ok((input, Value::Symbol(text.to_string())))
}

/// `'(' <expr>* ')'`
fn parse_sexpr(input: &str) -> IResult<&str, Value> {
    let (input, items) = delimited(
        char('('),
        delimited(multispace0, many0(parse_expr), multispace0),
        char(')'),
    )
    .parse(input)?;
    Ok((input, Value::SExpr(items)))
}

/// `'{' <expr>* '}'`
fn parse_qexpr(input: &str) -> IResult<&str, Value> {
    let (input, items) = delimited(
        char('{'),
        delimited(multispace0, many0(parse_expr), multispace0),
        char('}'),
    )
    .parse(input)?;
    Ok((input, Value::QExpr(items)))
}

/// `<number> | <symbol> | <sexpr> | <qexpr>`, preceded/followed by
/// whitespace.
fn parse_expr(input: &str) -> IResult<&str, Value> {
    let (input, _) = ws(input)?;
    let (input, v) = alt((parse_number, parse_sexpr, parse_qexpr, parse_symbol)).parse(input)?;
    let (input, _) = ws(input)?;
    Ok((input, v))
}

/// Reads at most one top-level expression from `input`.
///
/// `Ok(None)` means the line held only whitespace (the REPL prints nothing
/// and loops). `Ok(Some(v))` means exactly one expression was read.
/// `Err` covers both a malformed expression and non-whitespace trailing
/// input after a well-formed one (`program : ^ <expr>* $` admits only one
/// expression per line here; see the reader's top-level resolution).
pub fn parse(input: &str) -> Result<Option<Value>, String> {
    let (after_ws, _) = ws(input).map_err(|e| format!("Parse error: {e:?}"))?;
    if after_ws.is_empty() {
        return Ok(None);
    }

    match parse_expr(after_ws) {
        Ok((rest, value)) => {
            if rest.is_empty() {
                Ok(Some(value))
            } else {
                Err(format!("Parse error: unexpected trailing input: '{rest}'"))
            }
        }
        Err(e) => Err(format!("Parse error: {e:?}")),
    }
}
