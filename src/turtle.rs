//! Turtle loader.
//!
//! Parsing happens in two passes:
//!
//! ```text
//! Source → parser (nom) → raw statements (prefixed names, anonymous nodes, collections)
//!                               ↓
//!                     lowering (prefix expansion, base resolution, blank node allocation)
//!                               ↓
//!                          MemoryStore
//! ```
//!
//! The accepted grammar covers what digital-twin exports use: `@prefix`/`PREFIX`,
//! `@base`/`BASE`, IRIs, prefixed names, `a`, blank node labels, `[ … ]` property lists,
//! `( … )` collections, quoted literals with language tags or datatypes, numerals, booleans
//! and `#` comments.

use std::collections::HashMap;
use std::path::Path;

use nom::{
    branch::alt,
    bytes::complete::{tag, tag_no_case, take_until, take_while},
    character::complete::{alpha1, alphanumeric1, char, digit1, multispace1, one_of},
    combinator::{all_consuming, cut, map, opt, recognize, value},
    error::{context, ContextError as _, ErrorKind, ParseError as _, VerboseError},
    multi::{many0, separated_list1},
    sequence::{delimited, pair, preceded, terminated, tuple},
    IResult,
};
use tracing::{debug, instrument};
use url::Url;

use crate::error::{ExtractError, Result};
use crate::store::{FactStore, MemoryStore};
use crate::term::Term;
use crate::vocab::{RDF_FIRST, RDF_NIL, RDF_REST, RDF_TYPE, XSD_NS};

// ============================================================================
// Public API
// ============================================================================

/// Parses a Turtle document into a fresh in-memory store.
#[instrument(skip(input), fields(bytes = input.len()))]
pub fn parse_turtle(input: &str) -> Result<MemoryStore> {
    let statements = match all_consuming(document)(input) {
        Ok((_, statements)) => statements,
        Err(nom::Err::Error(e)) | Err(nom::Err::Failure(e)) => {
            return Err(ExtractError::Parse {
                message: nom::error::convert_error(input, e),
            })
        }
        Err(nom::Err::Incomplete(_)) => {
            return Err(ExtractError::Parse {
                message: "incomplete input".to_string(),
            })
        }
    };

    let mut lowering = Lowering::default();
    for statement in statements {
        lowering.statement(statement)?;
    }

    debug!(
        facts = lowering.store.len(),
        prefixes = lowering.store.namespaces().len(),
        "turtle document loaded"
    );
    Ok(lowering.store)
}

/// Reads and parses a Turtle file.
pub fn load_turtle_file(path: impl AsRef<Path>) -> Result<MemoryStore> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path).map_err(|source| ExtractError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_turtle(&text)
}

// ============================================================================
// Raw statements
// ============================================================================

type Res<'a, T> = IResult<&'a str, T, VerboseError<&'a str>>;

type PredicateObjects = (Node, Vec<Node>);

#[derive(Debug, Clone, PartialEq)]
enum Node {
    Iri(String),
    Prefixed { prefix: String, local: String },
    /// The `a` keyword in verb position.
    A,
    Blank(String),
    Anon(Vec<PredicateObjects>),
    Collection(Vec<Node>),
    Literal {
        lexical: String,
        datatype: Option<Box<Node>>,
        language: Option<String>,
    },
}

#[derive(Debug, Clone, PartialEq)]
enum Statement {
    Prefix { prefix: String, iri: String },
    Base(String),
    Triples {
        subject: Node,
        properties: Vec<PredicateObjects>,
    },
}

// ============================================================================
// Internal parsers
// ============================================================================

fn document(input: &str) -> Res<'_, Vec<Statement>> {
    let (input, statements) = many0(preceded(ws, statement))(input)?;
    let (input, _) = ws(input)?;
    Ok((input, statements))
}

fn statement(input: &str) -> Res<'_, Statement> {
    alt((directive, triples))(input)
}

/// Whitespace and comments.
fn ws(input: &str) -> Res<'_, ()> {
    value((), many0(alt((multispace1, comment))))(input)
}

fn comment(input: &str) -> Res<'_, &str> {
    recognize(pair(char('#'), take_while(|c| c != '\n' && c != '\r')))(input)
}

// ----------------------------------------------------------------------------
// Directives
// ----------------------------------------------------------------------------

fn directive(input: &str) -> Res<'_, Statement> {
    alt((prefix_directive, sparql_prefix, base_directive, sparql_base))(input)
}

fn prefix_directive(input: &str) -> Res<'_, Statement> {
    let (input, _) = tag("@prefix")(input)?;
    let (input, (prefix, iri)) = cut(context(
        "@prefix declaration",
        pair(preceded(ws, prefix_label), preceded(ws, iri_ref)),
    ))(input)?;
    let (input, _) = cut(context("'.' after @prefix", preceded(ws, char('.'))))(input)?;
    Ok((input, Statement::Prefix { prefix, iri }))
}

fn sparql_prefix(input: &str) -> Res<'_, Statement> {
    let (input, _) = terminated(tag_no_case("PREFIX"), multispace1)(input)?;
    let (input, (prefix, iri)) = cut(context(
        "PREFIX declaration",
        pair(preceded(ws, prefix_label), preceded(ws, iri_ref)),
    ))(input)?;
    Ok((input, Statement::Prefix { prefix, iri }))
}

fn base_directive(input: &str) -> Res<'_, Statement> {
    let (input, _) = tag("@base")(input)?;
    let (input, iri) = cut(context("@base declaration", preceded(ws, iri_ref)))(input)?;
    let (input, _) = cut(context("'.' after @base", preceded(ws, char('.'))))(input)?;
    Ok((input, Statement::Base(iri)))
}

fn sparql_base(input: &str) -> Res<'_, Statement> {
    let (input, _) = terminated(tag_no_case("BASE"), multispace1)(input)?;
    let (input, iri) = cut(context("BASE declaration", preceded(ws, iri_ref)))(input)?;
    Ok((input, Statement::Base(iri)))
}

/// `ns0:` in a prefix declaration, returned without the colon.
fn prefix_label(input: &str) -> Res<'_, String> {
    let (input, prefix) = opt(|i| name(i, false))(input)?;
    let (input, _) = char(':')(input)?;
    Ok((input, prefix.unwrap_or_default().to_string()))
}

// ----------------------------------------------------------------------------
// Triples
// ----------------------------------------------------------------------------

fn triples(input: &str) -> Res<'_, Statement> {
    let (input, subject) = subject(input)?;
    let (input, _) = ws(input)?;

    let standalone_anon = matches!(&subject, Node::Anon(props) if !props.is_empty());
    let (input, properties) = if standalone_anon {
        map(opt(predicate_object_list), Option::unwrap_or_default)(input)?
    } else {
        cut(context("predicate list", predicate_object_list))(input)?
    };

    let (input, _) = cut(context("'.' ending statement", preceded(ws, char('.'))))(input)?;
    Ok((input, Statement::Triples { subject, properties }))
}

fn subject(input: &str) -> Res<'_, Node> {
    alt((blank_label, iri, anon, collection))(input)
}

fn predicate_object_list(input: &str) -> Res<'_, Vec<PredicateObjects>> {
    let (mut input, first) = predicate_objects(input)?;
    let mut out = vec![first];

    loop {
        let (rest, _) = ws(input)?;
        let Ok((rest, _)) = char::<_, VerboseError<&str>>(';')(rest) else {
            break;
        };
        input = rest;

        // `;` may repeat or trail before `.` / `]`.
        let (rest, _) = ws(input)?;
        match predicate_objects(rest) {
            Ok((rest, po)) => {
                out.push(po);
                input = rest;
            }
            Err(nom::Err::Error(_)) => {}
            Err(e) => return Err(e),
        }
    }

    Ok((input, out))
}

fn predicate_objects(input: &str) -> Res<'_, PredicateObjects> {
    let (input, verb) = verb(input)?;
    let (input, _) = ws(input)?;
    let (input, objects) = cut(context(
        "object list",
        separated_list1(tuple((ws, char(','), ws)), object),
    ))(input)?;
    Ok((input, (verb, objects)))
}

fn verb(input: &str) -> Res<'_, Node> {
    alt((map(|i| keyword(i, "a"), |_| Node::A), iri))(input)
}

fn object(input: &str) -> Res<'_, Node> {
    alt((literal, blank_label, iri, anon, collection))(input)
}

// ----------------------------------------------------------------------------
// Nodes
// ----------------------------------------------------------------------------

fn iri(input: &str) -> Res<'_, Node> {
    alt((map(iri_ref, Node::Iri), prefixed_name))(input)
}

fn iri_ref(input: &str) -> Res<'_, String> {
    map(
        delimited(
            char('<'),
            take_while(|c: char| c != '>' && c != '<' && c != '"' && !c.is_whitespace()),
            char('>'),
        ),
        str::to_string,
    )(input)
}

fn prefixed_name(input: &str) -> Res<'_, Node> {
    let (input, prefix) = opt(|i| name(i, false))(input)?;
    let (input, _) = char(':')(input)?;
    let (input, local) = opt(|i| name(i, true))(input)?;
    Ok((
        input,
        Node::Prefixed {
            prefix: prefix.unwrap_or_default().to_string(),
            local: local.unwrap_or_default().replace('\\', ""),
        },
    ))
}

fn blank_label(input: &str) -> Res<'_, Node> {
    map(preceded(tag("_:"), |i| name(i, false)), |label: &str| {
        Node::Blank(label.to_string())
    })(input)
}

fn anon(input: &str) -> Res<'_, Node> {
    let (input, _) = char('[')(input)?;
    let (input, _) = ws(input)?;
    let (input, properties) = opt(predicate_object_list)(input)?;
    let (input, _) = cut(context("closing ']'", preceded(ws, char(']'))))(input)?;
    Ok((input, Node::Anon(properties.unwrap_or_default())))
}

fn collection(input: &str) -> Res<'_, Node> {
    let (input, _) = char('(')(input)?;
    let (input, items) = many0(preceded(ws, object))(input)?;
    let (input, _) = cut(context("closing ')'", preceded(ws, char(')'))))(input)?;
    Ok((input, Node::Collection(items)))
}

/// Prefix or local part of a prefixed name. Trailing dots belong to the statement, not the name.
fn name(input: &str, local: bool) -> Res<'_, &str> {
    let mut escaped = false;
    let end = input
        .char_indices()
        .find(|&(_, c)| {
            if escaped {
                escaped = false;
                return false;
            }
            if local && c == '\\' {
                escaped = true;
                return false;
            }
            !(is_name_char(c) || (local && (c == ':' || c == '%')))
        })
        .map_or(input.len(), |(i, _)| i);

    let token = input[..end].trim_end_matches('.');
    let starts_ok = token
        .chars()
        .next()
        .is_some_and(|c| c.is_alphabetic() || c == '_' || (local && (c.is_ascii_digit() || c == ':')));
    if token.is_empty() || !starts_ok {
        return Err(nom::Err::Error(VerboseError::from_error_kind(
            input,
            ErrorKind::AlphaNumeric,
        )));
    }
    Ok((&input[token.len()..], token))
}

fn is_name_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_' || c == '-' || c == '.' || (!c.is_ascii() && !c.is_whitespace())
}

/// A bare keyword that must not run on into a longer name.
fn keyword<'a>(input: &'a str, word: &'static str) -> Res<'a, &'a str> {
    let (rest, matched) = tag(word)(input)?;
    match rest.chars().next() {
        Some(c) if is_name_char(c) || c == ':' => Err(nom::Err::Error(
            VerboseError::from_error_kind(input, ErrorKind::Tag),
        )),
        _ => Ok((rest, matched)),
    }
}

// ----------------------------------------------------------------------------
// Literals
// ----------------------------------------------------------------------------

fn literal(input: &str) -> Res<'_, Node> {
    alt((string_literal, numeric_literal, boolean_literal))(input)
}

fn string_literal(input: &str) -> Res<'_, Node> {
    let (input, lexical) = alt((
        |i| long_string(i, "\"\"\""),
        |i| long_string(i, "'''"),
        |i| short_string(i, '"'),
        |i| short_string(i, '\''),
    ))(input)?;

    let (input, language) = opt(preceded(
        char('@'),
        recognize(pair(alpha1, many0(pair(char('-'), alphanumeric1)))),
    ))(input)?;

    let (input, datatype) = if language.is_none() {
        opt(preceded(tag("^^"), cut(context("datatype IRI", iri))))(input)?
    } else {
        (input, None)
    };

    Ok((
        input,
        Node::Literal {
            lexical,
            datatype: datatype.map(Box::new),
            language: language.map(str::to_string),
        },
    ))
}

fn long_string<'a>(input: &'a str, quotes: &'static str) -> Res<'a, String> {
    map(
        delimited(tag(quotes), take_until(quotes), cut(tag(quotes))),
        unescape,
    )(input)
}

fn short_string(input: &str, quote: char) -> Res<'_, String> {
    let (rest, _) = char(quote)(input)?;

    let mut escaped = false;
    for (i, c) in rest.char_indices() {
        match c {
            _ if escaped => escaped = false,
            '\\' => escaped = true,
            '\n' | '\r' => break,
            c if c == quote => {
                let body = &rest[..i];
                return Ok((&rest[i + c.len_utf8()..], unescape(body)));
            }
            _ => {}
        }
    }

    Err(nom::Err::Failure(VerboseError::add_context(
        input,
        "unterminated string literal",
        VerboseError::from_error_kind(input, ErrorKind::Char),
    )))
}

fn unescape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('t') => out.push('\t'),
            Some('n') => out.push('\n'),
            Some('r') => out.push('\r'),
            Some('b') => out.push('\u{8}'),
            Some('f') => out.push('\u{c}'),
            Some(q @ ('"' | '\'' | '\\')) => out.push(q),
            Some(u @ ('u' | 'U')) => {
                let width = if u == 'u' { 4 } else { 8 };
                let hex: String = chars.by_ref().take(width).collect();
                match u32::from_str_radix(&hex, 16).ok().and_then(char::from_u32) {
                    Some(decoded) => out.push(decoded),
                    None => {
                        out.push('\\');
                        out.push(u);
                        out.push_str(&hex);
                    }
                }
            }
            Some(other) => {
                out.push('\\');
                out.push(other);
            }
            None => out.push('\\'),
        }
    }
    out
}

fn numeric_literal(input: &str) -> Res<'_, Node> {
    let (input, lexical) = recognize(tuple((
        opt(one_of("+-")),
        alt((
            recognize(pair(digit1, opt(pair(char('.'), digit1)))),
            recognize(pair(char('.'), digit1)),
        )),
        opt(tuple((one_of("eE"), opt(one_of("+-")), digit1))),
    )))(input)?;

    let kind = if lexical.contains(['e', 'E']) {
        "double"
    } else if lexical.contains('.') {
        "decimal"
    } else {
        "integer"
    };

    Ok((input, typed_literal(lexical, kind)))
}

fn boolean_literal(input: &str) -> Res<'_, Node> {
    let (input, lexical) = alt((|i| keyword(i, "true"), |i| keyword(i, "false")))(input)?;
    Ok((input, typed_literal(lexical, "boolean")))
}

fn typed_literal(lexical: &str, xsd_type: &str) -> Node {
    Node::Literal {
        lexical: lexical.to_string(),
        datatype: Some(Box::new(Node::Iri(format!("{XSD_NS}{xsd_type}")))),
        language: None,
    }
}

// ============================================================================
// Lowering
// ============================================================================

#[derive(Default)]
struct Lowering {
    store: MemoryStore,
    prefixes: HashMap<String, String>,
    base: Option<Url>,
    labels: HashMap<String, Term>,
    next_blank: usize,
}

impl Lowering {
    fn statement(&mut self, statement: Statement) -> Result<()> {
        match statement {
            Statement::Prefix { prefix, iri } => {
                let iri = self.resolve(&iri)?;
                self.store.bind_prefix(prefix.clone(), iri.clone());
                self.prefixes.insert(prefix, iri);
            }
            Statement::Base(iri) => {
                let iri = self.resolve(&iri)?;
                self.base = Some(Url::parse(&iri).map_err(|e| ExtractError::Parse {
                    message: format!("invalid base IRI <{iri}>: {e}"),
                })?);
            }
            Statement::Triples {
                subject,
                properties,
            } => {
                let subject = self.node(subject)?;
                self.properties(&subject, properties)?;
            }
        }
        Ok(())
    }

    fn properties(&mut self, subject: &Term, properties: Vec<PredicateObjects>) -> Result<()> {
        for (verb, objects) in properties {
            let predicate = self.node(verb)?;
            for object in objects {
                let object = self.node(object)?;
                self.store.add(subject.clone(), predicate.clone(), object);
            }
        }
        Ok(())
    }

    fn node(&mut self, node: Node) -> Result<Term> {
        Ok(match node {
            Node::Iri(raw) => Term::iri(self.resolve(&raw)?),
            Node::Prefixed { prefix, local } => {
                let Some(ns) = self.prefixes.get(&prefix) else {
                    return Err(ExtractError::Parse {
                        message: format!("undeclared prefix `{prefix}:`"),
                    });
                };
                Term::iri(format!("{ns}{local}"))
            }
            Node::A => Term::iri(RDF_TYPE),
            Node::Blank(label) => match self.labels.get(&label) {
                Some(term) => term.clone(),
                None => {
                    let term = self.fresh_blank();
                    self.labels.insert(label, term.clone());
                    term
                }
            },
            Node::Anon(properties) => {
                let term = self.fresh_blank();
                self.properties(&term, properties)?;
                term
            }
            Node::Collection(items) => self.collection(items)?,
            Node::Literal {
                lexical,
                datatype,
                language,
            } => match (language, datatype) {
                (Some(lang), _) => Term::tagged(lexical, lang),
                (None, Some(dt)) => match self.node(*dt)? {
                    Term::Iri(dt) => Term::typed(lexical, dt),
                    _ => Term::literal(lexical),
                },
                (None, None) => Term::literal(lexical),
            },
        })
    }

    /// Expands `( a b c )` into a first/rest chain and returns its head.
    fn collection(&mut self, items: Vec<Node>) -> Result<Term> {
        if items.is_empty() {
            return Ok(Term::iri(RDF_NIL));
        }

        let first = Term::iri(RDF_FIRST);
        let rest = Term::iri(RDF_REST);
        let head = self.fresh_blank();
        let mut cell = head.clone();
        let count = items.len();

        for (i, item) in items.into_iter().enumerate() {
            let element = self.node(item)?;
            self.store.add(cell.clone(), first.clone(), element);

            let next = if i + 1 == count {
                Term::iri(RDF_NIL)
            } else {
                self.fresh_blank()
            };
            self.store.add(cell, rest.clone(), next.clone());
            cell = next;
        }

        Ok(head)
    }

    fn fresh_blank(&mut self) -> Term {
        let term = Term::blank(format!("b{}", self.next_blank));
        self.next_blank += 1;
        term
    }

    /// Resolves a possibly relative IRI against the current base.
    fn resolve(&self, raw: &str) -> Result<String> {
        if Url::parse(raw).is_ok() {
            return Ok(raw.to_string());
        }
        match &self.base {
            Some(base) => base
                .join(raw)
                .map(String::from)
                .map_err(|e| ExtractError::Parse {
                    message: format!("cannot resolve <{raw}> against <{base}>: {e}"),
                }),
            None => Ok(raw.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const NS: &str = "http://www.example.org/digitaltwin#";

    fn ns(local: &str) -> Term {
        Term::iri(format!("{NS}{local}"))
    }

    #[test]
    fn prefixes_and_simple_statements() {
        let store = parse_turtle(
            r#"
            @prefix ns0: <http://www.example.org/digitaltwin#> .
            PREFIX geo: <http://www.opengis.net/ont/geosparql#>

            # the floor
            ns0:Atlas_floor_3 ns0:hasChildDigitalTwin ns0:Room_10, ns0:Room_11 ;
                ns0:hasSensor ns0:S1 .
            ns0:S1 ns0:sensorID "T-100" ; ns0:sensorType "Temperature" ; .
            "#,
        )
        .unwrap();

        assert_eq!(
            store.namespaces(),
            vec![
                ("ns0".to_string(), NS.to_string()),
                (
                    "geo".to_string(),
                    "http://www.opengis.net/ont/geosparql#".to_string()
                ),
            ]
        );
        assert_eq!(
            store.objects(&ns("Atlas_floor_3"), &ns("hasChildDigitalTwin")),
            vec![ns("Room_10"), ns("Room_11")]
        );
        assert_eq!(
            store.value(&ns("S1"), &ns("sensorType")),
            Some(Term::literal("Temperature"))
        );
        assert_eq!(store.len(), 5);
    }

    #[test]
    fn local_names_keep_inner_dots_but_not_terminator() {
        let store = parse_turtle(
            "@prefix : <http://www.example.org/digitaltwin#> .\n:floor.3 :hasChildDigitalTwin :room.1.",
        )
        .unwrap();
        assert_eq!(
            store.objects(&ns("floor.3"), &ns("hasChildDigitalTwin")),
            vec![ns("room.1")]
        );
    }

    #[test]
    fn literals_numbers_and_tags() {
        let store = parse_turtle(
            r#"
            @prefix ns0: <http://www.example.org/digitaltwin#> .
            @prefix xsd: <http://www.w3.org/2001/XMLSchema#> .
            ns0:G ns0:latitude 52.37 ;
                  ns0:longitude -4.9e0 ;
                  ns0:altitude 12 ;
                  ns0:label "Hall \"A\""@en ;
                  ns0:code 'x1'^^xsd:token ;
                  ns0:active true ;
                  ns0:note """multi
line""" .
            "#,
        )
        .unwrap();

        let lat = store.value(&ns("G"), &ns("latitude")).unwrap();
        assert_eq!(lat, Term::typed("52.37", format!("{XSD_NS}decimal")));
        assert_eq!(
            store.value(&ns("G"), &ns("longitude")).unwrap().as_f64(),
            Some(-4.9)
        );
        assert_eq!(
            store.value(&ns("G"), &ns("altitude")),
            Some(Term::typed("12", format!("{XSD_NS}integer")))
        );
        assert_eq!(
            store.value(&ns("G"), &ns("label")),
            Some(Term::tagged("Hall \"A\"", "en"))
        );
        assert_eq!(
            store.value(&ns("G"), &ns("code")),
            Some(Term::typed("x1", format!("{XSD_NS}token")))
        );
        assert_eq!(
            store.value(&ns("G"), &ns("active")),
            Some(Term::typed("true", format!("{XSD_NS}boolean")))
        );
        assert_eq!(
            store.value(&ns("G"), &ns("note")),
            Some(Term::literal("multi\nline"))
        );
    }

    #[test]
    fn collections_expand_to_first_rest_chains() {
        let store = parse_turtle(
            r#"
            @prefix ns0: <http://www.example.org/digitaltwin#> .
            ns0:Mesh ns0:hasVertices ( ns0:V1 ns0:V2 ) .
            ns0:Empty ns0:hasVertices () .
            "#,
        )
        .unwrap();

        let first = Term::iri(RDF_FIRST);
        let rest = Term::iri(RDF_REST);

        let head = store.value(&ns("Mesh"), &ns("hasVertices")).unwrap();
        assert_eq!(store.value(&head, &first), Some(ns("V1")));
        let second = store.value(&head, &rest).unwrap();
        assert_eq!(store.value(&second, &first), Some(ns("V2")));
        assert_eq!(store.value(&second, &rest), Some(Term::iri(RDF_NIL)));

        assert_eq!(
            store.value(&ns("Empty"), &ns("hasVertices")),
            Some(Term::iri(RDF_NIL))
        );
    }

    #[test]
    fn blank_nodes_labels_and_property_lists() {
        let store = parse_turtle(
            r#"
            @prefix ns0: <http://www.example.org/digitaltwin#> .
            ns0:Room ns0:hasSensor _:s , [ ns0:sensorID "S-2" ] ;
                     a ns0:Room .
            _:s ns0:sensorID "S-1" .
            [ ns0:sensorID "S-3" ] .
            "#,
        )
        .unwrap();

        let sensors = store.objects(&ns("Room"), &ns("hasSensor"));
        assert_eq!(sensors.len(), 2);
        assert_eq!(
            store.value(&sensors[0], &ns("sensorID")),
            Some(Term::literal("S-1"))
        );
        assert_eq!(
            store.value(&sensors[1], &ns("sensorID")),
            Some(Term::literal("S-2"))
        );
        assert_eq!(
            store.value(&ns("Room"), &Term::iri(RDF_TYPE)),
            Some(ns("Room"))
        );
        assert_eq!(store.subjects_with(&ns("sensorID")).len(), 3);
    }

    #[test]
    fn base_resolves_relative_iris() {
        let store = parse_turtle(
            r#"
            @base <http://www.example.org/digitaltwin> .
            <#Floor> <#hasChildDigitalTwin> <#Room> .
            "#,
        )
        .unwrap();
        assert_eq!(
            store.objects(&ns("Floor"), &ns("hasChildDigitalTwin")),
            vec![ns("Room")]
        );
    }

    #[test]
    fn undeclared_prefix_is_rejected() {
        let err = parse_turtle("ns9:A ns9:b ns9:C .").unwrap_err();
        assert!(matches!(err, ExtractError::Parse { ref message } if message.contains("ns9")));
    }

    #[test]
    fn missing_terminator_is_rejected() {
        let err = parse_turtle(
            "@prefix ns0: <http://www.example.org/digitaltwin#> .\nns0:A ns0:b ns0:C",
        )
        .unwrap_err();
        assert!(matches!(err, ExtractError::Parse { .. }));
    }

    #[test]
    fn reads_files() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("dt.ttl");
        std::fs::write(
            &path,
            "@prefix ns0: <http://www.example.org/digitaltwin#> .\nns0:A ns0:hasChildDigitalTwin ns0:B .\n",
        )
        .unwrap();

        let store = load_turtle_file(&path).unwrap();
        assert_eq!(store.len(), 1);

        let err = load_turtle_file(dir.path().join("missing.ttl")).unwrap_err();
        assert!(matches!(err, ExtractError::Io { .. }));
    }
}
