//! Text surface for the query language.
//!
//! Parses the SPARQL-shaped subset the analyses use:
//!
//! ```text
//! PREFIX ex: <http://example.org/posthuman#>
//! SELECT ?char ?rel ?concept (COUNT(*) AS ?cnt)
//! WHERE {
//!   ?char ?rel ?concept .
//!   FILTER (?rel IN (ex:strugglesWith, ex:linkedTo, ex:questions))
//! }
//! GROUP BY ?char ?rel ?concept
//! ORDER BY ?char DESC(?cnt)
//! ```
//!
//! Several triple patterns are allowed (joined on shared variables), and a
//! subject may carry a `;`-separated predicate-object list, which is how
//! mention-node queries (`?m a ex:Mention ; ex:subject ?char ; ...`) come
//! in. `a` abbreviates `rdf:type`. Constructs outside the subset fail with
//! [`QueryError::Unsupported`], never with silently partial results.

use nom::{
    branch::alt,
    bytes::complete::{tag, tag_no_case, take_while1},
    character::complete::{char, multispace0, multispace1},
    combinator::{map, opt, recognize},
    multi::{many0, many1, separated_list1},
    sequence::{delimited, pair, preceded, terminated, tuple},
    IResult,
};
use std::collections::HashMap;

use lit_graph_core::iri::Iri;

use crate::ast::{
    Aggregate, OrderKey, PredicateFilter, Query, TermPattern, TriplePattern,
};
use crate::error::{QueryError, QueryResult};

const RDF_TYPE: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#type";

/// Constructs we recognize in order to reject them by name.
const UNSUPPORTED_KEYWORDS: [&str; 6] =
    ["OPTIONAL", "UNION", "MINUS", "BIND", "CONTAINS", "LCASE"];

#[derive(Debug, Clone)]
enum RawTerm {
    Var(String),
    FullIri(String),
    Prefixed(String, String),
    A,
}

#[derive(Debug, Clone)]
enum RawSelectItem {
    Var(String),
    Count { alias: String },
    Sum { var: String, alias: String },
}

#[derive(Debug, Clone)]
struct RawStatement {
    subject: RawTerm,
    arcs: Vec<(RawTerm, RawTerm)>,
}

#[derive(Debug, Clone)]
struct RawFilter {
    var: String,
    allowed: Vec<RawTerm>,
}

#[derive(Debug, Clone)]
enum RawOrderKey {
    Asc(String),
    Desc(String),
    Plain(String),
}

#[derive(Debug, Clone)]
struct RawQuery {
    prefixes: Vec<(String, String)>,
    select: Vec<RawSelectItem>,
    statements: Vec<RawStatement>,
    filter: Option<RawFilter>,
    group_by: Vec<String>,
    order_by: Vec<RawOrderKey>,
}

/// Parse a query string.
pub fn parse_query(input: &str) -> QueryResult<Query> {
    for keyword in UNSUPPORTED_KEYWORDS {
        if input.to_uppercase().contains(keyword) {
            return Err(QueryError::Unsupported(format!("{keyword} is not supported")));
        }
    }

    let (rest, raw) = raw_query(input)
        .map_err(|e| QueryError::Parse(e.to_string()))?;
    let rest = rest.trim();
    if !rest.is_empty() {
        return Err(QueryError::Unsupported(format!(
            "unexpected trailing input: {}",
            snippet(rest)
        )));
    }
    resolve(raw)
}

fn snippet(text: &str) -> &str {
    match text.char_indices().nth(40) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

// ---------------------------------------------------------------- lexing

fn ws<'a, O>(
    inner: impl FnMut(&'a str) -> IResult<&'a str, O>,
) -> impl FnMut(&'a str) -> IResult<&'a str, O> {
    preceded(multispace0, inner)
}

fn ident(input: &str) -> IResult<&str, &str> {
    recognize(pair(
        take_while1(|c: char| c.is_alphabetic() || c == '_'),
        many0(take_while1(|c: char| c.is_alphanumeric() || c == '_')),
    ))(input)
}

fn var(input: &str) -> IResult<&str, String> {
    map(preceded(char('?'), ident), str::to_string)(input)
}

fn full_iri(input: &str) -> IResult<&str, String> {
    map(
        delimited(char('<'), take_while1(|c| c != '>'), char('>')),
        str::to_string,
    )(input)
}

fn prefixed(input: &str) -> IResult<&str, (String, String)> {
    map(
        tuple((ident, char(':'), ident)),
        |(prefix, _, local)| (prefix.to_string(), local.to_string()),
    )(input)
}

fn raw_term(input: &str) -> IResult<&str, RawTerm> {
    ws(alt((
        map(var, RawTerm::Var),
        map(full_iri, RawTerm::FullIri),
        map(prefixed, |(p, l)| RawTerm::Prefixed(p, l)),
        map(terminated(tag("a"), multispace1), |_| RawTerm::A),
    )))(input)
}

// --------------------------------------------------------------- clauses

fn prefix_decl(input: &str) -> IResult<&str, (String, String)> {
    let (input, _) = ws(tag_no_case("PREFIX"))(input)?;
    let (input, name) = ws(terminated(ident, char(':')))(input)?;
    let (input, iri) = ws(full_iri)(input)?;
    Ok((input, (name.to_string(), iri)))
}

fn aggregate_item(input: &str) -> IResult<&str, RawSelectItem> {
    let count = map(
        tuple((
            ws(tag_no_case("COUNT")),
            ws(char('(')),
            ws(alt((map(char('*'), |_| None), map(var, Some)))),
            ws(char(')')),
            ws(tag_no_case("AS")),
            ws(var),
        )),
        |(_, _, _, _, _, alias)| RawSelectItem::Count { alias },
    );
    let sum = map(
        tuple((
            ws(tag_no_case("SUM")),
            ws(char('(')),
            ws(var),
            ws(char(')')),
            ws(tag_no_case("AS")),
            ws(var),
        )),
        |(_, _, v, _, _, alias)| RawSelectItem::Sum { var: v, alias },
    );
    delimited(ws(char('(')), alt((count, sum)), ws(char(')')))(input)
}

fn select_clause(input: &str) -> IResult<&str, Vec<RawSelectItem>> {
    preceded(
        ws(tag_no_case("SELECT")),
        many1(alt((aggregate_item, map(ws(var), RawSelectItem::Var)))),
    )(input)
}

fn statement(input: &str) -> IResult<&str, RawStatement> {
    let (input, subject) = raw_term(input)?;
    let (input, first) = pair(raw_term, raw_term)(input)?;
    let (input, rest) = many0(preceded(ws(char(';')), pair(raw_term, raw_term)))(input)?;
    let (input, _) = ws(char('.'))(input)?;
    let mut arcs = vec![first];
    arcs.extend(rest);
    Ok((input, RawStatement { subject, arcs }))
}

fn filter_clause(input: &str) -> IResult<&str, RawFilter> {
    let (input, _) = ws(tag_no_case("FILTER"))(input)?;
    let (input, _) = ws(char('('))(input)?;
    let (input, v) = ws(var)(input)?;
    let (input, _) = ws(tag_no_case("IN"))(input)?;
    let (input, allowed) = delimited(
        ws(char('(')),
        separated_list1(ws(char(',')), raw_term),
        ws(char(')')),
    )(input)?;
    let (input, _) = ws(char(')'))(input)?;
    Ok((input, RawFilter { var: v, allowed }))
}

fn where_clause(input: &str) -> IResult<&str, (Vec<RawStatement>, Option<RawFilter>)> {
    let (input, _) = ws(tag_no_case("WHERE"))(input)?;
    let (input, _) = ws(char('{'))(input)?;
    let (input, statements) = many1(statement)(input)?;
    let (input, filter) = opt(filter_clause)(input)?;
    let (input, _) = ws(char('}'))(input)?;
    Ok((input, (statements, filter)))
}

fn group_clause(input: &str) -> IResult<&str, Vec<String>> {
    preceded(
        tuple((ws(tag_no_case("GROUP")), ws(tag_no_case("BY")))),
        many1(ws(var)),
    )(input)
}

fn order_key(input: &str) -> IResult<&str, RawOrderKey> {
    alt((
        map(
            preceded(
                ws(tag_no_case("DESC")),
                delimited(ws(char('(')), ws(var), ws(char(')'))),
            ),
            RawOrderKey::Desc,
        ),
        map(
            preceded(
                ws(tag_no_case("ASC")),
                delimited(ws(char('(')), ws(var), ws(char(')'))),
            ),
            RawOrderKey::Asc,
        ),
        map(ws(var), RawOrderKey::Plain),
    ))(input)
}

fn order_clause(input: &str) -> IResult<&str, Vec<RawOrderKey>> {
    preceded(
        tuple((ws(tag_no_case("ORDER")), ws(tag_no_case("BY")))),
        many1(order_key),
    )(input)
}

fn raw_query(input: &str) -> IResult<&str, RawQuery> {
    let (input, prefixes) = many0(prefix_decl)(input)?;
    let (input, select) = select_clause(input)?;
    let (input, (statements, filter)) = where_clause(input)?;
    let (input, group_by) = map(opt(group_clause), Option::unwrap_or_default)(input)?;
    let (input, order_by) = map(opt(order_clause), Option::unwrap_or_default)(input)?;
    Ok((
        input,
        RawQuery {
            prefixes,
            select,
            statements,
            filter,
            group_by,
            order_by,
        },
    ))
}

// ------------------------------------------------------------ resolution

fn resolve(raw: RawQuery) -> QueryResult<Query> {
    let prefixes: HashMap<String, String> = raw.prefixes.into_iter().collect();

    let resolve_term = |term: &RawTerm| -> QueryResult<TermPattern> {
        match term {
            RawTerm::Var(name) => Ok(TermPattern::var(name.clone())),
            RawTerm::FullIri(iri) => Ok(TermPattern::iri(Iri::new(iri.clone()))),
            RawTerm::Prefixed(prefix, local) => match prefixes.get(prefix) {
                Some(base) => Ok(TermPattern::iri(Iri::new(format!("{base}{local}")))),
                None => Err(QueryError::Parse(format!("undeclared prefix {prefix}:"))),
            },
            RawTerm::A => Ok(TermPattern::iri(Iri::new(RDF_TYPE))),
        }
    };

    let mut patterns = Vec::new();
    for statement in &raw.statements {
        let subject = resolve_term(&statement.subject)?;
        for (predicate, object) in &statement.arcs {
            patterns.push(TriplePattern {
                subject: subject.clone(),
                predicate: resolve_term(predicate)?,
                object: resolve_term(object)?,
            });
        }
    }

    let mut select = Vec::new();
    let mut aggregate = None;
    for item in raw.select {
        match item {
            RawSelectItem::Var(name) => select.push(name),
            RawSelectItem::Count { alias } => {
                if aggregate.replace(Aggregate::Count { alias }).is_some() {
                    return Err(QueryError::Unsupported(
                        "more than one aggregate in SELECT".into(),
                    ));
                }
            }
            RawSelectItem::Sum { var, alias } => {
                if aggregate.replace(Aggregate::Sum { var, alias }).is_some() {
                    return Err(QueryError::Unsupported(
                        "more than one aggregate in SELECT".into(),
                    ));
                }
            }
        }
    }

    let filter = match raw.filter {
        Some(raw_filter) => {
            let mut allowed = Vec::with_capacity(raw_filter.allowed.len());
            for term in &raw_filter.allowed {
                match resolve_term(term)? {
                    TermPattern::Const(lit_graph_core::types::Term::Iri(iri)) => allowed.push(iri),
                    _ => {
                        return Err(QueryError::Unsupported(
                            "FILTER IN items must be identifiers".into(),
                        ))
                    }
                }
            }
            Some(PredicateFilter {
                var: raw_filter.var,
                allowed,
            })
        }
        None => None,
    };

    let order_by = raw
        .order_by
        .into_iter()
        .map(|key| match key {
            RawOrderKey::Plain(column) | RawOrderKey::Asc(column) => OrderKey {
                column,
                descending: false,
            },
            RawOrderKey::Desc(column) => OrderKey {
                column,
                descending: true,
            },
        })
        .collect();

    Ok(Query {
        select,
        patterns,
        filter,
        group_by: raw.group_by,
        aggregate,
        order_by,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use lit_graph_core::types::Term;

    const INTERACTION_QUERY: &str = r#"
        PREFIX ex: <http://example.org/posthuman#>
        SELECT ?character ?predicate ?concept (COUNT(*) AS ?cnt)
        WHERE {
          ?character ?predicate ?concept .
          FILTER (
            ?predicate IN (ex:strugglesWith, ex:linkedTo, ex:questions)
          )
        }
        GROUP BY ?character ?predicate ?concept
        ORDER BY ?character ?predicate DESC(?cnt)
    "#;

    #[test]
    fn parses_the_interaction_query() {
        let query = parse_query(INTERACTION_QUERY).unwrap();
        assert_eq!(query.select, vec!["character", "predicate", "concept"]);
        assert_eq!(query.patterns.len(), 1);
        let filter = query.filter.unwrap();
        assert_eq!(filter.var, "predicate");
        assert_eq!(filter.allowed.len(), 3);
        assert_eq!(
            filter.allowed[0].as_str(),
            "http://example.org/posthuman#strugglesWith"
        );
        assert_eq!(query.group_by.len(), 3);
        assert!(matches!(query.aggregate, Some(Aggregate::Count { .. })));
        assert_eq!(query.order_by.len(), 3);
        assert!(query.order_by[2].descending);
    }

    #[test]
    fn parses_mention_node_shape() {
        let query = parse_query(
            r#"
            PREFIX ex: <http://example.org/posthuman#>
            SELECT ?char ?rel ?concept (COUNT(*) as ?relCount)
            WHERE {
              ?m a ex:Mention ;
                 ex:subject ?char ;
                 ex:predicate ?rel ;
                 ex:object ?concept .
            }
            GROUP BY ?char ?rel ?concept
            ORDER BY ?char ?rel
            "#,
        )
        .unwrap();
        assert_eq!(query.patterns.len(), 4);
        // The `a` arc resolved to rdf:type.
        match &query.patterns[0].predicate {
            TermPattern::Const(Term::Iri(iri)) => assert_eq!(iri.as_str(), RDF_TYPE),
            other => panic!("expected rdf:type, got {other:?}"),
        }
    }

    #[test]
    fn parses_full_iri_predicates_and_count_var() {
        let query = parse_query(
            r#"
            SELECT ?concept (COUNT(?ref) AS ?mentionCount)
            WHERE {
              ?concept <http://example.org/posthuman#isMentionedIn> ?ref .
            }
            GROUP BY ?concept
            ORDER BY DESC(?mentionCount)
            "#,
        )
        .unwrap();
        assert!(matches!(query.aggregate, Some(Aggregate::Count { .. })));
        assert_eq!(query.order_by[0].column, "mentionCount");
        assert!(query.order_by[0].descending);
    }

    #[test]
    fn parses_sum_aggregate() {
        let query = parse_query(
            r#"
            PREFIX ex: <http://example.org/posthuman#>
            SELECT ?character (SUM(?occ) AS ?total)
            WHERE {
              ?character ex:linkedTo ?concept .
              ?character ex:occurrenceCount ?occ .
            }
            GROUP BY ?character
            ORDER BY DESC(?total)
            "#,
        )
        .unwrap();
        assert_eq!(query.patterns.len(), 2);
        assert!(matches!(query.aggregate, Some(Aggregate::Sum { .. })));
    }

    #[test]
    fn undeclared_prefix_is_a_parse_error() {
        let err = parse_query(
            "SELECT ?s WHERE { ?s ex:linkedTo ?o . }",
        )
        .unwrap_err();
        assert!(matches!(err, QueryError::Parse(_)));
    }

    #[test]
    fn optional_is_rejected_by_name() {
        let err = parse_query(
            "SELECT ?s WHERE { ?s ?p ?o . OPTIONAL { ?s ?q ?r . } }",
        )
        .unwrap_err();
        match err {
            QueryError::Unsupported(message) => assert!(message.contains("OPTIONAL")),
            other => panic!("expected unsupported, got {other:?}"),
        }
    }

    #[test]
    fn trailing_garbage_is_rejected() {
        let err = parse_query(
            "SELECT ?s WHERE { ?s ?p ?o . } LIMIT 10",
        )
        .unwrap_err();
        assert!(matches!(err, QueryError::Unsupported(_)));
    }
}
