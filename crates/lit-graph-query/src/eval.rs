//! Query evaluation.
//!
//! Semantics: a full scan of the triple store per pattern with a
//! nested-loop join on shared variables, then the `FILTER` restriction,
//! then stable grouping and aggregation, then a stable multi-key sort.
//! Ties keep input order throughout.

use std::collections::HashMap;

use lit_graph_core::types::Term;
use lit_graph_store::TripleStore;

use crate::ast::{Aggregate, Query, Row, TermPattern, Value};
use crate::error::{QueryError, QueryResult};

type Binding = HashMap<String, Term>;

/// Evaluate a query against a store.
pub fn evaluate(store: &TripleStore, query: &Query) -> QueryResult<Vec<Row>> {
    validate(query)?;

    // Join the patterns left to right.
    let mut bindings: Vec<Binding> = vec![Binding::new()];
    for pattern in &query.patterns {
        let mut extended = Vec::new();
        for binding in &bindings {
            for triple in store.iter() {
                let mut candidate = binding.clone();
                if match_slot(&pattern.subject, &triple.subject, &mut candidate)
                    && match_slot(&pattern.predicate, &Term::Iri(triple.predicate.clone()), &mut candidate)
                    && match_slot(&pattern.object, &triple.object, &mut candidate)
                {
                    extended.push(candidate);
                }
            }
        }
        bindings = extended;
    }

    // FILTER ?var IN (...).
    if let Some(filter) = &query.filter {
        bindings.retain(|binding| match binding.get(&filter.var) {
            Some(Term::Iri(iri)) => filter.allowed.contains(iri),
            _ => false,
        });
    }

    let mut rows = match &query.aggregate {
        Some(aggregate) => aggregate_rows(query, aggregate, &bindings)?,
        None => bindings
            .iter()
            .map(|binding| project(&query.select, binding))
            .collect::<QueryResult<Vec<Row>>>()?,
    };

    // Stable multi-key sort: apply keys right to left so earlier keys win.
    for key in query.order_by.iter().rev() {
        let column = key.column.clone();
        let missing = rows.iter().any(|row| row.get(&column).is_none());
        if missing {
            return Err(QueryError::UnknownVariable(column));
        }
        rows.sort_by(|a, b| {
            let (va, vb) = (a.get(&column), b.get(&column));
            let ord = match (va, vb) {
                (Some(va), Some(vb)) => va.sort_cmp(vb),
                _ => std::cmp::Ordering::Equal,
            };
            if key.descending {
                ord.reverse()
            } else {
                ord
            }
        });
    }

    Ok(rows)
}

fn match_slot(pattern: &TermPattern, actual: &Term, binding: &mut Binding) -> bool {
    match pattern {
        TermPattern::Const(expected) => expected == actual,
        TermPattern::Var(name) => match binding.get(name) {
            Some(bound) => bound == actual,
            None => {
                binding.insert(name.clone(), actual.clone());
                true
            }
        },
    }
}

fn project(select: &[String], binding: &Binding) -> QueryResult<Row> {
    let mut columns = Vec::with_capacity(select.len());
    for name in select {
        let value = binding
            .get(name)
            .cloned()
            .ok_or_else(|| QueryError::UnknownVariable(name.clone()))?;
        columns.push((name.clone(), Value::Term(value)));
    }
    Ok(Row::new(columns))
}

fn aggregate_rows(
    query: &Query,
    aggregate: &Aggregate,
    bindings: &[Binding],
) -> QueryResult<Vec<Row>> {
    // Stable grouping: groups appear in first-occurrence order.
    let mut group_order: Vec<Vec<Term>> = Vec::new();
    let mut group_index: HashMap<Vec<Term>, usize> = HashMap::new();
    let mut group_members: Vec<Vec<&Binding>> = Vec::new();

    for binding in bindings {
        let mut key = Vec::with_capacity(query.group_by.len());
        for var in &query.group_by {
            let value = binding
                .get(var)
                .cloned()
                .ok_or_else(|| QueryError::UnknownVariable(var.clone()))?;
            key.push(value);
        }
        match group_index.get(&key) {
            Some(&idx) => group_members[idx].push(binding),
            None => {
                group_index.insert(key.clone(), group_order.len());
                group_order.push(key);
                group_members.push(vec![binding]);
            }
        }
    }

    let mut rows = Vec::with_capacity(group_order.len());
    for (key, members) in group_order.into_iter().zip(group_members) {
        let mut columns: Vec<(String, Value)> = query
            .group_by
            .iter()
            .cloned()
            .zip(key.into_iter().map(Value::Term))
            .collect();

        let value = match aggregate {
            Aggregate::Count { .. } => members.len() as u64,
            Aggregate::Sum { var, .. } => {
                let mut total = 0u64;
                for member in &members {
                    let value = member
                        .get(var)
                        .ok_or_else(|| QueryError::UnknownVariable(var.clone()))?;
                    let number = Value::Term(value.clone()).as_number().ok_or_else(|| {
                        QueryError::BadAggregate(format!(
                            "SUM over non-integer binding of ?{var}"
                        ))
                    })?;
                    total += number;
                }
                total
            }
        };
        columns.push((aggregate.alias().to_string(), Value::Number(value)));
        rows.push(Row::new(columns));
    }
    Ok(rows)
}

fn validate(query: &Query) -> QueryResult<()> {
    if query.patterns.is_empty() {
        return Err(QueryError::Unsupported("query has no triple pattern".into()));
    }

    let mut pattern_vars: Vec<&str> = Vec::new();
    for pattern in &query.patterns {
        for slot in [&pattern.subject, &pattern.predicate, &pattern.object] {
            if let TermPattern::Var(name) = slot {
                if !pattern_vars.contains(&name.as_str()) {
                    pattern_vars.push(name);
                }
            }
        }
    }

    let bound = |name: &str| pattern_vars.contains(&name);

    for name in &query.select {
        if !bound(name) {
            return Err(QueryError::UnknownVariable(name.clone()));
        }
    }
    if let Some(filter) = &query.filter {
        if !bound(&filter.var) {
            return Err(QueryError::UnknownVariable(filter.var.clone()));
        }
    }
    for name in &query.group_by {
        if !bound(name) {
            return Err(QueryError::UnknownVariable(name.clone()));
        }
    }
    if let Some(Aggregate::Sum { var, .. }) = &query.aggregate {
        if !bound(var) {
            return Err(QueryError::UnknownVariable(var.clone()));
        }
    }

    if query.aggregate.is_some() {
        // Every projected variable must be grouped.
        for name in &query.select {
            if !query.group_by.contains(name) {
                return Err(QueryError::Unsupported(format!(
                    "?{name} is selected but not grouped"
                )));
            }
        }
    } else if !query.group_by.is_empty() {
        return Err(QueryError::Unsupported(
            "GROUP BY without an aggregate".into(),
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{OrderKey, PredicateFilter, TriplePattern};
    use lit_graph_core::iri::Namespace;
    use lit_graph_core::types::Triple;

    fn store() -> (Namespace, TripleStore) {
        let ns = Namespace::default();
        let mut store = TripleStore::new();
        for (s, p, o) in [
            ("Deckard", "linkedTo", "Posthumanism"),
            ("Deckard", "questions", "Animal_Ethics"),
            ("Deckard", "linkedTo", "Cyborg_Theory"),
            ("Rachael", "strugglesWith", "Cyborg_Theory"),
            ("Rachael", "strugglesWith", "Posthumanism"),
            ("Isidore", "exemplifies", "Empathy"),
        ] {
            store.insert(Triple::new(ns.iri(s), ns.iri(p), ns.iri(o)));
        }
        (ns, store)
    }

    fn count_query(ns: &Namespace) -> Query {
        Query {
            select: vec!["character".into()],
            patterns: vec![TriplePattern {
                subject: TermPattern::var("character"),
                predicate: TermPattern::var("predicate"),
                object: TermPattern::var("concept"),
            }],
            filter: Some(PredicateFilter {
                var: "predicate".into(),
                allowed: vec![ns.iri("linkedTo"), ns.iri("strugglesWith"), ns.iri("questions")],
            }),
            group_by: vec!["character".into()],
            aggregate: Some(Aggregate::Count {
                alias: "cnt".into(),
            }),
            order_by: vec![OrderKey {
                column: "cnt".into(),
                descending: true,
            }],
        }
    }

    #[test]
    fn grouped_counts_sum_to_matching_triples() {
        let (ns, store) = store();
        let rows = evaluate(&store, &count_query(&ns)).unwrap();
        let total: u64 = rows
            .iter()
            .map(|r| r.get("cnt").and_then(Value::as_number).unwrap_or(0))
            .sum();
        // Five of six triples carry a filtered predicate.
        assert_eq!(total, 5);
        // Ordered by count descending: Deckard (3) first.
        assert_eq!(rows[0].get("character").unwrap().display_string(), "Deckard");
        assert_eq!(rows[0].get("cnt").unwrap().as_number(), Some(3));
    }

    #[test]
    fn constant_subject_restricts_matches() {
        let (ns, store) = store();
        let query = Query {
            select: vec!["concept".into()],
            patterns: vec![TriplePattern {
                subject: TermPattern::iri(ns.iri("Isidore")),
                predicate: TermPattern::var("p"),
                object: TermPattern::var("concept"),
            }],
            filter: None,
            group_by: vec![],
            aggregate: None,
            order_by: vec![],
        };
        let rows = evaluate(&store, &query).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].get("concept").unwrap().display_string(), "Empathy");
    }

    #[test]
    fn join_on_shared_variable() {
        let ns = Namespace::default();
        let mut store = TripleStore::new();
        store.insert(Triple::new(ns.iri("Deckard"), ns.iri("linkedTo"), ns.iri("Posthumanism")));
        store.insert(Triple::new(
            ns.iri("Posthumanism"),
            ns.iri("isMentionedIn"),
            ns.iri("passage_4"),
        ));

        let query = Query {
            select: vec!["who".into(), "where".into()],
            patterns: vec![
                TriplePattern {
                    subject: TermPattern::var("who"),
                    predicate: TermPattern::iri(ns.iri("linkedTo")),
                    object: TermPattern::var("concept"),
                },
                TriplePattern {
                    subject: TermPattern::var("concept"),
                    predicate: TermPattern::iri(ns.iri("isMentionedIn")),
                    object: TermPattern::var("where"),
                },
            ],
            filter: None,
            group_by: vec![],
            aggregate: None,
            order_by: vec![],
        };
        let rows = evaluate(&store, &query).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].get("where").unwrap().display_string(), "passage_4");
    }

    #[test]
    fn order_by_ties_keep_input_order() {
        let (ns, store) = store();
        let mut query = count_query(&ns);
        // Rachael and Deckard both match; force a tie on a constant-ish key
        // by ordering on character ascending then verify stability of the
        // secondary data.
        query.order_by = vec![OrderKey {
            column: "character".into(),
            descending: false,
        }];
        let rows = evaluate(&store, &query).unwrap();
        let names: Vec<String> = rows
            .iter()
            .map(|r| r.get("character").unwrap().display_string())
            .collect();
        assert_eq!(names, vec!["Deckard", "Rachael"]);
    }

    #[test]
    fn unbound_filter_variable_is_an_error() {
        let (ns, store) = store();
        let mut query = count_query(&ns);
        query.filter = Some(PredicateFilter {
            var: "nope".into(),
            allowed: vec![ns.iri("linkedTo")],
        });
        assert!(matches!(
            evaluate(&store, &query),
            Err(QueryError::UnknownVariable(_))
        ));
    }

    #[test]
    fn selecting_an_ungrouped_variable_is_unsupported() {
        let (ns, store) = store();
        let mut query = count_query(&ns);
        query.select = vec!["concept".into()];
        assert!(matches!(
            evaluate(&store, &query),
            Err(QueryError::Unsupported(_))
        ));
    }
}
