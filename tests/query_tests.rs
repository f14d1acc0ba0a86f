//! Query parsing and validation integration tests

mod test_utils;

use planbench::catalog::{CompareOp, Field};
use planbench::planner::{Component, Planner};
use planbench::query::{parse_query_block, QueryError};
use test_utils::{imdb_schema, parse};

fn lines(block: &str) -> Vec<String> {
    block.lines().map(|l| l.to_string()).collect()
}

#[test]
fn test_parse_typical_workbench_block() {
    let schema = imdb_schema();
    let query = parse(
        &schema,
        "preamble noise\n\
         query_start\n\
         tables: movie, director, movie_director\n\
         scalar_filters: director.lname=Spielberg, movie.year>2000\n\
         dynamic_filters: movie.id = movie_director.mid\n\
         joins: movie.id=movie_director.mid, movie_director.did=director.id\n\
         query_end\n\
         trailing noise",
    );

    assert_eq!(query.tables.len(), 3);
    assert_eq!(query.scalar_filters.len(), 2);
    assert_eq!(query.dynamic_filters.len(), 1);
    assert_eq!(query.joins.len(), 2);

    // Literal kinds follow the column kinds
    assert_eq!(query.scalar_filters[0].value, Field::from("Spielberg"));
    assert_eq!(query.scalar_filters[1].value, Field::Int(2000));
    assert_eq!(query.scalar_filters[1].op, CompareOp::Gt);
}

#[test]
fn test_all_six_operators_parse() {
    let schema = imdb_schema();
    for (text, op) in [
        ("movie.year=2000", CompareOp::Eq),
        ("movie.year!=2000", CompareOp::Ne),
        ("movie.year<2000", CompareOp::Lt),
        ("movie.year<=2000", CompareOp::Le),
        ("movie.year>2000", CompareOp::Gt),
        ("movie.year>=2000", CompareOp::Ge),
    ] {
        let block = format!(
            "query_start\ntables: movie\nscalar_filters: {}\nquery_end",
            text
        );
        let query = parse(&schema, &block);
        assert_eq!(query.scalar_filters[0].op, op, "{}", text);
        assert_eq!(query.scalar_filters[0].value, Field::Int(2000));
    }
}

#[test]
fn test_unknown_table_rejected() {
    let schema = imdb_schema();
    let block = lines("query_start\ntables: writers\nquery_end");
    assert!(matches!(
        parse_query_block(&block, &schema),
        Err(QueryError::TableNotFound(_))
    ));
}

#[test]
fn test_unknown_column_rejected() {
    let schema = imdb_schema();
    let block = lines(
        "query_start\n\
         tables: movie\n\
         scalar_filters: movie.budget>1000\n\
         query_end",
    );
    assert!(matches!(
        parse_query_block(&block, &schema),
        Err(QueryError::ColumnNotFound { .. })
    ));
}

#[test]
fn test_join_kind_mismatch_rejected() {
    let schema = imdb_schema();
    let block = lines(
        "query_start\n\
         tables: movie, director\n\
         joins: movie.id=director.lname\n\
         query_end",
    );
    assert!(matches!(
        parse_query_block(&block, &schema),
        Err(QueryError::JoinKindMismatch { .. })
    ));
}

#[test]
fn test_filter_on_unlisted_table_rejected() {
    let schema = imdb_schema();
    let block = lines(
        "query_start\n\
         tables: movie\n\
         scalar_filters: director.lname=Nolan\n\
         query_end",
    );
    assert!(matches!(
        parse_query_block(&block, &schema),
        Err(QueryError::TableNotListed(_))
    ));
}

#[test]
fn test_empty_block_rejected() {
    let schema = imdb_schema();
    let block = lines("query_start\nquery_end");
    assert!(matches!(
        parse_query_block(&block, &schema),
        Err(QueryError::EmptyQuery)
    ));
}

#[test]
fn test_parsing_is_stable_across_runs() {
    let schema = imdb_schema();
    let block = "query_start\n\
                 tables: movie, genre\n\
                 scalar_filters: genre.genre=Drama\n\
                 joins: movie.id=genre.mid\n\
                 query_end";
    let first = parse(&schema, block);
    let second = parse(&schema, block);
    assert_eq!(first.tables, second.tables);
    assert_eq!(first.scalar_filters, second.scalar_filters);
    assert_eq!(first.joins, second.joins);
}

#[test]
fn test_dynamic_filters_never_planned() {
    let schema = imdb_schema();
    let query = parse(
        &schema,
        "query_start\n\
         tables: movie, movie_director\n\
         dynamic_filters: movie.id = movie_director.mid\n\
         joins: movie.id=movie_director.mid\n\
         query_end",
    );

    let plans = Planner::new(&schema, &query).generate_plans().unwrap();
    for plan in &plans {
        // Plans carry the join but nothing for the dynamic filter
        assert_eq!(plan.steps.len(), 1);
        assert!(matches!(plan.steps[0], Component::Join(_)));
    }
}

#[test]
fn test_whitespace_tolerated_everywhere() {
    let schema = imdb_schema();
    let query = parse(
        &schema,
        "query_start\n\
         tables:   movie ,  genre  \n\
         scalar_filters:   genre.genre = Drama  \n\
         joins:  movie.id = genre.mid \n\
         query_end",
    );
    assert_eq!(query.tables, vec!["movie", "genre"]);
    assert_eq!(query.scalar_filters[0].value, Field::from("Drama"));
    assert_eq!(query.joins[0].left_column, "id");
}
