//! Shared fixtures: a small in-memory IMDB-style dataset
//!
//! Six tables with hand-picked rows sized so filter selectivities and
//! join orders are easy to reason about in the scenario tests.

use planbench::catalog::{Column, Field, FieldKind, Row, Schema, Table};

/// Build the full mini-IMDB schema with data and fresh histograms
pub fn imdb_schema() -> Schema {
    let mut schema = Schema::new();

    // movie(id, title, year) - one deliberately large id for point lookups
    let mut movie = Table::new("movie");
    movie.add_column(Column::new("id", "movie", FieldKind::Integer));
    movie.add_column(Column::new("title", "movie", FieldKind::String));
    movie.add_column(Column::new("year", "movie", FieldKind::Integer));
    let movies: [(i64, &str, i64); 10] = [
        (1, "Jaws", 1975),
        (2, "Memento", 2000),
        (3, "Inception", 2010),
        (4, "War Horse", 2011),
        (5, "Lincoln", 2012),
        (6, "Alien", 1979),
        (7, "The Martian", 2015),
        (8854, "Munich", 2005),
        (9, "Dunkirk", 2017),
        (10, "Tenet", 2020),
    ];
    for (id, title, year) in movies {
        movie
            .add_row(Row::new(vec![
                Field::Int(id),
                Field::from(title),
                Field::Int(year),
            ]))
            .unwrap();
    }
    movie.rebuild_int_histograms();
    schema.add_table(movie).unwrap();

    // director(id, lname)
    let mut director = Table::new("director");
    director.add_column(Column::new("id", "director", FieldKind::Integer));
    director.add_column(Column::new("lname", "director", FieldKind::String));
    for (id, lname) in [(1, "Spielberg"), (2, "Nolan"), (3, "Scott"), (4, "Bigelow")] {
        director
            .add_row(Row::new(vec![Field::Int(id), Field::from(lname)]))
            .unwrap();
    }
    director.rebuild_int_histograms();
    schema.add_table(director).unwrap();

    // movie_director(mid, did) - every movie has exactly one director
    let mut movie_director = Table::new("movie_director");
    movie_director.add_column(Column::new("mid", "movie_director", FieldKind::Integer));
    movie_director.add_column(Column::new("did", "movie_director", FieldKind::Integer));
    let credits: [(i64, i64); 10] = [
        (1, 1),
        (2, 2),
        (3, 2),
        (4, 1),
        (5, 1),
        (6, 3),
        (7, 3),
        (8854, 1),
        (9, 2),
        (10, 2),
    ];
    for (mid, did) in credits {
        movie_director
            .add_row(Row::new(vec![Field::Int(mid), Field::Int(did)]))
            .unwrap();
    }
    movie_director.rebuild_int_histograms();
    schema.add_table(movie_director).unwrap();

    // actor(id, lname, gender)
    let mut actor = Table::new("actor");
    actor.add_column(Column::new("id", "actor", FieldKind::Integer));
    actor.add_column(Column::new("lname", "actor", FieldKind::String));
    actor.add_column(Column::new("gender", "actor", FieldKind::String));
    let actors: [(i64, &str, &str); 6] = [
        (1, "Hanks", "M"),
        (2, "Bana", "M"),
        (3, "Page", "F"),
        (4, "Cruise", "M"),
        (5, "Weaver", "F"),
        (6, "Damon", "M"),
    ];
    for (id, lname, gender) in actors {
        actor
            .add_row(Row::new(vec![
                Field::Int(id),
                Field::from(lname),
                Field::from(gender),
            ]))
            .unwrap();
    }
    actor.rebuild_int_histograms();
    schema.add_table(actor).unwrap();

    // casts(mid, pid)
    let mut casts = Table::new("casts");
    casts.add_column(Column::new("mid", "casts", FieldKind::Integer));
    casts.add_column(Column::new("pid", "casts", FieldKind::Integer));
    let cast_rows: [(i64, i64); 12] = [
        (1, 1),
        (4, 2),
        (4, 3),
        (5, 6),
        (8854, 2),
        (8854, 5),
        (3, 3),
        (9, 4),
        (2, 4),
        (6, 5),
        (7, 6),
        (10, 3),
    ];
    for (mid, pid) in cast_rows {
        casts
            .add_row(Row::new(vec![Field::Int(mid), Field::Int(pid)]))
            .unwrap();
    }
    casts.rebuild_int_histograms();
    schema.add_table(casts).unwrap();

    // genre(mid, genre) - three Drama rows out of eight
    let mut genre = Table::new("genre");
    genre.add_column(Column::new("mid", "genre", FieldKind::Integer));
    genre.add_column(Column::new("genre", "genre", FieldKind::String));
    let genres: [(i64, &str); 8] = [
        (2, "Drama"),
        (3, "SciFi"),
        (9, "War"),
        (10, "Action"),
        (1, "Thriller"),
        (6, "Horror"),
        (8854, "Drama"),
        (5, "Drama"),
    ];
    for (mid, g) in genres {
        genre
            .add_row(Row::new(vec![Field::Int(mid), Field::from(g)]))
            .unwrap();
    }
    genre.rebuild_int_histograms();
    schema.add_table(genre).unwrap();

    schema
}

/// Parse a workbench query block against the fixture schema
pub fn parse(schema: &Schema, block: &str) -> planbench::query::QuerySpec {
    let lines: Vec<String> = block.lines().map(|l| l.to_string()).collect();
    planbench::query::parse_query_block(&lines, schema).expect("fixture query must parse")
}
