//! SQLite persistence of generated and classified problem sets.

use crate::complexity::Complexity;
use crate::problem::{Problem, ProblemId, Universe};
use crate::relations::RelationGraph;
use crate::types::Degree;
use derive_more::{Display, From};
use rusqlite::{params, Connection};
use std::collections::BTreeSet;
use std::path::Path;

/// The lifecycle tag of a stored data set.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ProblemSet {
    Unclassified,
    Classified,
}

impl ProblemSet {
    fn tag(self) -> &'static str {
        match self {
            ProblemSet::Unclassified => "unclassified",
            ProblemSet::Classified => "classified",
        }
    }
}

#[derive(Debug, Display, From)]
pub enum StoreError {
    #[display(fmt = "sqlite error: {}", _0)]
    Sqlite(rusqlite::Error),
    #[display(fmt = "malformed data set: {}", _0)]
    Format(String),
    #[display(fmt = "no stored data set for the requested tag")]
    Missing,
}

impl std::error::Error for StoreError {}

/// Default database path for a degree pair.
pub fn data_name(min_degree: Degree, max_degree: Degree) -> String {
    format!("data/problems_{}_{}.sqlite3", min_degree, max_degree)
}

fn create_tables(connection: &Connection) -> Result<(), StoreError> {
    connection.execute_batch(
        "CREATE TABLE IF NOT EXISTS meta (
             tag TEXT PRIMARY KEY,
             white_degree INTEGER NOT NULL,
             black_degree INTEGER NOT NULL
         );
         CREATE TABLE IF NOT EXISTS problems (
             tag TEXT NOT NULL,
             id INTEGER NOT NULL,
             white TEXT NOT NULL,
             black TEXT NOT NULL,
             lower INTEGER NOT NULL,
             upper INTEGER NOT NULL,
             constant_ub INTEGER NOT NULL,
             PRIMARY KEY (tag, id)
         );
         CREATE TABLE IF NOT EXISTS relations (
             tag TEXT NOT NULL,
             kind TEXT NOT NULL,
             src INTEGER NOT NULL,
             dst INTEGER NOT NULL
         );",
    )?;
    Ok(())
}

/// Store the universe and its relation graph under the given tag,
/// replacing any previous data set with that tag.
pub fn save(
    path: &Path,
    universe: &Universe,
    relations: &RelationGraph,
    set: ProblemSet,
) -> Result<(), StoreError> {
    assert_eq!(universe.len(), relations.len());
    let mut connection = Connection::open(path)?;
    create_tables(&connection)?;
    let transaction = connection.transaction()?;
    let tag = set.tag();
    transaction.execute("DELETE FROM meta WHERE tag = ?1", params![tag])?;
    transaction.execute("DELETE FROM problems WHERE tag = ?1", params![tag])?;
    transaction.execute("DELETE FROM relations WHERE tag = ?1", params![tag])?;
    transaction.execute(
        "INSERT INTO meta (tag, white_degree, black_degree) VALUES (?1, ?2, ?3)",
        params![
            tag,
            universe.white_degree() as i64,
            universe.black_degree() as i64
        ],
    )?;
    {
        let mut insert = transaction.prepare(
            "INSERT INTO problems (tag, id, white, black, lower, upper, constant_ub)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
        )?;
        for id in universe.ids() {
            let problem = universe.problem(id);
            insert.execute(params![
                tag,
                id as i64,
                problem.white().to_string(),
                problem.black().to_string(),
                problem.lower_bound().code(),
                problem.upper_bound().code(),
                problem.constant_upper_bound() as i64,
            ])?;
        }
        let mut insert = transaction
            .prepare("INSERT INTO relations (tag, kind, src, dst) VALUES (?1, ?2, ?3, ?4)")?;
        for id in universe.ids() {
            for &dst in relations.relaxations(id) {
                insert.execute(params![tag, "relaxation", id as i64, dst as i64])?;
            }
            for &dst in relations.restrictions(id) {
                insert.execute(params![tag, "restriction", id as i64, dst as i64])?;
            }
        }
    }
    transaction.commit()?;
    Ok(())
}

/// Load the universe and relation graph stored under the given tag.
pub fn load(path: &Path, set: ProblemSet) -> Result<(Universe, RelationGraph), StoreError> {
    let connection = Connection::open(path)?;
    create_tables(&connection)?;
    let tag = set.tag();
    let (white_degree, black_degree) = connection
        .query_row(
            "SELECT white_degree, black_degree FROM meta WHERE tag = ?1",
            params![tag],
            |row| {
                Ok((
                    row.get::<_, i64>(0)? as Degree,
                    row.get::<_, i64>(1)? as Degree,
                ))
            },
        )
        .map_err(|e| match e {
            rusqlite::Error::QueryReturnedNoRows => StoreError::Missing,
            other => StoreError::Sqlite(other),
        })?;
    let mut problems: Vec<Problem> = Vec::new();
    {
        let mut statement = connection.prepare(
            "SELECT id, white, black, lower, upper, constant_ub
             FROM problems WHERE tag = ?1 ORDER BY id",
        )?;
        let rows = statement.query_map(params![tag], |row| {
            Ok((
                row.get::<_, i64>(0)?,
                row.get::<_, String>(1)?,
                row.get::<_, String>(2)?,
                row.get::<_, i64>(3)?,
                row.get::<_, i64>(4)?,
                row.get::<_, i64>(5)?,
            ))
        })?;
        for row in rows {
            let (id, white, black, lower, upper, constant_ub) = row?;
            if id as usize != problems.len() {
                return Err(StoreError::Format(format!(
                    "non-contiguous problem id {}",
                    id
                )));
            }
            let mut problem = Problem::from_alpha(&white, &black, white_degree, black_degree)
                .map_err(|e| StoreError::Format(e.to_string()))?;
            problem.set_lower_bound(decode(lower)?);
            problem.set_upper_bound(decode(upper)?);
            problem.tighten_constant_upper_bound(constant_ub as u32);
            problems.push(problem);
        }
    }
    let mut relaxations = vec![BTreeSet::new(); problems.len()];
    let mut restrictions = vec![BTreeSet::new(); problems.len()];
    {
        let mut statement =
            connection.prepare("SELECT kind, src, dst FROM relations WHERE tag = ?1")?;
        let rows = statement.query_map(params![tag], |row| {
            Ok((
                row.get::<_, String>(0)?,
                row.get::<_, i64>(1)? as ProblemId,
                row.get::<_, i64>(2)? as ProblemId,
            ))
        })?;
        for row in rows {
            let (kind, src, dst) = row?;
            if src >= problems.len() || dst >= problems.len() {
                return Err(StoreError::Format(format!(
                    "relation endpoint out of range: {} -> {}",
                    src, dst
                )));
            }
            match kind.as_str() {
                "relaxation" => {
                    relaxations[src].insert(dst);
                }
                "restriction" => {
                    restrictions[src].insert(dst);
                }
                other => {
                    return Err(StoreError::Format(format!(
                        "unknown relation kind: {}",
                        other
                    )))
                }
            }
        }
    }
    Ok((
        Universe::from_problems(white_degree, black_degree, problems),
        RelationGraph::from_parts(relaxations, restrictions),
    ))
}

fn decode(code: i64) -> Result<Complexity, StoreError> {
    Complexity::from_code(code)
        .ok_or_else(|| StoreError::Format(format!("bad complexity code {}", code)))
}

/// Write one problem per line in alpha form.
pub fn write_listing<'a>(
    path: &Path,
    problems: impl IntoIterator<Item = &'a Problem>,
) -> std::io::Result<()> {
    use std::io::Write;
    let mut file = std::fs::File::create(path)?;
    for problem in problems {
        writeln!(file, "{}", problem)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::problem::{Configuration, ConstraintSet};

    fn constraint(configurations: &[[u8; 3]]) -> ConstraintSet {
        configurations.iter().map(|&c| Configuration::new(c)).collect()
    }

    fn sample() -> (Universe, RelationGraph) {
        let a = Problem::new(
            constraint(&[[1, 2, 0], [2, 1, 0]]),
            constraint(&[[1, 2, 0], [3, 0, 0]]),
            3,
            3,
        );
        let mut b = Problem::new(
            constraint(&[[2, 1, 0]]),
            constraint(&[[1, 2, 0], [3, 0, 0]]),
            3,
            3,
        );
        b.set_complexity(Complexity::Constant);
        b.tighten_constant_upper_bound(4);
        let universe = Universe::from_problems(3, 3, vec![a, b]);
        let relations = RelationGraph::build(&universe);
        (universe, relations)
    }

    #[test]
    fn test_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("problems.sqlite3");
        let (universe, relations) = sample();
        save(&path, &universe, &relations, ProblemSet::Unclassified).unwrap();
        let (loaded, loaded_relations) = load(&path, ProblemSet::Unclassified).unwrap();
        assert_eq!(loaded.len(), universe.len());
        assert_eq!(loaded.white_degree(), 3);
        for id in universe.ids() {
            assert_eq!(loaded.problem(id), universe.problem(id));
            assert_eq!(
                loaded.problem(id).lower_bound(),
                universe.problem(id).lower_bound()
            );
            assert_eq!(
                loaded.problem(id).upper_bound(),
                universe.problem(id).upper_bound()
            );
            assert_eq!(
                loaded.problem(id).constant_upper_bound(),
                universe.problem(id).constant_upper_bound()
            );
            assert_eq!(loaded_relations.relaxations(id), relations.relaxations(id));
            assert_eq!(
                loaded_relations.restrictions(id),
                relations.restrictions(id)
            );
        }
    }

    #[test]
    fn test_tags_are_independent() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("problems.sqlite3");
        let (universe, relations) = sample();
        save(&path, &universe, &relations, ProblemSet::Unclassified).unwrap();
        assert!(matches!(
            load(&path, ProblemSet::Classified),
            Err(StoreError::Missing)
        ));
        save(&path, &universe, &relations, ProblemSet::Classified).unwrap();
        assert!(load(&path, ProblemSet::Classified).is_ok());
        assert!(load(&path, ProblemSet::Unclassified).is_ok());
    }
}
