use super::Question;
use crate::error::{GameError, GameResult};
use crate::geometry::Coordinate;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use tracing::{debug, info, warn};

/// Loads a catalog file. `.csv` goes through the CSV reader, anything else
/// is parsed as a JSON array of question records.
pub fn load_catalog<P: AsRef<Path>>(path: P) -> GameResult<Vec<Question>> {
    let path = path.as_ref();
    let file = File::open(path)?;
    let is_csv = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("csv"));

    let questions = if is_csv {
        load_catalog_csv_from_reader(file)?
    } else {
        load_catalog_json_from_reader(BufReader::new(file))?
    };

    info!(
        "Loaded {} questions from {}",
        questions.len(),
        path.display()
    );
    Ok(questions)
}

pub fn load_catalog_json_from_reader<R: Read>(reader: R) -> GameResult<Vec<Question>> {
    let questions: Vec<Question> = serde_json::from_reader(reader)?;
    validate_catalog(&questions)?;
    Ok(questions)
}

/// CSV catalogs carry a header naming either `lat,lng` or `x,y` columns.
pub fn load_catalog_csv_from_reader<R: Read>(reader: R) -> GameResult<Vec<Question>> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(reader);

    let headers = rdr.headers()?.clone();
    let column = |names: &[&str]| {
        headers
            .iter()
            .position(|h| names.iter().any(|n| h.eq_ignore_ascii_case(n)))
    };

    let answer_col = column(&["answer", "name"])
        .ok_or_else(|| GameError::Validation("catalog CSV has no 'answer' column".to_string()))?;
    let image_col = column(&["image"]);

    let (a_col, b_col, geo) = match (column(&["lat"]), column(&["lng", "lon"])) {
        (Some(a), Some(b)) => (a, b, true),
        _ => match (column(&["x"]), column(&["y"])) {
            (Some(a), Some(b)) => (a, b, false),
            _ => {
                return Err(GameError::Validation(
                    "catalog CSV needs lat/lng or x/y columns".to_string(),
                ))
            }
        },
    };

    let mut questions = Vec::new();
    let mut skipped = 0;

    for (row, record) in rdr.records().enumerate() {
        let record = record?;
        let answer = record.get(answer_col).unwrap_or("").to_string();
        let image = image_col
            .and_then(|c| record.get(c))
            .unwrap_or("")
            .to_string();

        let parse = |col: usize| record.get(col).and_then(|v| v.parse::<f64>().ok());
        let (Some(a), Some(b)) = (parse(a_col), parse(b_col)) else {
            warn!("Skipping catalog row {}: unreadable coordinates", row + 1);
            skipped += 1;
            continue;
        };

        let coordinate = if geo {
            Coordinate::geo(a, b)
        } else {
            Coordinate::planar(a, b)
        }
        .map_err(|e| GameError::Validation(format!("catalog row {}: {}", row + 1, e)))?;

        questions.push(Question {
            answer,
            image,
            coordinate,
        });
    }

    if skipped > 0 {
        debug!("Skipped {} unreadable catalog rows", skipped);
    }

    validate_catalog(&questions)?;
    Ok(questions)
}

/// Rejects empty catalogs, blank answers, bad coordinates and catalogs that
/// mix geo and planar questions.
pub fn validate_catalog(questions: &[Question]) -> GameResult<()> {
    let Some(first) = questions.first() else {
        return Err(GameError::Validation("catalog is empty".to_string()));
    };
    let kind = first.coordinate.kind();

    for (i, q) in questions.iter().enumerate() {
        if q.answer.trim().is_empty() {
            return Err(GameError::Validation(format!(
                "question {} has an empty answer",
                i
            )));
        }
        q.coordinate
            .validate()
            .map_err(|e| GameError::Validation(format!("question {} ({}): {}", i, q.answer, e)))?;
        if q.coordinate.kind() != kind {
            return Err(GameError::Validation(format!(
                "question {} ({}) is {} but the catalog is {}",
                i,
                q.answer,
                q.coordinate.kind(),
                kind
            )));
        }
    }
    Ok(())
}
