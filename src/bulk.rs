use std::io::Read;

use crate::answer::AnswerStore;
use crate::questions::QUESTIONS;
use crate::Error;

/// Reads answer sheets from CSV.
///
/// The first row is a header. Each following row holds a respondent id and
/// then one answer per question in asking order. An empty cell leaves the
/// question unanswered so incomplete sheets surface later as
/// `IncompleteInput`.
pub fn read_bulk<R: Read>(reader: R) -> impl Iterator<Item = Result<(String, AnswerStore), Error>> {
    csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader)
        .into_records()
        .map(|record| parse_row(&record?))
}

fn parse_row(record: &csv::StringRecord) -> Result<(String, AnswerStore), Error> {
    let mut fields = record.iter();
    let id = fields.next().unwrap_or_default().to_string();
    let mut store = AnswerStore::default();
    for (index, cell) in fields.enumerate() {
        let question = QUESTIONS
            .get(index)
            .map(|q| q.id)
            .ok_or(Error::UnknownQuestion(index as u32 + 1))?;
        if cell.is_empty() {
            continue;
        }
        let value = cell.parse::<u8>().map_err(|_| Error::UnparsableAnswer {
            question,
            text: cell.to_string(),
        })?;
        store.insert(question, value)?;
    }
    Ok((id, store))
}

#[cfg(test)]
mod test {
    use super::*;

    fn header() -> String {
        let columns = (1..=59).map(|id| format!("q{}", id)).collect::<Vec<_>>();
        format!("id,{}\n", columns.join(","))
    }

    fn row(id: &str, pss: u8, events: u8, option: u8) -> String {
        let mut cells = vec![id.to_string()];
        cells.extend((0..10).map(|_| pss.to_string()));
        cells.extend((0..43).map(|_| events.to_string()));
        cells.extend((0..6).map(|_| option.to_string()));
        format!("{}\n", cells.join(","))
    }

    #[test]
    fn test_read_bulk() {
        let data = format!("{}{}{}", header(), row("a", 0, 0, 0), row("b", 4, 1, 2));
        let rows = read_bulk(data.as_bytes()).collect::<Vec<_>>();
        assert_eq!(rows.len(), 2);

        let (id, store) = rows[0].as_ref().unwrap();
        assert_eq!(id, "a");
        assert_eq!(store.to_score_result().unwrap().scores(), (16, 0, 0));

        let (id, store) = rows[1].as_ref().unwrap();
        assert_eq!(id, "b");
        assert_eq!(store.to_score_result().unwrap().scores(), (24, 1466, 20));
    }

    #[test]
    fn test_short_row_is_incomplete() {
        let data = format!("{}c,1,2,3\n", header());
        let (_, store) = read_bulk(data.as_bytes()).next().unwrap().unwrap();
        assert!(matches!(
            store.to_score_result(),
            Err(Error::IncompleteInput { .. })
        ));
    }

    #[test]
    fn test_bad_cells() {
        let data = format!("{}d,x\ne,9\n", header());
        let rows = read_bulk(data.as_bytes()).collect::<Vec<_>>();
        assert!(matches!(
            rows[0],
            Err(Error::UnparsableAnswer { question: 1, .. })
        ));
        assert!(matches!(
            rows[1],
            Err(Error::InvalidAnswerValue {
                question: 1,
                value: 9
            })
        ));
    }

    #[test]
    fn test_too_many_columns() {
        let mut line = row("f", 0, 0, 0);
        line.insert_str(line.len() - 1, ",1");
        let data = format!("{}{}", header(), line);
        let rows = read_bulk(data.as_bytes()).collect::<Vec<_>>();
        assert!(matches!(rows[0], Err(Error::UnknownQuestion(60))));
    }
}
