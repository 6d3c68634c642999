use clap::Parser;
use moodstone::{init_tracing, read_bulk, Error, Report};
use std::fs::File;
use std::io::BufReader;
use tracing::warn;

/// Scores every answer sheet in a CSV file.
#[derive(Parser)]
struct Args {
    path: String,
}

fn main() -> Result<(), Error> {
    init_tracing();
    let args = Args::parse();
    let file = File::open(&args.path).map_err(|e| Error::Io {
        path: args.path.clone().into(),
        source: e,
    })?;
    for (line, row) in read_bulk(BufReader::new(file)).enumerate() {
        match row.and_then(|(id, store)| Ok((id, store.to_score_result()?))) {
            Ok((id, score)) => {
                let report = Report::new(&score);
                println!(
                    "id = {}, scores = {:?}, aggregate = {:.1}, archetype = {}, has_stress = {}",
                    id,
                    score.scores(),
                    score.aggregate,
                    report.archetype.name(),
                    score.has_stress()
                );
            }
            Err(e) => {
                warn!(row = line + 1, error = %e, "skipping answer sheet");
            }
        }
    }
    Ok(())
}
