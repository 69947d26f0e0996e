use std::io::{self, BufRead, Write};
use std::path::Path;
use std::sync::Arc;

use log::{info, warn};

use engine::{Trainer, TrainerSnapshot};
use loader::{CorpusLoader, DelimitedFileSource, JsonFileSource, QuestionSource};
use quiz_core::model::CategoryFilter;

#[tokio::main(flavor = "multi_thread")]
async fn main() -> io::Result<()> {
    env_logger::init();

    let paths: Vec<String> = std::env::args().skip(1).collect();
    if paths.is_empty() {
        eprintln!("usage: app <bank.json|bank.csv|bank.tsv> ...");
        std::process::exit(2);
    }

    let mut builder = CorpusLoader::new();
    for path in &paths {
        match source_for(path) {
            Some(source) => builder.add_source(source),
            None => warn!("skipping {path}: unsupported extension"),
        }
    }

    let ticket = builder.begin();
    let outcome = builder.load().await;
    for failure in &outcome.failures {
        warn!("{failure}");
    }
    if !ticket.is_current() {
        // Nothing else started a load in this binary; treat as teardown.
        return Ok(());
    }
    info!(
        "loaded {} questions ({} rows rejected)",
        outcome.corpus.len(),
        outcome.rejected_rows
    );

    let mut trainer = Trainer::new(outcome.corpus);
    run_repl(&mut trainer)
}

fn source_for(path: &str) -> Option<Arc<dyn QuestionSource>> {
    let label = Path::new(path)
        .file_stem()
        .map_or_else(|| path.to_owned(), |stem| stem.to_string_lossy().into_owned());
    let extension = Path::new(path).extension()?.to_str()?;
    match extension {
        "json" => Some(Arc::new(JsonFileSource::new(label, path))),
        "csv" => Some(Arc::new(DelimitedFileSource::csv(label, path))),
        "tsv" => Some(Arc::new(DelimitedFileSource::tsv(label, path))),
        _ => None,
    }
}

fn run_repl(trainer: &mut Trainer) -> io::Result<()> {
    let stdin = io::stdin();
    let mut out = io::stdout();

    render(&trainer.snapshot(), &mut out)?;
    print_help(&mut out)?;

    for line in stdin.lock().lines() {
        let line = line?;
        let input = line.trim();
        let (command, argument) = match input.split_once(' ') {
            Some((c, a)) => (c, a.trim()),
            None => (input, ""),
        };

        match command {
            "" => {}
            "q" | "quit" => break,
            "h" | "help" => print_help(&mut out)?,
            "1" | "2" | "3" | "4" => {
                let index = command.parse::<usize>().unwrap_or(1) - 1;
                if let Some(question) = &trainer.snapshot().question {
                    if let Some(option) = question.options.get(index) {
                        trainer.select_option(option.slot);
                    }
                }
            }
            "n" | "next" => trainer.advance(),
            "p" | "prev" => trainer.retreat(),
            "r" | "restart" => trainer.restart_session(),
            "reset" => trainer.reset_progress(),
            "t" | "topic" => trainer.set_topic_filter(filter_from(argument)),
            "d" | "difficulty" => trainer.set_difficulty_filter(filter_from(argument)),
            "/" | "search" => trainer.set_search_text(argument),
            "size" => match argument.parse::<u32>() {
                Ok(size) => trainer.set_pool_size(size),
                Err(_) => writeln!(out, "size takes a number")?,
            },
            "shuffle" => trainer.set_shuffle(argument != "off"),
            "seen" => trainer.set_exclude_answered(argument != "include"),
            other => writeln!(out, "unknown command: {other} (h for help)")?,
        }

        render(&trainer.snapshot(), &mut out)?;
    }
    Ok(())
}

fn filter_from(argument: &str) -> CategoryFilter {
    if argument.is_empty() || argument.eq_ignore_ascii_case("all") {
        CategoryFilter::All
    } else {
        CategoryFilter::exact(argument)
    }
}

fn render(snapshot: &TrainerSnapshot, out: &mut impl Write) -> io::Result<()> {
    writeln!(out)?;
    if snapshot.answered_count > 0 {
        writeln!(
            out,
            "score: {}/{} ({}%)  progress: {}%",
            snapshot.correct_count,
            snapshot.answered_count,
            snapshot.accuracy,
            snapshot.completion
        )?;
    }

    let Some(question) = &snapshot.question else {
        writeln!(
            out,
            "No questions match the current filters. Relax them with \
             `t all`, `d all`, `/`, or `seen include`."
        )?;
        return Ok(());
    };

    let position = snapshot.position.unwrap_or(0) + 1;
    writeln!(
        out,
        "[{position}/{}] ({} / {})",
        snapshot.session_len, question.topic, question.difficulty
    )?;
    writeln!(out, "{}", question.prompt)?;
    for (index, option) in question.options.iter().enumerate() {
        let marker = match (snapshot.revealed, question.correct_slot) {
            (true, Some(correct)) if option.slot == correct => "*",
            _ if snapshot.selected == Some(option.slot) => ">",
            _ => " ",
        };
        writeln!(out, " {marker}{}. {}", index + 1, option.text)?;
    }
    if let Some(explanation) = &question.explanation {
        let verdict = verdict_line(snapshot);
        writeln!(out, "{verdict}")?;
        writeln!(out, "{explanation}")?;
    }
    out.flush()
}

fn verdict_line(snapshot: &TrainerSnapshot) -> &'static str {
    let correct = match (&snapshot.question, snapshot.selected) {
        (Some(question), Some(selected)) => question.correct_slot == Some(selected),
        _ => false,
    };
    if correct { "Correct!" } else { "Not quite." }
}

fn print_help(out: &mut impl Write) -> io::Result<()> {
    writeln!(
        out,
        "commands: 1-4 answer | n next | p prev | r restart | reset progress\n\
         filters: t <topic|all> | d <difficulty|all> | / <text> | size <n> | \
         shuffle [off] | seen [include] | q quit"
    )
}
