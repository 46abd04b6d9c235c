//! Relationship query commands

use std::io::{BufRead, Write};

use clap::Args;

use crate::output::{format_query_result, OutputFormat, PersonRow};
use crate::AppContext;
use kinship_core::{GenePool, PMod, Query, SMod};

#[derive(Args)]
pub struct AskArgs {
    /// Query text, e.g. "Carol's maternal half sisters"
    #[arg(required = true, num_args = 1..)]
    pub text: Vec<String>,
}

#[derive(Args)]
pub struct FindArgs {
    /// Person the relationship is about
    pub name: String,

    /// Relationship keyword (siblings, aunts, grandmothers, ...)
    pub relationship: String,

    /// Follow the mother's side only
    #[arg(long, conflicts_with = "paternal")]
    pub maternal: bool,

    /// Follow the father's side only
    #[arg(long)]
    pub paternal: bool,

    /// Only relations through full siblings
    #[arg(long, conflicts_with = "half")]
    pub full: bool,

    /// Only relations through half siblings
    #[arg(long)]
    pub half: bool,
}

impl FindArgs {
    fn pmod(&self) -> PMod {
        match (self.maternal, self.paternal) {
            (true, _) => PMod::Maternal,
            (_, true) => PMod::Paternal,
            _ => PMod::Any,
        }
    }

    fn smod(&self) -> SMod {
        match (self.full, self.half) {
            (true, _) => SMod::Full,
            (_, true) => SMod::Half,
            _ => SMod::Any,
        }
    }
}

fn answer(query: &Query, pool: &GenePool, format: OutputFormat) -> String {
    let result = query.run(pool);
    tracing::info!("{} -> {} people", query, result.len());
    let rows = PersonRow::from_set(pool, &result);
    format_query_result(query, &rows, format)
}

pub fn run_ask(args: &AskArgs, ctx: &AppContext) -> anyhow::Result<()> {
    let text = args.text.join(" ");
    let query = Query::parse(&text)?;
    println!("{}", answer(&query, &ctx.pool, ctx.format));
    Ok(())
}

pub fn run_find(args: &FindArgs, ctx: &AppContext) -> anyhow::Result<()> {
    let query = Query::new(&args.name, &args.relationship, args.pmod(), args.smod())?;
    println!("{}", answer(&query, &ctx.pool, ctx.format));
    Ok(())
}

/// Answer one query per input line until end of input
pub fn run_shell(ctx: &AppContext) -> anyhow::Result<()> {
    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    let failed = answer_lines(stdin.lock(), &mut stdout.lock(), ctx)?;
    if failed > 0 {
        tracing::warn!("{} queries could not be answered", failed);
    }
    Ok(())
}

/// Returns how many lines were rejected
fn answer_lines<R: BufRead, W: Write>(
    input: R,
    out: &mut W,
    ctx: &AppContext,
) -> anyhow::Result<usize> {
    let mut failed = 0;
    for line in input.lines() {
        let line = line?;
        let text = line.trim();
        if text.is_empty() || text.starts_with('#') {
            continue;
        }

        match Query::parse(text) {
            Ok(query) => {
                if ctx.format == OutputFormat::Table {
                    writeln!(out, "{}:", query)?;
                }
                writeln!(out, "{}", answer(&query, &ctx.pool, ctx.format))?;
            }
            Err(e) => {
                failed += 1;
                eprintln!("error: {}", e);
            }
        }
    }
    Ok(failed)
}

#[cfg(test)]
mod tests {
    use super::*;

    const FAMILY: &str = "Alice\tfemale\t???\t???\nBob\tmale\t???\t???\n\
Carol\tfemale\tAlice\tBob\nDave\tmale\tAlice\tBob\nErin\tfemale\tAlice\tZane\n";

    fn context(format: OutputFormat) -> AppContext {
        AppContext {
            pool: GenePool::from_reader(FAMILY.as_bytes()).unwrap(),
            format,
        }
    }

    #[test]
    fn test_find_args_qualifiers() {
        let args = FindArgs {
            name: "Carol".into(),
            relationship: "siblings".into(),
            maternal: false,
            paternal: true,
            full: false,
            half: true,
        };
        assert_eq!(args.pmod(), PMod::Paternal);
        assert_eq!(args.smod(), SMod::Half);
    }

    #[test]
    fn test_answer_lines() {
        let ctx = context(OutputFormat::Table);
        let input = "Carol's full siblings\n\n# comment\nwho are carol's step sisters?\nCarol's half siblings\n";
        let mut out = Vec::new();

        let failed = answer_lines(input.as_bytes(), &mut out, &ctx).unwrap();
        let text = String::from_utf8(out).unwrap();

        assert_eq!(failed, 1);
        assert_eq!(
            text,
            "Carol's full siblings:\nDave\nCarol's half siblings:\nErin\n"
        );
    }

    #[test]
    fn test_unknown_person_answers_no_one() {
        let ctx = context(OutputFormat::Table);
        let query = Query::parse("Nonexistent's cousins").unwrap();
        assert_eq!(answer(&query, &ctx.pool, ctx.format), "(no one)");
    }
}
