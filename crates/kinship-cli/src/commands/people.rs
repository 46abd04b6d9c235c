//! Commands that inspect the loaded family file

use clap::Args;
use serde::Serialize;

use crate::output::{format_output, format_people, OutputFormat, PersonRow};
use crate::AppContext;
use kinship_core::{Person, PersonSet};

#[derive(Args)]
pub struct ShowArgs {
    /// Person to show
    pub name: String,
}

#[derive(Serialize)]
struct PersonDetail {
    #[serde(flatten)]
    person: PersonRow,
    children: Vec<String>,
}

pub fn run_people(ctx: &AppContext) -> anyhow::Result<()> {
    let everyone: PersonSet = ctx.pool.everyone().map(Person::id).collect();
    let rows = PersonRow::from_set(&ctx.pool, &everyone);
    tracing::debug!("Listing {} people", rows.len());
    println!("{}", format_people(&rows, ctx.format));
    Ok(())
}

pub fn run_show(args: &ShowArgs, ctx: &AppContext) -> anyhow::Result<()> {
    let Some(person) = ctx.pool.find(&args.name) else {
        println!("No one named '{}' in the family file", args.name);
        return Ok(());
    };

    let detail = PersonDetail {
        person: PersonRow::new(&ctx.pool, person),
        children: ctx
            .pool
            .names(person.children())
            .into_iter()
            .map(String::from)
            .collect(),
    };

    match ctx.format {
        OutputFormat::Json => println!("{}", format_output(&detail)),
        OutputFormat::Csv => println!("{}", format_people(&[detail.person], ctx.format)),
        OutputFormat::Table => {
            let unknown = || "unknown".to_string();
            println!("{} ({})", detail.person.name, detail.person.gender);
            println!("  mother:   {}", detail.person.mother.unwrap_or_else(unknown));
            println!("  father:   {}", detail.person.father.unwrap_or_else(unknown));
            if detail.children.is_empty() {
                println!("  children: none");
            } else {
                println!("  children: {}", detail.children.join(", "));
            }
        }
    }
    Ok(())
}

pub fn run_stats(ctx: &AppContext) -> anyhow::Result<()> {
    let stats = ctx.pool.stats();
    match ctx.format {
        OutputFormat::Json => println!("{}", format_output(stats)),
        _ => {
            println!("people:             {}", ctx.pool.len());
            println!("records:            {}", stats.records);
            println!("skipped lines:      {}", stats.skipped_lines);
            println!("invalid records:    {}", stats.invalid_records);
            println!("redefinitions:      {}", stats.redefinitions);
            println!("unresolved parents: {}", stats.unresolved_parents);
            println!("rejected parents:   {}", stats.rejected_parents);
        }
    }
    Ok(())
}
