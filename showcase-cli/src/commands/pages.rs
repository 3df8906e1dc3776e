//! Pages command - list the example pages and their routes

use anyhow::Result;
use clap::Parser;
use serde::Serialize;
use showcase_core::Page;

#[derive(Parser, Debug)]
pub struct PagesArgs {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Serialize)]
struct PageEntry {
    name: &'static str,
    path: &'static str,
    description: &'static str,
}

impl From<Page> for PageEntry {
    fn from(page: Page) -> Self {
        Self {
            name: page.name(),
            path: page.path(),
            description: page.description(),
        }
    }
}

pub fn run_pages(args: PagesArgs) -> Result<()> {
    let entries: Vec<PageEntry> = Page::ALL.into_iter().map(PageEntry::from).collect();

    if args.json {
        println!("{}", serde_json::to_string_pretty(&entries)?);
        return Ok(());
    }

    println!("Showcase examples\n");
    for entry in &entries {
        println!("  {:<10} {:<10} {}", entry.name, entry.path, entry.description);
    }

    Ok(())
}
