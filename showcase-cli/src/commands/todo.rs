//! Todo command - drive a todo list from a script on stdin
//!
//! One command per line:
//!   add <text>      add a todo (blank text is ignored)
//!   toggle <id>     flip completion
//!   delete <id>     remove
//!   list            print the list
//!
//! The final list is printed once stdin closes:
//!   printf 'add milk\nadd eggs\ntoggle 1\n' | showcase todo

use std::io::{self, BufRead};

use anyhow::{anyhow, Context, Result};
use clap::Parser;
use showcase_core::TodoList;
use tracing::debug;

#[derive(Parser, Debug)]
pub struct TodoArgs {
    /// Output the final list as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, PartialEq, Eq)]
enum TodoCommand {
    Add(String),
    Toggle(u64),
    Delete(u64),
    List,
}

fn parse_line(line: &str) -> Result<Option<TodoCommand>> {
    let trimmed = line.trim_start();
    if trimmed.is_empty() || trimmed.starts_with('#') {
        return Ok(None);
    }

    let (verb, rest) = trimmed.split_once(' ').unwrap_or((trimmed, ""));
    let id = || -> Result<u64> {
        rest.trim()
            .parse()
            .with_context(|| format!("Invalid todo id {:?}", rest.trim()))
    };

    let command = match verb {
        "add" => TodoCommand::Add(rest.to_string()),
        "toggle" => TodoCommand::Toggle(id()?),
        "delete" => TodoCommand::Delete(id()?),
        "list" => TodoCommand::List,
        other => return Err(anyhow!("Unknown todo command: {}", other)),
    };
    Ok(Some(command))
}

fn apply(list: &mut TodoList, command: TodoCommand) {
    match command {
        TodoCommand::Add(text) => {
            list.set_draft(text);
            if list.submit().is_none() {
                debug!("ignored blank todo");
                list.set_draft("");
            }
        }
        TodoCommand::Toggle(id) => {
            if !list.toggle(id) {
                eprintln!("⚠ no todo with id {}", id);
            }
        }
        TodoCommand::Delete(id) => {
            if !list.delete(id) {
                eprintln!("⚠ no todo with id {}", id);
            }
        }
        TodoCommand::List => print_list(list),
    }
}

fn print_list(list: &TodoList) {
    if list.is_empty() {
        println!("No todos");
        return;
    }

    for todo in list.items() {
        let mark = if todo.completed { "x" } else { " " };
        println!("[{}] {:>3}  {}", mark, todo.id, todo.text);
    }
    println!("{}/{} completed", list.completed(), list.len());
}

pub fn run_todo(args: TodoArgs) -> Result<()> {
    let mut list = TodoList::new();

    let stdin = io::stdin();
    for (number, line) in stdin.lock().lines().enumerate() {
        let line = line.context("Failed to read stdin")?;
        let command = parse_line(&line).with_context(|| format!("line {}", number + 1))?;
        if let Some(command) = command {
            apply(&mut list, command);
        }
    }

    if args.json {
        println!("{}", serde_json::to_string_pretty(list.items())?);
    } else {
        print_list(&list);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_line() {
        assert_eq!(
            parse_line("add buy milk").unwrap(),
            Some(TodoCommand::Add("buy milk".to_string()))
        );
        assert_eq!(parse_line("toggle 3").unwrap(), Some(TodoCommand::Toggle(3)));
        assert_eq!(parse_line("list").unwrap(), Some(TodoCommand::List));
        assert_eq!(parse_line("   ").unwrap(), None);
        assert_eq!(parse_line("# comment").unwrap(), None);
        assert!(parse_line("toggle x").is_err());
        assert!(parse_line("rename 1").is_err());
    }

    #[test]
    fn test_blank_add_is_ignored() {
        let mut list = TodoList::new();
        apply(&mut list, TodoCommand::Add("   ".to_string()));
        apply(&mut list, TodoCommand::Add("eggs".to_string()));

        assert_eq!(list.len(), 1);
        assert_eq!(list.items()[0].id, 1);
        assert_eq!(list.draft(), "");
    }
}
