//! cellsh - interactive shell over a sorted column of values
//!
//! Keeps one `GenericArray<Value>` ordered by `Value::compare` and exposes the
//! sorted-insertion operations as commands. Run with a file argument to execute
//! commands from it, or without one for an interactive prompt.
//! `RUST_LOG=debug` shows hint rejections and relocations.

use cellkit::{GenericArray, Value, ValueKind};
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;
use thiserror::Error;

const HELP: &str = "\
commands:
  kind <name>          switch kind and clear the column
  add <text>           sorted insert
  hint <index> <text>  insert using <index> as the hint
  set <index> <text>   change an item and move it back into order
  del <index>          remove an item
  list                 show the column
  help                 show this text";

#[derive(Debug, Error)]
enum ShellError {
    #[error("usage: {0}")]
    Usage(&'static str),
    #[error("unknown kind {0:?}, expected one of: {1}")]
    UnknownKind(String, String),
    #[error("{0:?} is not an index")]
    BadIndex(String),
    #[error(transparent)]
    Cell(#[from] cellkit::Error),
}

struct Shell {
    kind: ValueKind,
    column: GenericArray<Value>,
}

impl Shell {
    fn new() -> Self {
        Shell {
            kind: ValueKind::Int32,
            column: GenericArray::new(),
        }
    }

    fn execute(&mut self, line: &str) -> Result<String, ShellError> {
        let (command, rest) = line.split_once(' ').unwrap_or((line, ""));
        match command {
            "kind" => {
                let name = rest.trim();
                self.kind = ValueKind::from_name(name).ok_or_else(|| {
                    let names: Vec<_> = ValueKind::ALL.iter().map(|k| k.name()).collect();
                    ShellError::UnknownKind(name.to_owned(), names.join(", "))
                })?;
                self.column.clear();
                Ok(format!("kind is now {}", self.kind))
            }
            "add" => {
                let value = self.kind.parse(rest)?;
                let index = self.column.insert_sorted(value, Value::compare)?;
                Ok(format!("inserted at {}", index))
            }
            "hint" => {
                let (hint, text) = split_index(rest, "hint <index> <text>")?;
                let value = self.kind.parse(text)?;
                let index = self.column.insert_smart(hint, value, Value::compare)?;
                Ok(format!("inserted at {}", index))
            }
            "set" => {
                let (index, text) = split_index(rest, "set <index> <text>")?;
                let len = self.column.len();
                let item = self
                    .column
                    .get_mut(index)
                    .ok_or(cellkit::Error::Range { index, len })?;
                item.assign_from_str(text)?;
                let moved = self.column.move_sorted(index, Value::compare)?;
                Ok(format!("now at {}", moved))
            }
            "del" => {
                let (index, _) = split_index(rest, "del <index>")?;
                let removed = self.column.remove(index)?;
                Ok(format!("removed {}", removed))
            }
            "list" => Ok(self
                .column
                .iter()
                .enumerate()
                .map(|(i, v)| format!("{:>5}  {}", i, v))
                .collect::<Vec<_>>()
                .join("\n")),
            "help" => Ok(HELP.to_owned()),
            _ => Err(ShellError::Usage("see `help`")),
        }
    }
}

fn split_index<'a>(args: &'a str, usage: &'static str) -> Result<(usize, &'a str), ShellError> {
    let args = args.trim_start();
    if args.is_empty() {
        return Err(ShellError::Usage(usage));
    }
    let (index, text) = args.split_once(' ').unwrap_or((args, ""));
    let index = index
        .parse()
        .map_err(|_| ShellError::BadIndex(index.to_owned()))?;
    Ok((index, text))
}

fn main() {
    env_logger::init();

    let args: Vec<String> = std::env::args().collect();

    if args.len() > 1 {
        // Run a command file
        run_file(&args[1]);
    } else {
        // Interactive prompt
        run_repl();
    }
}

fn run_file(filename: &str) {
    let source = match std::fs::read_to_string(filename) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Error reading {}: {}", filename, e);
            std::process::exit(1);
        }
    };

    let mut shell = Shell::new();
    for (number, line) in source.lines().enumerate() {
        let line = line.trim_end();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        match shell.execute(line) {
            Ok(output) => {
                if !output.is_empty() {
                    println!("{}", output);
                }
            }
            Err(e) => {
                eprintln!("{}:{}: {}", filename, number + 1, e);
                std::process::exit(1);
            }
        }
    }
}

fn run_repl() {
    println!("cellsh - sorted value column");
    println!("Type `help` for commands, Ctrl+D to exit.\n");

    let mut editor = match DefaultEditor::new() {
        Ok(editor) => editor,
        Err(e) => {
            eprintln!("Error starting line editor: {}", e);
            std::process::exit(1);
        }
    };
    let mut shell = Shell::new();

    loop {
        match editor.readline(&format!("{}> ", shell.kind)) {
            Ok(line) => {
                let line = line.trim();
                if line.is_empty() {
                    continue;
                }
                let _ = editor.add_history_entry(line);

                match shell.execute(line) {
                    Ok(output) => {
                        if !output.is_empty() {
                            println!("{}", output);
                        }
                    }
                    Err(e) => {
                        println!("Error: {}", e);
                    }
                }
            }
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => {
                println!();
                break;
            }
            Err(e) => {
                eprintln!("Error reading input: {}", e);
                break;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(shell: &mut Shell, lines: &[&str]) -> Vec<String> {
        lines.iter().map(|l| shell.execute(l).unwrap()).collect()
    }

    #[test]
    fn test_sorted_session() {
        let mut shell = Shell::new();
        let out = run(&mut shell, &["add 5", "add 3", "add 8", "add 1", "list"]);
        assert_eq!(out[3], "inserted at 0");
        assert_eq!(out[4], "    0  1\n    1  3\n    2  5\n    3  8");
    }

    #[test]
    fn test_hint_and_set() {
        let mut shell = Shell::new();
        run(&mut shell, &["kind string-a", "add b", "add d"]);
        assert_eq!(shell.execute("hint 1 c").unwrap(), "inserted at 1");
        assert_eq!(shell.execute("hint 0 e").unwrap(), "inserted at 3");
        assert_eq!(shell.execute("set 0 z").unwrap(), "now at 3");
        assert_eq!(shell.execute("del 3").unwrap(), "removed z");
    }

    #[test]
    fn test_errors() {
        let mut shell = Shell::new();
        assert!(matches!(shell.execute("add x"), Err(ShellError::Cell(_))));
        assert!(matches!(shell.execute("del 0"), Err(ShellError::Cell(_))));
        assert!(matches!(shell.execute("set one 2"), Err(ShellError::BadIndex(_))));
        assert!(matches!(shell.execute("hint"), Err(ShellError::Usage(_))));
        assert!(matches!(shell.execute("kind float"), Err(ShellError::UnknownKind(..))));
        assert!(matches!(shell.execute("frobnicate"), Err(ShellError::Usage(_))));
    }
}
