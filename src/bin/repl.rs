use std::borrow::Cow;

use rustyline::error::ReadlineError;
use rustyline::highlight::{CmdKind, Highlighter};
use rustyline::validate::{ValidationContext, ValidationResult, Validator};
use rustyline::{Cmd, Completer, Context, Editor, EventHandler, KeyCode, KeyEvent, Modifiers};
use rustyline::{Helper, Highlighter, Hinter, Validator};
use tinyes::run;

const HISTORY_FILE: &str = "tinyes_history.txt";
const KEYWORDS: [&str; 2] = ["console", "log"];

struct KeywordCompleter;

impl rustyline::completion::Completer for KeywordCompleter {
    type Candidate = String;
    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &Context<'_>,
    ) -> rustyline::Result<(usize, Vec<String>)> {
        let before = &line[..pos];
        let prefix = before
            .rsplit(|c: char| !c.is_ascii_alphanumeric())
            .next()
            .unwrap_or("");
        if prefix.is_empty() {
            return Ok((pos, vec![]));
        }
        Ok((
            pos,
            KEYWORDS
                .iter()
                .filter(|keyword| keyword.starts_with(prefix) && keyword.len() > prefix.len())
                .map(|keyword| keyword[prefix.len()..].to_string())
                .collect(),
        ))
    }
}

#[derive(Completer, Helper, Highlighter, Hinter, Validator)]
struct InputValidator {
    #[rustyline(Validator)]
    validator: ScriptValidator,
    #[rustyline(Highlighter)]
    highlighter: ScriptHighlighter,
    #[rustyline(Completer)]
    completer: KeywordCompleter,
}

/// Parentheses outside string literals, paired up by byte offset.
struct ParenScan {
    partners: Vec<Option<usize>>,
    unmatched_open: Vec<usize>,
    unmatched_close: Vec<usize>,
    in_string: bool,
}

fn scan_parens(input: &str) -> ParenScan {
    let mut partners = vec![None; input.len()];
    let mut stack = Vec::new();
    let mut unmatched_close = Vec::new();
    let mut in_string = false;

    for (i, c) in input.char_indices() {
        match c {
            // No escapes exist in string literals
            '"' => in_string = !in_string,
            '(' if !in_string => stack.push(i),
            ')' if !in_string => match stack.pop() {
                Some(open) => {
                    partners[open] = Some(i);
                    partners[i] = Some(open);
                }
                None => unmatched_close.push(i),
            },
            _ => {}
        }
    }
    ParenScan {
        partners,
        unmatched_open: stack,
        unmatched_close,
        in_string,
    }
}

struct ScriptValidator;

impl Validator for ScriptValidator {
    fn validate(&self, ctx: &mut ValidationContext) -> rustyline::Result<ValidationResult> {
        let scan = scan_parens(ctx.input());

        if let Some(i) = scan.unmatched_close.first() {
            Ok(ValidationResult::Invalid(Some(format!(
                "  - Unmatched ')' at position {}",
                i
            ))))
        } else if scan.in_string || !scan.unmatched_open.is_empty() {
            Ok(ValidationResult::Incomplete)
        } else {
            Ok(ValidationResult::Valid(None))
        }
    }
}

struct ScriptHighlighter;

impl Highlighter for ScriptHighlighter {
    fn highlight<'l>(&self, line: &'l str, pos: usize) -> Cow<'l, str> {
        let partners = scan_parens(line).partners;
        let cursor = pos.checked_sub(1);
        let mut highlighted = String::with_capacity(line.len());
        let mut in_string = false;

        for (i, c) in line.char_indices() {
            if c == '"' || in_string {
                if c == '"' {
                    in_string = !in_string;
                }
                highlighted.push_str(&format!("\x1b[32m{}\x1b[0m", c)); // Green for strings
                continue;
            }
            match c {
                '(' | ')' => match partners[i] {
                    Some(partner) if cursor == Some(i) || cursor == Some(partner) => {
                        highlighted.push_str(&format!("\x1b[1;34m{}\x1b[0m", c)); // Blue for matching parens
                    }
                    Some(_) => highlighted.push(c),
                    None => highlighted.push_str(&format!("\x1b[31m{}\x1b[0m", c)), // Red for unmatched
                },
                _ => highlighted.push(c),
            }
        }

        Cow::Owned(highlighted)
    }

    fn highlight_char(&self, _line: &str, _pos: usize, _kind: CmdKind) -> bool {
        true
    }
}

fn main() -> rustyline::Result<()> {
    tinyes::logging::init();
    println!("tinyes REPL v0.1.0");
    println!("Type 'exit' or press Ctrl-D to quit.");

    let h = InputValidator {
        highlighter: ScriptHighlighter,
        validator: ScriptValidator,
        completer: KeywordCompleter,
    };
    let mut rl = Editor::new()?;
    rl.set_helper(Some(h));
    rl.bind_sequence(
        KeyEvent(KeyCode::Char('s'), Modifiers::CTRL),
        EventHandler::Simple(Cmd::Newline),
    );
    if rl.load_history(HISTORY_FILE).is_err() {
        println!("No previous history.");
    }

    loop {
        let readline = rl.readline("tinyes> ");
        match readline {
            Ok(line) => {
                rl.add_history_entry(line.as_str())?;
                let trimmed_input = line.trim();
                if trimmed_input.is_empty() {
                    continue;
                }
                if trimmed_input.eq_ignore_ascii_case("exit") {
                    break;
                }

                let stdout = std::io::stdout();
                if let Err(e) = run(trimmed_input, &mut stdout.lock()) {
                    if e.pretty_print("REPL", trimmed_input).is_err() {
                        eprintln!("Error: {}", e);
                    }
                }
            }
            Err(ReadlineError::Interrupted) => {
                // Ctrl-C
                println!("Interrupted. Type 'exit' or Ctrl-D to quit.");
            }
            Err(ReadlineError::Eof) => {
                // Ctrl-D
                println!("\nExiting.");
                break;
            }
            Err(err) => {
                eprintln!("Readline Error: {:?}", err);
                break;
            }
        }
    }
    rl.save_history(HISTORY_FILE)
}
