use std::io::{self, BufRead, Write};
use std::sync::mpsc;
use std::thread;

use farm_core::Msg;
use farm_logging::farm_warn;

pub const HELP: &str = "\
commands:
  projects | jobs | renders   list a collection
  show                        show the current selection
  refresh                     reload all collections
  job <id>                    open a job
  render <id>                 open a render
  preview <file>              preview an output file of the open render
  create <project>            submit a job (asks for frames as start:end[:priority])
  delete <id>                 delete a job
  clear                       close the current selection
  help                        this text
  quit                        leave the console";

const FRAMES_PROMPT: &str = "Enter frames [a:b]: ";

/// Collections and panels that can be printed on request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Listing {
    Projects,
    Jobs,
    Renders,
    Selection,
}

/// Everything the main loop reacts to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    Msg(Msg),
    Show(Listing),
    Help,
    Unknown(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Command {
    Empty,
    Show(Listing),
    Refresh,
    Job(String),
    Render(String),
    Preview(String),
    Create(String),
    Delete(String),
    Clear,
    Help,
    Quit,
    Unknown(String),
}

fn parse_command(line: &str) -> Command {
    let line = line.trim();
    let (word, arg) = match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (line, ""),
    };
    let with_arg = |build: fn(String) -> Command| {
        if arg.is_empty() {
            Command::Unknown(format!("`{word}` needs an argument"))
        } else {
            build(arg.to_string())
        }
    };
    match word.to_ascii_lowercase().as_str() {
        "" => Command::Empty,
        "projects" => Command::Show(Listing::Projects),
        "jobs" => Command::Show(Listing::Jobs),
        "renders" => Command::Show(Listing::Renders),
        "show" => Command::Show(Listing::Selection),
        "refresh" => Command::Refresh,
        "job" => with_arg(Command::Job),
        "render" => with_arg(Command::Render),
        "preview" => with_arg(Command::Preview),
        "create" => with_arg(Command::Create),
        "delete" => with_arg(Command::Delete),
        "clear" => Command::Clear,
        "help" | "?" => Command::Help,
        "quit" | "exit" => Command::Quit,
        _ => Command::Unknown(format!("unknown command `{word}`; try `help`")),
    }
}

/// Reads operator commands from stdin on a dedicated thread.
pub fn spawn_reader(input_tx: mpsc::Sender<Input>) -> io::Result<()> {
    thread::Builder::new()
        .name("farm-input".to_string())
        .spawn(move || {
            let stdin = io::stdin();
            read_commands(stdin.lock(), io::stdout(), &input_tx);
        })?;
    Ok(())
}

/// Turns lines into inputs until `quit` or end of input, both of which end
/// the session. `create` reads its frame range from the following line.
fn read_commands<R: BufRead, W: Write>(reader: R, mut out: W, input_tx: &mpsc::Sender<Input>) {
    let mut lines = reader.lines();
    loop {
        let line = match lines.next() {
            Some(Ok(line)) => line,
            Some(Err(err)) => {
                farm_warn!("Unreadable input line: {}", err);
                if input_tx
                    .send(Input::Unknown(format!("could not read that line: {err}")))
                    .is_err()
                {
                    return;
                }
                continue;
            }
            None => {
                let _ = input_tx.send(Input::Msg(Msg::Shutdown));
                return;
            }
        };
        let input = match parse_command(&line) {
            Command::Empty => continue,
            Command::Show(listing) => Input::Show(listing),
            Command::Refresh => Input::Msg(Msg::RefreshRequested),
            Command::Job(job_id) => Input::Msg(Msg::JobSelected { job_id }),
            Command::Render(render_id) => Input::Msg(Msg::RenderSelected { render_id }),
            Command::Preview(filename) => Input::Msg(Msg::PreviewRequested { filename }),
            Command::Create(project) => {
                let _ = write!(out, "{FRAMES_PROMPT}");
                let _ = out.flush();
                let frames = lines.next().and_then(Result::ok);
                Input::Msg(Msg::CreateJobRequested { project, frames })
            }
            Command::Delete(job_id) => Input::Msg(Msg::DeleteJobRequested { job_id }),
            Command::Clear => Input::Msg(Msg::SelectionCleared),
            Command::Help => Input::Help,
            Command::Quit => {
                let _ = input_tx.send(Input::Msg(Msg::Shutdown));
                return;
            }
            Command::Unknown(reason) => Input::Unknown(reason),
        };
        if input_tx.send(input).is_err() {
            return;
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;
    use std::sync::mpsc;

    use farm_core::Msg;

    use super::{parse_command, read_commands, Command, Input, Listing};

    fn run(script: &str) -> (Vec<Input>, String) {
        run_bytes(script.as_bytes())
    }

    fn run_bytes(script: &[u8]) -> (Vec<Input>, String) {
        let (tx, rx) = mpsc::channel();
        let mut out = Vec::new();
        read_commands(Cursor::new(script.to_vec()), &mut out, &tx);
        drop(tx);
        (rx.into_iter().collect(), String::from_utf8(out).unwrap())
    }

    #[test]
    fn commands_are_parsed() {
        assert_eq!(parse_command("  jobs "), Command::Show(Listing::Jobs));
        assert_eq!(
            parse_command("job 2024-03-01T10:20:30"),
            Command::Job("2024-03-01T10:20:30".to_string())
        );
        assert_eq!(
            parse_command("DELETE abc"),
            Command::Delete("abc".to_string())
        );
        assert_eq!(parse_command(""), Command::Empty);
        assert!(matches!(parse_command("render"), Command::Unknown(_)));
        assert!(matches!(parse_command("dance"), Command::Unknown(_)));
    }

    #[test]
    fn create_prompts_for_frames() {
        let (inputs, prompt) = run("create shot_010\n5:10\nquit\n");

        assert_eq!(
            inputs,
            vec![
                Input::Msg(Msg::CreateJobRequested {
                    project: "shot_010".to_string(),
                    frames: Some("5:10".to_string()),
                }),
                Input::Msg(Msg::Shutdown),
            ]
        );
        assert_eq!(prompt, "Enter frames [a:b]: ");
    }

    #[test]
    fn create_at_end_of_input_has_no_frames() {
        let (inputs, _) = run("create shot_010\n");

        assert_eq!(
            inputs,
            vec![
                Input::Msg(Msg::CreateJobRequested {
                    project: "shot_010".to_string(),
                    frames: None,
                }),
                Input::Msg(Msg::Shutdown),
            ]
        );
    }

    #[test]
    fn end_of_input_shuts_down() {
        let (inputs, _) = run("renders\n\nclear\n");

        assert_eq!(
            inputs,
            vec![
                Input::Show(Listing::Renders),
                Input::Msg(Msg::SelectionCleared),
                Input::Msg(Msg::Shutdown),
            ]
        );
    }

    #[test]
    fn unreadable_line_does_not_end_the_session() {
        let (inputs, _) = run_bytes(b"jobs\n\xff\xfe\nrenders\nquit\n");

        assert_eq!(inputs.len(), 4);
        assert_eq!(inputs[0], Input::Show(Listing::Jobs));
        assert!(matches!(inputs[1], Input::Unknown(_)));
        assert_eq!(inputs[2], Input::Show(Listing::Renders));
        assert_eq!(inputs[3], Input::Msg(Msg::Shutdown));
    }
}
