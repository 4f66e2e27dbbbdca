mod adapter;
mod cli;
mod domain;
mod error;
mod ports;
mod usecase;
mod wiring;

#[cfg(test)]
mod tests;

use std::io::Read;
use std::process;

use cli::{parse_args, print_completion, Config, ParseOutcome};
use common::ports::outbound::{LogLevel, LogRecord};
use domain::{CardsCommand, GenerationPreview, SourceInput};
use error::CardsError;
use ports::inbound::UseCaseRunner;
use wiring::{wire_cards, App};

/// CardsCommand をディスパッチする Runner（match は main レイヤーに集約）
struct Runner {
    app: App,
}

impl UseCaseRunner for Runner {
    fn run(&self, config: Config) -> Result<i32, CardsError> {
        let command_name = config.command.name();
        let _ = self.app.logger.log(
            &LogRecord::new(LogLevel::Info, "command started")
                .layer("cli")
                .kind("lifecycle")
                .field("command", command_name),
        );

        let result = self.dispatch(config.command);

        let code = result.as_ref().copied().unwrap_or_else(|e| e.exit_code());
        let _ = self.app.logger.log(
            &LogRecord::new(LogLevel::Info, "command finished")
                .layer("cli")
                .kind("lifecycle")
                .field("command", command_name)
                .field("exit_code", code),
        );
        if let Err(ref e) = result {
            let _ = self.app.logger.log(
                &LogRecord::new(LogLevel::Error, e.to_string())
                    .layer("cli")
                    .kind("error")
                    .field("http_status", e.http_status()),
            );
        }
        result
    }
}

impl Runner {
    fn dispatch(&self, cmd: CardsCommand) -> Result<i32, CardsError> {
        let uc = &self.app.use_case;
        match cmd {
            CardsCommand::Generate {
                input,
                output,
                profile,
                model,
            } => {
                let raw = self.read_source(&input)?;
                let preview =
                    uc.generate_preview(&raw, profile.as_ref(), model.as_ref(), output.as_deref())?;
                match output {
                    Some(path) => eprintln!("cards: preview written to {}", path.display()),
                    None => println!("{}", to_json(&preview)?),
                }
                eprintln!(
                    "cards: {} cards generated by {} (\"{}\", tokens: {} prompt / {} completion)",
                    preview.cards.total_count(),
                    preview.model,
                    preview.suggested_name,
                    preview.prompt_tokens,
                    preview.completion_tokens
                );
                Ok(0)
            }
            CardsCommand::Show { preview } => {
                print_preview(&uc.load_preview(&preview)?);
                Ok(0)
            }
            CardsCommand::Edit {
                preview,
                tmp_id,
                front,
                back,
            } => {
                let p = uc.edit_card(&preview, &tmp_id, front.as_deref(), back.as_deref())?;
                print_counts(&p);
                Ok(0)
            }
            CardsCommand::Delete { preview, tmp_id } => {
                let p = uc.delete_card(&preview, &tmp_id)?;
                print_counts(&p);
                Ok(0)
            }
            CardsCommand::Save { preview, name } => {
                let saved = uc.save_set(&preview, name.as_deref())?;
                println!("{}", saved.id);
                eprintln!(
                    "cards: saved {} cards as \"{}\"",
                    saved.card_count, saved.name
                );
                Ok(0)
            }
            CardsCommand::Profiles => {
                let (names, default) = uc.list_profiles()?;
                for name in &names {
                    if *name == default {
                        println!("{} (default)", name);
                    } else {
                        println!("{}", name);
                    }
                }
                Ok(0)
            }
        }
    }

    fn read_source(&self, input: &SourceInput) -> Result<String, CardsError> {
        match input {
            SourceInput::File(path) => Ok(self.app.fs.read_to_string(path)?),
            SourceInput::Stdin => {
                let mut buf = String::new();
                std::io::stdin()
                    .read_to_string(&mut buf)
                    .map_err(|e| common::error::Error::io_msg(format!("Failed to read stdin: {}", e)))?;
                Ok(buf)
            }
        }
    }
}

fn to_json(preview: &GenerationPreview) -> Result<String, CardsError> {
    serde_json::to_string_pretty(preview)
        .map_err(|e| common::error::Error::json(e.to_string()).into())
}

fn print_counts(preview: &GenerationPreview) {
    let c = &preview.cards;
    println!(
        "total: {}  active: {}  edited: {}  deleted: {}",
        c.total_count(),
        c.active_count(),
        c.edited_count(),
        c.deleted_count()
    );
}

fn print_preview(preview: &GenerationPreview) {
    println!("{}  (model: {})", preview.suggested_name, preview.model);
    for card in preview.cards.cards() {
        let flags = format!(
            "{}{}",
            if card.edited() { "E" } else { "-" },
            if card.deleted() { "D" } else { "-" }
        );
        println!("{} [{}] {}", card.tmp_id(), flags, card.front());
        println!("            {}", card.back());
    }
    print_counts(preview);
    if preview.cards.all_deleted() {
        println!("(no active cards)");
    }
}

fn main() {
    let exit_code = match run() {
        Ok(code) => code,
        Err(e) => {
            if e.is_usage() {
                print_usage();
            }
            eprintln!("cards: {}", e);
            e.exit_code()
        }
    };
    process::exit(exit_code);
}

pub fn run() -> Result<i32, CardsError> {
    let config = match parse_args()? {
        ParseOutcome::Config(c) => c,
        ParseOutcome::GenerateCompletion(shell) => {
            print_completion(shell);
            return Ok(0);
        }
        ParseOutcome::Help(text) => {
            print!("{}", text);
            return Ok(0);
        }
    };
    let app = wire_cards(config.verbose)?;
    let runner = Runner { app };
    runner.run(config)
}

fn print_usage() {
    eprintln!("Usage: cards [-p profile] [-m model] [-v] <generate|show|edit|delete|save|profiles|completion> ...");
}
