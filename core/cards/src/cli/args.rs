use std::path::PathBuf;

use clap::builder::ArgAction;
use clap::error::ErrorKind;
use clap::{value_parser, Arg, ArgGroup, ArgMatches};
use clap_complete::Shell;
use common::domain::{ModelName, ProviderName};
use common::error::Error;

use crate::domain::{CardsCommand, SourceInput, TmpId};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// -v / --verbose: ログを stderr にも出す
    pub verbose: bool,
    pub command: CardsCommand,
}

/// 解析結果: 通常の Config / 補完スクリプト生成 / ヘルプ表示
#[derive(Debug, Clone)]
pub enum ParseOutcome {
    Config(Config),
    GenerateCompletion(Shell),
    /// -h / --help やサブコマンド未指定（main で表示して 0 終了）
    Help(String),
}

fn preview_arg() -> Arg {
    Arg::new("preview")
        .value_name("preview.json")
        .help("Preview file written by `cards generate -o`")
        .required(true)
        .value_parser(value_parser!(PathBuf))
}

fn tmp_id_arg() -> Arg {
    Arg::new("tmp-id")
        .value_name("tmp-id")
        .help("Temporary card id shown by `cards show`")
        .required(true)
}

pub(crate) fn build_clap_command() -> clap::Command {
    clap::Command::new("cards")
        .about("Generate flashcards from source text with an AI provider, review them, and save the set")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new("profile")
                .short('p')
                .long("profile")
                .value_name("profile")
                .help("Provider profile (openrouter, openai_compat, echo, or a profiles.json entry)")
                .global(true)
                .num_args(1),
        )
        .arg(
            Arg::new("model")
                .short('m')
                .long("model")
                .value_name("model")
                .help("Model name (e.g. openai/gpt-4o-mini)")
                .global(true)
                .num_args(1),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .help("Also print log records to stderr")
                .global(true)
                .action(ArgAction::SetTrue),
        )
        .subcommand(
            clap::Command::new("generate")
                .about("Generate a card preview from a text file (`-` reads stdin)")
                .arg(
                    Arg::new("input")
                        .value_name("input-file|-")
                        .help("Source text (1000 to 10000 characters)")
                        .required(true),
                )
                .arg(
                    Arg::new("output")
                        .short('o')
                        .long("output")
                        .value_name("preview.json")
                        .help("Write the preview here instead of stdout")
                        .value_parser(value_parser!(PathBuf))
                        .num_args(1),
                ),
        )
        .subcommand(
            clap::Command::new("show")
                .about("List preview cards with ids, flags and counts")
                .arg(preview_arg()),
        )
        .subcommand(
            clap::Command::new("edit")
                .about("Replace the front and/or back of a preview card")
                .arg(preview_arg())
                .arg(tmp_id_arg())
                .arg(Arg::new("front").long("front").value_name("text").num_args(1))
                .arg(Arg::new("back").long("back").value_name("text").num_args(1))
                .group(
                    ArgGroup::new("content")
                        .args(["front", "back"])
                        .required(true)
                        .multiple(true),
                ),
        )
        .subcommand(
            clap::Command::new("delete")
                .about("Mark a preview card as deleted")
                .arg(preview_arg())
                .arg(tmp_id_arg()),
        )
        .subcommand(
            clap::Command::new("save")
                .about("Save the active preview cards as a named set")
                .arg(preview_arg())
                .arg(
                    Arg::new("name")
                        .long("name")
                        .value_name("set name")
                        .help("Set name (defaults to the suggested name)")
                        .num_args(1),
                ),
        )
        .subcommand(clap::Command::new("profiles").about("List available provider profiles"))
        .subcommand(
            clap::Command::new("completion")
                .about("Generate shell completion script")
                .arg(
                    Arg::new("shell")
                        .required(true)
                        .value_parser(value_parser!(Shell)),
                ),
        )
}

fn preview_path(m: &ArgMatches) -> PathBuf {
    m.get_one::<PathBuf>("preview").cloned().unwrap_or_default()
}

fn tmp_id(m: &ArgMatches) -> TmpId {
    TmpId::new(m.get_one::<String>("tmp-id").cloned().unwrap_or_default())
}

fn matches_to_outcome(matches: &ArgMatches) -> Result<ParseOutcome, Error> {
    let verbose = matches.get_flag("verbose");
    let profile = matches
        .get_one::<String>("profile")
        .map(|s| ProviderName::new(s.clone()));
    let model = matches
        .get_one::<String>("model")
        .map(|s| ModelName::new(s.clone()));

    let command = match matches.subcommand() {
        Some(("generate", m)) => CardsCommand::Generate {
            input: SourceInput::parse(m.get_one::<String>("input").map(String::as_str).unwrap_or("-")),
            output: m.get_one::<PathBuf>("output").cloned(),
            profile,
            model,
        },
        Some(("show", m)) => CardsCommand::Show {
            preview: preview_path(m),
        },
        Some(("edit", m)) => CardsCommand::Edit {
            preview: preview_path(m),
            tmp_id: tmp_id(m),
            front: m.get_one::<String>("front").cloned(),
            back: m.get_one::<String>("back").cloned(),
        },
        Some(("delete", m)) => CardsCommand::Delete {
            preview: preview_path(m),
            tmp_id: tmp_id(m),
        },
        Some(("save", m)) => CardsCommand::Save {
            preview: preview_path(m),
            name: m.get_one::<String>("name").cloned(),
        },
        Some(("profiles", _)) => CardsCommand::Profiles,
        Some(("completion", m)) => {
            return match m.get_one::<Shell>("shell") {
                Some(&shell) => Ok(ParseOutcome::GenerateCompletion(shell)),
                None => Err(Error::invalid_argument("missing shell")),
            }
        }
        Some((other, _)) => {
            return Err(Error::invalid_argument(format!("Unknown command: {}", other)))
        }
        None => return Err(Error::invalid_argument("No command given")),
    };
    Ok(ParseOutcome::Config(Config { verbose, command }))
}

fn to_outcome(result: Result<ArgMatches, clap::Error>) -> Result<ParseOutcome, Error> {
    match result {
        Ok(matches) => matches_to_outcome(&matches),
        Err(e)
            if matches!(
                e.kind(),
                ErrorKind::DisplayHelp
                    | ErrorKind::DisplayHelpOnMissingArgumentOrSubcommand
                    | ErrorKind::DisplayVersion
            ) =>
        {
            Ok(ParseOutcome::Help(e.render().to_string()))
        }
        Err(e) => Err(Error::invalid_argument(e.to_string())),
    }
}

/// コマンドラインを解析する
pub fn parse_args() -> Result<ParseOutcome, Error> {
    to_outcome(build_clap_command().try_get_matches())
}

/// テスト用: 引数スライスから解析する
#[allow(dead_code)]
pub fn parse_args_from(args: &[&str]) -> Result<ParseOutcome, Error> {
    to_outcome(build_clap_command().try_get_matches_from(args))
}

/// 補完スクリプトを標準出力に出力する
pub fn print_completion(shell: Shell) {
    let mut cmd = build_clap_command();
    clap_complete::generate(shell, &mut cmd, "cards", &mut std::io::stdout());
}
