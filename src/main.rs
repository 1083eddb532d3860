use std::io;
use std::process::ExitCode;

use wordle_game::cli::{CliInterface, parse_cli};
use wordle_game::logging::{default_log_path, init_logging};
use wordle_game::tui::TuiInterface;
use wordle_game::{
    DictionaryError, GameSession, game_loop, info_log, load_embedded_wordbank,
    load_wordbank_from_file,
};

fn main() -> ExitCode {
    let cli = parse_cli();

    if let Some(path) = cli.log_file.clone().or_else(default_log_path)
        && let Err(e) = init_logging(&path)
    {
        eprintln!("Logging disabled, could not open '{}': {e}", path.display());
    }

    let dictionary = match &cli.words_path {
        Some(path) => load_wordbank_from_file(path).map_err(|e| (path.display().to_string(), e)),
        None => load_embedded_wordbank().map_err(|e| ("built-in list".to_string(), e)),
    };
    let dictionary = match dictionary {
        Ok(dictionary) => dictionary,
        Err((source, e)) => {
            log::error!("Failed to load word list from {source}: {e}");
            eprintln!("Failed to load word list from {source}: {e}");
            return exit_code_for(&e);
        }
    };

    let mut session = GameSession::new(dictionary);

    let rounds = if cli.plain {
        let stdin = io::stdin();
        let mut interface = CliInterface::new(stdin.lock()).layout(cli.layout.into());
        game_loop(&mut session, &mut interface)
    } else {
        let mut interface = match TuiInterface::new(cli.layout.into()) {
            Ok(interface) => interface,
            Err(e) => {
                log::error!("Failed to initialize terminal: {e}");
                eprintln!("Failed to initialize terminal: {e}");
                return ExitCode::FAILURE;
            }
        };
        game_loop(&mut session, &mut interface)
    };

    info_log!("Exiting after {} rounds", rounds);
    ExitCode::SUCCESS
}

fn exit_code_for(error: &DictionaryError) -> ExitCode {
    match error {
        DictionaryError::Io(_) => ExitCode::from(2),
        DictionaryError::Json(_) | DictionaryError::Empty => ExitCode::from(3),
    }
}
