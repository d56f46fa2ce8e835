use std::env;
use std::path::PathBuf;

use board_api::{detect_share_target, BoardApi, LoadOutcome};
use board_core::catalog;
use contracts::{BoardConfig, Phase, TARGET_COUNT};

fn print_usage() {
    println!("board-cli <command>");
    println!("commands:");
    println!("  status");
    println!("  catalog");
    println!("  toggle <value | catalog-index>");
    println!("  start");
    println!("  board");
    println!("  name <cell-index> <person name>");
    println!("  clear <cell-index>");
    println!("  share [out-dir]");
    println!("  export <path>");
    println!("  reset");
    println!("environment:");
    println!("  BINGO_SQLITE_PATH  state database (default: bingo_board.sqlite)");
    println!("  BINGO_SEED         fixed shuffle seed for deterministic grids");
}

fn sqlite_path() -> String {
    env::var("BINGO_SQLITE_PATH")
        .ok()
        .filter(|value| !value.trim().is_empty())
        .unwrap_or_else(|| "bingo_board.sqlite".to_string())
}

fn board_config() -> Result<BoardConfig, String> {
    let seed = match env::var("BINGO_SEED") {
        Ok(raw) => Some(
            raw.parse::<u64>()
                .map_err(|_| format!("invalid BINGO_SEED: {raw}"))?,
        ),
        Err(_) => None,
    };
    Ok(BoardConfig { seed })
}

fn open_api() -> Result<BoardApi, String> {
    let mut api = BoardApi::from_config(board_config()?);
    api.attach_sqlite_store(sqlite_path())
        .map_err(|err| format!("failed to attach sqlite store: {err}"))?;

    match api.load_persisted_state() {
        LoadOutcome::Restored | LoadOutcome::FreshState => {}
        LoadOutcome::DiscardedCorrupt(reason) => {
            eprintln!("notice: discarded saved state ({reason}); starting fresh");
        }
    }
    Ok(api)
}

fn report_persistence(api: &BoardApi) {
    if let Some(error) = api.last_persistence_error() {
        eprintln!("warning: state not saved: {error}");
    }
}

/// Accepts a 1-based grid position or a raw cell id.
fn resolve_cell_id(api: &BoardApi, raw: &str) -> Result<String, String> {
    if let Ok(position) = raw.parse::<usize>() {
        if position == 0 || position > api.state().grid.len() {
            return Err(format!(
                "cell index out of range: {position} (grid has {} cells)",
                api.state().grid.len()
            ));
        }
        return Ok(api.state().grid[position - 1].id.clone());
    }
    Ok(raw.to_string())
}

fn resolve_toggle_value(raw: &str) -> String {
    if let Ok(index) = raw.parse::<usize>() {
        if let Some(value) = catalog::value_at(index) {
            return value.to_string();
        }
    }
    raw.to_string()
}

fn print_status(api: &BoardApi) {
    let state = api.state();
    match state.phase {
        Phase::Setup => {
            println!(
                "phase=setup selected={}/{} remaining={}",
                state.selection.len(),
                TARGET_COUNT,
                state.remaining_count()
            );
            for value in &state.selection {
                println!("  - {value}");
            }
        }
        Phase::Playing => {
            println!(
                "phase=playing filled={}/{}",
                state.filled_count(),
                TARGET_COUNT
            );
        }
    }
}

fn print_board(api: &BoardApi) {
    let state = api.state();
    if state.grid.is_empty() {
        println!("no grid yet; select {TARGET_COUNT} values and run `start`");
        return;
    }
    for (index, cell) in state.grid.iter().enumerate() {
        let marker = match cell.person_name.as_deref() {
            Some(name) => format!("[{name}]"),
            None => "[ ]".to_string(),
        };
        println!("{:>2}. {} {}", index + 1, marker, cell.value);
        if (index + 1) % 4 == 0 {
            println!();
        }
    }
    println!(
        "filled {}/{}",
        state.filled_count(),
        TARGET_COUNT
    );
}

fn run_share(api: &BoardApi, out_dir: Option<&String>) -> Result<(), String> {
    let payload = api
        .export_png()
        .map_err(|err| format!("could not capture the board: {err}"))?;

    let out_dir = out_dir
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("."));
    let target = detect_share_target(out_dir);
    match target.share(&payload) {
        Ok(outcome) => {
            println!("shared via {}: {outcome}", target.label());
            Ok(())
        }
        Err(err) => Err(format!("share failed ({}): {err}", target.label())),
    }
}

fn run_export(api: &BoardApi, path: Option<&String>) -> Result<(), String> {
    let path = path.ok_or_else(|| "missing output path".to_string())?;
    let payload = api
        .export_png()
        .map_err(|err| format!("could not capture the board: {err}"))?;
    std::fs::write(path, payload).map_err(|err| format!("could not write {path}: {err}"))?;
    println!("exported {path}");
    Ok(())
}

fn run(args: &[String]) -> Result<(), String> {
    let command = args.get(1).map(String::as_str);

    match command {
        Some("status") => {
            let api = open_api()?;
            print_status(&api);
        }
        Some("catalog") => {
            let api = open_api()?;
            for (index, value) in catalog::BOARD_VALUES.iter().enumerate() {
                let selected = api
                    .state()
                    .selection
                    .iter()
                    .any(|chosen| chosen == value);
                let marker = if selected { "*" } else { " " };
                println!("{:>2}.{marker} {value}", index + 1);
            }
        }
        Some("toggle") => {
            let raw = args.get(2).ok_or_else(|| "missing value".to_string())?;
            let value = resolve_toggle_value(raw);
            let mut api = open_api()?;
            if api.toggle_value(&value) {
                println!(
                    "selected={}/{} remaining={}",
                    api.state().selection.len(),
                    TARGET_COUNT,
                    api.state().remaining_count()
                );
            } else {
                println!("selection is full; value not added");
            }
            report_persistence(&api);
        }
        Some("start") => {
            let mut api = open_api()?;
            if api.start_game() {
                println!("game on");
                print_board(&api);
            } else if api.phase() == Phase::Playing {
                println!("already playing; use `reset` to start over");
            } else {
                println!(
                    "need exactly {TARGET_COUNT} values ({} selected)",
                    api.state().selection.len()
                );
            }
            report_persistence(&api);
        }
        Some("board") => {
            let api = open_api()?;
            print_board(&api);
        }
        Some("name") => {
            let cell_arg = args.get(2).ok_or_else(|| "missing cell index".to_string())?;
            if args.len() < 4 {
                return Err("missing person name".to_string());
            }
            let name = args[3..].join(" ");
            let mut api = open_api()?;
            let cell_id = resolve_cell_id(&api, cell_arg)?;
            if api.set_name(&cell_id, &name) {
                println!("filled {}/{}", api.state().filled_count(), TARGET_COUNT);
            } else {
                println!("nothing changed");
            }
            report_persistence(&api);
        }
        Some("clear") => {
            let cell_arg = args.get(2).ok_or_else(|| "missing cell index".to_string())?;
            let mut api = open_api()?;
            let cell_id = resolve_cell_id(&api, cell_arg)?;
            if api.clear_name(&cell_id) {
                println!("filled {}/{}", api.state().filled_count(), TARGET_COUNT);
            } else {
                println!("nothing changed");
            }
            report_persistence(&api);
        }
        Some("share") => {
            let api = open_api()?;
            run_share(&api, args.get(2))?;
        }
        Some("export") => {
            let api = open_api()?;
            run_export(&api, args.get(2))?;
        }
        Some("reset") => {
            let mut api = open_api()?;
            api.reset();
            println!("board cleared; back to setup");
            report_persistence(&api);
        }
        _ => {
            print_usage();
        }
    }

    Ok(())
}

fn main() {
    let args: Vec<String> = env::args().collect();
    if let Err(err) = run(&args) {
        eprintln!("error: {err}");
        print_usage();
        std::process::exit(2);
    }
}
