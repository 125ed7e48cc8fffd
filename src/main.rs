use std::time::Instant;

use clap::{arg, command, value_parser, Arg, ArgMatches, Command};
use tabled::settings::Style;
use tabled::Table;
use tabled::Tabled;
use tracing::{info, Level};

use xxl_chess::chess_boards::perft::perft_divide;
use xxl_chess::chess_boards::xxl_board::{Color, PromotionRule, XxlBoard, STARTING_POSITION};
use xxl_chess::engines::{AlphaBetaEngine, MinMaxEngine, SearchConfig, SearchEngine};
use xxl_chess::game::Game;

const DEFAULT_DEPTH: &str = "3";

fn layout_arg() -> Arg {
    arg!(-l --layout [FILE] "Board layout file, the standard position if omitted")
}

fn depth_arg(default: &'static str) -> Arg {
    arg!(-x --depth <d> "depth")
        .default_value(default)
        .value_parser(value_parser!(i32))
}

fn color_arg() -> Arg {
    arg!(-c --color <COLOR> "Side to move")
        .default_value("white")
        .value_parser(["white", "black"])
}

fn main() {
    let matches = command!()
        .version("v0.1.0")
        .propagate_version(true)
        .arg(arg!(
            -d --debug "Turn debugging information on"
        ))
        .arg(arg!(--"far-rank" "Promote pawns on the opponent's back rank only").global(true))
        .subcommand(
            Command::new("best-move")
                .about("Search the best move for one side")
                .arg(layout_arg())
                .arg(depth_arg(DEFAULT_DEPTH))
                .arg(color_arg())
                .arg(arg!(--minmax "Use the exhaustive minimax engine")),
        )
        .subcommand(
            Command::new("play")
                .about("Let the engine play against itself")
                .arg(layout_arg())
                .arg(depth_arg("2"))
                .arg(
                    arg!(-n --"max-plies" <n> "Stop after this many plies")
                        .default_value("20")
                        .value_parser(value_parser!(usize)),
                ),
        )
        .subcommand(
            Command::new("benchmark")
                .about("Runs a benchmark")
                .arg(depth_arg("4")),
        )
        .subcommand(
            Command::new("perft")
                .about("Run Perft test")
                .arg(layout_arg())
                .arg(
                    arg!(
                    -x --depth <d> "depth"
                            )
                    .default_value("2")
                    .value_parser(value_parser!(u8)),
                )
                .arg(color_arg()),
        )
        .get_matches();

    let level = if matches.get_flag("debug") { Level::DEBUG } else { Level::INFO };
    tracing_subscriber::fmt().with_max_level(level).init();

    let promotion_rule = if matches.get_flag("far-rank") {
        PromotionRule::FarRank
    } else {
        PromotionRule::Legacy
    };

    match matches.subcommand() {
        Some(("best-move", arg_matches)) => {
            let board = load_board(arg_matches, promotion_rule);
            let config = SearchConfig::new(depth(arg_matches), color(arg_matches));
            best_move(&board, config, arg_matches.get_flag("minmax"));
        }
        Some(("play", arg_matches)) => {
            let board = load_board(arg_matches, promotion_rule);
            let max_plies = arg_matches.get_one::<usize>("max-plies").copied().unwrap_or(20);
            play(board, depth(arg_matches), max_plies);
        }
        Some(("benchmark", arg_matches)) => {
            benchmark(depth(arg_matches));
        }
        Some(("perft", arg_matches)) => {
            let board = load_board(arg_matches, promotion_rule);
            let depth = arg_matches.get_one::<u8>("depth").copied().unwrap_or(2);
            perft(&board, color(arg_matches), depth);
        }
        None => {
            let board = STARTING_POSITION.clone().with_promotion_rule(promotion_rule);
            best_move(&board, SearchConfig::default(), false);
        }
        _ => unreachable!("Exhausted list of subcommands"),
    }
}

fn load_board(arg_matches: &ArgMatches, promotion_rule: PromotionRule) -> XxlBoard {
    let board = match arg_matches.get_one::<String>("layout") {
        Some(path) => {
            info!(path = %path, "loading layout");
            XxlBoard::load_from_file(path)
        }
        None => STARTING_POSITION.clone(),
    };
    board.with_promotion_rule(promotion_rule)
}

fn depth(arg_matches: &ArgMatches) -> i32 {
    arg_matches.get_one::<i32>("depth").copied().unwrap_or(3)
}

fn color(arg_matches: &ArgMatches) -> Color {
    match arg_matches.get_one::<String>("color").map(String::as_str) {
        Some("black") => Color::Black,
        _ => Color::White,
    }
}

fn best_move(board: &XxlBoard, config: SearchConfig, minmax: bool) {
    let engine: Box<dyn SearchEngine> = if minmax {
        Box::new(MinMaxEngine::new(config))
    } else {
        Box::new(AlphaBetaEngine::new(config))
    };
    println!("{}", board.render_to_string());

    let start_time = Instant::now();
    match engine.find_best_move(board) {
        Some(result) => {
            println!(
                "{} ({} to move, depth {}): best move {} with score {} evaluated nodes: {} in {:.3}s",
                engine.name(),
                config.color,
                config.depth,
                result.best_move,
                result.score,
                result.node_count,
                start_time.elapsed().as_secs_f32()
            );
        }
        None => println!("No best move found!"),
    }
}

fn play(board: XxlBoard, depth: i32, max_plies: usize) {
    let mut game = Game::new(board, depth);
    println!("{}", game.board().render_to_string());

    for ply in 1..=max_plies {
        let side = game.turn();
        match game.play_ai_turn() {
            Ok(Some(mv)) => {
                println!("{}. {}: {}", ply, side, mv);
                println!("{}", game.board().render_to_string());
            }
            Ok(None) => {
                println!("{} has no move left", side);
                break;
            }
            Err(err) => {
                println!("{}", err);
                break;
            }
        }
    }

    match game.outcome() {
        Some(outcome) => println!("{}", outcome),
        None => println!("No decision after {} plies", max_plies),
    }
}

#[derive(Tabled)]
struct BenchmarkRow {
    engine: String,
    ply: i32,
    score: i64,
    node_count: u64,
    elapsed_time: f32,
    knodes_per_sec: f32,
    best_move: String,
}

fn benchmark(max_depth: i32) {
    let board = &*STARTING_POSITION;
    let mut table_rows = Vec::new();
    for d in 1..=max_depth {
        let config = SearchConfig::new(d, Color::White);
        let engines: [Box<dyn SearchEngine>; 2] =
            [Box::new(AlphaBetaEngine::new(config)), Box::new(MinMaxEngine::new(config))];

        let mut too_slow = false;
        for engine in engines {
            let start_time = Instant::now();
            if let Some(result) = engine.find_best_move(board) {
                let elapsed = start_time.elapsed();
                table_rows.push(BenchmarkRow {
                    engine: engine.name().to_string(),
                    ply: d,
                    score: result.score,
                    node_count: result.node_count,
                    elapsed_time: elapsed.as_secs_f32(),
                    knodes_per_sec: result.node_count as f32 / elapsed.as_secs_f32() / 1000f32,
                    best_move: result.best_move.to_string(),
                });
                too_slow |= elapsed.as_secs() > 10;
            } else {
                println!("No best move found!");
            }
        }
        if too_slow {
            break;
        }
    }
    println!("{}", Table::new(table_rows).with(Style::modern()));
}

fn perft(board: &XxlBoard, color: Color, depth: u8) {
    println!("Perft test for {} with depth {}", color, depth);
    println!("{}", board.render_to_string());

    let mut num_nodes = 0;
    for (mv, count) in perft_divide(board, color, depth) {
        println!("{}: {}", mv, count);
        num_nodes += count;
    }
    println!("\nNodes searched: {}", num_nodes);
}
