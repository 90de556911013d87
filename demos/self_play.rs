//! Engine-vs-engine demo.
//!
//! Plays both sides of a 3x3 game with a fresh search per move, rendering
//! the board between moves. Run with `RUST_LOG=debug` to see per-move
//! search statistics:
//!
//! ```bash
//! RUST_LOG=debug cargo run --example self_play
//! ```

use connectk_mcts::{Board, Mcts, MctsConfig, MctsError};

fn main() -> Result<(), MctsError> {
    env_logger::init();

    let mut board = Board::new(3, 3)?;
    let config = MctsConfig::incremental().with_max_iterations(2_000);

    println!("{board}");
    while !board.is_terminal() {
        let mover = board.to_move();
        let mut mcts = Mcts::new(board.clone(), config.clone())?;
        let coord = mcts.search()?;
        println!("\n{mover} plays {coord}");
        board = board.apply(coord)?;
        println!("{board}");
    }

    match board.winner() {
        Some(winner) => println!("\n{winner} wins!"),
        None => println!("\nThe game is a draw."),
    }
    Ok(())
}
