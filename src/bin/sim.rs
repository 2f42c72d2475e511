use battleship_solver::{BeliefEngine, BoardSpace, SpaceConfig, Strategy};
use rand::{rngs::SmallRng, SeedableRng};
use serde_json::{json, Map, Value};

fn main() -> anyhow::Result<()> {
    let args: Vec<String> = std::env::args().collect();
    if args.len() != 2 {
        eprintln!("Usage: {} <seed>", args[0]);
        std::process::exit(1);
    }
    let seed: u64 = args[1].parse()?;
    let mut rng = SmallRng::seed_from_u64(seed);

    let space = BoardSpace::new(SpaceConfig::default())?;
    let board_id = space.random_board_id(&mut rng);

    let mut guesses = Map::new();
    for strategy in Strategy::ALL {
        let mut engine = BeliefEngine::for_board(&space, board_id, strategy)?;
        let n = engine.autoplay(&mut rng)?;
        guesses.insert(strategy.name().to_string(), Value::from(n));
    }

    let result = json!({
        "boards": space.len(),
        "board_id": board_id,
        "guesses": guesses,
    });
    println!("{}", serde_json::to_string(&result)?);
    Ok(())
}
