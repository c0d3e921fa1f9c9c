use clap::{Parser, ValueEnum};
use idastar::bfs::{BestFirstConfig, BestFirstSearch, FrontierOrdering};
use idastar::ida::{IdaStar, IdaStarConfig, DEFAULT_BOUND_FACTOR};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Engine {
    Dijkstra,
    Astar,
    Idastar,
}

#[derive(Parser)]
#[command(about = "Search a small 4-connected grid with a wall in the middle")]
struct Args {
    #[arg(long, value_enum, default_value = "astar")]
    engine: Engine,
    #[arg(long, default_value_t = 8)]
    size: i32,
    #[arg(long, default_value_t = DEFAULT_BOUND_FACTOR)]
    bound_factor: f64,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();
    let args = Args::parse();
    let size = args.size.max(7);

    // Wall at x = 4 that leaves the top two rows open.
    let passable = |x: i32, y: i32| {
        (0..size).contains(&x) && (0..size).contains(&y) && (x != 4 || y >= size - 2)
    };

    for y in (0..size).rev() {
        for x in 0..size {
            if passable(x, y) {
                print!(".")
            } else {
                print!("#")
            }
        }
        println!();
    }

    let start = (2, 2);
    let target = (6, 2);

    let distance = |_: &(i32, i32), _: &(i32, i32)| 1.0;
    let heuristic =
        |&(x, y): &(i32, i32)| f64::from((target.0 - x).abs() + (target.1 - y).abs());
    let neighbors = |&(x, y): &(i32, i32)| -> Vec<(i32, i32)> {
        [(x + 1, y), (x - 1, y), (x, y + 1), (x, y - 1)]
            .into_iter()
            .filter(|&(x, y)| passable(x, y))
            .collect()
    };

    let best_first = |ordering: FrontierOrdering| {
        let mut search = BestFirstSearch::new(BestFirstConfig::default().with_ordering(ordering));
        let result = search.find_path(start, &target, distance, heuristic, neighbors);
        (result, search.statistics().clone())
    };

    let (result, statistics) = match args.engine {
        Engine::Dijkstra => best_first(FrontierOrdering::Uniform),
        Engine::Astar => best_first(FrontierOrdering::CostPlusHeuristic),
        Engine::Idastar => {
            let mut search =
                IdaStar::new(IdaStarConfig::default().with_bound_factor(args.bound_factor));
            let result = search.find_path(start, &target, distance, heuristic, neighbors);
            (result, search.statistics().clone())
        }
    };

    info!(
        expanded_nodes = statistics.expanded_nodes(),
        iterations = statistics.iterations(),
        "search done"
    );

    match result {
        Ok(Some(path)) => {
            println!("found path of cost {}", path.cost());
            println!("{:?}", path.nodes());
        }
        Ok(None) => println!("failed to find path"),
        Err(err) => println!("search failed: {err}"),
    }
}
