use docopt::Docopt;
use log::info;
use serde_derive::Deserialize;
use wall_mazes::{
    config::MazeConfig,
    events::MazeEvent,
    grid::Grid,
    grid_displays::{GridRender, PathDisplay},
    maze::Maze,
};
use std::{
    io,
    io::prelude::*,
    fs::File,
};

const USAGE: &str = "Wall mazes

Usage:
    maze_driver -h | --help
    maze_driver [--config=<path>] [--rows=<n>] [--columns=<n>] [--seed=<n>] [--no-solve] [--trace-events] [--text-out=<path>] [--save-edges=<path>]

Options:
    -h --help              Show this screen.
    --config=<path>        JSON file with any of: rows, columns, seed, solve. Flags given on the command line take precedence.
    --rows=<n>             Number of rows, 1 to 40. Defaults to 20.
    --columns=<n>          Number of columns, 1 to 40. Defaults to 20.
    --seed=<n>             Seed for a reproducible maze. Random if not specified.
    --no-solve             Carve the maze but do not search for the exit.
    --trace-events         Print every wall removal and traced path segment in the order it happened.
    --text-out=<path>      Output file path for a textual rendering of the maze, instead of standard output.
    --save-edges=<path>    Serialize the maze to a text file: each line is a pair of numbers. Line 1: n(#vertices) m(#edges). Line 2+ edge between vertices. Uses 1-based vertex indices.
";
#[derive(Debug, Deserialize)]
struct MazeArgs {
    flag_config: Option<String>,
    flag_rows: Option<usize>,
    flag_columns: Option<usize>,
    flag_seed: Option<u64>,
    flag_no_solve: bool,
    flag_trace_events: bool,
    flag_text_out: String,
    flag_save_edges: String,
}

mod errors {
    use error_chain::*;
    error_chain! {

        foreign_links {
            DocOptFailure(::docopt::Error);
            Io(::std::io::Error);
            Config(::wall_mazes::config::ConfigError);
            Grid(::wall_mazes::grid::GridError);
            Maze(::wall_mazes::maze::MazeError);
        }
    }
}
use crate::errors::*;

fn main() -> Result<()> {
    env_logger::init();

    let args: MazeArgs = Docopt::new(USAGE).and_then(|d| d.deserialize())?;
    let config = maze_config_from_args(&args)?;
    info!("maze config {:?}", config);

    let mut maze = Maze::new(&config)?;
    let mut events: Vec<MazeEvent> = Vec::new();
    let path = maze.run(&mut events)?;

    if args.flag_trace_events {
        let stdout = io::stdout();
        let mut handle = stdout.lock();
        for event in &events {
            writeln!(handle, "{}", event)?;
        }
    }

    if !args.flag_save_edges.is_empty() {
        save_maze_graph(maze.grid(), &args.flag_save_edges)?;
    }

    let path_display = path.as_ref().map(|p| PathDisplay::new(p));
    let mut render = GridRender::new(maze.grid());
    if let Some(ref display) = path_display {
        render = render.with_display(display);
    }

    if args.flag_text_out.is_empty() {
        println!("{}", render);
    } else {
        write_text_to_file(&render.to_string(), &args.flag_text_out)
            .chain_err(|| format!("Failed to write maze to text file {}", args.flag_text_out))?;
    }

    Ok(())
}

/// Defaults, overlaid by the config file if any, overlaid by the command line flags.
fn maze_config_from_args(args: &MazeArgs) -> Result<MazeConfig> {
    let mut config = match args.flag_config {
        Some(ref path) => {
            MazeConfig::from_json_file(path)
                .chain_err(|| format!("Failed to load maze config {}", path))?
        }
        None => MazeConfig::default(),
    };

    if let Some(rows) = args.flag_rows {
        config.rows = rows;
    }
    if let Some(columns) = args.flag_columns {
        config.columns = columns;
    }
    if args.flag_seed.is_some() {
        config.seed = args.flag_seed;
    }
    if args.flag_no_solve {
        config.solve = false;
    }

    config.validate()?;
    Ok(config)
}

fn write_text_to_file(data: &str, file_name: &str) -> io::Result<()> {
    let mut f = File::create(file_name)?;
    f.write_all(data.as_bytes())?;
    Ok(())
}

fn save_maze_graph(maze_grid: &Grid, file_path: &str) -> Result<()> {

    let graph = maze_grid.passage_graph();
    let mut graph_data = String::new();
    graph_data.push_str(graph.node_count().to_string().as_ref());
    graph_data.push(' ');
    graph_data.push_str(graph.edge_count().to_string().as_ref());
    graph_data.push('\n');

    for edge in graph.raw_edges() {
        let src_as_1_based_index = edge.source().index() + 1;
        let dst_as_1_based_index = edge.target().index() + 1;

        graph_data.push_str(src_as_1_based_index.to_string().as_ref());
        graph_data.push(' ');
        graph_data.push_str(dst_as_1_based_index.to_string().as_ref());
        graph_data.push('\n');
    }

    write_text_to_file(&graph_data, file_path)
        .chain_err(|| format!("Failed to write maze graph to text file {}", file_path))?;

    Ok(())
}
