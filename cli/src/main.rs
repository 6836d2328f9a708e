use clap::{arg, command, Parser, Subcommand};
use crossterm::{
    cursor::{MoveLeft, MoveRight, MoveUp},
    execute,
    style::{Attribute, Color as TermColor, SetBackgroundColor, Stylize},
};
use min2phase::{
    cubie::CubieCube,
    error::Error,
    facelet::{Color, FaceCube},
    scramble::{gen_scramble, scramble_from_str, scramble_to_str},
    solver::{
        solve as solver, APPEND_LENGTH, INVERSE_SOLUTION, OPTIMAL_SOLUTION, USE_SEPARATOR,
    },
};
use spinners::Spinner;
use std::{
    io::{self, stdout},
    time::Instant,
};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
#[command(arg_required_else_help(true))]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    #[command(about = "solves the cube using the two-phase algorithm")]
    #[clap(group(
    clap::ArgGroup::new("state")
        .required(true)
        .args(&["scramble", "facelet"]),
    ))]
    Solve {
        #[arg(short, long)]
        scramble: Option<String>,

        #[arg(short, long)]
        facelet: Option<String>,

        #[arg(short, long, default_value_t = 21)]
        max: i8,

        #[arg(long, default_value_t = 100_000_000)]
        probe_max: i32,

        #[arg(long, default_value_t = 0)]
        probe_min: i32,

        #[arg(long, help = "separate the two phases of the solution with a dot")]
        separator: bool,

        #[arg(short, long, help = "print the inverse maneuver, i.e. a scramble")]
        inverse: bool,

        #[arg(short, long, help = "append the move count")]
        append_length: bool,

        #[arg(short, long, help = "search for an optimal solution (slow)")]
        optimal: bool,

        #[arg(short, long)]
        preview: bool,
    },

    #[command(about = "generates a random-state scramble")]
    Scramble {
        #[arg(short, long)]
        preview: bool,
    },
}

struct SolveArgs {
    max: i8,
    probe_max: i32,
    probe_min: i32,
    verbose: u8,
    preview: bool,
}

fn solve(scramble: &Option<String>, facelet: &Option<String>, args: SolveArgs) -> Result<(), Error> {
    let facelet = if let Some(scramble) = scramble {
        let moves = scramble_from_str(scramble)?;
        CubieCube::SOLVED.apply_moves(&moves).to_string()
    } else if let Some(facelet) = facelet {
        facelet.clone()
    } else {
        return Ok(());
    };
    if args.preview {
        let fc = FaceCube::try_from(facelet.as_str())?;
        print_facelet(&fc)?;
    }

    let start = Instant::now();
    let mut spinner = Spinner::new(spinners::Spinners::Dots, "Solving".to_owned());
    let result = solver(&facelet, args.max, args.probe_max, args.probe_min, args.verbose)?;
    let end = Instant::now();

    spinner.stop_with_newline();

    println!("Solution: {}", result);
    if args.verbose & (USE_SEPARATOR | APPEND_LENGTH) == 0 {
        println!("Move count: {}", scramble_from_str(&result)?.len());
    }
    println!("Total time: {:?}", end - start);

    Ok(())
}

fn color_to_termcolor(color: Color) -> TermColor {
    match color {
        Color::U => TermColor::DarkYellow,
        Color::R => TermColor::Magenta,
        Color::F => TermColor::Green,
        Color::D => TermColor::White,
        Color::L => TermColor::Red,
        Color::B => TermColor::Blue,
    }
}

fn print_face(face: &[Color], offset: u16) -> Result<(), io::Error> {
    for i in 0..3 {
        let layer = format!(
            "{}  {}  {}  {}",
            SetBackgroundColor(color_to_termcolor(face[3 * i])),
            SetBackgroundColor(color_to_termcolor(face[(3 * i) + 1])),
            SetBackgroundColor(color_to_termcolor(face[(3 * i) + 2])),
            SetBackgroundColor(TermColor::Reset)
        );

        println!("{layer}");

        if offset != 0 {
            execute!(stdout(), MoveRight(offset))?;
        }
    }

    Ok(())
}

fn print_facelet(facelet: &FaceCube) -> Result<(), io::Error> {
    let stdout = stdout();

    println!();
    execute!(&stdout, MoveRight(6))?;
    print_face(&facelet.f[0..9], 6)?; // U
    execute!(&stdout, MoveLeft(6))?;
    print_face(&facelet.f[36..45], 0)?; // L
    execute!(&stdout, MoveRight(6), MoveUp(3))?;
    print_face(&facelet.f[18..27], 6)?; // F
    execute!(&stdout, MoveLeft(12), MoveUp(3), MoveRight(12))?;
    print_face(&facelet.f[9..18], 12)?; // R
    execute!(&stdout, MoveLeft(12), MoveUp(3), MoveRight(18))?;
    print_face(&facelet.f[45..54], 18)?; // B
    execute!(&stdout, MoveLeft(12))?;
    print_face(&facelet.f[27..36], 6)?; // D
    execute!(&stdout, MoveLeft(12))?;
    println!();

    Ok(())
}

fn scramble(preview: bool) -> Result<(), Error> {
    let ss = gen_scramble()?;
    let cc = CubieCube::SOLVED.apply_moves(&ss);
    let fc = FaceCube::try_from(&cc)?;
    println!("Scramble: {}", scramble_to_str(&ss));
    if preview {
        print_facelet(&fc)?;
    }
    Ok(())
}

fn main() {
    let program = Cli::parse();

    let result = match &program.command {
        Some(Commands::Solve {
            scramble,
            facelet,
            max,
            probe_max,
            probe_min,
            separator,
            inverse,
            append_length,
            optimal,
            preview,
        }) => {
            let mut verbose = 0u8;
            if *separator {
                verbose |= USE_SEPARATOR;
            }
            if *inverse {
                verbose |= INVERSE_SOLUTION;
            }
            if *append_length {
                verbose |= APPEND_LENGTH;
            }
            if *optimal {
                verbose |= OPTIMAL_SOLUTION;
            }
            solve(
                scramble,
                facelet,
                SolveArgs {
                    max: *max,
                    probe_max: *probe_max,
                    probe_min: *probe_min,
                    verbose,
                    preview: *preview,
                },
            )
        }
        Some(Commands::Scramble { preview }) => scramble(*preview),
        _ => Ok(()),
    };

    if let Err(error) = result {
        let styled = "Error:".with(TermColor::Red).attribute(Attribute::Bold);
        println!("{styled} {error}");
    }
}
