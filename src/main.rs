use {
    amphipod::*,
    clap::Parser,
    std::{
        io::{read_to_string, stdin},
        process::exit,
    },
};

/// Parses the burrow, prints the minimum organizing energy (or -1 when no legal move sequence
/// organizes it), and returns the process exit code.
fn run(input: &str, verbose: bool) -> i32 {
    match Burrow::try_from(input) {
        Ok(burrow) => {
            match try_organize(&burrow) {
                Some((path, energy)) => {
                    if verbose {
                        for (index, state) in path.into_iter().enumerate() {
                            println!("State {index}:\n{state}");
                        }
                    }

                    println!("{energy}");
                }
                // Unsolvable is a legitimate answer, not an error
                None => println!("-1"),
            }

            0_i32
        }
        Err(error) => {
            eprintln!("Failed to parse burrow:\n{error:#?}");

            2_i32
        }
    }
}

fn main() {
    let args: Args = Args::parse();
    let mut exit_code: i32 = 1_i32;

    if args.input_file_path.is_empty() {
        match read_to_string(stdin()) {
            Ok(input) => exit_code = run(&input, args.verbose),
            Err(error) => eprintln!("Failed to read standard input:\n{error}"),
        }
    } else {
        // SAFETY: This isn't truly safe, we're just hoping nobody touches our file before we're
        // done parsing it
        let open_result: std::io::Result<()> = unsafe {
            open_utf8_file(&args.input_file_path, |input| {
                exit_code = run(input, args.verbose)
            })
        };

        if let Err(error) = open_result {
            eprintln!(
                "Failed to open UTF-8 file \"{}\":\n{error}",
                args.input_file_path
            );
        }
    }

    exit(exit_code);
}
