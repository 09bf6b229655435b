use std::path::PathBuf;
use std::process;

use clap::Parser;
use shredder::{
    config::DEFAULT_BUFFER_SIZE, ShredAllOptions, ShredStrategy, ShredTarget, Shredder,
    ShredderConfig,
};

/// a secure file deletion tool that says Auf Wiedersen to your files
#[derive(Parser)]
#[command(name = "shred")]
#[command(author = "alake <g4titan1@gmail.com>")]
#[command(version)]
#[command(about = "A secure file deletion tool that says Auf Wiedersen to your files")]
#[command(long_about = "Overwrites files with zero, one and random byte passes so their contents cannot be read back from disk, then optionally removes them.")]
struct Cli {
    /// files to shred, or a single directory whose files should be shredded
    #[arg(required = true, help = "Files to shred, or a single directory")]
    paths: Vec<PathBuf>,

    /// overwrite strategy
    #[arg(short, long, default_value = "composite",
          help = "Overwrite strategy (composite, ones, zeros, random)",
          long_help = "Available strategies:\n  composite - zeros, then ones, then random data (default)\n  ones - single pass of 0xFF bytes\n  zeros - single pass of 0x00 bytes\n  random - single pass of random bytes")]
    strategy: String,

    /// how many times the whole strategy runs on each file
    #[arg(short = 'n', long, default_value_t = 1,
          help = "Number of times the whole strategy is repeated")]
    passes: u32,

    /// write buffer size in bytes
    #[arg(short, long, default_value_t = DEFAULT_BUFFER_SIZE,
          help = "Write buffer size in bytes")]
    buffer_size: usize,

    /// descend into subdirectories
    #[arg(short, long, help = "Also shred files in subdirectories of a directory target")]
    recursive: bool,

    /// remove files after overwriting them
    #[arg(short, long, help = "Remove each file after it has been overwritten")]
    unlink: bool,

    /// read deterministic passes back after writing them
    #[arg(long, help = "Read zero and one passes back to check they reached the file")]
    verify: bool,

    /// only list the files that would be shredded
    #[arg(long, help = "List the files that would be shredded and exit")]
    dry_run: bool,

    /// force operation without confirmation
    #[arg(short, long,
          help = "Force operation without confirmation",
          long_help = "Skip the 'Auf Wiedersen' confirmation prompt. Use with caution!")]
    force: bool,
}

fn confirm_operation(count: usize, force: bool) -> bool {
    if force {
        return true;
    }

    println!("🔥 Preparing to shred {} file(s)", count);
    println!("⚠️  WARNING: This operation is irreversible!");
    println!("Type 'Auf Wiedersen' to confirm:");

    let mut input = String::new();
    if std::io::stdin().read_line(&mut input).is_err() {
        return false;
    }

    input.trim() == "Auf Wiedersen"
}

/// a lone directory goes through the lister, anything else is an explicit list
fn build_target(mut paths: Vec<PathBuf>) -> ShredTarget {
    if paths.len() == 1 && paths[0].is_dir() {
        ShredTarget::Path(paths.remove(0))
    } else {
        ShredTarget::List(paths)
    }
}

fn main() {
    // initialize logger
    env_logger::init();

    // parse command line arguments
    let cli = Cli::parse();

    let strategy: ShredStrategy = match cli.strategy.parse() {
        Ok(strategy) => strategy,
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    };

    let config = ShredderConfig::default()
        .with_strategy(strategy)
        .with_pass_count(cli.passes)
        .with_buffer_size(cli.buffer_size)
        .with_verify(cli.verify)
        .with_log(|line: &str| println!("{}", line));

    let shredder = match Shredder::new(config) {
        Ok(shredder) => shredder,
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    };

    let target = build_target(cli.paths);
    let files = match shredder.targets(&target, cli.recursive) {
        Ok(files) => files,
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    };

    if cli.dry_run {
        for file in &files {
            println!("{}", file.display());
        }
        process::exit(0);
    }

    // get confirmation unless --force is used
    if !confirm_operation(files.len(), cli.force) {
        println!("Operation cancelled. Your files live another day.");
        process::exit(0);
    }

    println!("☠️  Initiating secure deletion...");
    let options = ShredAllOptions {
        recursive: cli.recursive,
        unlink: cli.unlink,
    };
    match shredder.shred_all(files, options) {
        Ok(()) => {
            println!("✨ Files have been securely shredded!");
            process::exit(0);
        }
        Err(e) => {
            eprintln!("Error during secure deletion: {}", e);
            eprintln!("⚠️  WARNING: Some files may not have been completely shredded!");
            process::exit(1);
        }
    }
}
