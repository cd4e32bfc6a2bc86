//! Shell completions and man pages, generated from the clap definition.

use std::io::Write;
use std::path::{Path, PathBuf};

use clap::CommandFactory;

use crate::Cli;

const BIN_NAME: &str = "git-provider";

fn write_completions(shell: clap_complete::Shell, out: &mut dyn Write) {
    clap_complete::generate(shell, &mut Cli::command(), BIN_NAME, out);
}

fn write_man_page(out: &mut dyn Write) -> std::io::Result<()> {
    clap_mangen::Man::new(Cli::command()).render(out)
}

/// Write the main page plus one page per subcommand into `dir`.
///
/// Returns the generated files, sorted.
fn write_man_pages(dir: &Path) -> std::io::Result<Vec<PathBuf>> {
    std::fs::create_dir_all(dir)?;
    clap_mangen::generate_to(Cli::command(), dir)?;

    let mut pages = std::fs::read_dir(dir)?
        .map(|entry| entry.map(|e| e.path()))
        .collect::<std::io::Result<Vec<_>>>()?;
    pages.sort();
    Ok(pages)
}

pub(crate) fn handle_completions(
    shell: clap_complete::Shell,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut stdout = std::io::stdout().lock();
    write_completions(shell, &mut stdout);
    stdout.flush()?;
    Ok(())
}

pub(crate) fn handle_man(out_dir: Option<PathBuf>) -> Result<(), Box<dyn std::error::Error>> {
    match out_dir {
        Some(dir) => {
            let pages = write_man_pages(&dir)?;
            tracing::debug!(count = pages.len(), "Wrote man pages");
            println!("Generated {} man pages in: {}", pages.len(), dir.display());
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            write_man_page(&mut stdout)?;
            stdout.flush()?;
        }
    }

    Ok(())
}
