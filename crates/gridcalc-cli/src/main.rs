//! gridcalc CLI - formula evaluation over CSV sheets

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use gridcalc::prelude::*;
use gridcalc::{
    classify, evaluate, parse_formula, Builtin, CellContent, CsvReadOptions, CsvWriteOptions,
};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "gridcalc")]
#[command(author, version, about = "Spreadsheet formula evaluation tool")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Evaluate a single formula and print the result
    Eval {
        /// Formula, with or without the leading '='
        formula: String,

        /// CSV sheet the formula's references are read from (default: an empty 12x8 sheet)
        #[arg(short, long)]
        grid: Option<PathBuf>,
    },

    /// List the built-in functions and their argument counts
    Functions,

    /// Calculate every cell of a CSV sheet and write the displayed values
    #[command(alias = "calc")]
    Recalc {
        /// Input CSV file
        input: PathBuf,

        /// Output CSV file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Write a column-letter header row (A, B, C, ...)
        #[arg(long)]
        header: bool,

        /// Field delimiter (default: comma)
        #[arg(short, long, default_value = ",")]
        delimiter: char,
    },

    /// Print the value of one cell
    Cell {
        /// Input CSV file
        input: PathBuf,

        /// Cell address, e.g. B3
        address: String,
    },

    /// Show information about a CSV sheet
    Info {
        /// Input CSV file
        input: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Eval { formula, grid } => eval(&formula, grid.as_deref()),
        Commands::Functions => list_functions(),
        Commands::Recalc {
            input,
            output,
            header,
            delimiter,
        } => recalc(&input, output.as_deref(), header, delimiter),
        Commands::Cell { input, address } => show_cell(&input, &address),
        Commands::Info { input } => show_info(&input),
    }
}

fn delimiter_byte(delimiter: char) -> Result<u8> {
    if !delimiter.is_ascii() {
        bail!("Delimiter must be a single ASCII character, got '{}'", delimiter);
    }
    Ok(delimiter as u8)
}

fn open_grid(input: &Path, delimiter: u8) -> Result<Grid> {
    let options = CsvReadOptions {
        delimiter,
        ..Default::default()
    };
    CsvReader::read_file(input, &options)
        .with_context(|| format!("Failed to open '{}'", input.display()))
}

fn eval(formula: &str, grid: Option<&Path>) -> Result<()> {
    let grid = match grid {
        Some(path) => open_grid(path, b',')?,
        None => Grid::default(),
    };

    println!("{}", eval_formula(formula, &grid));
    Ok(())
}

/// Evaluate a formula given on the command line; its ranges are clamped to `grid`
fn eval_formula(formula: &str, grid: &Grid) -> Value {
    let body = match classify(formula) {
        CellContent::Formula(body) => body,
        CellContent::Literal(text) => text,
    };
    evaluate(body, &mut GridEvaluator::new(grid))
}

fn list_functions() -> Result<()> {
    for line in function_table() {
        println!("{}", line);
    }
    Ok(())
}

fn function_table() -> Vec<String> {
    Builtin::ALL
        .iter()
        .map(|builtin| {
            let def = builtin.def();
            let max = def
                .max_args
                .map_or_else(|| "any".to_string(), |max| max.to_string());
            format!("{:<12} {}..{}", builtin.name(), def.min_args, max)
        })
        .collect()
}

fn recalc(input: &Path, output: Option<&Path>, header: bool, delimiter: char) -> Result<()> {
    let delimiter = delimiter_byte(delimiter)?;
    let grid = open_grid(input, delimiter)?;

    let calculated = grid.calculate();
    let stats = calculated.stats();
    eprintln!(
        "Calculated {} formulas ({} errors, {} circular)",
        stats.formula_count, stats.errors, stats.circular_references
    );

    let options = CsvWriteOptions {
        delimiter,
        write_header: header,
        ..Default::default()
    };
    let rows = calculated.display_rows();

    if let Some(output_path) = output {
        let file = std::fs::File::create(output_path)
            .with_context(|| format!("Failed to create '{}'", output_path.display()))?;
        CsvWriter::write_rows(&rows, file, &options)
            .with_context(|| format!("Failed to write '{}'", output_path.display()))?;
        eprintln!("Wrote {} rows to '{}'", rows.len(), output_path.display());
    } else {
        let stdout = io::stdout();
        let mut lock = stdout.lock();
        CsvWriter::write_rows(&rows, &mut lock, &options).context("Failed to write to stdout")?;
        lock.flush().context("Failed to write to stdout")?;
    }

    Ok(())
}

fn show_cell(input: &Path, address: &str) -> Result<()> {
    let grid = open_grid(input, b',')?;
    let addr = CellAddress::parse(address)
        .with_context(|| format!("Invalid cell address '{}'", address))?;
    if !grid.contains(addr) {
        bail!(
            "Cell {} is outside the {}x{} sheet",
            addr,
            grid.row_count(),
            grid.col_count()
        );
    }

    println!("{}", GridEvaluator::new(&grid).display_cell(addr.row, addr.col));
    Ok(())
}

fn show_info(input: &Path) -> Result<()> {
    let grid = open_grid(input, b',')?;
    let stats = grid.calculate().stats().clone();

    println!("File: {}", input.display());
    println!(
        "Size: {} rows x {} columns ({})",
        grid.row_count(),
        grid.col_count(),
        grid.bounds()
    );
    println!("Non-blank cells: {}", grid.non_blank_count());
    println!("Formulas: {}", stats.formula_count);
    println!("  Errors: {}", stats.errors);
    println!("  Circular: {}", stats.circular_references);

    for (addr, text) in grid.formula_cells() {
        println!("  {} {}{}", addr, text.trim(), describe_references(text));
    }

    Ok(())
}

/// The cells and ranges a formula reads, e.g. `  <- A1:B2, C3`
fn describe_references(text: &str) -> String {
    let CellContent::Formula(body) = classify(text) else {
        return String::new();
    };

    match parse_formula(body) {
        Ok(expr) => {
            let refs: Vec<String> = expr.references().iter().map(ToString::to_string).collect();
            if refs.is_empty() {
                String::new()
            } else {
                format!("  <- {}", refs.join(", "))
            }
        }
        Err(e) => format!("  (does not parse: {})", e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_eval_without_grid_clamps_ranges() {
        let empty = Grid::default();
        assert_eq!(eval_formula("=1+2", &empty), Value::Number(3.0));
        assert_eq!(eval_formula("SUM(A1:ZZZ9999999)", &empty), Value::Number(0.0));
        assert_eq!(eval_formula("COUNTA(A1:ZZZ9999999)", &empty), Value::Number(0.0));
        assert_eq!(
            eval_formula("AVERAGE(A1:ZZZ9999999)", &empty),
            Value::Error(CellError::Div0)
        );
    }

    #[test]
    fn test_eval_against_grid() {
        let mut grid = Grid::new(2, 2).unwrap();
        grid.set_cell("A1", "4").unwrap();
        grid.set_cell("B2", "=A1*A1").unwrap();
        assert_eq!(eval_formula("=SUM(A1:ZZZ9999999)", &grid), Value::Number(20.0));
        assert_eq!(eval_formula("B2/(A2)", &grid), Value::Error(CellError::Div0));
    }

    #[test]
    fn test_describe_references() {
        assert_eq!(describe_references("=SUM(A1:B2)+C3"), "  <- A1:B2, C3");
        assert_eq!(describe_references("=1+2"), "");
        assert_eq!(describe_references("42"), "");
        assert!(describe_references("=(1+").starts_with("  (does not parse:"));
    }

    #[test]
    fn test_function_table() {
        let table = function_table();
        assert_eq!(table.len(), Builtin::ALL.len());
        assert_eq!(table[0], "SUM          0..any");
        assert!(table.contains(&"MID          2..3".to_string()));
    }
}
