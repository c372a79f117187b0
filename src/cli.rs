use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

#[derive(Debug, Parser)]
#[command(
    author,
    version,
    about = "Find shared values and identical rows across two CSV or spreadsheet files",
    long_about = None
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// List the columns of a CSV or spreadsheet file
    Columns(ColumnsArgs),
    /// Count occurrences of one exact value in the chosen column of both files
    Search(SearchArgs),
    /// Report values shared by both chosen columns and rows identical in both files
    Duplicates(DuplicatesArgs),
    /// Search when --value is given, otherwise run the duplicate analysis
    Analyze(AnalyzeArgs),
}

#[derive(Debug, Args)]
pub struct ColumnsArgs {
    /// Input CSV, TSV, or spreadsheet file to inspect
    #[arg(short = 'i', long = "input")]
    pub input: PathBuf,
    /// Sheet name or 0-based index for spreadsheet input (defaults to the first sheet)
    #[arg(long)]
    pub sheet: Option<String>,
    /// CSV delimiter character (supports ',', 'tab', ';', '|')
    #[arg(long, value_parser = parse_delimiter)]
    pub delimiter: Option<u8>,
    /// Character encoding of delimited input (defaults to utf-8)
    #[arg(long = "input-encoding")]
    pub input_encoding: Option<String>,
}

/// The two files being compared and the column chosen from each.
#[derive(Debug, Args)]
pub struct InputArgs {
    /// First file (P1)
    #[arg(long = "left")]
    pub left: PathBuf,
    /// Second file (P2)
    #[arg(long = "right")]
    pub right: PathBuf,
    /// Comparison column in the first file
    #[arg(long = "left-column")]
    pub left_column: String,
    /// Comparison column in the second file
    #[arg(long = "right-column")]
    pub right_column: String,
    /// Sheet name or 0-based index when the first file is a spreadsheet
    #[arg(long = "left-sheet")]
    pub left_sheet: Option<String>,
    /// Sheet name or 0-based index when the second file is a spreadsheet
    #[arg(long = "right-sheet")]
    pub right_sheet: Option<String>,
    /// CSV delimiter character for both delimited inputs
    #[arg(long, value_parser = parse_delimiter)]
    pub delimiter: Option<u8>,
    /// CSV delimiter for the first file (overrides --delimiter)
    #[arg(long = "left-delimiter", value_parser = parse_delimiter)]
    pub left_delimiter: Option<u8>,
    /// CSV delimiter for the second file (overrides --delimiter)
    #[arg(long = "right-delimiter", value_parser = parse_delimiter)]
    pub right_delimiter: Option<u8>,
    /// Character encoding for the first file (defaults to utf-8)
    #[arg(long = "left-encoding")]
    pub left_encoding: Option<String>,
    /// Character encoding for the second file (defaults to utf-8)
    #[arg(long = "right-encoding")]
    pub right_encoding: Option<String>,
}

impl InputArgs {
    pub fn left_delimiter(&self) -> Option<u8> {
        self.left_delimiter.or(self.delimiter)
    }

    pub fn right_delimiter(&self) -> Option<u8> {
        self.right_delimiter.or(self.delimiter)
    }
}

#[derive(Debug, Args)]
pub struct OutputArgs {
    /// Directory receiving the exported .xlsx reports
    #[arg(short = 'o', long = "output-dir", default_value = ".")]
    pub output_dir: PathBuf,
    /// Print results without writing .xlsx reports
    #[arg(long = "no-export")]
    pub no_export: bool,
    /// Render matching rows as a table on stdout
    #[arg(long = "table")]
    pub table: bool,
    /// Maximum rows rendered per table with --table (0 = all)
    #[arg(long = "table-rows", default_value_t = 20)]
    pub table_rows: usize,
    /// Output format for the summary
    #[arg(long = "format", value_enum, default_value = "text")]
    pub format: OutputFormat,
}

impl OutputArgs {
    pub fn table_limit(&self) -> Option<usize> {
        (self.table_rows > 0).then_some(self.table_rows)
    }
}

#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq, Default)]
#[value(rename_all = "kebab-case")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Debug, Args)]
pub struct SearchArgs {
    #[command(flatten)]
    pub inputs: InputArgs,
    /// Exact, case-sensitive value to look for
    #[arg(long)]
    pub value: String,
    #[command(flatten)]
    pub output: OutputArgs,
}

#[derive(Debug, Args)]
pub struct DuplicatesArgs {
    #[command(flatten)]
    pub inputs: InputArgs,
    #[command(flatten)]
    pub output: OutputArgs,
}

#[derive(Debug, Args)]
pub struct AnalyzeArgs {
    #[command(flatten)]
    pub inputs: InputArgs,
    /// Optional value to search for; blank runs the duplicate analysis
    #[arg(long)]
    pub value: Option<String>,
    #[command(flatten)]
    pub output: OutputArgs,
}

pub fn parse_delimiter(value: &str) -> Result<u8, String> {
    match value {
        "tab" | "\t" => Ok(b'\t'),
        "comma" | "," => Ok(b','),
        "|" | "pipe" => Ok(b'|'),
        ";" | "semicolon" => Ok(b';'),
        other => {
            let mut chars = other.chars();
            let first = chars
                .next()
                .ok_or_else(|| "Delimiter cannot be empty".to_string())?;
            if chars.next().is_some() {
                return Err("Delimiter must be a single character".to_string());
            }
            if !first.is_ascii() {
                return Err("Delimiter must be ASCII".to_string());
            }
            Ok(first as u8)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_delimiter_accepts_names_and_characters() {
        assert_eq!(parse_delimiter("tab"), Ok(b'\t'));
        assert_eq!(parse_delimiter("semicolon"), Ok(b';'));
        assert_eq!(parse_delimiter("#"), Ok(b'#'));
        assert!(parse_delimiter("").is_err());
        assert!(parse_delimiter("ab").is_err());
        assert!(parse_delimiter("é").is_err());
    }

    #[test]
    fn per_side_delimiters_override_the_shared_one() {
        let cli = Cli::parse_from([
            "crosscheck",
            "duplicates",
            "--left",
            "a.csv",
            "--right",
            "b.csv",
            "--left-column",
            "id",
            "--right-column",
            "id",
            "--delimiter",
            "|",
            "--left-delimiter",
            ";",
        ]);
        let Commands::Duplicates(args) = cli.command else {
            panic!("expected duplicates");
        };
        assert_eq!(args.inputs.left_delimiter(), Some(b';'));
        assert_eq!(args.inputs.right_delimiter(), Some(b'|'));
    }

    #[test]
    fn cli_definition_is_consistent() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
