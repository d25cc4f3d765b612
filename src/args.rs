use clap::Parser;

/// This is a search program for constituency voter rolls.
#[derive(Parser, Debug, Clone, Default)]
#[clap(author, version, about, long_about = None)]
pub struct Args {
    /// (file path, optional) A JSON file with the settings of the lookup (input file, worksheet, column names).
    /// The options given on the command line override the content of this file.
    #[clap(short, long, value_parser)]
    pub config: Option<String>,

    /// (file path, default old_data.xlsx) The spreadsheet containing the voter roll.
    /// Setting this option overrides the path that may be specified with the --config option.
    #[clap(short, long, value_parser)]
    pub input: Option<String>,

    /// (excel or csv) The type of the input. If not specified, it is guessed from the extension of the file.
    #[clap(long, value_parser)]
    pub input_type: Option<String>,

    /// (default: first worksheet) When using an Excel file, indicates the name of the worksheet to use.
    #[clap(long, value_parser)]
    pub excel_worksheet_name: Option<String>,

    /// (default FM_NAME_V2) The name of the column containing the names of the voters.
    #[clap(long, value_parser)]
    pub voter_column: Option<String>,

    /// (default RLN_FM_NM_V2) The name of the column containing the names of the fathers or husbands.
    #[clap(long, value_parser)]
    pub relation_column: Option<String>,

    /// (text, optional) The name of the voter to look for. If --name or --relation is provided,
    /// a single search is run instead of the interactive session.
    #[clap(short, long, value_parser)]
    pub name: Option<String>,

    /// (text, optional) The name of the father or husband to look for.
    #[clap(short, long, value_parser)]
    pub relation: Option<String>,

    /// (default text) The format of the results: 'text' for a table, 'json' for a list of records.
    #[clap(long, value_parser)]
    pub format: Option<String>,

    // Other arguments
    /// If passed as an argument, will turn on verbose logging to the standard error.
    #[clap(long, takes_value = false)]
    pub verbose: bool,
}
