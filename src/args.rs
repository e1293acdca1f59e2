use clap::Parser;

/// Builds the contents of an election results map: the color of each riding and the information
/// panel of the selected riding.
#[derive(Parser, Debug, Clone)]
#[clap(author, version, about, long_about = None)]
pub struct Args {
    /// (file path) The results table, with one row per candidate and per riding. The first row must
    /// contain the columns id, name, candidate, votes, percent and party.
    #[clap(short, long, value_parser)]
    pub input: String,

    /// (csv or xlsx) The type of the input. By default, it is deduced from the extension of the
    /// file, and csv is used when the extension is not known.
    #[clap(long, value_parser)]
    pub input_type: Option<String>,

    /// (default: first worksheet) When using an Excel file, indicates the name of the worksheet to use.
    #[clap(long, value_parser)]
    pub excel_worksheet_name: Option<String>,

    /// (file path, optional) A JSON list of parties with their name, abbreviation and color.
    /// The parties that are not listed are shown in grey under the label "Autre".
    #[clap(short, long, value_parser)]
    pub parties: Option<String>,

    /// (repeatable) An interaction to replay, in order: 'click:<riding number>',
    /// 'search:<riding number or name>' or 'close'.
    #[clap(short, long, value_parser)]
    pub event: Vec<String>,

    /// (file path, 'stdout' or empty) Where to write the JSON summary of the map.
    #[clap(short, long, value_parser)]
    pub out: Option<String>,

    /// (file path) A reference file containing the expected summary in JSON format. If provided,
    /// ridingmap will check that its output matches the reference.
    #[clap(short, long, value_parser)]
    pub reference: Option<String>,

    // Other arguments
    /// If passed as an argument, will turn on verbose logging to the standard output.
    #[clap(long, takes_value = false)]
    pub verbose: bool,
}
