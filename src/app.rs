use log::{debug, info, warn};

use riding_results::*;
use snafu::{prelude::*, Snafu};

use std::cell::RefCell;
use std::fs;
use std::path::Path;
use std::rc::Rc;

use serde_json::json;
use serde_json::Value as JSValue;
use text_diff::print_diff;

use crate::app::config_reader::*;
use crate::args::Args;

mod config_reader;
mod io_common;
mod io_csv;
mod io_excel;

#[derive(Debug, Snafu)]
pub enum AppError {
    #[snafu(display("Error opening file {path}"))]
    OpeningCsv { source: csv::Error, path: String },
    #[snafu(display("Error reading line {lineno}"))]
    CsvLineParse { source: csv::Error, lineno: usize },
    #[snafu(display("Error opening file {path}"))]
    OpeningExcel {
        source: calamine::XlsxError,
        path: String,
    },
    #[snafu(display("No worksheet {name:?} in {path}"))]
    MissingWorksheet { name: String, path: String },
    #[snafu(display("The table in {path} is empty"))]
    EmptyTable { path: String },
    #[snafu(display("Missing column {column:?} in the first row"))]
    MissingColumn { column: String },
    #[snafu(display("Line {lineno} is too short"))]
    LineTooShort { lineno: usize },
    #[snafu(display("Line {lineno}: cannot read cell {cell}"))]
    ExcelCell { lineno: usize, cell: String },
    #[snafu(display("Line {lineno}: the percentage must be a text cell, for example 55,9%"))]
    NumericPercent { lineno: usize },
    #[snafu(display("Error opening file {path}"))]
    OpeningJson {
        source: std::io::Error,
        path: String,
    },
    #[snafu(display("Error parsing json"))]
    ParsingJson { source: serde_json::Error },
    #[snafu(display("Error serializing json"))]
    SerializingJson { source: serde_json::Error },
    #[snafu(display("Error writing file {path}"))]
    WritingOutput {
        source: std::io::Error,
        path: String,
    },
    #[snafu(display("The results table cannot be loaded"))]
    LoadingResults { source: ParseError },
    #[snafu(display("Cannot select riding"))]
    Selecting { source: SelectionError },
    #[snafu(display("Unknown event {event:?}: expected click:<number>, search:<query> or close"))]
    InvalidEvent { event: String },
    #[snafu(display("Unknown input type {input_type:?}: expected csv or xlsx"))]
    UnknownInputType { input_type: String },

    #[snafu(whatever, display("{message}"))]
    Whatever {
        message: String,
        #[snafu(source(from(Box<dyn std::error::Error>, Some)))]
        source: Option<Box<dyn std::error::Error>>,
    },
}

pub type AppResult<T> = Result<T, AppError>;

/// An interaction of the user with the map.
#[derive(Eq, PartialEq, Debug, Clone)]
pub enum MapEvent {
    /// Click on a riding of the map.
    Click(DistrictId),
    /// Successful or not, a query typed in the search box.
    Search(String),
    /// The close button of the information panel.
    Close,
}

pub fn parse_event(s: &str) -> AppResult<MapEvent> {
    let invalid = || InvalidEventSnafu { event: s }.build();
    match s.split_once(':') {
        Some(("click", id)) => id
            .trim()
            .parse::<u32>()
            .map(|x| MapEvent::Click(DistrictId(x)))
            .map_err(|_| invalid()),
        Some(("search", query)) => Ok(MapEvent::Search(query.to_string())),
        None if s == "close" => Ok(MapEvent::Close),
        _ => Err(invalid()),
    }
}

/// The state of a map: the ridings, the party colors and the selection.
pub struct MapSession {
    districts: Vec<District>,
    parties: Vec<PartyInfo>,
    scale: ColorScale,
    selection: SelectionController,
    history: Rc<RefCell<Vec<SelectionChange>>>,
}

impl MapSession {
    pub fn new(districts: Vec<District>, parties: Vec<PartyInfo>) -> MapSession {
        let mut scale = ColorScale::new();
        bind(&mut scale, &parties);

        let history: Rc<RefCell<Vec<SelectionChange>>> = Rc::new(RefCell::new(Vec::new()));
        let mut selection = SelectionController::new();
        let sink = history.clone();
        selection.subscribe(move |change| {
            info!(
                "Selection changed: {:?} -> {:?}",
                change.previous, change.current
            );
            sink.borrow_mut().push(*change);
        });

        MapSession {
            districts,
            parties,
            scale,
            selection,
            history,
        }
    }

    pub fn apply(&mut self, event: &MapEvent) -> AppResult<()> {
        debug!("apply: {:?}", event);
        match event {
            MapEvent::Click(id) => self
                .selection
                .select_checked(*id, &self.districts)
                .context(SelectingSnafu {})?,
            MapEvent::Search(query) => match find_district(query, &self.districts) {
                Some(id) => self.selection.select(id),
                None => warn!("No riding found for {:?}", query),
            },
            MapEvent::Close => self.selection.clear(),
        }
        Ok(())
    }

    pub fn active_district_id(&self) -> Option<DistrictId> {
        self.selection.active_district_id()
    }

    pub fn panel(&self) -> Option<PanelView> {
        self.selection
            .active_district(&self.districts)
            .map(|d| PanelView::new(d, &self.scale, &self.parties))
    }

    pub fn summary_js(&self) -> JSValue {
        let districts: Vec<JSValue> = map_layer(
            &self.districts,
            &self.scale,
            &self.parties,
            &self.selection,
        )
        .iter()
        .map(|f| {
            json!({
                "id": f.district_id.0,
                "name": f.district_name,
                "winner": f.winner_party,
                "fill": f.fill_color,
                "selected": f.selected,
            })
        })
        .collect();

        let history: Vec<JSValue> = self
            .history
            .borrow()
            .iter()
            .map(|c| {
                json!({
                    "previous": c.previous.map(|x| x.0),
                    "current": c.current.map(|x| x.0),
                })
            })
            .collect();

        let panel = self.panel();
        let panel_error = panel
            .as_ref()
            .and_then(|p| p.format_error())
            .map(|e| e.to_string());
        if let Some(e) = panel_error.as_ref() {
            warn!("Panel: {}", e);
        }

        json!({
            "style": {"fillOpacity": map_layer::FILL_OPACITY, "stroke": map_layer::STROKE_COLOR},
            "districts": districts,
            "selectionHistory": history,
            "activeDistrict": self.active_district_id().map(|x| x.0),
            "panel": panel.as_ref().map(panel_to_json),
            "panelError": panel_error,
        })
    }
}

fn panel_to_json(p: &PanelView) -> JSValue {
    let bars: Vec<JSValue> = p
        .bars
        .iter()
        .map(|b| {
            json!({
                "candidate": b.candidate_name,
                "party": b.party_name,
                "label": b.short_label,
                "color": b.color,
                "percent": b.percent_text,
                "value": b.percent.as_ref().ok(),
            })
        })
        .collect();
    json!({
        "id": p.district_id.0,
        "heading": p.heading,
        "elected": p.elected,
        "totalVotes": p.total_votes.0,
        "totalVotesText": p.total_votes_text,
        "xDomain": p.value_range.as_ref().ok().map(|r| vec![r.min, r.max]),
        "yDomain": p.party_domain,
        "bars": bars,
    })
}

fn read_results(args: &Args) -> AppResult<Vec<RawRecord>> {
    let path = args.input.as_str();
    let input_type = match args.input_type.as_deref() {
        Some(x) => x.to_string(),
        None => Path::new(path)
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_lowercase())
            .filter(|e| e == "xlsx")
            .unwrap_or_else(|| "csv".to_string()),
    };
    info!("Attempting to read results file {:?} as {}", path, input_type);
    match input_type.as_str() {
        "csv" => io_csv::read_csv_results(path),
        "xlsx" => io_excel::read_excel_results(path, args.excel_worksheet_name.as_deref()),
        x => UnknownInputTypeSnafu { input_type: x }.fail(),
    }
}

/// Loads the ridings, replays the events and writes the summary of the map.
pub fn run_map(args: &Args) -> AppResult<()> {
    let events: Vec<MapEvent> = args
        .event
        .iter()
        .map(|s| parse_event(s))
        .collect::<AppResult<Vec<MapEvent>>>()?;

    let raw = read_results(args)?;
    let districts = load_districts(&raw).context(LoadingResultsSnafu {})?;
    info!("Loaded {} ridings", districts.len());

    let parties: Vec<PartyInfo> = match args.parties.as_ref() {
        Some(p) => read_parties(p)?,
        None => {
            warn!("No party configuration: all the parties will be shown as {:?}", OTHER_LABEL);
            vec![]
        }
    };

    let mut session = MapSession::new(districts, parties);
    for event in events.iter() {
        session.apply(event)?;
    }

    let summary = session.summary_js();
    let pretty_js = pretty_json(&summary)?;

    match args.out.as_deref() {
        None | Some("stdout") | Some("") => println!("{}", pretty_js),
        Some(out_path) => {
            fs::write(out_path, pretty_js.as_bytes())
                .context(WritingOutputSnafu { path: out_path })?;
            info!("Summary written to {:?}", out_path);
        }
    }

    // The reference summary, if provided for comparison
    if let Some(reference_path) = args.reference.as_ref() {
        check_reference(&pretty_js, reference_path)?;
    }
    Ok(())
}

fn pretty_json(js: &JSValue) -> AppResult<String> {
    serde_json::to_string_pretty(js).context(SerializingJsonSnafu {})
}

// Both sides go through the same json parsing so that numbers compare equal.
fn check_reference(pretty_summary: &str, reference_path: &str) -> AppResult<()> {
    let reference = read_reference(reference_path)?;
    let pretty_ref = pretty_json(&reference)?;
    let summary: JSValue = serde_json::from_str(pretty_summary).context(ParsingJsonSnafu {})?;
    let pretty_js = pretty_json(&summary)?;
    if pretty_ref != pretty_js {
        warn!("Found differences with the reference summary");
        print_diff(pretty_ref.as_str(), pretty_js.as_str(), "\n");
        whatever!("Difference detected between the map summary and the reference summary")
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn data_path(name: &str) -> String {
        format!("{}/tests/data/{}", env!("CARGO_MANIFEST_DIR"), name)
    }

    fn args(input: &str, events: &[&str]) -> Args {
        Args {
            input: data_path(input),
            input_type: None,
            excel_worksheet_name: None,
            parties: Some(data_path("parties.json")),
            event: events.iter().map(|s| s.to_string()).collect(),
            out: None,
            reference: None,
            verbose: false,
        }
    }

    fn session(input: &str) -> MapSession {
        let a = args(input, &[]);
        let districts = load_districts(&read_results(&a).unwrap()).unwrap();
        let parties = read_parties(&data_path("parties.json")).unwrap();
        MapSession::new(districts, parties)
    }

    #[test]
    fn events() {
        assert_eq!(
            parse_event("click:24003").unwrap(),
            MapEvent::Click(DistrictId(24003))
        );
        assert_eq!(
            parse_event("search:Nunavut").unwrap(),
            MapEvent::Search("Nunavut".to_string())
        );
        assert_eq!(parse_event("close").unwrap(), MapEvent::Close);
        assert!(parse_event("click:abc").is_err());
        assert!(parse_event("hover:1").is_err());
        assert!(parse_event("").is_err());
    }

    #[test]
    fn map_colors() {
        let s = session("ridings.csv");
        let js = s.summary_js();
        let districts = js["districts"].as_array().unwrap();
        assert_eq!(districts.len(), 3);
        assert_eq!(districts[0]["id"], json!(10001));
        assert_eq!(districts[0]["winner"], json!("Parti libéral du Canada"));
        assert_eq!(districts[0]["fill"], json!("#D71920"));
        assert_eq!(js["activeDistrict"], JSValue::Null);
        assert_eq!(js["panel"], JSValue::Null);
    }

    #[test]
    fn click_search_close() {
        let mut s = session("ridings.csv");
        s.apply(&MapEvent::Click(DistrictId(24003))).unwrap();
        let panel = s.panel().unwrap();
        assert_eq!(panel.heading, "Ahuntsic-Cartierville [24003]");
        assert_eq!(panel.elected, "Mélanie Joly (Parti libéral du Canada)");
        assert_eq!(panel.total_votes_text, "54 706");
        let labels: Vec<&str> = panel.bars.iter().map(|b| b.short_label.as_str()).collect();
        assert_eq!(labels, vec!["PLC", "NPD", "BQ", "PCC", "Autre"]);
        assert_eq!(panel.bars[4].color, "grey");

        s.apply(&MapEvent::Search("nunavut".to_string())).unwrap();
        assert_eq!(s.active_district_id(), Some(DistrictId(62001)));
        let js = s.summary_js();
        let selected: Vec<&JSValue> = js["districts"]
            .as_array()
            .unwrap()
            .iter()
            .filter(|d| d["selected"] == json!(true))
            .collect();
        assert_eq!(selected.len(), 1);
        assert_eq!(selected[0]["id"], json!(62001));
        assert_eq!(js["panel"]["xDomain"], json!([1.5, 47.1]));

        // A failed search keeps the current riding.
        s.apply(&MapEvent::Search("Atlantis".to_string())).unwrap();
        assert_eq!(s.active_district_id(), Some(DistrictId(62001)));

        s.apply(&MapEvent::Close).unwrap();
        assert_eq!(s.active_district_id(), None);
        let js = s.summary_js();
        assert_eq!(
            js["selectionHistory"],
            json!([
                {"previous": null, "current": 24003},
                {"previous": 24003, "current": 62001},
                {"previous": 62001, "current": null},
            ])
        );
    }

    #[test]
    fn click_on_unknown_riding() {
        let mut s = session("ridings.csv");
        s.apply(&MapEvent::Click(DistrictId(10001))).unwrap();
        let res = s.apply(&MapEvent::Click(DistrictId(99999)));
        assert!(matches!(res, Err(AppError::Selecting { .. })));
        assert_eq!(s.active_district_id(), Some(DistrictId(10001)));
    }

    #[test]
    fn malformed_votes_stop_the_load() {
        let res = run_map(&args("bad_votes.csv", &[]));
        match res {
            Err(AppError::LoadingResults { source }) => {
                assert_eq!(source.field, RecordField::VoteCount);
                assert_eq!(source.raw_value, "n/a");
                assert_eq!(source.row, 2);
            }
            x => panic!("unexpected result {:?}", x),
        }
    }

    #[test]
    fn malformed_percent_only_affects_the_panel() {
        let mut s = session("bad_percent.csv");
        s.apply(&MapEvent::Click(DistrictId(24003))).unwrap();
        let js = s.summary_js();
        assert_eq!(js["districts"].as_array().unwrap().len(), 2);
        assert_eq!(js["panelError"], json!("malformed percentage \"unknown\""));
        assert_eq!(js["panel"]["xDomain"], JSValue::Null);
        assert_eq!(js["panel"]["totalVotes"], json!(39040));
        assert_eq!(js["panel"]["bars"][1]["value"], JSValue::Null);

        // The other riding is fine.
        s.apply(&MapEvent::Click(DistrictId(10001))).unwrap();
        let js = s.summary_js();
        assert_eq!(js["panelError"], JSValue::Null);
        assert_eq!(js["panel"]["xDomain"], json!([17.0, 55.9]));
    }

    #[test]
    fn missing_column() {
        let res = read_results(&args("missing_column.csv", &[]));
        assert!(matches!(res, Err(AppError::MissingColumn { .. })));
    }

    #[test]
    fn reference_check() {
        let a = args("ridings.csv", &["click:10001"]);
        let out = std::env::temp_dir().join(format!("ridingmap-{}.json", std::process::id()));
        let out_path = out.display().to_string();
        run_map(&Args {
            out: Some(out_path.clone()),
            ..a.clone()
        })
        .unwrap();

        // The output is its own reference.
        run_map(&Args {
            out: Some(out_path.clone()),
            reference: Some(out_path.clone()),
            ..a.clone()
        })
        .unwrap();

        // Another selection does not match.
        let res = run_map(&Args {
            event: vec!["click:62001".to_string()],
            out: Some(format!("{}.other", out_path)),
            reference: Some(out_path.clone()),
            ..a
        });
        assert!(matches!(res, Err(AppError::Whatever { .. })));
        let _ = fs::remove_file(&out);
        let _ = fs::remove_file(format!("{}.other", out_path));
    }

    #[test]
    fn json_errors_tell_reading_from_writing() {
        assert_eq!(pretty_json(&json!({"a": 1})).unwrap(), "{\n  \"a\": 1\n}");

        let reference = data_path("parties.json");
        let res = check_reference("{ not json", &reference);
        match res {
            Err(e @ AppError::ParsingJson { .. }) => assert_eq!(e.to_string(), "Error parsing json"),
            x => panic!("unexpected result {:?}", x),
        }

        let source = serde_json::from_str::<JSValue>("{").unwrap_err();
        let e = AppError::SerializingJson { source };
        assert_eq!(e.to_string(), "Error serializing json");
    }
}
