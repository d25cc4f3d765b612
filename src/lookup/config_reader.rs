use crate::lookup::*;

use serde::{Deserialize, Serialize};

pub const DEFAULT_INPUT_PATH: &str = "old_data.xlsx";
pub const DEFAULT_TITLE: &str = "Voter Details Search";

#[derive(Eq, PartialEq, Debug, Clone, Default, Serialize, Deserialize)]
pub struct SourceConfig {
    pub provider: Option<String>,
    #[serde(rename = "filePath")]
    pub file_path: Option<String>,
    #[serde(rename = "excelWorksheetName")]
    pub excel_worksheet_name: Option<String>,
}

#[derive(Eq, PartialEq, Debug, Clone, Default, Serialize, Deserialize)]
pub struct ColumnsConfig {
    #[serde(rename = "voterName")]
    pub voter_name: Option<String>,
    #[serde(rename = "relationName")]
    pub relation_name: Option<String>,
}

#[derive(Eq, PartialEq, Debug, Clone, Default, Serialize, Deserialize)]
pub struct LookupConfig {
    pub title: Option<String>,
    #[serde(default)]
    pub source: SourceConfig,
    #[serde(default)]
    pub columns: ColumnsConfig,
}

/// How the results are written out.
#[derive(Eq, PartialEq, Debug, Clone, Copy)]
pub enum OutputFormat {
    Text,
    Json,
}

impl OutputFormat {
    pub fn parse(s: &str) -> LookupResult<OutputFormat> {
        match s.to_lowercase().as_str() {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            _ => UnknownFormatSnafu { format: s }.fail(),
        }
    }
}

/// All the settings of a lookup, after merging the command line, the
/// configuration file and the defaults.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct LookupSettings {
    pub title: String,
    pub source: SourceSettings,
    pub columns: ColumnNames,
    pub format: OutputFormat,
}

pub fn read_config(path: &str) -> LookupResult<LookupConfig> {
    let contents = fs::read_to_string(path).context(OpeningJsonSnafu { path })?;
    debug!("read_config: {:?}", contents);
    let config: LookupConfig = serde_json::from_str(&contents).context(ParsingJsonSnafu {})?;
    Ok(config)
}

/// Merges the command line with the configuration file, if any.
///
/// `config` comes with the directory of the configuration file: the path of
/// the voter file in the configuration is relative to it.
pub fn resolve_settings(
    args: &Args,
    config: Option<&(LookupConfig, PathBuf)>,
) -> LookupResult<LookupSettings> {
    let default_config = LookupConfig::default();
    let (cfg, root_p) = match config {
        Some((c, p)) => (c, p.clone()),
        None => (&default_config, PathBuf::new()),
    };

    let path: PathBuf = match (&args.input, &cfg.source.file_path) {
        (Some(p), _) => PathBuf::from(p),
        (None, Some(p)) => root_p.join(p),
        (None, None) => PathBuf::from(DEFAULT_INPUT_PATH),
    };
    if path.as_os_str().is_empty() {
        whatever!("The path of the voter file is empty");
    }

    // The provider of the configuration only describes its own file.
    let input_type = match (&args.input_type, &args.input, &cfg.source.provider) {
        (Some(s), _, _) => InputType::parse(s)?,
        (None, None, Some(s)) => InputType::parse(s)?,
        _ => InputType::from_path(&path),
    };

    let worksheet = args
        .excel_worksheet_name
        .clone()
        .or_else(|| cfg.source.excel_worksheet_name.clone());
    if worksheet.is_some() && input_type == InputType::Csv {
        warn!("resolve_settings: worksheet {:?} ignored for csv input", worksheet);
    }

    let defaults = ColumnNames::default();
    let columns = ColumnNames {
        voter_name: args
            .voter_column
            .clone()
            .or_else(|| cfg.columns.voter_name.clone())
            .unwrap_or(defaults.voter_name),
        relation_name: args
            .relation_column
            .clone()
            .or_else(|| cfg.columns.relation_name.clone())
            .unwrap_or(defaults.relation_name),
    };

    let format = match args.format.as_ref() {
        Some(s) => OutputFormat::parse(s)?,
        None => OutputFormat::Text,
    };

    Ok(LookupSettings {
        title: cfg.title.clone().unwrap_or_else(|| DEFAULT_TITLE.to_string()),
        source: SourceSettings {
            input_type,
            path,
            worksheet,
        },
        columns,
        format,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn config_js() -> &'static str {
        r#"{
            "title": "123 Pollachi AC - Voter Details 2002",
            "source": {
                "provider": "excel",
                "filePath": "old_data.xlsx",
                "excelWorksheetName": "Sheet1"
            },
            "columns": { "voterName": "NAME", "relationName": "RLN_NAME" }
        }"#
    }

    #[test]
    fn defaults_without_config() {
        let settings = resolve_settings(&Args::default(), None).unwrap();
        assert_eq!(settings.title, DEFAULT_TITLE);
        assert_eq!(settings.source.path, PathBuf::from("old_data.xlsx"));
        assert_eq!(settings.source.input_type, InputType::Excel);
        assert_eq!(settings.source.worksheet, None);
        assert_eq!(settings.columns, ColumnNames::default());
        assert_eq!(settings.format, OutputFormat::Text);
    }

    #[test]
    fn config_paths_are_relative_to_config_dir() {
        let cfg: LookupConfig = serde_json::from_str(config_js()).unwrap();
        let with_dir = (cfg, PathBuf::from("/data/pollachi"));
        let settings = resolve_settings(&Args::default(), Some(&with_dir)).unwrap();
        assert_eq!(
            settings.source.path,
            PathBuf::from("/data/pollachi/old_data.xlsx")
        );
        assert_eq!(settings.source.worksheet, Some("Sheet1".to_string()));
        assert_eq!(settings.columns.voter_name, "NAME");
        assert_eq!(settings.columns.relation_name, "RLN_NAME");
        assert_eq!(settings.title, "123 Pollachi AC - Voter Details 2002");
    }

    #[test]
    fn command_line_overrides_config() {
        let cfg: LookupConfig = serde_json::from_str(config_js()).unwrap();
        let with_dir = (cfg, PathBuf::from("/data/pollachi"));
        let args = Args {
            input: Some("export.csv".to_string()),
            voter_column: Some("FM_NAME_V2".to_string()),
            format: Some("json".to_string()),
            ..Args::default()
        };
        let settings = resolve_settings(&args, Some(&with_dir)).unwrap();
        assert_eq!(settings.source.path, PathBuf::from("export.csv"));
        assert_eq!(settings.source.input_type, InputType::Csv);
        assert_eq!(settings.columns.voter_name, "FM_NAME_V2");
        assert_eq!(settings.columns.relation_name, "RLN_NAME");
        assert_eq!(settings.format, OutputFormat::Json);
    }

    #[test]
    fn provider_follows_the_file_it_describes() {
        let cfg: LookupConfig =
            serde_json::from_str(r#"{"source": {"provider": "csv", "filePath": "roll.dat"}}"#)
                .unwrap();
        let with_dir = (cfg, PathBuf::from("conf"));
        let settings = resolve_settings(&Args::default(), Some(&with_dir)).unwrap();
        assert_eq!(settings.source.input_type, InputType::Csv);

        let args = Args {
            input: Some("old_data.xlsx".to_string()),
            ..Args::default()
        };
        let settings = resolve_settings(&args, Some(&with_dir)).unwrap();
        assert_eq!(settings.source.input_type, InputType::Excel);

        let args = Args {
            input: Some("old_data.xlsx".to_string()),
            input_type: Some("csv".to_string()),
            ..Args::default()
        };
        let settings = resolve_settings(&args, Some(&with_dir)).unwrap();
        assert_eq!(settings.source.input_type, InputType::Csv);
    }

    #[test]
    fn input_type_is_guessed_from_extension() {
        let args = Args {
            input: Some("roll.csv".to_string()),
            ..Args::default()
        };
        let settings = resolve_settings(&args, None).unwrap();
        assert_eq!(settings.source.input_type, InputType::Csv);
    }

    #[test]
    fn partial_config() {
        let cfg: LookupConfig = serde_json::from_str(r#"{"columns": {"voterName": "N"}}"#).unwrap();
        assert_eq!(cfg.source, SourceConfig::default());
        let with_dir = (cfg, PathBuf::from("conf"));
        let settings = resolve_settings(&Args::default(), Some(&with_dir)).unwrap();
        assert_eq!(settings.source.path, PathBuf::from("old_data.xlsx"));
        assert_eq!(settings.columns.voter_name, "N");
        assert_eq!(settings.columns.relation_name, "RLN_FM_NM_V2");
    }

    #[test]
    fn rejects_unknown_values() {
        let args = Args {
            format: Some("xml".to_string()),
            ..Args::default()
        };
        assert!(matches!(
            resolve_settings(&args, None),
            Err(LookupError::UnknownFormat { .. })
        ));
        let args = Args {
            input_type: Some("dominion".to_string()),
            ..Args::default()
        };
        assert!(matches!(
            resolve_settings(&args, None),
            Err(LookupError::UnknownInputType { .. })
        ));
        let args = Args {
            input: Some("".to_string()),
            ..Args::default()
        };
        assert!(matches!(
            resolve_settings(&args, None),
            Err(LookupError::Whatever { .. })
        ));
    }

    #[test]
    fn reads_config_file() {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        f.write_all(config_js().as_bytes()).unwrap();
        let cfg = read_config(f.path().to_str().unwrap()).unwrap();
        assert_eq!(cfg.source.provider, Some("excel".to_string()));
    }

    #[test]
    fn config_errors() {
        assert!(matches!(
            read_config("/nonexistent/voterlookup.json"),
            Err(LookupError::OpeningJson { .. })
        ));
        let mut f = tempfile::NamedTempFile::new().unwrap();
        f.write_all(b"{ not json").unwrap();
        assert!(matches!(
            read_config(f.path().to_str().unwrap()),
            Err(LookupError::ParsingJson { .. })
        ));
    }
}
