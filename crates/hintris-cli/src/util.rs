use std::{
    fs::File,
    io::{self, BufWriter, StdoutLock, Write as _},
    path::{Path, PathBuf},
};

use anyhow::Context;
use hintris_ai::PredictorConfig;

/// Destination of JSON results: stdout unless a path is given.
#[derive(Debug)]
pub enum Output {
    Stdout(StdoutLock<'static>),
    File(BufWriter<File>, PathBuf),
}

impl Output {
    pub fn save_json<T>(value: &T, output_path: Option<PathBuf>) -> anyhow::Result<()>
    where
        T: serde::Serialize,
    {
        let mut output = match output_path {
            Some(path) => {
                let file = File::create(&path)
                    .with_context(|| format!("Failed to create output file: {}", path.display()))?;
                Output::File(BufWriter::new(file), path)
            }
            None => Output::Stdout(io::stdout().lock()),
        };
        let written = serde_json::to_writer_pretty(&mut output, value)
            .map_err(io::Error::from)
            .and_then(|()| writeln!(output))
            .and_then(|()| output.flush());
        written.with_context(|| format!("Failed to write JSON to {}", output.display_path()))
    }

    fn display_path(&self) -> String {
        match self {
            Output::Stdout(_) => "stdout".to_owned(),
            Output::File(_, path) => path.display().to_string(),
        }
    }
}

impl io::Write for Output {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self {
            Output::Stdout(writer) => writer.write(buf),
            Output::File(writer, _) => writer.write(buf),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self {
            Output::Stdout(writer) => writer.flush(),
            Output::File(writer, _) => writer.flush(),
        }
    }
}

pub fn read_json_file<T, P>(file_kind: &str, path: P) -> anyhow::Result<T>
where
    T: serde::de::DeserializeOwned,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    let file = File::open(path)
        .with_context(|| format!("Failed to open {} file: {}", file_kind, path.display()))?;

    let reader = io::BufReader::new(file);
    let value = serde_json::from_reader(reader).with_context(|| {
        format!(
            "Failed to parse {} JSON file: {}",
            file_kind,
            path.display()
        )
    })?;
    Ok(value)
}

/// Reads the predictor configuration, or the defaults when no path is given.
pub fn read_config_or_default(path: Option<&Path>) -> anyhow::Result<PredictorConfig> {
    path.map_or_else(
        || Ok(PredictorConfig::default()),
        |path| read_json_file("config", path),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_names_kind() {
        let err = read_json_file::<PredictorConfig, _>("config", "/nonexistent/hintris.json")
            .unwrap_err();
        assert!(err.to_string().contains("Failed to open config file"));
    }

    #[test]
    fn test_save_json_to_file() {
        let path = std::env::temp_dir().join(format!("hintris-util-{}.json", std::process::id()));
        let config = PredictorConfig {
            difficulty: 6,
            ..PredictorConfig::default()
        };
        Output::save_json(&config, Some(path.clone())).unwrap();
        let read: PredictorConfig = read_json_file("config", &path).unwrap();
        std::fs::remove_file(&path).unwrap();
        assert_eq!(read, config);
    }

    #[test]
    fn test_config_defaults_without_path() {
        let config = read_config_or_default(None).unwrap();
        assert_eq!(config, PredictorConfig::default());
    }
}
