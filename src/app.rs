//! Main application module: replays an event stream through a stabilized pointer.

use crate::{
    config::{OutputConfig, OutputFormat},
    error::Result,
    filters::{create_filter, stabilizer::TimedSample, PointerFilter, Sample},
    input::{EventReader, InputEvent},
    parameters::Parameters,
};
use log::{debug, info, warn};
use std::io::{BufRead, Write};

/// Main application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Filter spec passed to [`create_filter`]
    pub filter_type: String,
    /// Initial stabilizer parameters
    pub parameters: Parameters,
    /// Start with stabilization enabled. Defaults to on for replay, unlike
    /// an interactive surface where the user switches it on.
    pub enabled: bool,
    /// Output formatting
    pub output: OutputConfig,
    /// Abort on the first unparsable line instead of skipping it
    pub strict: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            filter_type: "stabilizer".to_string(),
            parameters: Parameters::default(),
            enabled: true,
            output: OutputConfig::default(),
            strict: false,
        }
    }
}

/// One stabilized pointer stream with its on/off switch
pub struct PointerSession {
    filter: Box<dyn PointerFilter>,
    parameters: Parameters,
    enabled: bool,
    last_raw: Option<TimedSample>,
}

impl PointerSession {
    /// Wrap a filter, pushing the initial parameters into it
    pub fn new(mut filter: Box<dyn PointerFilter>, parameters: Parameters, enabled: bool) -> Self {
        filter.configure(&parameters);
        Self {
            filter,
            parameters,
            enabled,
            last_raw: None,
        }
    }

    /// Feed a pointer move. Disabled sessions pass the raw position through.
    pub fn on_move(&mut self, x: f64, y: f64, timestamp_ms: u64) -> Sample {
        self.last_raw = Some(TimedSample::new(x, y, timestamp_ms));
        if self.enabled {
            self.filter.apply(x, y, timestamp_ms)
        } else {
            Sample::new(x, y)
        }
    }

    /// Flip stabilization on or off, clearing filter state across the switch
    pub fn toggle(&mut self) -> bool {
        self.enabled = !self.enabled;
        self.filter.reset();
        info!(
            "Stabilization {}",
            if self.enabled { "ON" } else { "OFF" }
        );
        self.enabled
    }

    /// Restore default parameters and clear filter state
    pub fn reset(&mut self) {
        self.parameters = Parameters::default();
        self.filter.configure(&self.parameters);
        self.filter.reset();
        debug!("Session reset to defaults");
    }

    /// Apply a parameter adjustment
    pub fn adjust(&mut self, change: impl FnOnce(&mut Parameters)) {
        change(&mut self.parameters);
        self.filter.configure(&self.parameters);
        debug!(
            "Parameters now history_capacity={}, tremor_threshold={}",
            self.parameters.history_capacity, self.parameters.tremor_threshold
        );
    }

    /// Dispatch one input event, returning the output position for moves
    pub fn handle(&mut self, event: InputEvent) -> Option<Sample> {
        match event {
            InputEvent::Move { x, y, timestamp_ms } => return Some(self.on_move(x, y, timestamp_ms)),
            InputEvent::SmoothingUp => self.adjust(Parameters::increase_smoothing),
            InputEvent::SmoothingDown => self.adjust(Parameters::decrease_smoothing),
            InputEvent::ThresholdUp => self.adjust(Parameters::increase_threshold),
            InputEvent::ThresholdDown => self.adjust(Parameters::decrease_threshold),
            InputEvent::Reset => self.reset(),
            InputEvent::Toggle => {
                self.toggle();
            }
        }
        None
    }

    pub const fn parameters(&self) -> Parameters {
        self.parameters
    }

    pub const fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Most recent raw move, whether or not stabilization is enabled
    pub const fn last_raw(&self) -> Option<TimedSample> {
        self.last_raw
    }

    pub fn filter_name(&self) -> &str {
        self.filter.name()
    }
}

/// Counters reported at the end of a run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunStats {
    /// Pointer moves processed
    pub moves: usize,
    /// Non-move events processed
    pub commands: usize,
    /// Lines skipped because they failed to parse
    pub skipped: usize,
}

/// Main application struct
pub struct StabilizerApp {
    config: AppConfig,
    session: PointerSession,
}

impl StabilizerApp {
    /// Create a new application
    pub fn new(config: AppConfig) -> Result<Self> {
        info!("Initializing tremor stabilizer with {} filter", config.filter_type);

        let filter = create_filter(&config.filter_type)?;
        let session = PointerSession::new(filter, config.parameters, config.enabled);
        info!(
            "{} ready, stabilization {}",
            session.filter_name(),
            if session.is_enabled() { "ON" } else { "OFF" }
        );

        Ok(Self { config, session })
    }

    /// Read events from `input` until EOF, writing one line per move to `output`
    pub fn run<R: BufRead, W: Write>(&mut self, input: R, mut output: W) -> Result<RunStats> {
        info!("Starting event loop");
        let mut stats = RunStats::default();

        for event in EventReader::new(input) {
            let event = match event {
                Ok(event) => event,
                Err(e) if !self.config.strict && matches!(e, crate::Error::ParseError { .. }) => {
                    warn!("Skipping input: {e}");
                    stats.skipped += 1;
                    continue;
                }
                Err(e) => return Err(e),
            };

            match event {
                InputEvent::Move { .. } => {
                    if let Some(pos) = self.session.handle(event) {
                        self.write_line(&mut output, pos)?;
                    }
                    stats.moves += 1;
                }
                _ => {
                    self.session.handle(event);
                    stats.commands += 1;
                }
            }
        }

        output.flush()?;
        info!(
            "Processed {} moves, {} commands, skipped {} lines",
            stats.moves, stats.commands, stats.skipped
        );
        Ok(stats)
    }

    fn write_line<W: Write>(&self, output: &mut W, pos: Sample) -> Result<()> {
        let sep = match self.config.output.format {
            OutputFormat::Plain => " ",
            OutputFormat::Csv => ",",
        };

        if self.config.output.include_raw {
            if let Some(TimedSample { x, y, timestamp_ms }) = self.session.last_raw() {
                write!(output, "{x}{sep}{y}{sep}{timestamp_ms}{sep}")?;
            }
        }
        writeln!(output, "{}{sep}{}", pos.x, pos.y)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn run_app(config: AppConfig, input: &str) -> (String, RunStats) {
        let mut app = StabilizerApp::new(config).unwrap();
        let mut output = Vec::<u8>::new();
        let stats = app.run(Cursor::new(input), &mut output).unwrap();
        (String::from_utf8(output).unwrap(), stats)
    }

    #[test]
    fn test_run_worked_example() {
        let config = AppConfig {
            parameters: Parameters::new(3, 5).unwrap(),
            ..AppConfig::default()
        };
        let (out, stats) = run_app(config, "0 0 0\n10 0 10\n11 0 11\n");

        assert_eq!(out, "0 0\n5 0\n7 0\n");
        assert_eq!(stats.moves, 3);
    }

    #[test]
    fn test_disabled_passes_through() {
        let config = AppConfig {
            enabled: false,
            ..AppConfig::default()
        };
        let (out, _) = run_app(config, "0 0 0\n10 0 10\n");
        assert_eq!(out, "0 0\n10 0\n");
    }

    #[test]
    fn test_csv_with_raw() {
        let config = AppConfig {
            output: OutputConfig {
                format: OutputFormat::Csv,
                include_raw: true,
            },
            ..AppConfig::default()
        };
        let (out, _) = run_app(config, "2 4 0\n");
        assert_eq!(out, "2,4,0,2,4\n");
    }

    #[test]
    fn test_skips_bad_lines_unless_strict() {
        let (out, stats) = run_app(AppConfig::default(), "0 0 0\nnope\n");
        assert_eq!(out, "0 0\n");
        assert_eq!(stats.skipped, 1);

        let (out, stats) = run_app(AppConfig::default(), "0 0 0\nNaN 0 100\n5 5 200\n");
        assert_eq!(stats.skipped, 1);
        assert!(!out.contains("NaN"));
        assert_eq!(out.lines().count(), 2);

        let mut app = StabilizerApp::new(AppConfig {
            strict: true,
            ..AppConfig::default()
        })
        .unwrap();
        assert!(app.run(Cursor::new("nope\n"), Vec::<u8>::new()).is_err());
    }

    #[test]
    fn test_invalid_utf8_line_skipped() {
        let mut app = StabilizerApp::new(AppConfig::default()).unwrap();
        let mut output = Vec::<u8>::new();
        let input: &[u8] = b"0 0 0\n\xff\xfe 1 10\n5 5 200\n";
        let stats = app.run(input, &mut output).unwrap();

        assert_eq!(stats.skipped, 1);
        assert_eq!(stats.moves, 2);
    }

    #[test]
    fn test_default_config_starts_enabled() {
        assert!(AppConfig::default().enabled);
    }

    #[test]
    fn test_session_commands() {
        let filter = create_filter("stabilizer").unwrap();
        let mut session = PointerSession::new(filter, Parameters::default(), true);

        session.handle(InputEvent::SmoothingUp);
        session.handle(InputEvent::ThresholdDown);
        assert_eq!(session.parameters(), Parameters::new(6, 4).unwrap());

        assert!(!session.toggle());
        assert!(session.handle(InputEvent::Toggle).is_none());
        assert!(session.is_enabled());

        session.handle(InputEvent::Reset);
        assert_eq!(session.parameters(), Parameters::default());
    }

    #[test]
    fn test_session_tracks_last_raw() {
        let filter = create_filter("stabilizer:3:5").unwrap();
        let mut session = PointerSession::new(filter, Parameters::new(3, 5).unwrap(), true);
        assert_eq!(session.last_raw(), None);

        session.on_move(0.0, 0.0, 0);
        let pos = session.on_move(10.0, 0.0, 10);
        assert_eq!(pos, Sample::new(5.0, 0.0));
        assert_eq!(session.last_raw(), Some(TimedSample::new(10.0, 0.0, 10)));

        session.toggle();
        session.on_move(7.0, 8.0, 20);
        assert_eq!(session.last_raw().map(|raw| raw.position()), Some(Sample::new(7.0, 8.0)));
    }
}
