//! End-to-end replay of event streams through the application

use std::io::{BufReader, Cursor};
use tremor_stabilizer::{
    app::{AppConfig, RunStats, StabilizerApp},
    config::{OutputConfig, OutputFormat},
    parameters::Parameters,
};

fn replay(config: AppConfig, input: &str) -> (Vec<(f64, f64)>, RunStats) {
    let mut app = StabilizerApp::new(config).unwrap();
    let mut output = Vec::<u8>::new();
    let stats = app.run(Cursor::new(input), &mut output).unwrap();

    let positions = String::from_utf8(output)
        .unwrap()
        .lines()
        .map(|line| {
            let mut fields = line.split_whitespace().map(|f| f.parse::<f64>().unwrap());
            (fields.next().unwrap(), fields.next().unwrap())
        })
        .collect();

    (positions, stats)
}

#[test]
fn test_jitter_is_suppressed() {
    // Hold around (200, 150) with +/-3px shake every 8ms
    let mut input = String::new();
    for i in 0..100_u64 {
        let offset = if i % 2 == 0 { 3.0 } else { -3.0 };
        input.push_str(&format!("{} {} {}\n", 200.0 + offset, 150.0 - offset, i * 8));
    }

    let config = AppConfig {
        parameters: Parameters::new(10, 5).unwrap(),
        ..AppConfig::default()
    };
    let (positions, stats) = replay(config, &input);
    assert_eq!(stats.moves, 100);

    // Once the history is full, output stays well inside the raw shake
    for (x, y) in &positions[10..] {
        assert!((x - 200.0).abs() < 1.0, "x={x}");
        assert!((y - 150.0).abs() < 1.0, "y={y}");
    }
}

#[test]
fn test_slow_movement_is_tracked() {
    // 1px every 50ms = 0.02 px/ms, below the default 0.05 px/ms
    let input: String = (0..60_u64).map(|i| format!("move {i} 0 {}\n", i * 50)).collect();

    let (positions, _) = replay(AppConfig::default(), &input);

    // With capacity 5 the lag settles at 0.7 * 2 = 1.4px
    let (last_x, _) = positions[positions.len() - 1];
    assert!((last_x - (59.0 - 1.4)).abs() < 1e-9);
}

#[test]
fn test_commands_in_stream() {
    let input = "\
# start stabilizing a burst
0 0 0
10 0 10
toggle
20 0 20
toggle
30 0 30
smoothing-
threshold+
reset
";
    let (positions, stats) = replay(AppConfig::default(), input);

    assert_eq!(stats, RunStats { moves: 4, commands: 5, skipped: 0 });
    assert_eq!(positions, vec![(0.0, 0.0), (5.0, 0.0), (20.0, 0.0), (30.0, 0.0)]);
}

#[test]
fn test_csv_output_from_file_reader() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    std::io::Write::write_all(&mut file, b"1,2,0\n").unwrap();

    let config = AppConfig {
        output: OutputConfig {
            format: OutputFormat::Csv,
            include_raw: false,
        },
        ..AppConfig::default()
    };
    let mut app = StabilizerApp::new(config).unwrap();
    let reader = BufReader::new(std::fs::File::open(file.path()).unwrap());
    let mut output = Vec::<u8>::new();
    app.run(reader, &mut output).unwrap();

    assert_eq!(String::from_utf8(output).unwrap(), "1,2\n");
}

#[test]
fn test_unknown_filter_is_rejected() {
    let config = AppConfig {
        filter_type: "spring".to_string(),
        ..AppConfig::default()
    };
    assert!(StabilizerApp::new(config).is_err());
}

#[test]
fn test_passthrough_filter() {
    let config = AppConfig {
        filter_type: "none".to_string(),
        ..AppConfig::default()
    };
    let (positions, _) = replay(config, "5 5 0\n100 100 1\n");
    assert_eq!(positions, vec![(5.0, 5.0), (100.0, 100.0)]);
}
