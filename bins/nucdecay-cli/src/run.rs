//! One generation run: initialize, shoot, write the event file.

use std::fs::File;
use std::io::{BufWriter, Write};

use anyhow::{Context, Result};
use serde::Serialize;
use tracing::{debug, info};

use nucdecay_core::event::Event;
use nucdecay_core::random::RandUniform;
use nucdecay_core::types::DecayCategory;
use nucdecay_gen::DecayGenerator;
use nucdecay_gen::nuclides::{DBD_NUCLIDES, DbdNuclide};
use nucdecay_gen::schemes::{self, DecayScheme};
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand_distr::{Distribution, Exp};

use crate::config::RunConfig;
use crate::writer::{RunInfo, write_event, write_header};

#[derive(Debug, Clone, PartialEq)]
pub struct RunSummary {
    pub events: usize,
    pub attempts: u64,
    pub weight: Option<f64>,
}

/// Generate `config.events` events and write them to `config.output`.
///
/// With `dump` set, every event is also printed there in readable form.
pub fn execute(config: &RunConfig, mut dump: Option<&mut dyn Write>) -> Result<RunSummary> {
    config.validate()?;

    let mut generator = DecayGenerator::with_config(config.decay.clone());
    generator.set_max_attempts(config.max_attempts)?;
    generator.initialize().context("failed to initialize the decay generator")?;
    if let Some(description) = generator.sampler_description() {
        info!(sampler = %description, "generator ready");
    }

    let mut prng = RandUniform::new(StdRng::seed_from_u64(config.seed));
    let flags = config.store_flags();
    let decay_timer = Exp::new(config.activity).context("invalid source activity")?;

    // The window weight is only known once every event is drawn, so the body
    // is buffered and written after the header.
    let mut body = Vec::new();
    let mut event = Event::with_capacity(8);
    for number in 0..config.events {
        event.reset();
        generator
            .shoot(&mut prng, &mut event)
            .with_context(|| format!("failed to generate event {number}"))?;
        event.set_time(decay_timer.sample(prng.engine_mut()));

        if let Some(mut out) = dump.as_deref_mut() {
            event.print(&mut out, "Decay event:", "[debug] ")?;
        }
        write_event(&mut body, number, &event, flags)?;
    }

    let summary = RunSummary {
        events: config.events,
        attempts: generator.attempts(),
        weight: generator.has_energy_window().then(|| generator.normalization_weight()).flatten(),
    };
    debug!(attempts = summary.attempts, weight = ?summary.weight, "generation finished");

    let file = File::create(&config.output)
        .with_context(|| format!("failed to create {}", config.output.display()))?;
    let mut out = BufWriter::new(file);
    let run_info = RunInfo {
        seed: config.seed,
        activity: config.activity,
        nevents: config.events,
        decay: generator.config(),
        weight: summary.weight,
        flags,
    };
    write_header(&mut out, &run_info)?;
    out.write_all(&body)?;
    out.flush()
        .with_context(|| format!("failed to write {}", config.output.display()))?;

    generator.reset();
    Ok(summary)
}

/// Shipped isotope tables, as listed by `--list`.
#[derive(Serialize, Debug)]
pub struct Catalog {
    pub double_beta: &'static [DbdNuclide],
    pub single_beta: &'static [DecayScheme],
    pub background: &'static [DecayScheme],
}

pub fn catalog() -> Catalog {
    Catalog {
        double_beta: DBD_NUCLIDES,
        single_beta: schemes::schemes(DecayCategory::SingleBeta),
        background: schemes::schemes(DecayCategory::Background),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nucdecay_core::types::{DbdMode, DecayConfig};
    use std::io::{BufRead, BufReader, Cursor};

    fn config_in(dir: &tempfile::TempDir, decay: DecayConfig) -> RunConfig {
        RunConfig {
            output: dir.path().join("events.data"),
            decay,
            ..RunConfig::default()
        }
    }

    /// Read back every numbered event of an event file.
    fn read_events(config: &RunConfig) -> Vec<Event> {
        let text = std::fs::read_to_string(&config.output).unwrap();
        let body: String = text
            .lines()
            .skip_while(|l| l.starts_with('#') || l.is_empty())
            .map(|l| format!("{l}\n"))
            .collect();
        let mut reader = Cursor::new(body);
        let mut events = Vec::new();
        for number in 0..config.events {
            let mut line = String::new();
            reader.read_line(&mut line).unwrap();
            assert_eq!(line.trim(), number.to_string());
            let mut event = Event::new();
            event.load(&mut reader, config.store_flags()).unwrap();
            events.push(event);
        }
        events
    }

    #[test]
    fn default_run_writes_header_and_events() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_in(&dir, RunConfig::default().decay);
        let summary = execute(&config, None).unwrap();
        assert_eq!(summary.events, 10);
        let w = summary.weight.unwrap();
        assert!(w > 0.0 && w < 1.0);

        let text = std::fs::read_to_string(&config.output).unwrap();
        assert!(text.starts_with("#!nucdecay "));
        assert!(text.contains(&format!("#@toallevents={w}\n")));

        for event in read_events(&config) {
            assert!(event.time >= 0.0);
            let esum = event.total_kinetic_energy();
            assert!((2.0..=4.3).contains(&esum), "{esum}");
        }
    }

    #[test]
    fn event_times_follow_source_activity() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = config_in(&dir, DecayConfig::source(DecayCategory::SingleBeta, "H3"));
        config.events = 4_000;
        config.activity = 4.0;
        execute(&config, None).unwrap();

        let times: Vec<f64> = read_events(&config).iter().map(|e| e.time).collect();
        assert!(times.iter().all(|&t| t >= 0.0 && t.is_finite()));
        // Mean waiting time of a Poisson source is 1 / activity.
        let mean = times.iter().sum::<f64>() / times.len() as f64;
        assert!((mean - 0.25).abs() < 0.02, "mean event time {mean}");
    }

    #[test]
    fn same_seed_same_file() {
        let dir = tempfile::tempdir().unwrap();
        let mut a = config_in(&dir, DecayConfig::source(DecayCategory::Background, "Co60"));
        a.output = dir.path().join("a.data");
        let mut b = a.clone();
        b.output = dir.path().join("b.data");
        execute(&a, None).unwrap();
        execute(&b, None).unwrap();
        assert_eq!(
            std::fs::read(&a.output).unwrap(),
            std::fs::read(&b.output).unwrap()
        );
    }

    #[test]
    fn no_window_has_no_weight() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_in(&dir, DecayConfig::dbd("Xe136", 0, DbdMode::NeutrinolessMass));
        let summary = execute(&config, None).unwrap();
        assert_eq!(summary.weight, None);
        assert_eq!(summary.attempts, 10);
    }

    #[test]
    fn dump_prints_each_event() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = config_in(&dir, DecayConfig::source(DecayCategory::SingleBeta, "P32"));
        config.events = 3;
        let mut dump = Vec::new();
        execute(&config, Some(&mut dump as &mut dyn Write)).unwrap();
        let text = String::from_utf8(dump).unwrap();
        assert_eq!(text.matches("[debug] Decay event:").count(), 3);
    }

    #[test]
    fn invalid_configuration_reports_context() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_in(&dir, DecayConfig::dbd("Mo100", 9, DbdMode::TwoNeutrino));
        let err = execute(&config, None).unwrap_err();
        assert!(err.to_string().contains("failed to initialize"));
        assert!(!config.output.exists());
    }

    #[test]
    fn catalog_serializes_all_tables() {
        let json = serde_json::to_value(catalog()).unwrap();
        assert_eq!(json["double_beta"].as_array().unwrap().len(), 9);
        assert_eq!(json["single_beta"][0]["name"], "H3");
        assert!(json["background"].as_array().unwrap().iter().any(|s| s["name"] == "Am241"));
    }

    #[test]
    fn output_lines_are_readable() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = config_in(&dir, DecayConfig::source(DecayCategory::Background, "K40"));
        config.store_names = false;
        execute(&config, None).unwrap();
        let file = File::open(&config.output).unwrap();
        let count = BufReader::new(file)
            .lines()
            .filter(|l| l.as_ref().is_ok_and(|l| l.starts_with("#@")))
            .count();
        // seed, activity, nevents, category, nuclide, level, mode, start, stop
        assert_eq!(count, 9);
    }
}
