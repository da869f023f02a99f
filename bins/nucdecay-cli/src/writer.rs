//! Event file layout: run-info header followed by numbered events.

use std::io::{self, Write};

use nucdecay_core::event::{Event, StoreFlags};
use nucdecay_core::types::DecayConfig;

/// Metadata written at the top of an event file.
#[derive(Debug, Clone)]
pub struct RunInfo<'a> {
    pub seed: u64,
    pub activity: f64,
    pub nevents: usize,
    pub decay: &'a DecayConfig,
    /// Normalization weight of the energy window, if one is set.
    pub weight: Option<f64>,
    pub flags: StoreFlags,
}

pub fn write_header<W: Write>(out: &mut W, info: &RunInfo<'_>) -> io::Result<()> {
    writeln!(out, "#!nucdecay {}", env!("CARGO_PKG_VERSION"))?;
    writeln!(out, "#@run_info_start")?;
    writeln!(out, "#@seed={}", info.seed)?;
    writeln!(out, "#@activity={} Bq", info.activity)?;
    writeln!(out, "#@nevents={}", info.nevents)?;
    match info.decay.category {
        Some(category) => writeln!(out, "#@category={category}")?,
        None => writeln!(out, "#@category=")?,
    }
    writeln!(out, "#@nuclide={}", info.decay.isotope.as_deref().unwrap_or(""))?;
    writeln!(out, "#@daughter_level={}", info.decay.level)?;
    match info.decay.mode {
        Some(mode) => writeln!(out, "#@dbd_mode={mode}")?,
        None => writeln!(out, "#@dbd_mode=0")?,
    }
    if let Some(window) = info.decay.energy_window {
        writeln!(out, "#@min_energy={} MeV", window.lower)?;
        writeln!(out, "#@max_energy={} MeV", window.upper)?;
        match info.weight {
            Some(w) => writeln!(out, "#@toallevents={w}")?,
            None => writeln!(out, "#@toallevents=")?,
        }
    }
    writeln!(out, "#@run_info_stop")?;

    writeln!(out, "#")?;
    writeln!(out, "# Format of an event (time in second, momentum in MeV/c):")?;
    writeln!(out, "#")?;
    writeln!(out, "#   event-number")?;
    if info.flags.contains(StoreFlags::EVENT_TIME) {
        writeln!(out, "#   event-time")?;
    }
    writeln!(out, "#   number-of-particles")?;
    let name = if info.flags.contains(StoreFlags::PARTICLE_NAME) { " name" } else { "" };
    writeln!(out, "#   code-particle1 time1 px1 py1 pz1{name}")?;
    writeln!(out, "#   ...")?;
    writeln!(out, "#   code-particleN timeN pxN pyN pzN{name}")?;
    writeln!(out, "#")?;
    writeln!(out)
}

/// Write the event number line followed by the stored event.
pub fn write_event<W: Write>(
    out: &mut W,
    number: usize,
    event: &Event,
    flags: StoreFlags,
) -> io::Result<()> {
    writeln!(out, "{number}")?;
    event.store(out, flags)
}
